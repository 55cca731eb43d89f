//! Custom-property substitution
//!
//! Declarations whose value carries a `var()` reference are substituted
//! during the cascade's variable pass, after all custom-property
//! definitions for the element have been collected. An undefined variable
//! with no fallback, a reference chain deeper than the bound, or a cycle
//! drops the declaration; per CSS error recovery nothing else happens.

use crate::style::computed::CustomPropertyMap;
use crate::style::declaration::{PropertyValue, VarReference};
use std::sync::Arc;

/// Bound on chained `var()` indirections. Deeper chains are treated as
/// unresolvable.
pub const MAX_SUBSTITUTION_DEPTH: usize = 16;

/// Substitutes every `var()` reference in `value` from `store`.
///
/// Returns `None` when any reference cannot be resolved; the caller drops
/// the owning declaration.
pub fn substitute(value: &PropertyValue, store: &CustomPropertyMap) -> Option<PropertyValue> {
  let mut resolving = Vec::new();
  substitute_inner(value, store, &mut resolving, 0)
}

fn substitute_inner(
  value: &PropertyValue,
  store: &CustomPropertyMap,
  resolving: &mut Vec<Arc<str>>,
  depth: usize,
) -> Option<PropertyValue> {
  if depth > MAX_SUBSTITUTION_DEPTH {
    return None;
  }
  match value {
    PropertyValue::Var(reference) => resolve_reference(reference, store, resolving, depth),
    PropertyValue::List(items) => {
      let mut resolved = Vec::with_capacity(items.len());
      for item in items {
        resolved.push(substitute_inner(item, store, resolving, depth + 1)?);
      }
      Some(PropertyValue::List(resolved))
    }
    PropertyValue::Pair(first, second) => Some(PropertyValue::Pair(
      Box::new(substitute_inner(first, store, resolving, depth + 1)?),
      Box::new(substitute_inner(second, store, resolving, depth + 1)?),
    )),
    other => Some(other.clone()),
  }
}

fn resolve_reference(
  reference: &VarReference,
  store: &CustomPropertyMap,
  resolving: &mut Vec<Arc<str>>,
  depth: usize,
) -> Option<PropertyValue> {
  // A name already on the resolution stack means the chain loops back on
  // itself; the whole substitution fails, fallbacks included.
  if resolving.iter().any(|name| *name == reference.name) {
    return None;
  }
  // The fallback only covers an *undefined* variable. A defined variable
  // that fails to resolve (cycle, over-deep chain) poisons the whole
  // substitution.
  if let Some(stored) = store.get(&reference.name) {
    resolving.push(Arc::clone(&reference.name));
    let resolved = substitute_inner(stored, store, resolving, depth + 1);
    resolving.pop();
    return resolved;
  }
  let fallback = reference.fallback.as_deref()?;
  substitute_inner(fallback, store, resolving, depth + 1)
}

#[cfg(test)]
mod tests {
  use super::*;
  use rustc_hash::FxHashMap;

  fn var(name: &str) -> PropertyValue {
    PropertyValue::Var(VarReference {
      name: Arc::from(name),
      fallback: None,
    })
  }

  fn var_with_fallback(name: &str, fallback: PropertyValue) -> PropertyValue {
    PropertyValue::Var(VarReference {
      name: Arc::from(name),
      fallback: Some(Box::new(fallback)),
    })
  }

  #[test]
  fn resolves_a_simple_reference() {
    let mut store: CustomPropertyMap = FxHashMap::default();
    store.insert(Arc::from("--size"), PropertyValue::Number(4.0));
    assert_eq!(
      substitute(&var("--size"), &store),
      Some(PropertyValue::Number(4.0))
    );
  }

  #[test]
  fn resolves_through_a_chain() {
    let mut store: CustomPropertyMap = FxHashMap::default();
    store.insert(Arc::from("--a"), var("--b"));
    store.insert(Arc::from("--b"), PropertyValue::Keyword("block".into()));
    assert_eq!(
      substitute(&var("--a"), &store),
      Some(PropertyValue::Keyword("block".into()))
    );
  }

  #[test]
  fn undefined_reference_uses_fallback() {
    let store: CustomPropertyMap = FxHashMap::default();
    assert_eq!(substitute(&var("--missing"), &store), None);
    assert_eq!(
      substitute(
        &var_with_fallback("--missing", PropertyValue::Number(1.0)),
        &store
      ),
      Some(PropertyValue::Number(1.0))
    );
  }

  #[test]
  fn self_reference_is_a_cycle() {
    let mut store: CustomPropertyMap = FxHashMap::default();
    store.insert(Arc::from("--a"), var("--a"));
    assert_eq!(substitute(&var("--a"), &store), None);
  }

  #[test]
  fn mutual_cycle_fails_even_with_fallback_inside() {
    let mut store: CustomPropertyMap = FxHashMap::default();
    store.insert(Arc::from("--a"), var("--b"));
    store.insert(
      Arc::from("--b"),
      var_with_fallback("--a", PropertyValue::Number(9.0)),
    );
    // --b is defined, so its fallback never applies; the cycle through
    // --a poisons the chain and the declaration is dropped.
    assert_eq!(substitute(&var("--a"), &store), None);
  }

  #[test]
  fn substitutes_inside_lists_and_pairs() {
    let mut store: CustomPropertyMap = FxHashMap::default();
    store.insert(Arc::from("--x"), PropertyValue::Number(2.0));
    let list = PropertyValue::List(vec![PropertyValue::Number(1.0), var("--x")]);
    assert_eq!(
      substitute(&list, &store),
      Some(PropertyValue::List(vec![
        PropertyValue::Number(1.0),
        PropertyValue::Number(2.0)
      ]))
    );
    let pair = PropertyValue::Pair(Box::new(var("--x")), Box::new(var("--missing")));
    assert_eq!(substitute(&pair, &store), None);
  }

  #[test]
  fn depth_limit_cuts_long_chains() {
    let mut store: CustomPropertyMap = FxHashMap::default();
    for i in 0..(MAX_SUBSTITUTION_DEPTH + 2) {
      store.insert(
        Arc::from(format!("--v{i}").as_str()),
        var(&format!("--v{}", i + 1)),
      );
    }
    assert_eq!(substitute(&var("--v0"), &store), None);
  }
}

//! Style-sharing integration tests: record identity reuse across siblings
//! and cousins, disqualification rules, and search budgets.

mod common;

use common::*;
use faststyle::dom::DocumentSettings;
use faststyle::{MatchResult, PropertyId, StyleEngine};
use std::sync::Arc;

fn engine() -> StyleEngine {
  StyleEngine::new(DocumentSettings::default())
}

fn resolved_sibling(engine: &mut StyleEngine, tag: &str) -> TestElement {
  let element = TestElement::new(tag);
  let matched = author_match(vec![decl(PropertyId::Display, kw("block"))]);
  let style = engine.resolve_style(&element, &matched);
  TestElement::new(tag).with_resolved(style)
}

#[test]
fn identical_siblings_share_one_style_record() {
  let mut engine = engine();
  let sibling = resolved_sibling(&mut engine, "li");
  let shared = sibling.resolved.clone().unwrap();

  let element = TestElement::new("li").with_prev_sibling(sibling);
  let matched = author_match(vec![decl(PropertyId::Display, kw("block"))]);
  let style = engine.resolve_style(&element, &matched);
  // Same record identity, not a copy.
  assert!(Arc::ptr_eq(&style, &shared));
}

#[test]
fn inline_style_forces_a_separate_record() {
  let mut engine = engine();
  let sibling = resolved_sibling(&mut engine, "li");
  let shared = sibling.resolved.clone().unwrap();

  let element = TestElement::new("li")
    .with_prev_sibling(sibling)
    .with_inline_style();
  let style = engine.resolve_style(&element, &MatchResult::new());
  assert!(!Arc::ptr_eq(&style, &shared));
}

#[test]
fn differing_tag_class_or_state_disqualifies_candidates() {
  let mut engine = engine();

  // Tag mismatch.
  let sibling = resolved_sibling(&mut engine, "li");
  let shared = sibling.resolved.clone().unwrap();
  let element = TestElement::new("p").with_prev_sibling(sibling);
  let style = engine.resolve_style(&element, &MatchResult::new());
  assert!(!Arc::ptr_eq(&style, &shared));

  // Class mismatch.
  let sibling = resolved_sibling(&mut engine, "li").with_classes(&["odd"]);
  let shared = sibling.resolved.clone().unwrap();
  let element = TestElement::new("li")
    .with_classes(&["even"])
    .with_prev_sibling(sibling);
  let style = engine.resolve_style(&element, &MatchResult::new());
  assert!(!Arc::ptr_eq(&style, &shared));

  // Hover state mismatch.
  let sibling = resolved_sibling(&mut engine, "li");
  let shared = sibling.resolved.clone().unwrap();
  let mut element = TestElement::new("li").with_prev_sibling(sibling);
  element.hovered = true;
  let style = engine.resolve_style(&element, &MatchResult::new());
  assert!(!Arc::ptr_eq(&style, &shared));
}

#[test]
fn an_id_on_the_candidate_disqualifies_it() {
  let mut engine = engine();
  let mut sibling = resolved_sibling(&mut engine, "li");
  sibling.id = Some("first".into());
  let shared = sibling.resolved.clone().unwrap();
  let element = TestElement::new("li").with_prev_sibling(sibling);
  let style = engine.resolve_style(&element, &MatchResult::new());
  assert!(!Arc::ptr_eq(&style, &shared));
}

#[test]
fn search_skips_non_matching_siblings_within_budget() {
  let mut engine = engine();
  let candidate = resolved_sibling(&mut engine, "li");
  let shared = candidate.resolved.clone().unwrap();

  // A few non-matching siblings sit between the element and the
  // candidate.
  let mut chain = candidate;
  for _ in 0..3 {
    chain = TestElement::new("p").with_prev_sibling(chain);
  }
  let element = TestElement::new("li").with_prev_sibling(chain);
  let style = engine.resolve_style(&element, &MatchResult::new());
  assert!(Arc::ptr_eq(&style, &shared));
}

#[test]
fn sibling_budget_bounds_the_search() {
  let mut engine = engine();
  let candidate = resolved_sibling(&mut engine, "li");
  let shared = candidate.resolved.clone().unwrap();

  // Push the only matching candidate past the per-level budget.
  let mut chain = candidate;
  for _ in 0..faststyle::style::sharing::SIBLING_SEARCH_BUDGET {
    chain = TestElement::new("p").with_prev_sibling(chain);
  }
  let element = TestElement::new("li").with_prev_sibling(chain);
  let style = engine.resolve_style(&element, &MatchResult::new());
  assert!(!Arc::ptr_eq(&style, &shared));
}

#[test]
fn cousins_share_through_the_last_descendant_chain() {
  let mut engine = engine();
  let cousin = resolved_sibling(&mut engine, "li");
  let shared = cousin.resolved.clone().unwrap();

  // parent's previous sibling (the uncle) holds the cousin as its last
  // child.
  let uncle = TestElement::new("ul").with_last_child(cousin);
  let parent = TestElement::new("ul").with_prev_sibling(uncle);
  let element = TestElement::new("li").with_parent(parent);
  let style = engine.resolve_style(&element, &MatchResult::new());
  assert!(Arc::ptr_eq(&style, &shared));
}

#[test]
fn shared_records_survive_unrelated_declarations_on_others() {
  // Sharing returns the candidate record untouched; resolving a third,
  // different element must not mutate it.
  let mut engine = engine();
  let sibling = resolved_sibling(&mut engine, "li");
  let shared = sibling.resolved.clone().unwrap();
  let snapshot = (*shared).clone();

  let element = TestElement::new("li").with_prev_sibling(sibling);
  let _ = engine.resolve_style(&element, &MatchResult::new());

  let other = author_match(vec![decl(PropertyId::Display, kw("grid"))]);
  let _ = engine.resolve_style(&TestElement::new("div"), &other);
  assert_eq!(*shared, snapshot);
}

//! Style sharing
//!
//! Before running a full cascade, the engine searches preceding siblings and
//! cousins for an element whose resolved style can be reused as-is. The
//! search is bounded by two budgets so a pathological tree cannot turn the
//! fast path into a slow one, and the expensive rule-feature queries
//! (sibling combinators, uncommon attribute selectors) run only after a
//! structurally equal candidate has been found.

use crate::dom::{ElementSource, RuleFeatureQuery};
use crate::style::computed::ComputedStyle;
use std::sync::Arc;

/// Candidates examined per sibling/cousin list
pub const SIBLING_SEARCH_BUDGET: usize = 10;

/// Ancestor levels climbed while looking for cousin lists
pub const COUSIN_LEVEL_BUDGET: usize = 10;

/// Attempts to reuse a previously resolved style for `element`.
///
/// On success the returned record is shared by reference; no strategy table
/// invocation happens at all.
pub fn locate_shared_style<E: ElementSource>(element: &E) -> Option<Arc<ComputedStyle>> {
  if !element_can_share(element) {
    return None;
  }

  let candidate = find_sibling_candidate(element).or_else(|| find_cousin_candidate(element))?;
  let style = candidate.resolved_style()?;
  if style.unique {
    return None;
  }

  // Checked last because these queries walk rule features in the external
  // matcher; most searches never get here.
  if element.matches_rule_features(RuleFeatureQuery::SiblingRules)
    || element.matches_rule_features(RuleFeatureQuery::UncommonAttributeRules)
    || candidate.matches_rule_features(RuleFeatureQuery::SiblingRules)
    || candidate.matches_rule_features(RuleFeatureQuery::UncommonAttributeRules)
  {
    return None;
  }
  log::trace!("sharing style with a previous {} element", element.tag_name());
  Some(style)
}

/// An element can only adopt a sibling's style when nothing element-local
/// could have altered its matched rules. Without selector knowledge an id
/// is assumed to be targeted by id selectors.
fn element_can_share<E: ElementSource>(element: &E) -> bool {
  !element.has_inline_style() && element.id().is_none()
}

fn find_sibling_candidate<E: ElementSource>(element: &E) -> Option<&E> {
  let mut budget = SIBLING_SEARCH_BUDGET;
  let mut current = element.prev_sibling();
  while let Some(candidate) = current {
    if budget == 0 {
      return None;
    }
    budget -= 1;
    if candidates_are_similar(element, candidate) {
      return Some(candidate);
    }
    current = candidate.prev_sibling();
  }
  None
}

/// Walks ancestors' preceding siblings, descending each one's last-child
/// chain — the "cousin" lists.
fn find_cousin_candidate<E: ElementSource>(element: &E) -> Option<&E> {
  let mut levels = COUSIN_LEVEL_BUDGET;
  let mut ancestor = element.parent();
  while let Some(current) = ancestor {
    if levels == 0 {
      return None;
    }
    levels -= 1;

    let mut budget = SIBLING_SEARCH_BUDGET;
    let mut uncle = current.prev_sibling();
    while let Some(candidate_root) = uncle {
      if budget == 0 {
        break;
      }
      budget -= 1;
      if let Some(cousin) = last_descendant_candidate(element, candidate_root) {
        return Some(cousin);
      }
      uncle = candidate_root.prev_sibling();
    }
    ancestor = current.parent();
  }
  None
}

fn last_descendant_candidate<'a, E: ElementSource>(element: &E, root: &'a E) -> Option<&'a E> {
  let mut depth = COUSIN_LEVEL_BUDGET;
  let mut current = root;
  loop {
    if candidates_are_similar(element, current) {
      return Some(current);
    }
    if depth == 0 {
      return None;
    }
    depth -= 1;
    current = current.last_child()?;
  }
}

/// Structural equivalence between the element and a candidate.
fn candidates_are_similar<E: ElementSource>(element: &E, candidate: &E) -> bool {
  candidate.tag_name() == element.tag_name()
    && candidate.role() == element.role()
    && candidate.link_state() == element.link_state()
    && candidate.is_hovered() == element.is_hovered()
    && candidate.is_active() == element.is_active()
    && candidate.is_focused() == element.is_focused()
    && !candidate.has_inline_style()
    && candidate.id().is_none()
    && candidate.classes() == element.classes()
    && candidate.presentation_attribute_fingerprint() == element.presentation_attribute_fingerprint()
    && candidate.is_form_control() == element.is_form_control()
    && (!element.is_form_control()
      || candidate.control_state_fingerprint() == element.control_state_fingerprint())
}

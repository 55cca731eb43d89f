//! Matched-properties cache integration tests: fast path, inherited-only
//! partial path, eligibility rules and invalidation.

mod common;

use common::*;
use faststyle::dom::DocumentSettings;
use faststyle::style::types::Display;
use faststyle::{ComputedStyle, MatchResult, PropertyId, PropertyValue, Rgba, StyleEngine};
use std::sync::Arc;

fn engine() -> StyleEngine {
  StyleEngine::new(DocumentSettings::default())
}

#[test]
fn repeated_resolution_is_bit_identical_through_the_cache() {
  let mut engine = engine();
  let parent = Arc::new(ComputedStyle::initial());
  let matched = author_match(vec![
    decl(PropertyId::Display, kw("flex")),
    decl(PropertyId::Opacity, PropertyValue::Number(0.5)),
    decl(PropertyId::Width, px(120.0)),
  ]);

  let element = TestElement::new("div")
    .with_parent(TestElement::new("body").with_resolved(Arc::clone(&parent)));
  let cold = engine.resolve_style(&element, &matched);
  assert_eq!(engine.matched_properties_cache_len(), 1);

  // Same match result, same parent: the cache fast path must produce the
  // same observable style as the cold path.
  let warm = engine.resolve_style(&element, &matched);
  assert_eq!(engine.matched_properties_cache_len(), 1);
  assert_eq!(*cold, *warm);
}

#[test]
fn fast_path_keeps_declared_inherited_properties() {
  let mut engine = engine();
  let parent = Arc::new(ComputedStyle::initial());
  let matched = author_match(vec![
    decl(PropertyId::Color, PropertyValue::Color(Rgba::rgb(200, 0, 0))),
    decl(PropertyId::Display, kw("flex")),
  ]);
  let element = TestElement::new("div")
    .with_parent(TestElement::new("body").with_resolved(Arc::clone(&parent)));
  let cold = engine.resolve_style(&element, &matched);
  assert_eq!(cold.color(), Rgba::rgb(200, 0, 0));

  // The fast path copies inherited properties from the cached style, not
  // from the parent, so the declared color survives the hit.
  let warm = engine.resolve_style(&element, &matched);
  assert_eq!(warm.color(), Rgba::rgb(200, 0, 0));
  assert_eq!(*cold, *warm);
}

#[test]
fn partial_path_recomputes_inherited_properties_only() {
  let mut engine = engine();
  let matched = author_match(vec![
    decl(PropertyId::Display, kw("flex")),
    decl(PropertyId::Width, px(80.0)),
  ]);

  let red_parent = {
    let mut style = ComputedStyle::initial();
    style.set_color(Rgba::rgb(255, 0, 0));
    Arc::new(style)
  };
  let element = TestElement::new("div")
    .with_parent(TestElement::new("body").with_resolved(red_parent));
  let first = engine.resolve_style(&element, &matched);
  assert_eq!(first.color(), Rgba::rgb(255, 0, 0));
  assert_eq!(engine.matched_properties_cache_len(), 1);

  // A different parent with different inherited values still reuses the
  // cached non-inherited baseline.
  let green_parent = {
    let mut style = ComputedStyle::initial();
    style.set_color(Rgba::rgb(0, 255, 0));
    Arc::new(style)
  };
  let element = TestElement::new("div")
    .with_parent(TestElement::new("body").with_resolved(green_parent));
  let second = engine.resolve_style(&element, &matched);
  assert_eq!(second.display, Display::Flex);
  assert_eq!(second.width, first.width);
  assert_eq!(second.color(), Rgba::rgb(0, 255, 0));
}

#[test]
fn font_change_on_the_partial_path_falls_back_to_full_resolution() {
  let mut engine = engine();
  // font-size is inherited, so the partial path re-applies it; a parent
  // with a different font size must not poison font-relative lengths.
  let matched = author_match(vec![
    decl(PropertyId::FontSize, PropertyValue::Length(faststyle::Length::em(2.0))),
    decl(PropertyId::PaddingLeft, PropertyValue::Length(faststyle::Length::em(1.0))),
  ]);

  let parent_16 = Arc::new(ComputedStyle::initial());
  let element = TestElement::new("div")
    .with_parent(TestElement::new("body").with_resolved(parent_16));
  let first = engine.resolve_style(&element, &matched);
  assert_eq!(first.font_size(), 32.0);

  let parent_20 = {
    let mut style = ComputedStyle::initial();
    style.font_mut().computed_size = 20.0;
    Arc::new(style)
  };
  let element = TestElement::new("div")
    .with_parent(TestElement::new("body").with_resolved(parent_20));
  let second = engine.resolve_style(&element, &matched);
  assert_eq!(second.font_size(), 40.0);
  // Font-relative lengths keep their unit in the computed value.
  assert_eq!(second.padding_left, faststyle::Length::em(1.0));
}

#[test]
fn uncacheable_match_results_are_not_memoized() {
  let mut engine = engine();
  let mut matched = author_match(vec![decl(PropertyId::Display, kw("block"))]);
  matched.is_cacheable = false;
  let _ = engine.resolve_style(&TestElement::new("div"), &matched);
  assert_eq!(engine.matched_properties_cache_len(), 0);
}

#[test]
fn ua_appearance_disqualifies_caching() {
  let mut engine = engine();
  let matched = author_match(vec![decl(PropertyId::Appearance, kw("checkbox"))]);
  let _ = engine.resolve_style(&TestElement::new("input"), &matched);
  assert_eq!(engine.matched_properties_cache_len(), 0);
}

#[test]
fn zoom_disqualifies_caching() {
  let mut engine = engine();
  let matched = author_match(vec![decl(PropertyId::Zoom, PropertyValue::Number(2.0))]);
  let _ = engine.resolve_style(&TestElement::new("div"), &matched);
  assert_eq!(engine.matched_properties_cache_len(), 0);
}

#[test]
fn explicit_inheritance_on_the_parent_disqualifies_caching() {
  let mut engine = engine();
  let parent_matched = author_match(vec![decl(PropertyId::Display, kw("inherit"))]);
  let parent_style = engine.resolve_style(&TestElement::new("div"), &parent_matched);
  assert!(parent_style.has_explicit_inheritance);
  let cached_after_parent = engine.matched_properties_cache_len();

  let element =
    TestElement::new("span").with_parent(TestElement::new("div").with_resolved(parent_style));
  let matched = author_match(vec![decl(PropertyId::Opacity, PropertyValue::Number(0.5))]);
  let _ = engine.resolve_style(&element, &matched);
  assert_eq!(engine.matched_properties_cache_len(), cached_after_parent);
}

#[test]
fn invalidation_clears_memoized_entries() {
  let mut engine = engine();
  let matched = author_match(vec![decl(PropertyId::Display, kw("block"))]);
  let _ = engine.resolve_style(&TestElement::new("div"), &matched);
  assert_eq!(engine.matched_properties_cache_len(), 1);
  engine.invalidate_matched_properties_cache();
  assert_eq!(engine.matched_properties_cache_len(), 0);
}

#[test]
fn different_match_results_get_separate_entries() {
  let mut engine = engine();
  let a = author_match(vec![decl(PropertyId::Display, kw("block"))]);
  let b = author_match(vec![decl(PropertyId::Display, kw("flex"))]);
  let style_a = engine.resolve_style(&TestElement::new("div"), &a);
  let style_b = engine.resolve_style(&TestElement::new("div"), &b);
  assert_eq!(engine.matched_properties_cache_len(), 2);
  assert_eq!(style_a.display, Display::Block);
  assert_eq!(style_b.display, Display::Flex);
}

#[test]
fn empty_match_results_share_one_entry() {
  let mut engine = engine();
  let _ = engine.resolve_style(&TestElement::new("div"), &MatchResult::new());
  let _ = engine.resolve_style(&TestElement::new("p"), &MatchResult::new());
  assert_eq!(engine.matched_properties_cache_len(), 1);
}

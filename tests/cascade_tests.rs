//! Cascade engine integration tests: pass ordering, inheritance, deferred
//! line-height, zoom, variables, adjustments and the resource post-pass.

mod common;

use common::*;
use faststyle::calc;
use faststyle::dom::{DocumentSettings, ElementRole, LinkState};
use faststyle::style::cascade::{ResourceLoader, ResourceStatus};
use faststyle::style::computed::LineHeight;
use faststyle::style::declaration::{
  Origin, PropertyWhitelist, VarReference, LINK_MATCH_VISITED,
};
use faststyle::style::types::*;
use faststyle::{
  ComputedStyle, Declaration, Length, MatchResult, PropertyId, PropertyValue, Rgba, StyleEngine,
};
use std::sync::Arc;

fn engine() -> StyleEngine {
  StyleEngine::new(DocumentSettings::default())
}

fn resolve(engine: &mut StyleEngine, matched: &MatchResult) -> Arc<ComputedStyle> {
  engine.resolve_style(&TestElement::new("div"), matched)
}

#[test]
fn no_declarations_yields_initial_values() {
  let mut engine = engine();
  let style = resolve(&mut engine, &MatchResult::new());
  assert_eq!(*style, ComputedStyle::initial());
}

#[test]
fn example_end_to_end_calc_width_and_inherited_color() {
  // { width: calc(50% - 10px); color: inherit; } under a red parent with a
  // 200px containing block resolves to width 90px and color red.
  let mut parent_style = ComputedStyle::initial();
  parent_style.set_color(Rgba::rgb(255, 0, 0));
  let parent = TestElement::new("div").with_resolved(Arc::new(parent_style));

  let tokens = calc::tokenize_str("50% - 10px").expect("lexes");
  let matched = author_match(vec![
    decl(PropertyId::Width, PropertyValue::Calc(Arc::from(tokens))),
    decl(PropertyId::Color, kw("inherit")),
  ]);

  let mut engine = engine();
  let element = TestElement::new("div").with_parent(parent);
  let style = engine.resolve_style(&element, &matched);

  assert_eq!(style.color(), Rgba::rgb(255, 0, 0));
  let width = style.width.length().expect("width is a length");
  assert_eq!(width.resolve_against(200.0), Some(90.0));
}

#[test]
fn author_declarations_override_ua_declarations() {
  let mut engine = engine();
  let matched = ua_and_author_match(
    vec![decl(PropertyId::Display, kw("block"))],
    vec![decl(PropertyId::Display, kw("flex"))],
  );
  let style = resolve(&mut engine, &matched);
  assert_eq!(style.display, Display::Flex);
}

#[test]
fn important_beats_normal_and_ua_important_beats_author_important() {
  let mut engine = engine();
  let matched = author_match(vec![
    Declaration::important(PropertyId::Display, kw("grid")),
    decl(PropertyId::Display, kw("flex")),
  ]);
  let style = resolve(&mut engine, &matched);
  assert_eq!(style.display, Display::Grid);

  let matched = ua_and_author_match(
    vec![Declaration::important(PropertyId::Display, kw("block"))],
    vec![Declaration::important(PropertyId::Display, kw("flex"))],
  );
  let style = resolve(&mut engine, &matched);
  assert_eq!(style.display, Display::Block);
}

#[test]
fn malformed_declarations_are_silently_dropped() {
  let mut engine = engine();
  let matched = author_match(vec![
    decl(PropertyId::Display, kw("block")),
    decl(PropertyId::Display, kw("not-a-display")),
    decl(PropertyId::PaddingLeft, px(-5.0)),
    decl(
      PropertyId::Width,
      PropertyValue::Calc(Arc::from(calc::tokenize_str("2px * 3px").expect("lexes"))),
    ),
  ]);
  let style = resolve(&mut engine, &matched);
  assert_eq!(style.display, Display::Block);
  assert_eq!(style.padding_left, Length::zero());
  assert!(style.width.is_auto());
}

#[test]
fn line_height_applies_after_font_finalization() {
  let mut engine = engine();
  // line-height is declared before font-size but must resolve against the
  // finalized 32px font.
  let matched = author_match(vec![
    decl(PropertyId::LineHeight, PropertyValue::Length(Length::em(2.0))),
    decl(PropertyId::FontSize, px(32.0)),
  ]);
  let style = resolve(&mut engine, &matched);
  assert_eq!(style.font_size(), 32.0);
  assert_eq!(style.inherited().line_height, LineHeight::Px(64.0));
}

#[test]
fn percentage_line_height_resolves_against_font_size() {
  let mut engine = engine();
  let matched = author_match(vec![
    decl(PropertyId::FontSize, px(20.0)),
    decl(PropertyId::LineHeight, PropertyValue::Percentage(50.0)),
  ]);
  let style = resolve(&mut engine, &matched);
  assert_eq!(style.inherited().line_height, LineHeight::Px(10.0));
}

#[test]
fn zoom_scales_the_finalized_font_size() {
  let mut engine = engine();
  let matched = author_match(vec![
    decl(PropertyId::Zoom, PropertyValue::Number(2.0)),
    decl(PropertyId::FontSize, px(10.0)),
  ]);
  let style = resolve(&mut engine, &matched);
  assert_eq!(style.effective_zoom(), 2.0);
  assert_eq!(style.font_size(), 20.0);
}

#[test]
fn minimum_font_size_clamps() {
  let mut settings = DocumentSettings::default();
  settings.minimum_font_size = 12.0;
  let mut engine = StyleEngine::new(settings);
  let matched = author_match(vec![decl(PropertyId::FontSize, px(8.0))]);
  let style = resolve(&mut engine, &matched);
  assert_eq!(style.font_size(), 12.0);
}

#[test]
fn monospace_family_remaps_keyword_sizes() {
  let mut engine = engine();
  let matched = author_match(vec![
    decl(
      PropertyId::FontFamily,
      PropertyValue::FontFamilyList(vec!["monospace".into()]),
    ),
    decl(PropertyId::FontSize, kw("medium")),
  ]);
  let style = resolve(&mut engine, &matched);
  assert_eq!(style.font_size(), 13.0);
}

#[test]
fn relative_font_weight_resolves_against_parent() {
  let mut parent_style = ComputedStyle::initial();
  parent_style.font_mut().weight = faststyle::style::fonts::FontWeight(700);
  let parent = TestElement::new("div").with_resolved(Arc::new(parent_style));
  let element = TestElement::new("span").with_parent(parent);

  let mut engine = engine();
  let matched = author_match(vec![decl(PropertyId::FontWeight, kw("bolder"))]);
  let style = engine.resolve_style(&element, &matched);
  assert_eq!(style.font().weight, faststyle::style::fonts::FontWeight(900));
}

#[test]
fn inherit_keyword_copies_parent_for_non_inherited_properties() {
  let mut parent_style = ComputedStyle::initial();
  parent_style.display = Display::Grid;
  parent_style.box_shadow = vec![ShadowValue {
    offset_x: Length::px(1.0),
    offset_y: Length::px(2.0),
    blur: Length::zero(),
    spread: Length::zero(),
    color: Some(Rgba::BLACK),
    inset: false,
  }];
  let parent = TestElement::new("div").with_resolved(Arc::new(parent_style.clone()));
  let element = TestElement::new("div").with_parent(parent);

  let mut engine = engine();
  let matched = author_match(vec![
    decl(PropertyId::Display, kw("inherit")),
    decl(PropertyId::BoxShadow, kw("inherit")),
  ]);
  let style = engine.resolve_style(&element, &matched);
  assert_eq!(style.display, Display::Grid);
  assert_eq!(style.box_shadow, parent_style.box_shadow);
  // Explicit inheritance of non-inherited properties is flagged; styles
  // resolved against this one as parent stay out of the cache.
  assert!(style.has_explicit_inheritance);
}

#[test]
fn unset_falls_to_inherit_or_initial_by_inheritance() {
  let mut parent_style = ComputedStyle::initial();
  parent_style.set_color(Rgba::rgb(0, 128, 0));
  parent_style.display = Display::Grid;
  let parent = TestElement::new("div").with_resolved(Arc::new(parent_style));
  let element = TestElement::new("div").with_parent(parent);

  let mut engine = engine();
  let matched = author_match(vec![
    decl(PropertyId::Color, kw("unset")),
    decl(PropertyId::Display, kw("unset")),
  ]);
  let style = engine.resolve_style(&element, &matched);
  // color inherits, display resets.
  assert_eq!(style.color(), Rgba::rgb(0, 128, 0));
  assert_eq!(style.display, Display::Inline);
}

#[test]
fn shorthand_inherit_fans_out_to_longhands() {
  let mut parent_style = ComputedStyle::initial();
  parent_style.margin_top = faststyle::LengthOrAuto::px(7.0);
  parent_style.margin_left = faststyle::LengthOrAuto::px(9.0);
  let parent = TestElement::new("div").with_resolved(Arc::new(parent_style));
  let element = TestElement::new("div").with_parent(parent);

  let mut engine = engine();
  let matched = author_match(vec![decl(PropertyId::Margin, kw("inherit"))]);
  let style = engine.resolve_style(&element, &matched);
  assert_eq!(style.margin_top, faststyle::LengthOrAuto::px(7.0));
  assert_eq!(style.margin_left, faststyle::LengthOrAuto::px(9.0));
}

#[test]
fn custom_properties_substitute_before_application() {
  let mut engine = engine();
  let matched = author_match(vec![
    Declaration::custom("--mode", kw("flex")),
    decl(
      PropertyId::Display,
      PropertyValue::Var(VarReference {
        name: Arc::from("--mode"),
        fallback: None,
      }),
    ),
  ]);
  let style = resolve(&mut engine, &matched);
  assert_eq!(style.display, Display::Flex);
}

#[test]
fn custom_properties_inherit_from_the_parent() {
  let mut engine = engine();
  let parent_matched = author_match(vec![Declaration::custom("--accent", kw("grid"))]);
  let parent_element = TestElement::new("div");
  let parent_style = engine.resolve_style(&parent_element, &parent_matched);

  let element =
    TestElement::new("div").with_parent(TestElement::new("div").with_resolved(parent_style));
  let matched = author_match(vec![decl(
    PropertyId::Display,
    PropertyValue::Var(VarReference {
      name: Arc::from("--accent"),
      fallback: None,
    }),
  )]);
  let style = engine.resolve_style(&element, &matched);
  assert_eq!(style.display, Display::Grid);
}

#[test]
fn variable_cycles_drop_the_declaration() {
  let mut engine = engine();
  let matched = author_match(vec![
    Declaration::custom(
      "--a",
      PropertyValue::Var(VarReference {
        name: Arc::from("--b"),
        fallback: None,
      }),
    ),
    Declaration::custom(
      "--b",
      PropertyValue::Var(VarReference {
        name: Arc::from("--a"),
        fallback: None,
      }),
    ),
    decl(PropertyId::Display, kw("block")),
    decl(
      PropertyId::Display,
      PropertyValue::Var(VarReference {
        name: Arc::from("--a"),
        fallback: None,
      }),
    ),
  ]);
  let style = resolve(&mut engine, &matched);
  // The cyclic var() declaration is dropped; the earlier one survives.
  assert_eq!(style.display, Display::Block);
}

#[test]
fn quirks_mode_accepts_unitless_lengths() {
  let mut settings = DocumentSettings::default();
  settings.quirks_mode = true;
  let mut engine = StyleEngine::new(settings);
  let matched = author_match(vec![decl(PropertyId::Width, PropertyValue::Number(120.0))]);
  let style = resolve(&mut engine, &matched);
  assert_eq!(style.width, SizeValue::Length(Length::px(120.0)));

  let mut engine = StyleEngine::new(DocumentSettings::default());
  let style = resolve(&mut engine, &matched);
  assert!(style.width.is_auto());
}

#[test]
fn intrinsic_keyword_families_resolve_modern_first() {
  // Documented ambiguity: keywords claimed by both the legacy -intrinsic
  // family and the modern fit-content family resolve to the modern
  // variant in this engine.
  let mut engine = engine();
  let matched = author_match(vec![decl(PropertyId::Width, kw("-webkit-fit-content"))]);
  let style = resolve(&mut engine, &matched);
  assert_eq!(style.width, SizeValue::FitContent);

  let matched = author_match(vec![decl(PropertyId::Width, kw("intrinsic"))]);
  let style = resolve(&mut engine, &matched);
  assert_eq!(style.width, SizeValue::Intrinsic);
}

#[test]
fn adjustments_blockify_floated_elements() {
  let mut engine = engine();
  let matched = author_match(vec![decl(PropertyId::Float, kw("left"))]);
  let style = resolve(&mut engine, &matched);
  assert_eq!(style.display, Display::Block);
}

#[test]
fn root_elements_get_block_display_and_stacking() {
  let mut engine = engine();
  let element = TestElement::new("html").with_role(ElementRole::Root);
  let style = engine.resolve_style(&element, &MatchResult::new());
  assert_eq!(style.display, Display::Block);
  assert_eq!(style.z_index, ZIndex::Index(0));
}

#[test]
fn layered_background_values_build_matching_layers() {
  let mut engine = engine();
  let matched = author_match(vec![
    decl(
      PropertyId::BackgroundImage,
      PropertyValue::List(vec![
        PropertyValue::Url(Arc::from("a.png")),
        PropertyValue::Url(Arc::from("b.png")),
      ]),
    ),
    decl(PropertyId::BackgroundRepeatX, kw("no-repeat")),
  ]);
  let style = resolve(&mut engine, &matched);
  assert_eq!(style.background_layers.len(), 2);
  assert_eq!(
    style.background_layers[0].image,
    Some(ImageSource::Url(Arc::from("a.png")))
  );
  // The shorter repeat list repeats cyclically across the image layers.
  assert_eq!(
    style.background_layers[1].repeat_x,
    Some(FillRepeat::NoRepeat)
  );
}

#[test]
fn visited_only_rules_write_the_visited_color_slots() {
  let mut engine = engine();
  let mut matched = MatchResult::new();
  matched
    .add_block(
      author_block(vec![decl(
        PropertyId::Color,
        PropertyValue::Color(Rgba::rgb(128, 0, 128)),
      )]),
      Origin::Author,
      LINK_MATCH_VISITED,
      PropertyWhitelist::None,
    )
    .unwrap();

  let mut element = TestElement::new("a");
  element.link_state = LinkState::InsideVisited;
  let style = engine.resolve_style(&element, &matched);
  // The regular slot keeps the initial color; the visited slot records the
  // override.
  assert_eq!(style.color(), Rgba::BLACK);
  assert_eq!(
    style.visited_colors.as_ref().and_then(|v| v.color),
    Some(Rgba::rgb(128, 0, 128))
  );
}

#[test]
fn visited_rules_do_not_apply_to_unvisited_elements() {
  let mut engine = engine();
  let mut matched = MatchResult::new();
  matched
    .add_block(
      author_block(vec![decl(
        PropertyId::Color,
        PropertyValue::Color(Rgba::rgb(128, 0, 128)),
      )]),
      Origin::Author,
      LINK_MATCH_VISITED,
      PropertyWhitelist::None,
    )
    .unwrap();
  let style = engine.resolve_style(&TestElement::new("a"), &matched);
  assert_eq!(style.color(), Rgba::BLACK);
  assert!(style.visited_colors.is_none());
}

#[test]
fn second_tier_structured_properties_apply() {
  let mut engine = engine();
  let shadow = ShadowValue {
    offset_x: Length::px(2.0),
    offset_y: Length::px(2.0),
    blur: Length::px(4.0),
    spread: Length::zero(),
    color: Some(Rgba::BLACK),
    inset: false,
  };
  let matched = author_match(vec![
    decl(PropertyId::BoxShadow, PropertyValue::Shadows(vec![shadow.clone()])),
    decl(
      PropertyId::Transform,
      PropertyValue::Transform(vec![TransformFunction::TranslateX(Length::px(10.0))]),
    ),
    decl(
      PropertyId::Quotes,
      PropertyValue::QuotePairs(vec![("\u{201c}".into(), "\u{201d}".into())]),
    ),
    decl(
      PropertyId::CounterIncrement,
      PropertyValue::Counters(vec![("section".into(), 1)]),
    ),
  ]);
  let style = resolve(&mut engine, &matched);
  assert_eq!(style.box_shadow, vec![shadow]);
  assert_eq!(
    style.transform,
    vec![TransformFunction::TranslateX(Length::px(10.0))]
  );
  assert_eq!(style.inherited().quotes.pairs.len(), 1);
  assert_eq!(style.counter_increment, vec![("section".into(), 1)]);
}

struct RecordingLoader {
  calls: Vec<(PropertyId, String)>,
}

impl ResourceLoader for RecordingLoader {
  fn load(&mut self, property: PropertyId, url: &str) -> ResourceStatus {
    self.calls.push((property, url.to_string()));
    if url.ends_with("pending.png") {
      ResourceStatus::Pending
    } else {
      ResourceStatus::Loaded(ResourceHandle(self.calls.len() as u64))
    }
  }
}

#[test]
fn resource_post_pass_resolves_in_property_id_order() {
  let mut engine = engine();
  let matched = author_match(vec![
    decl(
      PropertyId::ListStyleImage,
      PropertyValue::Url(Arc::from("marker.png")),
    ),
    decl(
      PropertyId::BackgroundImage,
      PropertyValue::Url(Arc::from("bg.png")),
    ),
  ]);
  let mut loader = RecordingLoader { calls: Vec::new() };
  let style = engine.resolve_style_with_loader(&TestElement::new("div"), &matched, Some(&mut loader));

  // BackgroundImage has the lower property ordinal and loads first.
  assert_eq!(loader.calls.len(), 2);
  assert_eq!(loader.calls[0].0, PropertyId::BackgroundImage);
  assert_eq!(loader.calls[1].0, PropertyId::ListStyleImage);
  assert!(matches!(
    style.background_layers[0].image,
    Some(ImageSource::Resource(_))
  ));
  assert!(matches!(
    style.inherited().list_style_image,
    Some(ImageSource::Resource(_))
  ));
}

#[test]
fn pending_resources_keep_the_raw_reference() {
  let mut engine = engine();
  let matched = author_match(vec![decl(
    PropertyId::BackgroundImage,
    PropertyValue::Url(Arc::from("pending.png")),
  )]);
  let mut loader = RecordingLoader { calls: Vec::new() };
  let style = engine.resolve_style_with_loader(&TestElement::new("div"), &matched, Some(&mut loader));
  assert_eq!(
    style.background_layers[0].image,
    Some(ImageSource::Url(Arc::from("pending.png")))
  );
}

#[test]
fn keyframe_styles_apply_on_top_of_a_base() {
  let mut engine = engine();
  let base_matched = author_match(vec![decl(PropertyId::Display, kw("block"))]);
  let base = engine.resolve_style(&TestElement::new("div"), &base_matched);

  let block = author_block(vec![
    decl(PropertyId::Opacity, PropertyValue::Number(0.25)),
    decl(PropertyId::FontSize, px(20.0)),
    decl(PropertyId::LineHeight, PropertyValue::Length(Length::em(1.0))),
  ]);
  let parent = ComputedStyle::initial();
  let keyframe = engine.resolve_keyframe_style(&base, &parent, &block);

  assert_eq!(keyframe.display, Display::Block);
  assert_eq!(keyframe.opacity, 0.25);
  assert_eq!(keyframe.font_size(), 20.0);
  assert_eq!(keyframe.inherited().line_height, LineHeight::Px(20.0));
}

#[test]
fn keyframes_rules_register_and_look_up() {
  use faststyle::style::cascade::{Keyframe, KeyframesRule};
  let mut engine = engine();
  engine.register_keyframes(KeyframesRule {
    name: Arc::from("fade"),
    keyframes: vec![
      Keyframe {
        offset: 0.0,
        block: author_block(vec![decl(PropertyId::Opacity, PropertyValue::Number(0.0))]),
      },
      Keyframe {
        offset: 1.0,
        block: author_block(vec![decl(PropertyId::Opacity, PropertyValue::Number(1.0))]),
      },
    ],
  });
  let rule = engine.keyframes_rule("fade").expect("registered");
  assert_eq!(rule.keyframes.len(), 2);
  assert!(engine.keyframes_rule("missing").is_none());
}

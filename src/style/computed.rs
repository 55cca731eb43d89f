//! Computed style values
//!
//! This module provides the [`ComputedStyle`] struct containing resolved CSS
//! property values for a single element.
//!
//! # Layout
//!
//! Inherited properties live in a nested [`InheritedStyle`] block held
//! behind `Arc` with copy-on-write mutation. Inheriting from a parent is a
//! refcount bump; two styles whose inherited blocks are pointer-equal are
//! guaranteed to agree on every inherited property, which is the cheap
//! comparison the matched-properties cache fast path relies on.
//!
//! Non-inherited properties are plain fields. The property set is fixed at
//! compile time; there is no dynamic extension.
//!
//! Reference: CSS Cascading and Inheritance Level 4
//! <https://www.w3.org/TR/css-cascade-4/>

use crate::dom::LinkState;
use crate::style::color::Rgba;
use crate::style::declaration::PropertyValue;
use crate::style::fonts::FontDescription;
use crate::style::types::*;
use crate::style::values::{Length, LengthOrAuto};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Custom property store, name to parsed value.
///
/// Held behind `Arc` inside the inherited block so styles that define no
/// variables of their own share the parent's map.
pub type CustomPropertyMap = FxHashMap<Arc<str>, PropertyValue>;

/// `line-height` computed value
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LineHeight {
  #[default]
  Normal,
  /// Unitless multiplier of the font size
  Number(f32),
  /// Resolved pixel value
  Px(f32),
}

/// Color slots used while computing the visited-link variant of a style.
///
/// Only properties valid for `:visited` styling have a slot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisitedLinkColors {
  pub color: Option<Rgba>,
  pub background_color: Option<Rgba>,
  pub border_top_color: Option<Rgba>,
  pub border_right_color: Option<Rgba>,
  pub border_bottom_color: Option<Rgba>,
  pub border_left_color: Option<Rgba>,
  pub outline_color: Option<Rgba>,
}

/// The inherited property block.
///
/// Every property whose initial cascade behavior is "inherit" lives here.
#[derive(Debug, Clone, PartialEq)]
pub struct InheritedStyle {
  pub color: Rgba,
  pub direction: Direction,
  pub writing_mode: WritingMode,
  pub text_orientation: TextOrientation,
  pub font: FontDescription,
  pub line_height: LineHeight,
  pub visibility: Visibility,
  pub text_align: TextAlign,
  pub text_indent: Length,
  pub text_transform: TextTransform,
  /// px
  pub letter_spacing: f32,
  /// px
  pub word_spacing: f32,
  pub white_space: WhiteSpace,
  pub word_break: WordBreak,
  pub overflow_wrap: OverflowWrap,
  pub tab_size: f32,
  pub text_rendering: TextRendering,
  pub text_shadow: Vec<ShadowValue>,
  pub cursor: Cursor,
  pub list_style_type: ListStyleType,
  pub list_style_position: ListStylePosition,
  pub list_style_image: Option<ImageSource>,
  pub border_collapse: BorderCollapse,
  pub border_horizontal_spacing: f32,
  pub border_vertical_spacing: f32,
  pub caption_side: CaptionSide,
  pub empty_cells: EmptyCells,
  pub quotes: Quotes,
  /// Product of the zoom factors from the root down
  pub effective_zoom: f32,
  /// Link context; behaves like an inherited property but is explicitly
  /// restored on the cache fast path
  pub inside_link: LinkState,
  pub custom_properties: Arc<CustomPropertyMap>,
}

impl Default for InheritedStyle {
  fn default() -> Self {
    Self {
      color: Rgba::BLACK,
      direction: Direction::default(),
      writing_mode: WritingMode::default(),
      text_orientation: TextOrientation::default(),
      font: FontDescription::default(),
      line_height: LineHeight::Normal,
      visibility: Visibility::Visible,
      text_align: TextAlign::Start,
      text_indent: Length::zero(),
      text_transform: TextTransform::None,
      letter_spacing: 0.0,
      word_spacing: 0.0,
      white_space: WhiteSpace::Normal,
      word_break: WordBreak::Normal,
      overflow_wrap: OverflowWrap::Normal,
      tab_size: 8.0,
      text_rendering: TextRendering::Auto,
      text_shadow: Vec::new(),
      cursor: Cursor::Auto,
      list_style_type: ListStyleType::Disc,
      list_style_position: ListStylePosition::Outside,
      list_style_image: None,
      border_collapse: BorderCollapse::Separate,
      border_horizontal_spacing: 0.0,
      border_vertical_spacing: 0.0,
      caption_side: CaptionSide::Top,
      empty_cells: EmptyCells::Show,
      quotes: Quotes::default(),
      effective_zoom: 1.0,
      inside_link: LinkState::NotInsideLink,
      custom_properties: Arc::new(CustomPropertyMap::default()),
    }
  }
}

/// Computed CSS styles for an element
///
/// One record is owned per element (or per pseudo-style, keyframe, or
/// animation sample). Created empty or cloned from a cache entry at
/// resolution start, mutated in place by the cascade, then treated as
/// immutable once handed out behind `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyle {
  pub(crate) inherited: Arc<InheritedStyle>,

  // ===== BOX GENERATION =====
  pub display: Display,
  pub position: Position,
  pub float: Float,
  pub clear: Clear,
  pub overflow_x: Overflow,
  pub overflow_y: Overflow,
  pub vertical_align: VerticalAlign,
  pub unicode_bidi: UnicodeBidi,
  pub z_index: ZIndex,
  pub opacity: f32,

  // ===== BOX MODEL =====
  pub width: SizeValue,
  pub height: SizeValue,
  pub min_width: SizeValue,
  pub min_height: SizeValue,
  pub max_width: SizeValue,
  pub max_height: SizeValue,
  pub box_sizing: BoxSizing,
  pub top: LengthOrAuto,
  pub right: LengthOrAuto,
  pub bottom: LengthOrAuto,
  pub left: LengthOrAuto,
  pub margin_top: LengthOrAuto,
  pub margin_right: LengthOrAuto,
  pub margin_bottom: LengthOrAuto,
  pub margin_left: LengthOrAuto,
  pub padding_top: Length,
  pub padding_right: Length,
  pub padding_bottom: Length,
  pub padding_left: Length,

  // ===== BORDERS =====
  /// Computed px; the used value is zero when the side's style is
  /// none/hidden
  pub border_top_width: f32,
  pub border_right_width: f32,
  pub border_bottom_width: f32,
  pub border_left_width: f32,
  pub border_top_style: BorderStyle,
  pub border_right_style: BorderStyle,
  pub border_bottom_style: BorderStyle,
  pub border_left_style: BorderStyle,
  pub border_top_color: Rgba,
  pub border_right_color: Rgba,
  pub border_bottom_color: Rgba,
  pub border_left_color: Rgba,
  pub border_top_left_radius: BorderRadius,
  pub border_top_right_radius: BorderRadius,
  pub border_bottom_left_radius: BorderRadius,
  pub border_bottom_right_radius: BorderRadius,

  // ===== BACKGROUNDS & EFFECTS =====
  pub background_color: Rgba,
  pub background_layers: Vec<FillLayer>,
  pub mask_layers: Vec<FillLayer>,
  pub box_shadow: Vec<ShadowValue>,
  pub outline_color: Rgba,
  pub outline_style: OutlineStyle,
  pub outline_width: f32,
  pub outline_offset: f32,
  pub transform: Vec<TransformFunction>,
  pub transform_origin_x: Length,
  pub transform_origin_y: Length,
  pub filter: Vec<FilterFunction>,
  pub clip: Option<ClipRect>,
  pub clip_path: ClipPath,
  pub appearance: Appearance,

  // ===== TABLES & GENERATED CONTENT =====
  pub table_layout: TableLayout,
  pub content: ContentValue,
  pub counter_increment: Vec<(String, i32)>,
  pub counter_reset: Vec<(String, i32)>,

  // ===== TEXT (non-inherited) =====
  pub text_decoration_line: TextDecorationLine,
  pub text_decoration_color: Rgba,

  // ===== ANIMATION =====
  pub animations: Vec<AnimationLayer>,
  pub transitions: Vec<TransitionLayer>,

  // ===== ZOOM =====
  /// The element's own `zoom` declaration; `effective_zoom` is the product
  /// down the tree and lives in the inherited block
  pub zoom: f32,

  // ===== LINK VARIANTS =====
  pub visited_colors: Option<Box<VisitedLinkColors>>,

  // ===== FLAGS =====
  /// Never enter this record into the caches or share it
  pub unique: bool,
  /// A declaration explicitly inherited a non-inherited property; styles
  /// computed against this one as parent cannot be cached
  pub has_explicit_inheritance: bool,
}

impl Default for ComputedStyle {
  fn default() -> Self {
    Self {
      inherited: Arc::new(InheritedStyle::default()),
      display: Display::Inline,
      position: Position::Static,
      float: Float::None,
      clear: Clear::None,
      overflow_x: Overflow::Visible,
      overflow_y: Overflow::Visible,
      vertical_align: VerticalAlign::Baseline,
      unicode_bidi: UnicodeBidi::Normal,
      z_index: ZIndex::Auto,
      opacity: 1.0,
      width: SizeValue::Auto,
      height: SizeValue::Auto,
      min_width: SizeValue::Auto,
      min_height: SizeValue::Auto,
      max_width: SizeValue::None,
      max_height: SizeValue::None,
      box_sizing: BoxSizing::ContentBox,
      top: LengthOrAuto::Auto,
      right: LengthOrAuto::Auto,
      bottom: LengthOrAuto::Auto,
      left: LengthOrAuto::Auto,
      margin_top: LengthOrAuto::px(0.0),
      margin_right: LengthOrAuto::px(0.0),
      margin_bottom: LengthOrAuto::px(0.0),
      margin_left: LengthOrAuto::px(0.0),
      padding_top: Length::zero(),
      padding_right: Length::zero(),
      padding_bottom: Length::zero(),
      padding_left: Length::zero(),
      border_top_width: MEDIUM_BORDER_WIDTH,
      border_right_width: MEDIUM_BORDER_WIDTH,
      border_bottom_width: MEDIUM_BORDER_WIDTH,
      border_left_width: MEDIUM_BORDER_WIDTH,
      border_top_style: BorderStyle::None,
      border_right_style: BorderStyle::None,
      border_bottom_style: BorderStyle::None,
      border_left_style: BorderStyle::None,
      border_top_color: Rgba::BLACK,
      border_right_color: Rgba::BLACK,
      border_bottom_color: Rgba::BLACK,
      border_left_color: Rgba::BLACK,
      border_top_left_radius: BorderRadius::default(),
      border_top_right_radius: BorderRadius::default(),
      border_bottom_left_radius: BorderRadius::default(),
      border_bottom_right_radius: BorderRadius::default(),
      background_color: Rgba::TRANSPARENT,
      background_layers: vec![FillLayer::default()],
      mask_layers: vec![FillLayer::default()],
      box_shadow: Vec::new(),
      outline_color: Rgba::BLACK,
      outline_style: OutlineStyle::None,
      outline_width: MEDIUM_BORDER_WIDTH,
      outline_offset: 0.0,
      transform: Vec::new(),
      transform_origin_x: Length::percent(50.0),
      transform_origin_y: Length::percent(50.0),
      filter: Vec::new(),
      clip: None,
      clip_path: ClipPath::None,
      appearance: Appearance::None,
      table_layout: TableLayout::Auto,
      content: ContentValue::Normal,
      counter_increment: Vec::new(),
      counter_reset: Vec::new(),
      text_decoration_line: TextDecorationLine::None,
      text_decoration_color: Rgba::BLACK,
      animations: vec![AnimationLayer::default()],
      transitions: vec![TransitionLayer::default()],
      zoom: 1.0,
      visited_colors: None,
      unique: false,
      has_explicit_inheritance: false,
    }
  }
}

/// Computed width of a `medium` border
pub const MEDIUM_BORDER_WIDTH: f32 = 3.0;

/// Computed width of a `thin` border
pub const THIN_BORDER_WIDTH: f32 = 1.0;

/// Computed width of a `thick` border
pub const THICK_BORDER_WIDTH: f32 = 5.0;

impl ComputedStyle {
  /// A fresh record holding every property's initial value
  pub fn initial() -> Self {
    Self::default()
  }

  pub fn inherited(&self) -> &InheritedStyle {
    &self.inherited
  }

  /// Copy-on-write access to the inherited block
  pub fn inherited_mut(&mut self) -> &mut InheritedStyle {
    Arc::make_mut(&mut self.inherited)
  }

  /// Adopts the parent's inherited block wholesale. O(1): the block is
  /// shared until a declaration writes an inherited property.
  pub fn inherit_from(&mut self, parent: &ComputedStyle) {
    self.inherited = Arc::clone(&parent.inherited);
  }

  /// True when both styles share one inherited block. Pointer identity
  /// implies every inherited property is identical.
  pub fn inherited_data_shared(a: &ComputedStyle, b: &ComputedStyle) -> bool {
    Arc::ptr_eq(&a.inherited, &b.inherited)
  }

  /// Copies every non-inherited property from `other`, leaving the
  /// inherited block untouched.
  pub fn copy_non_inherited_from(&mut self, other: &ComputedStyle) {
    let inherited = Arc::clone(&self.inherited);
    *self = other.clone();
    self.inherited = inherited;
  }

  // Convenience accessors for the hottest inherited fields.

  pub fn color(&self) -> Rgba {
    self.inherited.color
  }

  pub fn set_color(&mut self, color: Rgba) {
    self.inherited_mut().color = color;
  }

  pub fn font(&self) -> &FontDescription {
    &self.inherited.font
  }

  pub fn font_mut(&mut self) -> &mut FontDescription {
    &mut self.inherited_mut().font
  }

  pub fn font_size(&self) -> f32 {
    self.inherited.font.computed_size
  }

  pub fn effective_zoom(&self) -> f32 {
    self.inherited.effective_zoom
  }

  pub fn custom_properties(&self) -> &CustomPropertyMap {
    &self.inherited.custom_properties
  }

  /// Copy-on-write access to the custom property store
  pub fn custom_properties_mut(&mut self) -> &mut CustomPropertyMap {
    Arc::make_mut(&mut self.inherited_mut().custom_properties)
  }

  pub fn inside_link(&self) -> LinkState {
    self.inherited.inside_link
  }

  pub fn set_inside_link(&mut self, state: LinkState) {
    if self.inherited.inside_link != state {
      self.inherited_mut().inside_link = state;
    }
  }

  /// Slot table for visited-link colors, allocated on first write
  pub fn visited_colors_mut(&mut self) -> &mut VisitedLinkColors {
    self
      .visited_colors
      .get_or_insert_with(|| Box::new(VisitedLinkColors::default()))
  }

  /// True when this style induces a stacking context regardless of
  /// z-index (opacity, transforms, filters, fixed/sticky position).
  pub fn forces_stacking_context(&self) -> bool {
    self.opacity < 1.0
      || !self.transform.is_empty()
      || !self.filter.is_empty()
      || !matches!(self.clip_path, ClipPath::None)
      || matches!(self.position, Position::Fixed | Position::Sticky)
  }
}

//! Style system keyword and structured value types
//!
//! Keyword enums carry a `parse` constructor for the identifier form the
//! external parser hands over, plus whatever helpers the cascade's
//! adjustment phase needs (e.g. [`Display::blockified`]).

use crate::style::color::Rgba;
use crate::style::properties::PropertyId;
use crate::style::values::{Length, LengthOrAuto};
use std::sync::Arc;

/// The `display` property
///
/// Reference: CSS Display Module Level 3
/// <https://www.w3.org/TR/css-display-3/>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
  None,
  #[default]
  Inline,
  Block,
  InlineBlock,
  Flex,
  InlineFlex,
  Grid,
  InlineGrid,
  Table,
  InlineTable,
  TableRow,
  TableRowGroup,
  TableHeaderGroup,
  TableFooterGroup,
  TableCell,
  TableCaption,
  TableColumn,
  TableColumnGroup,
  ListItem,
  FlowRoot,
}

impl Display {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "none" => Self::None,
      "inline" => Self::Inline,
      "block" => Self::Block,
      "inline-block" => Self::InlineBlock,
      "flex" => Self::Flex,
      "inline-flex" => Self::InlineFlex,
      "grid" => Self::Grid,
      "inline-grid" => Self::InlineGrid,
      "table" => Self::Table,
      "inline-table" => Self::InlineTable,
      "table-row" => Self::TableRow,
      "table-row-group" => Self::TableRowGroup,
      "table-header-group" => Self::TableHeaderGroup,
      "table-footer-group" => Self::TableFooterGroup,
      "table-cell" => Self::TableCell,
      "table-caption" => Self::TableCaption,
      "table-column" => Self::TableColumn,
      "table-column-group" => Self::TableColumnGroup,
      "list-item" => Self::ListItem,
      "flow-root" => Self::FlowRoot,
      _ => return None,
    })
  }

  /// True for display types that generate an inline-level box
  pub fn is_inline_level(self) -> bool {
    matches!(
      self,
      Self::Inline | Self::InlineBlock | Self::InlineFlex | Self::InlineGrid | Self::InlineTable
    )
  }

  /// The block-level display equivalent used when floating or positioning
  /// forces blockification.
  pub fn blockified(self) -> Self {
    match self {
      Self::Inline | Self::InlineBlock => Self::Block,
      Self::InlineFlex => Self::Flex,
      Self::InlineGrid => Self::Grid,
      Self::InlineTable => Self::Table,
      other => other,
    }
  }
}

/// The `position` property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
  #[default]
  Static,
  Relative,
  Absolute,
  Fixed,
  Sticky,
}

impl Position {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "static" => Self::Static,
      "relative" => Self::Relative,
      "absolute" => Self::Absolute,
      "fixed" => Self::Fixed,
      "sticky" => Self::Sticky,
      _ => return None,
    })
  }

  /// Absolutely positioned (out of flow)
  pub fn is_out_of_flow(self) -> bool {
    matches!(self, Self::Absolute | Self::Fixed)
  }

  pub fn is_positioned(self) -> bool {
    !matches!(self, Self::Static)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Float {
  #[default]
  None,
  Left,
  Right,
}

impl Float {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "none" => Self::None,
      "left" => Self::Left,
      "right" => Self::Right,
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clear {
  #[default]
  None,
  Left,
  Right,
  Both,
}

impl Clear {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "none" => Self::None,
      "left" => Self::Left,
      "right" => Self::Right,
      "both" => Self::Both,
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
  #[default]
  Visible,
  Hidden,
  Scroll,
  Auto,
  Clip,
}

impl Overflow {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "visible" => Self::Visible,
      "hidden" => Self::Hidden,
      "scroll" => Self::Scroll,
      "auto" => Self::Auto,
      "clip" => Self::Clip,
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
  #[default]
  Visible,
  Hidden,
  Collapse,
}

impl Visibility {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "visible" => Self::Visible,
      "hidden" => Self::Hidden,
      "collapse" => Self::Collapse,
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
  #[default]
  Ltr,
  Rtl,
}

impl Direction {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "ltr" => Self::Ltr,
      "rtl" => Self::Rtl,
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritingMode {
  #[default]
  HorizontalTb,
  VerticalRl,
  VerticalLr,
}

impl WritingMode {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "horizontal-tb" => Self::HorizontalTb,
      "vertical-rl" => Self::VerticalRl,
      "vertical-lr" => Self::VerticalLr,
      _ => return None,
    })
  }

  pub fn is_horizontal(self) -> bool {
    matches!(self, Self::HorizontalTb)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextOrientation {
  #[default]
  Mixed,
  Upright,
  Sideways,
}

impl TextOrientation {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "mixed" => Self::Mixed,
      "upright" => Self::Upright,
      "sideways" => Self::Sideways,
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
  #[default]
  Start,
  End,
  Left,
  Right,
  Center,
  Justify,
}

impl TextAlign {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "start" => Self::Start,
      "end" => Self::End,
      "left" => Self::Left,
      "right" => Self::Right,
      "center" => Self::Center,
      "justify" => Self::Justify,
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextTransform {
  #[default]
  None,
  Capitalize,
  Uppercase,
  Lowercase,
}

impl TextTransform {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "none" => Self::None,
      "capitalize" => Self::Capitalize,
      "uppercase" => Self::Uppercase,
      "lowercase" => Self::Lowercase,
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDecorationLine {
  #[default]
  None,
  Underline,
  Overline,
  LineThrough,
}

impl TextDecorationLine {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "none" => Self::None,
      "underline" => Self::Underline,
      "overline" => Self::Overline,
      "line-through" => Self::LineThrough,
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WhiteSpace {
  #[default]
  Normal,
  Nowrap,
  Pre,
  PreWrap,
  PreLine,
}

impl WhiteSpace {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "normal" => Self::Normal,
      "nowrap" => Self::Nowrap,
      "pre" => Self::Pre,
      "pre-wrap" => Self::PreWrap,
      "pre-line" => Self::PreLine,
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordBreak {
  #[default]
  Normal,
  BreakAll,
  KeepAll,
  BreakWord,
}

impl WordBreak {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "normal" => Self::Normal,
      "break-all" => Self::BreakAll,
      "keep-all" => Self::KeepAll,
      "break-word" => Self::BreakWord,
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowWrap {
  #[default]
  Normal,
  Anywhere,
  BreakWord,
}

impl OverflowWrap {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "normal" => Self::Normal,
      "anywhere" => Self::Anywhere,
      "break-word" => Self::BreakWord,
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextRendering {
  #[default]
  Auto,
  OptimizeSpeed,
  OptimizeLegibility,
  GeometricPrecision,
}

impl TextRendering {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "auto" => Self::Auto,
      "optimizespeed" | "optimize-speed" => Self::OptimizeSpeed,
      "optimizelegibility" | "optimize-legibility" => Self::OptimizeLegibility,
      "geometricprecision" | "geometric-precision" => Self::GeometricPrecision,
      _ => return None,
    })
  }
}

/// The `vertical-align` property
#[derive(Debug, Clone, PartialEq, Default)]
pub enum VerticalAlign {
  #[default]
  Baseline,
  Sub,
  Super,
  Top,
  TextTop,
  Middle,
  Bottom,
  TextBottom,
  Length(Length),
}

impl VerticalAlign {
  pub fn parse_keyword(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "baseline" => Self::Baseline,
      "sub" => Self::Sub,
      "super" => Self::Super,
      "top" => Self::Top,
      "text-top" => Self::TextTop,
      "middle" => Self::Middle,
      "bottom" => Self::Bottom,
      "text-bottom" => Self::TextBottom,
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
  #[default]
  None,
  Hidden,
  Dotted,
  Dashed,
  Solid,
  Double,
  Groove,
  Ridge,
  Inset,
  Outset,
}

impl BorderStyle {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "none" => Self::None,
      "hidden" => Self::Hidden,
      "dotted" => Self::Dotted,
      "dashed" => Self::Dashed,
      "solid" => Self::Solid,
      "double" => Self::Double,
      "groove" => Self::Groove,
      "ridge" => Self::Ridge,
      "inset" => Self::Inset,
      "outset" => Self::Outset,
      _ => return None,
    })
  }

  /// Styles none/hidden suppress the border; the used width is zero.
  pub fn is_visible(self) -> bool {
    !matches!(self, Self::None | Self::Hidden)
  }
}

/// Outline style also accepts `auto`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutlineStyle {
  #[default]
  None,
  Auto,
  Style(BorderStyle),
}

impl OutlineStyle {
  pub fn parse(keyword: &str) -> Option<Self> {
    if keyword == "auto" {
      return Some(Self::Auto);
    }
    if keyword == "none" {
      return Some(Self::None);
    }
    BorderStyle::parse(keyword).map(Self::Style)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoxSizing {
  #[default]
  ContentBox,
  BorderBox,
}

impl BoxSizing {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "content-box" => Self::ContentBox,
      "border-box" => Self::BorderBox,
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
  #[default]
  Auto,
  Default,
  Pointer,
  Text,
  Move,
  Wait,
  Help,
  NotAllowed,
  Grab,
  Crosshair,
  None,
}

impl Cursor {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "auto" => Self::Auto,
      "default" => Self::Default,
      "pointer" => Self::Pointer,
      "text" => Self::Text,
      "move" => Self::Move,
      "wait" => Self::Wait,
      "help" => Self::Help,
      "not-allowed" => Self::NotAllowed,
      "grab" => Self::Grab,
      "crosshair" => Self::Crosshair,
      "none" => Self::None,
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListStyleType {
  None,
  #[default]
  Disc,
  Circle,
  Square,
  Decimal,
  LowerAlpha,
  UpperAlpha,
  LowerRoman,
  UpperRoman,
}

impl ListStyleType {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "none" => Self::None,
      "disc" => Self::Disc,
      "circle" => Self::Circle,
      "square" => Self::Square,
      "decimal" => Self::Decimal,
      "lower-alpha" | "lower-latin" => Self::LowerAlpha,
      "upper-alpha" | "upper-latin" => Self::UpperAlpha,
      "lower-roman" => Self::LowerRoman,
      "upper-roman" => Self::UpperRoman,
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListStylePosition {
  Inside,
  #[default]
  Outside,
}

impl ListStylePosition {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "inside" => Self::Inside,
      "outside" => Self::Outside,
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderCollapse {
  #[default]
  Separate,
  Collapse,
}

impl BorderCollapse {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "separate" => Self::Separate,
      "collapse" => Self::Collapse,
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptionSide {
  #[default]
  Top,
  Bottom,
}

impl CaptionSide {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "top" => Self::Top,
      "bottom" => Self::Bottom,
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyCells {
  #[default]
  Show,
  Hide,
}

impl EmptyCells {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "show" => Self::Show,
      "hide" => Self::Hide,
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableLayout {
  #[default]
  Auto,
  Fixed,
}

impl TableLayout {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "auto" => Self::Auto,
      "fixed" => Self::Fixed,
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnicodeBidi {
  #[default]
  Normal,
  Embed,
  Isolate,
  BidiOverride,
  IsolateOverride,
  Plaintext,
}

impl UnicodeBidi {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "normal" => Self::Normal,
      "embed" => Self::Embed,
      "isolate" => Self::Isolate,
      "bidi-override" => Self::BidiOverride,
      "isolate-override" => Self::IsolateOverride,
      "plaintext" => Self::Plaintext,
      _ => return None,
    })
  }
}

/// Native widget appearance; anything other than `None` makes the resolved
/// style ineligible for the matched-properties cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Appearance {
  #[default]
  None,
  Auto,
  Checkbox,
  Radio,
  Button,
  Menulist,
  Textfield,
}

impl Appearance {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "none" => Self::None,
      "auto" => Self::Auto,
      "checkbox" => Self::Checkbox,
      "radio" => Self::Radio,
      "button" => Self::Button,
      "menulist" => Self::Menulist,
      "textfield" => Self::Textfield,
      _ => return None,
    })
  }
}

/// `z-index`: auto or an integer stacking level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZIndex {
  #[default]
  Auto,
  Index(i32),
}

impl ZIndex {
  pub fn is_auto(self) -> bool {
    matches!(self, Self::Auto)
  }
}

/// A sizing value for width/height/min-*/max-*.
///
/// Keyword variants cover both the modern intrinsic keywords and the legacy
/// `-intrinsic` family; the cascade documents which wins when both apply.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SizeValue {
  #[default]
  Auto,
  /// Only meaningful for max-* properties
  None,
  Length(Length),
  MinContent,
  MaxContent,
  FitContent,
  FillAvailable,
  /// Legacy intrinsic keyword family
  Intrinsic,
  MinIntrinsic,
}

impl SizeValue {
  pub fn is_auto(&self) -> bool {
    matches!(self, Self::Auto)
  }

  pub fn is_keyword(&self) -> bool {
    !matches!(self, Self::Length(_))
  }

  pub fn length(&self) -> Option<&Length> {
    match self {
      Self::Length(length) => Some(length),
      _ => None,
    }
  }
}

/// `clip: rect(...)` components
#[derive(Debug, Clone, PartialEq)]
pub struct ClipRect {
  pub top: LengthOrAuto,
  pub right: LengthOrAuto,
  pub bottom: LengthOrAuto,
  pub left: LengthOrAuto,
}

/// One corner's radii pair. A corner whose either radius resolves to zero
/// renders square, so the pair is normalized to zero when one side is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderRadius {
  pub horizontal: Length,
  pub vertical: Length,
}

impl Default for BorderRadius {
  fn default() -> Self {
    Self {
      horizontal: Length::zero(),
      vertical: Length::zero(),
    }
  }
}

impl BorderRadius {
  pub fn new(horizontal: Length, vertical: Length) -> Self {
    // Legacy behavior: a zero component squares the whole corner.
    if horizontal.is_zero() || vertical.is_zero() {
      return Self::default();
    }
    Self {
      horizontal,
      vertical,
    }
  }
}

/// One entry of a `box-shadow`/`text-shadow` list
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowValue {
  pub offset_x: Length,
  pub offset_y: Length,
  pub blur: Length,
  pub spread: Length,
  /// None means currentcolor at paint time
  pub color: Option<Rgba>,
  pub inset: bool,
}

impl ShadowValue {
  /// The neutral shadow used to pad the shorter list during animation:
  /// transparent, zero geometry, matching the inset flag of its partner.
  pub fn neutral_like(other: &ShadowValue) -> ShadowValue {
    ShadowValue {
      offset_x: Length::zero(),
      offset_y: Length::zero(),
      blur: Length::zero(),
      spread: Length::zero(),
      color: Some(Rgba::TRANSPARENT),
      inset: other.inset,
    }
  }
}

/// Handle to an externally loaded resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceHandle(pub u64);

/// An image-valued property: a URL not yet resolved, a loaded resource, or
/// a synthetic cross-fade generated by the animation interpolator.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
  /// Explicit `none`
  None,
  Url(Arc<str>),
  Resource(ResourceHandle),
  CrossFade(Box<CrossFadeImage>),
}

/// Synthetic cross-fade between two images, produced only by blending
#[derive(Debug, Clone, PartialEq)]
pub struct CrossFadeImage {
  pub from: ImageSource,
  pub to: ImageSource,
  /// Fraction of `to` visible, in [0, 1]
  pub amount: f32,
}

impl ImageSource {
  pub fn is_none(&self) -> bool {
    matches!(self, Self::None)
  }

  /// URL still awaiting the resource post-pass, if any
  pub fn pending_url(&self) -> Option<&Arc<str>> {
    match self {
      Self::Url(url) => Some(url),
      _ => None,
    }
  }
}

// ---------------------------------------------------------------------------
// Fill layers

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillAttachment {
  #[default]
  Scroll,
  Fixed,
  Local,
}

impl FillAttachment {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "scroll" => Self::Scroll,
      "fixed" => Self::Fixed,
      "local" => Self::Local,
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillBox {
  #[default]
  BorderBox,
  PaddingBox,
  ContentBox,
  Text,
}

impl FillBox {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "border-box" => Self::BorderBox,
      "padding-box" => Self::PaddingBox,
      "content-box" => Self::ContentBox,
      "text" => Self::Text,
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRepeat {
  #[default]
  Repeat,
  NoRepeat,
  Round,
  Space,
}

impl FillRepeat {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "repeat" => Self::Repeat,
      "no-repeat" => Self::NoRepeat,
      "round" => Self::Round,
      "space" => Self::Space,
      _ => return None,
    })
  }
}

/// Background/mask sizing
#[derive(Debug, Clone, PartialEq)]
pub enum FillSize {
  Contain,
  Cover,
  Explicit {
    width: LengthOrAuto,
    height: LengthOrAuto,
  },
}

/// One layer of a layered fill property (background or mask).
///
/// Every field is optional: `None` means "not set on this layer". The
/// cascade extends, truncates, and clears layers in lock-step with the
/// value lists it applies; the adjustment phase then repeats the set prefix
/// cyclically into unset trailing layers and culls layers past the image
/// list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FillLayer {
  pub image: Option<ImageSource>,
  pub attachment: Option<FillAttachment>,
  pub clip: Option<FillBox>,
  pub origin: Option<FillBox>,
  pub position_x: Option<Length>,
  pub position_y: Option<Length>,
  pub repeat_x: Option<FillRepeat>,
  pub repeat_y: Option<FillRepeat>,
  pub size: Option<FillSize>,
}

impl FillLayer {
  /// True when no property is set on this layer
  pub fn is_clear(&self) -> bool {
    self.image.is_none()
      && self.attachment.is_none()
      && self.clip.is_none()
      && self.origin.is_none()
      && self.position_x.is_none()
      && self.position_y.is_none()
      && self.repeat_x.is_none()
      && self.repeat_y.is_none()
      && self.size.is_none()
  }
}

// ---------------------------------------------------------------------------
// Animation and transition layers

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TimingFunction {
  #[default]
  Ease,
  Linear,
  EaseIn,
  EaseOut,
  EaseInOut,
  CubicBezier(f32, f32, f32, f32),
  Steps(u32, StepPosition),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepPosition {
  Start,
  #[default]
  End,
}

impl TimingFunction {
  pub fn parse_keyword(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "ease" => Self::Ease,
      "linear" => Self::Linear,
      "ease-in" => Self::EaseIn,
      "ease-out" => Self::EaseOut,
      "ease-in-out" => Self::EaseInOut,
      "step-start" => Self::Steps(1, StepPosition::Start),
      "step-end" => Self::Steps(1, StepPosition::End),
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationName {
  None,
  Name(Arc<str>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationDirection {
  #[default]
  Normal,
  Reverse,
  Alternate,
  AlternateReverse,
}

impl AnimationDirection {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "normal" => Self::Normal,
      "reverse" => Self::Reverse,
      "alternate" => Self::Alternate,
      "alternate-reverse" => Self::AlternateReverse,
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationFillMode {
  #[default]
  None,
  Forwards,
  Backwards,
  Both,
}

impl AnimationFillMode {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "none" => Self::None,
      "forwards" => Self::Forwards,
      "backwards" => Self::Backwards,
      "both" => Self::Both,
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationPlayState {
  #[default]
  Running,
  Paused,
}

impl AnimationPlayState {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "running" => Self::Running,
      "paused" => Self::Paused,
      _ => return None,
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum IterationCount {
  #[default]
  One,
  Infinite,
  Count(f32),
}

/// One layer of the `animation-*` longhand lists.
///
/// Same unset/extend/truncate discipline as [`FillLayer`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnimationLayer {
  pub name: Option<AnimationName>,
  pub duration: Option<f32>,
  pub delay: Option<f32>,
  pub timing_function: Option<TimingFunction>,
  pub iteration_count: Option<IterationCount>,
  pub direction: Option<AnimationDirection>,
  pub fill_mode: Option<AnimationFillMode>,
  pub play_state: Option<AnimationPlayState>,
}

impl AnimationLayer {
  pub fn is_clear(&self) -> bool {
    self.name.is_none()
      && self.duration.is_none()
      && self.delay.is_none()
      && self.timing_function.is_none()
      && self.iteration_count.is_none()
      && self.direction.is_none()
      && self.fill_mode.is_none()
      && self.play_state.is_none()
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionProperty {
  All,
  None,
  Id(PropertyId),
}

/// One layer of the `transition-*` longhand lists
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransitionLayer {
  pub property: Option<TransitionProperty>,
  pub duration: Option<f32>,
  pub delay: Option<f32>,
  pub timing_function: Option<TimingFunction>,
}

impl TransitionLayer {
  pub fn is_clear(&self) -> bool {
    self.property.is_none()
      && self.duration.is_none()
      && self.delay.is_none()
      && self.timing_function.is_none()
  }
}

// ---------------------------------------------------------------------------
// Transforms

/// One function of a `transform` list
#[derive(Debug, Clone, PartialEq)]
pub enum TransformFunction {
  Translate(Length, Length),
  TranslateX(Length),
  TranslateY(Length),
  Scale(f32, f32),
  ScaleX(f32),
  ScaleY(f32),
  /// Angle in degrees
  Rotate(f32),
  SkewX(f32),
  SkewY(f32),
  Skew(f32, f32),
  Matrix(f32, f32, f32, f32, f32, f32),
}

impl TransformFunction {
  /// True when two functions are the same operation (so their parameters
  /// can be interpolated pairwise).
  pub fn same_operation(&self, other: &TransformFunction) -> bool {
    std::mem::discriminant(self) == std::mem::discriminant(other)
  }

  /// Best-effort 2D matrix for fallback interpolation. Percentage
  /// translations resolve with their raw value (no reference box at blend
  /// time).
  pub fn to_matrix(&self) -> Matrix2D {
    match self {
      Self::Translate(x, y) => Matrix2D::translation(x.to_px(), y.to_px()),
      Self::TranslateX(x) => Matrix2D::translation(x.to_px(), 0.0),
      Self::TranslateY(y) => Matrix2D::translation(0.0, y.to_px()),
      Self::Scale(x, y) => Matrix2D::scale(*x, *y),
      Self::ScaleX(x) => Matrix2D::scale(*x, 1.0),
      Self::ScaleY(y) => Matrix2D::scale(1.0, *y),
      Self::Rotate(deg) => Matrix2D::rotation(deg.to_radians()),
      Self::SkewX(deg) => Matrix2D::skew(deg.to_radians(), 0.0),
      Self::SkewY(deg) => Matrix2D::skew(0.0, deg.to_radians()),
      Self::Skew(x, y) => Matrix2D::skew(x.to_radians(), y.to_radians()),
      Self::Matrix(a, b, c, d, e, f) => Matrix2D {
        a: *a,
        b: *b,
        c: *c,
        d: *d,
        e: *e,
        f: *f,
      },
    }
  }
}

/// Row-major 2D affine matrix `[a b; c d]` with translation `(e, f)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2D {
  pub a: f32,
  pub b: f32,
  pub c: f32,
  pub d: f32,
  pub e: f32,
  pub f: f32,
}

impl Matrix2D {
  pub const IDENTITY: Self = Self {
    a: 1.0,
    b: 0.0,
    c: 0.0,
    d: 1.0,
    e: 0.0,
    f: 0.0,
  };

  pub fn translation(x: f32, y: f32) -> Self {
    Self {
      e: x,
      f: y,
      ..Self::IDENTITY
    }
  }

  pub fn scale(x: f32, y: f32) -> Self {
    Self {
      a: x,
      d: y,
      ..Self::IDENTITY
    }
  }

  pub fn rotation(radians: f32) -> Self {
    let (sin, cos) = radians.sin_cos();
    Self {
      a: cos,
      b: sin,
      c: -sin,
      d: cos,
      ..Self::IDENTITY
    }
  }

  pub fn skew(x_radians: f32, y_radians: f32) -> Self {
    Self {
      c: x_radians.tan(),
      b: y_radians.tan(),
      ..Self::IDENTITY
    }
  }

  /// `self` applied after `other` (standard transform-list composition)
  pub fn multiply(&self, other: &Matrix2D) -> Matrix2D {
    Matrix2D {
      a: self.a * other.a + self.c * other.b,
      b: self.b * other.a + self.d * other.b,
      c: self.a * other.c + self.c * other.d,
      d: self.b * other.c + self.d * other.d,
      e: self.a * other.e + self.c * other.f + self.e,
      f: self.b * other.e + self.d * other.f + self.f,
    }
  }

  /// Collapses a transform list into one matrix
  pub fn from_list(list: &[TransformFunction]) -> Matrix2D {
    let mut matrix = Matrix2D::IDENTITY;
    for function in list {
      matrix = matrix.multiply(&function.to_matrix());
    }
    matrix
  }

  /// Decomposes into translate/scale/rotate/skew per the CSS Transforms
  /// 2D decomposition algorithm.
  pub fn decompose(&self) -> DecomposedMatrix {
    let mut a = self.a;
    let mut b = self.b;
    let mut c = self.c;
    let mut d = self.d;

    let mut scale_x = (a * a + b * b).sqrt();
    if scale_x != 0.0 {
      a /= scale_x;
      b /= scale_x;
    }
    let mut skew = a * c + b * d;
    c -= a * skew;
    d -= b * skew;
    let mut scale_y = (c * c + d * d).sqrt();
    if scale_y != 0.0 {
      c /= scale_y;
      d /= scale_y;
      skew /= scale_y;
    }

    // A negative determinant flips one axis.
    if a * d < b * c {
      a = -a;
      b = -b;
      skew = -skew;
      scale_x = -scale_x;
    }
    let _ = (c, d);

    DecomposedMatrix {
      translate_x: self.e,
      translate_y: self.f,
      scale_x,
      scale_y,
      skew,
      rotation: b.atan2(a),
    }
  }
}

/// Decomposed 2D matrix components for interpolation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecomposedMatrix {
  pub translate_x: f32,
  pub translate_y: f32,
  pub scale_x: f32,
  pub scale_y: f32,
  pub skew: f32,
  pub rotation: f32,
}

impl DecomposedMatrix {
  pub fn lerp(&self, other: &DecomposedMatrix, t: f32) -> DecomposedMatrix {
    let lerp = |a: f32, b: f32| a + (b - a) * t;

    // Rotate the short way around.
    let mut from_rotation = self.rotation;
    let mut to_rotation = other.rotation;
    if (from_rotation - to_rotation).abs() > std::f32::consts::PI {
      if from_rotation > to_rotation {
        from_rotation -= 2.0 * std::f32::consts::PI;
      } else {
        to_rotation -= 2.0 * std::f32::consts::PI;
      }
    }

    DecomposedMatrix {
      translate_x: lerp(self.translate_x, other.translate_x),
      translate_y: lerp(self.translate_y, other.translate_y),
      scale_x: lerp(self.scale_x, other.scale_x),
      scale_y: lerp(self.scale_y, other.scale_y),
      skew: lerp(self.skew, other.skew),
      rotation: lerp(from_rotation, to_rotation),
    }
  }

  pub fn recompose(&self) -> Matrix2D {
    let translate = Matrix2D::translation(self.translate_x, self.translate_y);
    let rotate = Matrix2D::rotation(self.rotation);
    let skew = Matrix2D {
      c: self.skew,
      ..Matrix2D::IDENTITY
    };
    let scale = Matrix2D::scale(self.scale_x, self.scale_y);
    translate.multiply(&rotate).multiply(&skew).multiply(&scale)
  }
}

// ---------------------------------------------------------------------------
// Filters

/// One function of a `filter` list
#[derive(Debug, Clone, PartialEq)]
pub enum FilterFunction {
  Blur(Length),
  Brightness(f32),
  Contrast(f32),
  Grayscale(f32),
  Sepia(f32),
  Saturate(f32),
  /// Angle in degrees
  HueRotate(f32),
  Invert(f32),
  Opacity(f32),
  DropShadow(Box<ShadowValue>),
  Url(Arc<str>),
}

impl FilterFunction {
  pub fn same_operation(&self, other: &FilterFunction) -> bool {
    std::mem::discriminant(self) == std::mem::discriminant(other)
  }
}

// ---------------------------------------------------------------------------
// Clip paths and basic shapes

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeRadius {
  Length(Length),
  ClosestSide,
  FarthestSide,
}

/// Basic shapes accepted by `clip-path`
#[derive(Debug, Clone, PartialEq)]
pub enum BasicShape {
  Circle {
    radius: ShapeRadius,
    center_x: Length,
    center_y: Length,
  },
  Ellipse {
    radius_x: ShapeRadius,
    radius_y: ShapeRadius,
    center_x: Length,
    center_y: Length,
  },
  Inset {
    top: Length,
    right: Length,
    bottom: Length,
    left: Length,
  },
  Polygon(Vec<(Length, Length)>),
}

impl BasicShape {
  /// Shapes of the same category are eligible for interpolation
  pub fn same_category(&self, other: &BasicShape) -> bool {
    match (self, other) {
      (BasicShape::Polygon(a), BasicShape::Polygon(b)) => a.len() == b.len(),
      _ => std::mem::discriminant(self) == std::mem::discriminant(other),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ClipPath {
  #[default]
  None,
  Shape(BasicShape),
  Url(Arc<str>),
}

// ---------------------------------------------------------------------------
// Generated content

#[derive(Debug, Clone, PartialEq)]
pub enum ContentItem {
  Text(String),
  Attr(String),
  Counter(String, ListStyleType),
  OpenQuote,
  CloseQuote,
  NoOpenQuote,
  NoCloseQuote,
  Image(ImageSource),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ContentValue {
  #[default]
  Normal,
  None,
  Items(Vec<ContentItem>),
}

/// `quotes` pairs; an empty list means the UA default
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Quotes {
  pub pairs: Vec<(String, String)>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn display_blockification() {
    assert_eq!(Display::Inline.blockified(), Display::Block);
    assert_eq!(Display::InlineFlex.blockified(), Display::Flex);
    assert_eq!(Display::InlineTable.blockified(), Display::Table);
    assert_eq!(Display::Block.blockified(), Display::Block);
    assert_eq!(Display::TableRow.blockified(), Display::TableRow);
  }

  #[test]
  fn border_radius_zero_component_squares_corner() {
    let radius = BorderRadius::new(Length::px(0.0), Length::px(8.0));
    assert_eq!(radius, BorderRadius::default());
    let radius = BorderRadius::new(Length::px(8.0), Length::px(4.0));
    assert_eq!(radius.horizontal, Length::px(8.0));
  }

  #[test]
  fn fill_layer_clear_detection() {
    let mut layer = FillLayer::default();
    assert!(layer.is_clear());
    layer.repeat_x = Some(FillRepeat::Round);
    assert!(!layer.is_clear());
  }

  #[test]
  fn matrix_identity_round_trips_through_decompose() {
    let decomposed = Matrix2D::IDENTITY.decompose();
    assert!((decomposed.scale_x - 1.0).abs() < 1e-6);
    assert!((decomposed.scale_y - 1.0).abs() < 1e-6);
    assert!(decomposed.rotation.abs() < 1e-6);
    let recomposed = decomposed.recompose();
    assert!((recomposed.a - 1.0).abs() < 1e-6);
    assert!((recomposed.e).abs() < 1e-6);
  }

  #[test]
  fn matrix_decompose_recovers_rotation() {
    let matrix = Matrix2D::rotation(0.5);
    let decomposed = matrix.decompose();
    assert!((decomposed.rotation - 0.5).abs() < 1e-5);
  }

  #[test]
  fn decomposed_lerp_midpoint_translation() {
    let a = Matrix2D::translation(0.0, 0.0).decompose();
    let b = Matrix2D::translation(100.0, 50.0).decompose();
    let mid = a.lerp(&b, 0.5);
    assert!((mid.translate_x - 50.0).abs() < 1e-5);
    assert!((mid.translate_y - 25.0).abs() < 1e-5);
  }

  #[test]
  fn shape_category_matching() {
    let circle = BasicShape::Circle {
      radius: ShapeRadius::ClosestSide,
      center_x: Length::percent(50.0),
      center_y: Length::percent(50.0),
    };
    let ellipse = BasicShape::Ellipse {
      radius_x: ShapeRadius::ClosestSide,
      radius_y: ShapeRadius::ClosestSide,
      center_x: Length::percent(50.0),
      center_y: Length::percent(50.0),
    };
    assert!(!circle.same_category(&ellipse));
    assert!(circle.same_category(&circle.clone()));

    let tri = BasicShape::Polygon(vec![
      (Length::px(0.0), Length::px(0.0)),
      (Length::px(1.0), Length::px(0.0)),
      (Length::px(0.0), Length::px(1.0)),
    ]);
    let quad = BasicShape::Polygon(vec![
      (Length::px(0.0), Length::px(0.0)),
      (Length::px(1.0), Length::px(0.0)),
      (Length::px(1.0), Length::px(1.0)),
      (Length::px(0.0), Length::px(1.0)),
    ]);
    assert!(!tri.same_category(&quad));
  }
}

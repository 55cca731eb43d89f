//! Property identifiers and the application strategy table
//!
//! Every supported CSS property has a [`PropertyId`]; the enum order is the
//! dependency order the cascade relies on. Properties whose ordinal is below
//! [`PropertyId::LineHeight`] are "high priority": they are applied before
//! font finalization because later properties may resolve lengths against
//! the finalized font.
//!
//! The [`StrategyTable`] maps each longhand to an {inherit, initial, value}
//! handler triple. Handlers are built once from a small set of generic
//! shapes parameterized by accessor pairs; the handful of structured
//! properties with no reusable shape (shadows, transforms, filters, content,
//! clip, counters, quotes) have no table entry and fall through to the
//! cascade engine's second-tier switch.

use crate::calc::{self, ValueRange};
use crate::dom::DocumentSettings;
use crate::style::color::Rgba;
use crate::style::computed::{ComputedStyle, LineHeight, VisitedLinkColors};
use crate::style::declaration::PropertyValue;
use crate::style::fonts::{
  self, FontDescription, FontFamily, FontMetrics, FontSizeKeyword, FontSizeSpec, GenericFamily,
};
use crate::style::types::*;
use crate::style::values::{Length, LengthOrAuto};
use std::sync::Arc;

/// Identifier of a supported property.
///
/// Ordinals below `LineHeight` are the high-priority group; shorthands sit
/// at the end and own no storage of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum PropertyId {
  // High-priority properties. Color and the font sub-properties must land
  // before anything that resolves em/ex lengths or currentcolor.
  Color,
  Direction,
  WritingMode,
  TextOrientation,
  FontFamily,
  FontSize,
  FontStyle,
  FontVariantCaps,
  FontWeight,
  FontStretch,
  Zoom,
  /// Boundary ordinal: found in the high-priority pass but applied only
  /// after font finalization
  LineHeight,

  // Box generation
  Display,
  Position,
  Float,
  Clear,
  OverflowX,
  OverflowY,
  VerticalAlign,
  UnicodeBidi,
  ZIndex,
  Opacity,
  Visibility,

  // Box model
  Width,
  Height,
  MinWidth,
  MinHeight,
  MaxWidth,
  MaxHeight,
  BoxSizing,
  Top,
  Right,
  Bottom,
  Left,
  MarginTop,
  MarginRight,
  MarginBottom,
  MarginLeft,
  PaddingTop,
  PaddingRight,
  PaddingBottom,
  PaddingLeft,

  // Borders
  BorderTopWidth,
  BorderRightWidth,
  BorderBottomWidth,
  BorderLeftWidth,
  BorderTopStyle,
  BorderRightStyle,
  BorderBottomStyle,
  BorderLeftStyle,
  BorderTopColor,
  BorderRightColor,
  BorderBottomColor,
  BorderLeftColor,
  BorderTopLeftRadius,
  BorderTopRightRadius,
  BorderBottomLeftRadius,
  BorderBottomRightRadius,

  // Outline
  OutlineColor,
  OutlineStyle,
  OutlineWidth,
  OutlineOffset,

  // Backgrounds and masks
  BackgroundColor,
  BackgroundImage,
  BackgroundAttachment,
  BackgroundClip,
  BackgroundOrigin,
  BackgroundPositionX,
  BackgroundPositionY,
  BackgroundRepeatX,
  BackgroundRepeatY,
  BackgroundSize,
  MaskImage,
  MaskClip,
  MaskOrigin,
  MaskPositionX,
  MaskPositionY,
  MaskRepeatX,
  MaskRepeatY,
  MaskSize,

  // Effects (BoxShadow through CounterReset are second-tier except the
  // origin/appearance entries)
  BoxShadow,
  TextShadow,
  Transform,
  TransformOriginX,
  TransformOriginY,
  Filter,
  Clip,
  ClipPath,
  Appearance,

  // Text
  TextAlign,
  TextIndent,
  TextTransform,
  TextDecorationLine,
  TextDecorationColor,
  LetterSpacing,
  WordSpacing,
  WhiteSpace,
  WordBreak,
  OverflowWrap,
  TabSize,
  TextRendering,

  // Lists
  ListStyleType,
  ListStylePosition,
  ListStyleImage,

  // Tables
  BorderCollapse,
  BorderHorizontalSpacing,
  BorderVerticalSpacing,
  CaptionSide,
  EmptyCells,
  TableLayout,

  // Generated content
  Content,
  Quotes,
  CounterIncrement,
  CounterReset,

  Cursor,

  // Animation longhand layers
  AnimationName,
  AnimationDuration,
  AnimationDelay,
  AnimationTimingFunction,
  AnimationIterationCount,
  AnimationDirection,
  AnimationFillMode,
  AnimationPlayState,

  // Transition longhand layers
  TransitionProperty,
  TransitionDuration,
  TransitionDelay,
  TransitionTimingFunction,

  // Shorthands: pure aggregates over longhands, no storage
  Margin,
  Padding,
  BorderWidth,
  BorderStyle,
  BorderColor,
  BorderTop,
  BorderRight,
  BorderBottom,
  BorderLeft,
  Border,
  BorderRadius,
  BorderSpacing,
  Background,
  Font,
  ListStyle,
  Outline,
  Overflow,
  TextDecoration,
  Animation,
  Transition,
}

impl PropertyId {
  /// Number of property ids (array size for ordinal-indexed tables)
  pub const COUNT: usize = PropertyId::Transition as usize + 1;

  pub fn index(self) -> usize {
    self as usize
  }

  /// Applied before font finalization (dependency ordering earlier than
  /// line-height). `LineHeight` itself is excluded: it is recorded during
  /// the high-priority pass and applied after the font is final.
  pub fn is_high_priority(self) -> bool {
    (self as u16) < (PropertyId::LineHeight as u16)
  }

  /// Value propagates from parent to child when no declaration applies
  pub fn is_inherited(self) -> bool {
    use PropertyId::*;
    matches!(
      self,
      Color
        | Direction
        | WritingMode
        | TextOrientation
        | FontFamily
        | FontSize
        | FontStyle
        | FontVariantCaps
        | FontWeight
        | FontStretch
        | LineHeight
        | Visibility
        | TextAlign
        | TextIndent
        | TextTransform
        | LetterSpacing
        | WordSpacing
        | WhiteSpace
        | WordBreak
        | OverflowWrap
        | TabSize
        | TextRendering
        | TextShadow
        | Cursor
        | ListStyleType
        | ListStylePosition
        | ListStyleImage
        | BorderCollapse
        | BorderHorizontalSpacing
        | BorderVerticalSpacing
        | CaptionSide
        | EmptyCells
        | Quotes
    )
  }

  /// Expands to other properties instead of owning storage
  pub fn is_shorthand(self) -> bool {
    (self as u16) >= (PropertyId::Margin as u16)
  }

  /// Constituent longhands of a shorthand
  pub fn longhands(self) -> Option<&'static [PropertyId]> {
    use PropertyId::*;
    Some(match self {
      Margin => &[MarginTop, MarginRight, MarginBottom, MarginLeft],
      Padding => &[PaddingTop, PaddingRight, PaddingBottom, PaddingLeft],
      BorderWidth => &[
        BorderTopWidth,
        BorderRightWidth,
        BorderBottomWidth,
        BorderLeftWidth,
      ],
      BorderStyle => &[
        BorderTopStyle,
        BorderRightStyle,
        BorderBottomStyle,
        BorderLeftStyle,
      ],
      BorderColor => &[
        BorderTopColor,
        BorderRightColor,
        BorderBottomColor,
        BorderLeftColor,
      ],
      BorderTop => &[BorderTopWidth, BorderTopStyle, BorderTopColor],
      BorderRight => &[BorderRightWidth, BorderRightStyle, BorderRightColor],
      BorderBottom => &[BorderBottomWidth, BorderBottomStyle, BorderBottomColor],
      BorderLeft => &[BorderLeftWidth, BorderLeftStyle, BorderLeftColor],
      Border => &[
        BorderTopWidth,
        BorderRightWidth,
        BorderBottomWidth,
        BorderLeftWidth,
        BorderTopStyle,
        BorderRightStyle,
        BorderBottomStyle,
        BorderLeftStyle,
        BorderTopColor,
        BorderRightColor,
        BorderBottomColor,
        BorderLeftColor,
      ],
      BorderRadius => &[
        BorderTopLeftRadius,
        BorderTopRightRadius,
        BorderBottomLeftRadius,
        BorderBottomRightRadius,
      ],
      BorderSpacing => &[BorderHorizontalSpacing, BorderVerticalSpacing],
      Background => &[
        BackgroundColor,
        BackgroundImage,
        BackgroundAttachment,
        BackgroundClip,
        BackgroundOrigin,
        BackgroundPositionX,
        BackgroundPositionY,
        BackgroundRepeatX,
        BackgroundRepeatY,
        BackgroundSize,
      ],
      Font => &[
        FontFamily,
        FontSize,
        FontStyle,
        FontVariantCaps,
        FontWeight,
        FontStretch,
        LineHeight,
      ],
      ListStyle => &[ListStyleType, ListStylePosition, ListStyleImage],
      Outline => &[OutlineColor, OutlineStyle, OutlineWidth],
      Overflow => &[OverflowX, OverflowY],
      TextDecoration => &[TextDecorationLine, TextDecorationColor],
      Animation => &[
        AnimationName,
        AnimationDuration,
        AnimationDelay,
        AnimationTimingFunction,
        AnimationIterationCount,
        AnimationDirection,
        AnimationFillMode,
        AnimationPlayState,
      ],
      Transition => &[
        TransitionProperty,
        TransitionDuration,
        TransitionDelay,
        TransitionTimingFunction,
      ],
      _ => return None,
    })
  }

  /// Has a separate visited-link color slot
  pub fn is_visited_dependent(self) -> bool {
    use PropertyId::*;
    matches!(
      self,
      Color
        | BackgroundColor
        | BorderTopColor
        | BorderRightColor
        | BorderBottomColor
        | BorderLeftColor
        | OutlineColor
    )
  }

  pub fn is_animation_longhand(self) -> bool {
    let ord = self as u16;
    ord >= PropertyId::AnimationName as u16 && ord <= PropertyId::AnimationPlayState as u16
  }

  pub fn is_transition_longhand(self) -> bool {
    let ord = self as u16;
    ord >= PropertyId::TransitionProperty as u16 && ord <= PropertyId::TransitionTimingFunction as u16
  }

  pub fn is_background_longhand(self) -> bool {
    let ord = self as u16;
    ord >= PropertyId::BackgroundImage as u16 && ord <= PropertyId::BackgroundSize as u16
  }

  pub fn is_mask_longhand(self) -> bool {
    let ord = self as u16;
    ord >= PropertyId::MaskImage as u16 && ord <= PropertyId::MaskSize as u16
  }

  pub fn is_border_property(self) -> bool {
    let ord = self as u16;
    ord >= PropertyId::BorderTopWidth as u16 && ord <= PropertyId::BorderBottomRightRadius as u16
  }

  pub fn is_margin_property(self) -> bool {
    let ord = self as u16;
    ord >= PropertyId::MarginTop as u16 && ord <= PropertyId::MarginLeft as u16
  }

  pub fn is_padding_property(self) -> bool {
    let ord = self as u16;
    ord >= PropertyId::PaddingTop as u16 && ord <= PropertyId::PaddingLeft as u16
  }

  /// Blending may be delegated to a compositor
  pub fn is_accelerated(self) -> bool {
    matches!(
      self,
      PropertyId::Opacity | PropertyId::Transform | PropertyId::Filter
    )
  }

  pub fn name(self) -> &'static str {
    use PropertyId::*;
    match self {
      Color => "color",
      Direction => "direction",
      WritingMode => "writing-mode",
      TextOrientation => "text-orientation",
      FontFamily => "font-family",
      FontSize => "font-size",
      FontStyle => "font-style",
      FontVariantCaps => "font-variant-caps",
      FontWeight => "font-weight",
      FontStretch => "font-stretch",
      Zoom => "zoom",
      LineHeight => "line-height",
      Display => "display",
      Position => "position",
      Float => "float",
      Clear => "clear",
      OverflowX => "overflow-x",
      OverflowY => "overflow-y",
      VerticalAlign => "vertical-align",
      UnicodeBidi => "unicode-bidi",
      ZIndex => "z-index",
      Opacity => "opacity",
      Visibility => "visibility",
      Width => "width",
      Height => "height",
      MinWidth => "min-width",
      MinHeight => "min-height",
      MaxWidth => "max-width",
      MaxHeight => "max-height",
      BoxSizing => "box-sizing",
      Top => "top",
      Right => "right",
      Bottom => "bottom",
      Left => "left",
      MarginTop => "margin-top",
      MarginRight => "margin-right",
      MarginBottom => "margin-bottom",
      MarginLeft => "margin-left",
      PaddingTop => "padding-top",
      PaddingRight => "padding-right",
      PaddingBottom => "padding-bottom",
      PaddingLeft => "padding-left",
      BorderTopWidth => "border-top-width",
      BorderRightWidth => "border-right-width",
      BorderBottomWidth => "border-bottom-width",
      BorderLeftWidth => "border-left-width",
      BorderTopStyle => "border-top-style",
      BorderRightStyle => "border-right-style",
      BorderBottomStyle => "border-bottom-style",
      BorderLeftStyle => "border-left-style",
      BorderTopColor => "border-top-color",
      BorderRightColor => "border-right-color",
      BorderBottomColor => "border-bottom-color",
      BorderLeftColor => "border-left-color",
      BorderTopLeftRadius => "border-top-left-radius",
      BorderTopRightRadius => "border-top-right-radius",
      BorderBottomLeftRadius => "border-bottom-left-radius",
      BorderBottomRightRadius => "border-bottom-right-radius",
      OutlineColor => "outline-color",
      OutlineStyle => "outline-style",
      OutlineWidth => "outline-width",
      OutlineOffset => "outline-offset",
      BackgroundColor => "background-color",
      BackgroundImage => "background-image",
      BackgroundAttachment => "background-attachment",
      BackgroundClip => "background-clip",
      BackgroundOrigin => "background-origin",
      BackgroundPositionX => "background-position-x",
      BackgroundPositionY => "background-position-y",
      BackgroundRepeatX => "background-repeat-x",
      BackgroundRepeatY => "background-repeat-y",
      BackgroundSize => "background-size",
      MaskImage => "mask-image",
      MaskClip => "mask-clip",
      MaskOrigin => "mask-origin",
      MaskPositionX => "mask-position-x",
      MaskPositionY => "mask-position-y",
      MaskRepeatX => "mask-repeat-x",
      MaskRepeatY => "mask-repeat-y",
      MaskSize => "mask-size",
      BoxShadow => "box-shadow",
      TextShadow => "text-shadow",
      Transform => "transform",
      TransformOriginX => "transform-origin-x",
      TransformOriginY => "transform-origin-y",
      Filter => "filter",
      Clip => "clip",
      ClipPath => "clip-path",
      Appearance => "appearance",
      TextAlign => "text-align",
      TextIndent => "text-indent",
      TextTransform => "text-transform",
      TextDecorationLine => "text-decoration-line",
      TextDecorationColor => "text-decoration-color",
      LetterSpacing => "letter-spacing",
      WordSpacing => "word-spacing",
      WhiteSpace => "white-space",
      WordBreak => "word-break",
      OverflowWrap => "overflow-wrap",
      TabSize => "tab-size",
      TextRendering => "text-rendering",
      ListStyleType => "list-style-type",
      ListStylePosition => "list-style-position",
      ListStyleImage => "list-style-image",
      BorderCollapse => "border-collapse",
      BorderHorizontalSpacing => "-webkit-border-horizontal-spacing",
      BorderVerticalSpacing => "-webkit-border-vertical-spacing",
      CaptionSide => "caption-side",
      EmptyCells => "empty-cells",
      TableLayout => "table-layout",
      Content => "content",
      Quotes => "quotes",
      CounterIncrement => "counter-increment",
      CounterReset => "counter-reset",
      Cursor => "cursor",
      AnimationName => "animation-name",
      AnimationDuration => "animation-duration",
      AnimationDelay => "animation-delay",
      AnimationTimingFunction => "animation-timing-function",
      AnimationIterationCount => "animation-iteration-count",
      AnimationDirection => "animation-direction",
      AnimationFillMode => "animation-fill-mode",
      AnimationPlayState => "animation-play-state",
      TransitionProperty => "transition-property",
      TransitionDuration => "transition-duration",
      TransitionDelay => "transition-delay",
      TransitionTimingFunction => "transition-timing-function",
      Margin => "margin",
      Padding => "padding",
      BorderWidth => "border-width",
      BorderStyle => "border-style",
      BorderColor => "border-color",
      BorderTop => "border-top",
      BorderRight => "border-right",
      BorderBottom => "border-bottom",
      BorderLeft => "border-left",
      Border => "border",
      BorderRadius => "border-radius",
      BorderSpacing => "border-spacing",
      Background => "background",
      Font => "font",
      ListStyle => "list-style",
      Outline => "outline",
      Overflow => "overflow",
      TextDecoration => "text-decoration",
      Animation => "animation",
      Transition => "transition",
    }
  }

  pub fn from_name(name: &str) -> Option<Self> {
    // The table is small enough that a linear scan over the canonical
    // names stays off any profile; property lookup by name only happens
    // at parse time, never during cascade.
    ALL_PROPERTIES.iter().copied().find(|id| id.name() == name)
  }
}

impl std::str::FromStr for PropertyId {
  type Err = crate::error::StyleError;

  fn from_str(name: &str) -> std::result::Result<Self, Self::Err> {
    Self::from_name(name)
      .ok_or_else(|| crate::error::StyleError::UnknownProperty(name.to_string()))
  }
}

/// Every property id in ordinal order
pub static ALL_PROPERTIES: [PropertyId; PropertyId::COUNT] = {
  use PropertyId::*;
  [
    Color,
    Direction,
    WritingMode,
    TextOrientation,
    FontFamily,
    FontSize,
    FontStyle,
    FontVariantCaps,
    FontWeight,
    FontStretch,
    Zoom,
    LineHeight,
    Display,
    Position,
    Float,
    Clear,
    OverflowX,
    OverflowY,
    VerticalAlign,
    UnicodeBidi,
    ZIndex,
    Opacity,
    Visibility,
    Width,
    Height,
    MinWidth,
    MinHeight,
    MaxWidth,
    MaxHeight,
    BoxSizing,
    Top,
    Right,
    Bottom,
    Left,
    MarginTop,
    MarginRight,
    MarginBottom,
    MarginLeft,
    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,
    BorderTopWidth,
    BorderRightWidth,
    BorderBottomWidth,
    BorderLeftWidth,
    BorderTopStyle,
    BorderRightStyle,
    BorderBottomStyle,
    BorderLeftStyle,
    BorderTopColor,
    BorderRightColor,
    BorderBottomColor,
    BorderLeftColor,
    BorderTopLeftRadius,
    BorderTopRightRadius,
    BorderBottomLeftRadius,
    BorderBottomRightRadius,
    OutlineColor,
    OutlineStyle,
    OutlineWidth,
    OutlineOffset,
    BackgroundColor,
    BackgroundImage,
    BackgroundAttachment,
    BackgroundClip,
    BackgroundOrigin,
    BackgroundPositionX,
    BackgroundPositionY,
    BackgroundRepeatX,
    BackgroundRepeatY,
    BackgroundSize,
    MaskImage,
    MaskClip,
    MaskOrigin,
    MaskPositionX,
    MaskPositionY,
    MaskRepeatX,
    MaskRepeatY,
    MaskSize,
    BoxShadow,
    TextShadow,
    Transform,
    TransformOriginX,
    TransformOriginY,
    Filter,
    Clip,
    ClipPath,
    Appearance,
    TextAlign,
    TextIndent,
    TextTransform,
    TextDecorationLine,
    TextDecorationColor,
    LetterSpacing,
    WordSpacing,
    WhiteSpace,
    WordBreak,
    OverflowWrap,
    TabSize,
    TextRendering,
    ListStyleType,
    ListStylePosition,
    ListStyleImage,
    BorderCollapse,
    BorderHorizontalSpacing,
    BorderVerticalSpacing,
    CaptionSide,
    EmptyCells,
    TableLayout,
    Content,
    Quotes,
    CounterIncrement,
    CounterReset,
    Cursor,
    AnimationName,
    AnimationDuration,
    AnimationDelay,
    AnimationTimingFunction,
    AnimationIterationCount,
    AnimationDirection,
    AnimationFillMode,
    AnimationPlayState,
    TransitionProperty,
    TransitionDuration,
    TransitionDelay,
    TransitionTimingFunction,
    Margin,
    Padding,
    BorderWidth,
    BorderStyle,
    BorderColor,
    BorderTop,
    BorderRight,
    BorderBottom,
    BorderLeft,
    Border,
    BorderRadius,
    BorderSpacing,
    Background,
    Font,
    ListStyle,
    Outline,
    Overflow,
    TextDecoration,
    Animation,
    Transition,
  ]
};

/// Which style context a pass is computing into. Color properties write
/// their visited-link slot instead of the regular slot under `Visited`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkGate {
  #[default]
  Normal,
  Visited,
}

/// Mutable per-resolution state threaded through the cascade call stack.
#[derive(Debug, Default)]
pub struct ApplyState {
  /// A font-affecting property changed; finalization must run
  pub font_dirty: bool,
  /// A zoom declaration changed the effective zoom
  pub zoom_changed: bool,
  /// The winning line-height value, recorded in the high-priority pass and
  /// applied after font finalization
  pub deferred_line_height: Option<PropertyValue>,
  /// Resource references seen during application, resolved by the
  /// post-cascade resource pass in property-id order
  pub pending_resources: Vec<(PropertyId, Arc<str>)>,
}

/// Everything a property handler may touch.
pub struct ApplyCtx<'a> {
  pub style: &'a mut ComputedStyle,
  pub parent: &'a ComputedStyle,
  pub settings: &'a DocumentSettings,
  /// Metrics for the style's finalized font (approximate before
  /// finalization; only low-priority handlers resolve ex/ch)
  pub font_metrics: FontMetrics,
  pub link_gate: LinkGate,
  pub state: &'a mut ApplyState,
}

impl ApplyCtx<'_> {
  /// Length-resolution context against the style under construction.
  pub fn length_context(&self, percentage_base: Option<f64>) -> calc::CalcLengthContext {
    calc::CalcLengthContext {
      percentage_base,
      font_size: self.style.font_size() as f64,
      root_font_size: self.settings.default_font_size as f64,
      viewport_width: self.settings.viewport_width as f64,
      viewport_height: self.settings.viewport_height as f64,
      x_height: self.font_metrics.x_height.map(f64::from),
      zero_advance: self.font_metrics.zero_advance.map(f64::from),
    }
  }

  /// Parses a value into a [`Length`], attaching the owning property's
  /// range policy to any calc tree. A statically negative value under a
  /// non-negative range invalidates the declaration.
  pub fn parse_length(&self, value: &PropertyValue, range: ValueRange) -> Option<Length> {
    match value {
      PropertyValue::Length(length) => {
        if length.calc.is_none() && range == ValueRange::NonNegative && length.value < 0.0 {
          return None;
        }
        Some(length.clone())
      }
      PropertyValue::Percentage(pct) => {
        if range == ValueRange::NonNegative && *pct < 0.0 {
          return None;
        }
        Some(Length::percent(*pct))
      }
      PropertyValue::Number(n) => {
        // Unitless zero is always a length; other unitless numbers are
        // quirks-mode pixels.
        if *n == 0.0 {
          Some(Length::zero())
        } else if self.settings.quirks_mode {
          if range == ValueRange::NonNegative && *n < 0.0 {
            return None;
          }
          Some(Length::px(*n))
        } else {
          None
        }
      }
      PropertyValue::Calc(tokens) => {
        let expr = calc::parse_cached(tokens)?;
        match expr.category() {
          calc::CalcCategory::Length
          | calc::CalcCategory::Percent
          | calc::CalcCategory::PercentLength => Some(Length::from_calc(expr, range)),
          _ => None,
        }
      }
      _ => None,
    }
  }

  /// Parses and fully resolves a value to pixels using the current font
  /// context (no percentage base).
  pub fn resolve_px(&self, value: &PropertyValue, range: ValueRange) -> Option<f32> {
    let length = self.parse_length(value, range)?;
    let resolved = length.resolve_with_context(&self.length_context(None))?;
    Some(range.clamp(resolved as f64) as f32)
  }
}

fn parse_color(ctx: &ApplyCtx<'_>, value: &PropertyValue, is_color_property: bool) -> Option<Rgba> {
  match value {
    PropertyValue::Color(color) => Some(*color),
    PropertyValue::Keyword(kw) if kw == "currentcolor" => {
      // On `color` itself, currentcolor means inherit.
      Some(if is_color_property {
        ctx.parent.color()
      } else {
        ctx.style.color()
      })
    }
    PropertyValue::Keyword(kw) if kw == "transparent" => Some(Rgba::TRANSPARENT),
    _ => None,
  }
}

// ---------------------------------------------------------------------------
// Handler plumbing

type ApplyFn = Box<dyn Fn(&mut ApplyCtx<'_>)>;
type ApplyValueFn = Box<dyn Fn(&mut ApplyCtx<'_>, &PropertyValue)>;

/// The {inherit, initial, value} triple for one longhand.
pub struct PropertyHandler {
  inherit: ApplyFn,
  initial: ApplyFn,
  value: ApplyValueFn,
}

/// Generic copy-through shape: value parses into the stored type, inherit
/// copies the parent's getter result, initial writes the provided value.
fn copy_through<T, P>(
  get: fn(&ComputedStyle) -> T,
  set: fn(&mut ComputedStyle, T),
  initial: fn() -> T,
  parse: P,
) -> PropertyHandler
where
  T: 'static,
  P: Fn(&mut ApplyCtx<'_>, &PropertyValue) -> Option<T> + Copy + 'static,
{
  PropertyHandler {
    inherit: Box::new(move |ctx| {
      let value = get(ctx.parent);
      set(ctx.style, value);
    }),
    initial: Box::new(move |ctx| set(ctx.style, initial())),
    value: Box::new(move |ctx, value| {
      if let Some(parsed) = parse(ctx, value) {
        set(ctx.style, parsed);
      }
    }),
  }
}

/// Copy-through over a plain keyword enum
fn keyword<T: 'static>(
  get: fn(&ComputedStyle) -> T,
  set: fn(&mut ComputedStyle, T),
  initial: fn() -> T,
  parse_keyword: fn(&str) -> Option<T>,
) -> PropertyHandler {
  copy_through(get, set, initial, move |_ctx: &mut ApplyCtx<'_>, value: &PropertyValue| {
    value.keyword().and_then(parse_keyword)
  })
}

/// Auto-aware length shape over [`LengthOrAuto`]
fn auto_length(
  get: fn(&ComputedStyle) -> LengthOrAuto,
  set: fn(&mut ComputedStyle, LengthOrAuto),
  range: ValueRange,
) -> PropertyHandler {
  copy_through(get, set, || LengthOrAuto::Auto, move |ctx: &mut ApplyCtx<'_>, value: &PropertyValue| {
    if value.keyword() == Some("auto") {
      return Some(LengthOrAuto::Auto);
    }
    ctx.parse_length(value, range).map(LengthOrAuto::Length)
  })
}

fn parse_size_value(ctx: &ApplyCtx<'_>, value: &PropertyValue, allow_none: bool) -> Option<SizeValue> {
  if let Some(kw) = value.keyword() {
    // The modern fit-content family is recognized before the legacy
    // -intrinsic family; a keyword claimed by both resolves modern.
    return Some(match kw {
      "auto" => SizeValue::Auto,
      "none" if allow_none => SizeValue::None,
      "min-content" | "-webkit-min-content" => SizeValue::MinContent,
      "max-content" | "-webkit-max-content" => SizeValue::MaxContent,
      "fit-content" | "-webkit-fit-content" => SizeValue::FitContent,
      "fill-available" | "-webkit-fill-available" => SizeValue::FillAvailable,
      "intrinsic" => SizeValue::Intrinsic,
      "min-intrinsic" => SizeValue::MinIntrinsic,
      _ => return None,
    });
  }
  ctx
    .parse_length(value, ValueRange::NonNegative)
    .map(SizeValue::Length)
}

/// Auto/none/intrinsic-aware sizing shape for width/height and friends
fn size_property(
  get: fn(&ComputedStyle) -> SizeValue,
  set: fn(&mut ComputedStyle, SizeValue),
  initial: fn() -> SizeValue,
  allow_none: bool,
) -> PropertyHandler {
  copy_through(get, set, initial, move |ctx: &mut ApplyCtx<'_>, value: &PropertyValue| {
    parse_size_value(ctx, value, allow_none)
  })
}

/// Paired-radius shape: a 2-component value decomposes into two lengths;
/// `BorderRadius::new` nulls the pair when either resolves to zero.
fn paired_radius(
  get: fn(&ComputedStyle) -> BorderRadius,
  set: fn(&mut ComputedStyle, BorderRadius),
) -> PropertyHandler {
  copy_through(get, set, BorderRadius::default, |ctx: &mut ApplyCtx<'_>, value: &PropertyValue| {
    match value {
      PropertyValue::Pair(first, second) => {
        let horizontal = ctx.parse_length(first, ValueRange::NonNegative)?;
        let vertical = ctx.parse_length(second, ValueRange::NonNegative)?;
        Some(BorderRadius::new(horizontal, vertical))
      }
      other => {
        let radius = ctx.parse_length(other, ValueRange::NonNegative)?;
        Some(BorderRadius::new(radius.clone(), radius))
      }
    }
  })
}

/// Color-with-link-variants shape. Under the visited gate all three
/// operations write the visited-link slot; otherwise the regular slot.
fn color_property<I>(
  get: fn(&ComputedStyle) -> Rgba,
  set: fn(&mut ComputedStyle, Rgba),
  visited_slot: fn(&mut VisitedLinkColors) -> &mut Option<Rgba>,
  initial: I,
  is_color_property: bool,
) -> PropertyHandler
where
  I: Fn(&ApplyCtx<'_>) -> Rgba + Copy + 'static,
{
  let write = move |ctx: &mut ApplyCtx<'_>, color: Rgba| {
    if ctx.link_gate == LinkGate::Visited {
      *visited_slot(ctx.style.visited_colors_mut()) = Some(color);
    } else {
      set(ctx.style, color);
    }
  };
  PropertyHandler {
    inherit: Box::new(move |ctx| {
      let color = get(ctx.parent);
      write(ctx, color);
    }),
    initial: Box::new(move |ctx| {
      let color = initial(ctx);
      write(ctx, color);
    }),
    value: Box::new(move |ctx, value| {
      if let Some(color) = parse_color(ctx, value, is_color_property) {
        write(ctx, color);
      }
    }),
  }
}

/// Font-description sub-property shape: mutates the nested description and
/// marks the font dirty for finalization.
fn font_property<T, P>(
  get: fn(&FontDescription) -> T,
  set: fn(&mut FontDescription, T),
  initial: fn() -> T,
  parse: P,
) -> PropertyHandler
where
  T: 'static,
  P: Fn(&mut ApplyCtx<'_>, &PropertyValue) -> Option<T> + Copy + 'static,
{
  PropertyHandler {
    inherit: Box::new(move |ctx| {
      let value = get(ctx.parent.font());
      set(ctx.style.font_mut(), value);
      ctx.state.font_dirty = true;
    }),
    initial: Box::new(move |ctx| {
      set(ctx.style.font_mut(), initial());
      ctx.state.font_dirty = true;
    }),
    value: Box::new(move |ctx, value| {
      if let Some(parsed) = parse(ctx, value) {
        set(ctx.style.font_mut(), parsed);
        ctx.state.font_dirty = true;
      }
    }),
  }
}

/// Layered fill shape, shared by background, mask, animation and transition
/// longhands.
///
/// apply-value walks the comma-separated value list in lock-step with the
/// layer list, extending it as needed and clearing the field on layers past
/// the values. Inherit copies the parent's set prefix and clears the rest.
fn layered<L, F, P>(
  list: fn(&ComputedStyle) -> &[L],
  list_mut: fn(&mut ComputedStyle) -> &mut Vec<L>,
  slot: fn(&L) -> Option<&F>,
  slot_mut: fn(&mut L) -> &mut Option<F>,
  parse: P,
) -> PropertyHandler
where
  L: Default + Clone + 'static,
  F: Clone + 'static,
  P: Fn(&mut ApplyCtx<'_>, &PropertyValue) -> Option<F> + Copy + 'static,
{
  fn write_layers<L: Default, F>(
    layers: &mut Vec<L>,
    slot_mut: fn(&mut L) -> &mut Option<F>,
    values: Vec<F>,
  ) {
    if layers.len() < values.len() {
      layers.resize_with(values.len(), L::default);
    }
    let set = values.len();
    for (layer, value) in layers.iter_mut().zip(values) {
      *slot_mut(layer) = Some(value);
    }
    for layer in layers.iter_mut().skip(set) {
      *slot_mut(layer) = None;
    }
  }

  PropertyHandler {
    inherit: Box::new(move |ctx| {
      // Copy the parent's longest explicitly-set prefix.
      let mut values = Vec::new();
      for layer in list(ctx.parent) {
        match slot(layer) {
          Some(value) => values.push(value.clone()),
          None => break,
        }
      }
      write_layers(list_mut(ctx.style), slot_mut, values);
    }),
    initial: Box::new(move |ctx| {
      for layer in list_mut(ctx.style).iter_mut() {
        *slot_mut(layer) = None;
      }
    }),
    value: Box::new(move |ctx, value| {
      let items: &[PropertyValue] = match value {
        PropertyValue::List(items) => items,
        single => std::slice::from_ref(single),
      };
      let mut values = Vec::with_capacity(items.len());
      for item in items {
        match parse(ctx, item) {
          Some(parsed) => values.push(parsed),
          // One bad item invalidates the whole declaration.
          None => return,
        }
      }
      write_layers(list_mut(ctx.style), slot_mut, values);
    }),
  }
}

// ---------------------------------------------------------------------------
// Parse helpers for specific value grammars

fn parse_font_families(value: &PropertyValue) -> Option<Vec<FontFamily>> {
  let names: Vec<&str> = match value {
    PropertyValue::FontFamilyList(names) => names.iter().map(String::as_str).collect(),
    PropertyValue::Keyword(kw) => vec![kw.as_str()],
    PropertyValue::String(name) => vec![name.as_str()],
    _ => return None,
  };
  if names.is_empty() {
    return None;
  }
  Some(
    names
      .into_iter()
      .map(|name| match GenericFamily::parse(name) {
        Some(generic) => FontFamily::Generic(generic),
        None => FontFamily::Named(Arc::from(name)),
      })
      .collect(),
  )
}

fn parse_font_size(ctx: &ApplyCtx<'_>, value: &PropertyValue) -> Option<FontSizeSpec> {
  if let Some(kw) = value.keyword() {
    if let Some(keyword) = FontSizeKeyword::parse(kw) {
      return Some(FontSizeSpec::Keyword(keyword));
    }
    return match kw {
      "smaller" => Some(FontSizeSpec::Smaller),
      "larger" => Some(FontSizeSpec::Larger),
      _ => None,
    };
  }
  let length = ctx.parse_length(value, ValueRange::NonNegative)?;
  if length.calc.is_none() && length.unit.is_absolute() {
    Some(FontSizeSpec::Px(length.to_px()))
  } else {
    Some(FontSizeSpec::Length(length))
  }
}

fn parse_font_weight(ctx: &ApplyCtx<'_>, value: &PropertyValue) -> Option<fonts::FontWeight> {
  match value {
    PropertyValue::Number(n) if (1.0..=1000.0).contains(n) => Some(fonts::FontWeight(*n as u16)),
    PropertyValue::Keyword(kw) => fonts::FontWeight::parse_keyword(kw, ctx.parent.font().weight),
    _ => None,
  }
}

fn parse_line_height(ctx: &ApplyCtx<'_>, value: &PropertyValue) -> Option<LineHeight> {
  match value {
    PropertyValue::Keyword(kw) if kw == "normal" => Some(LineHeight::Normal),
    PropertyValue::Number(n) if *n >= 0.0 => Some(LineHeight::Number(*n)),
    other => {
      let length = ctx.parse_length(other, ValueRange::NonNegative)?;
      let base = ctx.style.font_size() as f64;
      let resolved = length.resolve_with_context(&ctx.length_context(Some(base)))?;
      Some(LineHeight::Px(resolved))
    }
  }
}

/// `thin`/`medium`/`thick` or a length, resolved to computed pixels
fn parse_border_width(ctx: &ApplyCtx<'_>, value: &PropertyValue) -> Option<f32> {
  use crate::style::computed::{MEDIUM_BORDER_WIDTH, THICK_BORDER_WIDTH, THIN_BORDER_WIDTH};
  if let Some(kw) = value.keyword() {
    return match kw {
      "thin" => Some(THIN_BORDER_WIDTH),
      "medium" => Some(MEDIUM_BORDER_WIDTH),
      "thick" => Some(THICK_BORDER_WIDTH),
      _ => None,
    };
  }
  ctx.resolve_px(value, ValueRange::NonNegative)
}

/// Fill-position component; keyword edges resolve to percentages.
fn parse_fill_position(
  ctx: &ApplyCtx<'_>,
  value: &PropertyValue,
  vertical: bool,
) -> Option<Length> {
  if let Some(kw) = value.keyword() {
    let pct = match (kw, vertical) {
      ("left", false) | ("top", true) => 0.0,
      ("center", _) => 50.0,
      ("right", false) | ("bottom", true) => 100.0,
      _ => return None,
    };
    return Some(Length::percent(pct));
  }
  ctx.parse_length(value, ValueRange::All)
}

fn parse_fill_size(ctx: &ApplyCtx<'_>, value: &PropertyValue) -> Option<FillSize> {
  match value.keyword() {
    Some("contain") => return Some(FillSize::Contain),
    Some("cover") => return Some(FillSize::Cover),
    Some("auto") => {
      return Some(FillSize::Explicit {
        width: LengthOrAuto::Auto,
        height: LengthOrAuto::Auto,
      })
    }
    _ => {}
  }
  let component = |ctx: &ApplyCtx<'_>, v: &PropertyValue| -> Option<LengthOrAuto> {
    if v.keyword() == Some("auto") {
      return Some(LengthOrAuto::Auto);
    }
    ctx
      .parse_length(v, ValueRange::NonNegative)
      .map(LengthOrAuto::Length)
  };
  match value {
    PropertyValue::Pair(width, height) => Some(FillSize::Explicit {
      width: component(ctx, width)?,
      height: component(ctx, height)?,
    }),
    single => Some(FillSize::Explicit {
      width: component(ctx, single)?,
      height: LengthOrAuto::Auto,
    }),
  }
}

/// Image value for a fill layer or list-style-image. URLs are recorded in
/// the pending-resource map for the post-cascade resource pass.
fn parse_image(
  ctx: &mut ApplyCtx<'_>,
  value: &PropertyValue,
  property: PropertyId,
) -> Option<ImageSource> {
  match value {
    PropertyValue::Keyword(kw) if kw == "none" => Some(ImageSource::None),
    PropertyValue::Url(url) => {
      ctx.state.pending_resources.push((property, Arc::clone(url)));
      Some(ImageSource::Url(Arc::clone(url)))
    }
    _ => None,
  }
}

fn parse_seconds(value: &PropertyValue, non_negative: bool) -> Option<f32> {
  match value {
    PropertyValue::Number(n) if !non_negative || *n >= 0.0 => Some(*n),
    _ => None,
  }
}

fn parse_timing_function(value: &PropertyValue) -> Option<TimingFunction> {
  value.keyword().and_then(TimingFunction::parse_keyword)
}

// ---------------------------------------------------------------------------
// The table

/// Ordinal-indexed registry of property handlers, built once per engine.
pub struct StrategyTable {
  handlers: Vec<Option<PropertyHandler>>,
}

impl Default for StrategyTable {
  fn default() -> Self {
    Self::new()
  }
}

impl StrategyTable {
  pub fn new() -> Self {
    let mut table = Self {
      handlers: (0..PropertyId::COUNT).map(|_| None).collect(),
    };
    table.register_high_priority();
    table.register_box();
    table.register_borders();
    table.register_fills();
    table.register_text();
    table.register_misc();
    table.register_layers();
    table
  }

  fn set(&mut self, id: PropertyId, handler: PropertyHandler) {
    debug_assert!(self.handlers[id.index()].is_none(), "duplicate handler");
    self.handlers[id.index()] = Some(handler);
  }

  fn handler(&self, id: PropertyId) -> Option<&PropertyHandler> {
    self.handlers[id.index()].as_ref()
  }

  /// True when the table can apply this property (shorthands count: they
  /// expand to handled longhands).
  pub fn handles(&self, id: PropertyId) -> bool {
    match id.longhands() {
      Some(longhands) => longhands.iter().all(|l| self.handler(*l).is_some()),
      None => self.handler(id).is_some(),
    }
  }

  /// Returns false when the property has no handler (second-tier).
  pub fn apply_inherit(&self, id: PropertyId, ctx: &mut ApplyCtx<'_>) -> bool {
    if ctx.link_gate == LinkGate::Visited && !id.is_visited_dependent() && !id.is_shorthand() {
      return true;
    }
    if let Some(longhands) = id.longhands() {
      let mut handled = true;
      for longhand in longhands {
        handled &= self.apply_inherit(*longhand, ctx);
      }
      return handled;
    }
    match self.handler(id) {
      Some(handler) => {
        (handler.inherit)(ctx);
        true
      }
      None => false,
    }
  }

  pub fn apply_initial(&self, id: PropertyId, ctx: &mut ApplyCtx<'_>) -> bool {
    if ctx.link_gate == LinkGate::Visited && !id.is_visited_dependent() && !id.is_shorthand() {
      return true;
    }
    if let Some(longhands) = id.longhands() {
      let mut handled = true;
      for longhand in longhands {
        handled &= self.apply_initial(*longhand, ctx);
      }
      return handled;
    }
    match self.handler(id) {
      Some(handler) => {
        (handler.initial)(ctx);
        true
      }
      None => false,
    }
  }

  /// Applies a resolved literal value. Shorthand values are a no-op (the
  /// external parser expands shorthands into longhand declarations); their
  /// entry exists only for the inherit/initial fan-out.
  pub fn apply_value(&self, id: PropertyId, ctx: &mut ApplyCtx<'_>, value: &PropertyValue) -> bool {
    if ctx.link_gate == LinkGate::Visited && !id.is_visited_dependent() {
      return true;
    }
    if id.is_shorthand() {
      return true;
    }
    match self.handler(id) {
      Some(handler) => {
        (handler.value)(ctx, value);
        true
      }
      None => false,
    }
  }

  fn register_high_priority(&mut self) {
    use PropertyId::*;

    self.set(
      Color,
      color_property(
        |s| s.color(),
        |s, c| s.set_color(c),
        |v| &mut v.color,
        |_| Rgba::BLACK,
        true,
      ),
    );
    self.set(
      Direction,
      keyword(
        |s| s.inherited().direction,
        |s, v| s.inherited_mut().direction = v,
        crate::style::types::Direction::default,
        crate::style::types::Direction::parse,
      ),
    );
    self.set(
      WritingMode,
      keyword(
        |s| s.inherited().writing_mode,
        |s, v| s.inherited_mut().writing_mode = v,
        crate::style::types::WritingMode::default,
        crate::style::types::WritingMode::parse,
      ),
    );
    self.set(
      TextOrientation,
      keyword(
        |s| s.inherited().text_orientation,
        |s, v| s.inherited_mut().text_orientation = v,
        crate::style::types::TextOrientation::default,
        crate::style::types::TextOrientation::parse,
      ),
    );
    self.set(
      FontFamily,
      font_property(
        |f| f.families.clone(),
        |f, v| f.families = v,
        || FontDescription::default().families,
        |_ctx: &mut ApplyCtx<'_>, value: &PropertyValue| parse_font_families(value),
      ),
    );
    self.set(
      FontSize,
      font_property(
        |f| f.specified_size.clone(),
        |f, v| f.specified_size = v,
        || FontDescription::default().specified_size,
        |ctx: &mut ApplyCtx<'_>, value: &PropertyValue| parse_font_size(ctx, value),
      ),
    );
    self.set(
      FontStyle,
      font_property(
        |f| f.style,
        |f, v| f.style = v,
        fonts::FontStyle::default,
        |_ctx: &mut ApplyCtx<'_>, value: &PropertyValue| {
          value.keyword().and_then(fonts::FontStyle::parse)
        },
      ),
    );
    self.set(
      FontVariantCaps,
      font_property(
        |f| f.variant_caps,
        |f, v| f.variant_caps = v,
        fonts::FontVariantCaps::default,
        |_ctx: &mut ApplyCtx<'_>, value: &PropertyValue| {
          value.keyword().and_then(fonts::FontVariantCaps::parse)
        },
      ),
    );
    self.set(
      FontWeight,
      font_property(
        |f| f.weight,
        |f, v| f.weight = v,
        fonts::FontWeight::default,
        |ctx: &mut ApplyCtx<'_>, value: &PropertyValue| parse_font_weight(ctx, value),
      ),
    );
    self.set(
      FontStretch,
      font_property(
        |f| f.stretch,
        |f, v| f.stretch = v,
        fonts::FontStretch::default,
        |_ctx: &mut ApplyCtx<'_>, value: &PropertyValue| {
          value.keyword().and_then(fonts::FontStretch::parse)
        },
      ),
    );

    // Zoom recomputes the effective zoom chain and dirties the font, since
    // font sizes scale with zoom.
    fn apply_zoom(ctx: &mut ApplyCtx<'_>, factor: f32, reset_chain: bool) {
      let previous = ctx.style.effective_zoom();
      let effective = if reset_chain {
        factor
      } else {
        ctx.parent.effective_zoom() * factor
      };
      ctx.style.zoom = factor;
      if previous != effective {
        ctx.style.inherited_mut().effective_zoom = effective;
        ctx.state.zoom_changed = true;
      }
      ctx.state.font_dirty = true;
    }
    self.set(
      Zoom,
      PropertyHandler {
        inherit: Box::new(|ctx| {
          let factor = ctx.parent.zoom;
          apply_zoom(ctx, factor, false);
        }),
        initial: Box::new(|ctx| apply_zoom(ctx, 1.0, false)),
        value: Box::new(|ctx, value| match value {
          PropertyValue::Number(n) if *n >= 0.0 => apply_zoom(ctx, *n, false),
          PropertyValue::Percentage(p) if *p >= 0.0 => apply_zoom(ctx, p / 100.0, false),
          PropertyValue::Keyword(kw) if kw == "normal" => apply_zoom(ctx, 1.0, false),
          PropertyValue::Keyword(kw) if kw == "reset" => apply_zoom(ctx, 1.0, true),
          _ => {}
        }),
      },
    );

    self.set(
      LineHeight,
      copy_through(
        |s| s.inherited().line_height,
        |s, v| s.inherited_mut().line_height = v,
        || crate::style::computed::LineHeight::Normal,
        |ctx: &mut ApplyCtx<'_>, value: &PropertyValue| parse_line_height(ctx, value),
      ),
    );
  }

  fn register_box(&mut self) {
    use PropertyId::*;

    self.set(
      Display,
      keyword(
        |s| s.display,
        |s, v| s.display = v,
        crate::style::types::Display::default,
        crate::style::types::Display::parse,
      ),
    );
    self.set(
      Position,
      keyword(
        |s| s.position,
        |s, v| s.position = v,
        crate::style::types::Position::default,
        crate::style::types::Position::parse,
      ),
    );
    self.set(
      Float,
      keyword(
        |s| s.float,
        |s, v| s.float = v,
        crate::style::types::Float::default,
        crate::style::types::Float::parse,
      ),
    );
    self.set(
      Clear,
      keyword(
        |s| s.clear,
        |s, v| s.clear = v,
        crate::style::types::Clear::default,
        crate::style::types::Clear::parse,
      ),
    );
    self.set(
      OverflowX,
      keyword(
        |s| s.overflow_x,
        |s, v| s.overflow_x = v,
        crate::style::types::Overflow::default,
        crate::style::types::Overflow::parse,
      ),
    );
    self.set(
      OverflowY,
      keyword(
        |s| s.overflow_y,
        |s, v| s.overflow_y = v,
        crate::style::types::Overflow::default,
        crate::style::types::Overflow::parse,
      ),
    );
    self.set(
      VerticalAlign,
      copy_through(
        |s| s.vertical_align.clone(),
        |s, v| s.vertical_align = v,
        crate::style::types::VerticalAlign::default,
        |ctx: &mut ApplyCtx<'_>, value: &PropertyValue| {
          if let Some(kw) = value.keyword() {
            return crate::style::types::VerticalAlign::parse_keyword(kw);
          }
          ctx
            .parse_length(value, ValueRange::All)
            .map(crate::style::types::VerticalAlign::Length)
        },
      ),
    );
    self.set(
      UnicodeBidi,
      keyword(
        |s| s.unicode_bidi,
        |s, v| s.unicode_bidi = v,
        crate::style::types::UnicodeBidi::default,
        crate::style::types::UnicodeBidi::parse,
      ),
    );
    self.set(
      ZIndex,
      copy_through(
        |s| s.z_index,
        |s, v| s.z_index = v,
        || crate::style::types::ZIndex::Auto,
        |_ctx: &mut ApplyCtx<'_>, value: &PropertyValue| match value {
          PropertyValue::Keyword(kw) if kw == "auto" => Some(crate::style::types::ZIndex::Auto),
          PropertyValue::Number(n) => Some(crate::style::types::ZIndex::Index(*n as i32)),
          _ => None,
        },
      ),
    );
    self.set(
      Opacity,
      copy_through(
        |s| s.opacity,
        |s, v| s.opacity = v,
        || 1.0,
        |_ctx: &mut ApplyCtx<'_>, value: &PropertyValue| match value {
          PropertyValue::Number(n) => Some(n.clamp(0.0, 1.0)),
          PropertyValue::Percentage(p) => Some((p / 100.0).clamp(0.0, 1.0)),
          _ => None,
        },
      ),
    );
    self.set(
      Visibility,
      keyword(
        |s| s.inherited().visibility,
        |s, v| s.inherited_mut().visibility = v,
        crate::style::types::Visibility::default,
        crate::style::types::Visibility::parse,
      ),
    );

    self.set(
      Width,
      size_property(|s| s.width.clone(), |s, v| s.width = v, || SizeValue::Auto, false),
    );
    self.set(
      Height,
      size_property(|s| s.height.clone(), |s, v| s.height = v, || SizeValue::Auto, false),
    );
    self.set(
      MinWidth,
      size_property(|s| s.min_width.clone(), |s, v| s.min_width = v, || SizeValue::Auto, false),
    );
    self.set(
      MinHeight,
      size_property(
        |s| s.min_height.clone(),
        |s, v| s.min_height = v,
        || SizeValue::Auto,
        false,
      ),
    );
    self.set(
      MaxWidth,
      size_property(|s| s.max_width.clone(), |s, v| s.max_width = v, || SizeValue::None, true),
    );
    self.set(
      MaxHeight,
      size_property(
        |s| s.max_height.clone(),
        |s, v| s.max_height = v,
        || SizeValue::None,
        true,
      ),
    );
    self.set(
      BoxSizing,
      keyword(
        |s| s.box_sizing,
        |s, v| s.box_sizing = v,
        crate::style::types::BoxSizing::default,
        crate::style::types::BoxSizing::parse,
      ),
    );

    self.set(Top, auto_length(|s| s.top.clone(), |s, v| s.top = v, ValueRange::All));
    self.set(
      Right,
      auto_length(|s| s.right.clone(), |s, v| s.right = v, ValueRange::All),
    );
    self.set(
      Bottom,
      auto_length(|s| s.bottom.clone(), |s, v| s.bottom = v, ValueRange::All),
    );
    self.set(Left, auto_length(|s| s.left.clone(), |s, v| s.left = v, ValueRange::All));

    self.set(
      MarginTop,
      auto_length(|s| s.margin_top.clone(), |s, v| s.margin_top = v, ValueRange::All),
    );
    self.set(
      MarginRight,
      auto_length(|s| s.margin_right.clone(), |s, v| s.margin_right = v, ValueRange::All),
    );
    self.set(
      MarginBottom,
      auto_length(|s| s.margin_bottom.clone(), |s, v| s.margin_bottom = v, ValueRange::All),
    );
    self.set(
      MarginLeft,
      auto_length(|s| s.margin_left.clone(), |s, v| s.margin_left = v, ValueRange::All),
    );

    fn padding(
      get: fn(&ComputedStyle) -> Length,
      set: fn(&mut ComputedStyle, Length),
    ) -> PropertyHandler {
      copy_through(get, set, Length::zero, |ctx: &mut ApplyCtx<'_>, value: &PropertyValue| {
        ctx.parse_length(value, ValueRange::NonNegative)
      })
    }
    self.set(PaddingTop, padding(|s| s.padding_top.clone(), |s, v| s.padding_top = v));
    self.set(
      PaddingRight,
      padding(|s| s.padding_right.clone(), |s, v| s.padding_right = v),
    );
    self.set(
      PaddingBottom,
      padding(|s| s.padding_bottom.clone(), |s, v| s.padding_bottom = v),
    );
    self.set(
      PaddingLeft,
      padding(|s| s.padding_left.clone(), |s, v| s.padding_left = v),
    );
  }

  fn register_borders(&mut self) {
    use crate::style::computed::MEDIUM_BORDER_WIDTH;
    use PropertyId::*;

    fn border_width(
      get: fn(&ComputedStyle) -> f32,
      set: fn(&mut ComputedStyle, f32),
    ) -> PropertyHandler {
      copy_through(get, set, || MEDIUM_BORDER_WIDTH, |ctx: &mut ApplyCtx<'_>, value: &PropertyValue| {
        parse_border_width(ctx, value)
      })
    }
    self.set(
      BorderTopWidth,
      border_width(|s| s.border_top_width, |s, v| s.border_top_width = v),
    );
    self.set(
      BorderRightWidth,
      border_width(|s| s.border_right_width, |s, v| s.border_right_width = v),
    );
    self.set(
      BorderBottomWidth,
      border_width(|s| s.border_bottom_width, |s, v| s.border_bottom_width = v),
    );
    self.set(
      BorderLeftWidth,
      border_width(|s| s.border_left_width, |s, v| s.border_left_width = v),
    );

    fn border_style(
      get: fn(&ComputedStyle) -> crate::style::types::BorderStyle,
      set: fn(&mut ComputedStyle, crate::style::types::BorderStyle),
    ) -> PropertyHandler {
      keyword(
        get,
        set,
        crate::style::types::BorderStyle::default,
        crate::style::types::BorderStyle::parse,
      )
    }
    self.set(
      BorderTopStyle,
      border_style(|s| s.border_top_style, |s, v| s.border_top_style = v),
    );
    self.set(
      BorderRightStyle,
      border_style(|s| s.border_right_style, |s, v| s.border_right_style = v),
    );
    self.set(
      BorderBottomStyle,
      border_style(|s| s.border_bottom_style, |s, v| s.border_bottom_style = v),
    );
    self.set(
      BorderLeftStyle,
      border_style(|s| s.border_left_style, |s, v| s.border_left_style = v),
    );

    // Border colors default to currentcolor.
    self.set(
      BorderTopColor,
      color_property(
        |s| s.border_top_color,
        |s, c| s.border_top_color = c,
        |v| &mut v.border_top_color,
        |ctx| ctx.style.color(),
        false,
      ),
    );
    self.set(
      BorderRightColor,
      color_property(
        |s| s.border_right_color,
        |s, c| s.border_right_color = c,
        |v| &mut v.border_right_color,
        |ctx| ctx.style.color(),
        false,
      ),
    );
    self.set(
      BorderBottomColor,
      color_property(
        |s| s.border_bottom_color,
        |s, c| s.border_bottom_color = c,
        |v| &mut v.border_bottom_color,
        |ctx| ctx.style.color(),
        false,
      ),
    );
    self.set(
      BorderLeftColor,
      color_property(
        |s| s.border_left_color,
        |s, c| s.border_left_color = c,
        |v| &mut v.border_left_color,
        |ctx| ctx.style.color(),
        false,
      ),
    );

    self.set(
      BorderTopLeftRadius,
      paired_radius(
        |s| s.border_top_left_radius.clone(),
        |s, v| s.border_top_left_radius = v,
      ),
    );
    self.set(
      BorderTopRightRadius,
      paired_radius(
        |s| s.border_top_right_radius.clone(),
        |s, v| s.border_top_right_radius = v,
      ),
    );
    self.set(
      BorderBottomLeftRadius,
      paired_radius(
        |s| s.border_bottom_left_radius.clone(),
        |s, v| s.border_bottom_left_radius = v,
      ),
    );
    self.set(
      BorderBottomRightRadius,
      paired_radius(
        |s| s.border_bottom_right_radius.clone(),
        |s, v| s.border_bottom_right_radius = v,
      ),
    );

    self.set(
      OutlineColor,
      color_property(
        |s| s.outline_color,
        |s, c| s.outline_color = c,
        |v| &mut v.outline_color,
        |ctx| ctx.style.color(),
        false,
      ),
    );
    self.set(
      OutlineStyle,
      keyword(
        |s| s.outline_style,
        |s, v| s.outline_style = v,
        crate::style::types::OutlineStyle::default,
        crate::style::types::OutlineStyle::parse,
      ),
    );
    self.set(
      OutlineWidth,
      copy_through(
        |s| s.outline_width,
        |s, v| s.outline_width = v,
        || MEDIUM_BORDER_WIDTH,
        |ctx: &mut ApplyCtx<'_>, value: &PropertyValue| parse_border_width(ctx, value),
      ),
    );
    self.set(
      OutlineOffset,
      copy_through(
        |s| s.outline_offset,
        |s, v| s.outline_offset = v,
        || 0.0,
        |ctx: &mut ApplyCtx<'_>, value: &PropertyValue| ctx.resolve_px(value, ValueRange::All),
      ),
    );
  }

  fn register_fills(&mut self) {
    use PropertyId::*;

    self.set(
      BackgroundColor,
      color_property(
        |s| s.background_color,
        |s, c| s.background_color = c,
        |v| &mut v.background_color,
        |_| Rgba::TRANSPARENT,
        false,
      ),
    );

    self.set(
      BackgroundImage,
      layered(
        |s| &s.background_layers,
        |s| &mut s.background_layers,
        |l: &FillLayer| l.image.as_ref(),
        |l: &mut FillLayer| &mut l.image,
        |ctx: &mut ApplyCtx<'_>, value: &PropertyValue| {
          parse_image(ctx, value, BackgroundImage)
        },
      ),
    );
    self.set(
      BackgroundAttachment,
      layered(
        |s| &s.background_layers,
        |s| &mut s.background_layers,
        |l: &FillLayer| l.attachment.as_ref(),
        |l: &mut FillLayer| &mut l.attachment,
        |_ctx: &mut ApplyCtx<'_>, value: &PropertyValue| {
          value.keyword().and_then(FillAttachment::parse)
        },
      ),
    );
    self.set(
      BackgroundClip,
      layered(
        |s| &s.background_layers,
        |s| &mut s.background_layers,
        |l: &FillLayer| l.clip.as_ref(),
        |l: &mut FillLayer| &mut l.clip,
        |_ctx: &mut ApplyCtx<'_>, value: &PropertyValue| value.keyword().and_then(FillBox::parse),
      ),
    );
    self.set(
      BackgroundOrigin,
      layered(
        |s| &s.background_layers,
        |s| &mut s.background_layers,
        |l: &FillLayer| l.origin.as_ref(),
        |l: &mut FillLayer| &mut l.origin,
        |_ctx: &mut ApplyCtx<'_>, value: &PropertyValue| value.keyword().and_then(FillBox::parse),
      ),
    );
    self.set(
      BackgroundPositionX,
      layered(
        |s| &s.background_layers,
        |s| &mut s.background_layers,
        |l: &FillLayer| l.position_x.as_ref(),
        |l: &mut FillLayer| &mut l.position_x,
        |ctx: &mut ApplyCtx<'_>, value: &PropertyValue| parse_fill_position(ctx, value, false),
      ),
    );
    self.set(
      BackgroundPositionY,
      layered(
        |s| &s.background_layers,
        |s| &mut s.background_layers,
        |l: &FillLayer| l.position_y.as_ref(),
        |l: &mut FillLayer| &mut l.position_y,
        |ctx: &mut ApplyCtx<'_>, value: &PropertyValue| parse_fill_position(ctx, value, true),
      ),
    );
    self.set(
      BackgroundRepeatX,
      layered(
        |s| &s.background_layers,
        |s| &mut s.background_layers,
        |l: &FillLayer| l.repeat_x.as_ref(),
        |l: &mut FillLayer| &mut l.repeat_x,
        |_ctx: &mut ApplyCtx<'_>, value: &PropertyValue| {
          value.keyword().and_then(FillRepeat::parse)
        },
      ),
    );
    self.set(
      BackgroundRepeatY,
      layered(
        |s| &s.background_layers,
        |s| &mut s.background_layers,
        |l: &FillLayer| l.repeat_y.as_ref(),
        |l: &mut FillLayer| &mut l.repeat_y,
        |_ctx: &mut ApplyCtx<'_>, value: &PropertyValue| {
          value.keyword().and_then(FillRepeat::parse)
        },
      ),
    );
    self.set(
      BackgroundSize,
      layered(
        |s| &s.background_layers,
        |s| &mut s.background_layers,
        |l: &FillLayer| l.size.as_ref(),
        |l: &mut FillLayer| &mut l.size,
        |ctx: &mut ApplyCtx<'_>, value: &PropertyValue| parse_fill_size(ctx, value),
      ),
    );

    self.set(
      MaskImage,
      layered(
        |s| &s.mask_layers,
        |s| &mut s.mask_layers,
        |l: &FillLayer| l.image.as_ref(),
        |l: &mut FillLayer| &mut l.image,
        |ctx: &mut ApplyCtx<'_>, value: &PropertyValue| parse_image(ctx, value, MaskImage),
      ),
    );
    self.set(
      MaskClip,
      layered(
        |s| &s.mask_layers,
        |s| &mut s.mask_layers,
        |l: &FillLayer| l.clip.as_ref(),
        |l: &mut FillLayer| &mut l.clip,
        |_ctx: &mut ApplyCtx<'_>, value: &PropertyValue| value.keyword().and_then(FillBox::parse),
      ),
    );
    self.set(
      MaskOrigin,
      layered(
        |s| &s.mask_layers,
        |s| &mut s.mask_layers,
        |l: &FillLayer| l.origin.as_ref(),
        |l: &mut FillLayer| &mut l.origin,
        |_ctx: &mut ApplyCtx<'_>, value: &PropertyValue| value.keyword().and_then(FillBox::parse),
      ),
    );
    self.set(
      MaskPositionX,
      layered(
        |s| &s.mask_layers,
        |s| &mut s.mask_layers,
        |l: &FillLayer| l.position_x.as_ref(),
        |l: &mut FillLayer| &mut l.position_x,
        |ctx: &mut ApplyCtx<'_>, value: &PropertyValue| parse_fill_position(ctx, value, false),
      ),
    );
    self.set(
      MaskPositionY,
      layered(
        |s| &s.mask_layers,
        |s| &mut s.mask_layers,
        |l: &FillLayer| l.position_y.as_ref(),
        |l: &mut FillLayer| &mut l.position_y,
        |ctx: &mut ApplyCtx<'_>, value: &PropertyValue| parse_fill_position(ctx, value, true),
      ),
    );
    self.set(
      MaskRepeatX,
      layered(
        |s| &s.mask_layers,
        |s| &mut s.mask_layers,
        |l: &FillLayer| l.repeat_x.as_ref(),
        |l: &mut FillLayer| &mut l.repeat_x,
        |_ctx: &mut ApplyCtx<'_>, value: &PropertyValue| {
          value.keyword().and_then(FillRepeat::parse)
        },
      ),
    );
    self.set(
      MaskRepeatY,
      layered(
        |s| &s.mask_layers,
        |s| &mut s.mask_layers,
        |l: &FillLayer| l.repeat_y.as_ref(),
        |l: &mut FillLayer| &mut l.repeat_y,
        |_ctx: &mut ApplyCtx<'_>, value: &PropertyValue| {
          value.keyword().and_then(FillRepeat::parse)
        },
      ),
    );
    self.set(
      MaskSize,
      layered(
        |s| &s.mask_layers,
        |s| &mut s.mask_layers,
        |l: &FillLayer| l.size.as_ref(),
        |l: &mut FillLayer| &mut l.size,
        |ctx: &mut ApplyCtx<'_>, value: &PropertyValue| parse_fill_size(ctx, value),
      ),
    );
  }

  fn register_text(&mut self) {
    use PropertyId::*;

    self.set(
      TextAlign,
      keyword(
        |s| s.inherited().text_align,
        |s, v| s.inherited_mut().text_align = v,
        crate::style::types::TextAlign::default,
        crate::style::types::TextAlign::parse,
      ),
    );
    self.set(
      TextIndent,
      copy_through(
        |s| s.inherited().text_indent.clone(),
        |s, v| s.inherited_mut().text_indent = v,
        Length::zero,
        |ctx: &mut ApplyCtx<'_>, value: &PropertyValue| ctx.parse_length(value, ValueRange::All),
      ),
    );
    self.set(
      TextTransform,
      keyword(
        |s| s.inherited().text_transform,
        |s, v| s.inherited_mut().text_transform = v,
        crate::style::types::TextTransform::default,
        crate::style::types::TextTransform::parse,
      ),
    );
    self.set(
      TextDecorationLine,
      keyword(
        |s| s.text_decoration_line,
        |s, v| s.text_decoration_line = v,
        crate::style::types::TextDecorationLine::default,
        crate::style::types::TextDecorationLine::parse,
      ),
    );
    self.set(
      TextDecorationColor,
      copy_through(
        |s| s.text_decoration_color,
        |s, v| s.text_decoration_color = v,
        || Rgba::BLACK,
        |ctx: &mut ApplyCtx<'_>, value: &PropertyValue| parse_color(ctx, value, false),
      ),
    );

    fn spacing(
      get: fn(&ComputedStyle) -> f32,
      set: fn(&mut ComputedStyle, f32),
    ) -> PropertyHandler {
      copy_through(get, set, || 0.0, |ctx: &mut ApplyCtx<'_>, value: &PropertyValue| {
        if value.keyword() == Some("normal") {
          return Some(0.0);
        }
        ctx.resolve_px(value, ValueRange::All)
      })
    }
    self.set(
      LetterSpacing,
      spacing(
        |s| s.inherited().letter_spacing,
        |s, v| s.inherited_mut().letter_spacing = v,
      ),
    );
    self.set(
      WordSpacing,
      spacing(
        |s| s.inherited().word_spacing,
        |s, v| s.inherited_mut().word_spacing = v,
      ),
    );

    self.set(
      WhiteSpace,
      keyword(
        |s| s.inherited().white_space,
        |s, v| s.inherited_mut().white_space = v,
        crate::style::types::WhiteSpace::default,
        crate::style::types::WhiteSpace::parse,
      ),
    );
    self.set(
      WordBreak,
      keyword(
        |s| s.inherited().word_break,
        |s, v| s.inherited_mut().word_break = v,
        crate::style::types::WordBreak::default,
        crate::style::types::WordBreak::parse,
      ),
    );
    self.set(
      OverflowWrap,
      keyword(
        |s| s.inherited().overflow_wrap,
        |s, v| s.inherited_mut().overflow_wrap = v,
        crate::style::types::OverflowWrap::default,
        crate::style::types::OverflowWrap::parse,
      ),
    );
    self.set(
      TabSize,
      copy_through(
        |s| s.inherited().tab_size,
        |s, v| s.inherited_mut().tab_size = v,
        || 8.0,
        |_ctx: &mut ApplyCtx<'_>, value: &PropertyValue| match value {
          PropertyValue::Number(n) if *n >= 0.0 => Some(*n),
          _ => None,
        },
      ),
    );
    self.set(
      TextRendering,
      keyword(
        |s| s.inherited().text_rendering,
        |s, v| s.inherited_mut().text_rendering = v,
        crate::style::types::TextRendering::default,
        crate::style::types::TextRendering::parse,
      ),
    );
  }

  fn register_misc(&mut self) {
    use PropertyId::*;

    self.set(
      TransformOriginX,
      copy_through(
        |s| s.transform_origin_x.clone(),
        |s, v| s.transform_origin_x = v,
        || Length::percent(50.0),
        |ctx: &mut ApplyCtx<'_>, value: &PropertyValue| parse_fill_position(ctx, value, false),
      ),
    );
    self.set(
      TransformOriginY,
      copy_through(
        |s| s.transform_origin_y.clone(),
        |s, v| s.transform_origin_y = v,
        || Length::percent(50.0),
        |ctx: &mut ApplyCtx<'_>, value: &PropertyValue| parse_fill_position(ctx, value, true),
      ),
    );
    self.set(
      Appearance,
      keyword(
        |s| s.appearance,
        |s, v| s.appearance = v,
        crate::style::types::Appearance::default,
        crate::style::types::Appearance::parse,
      ),
    );

    self.set(
      ListStyleType,
      keyword(
        |s| s.inherited().list_style_type,
        |s, v| s.inherited_mut().list_style_type = v,
        crate::style::types::ListStyleType::default,
        crate::style::types::ListStyleType::parse,
      ),
    );
    self.set(
      ListStylePosition,
      keyword(
        |s| s.inherited().list_style_position,
        |s, v| s.inherited_mut().list_style_position = v,
        crate::style::types::ListStylePosition::default,
        crate::style::types::ListStylePosition::parse,
      ),
    );
    self.set(
      ListStyleImage,
      copy_through(
        |s| s.inherited().list_style_image.clone(),
        |s, v| s.inherited_mut().list_style_image = v,
        || None,
        |ctx: &mut ApplyCtx<'_>, value: &PropertyValue| {
          parse_image(ctx, value, ListStyleImage).map(|image| match image {
            ImageSource::None => None,
            other => Some(other),
          })
        },
      ),
    );

    self.set(
      BorderCollapse,
      keyword(
        |s| s.inherited().border_collapse,
        |s, v| s.inherited_mut().border_collapse = v,
        crate::style::types::BorderCollapse::default,
        crate::style::types::BorderCollapse::parse,
      ),
    );
    fn table_spacing(
      get: fn(&ComputedStyle) -> f32,
      set: fn(&mut ComputedStyle, f32),
    ) -> PropertyHandler {
      copy_through(get, set, || 0.0, |ctx: &mut ApplyCtx<'_>, value: &PropertyValue| {
        ctx.resolve_px(value, ValueRange::NonNegative)
      })
    }
    self.set(
      BorderHorizontalSpacing,
      table_spacing(
        |s| s.inherited().border_horizontal_spacing,
        |s, v| s.inherited_mut().border_horizontal_spacing = v,
      ),
    );
    self.set(
      BorderVerticalSpacing,
      table_spacing(
        |s| s.inherited().border_vertical_spacing,
        |s, v| s.inherited_mut().border_vertical_spacing = v,
      ),
    );
    self.set(
      CaptionSide,
      keyword(
        |s| s.inherited().caption_side,
        |s, v| s.inherited_mut().caption_side = v,
        crate::style::types::CaptionSide::default,
        crate::style::types::CaptionSide::parse,
      ),
    );
    self.set(
      EmptyCells,
      keyword(
        |s| s.inherited().empty_cells,
        |s, v| s.inherited_mut().empty_cells = v,
        crate::style::types::EmptyCells::default,
        crate::style::types::EmptyCells::parse,
      ),
    );
    self.set(
      TableLayout,
      keyword(
        |s| s.table_layout,
        |s, v| s.table_layout = v,
        crate::style::types::TableLayout::default,
        crate::style::types::TableLayout::parse,
      ),
    );

    self.set(
      Cursor,
      keyword(
        |s| s.inherited().cursor,
        |s, v| s.inherited_mut().cursor = v,
        crate::style::types::Cursor::default,
        crate::style::types::Cursor::parse,
      ),
    );
  }

  fn register_layers(&mut self) {
    use PropertyId::*;

    self.set(
      AnimationName,
      layered(
        |s| &s.animations,
        |s| &mut s.animations,
        |l: &AnimationLayer| l.name.as_ref(),
        |l: &mut AnimationLayer| &mut l.name,
        |_ctx: &mut ApplyCtx<'_>, value: &PropertyValue| match value {
          PropertyValue::Keyword(kw) if kw == "none" => {
            Some(crate::style::types::AnimationName::None)
          }
          PropertyValue::Keyword(name) => {
            Some(crate::style::types::AnimationName::Name(Arc::from(name.as_str())))
          }
          PropertyValue::String(name) => {
            Some(crate::style::types::AnimationName::Name(Arc::from(name.as_str())))
          }
          _ => None,
        },
      ),
    );
    self.set(
      AnimationDuration,
      layered(
        |s| &s.animations,
        |s| &mut s.animations,
        |l: &AnimationLayer| l.duration.as_ref(),
        |l: &mut AnimationLayer| &mut l.duration,
        |_ctx: &mut ApplyCtx<'_>, value: &PropertyValue| parse_seconds(value, true),
      ),
    );
    self.set(
      AnimationDelay,
      layered(
        |s| &s.animations,
        |s| &mut s.animations,
        |l: &AnimationLayer| l.delay.as_ref(),
        |l: &mut AnimationLayer| &mut l.delay,
        |_ctx: &mut ApplyCtx<'_>, value: &PropertyValue| parse_seconds(value, false),
      ),
    );
    self.set(
      AnimationTimingFunction,
      layered(
        |s| &s.animations,
        |s| &mut s.animations,
        |l: &AnimationLayer| l.timing_function.as_ref(),
        |l: &mut AnimationLayer| &mut l.timing_function,
        |_ctx: &mut ApplyCtx<'_>, value: &PropertyValue| parse_timing_function(value),
      ),
    );
    self.set(
      AnimationIterationCount,
      layered(
        |s| &s.animations,
        |s| &mut s.animations,
        |l: &AnimationLayer| l.iteration_count.as_ref(),
        |l: &mut AnimationLayer| &mut l.iteration_count,
        |_ctx: &mut ApplyCtx<'_>, value: &PropertyValue| match value {
          PropertyValue::Keyword(kw) if kw == "infinite" => Some(IterationCount::Infinite),
          PropertyValue::Number(n) if *n >= 0.0 => Some(IterationCount::Count(*n)),
          _ => None,
        },
      ),
    );
    self.set(
      AnimationDirection,
      layered(
        |s| &s.animations,
        |s| &mut s.animations,
        |l: &AnimationLayer| l.direction.as_ref(),
        |l: &mut AnimationLayer| &mut l.direction,
        |_ctx: &mut ApplyCtx<'_>, value: &PropertyValue| {
          value.keyword().and_then(crate::style::types::AnimationDirection::parse)
        },
      ),
    );
    self.set(
      AnimationFillMode,
      layered(
        |s| &s.animations,
        |s| &mut s.animations,
        |l: &AnimationLayer| l.fill_mode.as_ref(),
        |l: &mut AnimationLayer| &mut l.fill_mode,
        |_ctx: &mut ApplyCtx<'_>, value: &PropertyValue| {
          value.keyword().and_then(crate::style::types::AnimationFillMode::parse)
        },
      ),
    );
    self.set(
      AnimationPlayState,
      layered(
        |s| &s.animations,
        |s| &mut s.animations,
        |l: &AnimationLayer| l.play_state.as_ref(),
        |l: &mut AnimationLayer| &mut l.play_state,
        |_ctx: &mut ApplyCtx<'_>, value: &PropertyValue| {
          value.keyword().and_then(crate::style::types::AnimationPlayState::parse)
        },
      ),
    );

    self.set(
      TransitionProperty,
      layered(
        |s| &s.transitions,
        |s| &mut s.transitions,
        |l: &TransitionLayer| l.property.as_ref(),
        |l: &mut TransitionLayer| &mut l.property,
        |_ctx: &mut ApplyCtx<'_>, value: &PropertyValue| {
          use crate::style::types::TransitionProperty as Target;
          let kw = value.keyword()?;
          match kw {
            "all" => Some(Target::All),
            "none" => Some(Target::None),
            name => PropertyId::from_name(name).map(Target::Id),
          }
        },
      ),
    );
    self.set(
      TransitionDuration,
      layered(
        |s| &s.transitions,
        |s| &mut s.transitions,
        |l: &TransitionLayer| l.duration.as_ref(),
        |l: &mut TransitionLayer| &mut l.duration,
        |_ctx: &mut ApplyCtx<'_>, value: &PropertyValue| parse_seconds(value, true),
      ),
    );
    self.set(
      TransitionDelay,
      layered(
        |s| &s.transitions,
        |s| &mut s.transitions,
        |l: &TransitionLayer| l.delay.as_ref(),
        |l: &mut TransitionLayer| &mut l.delay,
        |_ctx: &mut ApplyCtx<'_>, value: &PropertyValue| parse_seconds(value, false),
      ),
    );
    self.set(
      TransitionTimingFunction,
      layered(
        |s| &s.transitions,
        |s| &mut s.transitions,
        |l: &TransitionLayer| l.timing_function.as_ref(),
        |l: &mut TransitionLayer| &mut l.timing_function,
        |_ctx: &mut ApplyCtx<'_>, value: &PropertyValue| parse_timing_function(value),
      ),
    );
  }
}

//! Animation interpolator
//!
//! Blends two finished style records into a third, property by property.
//! The [`AnimationBlender`] registry mirrors the strategy table's property
//! space: one entry per interpolable longhand, each knowing its accessor
//! pair and a type-specific blend rule. Shorthands are pure aggregates and
//! blend their constituent longhands independently.
//!
//! Blend rules, by value type:
//! - scalars and colors lerp; endpoints are returned exactly at progress 0
//!   and 1 so devtools-visible values never drift
//! - lengths lerp when their units are compatible, otherwise the value
//!   switches discretely
//! - non-interpolable keywords switch at the 0.5 boundary, falling toward
//!   whichever endpoint's value is not the property's initial value
//! - shadow lists match entries from the end (lists are ordered
//!   most-recent-first), padding the shorter list with a neutral shadow
//!   derived from the partner entry
//! - transform lists blend pairwise per function when the operation
//!   sequences match, otherwise through full-matrix decomposition
//! - filter lists blend pairwise or switch discretely
//! - images blend through a synthetic cross-fade descriptor
//! - clip-path shapes blend only within the same shape category, otherwise
//!   snapping to the destination value

use crate::style::color::Rgba;
use crate::style::computed::{ComputedStyle, LineHeight};
use crate::style::fonts::{FontSizeSpec, FontWeight};
use crate::style::properties::PropertyId;
use crate::style::types::*;
use crate::style::values::{Length, LengthOrAuto};

fn lerp(a: f32, b: f32, t: f32) -> f32 {
  a + (b - a) * t
}

/// Lengths interpolate when no calc tree is involved and the units agree
/// (or both convert to absolute pixels). Anything else is non-interpolable.
fn blend_length(a: &Length, b: &Length, t: f32) -> Option<Length> {
  if a.calc.is_some() || b.calc.is_some() {
    return None;
  }
  if a.unit == b.unit {
    return Some(Length::new(lerp(a.value, b.value, t), a.unit));
  }
  if a.is_zero() {
    return Some(Length::new(lerp(0.0, b.value, t), b.unit));
  }
  if b.is_zero() {
    return Some(Length::new(lerp(a.value, 0.0, t), a.unit));
  }
  if a.unit.is_absolute() && b.unit.is_absolute() {
    return Some(Length::px(lerp(a.to_px(), b.to_px(), t)));
  }
  None
}

/// The discrete rule: switch at 0.5, but fall toward the endpoint whose
/// value is not the implicit default when exactly one side is the default.
fn discrete_pick<T: PartialEq>(a: T, b: T, initial: &T, t: f32) -> T {
  let pick_b = if a == *initial && b != *initial {
    true
  } else if b == *initial && a != *initial {
    false
  } else {
    t >= 0.5
  };
  if pick_b {
    b
  } else {
    a
  }
}

// ---------------------------------------------------------------------------
// Structured blends

fn blend_shadow(from: &ShadowValue, to: &ShadowValue, t: f32) -> ShadowValue {
  let length = |a: &Length, b: &Length| {
    blend_length(a, b, t).unwrap_or_else(|| if t < 0.5 { a.clone() } else { b.clone() })
  };
  let color = match (from.color, to.color) {
    (Some(a), Some(b)) => Some(a.lerp(b, t)),
    // One side is currentcolor; not resolvable here, switch discretely.
    _ => {
      if t < 0.5 {
        from.color
      } else {
        to.color
      }
    }
  };
  ShadowValue {
    offset_x: length(&from.offset_x, &to.offset_x),
    offset_y: length(&from.offset_y, &to.offset_y),
    blur: length(&from.blur, &to.blur),
    spread: length(&from.spread, &to.spread),
    color,
    inset: if t < 0.5 { from.inset } else { to.inset },
  }
}

/// End-aligned shadow-list blend with neutral padding.
fn blend_shadow_lists(a: &[ShadowValue], b: &[ShadowValue], t: f32) -> Vec<ShadowValue> {
  let len = a.len().max(b.len());
  let mut out = Vec::with_capacity(len);
  for slot in 0..len {
    // Pair entries from the end of each list; the shorter list is padded
    // at the front with a neutral shadow shaped like its partner.
    let from = (a.len() + slot).checked_sub(len).and_then(|i| a.get(i));
    let to = (b.len() + slot).checked_sub(len).and_then(|i| b.get(i));
    let blended = match (from, to) {
      (Some(from), Some(to)) => blend_shadow(from, to, t),
      (Some(from), None) => blend_shadow(from, &ShadowValue::neutral_like(from), t),
      (None, Some(to)) => blend_shadow(&ShadowValue::neutral_like(to), to, t),
      (None, None) => unreachable!("slot within max(len)"),
    };
    out.push(blended);
  }
  out
}

fn blend_transform_function(
  a: &TransformFunction,
  b: &TransformFunction,
  t: f32,
) -> Option<TransformFunction> {
  use TransformFunction::*;
  Some(match (a, b) {
    (Translate(x1, y1), Translate(x2, y2)) => {
      Translate(blend_length(x1, x2, t)?, blend_length(y1, y2, t)?)
    }
    (TranslateX(x1), TranslateX(x2)) => TranslateX(blend_length(x1, x2, t)?),
    (TranslateY(y1), TranslateY(y2)) => TranslateY(blend_length(y1, y2, t)?),
    (Scale(x1, y1), Scale(x2, y2)) => Scale(lerp(*x1, *x2, t), lerp(*y1, *y2, t)),
    (ScaleX(x1), ScaleX(x2)) => ScaleX(lerp(*x1, *x2, t)),
    (ScaleY(y1), ScaleY(y2)) => ScaleY(lerp(*y1, *y2, t)),
    (Rotate(a1), Rotate(a2)) => Rotate(lerp(*a1, *a2, t)),
    (SkewX(a1), SkewX(a2)) => SkewX(lerp(*a1, *a2, t)),
    (SkewY(a1), SkewY(a2)) => SkewY(lerp(*a1, *a2, t)),
    (Skew(x1, y1), Skew(x2, y2)) => Skew(lerp(*x1, *x2, t), lerp(*y1, *y2, t)),
    (Matrix(a1, b1, c1, d1, e1, f1), Matrix(a2, b2, c2, d2, e2, f2)) => Matrix(
      lerp(*a1, *a2, t),
      lerp(*b1, *b2, t),
      lerp(*c1, *c2, t),
      lerp(*d1, *d2, t),
      lerp(*e1, *e2, t),
      lerp(*f1, *f2, t),
    ),
    _ => return None,
  })
}

/// Pairwise when the operation sequences match; otherwise collapse both
/// lists to matrices, decompose, lerp and recompose.
fn blend_transform_lists(
  a: &[TransformFunction],
  b: &[TransformFunction],
  t: f32,
) -> Vec<TransformFunction> {
  if a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_operation(y)) {
    let pairwise: Option<Vec<_>> = a
      .iter()
      .zip(b)
      .map(|(x, y)| blend_transform_function(x, y, t))
      .collect();
    if let Some(functions) = pairwise {
      return functions;
    }
  }
  let from = Matrix2D::from_list(a).decompose();
  let to = Matrix2D::from_list(b).decompose();
  let m = from.lerp(&to, t).recompose();
  vec![TransformFunction::Matrix(m.a, m.b, m.c, m.d, m.e, m.f)]
}

fn blend_filter_function(
  a: &FilterFunction,
  b: &FilterFunction,
  t: f32,
) -> Option<FilterFunction> {
  use FilterFunction::*;
  Some(match (a, b) {
    (Blur(a), Blur(b)) => Blur(blend_length(a, b, t)?),
    (Brightness(a), Brightness(b)) => Brightness(lerp(*a, *b, t)),
    (Contrast(a), Contrast(b)) => Contrast(lerp(*a, *b, t)),
    (Grayscale(a), Grayscale(b)) => Grayscale(lerp(*a, *b, t)),
    (Sepia(a), Sepia(b)) => Sepia(lerp(*a, *b, t)),
    (Saturate(a), Saturate(b)) => Saturate(lerp(*a, *b, t)),
    (HueRotate(a), HueRotate(b)) => HueRotate(lerp(*a, *b, t)),
    (Invert(a), Invert(b)) => Invert(lerp(*a, *b, t)),
    (Opacity(a), Opacity(b)) => Opacity(lerp(*a, *b, t)),
    (DropShadow(a), DropShadow(b)) => DropShadow(Box::new(blend_shadow(a, b, t))),
    _ => return None,
  })
}

fn blend_filter_lists(
  a: &[FilterFunction],
  b: &[FilterFunction],
  t: f32,
) -> Vec<FilterFunction> {
  if a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_operation(y)) {
    let pairwise: Option<Vec<_>> = a
      .iter()
      .zip(b)
      .map(|(x, y)| blend_filter_function(x, y, t))
      .collect();
    if let Some(functions) = pairwise {
      return functions;
    }
  }
  if t < 0.5 {
    a.to_vec()
  } else {
    b.to_vec()
  }
}

/// Synthetic cross-fade. Exact endpoints keep inspected values stable.
fn blend_images(a: &ImageSource, b: &ImageSource, t: f32) -> ImageSource {
  if t <= 0.0 {
    return a.clone();
  }
  if t >= 1.0 {
    return b.clone();
  }
  if a == b {
    return a.clone();
  }
  ImageSource::CrossFade(Box::new(CrossFadeImage {
    from: a.clone(),
    to: b.clone(),
    amount: t,
  }))
}

fn blend_shape_radius(a: &ShapeRadius, b: &ShapeRadius, t: f32) -> ShapeRadius {
  match (a, b) {
    (ShapeRadius::Length(x), ShapeRadius::Length(y)) => match blend_length(x, y, t) {
      Some(length) => ShapeRadius::Length(length),
      None => b.clone(),
    },
    _ => b.clone(),
  }
}

fn blend_shapes(a: &BasicShape, b: &BasicShape, t: f32) -> BasicShape {
  let length = |x: &Length, y: &Length| blend_length(x, y, t).unwrap_or_else(|| y.clone());
  match (a, b) {
    (
      BasicShape::Circle {
        radius: ra,
        center_x: xa,
        center_y: ya,
      },
      BasicShape::Circle {
        radius: rb,
        center_x: xb,
        center_y: yb,
      },
    ) => BasicShape::Circle {
      radius: blend_shape_radius(ra, rb, t),
      center_x: length(xa, xb),
      center_y: length(ya, yb),
    },
    (
      BasicShape::Ellipse {
        radius_x: rxa,
        radius_y: rya,
        center_x: xa,
        center_y: ya,
      },
      BasicShape::Ellipse {
        radius_x: rxb,
        radius_y: ryb,
        center_x: xb,
        center_y: yb,
      },
    ) => BasicShape::Ellipse {
      radius_x: blend_shape_radius(rxa, rxb, t),
      radius_y: blend_shape_radius(rya, ryb, t),
      center_x: length(xa, xb),
      center_y: length(ya, yb),
    },
    (
      BasicShape::Inset {
        top: ta,
        right: ra,
        bottom: ba,
        left: la,
      },
      BasicShape::Inset {
        top: tb,
        right: rb,
        bottom: bb,
        left: lb,
      },
    ) => BasicShape::Inset {
      top: length(ta, tb),
      right: length(ra, rb),
      bottom: length(ba, bb),
      left: length(la, lb),
    },
    (BasicShape::Polygon(pa), BasicShape::Polygon(pb)) if pa.len() == pb.len() => {
      BasicShape::Polygon(
        pa.iter()
          .zip(pb)
          .map(|((xa, ya), (xb, yb))| (length(xa, xb), length(ya, yb)))
          .collect(),
      )
    }
    _ => b.clone(),
  }
}

// ---------------------------------------------------------------------------
// Registry

type BlendFn = Box<dyn Fn(&mut ComputedStyle, &ComputedStyle, &ComputedStyle, f32)>;
type EqualsFn = Box<dyn Fn(&ComputedStyle, &ComputedStyle) -> bool>;

struct BlendEntry {
  blend: BlendFn,
  equals: EqualsFn,
}

fn entry<T, B>(get: fn(&ComputedStyle) -> T, set: fn(&mut ComputedStyle, T), blend: B) -> BlendEntry
where
  T: PartialEq + 'static,
  B: Fn(T, T, f32) -> T + 'static,
{
  BlendEntry {
    blend: Box::new(move |dst, a, b, t| {
      // Exact endpoints, no float drift.
      let value = if t <= 0.0 {
        get(a)
      } else if t >= 1.0 {
        get(b)
      } else {
        blend(get(a), get(b), t)
      };
      set(dst, value);
    }),
    equals: Box::new(move |a, b| get(a) == get(b)),
  }
}

fn scalar(get: fn(&ComputedStyle) -> f32, set: fn(&mut ComputedStyle, f32)) -> BlendEntry {
  entry(get, set, |a, b, t| lerp(a, b, t))
}

fn scalar_unit(get: fn(&ComputedStyle) -> f32, set: fn(&mut ComputedStyle, f32)) -> BlendEntry {
  entry(get, set, |a, b, t| lerp(a, b, t).clamp(0.0, 1.0))
}

fn color(get: fn(&ComputedStyle) -> Rgba, set: fn(&mut ComputedStyle, Rgba)) -> BlendEntry {
  entry(get, set, |a, b, t| a.lerp(b, t))
}

fn discrete<T>(
  get: fn(&ComputedStyle) -> T,
  set: fn(&mut ComputedStyle, T),
  initial: fn() -> T,
) -> BlendEntry
where
  T: PartialEq + 'static,
{
  entry(get, set, move |a, b, t| discrete_pick(a, b, &initial(), t))
}

fn length(get: fn(&ComputedStyle) -> Length, set: fn(&mut ComputedStyle, Length)) -> BlendEntry {
  entry(get, set, |a, b, t| {
    blend_length(&a, &b, t).unwrap_or_else(|| if t < 0.5 { a } else { b })
  })
}

fn length_or_auto(
  get: fn(&ComputedStyle) -> LengthOrAuto,
  set: fn(&mut ComputedStyle, LengthOrAuto),
) -> BlendEntry {
  entry(get, set, |a, b, t| match (&a, &b) {
    (LengthOrAuto::Length(x), LengthOrAuto::Length(y)) => match blend_length(x, y, t) {
      Some(length) => LengthOrAuto::Length(length),
      None => {
        if t < 0.5 {
          a
        } else {
          b
        }
      }
    },
    _ => {
      if t < 0.5 {
        a
      } else {
        b
      }
    }
  })
}

fn size(get: fn(&ComputedStyle) -> SizeValue, set: fn(&mut ComputedStyle, SizeValue)) -> BlendEntry {
  entry(get, set, |a, b, t| match (&a, &b) {
    (SizeValue::Length(x), SizeValue::Length(y)) => match blend_length(x, y, t) {
      Some(length) => SizeValue::Length(length),
      None => {
        if t < 0.5 {
          a
        } else {
          b
        }
      }
    },
    _ => {
      if t < 0.5 {
        a
      } else {
        b
      }
    }
  })
}

fn radius(
  get: fn(&ComputedStyle) -> BorderRadius,
  set: fn(&mut ComputedStyle, BorderRadius),
) -> BlendEntry {
  entry(get, set, |a, b, t| {
    match (
      blend_length(&a.horizontal, &b.horizontal, t),
      blend_length(&a.vertical, &b.vertical, t),
    ) {
      (Some(horizontal), Some(vertical)) => BorderRadius {
        horizontal,
        vertical,
      },
      _ => {
        if t < 0.5 {
          a
        } else {
          b
        }
      }
    }
  })
}

fn shadows(
  get: fn(&ComputedStyle) -> Vec<ShadowValue>,
  set: fn(&mut ComputedStyle, Vec<ShadowValue>),
) -> BlendEntry {
  entry(get, set, |a, b, t| blend_shadow_lists(&a, &b, t))
}

/// Interpolator registry, built once and indexed by property ordinal.
pub struct AnimationBlender {
  entries: Vec<Option<BlendEntry>>,
}

impl Default for AnimationBlender {
  fn default() -> Self {
    Self::new()
  }
}

impl AnimationBlender {
  pub fn new() -> Self {
    let mut entries: Vec<Option<BlendEntry>> = (0..PropertyId::COUNT).map(|_| None).collect();
    let mut set = |id: PropertyId, entry: BlendEntry| {
      entries[id.index()] = Some(entry);
    };

    // Scalars
    set(PropertyId::Opacity, scalar_unit(|s| s.opacity, |s, v| s.opacity = v));
    set(
      PropertyId::BorderTopWidth,
      scalar(|s| s.border_top_width, |s, v| s.border_top_width = v),
    );
    set(
      PropertyId::BorderRightWidth,
      scalar(|s| s.border_right_width, |s, v| s.border_right_width = v),
    );
    set(
      PropertyId::BorderBottomWidth,
      scalar(|s| s.border_bottom_width, |s, v| s.border_bottom_width = v),
    );
    set(
      PropertyId::BorderLeftWidth,
      scalar(|s| s.border_left_width, |s, v| s.border_left_width = v),
    );
    set(
      PropertyId::OutlineWidth,
      scalar(|s| s.outline_width, |s, v| s.outline_width = v),
    );
    set(
      PropertyId::OutlineOffset,
      scalar(|s| s.outline_offset, |s, v| s.outline_offset = v),
    );
    set(
      PropertyId::LetterSpacing,
      scalar(
        |s| s.inherited().letter_spacing,
        |s, v| s.inherited_mut().letter_spacing = v,
      ),
    );
    set(
      PropertyId::WordSpacing,
      scalar(
        |s| s.inherited().word_spacing,
        |s, v| s.inherited_mut().word_spacing = v,
      ),
    );
    set(
      PropertyId::TabSize,
      scalar(|s| s.inherited().tab_size, |s, v| s.inherited_mut().tab_size = v),
    );
    set(
      PropertyId::BorderHorizontalSpacing,
      scalar(
        |s| s.inherited().border_horizontal_spacing,
        |s, v| s.inherited_mut().border_horizontal_spacing = v,
      ),
    );
    set(
      PropertyId::BorderVerticalSpacing,
      scalar(
        |s| s.inherited().border_vertical_spacing,
        |s, v| s.inherited_mut().border_vertical_spacing = v,
      ),
    );

    // Font size animates over the finalized pixel size.
    set(
      PropertyId::FontSize,
      scalar(
        |s| s.font_size(),
        |s, v| {
          let font = s.font_mut();
          font.computed_size = v;
          font.specified_size = FontSizeSpec::Px(v);
        },
      ),
    );
    set(
      PropertyId::FontWeight,
      entry(
        |s| s.font().weight,
        |s, v| s.font_mut().weight = v,
        |a, b, t| FontWeight(lerp(a.0 as f32, b.0 as f32, t).round().clamp(1.0, 1000.0) as u16),
      ),
    );
    set(
      PropertyId::LineHeight,
      entry(
        |s| s.inherited().line_height,
        |s, v| s.inherited_mut().line_height = v,
        |a, b, t| match (a, b) {
          (LineHeight::Number(x), LineHeight::Number(y)) => LineHeight::Number(lerp(x, y, t)),
          (LineHeight::Px(x), LineHeight::Px(y)) => LineHeight::Px(lerp(x, y, t)),
          _ => discrete_pick(a, b, &LineHeight::Normal, t),
        },
      ),
    );
    set(
      PropertyId::ZIndex,
      entry(
        |s| s.z_index,
        |s, v| s.z_index = v,
        |a, b, t| match (a, b) {
          (ZIndex::Index(x), ZIndex::Index(y)) => {
            ZIndex::Index(lerp(x as f32, y as f32, t).round() as i32)
          }
          _ => discrete_pick(a, b, &ZIndex::Auto, t),
        },
      ),
    );

    // Colors
    set(PropertyId::Color, color(|s| s.color(), |s, v| s.set_color(v)));
    set(
      PropertyId::BackgroundColor,
      color(|s| s.background_color, |s, v| s.background_color = v),
    );
    set(
      PropertyId::BorderTopColor,
      color(|s| s.border_top_color, |s, v| s.border_top_color = v),
    );
    set(
      PropertyId::BorderRightColor,
      color(|s| s.border_right_color, |s, v| s.border_right_color = v),
    );
    set(
      PropertyId::BorderBottomColor,
      color(|s| s.border_bottom_color, |s, v| s.border_bottom_color = v),
    );
    set(
      PropertyId::BorderLeftColor,
      color(|s| s.border_left_color, |s, v| s.border_left_color = v),
    );
    set(
      PropertyId::OutlineColor,
      color(|s| s.outline_color, |s, v| s.outline_color = v),
    );
    set(
      PropertyId::TextDecorationColor,
      color(|s| s.text_decoration_color, |s, v| s.text_decoration_color = v),
    );

    // Lengths
    set(
      PropertyId::PaddingTop,
      length(|s| s.padding_top.clone(), |s, v| s.padding_top = v),
    );
    set(
      PropertyId::PaddingRight,
      length(|s| s.padding_right.clone(), |s, v| s.padding_right = v),
    );
    set(
      PropertyId::PaddingBottom,
      length(|s| s.padding_bottom.clone(), |s, v| s.padding_bottom = v),
    );
    set(
      PropertyId::PaddingLeft,
      length(|s| s.padding_left.clone(), |s, v| s.padding_left = v),
    );
    set(
      PropertyId::TextIndent,
      length(
        |s| s.inherited().text_indent.clone(),
        |s, v| s.inherited_mut().text_indent = v,
      ),
    );
    set(
      PropertyId::TransformOriginX,
      length(|s| s.transform_origin_x.clone(), |s, v| s.transform_origin_x = v),
    );
    set(
      PropertyId::TransformOriginY,
      length(|s| s.transform_origin_y.clone(), |s, v| s.transform_origin_y = v),
    );

    set(PropertyId::Top, length_or_auto(|s| s.top.clone(), |s, v| s.top = v));
    set(
      PropertyId::Right,
      length_or_auto(|s| s.right.clone(), |s, v| s.right = v),
    );
    set(
      PropertyId::Bottom,
      length_or_auto(|s| s.bottom.clone(), |s, v| s.bottom = v),
    );
    set(PropertyId::Left, length_or_auto(|s| s.left.clone(), |s, v| s.left = v));
    set(
      PropertyId::MarginTop,
      length_or_auto(|s| s.margin_top.clone(), |s, v| s.margin_top = v),
    );
    set(
      PropertyId::MarginRight,
      length_or_auto(|s| s.margin_right.clone(), |s, v| s.margin_right = v),
    );
    set(
      PropertyId::MarginBottom,
      length_or_auto(|s| s.margin_bottom.clone(), |s, v| s.margin_bottom = v),
    );
    set(
      PropertyId::MarginLeft,
      length_or_auto(|s| s.margin_left.clone(), |s, v| s.margin_left = v),
    );

    set(PropertyId::Width, size(|s| s.width.clone(), |s, v| s.width = v));
    set(PropertyId::Height, size(|s| s.height.clone(), |s, v| s.height = v));
    set(
      PropertyId::MinWidth,
      size(|s| s.min_width.clone(), |s, v| s.min_width = v),
    );
    set(
      PropertyId::MinHeight,
      size(|s| s.min_height.clone(), |s, v| s.min_height = v),
    );
    set(
      PropertyId::MaxWidth,
      size(|s| s.max_width.clone(), |s, v| s.max_width = v),
    );
    set(
      PropertyId::MaxHeight,
      size(|s| s.max_height.clone(), |s, v| s.max_height = v),
    );

    set(
      PropertyId::BorderTopLeftRadius,
      radius(
        |s| s.border_top_left_radius.clone(),
        |s, v| s.border_top_left_radius = v,
      ),
    );
    set(
      PropertyId::BorderTopRightRadius,
      radius(
        |s| s.border_top_right_radius.clone(),
        |s, v| s.border_top_right_radius = v,
      ),
    );
    set(
      PropertyId::BorderBottomLeftRadius,
      radius(
        |s| s.border_bottom_left_radius.clone(),
        |s, v| s.border_bottom_left_radius = v,
      ),
    );
    set(
      PropertyId::BorderBottomRightRadius,
      radius(
        |s| s.border_bottom_right_radius.clone(),
        |s, v| s.border_bottom_right_radius = v,
      ),
    );

    // Structured lists
    set(
      PropertyId::BoxShadow,
      shadows(|s| s.box_shadow.clone(), |s, v| s.box_shadow = v),
    );
    set(
      PropertyId::TextShadow,
      shadows(
        |s| s.inherited().text_shadow.clone(),
        |s, v| s.inherited_mut().text_shadow = v,
      ),
    );
    set(
      PropertyId::Transform,
      entry(
        |s| s.transform.clone(),
        |s, v| s.transform = v,
        |a, b, t| blend_transform_lists(&a, &b, t),
      ),
    );
    set(
      PropertyId::Filter,
      entry(
        |s| s.filter.clone(),
        |s, v| s.filter = v,
        |a, b, t| blend_filter_lists(&a, &b, t),
      ),
    );
    set(
      PropertyId::ClipPath,
      entry(
        |s| s.clip_path.clone(),
        |s, v| s.clip_path = v,
        |a, b, t| match (&a, &b) {
          (ClipPath::Shape(x), ClipPath::Shape(y)) if x.same_category(y) => {
            ClipPath::Shape(blend_shapes(x, y, t))
          }
          // Mixed categories snap to the destination value.
          _ => b,
        },
      ),
    );
    set(
      PropertyId::ListStyleImage,
      entry(
        |s| s.inherited().list_style_image.clone(),
        |s, v| s.inherited_mut().list_style_image = v,
        |a, b, t| match (&a, &b) {
          (Some(x), Some(y)) => Some(blend_images(x, y, t)),
          _ => {
            if t < 0.5 {
              a
            } else {
              b
            }
          }
        },
      ),
    );
    set(
      PropertyId::BackgroundImage,
      entry(
        |s| s.background_layers.clone(),
        |s, v| s.background_layers = v,
        |a, b, t| {
          let mut layers = if t < 0.5 { a.clone() } else { b.clone() };
          for (i, layer) in layers.iter_mut().enumerate() {
            if let (Some(Some(x)), Some(Some(y))) =
              (a.get(i).map(|l| l.image.as_ref()), b.get(i).map(|l| l.image.as_ref()))
            {
              layer.image = Some(blend_images(x, y, t));
            }
          }
          layers
        },
      ),
    );

    // Discrete keywords
    set(
      PropertyId::Display,
      discrete(|s| s.display, |s, v| s.display = v, Display::default),
    );
    set(
      PropertyId::Position,
      discrete(|s| s.position, |s, v| s.position = v, Position::default),
    );
    set(
      PropertyId::Float,
      discrete(|s| s.float, |s, v| s.float = v, Float::default),
    );
    set(
      PropertyId::Clear,
      discrete(|s| s.clear, |s, v| s.clear = v, Clear::default),
    );
    set(
      PropertyId::OverflowX,
      discrete(|s| s.overflow_x, |s, v| s.overflow_x = v, Overflow::default),
    );
    set(
      PropertyId::OverflowY,
      discrete(|s| s.overflow_y, |s, v| s.overflow_y = v, Overflow::default),
    );
    set(
      PropertyId::Visibility,
      discrete(
        |s| s.inherited().visibility,
        |s, v| s.inherited_mut().visibility = v,
        Visibility::default,
      ),
    );
    set(
      PropertyId::BoxSizing,
      discrete(|s| s.box_sizing, |s, v| s.box_sizing = v, BoxSizing::default),
    );
    set(
      PropertyId::TextAlign,
      discrete(
        |s| s.inherited().text_align,
        |s, v| s.inherited_mut().text_align = v,
        TextAlign::default,
      ),
    );
    set(
      PropertyId::TextTransform,
      discrete(
        |s| s.inherited().text_transform,
        |s, v| s.inherited_mut().text_transform = v,
        TextTransform::default,
      ),
    );
    set(
      PropertyId::TextDecorationLine,
      discrete(
        |s| s.text_decoration_line,
        |s, v| s.text_decoration_line = v,
        TextDecorationLine::default,
      ),
    );
    set(
      PropertyId::WhiteSpace,
      discrete(
        |s| s.inherited().white_space,
        |s, v| s.inherited_mut().white_space = v,
        WhiteSpace::default,
      ),
    );
    set(
      PropertyId::Cursor,
      discrete(
        |s| s.inherited().cursor,
        |s, v| s.inherited_mut().cursor = v,
        Cursor::default,
      ),
    );
    set(
      PropertyId::ListStyleType,
      discrete(
        |s| s.inherited().list_style_type,
        |s, v| s.inherited_mut().list_style_type = v,
        ListStyleType::default,
      ),
    );
    set(
      PropertyId::ListStylePosition,
      discrete(
        |s| s.inherited().list_style_position,
        |s, v| s.inherited_mut().list_style_position = v,
        ListStylePosition::default,
      ),
    );
    set(
      PropertyId::BorderTopStyle,
      discrete(
        |s| s.border_top_style,
        |s, v| s.border_top_style = v,
        BorderStyle::default,
      ),
    );
    set(
      PropertyId::BorderRightStyle,
      discrete(
        |s| s.border_right_style,
        |s, v| s.border_right_style = v,
        BorderStyle::default,
      ),
    );
    set(
      PropertyId::BorderBottomStyle,
      discrete(
        |s| s.border_bottom_style,
        |s, v| s.border_bottom_style = v,
        BorderStyle::default,
      ),
    );
    set(
      PropertyId::BorderLeftStyle,
      discrete(
        |s| s.border_left_style,
        |s, v| s.border_left_style = v,
        BorderStyle::default,
      ),
    );
    set(
      PropertyId::OutlineStyle,
      discrete(
        |s| s.outline_style,
        |s, v| s.outline_style = v,
        OutlineStyle::default,
      ),
    );
    set(
      PropertyId::VerticalAlign,
      discrete(
        |s| s.vertical_align.clone(),
        |s, v| s.vertical_align = v,
        VerticalAlign::default,
      ),
    );

    Self { entries }
  }

  fn entry(&self, id: PropertyId) -> Option<&BlendEntry> {
    self.entries[id.index()].as_ref()
  }

  /// True when blending `id` does something (a registered longhand, or a
  /// shorthand with at least one registered longhand).
  pub fn can_blend(&self, id: PropertyId) -> bool {
    match id.longhands() {
      Some(longhands) => longhands.iter().any(|l| self.entry(*l).is_some()),
      None => self.entry(id).is_some(),
    }
  }

  /// Blending may be delegated to a compositor; the software blend here
  /// remains available as the fallback.
  pub fn is_accelerated(&self, id: PropertyId) -> bool {
    id.is_accelerated()
  }

  /// Writes the blend of `a` and `b` at `progress` into `dst`. Returns
  /// false when the property is not registered.
  pub fn blend(
    &self,
    id: PropertyId,
    dst: &mut ComputedStyle,
    a: &ComputedStyle,
    b: &ComputedStyle,
    progress: f32,
  ) -> bool {
    if let Some(longhands) = id.longhands() {
      let mut any = false;
      for longhand in longhands {
        any |= self.blend(*longhand, dst, a, b, progress);
      }
      return any;
    }
    match self.entry(id) {
      Some(entry) => {
        (entry.blend)(dst, a, b, progress);
        true
      }
      None => false,
    }
  }

  /// Property-wise equality between two styles. Shorthands compare every
  /// constituent longhand. Unregistered properties report equal.
  pub fn equals(&self, id: PropertyId, a: &ComputedStyle, b: &ComputedStyle) -> bool {
    if let Some(longhands) = id.longhands() {
      return longhands.iter().all(|l| self.equals(*l, a, b));
    }
    match self.entry(id) {
      Some(entry) => (entry.equals)(a, b),
      None => true,
    }
  }
}

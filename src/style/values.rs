//! CSS value types
//!
//! This module provides types for representing CSS values in their computed
//! form. These types are used throughout the style system.
//!
//! # Units
//!
//! CSS supports various length units. We categorize them as:
//! - **Absolute**: px, pt, pc, in, cm, mm, Q
//! - **Font-relative**: em, rem, ex, ch
//! - **Viewport-relative**: vw, vh, vmin, vmax
//! - **Percentages**: relative to a containing-block dimension
//!
//! Reference: CSS Values and Units Module Level 3
//! <https://www.w3.org/TR/css-values-3/>

use crate::calc::{self, CalcExpr, CalcLengthContext, ValueRange};
use std::fmt;

/// CSS length units
///
/// Represents the unit portion of a CSS length value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
  /// Pixels (px) - CSS reference unit, 1/96th of an inch
  Px,
  /// Points (pt) - 1/72nd of an inch
  Pt,
  /// Picas (pc) - 12 points
  Pc,
  /// Inches (in)
  In,
  /// Centimeters (cm)
  Cm,
  /// Millimeters (mm)
  Mm,
  /// Quarter-millimeters (Q)
  Q,
  /// Em units - relative to element's font size
  Em,
  /// Rem units - relative to root element's font size
  Rem,
  /// Ex units - relative to x-height of the font
  Ex,
  /// Ch units - relative to width of '0' character
  Ch,
  /// Viewport width percentage (vw)
  Vw,
  /// Viewport height percentage (vh)
  Vh,
  /// Viewport minimum (vmin)
  Vmin,
  /// Viewport maximum (vmax)
  Vmax,
  /// Percentage (%)
  Percent,
  /// Calculated length from `calc()`
  Calc,
}

impl LengthUnit {
  /// Returns true if this is an absolute unit (px, pt, pc, in, cm, mm, Q)
  pub fn is_absolute(self) -> bool {
    matches!(
      self,
      Self::Px | Self::Pt | Self::Pc | Self::In | Self::Cm | Self::Mm | Self::Q
    )
  }

  /// Returns true if this is a font-relative unit (em, rem, ex, ch)
  pub fn is_font_relative(self) -> bool {
    matches!(self, Self::Em | Self::Rem | Self::Ex | Self::Ch)
  }

  /// Returns true if this is a viewport-relative unit (vw, vh, vmin, vmax)
  pub fn is_viewport_relative(self) -> bool {
    matches!(self, Self::Vw | Self::Vh | Self::Vmin | Self::Vmax)
  }

  /// Returns true if this is a percentage
  pub fn is_percentage(self) -> bool {
    matches!(self, Self::Percent)
  }

  /// Parses a unit identifier (case-insensitive). `%` is not an identifier
  /// and is not accepted here.
  pub fn parse(unit: &str) -> Option<Self> {
    let unit = unit.to_ascii_lowercase();
    Some(match unit.as_str() {
      "px" => Self::Px,
      "pt" => Self::Pt,
      "pc" => Self::Pc,
      "in" => Self::In,
      "cm" => Self::Cm,
      "mm" => Self::Mm,
      "q" => Self::Q,
      "em" => Self::Em,
      "rem" => Self::Rem,
      "ex" => Self::Ex,
      "ch" => Self::Ch,
      "vw" => Self::Vw,
      "vh" => Self::Vh,
      "vmin" => Self::Vmin,
      "vmax" => Self::Vmax,
      _ => return None,
    })
  }

  /// Returns the canonical string representation of this unit
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Px => "px",
      Self::Pt => "pt",
      Self::Pc => "pc",
      Self::In => "in",
      Self::Cm => "cm",
      Self::Mm => "mm",
      Self::Q => "q",
      Self::Em => "em",
      Self::Rem => "rem",
      Self::Ex => "ex",
      Self::Ch => "ch",
      Self::Vw => "vw",
      Self::Vh => "vh",
      Self::Vmin => "vmin",
      Self::Vmax => "vmax",
      Self::Percent => "%",
      Self::Calc => "calc",
    }
  }
}

impl fmt::Display for LengthUnit {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// A `calc()` expression attached to a length, together with the range
/// policy of the property that owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct CalcValue {
  pub expr: CalcExpr,
  pub range: ValueRange,
}

/// A CSS length value with a specific unit
///
/// Represents a computed length value that may need further resolution
/// depending on context (containing block size, font size, viewport).
#[derive(Debug, Clone, PartialEq)]
pub struct Length {
  /// The numeric value
  pub value: f32,
  /// The unit
  pub unit: LengthUnit,
  /// Optional calc() expression (takes precedence over `value`/`unit`)
  pub calc: Option<CalcValue>,
}

impl Length {
  /// Creates a new length with the given value and unit
  pub const fn new(value: f32, unit: LengthUnit) -> Self {
    Self {
      value,
      unit,
      calc: None,
    }
  }

  /// Creates a length from a calc expression with the owning property's
  /// range policy.
  pub const fn from_calc(expr: CalcExpr, range: ValueRange) -> Self {
    Self {
      value: 0.0,
      unit: LengthUnit::Calc,
      calc: Some(CalcValue { expr, range }),
    }
  }

  /// Creates a length in pixels
  pub const fn px(value: f32) -> Self {
    Self::new(value, LengthUnit::Px)
  }

  /// Creates a length in em units
  pub const fn em(value: f32) -> Self {
    Self::new(value, LengthUnit::Em)
  }

  /// Creates a length in rem units
  pub const fn rem(value: f32) -> Self {
    Self::new(value, LengthUnit::Rem)
  }

  /// Creates a percentage value
  pub const fn percent(value: f32) -> Self {
    Self::new(value, LengthUnit::Percent)
  }

  /// The zero pixel length
  pub const fn zero() -> Self {
    Self::px(0.0)
  }

  /// Converts this length to pixels.
  ///
  /// For absolute units this performs unit conversion. For relative or
  /// percentage units this is a best-effort fallback returning the raw
  /// numeric value; use the context-aware resolve helpers for spec-accurate
  /// resolution.
  pub fn to_px(&self) -> f32 {
    if let Some(calc) = &self.calc {
      let resolved = calc::evaluate_as_length(&calc.expr, &CalcLengthContext::default());
      if resolved.is_finite() {
        return calc.range.clamp(resolved) as f32;
      }
      return 0.0;
    }
    match self.unit {
      LengthUnit::Px => self.value,
      LengthUnit::Pt => self.value * (96.0 / 72.0),
      LengthUnit::Pc => self.value * 16.0,
      LengthUnit::In => self.value * 96.0,
      LengthUnit::Cm => self.value * (96.0 / 2.54),
      LengthUnit::Mm => self.value * (96.0 / 25.4),
      LengthUnit::Q => self.value * (96.0 / 101.6),
      _ => self.value,
    }
  }

  /// Resolves this length to pixels using a percentage base.
  ///
  /// Returns `None` when the unit cannot be resolved with only a base
  /// (e.g. font-relative or viewport-relative units).
  pub fn resolve_against(&self, percentage_base: f32) -> Option<f32> {
    if self.calc.is_some() {
      let ctx = CalcLengthContext {
        percentage_base: Some(percentage_base as f64),
        ..Default::default()
      };
      return self.resolve_calc(&ctx);
    }
    match self.unit {
      LengthUnit::Percent => Some(self.value / 100.0 * percentage_base),
      _ if self.unit.is_absolute() => Some(self.to_px()),
      _ => None,
    }
  }

  /// Resolves this length using a font size (for em/rem/ex/ch units).
  ///
  /// ex/ch fall back to 0.5em when real font metrics are not supplied.
  pub fn resolve_with_font_size(&self, font_size_px: f32) -> Option<f32> {
    if self.calc.is_some() {
      let ctx = CalcLengthContext {
        font_size: font_size_px as f64,
        root_font_size: font_size_px as f64,
        ..Default::default()
      };
      return self.resolve_calc(&ctx);
    }
    match self.unit {
      LengthUnit::Em | LengthUnit::Rem => Some(self.value * font_size_px),
      LengthUnit::Ex | LengthUnit::Ch => Some(self.value * font_size_px * 0.5),
      _ if self.unit.is_absolute() => Some(self.to_px()),
      _ => None,
    }
  }

  /// Resolves a length (including calc expressions) with all available
  /// context. Returns `None` when a percentage-based term lacks a base or a
  /// division produced no usable value.
  pub fn resolve_with_context(&self, ctx: &CalcLengthContext) -> Option<f32> {
    if self.calc.is_some() {
      return self.resolve_calc(ctx);
    }
    if self.unit.is_percentage() {
      return ctx
        .percentage_base
        .map(|base| (self.value as f64 / 100.0 * base) as f32);
    }
    if self.unit.is_viewport_relative() {
      let resolved = match self.unit {
        LengthUnit::Vw => self.value as f64 / 100.0 * ctx.viewport_width,
        LengthUnit::Vh => self.value as f64 / 100.0 * ctx.viewport_height,
        LengthUnit::Vmin => {
          self.value as f64 / 100.0 * ctx.viewport_width.min(ctx.viewport_height)
        }
        _ => self.value as f64 / 100.0 * ctx.viewport_width.max(ctx.viewport_height),
      };
      return Some(resolved as f32);
    }
    if self.unit.is_font_relative() {
      let resolved = match self.unit {
        LengthUnit::Em => self.value as f64 * ctx.font_size,
        LengthUnit::Rem => self.value as f64 * ctx.root_font_size,
        LengthUnit::Ex => self.value as f64 * ctx.x_height.unwrap_or(ctx.font_size * 0.5),
        _ => self.value as f64 * ctx.zero_advance.unwrap_or(ctx.font_size * 0.5),
      };
      return Some(resolved as f32);
    }
    Some(self.to_px())
  }

  fn resolve_calc(&self, ctx: &CalcLengthContext) -> Option<f32> {
    let calc = self.calc.as_ref()?;
    let resolved = calc::evaluate_as_length(&calc.expr, ctx);
    if resolved.is_finite() {
      Some(calc.range.clamp(resolved) as f32)
    } else {
      None
    }
  }

  /// Returns true if this length (or any calc term) uses a percentage.
  pub fn has_percentage(&self) -> bool {
    if let Some(calc) = &self.calc {
      calc.expr.has_percentage()
    } else {
      self.unit.is_percentage()
    }
  }

  /// Returns true if this is a statically-zero length
  pub fn is_zero(&self) -> bool {
    if self.calc.is_some() {
      return false;
    }
    self.value == 0.0
  }
}

impl fmt::Display for Length {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.calc.is_some() {
      return write!(f, "calc(..)");
    }
    write!(f, "{}{}", self.value, self.unit)
  }
}

/// A CSS length value or the `auto` keyword
///
/// Many CSS properties accept either a specific length or `auto`,
/// which means "compute automatically based on context".
#[derive(Debug, Clone, PartialEq)]
pub enum LengthOrAuto {
  /// A specific length value
  Length(Length),
  /// The `auto` keyword
  Auto,
}

impl LengthOrAuto {
  /// Creates a length in pixels
  pub const fn px(value: f32) -> Self {
    Self::Length(Length::px(value))
  }

  /// Creates a percentage value
  pub const fn percent(value: f32) -> Self {
    Self::Length(Length::percent(value))
  }

  /// Returns true if this is `auto`
  pub fn is_auto(&self) -> bool {
    matches!(self, Self::Auto)
  }

  /// Returns the length if this is not auto
  pub fn length(&self) -> Option<&Length> {
    match self {
      Self::Length(length) => Some(length),
      Self::Auto => None,
    }
  }

  /// Converts to pixels if this is an absolute length, otherwise None
  pub fn to_px(&self) -> Option<f32> {
    match self {
      Self::Length(length) if length.unit.is_absolute() => Some(length.to_px()),
      _ => None,
    }
  }

  /// Resolves this value against a percentage base. Returns None for Auto.
  pub fn resolve_against(&self, percentage_base: f32) -> Option<f32> {
    self
      .length()
      .and_then(|length| length.resolve_against(percentage_base))
  }
}

impl From<Length> for LengthOrAuto {
  fn from(length: Length) -> Self {
    Self::Length(length)
  }
}

impl fmt::Display for LengthOrAuto {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Length(length) => write!(f, "{}", length),
      Self::Auto => write!(f, "auto"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn length_unit_classification() {
    assert!(LengthUnit::Px.is_absolute());
    assert!(LengthUnit::Q.is_absolute());
    assert!(LengthUnit::Em.is_font_relative());
    assert!(LengthUnit::Rem.is_font_relative());
    assert!(LengthUnit::Vw.is_viewport_relative());
    assert!(LengthUnit::Percent.is_percentage());
  }

  #[test]
  fn length_unit_parse_round_trips() {
    for unit in [
      LengthUnit::Px,
      LengthUnit::Pt,
      LengthUnit::Em,
      LengthUnit::Rem,
      LengthUnit::Vmin,
    ] {
      assert_eq!(LengthUnit::parse(unit.as_str()), Some(unit));
    }
    assert_eq!(LengthUnit::parse("furlong"), None);
  }

  #[test]
  fn absolute_conversions() {
    assert_eq!(Length::new(1.0, LengthUnit::In).to_px(), 96.0);
    assert!((Length::new(72.0, LengthUnit::Pt).to_px() - 96.0).abs() < 0.01);
    assert_eq!(Length::new(1.0, LengthUnit::Pc).to_px(), 16.0);
    assert!((Length::new(2.54, LengthUnit::Cm).to_px() - 96.0).abs() < 0.1);
  }

  #[test]
  fn percentage_resolution() {
    assert_eq!(Length::percent(50.0).resolve_against(200.0), Some(100.0));
    assert_eq!(Length::em(2.0).resolve_against(100.0), None);
  }

  #[test]
  fn font_size_resolution() {
    assert_eq!(Length::em(2.0).resolve_with_font_size(16.0), Some(32.0));
    assert_eq!(Length::rem(1.5).resolve_with_font_size(16.0), Some(24.0));
    assert_eq!(
      Length::new(2.0, LengthUnit::Ex).resolve_with_font_size(16.0),
      Some(16.0)
    );
  }

  #[test]
  fn calc_length_resolves_with_context() {
    let expr = crate::calc::parse_str("50% - 10px").expect("parses");
    let length = Length::from_calc(expr, ValueRange::All);
    assert!(length.has_percentage());
    let ctx = CalcLengthContext {
      percentage_base: Some(200.0),
      ..Default::default()
    };
    assert_eq!(length.resolve_with_context(&ctx), Some(90.0));
    // No base: percent term cannot resolve.
    assert_eq!(length.resolve_with_context(&CalcLengthContext::default()), None);
  }

  #[test]
  fn calc_length_applies_owner_range() {
    let expr = crate::calc::parse_str("10px - 50px").expect("parses");
    let length = Length::from_calc(expr, ValueRange::NonNegative);
    assert_eq!(
      length.resolve_with_context(&CalcLengthContext::default()),
      Some(0.0)
    );
  }

  #[test]
  fn auto_behaves_like_keyword() {
    assert!(LengthOrAuto::Auto.is_auto());
    assert_eq!(LengthOrAuto::Auto.resolve_against(100.0), None);
    assert_eq!(LengthOrAuto::px(75.0).resolve_against(200.0), Some(75.0));
    assert_eq!(format!("{}", LengthOrAuto::Auto), "auto");
  }
}

//! Font description and finalization
//!
//! Font-affecting properties mutate a nested [`FontDescription`] rather than
//! the style record directly; the cascade then runs one finalization step
//! ([`update_font`]) before any property that depends on font metrics is
//! applied. Finalization resolves keyword sizes, relative (`smaller`/
//! `larger`) sizes, the monospace size remap, zoom, and the document's
//! minimum font size.

use crate::calc::CalcLengthContext;
use crate::style::values::Length;
use std::sync::Arc;

/// Generic font families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenericFamily {
  Serif,
  SansSerif,
  Monospace,
  Cursive,
  Fantasy,
}

impl GenericFamily {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "serif" => Self::Serif,
      "sans-serif" => Self::SansSerif,
      "monospace" => Self::Monospace,
      "cursive" => Self::Cursive,
      "fantasy" => Self::Fantasy,
      _ => return None,
    })
  }
}

/// One entry of a `font-family` list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontFamily {
  Named(Arc<str>),
  Generic(GenericFamily),
}

/// Keyword font sizes, `xx-small` through `xx-large`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSizeKeyword {
  XxSmall,
  XSmall,
  Small,
  Medium,
  Large,
  XLarge,
  XxLarge,
}

impl FontSizeKeyword {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "xx-small" => Self::XxSmall,
      "x-small" => Self::XSmall,
      "small" => Self::Small,
      "medium" => Self::Medium,
      "large" => Self::Large,
      "x-large" => Self::XLarge,
      "xx-large" => Self::XxLarge,
      _ => return None,
    })
  }

  fn index(self) -> usize {
    match self {
      Self::XxSmall => 0,
      Self::XSmall => 1,
      Self::Small => 2,
      Self::Medium => 3,
      Self::Large => 4,
      Self::XLarge => 5,
      Self::XxLarge => 6,
    }
  }
}

/// Size table for a 16px `medium`
const KEYWORD_SIZES: [f32; 7] = [9.0, 10.0, 13.0, 16.0, 18.0, 24.0, 32.0];

/// Size table for a 13px monospace `medium` — the generic-family-driven
/// size remap
const KEYWORD_SIZES_MONOSPACE: [f32; 7] = [7.0, 8.0, 10.0, 13.0, 15.0, 20.0, 26.0];

/// Step ratio for `smaller`/`larger`
const RELATIVE_SIZE_STEP: f32 = 1.2;

/// How the author specified font-size, kept so finalization can recompute
/// the used size when family or zoom changes.
#[derive(Debug, Clone, PartialEq)]
pub enum FontSizeSpec {
  Keyword(FontSizeKeyword),
  Smaller,
  Larger,
  /// Pre-zoom pixel value resolved from a length at apply time
  Px(f32),
  /// Length still needing the parent font size (em/ex/percent)
  Length(Length),
}

/// `font-style`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStyle {
  #[default]
  Normal,
  Italic,
  Oblique,
}

impl FontStyle {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "normal" => Self::Normal,
      "italic" => Self::Italic,
      "oblique" => Self::Oblique,
      _ => return None,
    })
  }
}

/// `font-variant-caps` (the CSS 2.1 `font-variant` subset)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontVariantCaps {
  #[default]
  Normal,
  SmallCaps,
}

impl FontVariantCaps {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "normal" => Self::Normal,
      "small-caps" => Self::SmallCaps,
      _ => return None,
    })
  }
}

/// `font-stretch` keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStretch {
  UltraCondensed,
  ExtraCondensed,
  Condensed,
  SemiCondensed,
  #[default]
  Normal,
  SemiExpanded,
  Expanded,
  ExtraExpanded,
  UltraExpanded,
}

impl FontStretch {
  pub fn parse(keyword: &str) -> Option<Self> {
    Some(match keyword {
      "ultra-condensed" => Self::UltraCondensed,
      "extra-condensed" => Self::ExtraCondensed,
      "condensed" => Self::Condensed,
      "semi-condensed" => Self::SemiCondensed,
      "normal" => Self::Normal,
      "semi-expanded" => Self::SemiExpanded,
      "expanded" => Self::Expanded,
      "extra-expanded" => Self::ExtraExpanded,
      "ultra-expanded" => Self::UltraExpanded,
      _ => return None,
    })
  }
}

/// `font-weight` as a numeric weight (100–900)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontWeight(pub u16);

impl FontWeight {
  pub const NORMAL: Self = Self(400);
  pub const BOLD: Self = Self(700);

  pub fn parse_keyword(keyword: &str, parent: FontWeight) -> Option<Self> {
    Some(match keyword {
      "normal" => Self::NORMAL,
      "bold" => Self::BOLD,
      "bolder" => parent.bolder(),
      "lighter" => parent.lighter(),
      _ => return None,
    })
  }

  /// CSS relative-weight mapping
  pub fn bolder(self) -> Self {
    match self.0 {
      0..=349 => Self(400),
      350..=549 => Self(700),
      _ => Self(900),
    }
  }

  pub fn lighter(self) -> Self {
    match self.0 {
      0..=549 => Self(100),
      550..=749 => Self(400),
      _ => Self(700),
    }
  }
}

impl Default for FontWeight {
  fn default() -> Self {
    Self::NORMAL
  }
}

/// The nested font value type that font sub-properties mutate.
///
/// `computed_size` is the finalized, zoomed, minimum-clamped pixel size;
/// everything else is the specified state finalization works from.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescription {
  pub families: Vec<FontFamily>,
  pub specified_size: FontSizeSpec,
  pub computed_size: f32,
  pub weight: FontWeight,
  pub style: FontStyle,
  pub variant_caps: FontVariantCaps,
  pub stretch: FontStretch,
}

pub const DEFAULT_FONT_SIZE: f32 = 16.0;

impl Default for FontDescription {
  fn default() -> Self {
    Self {
      families: vec![FontFamily::Generic(GenericFamily::Serif)],
      specified_size: FontSizeSpec::Keyword(FontSizeKeyword::Medium),
      computed_size: DEFAULT_FONT_SIZE,
      weight: FontWeight::NORMAL,
      style: FontStyle::Normal,
      variant_caps: FontVariantCaps::Normal,
      stretch: FontStretch::Normal,
    }
  }
}

impl FontDescription {
  /// First family is a generic monospace; drives the keyword size remap.
  pub fn uses_monospace(&self) -> bool {
    matches!(
      self.families.first(),
      Some(FontFamily::Generic(GenericFamily::Monospace))
    )
  }
}

/// Metrics supplied by the external font provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontMetrics {
  /// x-height in pixels
  pub x_height: Option<f32>,
  /// Advance of '0' in pixels
  pub zero_advance: Option<f32>,
}

/// External collaborator that shapes a description into metric data.
///
/// Consumed by calc length evaluation (`ex`/`ch`) and by anything needing
/// real glyph geometry. Implementations must not block.
pub trait FontProvider {
  fn metrics(&self, description: &FontDescription) -> FontMetrics;
}

/// Provider used when no platform fonts are wired up: every metric falls
/// back to the 0.5em approximation.
#[derive(Debug, Default)]
pub struct ApproximateFontProvider;

impl FontProvider for ApproximateFontProvider {
  fn metrics(&self, _description: &FontDescription) -> FontMetrics {
    FontMetrics::default()
  }
}

/// Resolves a keyword size against the right table.
pub fn font_size_for_keyword(keyword: FontSizeKeyword, monospace: bool) -> f32 {
  if monospace {
    KEYWORD_SIZES_MONOSPACE[keyword.index()]
  } else {
    KEYWORD_SIZES[keyword.index()]
  }
}

/// Computes the finalized pixel size for a description.
///
/// `parent_size` is the parent's computed (zoomed) size; `zoom` is the
/// element's effective zoom; `minimum` the document floor.
pub fn finalize_font_size(
  description: &FontDescription,
  parent_size: f32,
  zoom: f32,
  minimum: f32,
) -> f32 {
  let monospace = description.uses_monospace();
  let unzoomed = match &description.specified_size {
    FontSizeSpec::Keyword(keyword) => font_size_for_keyword(*keyword, monospace),
    FontSizeSpec::Smaller => parent_size / zoom / RELATIVE_SIZE_STEP,
    FontSizeSpec::Larger => parent_size / zoom * RELATIVE_SIZE_STEP,
    FontSizeSpec::Px(px) => *px,
    FontSizeSpec::Length(length) => {
      // em/ex/percent (and calc over them) resolve against the parent's
      // unzoomed size.
      let base = parent_size / zoom.max(f32::MIN_POSITIVE);
      let ctx = CalcLengthContext {
        percentage_base: Some(base as f64),
        font_size: base as f64,
        root_font_size: base as f64,
        ..Default::default()
      };
      length.resolve_with_context(&ctx).unwrap_or(base)
    }
  };
  (unzoomed * zoom).max(minimum)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn keyword_table_medium_is_default() {
    assert_eq!(
      font_size_for_keyword(FontSizeKeyword::Medium, false),
      DEFAULT_FONT_SIZE
    );
  }

  #[test]
  fn monospace_remaps_keyword_sizes() {
    assert_eq!(font_size_for_keyword(FontSizeKeyword::Medium, true), 13.0);
    assert_eq!(font_size_for_keyword(FontSizeKeyword::Large, true), 15.0);
  }

  #[test]
  fn smaller_and_larger_step_from_parent() {
    let mut description = FontDescription::default();
    description.specified_size = FontSizeSpec::Larger;
    let size = finalize_font_size(&description, 20.0, 1.0, 0.0);
    assert!((size - 24.0).abs() < 0.01);

    description.specified_size = FontSizeSpec::Smaller;
    let size = finalize_font_size(&description, 24.0, 1.0, 0.0);
    assert!((size - 20.0).abs() < 0.01);
  }

  #[test]
  fn zoom_scales_and_minimum_clamps() {
    let mut description = FontDescription::default();
    description.specified_size = FontSizeSpec::Px(10.0);
    assert_eq!(finalize_font_size(&description, 16.0, 2.0, 0.0), 20.0);
    assert_eq!(finalize_font_size(&description, 16.0, 1.0, 12.0), 12.0);
  }

  #[test]
  fn weight_relative_mapping() {
    assert_eq!(FontWeight(400).bolder(), FontWeight(700));
    assert_eq!(FontWeight(700).bolder(), FontWeight(900));
    assert_eq!(FontWeight(100).bolder(), FontWeight(400));
    assert_eq!(FontWeight(400).lighter(), FontWeight(100));
    assert_eq!(FontWeight(900).lighter(), FontWeight(700));
  }
}

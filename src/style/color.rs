//! Color types for CSS colors
//!
//! The cascade engine consumes colors already parsed by the external CSS
//! parser, so this module only carries the computed representation: an RGBA
//! quad plus the helpers the cascade and the animation interpolator need
//! (channel interpolation, common constants).

use std::fmt;

/// RGBA color representation
///
/// - R, G, B: 0-255 (stored as u8)
/// - A: 0.0-1.0 (stored as f32, where 0.0 is fully transparent)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
  /// Red component (0-255)
  pub r: u8,
  /// Green component (0-255)
  pub g: u8,
  /// Blue component (0-255)
  pub b: u8,
  /// Alpha component (0.0-1.0)
  pub a: f32,
}

impl Rgba {
  /// Fully transparent black
  pub const TRANSPARENT: Self = Self {
    r: 0,
    g: 0,
    b: 0,
    a: 0.0,
  };

  /// Opaque black
  pub const BLACK: Self = Self {
    r: 0,
    g: 0,
    b: 0,
    a: 1.0,
  };

  /// Opaque white
  pub const WHITE: Self = Self {
    r: 255,
    g: 255,
    b: 255,
    a: 1.0,
  };

  pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
    Self { r, g, b, a }
  }

  /// Opaque color from RGB components
  pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
    Self { r, g, b, a: 1.0 }
  }

  pub fn is_transparent(&self) -> bool {
    self.a == 0.0
  }

  /// Channel-wise linear interpolation toward `other`.
  ///
  /// `t` is clamped to [0, 1]; alpha interpolates in floating point.
  pub fn lerp(&self, other: Rgba, t: f32) -> Rgba {
    let t = t.clamp(0.0, 1.0);
    let chan = |a: u8, b: u8| -> u8 {
      (a as f32 + (b as f32 - a as f32) * t).round().clamp(0.0, 255.0) as u8
    };
    Rgba {
      r: chan(self.r, other.r),
      g: chan(self.g, other.g),
      b: chan(self.b, other.b),
      a: self.a + (other.a - self.a) * t,
    }
  }
}

impl Default for Rgba {
  fn default() -> Self {
    Self::BLACK
  }
}

impl fmt::Display for Rgba {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.a >= 1.0 {
      write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    } else {
      write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lerp_endpoints_are_exact() {
    let a = Rgba::rgb(0, 0, 0);
    let b = Rgba::rgb(255, 128, 64);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
  }

  #[test]
  fn lerp_midpoint_rounds_channels() {
    let a = Rgba::rgb(0, 0, 0);
    let b = Rgba::rgb(255, 100, 50);
    let mid = a.lerp(b, 0.5);
    assert_eq!(mid.r, 128);
    assert_eq!(mid.g, 50);
    assert_eq!(mid.b, 25);
  }

  #[test]
  fn lerp_interpolates_alpha() {
    let a = Rgba::new(10, 10, 10, 0.0);
    let b = Rgba::new(10, 10, 10, 1.0);
    assert!((a.lerp(b, 0.25).a - 0.25).abs() < 1e-6);
  }

  #[test]
  fn display_formats() {
    assert_eq!(format!("{}", Rgba::rgb(1, 2, 3)), "rgb(1, 2, 3)");
    assert_eq!(
      format!("{}", Rgba::new(1, 2, 3, 0.5)),
      "rgba(1, 2, 3, 0.5)"
    );
  }
}

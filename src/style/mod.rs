//! Style system
//!
//! Cascade resolution and computed values: the property strategy table, the
//! cascade engine with its matched-properties and style-sharing fast paths,
//! and the value model the two operate on.

pub mod cache;
pub mod cascade;
pub mod color;
pub mod computed;
pub mod declaration;
pub mod fonts;
pub mod properties;
pub mod sharing;
pub mod types;
pub mod values;
pub mod variables;

pub use cascade::{Keyframe, KeyframesRule, ResourceLoader, ResourceStatus, StyleEngine};
pub use color::Rgba;
pub use computed::{ComputedStyle, InheritedStyle, LineHeight, VisitedLinkColors};
pub use declaration::{
  Declaration, DeclarationBlock, MatchResult, MatchedBlock, Origin, PropertyName, PropertyValue,
  PropertyWhitelist,
};
pub use fonts::{FontDescription, FontMetrics, FontProvider};
pub use properties::{PropertyId, StrategyTable};
pub use values::{Length, LengthOrAuto, LengthUnit};

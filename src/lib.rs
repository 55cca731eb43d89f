//! faststyle — CSS cascade resolution and computed-value engine
//!
//! Resolves the effective style property values for a tree element from its
//! matched declaration blocks, its inherited parent style, and per-property
//! cascade semantics, then optionally interpolates between two resolved
//! styles for animation playback.
//!
//! Selector matching, CSS text parsing, resource loading and the DOM tree
//! are external collaborators consumed through the narrow contracts in
//! [`dom`] and [`style::cascade`].

pub mod animation;
pub mod calc;
pub mod dom;
pub mod error;
pub mod style;

pub use error::{CalcError, Error, Result, StyleError};
pub use style::{
  ComputedStyle, Declaration, DeclarationBlock, Length, LengthOrAuto, LengthUnit, MatchResult,
  PropertyId, PropertyValue, Rgba, StyleEngine,
};

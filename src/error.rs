//! Error types for faststyle
//!
//! Declaration-level failures (malformed `calc()`, unresolvable variable
//! chains, unknown keywords) are *not* errors: per CSS error-recovery rules
//! the declaration is silently dropped and the cascade proceeds. The enums
//! here cover contract misuse that callers can detect and report, using the
//! `thiserror` crate for minimal boilerplate.

use thiserror::Error;

/// Result type alias for faststyle operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type
#[derive(Error, Debug)]
pub enum Error {
  /// calc() expression error
  #[error("Calc error: {0}")]
  Calc(#[from] CalcError),

  /// Style system error
  #[error("Style error: {0}")]
  Style(#[from] StyleError),
}

/// Errors produced while parsing a `calc()` token stream.
///
/// `calc::parse` folds these into `None` (the declaration is dropped);
/// `calc::parse_checked` surfaces them for diagnostics and tests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
  /// Nesting exceeded the fixed recursion bound
  #[error("Expression nesting exceeds depth limit")]
  DepthLimitExceeded,

  /// The stream ended in the middle of an expression
  #[error("Unexpected end of expression")]
  UnexpectedEnd,

  /// A token appeared where the grammar does not allow it
  #[error("Unexpected token at position {0}")]
  UnexpectedToken(usize),

  /// Operand categories cannot be combined by the requested operator
  #[error("Invalid unit category combination")]
  InvalidCategory,
}

/// Errors in the style system proper
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
  /// A property name that no known `PropertyId` maps to
  #[error("Unknown property: {0}")]
  UnknownProperty(String),

  /// Match result blocks were appended out of origin order
  #[error("Match result origins must be grouped UA, user, author")]
  UnorderedMatchResult,
}

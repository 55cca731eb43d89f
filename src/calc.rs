//! CSS `calc()` expression trees
//!
//! This module parses and evaluates the arithmetic expressions that appear
//! inside `calc()`. Expressions are immutable trees of primitive values and
//! binary operations; each node carries a *calculation category* that is
//! computed once at construction and never changes.
//!
//! Grammar (highest to lowest binding):
//!
//! ```text
//! additive       := multiplicative (( '+' | '-' ) multiplicative)*
//! multiplicative := term (( '*' | '/' ) term)*
//! term           := '(' additive ')' | primitive
//! ```
//!
//! Category combination follows the CSS Values rules: `+`/`-` combine via a
//! fixed table over {number, length, percent, percent-number,
//! percent-length}; `*` requires one number operand; `/` requires a number
//! divisor. A division whose divisor evaluates to zero yields NaN at
//! evaluation time, never a parse failure; callers treat NaN as "no usable
//! value".
//!
//! Reference: CSS Values and Units Module Level 3
//! <https://www.w3.org/TR/css-values-3/#calc-notation>

use crate::error::CalcError;
use crate::style::values::LengthUnit;
use lru::LruCache;
use rustc_hash::{FxBuildHasher, FxHasher};
use std::cell::RefCell;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Maximum expression nesting depth accepted by the parser.
///
/// Streams nesting deeper than this fail to parse; per cascade error policy
/// the owning declaration is dropped.
pub const MAX_EXPRESSION_DEPTH: usize = 100;

/// One token of a `calc()` expression stream.
///
/// Token streams are normally produced by the external CSS tokenizer; the
/// [`parse_str`] convenience lexes a raw expression string with `cssparser`
/// for callers (and tests) that start from text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalcToken {
  /// A unitless number
  Number(f64),
  /// A percentage; `50.0` means `50%`
  Percentage(f64),
  /// A dimension: value plus length unit
  Dimension(f64, LengthUnit),
  /// One of `+ - * /`
  Operator(CalcOperator),
  /// `(` — also produced for a nested `calc(` function boundary
  OpenParen,
  /// `)`
  CloseParen,
}

/// Arithmetic operator inside a `calc()` expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcOperator {
  Add,
  Subtract,
  Multiply,
  Divide,
}

impl CalcOperator {
  fn apply(self, left: f64, right: f64) -> f64 {
    match self {
      Self::Add => left + right,
      Self::Subtract => left - right,
      Self::Multiply => left * right,
      // Division by zero is NaN, not an infinity: downstream consumers
      // treat NaN as "no usable value".
      Self::Divide => {
        if right == 0.0 {
          f64::NAN
        } else {
          left / right
        }
      }
    }
  }
}

/// Calculation category of an expression node.
///
/// The category is fixed at construction. `Invalid` marks combinations the
/// category table rejects (e.g. length × length); a parse that produces an
/// `Invalid` root is reported as failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcCategory {
  Number,
  Length,
  Percent,
  PercentNumber,
  PercentLength,
  Invalid,
}

/// Category combination for `+` and `-`.
///
/// The table is symmetric: swapping the operands of an addition never
/// changes the result category.
fn add_subtract_category(a: CalcCategory, b: CalcCategory) -> CalcCategory {
  use CalcCategory::*;
  match (a, b) {
    (Number, Number) => Number,
    (Length, Length) => Length,
    (Percent, Percent) => Percent,
    (Number, Percent) | (Percent, Number) => PercentNumber,
    (Number, PercentNumber) | (PercentNumber, Number) => PercentNumber,
    (Percent, PercentNumber) | (PercentNumber, Percent) => PercentNumber,
    (Length, Percent) | (Percent, Length) => PercentLength,
    (Length, PercentLength) | (PercentLength, Length) => PercentLength,
    (Percent, PercentLength) | (PercentLength, Percent) => PercentLength,
    _ => Invalid,
  }
}

fn multiply_category(a: CalcCategory, b: CalcCategory) -> CalcCategory {
  use CalcCategory::*;
  match (a, b) {
    (Invalid, _) | (_, Invalid) => Invalid,
    (Number, other) => other,
    (other, Number) => other,
    _ => Invalid,
  }
}

fn divide_category(left: CalcCategory, right: CalcCategory) -> CalcCategory {
  if left == CalcCategory::Invalid || right != CalcCategory::Number {
    CalcCategory::Invalid
  } else {
    left
  }
}

/// Unit attached to a primitive expression value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalcUnit {
  Number,
  Percent,
  Length(LengthUnit),
}

impl CalcUnit {
  fn category(self) -> CalcCategory {
    match self {
      Self::Number => CalcCategory::Number,
      Self::Percent => CalcCategory::Percent,
      Self::Length(_) => CalcCategory::Length,
    }
  }
}

/// Immutable node of a calculation tree.
///
/// Nodes are shared via `Arc` because the same parsed value may be queried
/// several times (evaluation, equality, serialization); equality is purely
/// structural.
#[derive(Debug, Clone, PartialEq)]
pub enum CalcNode {
  Value {
    value: f64,
    unit: CalcUnit,
  },
  Operation {
    op: CalcOperator,
    left: Arc<CalcNode>,
    right: Arc<CalcNode>,
    category: CalcCategory,
  },
}

impl CalcNode {
  pub fn category(&self) -> CalcCategory {
    match self {
      Self::Value { unit, .. } => unit.category(),
      Self::Operation { category, .. } => *category,
    }
  }

  fn operation(op: CalcOperator, left: Arc<CalcNode>, right: Arc<CalcNode>) -> CalcNode {
    let category = match op {
      CalcOperator::Add | CalcOperator::Subtract => {
        add_subtract_category(left.category(), right.category())
      }
      CalcOperator::Multiply => multiply_category(left.category(), right.category()),
      CalcOperator::Divide => divide_category(left.category(), right.category()),
    };
    CalcNode::Operation {
      op,
      left,
      right,
      category,
    }
  }
}

/// A parsed `calc()` expression: the root node plus its category.
#[derive(Debug, Clone, PartialEq)]
pub struct CalcExpr {
  root: Arc<CalcNode>,
  category: CalcCategory,
}

impl CalcExpr {
  pub fn root(&self) -> &CalcNode {
    &self.root
  }

  pub fn category(&self) -> CalcCategory {
    self.category
  }

  /// True when evaluation needs a percentage base to produce a length.
  pub fn has_percentage(&self) -> bool {
    matches!(
      self.category,
      CalcCategory::Percent | CalcCategory::PercentNumber | CalcCategory::PercentLength
    )
  }
}

/// Range policy applied by the property that owns a value.
///
/// The policy belongs to the owner, not to the expression node: the same
/// tree may be clamped by one property and left signed by another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueRange {
  #[default]
  All,
  NonNegative,
}

impl ValueRange {
  pub fn clamp(self, value: f64) -> f64 {
    match self {
      Self::All => value,
      // NaN stays NaN so "no usable value" survives the clamp.
      Self::NonNegative => {
        if value < 0.0 {
          0.0
        } else {
          value
        }
      }
    }
  }
}

/// Context for resolving an expression to a pixel length.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalcLengthContext {
  /// Base for percentage terms; a percent term with no base evaluates to NaN
  pub percentage_base: Option<f64>,
  /// Current font size in pixels (em)
  pub font_size: f64,
  /// Root element font size in pixels (rem)
  pub root_font_size: f64,
  pub viewport_width: f64,
  pub viewport_height: f64,
  /// x-height in pixels; `ex` falls back to 0.5em when absent
  pub x_height: Option<f64>,
  /// Advance of '0' in pixels; `ch` falls back to 0.5em when absent
  pub zero_advance: Option<f64>,
}

/// Parses a token stream into an expression tree.
///
/// Returns `None` on any malformation: unknown tokens, truncated input,
/// nesting beyond [`MAX_EXPRESSION_DEPTH`], or an operand combination the
/// category tables reject. Callers drop the owning declaration.
pub fn parse(tokens: &[CalcToken]) -> Option<CalcExpr> {
  parse_checked(tokens).ok()
}

/// Like [`parse`] but reports the reason a stream was rejected.
pub fn parse_checked(tokens: &[CalcToken]) -> std::result::Result<CalcExpr, CalcError> {
  let mut cursor = TokenCursor { tokens, pos: 0 };
  let root = parse_additive(&mut cursor, 0)?;
  if cursor.pos != tokens.len() {
    return Err(CalcError::UnexpectedToken(cursor.pos));
  }
  let category = root.category();
  if category == CalcCategory::Invalid {
    return Err(CalcError::InvalidCategory);
  }
  Ok(CalcExpr {
    root: Arc::new(root),
    category,
  })
}

struct TokenCursor<'a> {
  tokens: &'a [CalcToken],
  pos: usize,
}

impl<'a> TokenCursor<'a> {
  fn peek(&self) -> Option<CalcToken> {
    self.tokens.get(self.pos).copied()
  }

  fn advance(&mut self) {
    self.pos += 1;
  }
}

fn parse_additive(cursor: &mut TokenCursor<'_>, depth: usize) -> std::result::Result<CalcNode, CalcError> {
  if depth > MAX_EXPRESSION_DEPTH {
    return Err(CalcError::DepthLimitExceeded);
  }
  let mut node = parse_multiplicative(cursor, depth + 1)?;
  while let Some(CalcToken::Operator(op @ (CalcOperator::Add | CalcOperator::Subtract))) =
    cursor.peek()
  {
    cursor.advance();
    let right = parse_multiplicative(cursor, depth + 1)?;
    node = CalcNode::operation(op, Arc::new(node), Arc::new(right));
  }
  Ok(node)
}

fn parse_multiplicative(
  cursor: &mut TokenCursor<'_>,
  depth: usize,
) -> std::result::Result<CalcNode, CalcError> {
  if depth > MAX_EXPRESSION_DEPTH {
    return Err(CalcError::DepthLimitExceeded);
  }
  let mut node = parse_term(cursor, depth + 1)?;
  while let Some(CalcToken::Operator(op @ (CalcOperator::Multiply | CalcOperator::Divide))) =
    cursor.peek()
  {
    cursor.advance();
    let right = parse_term(cursor, depth + 1)?;
    node = CalcNode::operation(op, Arc::new(node), Arc::new(right));
  }
  Ok(node)
}

fn parse_term(cursor: &mut TokenCursor<'_>, depth: usize) -> std::result::Result<CalcNode, CalcError> {
  if depth > MAX_EXPRESSION_DEPTH {
    return Err(CalcError::DepthLimitExceeded);
  }
  match cursor.peek() {
    Some(CalcToken::OpenParen) => {
      cursor.advance();
      let inner = parse_additive(cursor, depth + 1)?;
      match cursor.peek() {
        Some(CalcToken::CloseParen) => {
          cursor.advance();
          Ok(inner)
        }
        Some(_) => Err(CalcError::UnexpectedToken(cursor.pos)),
        None => Err(CalcError::UnexpectedEnd),
      }
    }
    Some(CalcToken::Number(value)) => {
      cursor.advance();
      Ok(CalcNode::Value {
        value,
        unit: CalcUnit::Number,
      })
    }
    Some(CalcToken::Percentage(value)) => {
      cursor.advance();
      Ok(CalcNode::Value {
        value,
        unit: CalcUnit::Percent,
      })
    }
    Some(CalcToken::Dimension(value, unit)) => {
      cursor.advance();
      Ok(CalcNode::Value {
        value,
        unit: CalcUnit::Length(unit),
      })
    }
    Some(_) => Err(CalcError::UnexpectedToken(cursor.pos)),
    None => Err(CalcError::UnexpectedEnd),
  }
}

/// Evaluates an expression of category number or percent to a plain double.
///
/// Percentages contribute their numeric value (`50%` evaluates to 50).
/// Only legal for the categories {number, percent, percent-number}; length
/// terms contribute NaN.
pub fn evaluate_numeric(expr: &CalcExpr) -> f64 {
  debug_assert!(
    matches!(
      expr.category(),
      CalcCategory::Number | CalcCategory::Percent | CalcCategory::PercentNumber
    ),
    "evaluate_numeric on non-numeric category"
  );
  evaluate_node_numeric(expr.root())
}

fn evaluate_node_numeric(node: &CalcNode) -> f64 {
  match node {
    CalcNode::Value { value, unit } => match unit {
      CalcUnit::Number | CalcUnit::Percent => *value,
      CalcUnit::Length(_) => f64::NAN,
    },
    CalcNode::Operation { op, left, right, .. } => {
      op.apply(evaluate_node_numeric(left), evaluate_node_numeric(right))
    }
  }
}

/// Evaluates an expression to a pixel length.
///
/// Absolute units convert directly; font-relative units resolve through the
/// context's font metrics; percentages resolve against
/// `ctx.percentage_base`, yielding NaN when no base is available. Division
/// by a runtime zero yields NaN rather than an error.
pub fn evaluate_as_length(expr: &CalcExpr, ctx: &CalcLengthContext) -> f64 {
  evaluate_node_length(expr.root(), ctx)
}

fn evaluate_node_length(node: &CalcNode, ctx: &CalcLengthContext) -> f64 {
  match node {
    CalcNode::Value { value, unit } => match unit {
      CalcUnit::Number => *value,
      CalcUnit::Percent => match ctx.percentage_base {
        Some(base) => value / 100.0 * base,
        None => f64::NAN,
      },
      CalcUnit::Length(length_unit) => resolve_length_unit(*value, *length_unit, ctx),
    },
    CalcNode::Operation { op, left, right, .. } => op.apply(
      evaluate_node_length(left, ctx),
      evaluate_node_length(right, ctx),
    ),
  }
}

fn resolve_length_unit(value: f64, unit: LengthUnit, ctx: &CalcLengthContext) -> f64 {
  match unit {
    LengthUnit::Px => value,
    LengthUnit::Pt => value * (96.0 / 72.0),
    LengthUnit::Pc => value * 16.0,
    LengthUnit::In => value * 96.0,
    LengthUnit::Cm => value * (96.0 / 2.54),
    LengthUnit::Mm => value * (96.0 / 25.4),
    LengthUnit::Q => value * (96.0 / 101.6),
    LengthUnit::Em => value * ctx.font_size,
    LengthUnit::Rem => value * ctx.root_font_size,
    LengthUnit::Ex => value * ctx.x_height.unwrap_or(ctx.font_size * 0.5),
    LengthUnit::Ch => value * ctx.zero_advance.unwrap_or(ctx.font_size * 0.5),
    LengthUnit::Vw => value / 100.0 * ctx.viewport_width,
    LengthUnit::Vh => value / 100.0 * ctx.viewport_height,
    LengthUnit::Vmin => value / 100.0 * ctx.viewport_width.min(ctx.viewport_height),
    LengthUnit::Vmax => value / 100.0 * ctx.viewport_width.max(ctx.viewport_height),
    // Percent and Calc never reach here: percentages lex to their own token
    // and nested calc flattens into the tree.
    LengthUnit::Percent | LengthUnit::Calc => f64::NAN,
  }
}

// ---------------------------------------------------------------------------
// Parse memoization
//
// Stylesheets repeat the same calc() text on many declarations. A small
// per-thread LRU keyed by a token-stream fingerprint lets repeated
// resolutions reuse one parse.

const PARSED_CALC_CACHE_CAPACITY: usize = 2048;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
struct CalcCacheKey {
  stream_hash: u64,
  len: u32,
}

fn fingerprint(tokens: &[CalcToken]) -> CalcCacheKey {
  let mut hasher = FxHasher::default();
  for token in tokens {
    std::mem::discriminant(token).hash(&mut hasher);
    match token {
      CalcToken::Number(v) | CalcToken::Percentage(v) => hasher.write_u64(v.to_bits()),
      CalcToken::Dimension(v, unit) => {
        hasher.write_u64(v.to_bits());
        hasher.write_u8(*unit as u8);
      }
      CalcToken::Operator(op) => hasher.write_u8(*op as u8),
      CalcToken::OpenParen | CalcToken::CloseParen => {}
    }
  }
  CalcCacheKey {
    stream_hash: hasher.finish(),
    len: tokens.len().min(u32::MAX as usize) as u32,
  }
}

type ParsedCalcCache = LruCache<CalcCacheKey, Option<CalcExpr>, FxBuildHasher>;

fn new_cache() -> ParsedCalcCache {
  let cap = NonZeroUsize::new(PARSED_CALC_CACHE_CAPACITY)
    .expect("calc parse cache capacity must be non-zero");
  ParsedCalcCache::with_hasher(cap, FxBuildHasher::default())
}

thread_local! {
  static PARSED_CALC_CACHE: RefCell<ParsedCalcCache> = RefCell::new(new_cache());
}

/// Memoized [`parse`]. Failed parses are cached too so hostile stylesheets
/// cannot force repeated re-parsing of the same bad stream.
pub fn parse_cached(tokens: &[CalcToken]) -> Option<CalcExpr> {
  let key = fingerprint(tokens);
  if let Some(cached) = PARSED_CALC_CACHE.with(|cache| cache.borrow_mut().get(&key).cloned()) {
    return cached;
  }
  let parsed = parse(tokens);
  PARSED_CALC_CACHE.with(|cache| {
    cache.borrow_mut().put(key, parsed.clone());
  });
  parsed
}

// ---------------------------------------------------------------------------
// Text entry point

/// Lexes a raw expression string (the inside of `calc(...)`, or the whole
/// function) into a token stream.
///
/// Unknown units or tokens fail the lex; nested `calc()` flattens into
/// parentheses.
pub fn tokenize_str(text: &str) -> Option<Vec<CalcToken>> {
  let mut input = cssparser::ParserInput::new(text);
  let mut parser = cssparser::Parser::new(&mut input);
  let mut tokens = Vec::new();
  collect_tokens(&mut parser, &mut tokens).ok()?;
  Some(tokens)
}

/// Parses a raw expression string, through the memo cache.
pub fn parse_str(text: &str) -> Option<CalcExpr> {
  let tokens = tokenize_str(text)?;
  parse_cached(&tokens)
}

fn collect_tokens<'i>(
  parser: &mut cssparser::Parser<'i, '_>,
  out: &mut Vec<CalcToken>,
) -> std::result::Result<(), cssparser::ParseError<'i, ()>> {
  loop {
    let token = match parser.next_including_whitespace() {
      Ok(token) => token.clone(),
      Err(_) => return Ok(()),
    };
    match token {
      cssparser::Token::WhiteSpace(_) => {}
      cssparser::Token::Number { value, .. } => out.push(CalcToken::Number(value as f64)),
      cssparser::Token::Percentage { unit_value, .. } => {
        out.push(CalcToken::Percentage(unit_value as f64 * 100.0));
      }
      cssparser::Token::Dimension { value, ref unit, .. } => {
        let unit = LengthUnit::parse(unit).ok_or_else(|| {
          parser.new_custom_error::<(), ()>(())
        })?;
        out.push(CalcToken::Dimension(value as f64, unit));
      }
      cssparser::Token::Delim(c) => {
        let op = match c {
          '+' => CalcOperator::Add,
          '-' => CalcOperator::Subtract,
          '*' => CalcOperator::Multiply,
          '/' => CalcOperator::Divide,
          _ => return Err(parser.new_custom_error(())),
        };
        out.push(CalcToken::Operator(op));
      }
      cssparser::Token::ParenthesisBlock => {
        out.push(CalcToken::OpenParen);
        parser.parse_nested_block(|parser| collect_tokens(parser, out))?;
        out.push(CalcToken::CloseParen);
      }
      cssparser::Token::Function(ref name) if name.eq_ignore_ascii_case("calc") => {
        out.push(CalcToken::OpenParen);
        parser.parse_nested_block(|parser| collect_tokens(parser, out))?;
        out.push(CalcToken::CloseParen);
      }
      _ => return Err(parser.new_custom_error(())),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn px(v: f64) -> CalcToken {
    CalcToken::Dimension(v, LengthUnit::Px)
  }

  #[test]
  fn parses_and_evaluates_plain_arithmetic() {
    let expr = parse_str("2 * 3 + 1").expect("valid expression");
    assert_eq!(expr.category(), CalcCategory::Number);
    assert_eq!(evaluate_numeric(&expr), 7.0);
  }

  #[test]
  fn respects_operator_precedence_and_parens() {
    let expr = parse_str("2 * (3 + 1)").expect("valid expression");
    assert_eq!(evaluate_numeric(&expr), 8.0);
  }

  #[test]
  fn percent_minus_length_resolves_with_base() {
    let expr = parse_str("50% - 10px").expect("valid expression");
    assert_eq!(expr.category(), CalcCategory::PercentLength);
    let ctx = CalcLengthContext {
      percentage_base: Some(200.0),
      ..Default::default()
    };
    assert_eq!(evaluate_as_length(&expr, &ctx), 90.0);
  }

  #[test]
  fn add_category_table_is_symmetric() {
    use CalcCategory::*;
    for a in [Number, Length, Percent, PercentNumber, PercentLength] {
      for b in [Number, Length, Percent, PercentNumber, PercentLength] {
        assert_eq!(add_subtract_category(a, b), add_subtract_category(b, a));
      }
    }
  }

  #[test]
  fn divide_is_not_symmetric() {
    use CalcCategory::*;
    assert_eq!(divide_category(Length, Number), Length);
    assert_eq!(divide_category(Number, Length), Invalid);
  }

  #[test]
  fn number_plus_length_is_invalid() {
    assert!(parse_str("1 + 1px").is_none());
    assert_eq!(
      parse_checked(&[CalcToken::Number(1.0), CalcToken::Operator(CalcOperator::Add), px(1.0)]),
      Err(CalcError::InvalidCategory)
    );
  }

  #[test]
  fn length_times_length_is_invalid() {
    assert!(parse_str("2px * 3px").is_none());
  }

  #[test]
  fn division_by_literal_zero_parses_and_yields_nan() {
    let expr = parse_str("1 / 0").expect("division by zero parses");
    assert!(evaluate_numeric(&expr).is_nan());
    let expr = parse_str("(1 - 1) / (1 - 1)").expect("computed zero divisor parses");
    assert!(evaluate_numeric(&expr).is_nan());
  }

  #[test]
  fn division_divisor_must_be_number() {
    assert!(parse_str("10px / 2px").is_none());
    assert!(parse_str("10px / 2").is_some());
  }

  #[test]
  fn depth_limit_rejects_deep_nesting() {
    let mut text = String::new();
    for _ in 0..(MAX_EXPRESSION_DEPTH + 4) {
      text.push('(');
    }
    text.push('1');
    for _ in 0..(MAX_EXPRESSION_DEPTH + 4) {
      text.push(')');
    }
    let tokens = tokenize_str(&text).expect("lexes fine");
    assert_eq!(parse_checked(&tokens), Err(CalcError::DepthLimitExceeded));
  }

  #[test]
  fn truncated_stream_fails() {
    let tokens = [px(1.0), CalcToken::Operator(CalcOperator::Add)];
    assert_eq!(parse_checked(&tokens), Err(CalcError::UnexpectedEnd));
  }

  #[test]
  fn juxtaposed_values_fail() {
    // "50% -10px" lexes as two values with no operator between them.
    let tokens = [CalcToken::Percentage(50.0), px(-10.0)];
    assert!(parse_checked(&tokens).is_err());
  }

  #[test]
  fn font_relative_units_use_context_metrics() {
    let expr = parse_str("2em + 1ex").expect("valid expression");
    let ctx = CalcLengthContext {
      font_size: 16.0,
      root_font_size: 16.0,
      x_height: Some(7.0),
      ..Default::default()
    };
    assert_eq!(evaluate_as_length(&expr, &ctx), 39.0);
  }

  #[test]
  fn percent_without_base_is_nan() {
    let expr = parse_str("50%").expect("valid expression");
    assert!(evaluate_as_length(&expr, &CalcLengthContext::default()).is_nan());
  }

  #[test]
  fn nested_calc_flattens() {
    let expr = parse_str("calc(calc(2 + 1) * 3)").expect("nested calc");
    assert_eq!(evaluate_numeric(&expr), 9.0);
  }

  #[test]
  fn cached_parse_matches_uncached() {
    let tokens = tokenize_str("25% + 5px").expect("lexes");
    let direct = parse(&tokens).expect("parses");
    let cached = parse_cached(&tokens).expect("parses");
    assert_eq!(direct, cached);
    // Second lookup hits the memo and must agree.
    assert_eq!(parse_cached(&tokens).expect("parses"), direct);
  }

  #[test]
  fn non_negative_range_clamps_but_keeps_nan() {
    assert_eq!(ValueRange::NonNegative.clamp(-4.0), 0.0);
    assert_eq!(ValueRange::NonNegative.clamp(4.0), 4.0);
    assert!(ValueRange::NonNegative.clamp(f64::NAN).is_nan());
    assert_eq!(ValueRange::All.clamp(-4.0), -4.0);
  }
}

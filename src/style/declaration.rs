//! Declaration blocks and match results
//!
//! The external CSS parser produces [`DeclarationBlock`]s; the external
//! selector matcher assembles them into an ordered [`MatchResult`] per
//! element. The cascade engine only ever reads these containers.
//!
//! Blocks are shared by reference counting: the stylesheet owns them, the
//! match result and the matched-properties cache hold additional references,
//! and block *identity* (the allocation address) is the cache key material.

use crate::calc::CalcToken;
use crate::error::StyleError;
use crate::style::color::Rgba;
use crate::style::properties::PropertyId;
use crate::style::types::{
  BasicShape, ClipRect, ContentItem, FilterFunction, ShadowValue, TransformFunction,
};
use crate::style::values::Length;
use std::sync::Arc;

/// A `var()` reference awaiting substitution
#[derive(Debug, Clone, PartialEq)]
pub struct VarReference {
  /// Custom property name including the `--` prefix
  pub name: Arc<str>,
  /// Fallback used when the variable is not defined
  pub fallback: Option<Box<PropertyValue>>,
}

/// A parsed property value as handed over by the external CSS parser.
///
/// Values are structural; `Calc` carries the still-unparsed token stream
/// (the Expression Engine parses it lazily at apply time so a malformed
/// expression drops only the owning declaration), and `Var` carries a
/// substitution reference resolved during the cascade's variable pass.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
  Keyword(String),
  Number(f32),
  Percentage(f32),
  Length(Length),
  Calc(Arc<[CalcToken]>),
  Color(Rgba),
  String(String),
  Url(Arc<str>),
  FontFamilyList(Vec<String>),
  /// Comma-separated list (layered properties)
  List(Vec<PropertyValue>),
  /// Two-component value (radii, positions, spacing)
  Pair(Box<PropertyValue>, Box<PropertyValue>),
  Shadows(Vec<ShadowValue>),
  Transform(Vec<TransformFunction>),
  Filters(Vec<FilterFunction>),
  Rect(ClipRect),
  Shape(BasicShape),
  Content(Vec<ContentItem>),
  QuotePairs(Vec<(String, String)>),
  Counters(Vec<(String, i32)>),
  Var(VarReference),
}

impl PropertyValue {
  /// The keyword string if this is a keyword value
  pub fn keyword(&self) -> Option<&str> {
    match self {
      Self::Keyword(kw) => Some(kw.as_str()),
      _ => None,
    }
  }

  /// True when this value (possibly nested) contains a `var()` reference
  pub fn contains_var(&self) -> bool {
    match self {
      Self::Var(_) => true,
      Self::List(items) => items.iter().any(PropertyValue::contains_var),
      Self::Pair(a, b) => a.contains_var() || b.contains_var(),
      _ => false,
    }
  }
}

/// The property side of a declaration: a known longhand/shorthand or an
/// author-defined custom property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyName {
  Id(PropertyId),
  Custom(Arc<str>),
}

/// One `property: value [!important]` entry
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
  pub name: PropertyName,
  pub value: PropertyValue,
  pub important: bool,
}

impl Declaration {
  pub fn new(id: PropertyId, value: PropertyValue) -> Self {
    Self {
      name: PropertyName::Id(id),
      value,
      important: false,
    }
  }

  pub fn important(id: PropertyId, value: PropertyValue) -> Self {
    Self {
      name: PropertyName::Id(id),
      value,
      important: true,
    }
  }

  pub fn custom(name: &str, value: PropertyValue) -> Self {
    Self {
      name: PropertyName::Custom(Arc::from(name)),
      value,
      important: false,
    }
  }
}

/// An ordered set of declarations owned by the stylesheet and shared by
/// reference into match results and the matched-properties cache.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeclarationBlock {
  declarations: Vec<Declaration>,
}

impl DeclarationBlock {
  pub fn new(declarations: Vec<Declaration>) -> Arc<Self> {
    Arc::new(Self { declarations })
  }

  pub fn declarations(&self) -> &[Declaration] {
    &self.declarations
  }

  pub fn is_empty(&self) -> bool {
    self.declarations.is_empty()
  }
}

/// Cascade origin of a matched block
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Origin {
  UserAgent,
  User,
  Author,
}

/// Bit set on a matched block when the selector matched in unvisited state
pub const LINK_MATCH_LINK: u8 = 0b01;
/// Bit set when the selector matched in visited state
pub const LINK_MATCH_VISITED: u8 = 0b10;
/// Selector applies regardless of link state
pub const LINK_MATCH_ALL: u8 = LINK_MATCH_LINK | LINK_MATCH_VISITED;

/// Restriction applied to declarations matched for certain pseudo-elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropertyWhitelist {
  #[default]
  None,
  Marker,
  FirstLetter,
}

impl PropertyWhitelist {
  /// Whether declarations for `id` may apply under this whitelist
  pub fn allows(self, id: PropertyId) -> bool {
    match self {
      Self::None => true,
      Self::Marker => {
        id.is_high_priority()
          || matches!(
            id,
            PropertyId::LineHeight
              | PropertyId::WhiteSpace
              | PropertyId::TextShadow
              | PropertyId::Content
              | PropertyId::UnicodeBidi
          )
          || id.is_animation_longhand()
      }
      Self::FirstLetter => {
        id.is_high_priority()
          || matches!(
            id,
            PropertyId::LineHeight
              | PropertyId::Float
              | PropertyId::VerticalAlign
              | PropertyId::TextDecorationLine
              | PropertyId::TextDecorationColor
              | PropertyId::TextTransform
              | PropertyId::LetterSpacing
              | PropertyId::WordSpacing
              | PropertyId::BackgroundColor
              | PropertyId::BoxShadow
              | PropertyId::TextShadow
          )
          || id.is_border_property()
          || id.is_margin_property()
          || id.is_padding_property()
          || id.is_background_longhand()
      }
    }
  }
}

/// One entry of a match result
#[derive(Debug, Clone)]
pub struct MatchedBlock {
  pub block: Arc<DeclarationBlock>,
  pub origin: Origin,
  /// [`LINK_MATCH_LINK`] / [`LINK_MATCH_VISITED`] bits
  pub link_match: u8,
  pub whitelist: PropertyWhitelist,
}

/// First/last block index per origin within a match result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchRanges {
  pub ua: Option<(usize, usize)>,
  pub user: Option<(usize, usize)>,
  pub author: Option<(usize, usize)>,
}

impl MatchRanges {
  fn note(&mut self, origin: Origin, index: usize) {
    let slot = match origin {
      Origin::UserAgent => &mut self.ua,
      Origin::User => &mut self.user,
      Origin::Author => &mut self.author,
    };
    *slot = Some(match *slot {
      None => (index, index),
      Some((first, _)) => (first, index),
    });
  }
}

/// The ordered, already-ranked sequence of declaration blocks matching one
/// element, as produced by the external selector matcher.
///
/// Blocks must be appended grouped by origin in UA, user, author order —
/// the specificity/source-order ranking inside each group already happened
/// upstream.
#[derive(Debug, Clone, Default)]
pub struct MatchResult {
  blocks: Vec<MatchedBlock>,
  ranges: MatchRanges,
  /// Cleared by the producer when the element has state the cache must not
  /// memoize (e.g. inline style)
  pub is_cacheable: bool,
}

impl MatchResult {
  pub fn new() -> Self {
    Self {
      blocks: Vec::new(),
      ranges: MatchRanges::default(),
      is_cacheable: true,
    }
  }

  /// Appends a matched block. Fails when origins are not grouped in
  /// UA, user, author order.
  pub fn add_block(
    &mut self,
    block: Arc<DeclarationBlock>,
    origin: Origin,
    link_match: u8,
    whitelist: PropertyWhitelist,
  ) -> Result<(), StyleError> {
    if let Some(last) = self.blocks.last() {
      if origin < last.origin {
        return Err(StyleError::UnorderedMatchResult);
      }
    }
    let index = self.blocks.len();
    self.blocks.push(MatchedBlock {
      block,
      origin,
      link_match,
      whitelist,
    });
    self.ranges.note(origin, index);
    Ok(())
  }

  /// Convenience for the common case of an author block that applies in
  /// every link state.
  pub fn add_author_block(&mut self, block: Arc<DeclarationBlock>) {
    // Author blocks always sort last, so grouping cannot fail.
    self
      .add_block(block, Origin::Author, LINK_MATCH_ALL, PropertyWhitelist::None)
      .expect("author blocks append last");
  }

  pub fn blocks(&self) -> &[MatchedBlock] {
    &self.blocks
  }

  pub fn ranges(&self) -> MatchRanges {
    self.ranges
  }

  pub fn is_empty(&self) -> bool {
    self.blocks.is_empty()
  }

  pub fn len(&self) -> usize {
    self.blocks.len()
  }

  /// The whole sequence as an index range
  pub fn full_range(&self) -> Option<(usize, usize)> {
    if self.blocks.is_empty() {
      None
    } else {
      Some((0, self.blocks.len() - 1))
    }
  }

  /// Blocks after the UA group (user + author), for the low-priority
  /// author/user sub-pass.
  pub fn after_ua_range(&self) -> Option<(usize, usize)> {
    let start = match self.ranges.ua {
      Some((_, last)) => last + 1,
      None => 0,
    };
    if start >= self.blocks.len() {
      None
    } else {
      Some((start, self.blocks.len() - 1))
    }
  }
}

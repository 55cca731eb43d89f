//! Shared fixtures for the integration tests: a self-contained element
//! tree node implementing the read-only element contract, plus builders
//! for declarations and match results.

#![allow(dead_code)]

use faststyle::dom::{ElementRole, ElementSource, LinkState};
use faststyle::style::declaration::Origin;
use faststyle::{ComputedStyle, Declaration, DeclarationBlock, Length, MatchResult, PropertyId, PropertyValue};
use std::sync::Arc;

/// Minimal element node. Each node owns its parent chain and preceding
/// sibling chain, which is all the cascade and the sharing search traverse.
#[derive(Default, Clone)]
pub struct TestElement {
  pub tag: String,
  pub id: Option<String>,
  pub classes: Vec<String>,
  pub attributes: Vec<(String, String)>,
  pub role: ElementRole,
  pub link_state: LinkState,
  pub hovered: bool,
  pub inline_style: bool,
  pub resolved: Option<Arc<ComputedStyle>>,
  pub parent: Option<Box<TestElement>>,
  pub prev: Option<Box<TestElement>>,
  pub last: Option<Box<TestElement>>,
}

impl TestElement {
  pub fn new(tag: &str) -> Self {
    Self {
      tag: tag.to_string(),
      ..Self::default()
    }
  }

  pub fn with_parent(mut self, parent: TestElement) -> Self {
    self.parent = Some(Box::new(parent));
    self
  }

  pub fn with_prev_sibling(mut self, sibling: TestElement) -> Self {
    self.prev = Some(Box::new(sibling));
    self
  }

  pub fn with_last_child(mut self, child: TestElement) -> Self {
    self.last = Some(Box::new(child));
    self
  }

  pub fn with_resolved(mut self, style: Arc<ComputedStyle>) -> Self {
    self.resolved = Some(style);
    self
  }

  pub fn with_classes(mut self, classes: &[&str]) -> Self {
    self.classes = classes.iter().map(|c| c.to_string()).collect();
    self
  }

  pub fn with_inline_style(mut self) -> Self {
    self.inline_style = true;
    self
  }

  pub fn with_role(mut self, role: ElementRole) -> Self {
    self.role = role;
    self
  }
}

impl ElementSource for TestElement {
  fn tag_name(&self) -> &str {
    &self.tag
  }

  fn id(&self) -> Option<&str> {
    self.id.as_deref()
  }

  fn classes(&self) -> &[String] {
    &self.classes
  }

  fn attribute(&self, name: &str) -> Option<&str> {
    self
      .attributes
      .iter()
      .find(|(key, _)| key == name)
      .map(|(_, value)| value.as_str())
  }

  fn role(&self) -> ElementRole {
    self.role
  }

  fn link_state(&self) -> LinkState {
    self.link_state
  }

  fn is_hovered(&self) -> bool {
    self.hovered
  }

  fn has_inline_style(&self) -> bool {
    self.inline_style
  }

  fn parent(&self) -> Option<&Self> {
    self.parent.as_deref()
  }

  fn prev_sibling(&self) -> Option<&Self> {
    self.prev.as_deref()
  }

  fn last_child(&self) -> Option<&Self> {
    self.last.as_deref()
  }

  fn resolved_style(&self) -> Option<Arc<ComputedStyle>> {
    self.resolved.clone()
  }
}

pub fn kw(keyword: &str) -> PropertyValue {
  PropertyValue::Keyword(keyword.to_string())
}

pub fn px(value: f32) -> PropertyValue {
  PropertyValue::Length(Length::px(value))
}

pub fn decl(id: PropertyId, value: PropertyValue) -> Declaration {
  Declaration::new(id, value)
}

pub fn author_block(declarations: Vec<Declaration>) -> Arc<DeclarationBlock> {
  DeclarationBlock::new(declarations)
}

pub fn author_match(declarations: Vec<Declaration>) -> MatchResult {
  let mut matched = MatchResult::new();
  matched.add_author_block(author_block(declarations));
  matched
}

pub fn ua_and_author_match(
  ua: Vec<Declaration>,
  author: Vec<Declaration>,
) -> MatchResult {
  use faststyle::style::declaration::{PropertyWhitelist, LINK_MATCH_ALL};
  let mut matched = MatchResult::new();
  matched
    .add_block(
      author_block(ua),
      Origin::UserAgent,
      LINK_MATCH_ALL,
      PropertyWhitelist::None,
    )
    .unwrap();
  matched.add_author_block(author_block(author));
  matched
}

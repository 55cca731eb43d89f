//! Read-only element model contract
//!
//! The DOM tree belongs to an external collaborator. The cascade engine
//! consumes it exclusively through [`ElementSource`]: identity and state
//! queries plus the sibling/ancestor traversal style sharing needs. Nothing
//! here mutates the tree.

use crate::style::computed::ComputedStyle;
use std::sync::Arc;

/// Link state of an element (or of the style context being computed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkState {
  #[default]
  NotInsideLink,
  InsideUnvisited,
  InsideVisited,
}

impl LinkState {
  pub fn is_link(self) -> bool {
    !matches!(self, Self::NotInsideLink)
  }
}

/// Structural role the element model assigns an element; drives the
/// post-cascade adjustments that are gated on element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElementRole {
  #[default]
  Generic,
  Root,
  TableRow,
  TableCell,
  FormControl,
}

/// Rule-feature sets the style-sharing search must query through the
/// external selector matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFeatureQuery {
  /// Rules with sibling combinators that could match this element
  SiblingRules,
  /// Rules keyed on uncommon attributes
  UncommonAttributeRules,
}

/// Document-wide settings the element model exposes to the cascade.
#[derive(Debug, Clone, Copy)]
pub struct DocumentSettings {
  /// Quirks-mode documents relax some length parsing rules
  pub quirks_mode: bool,
  /// Floor applied after zoom during font finalization; 0 disables it
  pub minimum_font_size: f32,
  /// `medium` font size for the document, normally 16px
  pub default_font_size: f32,
  /// Page zoom applied at the root of the effective-zoom chain
  pub page_zoom: f32,
  pub viewport_width: f32,
  pub viewport_height: f32,
}

impl Default for DocumentSettings {
  fn default() -> Self {
    Self {
      quirks_mode: false,
      minimum_font_size: 0.0,
      default_font_size: 16.0,
      page_zoom: 1.0,
      viewport_width: 800.0,
      viewport_height: 600.0,
    }
  }
}

/// Read-only view of one element in the external tree.
///
/// `resolved_style` returns the style record a previous resolution stored
/// for the element, if any; style sharing reuses candidates through it.
pub trait ElementSource: Sized {
  fn tag_name(&self) -> &str;

  fn id(&self) -> Option<&str>;

  fn classes(&self) -> &[String];

  fn attribute(&self, name: &str) -> Option<&str>;

  fn role(&self) -> ElementRole;

  fn link_state(&self) -> LinkState;

  fn is_hovered(&self) -> bool {
    false
  }

  fn is_active(&self) -> bool {
    false
  }

  fn is_focused(&self) -> bool {
    false
  }

  /// The element carries a `style` attribute
  fn has_inline_style(&self) -> bool {
    false
  }

  /// Fingerprint of presentation-attribute-derived style (0 when none).
  /// Two candidates may only share styles when fingerprints agree.
  fn presentation_attribute_fingerprint(&self) -> u64 {
    0
  }

  fn is_form_control(&self) -> bool {
    matches!(self.role(), ElementRole::FormControl)
  }

  /// Fingerprint of control-specific state (checked, indeterminate,
  /// enabled, ...); only consulted for form controls.
  fn control_state_fingerprint(&self) -> u64 {
    0
  }

  fn parent(&self) -> Option<&Self>;

  fn prev_sibling(&self) -> Option<&Self>;

  fn last_child(&self) -> Option<&Self>;

  /// The style record stored by an earlier resolution of this element
  fn resolved_style(&self) -> Option<Arc<ComputedStyle>>;

  /// Asks the external matcher whether any rule in the given feature set
  /// matches this element. Checked last during style sharing because it is
  /// the expensive query.
  fn matches_rule_features(&self, _query: RuleFeatureQuery) -> bool {
    false
  }
}

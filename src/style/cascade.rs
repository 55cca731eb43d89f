//! Cascade engine
//!
//! [`StyleEngine`] turns an ordered match result plus a parent style into a
//! finished [`ComputedStyle`]. Resolution is a fixed pass sequence:
//!
//! 1. style-sharing / matched-properties-cache short circuits
//! 2. custom-property definitions (so later passes can substitute `var()`)
//! 3. high-priority properties, with line-height recorded but deferred
//! 4. font finalization
//! 5. deferred line-height
//! 6. low-priority properties
//! 7. post-cascade adjustments
//! 8. pending-resource resolution
//! 9. cache write-back
//!
//! Within a pass, declarations apply in origin sub-ranges: all
//! not-important first, then author-important, user-important and
//! UA-important (the low-priority pass additionally applies the UA range
//! before the author/user ranges so page rules can override UA defaults).
//!
//! The engine owns all process-lifetime resolver state (strategy table,
//! matched-properties cache, keyframes map, document settings); nothing is
//! global. Resolution is synchronous and non-reentrant.

use crate::dom::{DocumentSettings, ElementRole, ElementSource, LinkState};
use crate::style::cache::{self, MatchedPropertiesCache};
use crate::style::computed::ComputedStyle;
use crate::style::declaration::{
  DeclarationBlock, MatchResult, PropertyName, PropertyValue, LINK_MATCH_LINK, LINK_MATCH_VISITED,
};
use crate::style::fonts::{self, ApproximateFontProvider, FontMetrics, FontProvider};
use crate::style::properties::{ApplyCtx, ApplyState, LinkGate, PropertyId, StrategyTable};
use crate::style::sharing;
use crate::style::types::*;
use crate::style::variables;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Outcome of a resource-loader request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceStatus {
  Loaded(ResourceHandle),
  /// The loader accepted the request; a later, independent re-resolution
  /// will observe the loaded handle
  Pending,
}

/// External collaborator that turns pending (property, url) pairs into
/// resource handles. Called only in the post-cascade resource pass and must
/// not block.
pub trait ResourceLoader {
  fn load(&mut self, property: PropertyId, url: &str) -> ResourceStatus;
}

/// One keyframe of an `@keyframes` rule
#[derive(Debug, Clone)]
pub struct Keyframe {
  /// Offset in [0, 1]
  pub offset: f32,
  pub block: Arc<DeclarationBlock>,
}

/// A registered `@keyframes` rule
#[derive(Debug, Clone)]
pub struct KeyframesRule {
  pub name: Arc<str>,
  pub keyframes: Vec<Keyframe>,
}

/// Which declarations a cascade run applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeclarationFilter {
  All,
  /// Matched-properties partial path: the non-inherited baseline came from
  /// the cache, so only inherited properties (plus zoom, which feeds the
  /// inherited effective-zoom chain) can differ.
  InheritedOnly,
}

impl DeclarationFilter {
  fn admits(self, id: PropertyId) -> bool {
    match self {
      Self::All => true,
      Self::InheritedOnly => id.is_inherited() || id == PropertyId::Zoom,
    }
  }
}

/// Whether a declaration belongs to the high-priority pass. Line-height is
/// found there but deferred; a shorthand rides with its longhands (`font`
/// expands to nothing but high-priority properties).
fn in_high_priority_pass(id: PropertyId) -> bool {
  match id.longhands() {
    Some(longhands) => longhands
      .iter()
      .all(|l| l.is_high_priority() || *l == PropertyId::LineHeight),
    None => id.is_high_priority() || id == PropertyId::LineHeight,
  }
}

enum CssWideKeyword {
  Inherit,
  Initial,
  Unset,
}

fn css_wide_keyword(value: &PropertyValue) -> Option<CssWideKeyword> {
  match value.keyword()? {
    "inherit" => Some(CssWideKeyword::Inherit),
    "initial" => Some(CssWideKeyword::Initial),
    // `revert` collapses to `unset`; per-origin rollback is not tracked.
    "unset" | "revert" => Some(CssWideKeyword::Unset),
    _ => None,
  }
}

/// The per-document style resolver.
///
/// Construct one per document/session and pass it `&mut` into resolution;
/// resolving one element while another resolution is in flight is a
/// programming error and asserts.
pub struct StyleEngine {
  table: StrategyTable,
  cache: MatchedPropertiesCache,
  keyframes: FxHashMap<Arc<str>, KeyframesRule>,
  font_provider: Box<dyn FontProvider>,
  pub settings: DocumentSettings,
  resolving: bool,
}

impl StyleEngine {
  pub fn new(settings: DocumentSettings) -> Self {
    Self::with_font_provider(settings, Box::new(ApproximateFontProvider))
  }

  pub fn with_font_provider(settings: DocumentSettings, font_provider: Box<dyn FontProvider>) -> Self {
    Self {
      table: StrategyTable::new(),
      cache: MatchedPropertiesCache::new(),
      keyframes: FxHashMap::default(),
      font_provider,
      settings,
      resolving: false,
    }
  }

  pub fn strategy_table(&self) -> &StrategyTable {
    &self.table
  }

  /// Drops all memoized resolutions; call on stylesheet change.
  pub fn invalidate_matched_properties_cache(&mut self) {
    self.cache.invalidate();
  }

  pub fn matched_properties_cache_len(&self) -> usize {
    self.cache.len()
  }

  pub fn register_keyframes(&mut self, rule: KeyframesRule) {
    self.keyframes.insert(Arc::clone(&rule.name), rule);
  }

  pub fn keyframes_rule(&self, name: &str) -> Option<&KeyframesRule> {
    self.keyframes.get(name)
  }

  /// The style a root or detached element inherits from.
  pub fn default_style_for_root(&self) -> ComputedStyle {
    let mut style = ComputedStyle::initial();
    if self.settings.page_zoom != 1.0 {
      style.inherited_mut().effective_zoom = self.settings.page_zoom;
    }
    let size = self.settings.default_font_size * self.settings.page_zoom;
    if size != style.font_size() {
      style.font_mut().computed_size = size.max(self.settings.minimum_font_size);
    }
    style
  }

  /// Resolves the computed style for `element` from its match result.
  pub fn resolve_style<E: ElementSource>(
    &mut self,
    element: &E,
    matched: &MatchResult,
  ) -> Arc<ComputedStyle> {
    self.resolve_style_with_loader(element, matched, None)
  }

  /// Like [`resolve_style`](Self::resolve_style) but resolves pending
  /// resource references through `loader` in the post-cascade pass.
  pub fn resolve_style_with_loader<E: ElementSource>(
    &mut self,
    element: &E,
    matched: &MatchResult,
    loader: Option<&mut dyn ResourceLoader>,
  ) -> Arc<ComputedStyle> {
    assert!(!self.resolving, "reentrant style resolution");
    self.resolving = true;
    let result = self.resolve_impl(element, matched, loader);
    self.resolving = false;
    result
  }

  fn resolve_impl<E: ElementSource>(
    &mut self,
    element: &E,
    matched: &MatchResult,
    mut loader: Option<&mut dyn ResourceLoader>,
  ) -> Arc<ComputedStyle> {
    let parent: Arc<ComputedStyle> = element
      .parent()
      .and_then(|p| p.resolved_style())
      .unwrap_or_else(|| Arc::new(self.default_style_for_root()));

    if let Some(shared) = sharing::locate_shared_style(element) {
      return shared;
    }

    let hash = cache::hash_match_result(matched);
    let cached = if matched.is_cacheable {
      self
        .cache
        .find(hash, matched)
        .map(|entry| (entry.style.clone(), entry.parent.clone()))
    } else {
      None
    };

    let mut style = ComputedStyle::initial();
    style.inherit_from(&parent);
    propagate_link_state(element, &mut style, &parent);

    let mut filter = DeclarationFilter::All;
    if let Some((cached_style, cached_parent)) = &cached {
      if ComputedStyle::inherited_data_shared(&parent, cached_parent) {
        // Fast path: the parent's inherited block is bit-identical to the
        // one the cached resolution ran against, so the cached style is
        // valid wholesale, inherited properties included. Restore the
        // element's own link context and re-run the adjustments the
        // current element's role demands.
        let mut style = cached_style.clone();
        propagate_link_state(element, &mut style, &parent);
        adjust_style(&mut style, element.role());
        log::trace!("matched-properties cache fast path hit");
        return Arc::new(style);
      }
      // Non-inherited properties depend only on the matched declarations,
      // so the cached baseline applies wholesale; only inherited
      // properties need recomputing against the new parent.
      style.copy_non_inherited_from(cached_style);
      filter = DeclarationFilter::InheritedOnly;
    }

    let mut state = loop {
      let mut state = ApplyState::default();
      self.apply_cascade(matched, &parent, &mut style, &mut state, filter);

      if filter == DeclarationFilter::InheritedOnly {
        let (cached_style, _) = cached.as_ref().expect("partial path implies a cache hit");
        // A font or zoom difference invalidates the cached non-inherited
        // baseline (font-relative lengths were resolved against the cached
        // font); fall back to a full, unconditional re-run.
        if state.zoom_changed || style.font() != cached_style.font() {
          log::trace!("font/zoom changed on partial cache path, re-running all passes");
          filter = DeclarationFilter::All;
          style = ComputedStyle::initial();
          style.inherit_from(&parent);
          propagate_link_state(element, &mut style, &parent);
          continue;
        }
      }
      break state;
    };

    adjust_style(&mut style, element.role());

    if let Some(loader) = loader.as_deref_mut() {
      resolve_pending_resources(&mut style, std::mem::take(&mut state.pending_resources), loader);
    }

    if self.can_cache(matched, &style, &parent) {
      log::trace!("caching matched-properties result");
      self
        .cache
        .add(hash, matched, style.clone(), (*parent).clone());
    }

    Arc::new(style)
  }

  /// Clones `base` and applies one keyframe's declarations through the
  /// regular pass sequence. `!important` inside keyframes is ignored.
  pub fn resolve_keyframe_style(
    &mut self,
    base: &ComputedStyle,
    parent: &ComputedStyle,
    block: &DeclarationBlock,
  ) -> ComputedStyle {
    assert!(!self.resolving, "reentrant style resolution");
    self.resolving = true;

    let mut style = base.clone();
    let mut state = ApplyState::default();
    let mut metrics = self.font_provider.metrics(style.font());

    for declaration in block.declarations() {
      if declaration.important {
        continue;
      }
      let PropertyName::Id(id) = &declaration.name else {
        continue;
      };
      if !in_high_priority_pass(*id) {
        continue;
      }
      // Line-height waits for the final font here too.
      if *id == PropertyId::LineHeight {
        state.deferred_line_height = Some(declaration.value.clone());
        continue;
      }
      self.apply_matched_declaration(
        *id,
        &declaration.value,
        &mut style,
        parent,
        metrics,
        LinkGate::Normal,
        &mut state,
      );
    }

    if state.font_dirty || state.zoom_changed {
      finalize_font(&mut style, parent, &self.settings);
      metrics = self.font_provider.metrics(style.font());
    }
    if let Some(value) = state.deferred_line_height.take() {
      self.apply_matched_declaration(
        PropertyId::LineHeight,
        &value,
        &mut style,
        parent,
        metrics,
        LinkGate::Normal,
        &mut state,
      );
    }

    for declaration in block.declarations() {
      if declaration.important {
        continue;
      }
      let PropertyName::Id(id) = &declaration.name else {
        continue;
      };
      if in_high_priority_pass(*id) {
        continue;
      }
      self.apply_matched_declaration(
        *id,
        &declaration.value,
        &mut style,
        parent,
        metrics,
        LinkGate::Normal,
        &mut state,
      );
    }

    self.resolving = false;
    style
  }

  // -------------------------------------------------------------------
  // Pass machinery

  fn apply_cascade(
    &self,
    matched: &MatchResult,
    parent: &ComputedStyle,
    style: &mut ComputedStyle,
    state: &mut ApplyState,
    filter: DeclarationFilter,
  ) {
    let inside_visited = style.inside_link() == LinkState::InsideVisited;

    self.apply_variable_definitions(matched, style);

    // High-priority pass: every origin not-important, then importants in
    // author, user, UA order so stronger origins land last.
    let ranges = matched.ranges();
    let high = true;
    self.apply_range(matched, matched.full_range(), false, high, inside_visited, filter, parent, style, state);
    self.apply_range(matched, ranges.author, true, high, inside_visited, filter, parent, style, state);
    self.apply_range(matched, ranges.user, true, high, inside_visited, filter, parent, style, state);
    self.apply_range(matched, ranges.ua, true, high, inside_visited, filter, parent, style, state);

    if state.font_dirty || state.zoom_changed {
      finalize_font(style, parent, &self.settings);
    }
    let metrics = self.font_provider.metrics(style.font());

    if let Some(value) = state.deferred_line_height.take() {
      let value = self.substituted(&value, style);
      if let Some(value) = value {
        self.apply_matched_declaration(
          PropertyId::LineHeight,
          &value,
          style,
          parent,
          metrics,
          LinkGate::Normal,
          state,
        );
      }
    }

    // Low-priority pass: UA first so author/user not-important can
    // override, then the importants strongest-last.
    let high = false;
    self.apply_range(matched, ranges.ua, false, high, inside_visited, filter, parent, style, state);
    self.apply_range(matched, matched.after_ua_range(), false, high, inside_visited, filter, parent, style, state);
    self.apply_range(matched, ranges.author, true, high, inside_visited, filter, parent, style, state);
    self.apply_range(matched, ranges.user, true, high, inside_visited, filter, parent, style, state);
    self.apply_range(matched, ranges.ua, true, high, inside_visited, filter, parent, style, state);
  }

  /// Collects custom-property definitions in cascade order.
  fn apply_variable_definitions(&self, matched: &MatchResult, style: &mut ComputedStyle) {
    let ranges = matched.ranges();
    for (range, important) in [
      (matched.full_range(), false),
      (ranges.author, true),
      (ranges.user, true),
      (ranges.ua, true),
    ] {
      let Some((first, last)) = range else { continue };
      for entry in &matched.blocks()[first..=last] {
        if entry.link_match & LINK_MATCH_LINK == 0 {
          continue;
        }
        for declaration in entry.block.declarations() {
          if declaration.important != important {
            continue;
          }
          if let PropertyName::Custom(name) = &declaration.name {
            style
              .custom_properties_mut()
              .insert(Arc::clone(name), declaration.value.clone());
          }
        }
      }
    }
  }

  #[allow(clippy::too_many_arguments)]
  fn apply_range(
    &self,
    matched: &MatchResult,
    range: Option<(usize, usize)>,
    important: bool,
    high_priority: bool,
    inside_visited: bool,
    filter: DeclarationFilter,
    parent: &ComputedStyle,
    style: &mut ComputedStyle,
    state: &mut ApplyState,
  ) {
    let Some((first, last)) = range else { return };
    let metrics = self.font_provider.metrics(style.font());
    for entry in &matched.blocks()[first..=last] {
      let mut gates: [Option<LinkGate>; 2] = [None, None];
      if entry.link_match & LINK_MATCH_LINK != 0 {
        gates[0] = Some(LinkGate::Normal);
      }
      if inside_visited && entry.link_match & LINK_MATCH_VISITED != 0 {
        gates[1] = Some(LinkGate::Visited);
      }

      for declaration in entry.block.declarations() {
        if declaration.important != important {
          continue;
        }
        let PropertyName::Id(id) = &declaration.name else {
          continue;
        };
        let id = *id;
        if high_priority != in_high_priority_pass(id) {
          continue;
        }
        if !entry.whitelist.allows(id) || !filter.admits(id) {
          continue;
        }

        for gate in gates.iter().flatten() {
          if *gate == LinkGate::Visited && !id.is_visited_dependent() {
            continue;
          }
          // Line-height is recorded here and applied after the font is
          // final.
          if id == PropertyId::LineHeight && high_priority {
            state.deferred_line_height = Some(declaration.value.clone());
            continue;
          }
          let Some(value) = self.substituted(&declaration.value, style) else {
            continue;
          };
          self.apply_matched_declaration(id, &value, style, parent, metrics, *gate, state);
        }
      }
    }
  }

  /// Substitutes `var()` references; `None` drops the declaration.
  fn substituted(&self, value: &PropertyValue, style: &ComputedStyle) -> Option<PropertyValue> {
    if value.contains_var() {
      variables::substitute(value, style.custom_properties())
    } else {
      Some(value.clone())
    }
  }

  #[allow(clippy::too_many_arguments)]
  fn apply_matched_declaration(
    &self,
    id: PropertyId,
    value: &PropertyValue,
    style: &mut ComputedStyle,
    parent: &ComputedStyle,
    metrics: FontMetrics,
    gate: LinkGate,
    state: &mut ApplyState,
  ) {
    let mut ctx = ApplyCtx {
      style,
      parent,
      settings: &self.settings,
      font_metrics: metrics,
      link_gate: gate,
      state,
    };
    match css_wide_keyword(value) {
      Some(CssWideKeyword::Inherit) => {
        if !id.is_inherited() && gate == LinkGate::Normal {
          ctx.style.has_explicit_inheritance = true;
        }
        if !self.table.apply_inherit(id, &mut ctx) {
          second_tier_inherit(&mut ctx, id);
        }
      }
      Some(CssWideKeyword::Initial) => {
        if !self.table.apply_initial(id, &mut ctx) {
          second_tier_initial(&mut ctx, id);
        }
      }
      Some(CssWideKeyword::Unset) => {
        if id.is_inherited() {
          if !self.table.apply_inherit(id, &mut ctx) {
            second_tier_inherit(&mut ctx, id);
          }
        } else if !self.table.apply_initial(id, &mut ctx) {
          second_tier_initial(&mut ctx, id);
        }
      }
      None => {
        if !self.table.apply_value(id, &mut ctx, value) {
          second_tier_value(&mut ctx, id, value);
        }
      }
    }
  }

  fn can_cache(&self, matched: &MatchResult, style: &ComputedStyle, parent: &ComputedStyle) -> bool {
    matched.is_cacheable
      && !style.unique
      && style.appearance == Appearance::None
      && style.effective_zoom() == 1.0
      && style.inherited().writing_mode == WritingMode::default()
      && !parent.has_explicit_inheritance
  }
}

fn propagate_link_state<E: ElementSource>(
  element: &E,
  style: &mut ComputedStyle,
  parent: &ComputedStyle,
) {
  let state = match element.link_state() {
    LinkState::NotInsideLink => parent.inside_link(),
    own => own,
  };
  style.set_inside_link(state);
}

fn finalize_font(style: &mut ComputedStyle, parent: &ComputedStyle, settings: &DocumentSettings) {
  let size = fonts::finalize_font_size(
    style.font(),
    parent.font_size(),
    style.effective_zoom(),
    settings.minimum_font_size,
  );
  if size != style.font_size() {
    style.font_mut().computed_size = size;
  }
}

// ---------------------------------------------------------------------------
// Second-tier switch
//
// Structured properties with no reusable strategy shape. The table reports
// them unhandled; value application pattern-matches the structural value
// directly.

fn second_tier_value(ctx: &mut ApplyCtx<'_>, id: PropertyId, value: &PropertyValue) {
  match id {
    PropertyId::BoxShadow => match value {
      PropertyValue::Shadows(shadows) => ctx.style.box_shadow = shadows.clone(),
      PropertyValue::Keyword(kw) if kw == "none" => ctx.style.box_shadow.clear(),
      _ => {}
    },
    PropertyId::TextShadow => match value {
      PropertyValue::Shadows(shadows) => ctx.style.inherited_mut().text_shadow = shadows.clone(),
      PropertyValue::Keyword(kw) if kw == "none" => {
        if !ctx.style.inherited().text_shadow.is_empty() {
          ctx.style.inherited_mut().text_shadow.clear();
        }
      }
      _ => {}
    },
    PropertyId::Transform => match value {
      PropertyValue::Transform(functions) => ctx.style.transform = functions.clone(),
      PropertyValue::Keyword(kw) if kw == "none" => ctx.style.transform.clear(),
      _ => {}
    },
    PropertyId::Filter => match value {
      PropertyValue::Filters(functions) => {
        for function in functions {
          if let FilterFunction::Url(url) = function {
            ctx
              .state
              .pending_resources
              .push((PropertyId::Filter, Arc::clone(url)));
          }
        }
        ctx.style.filter = functions.clone();
      }
      PropertyValue::Keyword(kw) if kw == "none" => ctx.style.filter.clear(),
      _ => {}
    },
    PropertyId::Clip => match value {
      PropertyValue::Rect(rect) => ctx.style.clip = Some(rect.clone()),
      PropertyValue::Keyword(kw) if kw == "auto" => ctx.style.clip = None,
      _ => {}
    },
    PropertyId::ClipPath => match value {
      PropertyValue::Shape(shape) => ctx.style.clip_path = ClipPath::Shape(shape.clone()),
      PropertyValue::Url(url) => {
        ctx
          .state
          .pending_resources
          .push((PropertyId::ClipPath, Arc::clone(url)));
        ctx.style.clip_path = ClipPath::Url(Arc::clone(url));
      }
      PropertyValue::Keyword(kw) if kw == "none" => ctx.style.clip_path = ClipPath::None,
      _ => {}
    },
    PropertyId::Content => match value {
      PropertyValue::Content(items) => {
        for item in items {
          if let ContentItem::Image(image) = item {
            if let Some(url) = image.pending_url() {
              ctx
                .state
                .pending_resources
                .push((PropertyId::Content, Arc::clone(url)));
            }
          }
        }
        ctx.style.content = ContentValue::Items(items.clone());
      }
      PropertyValue::Keyword(kw) if kw == "normal" => ctx.style.content = ContentValue::Normal,
      PropertyValue::Keyword(kw) if kw == "none" => ctx.style.content = ContentValue::None,
      _ => {}
    },
    PropertyId::Quotes => match value {
      PropertyValue::QuotePairs(pairs) => {
        ctx.style.inherited_mut().quotes = Quotes {
          pairs: pairs.clone(),
        }
      }
      PropertyValue::Keyword(kw) if kw == "none" => {
        ctx.style.inherited_mut().quotes = Quotes::default()
      }
      _ => {}
    },
    PropertyId::CounterIncrement => match value {
      PropertyValue::Counters(counters) => ctx.style.counter_increment = counters.clone(),
      PropertyValue::Keyword(kw) if kw == "none" => ctx.style.counter_increment.clear(),
      _ => {}
    },
    PropertyId::CounterReset => match value {
      PropertyValue::Counters(counters) => ctx.style.counter_reset = counters.clone(),
      PropertyValue::Keyword(kw) if kw == "none" => ctx.style.counter_reset.clear(),
      _ => {}
    },
    _ => {}
  }
}

fn second_tier_inherit(ctx: &mut ApplyCtx<'_>, id: PropertyId) {
  match id {
    PropertyId::BoxShadow => ctx.style.box_shadow = ctx.parent.box_shadow.clone(),
    PropertyId::TextShadow => {
      let shadows = ctx.parent.inherited().text_shadow.clone();
      ctx.style.inherited_mut().text_shadow = shadows;
    }
    PropertyId::Transform => ctx.style.transform = ctx.parent.transform.clone(),
    PropertyId::Filter => ctx.style.filter = ctx.parent.filter.clone(),
    PropertyId::Clip => ctx.style.clip = ctx.parent.clip.clone(),
    PropertyId::ClipPath => ctx.style.clip_path = ctx.parent.clip_path.clone(),
    PropertyId::Content => ctx.style.content = ctx.parent.content.clone(),
    PropertyId::Quotes => {
      let quotes = ctx.parent.inherited().quotes.clone();
      ctx.style.inherited_mut().quotes = quotes;
    }
    PropertyId::CounterIncrement => {
      ctx.style.counter_increment = ctx.parent.counter_increment.clone()
    }
    PropertyId::CounterReset => ctx.style.counter_reset = ctx.parent.counter_reset.clone(),
    _ => {}
  }
}

fn second_tier_initial(ctx: &mut ApplyCtx<'_>, id: PropertyId) {
  match id {
    PropertyId::BoxShadow => ctx.style.box_shadow.clear(),
    PropertyId::TextShadow => {
      if !ctx.style.inherited().text_shadow.is_empty() {
        ctx.style.inherited_mut().text_shadow.clear();
      }
    }
    PropertyId::Transform => ctx.style.transform.clear(),
    PropertyId::Filter => ctx.style.filter.clear(),
    PropertyId::Clip => ctx.style.clip = None,
    PropertyId::ClipPath => ctx.style.clip_path = ClipPath::None,
    PropertyId::Content => ctx.style.content = ContentValue::Normal,
    PropertyId::Quotes => ctx.style.inherited_mut().quotes = Quotes::default(),
    PropertyId::CounterIncrement => ctx.style.counter_increment.clear(),
    PropertyId::CounterReset => ctx.style.counter_reset.clear(),
    _ => {}
  }
}

// ---------------------------------------------------------------------------
// Post-cascade adjustments

/// Structural normalization that cannot be expressed per-property.
fn adjust_style(style: &mut ComputedStyle, role: ElementRole) {
  // Floated, out-of-flow and root boxes are block-level.
  let forces_block = style.float != Float::None
    || style.position.is_out_of_flow()
    || role == ElementRole::Root;
  if forces_block && style.display.is_inline_level() {
    style.display = style.display.blockified();
  }

  // Table rows ignore relative positioning.
  if role == ElementRole::TableRow && style.position == Position::Relative {
    style.position = Position::Static;
  }

  // Auto z-index canonicalizes to an explicit stacking level once a
  // stacking context exists anyway.
  if style.z_index.is_auto() && (role == ElementRole::Root || style.forces_stacking_context()) {
    style.z_index = ZIndex::Index(0);
  }

  // A single visible overflow axis computes to auto.
  let x_visible = style.overflow_x == Overflow::Visible;
  let y_visible = style.overflow_y == Overflow::Visible;
  if x_visible != y_visible {
    if x_visible {
      style.overflow_x = Overflow::Auto;
    } else {
      style.overflow_y = Overflow::Auto;
    }
  }

  adjust_fill_layers(&mut style.background_layers);
  adjust_fill_layers(&mut style.mask_layers);
  adjust_animation_layers(&mut style.animations);
  adjust_transition_layers(&mut style.transitions);
}

fn cycle_layer_field<L, F: Clone>(layers: &mut [L], slot: fn(&mut L) -> &mut Option<F>) {
  let mut set = 0;
  for layer in layers.iter_mut() {
    if slot(layer).is_some() {
      set += 1;
    } else {
      break;
    }
  }
  if set == 0 {
    return;
  }
  for i in set..layers.len() {
    let value = slot(&mut layers[i % set]).clone();
    *slot(&mut layers[i]) = value;
  }
}

/// The image list fixes the layer count; shorter sub-property lists repeat
/// cyclically, longer ones were already truncated by the lock-step walk.
fn adjust_fill_layers(layers: &mut Vec<FillLayer>) {
  let image_count = layers
    .iter()
    .take_while(|layer| layer.image.is_some())
    .count()
    .max(1);
  layers.truncate(image_count);
  cycle_layer_field(layers, |l| &mut l.attachment);
  cycle_layer_field(layers, |l| &mut l.clip);
  cycle_layer_field(layers, |l| &mut l.origin);
  cycle_layer_field(layers, |l| &mut l.position_x);
  cycle_layer_field(layers, |l| &mut l.position_y);
  cycle_layer_field(layers, |l| &mut l.repeat_x);
  cycle_layer_field(layers, |l| &mut l.repeat_y);
  cycle_layer_field(layers, |l| &mut l.size);
}

fn adjust_animation_layers(layers: &mut Vec<AnimationLayer>) {
  let name_count = layers
    .iter()
    .take_while(|layer| layer.name.is_some())
    .count()
    .max(1);
  layers.truncate(name_count);
  cycle_layer_field(layers, |l| &mut l.duration);
  cycle_layer_field(layers, |l| &mut l.delay);
  cycle_layer_field(layers, |l| &mut l.timing_function);
  cycle_layer_field(layers, |l| &mut l.iteration_count);
  cycle_layer_field(layers, |l| &mut l.direction);
  cycle_layer_field(layers, |l| &mut l.fill_mode);
  cycle_layer_field(layers, |l| &mut l.play_state);
}

fn adjust_transition_layers(layers: &mut Vec<TransitionLayer>) {
  let property_count = layers
    .iter()
    .take_while(|layer| layer.property.is_some())
    .count()
    .max(1);
  layers.truncate(property_count);
  cycle_layer_field(layers, |l| &mut l.duration);
  cycle_layer_field(layers, |l| &mut l.delay);
  cycle_layer_field(layers, |l| &mut l.timing_function);
}

// ---------------------------------------------------------------------------
// Resource post-pass

/// Resolves every pending resource reference, in property-id order. The
/// loader may answer `Pending`; the style keeps the raw reference and a
/// later re-resolution picks the handle up.
fn resolve_pending_resources(
  style: &mut ComputedStyle,
  mut pending: Vec<(PropertyId, Arc<str>)>,
  loader: &mut dyn ResourceLoader,
) {
  pending.sort();
  pending.dedup();
  for (id, url) in pending {
    match loader.load(id, &url) {
      ResourceStatus::Loaded(handle) => attach_resource(style, id, &url, handle),
      ResourceStatus::Pending => {}
    }
  }
}

fn attach_resource(style: &mut ComputedStyle, id: PropertyId, url: &str, handle: ResourceHandle) {
  let patch = |image: &mut ImageSource| {
    if matches!(image, ImageSource::Url(u) if **u == *url) {
      *image = ImageSource::Resource(handle);
    }
  };
  match id {
    PropertyId::BackgroundImage => {
      for layer in &mut style.background_layers {
        if let Some(image) = layer.image.as_mut() {
          patch(image);
        }
      }
    }
    PropertyId::MaskImage => {
      for layer in &mut style.mask_layers {
        if let Some(image) = layer.image.as_mut() {
          patch(image);
        }
      }
    }
    PropertyId::ListStyleImage => {
      let needs_patch = matches!(
        style.inherited().list_style_image,
        Some(ImageSource::Url(ref u)) if **u == *url
      );
      if needs_patch {
        style.inherited_mut().list_style_image = Some(ImageSource::Resource(handle));
      }
    }
    PropertyId::Content => {
      if let ContentValue::Items(items) = &mut style.content {
        for item in items {
          if let ContentItem::Image(image) = item {
            patch(image);
          }
        }
      }
    }
    // Filter and clip-path references have no handle slot in the computed
    // value; the request itself is what matters (fire-and-forget).
    _ => {}
  }
}

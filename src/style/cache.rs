//! Matched-properties cache
//!
//! Memoizes cascade output keyed by the exact matched-declaration sequence.
//! The key hashes declaration-block identities (allocation addresses), the
//! per-block link-match and whitelist tags, and the origin range boundaries;
//! a hit is only trusted after full structural comparison against the stored
//! key material, so a colliding hash degrades to a miss instead of serving
//! the wrong style.
//!
//! Entries keep their declaration blocks alive. After every
//! [`SWEEP_ADDITION_PERIOD`] insertions the cache sweeps out entries whose
//! blocks it alone still owns — those blocks left the stylesheet and the
//! entry can never be hit again.

use crate::style::computed::ComputedStyle;
use crate::style::declaration::{DeclarationBlock, MatchRanges, MatchResult, PropertyWhitelist};
use rustc_hash::{FxHashMap, FxHasher};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Insertions between eviction sweeps
pub const SWEEP_ADDITION_PERIOD: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct KeyItem {
  block_identity: usize,
  link_match: u8,
  whitelist: PropertyWhitelist,
}

/// One memoized resolution
pub struct CacheEntry {
  key: Vec<KeyItem>,
  ranges: MatchRanges,
  /// Blocks held so identity stays valid and the sweep can see ownership
  blocks: Vec<Arc<DeclarationBlock>>,
  pub style: ComputedStyle,
  pub parent: ComputedStyle,
}

fn key_items(matched: &MatchResult) -> Vec<KeyItem> {
  matched
    .blocks()
    .iter()
    .map(|entry| KeyItem {
      block_identity: Arc::as_ptr(&entry.block) as usize,
      link_match: entry.link_match,
      whitelist: entry.whitelist,
    })
    .collect()
}

/// Content hash over the match result's identity sequence and ranges.
pub fn hash_match_result(matched: &MatchResult) -> u64 {
  let mut hasher = FxHasher::default();
  for entry in matched.blocks() {
    hasher.write_usize(Arc::as_ptr(&entry.block) as usize);
    hasher.write_u8(entry.link_match);
    (entry.whitelist as u8).hash(&mut hasher);
  }
  let ranges = matched.ranges();
  for range in [ranges.ua, ranges.user, ranges.author] {
    match range {
      Some((first, last)) => {
        hasher.write_usize(first);
        hasher.write_usize(last);
      }
      None => hasher.write_usize(usize::MAX),
    }
  }
  hasher.finish()
}

/// The cache proper. Owned by the style engine; never shared.
#[derive(Default)]
pub struct MatchedPropertiesCache {
  entries: FxHashMap<u64, CacheEntry>,
  additions_since_sweep: usize,
}

impl MatchedPropertiesCache {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Looks up and structurally verifies an entry.
  pub fn find(&self, hash: u64, matched: &MatchResult) -> Option<&CacheEntry> {
    let entry = self.entries.get(&hash)?;
    if !Self::verify(entry, matched) {
      log::debug!("matched-properties cache hash collision, treating as miss");
      return None;
    }
    Some(entry)
  }

  fn verify(entry: &CacheEntry, matched: &MatchResult) -> bool {
    if entry.ranges != matched.ranges() || entry.key.len() != matched.len() {
      return false;
    }
    entry
      .key
      .iter()
      .zip(matched.blocks())
      .all(|(item, block)| {
        item.block_identity == Arc::as_ptr(&block.block) as usize
          && item.link_match == block.link_match
          && item.whitelist == block.whitelist
      })
  }

  /// Stores a resolution. Styles are cloned by the caller; the cache takes
  /// ownership of the clones.
  pub fn add(
    &mut self,
    hash: u64,
    matched: &MatchResult,
    style: ComputedStyle,
    parent: ComputedStyle,
  ) {
    self.entries.insert(
      hash,
      CacheEntry {
        key: key_items(matched),
        ranges: matched.ranges(),
        blocks: matched
          .blocks()
          .iter()
          .map(|entry| Arc::clone(&entry.block))
          .collect(),
        style,
        parent,
      },
    );
    self.additions_since_sweep += 1;
    if self.additions_since_sweep >= SWEEP_ADDITION_PERIOD {
      self.sweep();
    }
  }

  /// Evicts entries whose declaration blocks the cache alone keeps alive.
  pub fn sweep(&mut self) {
    let before = self.entries.len();
    self
      .entries
      .retain(|_, entry| entry.blocks.iter().all(|block| Arc::strong_count(block) > 1));
    self.additions_since_sweep = 0;
    let evicted = before - self.entries.len();
    if evicted > 0 {
      log::debug!("matched-properties cache sweep evicted {evicted} entries");
    }
  }

  /// Drops everything; called on stylesheet change.
  pub fn invalidate(&mut self) {
    self.entries.clear();
    self.additions_since_sweep = 0;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::style::color::Rgba;
  use crate::style::declaration::{Declaration, PropertyValue, LINK_MATCH_ALL, Origin};
  use crate::style::properties::PropertyId;

  fn block() -> Arc<DeclarationBlock> {
    DeclarationBlock::new(vec![Declaration::new(
      PropertyId::Color,
      PropertyValue::Color(Rgba::BLACK),
    )])
  }

  fn match_result(blocks: &[Arc<DeclarationBlock>]) -> MatchResult {
    let mut result = MatchResult::new();
    for block in blocks {
      result.add_author_block(Arc::clone(block));
    }
    result
  }

  #[test]
  fn identical_match_results_hit() {
    let shared = block();
    let a = match_result(&[Arc::clone(&shared)]);
    let b = match_result(&[Arc::clone(&shared)]);
    let mut cache = MatchedPropertiesCache::new();
    let hash = hash_match_result(&a);
    cache.add(hash, &a, ComputedStyle::initial(), ComputedStyle::initial());
    assert_eq!(hash_match_result(&b), hash);
    assert!(cache.find(hash, &b).is_some());
  }

  #[test]
  fn different_blocks_do_not_verify() {
    let a = match_result(&[block()]);
    let b = match_result(&[block()]);
    let mut cache = MatchedPropertiesCache::new();
    let hash = hash_match_result(&a);
    cache.add(hash, &a, ComputedStyle::initial(), ComputedStyle::initial());
    // Force the colliding-hash path by looking b up under a's hash.
    assert!(cache.find(hash, &b).is_none());
  }

  #[test]
  fn link_match_is_key_material() {
    let shared = block();
    let mut a = MatchResult::new();
    a.add_block(Arc::clone(&shared), Origin::Author, LINK_MATCH_ALL, PropertyWhitelist::None)
      .unwrap();
    let mut b = MatchResult::new();
    b.add_block(
      Arc::clone(&shared),
      Origin::Author,
      crate::style::declaration::LINK_MATCH_VISITED,
      PropertyWhitelist::None,
    )
    .unwrap();
    assert_ne!(hash_match_result(&a), hash_match_result(&b));
  }

  #[test]
  fn sweep_evicts_entries_for_dropped_blocks() {
    let kept = block();
    let dropped = block();
    let kept_result = match_result(&[Arc::clone(&kept)]);
    let dropped_result = match_result(&[Arc::clone(&dropped)]);

    let mut cache = MatchedPropertiesCache::new();
    cache.add(
      hash_match_result(&kept_result),
      &kept_result,
      ComputedStyle::initial(),
      ComputedStyle::initial(),
    );
    cache.add(
      hash_match_result(&dropped_result),
      &dropped_result,
      ComputedStyle::initial(),
      ComputedStyle::initial(),
    );
    assert_eq!(cache.len(), 2);

    // The stylesheet drops its block; only the cache's clones remain.
    drop(dropped_result);
    drop(dropped);
    cache.sweep();
    assert_eq!(cache.len(), 1);
    assert!(cache
      .find(hash_match_result(&kept_result), &kept_result)
      .is_some());
  }

  #[test]
  fn sweep_triggers_after_the_addition_period() {
    let mut cache = MatchedPropertiesCache::new();
    let mut doomed = Vec::new();
    for _ in 0..(SWEEP_ADDITION_PERIOD - 1) {
      let b = block();
      let result = match_result(&[Arc::clone(&b)]);
      cache.add(
        hash_match_result(&result),
        &result,
        ComputedStyle::initial(),
        ComputedStyle::initial(),
      );
      doomed.push(result);
    }
    // External owners go away before the sweep threshold is reached.
    drop(doomed);
    assert_eq!(cache.len(), SWEEP_ADDITION_PERIOD - 1);

    let live = block();
    let live_result = match_result(&[Arc::clone(&live)]);
    cache.add(
      hash_match_result(&live_result),
      &live_result,
      ComputedStyle::initial(),
      ComputedStyle::initial(),
    );
    // The hundredth addition swept everything unowned.
    assert_eq!(cache.len(), 1);
  }

  #[test]
  fn invalidate_clears_all_entries() {
    let b = block();
    let result = match_result(&[Arc::clone(&b)]);
    let mut cache = MatchedPropertiesCache::new();
    cache.add(
      hash_match_result(&result),
      &result,
      ComputedStyle::initial(),
      ComputedStyle::initial(),
    );
    cache.invalidate();
    assert!(cache.is_empty());
  }
}

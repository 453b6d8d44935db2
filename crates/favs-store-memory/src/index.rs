//! Per-user favorite index.

use std::collections::{BTreeMap, HashMap};

use favs_core::user::UserFavorite;

/// One user's favorites, iterable in insertion order.
///
/// Entries are keyed by a per-index sequence number so that pagination walks
/// only `offset + limit` entries and page boundaries only shift when entries
/// before them are removed.
#[derive(Debug, Default)]
pub(crate) struct FavoriteIndex {
  next_seq: u64,
  entries:  BTreeMap<u64, UserFavorite>,
  by_asset: HashMap<String, u64>,
}

impl FavoriteIndex {
  pub fn len(&self) -> usize { self.entries.len() }

  pub fn contains(&self, asset_id: &str) -> bool {
    self.by_asset.contains_key(asset_id)
  }

  /// Insert `favorite` unless its asset is already present. Returns whether
  /// it was inserted.
  pub fn insert(&mut self, favorite: UserFavorite) -> bool {
    if self.contains(&favorite.asset_id) {
      return false;
    }
    let seq = self.next_seq;
    self.next_seq += 1;
    self.by_asset.insert(favorite.asset_id.clone(), seq);
    self.entries.insert(seq, favorite);
    true
  }

  pub fn remove(&mut self, asset_id: &str) -> Option<UserFavorite> {
    let seq = self.by_asset.remove(asset_id)?;
    self.entries.remove(&seq)
  }

  pub fn get_mut(&mut self, asset_id: &str) -> Option<&mut UserFavorite> {
    let seq = self.by_asset.get(asset_id)?;
    self.entries.get_mut(seq)
  }

  pub fn page(&self, limit: usize, offset: usize) -> Vec<UserFavorite> {
    self
      .entries
      .values()
      .skip(offset)
      .take(limit)
      .cloned()
      .collect()
  }
}

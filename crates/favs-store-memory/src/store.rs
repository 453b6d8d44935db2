//! [`MemoryStore`] — the in-process implementation of [`FavoritesStore`].

use std::{
  collections::{BTreeMap, HashMap},
  sync::Arc,
};

use chrono::Utc;
use favs_core::{
  Error, Result,
  asset::Asset,
  store::FavoritesStore,
  user::{User, UserFavorite},
};
use tokio::sync::RwLock;

use crate::index::FavoriteIndex;

// ─── State ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct State {
  /// Canonical asset storage, ordered by id.
  assets:    BTreeMap<String, Arc<Asset>>,
  users:     HashMap<String, User>,
  /// user id → that user's favorites.
  favorites: HashMap<String, FavoriteIndex>,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A favorites store held entirely in memory.
///
/// Mutations take the write lock for their whole duration; reads share the
/// read lock. Nothing inside the lock awaits, so every operation runs to
/// completion once it has the lock.
///
/// Cloning is cheap — clones share the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  state: Arc<RwLock<State>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }
}

impl FavoritesStore for MemoryStore {
  type Error = Error;

  // ── Assets ────────────────────────────────────────────────────────────────

  async fn create_asset(&self, asset: Asset) -> Result<()> {
    let mut state = self.state.write().await;
    if state.assets.contains_key(asset.id()) {
      return Err(Error::AssetAlreadyExists(asset.id().to_owned()));
    }
    state.assets.insert(asset.id().to_owned(), Arc::new(asset));
    Ok(())
  }

  async fn get_asset(&self, asset_id: &str) -> Result<Arc<Asset>> {
    let state = self.state.read().await;
    state
      .assets
      .get(asset_id)
      .cloned()
      .ok_or_else(|| Error::AssetNotFound(asset_id.to_owned()))
  }

  async fn update_asset(&self, mut asset: Asset) -> Result<()> {
    let mut state = self.state.write().await;
    if !state.assets.contains_key(asset.id()) {
      return Err(Error::AssetNotFound(asset.id().to_owned()));
    }

    let now = Utc::now();
    asset.set_updated_at(now.max(asset.created_at()));
    let asset = Arc::new(asset);
    let asset_id = asset.id().to_owned();

    for index in state.favorites.values_mut() {
      if let Some(favorite) = index.get_mut(&asset_id) {
        favorite.asset = Arc::clone(&asset);
        favorite.updated_at = now;
      }
    }
    state.assets.insert(asset_id, asset);
    Ok(())
  }

  async fn delete_asset(&self, asset_id: &str) -> Result<()> {
    let mut state = self.state.write().await;
    if state.assets.remove(asset_id).is_none() {
      return Err(Error::AssetNotFound(asset_id.to_owned()));
    }
    for index in state.favorites.values_mut() {
      index.remove(asset_id);
    }
    Ok(())
  }

  async fn list_assets(
    &self,
    limit: usize,
    offset: usize,
  ) -> Result<Vec<Arc<Asset>>> {
    let state = self.state.read().await;
    Ok(
      state
        .assets
        .values()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect(),
    )
  }

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn create_user(&self, user: User) -> Result<()> {
    let mut state = self.state.write().await;
    state.favorites.entry(user.id.clone()).or_default();
    state.users.insert(user.id.clone(), user);
    Ok(())
  }

  async fn get_user(&self, user_id: &str) -> Result<User> {
    let state = self.state.read().await;
    state
      .users
      .get(user_id)
      .cloned()
      .ok_or_else(|| Error::UserNotFound(user_id.to_owned()))
  }

  // ── Favorites ─────────────────────────────────────────────────────────────

  async fn add_favorite(&self, user_id: &str, asset: &Asset) -> Result<()> {
    let mut state = self.state.write().await;
    if !state.users.contains_key(user_id) {
      return Err(Error::UserNotFound(user_id.to_owned()));
    }
    let stored = state
      .assets
      .get(asset.id())
      .cloned()
      .ok_or_else(|| Error::AssetNotFound(asset.id().to_owned()))?;

    let index = state.favorites.entry(user_id.to_owned()).or_default();
    if !index.insert(UserFavorite::new(user_id, stored)) {
      return Err(Error::favorite_exists(user_id, asset.id()));
    }
    Ok(())
  }

  async fn remove_favorite(&self, user_id: &str, asset_id: &str) -> Result<()> {
    let mut state = self.state.write().await;
    if !state.users.contains_key(user_id) {
      return Err(Error::UserNotFound(user_id.to_owned()));
    }
    state
      .favorites
      .get_mut(user_id)
      .and_then(|index| index.remove(asset_id))
      .map(|_| ())
      .ok_or_else(|| Error::favorite_not_found(user_id, asset_id))
  }

  async fn get_user_favorites(
    &self,
    user_id: &str,
    limit: usize,
    offset: usize,
  ) -> Result<Vec<UserFavorite>> {
    let state = self.state.read().await;
    if !state.users.contains_key(user_id) {
      return Err(Error::UserNotFound(user_id.to_owned()));
    }
    Ok(
      state
        .favorites
        .get(user_id)
        .map(|index| index.page(limit, offset))
        .unwrap_or_default(),
    )
  }

  async fn is_favorite(&self, user_id: &str, asset_id: &str) -> Result<bool> {
    let state = self.state.read().await;
    Ok(
      state
        .favorites
        .get(user_id)
        .is_some_and(|index| index.contains(asset_id)),
    )
  }

  async fn get_favorite_count(&self, user_id: &str) -> Result<usize> {
    let state = self.state.read().await;
    Ok(state.favorites.get(user_id).map_or(0, FavoriteIndex::len))
  }

  async fn update_favorite_asset(
    &self,
    user_id: &str,
    asset_id: &str,
    asset: Asset,
  ) -> Result<()> {
    if asset.id() != asset_id {
      return Err(Error::InvalidInput(format!(
        "asset {} cannot replace favorite of asset {asset_id}",
        asset.id()
      )));
    }

    let mut state = self.state.write().await;
    if !state.users.contains_key(user_id) {
      return Err(Error::UserNotFound(user_id.to_owned()));
    }
    let favorite = state
      .favorites
      .get_mut(user_id)
      .and_then(|index| index.get_mut(asset_id))
      .ok_or_else(|| Error::favorite_not_found(user_id, asset_id))?;

    favorite.asset = Arc::new(asset);
    favorite.updated_at = Utc::now();
    Ok(())
  }
}

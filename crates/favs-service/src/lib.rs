//! Request-level orchestration over a [`FavoritesStore`].
//!
//! [`FavoritesService`] checks identifiers and asset payloads before touching
//! the store, materialises assets on first favorite, and logs each operation.
//! Only the individual store calls are atomic; a service operation that makes
//! several of them is not.

use std::sync::Arc;

use favs_core::{
  Error, Result,
  asset::Asset,
  store::{FavoritesStore, Page},
  user::{User, UserFavorite},
};

/// Favorites business logic, generic over the storage backend.
///
/// Cloning is cheap — clones share the same store.
pub struct FavoritesService<S> {
  store: Arc<S>,
}

impl<S> Clone for FavoritesService<S> {
  fn clone(&self) -> Self {
    Self {
      store: Arc::clone(&self.store),
    }
  }
}

fn require_user_id(user_id: &str) -> Result<()> {
  if user_id.is_empty() {
    return Err(Error::InvalidUserId);
  }
  Ok(())
}

fn require_asset_id(asset_id: &str) -> Result<()> {
  if asset_id.is_empty() {
    return Err(Error::InvalidInput("asset id must not be empty".into()));
  }
  Ok(())
}

impl<S> FavoritesService<S>
where
  S: FavoritesStore<Error = Error>,
{
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub fn store(&self) -> &Arc<S> { &self.store }

  // ── Favorites ─────────────────────────────────────────────────────────────

  pub async fn get_user_favorites(
    &self,
    user_id: &str,
    page: Page,
  ) -> Result<Vec<UserFavorite>> {
    tracing::info!(
      user_id,
      limit = page.limit,
      offset = page.offset,
      "getting user favorites"
    );
    require_user_id(user_id)?;

    let favorites = self
      .store
      .get_user_favorites(user_id, page.limit, page.offset)
      .await
      .inspect_err(|e| {
        tracing::error!(error = %e, user_id, "failed to get user favorites");
      })?;

    tracing::info!(user_id, count = favorites.len(), "retrieved user favorites");
    Ok(favorites)
  }

  /// Favorite `asset` for `user_id`, storing the asset first if it is new.
  ///
  /// If another request stores the same asset between the existence probe
  /// and the insert, the insert's `AssetAlreadyExists` is ignored and the
  /// favorite is linked to the stored asset. Two concurrent adds of the same
  /// pair still leave one caller with `FavoriteAlreadyExists`.
  pub async fn add_favorite(&self, user_id: &str, asset: Asset) -> Result<()> {
    tracing::info!(
      user_id,
      asset_id = asset.id(),
      asset_type = %asset.kind(),
      "adding asset to favorites"
    );
    require_user_id(user_id)?;
    asset.validate().inspect_err(|e| {
      tracing::error!(error = %e, asset_id = asset.id(), "asset validation failed");
    })?;

    match self.store.get_asset(asset.id()).await {
      Ok(_) => {}
      Err(Error::AssetNotFound(_)) => {
        match self.store.create_asset(asset.clone()).await {
          Ok(()) | Err(Error::AssetAlreadyExists(_)) => {}
          Err(e) => {
            tracing::error!(error = %e, asset_id = asset.id(), "failed to create asset");
            return Err(e);
          }
        }
      }
      Err(e) => return Err(e),
    }

    self
      .store
      .add_favorite(user_id, &asset)
      .await
      .inspect_err(|e| {
        tracing::error!(
          error = %e,
          user_id,
          asset_id = asset.id(),
          "failed to add favorite"
        );
      })?;

    tracing::info!(user_id, asset_id = asset.id(), "added asset to favorites");
    Ok(())
  }

  pub async fn remove_favorite(&self, user_id: &str, asset_id: &str) -> Result<()> {
    tracing::info!(user_id, asset_id, "removing asset from favorites");
    require_user_id(user_id)?;
    require_asset_id(asset_id)?;

    self
      .store
      .remove_favorite(user_id, asset_id)
      .await
      .inspect_err(|e| {
        tracing::error!(error = %e, user_id, asset_id, "failed to remove favorite");
      })?;

    tracing::info!(user_id, asset_id, "removed asset from favorites");
    Ok(())
  }

  /// Change the description of an asset the user has favorited.
  ///
  /// Descriptions belong to the asset, not the favorite: every other user
  /// holding the same asset sees the new description too.
  pub async fn update_favorite_description(
    &self,
    user_id: &str,
    asset_id: &str,
    description: &str,
  ) -> Result<()> {
    tracing::info!(user_id, asset_id, "updating favorite asset description");
    require_user_id(user_id)?;
    require_asset_id(asset_id)?;

    if !self.store.is_favorite(user_id, asset_id).await? {
      return Err(Error::favorite_not_found(user_id, asset_id));
    }

    let mut asset = Arc::unwrap_or_clone(self.store.get_asset(asset_id).await?);
    asset.set_description(description);

    self.store.update_asset(asset).await.inspect_err(|e| {
      tracing::error!(
        error = %e,
        user_id,
        asset_id,
        "failed to update asset description"
      );
    })?;

    tracing::info!(user_id, asset_id, "updated favorite asset description");
    Ok(())
  }

  pub async fn get_favorite_count(&self, user_id: &str) -> Result<usize> {
    require_user_id(user_id)?;
    self.store.get_favorite_count(user_id).await.inspect_err(|e| {
      tracing::error!(error = %e, user_id, "failed to get favorite count");
    })
  }

  pub async fn is_favorite(&self, user_id: &str, asset_id: &str) -> Result<bool> {
    if user_id.is_empty() || asset_id.is_empty() {
      return Err(Error::InvalidInput(
        "user id and asset id must not be empty".into(),
      ));
    }
    self.store.is_favorite(user_id, asset_id).await
  }

  // ── Users ─────────────────────────────────────────────────────────────────

  pub async fn create_user(&self, user: User) -> Result<()> {
    require_user_id(&user.id)?;
    tracing::info!(user_id = %user.id, "creating user");
    self.store.create_user(user).await
  }

  pub async fn get_user(&self, user_id: &str) -> Result<User> {
    require_user_id(user_id)?;
    self.store.get_user(user_id).await
  }

  // ── Assets ────────────────────────────────────────────────────────────────

  pub async fn get_asset(&self, asset_id: &str) -> Result<Arc<Asset>> {
    require_asset_id(asset_id)?;
    self.store.get_asset(asset_id).await
  }

  pub async fn list_assets(&self, page: Page) -> Result<Vec<Arc<Asset>>> {
    self.store.list_assets(page.limit, page.offset).await
  }

  /// Delete an asset; it disappears from every user's favorites.
  pub async fn delete_asset(&self, asset_id: &str) -> Result<()> {
    tracing::info!(asset_id, "deleting asset");
    require_asset_id(asset_id)?;
    self.store.delete_asset(asset_id).await.inspect_err(|e| {
      tracing::error!(error = %e, asset_id, "failed to delete asset");
    })
  }
}

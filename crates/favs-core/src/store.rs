//! The `FavoritesStore` trait and supporting pagination types.
//!
//! The trait is implemented by storage backends (e.g. `favs-store-memory`).
//! Higher layers (`favs-service`, `favs-api`) depend on this abstraction, not
//! on any concrete backend.

use std::{future::Future, sync::Arc};

use crate::{
  asset::Asset,
  user::{User, UserFavorite},
};

// ─── Pagination ──────────────────────────────────────────────────────────────

pub const DEFAULT_PAGE_LIMIT: usize = 50;
pub const MAX_PAGE_LIMIT: usize = 100;

/// A `limit`/`offset` window over a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
  pub limit:  usize,
  pub offset: usize,
}

impl Page {
  /// Clamp raw request values: a missing, non-positive, or over-large limit
  /// becomes [`DEFAULT_PAGE_LIMIT`]; a missing or negative offset becomes 0.
  pub fn clamped(limit: Option<i64>, offset: Option<i64>) -> Self {
    let limit = match limit {
      Some(l) if l > 0 && l <= MAX_PAGE_LIMIT as i64 => l as usize,
      _ => DEFAULT_PAGE_LIMIT,
    };
    let offset = offset.filter(|o| *o > 0).map_or(0, |o| o as usize);
    Self { limit, offset }
  }
}

impl Default for Page {
  fn default() -> Self {
    Self {
      limit:  DEFAULT_PAGE_LIMIT,
      offset: 0,
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a favorites store backend.
///
/// Every operation is linearizable: it appears to take effect at a single
/// instant, and no caller ever observes another operation half-applied.
/// Failures are always one of the [`crate::Error`] conditions and leave the
/// store unchanged.
pub trait FavoritesStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Assets ────────────────────────────────────────────────────────────

  /// Insert a new asset. Fails with `AssetAlreadyExists` if the id is taken.
  fn create_asset(
    &self,
    asset: Asset,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Fetch an asset. The returned handle is an immutable snapshot; changes go
  /// through [`FavoritesStore::update_asset`].
  fn get_asset<'a>(
    &'a self,
    asset_id: &'a str,
  ) -> impl Future<Output = Result<Arc<Asset>, Self::Error>> + Send + 'a;

  /// Replace a stored asset, stamp its `updated_at`, and propagate the new
  /// value into every favorite record that references it, for all users, in
  /// one step.
  fn update_asset(
    &self,
    asset: Asset,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Remove an asset and every favorite record that references it.
  fn delete_asset<'a>(
    &'a self,
    asset_id: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Up to `limit` assets after skipping `offset`. Never fails; an offset past
  /// the end yields an empty list.
  fn list_assets(
    &self,
    limit: usize,
    offset: usize,
  ) -> impl Future<Output = Result<Vec<Arc<Asset>>, Self::Error>> + Send + '_;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Insert or replace a user and make sure it has a favorite index.
  fn create_user(
    &self,
    user: User,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn get_user<'a>(
    &'a self,
    user_id: &'a str,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + 'a;

  // ── Favorites ─────────────────────────────────────────────────────────

  /// Link `asset` (which must already be stored) into the user's favorites.
  ///
  /// The record references the stored asset, not the argument. Fails with
  /// `UserNotFound`, `AssetNotFound`, or `FavoriteAlreadyExists`.
  fn add_favorite<'a>(
    &'a self,
    user_id: &'a str,
    asset: &'a Asset,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  fn remove_favorite<'a>(
    &'a self,
    user_id: &'a str,
    asset_id: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Up to `limit` of the user's favorites after skipping `offset`, oldest
  /// first.
  fn get_user_favorites<'a>(
    &'a self,
    user_id: &'a str,
    limit: usize,
    offset: usize,
  ) -> impl Future<Output = Result<Vec<UserFavorite>, Self::Error>> + Send + 'a;

  /// Whether the pair is favorited. An unknown user is simply `false`.
  fn is_favorite<'a>(
    &'a self,
    user_id: &'a str,
    asset_id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Number of favorites the user holds. An unknown user has zero.
  fn get_favorite_count<'a>(
    &'a self,
    user_id: &'a str,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  /// Replace the asset held by a single favorite record, leaving the asset
  /// table and other users' records untouched.
  fn update_favorite_asset<'a>(
    &'a self,
    user_id: &'a str,
    asset_id: &'a str,
    asset: Asset,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

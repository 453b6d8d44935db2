//! Error types for `favs-core`.
//!
//! Every variant is a deterministic, caller-recoverable condition. None of
//! them indicate that a store's internal state was left inconsistent.

use thiserror::Error;

/// The broad category an [`Error`] belongs to. Boundary layers map these to
/// transport status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
  NotFound,
  Conflict,
  Validation,
}

#[derive(Debug, Error)]
pub enum Error {
  // ── NotFound ──────────────────────────────────────────────────────────
  #[error("asset not found: {0}")]
  AssetNotFound(String),

  #[error("user not found: {0}")]
  UserNotFound(String),

  #[error("favorite not found: user {user_id}, asset {asset_id}")]
  FavoriteNotFound { user_id: String, asset_id: String },

  // ── Conflict ──────────────────────────────────────────────────────────
  #[error("asset already exists: {0}")]
  AssetAlreadyExists(String),

  #[error("favorite already exists: user {user_id}, asset {asset_id}")]
  FavoriteAlreadyExists { user_id: String, asset_id: String },

  // ── Validation ────────────────────────────────────────────────────────
  #[error("invalid input: {0}")]
  InvalidInput(String),

  #[error("missing required field: {0}")]
  MissingRequiredField(&'static str),

  #[error("invalid user id")]
  InvalidUserId,

  #[error("invalid asset type: {0:?}")]
  InvalidAssetType(Option<String>),

  #[error("malformed asset payload: {0}")]
  Decode(#[from] serde_json::Error),
}

impl Error {
  pub fn class(&self) -> ErrorClass {
    match self {
      Self::AssetNotFound(_)
      | Self::UserNotFound(_)
      | Self::FavoriteNotFound { .. } => ErrorClass::NotFound,
      Self::AssetAlreadyExists(_) | Self::FavoriteAlreadyExists { .. } => {
        ErrorClass::Conflict
      }
      Self::InvalidInput(_)
      | Self::MissingRequiredField(_)
      | Self::InvalidUserId
      | Self::InvalidAssetType(_)
      | Self::Decode(_) => ErrorClass::Validation,
    }
  }

  pub fn favorite_not_found(user_id: &str, asset_id: &str) -> Self {
    Self::FavoriteNotFound {
      user_id:  user_id.to_owned(),
      asset_id: asset_id.to_owned(),
    }
  }

  pub fn favorite_exists(user_id: &str, asset_id: &str) -> Self {
    Self::FavoriteAlreadyExists {
      user_id:  user_id.to_owned(),
      asset_id: asset_id.to_owned(),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

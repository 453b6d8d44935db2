//! Users and their favorite records.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::asset::Asset;

/// A pre-provisioned user. Stores never create users implicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  pub id:         String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub email:      Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name:       Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl User {
  pub fn new(id: impl Into<String>) -> Self {
    let now = Utc::now();
    Self {
      id:         id.into(),
      email:      None,
      name:       None,
      created_at: now,
      updated_at: now,
    }
  }

  pub fn with_profile(
    id: impl Into<String>,
    email: impl Into<String>,
    name: impl Into<String>,
  ) -> Self {
    Self {
      email: Some(email.into()),
      name: Some(name.into()),
      ..Self::new(id)
    }
  }
}

/// The link between a user and an asset.
///
/// `asset` is a shared handle onto the asset as it was last written to the
/// store; an asset update replaces the handle in every record that references
/// it, so two favorites of the same asset never disagree.
#[derive(Debug, Clone, Serialize)]
pub struct UserFavorite {
  pub user_id:    String,
  pub asset_id:   String,
  pub asset:      Arc<Asset>,
  pub added_at:   DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl UserFavorite {
  /// A new record stamped with the current time.
  pub fn new(user_id: impl Into<String>, asset: Arc<Asset>) -> Self {
    let now = Utc::now();
    Self {
      user_id: user_id.into(),
      asset_id: asset.id().to_owned(),
      asset,
      added_at: now,
      updated_at: now,
    }
  }
}

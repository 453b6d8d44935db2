//! Handlers for `/assets` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/assets` | `?limit`, `?offset`; ordered by asset id |
//! | `GET`    | `/assets/{asset_id}` | 404 if not found |
//! | `DELETE` | `/assets/{asset_id}` | Also removes it from every user's favorites |

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use favs_core::{Error, asset::Asset, store::FavoritesStore};
use favs_service::FavoritesService;

use crate::{
  pagination::PaginationParams,
  response::{ApiResult, Message, ok},
};

/// `GET /assets[?limit=..][&offset=..]`
pub async fn list<S>(
  State(service): State<FavoritesService<S>>,
  Query(params): Query<PaginationParams>,
) -> ApiResult<Vec<Arc<Asset>>>
where
  S: FavoritesStore<Error = Error> + 'static,
{
  Ok(ok(service.list_assets(params.page()).await?))
}

/// `GET /assets/{asset_id}`
pub async fn get_one<S>(
  State(service): State<FavoritesService<S>>,
  Path(asset_id): Path<String>,
) -> ApiResult<Arc<Asset>>
where
  S: FavoritesStore<Error = Error> + 'static,
{
  Ok(ok(service.get_asset(&asset_id).await?))
}

/// `DELETE /assets/{asset_id}`
pub async fn delete_one<S>(
  State(service): State<FavoritesService<S>>,
  Path(asset_id): Path<String>,
) -> ApiResult<Message>
where
  S: FavoritesStore<Error = Error> + 'static,
{
  service.delete_asset(&asset_id).await?;
  Ok(ok(Message {
    message: "Asset deleted",
  }))
}

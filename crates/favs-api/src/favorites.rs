//! Handlers for `/users/{user_id}/favorites` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/users/{user_id}/favorites` | `?limit` (default 50, max 100), `?offset` |
//! | `POST`   | `/users/{user_id}/favorites` | Body: asset payload with a `type` field; 201 |
//! | `DELETE` | `/users/{user_id}/favorites/{asset_id}` | |
//! | `PUT`    | `/users/{user_id}/favorites/{asset_id}` | Body: `{"description":"..."}` |
//! | `GET`    | `/users/{user_id}/favorites/{asset_id}/check` | `{"is_favorite": bool}` |

use axum::{
  Json,
  body::Bytes,
  extract::{Path, Query, State},
  http::StatusCode,
};
use favs_core::{
  Error,
  asset::Asset,
  store::FavoritesStore,
  user::UserFavorite,
};
use favs_service::FavoritesService;
use serde::{Deserialize, Serialize};

use crate::{
  error::ApiError,
  pagination::PaginationParams,
  response::{ApiResult, Envelope, Message, ok},
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /users/{user_id}/favorites[?limit=..][&offset=..]`
pub async fn list<S>(
  State(service): State<FavoritesService<S>>,
  Path(user_id): Path<String>,
  Query(params): Query<PaginationParams>,
) -> ApiResult<Vec<UserFavorite>>
where
  S: FavoritesStore<Error = Error> + 'static,
{
  let favorites = service
    .get_user_favorites(&user_id, params.page())
    .await?;
  Ok(ok(favorites))
}

// ─── Add ──────────────────────────────────────────────────────────────────────

/// `POST /users/{user_id}/favorites` — body is a chart, insight, or audience
/// payload discriminated by its `type` field.
pub async fn create<S>(
  State(service): State<FavoritesService<S>>,
  Path(user_id): Path<String>,
  body: Bytes,
) -> Result<(StatusCode, Json<Envelope<Message>>), ApiError>
where
  S: FavoritesStore<Error = Error> + 'static,
{
  let payload: serde_json::Value =
    serde_json::from_slice(&body).map_err(ApiError::invalid_body)?;
  let asset = Asset::from_payload(payload)?;
  service.add_favorite(&user_id, asset).await?;
  Ok((
    StatusCode::CREATED,
    ok(Message {
      message: "Asset added to favorites",
    }),
  ))
}

// ─── Remove ───────────────────────────────────────────────────────────────────

/// `DELETE /users/{user_id}/favorites/{asset_id}`
pub async fn remove<S>(
  State(service): State<FavoritesService<S>>,
  Path((user_id, asset_id)): Path<(String, String)>,
) -> ApiResult<Message>
where
  S: FavoritesStore<Error = Error> + 'static,
{
  service.remove_favorite(&user_id, &asset_id).await?;
  Ok(ok(Message {
    message: "Asset removed from favorites",
  }))
}

// ─── Update description ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UpdateDescriptionBody {
  #[serde(default)]
  pub description: String,
}

/// `PUT /users/{user_id}/favorites/{asset_id}` — body: `{"description":"..."}`.
///
/// The description belongs to the asset, so every user who favorited it sees
/// the change.
pub async fn update_description<S>(
  State(service): State<FavoritesService<S>>,
  Path((user_id, asset_id)): Path<(String, String)>,
  body: Bytes,
) -> ApiResult<Message>
where
  S: FavoritesStore<Error = Error> + 'static,
{
  let body: UpdateDescriptionBody =
    serde_json::from_slice(&body).map_err(ApiError::invalid_body)?;
  service
    .update_favorite_description(&user_id, &asset_id, &body.description)
    .await?;
  Ok(ok(Message {
    message: "Asset description updated",
  }))
}

// ─── Check ────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CheckResponse {
  pub is_favorite: bool,
}

/// `GET /users/{user_id}/favorites/{asset_id}/check`
pub async fn check<S>(
  State(service): State<FavoritesService<S>>,
  Path((user_id, asset_id)): Path<(String, String)>,
) -> ApiResult<CheckResponse>
where
  S: FavoritesStore<Error = Error> + 'static,
{
  let is_favorite = service.is_favorite(&user_id, &asset_id).await?;
  Ok(ok(CheckResponse { is_favorite }))
}

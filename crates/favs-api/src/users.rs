//! Handlers for `/users` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/users` | Body: `{"id":"...","email":"...","name":"..."}`; upsert, 201 |
//! | `GET`  | `/users/{user_id}` | User plus its favorite count; 404 if not found |

use axum::{
  Json,
  body::Bytes,
  extract::{Path, State},
  http::StatusCode,
};
use favs_core::{Error, store::FavoritesStore, user::User};
use favs_service::FavoritesService;
use serde::{Deserialize, Serialize};

use crate::{
  error::ApiError,
  response::{ApiResult, Envelope, ok},
};

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub id:    String,
  pub email: Option<String>,
  pub name:  Option<String>,
}

/// `POST /users`
pub async fn create<S>(
  State(service): State<FavoritesService<S>>,
  body: Bytes,
) -> Result<(StatusCode, Json<Envelope<User>>), ApiError>
where
  S: FavoritesStore<Error = Error> + 'static,
{
  let body: CreateBody =
    serde_json::from_slice(&body).map_err(ApiError::invalid_body)?;
  let user = User {
    email: body.email,
    name: body.name,
    ..User::new(body.id)
  };
  service.create_user(user.clone()).await?;
  Ok((StatusCode::CREATED, ok(user)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UserView {
  #[serde(flatten)]
  pub user:           User,
  pub favorite_count: usize,
}

/// `GET /users/{user_id}`
pub async fn get_one<S>(
  State(service): State<FavoritesService<S>>,
  Path(user_id): Path<String>,
) -> ApiResult<UserView>
where
  S: FavoritesStore<Error = Error> + 'static,
{
  let user = service.get_user(&user_id).await?;
  let favorite_count = service.get_favorite_count(&user_id).await?;
  Ok(ok(UserView {
    user,
    favorite_count,
  }))
}

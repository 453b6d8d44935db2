//! JSON REST API for the favorites service.
//!
//! Exposes axum [`Router`]s backed by a [`FavoritesService`] over any
//! [`FavoritesStore`]. The API owns no state of its own; request tracing and
//! deadlines are layered on by the caller.
//!
//! # Mounting
//!
//! ```rust,ignore
//! axum::serve(listener, favs_api::app(service))
//! ```

pub mod assets;
pub mod error;
pub mod favorites;
pub mod pagination;
pub mod response;
pub mod users;

use axum::{
  Json, Router,
  http::{Method, header},
  routing::{get, post, put},
};
use favs_core::{Error, store::FavoritesStore};
use favs_service::FavoritesService;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

pub use error::ApiError;

use response::Envelope;

/// Build the `/api` routes for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(service: FavoritesService<S>) -> Router<()>
where
  S: FavoritesStore<Error = Error> + 'static,
{
  Router::new()
    // Users
    .route("/users", post(users::create::<S>))
    .route("/users/{user_id}", get(users::get_one::<S>))
    // Favorites
    .route(
      "/users/{user_id}/favorites",
      get(favorites::list::<S>).post(favorites::create::<S>),
    )
    .route(
      "/users/{user_id}/favorites/{asset_id}",
      put(favorites::update_description::<S>).delete(favorites::remove::<S>),
    )
    .route(
      "/users/{user_id}/favorites/{asset_id}/check",
      get(favorites::check::<S>),
    )
    // Assets
    .route("/assets", get(assets::list::<S>))
    .route(
      "/assets/{asset_id}",
      get(assets::get_one::<S>).delete(assets::delete_one::<S>),
    )
    .with_state(service)
}

/// The whole application: `/health`, the API under `/api`, and a permissive
/// CORS policy.
pub fn app<S>(service: FavoritesService<S>) -> Router<()>
where
  S: FavoritesStore<Error = Error> + 'static,
{
  let cors = CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([
      Method::GET,
      Method::POST,
      Method::PUT,
      Method::DELETE,
      Method::OPTIONS,
    ])
    .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

  Router::new()
    .route("/health", get(health))
    .nest("/api", api_router(service))
    .layer(cors)
}

#[derive(Debug, Serialize)]
pub struct Health {
  pub status:  &'static str,
  pub service: &'static str,
}

/// `GET /health`
pub async fn health() -> Json<Envelope<Health>> {
  response::ok(Health {
    status:  "healthy",
    service: "favs",
  })
}

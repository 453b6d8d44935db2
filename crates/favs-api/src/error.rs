//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use favs_core::ErrorClass;
use thiserror::Error;

use crate::response::Envelope;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Domain(#[from] favs_core::Error),
}

impl ApiError {
  /// A request body that could not be parsed.
  pub fn invalid_body(e: impl std::fmt::Display) -> Self {
    Self::Domain(favs_core::Error::InvalidInput(format!(
      "invalid request body: {e}"
    )))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let ApiError::Domain(e) = &self;
    let status = match e.class() {
      ErrorClass::NotFound => StatusCode::NOT_FOUND,
      ErrorClass::Conflict => StatusCode::CONFLICT,
      ErrorClass::Validation => StatusCode::BAD_REQUEST,
    };
    tracing::warn!(error = %e, status = status.as_u16(), "request failed");
    (status, Json(Envelope::<()>::failure(e.to_string()))).into_response()
  }
}

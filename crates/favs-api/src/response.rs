//! The `{ "success": ..., "data": ..., "error": ... }` response envelope.

use axum::Json;
use serde::Serialize;

use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
  pub success: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data:    Option<T>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error:   Option<String>,
}

impl<T: Serialize> Envelope<T> {
  pub fn success(data: T) -> Self {
    Self {
      success: true,
      data:    Some(data),
      error:   None,
    }
  }

  pub fn failure(message: impl Into<String>) -> Self {
    Self {
      success: false,
      data:    None,
      error:   Some(message.into()),
    }
  }
}

/// A human-readable acknowledgement for writes with nothing else to return.
#[derive(Debug, Serialize)]
pub struct Message {
  pub message: &'static str,
}

/// Convenience type alias for handler return values.
pub type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

pub fn ok<T: Serialize>(data: T) -> Json<Envelope<T>> {
  Json(Envelope::success(data))
}

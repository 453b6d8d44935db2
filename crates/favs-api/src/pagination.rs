//! `?limit=&offset=` query parameters.

use favs_core::store::Page;
use serde::Deserialize;

/// Raw pagination parameters.
///
/// Values are kept as strings so that a non-numeric `limit` or `offset` falls
/// back to the default instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
  pub limit:  Option<String>,
  pub offset: Option<String>,
}

impl PaginationParams {
  pub fn page(&self) -> Page {
    let parse = |v: &Option<String>| v.as_deref().and_then(|s| s.trim().parse().ok());
    Page::clamped(parse(&self.limit), parse(&self.offset))
  }
}

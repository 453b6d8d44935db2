//! Core types and trait definitions for the favorites service.
//!
//! This crate is deliberately free of HTTP and storage dependencies.
//! All other crates depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod asset;
pub mod error;
pub mod store;
pub mod user;

pub use error::{Error, ErrorClass, Result};

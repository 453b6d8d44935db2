//! In-process backend for the favorites store.
//!
//! All state lives behind a single [`tokio::sync::RwLock`]; assets, users, and
//! favorite indexes form one consistency domain so cascades across them are
//! atomic.

mod index;
mod store;

pub use store::MemoryStore;

#[cfg(test)]
mod tests;

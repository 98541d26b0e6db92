//! Frevector backend library.
//!
//! Catalog-and-download service for free stock vector graphics: public
//! browse/search/download API plus an admin API for uploads, behind a
//! key-value catalog store and a binary asset store.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod store;

pub use config::Config;
pub use error::{AppError, Result};

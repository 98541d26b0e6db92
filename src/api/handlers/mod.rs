//! HTTP request handlers.

pub mod admin;
pub mod asset;
pub mod download;
pub mod health;
pub mod vectors;

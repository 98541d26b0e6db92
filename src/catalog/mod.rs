//! Catalog: the authoritative view of the vector collection and the rules
//! for deriving listings from it.

pub mod activity;
pub mod repository;

pub use activity::ActivityLog;
pub use repository::{CatalogRepository, CatalogStats, ListFilter};

//! Application services

pub mod catalog;

pub use catalog::{CatalogService, DatasetSource, BUNDLED_DATASET};

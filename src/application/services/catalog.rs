//! Catalog loading service
//!
//! Reads the dataset once (bundled or from a file) and builds the immutable
//! catalog that every query runs against.

use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::Catalog;
use crate::infrastructure::traits::FileSystem;

/// Sample catalog compiled into the binary.
pub const BUNDLED_DATASET: &str = include_str!("../../../data/catalog.json");

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Bundled,
    File(PathBuf),
}

impl DatasetSource {
    /// A configured path wins over the bundled dataset.
    pub fn from_setting(path: Option<PathBuf>) -> Self {
        path.map_or(DatasetSource::Bundled, DatasetSource::File)
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::Bundled => f.write_str("<bundled>"),
            DatasetSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Service for loading the catalog.
pub struct CatalogService {
    fs: Arc<dyn FileSystem>,
}

impl CatalogService {
    /// Create a new catalog service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load and link the catalog from `source`.
    ///
    /// A missing file or a dataset with a missing field is fatal: there is no
    /// partial catalog.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, source: &DatasetSource) -> ApplicationResult<Catalog> {
        let text = match source {
            DatasetSource::Bundled => Cow::Borrowed(BUNDLED_DATASET),
            DatasetSource::File(path) => {
                if !self.fs.is_file(path) {
                    return Err(ApplicationError::DatasetNotFound(path.clone()));
                }
                Cow::Owned(self.fs.read_to_string(path).with_path_context("read dataset", path)?)
            }
        };
        debug!("load: {} bytes from {}", text.len(), source);

        let catalog = Catalog::from_json(&text).map_err(|e| ApplicationError::Dataset {
            origin: source.to_string(),
            source: e,
        })?;

        info!(
            "loaded catalog from {}: {} colleges, {} majors, {} courses, {} organizations",
            source,
            catalog.college_count(),
            catalog.major_count(),
            catalog.course_count(),
            catalog.organizations().len()
        );
        Ok(catalog)
    }
}

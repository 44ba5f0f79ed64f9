//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{CatalogService, DatasetSource};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::Catalog;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Dataset loading
    pub catalog_service: CatalogService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);
        let catalog_service = CatalogService::new(Arc::clone(&fs));

        Self {
            settings,
            fs,
            catalog_service,
        }
    }

    /// Dataset source chosen by the settings.
    pub fn dataset_source(&self) -> DatasetSource {
        DatasetSource::from_setting(self.settings.dataset.clone())
    }

    /// Load the catalog from the configured source.
    pub fn load_catalog(&self) -> ApplicationResult<Catalog> {
        self.catalog_service.load(&self.dataset_source())
    }
}

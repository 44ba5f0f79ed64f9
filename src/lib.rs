//! Read-only query layer over an academic catalog.
//!
//! Colleges own majors, majors own courses, and every course carries a
//! prerequisite expression. The catalog is built once from a dataset and then
//! only read:
//!
//! ```
//! use coursegraph::application::services::BUNDLED_DATASET;
//! use coursegraph::domain::{Catalog, CourseFilter};
//!
//! let catalog = Catalog::from_json(BUNDLED_DATASET).unwrap();
//! let cs171 = catalog.course_with(&CourseFilter::new().code_name("CS-171")).unwrap();
//! let cs172 = catalog.course_with(&CourseFilter::new().code_name("CS-172")).unwrap();
//! assert!(cs171.is_prerequisite_of(&cs172));
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

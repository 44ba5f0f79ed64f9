//! Domain layer: catalog entities, linking, filtering and prerequisite traversal
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod filter;
pub mod parser;
pub mod prerequisites;

pub use arena::{Catalog, CollegeId, CollegeRef, CourseId, CourseRef, MajorId, MajorRef};
pub use builder::CatalogBuilder;
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use filter::{CollegeFilter, CourseFilter, Filter, MajorFilter, OrganizationFilter};
pub use parser::parse_prerequisites;

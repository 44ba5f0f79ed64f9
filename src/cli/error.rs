//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("no {kind} matches {key:?}")]
    NotFound { kind: &'static str, key: String },

    #[error("{prerequisite} is not a strict prerequisite of {course}")]
    NotPrerequisite { prerequisite: String, course: String },
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        ApplicationError::from(e).into()
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        CliError::NotFound {
            kind,
            key: key.into(),
        }
    }

    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } | CliError::NotPrerequisite { .. } => {
                crate::exitcode::NOMATCH
            }
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Serialize { .. } => crate::exitcode::SOFTWARE,
                InfraError::Application(e) => match e {
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                    ApplicationError::DatasetNotFound(_) => crate::exitcode::NOINPUT,
                    ApplicationError::Dataset { .. } | ApplicationError::Domain(_) => {
                        crate::exitcode::DATAERR
                    }
                    ApplicationError::OperationFailed { .. } => crate::exitcode::IOERR,
                },
            },
        }
    }
}

//! Unified error type for every database operation and tool in the crate.

use thiserror::Error;

/// Errors surfaced by data-access operations, configuration loading and the tools.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A required environment variable is not set
    #[error("Missing required environment variable {name}")]
    MissingEnv {
        /// Name of the variable
        name: String,
    },

    /// Caller supplied input that cannot be stored
    #[error("Invalid input: {message}")]
    Validation {
        /// Which field was rejected and why
        message: String,
    },

    /// The addressed record does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record, e.g. `"distributor"`
        entity: &'static str,
        /// Identity that was looked up
        id: String,
    },

    /// The underlying store rejected or failed the request
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Reading or writing a local file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Formatting generated text failed
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// An external command exited unsuccessfully
    #[error("Command `{command}` failed: {message}")]
    Command {
        /// The command line that was run
        command: String,
        /// Exit status or spawn failure
        message: String,
    },
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_entity_and_id() {
        let err = Error::not_found("machine", 42);
        assert_eq!(err.to_string(), "machine not found: 42");
    }

    #[test]
    fn test_missing_env_message() {
        let err = Error::MissingEnv {
            name: "DATABASE_URL".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing required environment variable DATABASE_URL"
        );
    }
}

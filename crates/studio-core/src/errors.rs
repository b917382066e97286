//! Error types for the Studio code generator.

use thiserror::Error;

/// Result type alias for code generation.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Top-level error type for code generation.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The input was parsed but cannot be turned into code.
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    /// The schema document could not be parsed.
    #[error("Invalid schema JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The caller supplied input the generator cannot work with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    /// A nested state update was requested for a path with fewer than two
    /// segments.
    #[error("keyPath needs a length larger than 1 to build nested state object")]
    InvalidPathLength { path: Vec<String> },

    /// The state prefix is empty or does not leave any segment to update.
    #[error("State prefix [{}] cannot address key path [{}]", .prefix.join(", "), .path.join(", "))]
    InvalidStatePrefix {
        prefix: Vec<String>,
        path: Vec<String>,
    },

    /// An event names an action outside the supported set.
    #[error("{action} is not a valid action.")]
    UnknownAction { action: String },

    /// The component schema is missing or misusing a required part.
    #[error("Invalid schema at {location}: {reason}")]
    InvalidSchema { location: String, reason: String },
}

impl InvalidInputError {
    pub(crate) fn schema(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSchema {
            location: location.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_length_message() {
        let err = InvalidInputError::InvalidPathLength {
            path: vec!["firstName".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "keyPath needs a length larger than 1 to build nested state object"
        );
    }

    #[test]
    fn test_unknown_action_message() {
        let err: CodegenError = InvalidInputError::UnknownAction {
            action: "Amplify.Teleport".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Amplify.Teleport is not a valid action.");
    }
}

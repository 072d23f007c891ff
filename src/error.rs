//! Error types for the haulage pricing engine.
//!
//! The calculation core is infallible: zero denominators degrade to zero and
//! unknown enum values fall back to defined defaults. Errors only arise at the
//! edges, when configuration is loaded or an HTTP request is validated.

use thiserror::Error;

/// The main error type for the haulage pricing engine.
///
/// # Example
///
/// ```
/// use haulage_pricing::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/settings.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/settings.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Application settings contain a value the engine cannot amortize with.
    #[error("Invalid setting '{field}': {message}")]
    InvalidSettings {
        /// The settings field that was rejected.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A request field was rejected before calculation.
    #[error("Invalid request field '{field}': {message}")]
    InvalidRequest {
        /// The request field that was rejected.
        field: String,
        /// Why the value was rejected.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/settings.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/settings.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_settings_displays_field_and_message() {
        let error = EngineError::InvalidSettings {
            field: "working_days_per_year".to_string(),
            message: "must be greater than zero".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid setting 'working_days_per_year': must be greater than zero"
        );
    }

    #[test]
    fn test_invalid_request_displays_field_and_message() {
        let error = EngineError::InvalidRequest {
            field: "reference_year".to_string(),
            message: "out of range".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid request field 'reference_year': out of range"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_config_not_found() -> EngineResult<()> {
            Err(EngineError::ConfigNotFound {
                path: "/test".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_config_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}

//! Educator Tools host: error types.

use edutools_core::error::ToolsError;
use thiserror::Error;

/// Startup and runtime errors for the console host.
#[derive(Debug, Error)]
pub enum HostError {
    /// A configuration variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading a file or the terminal failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The teams file is not valid YAML.
    #[error("teams file error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The framework rejected a startup step or a session failed.
    #[error(transparent)]
    Tools(#[from] ToolsError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tools_error_message_is_passed_through() {
        let err = HostError::from(ToolsError::ModuleNotFound("teams".into()));

        assert_eq!(err.to_string(), "module not registered: teams");
    }

    #[test]
    fn test_config_error_message_names_the_problem() {
        let err = HostError::Config("EDU_TOOLS_LOG_FORMAT must be json or pretty".into());

        assert!(err.to_string().starts_with("configuration error:"));
    }
}

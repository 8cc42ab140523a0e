//! Error types for fedkit.

use thiserror::Error;

/// One or more required parameters were absent or empty.
///
/// Carries the missing names in required-name order so callers can
/// prompt for exactly the values that are absent instead of parsing
/// the rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingParameters {
    names: Vec<String>,
}

impl MissingParameters {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Missing parameter names, in required-name order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl std::fmt::Display for MissingParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Leading blank line keeps the list readable under the CLI's
        // own error prefix.
        for name in &self.names {
            write!(f, "\nMissing required parameter '--{}'", name)?;
        }
        Ok(())
    }
}

impl std::error::Error for MissingParameters {}

#[derive(Debug, Error)]
pub enum Error {
    // Configuration errors
    #[error("{0}")]
    MissingParameters(#[from] MissingParameters),

    #[error("Conflicting values for parameter '--{0}'")]
    ConflictingParameter(String),

    #[error("Unknown OIDC provider: {0}")]
    UnknownProvider(String),

    // Storage errors
    #[error("Config storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the error is caused by incomplete or inconsistent user
    /// input, as opposed to a storage failure.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::MissingParameters(_) | Error::ConflictingParameter(_) | Error::UnknownProvider(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameters_message() {
        let missing = MissingParameters::new(vec![
            "oidc-provider-url".to_string(),
            "deployment-branch".to_string(),
        ]);

        let message = missing.to_string();
        assert_eq!(
            message,
            "\nMissing required parameter '--oidc-provider-url'\
             \nMissing required parameter '--deployment-branch'"
        );
    }

    #[test]
    fn test_error_classification() {
        let configuration = Error::MissingParameters(MissingParameters::new(vec![]));
        assert!(configuration.is_configuration());

        let storage = Error::Storage("disk full".to_string());
        assert!(!storage.is_configuration());
    }
}

//! Crate-level error for the fallible edges: scenario loading, export, and
//! serialization. The calculations themselves never fail.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid scenario: {}", join_errors(.0))]
    Config(Vec<ConfigError>),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(vec![err])
    }
}

fn join_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_are_joined() {
        let err = Error::Config(vec![
            ConfigError::new("site.outage_hours", "must be > 0"),
            ConfigError::new("loads[0].watts", "must be > 0"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid scenario: site.outage_hours: must be > 0; loads[0].watts: must be > 0"
        );
    }

    #[test]
    fn single_config_error_converts() {
        let err: Error = ConfigError::new("preset", "unknown").into();
        assert!(matches!(err, Error::Config(ref v) if v.len() == 1));
    }
}

use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use std::fmt;

/// Failures surfaced by binaries embedding the scoring engine.
///
/// Scoring itself is total and never produces one of these.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Serialization(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Serialization(err) => write!(f, "serialization error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Serialization(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn wraps_config_errors_with_source() {
        let err = AppError::from(ConfigError::InvalidFetchTimeout);

        assert_eq!(
            err.to_string(),
            "configuration error: RISK_FETCH_TIMEOUT_MS must be a positive integer"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn wraps_serialization_errors() {
        let parse_err = serde_json::from_str::<u8>("\"high\"").expect_err("not a number");
        let err: AppError = parse_err.into();

        assert!(matches!(err, AppError::Serialization(_)));
        assert!(err.to_string().starts_with("serialization error: "));
    }
}

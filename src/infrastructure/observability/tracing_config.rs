use crate::presentation::config::{Environment, LoggingSettings};

/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: Environment,
    pub json_format: bool,
}

impl TracingConfig {
    /// `LOG_FORMAT=json|text` overrides the configured format.
    pub fn from_settings(environment: Environment, logging: &LoggingSettings) -> Self {
        let json_format = match std::env::var("LOG_FORMAT") {
            Ok(v) => v.eq_ignore_ascii_case("json"),
            Err(_) => logging.json,
        };
        Self {
            environment,
            json_format,
        }
    }
}

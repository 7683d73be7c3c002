//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::{Config, PROVIDER_NAMES};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_broker(config, &mut result);
        Self::validate_providers(config, &mut result);
        Self::validate_probe(config, &mut result);

        Ok(result)
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }

        if config.server.host.is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        }
    }

    fn validate_broker(config: &Config, result: &mut ValidationResult) {
        let default = config.broker.default_provider.as_str();
        if !PROVIDER_NAMES.contains(&default) {
            result.add_error(ValidationError::new(
                "broker.default_provider",
                format!(
                    "Unknown provider '{}', valid values: {:?}",
                    default, PROVIDER_NAMES
                ),
            ));
        }
    }

    fn validate_providers(config: &Config, result: &mut ValidationResult) {
        for (name, provider) in &config.providers {
            if !PROVIDER_NAMES.contains(&name.as_str()) {
                result.add_error(ValidationError::new(
                    format!("providers.{}", name),
                    format!("Unknown provider '{}', valid values: {:?}", name, PROVIDER_NAMES),
                ));
                continue;
            }

            if let Some(ref url) = provider.base_url {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    result.add_error(ValidationError::new(
                        format!("providers.{}.base_url", name),
                        "base_url must start with http:// or https://",
                    ));
                }
            }
        }

        // Keys may also come from the environment.
        let any_configured = PROVIDER_NAMES.iter().any(|name| config.api_key(name).is_some());
        if !any_configured {
            result.add_warning(ValidationWarning::new(
                "providers",
                "No provider has an API key; assistance requests will fail",
            ));
        }
    }

    fn validate_probe(config: &Config, result: &mut ValidationResult) {
        if config.probe.attempts == 0 {
            result.add_error(ValidationError::new(
                "probe.attempts",
                "attempts must be greater than 0",
            ));
        }

        if config.probe.timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "probe.timeout_ms",
                "timeout_ms must be greater than 0",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;

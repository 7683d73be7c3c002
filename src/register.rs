//! Provider construction from configuration.

use std::sync::Arc;

use secrecy::SecretString;
use tracing::{info, warn};

use codehint_config::{api_key_env, Config};
use codehint_core::{ProviderFactory, ProviderRegistry};
use codehint_protocols::provider::{AssistanceProvider, ProviderKind};
use codehint_provider_anthropic::AnthropicProvider;
use codehint_provider_gemini::GeminiProvider;
use codehint_provider_openai::OpenAIProvider;

/// Builds each provider from its `[providers.<kind>]` section.
///
/// A kind with no credential still gets an instance; it reports itself
/// unconfigured.
pub(crate) struct ConfigProviderFactory {
    config: Config,
}

impl ConfigProviderFactory {
    pub(crate) fn new(config: Config) -> Self {
        Self { config }
    }

    fn api_key(&self, kind: ProviderKind) -> SecretString {
        self.config
            .api_key(kind.as_str())
            .unwrap_or_else(|| SecretString::from(""))
    }
}

impl ProviderFactory for ConfigProviderFactory {
    fn create(&self, kind: ProviderKind) -> Arc<dyn AssistanceProvider> {
        let section = self.config.provider(kind.as_str());
        let api_key = self.api_key(kind);

        match kind {
            ProviderKind::OpenAI => {
                let mut provider = match section.base_url {
                    Some(url) => OpenAIProvider::with_url(api_key, url),
                    None => OpenAIProvider::new(api_key),
                };
                if let Some(model) = section.model {
                    provider = provider.with_model(model);
                }
                if let Some(temperature) = section.temperature {
                    provider = provider.with_temperature(temperature);
                }
                Arc::new(provider)
            }
            ProviderKind::Anthropic => {
                let mut provider = match section.base_url {
                    Some(url) => AnthropicProvider::with_url(api_key, url),
                    None => AnthropicProvider::new(api_key),
                };
                if let Some(model) = section.model {
                    provider = provider.with_model(model);
                }
                if let Some(max_tokens) = section.max_tokens {
                    provider = provider.with_max_tokens(max_tokens);
                }
                Arc::new(provider)
            }
            ProviderKind::Gemini => {
                let mut provider = match section.base_url {
                    Some(url) => GeminiProvider::with_url(api_key, url),
                    None => GeminiProvider::new(api_key),
                };
                if let Some(model) = section.model {
                    provider = provider.with_model(model);
                }
                if let Some(temperature) = section.temperature {
                    provider = provider.with_temperature(temperature);
                }
                if let Some(max_tokens) = section.max_tokens {
                    provider = provider.with_max_output_tokens(max_tokens);
                }
                Arc::new(provider)
            }
        }
    }
}

/// The startup selection from `[broker] default_provider`.
pub(crate) fn default_provider(config: &Config) -> ProviderKind {
    match config.broker.default_provider.parse() {
        Ok(kind) => kind,
        Err(e) => {
            warn!("{}; falling back to {}", e, ProviderKind::default());
            ProviderKind::default()
        }
    }
}

pub(crate) fn log_providers(registry: &ProviderRegistry) {
    let configured = registry.list_configured_providers();
    if configured.is_empty() {
        let vars: Vec<String> = ProviderKind::ALL
            .iter()
            .map(|k| api_key_env(k.as_str()))
            .collect();
        warn!("No AI providers configured. Set one of {}", vars.join(", "));
    } else {
        info!("Configured providers: {:?}", configured);
    }
}

/// `codehint providers` output.
pub(crate) fn print_providers(
    config: &Config,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = ProviderRegistry::new(Arc::new(ConfigProviderFactory::new(config.clone())));
    let configured = registry.list_configured_providers();
    let default = default_provider(config);

    match format {
        "json" => {
            let json = serde_json::json!({
                "default": default,
                "configured": configured,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        "table" => {
            println!("{:<12} {:<12} {}", "PROVIDER", "CONFIGURED", "KEY VARIABLE");
            for kind in ProviderKind::ALL {
                let marker = if kind == default { "*" } else { "" };
                println!(
                    "{:<12} {:<12} {}",
                    format!("{}{}", kind, marker),
                    if configured.contains(&kind) { "yes" } else { "no" },
                    api_key_env(kind.as_str())
                );
            }
        }
        other => return Err(format!("Unknown format: {}", other).into()),
    }
    Ok(())
}

#[cfg(test)]
#[path = "register_tests.rs"]
mod tests;

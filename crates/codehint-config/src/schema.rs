//! Configuration schema definitions.

use std::collections::HashMap;
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Provider section names understood by the broker, in selection order.
pub const PROVIDER_NAMES: [&str; 3] = ["openai", "anthropic", "gemini"];

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub broker: BrokerConfig,

    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,

    #[serde(default)]
    pub presentation: PresentationConfig,

    #[serde(default)]
    pub probe: ProbeConfig,
}

impl Config {
    /// Settings for one provider section, empty when the section is absent.
    pub fn provider(&self, name: &str) -> ProviderConfig {
        self.providers.get(name).cloned().unwrap_or_default()
    }

    /// API key for a provider, from its section or from `<NAME>_API_KEY`.
    pub fn api_key(&self, name: &str) -> Option<SecretString> {
        self.provider(name).resolve_api_key(&api_key_env(name))
    }
}

/// Environment variable consulted when a provider section has no key.
pub fn api_key_env(name: &str) -> String {
    format!("{}_API_KEY", name.to_ascii_uppercase())
}

/// Loopback HTTP endpoint the broker listens on.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.bind_addr())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8787
}

/// Broker configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BrokerConfig {
    /// Provider selected before any saved preference is applied.
    #[serde(default = "default_provider")]
    pub default_provider: String,

    /// Where the saved provider preference lives.
    #[serde(default)]
    pub preferences_path: Option<PathBuf>,
}

impl BrokerConfig {
    /// Preference file path with `~` expanded, defaulting to
    /// `~/.codehint/preferences.json`.
    pub fn preferences_path(&self) -> PathBuf {
        match &self.preferences_path {
            Some(p) => PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).as_ref()),
            None => codehint_dir().join("preferences.json"),
        }
    }
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            preferences_path: None,
        }
    }
}

fn default_provider() -> String {
    "openai".to_string()
}

/// Per-provider settings. Unset fields fall back to the provider's defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: Option<SecretString>,

    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub temperature: Option<f32>,

    #[serde(default)]
    pub max_tokens: Option<u32>,
}

impl ProviderConfig {
    /// The configured key, or the value of `env_var` when no key is set.
    pub fn resolve_api_key(&self, env_var: &str) -> Option<SecretString> {
        match &self.api_key {
            Some(key) if !key.expose_secret().trim().is_empty() => Some(key.clone()),
            _ => std::env::var(env_var).ok().map(SecretString::from),
        }
    }
}

/// Where assistance results are shown.
#[derive(Debug, Clone, Deserialize)]
pub struct PresentationConfig {
    /// Base URL of the popup page; `solution.html` is resolved against it.
    #[serde(default = "default_presentation_base")]
    pub base_url: String,

    /// Command used to open the popup URL, e.g. `xdg-open`. When unset the
    /// URL is only logged.
    #[serde(default)]
    pub opener: Option<String>,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            base_url: default_presentation_base(),
            opener: None,
        }
    }
}

fn default_presentation_base() -> String {
    "chrome-extension://codehint".to_string()
}

/// Readiness probe settings for `codehint probe`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    #[serde(default = "default_probe_attempts")]
    pub attempts: u32,

    #[serde(default = "default_probe_delay")]
    pub delay_ms: u64,

    #[serde(default = "default_probe_timeout")]
    pub timeout_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            attempts: default_probe_attempts(),
            delay_ms: default_probe_delay(),
            timeout_ms: default_probe_timeout(),
        }
    }
}

fn default_probe_attempts() -> u32 {
    3
}

fn default_probe_delay() -> u64 {
    1000
}

fn default_probe_timeout() -> u64 {
    2000
}

/// `~/.codehint`, or `.codehint` when no home directory is known.
pub fn codehint_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".codehint"))
        .unwrap_or_else(|| PathBuf::from(".codehint"))
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;

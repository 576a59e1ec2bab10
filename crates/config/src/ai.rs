// AI secrets management
//
// API keys come from environment variables only (ROSTERGRID_OPENAI_KEY
// and friends). Keys are NEVER stored in settings.json.

use std::env;

/// Source of an API key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// Key retrieved from environment variable
    Environment,
    /// No key found
    None,
}

impl KeySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeySource::Environment => "environment",
            KeySource::None => "none",
        }
    }
}

/// Result of key lookup
#[derive(Debug, Clone)]
pub struct KeyLookup {
    pub key: Option<String>,
    pub source: KeySource,
}

/// Get the environment variable name for a provider
pub fn env_var_name(provider: &str) -> String {
    format!("ROSTERGRID_{}_KEY", provider.to_uppercase())
}

/// Get an API key for the specified provider from the environment
/// (`ROSTERGRID_OPENAI_KEY`, etc.)
pub fn get_api_key(provider: &str) -> KeyLookup {
    let env_name = env_var_name(provider);
    if let Ok(key) = env::var(&env_name) {
        if !key.is_empty() {
            return KeyLookup {
                key: Some(key),
                source: KeySource::Environment,
            };
        }
    }

    KeyLookup {
        key: None,
        source: KeySource::None,
    }
}

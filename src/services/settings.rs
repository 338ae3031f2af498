// Runtime Settings
// Resolves each recognized option from the environment, then the config-file secrets

use std::env;
use thiserror::Error;
use tracing::{debug, info};

use super::config_store::{AppConfig, ConfigStore, StoreError};
use super::session::AccessPolicy;

pub const BACKEND_API_KEY: &str = "BACKEND_API_KEY";
pub const BACKEND_ENDPOINT: &str = "BACKEND_ENDPOINT";
pub const AUTHKIT_CLIENT_ID: &str = "AUTHKIT_CLIENT_ID";
pub const AUTHKIT_API_KEY: &str = "AUTHKIT_API_KEY";
pub const STRIPE_API_KEY: &str = "STRIPE_API_KEY";

pub const RECOGNIZED_SECRETS: [&str; 5] = [
    BACKEND_API_KEY,
    BACKEND_ENDPOINT,
    AUTHKIT_CLIENT_ID,
    AUTHKIT_API_KEY,
    STRIPE_API_KEY,
];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("required setting {0} is not set in the environment or the secrets store")]
    Missing(&'static str),
    #[error("{name} is not a valid URL: {value}")]
    InvalidEndpoint { name: &'static str, value: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Where a setting's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingSource {
    Environment,
    SecretsStore,
}

#[derive(Clone, PartialEq, Eq)]
pub struct IdentityKeys {
    pub client_id: String,
    pub api_key: String,
}

/// Everything needed to talk to the outside world, fully resolved.
#[derive(Clone)]
pub struct Settings {
    pub api_key: String,
    pub endpoint: String,
    pub identity: Option<IdentityKeys>,
    pub payments_api_key: Option<String>,
    pub config: AppConfig,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &mask_secret(&self.api_key))
            .field("endpoint", &self.endpoint)
            .field("identity", &self.identity.as_ref().map(|i| i.client_id.as_str()))
            .field("payments_api_key", &self.payments_api_key.as_deref().map(mask_secret))
            .field("render", &self.config.render)
            .field("access", &self.config.access)
            .finish()
    }
}

impl Settings {
    /// Load the config file and resolve every recognized option.
    pub fn resolve(store: &ConfigStore) -> Result<Self, ConfigError> {
        let config = store.load()?;
        Self::from_sources(config, |name| env::var(name).ok())
    }

    /// Resolve against an explicit environment lookup, for callers and tests
    /// that must not read the process environment.
    pub fn from_sources<F>(config: AppConfig, env_lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &'static str| lookup_setting(name, &config, &env_lookup);
        let require = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        let api_key = require(BACKEND_API_KEY)?;
        let endpoint = require(BACKEND_ENDPOINT)?;
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidEndpoint {
                name: BACKEND_ENDPOINT,
                value: endpoint,
            });
        }

        let gated = config.access.policy == AccessPolicy::SignInRequired;
        let (identity, payments_api_key) = if gated {
            let identity = IdentityKeys {
                client_id: require(AUTHKIT_CLIENT_ID)?,
                api_key: require(AUTHKIT_API_KEY)?,
            };
            (Some(identity), Some(require(STRIPE_API_KEY)?))
        } else {
            let identity = match (lookup(AUTHKIT_CLIENT_ID), lookup(AUTHKIT_API_KEY)) {
                (Some(client_id), Some(api_key)) => Some(IdentityKeys { client_id, api_key }),
                _ => None,
            };
            (identity, lookup(STRIPE_API_KEY))
        };

        info!(
            endpoint = %endpoint,
            access = %config.access.policy,
            identity_configured = identity.is_some(),
            payments_configured = payments_api_key.is_some(),
            "settings.resolved"
        );

        Ok(Self {
            api_key,
            endpoint,
            identity,
            payments_api_key,
            config,
        })
    }
}

fn lookup_setting<F>(name: &str, config: &AppConfig, env_lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = env_lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        debug!(name, source = ?SettingSource::Environment, "setting.found");
        return Some(value);
    }

    let value = config
        .secrets
        .get(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())?;
    debug!(name, source = ?SettingSource::SecretsStore, "setting.found");
    Some(value)
}

/// `abcd…wxyz`-style rendering for logs and `config show`.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Layered configuration for the bridge.
//!
//! A [`Config`] is an ordered list of [`ConfigProvider`]s; later providers
//! override earlier ones:
//!
//! 1. `FileConfigProvider` – `bridgelog.{toml,json,yaml}`
//! 2. `EnvConfigProvider`  – `BRIDGELOG_LOGGER_NAME=billing`
//! 3. *your* provider implementing [`ConfigProvider`]
//!
//! Keys read by the loader:
//!
//! | key | type | default | description |
//! |-----|------|---------|-------------|
//! | `logger.name`       | string | application name | Channel name |
//! | `logger.handlers`   | array  | `[]` | `{type, config}` handler descriptors, first runs first |
//! | `logger.processors` | array  | `[]` | `{type, config}` processor descriptors, applied in order |

mod env;
pub mod error;
mod file;


pub use env::EnvConfigProvider;
pub use error::ConfigError;
pub use file::FileConfigProvider;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Debug;
use std::sync::Arc;

use crate::handlers::HandlerConfig;
use crate::processors::ProcessorConfig;

/// A source of configuration values. Object-safe.
pub trait ConfigProvider: Debug + Send + Sync {
    /// Check if the provider has a value for the given key.
    fn has(&self, key: &str) -> bool;

    /// Name of the provider, for diagnostics.
    fn provider_name(&self) -> &str;

    /// Get a raw value by dot-separated key.
    fn get_raw(&self, key: &str) -> Result<Option<Value>, ConfigError>;
}

/// Typed access on top of [`ConfigProvider`]. Not object-safe.
pub trait ConfigProviderExt: ConfigProvider {
    /// Get a configuration value by key and deserialize it to the specified type.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        deserialize(key, self.get_raw(key)?)
    }
}

impl<T: ConfigProvider> ConfigProviderExt for T {}

fn deserialize<T: DeserializeOwned>(key: &str, raw: Option<Value>) -> Result<Option<T>, ConfigError> {
    match raw {
        Some(value) => serde_json::from_value(value).map(Some).map_err(|e| {
            ConfigError::ParseError(format!("failed to deserialize '{key}': {e}"))
        }),
        None => Ok(None),
    }
}

/// Builder for [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    providers: Vec<Arc<dyn ConfigProvider>>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider. It overrides every provider added before it.
    pub fn with_provider<P: ConfigProvider + 'static>(mut self, provider: P) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    /// Add a provider that is already shared.
    pub fn with_shared_provider(mut self, provider: Arc<dyn ConfigProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn build(self) -> Config {
        Config {
            providers: self.providers,
        }
    }
}

/// Ordered set of providers.
#[derive(Debug, Clone, Default)]
pub struct Config {
    providers: Vec<Arc<dyn ConfigProvider>>,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Raw value from the last provider that has the key.
    pub fn get_raw(&self, key: &str) -> Result<Option<Value>, ConfigError> {
        for provider in self.providers.iter().rev() {
            if provider.has(key) {
                return provider.get_raw(key);
            }
        }
        Ok(None)
    }

    /// Typed value from the last provider that has the key.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        deserialize(key, self.get_raw(key)?)
    }

    /// Typed value with a fallback.
    pub fn get_or_default<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, ConfigError> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Names of the providers, lowest priority first.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.provider_name()).collect()
    }

    /// Read the `logger.*` section.
    pub fn logger_settings(&self) -> Result<LoggerSettings, ConfigError> {
        Ok(LoggerSettings {
            name: self.get("logger.name")?,
            handlers: self.get_or_default("logger.handlers", Vec::new())?,
            processors: self.get_or_default("logger.processors", Vec::new())?,
        })
    }
}

/// The `logger.*` configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Channel name; the application name is used when absent
    #[serde(default)]
    pub name: Option<String>,

    /// Handler descriptors, first one runs first
    #[serde(default)]
    pub handlers: Vec<HandlerConfig>,

    /// Processor descriptors, applied in order
    #[serde(default)]
    pub processors: Vec<ProcessorConfig>,
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One-shot initialization.
//!
//! [`BridgeLoader`] gathers configuration, resolves handler and processor
//! descriptors into ready objects, fixes the channel name and returns a
//! [`Bridge`] around a [`SlogEngine`]. The bridge itself never sees a
//! descriptor.


use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::bridge::Bridge;
use crate::config::{Config, ConfigError, ConfigProvider, EnvConfigProvider, FileConfigProvider};
use crate::engine::SlogEngine;
use crate::error::BridgeError;
use crate::handlers::{Handler, HandlerFactory};
use crate::logging::log_error;
use crate::processors::{Processor, ProcessorFactory};
use crate::{debug_fmt, info_fmt};

/// Channel name used when neither the configuration nor the host supplies one.
pub const DEFAULT_APP_NAME: &str = "application";

/// Errors that can occur while building a bridge.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    /// A handler or processor could not be built
    #[error("bridge error: {0}")]
    BridgeError(#[from] BridgeError),
}

/// Builder for a [`Bridge`].
#[derive(Default)]
pub struct BridgeLoader {
    config: Option<Config>,
    providers: Vec<Arc<dyn ConfigProvider>>,
    config_file_path: Option<String>,
    use_env_vars: bool,
    env_prefix: Option<String>,
    name: Option<String>,
    app_name: Option<String>,
    handlers: Vec<Arc<dyn Handler>>,
    processors: Vec<Processor>,
}

impl fmt::Debug for BridgeLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeLoader")
            .field("config", &self.config)
            .field("providers", &self.providers)
            .field("config_file_path", &self.config_file_path)
            .field("use_env_vars", &self.use_env_vars)
            .field("env_prefix", &self.env_prefix)
            .field("name", &self.name)
            .field("app_name", &self.app_name)
            .field("handlers", &self.handlers)
            .field("processors", &self.processors.len())
            .finish()
    }
}

impl BridgeLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a ready configuration instead of files and environment.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Load a configuration file (JSON, TOML or YAML).
    pub fn with_config_file(mut self, file_path: &str) -> Self {
        self.config_file_path = Some(file_path.to_string());
        self
    }

    /// Read `BRIDGELOG_*` environment variables; they override the file.
    pub fn with_env_vars(mut self) -> Self {
        self.use_env_vars = true;
        self
    }

    /// Read environment variables with a custom prefix.
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self.use_env_vars = true;
        self
    }

    /// Add a provider with the highest priority so far.
    pub fn with_provider<P: ConfigProvider + 'static>(mut self, provider: P) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    /// Channel name; takes precedence over `logger.name`.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Host application name, used as the channel when nothing else names one.
    pub fn with_app_name(mut self, app_name: &str) -> Self {
        self.app_name = Some(app_name.to_string());
        self
    }

    /// Add a ready handler. Ready handlers run after configured ones, in the
    /// order they were added.
    pub fn with_handler<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.handlers.push(Arc::new(handler));
        self
    }

    /// Add a ready processor, applied after configured ones.
    pub fn with_processor(mut self, processor: Processor) -> Self {
        self.processors.push(processor);
        self
    }

    fn build_config(&mut self) -> Result<Config, LoaderError> {
        let mut builder = Config::builder();

        if let Some(path) = self.config_file_path.take() {
            let provider = FileConfigProvider::new(&path)
                .map_err(|e| log_error("Loader", LoaderError::ConfigError(e)))?;
            builder = builder.with_provider(provider);
        }

        if self.use_env_vars {
            let provider = match self.env_prefix.take() {
                Some(prefix) => EnvConfigProvider::new(&prefix),
                None => EnvConfigProvider::default(),
            };
            builder = builder.with_provider(provider);
        }

        for provider in self.providers.drain(..) {
            builder = builder.with_shared_provider(provider);
        }

        Ok(builder.build())
    }

    /// Resolve everything and build the bridge.
    pub fn build(mut self) -> Result<Bridge, LoaderError> {
        let config = match self.config.take() {
            Some(config) => config,
            None => self.build_config()?,
        };

        let settings = config.logger_settings()?;

        let channel = [self.name, settings.name, self.app_name]
            .into_iter()
            .flatten()
            .find(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_APP_NAME.to_string());

        let mut handlers = Vec::with_capacity(settings.handlers.len() + self.handlers.len());
        for descriptor in &settings.handlers {
            let handler = HandlerFactory::create(descriptor)
                .map_err(|e| log_error("Loader", LoaderError::BridgeError(e)))?;
            debug_fmt!("Loader", "Added handler: {}", descriptor.type_);
            handlers.push(handler);
        }
        handlers.extend(self.handlers);

        let mut processors = Vec::with_capacity(settings.processors.len() + self.processors.len());
        for descriptor in &settings.processors {
            let processor = ProcessorFactory::create(descriptor)
                .map_err(|e| log_error("Loader", LoaderError::BridgeError(e)))?;
            debug_fmt!("Loader", "Added processor: {}", descriptor.type_);
            processors.push(processor);
        }
        processors.extend(self.processors);

        info_fmt!(
            "Loader",
            "Channel '{}' ready with {} handler(s) and {} processor(s)",
            channel,
            handlers.len(),
            processors.len()
        );

        let engine = SlogEngine::new(&channel, handlers, processors);
        Ok(Bridge::new(Box::new(engine)))
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bridgelog - a logger that speaks two calling conventions
//!
//! Hosts that grew up with a `(message, level, category)` logging call and
//! want to move to a leveled `(level, message, context)` engine can put a
//! [`Bridge`] in front of the engine and keep both kinds of call sites
//! working during the migration.
//!
//! # Severity models
//!
//! - [`StandardSeverity`]: eight leveled severities, `debug` (100) up to
//!   `emergency` (600).
//! - [`LegacySeverity`]: the old bit-flag constants (`LEVEL_ERROR = 1`,
//!   `LEVEL_WARNING = 2`, ...). They are handed to the engine as-is and
//!   resolved there.
//!
//! # Dispatch
//!
//! A dynamic `log` call is classified by [`call_format`] and routed to the
//! generic leveled adapter or to [`Bridge::legacy_log`]. Any other method
//! name goes to the matching adapter or, when the engine declares it, to the
//! engine itself. See [`Bridge::call`].
//!
//! # Configuration
//!
//! [`BridgeLoader`] builds a bridge from layered configuration (files in
//! JSON, TOML or YAML and `BRIDGELOG_*` environment variables). Handlers and
//! processors are named by `{type, config}` descriptors; custom ones can be
//! registered with [`register_handler`] and [`register_processor`].
//!
//! ```rust,no_run
//! use bridgelog::{BridgeLoader, LegacySeverity};
//!
//! let bridge = BridgeLoader::new()
//!     .with_config_file("bridgelog.toml")
//!     .with_env_vars()
//!     .with_app_name("shop")
//!     .build()
//!     .unwrap();
//!
//! bridge.legacy_log("cart emptied", LegacySeverity::Info, Some("cart")).unwrap();
//! ```

pub mod bridge;
pub mod config;
pub mod engine;
pub mod error;
pub mod facade;
pub mod handlers;
pub mod loader;
pub mod logging;
pub mod processors;
pub mod record;
pub mod severity;

pub use bridge::Bridge;
pub use config::{Config, ConfigError, ConfigProvider, ConfigProviderExt};
pub use engine::{Engine, SlogEngine};
pub use error::BridgeError;
pub use facade::{BridgeLogger, install};
pub use handlers::{Handler, HandlerConfig, HandlerFactory, SlogHandler, register_handler};
pub use loader::{BridgeLoader, LoaderError};
pub use processors::{Processor, ProcessorConfig, ProcessorFactory, register_processor};
pub use record::{Context, DEFAULT_CATEGORY, LogRecord};
pub use severity::{CallFormat, LegacySeverity, Level, StandardSeverity, call_format};

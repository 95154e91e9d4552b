// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Handlers – the output side of the engine.
//!
//! A handler is an opaque sink. The engine only asks it two questions: does
//! it care about a severity, and did it consume a record. Handlers are either
//! passed in ready-made or built from a descriptor by [`HandlerFactory`]:
//!
//! | type       | output                                   |
//! |------------|------------------------------------------|
//! | `terminal` | human-readable lines on stderr           |
//! | `json`     | JSON lines on stdout or appended to `path` |
//! | `scope`    | the host's global `slog_scope` logger    |
//! | `discard`  | nothing                                  |
//!
//! Every built-in accepts `level` (minimum severity, default `debug`),
//! `bubble` (default `true`) and `static_fields`.


use once_cell::sync::Lazy;
use slog::{Record, RecordLocation, RecordStatic};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::debug_fmt;
use crate::error::BridgeError;
use crate::logging::structured::{Sink, SinkConfig, SinkKind, create_sink};
use crate::record::LogRecord;
use crate::severity::StandardSeverity;

/// An output destination for log records.
pub trait Handler: Debug + Send + Sync {
    /// Name used in diagnostics and engine introspection.
    fn name(&self) -> &str;

    /// Whether records of this severity should be handed to [`handle`](Self::handle).
    fn is_handling(&self, level: StandardSeverity) -> bool;

    /// Write the record. `Ok(true)` stops the record from reaching the
    /// handlers that follow.
    fn handle(&self, record: &LogRecord) -> Result<bool, BridgeError>;
}

/// Descriptor of a handler to be built by [`HandlerFactory`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandlerConfig {
    /// The type of handler
    #[serde(rename = "type")]
    pub type_: String,
    /// Type-specific configuration
    #[serde(default)]
    pub config: serde_json::Value,
}

/// Constructor signature every registered handler type must implement
pub type HandlerConstructor = fn(serde_json::Value) -> Result<Arc<dyn Handler>, BridgeError>;

/// Global registry – `register_handler()` writes to it,
/// `HandlerFactory::create_handler()` reads from it.
static HANDLER_REGISTRY: Lazy<RwLock<HashMap<String, HandlerConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Register a handler type under a unique name.
/// Registered types take precedence over the built-ins.
pub fn register_handler(name: &str, ctor: HandlerConstructor) {
    let mut registry = HANDLER_REGISTRY
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    registry.insert(name.to_string(), ctor);
}

fn get_registered_handler(name: &str) -> Option<HandlerConstructor> {
    HANDLER_REGISTRY
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .get(name)
        .copied()
}

/// Configuration shared by the built-in handlers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlogHandlerConfig {
    /// Minimum severity handled
    #[serde(default = "default_level")]
    pub level: StandardSeverity,

    /// Whether handled records continue to the next handler
    #[serde(default = "default_true")]
    pub bubble: bool,

    /// File to append to (`json` only)
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Static fields to include in every record
    #[serde(default)]
    pub static_fields: HashMap<String, String>,
}

fn default_level() -> StandardSeverity {
    StandardSeverity::Debug
}

fn default_true() -> bool {
    true
}

impl Default for SlogHandlerConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            bubble: true,
            path: None,
            static_fields: HashMap::new(),
        }
    }
}

/// Handler that writes records to a synchronous `slog` sink.
///
/// The record context and processor extras are emitted as JSON strings under
/// the `context` and `extra` keys; channel and severity travel as their own
/// keys. A sink write error fails the call with [`BridgeError::Handler`].
#[derive(Debug)]
pub struct SlogHandler {
    name: String,
    sink: Sink,
    level: StandardSeverity,
    bubble: bool,
}

static LOCATION: RecordLocation = RecordLocation {
    file: file!(),
    line: line!(),
    column: column!(),
    function: "",
    module: module_path!(),
};

impl SlogHandler {
    /// Wrap an existing sink.
    pub fn new(name: &str, sink: Sink, level: StandardSeverity, bubble: bool) -> Self {
        Self {
            name: name.to_string(),
            sink,
            level,
            bubble,
        }
    }

    /// Build a handler writing to one of the built-in sinks.
    pub fn from_config(name: &str, kind: SinkKind, config: SlogHandlerConfig) -> Result<Self, BridgeError> {
        let mut static_fields: Vec<(String, String)> = config.static_fields.into_iter().collect();
        static_fields.sort();

        let sink = create_sink(&SinkConfig { kind, static_fields })?;
        Ok(Self::new(name, sink, config.level, config.bubble))
    }
}

impl Handler for SlogHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_handling(&self, level: StandardSeverity) -> bool {
        level >= self.level
    }

    fn handle(&self, record: &LogRecord) -> Result<bool, BridgeError> {
        if !self.is_handling(record.level) {
            return Ok(false);
        }

        let context = serde_json::to_string(&record.context)
            .map_err(|e| BridgeError::handler(&self.name, e))?;
        let extra = serde_json::to_string(&record.extra)
            .map_err(|e| BridgeError::handler(&self.name, e))?;
        let datetime = record.datetime.to_rfc3339();

        // the level is only known at runtime, so the static part is built here
        let rstatic = RecordStatic {
            location: &LOCATION,
            tag: "",
            level: record.level.slog_level(),
        };

        self.sink
            .log(&Record::new(
                &rstatic,
                &format_args!("{}", record.message),
                slog::b!(
                    "channel" => record.channel.as_str(),
                    "severity" => record.level.name(),
                    "datetime" => datetime.as_str(),
                    "context" => context.as_str(),
                    "extra" => extra.as_str()
                ),
            ))
            .map_err(|e| BridgeError::handler(&self.name, e))?;

        Ok(!self.bubble)
    }
}

/// Factory for creating handlers from descriptors.
#[derive(Debug)]
pub struct HandlerFactory;

impl HandlerFactory {
    /// Create a handler based on the handler type and configuration.
    pub fn create_handler(
        handler_type: &str,
        config: serde_json::Value,
    ) -> Result<Arc<dyn Handler>, BridgeError> {
        debug_fmt!(
            "Handler",
            "Creating handler of type '{}' with config: {}",
            handler_type,
            config
        );

        if let Some(ctor) = get_registered_handler(handler_type) {
            return ctor(config);
        }

        let config = if config.is_null() {
            SlogHandlerConfig::default()
        } else {
            serde_json::from_value::<SlogHandlerConfig>(config).map_err(|e| {
                BridgeError::Config(format!("invalid {handler_type} handler config: {e}"))
            })?
        };

        let kind = match handler_type {
            "terminal" => SinkKind::Terminal,
            "json" => SinkKind::Json {
                path: config.path.clone(),
            },
            "scope" => SinkKind::Scope,
            "discard" => SinkKind::Discard,
            _ => {
                return Err(BridgeError::Config(format!(
                    "unknown handler type: {handler_type}"
                )));
            }
        };

        Ok(Arc::new(SlogHandler::from_config(handler_type, kind, config)?))
    }

    /// Create a handler from a descriptor.
    pub fn create(descriptor: &HandlerConfig) -> Result<Arc<dyn Handler>, BridgeError> {
        Self::create_handler(&descriptor.type_, descriptor.config.clone())
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Processors transform a record before any handler sees it.
//!
//! Built-in processor types:
//!
//! - `placeholders` – replaces `{key}` tokens in the message with the
//!   matching context value. Unknown keys are left untouched.
//! - `static_fields` – copies a fixed map (`{"fields": {...}}`) into `extra`.
//! - `uid` – adds a random `uid` (hex, `length` chars, default 7) to `extra`.
//!   The uid is chosen once per processor, so it correlates every record of
//!   one bridge lifetime.


use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::debug_fmt;
use crate::error::BridgeError;
use crate::record::LogRecord;

/// A record transformation.
pub type Processor = Arc<dyn Fn(LogRecord) -> LogRecord + Send + Sync>;

/// Descriptor of a processor to be built by [`ProcessorFactory`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default)]
    pub config: Value,
}

pub type ProcessorConstructor = fn(Value) -> Result<Processor, BridgeError>;

static PROCESSOR_REGISTRY: Lazy<RwLock<HashMap<String, ProcessorConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Register a processor type under a unique name.
pub fn register_processor(name: &str, ctor: ProcessorConstructor) {
    let mut registry = PROCESSOR_REGISTRY
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    registry.insert(name.to_string(), ctor);
}

fn get_registered_processor(name: &str) -> Option<ProcessorConstructor> {
    PROCESSOR_REGISTRY
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .get(name)
        .copied()
}

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([A-Za-z0-9_.]+)\}").expect("placeholder pattern is valid")
});

/// Interpolate `{key}` tokens from the record context.
pub fn interpolate(message: &str, context: &Map<String, Value>) -> String {
    if !message.contains('{') {
        return message.to_string();
    }

    PLACEHOLDER
        .replace_all(message, |caps: &Captures| match context.get(&caps[1]) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) => "null".to_string(),
            Some(other) => other.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// `placeholders` processor.
pub fn placeholders() -> Processor {
    Arc::new(|mut record: LogRecord| {
        record.message = interpolate(&record.message, &record.context);
        record
    })
}

/// `static_fields` processor.
pub fn static_fields(fields: Map<String, Value>) -> Processor {
    Arc::new(move |mut record: LogRecord| {
        for (key, value) in &fields {
            record.extra.insert(key.clone(), value.clone());
        }
        record
    })
}

/// `uid` processor.
pub fn uid(length: usize) -> Result<Processor, BridgeError> {
    if !(1..=32).contains(&length) {
        return Err(BridgeError::Config(format!(
            "uid length must be between 1 and 32, got {length}"
        )));
    }

    let mut uid = Uuid::new_v4().simple().to_string();
    uid.truncate(length);

    Ok(Arc::new(move |mut record: LogRecord| {
        record.extra.insert("uid".to_string(), Value::String(uid.clone()));
        record
    }))
}

#[derive(Debug, Deserialize)]
struct StaticFieldsConfig {
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct UidConfig {
    #[serde(default = "default_uid_length")]
    length: usize,
}

fn default_uid_length() -> usize {
    7
}

/// Factory for creating processors from descriptors.
#[derive(Debug)]
pub struct ProcessorFactory;

impl ProcessorFactory {
    /// Create a processor based on the processor type and configuration.
    pub fn create_processor(processor_type: &str, config: Value) -> Result<Processor, BridgeError> {
        debug_fmt!(
            "Processor",
            "Creating processor of type '{}' with config: {}",
            processor_type,
            config
        );

        if let Some(ctor) = get_registered_processor(processor_type) {
            return ctor(config);
        }

        let config = if config.is_null() {
            Value::Object(Map::new())
        } else {
            config
        };

        match processor_type {
            "placeholders" => Ok(placeholders()),
            "static_fields" => {
                let config: StaticFieldsConfig = serde_json::from_value(config).map_err(|e| {
                    BridgeError::Config(format!("invalid static_fields processor config: {e}"))
                })?;
                Ok(static_fields(config.fields))
            }
            "uid" => {
                let config: UidConfig = serde_json::from_value(config).map_err(|e| {
                    BridgeError::Config(format!("invalid uid processor config: {e}"))
                })?;
                uid(config.length)
            }
            _ => Err(BridgeError::Config(format!(
                "unknown processor type: {processor_type}"
            ))),
        }
    }

    /// Create a processor from a descriptor.
    pub fn create(descriptor: &ProcessorConfig) -> Result<Processor, BridgeError> {
        Self::create_processor(&descriptor.type_, descriptor.config.clone())
    }
}

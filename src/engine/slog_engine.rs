// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde_json::{Map, Value, json};
use std::fmt;
use std::sync::Arc;

use super::Engine;
use crate::error::BridgeError;
use crate::handlers::Handler;
use crate::processors::Processor;
use crate::record::{Context, LogRecord};
use crate::severity::{Level, StandardSeverity};

const OPERATIONS: [&str; 6] = [
    "get_name",
    "get_handlers",
    "get_processors",
    "get_levels",
    "get_level_name",
    "is_handling",
];

/// Engine that runs records through processors and then an ordered handler
/// stack.
///
/// Channel, handlers and processors are fixed at construction.
pub struct SlogEngine {
    name: String,
    handlers: Vec<Arc<dyn Handler>>,
    processors: Vec<Processor>,
}

impl SlogEngine {
    /// Create an engine. The first handler is called first.
    pub fn new(name: &str, handlers: Vec<Arc<dyn Handler>>, processors: Vec<Processor>) -> Self {
        Self {
            name: name.to_string(),
            handlers,
            processors,
        }
    }

    pub fn handlers(&self) -> &[Arc<dyn Handler>] {
        &self.handlers
    }

    pub fn processors(&self) -> &[Processor] {
        &self.processors
    }
}

impl fmt::Debug for SlogEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlogEngine")
            .field("name", &self.name)
            .field("handlers", &self.handlers)
            .field("processors", &self.processors.len())
            .finish()
    }
}

fn severity_arg(operation: &str, args: &[Value]) -> Result<StandardSeverity, BridgeError> {
    let value = args
        .first()
        .ok_or_else(|| BridgeError::invalid_arguments(operation, "missing level"))?;

    Level::from_value(value)
        .map(Level::severity)
        .ok_or_else(|| BridgeError::invalid_arguments(operation, format!("unknown level {value}")))
}

impl Engine for SlogEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_handling(&self, level: StandardSeverity) -> bool {
        self.handlers.iter().any(|h| h.is_handling(level))
    }

    fn log(&self, level: Level, message: &str, context: Context) -> Result<bool, BridgeError> {
        let severity = level.severity();
        if !self.is_handling(severity) {
            return Ok(false);
        }

        let mut record = LogRecord::new(&self.name, severity, message, context);
        for processor in &self.processors {
            record = processor(record);
        }

        for handler in self.handlers.iter().filter(|h| h.is_handling(severity)) {
            if handler.handle(&record)? {
                break;
            }
        }

        Ok(true)
    }

    fn operations(&self) -> Vec<&'static str> {
        OPERATIONS.to_vec()
    }

    fn invoke(&self, operation: &str, args: &[Value]) -> Result<Value, BridgeError> {
        match operation {
            "get_name" => Ok(Value::String(self.name.clone())),
            "get_handlers" => Ok(json!(
                self.handlers.iter().map(|h| h.name()).collect::<Vec<_>>()
            )),
            "get_processors" => Ok(json!(self.processors.len())),
            "get_levels" => {
                let levels: Map<String, Value> = self
                    .levels()
                    .iter()
                    .map(|s| (s.name().to_uppercase(), json!(s.code())))
                    .collect();
                Ok(Value::Object(levels))
            }
            "get_level_name" => {
                let severity = severity_arg(operation, args)?;
                Ok(Value::String(severity.name().to_uppercase()))
            }
            "is_handling" => {
                let severity = severity_arg(operation, args)?;
                Ok(Value::Bool(Engine::is_handling(self, severity)))
            }
            _ => Err(BridgeError::UnknownMethod(operation.to_string())),
        }
    }
}

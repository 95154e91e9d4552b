// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The structured-logging engine behind a [`Bridge`](crate::Bridge).
//!
//! The bridge only relies on the [`Engine`] trait: a channel name, the set of
//! severities it recognizes, a generic `log`, one method per severity, and a
//! bounded list of extra operations that may be invoked by name.
//! [`SlogEngine`] is the engine used by the loader.

mod slog_engine;

#[cfg(test)]
mod tests;

pub use slog_engine::SlogEngine;

use serde_json::Value;
use std::fmt::Debug;

use crate::error::BridgeError;
use crate::record::Context;
use crate::severity::{Level, StandardSeverity};

/// Core engine trait. Implementations must be object-safe and shareable.
pub trait Engine: Debug + Send + Sync {
    /// Channel name.
    fn name(&self) -> &str;

    /// Severities this engine accepts as standard levels.
    fn levels(&self) -> &[StandardSeverity] {
        &StandardSeverity::ALL
    }

    /// Whether a record of this severity would reach any handler.
    fn is_handling(&self, level: StandardSeverity) -> bool;

    /// Log a record. `Ok(true)` iff the record was accepted and processed.
    fn log(&self, level: Level, message: &str, context: Context) -> Result<bool, BridgeError>;

    fn emergency(&self, message: &str, context: Context) -> Result<bool, BridgeError> {
        self.log(StandardSeverity::Emergency.into(), message, context)
    }

    fn alert(&self, message: &str, context: Context) -> Result<bool, BridgeError> {
        self.log(StandardSeverity::Alert.into(), message, context)
    }

    fn critical(&self, message: &str, context: Context) -> Result<bool, BridgeError> {
        self.log(StandardSeverity::Critical.into(), message, context)
    }

    fn error(&self, message: &str, context: Context) -> Result<bool, BridgeError> {
        self.log(StandardSeverity::Error.into(), message, context)
    }

    fn warning(&self, message: &str, context: Context) -> Result<bool, BridgeError> {
        self.log(StandardSeverity::Warning.into(), message, context)
    }

    fn notice(&self, message: &str, context: Context) -> Result<bool, BridgeError> {
        self.log(StandardSeverity::Notice.into(), message, context)
    }

    fn info(&self, message: &str, context: Context) -> Result<bool, BridgeError> {
        self.log(StandardSeverity::Info.into(), message, context)
    }

    fn debug(&self, message: &str, context: Context) -> Result<bool, BridgeError> {
        self.log(StandardSeverity::Debug.into(), message, context)
    }

    /// Names of the operations reachable through [`invoke`](Self::invoke).
    fn operations(&self) -> Vec<&'static str> {
        Vec::new()
    }

    /// Run a declared operation with positional arguments.
    fn invoke(&self, operation: &str, _args: &[Value]) -> Result<Value, BridgeError> {
        Err(BridgeError::UnknownMethod(operation.to_string()))
    }
}

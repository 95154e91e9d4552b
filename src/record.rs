// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The unit of work handed from the engine to processors and handlers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::severity::StandardSeverity;

/// Key/value context attached to a log call.
pub type Context = Map<String, Value>;

/// Category used when a legacy call does not name one.
pub const DEFAULT_CATEGORY: &str = "application";

/// A single log record as seen by processors and handlers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    /// Channel that produced the record
    pub channel: String,
    /// Resolved severity
    pub level: StandardSeverity,
    /// Message text, possibly containing `{placeholder}` tokens
    pub message: String,
    /// Caller-supplied context
    pub context: Context,
    /// Creation time
    pub datetime: DateTime<Utc>,
    /// Fields added by processors
    pub extra: Context,
}

impl LogRecord {
    /// Create a record stamped with the current time.
    pub fn new(channel: &str, level: StandardSeverity, message: &str, context: Context) -> Self {
        Self {
            channel: channel.to_string(),
            level,
            message: message.to_string(),
            context,
            datetime: Utc::now(),
            extra: Context::new(),
        }
    }
}

/// Build a [`Context`] holding only the legacy `category` field.
pub fn category_context(category: &str) -> Context {
    let mut context = Context::new();
    context.insert("category".to_string(), Value::String(category.to_string()));
    context
}

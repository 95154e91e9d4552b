// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! By-name dispatch for [`Bridge::call`].

use serde_json::Value;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use super::Bridge;
use crate::engine::Engine;
use crate::error::BridgeError;
use crate::record::Context;
use crate::severity::{CallFormat, Level, StandardSeverity, call_format};
use crate::{debug_fmt, warn_fmt};

pub(crate) const LOG: &str = "log";
pub(crate) const LEGACY_LOG: &str = "legacy_log";

/// Where a method name leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Route {
    Severity(StandardSeverity),
    Log,
    Legacy,
    Forward,
}

/// Build the dispatch table: adapter methods first, then every engine
/// operation whose name is still free.
pub(crate) fn build_routes(engine: &dyn Engine) -> HashMap<&'static str, Route> {
    let mut routes = HashMap::new();

    for severity in StandardSeverity::ALL {
        routes.insert(severity.name(), Route::Severity(severity));
    }
    routes.insert(LOG, Route::Log);
    routes.insert(LEGACY_LOG, Route::Legacy);

    for operation in engine.operations() {
        if operation.is_empty() {
            warn_fmt!("Bridge", "Engine '{}' declares an unnamed operation", engine.name());
            continue;
        }

        match routes.entry(operation) {
            Entry::Occupied(_) => {
                debug_fmt!(
                    "Bridge",
                    "Engine operation '{}' is shadowed by an adapter method",
                    operation
                );
            }
            Entry::Vacant(slot) => {
                slot.insert(Route::Forward);
            }
        }
    }

    routes
}

fn message_arg(method: &str, value: Option<&Value>) -> Result<String, BridgeError> {
    match value {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(v.to_string()),
        Some(v) => Err(BridgeError::invalid_arguments(
            method,
            format!("message must be text, got {v}"),
        )),
        None => Err(BridgeError::invalid_arguments(method, "missing message")),
    }
}

fn context_arg(method: &str, value: Option<&Value>) -> Result<Context, BridgeError> {
    match value {
        None | Some(Value::Null) => Ok(Context::new()),
        Some(Value::Object(map)) => Ok(map.clone()),
        Some(v) => Err(BridgeError::invalid_arguments(
            method,
            format!("context must be an object, got {v}"),
        )),
    }
}

fn level_arg(method: &str, value: Option<&Value>) -> Result<Level, BridgeError> {
    let value = value.ok_or_else(|| BridgeError::invalid_arguments(method, "missing level"))?;
    Level::from_value(value)
        .ok_or_else(|| BridgeError::invalid_arguments(method, format!("unknown level {value}")))
}

fn category_arg(method: &str, value: Option<&Value>) -> Result<Option<String>, BridgeError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(v) => Err(BridgeError::invalid_arguments(
            method,
            format!("category must be text, got {v}"),
        )),
    }
}

impl Bridge {
    /// Invoke a method by name with positional arguments.
    ///
    /// A non-empty `log` call is classified first: `(level, message,
    /// context)` when the level is recognized and the second argument is not
    /// a legacy level constant, otherwise `(message, level, category)`.
    /// Adapter names run their adapter, declared engine operations are
    /// forwarded unchanged, and anything else is
    /// [`BridgeError::UnknownMethod`].
    ///
    /// Adapters return `Value::Bool`; forwarded operations return whatever
    /// the engine returns.
    pub fn call(&self, method: &str, args: &[Value]) -> Result<Value, BridgeError> {
        if method == LOG && !args.is_empty() {
            return self.dispatch_log(args).map(Value::Bool);
        }

        match self.routes.get(method).copied() {
            Some(Route::Severity(severity)) => {
                let message = message_arg(method, args.first())?;
                let context = context_arg(method, args.get(1))?;
                self.leveled(severity, &message, context).map(Value::Bool)
            }
            Some(Route::Legacy) => self.dispatch_legacy(args).map(Value::Bool),
            Some(Route::Forward) => self.engine.invoke(method, args),
            Some(Route::Log) | None => Err(BridgeError::UnknownMethod(method.to_string())),
        }
    }

    fn dispatch_log(&self, args: &[Value]) -> Result<bool, BridgeError> {
        match call_format(args, self.engine.levels()) {
            CallFormat::Standard => {
                let level = level_arg(LOG, args.first())?;
                let message = message_arg(LOG, args.get(1))?;
                let context = context_arg(LOG, args.get(2))?;
                self.log(level, &message, context)
            }
            CallFormat::Legacy => self.dispatch_legacy(args),
        }
    }

    fn dispatch_legacy(&self, args: &[Value]) -> Result<bool, BridgeError> {
        let message = message_arg(LEGACY_LOG, args.first())?;
        let level = level_arg(LEGACY_LOG, args.get(1))?;
        let category = category_arg(LEGACY_LOG, args.get(2))?;
        self.legacy_log(&message, level, category.as_deref())
    }

    fn leveled(
        &self,
        severity: StandardSeverity,
        message: &str,
        context: Context,
    ) -> Result<bool, BridgeError> {
        match severity {
            StandardSeverity::Emergency => self.emergency(message, context),
            StandardSeverity::Alert => self.alert(message, context),
            StandardSeverity::Critical => self.critical(message, context),
            StandardSeverity::Error => self.error(message, context),
            StandardSeverity::Warning => self.warning(message, context),
            StandardSeverity::Notice => self.notice(message, context),
            StandardSeverity::Info => self.info(message, context),
            StandardSeverity::Debug => self.debug(message, context),
        }
    }
}

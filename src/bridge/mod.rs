// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The bridge – one logger surface, two calling conventions.
//!
//! A [`Bridge`] owns exactly one [`Engine`] and exposes:
//!
//! - the eight leveled adapters (`emergency` … `debug`) and the generic
//!   [`Bridge::log`], each a straight pass-through returning whether the
//!   engine accepted the record;
//! - [`Bridge::legacy_log`], which turns `(message, level, category)` into
//!   `log(level, message, {"category": category})`;
//! - [`Bridge::call`], a by-name entry point that detects which convention a
//!   dynamic `log` call uses and forwards the engine's declared operations.
//!
//! ```rust
//! use bridgelog::{Bridge, Context, LegacySeverity, SlogEngine, StandardSeverity};
//! use serde_json::json;
//!
//! let bridge = Bridge::new(Box::new(SlogEngine::new("app", Vec::new(), Vec::new())));
//!
//! // leveled
//! bridge.error("payment failed", Context::new()).unwrap();
//! bridge.log(StandardSeverity::Notice, "cache warmed", Context::new()).unwrap();
//!
//! // legacy
//! bridge.legacy_log("disk almost full", LegacySeverity::Warning, Some("storage")).unwrap();
//!
//! // dynamic, either convention
//! bridge.call("log", &[json!("info"), json!("user signed in")]).unwrap();
//! bridge.call("log", &[json!("user signed in"), json!(4), json!("auth")]).unwrap();
//! ```

mod dispatch;


use std::collections::HashMap;
use std::fmt;

use crate::engine::Engine;
use crate::error::BridgeError;
use crate::record::{Context, DEFAULT_CATEGORY, category_context};
use crate::severity::Level;
use dispatch::Route;

/// Logger that accepts both the leveled and the legacy calling convention.
pub struct Bridge {
    engine: Box<dyn Engine>,
    routes: HashMap<&'static str, Route>,
}

impl Bridge {
    /// Wrap an engine. The dispatch table, including the engine operations
    /// that may be forwarded by name, is fixed here.
    pub fn new(engine: Box<dyn Engine>) -> Self {
        let routes = dispatch::build_routes(engine.as_ref());
        Self { engine, routes }
    }

    /// Channel name of the underlying engine.
    pub fn channel(&self) -> &str {
        self.engine.name()
    }

    /// Read-only access to the engine.
    pub fn engine(&self) -> &dyn Engine {
        self.engine.as_ref()
    }

    /// Every name [`call`](Self::call) routes somewhere, sorted.
    pub fn methods(&self) -> Vec<&'static str> {
        let mut methods: Vec<_> = self.routes.keys().copied().collect();
        methods.sort_unstable();
        methods
    }

    pub fn emergency(&self, message: &str, context: Context) -> Result<bool, BridgeError> {
        self.engine.emergency(message, context)
    }

    pub fn alert(&self, message: &str, context: Context) -> Result<bool, BridgeError> {
        self.engine.alert(message, context)
    }

    pub fn critical(&self, message: &str, context: Context) -> Result<bool, BridgeError> {
        self.engine.critical(message, context)
    }

    pub fn error(&self, message: &str, context: Context) -> Result<bool, BridgeError> {
        self.engine.error(message, context)
    }

    pub fn warning(&self, message: &str, context: Context) -> Result<bool, BridgeError> {
        self.engine.warning(message, context)
    }

    pub fn notice(&self, message: &str, context: Context) -> Result<bool, BridgeError> {
        self.engine.notice(message, context)
    }

    pub fn info(&self, message: &str, context: Context) -> Result<bool, BridgeError> {
        self.engine.info(message, context)
    }

    pub fn debug(&self, message: &str, context: Context) -> Result<bool, BridgeError> {
        self.engine.debug(message, context)
    }

    /// Log at an arbitrary level.
    pub fn log(
        &self,
        level: impl Into<Level>,
        message: &str,
        context: Context,
    ) -> Result<bool, BridgeError> {
        self.engine.log(level.into(), message, context)
    }

    /// Log with the legacy `(message, level, category)` convention.
    ///
    /// The category travels as the only context field; `None` means
    /// `"application"`.
    pub fn legacy_log(
        &self,
        message: &str,
        level: impl Into<Level>,
        category: Option<&str>,
    ) -> Result<bool, BridgeError> {
        let context = category_context(category.unwrap_or(DEFAULT_CATEGORY));
        self.log(level, message, context)
    }
}

impl fmt::Debug for Bridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bridge")
            .field("engine", &self.engine)
            .field("methods", &self.methods())
            .finish()
    }
}

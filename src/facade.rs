// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `log` facade backend.
//!
//! Code written against the `log` macros speaks the legacy convention: a
//! message, a coarse level and a target. [`BridgeLogger`] feeds those calls
//! through [`Bridge::legacy_log`] with the target as category.

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::bridge::Bridge;
use crate::severity::LegacySeverity;

/// A [`Bridge`] installed as a `log` backend.
#[derive(Debug)]
pub struct BridgeLogger {
    bridge: Bridge,
}

impl BridgeLogger {
    pub fn new(bridge: Bridge) -> Self {
        Self { bridge }
    }

    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }
}

impl Log for BridgeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        let severity = LegacySeverity::from(metadata.level()).to_standard();
        self.bridge.engine().is_handling(severity)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = record.args().to_string();
        let level = LegacySeverity::from(record.level());
        let _ = self.bridge.legacy_log(&message, level, Some(record.target()));
    }

    /// Sinks write synchronously, so nothing is pending by the time a
    /// `log` call returns.
    fn flush(&self) {}
}

/// Install `bridge` as the global `log` backend.
pub fn install(bridge: Bridge, max_level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(BridgeLogger::new(bridge)))?;
    log::set_max_level(max_level);
    Ok(())
}

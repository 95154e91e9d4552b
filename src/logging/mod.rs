// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Internal diagnostics for bridgelog.
//!
//! The crate reports its own construction and loading steps through the
//! standard `log` facade (see the `*_fmt!` macros in `wrapper.rs`). These
//! diagnostics are never emitted while a record is being dispatched, so
//! installing a [`BridgeLogger`](crate::facade::BridgeLogger) as the global
//! `log` backend cannot recurse.
//!
//! [`structured`] builds the synchronous `slog` sinks that back the built-in handlers.

pub mod structured;
pub mod wrapper;

#[cfg(test)]
pub(crate) mod test_logger;


use log::{LevelFilter, error, info, warn};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize diagnostic logging with the specified level.
///
/// `RUST_LOG` overrides the level. Only the first call has an effect, and it
/// is a no-op when another `log` backend is already installed.
pub fn init(level: Option<LevelFilter>) {
    INIT.call_once(|| {
        let default = level.unwrap_or(LevelFilter::Info).to_string().to_lowercase();
        let env = env_logger::Env::default().filter_or("RUST_LOG", default);

        let installed = env_logger::Builder::from_env(env)
            .format_timestamp_millis()
            .format_target(true)
            .try_init();

        if installed.is_ok() {
            info!("Diagnostics initialized at level: {}", log::max_level());
        }
    });
}

/// Log an error with context and return the error.
///
/// This is useful for logging errors in a chain of Results.
pub fn log_error<E: std::fmt::Display>(context: &str, err: E) -> E {
    error!("[{}] {}", context, err);
    err
}

/// Log a warning with context.
pub fn log_warning<E: std::fmt::Display>(context: &str, err: E) {
    warn!("[{}] {}", context, err);
}

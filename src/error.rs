// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the bridge and its engine.

use std::fmt;
use std::io;
use thiserror::Error;

/// Errors surfaced by [`Bridge`](crate::Bridge) calls.
///
/// The bridge never recovers from any of these locally; they reach the
/// caller unchanged.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Neither an adapter method nor a declared engine operation.
    #[error("unknown method '{0}'")]
    UnknownMethod(String),

    /// Arguments do not fit the signature of the method they were routed to.
    #[error("invalid arguments for '{method}': {reason}")]
    InvalidArguments { method: String, reason: String },

    /// A handler failed while writing a record.
    #[error("handler '{handler}' failed: {message}")]
    Handler { handler: String, message: String },

    /// The engine rejected an operation.
    #[error("engine error: {0}")]
    Engine(String),

    /// A handler or processor descriptor could not be resolved.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl BridgeError {
    /// Create a new invalid-arguments error.
    pub fn invalid_arguments<M: fmt::Display, R: fmt::Display>(method: M, reason: R) -> Self {
        Self::InvalidArguments {
            method: method.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a new handler error.
    pub fn handler<H: fmt::Display, M: fmt::Display>(handler: H, message: M) -> Self {
        Self::Handler {
            handler: handler.to_string(),
            message: message.to_string(),
        }
    }
}

impl From<crate::config::ConfigError> for BridgeError {
    fn from(err: crate::config::ConfigError) -> Self {
        BridgeError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_unknown_method_display() {
        let error = BridgeError::UnknownMethod("push_handler".to_string());
        assert_eq!(error.to_string(), "unknown method 'push_handler'");
    }

    #[test]
    fn test_invalid_arguments_constructor() {
        let error = BridgeError::invalid_arguments("error", "missing message");
        match &error {
            BridgeError::InvalidArguments { method, reason } => {
                assert_eq!(method, "error");
                assert_eq!(reason, "missing message");
            }
            _ => panic!("Expected InvalidArguments variant"),
        }
        assert_eq!(error.to_string(), "invalid arguments for 'error': missing message");
    }

    #[test]
    fn test_handler_error_display() {
        let error = BridgeError::handler("json", "broken pipe");
        assert_eq!(error.to_string(), "handler 'json' failed: broken pipe");
    }

    #[test]
    fn test_io_error_source() {
        let error: BridgeError = io::Error::new(io::ErrorKind::NotFound, "no such file").into();
        assert!(error.to_string().contains("IO error"));
        assert_eq!(error.source().unwrap().to_string(), "no such file");
    }

    #[test]
    fn test_config_error_conversion() {
        let error: BridgeError = crate::config::ConfigError::NotFound.into();
        assert!(matches!(error, BridgeError::Config(_)));
        assert_eq!(error.to_string(), "configuration error: configuration key not found");
    }
}

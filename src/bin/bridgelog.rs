// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Minimal CLI wrapper so the bridge can be driven from a pipe.
//!
//!  Build it with `cargo build --release --bin bridgelog`
//!  Each stdin line is a call: `{"method": "log", "args": ["msg", 1, "db"]}`.
//!  The binary honours BRIDGELOG_CONFIG_FILE and BRIDGELOG_APP_NAME.

use bridgelog::logging::log_warning;
use bridgelog::{BridgeLoader, info_fmt};
use serde::Deserialize;
use serde_json::Value;
use std::env;
use std::error::Error;
use std::io::{self, BufRead, Write};

#[derive(Debug, Deserialize)]
struct Call {
    method: String,
    #[serde(default)]
    args: Vec<Value>,
}

fn main() -> Result<(), Box<dyn Error>> {
    bridgelog::logging::init(None);

    let mut loader = BridgeLoader::new().with_env_vars();
    if let Ok(path) = env::var("BRIDGELOG_CONFIG_FILE") {
        info_fmt!("Startup", "Using configuration from {}", path);
        loader = loader.with_config_file(&path);
    }
    if let Ok(app_name) = env::var("BRIDGELOG_APP_NAME") {
        loader = loader.with_app_name(&app_name);
    }

    let bridge = match loader.build() {
        Ok(bridge) => bridge,
        Err(e) => {
            eprintln!("Failed to build bridge: {e}");
            return Err(e.into());
        }
    };

    for (number, line) in io::stdin().lock().lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let call: Call = match serde_json::from_str(&line) {
            Ok(call) => call,
            Err(e) => {
                log_warning("Input", format!("line {}: invalid call: {e}", number + 1));
                continue;
            }
        };

        match bridge.call(&call.method, &call.args) {
            Ok(result) => writeln!(io::stdout().lock(), "{result}")?,
            Err(e) => log_warning("Input", format!("line {}: {e}", number + 1)),
        }
    }

    io::stdout().flush()?;
    Ok(())
}

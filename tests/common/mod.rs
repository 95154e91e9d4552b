// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Common test utilities for bridgelog integration tests.

use bridgelog::config::{ConfigError, ConfigProvider};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// In-memory configuration provider.
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct TestConfigProvider {
    values: HashMap<String, Value>,
}

#[allow(dead_code)]
impl TestConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: &str, value: Value) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }
}

impl ConfigProvider for TestConfigProvider {
    fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn provider_name(&self) -> &str {
        "test"
    }

    fn get_raw(&self, key: &str) -> Result<Option<Value>, ConfigError> {
        Ok(self.values.get(key).cloned())
    }
}

/// A temporary directory holding a TOML configuration whose only handler
/// appends JSON lines to `records.log` in the same directory.
#[allow(dead_code)]
pub struct JsonFileSetup {
    pub dir: TempDir,
    pub config_path: PathBuf,
    pub log_path: PathBuf,
}

#[allow(dead_code)]
impl JsonFileSetup {
    /// `extra` is appended verbatim to the generated TOML.
    pub fn new(level: &str, extra: &str) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let log_path = dir.path().join("records.log");
        let config_path = dir.path().join("bridgelog.toml");

        let content = format!(
            r#"
[logger]
name = "integration"

[[logger.handlers]]
type = "json"
config = {{ path = '{}', level = "{}" }}
{}
"#,
            log_path.display(),
            level,
            extra
        );
        fs::write(&config_path, content).expect("write config");

        Self {
            dir,
            config_path,
            log_path,
        }
    }

    pub fn config_path_str(&self) -> &str {
        self.config_path.to_str().expect("utf-8 path")
    }

    pub fn records(&self) -> Vec<Value> {
        read_records(&self.log_path)
    }
}

/// Parse a JSON-lines log file; a missing file has no records.
#[allow(dead_code)]
pub fn read_records(path: &Path) -> Vec<Value> {
    match fs::read_to_string(path) {
        Ok(content) => content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).expect("json line"))
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// The context a handler serialized into a record.
#[allow(dead_code)]
pub fn context_of(record: &Value) -> Value {
    serde_json::from_str(record["context"].as_str().expect("context string")).expect("context json")
}

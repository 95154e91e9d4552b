// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `slog` drains for the built-in handlers.
//!
//! Every sink is synchronous. [`Sink::log`] returns once the record has been
//! written and flushed, or with the I/O error that stopped it.

use slog::{Discard, Drain, KV, Never, OwnedKV, OwnedKVList, Record, Serializer};
use slog_json::Json;
use slog_term::{FullFormat, TermDecorator};
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

/// A drain whose write errors reach the caller.
pub type SinkDrain = Box<dyn Drain<Ok = (), Err = io::Error> + Send>;

/// Output a sink writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkKind {
    /// Human-readable terminal output on stderr
    Terminal,
    /// JSON lines on stdout, or appended to a file
    Json { path: Option<PathBuf> },
    /// The global `slog_scope` logger of the host application
    Scope,
    /// Drop everything
    Discard,
}

/// Sink configuration
#[derive(Debug, Clone)]
pub struct SinkConfig {
    pub kind: SinkKind,
    /// Additional static key-value pairs to include in all records
    pub static_fields: Vec<(String, String)>,
}

struct StaticFields(Vec<(&'static str, String)>);

impl KV for StaticFields {
    fn serialize(&self, _record: &Record<'_>, serializer: &mut dyn Serializer) -> slog::Result {
        for (key, value) in &self.0 {
            serializer.emit_str(*key, value)?;
        }
        Ok(())
    }
}

/// A drain plus the static fields attached to each of its records.
pub struct Sink {
    drain: Mutex<SinkDrain>,
    values: OwnedKVList,
}

impl Sink {
    pub fn new<D>(drain: D) -> Self
    where
        D: Drain<Ok = (), Err = io::Error> + Send + 'static,
    {
        Self {
            drain: Mutex::new(Box::new(drain)),
            values: OwnedKVList::from(OwnedKV(StaticFields(Vec::new()))),
        }
    }

    pub fn with_static_fields(mut self, fields: &[(String, String)]) -> Self {
        let fields = fields
            .iter()
            .map(|(key, value)| {
                // slog keys are 'static; static fields are configured once per sink
                let key: &'static str = Box::leak(key.clone().into_boxed_str());
                (key, value.clone())
            })
            .collect();
        self.values = OwnedKVList::from(OwnedKV(StaticFields(fields)));
        self
    }

    /// Write one record.
    pub fn log(&self, record: &Record<'_>) -> io::Result<()> {
        let drain = self.drain.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        drain.log(record, &self.values)
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink").finish_non_exhaustive()
    }
}

fn never(e: Never) -> io::Error {
    match e {}
}

/// Create a sink for the given configuration.
pub fn create_sink(config: &SinkConfig) -> io::Result<Sink> {
    let sink = match &config.kind {
        SinkKind::Terminal => {
            let decorator = TermDecorator::new().stderr().build();
            Sink::new(FullFormat::new(decorator).build())
        }
        SinkKind::Json { path } => Sink::new(create_json_drain(path.as_ref())?),
        SinkKind::Scope => Sink::new(slog_scope::logger().map_err(never)),
        SinkKind::Discard => Sink::new(Discard.map_err(never)),
    };

    Ok(sink.with_static_fields(&config.static_fields))
}

fn create_json_drain(path: Option<&PathBuf>) -> io::Result<Json<Box<dyn Write + Send>>> {
    let writer: Box<dyn Write + Send> = match path {
        Some(path) => Box::new(OpenOptions::new().create(true).append(true).open(path)?),
        None => Box::new(io::stdout()),
    };

    Ok(Json::new(writer).add_default_keys().set_flush(true).build())
}

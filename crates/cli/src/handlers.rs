// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handlers wired onto the bus by the demo
//!
//! Each handler owns what it needs (a weak bus handle to re-emit on, a shared
//! tally, an output writer) instead of capturing it implicitly.

use ebus_core::{Handler, HandlerError, WeakEventBus};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Emitted by other handlers with a line to log
pub const LOG_EVENT: &str = "log_event";

/// Security events seen so far, keyed by method
pub type Tally = Arc<Mutex<BTreeMap<String, u64>>>;

/// Counts security events and logs each one
pub struct SecurityCounter {
    tally: Tally,
    bus: WeakEventBus<Value>,
}

impl SecurityCounter {
    pub fn new(tally: Tally, bus: WeakEventBus<Value>) -> Self {
        Self { tally, bus }
    }
}

impl Handler<Value> for SecurityCounter {
    fn handle(&self, _event: &str, payload: &Value) -> Result<(), HandlerError> {
        let kind = render(payload);
        {
            let mut tally = self.tally.lock().unwrap_or_else(|e| e.into_inner());
            *tally.entry(kind.clone()).or_insert(0) += 1;
        }
        self.bus.emit(
            LOG_EVENT,
            &Value::String(format!("security event occurred: {kind}")),
        )?;
        Ok(())
    }
}

/// Forwards API call payloads to the log
pub struct ApiCallAuditor {
    bus: WeakEventBus<Value>,
}

impl ApiCallAuditor {
    pub fn new(bus: WeakEventBus<Value>) -> Self {
        Self { bus }
    }
}

impl Handler<Value> for ApiCallAuditor {
    fn handle(&self, _event: &str, payload: &Value) -> Result<(), HandlerError> {
        self.bus.emit(LOG_EVENT, payload)?;
        Ok(())
    }
}

/// Writes every payload it receives as one line
pub struct TerminalLogger<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> TerminalLogger<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

impl<W: Write + Send> Handler<Value> for TerminalLogger<W> {
    fn handle(&self, _event: &str, payload: &Value) -> Result<(), HandlerError> {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(out, "{}", render(payload))?;
        out.flush()?;
        Ok(())
    }
}

/// Strings print bare; anything else prints as compact JSON
pub fn render(payload: &Value) -> String {
    match payload {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Tally as a JSON object
pub fn tally_json(tally: &Tally) -> Value {
    let tally = tally.lock().unwrap_or_else(|e| e.into_inner());
    Value::Object(
        tally
            .iter()
            .map(|(kind, count)| (kind.clone(), Value::from(*count)))
            .collect(),
    )
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;

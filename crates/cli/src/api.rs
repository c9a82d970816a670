// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Simulated API client that reports every call on the bus

use ebus_core::{BusError, EventBus};
use serde_json::Value;
use std::fmt;

/// Emitted once per API call with a description of the request
pub const API_CALL: &str = "api_call";
/// Emitted for calls that can change server state
pub const SECURITY_EVENT: &str = "security_event";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
    Patch,
    Option,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Option => "OPTION",
        }
    }

    /// Everything except reads is audited as a security event
    pub fn is_security_relevant(self) -> bool {
        !matches!(self, Method::Get)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// API client that emits events instead of talking to a server
#[derive(Clone)]
pub struct ApiClient {
    bus: EventBus<Value>,
}

impl ApiClient {
    pub fn new(bus: EventBus<Value>) -> Self {
        Self { bus }
    }

    pub fn call(&self, method: Method) -> Result<(), BusError> {
        self.bus.emit(
            API_CALL,
            &Value::String(format!("API {method} call data")),
        )?;
        if method.is_security_relevant() {
            self.bus
                .emit(SECURITY_EVENT, &Value::String(method.as_str().to_string()))?;
        }
        Ok(())
    }

    pub fn get(&self) -> Result<(), BusError> {
        self.call(Method::Get)
    }

    pub fn put(&self) -> Result<(), BusError> {
        self.call(Method::Put)
    }

    pub fn post(&self) -> Result<(), BusError> {
        self.call(Method::Post)
    }

    pub fn delete(&self) -> Result<(), BusError> {
        self.call(Method::Delete)
    }

    pub fn patch(&self) -> Result<(), BusError> {
        self.call(Method::Patch)
    }

    pub fn option(&self) -> Result<(), BusError> {
        self.call(Method::Option)
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;

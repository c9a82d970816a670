// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the event bus

use crate::events::HandlerError;
use thiserror::Error;

/// Errors that can occur on the event bus
#[derive(Debug, Error)]
pub enum BusError {
    #[error("event not registered: {0}")]
    EventNotFound(String),
    #[error("handler not registered for event: {event}")]
    HandlerNotFound { event: String },
    #[error("handler for event {event} failed")]
    Handler {
        event: String,
        #[source]
        source: HandlerError,
    },
    #[error("emission of {event} exceeds nesting limit of {limit}")]
    DepthExceeded { event: String, limit: usize },
}

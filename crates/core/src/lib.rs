// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ebus-core: In-process event bus
//!
//! This crate provides:
//! - A synchronous publish/subscribe bus keyed by event name
//! - Handler references with pointer identity and set semantics
//! - Typed errors for unregistering unknown handlers and failed emissions

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod config;
pub mod error;
pub mod events;

pub use config::{BusConfig, DEFAULT_MAX_DEPTH};
pub use error::BusError;
pub use events::{
    handler_fn, named_handler_fn, EventBus, Handler, HandlerError, HandlerRef, WeakEventBus,
};

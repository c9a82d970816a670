// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events system for in-process publish/subscribe
//!
//! This module provides:
//! - `EventBus` - Synchronous fan-out of named events to registered handlers
//! - `WeakEventBus` - Emit handle for handlers registered on the same bus
//! - `Handler` / `HandlerRef` - Handler behavior and handler identity
//! - `handler_fn` / `named_handler_fn` - Build handlers from closures

mod bus;
mod handler;

pub use bus::{EventBus, WeakEventBus};
pub use handler::{handler_fn, named_handler_fn, Handler, HandlerError, HandlerRef};

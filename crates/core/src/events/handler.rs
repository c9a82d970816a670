// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handlers and handler references
//!
//! A handler is invoked with the event name and the payload of one emission.
//! Handlers that do not care about the event name are built with
//! [`handler_fn`]; handlers that do are built with [`named_handler_fn`] or by
//! implementing [`Handler`] directly on a struct that owns its dependencies.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Error raised by a handler. Any `std::error::Error` converts into it.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Behavior invoked for every emission of the events it is registered for
pub trait Handler<P>: Send + Sync {
    fn handle(&self, event: &str, payload: &P) -> Result<(), HandlerError>;
}

/// Shared reference to a registered handler.
///
/// Identity is the pointer, not the behavior: clones of one `HandlerRef`
/// compare equal, while two handlers built from identical closures do not.
pub struct HandlerRef<P> {
    inner: Arc<dyn Handler<P>>,
}

impl<P> HandlerRef<P> {
    pub fn new<H>(handler: H) -> Self
    where
        H: Handler<P> + 'static,
    {
        Self {
            inner: Arc::new(handler),
        }
    }

    pub fn handle(&self, event: &str, payload: &P) -> Result<(), HandlerError> {
        self.inner.handle(event, payload)
    }

    // Compare the data pointer only; vtable pointers for the same type may
    // differ between codegen units.
    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.inner) as *const ()
    }
}

impl<P> Clone for HandlerRef<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P> PartialEq for HandlerRef<P> {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl<P> Eq for HandlerRef<P> {}

impl<P> Hash for HandlerRef<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl<P> fmt::Debug for HandlerRef<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HandlerRef").field(&self.addr()).finish()
    }
}

/// Handler that only sees the payload
struct PayloadFn<F>(F);

impl<P, F> Handler<P> for PayloadFn<F>
where
    F: Fn(&P) -> Result<(), HandlerError> + Send + Sync,
{
    fn handle(&self, _event: &str, payload: &P) -> Result<(), HandlerError> {
        (self.0)(payload)
    }
}

/// Handler that sees the event name alongside the payload
struct NamedFn<F>(F);

impl<P, F> Handler<P> for NamedFn<F>
where
    F: Fn(&str, &P) -> Result<(), HandlerError> + Send + Sync,
{
    fn handle(&self, event: &str, payload: &P) -> Result<(), HandlerError> {
        (self.0)(event, payload)
    }
}

/// Build a handler from a closure over the payload.
pub fn handler_fn<P, F>(f: F) -> HandlerRef<P>
where
    P: 'static,
    F: Fn(&P) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    HandlerRef::new(PayloadFn(f))
}

/// Build a handler from a closure over the event name and payload.
pub fn named_handler_fn<P, F>(f: F) -> HandlerRef<P>
where
    P: 'static,
    F: Fn(&str, &P) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    HandlerRef::new(NamedFn(f))
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event bus for synchronous fan-out to registered handlers

use super::handler::HandlerRef;
use crate::config::BusConfig;
use crate::error::BusError;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, Weak};

/// Handlers keyed by event name. A key is present only while at least one
/// handler is registered under it.
type Registry<P> = HashMap<String, Vec<HandlerRef<P>>>;

thread_local! {
    /// Nested emission depth per bus on this thread, keyed by registry address.
    /// Entries exist only while an emission on that bus is in progress.
    static DEPTH: RefCell<HashMap<usize, usize>> = RefCell::new(HashMap::new());
}

/// Tracks one level of nested emission of one bus on the current thread
struct DepthGuard {
    bus: usize,
}

impl DepthGuard {
    fn enter(bus: usize, event: &str, limit: usize) -> Result<Self, BusError> {
        DEPTH.with(|depths| {
            let mut depths = depths.borrow_mut();
            let current = depths.get(&bus).copied().unwrap_or(0);
            if current >= limit {
                return Err(BusError::DepthExceeded {
                    event: event.to_string(),
                    limit,
                });
            }
            depths.insert(bus, current + 1);
            Ok(DepthGuard { bus })
        })
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        // The slot is gone during thread teardown; nothing left to unwind then.
        let _ = DEPTH.try_with(|depths| {
            let mut depths = depths.borrow_mut();
            match depths.get(&self.bus).copied() {
                Some(depth) if depth > 1 => {
                    depths.insert(self.bus, depth - 1);
                }
                _ => {
                    depths.remove(&self.bus);
                }
            }
        });
    }
}

/// The event bus invokes every handler registered for an event, in the
/// caller's thread, before `emit` returns.
///
/// Clones share one registry, so components that need to emit are handed a
/// clone rather than reaching for a global. A handler that emits on the bus it
/// is registered with must hold a [`WeakEventBus`] instead: a strong clone
/// inside the registry keeps the registry alive forever.
pub struct EventBus<P> {
    registry: Arc<RwLock<Registry<P>>>,
    config: BusConfig,
}

impl<P> EventBus<P> {
    pub fn new() -> Self {
        Self::with_config(BusConfig::default())
    }

    pub fn with_config(config: BusConfig) -> Self {
        Self {
            registry: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    /// Handle that can emit without keeping the registry alive
    pub fn downgrade(&self) -> WeakEventBus<P> {
        WeakEventBus {
            registry: Arc::downgrade(&self.registry),
            config: self.config,
        }
    }

    /// Register a handler for an event.
    ///
    /// Registering the same handler reference twice for one event is a no-op.
    /// Handlers run in the order they were first registered.
    pub fn register(&self, event: impl Into<String>, handler: HandlerRef<P>) {
        let event = event.into();
        let mut registry = self.registry.write().unwrap_or_else(|e| e.into_inner());
        let handlers = registry.entry(event.clone()).or_default();

        if handlers.contains(&handler) {
            tracing::trace!(event = %event, "handler already registered");
            return;
        }
        handlers.push(handler);
        tracing::trace!(event = %event, handlers = handlers.len(), "registered handler");
    }

    /// Remove a handler from an event.
    ///
    /// Fails if the event has no handlers or the handler is not among them.
    /// Removing the last handler drops the event from the registry.
    pub fn unregister(&self, event: &str, handler: &HandlerRef<P>) -> Result<(), BusError> {
        let mut registry = self.registry.write().unwrap_or_else(|e| e.into_inner());
        let handlers = registry
            .get_mut(event)
            .ok_or_else(|| BusError::EventNotFound(event.to_string()))?;

        let index = handlers
            .iter()
            .position(|h| h == handler)
            .ok_or_else(|| BusError::HandlerNotFound {
                event: event.to_string(),
            })?;
        handlers.remove(index);

        if handlers.is_empty() {
            registry.remove(event);
            tracing::trace!(event, "removed last handler");
        } else {
            tracing::trace!(event, handlers = handlers.len(), "unregistered handler");
        }
        Ok(())
    }

    /// Invoke every handler registered for `event` with `payload`.
    ///
    /// Handlers run against a snapshot taken before the first one is called,
    /// so registrations made by a handler apply from the next emission on.
    /// The first handler error stops the fan-out and is returned.
    pub fn emit(&self, event: &str, payload: &P) -> Result<(), BusError> {
        let Some(handlers) = self.snapshot(event) else {
            tracing::trace!(event, "no handlers registered");
            return Ok(());
        };

        let _depth = DepthGuard::enter(self.id(), event, self.config.max_depth)
            .inspect_err(|_| {
                tracing::warn!(event, limit = self.config.max_depth, "emission nested too deeply");
            })?;

        tracing::debug!(event, handlers = handlers.len(), "emitting event");
        for handler in &handlers {
            handler
                .handle(event, payload)
                .map_err(|source| BusError::Handler {
                    event: event.to_string(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Number of handlers registered for an event
    pub fn handler_count(&self, event: &str) -> usize {
        self.registry
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(event)
            .map_or(0, Vec::len)
    }

    /// True if at least one handler is registered for the event
    pub fn contains(&self, event: &str) -> bool {
        self.registry
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(event)
    }

    /// Names of all events with registered handlers, sorted
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .registry
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.registry
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_empty()
    }

    fn id(&self) -> usize {
        Arc::as_ptr(&self.registry) as usize
    }

    fn snapshot(&self, event: &str) -> Option<Vec<HandlerRef<P>>> {
        self.registry
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(event)
            .cloned()
    }
}

impl<P> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Clone for EventBus<P> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            config: self.config,
        }
    }
}

/// Non-owning handle to an [`EventBus`].
///
/// Emitting after every `EventBus` handle is gone is a no-op: the registry,
/// and every handler in it, has been dropped.
pub struct WeakEventBus<P> {
    registry: Weak<RwLock<Registry<P>>>,
    config: BusConfig,
}

impl<P> WeakEventBus<P> {
    pub fn upgrade(&self) -> Option<EventBus<P>> {
        self.registry.upgrade().map(|registry| EventBus {
            registry,
            config: self.config,
        })
    }

    pub fn emit(&self, event: &str, payload: &P) -> Result<(), BusError> {
        match self.upgrade() {
            Some(bus) => bus.emit(event, payload),
            None => {
                tracing::trace!(event, "bus dropped, nothing to emit to");
                Ok(())
            }
        }
    }
}

impl<P> Clone for WeakEventBus<P> {
    fn clone(&self) -> Self {
        Self {
            registry: Weak::clone(&self.registry),
            config: self.config,
        }
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;

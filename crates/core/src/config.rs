// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event bus configuration

/// Default limit on nested emissions of one bus per thread
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Configuration for an [`EventBus`](crate::EventBus)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusConfig {
    /// Maximum number of nested `emit` calls on this bus within one thread. A
    /// handler that emits on the same bus counts as one level deeper than the
    /// emission that invoked it; emitting on a different bus starts that bus
    /// at its own first level.
    pub max_depth: usize,
}

impl BusConfig {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for BusConfig {
    fn default() -> Self {
        Self::new()
    }
}

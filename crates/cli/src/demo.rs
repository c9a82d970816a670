// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Demo wiring: handlers onto the bus, then a burst of random API calls

use crate::api::{ApiClient, API_CALL, SECURITY_EVENT};
use crate::handlers::{
    tally_json, ApiCallAuditor, SecurityCounter, Tally, TerminalLogger, LOG_EVENT,
};
use ebus_core::{BusError, EventBus, HandlerRef};
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::Value;
use std::io::Write;

/// Register the demo handlers and return the shared security tally
pub fn wire<W>(bus: &EventBus<Value>, out: W) -> Tally
where
    W: Write + Send + 'static,
{
    let tally = Tally::default();

    bus.register(
        SECURITY_EVENT,
        HandlerRef::new(SecurityCounter::new(tally.clone(), bus.downgrade())),
    );
    bus.register(LOG_EVENT, HandlerRef::new(TerminalLogger::new(out)));
    bus.register(API_CALL, HandlerRef::new(ApiCallAuditor::new(bus.downgrade())));

    tracing::debug!(events = ?bus.event_names(), "demo handlers wired");
    tally
}

type Call = fn(&ApiClient) -> Result<(), BusError>;

/// Calls the driver picks from
const CALLS: [Call; 6] = [
    ApiClient::get,
    ApiClient::put,
    ApiClient::post,
    ApiClient::delete,
    ApiClient::patch,
    ApiClient::option,
];

/// Make `calls` API calls picked at random
pub fn run<R: Rng>(client: &ApiClient, rng: &mut R, calls: usize) -> Result<(), BusError> {
    for _ in 0..calls {
        let Some(call) = CALLS.choose(rng) else {
            break;
        };
        call(client)?;
    }
    tracing::debug!(calls, "simulated calls complete");
    Ok(())
}

/// Log the final tally through the bus
pub fn report(bus: &EventBus<Value>, tally: &Tally) -> Result<(), BusError> {
    bus.emit(LOG_EVENT, &tally_json(tally))
}

#[cfg(test)]
#[path = "demo_tests.rs"]
mod tests;

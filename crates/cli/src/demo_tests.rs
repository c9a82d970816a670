use super::*;
use crate::test_support::SharedBuf;
use ebus_core::BusConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

fn setup(config: BusConfig) -> (EventBus<Value>, ApiClient, Tally, SharedBuf) {
    let bus = EventBus::with_config(config);
    let buf = SharedBuf::default();
    let tally = wire(&bus, buf.clone());
    let client = ApiClient::new(bus.clone());
    (bus, client, tally, buf)
}

#[test]
fn wire_registers_one_handler_per_event() {
    let (bus, _, _, _) = setup(BusConfig::default());
    assert_eq!(
        bus.event_names(),
        vec![API_CALL, LOG_EVENT, SECURITY_EVENT]
    );
    for event in bus.event_names() {
        assert_eq!(bus.handler_count(&event), 1);
    }
}

#[test]
fn every_call_is_logged_and_security_calls_counted() {
    let (bus, client, tally, buf) = setup(BusConfig::default());
    let mut rng = StdRng::seed_from_u64(7);

    run(&client, &mut rng, 50).unwrap();
    report(&bus, &tally).unwrap();

    let lines = buf.lines();
    let (summary, log) = lines.split_last().unwrap();
    let api_lines = log.iter().filter(|l| l.starts_with("API ")).count();
    let security_lines = log
        .iter()
        .filter(|l| l.starts_with("security event occurred: "))
        .count();

    assert_eq!(api_lines, 50);
    assert_eq!(api_lines + security_lines, log.len());

    let summary: Value = serde_json::from_str(summary).unwrap();
    let counted: u64 = summary
        .as_object()
        .unwrap()
        .values()
        .map(|v| v.as_u64().unwrap())
        .sum();
    assert_eq!(counted, security_lines as u64);
    assert!(summary.get("GET").is_none());
}

#[test]
fn same_seed_gives_same_run() {
    let transcript = |seed| {
        let (bus, client, tally, buf) = setup(BusConfig::default());
        run(&client, &mut StdRng::seed_from_u64(seed), 20).unwrap();
        report(&bus, &tally).unwrap();
        buf.lines()
    };

    assert_eq!(transcript(42), transcript(42));
}

#[test]
fn zero_calls_reports_empty_tally() {
    let (bus, client, tally, buf) = setup(BusConfig::default());
    run(&client, &mut StdRng::seed_from_u64(1), 0).unwrap();
    report(&bus, &tally).unwrap();
    assert_eq!(buf.lines(), vec!["{}"]);
}

#[test]
fn shallow_depth_limit_fails_chained_logging() {
    let (_, client, _, buf) = setup(BusConfig::new().with_max_depth(1));
    let err = run(&client, &mut StdRng::seed_from_u64(3), 1).unwrap_err();
    assert!(matches!(err, BusError::Handler { ref event, .. } if event == API_CALL));
    assert!(buf.lines().is_empty());
}

#[test]
fn dropping_bus_releases_wired_handlers() {
    let (bus, client, tally, _buf) = setup(BusConfig::default());
    run(&client, &mut StdRng::seed_from_u64(5), 10).unwrap();
    assert!(Arc::strong_count(&tally) > 1);

    drop(client);
    drop(bus);

    // The security counter's copy went away with the registry
    assert_eq!(Arc::strong_count(&tally), 1);
}

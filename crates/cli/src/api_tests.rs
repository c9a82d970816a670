use super::*;
use ebus_core::{handler_fn, HandlerRef};
use std::sync::{Arc, Mutex};
use yare::parameterized;

type Seen = Arc<Mutex<Vec<(String, Value)>>>;

fn recorder(seen: &Seen) -> HandlerRef<Value> {
    let seen = Arc::clone(seen);
    ebus_core::named_handler_fn(move |event: &str, payload: &Value| {
        seen.lock().unwrap().push((event.to_string(), payload.clone()));
        Ok(())
    })
}

fn client_with_recorder() -> (ApiClient, Seen) {
    let bus = EventBus::new();
    let seen = Seen::default();
    let handler = recorder(&seen);
    bus.register(API_CALL, handler.clone());
    bus.register(SECURITY_EVENT, handler);
    (ApiClient::new(bus), seen)
}

#[test]
fn get_emits_only_api_call() {
    let (client, seen) = client_with_recorder();
    client.get().unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![(API_CALL.to_string(), Value::from("API GET call data"))]
    );
}

#[parameterized(
    put = { Method::Put, "PUT" },
    post = { Method::Post, "POST" },
    delete = { Method::Delete, "DELETE" },
    patch = { Method::Patch, "PATCH" },
    option = { Method::Option, "OPTION" },
)]
fn mutating_calls_emit_security_event(method: Method, name: &str) {
    let (client, seen) = client_with_recorder();
    client.call(method).unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            (API_CALL.to_string(), Value::from(format!("API {name} call data"))),
            (SECURITY_EVENT.to_string(), Value::from(name)),
        ]
    );
}

#[test]
fn named_methods_match_call() {
    let (client, seen) = client_with_recorder();
    client.put().unwrap();
    client.post().unwrap();
    client.delete().unwrap();
    client.patch().unwrap();
    client.option().unwrap();

    let security: Vec<Value> = seen
        .lock()
        .unwrap()
        .iter()
        .filter(|(event, _)| event == SECURITY_EVENT)
        .map(|(_, payload)| payload.clone())
        .collect();
    assert_eq!(
        security,
        vec![
            Value::from("PUT"),
            Value::from("POST"),
            Value::from("DELETE"),
            Value::from("PATCH"),
            Value::from("OPTION"),
        ]
    );
}

#[test]
fn calls_without_handlers_succeed() {
    let client = ApiClient::new(EventBus::new());
    assert!(client.post().is_ok());
}

#[test]
fn handler_failure_reaches_caller() {
    let bus = EventBus::new();
    bus.register(
        SECURITY_EVENT,
        handler_fn(|_: &Value| Err("audit store unavailable".into())),
    );
    let client = ApiClient::new(bus);

    // Reads are not audited
    assert!(client.get().is_ok());
    let err = client.delete().unwrap_err();
    assert!(matches!(err, BusError::Handler { ref event, .. } if event == SECURITY_EVENT));
}

#[test]
fn method_display_uses_wire_name() {
    assert_eq!(Method::Option.to_string(), "OPTION");
    assert_eq!(Method::Get.to_string(), "GET");
    assert!(!Method::Get.is_security_relevant());
    assert!(Method::Patch.is_security_relevant());
}

//! FFI boundary tests
//!
//! Exercise the exported surface without a server: construction, session
//! gating and type conversions.

use flock_mobile::{FlockMobile, MobileChatEvent, MobileConnectionState, MobileError};

fn client() -> std::sync::Arc<FlockMobile> {
    FlockMobile::new(
        "https://api.example.com".to_string(),
        "wss://api.example.com".to_string(),
    )
    .expect("client construction is offline")
}

#[test]
fn test_fresh_client_has_no_session() {
    let client = client();
    assert!(client.session_tokens().unwrap().is_none());
}

#[test]
fn test_chat_calls_require_session() {
    let client = client();

    assert!(matches!(
        client.roster(),
        Err(MobileError::NotConnected)
    ));
    assert!(matches!(
        client.send_typing("c1".into()),
        Err(MobileError::NotConnected)
    ));
    assert!(matches!(
        client.pump_chat("c1".into()),
        Err(MobileError::NotConnected)
    ));
}

#[test]
fn test_end_chat_session_without_start_is_noop() {
    let client = client();
    client.end_chat_session();
    assert!(client.drain_events().is_empty());
}

#[test]
fn test_drain_events_clears_queue() {
    let client = client();
    assert!(client.drain_events().is_empty());
    assert!(client.drain_events().is_empty());
}

#[test]
fn test_error_messages_for_hosts() {
    let err = MobileError::ServerError("Username taken".into());
    assert_eq!(err.user_message(), "Username taken");

    let err = MobileError::NetworkError("reset".into());
    assert_eq!(
        err.user_message(),
        "Something went wrong. Please try again."
    );
}

#[test]
fn test_connection_state_conversion() {
    let state: MobileConnectionState =
        flock_core::ConnectionState::Reconnecting { attempt: 3 }.into();
    assert!(matches!(
        state,
        MobileConnectionState::Reconnecting { attempt: 3 }
    ));
}

#[test]
fn test_chat_event_conversion() {
    let event: MobileChatEvent = flock_core::ChatEvent::TypingChanged {
        chat_id: "c1".into(),
        is_typing: true,
    }
    .into();

    assert!(matches!(
        event,
        MobileChatEvent::TypingChanged { is_typing: true, .. }
    ));
}

//! Tests for chat::connection
//! Close-code semantics and the bounded reconnect budget.

use std::time::Duration;

use flock_core::{
    ChatConnection, ChatEndpoint, ChatError, ChatFrame, ChatTiming, ChatTransport,
    ClientConfig, ConnectionState, MockChatTransport, Reconnect,
};

fn endpoint() -> ChatEndpoint {
    ChatEndpoint {
        ws_base_url: "wss://api.test".into(),
        chat_id: "c1".into(),
        user_id: "me".into(),
        token: "tok".into(),
        connect_timeout_ms: 10_000,
        io_timeout_ms: 1_000,
    }
}

fn connection() -> ChatConnection<MockChatTransport> {
    ChatConnection::new(
        MockChatTransport::new(),
        endpoint(),
        ChatTiming::from_config(&ClientConfig::default()),
    )
}

#[test]
fn test_connect_opens_and_resets_counter() {
    let mut conn = connection();
    conn.connect().unwrap();

    assert!(conn.is_connected());
    assert_eq!(conn.state(), ConnectionState::Connected);
    assert_eq!(conn.reconnect_attempt(), 0);
}

#[test]
fn test_close_1000_never_triggers_reconnect() {
    let mut conn = connection();
    conn.connect().unwrap();

    conn.transport_mut().close_with(1000);
    assert!(matches!(conn.receive(), Err(ChatError::ConnectionClosed)));

    assert_eq!(conn.on_disconnected(), Reconnect::Stop);
}

#[test]
fn test_abnormal_close_allows_five_attempts_spaced_3000ms() {
    let mut conn = connection();
    conn.connect().unwrap();
    conn.transport_mut().close_with(1011);
    let _ = conn.receive();

    let mut scheduled = 0;
    loop {
        match conn.on_disconnected() {
            Reconnect::RetryAfter(delay) => {
                assert_eq!(delay, Duration::from_millis(3000));
                scheduled += 1;
                conn.transport_mut().fail_next_connect();
                assert!(conn.reconnect().is_err());
            }
            Reconnect::Stop => break,
        }
    }

    assert_eq!(scheduled, 5);
    // Terminal afterwards
    assert!(matches!(
        conn.reconnect(),
        Err(ChatError::MaxReconnectsExceeded)
    ));
}

#[test]
fn test_successful_reconnect_resets_budget() {
    let mut conn = connection();
    conn.connect().unwrap();
    conn.transport_mut().close_with(1011);
    let _ = conn.receive();

    // Two failed attempts, then one that succeeds
    for _ in 0..2 {
        assert!(matches!(conn.on_disconnected(), Reconnect::RetryAfter(_)));
        conn.transport_mut().fail_next_connect();
        assert!(conn.reconnect().is_err());
    }
    assert!(matches!(conn.on_disconnected(), Reconnect::RetryAfter(_)));
    conn.reconnect().unwrap();

    assert!(conn.is_connected());
    assert_eq!(conn.reconnect_attempt(), 0);
}

#[test]
fn test_teardown_contract() {
    let mut conn = connection();
    conn.connect().unwrap();

    conn.close();

    // (b) socket closed with code 1000 so reconnect logic does not trigger
    assert_eq!(conn.transport().last_close_code(), Some(1000));
    assert_eq!(conn.on_disconnected(), Reconnect::Stop);

    // Outbound after teardown fails
    assert!(matches!(
        conn.send_text("late", None),
        Err(ChatError::NotConnected)
    ));
}

#[test]
fn test_outbound_frames_are_typed_json() {
    let mut conn = connection();
    conn.connect().unwrap();

    conn.send_typing().unwrap();
    conn.send_stop_typing().unwrap();
    conn.mark_as_read("m7").unwrap();
    conn.delete_message("m8").unwrap();

    let sent = conn.transport().sent_frames();
    assert_eq!(
        sent[0],
        ChatFrame::Typing {
            user_id: "me".into()
        }
    );
    assert_eq!(
        sent[1],
        ChatFrame::StopTyping {
            user_id: "me".into()
        }
    );
    assert_eq!(
        sent[2],
        ChatFrame::MarkAsRead {
            message_id: "m7".into()
        }
    );
    assert_eq!(
        sent[3],
        ChatFrame::DeleteMessage {
            message_id: "m8".into()
        }
    );
}

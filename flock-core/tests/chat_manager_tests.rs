//! Tests for chat::manager
//! Typing debounce, reconciliation and teardown over the public surface.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use flock_core::{
    CallbackHandler, Chat, ChatError, ChatEvent, ChatFrame, ChatManager, ClientConfig,
    MockChatTransport,
};

const SELF_ID: &str = "me";
const PEER_ID: &str = "peer";

fn config() -> ClientConfig {
    ClientConfig::new("https://api.test", "wss://api.test")
}

fn test_chat(id: &str, last_message_at: Option<u64>) -> Chat {
    Chat {
        id: id.to_string(),
        peer_id: PEER_ID.to_string(),
        peer_username: "peer".to_string(),
        peer_avatar: None,
        last_message: None,
        last_message_at,
        unread_count: 0,
        is_read: true,
        is_online: false,
        is_typing: false,
        created_at: 1,
    }
}

fn manager() -> ChatManager<MockChatTransport> {
    let mut manager = ChatManager::new(&config(), SELF_ID, "tok", MockChatTransport::new);
    manager.load_roster(vec![test_chat("a", Some(100)), test_chat("b", Some(200))]);
    manager
}

fn typing() -> ChatFrame {
    ChatFrame::Typing {
        user_id: PEER_ID.to_string(),
    }
}

fn stop_typing() -> ChatFrame {
    ChatFrame::StopTyping {
        user_id: PEER_ID.to_string(),
    }
}

fn message(text: &str, at: u64) -> ChatFrame {
    ChatFrame::Message {
        id: Some(format!("m-{}", at)),
        sender_id: Some(PEER_ID.to_string()),
        text: text.to_string(),
        reply_to_id: None,
        created_at: Some(at),
    }
}

#[test]
fn test_typing_then_silence_clears_exactly_once() {
    let mut manager = manager();
    let events: Arc<Mutex<Vec<ChatEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    manager.add_handler(Arc::new(CallbackHandler::new(move |e| {
        sink.lock().unwrap().push(e)
    })));

    let t0 = Instant::now();
    manager.handle_frame("a", typing(), t0);
    assert!(manager.roster().get("a").unwrap().is_typing);

    // Sweep repeatedly past the deadline: the flag falls exactly once
    manager.expire_typing(t0 + Duration::from_secs(4));
    manager.expire_typing(t0 + Duration::from_secs(5));
    manager.expire_typing(t0 + Duration::from_secs(6));

    assert!(!manager.roster().get("a").unwrap().is_typing);

    let typing_changes: Vec<bool> = events
        .lock()
        .unwrap()
        .iter()
        .filter_map(|e| match e {
            ChatEvent::TypingChanged { is_typing, .. } => Some(*is_typing),
            _ => None,
        })
        .collect();
    assert_eq!(typing_changes, vec![true, false]);
}

#[test]
fn test_fresh_typing_replaces_pending_timer() {
    let mut manager = manager();
    let t0 = Instant::now();

    manager.handle_frame("a", typing(), t0);
    // Refresh 2s in: the old timer must be cancelled, not stacked
    manager.handle_frame("a", typing(), t0 + Duration::from_secs(2));
    assert_eq!(manager.pending_typing_count(), 1);

    // At t0+3s only the original timer would have fired
    assert!(manager
        .expire_typing(t0 + Duration::from_secs(3))
        .is_empty());
    assert!(manager.roster().get("a").unwrap().is_typing);

    // The refreshed deadline fires at t0+5s
    assert_eq!(
        manager.expire_typing(t0 + Duration::from_secs(5)),
        vec!["a".to_string()]
    );
}

#[test]
fn test_stop_typing_cancels_and_is_idempotent() {
    let mut manager = manager();
    let t0 = Instant::now();

    manager.handle_frame("a", typing(), t0);
    manager.handle_frame("a", stop_typing(), t0 + Duration::from_secs(1));
    assert_eq!(manager.pending_typing_count(), 0);

    // Cancelling an already-cleared timer is a no-op
    manager.handle_frame("a", stop_typing(), t0 + Duration::from_secs(2));
    assert_eq!(manager.pending_typing_count(), 0);

    // The old deadline must not fire later
    assert!(manager
        .expire_typing(t0 + Duration::from_secs(10))
        .is_empty());
}

#[test]
fn test_message_reorders_and_clears_typing() {
    let mut manager = manager();
    let t0 = Instant::now();

    manager.handle_frame("a", typing(), t0);
    manager.handle_frame("a", message("hello", 300), t0);

    let ids: Vec<_> = manager
        .roster()
        .chats()
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert!(!manager.roster().get("a").unwrap().is_typing);
    assert_eq!(manager.pending_typing_count(), 0);
}

#[test]
fn test_presence_events() {
    let mut manager = manager();
    let t0 = Instant::now();

    manager.handle_frame(
        "a",
        ChatFrame::UserJoined {
            user_id: PEER_ID.to_string(),
        },
        t0,
    );
    assert!(manager.roster().get("a").unwrap().is_online);

    manager.handle_frame("a", typing(), t0);
    manager.handle_frame(
        "a",
        ChatFrame::UserOffline {
            user_id: PEER_ID.to_string(),
        },
        t0,
    );

    let a = manager.roster().get("a").unwrap();
    assert!(!a.is_online);
    assert!(!a.is_typing);
    assert_eq!(manager.pending_typing_count(), 0);
}

#[test]
fn test_own_events_do_not_mutate_state() {
    let mut manager = manager();
    let t0 = Instant::now();

    manager.handle_frame(
        "a",
        ChatFrame::Typing {
            user_id: SELF_ID.to_string(),
        },
        t0,
    );
    manager.handle_frame(
        "a",
        ChatFrame::Message {
            id: Some("m1".into()),
            sender_id: Some(SELF_ID.to_string()),
            text: "echo".into(),
            reply_to_id: None,
            created_at: Some(400),
        },
        t0,
    );

    let a = manager.roster().get("a").unwrap();
    assert!(!a.is_typing);
    assert_eq!(a.unread_count, 0);
    // No reorder: b still first
    assert_eq!(manager.roster().chats()[0].id, "b");
}

#[test]
fn test_pump_drives_reconciliation_end_to_end() {
    let mut manager = manager();
    manager.open_chat("a").unwrap();

    {
        let transport = manager.connection_mut("a").unwrap().transport_mut();
        transport.queue_receive(ChatFrame::UserOnline {
            user_id: PEER_ID.to_string(),
        });
        transport.queue_receive(typing());
        transport.queue_receive(message("incoming", 999));
    }

    let report = manager.pump("a", Instant::now()).unwrap();
    assert_eq!(report.frames, 3);

    let a = manager.roster().get("a").unwrap();
    assert!(a.is_online);
    assert!(!a.is_typing); // message cleared the typing flag
    assert_eq!(a.last_message.as_deref(), Some("incoming"));
    assert_eq!(manager.roster().chats()[0].id, "a");
}

#[test]
fn test_abnormal_close_then_reconnect_cycle() {
    let mut manager = manager();
    manager.open_chat("a").unwrap();

    manager
        .connection_mut("a")
        .unwrap()
        .transport_mut()
        .close_with(1006);

    let report = manager.pump("a", Instant::now()).unwrap();
    assert_eq!(report.reconnect_after, Some(Duration::from_millis(3000)));
    assert!(!manager.is_connected("a"));

    assert_eq!(manager.reconnect("a").unwrap(), None);
    assert!(manager.is_connected("a"));
}

#[test]
fn test_clean_close_is_silent_termination() {
    let mut manager = manager();
    manager.open_chat("a").unwrap();

    manager
        .connection_mut("a")
        .unwrap()
        .transport_mut()
        .close_with(1000);

    let report = manager.pump("a", Instant::now()).unwrap();
    assert_eq!(report.reconnect_after, None);
    assert!(matches!(
        manager.reconnect("a"),
        Err(ChatError::MaxReconnectsExceeded)
    ));
}

#[test]
fn test_outbound_ops_fail_without_connection() {
    let mut manager = manager();

    assert!(matches!(
        manager.send_text("a", "hi", None),
        Err(ChatError::NotConnected)
    ));
    assert!(matches!(
        manager.mark_all_as_read("a"),
        Err(ChatError::NotConnected)
    ));
    assert!(matches!(
        manager.edit_message("a", "m1", "x"),
        Err(ChatError::NotConnected)
    ));
}

#[test]
fn test_teardown_drops_timers_and_handlers() {
    let mut manager = manager();
    manager.open_chat("a").unwrap();
    manager.handle_frame("a", typing(), Instant::now());
    manager.add_handler(Arc::new(CallbackHandler::new(|_| {})));

    manager.close_all();

    assert_eq!(manager.open_chat_count(), 0);
    assert_eq!(manager.pending_typing_count(), 0);
    assert_eq!(manager.handler_count(), 0);
}

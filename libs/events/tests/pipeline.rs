//! End-to-end classification through the three delivery channels.

use proptest::prelude::*;
use relay_events::{
    build_event, build_events_from_push_channel, build_events_from_transport_document,
    rebuild_decrypted, EventKind, EventSource, NotificationId, UpdateEvent,
};
use relay_testing::{
    decrypted_otr_message, event, history_page, member_join, notifications_page, object,
    otr_message, push_envelope,
};
use serde_json::json;

fn assert_no_flags(event: &UpdateEvent) {
    assert!(!event.is_transient());
    assert!(!event.is_flow_event());
    assert!(!event.is_encrypted());
    assert!(!event.is_generic_message_event());
    assert!(!event.has_encrypted_and_unencrypted_version());
    assert!(!event.was_decrypted());
}

#[test]
fn test_push_channel_known_and_unknown() {
    let id = NotificationId::new();
    let envelope = push_envelope(id, vec![member_join(&["u1"]), event("unknown.future-type")]);

    let events = build_events_from_push_channel(&envelope).unwrap();

    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.identifier() == Some(id)));
    assert!(events.iter().all(|e| e.source() == EventSource::WebSocket));
    assert_eq!(events[0].kind(), EventKind::ConversationMemberJoin);
    assert_eq!(events[1].kind(), EventKind::Unknown);
    assert_no_flags(&events[1]);
}

#[test]
fn test_push_channel_preserves_order() {
    let id = NotificationId::new();
    let envelope = push_envelope(
        id,
        vec![
            member_join(&["u1"]),
            event("conversation.member-update"),
            event("conversation.rename"),
        ],
    );

    let kinds: Vec<_> = build_events_from_push_channel(&envelope)
        .unwrap()
        .iter()
        .map(UpdateEvent::kind)
        .collect();

    assert_eq!(
        kinds,
        vec![
            EventKind::ConversationMemberJoin,
            EventKind::ConversationMemberUpdate,
            EventKind::ConversationRename,
        ]
    );
}

#[test]
fn test_empty_and_malformed_are_distinguishable() {
    let empty = push_envelope(NotificationId::new(), vec![]);
    assert_eq!(build_events_from_push_channel(&empty), Some(vec![]));

    let malformed = object(json!({"id": NotificationId::new().to_string()}));
    assert_eq!(build_events_from_push_channel(&malformed), None);

    let empty_page = notifications_page(vec![]);
    assert_eq!(
        build_events_from_transport_document(&empty_page, EventSource::PushNotification),
        Some(vec![])
    );

    let no_shape = object(json!({"has_more": true}));
    assert_eq!(
        build_events_from_transport_document(&no_shape, EventSource::PushNotification),
        None
    );
}

#[test]
fn test_notification_stream_and_download() {
    let page = notifications_page(vec![event("user.connection"), event("conversation.typing")]);
    let events = build_events_from_transport_document(&page, EventSource::PushNotification).unwrap();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.identifier().is_none()));
    assert!(events[1].is_transient());

    let history = history_page(vec![event("call.flow-add"), event("call.info")]);
    let events = build_events_from_transport_document(&history, EventSource::Download).unwrap();
    assert!(events[0].is_flow_event());
    assert!(events[1].kind().is_legacy());
    assert!(events.iter().all(|e| e.source() == EventSource::Download));

    let bare = event("user.client-remove");
    let events = build_events_from_transport_document(&bare, EventSource::Download).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind(), EventKind::UserClientRemove);
}

#[test]
fn test_decryption_transition_keeps_identity() {
    let id = NotificationId::new();
    let envelope = push_envelope(id, vec![otr_message("Y2lwaGVydGV4dA==")]);
    let mut events = build_events_from_push_channel(&envelope).unwrap();
    let mut encrypted = events.remove(0);
    encrypted.append_debug_information("n1");

    assert!(encrypted.is_encrypted());
    let before = encrypted.clone();

    let plaintext = decrypted_otr_message("aGVsbG8=");
    let decrypted = rebuild_decrypted(&encrypted, plaintext.clone(), EventSource::WebSocket).unwrap();

    assert_eq!(decrypted.identifier(), Some(id));
    assert!(decrypted.was_decrypted());
    assert_eq!(decrypted.debug_trail().notes(), ["n1"]);
    assert_eq!(decrypted.payload(), &plaintext);
    assert_ne!(decrypted.payload(), encrypted.payload());
    assert!(decrypted.payload()["data"].get("generic_message").is_some());
    assert!(decrypted.payload()["data"].get("text").is_none());
    assert!(decrypted.payload()["data"].get("recipient").is_none());
    assert!(encrypted.payload()["data"].get("text").is_some());

    assert_eq!(encrypted.payload(), before.payload());
    assert!(!encrypted.was_decrypted());
    assert_eq!(encrypted.debug_trail(), before.debug_trail());
}

#[test]
fn test_trail_on_decrypted_event_is_independent() {
    let mut encrypted = build_event(otr_message("eA=="), None, EventSource::Download);
    encrypted.append_debug_information("first");

    let mut decrypted =
        rebuild_decrypted(&encrypted, decrypted_otr_message("eQ=="), EventSource::Download)
            .unwrap();
    decrypted.append_debug_information("second");

    assert_eq!(encrypted.debug_trail().notes(), ["first"]);
    assert_eq!(decrypted.debug_trail().notes(), ["first", "second"]);
}

fn wire_type_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(
            EventKind::ALL
                .iter()
                .map(|k| k.to_string())
                .collect::<Vec<_>>()
        ),
        "[a-z.-]{0,30}",
    ]
}

proptest! {
    #[test]
    fn prop_flags_are_deterministic(wire in wire_type_strategy(), download in any::<bool>()) {
        let source = if download { EventSource::Download } else { EventSource::WebSocket };
        let id = Some(NotificationId::new());

        let a = build_event(event(&wire), id, source);
        let b = build_event(event(&wire), id, source);

        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.is_transient(), b.is_transient());
        prop_assert_eq!(a.is_flow_event(), b.is_flow_event());
        prop_assert_eq!(a.is_encrypted(), b.is_encrypted());
        prop_assert_eq!(a.is_generic_message_event(), b.is_generic_message_event());
        prop_assert_eq!(
            a.has_encrypted_and_unencrypted_version(),
            b.has_encrypted_and_unencrypted_version()
        );
    }

    #[test]
    fn prop_unknown_kinds_have_no_flags(wire in "[A-Z]{1,8}\\.[a-z]{1,8}") {
        let e = build_event(event(&wire), None, EventSource::Download);
        prop_assert_eq!(e.kind(), EventKind::Unknown);
        assert_no_flags(&e);
    }
}

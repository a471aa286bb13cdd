//! Transport document fixtures.
//!
//! Builders for the envelope shapes the backend sends, so tests read as
//! scenarios instead of JSON literals.

use relay_id::NotificationId;
use serde_json::{json, Map, Value};

/// A raw event document with the given wire type and a conversation id.
pub fn event(wire_type: &str) -> Map<String, Value> {
    object(json!({
        "type": wire_type,
        "conversation": "5f2a1c0e-9b7d-4e3a-8c21-7d9e0b4f6a13",
        "time": "2016-06-01T12:00:00.000Z",
        "from": "b1f7e6a0-3c2d-4b8e-9f10-2a3b4c5d6e7f",
    }))
}

/// A member-join event naming the joined users.
pub fn member_join(user_ids: &[&str]) -> Map<String, Value> {
    let mut doc = event("conversation.member-join");
    doc.insert("data".to_string(), json!({ "user_ids": user_ids }));
    doc
}

/// An OTR message event whose `data.text` still holds ciphertext.
pub fn otr_message(ciphertext: &str) -> Map<String, Value> {
    let mut doc = event("conversation.otr-message-add");
    doc.insert(
        "data".to_string(),
        json!({
            "sender": "4b3c2d1e0f",
            "recipient": "a1b2c3d4e5",
            "text": ciphertext,
        }),
    );
    doc
}

/// The replacement document for an OTR message once decrypted: `data`
/// carries the sender and the base64 generic message, and no ciphertext.
pub fn decrypted_otr_message(generic_message_b64: &str) -> Map<String, Value> {
    let mut doc = event("conversation.otr-message-add");
    doc.insert(
        "data".to_string(),
        json!({
            "sender": "4b3c2d1e0f",
            "generic_message": generic_message_b64,
        }),
    );
    doc
}

/// A push-channel envelope wrapping `events` under `id`.
pub fn push_envelope(id: NotificationId, events: Vec<Map<String, Value>>) -> Map<String, Value> {
    object(json!({
        "id": id.to_string(),
        "payload": events,
    }))
}

/// A REST notification page.
pub fn notifications_page(events: Vec<Map<String, Value>>) -> Map<String, Value> {
    object(json!({
        "notifications": events,
        "has_more": false,
    }))
}

/// A history download page.
pub fn history_page(events: Vec<Map<String, Value>>) -> Map<String, Value> {
    object(json!({ "events": events }))
}

/// Unwraps a JSON object literal.
///
/// # Panics
///
/// Panics if `value` is not an object; fixtures are expected to be.
pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture is not a JSON object: {other}"),
    }
}

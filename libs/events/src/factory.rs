//! Event construction.
//!
//! Composes envelope segmentation with classification, and rebuilds
//! encrypted events once their plaintext is available.

use relay_id::NotificationId;
use tracing::{debug, debug_span, trace};

use crate::document::Document;
use crate::extract::{segments_from_generic, segments_from_push_channel, Segment};
use crate::{EventError, EventSource, UpdateEvent};

/// Builds one event from a raw document. Never fails: a missing or
/// unrecognized `type` yields [`crate::EventKind::Unknown`].
pub fn build_event(
    raw: Document,
    identifier: Option<NotificationId>,
    source: EventSource,
) -> UpdateEvent {
    let event = UpdateEvent::new(raw, identifier, source);
    trace!(
        kind = %event.kind(),
        %source,
        identifier = ?event.identifier(),
        "classified update event"
    );
    event
}

/// Builds a single event from an event-stream document.
///
/// The source is [`EventSource::Download`], the convention for documents
/// fetched outside any envelope.
pub fn build_single_event(raw: Document, identifier: Option<NotificationId>) -> UpdateEvent {
    build_event(raw, identifier, EventSource::Download)
}

/// Builds every event in a push-channel envelope, in envelope order.
///
/// All events share the envelope's identifier and have source
/// [`EventSource::WebSocket`]. `None` if the envelope is malformed.
pub fn build_events_from_push_channel(doc: &Document) -> Option<Vec<UpdateEvent>> {
    let _span = debug_span!("classify_document", source = %EventSource::WebSocket).entered();
    let segments = segments_from_push_channel(doc)?;
    Some(build_all(segments, EventSource::WebSocket))
}

/// Builds every event in a notification page, history page, or bare event
/// document. No identifier is attached. `None` if no shape matches.
pub fn build_events_from_transport_document(
    doc: &Document,
    source: EventSource,
) -> Option<Vec<UpdateEvent>> {
    let _span = debug_span!("classify_document", %source).entered();
    let segments = segments_from_generic(doc, source)?;
    Some(build_all(segments, source))
}

fn build_all(segments: Vec<Segment>, source: EventSource) -> Vec<UpdateEvent> {
    segments
        .into_iter()
        .map(|segment| build_event(segment.document, segment.identifier, source))
        .collect()
}

/// Rebuilds an encrypted event from its decrypted replacement document.
///
/// The new event keeps `original`'s identifier and a copy of its debug
/// trail, and reports `was_decrypted() == true`. `original` is untouched.
pub fn try_rebuild_decrypted(
    original: &UpdateEvent,
    decrypted: Document,
    source: EventSource,
) -> Result<UpdateEvent, EventError> {
    if !original.is_encrypted() {
        return Err(EventError::NotEncrypted {
            kind: original.kind(),
        });
    }

    let rebuilt = build_event(decrypted, original.identifier(), source);
    if !rebuilt.kind().is_known() {
        return Err(EventError::UnusableDecryptedPayload(match rebuilt.wire_type() {
            Some(wire) => format!("unrecognized type `{wire}`"),
            None => "no `type` field".to_string(),
        }));
    }

    Ok(rebuilt.into_decrypted(original.debug_trail().clone()))
}

/// Rebuilds an encrypted event from its decrypted replacement document.
///
/// `None` when `original` is not (or no longer) encrypted, or when the
/// decrypted document does not classify to a known kind. Callers own the
/// retry/drop decision; the original event stays valid.
pub fn rebuild_decrypted(
    original: &UpdateEvent,
    decrypted: Document,
    source: EventSource,
) -> Option<UpdateEvent> {
    match try_rebuild_decrypted(original, decrypted, source) {
        Ok(event) => Some(event),
        Err(err) => {
            debug!(
                kind = %original.kind(),
                identifier = ?original.identifier(),
                error = %err,
                "decryption rebuild produced no event"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EventKind;
    use serde_json::{json, Value};
    use std::fmt;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::span::{Attributes, Id};
    use tracing::Subscriber;
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    /// Records `(span name, source field)` for every span opened.
    #[derive(Clone, Default)]
    struct SpanLog(Arc<Mutex<Vec<(String, String)>>>);

    struct SourceField(String);

    impl Visit for SourceField {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            if field.name() == "source" {
                self.0 = format!("{:?}", value);
            }
        }
    }

    impl<S: Subscriber> Layer<S> for SpanLog {
        fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
            let mut source = SourceField(String::new());
            attrs.record(&mut source);
            self.0
                .lock()
                .unwrap()
                .push((attrs.metadata().name().to_string(), source.0));
        }
    }

    fn spans_while(f: impl FnOnce()) -> Vec<(String, String)> {
        let log = SpanLog::default();
        let subscriber = tracing_subscriber::registry().with(log.clone());
        tracing::subscriber::with_default(subscriber, f);
        let spans = log.0.lock().unwrap().clone();
        spans
    }

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    fn encrypted() -> UpdateEvent {
        build_event(
            doc(json!({"type": "conversation.otr-asset-add", "data": {"key": "c2VjcmV0"}})),
            Some(NotificationId::new()),
            EventSource::WebSocket,
        )
    }

    #[test]
    fn test_build_single_event_uses_download() {
        let event = build_single_event(doc(json!({"type": "user.new"})), None);
        assert_eq!(event.source(), EventSource::Download);
        assert_eq!(event.kind(), EventKind::UserNew);
        assert_eq!(event.identifier(), None);
    }

    #[test]
    fn test_build_events_from_push_channel_malformed() {
        assert!(build_events_from_push_channel(&doc(json!({"payload": []}))).is_none());
    }

    #[test]
    fn test_build_events_from_transport_document_sets_source() {
        let page = doc(json!({"notifications": [{"type": "call.state"}, {"type": "user.update"}]}));
        let events =
            build_events_from_transport_document(&page, EventSource::PushNotification).unwrap();
        assert_eq!(events.len(), 2);
        assert!(events
            .iter()
            .all(|e| e.source() == EventSource::PushNotification && e.identifier().is_none()));
    }

    #[test]
    fn test_document_classification_runs_in_source_span() {
        let spans = spans_while(|| {
            let envelope = doc(json!({
                "id": "8f0d3c1e-4a7b-11e6-8000-22000b0a5d61",
                "payload": [{"type": "user.new"}]
            }));
            build_events_from_push_channel(&envelope).unwrap();

            let page = doc(json!({"events": [{"type": "user.update"}]}));
            build_events_from_transport_document(&page, EventSource::Download).unwrap();
        });

        assert_eq!(
            spans,
            vec![
                ("classify_document".to_string(), "web_socket".to_string()),
                ("classify_document".to_string(), "download".to_string()),
            ]
        );
    }

    #[test]
    fn test_rebuild_preserves_identity() {
        let mut original = encrypted();
        original.append_debug_information("ciphertext received");

        let plaintext = doc(json!({"type": "conversation.otr-asset-add", "data": {"text": "hi"}}));
        let rebuilt =
            rebuild_decrypted(&original, plaintext.clone(), EventSource::WebSocket).unwrap();

        assert_eq!(rebuilt.identifier(), original.identifier());
        assert_eq!(rebuilt.kind(), EventKind::ConversationOtrAssetAdd);
        assert!(rebuilt.was_decrypted());
        assert!(!rebuilt.is_encrypted());
        assert_eq!(rebuilt.payload(), &plaintext);
        assert_eq!(rebuilt.debug_trail().notes(), ["ciphertext received"]);

        assert!(original.is_encrypted());
        assert!(!original.was_decrypted());
    }

    #[test]
    fn test_rebuild_rejects_unencrypted_original() {
        let plain = build_event(
            doc(json!({"type": "conversation.message-add"})),
            None,
            EventSource::Download,
        );
        let result = try_rebuild_decrypted(
            &plain,
            doc(json!({"type": "conversation.message-add"})),
            EventSource::Download,
        );
        assert_eq!(
            result.unwrap_err(),
            EventError::NotEncrypted {
                kind: EventKind::ConversationMessageAdd
            }
        );
    }

    #[test]
    fn test_rebuild_is_one_shot() {
        let original = encrypted();
        let once = rebuild_decrypted(
            &original,
            doc(json!({"type": "conversation.otr-asset-add"})),
            EventSource::WebSocket,
        )
        .unwrap();
        assert!(rebuild_decrypted(
            &once,
            doc(json!({"type": "conversation.otr-asset-add"})),
            EventSource::WebSocket
        )
        .is_none());
    }

    #[test]
    fn test_rebuild_rejects_unclassifiable_plaintext() {
        let original = encrypted();

        let no_type = try_rebuild_decrypted(&original, doc(json!({"data": {}})), EventSource::WebSocket);
        assert!(matches!(
            no_type,
            Err(EventError::UnusableDecryptedPayload(_))
        ));

        let unknown = rebuild_decrypted(
            &original,
            doc(json!({"type": "conversation.something-new"})),
            EventSource::WebSocket,
        );
        assert!(unknown.is_none());
        assert!(original.is_encrypted());
    }

    #[test]
    fn test_rebuild_uses_supplied_source() {
        let original = encrypted();
        let rebuilt = rebuild_decrypted(
            &original,
            doc(json!({"type": "conversation.otr-asset-add"})),
            EventSource::Download,
        )
        .unwrap();
        assert_eq!(rebuilt.source(), EventSource::Download);
    }
}

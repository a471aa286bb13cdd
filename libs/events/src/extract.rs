//! Envelope segmentation.
//!
//! Splits one transport document into the ordered per-event documents it
//! carries. Nothing here classifies; see [`crate::factory`] for that.
//!
//! Accepted shapes:
//!
//! - push channel: `{"id": <uuid>, "payload": [event, ...]}`
//! - notification / history page: `{"notifications": [event, ...]}` or
//!   `{"events": [event, ...]}`
//! - bare event: `{"type": "...", ...}`

use relay_id::NotificationId;
use serde_json::Value;
use tracing::{debug, warn};

use crate::document::{array_field, str_field, value_kind, wire_type, Document};
use crate::{EventError, EventSource};

/// Push-channel envelope identifier field.
pub const ID_FIELD: &str = "id";

/// Push-channel envelope sequence field.
pub const PAYLOAD_FIELD: &str = "payload";

/// Sequence fields of paged envelopes, checked in this order.
pub const SEQUENCE_FIELDS: [&str; 2] = ["notifications", "events"];

/// One per-event document cut out of an envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// The raw event document.
    pub document: Document,
    /// Identifier shared by the enclosing envelope, if it had one.
    pub identifier: Option<NotificationId>,
}

/// Segments a push-channel envelope.
///
/// Every returned segment carries the envelope's identifier. An envelope with
/// an empty `payload` yields `Ok` with no segments.
pub fn try_segments_from_push_channel(doc: &Document) -> Result<Vec<Segment>, EventError> {
    let identifier: NotificationId = str_field(doc, ID_FIELD)?.parse()?;
    let items = array_field(doc, PAYLOAD_FIELD)?.ok_or(EventError::MissingField(PAYLOAD_FIELD))?;

    collect_objects(items, PAYLOAD_FIELD, Some(identifier))
}

/// Segments a push-channel envelope, `None` if the shape does not match.
pub fn segments_from_push_channel(doc: &Document) -> Option<Vec<Segment>> {
    match try_segments_from_push_channel(doc) {
        Ok(segments) => Some(segments),
        Err(err) => {
            debug!(error = %err, "rejected push channel envelope");
            None
        }
    }
}

/// Segments a notification page, history page, or bare event document.
///
/// A named sequence field that is present but not an array is an error; it
/// does not fall back to treating the document as a bare event.
pub fn try_segments_from_generic(
    doc: &Document,
    source: EventSource,
) -> Result<Vec<Segment>, EventError> {
    for field in SEQUENCE_FIELDS {
        if let Some(items) = array_field(doc, field)? {
            debug!(%source, field, count = items.len(), "segmenting paged envelope");
            return collect_objects(items, field, None);
        }
    }

    if wire_type(doc).is_some() {
        return Ok(vec![Segment {
            document: doc.clone(),
            identifier: None,
        }]);
    }

    Err(EventError::UnrecognizedShape(format!(
        "expected one of {:?} or a `type` field",
        SEQUENCE_FIELDS
    )))
}

/// Segments a generic envelope, `None` if no accepted shape matches.
pub fn segments_from_generic(doc: &Document, source: EventSource) -> Option<Vec<Segment>> {
    match try_segments_from_generic(doc, source) {
        Ok(segments) => Some(segments),
        Err(err) => {
            debug!(%source, error = %err, "rejected transport document");
            None
        }
    }
}

/// Keeps the object entries of a sequence, in order.
///
/// Non-object entries are skipped. A non-empty sequence with no object entry
/// at all is malformed, so it stays distinguishable from an empty one.
fn collect_objects(
    items: &[Value],
    field: &'static str,
    identifier: Option<NotificationId>,
) -> Result<Vec<Segment>, EventError> {
    let segments: Vec<Segment> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match item {
            Value::Object(document) => Some(Segment {
                document: document.clone(),
                identifier,
            }),
            other => {
                warn!(
                    field,
                    index,
                    found = value_kind(other),
                    "skipping non-object event entry"
                );
                None
            }
        })
        .collect();

    if segments.is_empty() && !items.is_empty() {
        return Err(EventError::invalid(
            field,
            format!("none of {} entries is an object", items.len()),
        ));
    }

    Ok(segments)
}

//! The classified update event.

use relay_id::NotificationId;
use serde::Serialize;

use crate::document::{wire_type, Document};
use crate::{EventKind, EventSource};

/// Append-only list of free-text diagnostic notes.
///
/// Notes are never removed or reordered. The trail is carried across the
/// decryption rebuild but takes no part in event equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DebugTrail(Vec<String>);

impl DebugTrail {
    /// Appends a note.
    pub fn push(&mut self, note: impl Into<String>) {
        self.0.push(note.into());
    }

    /// Notes in the order they were appended.
    pub fn notes(&self) -> &[String] {
        &self.0
    }

    /// Number of notes appended so far.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True until the first note is appended.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All notes joined by newlines, `None` when the trail is empty.
    pub fn joined(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self.0.join("\n"))
        }
    }
}

/// One classified occurrence from the push channel, the notification stream,
/// or a history download.
///
/// `kind`, `source` and `identifier` are fixed at construction. The payload
/// is only ever replaced by building a new event through
/// [`crate::rebuild_decrypted`]; the debug trail is the one part that can be
/// appended to in place, which requires `&mut self`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateEvent {
    payload: Document,
    kind: EventKind,
    source: EventSource,
    identifier: Option<NotificationId>,
    was_decrypted: bool,
    debug_trail: DebugTrail,
}

impl UpdateEvent {
    pub(crate) fn new(
        payload: Document,
        identifier: Option<NotificationId>,
        source: EventSource,
    ) -> Self {
        let kind = wire_type(&payload)
            .map(EventKind::from_wire)
            .unwrap_or(EventKind::Unknown);

        Self {
            payload,
            kind,
            source,
            identifier,
            was_decrypted: false,
            debug_trail: DebugTrail::default(),
        }
    }

    pub(crate) fn into_decrypted(mut self, trail: DebugTrail) -> Self {
        self.was_decrypted = true;
        self.debug_trail = trail;
        self
    }

    /// The raw document, or its decrypted replacement.
    pub fn payload(&self) -> &Document {
        &self.payload
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn source(&self) -> EventSource {
        self.source
    }

    /// Identifier shared by the push-channel envelope this event came from.
    pub fn identifier(&self) -> Option<NotificationId> {
        self.identifier
    }

    /// The payload's raw `type` string, if it has one.
    pub fn wire_type(&self) -> Option<&str> {
        wire_type(&self.payload)
    }

    /// True if the event will not appear in the notification stream.
    pub fn is_transient(&self) -> bool {
        self.kind.is_transient()
    }

    /// True if the event concerns call flows.
    pub fn is_flow_event(&self) -> bool {
        self.kind.is_flow()
    }

    /// True while the payload still holds ciphertext.
    pub fn is_encrypted(&self) -> bool {
        self.kind.is_encrypted_family() && !self.was_decrypted
    }

    /// True if the (decrypted) payload is a generic message envelope.
    pub fn is_generic_message_event(&self) -> bool {
        self.kind.is_generic_message()
    }

    /// True on events produced by the decryption rebuild.
    pub fn was_decrypted(&self) -> bool {
        self.was_decrypted
    }

    /// True if this kind exists in both a plaintext and an encrypted version.
    pub fn has_encrypted_and_unencrypted_version(&self) -> bool {
        self.kind.has_encrypted_and_unencrypted_version()
    }

    pub fn debug_trail(&self) -> &DebugTrail {
        &self.debug_trail
    }

    /// The debug trail as a single newline-joined string.
    pub fn debug_information(&self) -> Option<String> {
        self.debug_trail.joined()
    }

    /// Appends a diagnostic note. Affects nothing but the trail.
    pub fn append_debug_information(&mut self, note: impl Into<String>) {
        self.debug_trail.push(note);
    }
}

impl PartialEq for UpdateEvent {
    fn eq(&self, other: &Self) -> bool {
        self.payload == other.payload
            && self.kind == other.kind
            && self.source == other.source
            && self.identifier == other.identifier
            && self.was_decrypted == other.was_decrypted
    }
}

/// Appends a diagnostic note to `event`. See
/// [`UpdateEvent::append_debug_information`].
pub fn append_debug_information(event: &mut UpdateEvent, note: impl Into<String>) {
    event.append_debug_information(note);
}

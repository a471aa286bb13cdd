//! # relay-events
//!
//! Classification and normalization of update events for relay clients.
//!
//! ## Design Principles
//!
//! - Wire `type` strings map onto a closed [`EventKind`] set; anything
//!   unrecognized becomes [`EventKind::Unknown`] instead of an error
//! - Extraction never panics; a malformed envelope yields `None`, which is
//!   distinct from an envelope carrying zero events
//! - Events are immutable apart from an append-only debug trail
//! - Decrypting an event builds a new event that keeps the old identity
//!
//! ## Channels
//!
//! Events reach a client through three channels ([`EventSource`]):
//! - the push channel (`{"id", "payload": [...]}` envelopes)
//! - the REST notification stream (`{"notifications": [...]}` pages)
//! - bulk history downloads (`{"events": [...]}` pages or bare events)
//!
//! ## Example
//!
//! ```
//! use relay_events::{build_events_from_push_channel, parse_document, EventKind};
//!
//! let envelope = parse_document(
//!     r#"{"id": "8f0d3c1e-4a7b-11e6-8000-22000b0a5d61",
//!         "payload": [{"type": "conversation.member-join"}]}"#,
//! )?;
//! let events = build_events_from_push_channel(&envelope).unwrap_or_default();
//! assert_eq!(events[0].kind(), EventKind::ConversationMemberJoin);
//! # Ok::<(), relay_events::EventError>(())
//! ```

mod document;
mod error;
mod event;
mod extract;
mod factory;
mod kind;

pub use document::{parse_document, wire_type, Document, TYPE_FIELD};
pub use error::EventError;
pub use event::{append_debug_information, DebugTrail, UpdateEvent};
pub use extract::*;
pub use factory::*;
pub use kind::*;

pub use relay_id::NotificationId;

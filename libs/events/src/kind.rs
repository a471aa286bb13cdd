//! Event kind catalog.
//!
//! Maps wire-level `type` strings onto the closed [`EventKind`] set. The
//! mapping is total: anything not in the table classifies as
//! [`EventKind::Unknown`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// =============================================================================
// Wire Type Constants
// =============================================================================

/// All wire type strings as constants.
pub mod wire_types {
    // Call
    pub const CALL_CANDIDATES_ADD: &str = "call.candidates-add";
    pub const CALL_CANDIDATES_UPDATE: &str = "call.candidates-update";
    pub const CALL_DEVICE_INFO: &str = "call.device-info";
    pub const CALL_FLOW_ACTIVE: &str = "call.flow-active";
    pub const CALL_FLOW_ADD: &str = "call.flow-add";
    pub const CALL_FLOW_DELETE: &str = "call.flow-delete";
    pub const CALL_STATE: &str = "call.state";
    pub const CALL_PARTICIPANTS: &str = "call.participants";
    pub const CALL_REMOTE_SDP: &str = "call.remote-sdp";

    /// Legacy string, still accepted on read.
    pub const LEGACY_CALL_INFO: &str = "call.info";

    // Conversation
    pub const CONVERSATION_ASSET_ADD: &str = "conversation.asset-add";
    pub const CONVERSATION_CONNECT_REQUEST: &str = "conversation.connect-request";
    pub const CONVERSATION_CREATE: &str = "conversation.create";
    pub const CONVERSATION_KNOCK: &str = "conversation.knock";
    pub const CONVERSATION_MEMBER_JOIN: &str = "conversation.member-join";
    pub const CONVERSATION_MEMBER_LEAVE: &str = "conversation.member-leave";
    pub const CONVERSATION_MEMBER_UPDATE: &str = "conversation.member-update";
    pub const CONVERSATION_MESSAGE_ADD: &str = "conversation.message-add";
    pub const CONVERSATION_CLIENT_MESSAGE_ADD: &str = "conversation.client-message-add";
    pub const CONVERSATION_OTR_MESSAGE_ADD: &str = "conversation.otr-message-add";
    pub const CONVERSATION_OTR_ASSET_ADD: &str = "conversation.otr-asset-add";
    pub const CONVERSATION_RENAME: &str = "conversation.rename";
    pub const CONVERSATION_TYPING: &str = "conversation.typing";
    pub const CONVERSATION_VOICE_CHANNEL: &str = "conversation.voice-channel";
    pub const CONVERSATION_VOICE_CHANNEL_ACTIVATE: &str = "conversation.voice-channel-activate";
    pub const CONVERSATION_VOICE_CHANNEL_DEACTIVATE: &str =
        "conversation.voice-channel-deactivate";

    // User
    pub const USER_CONNECTION: &str = "user.connection";
    pub const USER_NEW: &str = "user.new";
    pub const USER_UPDATE: &str = "user.update";
    pub const USER_PUSH_REMOVE: &str = "user.push-remove";
    pub const USER_CONTACT_JOIN: &str = "user.contact-join";
    pub const USER_CLIENT_ADD: &str = "user.client-add";
    pub const USER_CLIENT_REMOVE: &str = "user.client-remove";
}

// =============================================================================
// Event Kind
// =============================================================================

/// Closed classification of an update event.
///
/// Consumers must match [`EventKind::Unknown`] explicitly; it is what every
/// unrecognized wire string resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum EventKind {
    #[default]
    Unknown,

    CallCandidatesAdd,
    CallCandidatesUpdate,
    CallDeviceInfo,
    CallFlowActive,
    CallFlowAdd,
    CallFlowDelete,
    CallState,
    #[deprecated(note = "superseded by EventKind::CallState; only produced when reading `call.info`")]
    CallInfo,
    CallParticipants,
    CallRemoteSdp,

    ConversationAssetAdd,
    ConversationConnectRequest,
    ConversationCreate,
    ConversationKnock,
    ConversationMemberJoin,
    ConversationMemberLeave,
    ConversationMemberUpdate,
    ConversationMessageAdd,
    ConversationClientMessageAdd,
    ConversationOtrMessageAdd,
    ConversationOtrAssetAdd,
    ConversationRename,
    ConversationTyping,
    ConversationVoiceChannel,
    ConversationVoiceChannelActivate,
    ConversationVoiceChannelDeactivate,

    UserConnection,
    UserNew,
    UserUpdate,
    UserPushRemove,
    UserContactJoin,
    UserClientAdd,
    UserClientRemove,
}

/// Broad grouping of kinds by the backend service that emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventFamily {
    Call,
    Conversation,
    User,
    Unknown,
}

impl fmt::Display for EventFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EventFamily::Call => "call",
            EventFamily::Conversation => "conversation",
            EventFamily::User => "user",
            EventFamily::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

#[allow(deprecated)]
impl EventKind {
    /// Every known kind in declaration order, `Unknown` excluded.
    ///
    /// Use this to enumerate kinds instead of hardcoding counts.
    pub const ALL: &'static [EventKind] = &[
        EventKind::CallCandidatesAdd,
        EventKind::CallCandidatesUpdate,
        EventKind::CallDeviceInfo,
        EventKind::CallFlowActive,
        EventKind::CallFlowAdd,
        EventKind::CallFlowDelete,
        EventKind::CallState,
        EventKind::CallInfo,
        EventKind::CallParticipants,
        EventKind::CallRemoteSdp,
        EventKind::ConversationAssetAdd,
        EventKind::ConversationConnectRequest,
        EventKind::ConversationCreate,
        EventKind::ConversationKnock,
        EventKind::ConversationMemberJoin,
        EventKind::ConversationMemberLeave,
        EventKind::ConversationMemberUpdate,
        EventKind::ConversationMessageAdd,
        EventKind::ConversationClientMessageAdd,
        EventKind::ConversationOtrMessageAdd,
        EventKind::ConversationOtrAssetAdd,
        EventKind::ConversationRename,
        EventKind::ConversationTyping,
        EventKind::ConversationVoiceChannel,
        EventKind::ConversationVoiceChannelActivate,
        EventKind::ConversationVoiceChannelDeactivate,
        EventKind::UserConnection,
        EventKind::UserNew,
        EventKind::UserUpdate,
        EventKind::UserPushRemove,
        EventKind::UserContactJoin,
        EventKind::UserClientAdd,
        EventKind::UserClientRemove,
    ];

    /// Classifies a wire type string. Never fails; unrecognized input
    /// (including the empty string) yields [`EventKind::Unknown`].
    pub fn from_wire(s: &str) -> EventKind {
        use wire_types::*;

        match s {
            CALL_CANDIDATES_ADD => EventKind::CallCandidatesAdd,
            CALL_CANDIDATES_UPDATE => EventKind::CallCandidatesUpdate,
            CALL_DEVICE_INFO => EventKind::CallDeviceInfo,
            CALL_FLOW_ACTIVE => EventKind::CallFlowActive,
            CALL_FLOW_ADD => EventKind::CallFlowAdd,
            CALL_FLOW_DELETE => EventKind::CallFlowDelete,
            CALL_STATE => EventKind::CallState,
            LEGACY_CALL_INFO => EventKind::CallInfo,
            CALL_PARTICIPANTS => EventKind::CallParticipants,
            CALL_REMOTE_SDP => EventKind::CallRemoteSdp,
            CONVERSATION_ASSET_ADD => EventKind::ConversationAssetAdd,
            CONVERSATION_CONNECT_REQUEST => EventKind::ConversationConnectRequest,
            CONVERSATION_CREATE => EventKind::ConversationCreate,
            CONVERSATION_KNOCK => EventKind::ConversationKnock,
            CONVERSATION_MEMBER_JOIN => EventKind::ConversationMemberJoin,
            CONVERSATION_MEMBER_LEAVE => EventKind::ConversationMemberLeave,
            CONVERSATION_MEMBER_UPDATE => EventKind::ConversationMemberUpdate,
            CONVERSATION_MESSAGE_ADD => EventKind::ConversationMessageAdd,
            CONVERSATION_CLIENT_MESSAGE_ADD => EventKind::ConversationClientMessageAdd,
            CONVERSATION_OTR_MESSAGE_ADD => EventKind::ConversationOtrMessageAdd,
            CONVERSATION_OTR_ASSET_ADD => EventKind::ConversationOtrAssetAdd,
            CONVERSATION_RENAME => EventKind::ConversationRename,
            CONVERSATION_TYPING => EventKind::ConversationTyping,
            CONVERSATION_VOICE_CHANNEL => EventKind::ConversationVoiceChannel,
            CONVERSATION_VOICE_CHANNEL_ACTIVATE => EventKind::ConversationVoiceChannelActivate,
            CONVERSATION_VOICE_CHANNEL_DEACTIVATE => EventKind::ConversationVoiceChannelDeactivate,
            USER_CONNECTION => EventKind::UserConnection,
            USER_NEW => EventKind::UserNew,
            USER_UPDATE => EventKind::UserUpdate,
            USER_PUSH_REMOVE => EventKind::UserPushRemove,
            USER_CONTACT_JOIN => EventKind::UserContactJoin,
            USER_CLIENT_ADD => EventKind::UserClientAdd,
            USER_CLIENT_REMOVE => EventKind::UserClientRemove,
            _ => EventKind::Unknown,
        }
    }

    /// Returns the canonical wire string for this kind.
    ///
    /// `None` for [`EventKind::Unknown`] and for the legacy `CallInfo` alias,
    /// which is recognized on read but never written.
    pub fn wire_string(self) -> Option<&'static str> {
        use wire_types::*;

        let s = match self {
            EventKind::Unknown | EventKind::CallInfo => return None,
            EventKind::CallCandidatesAdd => CALL_CANDIDATES_ADD,
            EventKind::CallCandidatesUpdate => CALL_CANDIDATES_UPDATE,
            EventKind::CallDeviceInfo => CALL_DEVICE_INFO,
            EventKind::CallFlowActive => CALL_FLOW_ACTIVE,
            EventKind::CallFlowAdd => CALL_FLOW_ADD,
            EventKind::CallFlowDelete => CALL_FLOW_DELETE,
            EventKind::CallState => CALL_STATE,
            EventKind::CallParticipants => CALL_PARTICIPANTS,
            EventKind::CallRemoteSdp => CALL_REMOTE_SDP,
            EventKind::ConversationAssetAdd => CONVERSATION_ASSET_ADD,
            EventKind::ConversationConnectRequest => CONVERSATION_CONNECT_REQUEST,
            EventKind::ConversationCreate => CONVERSATION_CREATE,
            EventKind::ConversationKnock => CONVERSATION_KNOCK,
            EventKind::ConversationMemberJoin => CONVERSATION_MEMBER_JOIN,
            EventKind::ConversationMemberLeave => CONVERSATION_MEMBER_LEAVE,
            EventKind::ConversationMemberUpdate => CONVERSATION_MEMBER_UPDATE,
            EventKind::ConversationMessageAdd => CONVERSATION_MESSAGE_ADD,
            EventKind::ConversationClientMessageAdd => CONVERSATION_CLIENT_MESSAGE_ADD,
            EventKind::ConversationOtrMessageAdd => CONVERSATION_OTR_MESSAGE_ADD,
            EventKind::ConversationOtrAssetAdd => CONVERSATION_OTR_ASSET_ADD,
            EventKind::ConversationRename => CONVERSATION_RENAME,
            EventKind::ConversationTyping => CONVERSATION_TYPING,
            EventKind::ConversationVoiceChannel => CONVERSATION_VOICE_CHANNEL,
            EventKind::ConversationVoiceChannelActivate => CONVERSATION_VOICE_CHANNEL_ACTIVATE,
            EventKind::ConversationVoiceChannelDeactivate => CONVERSATION_VOICE_CHANNEL_DEACTIVATE,
            EventKind::UserConnection => USER_CONNECTION,
            EventKind::UserNew => USER_NEW,
            EventKind::UserUpdate => USER_UPDATE,
            EventKind::UserPushRemove => USER_PUSH_REMOVE,
            EventKind::UserContactJoin => USER_CONTACT_JOIN,
            EventKind::UserClientAdd => USER_CLIENT_ADD,
            EventKind::UserClientRemove => USER_CLIENT_REMOVE,
        };
        Some(s)
    }

    /// Returns true for every kind except [`EventKind::Unknown`].
    pub fn is_known(self) -> bool {
        !matches!(self, EventKind::Unknown)
    }

    /// Returns true for the read-only legacy alias.
    pub fn is_legacy(self) -> bool {
        matches!(self, EventKind::CallInfo)
    }

    /// The service family this kind belongs to.
    pub fn family(self) -> EventFamily {
        match self {
            EventKind::Unknown => EventFamily::Unknown,
            EventKind::CallCandidatesAdd
            | EventKind::CallCandidatesUpdate
            | EventKind::CallDeviceInfo
            | EventKind::CallFlowActive
            | EventKind::CallFlowAdd
            | EventKind::CallFlowDelete
            | EventKind::CallState
            | EventKind::CallInfo
            | EventKind::CallParticipants
            | EventKind::CallRemoteSdp => EventFamily::Call,
            EventKind::ConversationAssetAdd
            | EventKind::ConversationConnectRequest
            | EventKind::ConversationCreate
            | EventKind::ConversationKnock
            | EventKind::ConversationMemberJoin
            | EventKind::ConversationMemberLeave
            | EventKind::ConversationMemberUpdate
            | EventKind::ConversationMessageAdd
            | EventKind::ConversationClientMessageAdd
            | EventKind::ConversationOtrMessageAdd
            | EventKind::ConversationOtrAssetAdd
            | EventKind::ConversationRename
            | EventKind::ConversationTyping
            | EventKind::ConversationVoiceChannel
            | EventKind::ConversationVoiceChannelActivate
            | EventKind::ConversationVoiceChannelDeactivate => EventFamily::Conversation,
            EventKind::UserConnection
            | EventKind::UserNew
            | EventKind::UserUpdate
            | EventKind::UserPushRemove
            | EventKind::UserContactJoin
            | EventKind::UserClientAdd
            | EventKind::UserClientRemove => EventFamily::User,
        }
    }

    /// Kinds that never show up in the durable notification stream.
    pub fn is_transient(self) -> bool {
        matches!(
            self,
            EventKind::ConversationTyping | EventKind::ConversationVoiceChannelActivate
        )
    }

    /// Kinds that belong to call flow signaling.
    pub fn is_flow(self) -> bool {
        matches!(
            self,
            EventKind::CallFlowActive
                | EventKind::CallFlowAdd
                | EventKind::CallFlowDelete
                | EventKind::CallCandidatesAdd
                | EventKind::CallCandidatesUpdate
                | EventKind::CallRemoteSdp
                | EventKind::CallDeviceInfo
        )
    }

    /// Kinds whose payload arrives as ciphertext.
    pub fn is_encrypted_family(self) -> bool {
        matches!(
            self,
            EventKind::ConversationOtrMessageAdd | EventKind::ConversationOtrAssetAdd
        )
    }

    /// Kinds whose (decrypted) payload is a generic message envelope.
    pub fn is_generic_message(self) -> bool {
        matches!(
            self,
            EventKind::ConversationClientMessageAdd
                | EventKind::ConversationOtrMessageAdd
                | EventKind::ConversationOtrAssetAdd
        )
    }

    /// Kinds that exist in both a legacy plaintext and an encrypted wire form.
    pub fn has_encrypted_and_unencrypted_version(self) -> bool {
        matches!(
            self,
            EventKind::ConversationMessageAdd
                | EventKind::ConversationAssetAdd
                | EventKind::ConversationKnock
                | EventKind::ConversationOtrMessageAdd
                | EventKind::ConversationOtrAssetAdd
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[allow(deprecated)]
        let s = match self {
            EventKind::Unknown => "unknown",
            EventKind::CallInfo => wire_types::LEGACY_CALL_INFO,
            other => other.wire_string().unwrap_or("unknown"),
        };
        write!(f, "{}", s)
    }
}

impl FromStr for EventKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(EventKind::from_wire(s))
    }
}

impl Serialize for EventKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EventKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(EventKind::from_wire(&s))
    }
}

/// Classifies a wire type string. See [`EventKind::from_wire`].
pub fn kind_for_wire_string(s: &str) -> EventKind {
    EventKind::from_wire(s)
}

/// Canonical wire string for a kind. See [`EventKind::wire_string`].
pub fn wire_string_for_kind(kind: EventKind) -> Option<&'static str> {
    kind.wire_string()
}

// =============================================================================
// Source & Policy
// =============================================================================

/// Channel an event was delivered through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    /// Live push channel.
    WebSocket,
    /// REST notification stream, fetched after a push notification.
    PushNotification,
    /// Bulk history download.
    Download,
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventSource::WebSocket => write!(f, "web_socket"),
            EventSource::PushNotification => write!(f, "push_notification"),
            EventSource::Download => write!(f, "download"),
        }
    }
}

/// What a dispatcher does with incoming events.
///
/// Not consulted anywhere in this crate; it lives here so dispatchers and
/// the sync engine agree on one vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UpdateEventsPolicy {
    /// Store live events in a buffer to be processed later.
    #[default]
    Buffer,
    /// Drop live events; the notification stream will deliver them.
    Ignore,
    /// Process push-channel events as they arrive.
    Process,
}

impl fmt::Display for UpdateEventsPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateEventsPolicy::Buffer => write!(f, "buffer"),
            UpdateEventsPolicy::Ignore => write!(f, "ignore"),
            UpdateEventsPolicy::Process => write!(f, "process"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

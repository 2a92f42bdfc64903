use crate::ids::{SessionId, UserId};
use crate::preferences::Preferences;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Client → core. Field names and tags are normative wire contract, not an
/// implementation detail — the transport gateway decodes frames directly
/// into this enum.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InboundEvent {
    FindMatch {
        #[serde(rename = "userId")]
        user_id: UserId,
        preferences: Preferences,
    },
    CancelMatch,
    Skip {
        #[serde(rename = "userId", default)]
        user_id: Option<UserId>,
        #[serde(default)]
        preferences: Option<Preferences>,
        #[serde(rename = "autoRequeue")]
        auto_requeue: bool,
    },
    SendMessage {
        message: String,
    },
    Typing,
    StopTyping,
    Offer {
        to: SessionId,
        #[serde(flatten)]
        payload: Value,
    },
    Answer {
        to: SessionId,
        #[serde(flatten)]
        payload: Value,
    },
    IceCandidate {
        to: SessionId,
        #[serde(flatten)]
        payload: Value,
    },
    VideoToggle {
        enabled: bool,
    },
    AudioToggle {
        enabled: bool,
    },
}

/// Core → client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OutboundEvent {
    Searching {
        #[serde(rename = "queuePosition", skip_serializing_if = "Option::is_none")]
        queue_position: Option<usize>,
        #[serde(rename = "waitTime")]
        wait_time_ms: i64,
    },
    MatchFound {
        #[serde(rename = "matchSessionID")]
        match_session_id: SessionId,
        #[serde(rename = "matchUserID")]
        match_user_id: UserId,
        #[serde(rename = "waitTime")]
        wait_time_ms: i64,
    },
    MatchCancelled,
    MatchEnded {
        reason: String,
        #[serde(rename = "fromSessionID")]
        from_session_id: SessionId,
        disconnected: bool,
        #[serde(rename = "autoRequeue")]
        auto_requeue: bool,
    },
    ReceiveMessage {
        message: String,
        timestamp: chrono::DateTime<chrono::Utc>,
        #[serde(rename = "senderId")]
        sender_id: SessionId,
    },
    MessageBlocked {
        reason: String,
    },
    UserTyping,
    UserStoppedTyping,
    Offer {
        from: SessionId,
        #[serde(flatten)]
        payload: Value,
    },
    Answer {
        from: SessionId,
        #[serde(flatten)]
        payload: Value,
    },
    IceCandidate {
        from: SessionId,
        #[serde(flatten)]
        payload: Value,
    },
    PeerVideoToggle {
        enabled: bool,
    },
    PeerAudioToggle {
        enabled: bool,
    },
    MatchmakingStopped,
    SkipSuccess {
        #[serde(rename = "autoRequeue")]
        auto_requeue: bool,
    },
}

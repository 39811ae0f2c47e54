//! Direct messages and the derived conversation projection.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::account::{UserAccount, UserId};

/// Key prefix carried inside every message identifier.
const ID_PREFIX: &str = "msg_";

/// Validation errors raised by message primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageValidationError {
    /// Identifier did not start with `msg_` or had an empty suffix.
    MalformedId,
    /// Message text was blank once trimmed.
    EmptyText,
}

impl fmt::Display for MessageValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedId => write!(f, "message id must be of the form msg_<suffix>"),
            Self::EmptyText => write!(f, "message text must not be empty"),
        }
    }
}

impl std::error::Error for MessageValidationError {}

/// Generated message identifier of the form `msg_<suffix>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MessageId(String);

impl MessageId {
    /// Validate and construct a [`MessageId`] from an existing string.
    pub fn new(raw: impl Into<String>) -> Result<Self, MessageValidationError> {
        let raw = raw.into();
        match raw.strip_prefix(ID_PREFIX) {
            Some(suffix) if !suffix.is_empty() => Ok(Self(raw)),
            _ => Err(MessageValidationError::MalformedId),
        }
    }

    /// Generate a fresh unique identifier.
    pub fn generate() -> Self {
        Self(format!("{ID_PREFIX}{}", Uuid::new_v4().simple()))
    }

    /// Borrow the raw identifier string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<MessageId> for String {
    fn from(value: MessageId) -> Self {
        value.0
    }
}

impl TryFrom<String> for MessageId {
    type Error = MessageValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// One directed text between two users, stored under `message:<id>`.
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Generated identifier.
    #[schema(value_type = String, example = "msg_4be1a0")]
    pub id: MessageId,
    /// Author; stamped from the authenticated caller.
    #[schema(value_type = String)]
    pub sender_id: UserId,
    /// Addressee.
    #[schema(value_type = String)]
    pub receiver_id: UserId,
    /// Message body.
    pub text: String,
    /// Creation instant; write-once.
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// The other party of this message from `viewer`'s perspective.
    pub fn counterpart_of(&self, viewer: &UserId) -> &UserId {
        if &self.sender_id == viewer {
            &self.receiver_id
        } else {
            &self.sender_id
        }
    }

    /// True when `viewer` is the sender or the receiver.
    pub fn touches(&self, viewer: &UserId) -> bool {
        &self.sender_id == viewer || &self.receiver_id == viewer
    }
}

/// Derived conversation entry: the most-recent message exchanged with one
/// counterpart plus that counterpart's current account snapshot. Never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// The counterpart's current account record.
    pub partner: UserAccount,
    /// The most-recent message exchanged with the counterpart.
    pub last_message: Message,
}

/// Sort messages into thread order: ascending by creation time, with equal
/// timestamps broken by message id so repeated reads are stable.
pub fn sort_thread(messages: &mut [Message]) {
    messages.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Reduce a viewer's messages to the most-recent one per counterpart.
///
/// Ties on `created_at` are broken by message id (greater id wins) so the
/// projection is deterministic. The result is ordered newest conversation
/// first.
pub fn latest_per_counterpart(viewer: &UserId, messages: Vec<Message>) -> Vec<(UserId, Message)> {
    let mut latest: HashMap<UserId, Message> = HashMap::new();
    for message in messages {
        if !message.touches(viewer) {
            continue;
        }
        let counterpart = message.counterpart_of(viewer).clone();
        match latest.get(&counterpart) {
            Some(current)
                if (current.created_at, &current.id) >= (message.created_at, &message.id) => {}
            _ => {
                latest.insert(counterpart, message);
            }
        }
    }
    let mut entries: Vec<(UserId, Message)> = latest.into_iter().collect();
    entries.sort_by(|a, b| {
        b.1.created_at
            .cmp(&a.1.created_at)
            .then_with(|| b.1.id.cmp(&a.1.id))
    });
    entries
}

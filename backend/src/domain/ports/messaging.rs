//! Driving port for direct-message use-cases.
//!
//! Delivery is poll-based by design: there is no push channel, no delivery
//! acknowledgement, and no read-receipt concept.

use async_trait::async_trait;

use crate::domain::{AccessToken, Conversation, Error, Message, UserId};

/// Domain use-case port for messaging.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagingService: Send + Sync {
    /// Store an immutable message from the caller to `receiver_id`.
    async fn send(
        &self,
        token: &AccessToken,
        receiver_id: &UserId,
        text: &str,
    ) -> Result<Message, Error>;

    /// Both directions of the thread between the caller and `other_id`,
    /// oldest first.
    async fn thread_with(
        &self,
        token: &AccessToken,
        other_id: &UserId,
    ) -> Result<Vec<Message>, Error>;

    /// One entry per counterpart holding the most-recent exchanged message,
    /// newest conversation first.
    async fn conversations(&self, token: &AccessToken) -> Result<Vec<Conversation>, Error>;
}

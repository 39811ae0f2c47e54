//! Messaging service: direct sends, thread reads, and the derived
//! conversation list.
//!
//! Reads are full scans over the `message:` namespace, acceptable at the
//! deployment scale this service targets; a production rework would add a
//! conversation-pair index while keeping this contract identical.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::try_join_all;
use mockable::Clock;
use tracing::info;

use crate::domain::message::{latest_per_counterpart, sort_thread, MessageValidationError};
use crate::domain::ports::{IdentityProvider, MessagingService};
use crate::domain::session::resolve_caller;
use crate::domain::{AccessToken, Conversation, Error, Message, MessageId, UserId};

use super::records::Records;

/// Messaging service backed by the record store.
#[derive(Clone)]
pub struct MessagingServiceImpl<P> {
    provider: Arc<P>,
    records: Records,
    clock: Arc<dyn Clock>,
}

impl<P> MessagingServiceImpl<P> {
    /// Create a new messaging service.
    pub fn new(provider: Arc<P>, records: Records, clock: Arc<dyn Clock>) -> Self {
        Self {
            provider,
            records,
            clock,
        }
    }
}

#[async_trait]
impl<P> MessagingService for MessagingServiceImpl<P>
where
    P: IdentityProvider,
{
    async fn send(
        &self,
        token: &AccessToken,
        receiver_id: &UserId,
        text: &str,
    ) -> Result<Message, Error> {
        let caller = resolve_caller(self.provider.as_ref(), &self.records, token).await?;
        if text.trim().is_empty() {
            return Err(Error::invalid_request(
                MessageValidationError::EmptyText.to_string(),
            ));
        }
        if receiver_id == &caller.id {
            return Err(Error::invalid_request("cannot message yourself"));
        }

        let message = Message {
            id: MessageId::generate(),
            sender_id: caller.id,
            receiver_id: receiver_id.clone(),
            text: text.to_owned(),
            created_at: self.clock.utc(),
        };
        self.records.put_message(&message).await?;
        info!(message = %message.id, receiver = %message.receiver_id, "message stored");
        Ok(message)
    }

    async fn thread_with(
        &self,
        token: &AccessToken,
        other_id: &UserId,
    ) -> Result<Vec<Message>, Error> {
        let caller = resolve_caller(self.provider.as_ref(), &self.records, token).await?;
        let mut thread: Vec<Message> = self
            .records
            .messages()
            .await?
            .into_iter()
            .filter(|message| {
                (message.sender_id == caller.id && &message.receiver_id == other_id)
                    || (&message.sender_id == other_id && message.receiver_id == caller.id)
            })
            .collect();
        sort_thread(&mut thread);
        Ok(thread)
    }

    async fn conversations(&self, token: &AccessToken) -> Result<Vec<Conversation>, Error> {
        let caller = resolve_caller(self.provider.as_ref(), &self.records, token).await?;
        let messages = self.records.messages().await?;
        let entries = latest_per_counterpart(&caller.id, messages);

        // Counterpart snapshots are independent lookups; fetch concurrently.
        let resolved = try_join_all(entries.into_iter().map(|(partner_id, last_message)| {
            async move {
                let partner = self.records.user(&partner_id).await?;
                Ok::<Option<Conversation>, Error>(partner.map(|partner| Conversation {
                    partner,
                    last_message,
                }))
            }
        }))
        .await?;
        // Counterparts whose account vanished are skipped, not fatal.
        Ok(resolved.into_iter().flatten().collect())
    }
}

#[cfg(test)]
#[path = "messaging_service_tests.rs"]
mod tests;

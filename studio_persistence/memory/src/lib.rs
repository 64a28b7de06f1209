use std::sync::{Arc, RwLock};

use anyhow::anyhow;
use studio_models::contact::StoredContactMessage;
use studio_persistence_contracts::contact::ContactMessageRepository;

/// Process-local message store. Clones share the same underlying records, so
/// the repository can be handed to every request handler cheaply.
#[derive(Debug, Clone, Default)]
pub struct MemoryContactMessageRepository {
    messages: Arc<RwLock<Vec<StoredContactMessage>>>,
}

impl ContactMessageRepository for MemoryContactMessageRepository {
    async fn create(&self, message: &StoredContactMessage) -> anyhow::Result<()> {
        self.messages
            .write()
            .map_err(|_| anyhow!("contact message store is poisoned"))?
            .push(message.clone());
        Ok(())
    }

    async fn list(&self) -> anyhow::Result<Vec<StoredContactMessage>> {
        let mut messages = self
            .messages
            .read()
            .map_err(|_| anyhow!("contact message store is poisoned"))?
            .clone();
        // Stable sort: records sharing a timestamp keep their insertion order.
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeDelta, Utc};
    use studio_models::contact::{ContactContent, ContactMessage, ContactName};
    use uuid::Uuid;

    use super::*;

    fn message(offset_minutes: i64) -> StoredContactMessage {
        StoredContactMessage {
            id: Uuid::new_v4().into(),
            message: ContactMessage {
                name: ContactName::try_new("Jo").unwrap(),
                email: "jo@example.com".parse().unwrap(),
                channel_url: None,
                package_type: None,
                content: ContactContent::try_new("Hello there, testing.").unwrap(),
            },
            created_at: DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
                + TimeDelta::minutes(offset_minutes),
        }
    }

    #[tokio::test]
    async fn create_and_list() {
        // Arrange
        let sut = MemoryContactMessageRepository::default();
        let older = message(0);
        let newer = message(5);

        // Act
        sut.create(&older).await.unwrap();
        sut.create(&newer).await.unwrap();
        let listed = sut.list().await.unwrap();

        // Assert
        assert_eq!(listed, [newer, older]);
    }

    #[tokio::test]
    async fn list_is_shared_between_clones() {
        // Arrange
        let sut = MemoryContactMessageRepository::default();
        let stored = message(0);

        // Act
        sut.clone().create(&stored).await.unwrap();
        let listed = sut.list().await.unwrap();

        // Assert
        assert_eq!(listed, [stored]);
    }

    #[tokio::test]
    async fn list_empty() {
        // Arrange
        let sut = MemoryContactMessageRepository::default();

        // Act
        let listed = sut.list().await.unwrap();

        // Assert
        assert!(listed.is_empty());
    }
}

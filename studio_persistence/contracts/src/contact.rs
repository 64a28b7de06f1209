use std::future::Future;

use studio_models::contact::StoredContactMessage;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactMessageRepository: Send + Sync + 'static {
    /// Persists a new contact message. Records are immutable once stored.
    fn create(
        &self,
        message: &StoredContactMessage,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Returns all stored contact messages, newest first.
    fn list(&self) -> impl Future<Output = anyhow::Result<Vec<StoredContactMessage>>> + Send;
}

#[cfg(feature = "mock")]
impl MockContactMessageRepository {
    pub fn with_create(mut self, message: StoredContactMessage) -> Self {
        self.expect_create()
            .once()
            .withf(move |msg| *msg == message)
            .return_once(|_| Box::pin(std::future::ready(Ok(()))));
        self
    }

    pub fn with_create_error(mut self) -> Self {
        self.expect_create().once().return_once(|_| {
            Box::pin(std::future::ready(Err(anyhow::anyhow!(
                "database unavailable"
            ))))
        });
        self
    }

    pub fn with_list(mut self, messages: Vec<StoredContactMessage>) -> Self {
        self.expect_list()
            .once()
            .return_once(|| Box::pin(std::future::ready(Ok(messages))));
        self
    }
}

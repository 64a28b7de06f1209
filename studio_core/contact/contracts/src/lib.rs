use std::future::Future;

use studio_models::contact::{ContactSubmission, StoredContactMessage, ValidationFailure};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Validates and persists a contact-form submission, then dispatches the
    /// notification email without waiting for it.
    ///
    /// The notification outcome never changes the result of this call.
    fn submit(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<StoredContactMessage, ContactSubmitError>> + Send;

    /// Returns all accepted submissions, newest first.
    fn list(&self) -> impl Future<Output = anyhow::Result<Vec<StoredContactMessage>>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error("{0}")]
    Rejected(ValidationFailure),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_submit(
        mut self,
        submission: ContactSubmission,
        result: Result<StoredContactMessage, ContactSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_list(mut self, result: anyhow::Result<Vec<StoredContactMessage>>) -> Self {
        self.expect_list()
            .once()
            .return_once(move || Box::pin(std::future::ready(result)));
        self
    }
}

use std::sync::Arc;

use studio_core_contact_contracts::{ContactFeatureService, ContactSubmitError};
use studio_email_contracts::{ContentType, Email, EmailService};
use studio_models::{
    contact::{ContactMessage, ContactSubmission, StoredContactMessage},
    email_address::EmailAddress,
};
use studio_persistence_contracts::contact::ContactMessageRepository;
use studio_shared_contracts::{id::IdService, time::TimeService};

mod validator;

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<Id, Time, ContactRepo, EmailS> {
    id: Id,
    time: Time,
    contact_repo: ContactRepo,
    email: Arc<EmailS>,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// Inbox that receives a notification for every accepted submission.
    pub recipient: Arc<EmailAddress>,
}

impl<Id, Time, ContactRepo, EmailS> ContactFeatureServiceImpl<Id, Time, ContactRepo, EmailS> {
    pub fn new(
        id: Id,
        time: Time,
        contact_repo: ContactRepo,
        email: Arc<EmailS>,
        config: ContactFeatureConfig,
    ) -> Self {
        Self {
            id,
            time,
            contact_repo,
            email,
            config,
        }
    }
}

impl<Id, Time, ContactRepo, EmailS> ContactFeatureService
    for ContactFeatureServiceImpl<Id, Time, ContactRepo, EmailS>
where
    Id: IdService,
    Time: TimeService,
    ContactRepo: ContactMessageRepository,
    EmailS: EmailService,
{
    async fn submit(
        &self,
        submission: ContactSubmission,
    ) -> Result<StoredContactMessage, ContactSubmitError> {
        let message = validator::validate(submission).map_err(ContactSubmitError::Rejected)?;

        let stored = StoredContactMessage {
            id: self.id.generate(),
            message,
            created_at: self.time.now(),
        };

        self.contact_repo.create(&stored).await?;

        self.dispatch_notification(&stored.message);

        Ok(stored)
    }

    async fn list(&self) -> anyhow::Result<Vec<StoredContactMessage>> {
        self.contact_repo.list().await
    }
}

impl<Id, Time, ContactRepo, EmailS> ContactFeatureServiceImpl<Id, Time, ContactRepo, EmailS>
where
    EmailS: EmailService,
{
    /// Sends the notification email on a detached task. The submission has
    /// already been persisted at this point, so a slow or failing transport
    /// must not affect the caller; errors are only logged.
    fn dispatch_notification(&self, message: &ContactMessage) {
        let mut body = format!(
            "Message from {} ({}):\n\n{}",
            *message.name, message.email, *message.content
        );
        if let Some(channel_url) = &message.channel_url {
            body.push_str(&format!("\nChannel: {}", channel_url.as_str()));
        }
        if let Some(package_type) = &message.package_type {
            body.push_str(&format!("\nRequested package: {}", **package_type));
        }

        let email = Email {
            recipient: (*self.config.recipient).clone().into(),
            subject: format!("[Contact Form] New inquiry from {}", *message.name),
            body,
            content_type: ContentType::Text,
            reply_to: Some(
                message
                    .email
                    .clone()
                    .with_name(message.name.clone().into_inner()),
            ),
        };

        let email_service = Arc::clone(&self.email);
        tokio::spawn(async move {
            match email_service.send(email).await {
                Ok(true) => {}
                Ok(false) => tracing::error!("Failed to send contact notification email"),
                Err(err) => {
                    tracing::error!("Failed to send contact notification email: {err:#}")
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;
    use studio_email_contracts::MockEmailService;
    use studio_models::contact::{ContactField, ContactMessageId, ValidationFailure};
    use studio_persistence_contracts::contact::MockContactMessageRepository;
    use studio_shared_contracts::{id::MockIdService, time::MockTimeService};
    use studio_utils::assert_matches;
    use uuid::uuid;

    use super::*;

    type Sut = ContactFeatureServiceImpl<
        MockIdService,
        MockTimeService,
        MockContactMessageRepository,
        MockEmailService,
    >;

    fn config() -> ContactFeatureConfig {
        ContactFeatureConfig {
            recipient: Arc::new("inbox@example.com".parse().unwrap()),
        }
    }

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Max Mustermann".into(),
            email: "max.mustermann@example.de".into(),
            channel_url: Some("https://youtube.com/@max".into()),
            package_type: Some("standard".into()),
            message: "I need three thumbnails for my gaming channel.".into(),
        }
    }

    fn stored() -> StoredContactMessage {
        StoredContactMessage {
            id: ContactMessageId::from(uuid!("f9a16547-c825-4a9c-8e26-7366cfdca399")),
            message: validator_output(),
            created_at: DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    fn validator_output() -> ContactMessage {
        ContactMessage {
            name: "Max Mustermann".try_into().unwrap(),
            email: "max.mustermann@example.de".parse().unwrap(),
            channel_url: Some("https://youtube.com/@max".parse().unwrap()),
            package_type: Some("standard".try_into().unwrap()),
            content: "I need three thumbnails for my gaming channel."
                .try_into()
                .unwrap(),
        }
    }

    fn notification_email() -> Email {
        Email {
            recipient: "inbox@example.com".parse().unwrap(),
            subject: "[Contact Form] New inquiry from Max Mustermann".into(),
            body: "Message from Max Mustermann (max.mustermann@example.de):\n\n\
                   I need three thumbnails for my gaming channel.\n\
                   Channel: https://youtube.com/@max\n\
                   Requested package: standard"
                .into(),
            content_type: ContentType::Text,
            reply_to: Some("Max Mustermann <max.mustermann@example.de>".parse().unwrap()),
        }
    }

    #[tokio::test]
    async fn submit_ok() {
        // Arrange
        let expected = stored();

        let id = MockIdService::new().with_generate(expected.id);
        let time = MockTimeService::new().with_now(expected.created_at);
        let contact_repo = MockContactMessageRepository::new().with_create(expected.clone());

        let (notified, notification) = tokio::sync::oneshot::channel();
        let mut email = MockEmailService::new();
        email
            .expect_send()
            .once()
            .with(mockall::predicate::eq(notification_email()))
            .return_once(move |_| {
                notified.send(()).unwrap();
                Box::pin(std::future::ready(Ok(true)))
            });

        let sut = Sut::new(id, time, contact_repo, Arc::new(email), config());

        // Act
        let result = sut.submit(submission()).await;

        // Assert
        assert_eq!(result.unwrap(), expected);
        notification.await.unwrap();
    }

    #[tokio::test]
    async fn submit_rejected_without_side_effects() {
        // Arrange
        let rejected = ContactSubmission {
            name: "J".into(),
            email: "bad-email".into(),
            channel_url: None,
            package_type: None,
            message: "hi".into(),
        };

        let expected = {
            let mut failure = ValidationFailure::default();
            failure.push(ContactField::Name, "Name must be at least 2 characters");
            failure.push(ContactField::Email, "Please enter a valid email address");
            failure.push(ContactField::Message, "Message must be at least 10 characters");
            failure
        };

        // Any repository or email call panics the test.
        let sut = Sut::new(
            MockIdService::new(),
            MockTimeService::new(),
            MockContactMessageRepository::new(),
            Arc::new(MockEmailService::new()),
            config(),
        );

        // Act
        let result = sut.submit(rejected).await;

        // Assert
        assert_matches!(
            result,
            Err(ContactSubmitError::Rejected(failure)) if *failure == expected
        );
    }

    #[tokio::test]
    async fn submit_storage_error() {
        // Arrange
        let expected = stored();

        let id = MockIdService::new().with_generate(expected.id);
        let time = MockTimeService::new().with_now(expected.created_at);
        let contact_repo = MockContactMessageRepository::new().with_create_error();

        // The notifier must never be invoked when storage fails.
        let mut email = MockEmailService::new();
        email.expect_send().never();

        let sut = Sut::new(id, time, contact_repo, Arc::new(email), config());

        // Act
        let result = sut.submit(submission()).await;

        // Assert
        assert_matches!(result, Err(ContactSubmitError::Other(_)));
    }

    #[tokio::test]
    async fn submit_ok_despite_notification_error() {
        // Arrange
        let expected = stored();

        let id = MockIdService::new().with_generate(expected.id);
        let time = MockTimeService::new().with_now(expected.created_at);
        let contact_repo = MockContactMessageRepository::new().with_create(expected.clone());

        let (notified, notification) = tokio::sync::oneshot::channel();
        let mut email = MockEmailService::new();
        email.expect_send().once().return_once(move |_| {
            notified.send(()).unwrap();
            Box::pin(std::future::ready(Err(anyhow::anyhow!("smtp down"))))
        });

        let sut = Sut::new(id, time, contact_repo, Arc::new(email), config());

        // Act
        let result = sut.submit(submission()).await;

        // Assert
        assert_eq!(result.unwrap(), expected);
        notification.await.unwrap();
    }

    #[tokio::test]
    async fn submit_ok_despite_negative_send_response() {
        // Arrange
        let expected = stored();

        let id = MockIdService::new().with_generate(expected.id);
        let time = MockTimeService::new().with_now(expected.created_at);
        let contact_repo = MockContactMessageRepository::new().with_create(expected.clone());

        let (notified, notification) = tokio::sync::oneshot::channel();
        let mut email = MockEmailService::new();
        email
            .expect_send()
            .once()
            .with(mockall::predicate::eq(notification_email()))
            .return_once(move |_| {
                notified.send(()).unwrap();
                Box::pin(std::future::ready(Ok(false)))
            });

        let sut = Sut::new(id, time, contact_repo, Arc::new(email), config());

        // Act
        let result = sut.submit(submission()).await;

        // Assert
        assert_eq!(result.unwrap(), expected);
        notification.await.unwrap();
    }

    #[tokio::test]
    async fn list() {
        // Arrange
        let expected = vec![stored()];

        let contact_repo = MockContactMessageRepository::new().with_list(expected.clone());

        let sut = Sut::new(
            MockIdService::new(),
            MockTimeService::new(),
            contact_repo,
            Arc::new(MockEmailService::new()),
            config(),
        );

        // Act
        let result = sut.list().await;

        // Assert
        assert_eq!(result.unwrap(), expected);
    }

    mod integration {
        use studio_email_impl::EmailServiceImpl;
        use studio_persistence_memory::MemoryContactMessageRepository;
        use studio_shared_impl::{id::IdServiceImpl, time::TimeServiceImpl};

        use super::*;
        use pretty_assertions::assert_eq;

        fn sut() -> ContactFeatureServiceImpl<
            IdServiceImpl,
            TimeServiceImpl,
            MemoryContactMessageRepository,
            EmailServiceImpl,
        > {
            ContactFeatureServiceImpl::new(
                IdServiceImpl,
                TimeServiceImpl,
                MemoryContactMessageRepository::default(),
                Arc::new(EmailServiceImpl::disabled()),
                config(),
            )
        }

        #[tokio::test]
        async fn submit_then_list_returns_record() {
            // Arrange
            let sut = sut();
            let submission = ContactSubmission {
                name: "Jo".into(),
                email: "jo@example.com".into(),
                channel_url: None,
                package_type: None,
                message: "Hello there, testing.".into(),
            };

            // Act
            let stored = sut.submit(submission).await.unwrap();
            let listed = sut.list().await.unwrap();

            // Assert
            assert_eq!(*stored.message.name, "Jo");
            assert_eq!(listed, [stored]);
        }

        #[tokio::test]
        async fn duplicate_submissions_store_distinct_records() {
            // Arrange
            let sut = sut();

            // Act
            let first = sut.submit(submission()).await.unwrap();
            let second = sut.submit(submission()).await.unwrap();

            // Assert
            assert_ne!(first.id, second.id);
            assert_eq!(sut.list().await.unwrap().len(), 2);
        }
    }
}

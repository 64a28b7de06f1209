use anyhow::anyhow;
use lettre::{
    message::{header, MessageBuilder},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use studio_email_contracts::{ContentType, Email, EmailService};
use studio_models::email_address::EmailAddress;
use studio_utils::Apply;

#[derive(Debug, Clone)]
pub enum EmailServiceImpl {
    Smtp {
        from: EmailAddress,
        transport: AsyncSmtpTransport<Tokio1Executor>,
    },
    /// No SMTP transport has been configured. Outbound mail is dropped after
    /// a log line instead of being sent.
    Disabled,
}

impl EmailServiceImpl {
    pub fn new(url: &str, from: EmailAddress) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)?.build();

        Ok(Self::Smtp { from, transport })
    }

    pub fn disabled() -> Self {
        Self::Disabled
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let Self::Smtp { from, transport } = self else {
            tracing::debug!(recipient = %email.recipient, "email delivery disabled, dropping message");
            return Ok(true);
        };

        let message = Message::builder()
            .from(from.0.clone().into())
            .to(email.recipient.0)
            .apply_map(
                email.reply_to.map(|reply_to| reply_to.0),
                MessageBuilder::reply_to,
            )
            .subject(email.subject)
            .header(match email.content_type {
                ContentType::Text => header::ContentType::TEXT_PLAIN,
                ContentType::Html => header::ContentType::TEXT_HTML,
            })
            .body(email.body)?;

        transport
            .send(message)
            .await
            .map(|response| response.is_positive())
            .map_err(Into::into)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        let Self::Smtp { transport, .. } = self else {
            return Ok(());
        };

        transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}

use anyhow::Context;
use studio_config::EmailConfig;
use studio_email_contracts::EmailService;
use studio_email_impl::EmailServiceImpl;
use tracing::{info, warn};

/// Connect to the SMTP server, or fall back to the disabled service when no
/// email section is configured.
pub async fn connect(config: Option<&EmailConfig>) -> anyhow::Result<EmailServiceImpl> {
    let Some(config) = config else {
        warn!("No email configuration found, contact notifications are disabled");
        return Ok(EmailServiceImpl::disabled());
    };

    let email = EmailServiceImpl::new(&config.smtp_url, config.from.clone())
        .context("Failed to connect to SMTP server")?;

    info!("Pinging smtp server");
    email.ping().await.context("Failed to ping SMTP server")?;

    Ok(email)
}

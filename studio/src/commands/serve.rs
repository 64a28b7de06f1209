use std::sync::Arc;

use studio_api_rest::RestServer;
use studio_config::Config;
use studio_core_contact_impl::{ContactFeatureConfig, ContactFeatureServiceImpl};
use studio_persistence_memory::MemoryContactMessageRepository;
use studio_shared_impl::{id::IdServiceImpl, time::TimeServiceImpl};
use tracing::info;

use crate::email;

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let email_service = email::connect(config.email.as_ref()).await?;

    let contact = ContactFeatureServiceImpl::new(
        IdServiceImpl,
        TimeServiceImpl,
        MemoryContactMessageRepository::default(),
        Arc::new(email_service),
        ContactFeatureConfig {
            recipient: Arc::new(config.contact.recipient),
        },
    );

    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    RestServer::new(contact)
        .serve(config.http.host, config.http.port)
        .await
}

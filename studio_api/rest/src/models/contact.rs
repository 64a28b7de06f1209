use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use studio_models::{
    contact::{
        ChannelUrl, ContactContent, ContactMessageId, ContactName, ContactSubmission,
        PackageLabel, StoredContactMessage,
    },
    email_address::EmailAddress,
};

/// Contact-form fields exactly as the client sent them. Absent fields
/// default to empty so the validator can report them instead of the JSON
/// extractor.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub channel_url: Option<String>,
    #[serde(default)]
    pub package_type: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl From<ApiContactSubmission> for ContactSubmission {
    fn from(
        ApiContactSubmission {
            name,
            email,
            channel_url,
            package_type,
            message,
        }: ApiContactSubmission,
    ) -> Self {
        Self {
            name,
            email,
            channel_url,
            package_type,
            message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiSubmissionAccepted {
    pub success: bool,
    pub message: &'static str,
    pub data: ApiSubmissionId,
}

#[derive(Debug, Serialize)]
pub struct ApiSubmissionId {
    pub id: ContactMessageId,
}

impl ApiSubmissionAccepted {
    pub fn new(id: ContactMessageId) -> Self {
        Self {
            success: true,
            message: "Message sent successfully! I'll get back to you within 24 hours.",
            data: ApiSubmissionId { id },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiContactMessageList {
    pub success: bool,
    pub data: Vec<ApiContactMessage>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContactMessage {
    pub id: ContactMessageId,
    pub name: ContactName,
    pub email: EmailAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_url: Option<ChannelUrl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_type: Option<PackageLabel>,
    pub message: ContactContent,
    pub created_at: DateTime<Utc>,
}

impl From<StoredContactMessage> for ApiContactMessage {
    fn from(
        StoredContactMessage {
            id,
            message,
            created_at,
        }: StoredContactMessage,
    ) -> Self {
        Self {
            id,
            name: message.name,
            email: message.email,
            channel_url: message.channel_url,
            package_type: message.package_type,
            message: message.content,
            created_at,
        }
    }
}

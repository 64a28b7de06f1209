use std::str::FromStr;

use chrono::{DateTime, Utc};
use nutype::nutype;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{email_address::EmailAddress, macros::id};

id!(ContactMessageId);

/// Raw contact-form field bag as submitted by the client. No constraint has
/// been checked yet; only [`validate`](ContactMessage) output is trusted by
/// anything with side effects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub channel_url: Option<String>,
    pub package_type: Option<String>,
    pub message: String,
}

/// A contact message whose fields have all passed validation. Constructed
/// only by the validator; the field newtypes make constraint-violating
/// values unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: ContactName,
    pub email: EmailAddress,
    pub channel_url: Option<ChannelUrl>,
    pub package_type: Option<PackageLabel>,
    pub content: ContactContent,
}

/// A [`ContactMessage`] as persisted by the repository. Immutable once
/// created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredContactMessage {
    pub id: ContactMessageId,
    pub message: ContactMessage,
    pub created_at: DateTime<Utc>,
}

#[nutype(
    sanitize(trim),
    validate(len_char_min = 2, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactName(String);

#[nutype(
    sanitize(trim),
    validate(len_char_min = 10, len_char_max = 4096),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactContent(String);

/// Pricing-package label selected in the form. The set of labels is owned by
/// the front end, so it is kept opaque here.
#[nutype(
    sanitize(trim),
    validate(len_char_min = 1, len_char_max = 64),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct PackageLabel(String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelUrl(pub Url);

impl ChannelUrl {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for ChannelUrl {
    type Err = url::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Every constraint violated by a submission, in field order, so the client
/// can highlight all bad fields in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    pub violations: Vec<FieldViolation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: ContactField,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    Name,
    Email,
    ChannelUrl,
    PackageType,
    Message,
}

impl ContactField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::ChannelUrl => "channelUrl",
            Self::PackageType => "packageType",
            Self::Message => "message",
        }
    }
}

impl std::fmt::Display for ContactField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ValidationFailure {
    pub fn push(&mut self, field: ContactField, reason: impl Into<String>) {
        self.violations.push(FieldViolation {
            field,
            reason: reason.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            f.write_str(&violation.reason)?;
        }
        Ok(())
    }
}

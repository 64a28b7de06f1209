use studio_models::{
    contact::{
        ChannelUrl, ContactContent, ContactContentError, ContactField, ContactMessage, ContactName,
        ContactNameError, ContactSubmission, PackageLabel, ValidationFailure,
    },
    email_address::EmailAddress,
};

/// Checks every field of a raw submission and reports all violated
/// constraints at once. Pure; the returned [`ContactMessage`] is the only way
/// a submission reaches the repository or the notifier.
pub(crate) fn validate(submission: ContactSubmission) -> Result<ContactMessage, ValidationFailure> {
    let mut failure = ValidationFailure::default();

    let name = match ContactName::try_new(submission.name) {
        Ok(name) => Some(name),
        Err(err) => {
            failure.push(
                ContactField::Name,
                match err {
                    ContactNameError::LenCharMinViolated => "Name must be at least 2 characters",
                    ContactNameError::LenCharMaxViolated => "Name must be at most 256 characters",
                },
            );
            None
        }
    };

    let email = match submission.email.trim().parse::<EmailAddress>() {
        Ok(email) => Some(email),
        Err(_) => {
            failure.push(ContactField::Email, "Please enter a valid email address");
            None
        }
    };

    let channel_url = match optional(submission.channel_url.as_deref()) {
        Some(url) => match url.parse::<ChannelUrl>() {
            Ok(url) => Some(Some(url)),
            Err(_) => {
                failure.push(ContactField::ChannelUrl, "Please enter a valid URL");
                None
            }
        },
        None => Some(None),
    };

    let package_type = match optional(submission.package_type.as_deref()) {
        Some(label) => match PackageLabel::try_new(label) {
            Ok(label) => Some(Some(label)),
            Err(_) => {
                failure.push(ContactField::PackageType, "Package selection is invalid");
                None
            }
        },
        None => Some(None),
    };

    let content = match ContactContent::try_new(submission.message) {
        Ok(content) => Some(content),
        Err(err) => {
            failure.push(
                ContactField::Message,
                match err {
                    ContactContentError::LenCharMinViolated => {
                        "Message must be at least 10 characters"
                    }
                    ContactContentError::LenCharMaxViolated => {
                        "Message must be at most 4096 characters"
                    }
                },
            );
            None
        }
    };

    match (name, email, channel_url, package_type, content) {
        (Some(name), Some(email), Some(channel_url), Some(package_type), Some(content)) => {
            Ok(ContactMessage {
                name,
                email,
                channel_url,
                package_type,
                content,
            })
        }
        _ => Err(failure),
    }
}

/// Optional fields pass validation when absent or blank.
fn optional(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

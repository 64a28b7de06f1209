use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use studio_core_contact_contracts::{ContactFeatureService, ContactSubmitError};

use super::{error, internal_server_error};
use crate::models::contact::{
    ApiContactMessageList, ApiContactSubmission, ApiSubmissionAccepted,
};

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/api/contact", routing::post(submit).get(list))
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl ContactFeatureService>>,
    Json(submission): Json<ApiContactSubmission>,
) -> Response {
    match service.submit(submission.into()).await {
        Ok(stored) => (
            StatusCode::CREATED,
            Json(ApiSubmissionAccepted::new(stored.id)),
        )
            .into_response(),
        Err(ContactSubmitError::Rejected(failure)) => {
            error(StatusCode::BAD_REQUEST, failure.to_string())
        }
        Err(ContactSubmitError::Other(err)) => {
            internal_server_error(err, "Something went wrong. Please try again later.")
        }
    }
}

async fn list(service: State<Arc<impl ContactFeatureService>>) -> Response {
    match service.list().await {
        Ok(messages) => Json(ApiContactMessageList {
            success: true,
            data: messages.into_iter().map(Into::into).collect(),
        })
        .into_response(),
        Err(err) => internal_server_error(err, "Failed to fetch messages"),
    }
}

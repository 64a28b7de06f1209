use serde::Serialize;

pub mod contact;

/// Failure envelope shared by all endpoints:
/// `{ "success": false, "message": ... }`.
#[derive(Debug, Serialize)]
pub struct ApiFailure {
    pub success: bool,
    pub message: String,
}

use crate::api::ErrorResponse;
use crate::config::ConfigError;
use crate::mailer::MailError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use booking_shared::ValidationError;
use thiserror::Error;

pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

#[derive(Debug, Error)]
pub enum AppointmentError {
    /// The booking itself is wrong, the user can fix it.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The server is missing or has broken SMTP settings.
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    #[error(transparent)]
    Delivery(#[from] MailError),
}

impl AppointmentError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppointmentError::Validation(_) => StatusCode::BAD_REQUEST,
            AppointmentError::Configuration(_) | AppointmentError::Delivery(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let mut error = message.into();
    if error.trim().is_empty() {
        error = INTERNAL_SERVER_ERROR.to_string();
    }
    (status, Json(ErrorResponse { error })).into_response()
}

impl IntoResponse for AppointmentError {
    fn into_response(self) -> Response {
        error_response(self.status(), self.to_string())
    }
}

use async_trait::async_trait;
use booking_shared::BookingRequest;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const APPOINTMENT_PATH: &str = "/api/appointment";

/// Shown when the server rejects a booking without saying why.
pub const GENERIC_SERVER_ERROR: &str = "Something went wrong.";

#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-success response, carries the server's message or the generic one.
    #[error("{0}")]
    Server(String),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("{0}")]
    InvalidResponse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfirmation {
    pub message_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseBody {
    error: Option<String>,
    message_id: Option<String>,
}

/// Where the form sends a booking once it passed client side validation.
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn book(&self, request: &BookingRequest) -> Result<BookingConfirmation, ClientError>;
}

pub struct HttpBookingApi {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpBookingApi {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), APPOINTMENT_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl BookingApi for HttpBookingApi {
    async fn book(&self, request: &BookingRequest) -> Result<BookingConfirmation, ClientError> {
        debug!("Posting booking to {}", self.endpoint);
        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        // the body is read as JSON before the status is looked at
        let body: ResponseBody = serde_json::from_slice(&bytes)?;

        if !status.is_success() {
            debug!("Booking rejected with {}", status);
            let message = body
                .error
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string());
            return Err(ClientError::Server(message));
        }

        Ok(BookingConfirmation {
            message_id: body.message_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_url() {
        assert_eq!(
            HttpBookingApi::new("http://localhost:3000/").endpoint(),
            "http://localhost:3000/api/appointment"
        );
        assert_eq!(
            HttpBookingApi::new("https://book.example.com").endpoint(),
            "https://book.example.com/api/appointment"
        );
    }

    #[test]
    fn response_body_tolerates_unknown_shapes() {
        let body: ResponseBody = serde_json::from_str(r#"{"ok":true,"messageId":"<a@b>"}"#).unwrap();
        assert_eq!(body.message_id.as_deref(), Some("<a@b>"));
        assert!(body.error.is_none());

        let body: ResponseBody = serde_json::from_str("{}").unwrap();
        assert!(body.message_id.is_none());
    }
}

use booking_shared::BookingRequest;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Body of `POST /api/appointment`. Every field is optional so that a
/// partial body turns into "required" validation errors instead of a
/// rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppointmentPayload {
    #[serde(deserialize_with = "string_or_absent")]
    pub rep_name: Option<String>,
    #[serde(deserialize_with = "string_or_absent")]
    pub company_name: Option<String>,
    #[serde(deserialize_with = "string_or_absent")]
    pub email: Option<String>,
    #[serde(deserialize_with = "string_or_absent")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "string_or_absent")]
    pub date: Option<String>,
}

// a field that is not a JSON string counts as missing, the others are kept
fn string_or_absent<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(value) => Ok(Some(value)),
        _ => Ok(None),
    }
}

impl AppointmentPayload {
    /// Missing, empty, `null` or otherwise unparsable bodies are an empty payload.
    pub fn from_body(body: &[u8]) -> Self {
        if body.is_empty() {
            return Self::default();
        }
        match serde_json::from_slice::<Option<Self>>(body) {
            Ok(payload) => payload.unwrap_or_default(),
            Err(e) => {
                debug!("Unparsable appointment body, treating as empty: {}", e);
                Self::default()
            }
        }
    }
}

impl From<AppointmentPayload> for BookingRequest {
    fn from(payload: AppointmentPayload) -> Self {
        Self {
            rep_name: payload.rep_name.unwrap_or_default(),
            company_name: payload.company_name.unwrap_or_default(),
            email: payload.email.unwrap_or_default(),
            phone: payload.phone.unwrap_or_default(),
            date: payload.date.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentResponse {
    pub ok: bool,
    pub message_id: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

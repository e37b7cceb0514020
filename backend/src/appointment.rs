use crate::api::{AppointmentPayload, AppointmentResponse};
use crate::config::{ConfigError, MailSettings};
use crate::error::AppointmentError;
use crate::mailer::{ConfirmationEmail, ConfirmationMailer, LettreMailer};
use booking_shared::BookingRequest;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Handles appointment bookings. Holds either a ready mailer or the reason
/// the mail settings could not be turned into one.
pub struct AppointmentApp {
    mailer: Result<Arc<dyn ConfirmationMailer>, ConfigError>,
}

impl AppointmentApp {
    pub fn new(mailer: Arc<dyn ConfirmationMailer>) -> Self {
        Self { mailer: Ok(mailer) }
    }

    /// An app that answers every valid booking with the given configuration error.
    pub fn misconfigured(error: ConfigError) -> Self {
        Self { mailer: Err(error) }
    }

    pub fn from_settings(settings: &MailSettings) -> Self {
        match settings.resolve().and_then(|config| LettreMailer::new(&config)) {
            Ok(mailer) => {
                info!("Confirmation emails enabled");
                Self::new(Arc::new(mailer))
            }
            Err(e) => {
                error!("Confirmation emails disabled: {}", e);
                Self::misconfigured(e)
            }
        }
    }

    pub async fn handle_new_appointment(
        &self,
        payload: AppointmentPayload,
    ) -> Result<AppointmentResponse, AppointmentError> {
        let booking = BookingRequest::from(payload);

        if let Err(e) = booking.validate() {
            debug!("Rejected appointment: {}", e);
            return Err(e.into());
        }

        let mailer = self.mailer.as_ref().map_err(|e| {
            warn!("Appointment accepted but email is not configured: {}", e);
            AppointmentError::Configuration(e.clone())
        })?;

        let email = ConfirmationEmail::for_booking(&booking);
        match mailer.send(&email).await {
            Ok(message_id) => {
                info!("Sent appointment confirmation {}", message_id);
                Ok(AppointmentResponse {
                    ok: true,
                    message_id,
                })
            }
            Err(e) => {
                error!("Error sending appointment confirmation: {}", e);
                Err(e.into())
            }
        }
    }
}

use crate::client::{BookingApi, BookingConfirmation, ClientError};
use booking_shared::{BookingRequest, Field, ValidationError};
use tracing::{debug, info};

pub const SUCCESS_MESSAGE: &str = "Booking confirmed! Check your email.";
pub const FALLBACK_ERROR: &str = "Failed to submit the form.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Result of trying to start a submission.
#[derive(Debug, PartialEq, Eq)]
pub enum Submission {
    /// A request is already in flight, nothing changed.
    InFlight,
    Invalid(ValidationError),
    /// Passed validation; the form is now in flight with this request.
    Ready(BookingRequest),
}

#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    InFlight,
    Invalid(ValidationError),
    Booked(BookingConfirmation),
    Failed(String),
}

/// State of the booking form: field values, the in-flight flag and the
/// last success or error notice.
#[derive(Debug, Default)]
pub struct BookingForm {
    state: BookingRequest,
    loading: bool,
    notice: Option<Notice>,
}

impl BookingForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &BookingRequest {
        &self.state
    }

    pub fn value(&self, field: Field) -> &str {
        self.state.get(field)
    }

    /// Keystroke update, nothing is validated here.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.state.set(field, value);
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn button_label(&self) -> &'static str {
        if self.loading {
            "Booking..."
        } else {
            "Book Appointment"
        }
    }

    pub fn begin_submit(&mut self) -> Submission {
        if self.loading {
            debug!("Submission ignored, one is already in flight");
            return Submission::InFlight;
        }

        self.notice = None;

        if let Err(e) = self.state.validate() {
            self.notice = Some(Notice::Error(e.client_message()));
            return Submission::Invalid(e);
        }

        self.loading = true;
        Submission::Ready(self.state.clone())
    }

    /// Ends the submission started by [`BookingForm::begin_submit`]. Always
    /// releases the in-flight flag.
    pub fn finish_submit(
        &mut self,
        result: Result<BookingConfirmation, ClientError>,
    ) -> SubmitOutcome {
        self.loading = false;
        match result {
            Ok(confirmation) => {
                info!("Booking confirmed");
                self.notice = Some(Notice::Success(SUCCESS_MESSAGE.to_string()));
                self.state = BookingRequest::default();
                SubmitOutcome::Booked(confirmation)
            }
            Err(e) => {
                let mut message = e.to_string();
                if message.is_empty() {
                    message = FALLBACK_ERROR.to_string();
                }
                debug!("Booking failed: {}", message);
                self.notice = Some(Notice::Error(message.clone()));
                SubmitOutcome::Failed(message)
            }
        }
    }

    pub async fn submit(&mut self, api: &dyn BookingApi) -> SubmitOutcome {
        let request = match self.begin_submit() {
            Submission::Ready(request) => request,
            Submission::InFlight => return SubmitOutcome::InFlight,
            Submission::Invalid(e) => return SubmitOutcome::Invalid(e),
        };
        let result = api.book(&request).await;
        self.finish_submit(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FakeApi {
        calls: Mutex<Vec<BookingRequest>>,
        reject_with: Option<String>,
    }

    impl FakeApi {
        fn accepting() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reject_with: None,
            }
        }

        fn rejecting(message: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reject_with: Some(message.to_string()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl BookingApi for FakeApi {
        async fn book(
            &self,
            request: &BookingRequest,
        ) -> Result<BookingConfirmation, ClientError> {
            self.calls.lock().unwrap().push(request.clone());
            match &self.reject_with {
                Some(message) => Err(ClientError::Server(message.clone())),
                None => Ok(BookingConfirmation {
                    message_id: Some("<1@example.com>".into()),
                }),
            }
        }
    }

    fn filled() -> BookingForm {
        let mut form = BookingForm::new();
        form.set_field(Field::RepName, "Jane Doe");
        form.set_field(Field::CompanyName, "Acme Inc.");
        form.set_field(Field::Email, "name@example.com");
        form.set_field(Field::Phone, "9876543210");
        form.set_field(Field::Date, "2026-11-02");
        form
    }

    #[tokio::test]
    async fn success_resets_fields_and_shows_confirmation() {
        let api = FakeApi::accepting();
        let mut form = filled();

        let outcome = form.submit(&api).await;

        assert!(matches!(outcome, SubmitOutcome::Booked(_)));
        assert_eq!(api.call_count(), 1);
        assert_eq!(api.calls.lock().unwrap()[0].email, "name@example.com");
        assert!(form.state().is_empty());
        assert_eq!(
            form.notice(),
            Some(&Notice::Success(SUCCESS_MESSAGE.to_string()))
        );
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn failure_keeps_fields_and_shows_server_message() {
        let api = FakeApi::rejecting("Invalid email address.");
        let mut form = filled();

        let outcome = form.submit(&api).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed("Invalid email address.".to_string())
        );
        assert_eq!(form.value(Field::RepName), "Jane Doe");
        assert_eq!(
            form.notice(),
            Some(&Notice::Error("Invalid email address.".to_string()))
        );
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn each_blank_field_stops_before_the_network() {
        let expected = [
            (Field::RepName, "Rep Name is required."),
            (Field::CompanyName, "Company Name is required."),
            (Field::Email, "Email is required."),
            (Field::Phone, "Phone Number is required."),
            (Field::Date, "Date is required."),
        ];
        for (field, message) in expected {
            let api = FakeApi::accepting();
            let mut form = filled();
            form.set_field(field, "");

            let outcome = form.submit(&api).await;

            assert!(matches!(outcome, SubmitOutcome::Invalid(_)), "{field}");
            assert_eq!(api.call_count(), 0, "{field}");
            assert_eq!(
                form.notice(),
                Some(&Notice::Error(message.to_string())),
                "{field}"
            );
            assert!(!form.is_loading());
        }
    }

    #[tokio::test]
    async fn invalid_email_uses_the_form_wording() {
        let api = FakeApi::accepting();
        let mut form = filled();
        form.set_field(Field::Email, "name.example.com");

        form.submit(&api).await;

        assert_eq!(
            form.notice(),
            Some(&Notice::Error("Please enter a valid email.".to_string()))
        );
        assert_eq!(api.call_count(), 0);
    }

    #[test]
    fn second_submit_while_in_flight_is_ignored() {
        let mut form = filled();

        let first = form.begin_submit();
        assert!(matches!(first, Submission::Ready(_)));
        assert!(form.is_loading());
        assert_eq!(form.button_label(), "Booking...");

        form.set_field(Field::Phone, "not digits");
        assert_eq!(form.begin_submit(), Submission::InFlight);
        assert!(form.notice().is_none());

        form.finish_submit(Err(ClientError::Server("Something went wrong.".into())));
        assert!(!form.is_loading());
        assert_eq!(form.button_label(), "Book Appointment");
        assert!(matches!(form.begin_submit(), Submission::Invalid(_)));
    }

    #[test]
    fn new_submission_clears_the_previous_notice() {
        let mut form = filled();
        form.finish_submit(Err(ClientError::Server("boom".into())));
        assert!(form.notice().is_some());

        assert!(matches!(form.begin_submit(), Submission::Ready(_)));
        assert!(form.notice().is_none());
    }

    #[test]
    fn empty_error_message_falls_back() {
        let mut form = filled();
        let outcome = form.finish_submit(Err(ClientError::Server(String::new())));
        assert_eq!(outcome, SubmitOutcome::Failed(FALLBACK_ERROR.to_string()));
    }
}

#![forbid(unsafe_code)]
pub mod client;
pub mod form;

pub use booking_shared::{BookingRequest, Field, ValidationError};
pub use client::{BookingApi, BookingConfirmation, ClientError, HttpBookingApi};
pub use form::{BookingForm, Notice, Submission, SubmitOutcome};

#![forbid(unsafe_code)]
pub mod api;
pub mod appointment;
pub mod config;
pub mod error;
pub mod mailer;
pub mod server;

pub use appointment::AppointmentApp;
pub use server::router;

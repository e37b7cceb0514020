#![forbid(unsafe_code)]
use anyhow::Result;
use booking_form::{BookingForm, Field, HttpBookingApi, Notice, SubmitOutcome};
use std::env;
use std::io::Write;
use tokio::io::{stdin, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::debug;
use tracing_subscriber::filter::EnvFilter;

const DEFAULT_API_URL: &str = "http://localhost:3000";

fn render_notice(notice: &Notice) {
    match notice {
        Notice::Error(message) => println!("\n[Error]\n{}\n", message),
        Notice::Success(message) => println!("\n[Success]\n{}\n", message),
    }
}

/// Prompts every field once. An empty line keeps the current value.
/// Returns false when stdin is closed.
async fn fill_fields(form: &mut BookingForm, lines: &mut Lines<BufReader<Stdin>>) -> Result<bool> {
    for field in Field::ALL {
        let hint = match (form.value(field), field.placeholder()) {
            ("", Some(placeholder)) => format!(" (e.g. {})", placeholder),
            ("", None) if field == Field::Date => " (YYYY-MM-DD)".to_string(),
            ("", None) => String::new(),
            (current, _) => format!(" [{}]", current),
        };
        print!("{}{}: ", field.label(), hint);
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            return Ok(false);
        };
        if !line.is_empty() {
            form.set_field(field, line);
        }
    }
    Ok(true)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let api = HttpBookingApi::new(
        &env::var("BOOKING_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
    );
    debug!("Booking endpoint: {}", api.endpoint());

    println!("Book an Appointment");
    println!(
        "All fields are required. A confirmation email will be sent upon successful booking.\n"
    );

    let mut form = BookingForm::new();
    let mut lines = BufReader::new(stdin()).lines();

    loop {
        if !fill_fields(&mut form, &mut lines).await? {
            return Ok(());
        }

        println!("[{}]", form.button_label());
        let outcome = form.submit(&api).await;
        if let Some(notice) = form.notice() {
            render_notice(notice);
        }

        match outcome {
            SubmitOutcome::Booked(_) => return Ok(()),
            SubmitOutcome::Invalid(e) => {
                println!("Fix {} and submit again.", e.field().label())
            }
            SubmitOutcome::Failed(_) | SubmitOutcome::InFlight => {
                println!("Press enter to keep a value.")
            }
        }
    }
}

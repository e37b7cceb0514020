#![forbid(unsafe_code)]
use serde::{Deserialize, Serialize};

mod validation;
pub use validation::ValidationError;

/// The five inputs of the booking form, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    RepName,
    CompanyName,
    Email,
    Phone,
    Date,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::RepName,
        Field::CompanyName,
        Field::Email,
        Field::Phone,
        Field::Date,
    ];

    /// Key used in the JSON body.
    pub fn key(self) -> &'static str {
        match self {
            Field::RepName => "repName",
            Field::CompanyName => "companyName",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Date => "date",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::RepName => "Rep Name",
            Field::CompanyName => "Company Name",
            Field::Email => "Mail ID",
            Field::Phone => "Phone Number",
            Field::Date => "Date",
        }
    }

    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            Field::RepName => Some("Jane Doe"),
            Field::CompanyName => Some("Acme Inc."),
            Field::Email => Some("name@example.com"),
            Field::Phone => Some("9876543210"),
            Field::Date => None,
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// An appointment request as it travels from the form to the server.
/// Never stored; it only lives for the duration of one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub rep_name: String,
    pub company_name: String,
    pub email: String,
    pub phone: String,
    pub date: String,
}

impl BookingRequest {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::RepName => &self.rep_name,
            Field::CompanyName => &self.company_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Date => &self.date,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::RepName => &mut self.rep_name,
            Field::CompanyName => &mut self.company_name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Date => &mut self.date,
        };
        *slot = value.into();
    }

    /// True when every field is the empty string.
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|&field| self.get(field).is_empty())
    }

    /// Checks the fields in form order and stops at the first failing rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate(self)
    }
}

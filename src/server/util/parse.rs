//! Parsing of the text fields clients send in forms and JSON bodies.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use entity::{
    donation::{Category, DonationStatus},
    request::RequestStatus,
};
use sea_orm::ActiveEnum;

use crate::server::error::validation::ValidationError;

pub fn parse_category(raw: &str) -> Result<Category, ValidationError> {
    Category::try_from_value(&normalize_token(raw))
        .map_err(|_| ValidationError::UnknownCategory(raw.to_string()))
}

pub fn parse_donation_status(raw: &str) -> Result<DonationStatus, ValidationError> {
    DonationStatus::try_from_value(&normalize_token(raw))
        .map_err(|_| ValidationError::UnknownDonationStatus(raw.to_string()))
}

pub fn parse_request_status(raw: &str) -> Result<RequestStatus, ValidationError> {
    RequestStatus::try_from_value(&normalize_token(raw))
        .map_err(|_| ValidationError::UnknownRequestStatus(raw.to_string()))
}

/// Trims a required text field and checks it is non-empty and at most `max` characters.
pub fn required_text(
    value: Option<String>,
    field: &'static str,
    max: usize,
) -> Result<String, ValidationError> {
    let value = value.as_deref().map(str::trim).unwrap_or_default();

    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(value.to_string())
}

/// Parses `YYYY-MM-DD`, or the date part of an RFC 3339 timestamp.
pub fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| ValidationError::InvalidDate {
            field,
            value: raw.to_string(),
        })
}

/// Parses an RFC 3339 timestamp into UTC, or a timestamp without offset taken as UTC.
pub fn parse_datetime(field: &'static str, raw: &str) -> Result<NaiveDateTime, ValidationError> {
    let raw = raw.trim();

    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map_err(|_| ValidationError::InvalidDate {
            field,
            value: raw.to_string(),
        })
}

fn normalize_token(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

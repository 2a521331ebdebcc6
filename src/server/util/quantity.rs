//! Quantity parsing and unit normalization.
//!
//! Donations are stored in a canonical unit (`kg` for mass, `liter` for volume). Donors
//! may enter `g` or `ml`, which are divided by 1000 on the way in. Requests carry their
//! quantity as free text such as `"2 kg"`, only the leading numeric token is required.

use entity::donation::QuantityUnit;

use crate::server::error::validation::ValidationError;

/// Maximum length of a request's free-text quantity.
pub const REQUESTED_QUANTITY_MAX_LEN: usize = 50;

/// Units accepted from clients before normalization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputUnit {
    Gram,
    Kilogram,
    Milliliter,
    Liter,
}

impl InputUnit {
    /// Parses a unit token, case-insensitive.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "g" => Some(Self::Gram),
            "kg" => Some(Self::Kilogram),
            "ml" => Some(Self::Milliliter),
            "liter" => Some(Self::Liter),
            _ => None,
        }
    }

    pub fn canonical(self) -> QuantityUnit {
        match self {
            Self::Gram | Self::Kilogram => QuantityUnit::Kg,
            Self::Milliliter | Self::Liter => QuantityUnit::Liter,
        }
    }

    fn divisor(self) -> f64 {
        match self {
            Self::Gram | Self::Milliliter => 1000.0,
            Self::Kilogram | Self::Liter => 1.0,
        }
    }
}

/// Converts `value` given in `unit` into the canonical unit of the same dimension.
pub fn normalize(value: f64, unit: InputUnit) -> f64 {
    value / unit.divisor()
}

/// Validates a donor-entered quantity and returns it in its canonical unit.
pub fn normalize_donation_quantity(
    value: &str,
    unit: &str,
) -> Result<(f64, QuantityUnit), ValidationError> {
    let unit = InputUnit::parse(unit).ok_or_else(|| ValidationError::UnknownUnit(unit.into()))?;
    let parsed = parse_positive(value)
        .ok_or_else(|| ValidationError::InvalidQuantity(value.to_string()))?;

    let normalized = normalize(parsed, unit);
    if !(normalized.is_finite() && normalized > 0.0) {
        return Err(ValidationError::InvalidQuantity(value.to_string()));
    }

    Ok((normalized, unit.canonical()))
}

/// Extracts the amount from a request's free-text quantity.
///
/// The first whitespace-separated token must be a positive number. When the second token
/// is a known unit the amount is normalized to the canonical unit, any other trailing
/// text is ignored.
pub fn parse_requested_quantity(raw: &str) -> Result<f64, ValidationError> {
    let mut tokens = raw.split_whitespace();

    let value = tokens
        .next()
        .and_then(parse_positive)
        .ok_or_else(|| ValidationError::UnparseableRequestedQuantity(raw.to_string()))?;

    match tokens.next().and_then(InputUnit::parse) {
        Some(unit) => Ok(normalize(value, unit)),
        None => Ok(value),
    }
}

/// Checks that a request's quantity, when it names a known unit, measures the same dimension
/// as the donation. Unknown or missing units are accepted.
pub fn check_requested_unit(raw: &str, donation_unit: QuantityUnit) -> Result<(), ValidationError> {
    let Some(token) = raw.split_whitespace().nth(1) else {
        return Ok(());
    };

    match InputUnit::parse(token) {
        Some(unit) if unit.canonical() != donation_unit => Err(ValidationError::UnitMismatch {
            requested: token.to_string(),
            donation: donation_unit,
        }),
        _ => Ok(()),
    }
}

/// Validates a request's free-text quantity at creation and returns it trimmed.
pub fn validate_requested_quantity(raw: Option<&str>) -> Result<String, ValidationError> {
    let trimmed = raw.map(str::trim).unwrap_or_default();

    if trimmed.is_empty() {
        return Err(ValidationError::MissingField("requested_quantity"));
    }
    if trimmed.chars().count() > REQUESTED_QUANTITY_MAX_LEN {
        return Err(ValidationError::TooLong {
            field: "requested_quantity",
            max: REQUESTED_QUANTITY_MAX_LEN,
        });
    }

    parse_requested_quantity(trimmed)?;

    Ok(trimmed.to_string())
}

fn parse_positive(token: &str) -> Option<f64> {
    token
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}

//! Text-to-number conversion for caller-supplied fields.

use super::error::{ServiceError, ServiceResult};

/// Parses a numeric record id.
///
/// Non-numeric text is `MalformedInput`.
pub fn parse_id(text: &str, field: &str) -> ServiceResult<i64> {
    let trimmed = text.trim();
    trimmed.parse::<i64>().map_err(|_| {
        ServiceError::MalformedInput(format!("{field} must be a whole number, got `{trimmed}`"))
    })
}

/// Parses a real-valued measure such as a payment amount or room size.
///
/// Non-numeric, NaN and infinite values are `InvalidFormat`. Sign checks are
/// left to model validation.
pub fn parse_amount(text: &str, field: &str) -> ServiceResult<f64> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ServiceError::InvalidFormat(format!(
            "{field} must be a number, got `{trimmed}`"
        ))),
    }
}

use crate::error::{ProcessingError, Result};

/// Parse a decimal-degree coordinate cell
///
/// # Examples
/// ```
/// use lake_prep::utils::parse_decimal_degrees;
///
/// let lat = parse_decimal_degrees(" 46.0123 ", "centroid_lat").unwrap();
/// assert!((lat - 46.0123).abs() < 1e-9);
/// ```
pub fn parse_decimal_degrees(value: &str, column: &str) -> Result<f64> {
    let trimmed = value.trim();
    let parsed = trimmed.parse::<f64>().map_err(|_| {
        ProcessingError::InvalidCoordinate(format!(
            "Invalid value '{}' in column '{}'",
            value, column
        ))
    })?;

    if !parsed.is_finite() {
        return Err(ProcessingError::InvalidCoordinate(format!(
            "Non-finite value '{}' in column '{}'",
            value, column
        )));
    }

    Ok(parsed)
}

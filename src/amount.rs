//! Naira amounts entered as text

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("invalid amount: {0}")]
    Invalid(String),
    #[error("amount must be a finite number: {0}")]
    NonFinite(String),
}

/// Parse a user-entered amount such as "₦1,250,000", "NGN 940000" or "1_000_000.50".
///
/// Negative amounts are accepted; the tax engines clamp them where it matters.
pub fn parse_amount(input: &str) -> Result<f64, AmountError> {
    let trimmed = input.trim();
    let unprefixed = trimmed
        .strip_prefix('₦')
        .or_else(|| {
            trimmed
                .get(..3)
                .filter(|p| p.eq_ignore_ascii_case("ngn"))
                .map(|_| &trimmed[3..])
        })
        .unwrap_or(trimmed);

    let cleaned: String = unprefixed
        .chars()
        .filter(|c| !matches!(*c, ',' | '_') && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return Err(AmountError::Empty);
    }

    let value: f64 = cleaned
        .parse()
        .map_err(|_| AmountError::Invalid(input.to_string()))?;

    if !value.is_finite() {
        return Err(AmountError::NonFinite(input.to_string()));
    }
    Ok(value)
}

/// Format with comma thousands separators and a fixed number of decimals
pub fn format_amount(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (whole, fraction) = match formatted.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(formatted.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    let is_zero = grouped.chars().all(|c| !c.is_ascii_digit() || c == '0');
    if value < 0.0 && !is_zero {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Naira amount for display, e.g. "₦1,250,000.00"
pub fn format_ngn(value: f64) -> String {
    if value < 0.0 {
        format!("-₦{}", format_amount(value.abs(), 2))
    } else {
        format!("₦{}", format_amount(value, 2))
    }
}

use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a rate argument cannot be used.
#[derive(Debug, Error)]
pub enum ParseDecimalError {
    #[error("invalid decimal '{input}': {source}")]
    Invalid {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },

    #[error("'{input}' must not be negative")]
    Negative { input: String },

    #[error("'{input}' contains a comma; use a point for decimals and no separators")]
    Comma { input: String },
}

/// Parses a string into a [`Decimal`].
///
/// Unlike quote quantities, rates typed into settings are validated: a
/// typo is reported instead of silently becoming zero. Empty input is 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }
    if trimmed.contains(',') {
        return Err(ParseDecimalError::Comma {
            input: s.to_string(),
        });
    }
    trimmed.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError::Invalid {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses a non-negative rate. Usable as a clap `value_parser`.
pub fn parse_rate(s: &str) -> Result<Decimal, ParseDecimalError> {
    let value = parse_decimal(s)?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ParseDecimalError::Negative {
            input: s.to_string(),
        });
    }
    Ok(value)
}

/// 1-based list position as typed by the user, to a 0-based index.
pub fn parse_position(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(format!("'{s}' is not a position (use 1, 2, 3, ...)")),
        Ok(n) => Ok(n - 1),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_decimal_rejects_commas() {
        assert!(matches!(
            parse_decimal("1,5"),
            Err(ParseDecimalError::Comma { .. })
        ));
        assert!(matches!(
            parse_decimal("1,234.56"),
            Err(ParseDecimalError::Comma { .. })
        ));
    }

    #[test]
    fn parse_decimal_trim_whitespace() {
        assert_eq!(parse_decimal("  12.50  ").unwrap(), dec!(12.50));
    }

    #[test]
    fn parse_decimal_empty_treated_as_zero() {
        assert_eq!(parse_decimal("   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_decimal_invalid_returns_error() {
        assert!(matches!(
            parse_decimal("abc"),
            Err(ParseDecimalError::Invalid { .. })
        ));
    }

    #[test]
    fn parse_rate_rejects_negative() {
        assert!(matches!(
            parse_rate("-1"),
            Err(ParseDecimalError::Negative { .. })
        ));
        assert_eq!(parse_rate("6.00").unwrap(), dec!(6));
        assert_eq!(parse_rate("0").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_position_is_one_based() {
        assert_eq!(parse_position("1"), Ok(0));
        assert_eq!(parse_position(" 3 "), Ok(2));
        assert!(parse_position("0").is_err());
        assert!(parse_position("first").is_err());
    }
}

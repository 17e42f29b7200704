//! Numeric literal parsing and validation.
//!
//! This module turns the text of integer and real literal tokens into
//! structured values. The lexer accepts any alphanumeric run after a base
//! marker so that a bad digit such as the `G` in `8'hGG` is reported here
//! instead of silently ending the literal early.

use thiserror::Error;

use crate::parser::ast::{Base, Exponent, IntLiteral, RealLiteral, Sign};

/// Error returned when a numeric literal fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    #[error("invalid bit width `{0}`")]
    InvalidWidth(String),
    #[error("invalid base marker `{0}`")]
    InvalidBase(char),
    #[error("literal has no digits")]
    MissingDigits,
    #[error("digit `{digit}` is not valid in a {base} literal")]
    InvalidDigit { digit: char, base: Base },
}

fn strip_separators(text: &str) -> String {
    text.chars().filter(|c| *c != '_').collect()
}

fn validate_digits(digits: &str, base: Base) -> Result<(), LiteralError> {
    if digits.is_empty() {
        return Err(LiteralError::MissingDigits);
    }
    match digits.chars().find(|c| !c.is_digit(base.radix())) {
        Some(digit) => Err(LiteralError::InvalidDigit { digit, base }),
        None => Ok(()),
    }
}

/// Parse an integer literal such as `42`, `1_000`, `'hFF` or `8'b1010`.
///
/// # Errors
/// Returns a [`LiteralError`] when the width is not a `u32`, the base marker
/// is unknown, or a digit does not belong to the base.
pub fn parse_int_literal(text: &str) -> Result<IntLiteral, LiteralError> {
    let Some((width_text, rest)) = text.split_once('\'') else {
        let digits = strip_separators(text);
        validate_digits(&digits, Base::Decimal)?;
        return Ok(IntLiteral {
            width: None,
            sign: None,
            base: Base::Decimal,
            explicit_base: false,
            digits,
        });
    };
    let width = if width_text.is_empty() {
        None
    } else {
        let parsed = width_text
            .parse::<u32>()
            .map_err(|_| LiteralError::InvalidWidth(width_text.to_string()))?;
        Some(parsed)
    };
    let mut chars = rest.chars();
    let marker = chars.next().ok_or(LiteralError::MissingDigits)?;
    let base = Base::from_marker(marker).ok_or(LiteralError::InvalidBase(marker))?;
    let digits = strip_separators(chars.as_str());
    validate_digits(&digits, base)?;
    Ok(IntLiteral {
        width,
        sign: None,
        base,
        explicit_base: true,
        digits,
    })
}

/// Parse a real literal such as `1.5`, `1_000.25` or `2.0e-3`.
///
/// # Errors
/// Returns [`LiteralError::MissingDigits`] when a component is empty.
pub fn parse_real_literal(text: &str) -> Result<RealLiteral, LiteralError> {
    let (mantissa, exponent) = match text.split_once(['e', 'E']) {
        Some((mantissa, exp)) => (mantissa, Some(exp)),
        None => (text, None),
    };
    let (integer, fraction) = match mantissa.split_once('.') {
        Some((int, frac)) => (int, Some(strip_separators(frac))),
        None => (mantissa, None),
    };
    let exponent = exponent
        .map(|exp| {
            let (sign, digits) = if let Some(rest) = exp.strip_prefix('-') {
                (Some(Sign::Minus), rest)
            } else if let Some(rest) = exp.strip_prefix('+') {
                (Some(Sign::Plus), rest)
            } else {
                (None, exp)
            };
            let digits = strip_separators(digits);
            validate_digits(&digits, Base::Decimal)?;
            Ok(Exponent { sign, digits })
        })
        .transpose()?;
    let integer = strip_separators(integer);
    validate_digits(&integer, Base::Decimal)?;
    if let Some(frac) = &fraction {
        validate_digits(frac, Base::Decimal)?;
    }
    Ok(RealLiteral {
        integer,
        fraction,
        exponent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("8'hFF", Some(8), Base::Hex, "FF")]
    #[case("8'hF_F", Some(8), Base::Hex, "FF")]
    #[case("4'b10_10", Some(4), Base::Binary, "1010")]
    #[case("'d10", None, Base::Decimal, "10")]
    #[case("12'O777", Some(12), Base::Octal, "777")]
    #[case("1_000", None, Base::Decimal, "1000")]
    fn sized_and_unsized(
        #[case] text: &str,
        #[case] width: Option<u32>,
        #[case] base: Base,
        #[case] digits: &str,
    ) {
        let lit = parse_int_literal(text).unwrap_or_else(|e| panic!("{text}: {e}"));
        assert_eq!(lit.width, width);
        assert_eq!(lit.base, base);
        assert_eq!(lit.digits, digits);
    }

    #[test]
    fn separators_do_not_change_value() {
        let a = parse_int_literal("8'hFF").map(|l| l.value());
        let b = parse_int_literal("8'hF_F").map(|l| l.value());
        assert_eq!(a, b);
        assert_eq!(a, Ok(Some(255)));
    }

    #[rstest]
    #[case("8'hGG", LiteralError::InvalidDigit { digit: 'G', base: Base::Hex })]
    #[case("3'o8", LiteralError::InvalidDigit { digit: '8', base: Base::Octal })]
    #[case("2'b102", LiteralError::InvalidDigit { digit: '2', base: Base::Binary })]
    #[case("8'h", LiteralError::MissingDigits)]
    #[case("8'h__", LiteralError::MissingDigits)]
    #[case("99999999999'd1", LiteralError::InvalidWidth("99999999999".to_string()))]
    fn rejects_malformed(#[case] text: &str, #[case] expected: LiteralError) {
        assert_eq!(parse_int_literal(text), Err(expected));
    }

    #[test]
    fn invalid_digit_message_names_base() {
        let err = parse_int_literal("8'hGG").err().map(|e| e.to_string());
        assert_eq!(
            err.as_deref(),
            Some("digit `G` is not valid in a hexadecimal literal")
        );
    }

    #[rstest]
    #[case("1.5", "1", Some("5"), None)]
    #[case("2.0e-3", "2", Some("0"), Some((Some(Sign::Minus), "3")))]
    #[case("1_0E4", "10", None, Some((None, "4")))]
    fn reals(
        #[case] text: &str,
        #[case] integer: &str,
        #[case] fraction: Option<&str>,
        #[case] exponent: Option<(Option<Sign>, &str)>,
    ) {
        let lit = parse_real_literal(text).unwrap_or_else(|e| panic!("{text}: {e}"));
        assert_eq!(lit.integer, integer);
        assert_eq!(lit.fraction.as_deref(), fraction);
        assert_eq!(
            lit.exponent.as_ref().map(|e| (e.sign, e.digits.as_str())),
            exponent
        );
    }
}

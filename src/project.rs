//! Projections of a round digest onto integers, floats and booleans.
//!
//! Integers read the first 32 bits of the digest and reduce them modulo the
//! range width. This carries modulo bias for widths that do not divide 2^32
//! and is an accepted approximation, not a uniform sample.
//!
//! Floats concatenate the decimal forms of the first 32 digest bytes behind
//! `"0."`, parse the result, and round it half away from zero on its exact
//! decimal expansion. The result is not uniform: leading digits follow the
//! decimal forms of a byte, so roughly four draws in five fall at or below
//! 0.5. Independent verifiers depend on this exact construction.

use log::debug;

use crate::error::FairError;
use crate::pipeline::{bytes_from_hex, round_digest};

/// Precision used when a caller does not name one.
pub const DEFAULT_PRECISION: u32 = 2;
/// Largest accepted float precision.
pub const MAX_PRECISION: u32 = 100;
/// Precision of the draw behind booleans and weighted selection.
pub const DRAW_PRECISION: u32 = 10;

const FRACTION_BYTES: usize = 32;
const INTEGER_BYTES: usize = 4;

/// Integer in `[min, max]`, both inclusive.
pub fn generate_integer(
    client_seed: &str,
    server_seed: &str,
    nonce: u64,
    min: i64,
    max: i64,
) -> Result<i64, FairError> {
    if max < min {
        return Err(FairError::InvalidRange { min, max });
    }
    let digest = round_digest(client_seed, server_seed, nonce);
    let bytes = bytes_from_hex(&digest, INTEGER_BYTES)?;
    let raw = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);

    let span = i128::from(max) - i128::from(min) + 1;
    let offset = i128::from(raw) % span;
    let value = i64::try_from(i128::from(min) + offset)
        .map_err(|_| FairError::InvalidRange { min, max })?;
    debug!("integer draw nonce={nonce} raw={raw} range=[{min}, {max}] value={value}");
    Ok(value)
}

/// Float rounded to `precision` decimal digits.
///
/// Lies in `[0, 1)` for precision of at least one digit; precision zero
/// yields `0.0` or `1.0`.
pub fn generate_float(
    client_seed: &str,
    server_seed: &str,
    nonce: u64,
    precision: u32,
) -> Result<f64, FairError> {
    if precision > MAX_PRECISION {
        return Err(FairError::InvalidPrecision {
            precision,
            max: MAX_PRECISION,
        });
    }
    let digest = round_digest(client_seed, server_seed, nonce);
    let fraction = decimal_fraction(&bytes_from_hex(&digest, FRACTION_BYTES)?);
    let parsed: f64 = fraction
        .parse()
        .map_err(|_| FairError::InvalidFraction(fraction.clone()))?;
    let value = round_half_away(parsed, precision)?;
    debug!("float draw nonce={nonce} precision={precision} value={value}");
    Ok(value)
}

/// `true` when the ten digit draw is at most one half.
pub fn generate_bool(client_seed: &str, server_seed: &str, nonce: u64) -> Result<bool, FairError> {
    Ok(generate_float(client_seed, server_seed, nonce, DRAW_PRECISION)? <= 0.5)
}

/// `"0."` followed by each byte's decimal form, e.g. `[18, 0, 255]` -> `"0.180255"`.
fn decimal_fraction(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 3);
    out.push_str("0.");
    for byte in bytes {
        out.push_str(&byte.to_string());
    }
    out
}

/// Round a non-negative value half away from zero, deciding on its exact
/// decimal expansion rather than a shortest round-trip rendering.
fn round_half_away(value: f64, precision: u32) -> Result<f64, FairError> {
    debug_assert!(value >= 0.0);
    let keep = precision as usize;
    let width = exact_fraction_digits(value).max(keep + 1);
    let exact = format!("{value:.width$}");
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = whole
        .bytes()
        .chain(fraction.bytes().take(keep))
        .collect();
    if fraction.as_bytes().get(keep).is_some_and(|d| *d >= b'5') {
        increment_decimal(&mut digits);
    }

    let split = digits.len() - keep;
    let mut text = String::with_capacity(digits.len() + 1);
    text.extend(digits[..split].iter().map(|d| char::from(*d)));
    if keep > 0 {
        text.push('.');
        text.extend(digits[split..].iter().map(|d| char::from(*d)));
    }
    text.parse().map_err(|_| FairError::InvalidFraction(text))
}

/// Fractional digits in the exact decimal expansion of `value`.
///
/// A finite f64 is `m * 2^e`; with `m` odd the expansion ends after `-e`
/// digits, so formatting to that width never rounds.
fn exact_fraction_digits(value: f64) -> usize {
    if value == 0.0 || !value.is_finite() {
        return 0;
    }
    let bits = value.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased - 1075)
    };
    let exponent = exponent + mantissa.trailing_zeros() as i32;
    usize::try_from(-exponent).unwrap_or(0)
}

/// Add one unit in the last place of an ASCII digit string.
fn increment_decimal(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_golden_value() {
        assert_eq!(generate_integer("a", "b", 0, 1, 6).unwrap(), 6);
        assert_eq!(generate_integer("a", "b", 0, -10, 10).unwrap(), 4);
        assert_eq!(generate_integer("client", "server", 0, 1, 100).unwrap(), 93);
        assert_eq!(generate_integer("client", "server", 1, 1, 100).unwrap(), 19);
    }

    #[test]
    fn integer_full_u32_span_returns_raw_prefix() {
        // bce31819 == 3168999449
        assert_eq!(
            generate_integer("a", "b", 0, 0, u32::MAX as i64).unwrap(),
            3_168_999_449
        );
    }

    #[test]
    fn integer_degenerate_range() {
        assert_eq!(generate_integer("a", "b", 0, 5, 5).unwrap(), 5);
    }

    #[test]
    fn integer_extreme_bounds_do_not_overflow() {
        let v = generate_integer("a", "b", 0, i64::MIN, i64::MAX).unwrap();
        assert_eq!(v, i64::MIN + 3_168_999_449);
    }

    #[test]
    fn integer_rejects_inverted_range() {
        let err = generate_integer("a", "b", 0, 5, 1).unwrap_err();
        assert_eq!(err, FairError::InvalidRange { min: 5, max: 1 });
    }

    #[test]
    fn float_golden_values() {
        assert_eq!(generate_float("a", "b", 0, 0).unwrap(), 0.0);
        assert_eq!(generate_float("a", "b", 0, 1).unwrap(), 0.2);
        assert_eq!(generate_float("a", "b", 0, 2).unwrap(), 0.19);
        assert_eq!(generate_float("a", "b", 0, 4).unwrap(), 0.1882);
        assert_eq!(generate_float("a", "b", 0, 10).unwrap(), 0.1882272425);
        assert_eq!(generate_float("client", "server", 3, 10).unwrap(), 0.8210018016);
    }

    #[test]
    fn float_precision_zero_can_reach_one() {
        assert_eq!(generate_float("client", "server", 0, 0).unwrap(), 1.0);
        assert_eq!(generate_float("client", "server", 1, 0).unwrap(), 0.0);
    }

    #[test]
    fn float_rejects_excessive_precision() {
        let err = generate_float("a", "b", 0, MAX_PRECISION + 1).unwrap_err();
        assert!(matches!(err, FairError::InvalidPrecision { precision: 101, .. }));
        assert!(generate_float("a", "b", 0, MAX_PRECISION).is_ok());
    }

    #[test]
    fn bool_golden_values() {
        assert!(generate_bool("a", "b", 0).unwrap());
        assert!(!generate_bool("client", "server", 0).unwrap());
        assert!(generate_bool("client", "server", 1).unwrap());
    }

    #[test]
    fn decimal_fraction_concatenates_bytes() {
        assert_eq!(decimal_fraction(&[18, 0, 255]), "0.180255");
        assert_eq!(decimal_fraction(&[]), "0.");
    }

    #[test]
    fn rounding_is_half_away_on_exact_ties() {
        // 0.25, 0.125 and 0.5 are exact in binary
        assert_eq!(round_half_away(0.25, 1).unwrap(), 0.3);
        assert_eq!(round_half_away(0.125, 2).unwrap(), 0.13);
        assert_eq!(round_half_away(0.5, 0).unwrap(), 1.0);
    }

    #[test]
    fn rounding_uses_exact_expansion() {
        // 1.005 is stored as 1.00499999999999989...
        assert_eq!(round_half_away(1.005, 2).unwrap(), 1.0);
        assert_eq!(round_half_away(0.149, 1).unwrap(), 0.1);
        assert_eq!(round_half_away(0.9999, 2).unwrap(), 1.0);
    }

    #[test]
    fn exact_digits_match_binary_expansion() {
        assert_eq!(exact_fraction_digits(0.0), 0);
        assert_eq!(exact_fraction_digits(3.0), 0);
        assert_eq!(exact_fraction_digits(0.5), 1);
        assert_eq!(exact_fraction_digits(0.125), 3);
        // 0.1000000000000000055511151231257827021181583404541015625
        assert_eq!(exact_fraction_digits(0.1), 55);
        assert_eq!(exact_fraction_digits(f64::MIN_POSITIVE), 1022);
        assert_eq!(exact_fraction_digits(5e-324), 1074);
    }

    #[test]
    fn rounding_handles_long_expansions() {
        assert_eq!(round_half_away(0.1, 20).unwrap(), 0.1);
        assert_eq!(round_half_away(5e-324, 0).unwrap(), 0.0);
        assert_eq!(round_half_away(1e-300, 2).unwrap(), 0.0);
        assert_eq!(round_half_away(0.1882272425188239, 10).unwrap(), 0.1882272425);
    }

    #[test]
    fn increment_carries_into_new_digit() {
        let mut digits = b"999".to_vec();
        increment_decimal(&mut digits);
        assert_eq!(digits, b"1000");
    }
}

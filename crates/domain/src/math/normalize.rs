use crate::error::{Error, Result};
use primitive_types::U256;
use rust_decimal::Decimal;

/// Largest scale a `Decimal` can carry.
const MAX_SCALE: usize = 28;

/// Scales a raw on-chain balance into a human quantity.
/// formula: raw / 10^decimals
///
/// The decimal point is placed on the integer's digit string, so no binary
/// floating point is involved at any step. Fractional digits beyond what a
/// `Decimal` can hold are rounded half away from zero.
///
/// # Arguments
///
/// * `raw` - Balance in the token's smallest unit
/// * `decimals` - Token decimals as reported by the contract
///
/// # Errors
///
/// * `Error::InvalidInput` if `decimals` is negative or the integer part
///   does not fit in a `Decimal`.
pub fn normalize(raw: U256, decimals: i32) -> Result<Decimal> {
    if decimals < 0 {
        return Err(Error::invalid_input(format!(
            "decimals must be non-negative, got {decimals}"
        )));
    }
    let scale = decimals as usize;
    let digits = raw.to_string();

    let (int_part, frac_part) = if digits.len() > scale {
        let split = digits.len() - scale;
        (&digits[..split], &digits[split..])
    } else {
        ("", digits.as_str())
    };
    // Leading zeros of the fraction are implied by the scale.
    let frac_len = scale;
    let frac_leading_zeros = frac_len - frac_part.len();

    let int_digits = int_part.trim_start_matches('0').len();
    if int_digits > MAX_SCALE + 1 {
        return Err(Error::invalid_input(format!(
            "balance {raw} with {decimals} decimals exceeds decimal range"
        )));
    }

    let keep = frac_len.min(MAX_SCALE.saturating_sub(int_digits));
    let kept_significant = keep.saturating_sub(frac_leading_zeros).min(frac_part.len());

    let mut mantissa_digits = String::with_capacity(int_part.len() + kept_significant);
    mantissa_digits.push_str(int_part);
    mantissa_digits.push_str(&frac_part[..kept_significant]);

    let mut mantissa: i128 = if mantissa_digits.is_empty() {
        0
    } else {
        mantissa_digits
            .parse()
            .map_err(|_| Error::invalid_input(format!("balance {raw} exceeds decimal range")))?
    };

    // First dropped digit decides the rounding direction.
    let next_digit = if keep < frac_leading_zeros {
        Some(b'0')
    } else {
        frac_part.as_bytes().get(kept_significant).copied()
    };
    if matches!(next_digit, Some(d) if d >= b'5') {
        mantissa += 1;
    }

    Decimal::try_from_i128_with_scale(mantissa, keep as u32)
        .map(|d| d.normalize())
        .map_err(|_| {
            Error::invalid_input(format!(
                "balance {raw} with {decimals} decimals exceeds decimal range"
            ))
        })
}

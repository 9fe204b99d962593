//! Exact decimal fixed-point parsing and formatting.
//!
//! Lengths and angles are stored as scaled integers; their file tokens are
//! plain decimals in the "C" locale. Parsing must be exact: a token that
//! needs more fractional digits than the storage resolution is rejected
//! rather than rounded.

/// Parse a plain decimal token into an integer scaled by `10^decimals`.
///
/// The accepted grammar is `[+-]?[0-9]+(\.[0-9]+)?`. Fractional digits
/// beyond `decimals` places must all be zero; any other digit there means
/// the value is not representable and `None` is returned. Overflow also
/// returns `None`.
pub(crate) fn parse_scaled(input: &str, decimals: u32) -> Option<i64> {
    let (negative, rest) = match input.as_bytes().first()? {
        b'-' => (true, &input[1..]),
        b'+' => (false, &input[1..]),
        _ => (false, input),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((int_part, frac_part)) if !frac_part.is_empty() => (int_part, frac_part),
        Some(_) => return None,
        None => (rest, ""),
    };
    if int_part.is_empty()
        || !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let mut magnitude: i128 = 0;
    for digit in int_part.bytes() {
        magnitude = magnitude
            .checked_mul(10)?
            .checked_add(i128::from(digit - b'0'))?;
    }
    magnitude = magnitude.checked_mul(i128::from(10i64.pow(decimals)))?;

    let mut frac: i128 = 0;
    let mut seen: u32 = 0;
    for digit in frac_part.bytes() {
        if seen < decimals {
            frac = frac * 10 + i128::from(digit - b'0');
            seen += 1;
        } else if digit != b'0' {
            return None;
        }
    }
    magnitude = magnitude.checked_add(frac * i128::from(10i64.pow(decimals - seen)))?;

    i64::try_from(if negative { -magnitude } else { magnitude }).ok()
}

/// Format an integer scaled by `10^decimals` as a plain decimal token.
///
/// Trailing fractional zeros are trimmed; integral values print without a
/// decimal point. The output always parses back to the same integer.
pub(crate) fn format_scaled(value: i64, decimals: u32) -> String {
    let scale = 10u64.pow(decimals);
    let magnitude = value.unsigned_abs();
    let int_part = magnitude / scale;
    let frac_part = magnitude % scale;
    let sign = if value < 0 { "-" } else { "" };
    if frac_part == 0 {
        format!("{sign}{int_part}")
    } else {
        let digits = format!("{frac_part:0width$}", width = decimals as usize);
        format!("{sign}{int_part}.{}", digits.trim_end_matches('0'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_decimals() {
        assert_eq!(parse_scaled("0.1", 6), Some(100_000));
        assert_eq!(parse_scaled("-1234.56", 6), Some(-1_234_560_000));
        assert_eq!(parse_scaled("+2", 6), Some(2_000_000));
        assert_eq!(parse_scaled("0.0000001000", 9), Some(100));
    }

    #[test]
    fn rejects_unrepresentable_and_garbage() {
        assert_eq!(parse_scaled("0.0000001", 6), None);
        assert_eq!(parse_scaled("", 6), None);
        assert_eq!(parse_scaled(".5", 6), None);
        assert_eq!(parse_scaled("1.", 6), None);
        assert_eq!(parse_scaled("1.2.3", 6), None);
        assert_eq!(parse_scaled("1e3", 6), None);
        assert_eq!(parse_scaled(" 1", 6), None);
        assert_eq!(parse_scaled("99999999999999999999", 6), None);
    }

    #[test]
    fn accepts_trailing_zeros_past_resolution() {
        assert_eq!(parse_scaled("0.1000000", 6), Some(100_000));
    }

    #[test]
    fn formats_trimmed() {
        assert_eq!(format_scaled(100_000, 6), "0.1");
        assert_eq!(format_scaled(-1, 6), "-0.000001");
        assert_eq!(format_scaled(5_000_000, 6), "5");
        assert_eq!(format_scaled(0, 6), "0");
        assert_eq!(format_scaled(1_234_567, 6), "1.234567");
    }
}

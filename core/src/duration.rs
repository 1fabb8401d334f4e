//! Compact duration parsing.
//!
//! Accepts strings of the form `<N>h<N>m<N>s` where every segment is
//! optional but the order is fixed and each unit appears at most once.
//! `"1h2m10s"`, `"90s"` and `"2m"` are all valid; `"1m1h"`, `"10"` and
//! `"abc"` are not.

/// Parse a compact duration string into total seconds.
///
/// Returns `None` for anything malformed: stray characters, digits
/// without a unit, out-of-order or repeated units, empty input.
///
/// `"0s"` (and friends) parse to `Some(0)`. Callers must reject a zero
/// total exactly like `None` - a zero-second giveaway is meaningless, so
/// zero is always invalid regardless of why it is zero.
pub fn parse_duration(input: &str) -> Option<u64> {
    const UNITS: [(u8, u64); 3] = [(b'h', 3600), (b'm', 60), (b's', 1)];

    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    let bytes = s.as_bytes();
    let mut total: u64 = 0;
    let mut i = 0;
    // Index into UNITS; only units at or after this position may still
    // appear, which enforces h-then-m-then-s and rejects repeats.
    let mut next_unit = 0;

    while i < bytes.len() {
        let digits_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if digits_start == i {
            return None; // unit with no digits, or garbage character
        }
        let value: u64 = s[digits_start..i].parse().ok()?;

        let suffix = *bytes.get(i)?; // trailing digits with no unit
        i += 1;

        let pos = UNITS[next_unit..].iter().position(|&(u, _)| u == suffix)?;
        let multiplier = UNITS[next_unit + pos].1;
        next_unit += pos + 1;

        total = total.checked_add(value.checked_mul(multiplier)?)?;
    }

    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_form() {
        // 1*3600 + 2*60 + 10
        assert_eq!(parse_duration("1h2m10s"), Some(3730));
        assert_eq!(parse_duration("1h2m12s"), Some(3732));
    }

    #[test]
    fn test_single_segments() {
        assert_eq!(parse_duration("90s"), Some(90));
        assert_eq!(parse_duration("2m"), Some(120));
        assert_eq!(parse_duration("1h"), Some(3600));
    }

    #[test]
    fn test_partial_combinations() {
        assert_eq!(parse_duration("1h30s"), Some(3630));
        assert_eq!(parse_duration("5m5s"), Some(305));
    }

    #[test]
    fn test_zero_parses_but_is_zero() {
        // The caller is responsible for rejecting zero.
        assert_eq!(parse_duration("0s"), Some(0));
        assert_eq!(parse_duration("0h0m0s"), Some(0));
    }

    #[test]
    fn test_malformed_inputs() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("abc"), None);
        assert_eq!(parse_duration("10"), None); // digits without a unit
        assert_eq!(parse_duration("h"), None); // unit without digits
        assert_eq!(parse_duration("1m1h"), None); // order violation
        assert_eq!(parse_duration("1s1s"), None); // repeated unit
        assert_eq!(parse_duration("1h2m10s!"), None); // trailing garbage
        assert_eq!(parse_duration("1d"), None); // unknown unit
    }

    #[test]
    fn test_overflow_rejected() {
        assert_eq!(parse_duration("99999999999999999999h"), None);
    }
}

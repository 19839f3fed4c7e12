//! Output comparison for judged answers.

/// Absolute tolerance for real-number tokens.
pub const EPS: f64 = 1e-6;

/// Byte-for-byte equality of the whole output.
pub fn is_exact(answer: &str, output: &str) -> bool {
    answer.as_bytes() == output.as_bytes()
}

/// Whitespace-tokenized comparison.
///
/// Integer tokens must be equal exactly, real-number tokens within [`EPS`],
/// anything else must match literally.
pub fn tolerant_eq(answer: &str, output: &str) -> bool {
    let answer_tokens: Vec<_> = answer.split_whitespace().collect();
    let output_tokens: Vec<_> = output.split_whitespace().collect();
    if answer_tokens.len() != output_tokens.len() {
        return false;
    }
    answer_tokens
        .iter()
        .zip(&output_tokens)
        .all(|(a, b)| token_eq(a, b))
}

fn token_eq(a: &str, b: &str) -> bool {
    if let (Some(x), Some(y)) = (Integer::parse(a), Integer::parse(b)) {
        return x == y;
    }
    if let (Ok(x), Ok(y)) = (a.parse::<f64>(), b.parse::<f64>()) {
        return (x - y).abs() < EPS;
    }
    a == b
}

/// Arbitrary-precision integer token, normalized for equality.
#[derive(Debug, PartialEq, Eq)]
struct Integer<'a> {
    negative: bool,
    /// without leading zeros; empty for zero
    digits: &'a str,
}

impl<'a> Integer<'a> {
    fn parse(s: &'a str) -> Option<Self> {
        let (negative, body) = match s.as_bytes().first()? {
            b'-' => (true, &s[1..]),
            b'+' => (false, &s[1..]),
            _ => (false, s),
        };
        if body.is_empty() || !body.bytes().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let digits = body.trim_start_matches('0');
        Some(Self {
            negative: negative && !digits.is_empty(),
            digits,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn integer_tokens_are_exact() {
        assert!(tolerant_eq("5", "5"));
        assert!(!tolerant_eq("5", "6"));
        assert!(tolerant_eq("-0", "0"));
        assert!(tolerant_eq("007", "7"));
        assert!(tolerant_eq("+42", "42"));
        // beyond i128, no tolerance
        assert!(!tolerant_eq(
            "1000000000000000000000000000000000000001",
            "1000000000000000000000000000000000000000"
        ));
        assert!(tolerant_eq(
            "-123456789012345678901234567890123456789012",
            "-123456789012345678901234567890123456789012"
        ));
    }

    #[test]
    fn integer_and_real_use_tolerance() {
        assert!(tolerant_eq("5", "5.0"));
        assert!(tolerant_eq("5.0", "5"));
    }

    #[test]
    fn real_tolerance_boundary() {
        assert!(tolerant_eq("1.000000", "1.0000005"));
        assert!(!tolerant_eq("1.0", "1.1"));
        assert!(!tolerant_eq("0.0", "0.000002"));
        assert!(tolerant_eq("9", "9.0000001"));
        assert!(tolerant_eq("1e-7", "0"));
    }

    #[test]
    fn nan_never_matches() {
        assert!(!tolerant_eq("nan", "nan"));
        assert!(!tolerant_eq("1.5", "NaN"));
    }

    #[test]
    fn token_count_mismatch() {
        assert!(!tolerant_eq("1 2", "1 2 3"));
        assert!(!tolerant_eq("", "0"));
        assert!(tolerant_eq("", "  \n"));
    }

    #[test]
    fn literal_tokens_are_case_sensitive() {
        assert!(tolerant_eq("YES", "YES"));
        assert!(!tolerant_eq("YES", "yes"));
        assert!(!tolerant_eq("-", "+"));
    }

    #[test]
    fn whitespace_layout_is_ignored() {
        assert!(tolerant_eq("1 2\n3\n", "1\n2 3"));
        assert!(tolerant_eq("YES\n", "YES"));
        assert!(!is_exact("YES\n", "YES"));
    }

    #[test]
    fn exact_is_bytewise() {
        assert!(is_exact("9\n", "9\n"));
        assert!(!is_exact("9\n", "9\r\n"));
        assert!(!is_exact("1.0\n", "1.00\n"));
    }
}

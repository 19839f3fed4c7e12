use std::time::Duration;

use super::compare;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub verdict: Verdict,
    pub output: String,
    /// `None` if the process was terminated by a signal
    pub status: Option<i32>,
    pub execution_time: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display)]
pub enum Verdict {
    /// Byte-for-byte identical output
    #[strum(serialize = "EX")]
    Exact,
    /// Equal under token-wise comparison with float tolerance
    #[strum(serialize = "AC")]
    Accepted,
    #[strum(serialize = "WA")]
    WrongAnswer,
    #[strum(serialize = "RE")]
    RuntimeError,
}

impl Verdict {
    /// `Exact` is a special case of `Accepted`.
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Exact | Self::Accepted)
    }
}

/// Decide the verdict of a single run.
///
/// An abnormal exit wins over any output; exact output wins over tolerant match.
pub fn classify(exited_normally: bool, answer: &str, output: &str) -> Verdict {
    if !exited_normally {
        Verdict::RuntimeError
    } else if compare::is_exact(answer, output) {
        Verdict::Exact
    } else if compare::tolerant_eq(answer, output) {
        Verdict::Accepted
    } else {
        Verdict::WrongAnswer
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn runtime_error_has_top_precedence() {
        assert_eq!(classify(false, "9\n", "9\n"), Verdict::RuntimeError);
        assert_eq!(classify(false, "9\n", "8\n"), Verdict::RuntimeError);
    }

    #[test]
    fn exact_before_accepted() {
        assert_eq!(classify(true, "1.5\n", "1.5\n"), Verdict::Exact);
        assert_eq!(classify(true, "1.5\n", "1.5000001\n"), Verdict::Accepted);
        assert_eq!(classify(true, "1.5\n", "1.5"), Verdict::Accepted);
        assert_eq!(classify(true, "1.5\n", "1.6\n"), Verdict::WrongAnswer);
    }

    #[test]
    fn exact_implies_accepted() {
        assert!(Verdict::Exact.is_accepted());
        assert!(Verdict::Accepted.is_accepted());
        assert!(!Verdict::WrongAnswer.is_accepted());
        assert!(!Verdict::RuntimeError.is_accepted());
    }

    #[test]
    fn display_short_code() {
        assert_eq!(Verdict::Exact.to_string(), "EX");
        assert_eq!(Verdict::RuntimeError.to_string(), "RE");
    }
}

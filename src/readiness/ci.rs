//! CI confidence scoring from check tallies.

use crate::github::CheckTally;

/// Computes a 0-100 CI confidence score from check counts.
///
/// With no checks configured the score is 100: absence of CI is treated as
/// passing, not as failure. Otherwise the pass rate earns points while
/// failures and skips subtract, failures far more heavily:
///
/// ```text
/// clamp(0, 100, pass_rate * 100 - fail_rate * 80 - skip_rate * 20)
/// ```
pub fn ci_confidence(checks: &CheckTally) -> f64 {
    let total = checks.total();
    if total == 0 {
        return 100.0;
    }

    let total = f64::from(total);
    let pass_rate = f64::from(checks.passed) / total;
    let fail_rate = f64::from(checks.failed) / total;
    let skip_rate = f64::from(checks.skipped) / total;

    (pass_rate * 100.0 - fail_rate * 80.0 - skip_rate * 20.0).clamp(0.0, 100.0)
}

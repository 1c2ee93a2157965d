//! The outcome of evaluating an observation.

use std::fmt::Display;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// Seeding verdict.
///
/// The tags render and parse exactly as they appear in reports, e.g. `APPROVED_DRONE`.
///
/// # Examples
///
/// ```rust
/// use cloud_seeding::Verdict;
///
/// assert_eq!(Verdict::ApprovedMixed.to_string(), "APPROVED_MIXED");
/// assert_eq!("CONDITIONAL".parse::<Verdict>().unwrap(), Verdict::Conditional);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumString, IntoStaticStr,
)]
pub enum Verdict {
    /// Seeding should not be attempted.
    #[strum(serialize = "DENIED")]
    Denied,
    /// Seed with drones.
    #[strum(serialize = "APPROVED_DRONE")]
    ApprovedDrone,
    /// Seed with aircraft.
    #[strum(serialize = "APPROVED_AIRCRAFT")]
    ApprovedAircraft,
    /// Either platform will work.
    #[strum(serialize = "APPROVED_MIXED")]
    ApprovedMixed,
    /// Not ideal, but may be worth seeding after reviewing the notes.
    #[strum(serialize = "CONDITIONAL")]
    Conditional,
}

impl Verdict {
    /// The report tag for this verdict.
    #[inline]
    pub fn tag(self) -> &'static str {
        self.into()
    }

    /// True for the three approval verdicts.
    #[inline]
    pub fn is_approved(self) -> bool {
        use Verdict::*;

        matches!(self, ApprovedDrone | ApprovedAircraft | ApprovedMixed)
    }
}

impl Display for Verdict {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str(self.tag())
    }
}

/// A verdict along with the reason it was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    verdict: Verdict,
    reason: String,
}

impl Decision {
    /// Create a new decision.
    pub fn new<S: Into<String>>(verdict: Verdict, reason: S) -> Self {
        Decision {
            verdict,
            reason: reason.into(),
        }
    }

    /// The verdict.
    #[inline]
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Human readable justification. For conditional verdicts this is every applicable note
    /// joined with `" | "`.
    #[inline]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Split into the verdict and reason.
    #[inline]
    pub fn into_parts(self) -> (Verdict, String) {
        (self.verdict, self.reason)
    }
}

impl Display for Decision {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(formatter, "DECISION: {}", self.verdict)?;
        write!(formatter, "REASON: {}", self.reason)
    }
}

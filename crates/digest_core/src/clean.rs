use crate::record::MovieRecord;

/// Minimum rating a record needs to survive cleaning. The observed
/// chart floor; configurable through [`CleanPolicy`], not meant to be
/// changed casually.
pub const MIN_RATING_FLOOR: f64 = 6.0;

/// Admission policy applied by [`clean`].
#[derive(Debug, Clone, PartialEq)]
pub struct CleanPolicy {
    pub min_rating: f64,
}

impl Default for CleanPolicy {
    fn default() -> Self {
        Self {
            min_rating: MIN_RATING_FLOOR,
        }
    }
}

/// Result of a cleaning pass: the surviving records in their original
/// order, plus how many were rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanOutcome {
    pub kept: Vec<MovieRecord>,
    pub dropped: usize,
}

/// Order-preserving quality filter. Dropping a record is an expected
/// outcome, not an error; the count is returned so callers can report it.
pub fn clean(records: Vec<MovieRecord>, policy: &CleanPolicy) -> CleanOutcome {
    let total = records.len();
    let kept: Vec<MovieRecord> = records
        .into_iter()
        .filter(|record| record.rating >= policy.min_rating)
        .collect();
    let dropped = total - kept.len();
    CleanOutcome { kept, dropped }
}

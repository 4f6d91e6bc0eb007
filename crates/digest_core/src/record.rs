/// Title sentinel used when a fragment carries no extractable title.
pub const UNKNOWN_TITLE: &str = "unknown title";
/// Release-year sentinel used when no four-digit year is found.
pub const UNKNOWN_YEAR: &str = "unknown";
/// Quote sentinel used when an item has no highlight quote.
pub const NO_QUOTE: &str = "no quote";

/// Where and when a chart run collected its records.
///
/// Built once at the process boundary and stamped onto every record;
/// the engine never reads the clock or the environment itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    pub source_label: String,
    pub collected_at: String,
}

/// One chart item after extraction: structured, partially defaulted.
///
/// Missing or malformed source fields are replaced by the documented
/// sentinels (`UNKNOWN_TITLE`, `0.0`, `0`, `UNKNOWN_YEAR`, `NO_QUOTE`)
/// instead of failing the item. Immutable once cleaned.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRecord {
    /// 1-based position in the original chart sequence.
    pub rank: u32,
    pub title: String,
    /// Rating in [0.0, 10.0]; 0.0 when missing or unparseable.
    pub rating: f64,
    pub vote_count: u64,
    pub release_year: String,
    pub highlight_quote: String,
    pub source_label: String,
    pub collected_at: String,
}

impl MovieRecord {
    /// A record composed entirely of sentinels, for fragments that
    /// yield nothing parseable. Rank and provenance are still real.
    pub fn sentinel(rank: u32, provenance: &Provenance) -> Self {
        Self {
            rank,
            title: UNKNOWN_TITLE.to_string(),
            rating: 0.0,
            vote_count: 0,
            release_year: UNKNOWN_YEAR.to_string(),
            highlight_quote: NO_QUOTE.to_string(),
            source_label: provenance.source_label.clone(),
            collected_at: provenance.collected_at.clone(),
        }
    }
}

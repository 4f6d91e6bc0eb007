use crate::enrich::EnrichedRecord;
use crate::tier::{PopularityTier, RatingTier};

/// Dataset-wide statistics over an enriched record sequence.
///
/// The empty dataset is well defined: `count == 0`, numeric statistics
/// are 0, distributions carry all four labels with zero counts, and the
/// superlatives and year range are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub rating_min: f64,
    pub rating_max: f64,
    pub rating_mean: f64,
    pub total_votes: u64,
    /// Lexicographic min/max of `release_year`; the `"unknown"` sentinel
    /// sorts after four-digit years, which matches the source tooling.
    pub year_range: Option<(String, String)>,
    /// All four rating tiers in bin order, zeros included.
    pub rating_tiers: Vec<(RatingTier, usize)>,
    /// All four popularity tiers in bin order, zeros included.
    pub popularity_tiers: Vec<(PopularityTier, usize)>,
    /// Highest popularity index, first occurrence winning ties.
    pub best_overall: Option<EnrichedRecord>,
    /// Highest rating, first occurrence winning ties.
    pub highest_rated: Option<EnrichedRecord>,
    /// Highest vote count, first occurrence winning ties.
    pub most_voted: Option<EnrichedRecord>,
}

/// Computes the summary in one pass over the sequence plus one scan per
/// superlative. Never divides by zero on empty input.
pub fn summarize(records: &[EnrichedRecord]) -> Summary {
    let count = records.len();

    let mut rating_min = 0.0;
    let mut rating_max = 0.0;
    let mut rating_mean = 0.0;
    if let Some(first) = records.first() {
        rating_min = first.record.rating;
        rating_max = first.record.rating;
        let mut sum = 0.0;
        for record in records {
            let rating = record.record.rating;
            rating_min = rating_min.min(rating);
            rating_max = rating_max.max(rating);
            sum += rating;
        }
        rating_mean = sum / count as f64;
    }

    let total_votes = records.iter().map(|r| r.record.vote_count).sum();

    let year_range = records
        .iter()
        .map(|r| r.record.release_year.as_str())
        .fold(None::<(&str, &str)>, |range, year| match range {
            None => Some((year, year)),
            Some((min, max)) => Some((min.min(year), max.max(year))),
        })
        .map(|(min, max)| (min.to_string(), max.to_string()));

    let rating_tiers = RatingTier::ALL
        .into_iter()
        .map(|tier| {
            let n = records.iter().filter(|r| r.rating_tier == tier).count();
            (tier, n)
        })
        .collect();

    let popularity_tiers = PopularityTier::ALL
        .into_iter()
        .map(|tier| {
            let n = records.iter().filter(|r| r.popularity_tier == tier).count();
            (tier, n)
        })
        .collect();

    Summary {
        count,
        rating_min,
        rating_max,
        rating_mean,
        total_votes,
        year_range,
        rating_tiers,
        popularity_tiers,
        best_overall: leader(records, |r| r.popularity_index).cloned(),
        highest_rated: leader(records, |r| r.record.rating).cloned(),
        most_voted: leader(records, |r| r.record.vote_count).cloned(),
    }
}

// Strict `>` keeps the first record on ties, so the superlative is
// stable under re-runs over the same sequence.
fn leader<K, F>(records: &[EnrichedRecord], key: F) -> Option<&EnrichedRecord>
where
    K: PartialOrd,
    F: Fn(&EnrichedRecord) -> K,
{
    let mut best: Option<(K, &EnrichedRecord)> = None;
    for record in records {
        let candidate = key(record);
        let replace = match &best {
            Some((current, _)) => candidate > *current,
            None => true,
        };
        if replace {
            best = Some((candidate, record));
        }
    }
    best.map(|(_, record)| record)
}

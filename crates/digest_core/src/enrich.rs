use crate::record::MovieRecord;
use crate::tier::{PopularityTier, RatingTier};

const RATING_WEIGHT: f64 = 0.7;
const VOTE_WEIGHT: f64 = 0.3;
const VOTE_SCALE: f64 = 1_000_000.0;

/// A record plus its derived, read-only analytics fields.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub record: MovieRecord,
    pub rating_tier: RatingTier,
    pub popularity_tier: PopularityTier,
    pub popularity_index: f64,
}

/// Composite score blending quality and engagement:
/// `rating * 0.7 + (votes / 1_000_000) * 0.3`, rounded to two decimal
/// places, half away from zero.
pub fn popularity_index(rating: f64, vote_count: u64) -> f64 {
    let blended = rating * RATING_WEIGHT + (vote_count as f64 / VOTE_SCALE) * VOTE_WEIGHT;
    (blended * 100.0).round() / 100.0
}

/// Attaches the derived fields to a record. Pure and total: the output
/// depends only on `rating` and `vote_count`, so enriching the same base
/// record twice yields identical tiers and index.
pub fn enrich(record: MovieRecord) -> EnrichedRecord {
    let rating_tier = RatingTier::from_rating(record.rating);
    let popularity_tier = PopularityTier::from_votes(record.vote_count);
    let popularity_index = popularity_index(record.rating, record.vote_count);
    EnrichedRecord {
        record,
        rating_tier,
        popularity_tier,
        popularity_index,
    }
}

/// Enriches a whole sequence, preserving order.
pub fn enrich_all(records: Vec<MovieRecord>) -> Vec<EnrichedRecord> {
    records.into_iter().map(enrich).collect()
}

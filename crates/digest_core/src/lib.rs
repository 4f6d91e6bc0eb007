//! Film chart domain: records, tier taxonomy and dataset statistics.
//!
//! Everything here is pure and I/O-free; fetching, markup parsing and
//! persistence live in `digest_engine`.
mod clean;
mod enrich;
mod record;
mod summary;
mod tier;

pub use clean::{clean, CleanOutcome, CleanPolicy, MIN_RATING_FLOOR};
pub use enrich::{enrich, enrich_all, popularity_index, EnrichedRecord};
pub use record::{MovieRecord, Provenance, NO_QUOTE, UNKNOWN_TITLE, UNKNOWN_YEAR};
pub use summary::{summarize, Summary};
pub use tier::{PopularityTier, RatingTier, UnknownTierLabel};

use std::fmt;
use std::str::FromStr;

/// Quality tier derived from a record's rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingTier {
    Good,
    Excellent,
    Classic,
    Masterpiece,
}

/// Engagement tier derived from a record's vote count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopularityTier {
    Niche,
    Popular,
    VeryHot,
    Phenomenal,
}

// Bins are upper-inclusive and scanned top-down; the last tier absorbs
// everything above the final breakpoint. Breakpoints are the observed
// chart constants, kept as one table per taxonomy.
const RATING_BINS: [(f64, RatingTier); 3] = [
    (8.5, RatingTier::Good),
    (9.0, RatingTier::Excellent),
    (9.5, RatingTier::Classic),
];

const POPULARITY_BINS: [(u64, PopularityTier); 3] = [
    (100_000, PopularityTier::Niche),
    (500_000, PopularityTier::Popular),
    (1_000_000, PopularityTier::VeryHot),
];

impl RatingTier {
    /// All tiers in ascending bin order. Distribution output iterates
    /// this so empty tiers still appear with a zero count.
    pub const ALL: [RatingTier; 4] = [
        RatingTier::Good,
        RatingTier::Excellent,
        RatingTier::Classic,
        RatingTier::Masterpiece,
    ];

    /// Maps a rating to its tier. Total over f64: anything at or below
    /// the first breakpoint (including the 0.0 sentinel) is `Good`, a
    /// boundary value belongs to the bin it closes (9.5 is `Classic`).
    pub fn from_rating(rating: f64) -> Self {
        for (upper, tier) in RATING_BINS {
            if rating <= upper {
                return tier;
            }
        }
        RatingTier::Masterpiece
    }

    fn label(self) -> &'static str {
        match self {
            RatingTier::Good => "Good",
            RatingTier::Excellent => "Excellent",
            RatingTier::Classic => "Classic",
            RatingTier::Masterpiece => "Masterpiece",
        }
    }
}

impl PopularityTier {
    /// All tiers in ascending bin order.
    pub const ALL: [PopularityTier; 4] = [
        PopularityTier::Niche,
        PopularityTier::Popular,
        PopularityTier::VeryHot,
        PopularityTier::Phenomenal,
    ];

    /// Maps a vote count to its tier; boundary counts close their bin
    /// (exactly 1_000_000 votes is `VeryHot`, one more is `Phenomenal`).
    pub fn from_votes(votes: u64) -> Self {
        for (upper, tier) in POPULARITY_BINS {
            if votes <= upper {
                return tier;
            }
        }
        PopularityTier::Phenomenal
    }

    fn label(self) -> &'static str {
        match self {
            PopularityTier::Niche => "Niche",
            PopularityTier::Popular => "Popular",
            PopularityTier::VeryHot => "VeryHot",
            PopularityTier::Phenomenal => "Phenomenal",
        }
    }
}

impl fmt::Display for RatingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for PopularityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for tier labels that match no known variant, e.g. when
/// re-importing a hand-edited table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTierLabel(pub String);

impl fmt::Display for UnknownTierLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown tier label `{}`", self.0)
    }
}

impl std::error::Error for UnknownTierLabel {}

impl FromStr for RatingTier {
    type Err = UnknownTierLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RatingTier::ALL
            .into_iter()
            .find(|tier| tier.label() == s)
            .ok_or_else(|| UnknownTierLabel(s.to_string()))
    }
}

impl FromStr for PopularityTier {
    type Err = UnknownTierLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PopularityTier::ALL
            .into_iter()
            .find(|tier| tier.label() == s)
            .ok_or_else(|| UnknownTierLabel(s.to_string()))
    }
}

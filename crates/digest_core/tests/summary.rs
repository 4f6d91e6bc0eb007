use digest_core::{
    enrich_all, summarize, EnrichedRecord, MovieRecord, PopularityTier, Provenance, RatingTier,
};

fn init_logging() {
    digest_logging::initialize_for_tests();
}

fn record(rank: u32, title: &str, rating: f64, votes: u64, year: &str) -> MovieRecord {
    MovieRecord {
        title: title.to_string(),
        rating,
        vote_count: votes,
        release_year: year.to_string(),
        ..MovieRecord::sentinel(
            rank,
            &Provenance {
                source_label: "Test Chart".to_string(),
                collected_at: "2024-01-01 00:00:00".to_string(),
            },
        )
    }
}

fn enriched(entries: &[(&str, f64, u64, &str)]) -> Vec<EnrichedRecord> {
    let records = entries
        .iter()
        .enumerate()
        .map(|(idx, (title, rating, votes, year))| {
            record(idx as u32 + 1, title, *rating, *votes, year)
        })
        .collect();
    enrich_all(records)
}

#[test]
fn empty_input_yields_neutral_summary() {
    init_logging();
    let summary = summarize(&[]);

    assert_eq!(summary.count, 0);
    assert_eq!(summary.rating_min, 0.0);
    assert_eq!(summary.rating_max, 0.0);
    assert_eq!(summary.rating_mean, 0.0);
    assert_eq!(summary.total_votes, 0);
    assert_eq!(summary.year_range, None);
    assert!(summary.best_overall.is_none());
    assert!(summary.highest_rated.is_none());
    assert!(summary.most_voted.is_none());

    assert_eq!(summary.rating_tiers.len(), 4);
    assert!(summary.rating_tiers.iter().all(|(_, n)| *n == 0));
    assert_eq!(summary.popularity_tiers.len(), 4);
    assert!(summary.popularity_tiers.iter().all(|(_, n)| *n == 0));
}

#[test]
fn statistics_match_cleaned_scenario() {
    init_logging();
    // The two survivors of the [9.8, 7.0, 5.5] cleaning scenario.
    let records = enriched(&[
        ("first", 9.8, 2_000_000, "1994"),
        ("second", 7.0, 300_000, "2010"),
    ]);
    let summary = summarize(&records);

    assert_eq!(summary.count, 2);
    assert_eq!(summary.rating_min, 7.0);
    assert_eq!(summary.rating_max, 9.8);
    assert!((summary.rating_mean - 8.4).abs() < 1e-9);
    assert_eq!(summary.total_votes, 2_300_000);
    assert_eq!(
        summary.year_range,
        Some(("1994".to_string(), "2010".to_string()))
    );
}

#[test]
fn distributions_enumerate_all_four_labels() {
    init_logging();
    let records = enriched(&[
        ("first", 9.8, 2_000_000, "1994"),
        ("second", 7.0, 300_000, "2010"),
    ]);
    let summary = summarize(&records);

    assert_eq!(
        summary.rating_tiers,
        vec![
            (RatingTier::Good, 1),
            (RatingTier::Excellent, 0),
            (RatingTier::Classic, 0),
            (RatingTier::Masterpiece, 1),
        ]
    );
    assert_eq!(
        summary.popularity_tiers,
        vec![
            (PopularityTier::Niche, 0),
            (PopularityTier::Popular, 1),
            (PopularityTier::VeryHot, 0),
            (PopularityTier::Phenomenal, 1),
        ]
    );
}

#[test]
fn superlatives_pick_the_maxima() {
    init_logging();
    let records = enriched(&[
        ("widely seen", 8.7, 3_000_000, "1999"),
        ("critics pick", 9.9, 120_000, "1954"),
        ("middle", 9.0, 900_000, "1980"),
    ]);
    let summary = summarize(&records);

    // 9.9 * 0.7 + 0.12 * 0.3 = 6.966 -> 6.97
    // 8.7 * 0.7 + 3.0 * 0.3 = 6.99 (highest index)
    let best = summary.best_overall.unwrap();
    assert_eq!(best.record.title, "widely seen");
    assert_eq!(best.popularity_index, 6.99);
    assert_eq!(summary.highest_rated.unwrap().record.title, "critics pick");
    assert_eq!(summary.most_voted.unwrap().record.title, "widely seen");
}

#[test]
fn ties_resolve_to_the_first_record_in_sequence() {
    init_logging();
    let records = enriched(&[
        ("earlier", 9.0, 700_000, "1990"),
        ("later", 9.0, 700_000, "1991"),
    ]);
    let summary = summarize(&records);

    assert_eq!(summary.best_overall.unwrap().record.title, "earlier");
    assert_eq!(summary.highest_rated.unwrap().record.title, "earlier");
    assert_eq!(summary.most_voted.unwrap().record.title, "earlier");
}

#[test]
fn unknown_year_sentinel_sorts_to_range_end() {
    init_logging();
    let records = enriched(&[
        ("dated", 8.8, 10_000, "1994"),
        ("undated", 8.9, 10_000, "unknown"),
    ]);
    let summary = summarize(&records);

    assert_eq!(
        summary.year_range,
        Some(("1994".to_string(), "unknown".to_string()))
    );
}

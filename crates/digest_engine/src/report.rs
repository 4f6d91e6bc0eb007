use std::path::PathBuf;

use digest_core::Summary;

use crate::persist::{AtomicFileWriter, PersistError};

/// Boundary-supplied report inputs: the wall-clock stamp and who ran
/// the analysis. Neither is read from the ambient environment here.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub generated_at: String,
    pub analyst: Option<String>,
}

const RULE: &str = "==================================================";
const SECTION_RULE: &str = "==============";

/// Renders the fixed-template text report. Pure formatting over the
/// summary; an empty dataset renders `n/a` lines instead of failing.
pub fn render_report(summary: &Summary, context: &ReportContext) -> String {
    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');
    out.push_str("Film Chart Digest Report\n");
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("Generated: {}\n", context.generated_at));
    out.push_str(&format!(
        "Analyst: {}\n",
        context.analyst.as_deref().unwrap_or("n/a")
    ));
    out.push('\n');

    out.push_str("Overview\n");
    out.push_str(SECTION_RULE);
    out.push('\n');
    out.push_str(&format!("Records analyzed: {}\n", summary.count));
    match &summary.year_range {
        Some((first, last)) => out.push_str(&format!("Year range: {first} - {last}\n")),
        None => out.push_str("Year range: n/a\n"),
    }
    out.push_str(&format!(
        "Rating min/max/mean: {:.1} / {:.1} / {:.2}\n",
        summary.rating_min, summary.rating_max, summary.rating_mean
    ));
    out.push_str(&format!(
        "Total votes: {}\n",
        group_thousands(summary.total_votes)
    ));
    out.push('\n');

    out.push_str("Top picks\n");
    out.push_str(SECTION_RULE);
    out.push('\n');
    match &summary.best_overall {
        Some(best) => out.push_str(&format!(
            "Best overall: {} (rating {:.1}, popularity index {:.2})\n",
            best.record.title, best.record.rating, best.popularity_index
        )),
        None => out.push_str("Best overall: n/a\n"),
    }
    match &summary.highest_rated {
        Some(top) => out.push_str(&format!(
            "Highest rated: {} (rating {:.1})\n",
            top.record.title, top.record.rating
        )),
        None => out.push_str("Highest rated: n/a\n"),
    }
    match &summary.most_voted {
        Some(popular) => out.push_str(&format!(
            "Most voted: {} ({} votes)\n",
            popular.record.title,
            group_thousands(popular.record.vote_count)
        )),
        None => out.push_str("Most voted: n/a\n"),
    }
    out.push('\n');

    out.push_str("Rating tiers\n");
    out.push_str(SECTION_RULE);
    out.push('\n');
    for (tier, count) in &summary.rating_tiers {
        out.push_str(&format!("{tier}: {count}\n"));
    }
    out.push('\n');

    out.push_str("Popularity tiers\n");
    out.push_str(SECTION_RULE);
    out.push('\n');
    for (tier, count) in &summary.popularity_tiers {
        out.push_str(&format!("{tier}: {count}\n"));
    }

    out
}

/// Writes the rendered report next to the CSV through the same atomic
/// writer.
pub fn write_report(
    writer: &AtomicFileWriter,
    filename: &str,
    report: &str,
) -> Result<PathBuf, PersistError> {
    writer.write(filename, report.as_bytes())
}

/// Display-only digit grouping; persisted CSV fields never use it.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

use digest_core::{MovieRecord, Provenance};
use digest_logging::digest_debug;
use scraper::{Html, Selector};

use crate::page::{CompiledSchema, ItemFragment};

/// Best-effort field extraction over one item fragment.
///
/// Every field access degrades to the record's sentinel instead of
/// failing, so a mangled fragment costs data quality, never the run.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    schema: CompiledSchema,
}

impl FieldExtractor {
    pub fn new(schema: CompiledSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &CompiledSchema {
        &self.schema
    }

    pub fn extract(&self, fragment: &ItemFragment, provenance: &Provenance) -> MovieRecord {
        let doc = Html::parse_fragment(&fragment.html);
        let mut record = MovieRecord::sentinel(fragment.position, provenance);

        if let Some(title) = first_text(&doc, &self.schema.title) {
            record.title = title;
        }

        if let Some(rating) = first_text(&doc, &self.schema.rating)
            .and_then(|text| text.parse::<f64>().ok())
            .filter(|value| value.is_finite() && (0.0..=10.0).contains(value))
        {
            record.rating = rating;
        }

        if let Some(votes) = doc
            .select(&self.schema.votes)
            .map(|node| node.text().collect::<String>())
            .find(|text| text.contains(&self.schema.votes_marker))
            .and_then(|text| embedded_number(&text))
        {
            record.vote_count = votes;
        }

        if let Some(year) = first_text(&doc, &self.schema.info).and_then(|text| year_run(&text)) {
            record.release_year = year;
        }

        if let Some(quote) = first_text(&doc, &self.schema.quote) {
            record.highlight_quote = quote;
        }

        if record == MovieRecord::sentinel(fragment.position, provenance) {
            digest_debug!(
                "fragment {} yielded no extractable fields",
                fragment.position
            );
        }

        record
    }

    /// Extracts every fragment, preserving page order.
    pub fn extract_all(
        &self,
        fragments: &[ItemFragment],
        provenance: &Provenance,
    ) -> Vec<MovieRecord> {
        fragments
            .iter()
            .map(|fragment| self.extract(fragment, provenance))
            .collect()
    }
}

fn first_text(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector)
        .next()
        .map(|node| node.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

/// First run of decimal digits anywhere in `text`, for counts embedded
/// in prose like `1234567人评价`. `None` when there are no digits or
/// the run overflows `u64`.
fn embedded_number(text: &str) -> Option<u64> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// First four consecutive decimal digits in `text`, taken as the
/// release year.
fn year_run(text: &str) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut run = 0;
    for (idx, c) in chars.iter().enumerate() {
        if c.is_ascii_digit() {
            run += 1;
            if run == 4 {
                return Some(chars[idx - 3..=idx].iter().collect());
            }
        } else {
            run = 0;
        }
    }
    None
}

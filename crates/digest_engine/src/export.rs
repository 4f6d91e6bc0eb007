use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_json::json;

use digest_core::{EnrichedRecord, MovieRecord, PopularityTier, RatingTier};

use crate::persist::{ensure_output_dir, AtomicFileWriter, PersistError};

/// Exported column order. Import validates against this exact header.
pub const CSV_HEADER: [&str; 11] = [
    "rank",
    "title",
    "rating",
    "vote_count",
    "release_year",
    "highlight_quote",
    "source_label",
    "collected_at",
    "popularity_tier",
    "rating_tier",
    "popularity_index",
];

/// Byte-order mark prefixed to the CSV so spreadsheet tools pick UTF-8.
pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub csv_filename: String,
    pub report_filename: String,
    pub manifest_filename: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            csv_filename: "movies_enhanced.csv".to_string(),
            report_filename: "analysis_report.txt".to_string(),
            manifest_filename: Some("manifest.json".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub record_count: usize,
    pub dropped_count: usize,
    pub total_votes: u64,
    pub csv_path: PathBuf,
    pub manifest_path: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("unexpected csv header: {found}")]
    HeaderMismatch { found: String },
    #[error("malformed row {row}: {message}")]
    MalformedRow { row: usize, message: String },
}

/// Serializes the enriched sequence as a BOM-prefixed UTF-8 CSV through
/// the atomic writer. The header row is always present, so a zero-record
/// export is BOM plus header.
pub fn export_csv(
    records: &[EnrichedRecord],
    writer: &AtomicFileWriter,
    filename: &str,
) -> Result<PathBuf, ExportError> {
    let mut payload = UTF8_BOM.to_vec();
    {
        let mut table = csv::Writer::from_writer(&mut payload);
        table.write_record(CSV_HEADER)?;
        for enriched in records {
            table.write_record(&csv_row(enriched))?;
        }
        table.flush()?;
    }
    Ok(writer.write(filename, &payload)?)
}

fn csv_row(enriched: &EnrichedRecord) -> [String; 11] {
    let record = &enriched.record;
    [
        record.rank.to_string(),
        record.title.clone(),
        record.rating.to_string(),
        record.vote_count.to_string(),
        record.release_year.clone(),
        record.highlight_quote.clone(),
        record.source_label.clone(),
        record.collected_at.clone(),
        enriched.popularity_tier.to_string(),
        enriched.rating_tier.to_string(),
        enriched.popularity_index.to_string(),
    ]
}

/// Writes the CSV artifact plus the sibling run manifest, returning
/// paths and headline counts.
pub fn export_chart(
    records: &[EnrichedRecord],
    dropped: usize,
    output_dir: &Path,
    options: &ExportOptions,
) -> Result<ExportSummary, ExportError> {
    ensure_output_dir(output_dir)?;
    let writer = AtomicFileWriter::new(output_dir.to_path_buf());
    let csv_path = export_csv(records, &writer, &options.csv_filename)?;
    let total_votes: u64 = records.iter().map(|r| r.record.vote_count).sum();

    let manifest_path = if let Some(name) = options.manifest_filename.as_deref() {
        let manifest = json!({
            "record_count": records.len(),
            "dropped_count": dropped,
            "total_votes": total_votes,
            "files": {
                "csv": options.csv_filename,
                "report": options.report_filename,
            }
        });
        Some(writer.write(name, manifest.to_string().as_bytes())?)
    } else {
        None
    };

    Ok(ExportSummary {
        record_count: records.len(),
        dropped_count: dropped,
        total_votes,
        csv_path,
        manifest_path,
    })
}

/// Re-reads an exported table into enriched records.
///
/// Stored values are taken verbatim; tiers and index are not re-derived,
/// which keeps export -> import -> export byte-identical.
pub fn import_csv(path: &Path) -> Result<Vec<EnrichedRecord>, ExportError> {
    let raw = fs::read(path)?;
    let body = raw.strip_prefix(UTF8_BOM).unwrap_or(raw.as_slice());

    // Flexible so rows with the wrong field count reach the row-level
    // validation below instead of aborting the reader.
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(body);
    {
        let headers = reader.headers()?;
        if headers.iter().ne(CSV_HEADER) {
            return Err(ExportError::HeaderMismatch {
                found: headers.iter().collect::<Vec<_>>().join(","),
            });
        }
    }

    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row?;
        records.push(parse_row(idx + 1, &row)?);
    }
    Ok(records)
}

fn parse_row(row_number: usize, row: &csv::StringRecord) -> Result<EnrichedRecord, ExportError> {
    if row.len() != CSV_HEADER.len() {
        return Err(ExportError::MalformedRow {
            row: row_number,
            message: format!("expected {} fields, found {}", CSV_HEADER.len(), row.len()),
        });
    }
    let field = |idx: usize| row.get(idx).unwrap_or_default();

    Ok(EnrichedRecord {
        record: MovieRecord {
            rank: parse_field(row_number, "rank", field(0))?,
            title: field(1).to_string(),
            rating: parse_field(row_number, "rating", field(2))?,
            vote_count: parse_field(row_number, "vote_count", field(3))?,
            release_year: field(4).to_string(),
            highlight_quote: field(5).to_string(),
            source_label: field(6).to_string(),
            collected_at: field(7).to_string(),
        },
        popularity_tier: parse_field::<PopularityTier>(row_number, "popularity_tier", field(8))?,
        rating_tier: parse_field::<RatingTier>(row_number, "rating_tier", field(9))?,
        popularity_index: parse_field(row_number, "popularity_index", field(10))?,
    })
}

fn parse_field<T>(row_number: usize, name: &str, raw: &str) -> Result<T, ExportError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|err| ExportError::MalformedRow {
        row: row_number,
        message: format!("{name}: {err}"),
    })
}

use std::path::PathBuf;

use digest_core::{clean, enrich_all, summarize, CleanPolicy, Provenance, Summary};
use digest_logging::{digest_debug, digest_info, digest_warn};

use crate::decode::{decode_page, DecodeError};
use crate::export::{export_chart, ExportError, ExportOptions};
use crate::extract::FieldExtractor;
use crate::fetch::{FetchSettings, Fetcher, ProgressSink, ReqwestFetcher};
use crate::page::{split_items, CompiledSchema, PageSchema, SchemaError};
use crate::persist::{AtomicFileWriter, PersistError};
use crate::report::{render_report, write_report, ReportContext};
use crate::types::{FetchError, Stage, StageProgress};

/// The chart the original tooling digests.
pub const DEFAULT_CHART_URL: &str = "https://movie.douban.com/top250";

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub chart_url: String,
    pub output_dir: PathBuf,
    pub provenance: Provenance,
    pub fetch: FetchSettings,
    pub schema: PageSchema,
    pub clean: CleanPolicy,
    pub export: ExportOptions,
    pub report: ReportContext,
}

#[derive(Debug)]
pub struct RunOutcome {
    pub summary: Summary,
    pub kept: usize,
    pub dropped: usize,
    pub csv_path: PathBuf,
    pub report_path: PathBuf,
    pub manifest_path: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
    #[error("persist failed: {0}")]
    Persist(#[from] PersistError),
    #[error("tokio runtime: {0}")]
    Runtime(std::io::Error),
}

/// One fully configured digest run: fetch, decode, split, extract,
/// clean, enrich, summarize, export, report. Strictly sequential; a
/// stage finishes before the next starts.
#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
    extractor: FieldExtractor,
    fetcher: ReqwestFetcher,
}

impl Pipeline {
    /// Validates configuration up front; a selector mistake surfaces
    /// here rather than after a fetch.
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        let schema = CompiledSchema::compile(&config.schema)?;
        let fetcher = ReqwestFetcher::new(config.fetch.clone());
        Ok(Self {
            extractor: FieldExtractor::new(schema),
            fetcher,
            config,
        })
    }

    /// Runs the whole pipeline, blocking until done. The async fetch
    /// runs on a runtime owned by this call.
    pub fn run(&self, sink: &dyn ProgressSink) -> Result<RunOutcome, PipelineError> {
        let runtime = tokio::runtime::Runtime::new().map_err(PipelineError::Runtime)?;

        sink.emit(StageProgress::entering(Stage::Fetching, None));
        digest_info!("fetching chart page {}", self.config.chart_url);
        let fetched = runtime.block_on(self.fetcher.fetch(&self.config.chart_url, sink))?;
        digest_debug!(
            "fetched {} bytes from {}",
            fetched.metadata.byte_len,
            fetched.metadata.final_url
        );

        sink.emit(StageProgress::entering(Stage::Decoding, None));
        let decoded = decode_page(&fetched.bytes, fetched.metadata.content_type.as_deref())?;
        digest_debug!("decoded page as {}", decoded.encoding_label);

        sink.emit(StageProgress::entering(Stage::Extracting, None));
        let fragments = split_items(&decoded.html, self.extractor.schema());
        if fragments.is_empty() {
            digest_warn!("page yielded no item fragments");
        }
        let records = self
            .extractor
            .extract_all(&fragments, &self.config.provenance);
        digest_info!("extracted {} records", records.len());

        sink.emit(StageProgress::entering(Stage::Cleaning, Some(records.len())));
        let outcome = clean(records, &self.config.clean);
        let dropped = outcome.dropped;
        if dropped > 0 {
            digest_info!("dropped {dropped} records below the rating floor");
        }

        sink.emit(StageProgress::entering(
            Stage::Enriching,
            Some(outcome.kept.len()),
        ));
        let enriched = enrich_all(outcome.kept);

        sink.emit(StageProgress::entering(
            Stage::Summarizing,
            Some(enriched.len()),
        ));
        let summary = summarize(&enriched);

        sink.emit(StageProgress::entering(
            Stage::Exporting,
            Some(enriched.len()),
        ));
        let export = export_chart(
            &enriched,
            dropped,
            &self.config.output_dir,
            &self.config.export,
        )?;
        digest_info!("wrote csv {}", export.csv_path.display());

        sink.emit(StageProgress::entering(
            Stage::Reporting,
            Some(enriched.len()),
        ));
        let report = render_report(&summary, &self.config.report);
        let writer = AtomicFileWriter::new(self.config.output_dir.clone());
        let report_path = write_report(&writer, &self.config.export.report_filename, &report)?;
        digest_info!("wrote report {}", report_path.display());

        sink.emit(StageProgress::entering(Stage::Done, Some(enriched.len())));

        Ok(RunOutcome {
            summary,
            kept: enriched.len(),
            dropped,
            csv_path: export.csv_path,
            report_path,
            manifest_path: export.manifest_path,
        })
    }
}

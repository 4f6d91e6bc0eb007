//! Digest engine: fetches a film chart page, decodes and splits it,
//! extracts records, and persists the CSV, report and manifest artifacts.
mod decode;
mod export;
mod extract;
mod fetch;
mod page;
mod persist;
mod pipeline;
mod report;
mod types;

pub use decode::{decode_page, DecodeError, DecodedPage};
pub use export::{
    export_chart, export_csv, import_csv, ExportError, ExportOptions, ExportSummary, CSV_HEADER,
    UTF8_BOM,
};
pub use extract::FieldExtractor;
pub use fetch::{
    ChannelProgressSink, FetchSettings, Fetcher, ProgressSink, ReqwestFetcher, DEFAULT_USER_AGENT,
};
pub use page::{split_items, CompiledSchema, ItemFragment, PageSchema, SchemaError};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use pipeline::{
    Pipeline, PipelineConfig, PipelineError, RunOutcome, DEFAULT_CHART_URL,
};
pub use report::{render_report, write_report, ReportContext};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput, Stage, StageProgress};

use scraper::{Html, Selector};

/// CSS selectors describing where each field lives on the chart page.
/// Defaults match the Douban Top 250 markup.
#[derive(Debug, Clone)]
pub struct PageSchema {
    pub item_selector: String,
    pub title_selector: String,
    pub rating_selector: String,
    /// Candidate elements scanned for the votes marker.
    pub votes_selector: String,
    /// Substring identifying the vote-count element, `人评价` on the
    /// original chart.
    pub votes_marker: String,
    pub info_selector: String,
    pub quote_selector: String,
}

impl Default for PageSchema {
    fn default() -> Self {
        Self {
            item_selector: "div.item".to_string(),
            title_selector: "span.title".to_string(),
            rating_selector: "span.rating_num".to_string(),
            votes_selector: "span".to_string(),
            votes_marker: "人评价".to_string(),
            info_selector: "div.bd p".to_string(),
            quote_selector: "p.quote span".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("invalid selector `{selector}`: {message}")]
    InvalidSelector { selector: String, message: String },
}

/// A schema with its selectors parsed. Compiling up front surfaces a
/// bad selector as a configuration error before any fetch happens.
#[derive(Debug, Clone)]
pub struct CompiledSchema {
    pub(crate) item: Selector,
    pub(crate) title: Selector,
    pub(crate) rating: Selector,
    pub(crate) votes: Selector,
    pub(crate) votes_marker: String,
    pub(crate) info: Selector,
    pub(crate) quote: Selector,
}

impl CompiledSchema {
    pub fn compile(schema: &PageSchema) -> Result<Self, SchemaError> {
        Ok(Self {
            item: parse_selector(&schema.item_selector)?,
            title: parse_selector(&schema.title_selector)?,
            rating: parse_selector(&schema.rating_selector)?,
            votes: parse_selector(&schema.votes_selector)?,
            votes_marker: schema.votes_marker.clone(),
            info: parse_selector(&schema.info_selector)?,
            quote: parse_selector(&schema.quote_selector)?,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector, SchemaError> {
    Selector::parse(selector).map_err(|err| SchemaError::InvalidSelector {
        selector: selector.to_string(),
        message: err.to_string(),
    })
}

/// One chart item's subtree, opaque to everything but the extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFragment {
    /// 1-based position on the page.
    pub position: u32,
    pub html: String,
}

/// Splits a decoded page into per-item fragments. A page with no
/// matching items yields an empty sequence, not an error.
pub fn split_items(html: &str, schema: &CompiledSchema) -> Vec<ItemFragment> {
    let doc = Html::parse_document(html);
    doc.select(&schema.item)
        .enumerate()
        .map(|(idx, node)| ItemFragment {
            position: idx as u32 + 1,
            html: node.html(),
        })
        .collect()
}

pub mod json;
pub mod operators;
pub mod text;

use serde::{Deserialize, Serialize};

use crate::error::DagridError;
use operators::Operator;
use text::TextItem;

/// The decoded content of a single page: its drawing-operator stream and
/// its positioned text runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageContent {
    #[serde(default)]
    pub page_number: usize,
    #[serde(default)]
    pub operators: Vec<Operator>,
    #[serde(default)]
    pub text_items: Vec<TextItem>,
}

/// Trait for backends that decode a document into per-page content.
pub trait PageSource: Send + Sync {
    /// Decode document bytes, returning one PageContent per page.
    fn extract_pages(&self, input: &[u8]) -> Result<Vec<PageContent>, DagridError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

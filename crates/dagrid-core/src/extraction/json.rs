//! Backend for page dumps produced by an external decoder as JSON.

use serde::Deserialize;

use super::{PageContent, PageSource};
use crate::error::DagridError;

#[derive(Deserialize)]
#[serde(untagged)]
enum Dump {
    Pages(Vec<PageContent>),
    Document { pages: Vec<PageContent> },
}

/// Reads either a bare array of pages or an object with a `pages` array.
#[derive(Debug, Default)]
pub struct JsonPageSource;

impl JsonPageSource {
    pub fn new() -> Self {
        JsonPageSource
    }
}

impl PageSource for JsonPageSource {
    fn extract_pages(&self, input: &[u8]) -> Result<Vec<PageContent>, DagridError> {
        let dump: Dump = serde_json::from_slice(input)
            .map_err(|e| DagridError::Decode(format!("invalid page dump: {e}")))?;
        let mut pages = match dump {
            Dump::Pages(pages) => pages,
            Dump::Document { pages } => pages,
        };

        // Pages without an explicit number are numbered by position.
        for (i, page) in pages.iter_mut().enumerate() {
            if page.page_number == 0 {
                page.page_number = i + 1;
            }
        }

        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "json"
    }
}

pub mod address;
pub mod diagnostics;
pub mod error;
pub mod extraction;
pub mod geometry;
pub mod model;
pub mod options;
pub mod record;
pub mod store;
pub mod table;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use address::Gazetteer;
use diagnostics::{Diagnostic, DiagnosticKind};
use error::DagridError;
use extraction::{PageContent, PageSource};
use model::DevelopmentRecord;
use options::ExtractOptions;
use store::{MemoryStore, RecordStore};
use table::StructuralFailure;

/// Records and diagnostics of a single page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageOutcome {
    pub page_number: usize,
    pub records: Vec<DevelopmentRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Records newly stored from a document, plus every diagnostic raised.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentOutcome {
    pub pages: usize,
    pub records: Vec<DevelopmentRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Reconstruct the table on one page and build its records.
///
/// Never fails: a page without a usable table yields no records and a
/// structural diagnostic, and rejected rows yield row diagnostics.
pub fn extract_page(
    page: &PageContent,
    gazetteer: &Gazetteer,
    options: &ExtractOptions,
) -> PageOutcome {
    let mut outcome = PageOutcome {
        page_number: page.page_number,
        records: Vec::new(),
        diagnostics: Vec::new(),
    };

    let table = match table::reconstruct(page) {
        Ok(table) => table,
        Err(failure) => {
            warn!(page = page.page_number, "skipping page: {failure}");
            let kind = match failure {
                StructuralFailure::NoGrid { .. } => DiagnosticKind::NoGrid,
                StructuralFailure::MissingHeader(_) => DiagnosticKind::MissingHeader,
            };
            outcome
                .diagnostics
                .push(Diagnostic::page(page.page_number, kind, failure.to_string()));
            return outcome;
        }
    };

    for row in table.projected_rows() {
        match record::build_record(&row, gazetteer, options) {
            Ok(Some(record)) => outcome.records.push(record),
            Ok(None) => {}
            Err(rejection) => {
                debug!(page = page.page_number, "row rejected: {rejection}");
                outcome.diagnostics.push(Diagnostic::row(
                    page.page_number,
                    rejection.kind(),
                    rejection.application_number().map(String::from),
                    rejection.to_string(),
                ));
            }
        }
    }

    info!(
        page = page.page_number,
        rows = table.rows.len(),
        records = outcome.records.len(),
        rejected = outcome.diagnostics.len(),
        "page processed"
    );
    outcome
}

/// Process pages in order, handing each record to `store`. Records the
/// store already holds are reported as duplicates, and records the store
/// fails to save are reported without stopping the document.
pub fn extract_document(
    pages: &[PageContent],
    gazetteer: &Gazetteer,
    options: &ExtractOptions,
    store: &mut dyn RecordStore,
) -> DocumentOutcome {
    let mut outcome = DocumentOutcome {
        pages: pages.len(),
        ..DocumentOutcome::default()
    };

    for page in pages {
        let page_outcome = extract_page(page, gazetteer, options);
        outcome.diagnostics.extend(page_outcome.diagnostics);

        for record in page_outcome.records {
            match store.insert_if_absent(record.clone()) {
                Ok(true) => outcome.records.push(record),
                Ok(false) => outcome.diagnostics.push(Diagnostic::row(
                    page.page_number,
                    DiagnosticKind::Duplicate,
                    Some(record.application_number),
                    "application already recorded",
                )),
                Err(e) => {
                    warn!(page = page.page_number, "failed to store record: {e}");
                    outcome.diagnostics.push(Diagnostic::row(
                        page.page_number,
                        DiagnosticKind::StoreFailed,
                        Some(record.application_number),
                        e.to_string(),
                    ));
                }
            }
        }
    }

    outcome
}

/// Main API entry point: decode a document and extract its records.
pub fn extract(
    input: &[u8],
    source: &dyn PageSource,
    gazetteer: &Gazetteer,
    options: &ExtractOptions,
) -> Result<DocumentOutcome, DagridError> {
    options.validate()?;
    if gazetteer.is_empty() {
        warn!("gazetteer is empty, every row will be rejected");
    }
    let pages = source.extract_pages(input)?;
    debug!(backend = source.backend_name(), pages = pages.len(), "decoded document");
    let mut store = MemoryStore::new();
    Ok(extract_document(&pages, gazetteer, options, &mut store))
}

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    NoGrid,
    MissingHeader,
    MalformedIdentifier,
    EmptyStreet,
    EmptySuburb,
    UnresolvedSuburb,
    Duplicate,
    StoreFailed,
}

impl DiagnosticKind {
    /// Whether the whole page was skipped, as opposed to a single row.
    pub fn is_structural(self) -> bool {
        matches!(self, DiagnosticKind::NoGrid | DiagnosticKind::MissingHeader)
    }
}

/// Why a page or a row produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub page_number: usize,
    pub kind: DiagnosticKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_number: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn page(page_number: usize, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Diagnostic {
            page_number,
            kind,
            application_number: None,
            message: message.into(),
        }
    }

    pub fn row(
        page_number: usize,
        kind: DiagnosticKind,
        application_number: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Diagnostic {
            page_number,
            kind,
            application_number,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.application_number {
            Some(id) => write!(f, "page {}: {}: {}", self.page_number, id, self.message),
            None => write!(f, "page {}: {}", self.page_number, self.message),
        }
    }
}

//! Turns projected table rows into development records.

use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use crate::address::{format_address, Gazetteer};
use crate::diagnostics::DiagnosticKind;
use crate::model::{Cell, DevelopmentRecord};
use crate::options::ExtractOptions;
use crate::table::ProjectedRow;

static APPLICATION_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+/\d+/\d+$").expect("valid application number pattern"));

static RECEIVED_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").expect("valid received date pattern")
});

/// Why a row was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowRejection {
    MalformedIdentifier(String),
    EmptyStreet { application_number: String },
    EmptySuburb { application_number: String },
    UnresolvedSuburb {
        application_number: String,
        suburb: String,
    },
}

impl RowRejection {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            RowRejection::MalformedIdentifier(_) => DiagnosticKind::MalformedIdentifier,
            RowRejection::EmptyStreet { .. } => DiagnosticKind::EmptyStreet,
            RowRejection::EmptySuburb { .. } => DiagnosticKind::EmptySuburb,
            RowRejection::UnresolvedSuburb { .. } => DiagnosticKind::UnresolvedSuburb,
        }
    }

    pub fn application_number(&self) -> Option<&str> {
        match self {
            RowRejection::MalformedIdentifier(_) => None,
            RowRejection::EmptyStreet { application_number }
            | RowRejection::EmptySuburb { application_number }
            | RowRejection::UnresolvedSuburb {
                application_number, ..
            } => Some(application_number.as_str()),
        }
    }
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowRejection::MalformedIdentifier(text) => {
                write!(f, "'{text}' is not an application number")
            }
            RowRejection::EmptyStreet { .. } => write!(f, "street is empty"),
            RowRejection::EmptySuburb { .. } => write!(f, "suburb is empty"),
            RowRejection::UnresolvedSuburb { suburb, .. } => {
                write!(f, "suburb '{suburb}' is not in the gazetteer")
            }
        }
    }
}

/// The concatenated identifier text if it has the `n/n/n` form.
pub fn parse_identifier(cell: &Cell) -> Result<String, String> {
    let text = cell.compact_text();
    if APPLICATION_NUMBER.is_match(&text) {
        Ok(text)
    } else {
        Err(text)
    }
}

/// Parse a strict `d/m/yyyy` date from the first fragment of the cell.
pub fn parse_received_date(cell: &Cell) -> Option<NaiveDate> {
    let first = cell.elements.first()?;
    let caps = RECEIVED_DATE.captures(first.text.trim())?;
    let day = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let year = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn cell_text(cell: Option<&Cell>) -> String {
    cell.map(Cell::text).unwrap_or_default()
}

/// Build a record from a projected row.
///
/// `Ok(None)` means the row carries no application at all (the header row
/// or a blank row) and is skipped without comment.
pub fn build_record(
    row: &ProjectedRow<'_>,
    gazetteer: &Gazetteer,
    options: &ExtractOptions,
) -> Result<Option<DevelopmentRecord>, RowRejection> {
    if row.is_header {
        return Ok(None);
    }
    let Some(identifier_cell) = row.identifier else {
        return Ok(None);
    };
    let application_number = match parse_identifier(identifier_cell) {
        Ok(id) => id,
        Err(text) if text.is_empty() => return Ok(None),
        Err(text) => return Err(RowRejection::MalformedIdentifier(text)),
    };

    let street = cell_text(row.street);
    if street.is_empty() {
        return Err(RowRejection::EmptyStreet { application_number });
    }
    let suburb = cell_text(row.suburb);
    if suburb.is_empty() {
        return Err(RowRejection::EmptySuburb { application_number });
    }
    let Some(address) = format_address(gazetteer, &street, &suburb) else {
        return Err(RowRejection::UnresolvedSuburb {
            application_number,
            suburb,
        });
    };

    let description = match cell_text(row.description) {
        d if d.is_empty() => options.default_description.clone(),
        d => d,
    };
    let received_date = row.received_date.and_then(parse_received_date);
    if received_date.is_none() {
        debug!("{}: no valid received date", application_number);
    }

    Ok(Some(DevelopmentRecord {
        application_number,
        address,
        description,
        information_url: options.information_url.clone(),
        comment_url: options.comment_url.clone(),
        scrape_date: options.scrape_date,
        received_date,
        legal_description: cell_text(row.legal_description),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::model::TextElement;

    fn cell(texts: &[&str]) -> Cell {
        let mut cell = Cell::new(Rect::new(0.0, 0.0, 100.0, 20.0));
        for text in texts {
            cell.elements.push(TextElement {
                text: text.to_string(),
                x: 0.0,
                y: 0.0,
                width: 10.0,
                height: 5.0,
            });
        }
        cell
    }

    fn gazetteer() -> Gazetteer {
        Gazetteer::from_csv(
            "MAIN STREET,TOWNSVILLE",
            "ST,STREET",
            "TOWNSVILLE,TOWNSVILLE QLD 4810",
        )
        .unwrap()
    }

    fn options() -> ExtractOptions {
        ExtractOptions {
            information_url: "https://example.org/register.pdf".into(),
            comment_url: "mailto:planning@example.org".into(),
            scrape_date: NaiveDate::from_ymd_opt(2021, 6, 30).unwrap(),
            ..ExtractOptions::default()
        }
    }

    #[test]
    fn test_identifier_pattern() {
        assert_eq!(parse_identifier(&cell(&["910/", "144/16"])), Ok("910/144/16".into()));
        assert_eq!(parse_identifier(&cell(&["ABC123"])), Err("ABC123".into()));
        assert!(parse_identifier(&cell(&["5/10"])).is_err());
    }

    #[test]
    fn test_received_date_strict() {
        assert_eq!(
            parse_received_date(&cell(&["3/02/2021", "extra"])),
            NaiveDate::from_ymd_opt(2021, 2, 3)
        );
        assert_eq!(parse_received_date(&cell(&["31/02/2021"])), None);
        assert_eq!(parse_received_date(&cell(&["2021-02-03"])), None);
        assert_eq!(parse_received_date(&cell(&["Received", "3/02/2021"])), None);
        assert_eq!(parse_received_date(&cell(&[])), None);
    }

    #[test]
    fn test_full_row() {
        let id = cell(&["5/10/21"]);
        let street = cell(&["1  MAIN", "ST"]);
        let suburb = cell(&["Townsville"]);
        let description = cell(&["Dwelling", "house"]);
        let date = cell(&["12/03/2021"]);
        let legal = cell(&["Lot 1", "RP12345"]);
        let row = ProjectedRow {
            identifier: Some(&id),
            street: Some(&street),
            suburb: Some(&suburb),
            description: Some(&description),
            received_date: Some(&date),
            legal_description: Some(&legal),
            is_header: false,
        };
        let record = build_record(&row, &gazetteer(), &options()).unwrap().unwrap();
        assert_eq!(record.application_number, "5/10/21");
        assert_eq!(record.address, "1 MAIN STREET, TOWNSVILLE QLD 4810");
        assert_eq!(record.description, "Dwelling house");
        assert_eq!(record.received_date, NaiveDate::from_ymd_opt(2021, 3, 12));
        assert_eq!(record.legal_description, "Lot 1 RP12345");
        assert_eq!(record.comment_url, "mailto:planning@example.org");
    }

    #[test]
    fn test_defaults_for_optional_fields() {
        let id = cell(&["5/10/21"]);
        let street = cell(&["1 MAIN ST"]);
        let suburb = cell(&["TOWNSVILLE"]);
        let date = cell(&["soon"]);
        let row = ProjectedRow {
            identifier: Some(&id),
            street: Some(&street),
            suburb: Some(&suburb),
            received_date: Some(&date),
            ..ProjectedRow::default()
        };
        let record = build_record(&row, &gazetteer(), &options()).unwrap().unwrap();
        assert_eq!(record.description, crate::options::DEFAULT_DESCRIPTION);
        assert_eq!(record.received_date, None);
        assert_eq!(record.legal_description, "");
    }

    #[test]
    fn test_header_and_blank_rows_skipped_silently() {
        let header = cell(&["D/A Number"]);
        let row = ProjectedRow {
            identifier: Some(&header),
            is_header: true,
            ..ProjectedRow::default()
        };
        assert_eq!(build_record(&row, &gazetteer(), &options()), Ok(None));

        let blank = cell(&[]);
        let row = ProjectedRow {
            identifier: Some(&blank),
            ..ProjectedRow::default()
        };
        assert_eq!(build_record(&row, &gazetteer(), &options()), Ok(None));
    }

    #[test]
    fn test_malformed_identifier_rejected() {
        let id = cell(&["ABC123"]);
        let row = ProjectedRow {
            identifier: Some(&id),
            ..ProjectedRow::default()
        };
        let rejection = build_record(&row, &gazetteer(), &options()).unwrap_err();
        assert_eq!(rejection.kind(), DiagnosticKind::MalformedIdentifier);
    }

    #[test]
    fn test_empty_suburb_rejected() {
        let id = cell(&["5/10/21"]);
        let street = cell(&["1 MAIN ST"]);
        let suburb = cell(&["  "]);
        let row = ProjectedRow {
            identifier: Some(&id),
            street: Some(&street),
            suburb: Some(&suburb),
            ..ProjectedRow::default()
        };
        let rejection = build_record(&row, &gazetteer(), &options()).unwrap_err();
        assert_eq!(rejection.kind(), DiagnosticKind::EmptySuburb);
        assert_eq!(rejection.application_number(), Some("5/10/21"));
    }

    #[test]
    fn test_missing_street_cell_rejected() {
        let id = cell(&["5/10/21"]);
        let suburb = cell(&["TOWNSVILLE"]);
        let row = ProjectedRow {
            identifier: Some(&id),
            suburb: Some(&suburb),
            ..ProjectedRow::default()
        };
        let rejection = build_record(&row, &gazetteer(), &options()).unwrap_err();
        assert_eq!(rejection.kind(), DiagnosticKind::EmptyStreet);
    }

    #[test]
    fn test_unknown_suburb_rejected() {
        let id = cell(&["5/10/21"]);
        let street = cell(&["1 MAIN ST"]);
        let suburb = cell(&["CAIRNS"]);
        let row = ProjectedRow {
            identifier: Some(&id),
            street: Some(&street),
            suburb: Some(&suburb),
            ..ProjectedRow::default()
        };
        let rejection = build_record(&row, &gazetteer(), &options()).unwrap_err();
        assert_eq!(rejection.kind(), DiagnosticKind::UnresolvedSuburb);
        assert_eq!(rejection.to_string(), "suburb 'CAIRNS' is not in the gazetteer");
    }
}

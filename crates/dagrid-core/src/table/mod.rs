//! Rebuilds the logical table of a page from its rules and text.

pub mod bind;
pub mod grid;
pub mod order;

use std::fmt;

use tracing::debug;

use crate::extraction::operators::extract_rectangles;
use crate::extraction::text::position_text;
use crate::extraction::PageContent;
use crate::geometry::{horizontal_overlap_percentage, Rect};
use crate::model::{Cell, TextElement};
use bind::bind_elements;
use grid::{build_cells, Lines};
use order::{sort_cells, sort_elements, y_buckets, CELL_Y_TOLERANCE};

/// Horizontal overlap a data cell needs with its header cell.
pub const PROJECTION_THRESHOLD: f64 = 90.0;

/// Columns of the register, each found by its header label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Identifier,
    ReceivedDate,
    LegalDescription,
    Street,
    Suburb,
    Description,
}

impl Column {
    /// Accepted labels, lowercase with whitespace removed, in lookup order.
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            Column::Identifier => &["d/anumber"],
            Column::ReceivedDate => &["datereceived"],
            Column::LegalDescription => &["legaldescription", "propertydescription"],
            Column::Street => &["streetname"],
            Column::Suburb => &["town"],
            Column::Description => &["description"],
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Column::Identifier => write!(f, "application number"),
            Column::ReceivedDate => write!(f, "received date"),
            Column::LegalDescription => write!(f, "legal description"),
            Column::Street => write!(f, "street"),
            Column::Suburb => write!(f, "suburb"),
            Column::Description => write!(f, "description"),
        }
    }
}

/// Why a page yielded no table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralFailure {
    NoGrid { horizontal: usize, vertical: usize },
    MissingHeader(Column),
}

impl fmt::Display for StructuralFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralFailure::NoGrid {
                horizontal,
                vertical,
            } => write!(
                f,
                "no table grid found ({horizontal} horizontal and {vertical} vertical lines, need at least 2 of each)"
            ),
            StructuralFailure::MissingHeader(column) => {
                write!(f, "no '{column}' column header found")
            }
        }
    }
}

/// Cells sharing a grid row, left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn y(&self) -> f64 {
        self.cells.first().map(|c| c.y).unwrap_or(0.0)
    }
}

/// Header cell bounds. Street, suburb and identifier are always present.
#[derive(Debug, Clone, PartialEq)]
pub struct Headers {
    pub identifier: Rect,
    pub street: Rect,
    pub suburb: Rect,
    pub received_date: Option<Rect>,
    pub legal_description: Option<Rect>,
    pub description: Option<Rect>,
}

impl Headers {
    pub fn get(&self, column: Column) -> Option<&Rect> {
        match column {
            Column::Identifier => Some(&self.identifier),
            Column::Street => Some(&self.street),
            Column::Suburb => Some(&self.suburb),
            Column::ReceivedDate => self.received_date.as_ref(),
            Column::LegalDescription => self.legal_description.as_ref(),
            Column::Description => self.description.as_ref(),
        }
    }
}

/// The data cells of one row, keyed by column.
#[derive(Debug, Clone, Default)]
pub struct ProjectedRow<'a> {
    pub identifier: Option<&'a Cell>,
    pub street: Option<&'a Cell>,
    pub suburb: Option<&'a Cell>,
    pub received_date: Option<&'a Cell>,
    pub legal_description: Option<&'a Cell>,
    pub description: Option<&'a Cell>,
    /// The row's identifier cell is the header cell itself.
    pub is_header: bool,
}

/// A reconstructed page table.
#[derive(Debug, Clone)]
pub struct Table {
    pub rows: Vec<Row>,
    pub headers: Headers,
}

impl Table {
    pub fn projected_rows(&self) -> impl Iterator<Item = ProjectedRow<'_>> {
        self.rows.iter().map(|row| project_row(row, &self.headers))
    }
}

/// Group cells into rows by y, then order each row by x and the rows by
/// their first cell's y.
pub fn group_rows(cells: Vec<Cell>) -> Vec<Row> {
    let ys: Vec<f64> = cells.iter().map(|c| c.y).collect();
    let buckets = y_buckets(&ys, CELL_Y_TOLERANCE);

    let mut groups: Vec<(usize, Row)> = Vec::new();
    for (bucket, cell) in buckets.into_iter().zip(cells) {
        match groups.iter_mut().find(|(b, _)| *b == bucket) {
            Some((_, row)) => row.cells.push(cell),
            None => groups.push((bucket, Row { cells: vec![cell] })),
        }
    }

    let mut rows: Vec<Row> = groups.into_iter().map(|(_, row)| row).collect();
    for row in &mut rows {
        row.cells.sort_by(|a, b| a.x.total_cmp(&b.x));
    }
    rows.sort_by(|a, b| a.y().total_cmp(&b.y()));
    rows
}

fn find_label<'a>(rows: &'a [Row], label: &str) -> Option<&'a Cell> {
    rows.iter()
        .flat_map(|row| row.cells.iter())
        .find(|cell| cell.compact_text().to_lowercase() == label)
}

fn find_column(rows: &[Row], column: Column) -> Option<Rect> {
    column
        .labels()
        .iter()
        .find_map(|label| find_label(rows, label))
        .map(Cell::rect)
}

/// Locate the header cells. Identifier, street and suburb are required.
pub fn find_headers(rows: &[Row]) -> Result<Headers, StructuralFailure> {
    let required = |column: Column| {
        find_column(rows, column).ok_or(StructuralFailure::MissingHeader(column))
    };
    Ok(Headers {
        identifier: required(Column::Identifier)?,
        street: required(Column::Street)?,
        suburb: required(Column::Suburb)?,
        received_date: find_column(rows, Column::ReceivedDate),
        legal_description: find_column(rows, Column::LegalDescription),
        description: find_column(rows, Column::Description),
    })
}

fn cell_under<'a>(row: &'a Row, headers: &Headers, column: Column) -> Option<&'a Cell> {
    let header = headers.get(column)?;
    row.cells
        .iter()
        .find(|cell| horizontal_overlap_percentage(&cell.rect(), header) > PROJECTION_THRESHOLD)
}

/// Select the cell under each header column.
pub fn project_row<'a>(row: &'a Row, headers: &Headers) -> ProjectedRow<'a> {
    let identifier = cell_under(row, headers, Column::Identifier);
    ProjectedRow {
        is_header: identifier.is_some_and(|cell| cell.rect() == headers.identifier),
        identifier,
        street: cell_under(row, headers, Column::Street),
        suburb: cell_under(row, headers, Column::Suburb),
        received_date: cell_under(row, headers, Column::ReceivedDate),
        legal_description: cell_under(row, headers, Column::LegalDescription),
        description: cell_under(row, headers, Column::Description),
    }
}

/// Text elements of a page in top-down reading order.
fn page_elements(page: &PageContent) -> Vec<TextElement> {
    let elements = position_text(&page.text_items)
        .into_iter()
        .map(|mut e| {
            e.y = -(e.y + e.height);
            e
        })
        .collect();
    sort_elements(elements)
}

/// Build the grid of a page and bind its text, without looking for headers.
pub fn layout(page: &PageContent) -> Result<Vec<Row>, StructuralFailure> {
    let rects: Vec<Rect> = extract_rectangles(&page.operators)
        .iter()
        .map(Rect::invert_y)
        .collect();
    let lines = Lines::from_rects(&rects);
    if !lines.forms_grid() {
        return Err(StructuralFailure::NoGrid {
            horizontal: lines.horizontal.len(),
            vertical: lines.vertical.len(),
        });
    }

    let mut cells = sort_cells(build_cells(&lines));
    let dropped = bind_elements(&mut cells, page_elements(page));
    debug!(
        page = page.page_number,
        cells = cells.len(),
        dropped,
        "bound text to grid"
    );

    Ok(group_rows(cells))
}

/// Reconstruct the table of a page.
pub fn reconstruct(page: &PageContent) -> Result<Table, StructuralFailure> {
    let rows = layout(page)?;
    let headers = find_headers(&rows)?;
    Ok(Table { rows, headers })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(x: f64, y: f64, width: f64, texts: &[&str]) -> Cell {
        let mut cell = Cell::new(Rect::new(x, y, width, 20.0));
        for text in texts {
            cell.elements.push(TextElement {
                text: text.to_string(),
                x,
                y,
                width: 10.0,
                height: 5.0,
            });
        }
        cell
    }

    fn header_row() -> Row {
        Row {
            cells: vec![
                cell(0.0, 0.0, 100.0, &["D/A", "Number"]),
                cell(100.0, 0.0, 200.0, &["Street Name"]),
                cell(300.0, 0.0, 100.0, &["Town"]),
            ],
        }
    }

    #[test]
    fn test_group_rows_tolerance() {
        let rows = group_rows(vec![
            cell(100.0, 21.0, 100.0, &[]),
            cell(0.0, 0.0, 100.0, &[]),
            cell(0.0, 20.0, 100.0, &[]),
            cell(100.0, 1.5, 100.0, &[]),
        ]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cells[0].x, 0.0);
        assert_eq!(rows[0].cells[1].x, 100.0);
        assert_eq!(rows[1].y(), 20.0);
    }

    #[test]
    fn test_find_headers_by_compact_label() {
        let headers = find_headers(&[header_row()]).unwrap();
        assert_eq!(headers.identifier, Rect::new(0.0, 0.0, 100.0, 20.0));
        assert_eq!(headers.street.x, 100.0);
        assert_eq!(headers.suburb.x, 300.0);
        assert!(headers.description.is_none());
        assert!(headers.legal_description.is_none());
        assert_eq!(headers.get(Column::Suburb).map(|r| r.x), Some(300.0));
        assert_eq!(headers.get(Column::Description), None);
    }

    #[test]
    fn test_missing_suburb_header() {
        let row = Row {
            cells: vec![
                cell(0.0, 0.0, 100.0, &["D/A Number"]),
                cell(100.0, 0.0, 200.0, &["Street Name"]),
            ],
        };
        assert_eq!(
            find_headers(&[row]),
            Err(StructuralFailure::MissingHeader(Column::Suburb))
        );
    }

    #[test]
    fn test_legal_description_fallback_label() {
        let mut row = header_row();
        row.cells
            .push(cell(400.0, 0.0, 100.0, &["Property", "Description"]));
        let headers = find_headers(&[row]).unwrap();
        assert_eq!(headers.legal_description.map(|r| r.x), Some(400.0));
    }

    #[test]
    fn test_primary_legal_label_preferred() {
        let mut row = header_row();
        row.cells
            .push(cell(400.0, 0.0, 100.0, &["Property Description"]));
        row.cells
            .push(cell(500.0, 0.0, 100.0, &["Legal Description"]));
        let headers = find_headers(&[row]).unwrap();
        assert_eq!(headers.legal_description.map(|r| r.x), Some(500.0));
    }

    #[test]
    fn test_project_row_by_overlap() {
        let headers = find_headers(&[header_row()]).unwrap();
        let data = Row {
            cells: vec![
                cell(0.0, 20.0, 100.0, &["5/10/21"]),
                cell(100.0, 20.0, 200.0, &["1 MAIN ST"]),
                cell(300.0, 20.0, 100.0, &["TOWNSVILLE"]),
            ],
        };
        let projected = project_row(&data, &headers);
        assert!(!projected.is_header);
        assert_eq!(projected.identifier.unwrap().text(), "5/10/21");
        assert_eq!(projected.street.unwrap().text(), "1 MAIN ST");
        assert_eq!(projected.suburb.unwrap().text(), "TOWNSVILLE");
        assert!(projected.description.is_none());
    }

    #[test]
    fn test_projection_requires_more_than_ninety_percent() {
        let headers = find_headers(&[header_row()]).unwrap();
        // span 0..90 against header 0..100: exactly 90%
        let data = Row {
            cells: vec![cell(0.0, 20.0, 90.0, &["5/10/21"])],
        };
        assert!(project_row(&data, &headers).identifier.is_none());
    }

    #[test]
    fn test_header_row_flagged() {
        let headers = find_headers(&[header_row()]).unwrap();
        let row = header_row();
        assert!(project_row(&row, &headers).is_header);
    }
}

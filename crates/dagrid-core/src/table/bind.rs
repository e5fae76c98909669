use tracing::debug;

use crate::geometry::overlap_percentage;
use crate::model::{Cell, TextElement};

/// Share of an element's area a cell must hold to own it.
pub const BIND_THRESHOLD: f64 = 50.0;

/// Attach each element to the first cell holding more than half of its
/// area. Elements no cell owns are dropped.
///
/// `cells` and `elements` are expected in reading order, so each cell's
/// elements end up in reading order too. Returns the number of elements
/// dropped.
pub fn bind_elements(cells: &mut [Cell], elements: Vec<TextElement>) -> usize {
    let mut dropped = 0;
    for element in elements {
        let rect = element.rect();
        let owner = cells
            .iter_mut()
            .find(|cell| overlap_percentage(&rect, &cell.rect()) > BIND_THRESHOLD);
        match owner {
            Some(cell) => cell.elements.push(element),
            None => {
                debug!("text '{}' is outside every cell", element.text);
                dropped += 1;
            }
        }
    }
    dropped
}

//! Reading-order keys for cells and text elements.
//!
//! Positions within `tolerance` of a bucket's first y share that bucket,
//! which turns the tolerant "same line" comparison into a total order.

use crate::model::{Cell, TextElement};

/// Vertical tolerance for cells on the same grid row.
pub const CELL_Y_TOLERANCE: f64 = 2.0;
/// Vertical tolerance for text on the same line.
pub const TEXT_Y_TOLERANCE: f64 = 1.0;

/// Assign a bucket index to every y value. Buckets are numbered top to
/// bottom; a value joins the current bucket while it is within
/// `tolerance` of the bucket's first value.
pub fn y_buckets(ys: &[f64], tolerance: f64) -> Vec<usize> {
    let mut order: Vec<usize> = (0..ys.len()).collect();
    order.sort_by(|&a, &b| ys[a].total_cmp(&ys[b]));

    let mut buckets = vec![0; ys.len()];
    let mut current = 0;
    let mut anchor: Option<f64> = None;
    for idx in order {
        let y = ys[idx];
        match anchor {
            Some(a) if (y - a).abs() < tolerance => {}
            Some(_) => {
                current += 1;
                anchor = Some(y);
            }
            None => anchor = Some(y),
        }
        buckets[idx] = current;
    }
    buckets
}

fn sort_by_bucket<T>(
    items: Vec<T>,
    tolerance: f64,
    y: impl Fn(&T) -> f64,
    x: impl Fn(&T) -> f64,
) -> Vec<T> {
    let ys: Vec<f64> = items.iter().map(&y).collect();
    let buckets = y_buckets(&ys, tolerance);
    let mut keyed: Vec<(usize, T)> = buckets.into_iter().zip(items).collect();
    keyed.sort_by(|(ba, a), (bb, b)| ba.cmp(bb).then(x(a).total_cmp(&x(b))));
    keyed.into_iter().map(|(_, item)| item).collect()
}

/// Sort cells top to bottom, then left to right.
pub fn sort_cells(cells: Vec<Cell>) -> Vec<Cell> {
    sort_by_bucket(cells, CELL_Y_TOLERANCE, |c| c.y, |c| c.x)
}

/// Sort text elements into reading order.
pub fn sort_elements(elements: Vec<TextElement>) -> Vec<TextElement> {
    sort_by_bucket(elements, TEXT_Y_TOLERANCE, |e| e.y, |e| e.x)
}

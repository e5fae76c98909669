use crate::geometry::Rect;
use crate::model::Cell;

/// Maximum thickness of a rule.
pub const LINE_THICKNESS: f64 = 2.0;
/// Minimum length of a horizontal rule. Shorter strokes (logos, underlines)
/// would fracture the grid.
pub const MIN_HORIZONTAL_LENGTH: f64 = 200.0;
/// Minimum length of a vertical rule.
pub const MIN_VERTICAL_LENGTH: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Horizontal,
    Vertical,
    Unclassified,
}

pub fn classify(rect: &Rect) -> LineKind {
    if rect.height <= LINE_THICKNESS && rect.width >= MIN_HORIZONTAL_LENGTH {
        LineKind::Horizontal
    } else if rect.width <= LINE_THICKNESS && rect.height >= MIN_VERTICAL_LENGTH {
        LineKind::Vertical
    } else {
        LineKind::Unclassified
    }
}

/// Rules of a page split by orientation, each sorted along its axis.
#[derive(Debug, Clone, Default)]
pub struct Lines {
    pub horizontal: Vec<Rect>,
    pub vertical: Vec<Rect>,
}

impl Lines {
    pub fn from_rects(rects: &[Rect]) -> Self {
        let mut lines = Lines::default();
        for rect in rects {
            match classify(rect) {
                LineKind::Horizontal => lines.horizontal.push(*rect),
                LineKind::Vertical => lines.vertical.push(*rect),
                LineKind::Unclassified => {}
            }
        }
        lines.horizontal.sort_by(|a, b| a.y.total_cmp(&b.y));
        lines.vertical.sort_by(|a, b| a.x.total_cmp(&b.x));
        lines
    }

    /// A grid needs at least two rules in each direction.
    pub fn forms_grid(&self) -> bool {
        self.horizontal.len() >= 2 && self.vertical.len() >= 2
    }
}

/// One cell per pair of consecutive horizontal rules times pair of
/// consecutive vertical rules: `(H - 1) * (V - 1)` cells.
pub fn build_cells(lines: &Lines) -> Vec<Cell> {
    let mut cells = Vec::new();
    for rows in lines.horizontal.windows(2) {
        let (top, bottom) = (&rows[0], &rows[1]);
        for cols in lines.vertical.windows(2) {
            let (left, right) = (&cols[0], &cols[1]);
            cells.push(Cell::new(Rect::new(
                left.x,
                top.y,
                right.x - left.x,
                bottom.y - top.y,
            )));
        }
    }
    cells
}

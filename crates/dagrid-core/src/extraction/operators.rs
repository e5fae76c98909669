//! Walks a page's drawing-operator stream and collects the filled
//! rectangles that make up table rules.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::geometry::Rect;

/// One drawing instruction from a decoded operator list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operator {
    Save,
    Restore,
    Transform { matrix: [f64; 6] },
    ConstructPath { ops: Vec<PathOp>, args: Vec<f64> },
    /// Any painting operator that fills the current path.
    #[serde(
        alias = "eo_fill",
        alias = "fill_stroke",
        alias = "eo_fill_stroke",
        alias = "close_fill_stroke",
        alias = "close_eo_fill_stroke"
    )]
    Fill,
    #[serde(other)]
    Ignored,
}

/// A path construction sub-operation. Its operands are read from the flat
/// argument buffer of the enclosing `ConstructPath`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathOp {
    MoveTo,
    LineTo,
    CurveTo,
    CurveTo2,
    CurveTo3,
    ClosePath,
    Rectangle,
}

impl PathOp {
    /// Number of operands consumed from the argument buffer.
    pub fn arity(self) -> usize {
        match self {
            PathOp::MoveTo | PathOp::LineTo => 2,
            PathOp::CurveTo => 6,
            PathOp::CurveTo2 | PathOp::CurveTo3 => 4,
            PathOp::ClosePath => 0,
            PathOp::Rectangle => 4,
        }
    }
}

/// A 2D affine transform `[a, b, c, d, e, f]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix(pub [f64; 6]);

impl Matrix {
    pub const IDENTITY: Matrix = Matrix([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    /// Compose so that `m` is applied first, then `self`.
    pub fn compose(&self, m: &Matrix) -> Matrix {
        let [a1, b1, c1, d1, e1, f1] = self.0;
        let [a2, b2, c2, d2, e2, f2] = m.0;
        Matrix([
            a1 * a2 + c1 * b2,
            b1 * a2 + d1 * b2,
            a1 * c2 + c1 * d2,
            b1 * c2 + d1 * d2,
            a1 * e2 + c1 * f2 + e1,
            b1 * e2 + d1 * f2 + f1,
        ])
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let [a, b, c, d, e, f] = self.0;
        (x * a + y * c + e, x * b + y * d + f)
    }

    /// Transform both corners of a rectangle and normalize the result.
    pub fn apply_rect(&self, x: f64, y: f64, width: f64, height: f64) -> Rect {
        let (x0, y0) = self.apply(x, y);
        let (x1, y1) = self.apply(x + width, y + height);
        Rect::from_corners(x0, y0, x1, y1)
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix::IDENTITY
    }
}

/// Collect every rectangle that is filled directly after being drawn.
///
/// A rectangle becomes pending when drawn and is committed by the next
/// fill. Drawing another rectangle first discards it.
pub fn extract_rectangles(operators: &[Operator]) -> Vec<Rect> {
    let mut stack: Vec<Matrix> = Vec::new();
    let mut ctm = Matrix::IDENTITY;
    let mut pending: Option<Rect> = None;
    let mut rects = Vec::new();

    for op in operators {
        match op {
            Operator::Save => stack.push(ctm),
            Operator::Restore => match stack.pop() {
                Some(saved) => ctm = saved,
                None => debug!("restore with an empty transform stack ignored"),
            },
            Operator::Transform { matrix } => ctm = ctm.compose(&Matrix(*matrix)),
            Operator::ConstructPath { ops, args } => {
                let mut cursor = 0;
                for sub in ops {
                    let end = cursor + sub.arity();
                    let Some(operands) = args.get(cursor..end) else {
                        warn!(
                            "path argument buffer too short: {:?} needs {} operands at offset {}, have {}",
                            sub,
                            sub.arity(),
                            cursor,
                            args.len()
                        );
                        break;
                    };
                    cursor = end;
                    if *sub == PathOp::Rectangle {
                        pending = Some(ctm.apply_rect(
                            operands[0],
                            operands[1],
                            operands[2],
                            operands[3],
                        ));
                    }
                }
            }
            Operator::Fill => {
                if let Some(rect) = pending.take() {
                    rects.push(rect);
                }
            }
            Operator::Ignored => {}
        }
    }

    debug!("extracted {} filled rectangles", rects.len());
    rects
}

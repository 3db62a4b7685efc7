//! Reveal ordering: nearest-to-corner shapes first.

use revela_core::{Rect, ReferenceCorner, ShapeKind};
use serde::{Deserialize, Serialize};

use crate::scene::Scene;
use crate::shape::{Shape, ShapeId};

/// Where a shape falls in the reveal sequence. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealRecord {
    pub shape: ShapeId,
    pub kind: ShapeKind,
    /// Distance from the shape's matching box corner to the viewport corner.
    pub distance: f64,
    pub path_length: Option<f64>,
    /// The shape's own stroke, unresolved.
    pub stroke: Option<String>,
    /// Zero-based position in the reveal sequence.
    pub order: usize,
}

/// Distance from a shape's bounding-box corner to the same corner of the viewport.
///
/// The viewport corner is taken from its extent alone, so bottom-right is
/// `(width, height)` whatever the viewport origin. Degenerate boxes still
/// contribute their corner point.
pub fn corner_distance(shape: &Shape, viewport: &Rect, corner: ReferenceCorner) -> f64 {
    let extent = Rect::new(0.0, 0.0, viewport.width, viewport.height);
    shape
        .bounds
        .corner(corner)
        .distance_to(&extent.corner(corner))
}

/// Order every shape of the scene by distance from `corner`.
///
/// The sort is stable: shapes at equal distance keep document order.
pub fn compute_reveal_order(scene: &Scene, corner: ReferenceCorner) -> Vec<RevealRecord> {
    let mut measured: Vec<(&Shape, f64)> = scene
        .shapes
        .iter()
        .map(|shape| (shape, corner_distance(shape, &scene.viewport, corner)))
        .collect();

    // `sort_by` is stable; `total_cmp` keeps NaN distances (if any) at the end.
    measured.sort_by(|a, b| a.1.total_cmp(&b.1));

    measured
        .into_iter()
        .enumerate()
        .map(|(order, (shape, distance))| RevealRecord {
            shape: shape.id,
            kind: shape.kind,
            distance,
            path_length: shape.path_length,
            stroke: shape.stroke.clone(),
            order,
        })
        .collect()
}

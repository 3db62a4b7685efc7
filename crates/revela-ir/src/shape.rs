use revela_core::{Rect, ShapeKind};
use serde::{Deserialize, Serialize};

/// Position of a shape in document order. Stable across a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(pub usize);

impl ShapeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A drawable element of a scene with its measured geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    /// Axis-aligned bounding box in the element's user space.
    pub bounds: Rect,
    /// Total stroke length; only measured for paths.
    pub path_length: Option<f64>,
    /// The element's own `stroke` attribute, verbatim.
    pub stroke: Option<String>,
}

impl Shape {
    pub fn new(id: ShapeId, kind: ShapeKind, bounds: Rect) -> Self {
        Self {
            id,
            kind,
            bounds,
            path_length: None,
            stroke: None,
        }
    }

    pub fn with_path_length(mut self, length: f64) -> Self {
        self.path_length = Some(length);
        self
    }

    pub fn with_stroke(mut self, stroke: impl Into<String>) -> Self {
        self.stroke = Some(stroke.into());
        self
    }
}

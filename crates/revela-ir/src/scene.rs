use revela_core::{ContentHash, Rect};
use serde::{Deserialize, Serialize};

use crate::shape::{Shape, ShapeId};

/// A parsed vector illustration: its viewport and drawable shapes in document order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// The viewport the reference corner is taken from.
    pub viewport: Rect,
    /// Shapes in document order.
    pub shapes: Vec<Shape>,
    /// Hash of the source the scene was parsed from, if any.
    pub source_hash: Option<ContentHash>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new(viewport: Rect) -> Self {
        Self {
            viewport,
            shapes: Vec::new(),
            source_hash: None,
        }
    }

    pub fn with_source_hash(mut self, hash: ContentHash) -> Self {
        self.source_hash = Some(hash);
        self
    }

    /// Add a shape to the scene.
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Get a shape by its ID.
    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Union of all shape bounds, `None` for an empty scene.
    pub fn content_bounds(&self) -> Option<Rect> {
        let mut shapes = self.shapes.iter();
        let first = shapes.next()?.bounds;
        Some(shapes.fold(first, |acc, s| acc.union(&s.bounds)))
    }
}

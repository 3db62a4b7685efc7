use revela_core::{Point2D, Rect, ShapeKind};

use crate::scene::Scene;
use crate::shape::{Shape, ShapeId};

/// A builder for constructing a Scene programmatically.
/// Useful for front-ends that measure geometry themselves, benchmarks and unit testing.
pub struct SceneBuilder {
    scene: Scene,
}

impl SceneBuilder {
    /// Start a scene whose viewport spans (0, 0)–(width, height).
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            scene: Scene::new(Rect::new(0.0, 0.0, width, height)),
        }
    }

    /// Start a scene with an explicit viewport rectangle.
    pub fn with_viewport(viewport: Rect) -> Self {
        Self {
            scene: Scene::new(viewport),
        }
    }

    fn next_id(&self) -> ShapeId {
        ShapeId::new(self.scene.shapes.len())
    }

    /// Add a shape, reassigning its id to the next document position.
    pub fn shape(mut self, mut shape: Shape) -> Self {
        shape.id = self.next_id();
        self.scene.add_shape(shape);
        self
    }

    /// Add a path with the given bounds and measured length.
    pub fn path(self, x: f64, y: f64, width: f64, height: f64, length: f64) -> Self {
        let id = self.next_id();
        self.shape(
            Shape::new(id, ShapeKind::Path, Rect::new(x, y, width, height))
                .with_path_length(length),
        )
    }

    pub fn rect(self, x: f64, y: f64, width: f64, height: f64) -> Self {
        let id = self.next_id();
        self.shape(Shape::new(id, ShapeKind::Rect, Rect::new(x, y, width, height)))
    }

    pub fn circle(self, cx: f64, cy: f64, r: f64) -> Self {
        let id = self.next_id();
        self.shape(Shape::new(
            id,
            ShapeKind::Circle,
            Rect::new(cx - r, cy - r, 2.0 * r, 2.0 * r),
        ))
    }

    pub fn ellipse(self, cx: f64, cy: f64, rx: f64, ry: f64) -> Self {
        let id = self.next_id();
        self.shape(Shape::new(
            id,
            ShapeKind::Ellipse,
            Rect::new(cx - rx, cy - ry, 2.0 * rx, 2.0 * ry),
        ))
    }

    /// Add a polygon through `points`; an empty point list yields a box at the origin.
    pub fn polygon(self, points: &[(f64, f64)]) -> Self {
        let id = self.next_id();
        let mut iter = points.iter().map(|&(x, y)| Rect::point(Point2D::new(x, y)));
        let first = iter.next().unwrap_or(Rect::point(Point2D::zero()));
        let bounds = iter.fold(first, |acc, p| acc.union(&p));
        self.shape(Shape::new(id, ShapeKind::Polygon, bounds))
    }

    /// Set the `stroke` attribute of the most recently added shape.
    pub fn stroke(mut self, stroke: impl Into<String>) -> Self {
        if let Some(last) = self.scene.shapes.last_mut() {
            last.stroke = Some(stroke.into());
        }
        self
    }

    /// Build and return the scene.
    pub fn build(self) -> Scene {
        self.scene
    }
}

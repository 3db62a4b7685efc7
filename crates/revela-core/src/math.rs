use serde::{Deserialize, Serialize};

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for Point2D {
    fn default() -> Self {
        Self::zero()
    }
}

/// One of the four corners of an axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceCorner {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl ReferenceCorner {
    fn is_right(&self) -> bool {
        matches!(self, ReferenceCorner::TopRight | ReferenceCorner::BottomRight)
    }

    fn is_bottom(&self) -> bool {
        matches!(
            self,
            ReferenceCorner::BottomLeft | ReferenceCorner::BottomRight
        )
    }
}

impl std::str::FromStr for ReferenceCorner {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "top-left" | "tl" => Ok(ReferenceCorner::TopLeft),
            "top-right" | "tr" => Ok(ReferenceCorner::TopRight),
            "bottom-left" | "bl" => Ok(ReferenceCorner::BottomLeft),
            "bottom-right" | "br" => Ok(ReferenceCorner::BottomRight),
            other => Err(format!("unknown corner '{}'", other)),
        }
    }
}

impl std::fmt::Display for ReferenceCorner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceCorner::TopLeft => write!(f, "top-left"),
            ReferenceCorner::TopRight => write!(f, "top-right"),
            ReferenceCorner::BottomLeft => write!(f, "bottom-left"),
            ReferenceCorner::BottomRight => write!(f, "bottom-right"),
        }
    }
}

/// An axis-aligned rectangle in user units (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A zero-size rectangle at a point.
    pub fn point(p: Point2D) -> Self {
        Self::new(p.x, p.y, 0.0, 0.0)
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// The position of the given corner.
    pub fn corner(&self, corner: ReferenceCorner) -> Point2D {
        let x = if corner.is_right() { self.max_x() } else { self.x };
        let y = if corner.is_bottom() { self.max_y() } else { self.y };
        Point2D::new(x, y)
    }

    /// Zero width or zero height.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(
            x,
            y,
            self.max_x().max(other.max_x()) - x,
            self.max_y().max(other.max_y()) - y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-9);
        assert!((b.distance_to(&a) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_rect_corners() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.corner(ReferenceCorner::TopLeft), Point2D::new(10.0, 20.0));
        assert_eq!(r.corner(ReferenceCorner::TopRight), Point2D::new(40.0, 20.0));
        assert_eq!(
            r.corner(ReferenceCorner::BottomLeft),
            Point2D::new(10.0, 60.0)
        );
        assert_eq!(
            r.corner(ReferenceCorner::BottomRight),
            Point2D::new(40.0, 60.0)
        );
    }

    #[test]
    fn test_rect_union() {
        let r = Rect::new(1.0, 2.0, 4.0, 6.0);

        let u = r.union(&Rect::new(10.0, 0.0, 1.0, 1.0));
        assert_eq!(u, Rect::new(1.0, 0.0, 10.0, 8.0));
    }

    #[test]
    fn test_degenerate_rect_keeps_its_corner() {
        let r = Rect::new(7.0, 9.0, 0.0, 12.0);
        assert!(r.is_degenerate());
        assert_eq!(r.corner(ReferenceCorner::BottomRight), Point2D::new(7.0, 21.0));
        assert!(Rect::point(Point2D::new(1.0, 1.0)).is_degenerate());
    }

    #[test]
    fn test_corner_parse() {
        assert_eq!(
            "bottom_right".parse::<ReferenceCorner>().unwrap(),
            ReferenceCorner::BottomRight
        );
        assert_eq!("TL".parse::<ReferenceCorner>().unwrap(), ReferenceCorner::TopLeft);
        assert!("middle".parse::<ReferenceCorner>().is_err());
        assert_eq!(ReferenceCorner::default(), ReferenceCorner::BottomRight);
        assert_eq!(format!("{}", ReferenceCorner::BottomLeft), "bottom-left");
    }
}

//! Bounding boxes and path lengths for the supported SVG shapes.

use kurbo::{BezPath, Circle, Ellipse, Point, Shape as _};
use revela_core::{Rect, ShapeKind};

/// The geometry attributes of one shape element, copied out of the document.
#[derive(Debug, Clone, Default)]
pub struct ShapeAttributes {
    pub d: Option<String>,
    pub x: Option<String>,
    pub y: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub cx: Option<String>,
    pub cy: Option<String>,
    pub r: Option<String>,
    pub rx: Option<String>,
    pub ry: Option<String>,
    pub points: Option<String>,
}

/// Measured geometry of one shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub bounds: Rect,
    pub path_length: Option<f64>,
}

/// Parse an SVG length in user units. Accepts a bare number or a `px` suffix.
pub fn parse_length(value: Option<&str>) -> Option<f64> {
    let v = value?.trim();
    let v = v.strip_suffix("px").unwrap_or(v).trim();
    v.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Split a number list on whitespace and commas.
pub fn parse_number_list(value: &str) -> Vec<f64> {
    value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map_while(|s| s.parse::<f64>().ok())
        .collect()
}

fn to_rect(r: kurbo::Rect) -> Rect {
    Rect::new(r.x0, r.y0, r.width().max(0.0), r.height().max(0.0))
}

fn attr(value: &Option<String>) -> f64 {
    parse_length(value.as_deref()).unwrap_or(0.0)
}

/// Measure a shape. Unparsable geometry collapses to a zero box at the origin,
/// like a browser's `getBBox` on an element it could not render.
pub fn measure(kind: ShapeKind, attrs: &ShapeAttributes, accuracy: f64) -> Measurement {
    match kind {
        ShapeKind::Path => measure_path(attrs.d.as_deref().unwrap_or(""), accuracy),
        ShapeKind::Rect => {
            let x = attr(&attrs.x);
            let y = attr(&attrs.y);
            let w = attr(&attrs.width).max(0.0);
            let h = attr(&attrs.height).max(0.0);
            Measurement {
                bounds: to_rect(kurbo::Rect::new(x, y, x + w, y + h)),
                path_length: None,
            }
        }
        ShapeKind::Circle => {
            let r = attr(&attrs.r).max(0.0);
            let circle = Circle::new(Point::new(attr(&attrs.cx), attr(&attrs.cy)), r);
            Measurement {
                bounds: to_rect(circle.bounding_box()),
                path_length: None,
            }
        }
        ShapeKind::Ellipse => {
            // A missing radius takes the value of the other one (`auto`).
            let rx = parse_length(attrs.rx.as_deref());
            let ry = parse_length(attrs.ry.as_deref());
            let (rx, ry) = match (rx, ry) {
                (Some(rx), Some(ry)) => (rx, ry),
                (Some(r), None) | (None, Some(r)) => (r, r),
                (None, None) => (0.0, 0.0),
            };
            let ellipse = Ellipse::new(
                Point::new(attr(&attrs.cx), attr(&attrs.cy)),
                (rx.max(0.0), ry.max(0.0)),
                0.0,
            );
            Measurement {
                bounds: to_rect(ellipse.bounding_box()),
                path_length: None,
            }
        }
        ShapeKind::Polygon => {
            let numbers = parse_number_list(attrs.points.as_deref().unwrap_or(""));
            let mut path = BezPath::new();
            for (i, pair) in numbers.chunks_exact(2).enumerate() {
                let p = Point::new(pair[0], pair[1]);
                if i == 0 {
                    path.move_to(p);
                } else {
                    path.line_to(p);
                }
            }
            let bounds = match numbers.len() {
                0 | 1 => Rect::new(0.0, 0.0, 0.0, 0.0),
                2 => Rect::new(numbers[0], numbers[1], 0.0, 0.0),
                _ => {
                    path.close_path();
                    to_rect(path.bounding_box())
                }
            };
            Measurement {
                bounds,
                path_length: None,
            }
        }
    }
}

fn measure_path(d: &str, accuracy: f64) -> Measurement {
    let empty = Measurement {
        bounds: Rect::new(0.0, 0.0, 0.0, 0.0),
        path_length: Some(0.0),
    };
    if d.trim().is_empty() {
        return empty;
    }
    match BezPath::from_svg(d) {
        Ok(path) => {
            let segments = path.segments().count();
            if segments == 0 {
                // Only move-tos: the box collapses onto the last point.
                let last = path.elements().iter().rev().find_map(|el| match el {
                    kurbo::PathEl::MoveTo(p) => Some(*p),
                    _ => None,
                });
                return match last {
                    Some(p) => Measurement {
                        bounds: Rect::new(p.x, p.y, 0.0, 0.0),
                        path_length: Some(0.0),
                    },
                    None => empty,
                };
            }
            Measurement {
                bounds: to_rect(path.bounding_box()),
                path_length: Some(path.perimeter(accuracy)),
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "unparsable path data, treating as empty");
            empty
        }
    }
}

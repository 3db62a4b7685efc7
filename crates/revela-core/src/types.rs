use serde::{Deserialize, Serialize};

/// The kind of drawable element a shape was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// `<path>` — gets a stroke draw-in animation.
    Path,
    Rect,
    Polygon,
    Ellipse,
    Circle,
}

impl ShapeKind {
    /// Map an SVG element name to a shape kind. Other elements are not drawable shapes.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "path" => Some(ShapeKind::Path),
            "rect" => Some(ShapeKind::Rect),
            "polygon" => Some(ShapeKind::Polygon),
            "ellipse" => Some(ShapeKind::Ellipse),
            "circle" => Some(ShapeKind::Circle),
            _ => None,
        }
    }

    /// Whether this shape is drawn in along its stroke rather than faded.
    pub fn is_path(&self) -> bool {
        matches!(self, ShapeKind::Path)
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeKind::Path => write!(f, "path"),
            ShapeKind::Rect => write!(f, "rect"),
            ShapeKind::Polygon => write!(f, "polygon"),
            ShapeKind::Ellipse => write!(f, "ellipse"),
            ShapeKind::Circle => write!(f, "circle"),
        }
    }
}

/// User-agent tokens that mark a mobile-class device.
const MOBILE_UA_TOKENS: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Viewport class used to pick a timing profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportProfile {
    #[default]
    Default,
    /// Mobile-class viewport; staggers faster so the sequence finishes sooner.
    Constrained,
}

impl ViewportProfile {
    /// Classify a viewport from its width and user agent.
    ///
    /// A viewport is constrained when its width is at or below `breakpoint`
    /// or when the user agent names a mobile platform.
    pub fn detect(width: Option<f64>, user_agent: Option<&str>, breakpoint: f64) -> Self {
        let narrow = width.map_or(false, |w| w <= breakpoint);
        let mobile_ua = user_agent.map_or(false, |ua| {
            let ua = ua.to_ascii_lowercase();
            MOBILE_UA_TOKENS.iter().any(|token| ua.contains(token))
        });
        if narrow || mobile_ua {
            ViewportProfile::Constrained
        } else {
            ViewportProfile::Default
        }
    }
}

impl std::str::FromStr for ViewportProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" | "desktop" => Ok(ViewportProfile::Default),
            "constrained" | "mobile" => Ok(ViewportProfile::Constrained),
            other => Err(format!("unknown viewport profile '{}'", other)),
        }
    }
}

impl std::fmt::Display for ViewportProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewportProfile::Default => write!(f, "default"),
            ViewportProfile::Constrained => write!(f, "constrained"),
        }
    }
}

/// Easing function for animation interpolation.
///
/// The CSS keywords (`ease`, `ease-in`, `ease-out`, `ease-in-out`) follow the
/// cubic-bezier curves browsers use so sampled values match the emitted CSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    #[default]
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Apply the easing function to a normalized time value t in [0, 1].
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
        }
    }

    /// The CSS `<easing-function>` for this easing.
    pub fn css(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::Ease => "ease",
            Easing::EaseIn => "ease-in",
            Easing::EaseOut => "ease-out",
            Easing::EaseInOut => "ease-in-out",
        }
    }
}

/// Evaluate a CSS cubic-bezier timing curve with control points
/// (x1, y1), (x2, y2) at progress `x`.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    let curve = |a1: f64, a2: f64, s: f64| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a1 + 3.0 * inv * s * s * a2 + s * s * s
    };
    let slope = |a1: f64, a2: f64, s: f64| {
        let inv = 1.0 - s;
        3.0 * inv * inv * a1 + 6.0 * inv * s * (a2 - a1) + 3.0 * s * s * (1.0 - a2)
    };

    // Newton first, bisection if the slope flattens out.
    let mut s = x;
    for _ in 0..8 {
        let err = curve(x1, x2, s) - x;
        if err.abs() < 1e-7 {
            return curve(y1, y2, s);
        }
        let d = slope(x1, x2, s);
        if d.abs() < 1e-6 {
            break;
        }
        s = (s - err / d).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    s = x;
    for _ in 0..64 {
        let v = curve(x1, x2, s);
        if (v - x).abs() < 1e-7 {
            break;
        }
        if v < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    curve(y1, y2, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 5] = [
        Easing::Linear,
        Easing::Ease,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
    ];

    #[test]
    fn test_easing_linear() {
        let e = Easing::Linear;
        assert!((e.apply(0.0)).abs() < 0.001);
        assert!((e.apply(0.5) - 0.5).abs() < 0.001);
        assert!((e.apply(1.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_easing_ease_in() {
        assert!(Easing::EaseIn.apply(0.5) < 0.5); // easeIn is slower at start
    }

    #[test]
    fn test_easing_ease_out() {
        assert!(Easing::EaseOut.apply(0.5) > 0.5); // easeOut is faster at start
    }

    #[test]
    fn test_css_ease_midpoint() {
        // Browsers report ~0.8024 for `ease` at 50% progress.
        let v = Easing::Ease.apply(0.5);
        assert!((v - 0.8024).abs() < 0.002, "got {}", v);
    }

    #[test]
    fn test_easing_boundaries() {
        for easing in ALL {
            assert!(
                (easing.apply(0.0)).abs() < 0.001,
                "{:?} should start at 0",
                easing
            );
            assert!(
                (easing.apply(1.0) - 1.0).abs() < 0.001,
                "{:?} should end at 1",
                easing
            );
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 1..=20 {
                let v = easing.apply(i as f64 / 20.0);
                assert!(v + 1e-9 >= prev, "{:?} decreased at step {}", easing, i);
                prev = v;
            }
        }
    }

    #[test]
    fn test_easing_css_keywords() {
        assert_eq!(Easing::Linear.css(), "linear");
        assert_eq!(Easing::EaseOut.css(), "ease-out");
        assert_eq!(Easing::Ease.css(), "ease");
    }

    #[test]
    fn test_easing_serde_kebab_case() {
        let json = serde_json::to_string(&Easing::EaseOut).unwrap();
        assert_eq!(json, "\"ease-out\"");
        let back: Easing = serde_json::from_str("\"ease-in-out\"").unwrap();
        assert_eq!(back, Easing::EaseInOut);
    }

    #[test]
    fn test_shape_kind_from_tag() {
        assert_eq!(ShapeKind::from_tag("path"), Some(ShapeKind::Path));
        assert_eq!(ShapeKind::from_tag("circle"), Some(ShapeKind::Circle));
        assert_eq!(ShapeKind::from_tag("g"), None);
        assert_eq!(ShapeKind::from_tag("line"), None);
        assert!(ShapeKind::Path.is_path());
        assert!(!ShapeKind::Rect.is_path());
        assert_eq!(format!("{}", ShapeKind::Polygon), "polygon");
    }

    #[test]
    fn test_profile_detect_by_width() {
        assert_eq!(
            ViewportProfile::detect(Some(768.0), None, 768.0),
            ViewportProfile::Constrained
        );
        assert_eq!(
            ViewportProfile::detect(Some(1280.0), None, 768.0),
            ViewportProfile::Default
        );
        assert_eq!(
            ViewportProfile::detect(None, None, 768.0),
            ViewportProfile::Default
        );
    }

    #[test]
    fn test_profile_detect_by_user_agent() {
        let ua = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)";
        assert_eq!(
            ViewportProfile::detect(Some(1920.0), Some(ua), 768.0),
            ViewportProfile::Constrained
        );
        let ua = "Mozilla/5.0 (X11; Linux x86_64) Firefox/128.0";
        assert_eq!(
            ViewportProfile::detect(Some(1920.0), Some(ua), 768.0),
            ViewportProfile::Default
        );
    }

    #[test]
    fn test_profile_from_str() {
        assert_eq!(
            "mobile".parse::<ViewportProfile>().unwrap(),
            ViewportProfile::Constrained
        );
        assert_eq!(
            "Default".parse::<ViewportProfile>().unwrap(),
            ViewportProfile::Default
        );
        assert!("tablet".parse::<ViewportProfile>().is_err());
    }
}

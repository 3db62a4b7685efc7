use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::RevelaError;
use crate::math::ReferenceCorner;
use crate::time::Duration;
use crate::types::ViewportProfile;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RevealConfig {
    pub corner: ReferenceCorner,
    /// Viewports at or below this width (CSS px) use the constrained profile.
    pub constrained_max_width: f64,
    /// Number of shapes measured between cooperative yields.
    pub chunk_size: usize,
    /// Tolerance for path length measurement, in user units.
    pub length_accuracy: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            corner: ReferenceCorner::BottomRight,
            constrained_max_width: 768.0,
            chunk_size: 256,
            length_accuracy: 0.1,
        }
    }
}

/// Per-viewport timing constants for the reveal.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TimingProfile {
    /// Stagger between consecutive shapes.
    pub unit_delay: Duration,
    /// Path stroke draw-in duration.
    pub draw_duration: Duration,
    /// Path fill fade-in start, relative to the shape's delay.
    pub fill_offset: Duration,
    pub fill_duration: Duration,
    /// Pause after the draw-in before a path's stroke fades out.
    pub stroke_settle: Duration,
    pub stroke_fade_duration: Duration,
    /// Stroke and fill fade duration for non-path shapes.
    pub shape_fade_duration: Duration,
    /// Time a non-path shape keeps its stroke before fading it out.
    pub shape_hold: Duration,
}

impl TimingProfile {
    pub fn desktop() -> Self {
        Self {
            unit_delay: Duration::from_seconds(0.1),
            draw_duration: Duration::from_seconds(0.7),
            fill_offset: Duration::from_seconds(0.5),
            fill_duration: Duration::from_seconds(0.5),
            stroke_settle: Duration::from_seconds(0.7),
            stroke_fade_duration: Duration::from_seconds(0.4),
            shape_fade_duration: Duration::from_seconds(0.7),
            shape_hold: Duration::from_seconds(0.7),
        }
    }

    pub fn mobile() -> Self {
        Self {
            unit_delay: Duration::from_seconds(0.05),
            stroke_settle: Duration::from_seconds(0.5),
            shape_fade_duration: Duration::from_seconds(1.0),
            shape_hold: Duration::from_seconds(0.5),
            ..Self::desktop()
        }
    }
}

impl Default for TimingProfile {
    fn default() -> Self {
        Self::desktop()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimingConfig {
    #[serde(default = "TimingProfile::desktop")]
    pub default: TimingProfile,
    #[serde(default = "TimingProfile::mobile")]
    pub constrained: TimingProfile,
}

impl TimingConfig {
    pub fn profile(&self, profile: ViewportProfile) -> &TimingProfile {
        match profile {
            ViewportProfile::Default => &self.default,
            ViewportProfile::Constrained => &self.constrained,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            default: TimingProfile::desktop(),
            constrained: TimingProfile::mobile(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StylePolicy {
    /// Stroke applied to shapes without their own stroke (hex).
    pub fallback_stroke: String,
    /// Stroke width forced on every shape during the reveal (CSS length).
    pub stroke_width: String,
}

impl StylePolicy {
    /// Stroke to show during the reveal: the shape's own paint unless it is
    /// missing or `none`, otherwise the fallback.
    pub fn resolve_stroke(&self, own: Option<&str>) -> String {
        match own.map(str::trim) {
            Some(stroke) if !stroke.is_empty() && stroke != "none" => stroke.to_string(),
            _ => self.fallback_stroke.clone(),
        }
    }

    pub fn fallback_color(&self) -> Result<Color, crate::color::ColorError> {
        Color::from_hex(&self.fallback_stroke)
    }
}

impl Default for StylePolicy {
    fn default() -> Self {
        Self {
            fallback_stroke: "#333".to_string(),
            stroke_width: "2px".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: concat!("revela/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct RevelaConfig {
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub style: StylePolicy,
    #[serde(default)]
    pub loader: LoaderConfig,
}

impl RevelaConfig {
    pub fn load_from_file(path: &std::path::Path) -> Result<Self, RevelaError> {
        let contents = std::fs::read_to_string(path)?;
        let config: RevelaConfig =
            toml::from_str(&contents).map_err(|e| RevelaError::config(e.to_string(), path))?;
        config
            .validate()
            .map_err(|message| RevelaError::config(message, path))?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), RevelaError> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| RevelaError::config(e.to_string(), path))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Check values a TOML file can get wrong but serde cannot catch.
    pub fn validate(&self) -> Result<(), String> {
        if self.reveal.chunk_size == 0 {
            return Err("reveal.chunk_size must be at least 1".into());
        }
        if self.reveal.length_accuracy.is_nan() || self.reveal.length_accuracy <= 0.0 {
            return Err("reveal.length_accuracy must be positive".into());
        }
        if self.style.fallback_color().is_err() {
            return Err(format!(
                "style.fallback_stroke '{}' is not a hex color",
                self.style.fallback_stroke
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_timings() {
        let cfg = RevelaConfig::default();
        assert_eq!(cfg.timing.default.unit_delay, Duration::from_seconds(0.1));
        assert_eq!(
            cfg.timing.constrained.unit_delay,
            Duration::from_seconds(0.05)
        );
        assert_eq!(cfg.timing.constrained.fill_offset, Duration::from_seconds(0.5));
        assert_eq!(cfg.reveal.corner, ReferenceCorner::BottomRight);
        assert_eq!(cfg.style.fallback_stroke, "#333");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_constrained_stagger_is_shorter() {
        let cfg = TimingConfig::default();
        assert!(
            cfg.profile(ViewportProfile::Constrained).unit_delay
                < cfg.profile(ViewportProfile::Default).unit_delay
        );
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let cfg: RevelaConfig = toml::from_str(
            r##"
            [reveal]
            corner = "top-left"

            [timing.constrained]
            unit_delay = 0.02

            [style]
            fallback_stroke = "#112233"
            "##,
        )
        .unwrap();
        assert_eq!(cfg.reveal.corner, ReferenceCorner::TopLeft);
        assert_eq!(cfg.reveal.chunk_size, 256);
        assert_eq!(
            cfg.timing.constrained.unit_delay,
            Duration::from_seconds(0.02)
        );
        // Unset fields fall back to the desktop profile defaults.
        assert_eq!(
            cfg.timing.constrained.draw_duration,
            Duration::from_seconds(0.7)
        );
        assert_eq!(cfg.timing.default, TimingProfile::desktop());
        assert_eq!(cfg.style.stroke_width, "2px");
    }

    #[test]
    fn test_resolve_stroke() {
        let style = StylePolicy::default();
        assert_eq!(style.resolve_stroke(Some(" red ")), "red");
        assert_eq!(style.resolve_stroke(Some("none")), "#333");
        assert_eq!(style.resolve_stroke(Some("")), "#333");
        assert_eq!(style.resolve_stroke(None), "#333");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut cfg = RevelaConfig::default();
        cfg.reveal.chunk_size = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = RevelaConfig::default();
        cfg.style.fallback_stroke = "grey".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join(format!("revela-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("revela.toml");

        let mut cfg = RevelaConfig::default();
        cfg.reveal.corner = ReferenceCorner::TopRight;
        cfg.save_to_file(&path).unwrap();

        let loaded = RevelaConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.reveal.corner, ReferenceCorner::TopRight);
        assert_eq!(loaded.timing.constrained, TimingProfile::mobile());

        std::fs::remove_dir_all(&dir).ok();
    }
}

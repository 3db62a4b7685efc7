//! Turning a reveal order into per-shape declarative animations.

use revela_core::{
    ContentHash, Duration, Easing, Rect, ReferenceCorner, RevelaConfig, ShapeKind, StylePolicy,
    TimingProfile, ViewportProfile,
};
use serde::{Deserialize, Serialize};

use crate::animation::{AnimatableProperty, Animation};
use crate::reveal::{compute_reveal_order, RevealRecord};
use crate::scene::Scene;
use crate::shape::ShapeId;

/// Style a shape is put into before its animations start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialStyle {
    pub stroke: String,
    pub stroke_width: String,
    pub fill_opacity: f64,
    pub stroke_opacity: f64,
    /// Dash pattern and offset, both the path length; paths only.
    pub stroke_dash: Option<f64>,
}

/// Everything scheduled for one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeTimeline {
    pub shape: ShapeId,
    pub kind: ShapeKind,
    pub order: usize,
    pub distance: f64,
    pub delay: Duration,
    pub initial: InitialStyle,
    /// Later entries win while several animate the same property.
    pub animations: Vec<Animation>,
}

/// Animated property values of one shape at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeSample {
    pub shape: ShapeId,
    pub stroke_dashoffset: Option<f64>,
    pub stroke_opacity: f64,
    pub fill_opacity: f64,
}

impl ShapeTimeline {
    fn from_record(record: &RevealRecord, timing: &TimingProfile, style: &StylePolicy) -> Self {
        let kind = record.kind;
        let stroke = style.resolve_stroke(record.stroke.as_deref());
        let delay = timing.unit_delay * record.order as f64;

        let (initial, animations) = if kind.is_path() {
            let length = record.path_length.unwrap_or(0.0);
            let initial = InitialStyle {
                stroke,
                stroke_width: style.stroke_width.clone(),
                fill_opacity: 0.0,
                stroke_opacity: 1.0,
                stroke_dash: Some(length),
            };
            let animations = vec![
                Animation::from_to(
                    AnimatableProperty::StrokeDashoffset,
                    length,
                    0.0,
                    timing.draw_duration,
                    Easing::Linear,
                )
                .with_delay(delay),
                Animation::from_to(
                    AnimatableProperty::FillOpacity,
                    0.0,
                    1.0,
                    timing.fill_duration,
                    Easing::EaseOut,
                )
                .with_delay(delay + timing.fill_offset),
                Animation::from_to(
                    AnimatableProperty::StrokeOpacity,
                    1.0,
                    0.0,
                    timing.stroke_fade_duration,
                    Easing::Ease,
                )
                .with_delay(delay + timing.draw_duration + timing.stroke_settle),
            ];
            (initial, animations)
        } else {
            let initial = InitialStyle {
                stroke,
                stroke_width: style.stroke_width.clone(),
                fill_opacity: 0.0,
                stroke_opacity: 0.0,
                stroke_dash: None,
            };
            let fade = timing.shape_fade_duration;
            let animations = vec![
                Animation::from_to(AnimatableProperty::StrokeOpacity, 0.0, 1.0, fade, Easing::Ease)
                    .with_delay(delay),
                Animation::from_to(AnimatableProperty::FillOpacity, 0.0, 1.0, fade, Easing::Ease)
                    .with_delay(delay),
                Animation::from_to(AnimatableProperty::StrokeOpacity, 1.0, 0.0, fade, Easing::Ease)
                    .with_delay(delay + timing.shape_hold),
            ];
            (initial, animations)
        };

        Self {
            shape: record.shape,
            kind,
            order: record.order,
            distance: record.distance,
            delay,
            initial,
            animations,
        }
    }

    /// Time at which the last animation of this shape settles.
    pub fn end_time(&self) -> Duration {
        self.animations
            .iter()
            .map(Animation::end_time)
            .fold(self.delay, Duration::max)
    }

    /// Property values at `time` (relative to the reveal start).
    pub fn sample(&self, time: Duration) -> ShapeSample {
        let mut sample = ShapeSample {
            shape: self.shape,
            stroke_dashoffset: self.initial.stroke_dash,
            stroke_opacity: self.initial.stroke_opacity,
            fill_opacity: self.initial.fill_opacity,
        };
        for animation in &self.animations {
            let Some(value) = animation.evaluate(time) else {
                continue;
            };
            match animation.property {
                AnimatableProperty::StrokeDashoffset => sample.stroke_dashoffset = Some(value),
                AnimatableProperty::StrokeOpacity => sample.stroke_opacity = value,
                AnimatableProperty::FillOpacity => sample.fill_opacity = value,
            }
        }
        sample
    }
}

/// The full reveal: one timeline per shape, in reveal order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealSchedule {
    pub profile: ViewportProfile,
    pub corner: ReferenceCorner,
    pub viewport: Rect,
    pub source_hash: Option<ContentHash>,
    pub timelines: Vec<ShapeTimeline>,
}

impl RevealSchedule {
    /// Order the scene's shapes and schedule their animations for `profile`.
    pub fn build(scene: &Scene, config: &RevelaConfig, profile: ViewportProfile) -> Self {
        let corner = config.reveal.corner;
        let timing = config.timing.profile(profile);
        let records = compute_reveal_order(scene, corner);

        let timelines: Vec<ShapeTimeline> = records
            .iter()
            .map(|record| ShapeTimeline::from_record(record, timing, &config.style))
            .collect();

        tracing::debug!(
            shapes = timelines.len(),
            %profile,
            %corner,
            "built reveal schedule"
        );

        Self {
            profile,
            corner,
            viewport: scene.viewport,
            source_hash: scene.source_hash.clone(),
            timelines,
        }
    }

    pub fn len(&self) -> usize {
        self.timelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timelines.is_empty()
    }

    /// Time until every shape has settled.
    pub fn total_duration(&self) -> Duration {
        self.timelines
            .iter()
            .map(ShapeTimeline::end_time)
            .fold(Duration::zero(), Duration::max)
    }

    pub fn timeline_for(&self, shape: ShapeId) -> Option<&ShapeTimeline> {
        self.timelines.iter().find(|t| t.shape == shape)
    }

    /// Property values of every shape at `time`, in reveal order.
    pub fn sample(&self, time: Duration) -> Vec<ShapeSample> {
        self.timelines.iter().map(|t| t.sample(time)).collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 100.0)
    }

    fn shape_at(index: usize, kind: ShapeKind, distance: f64) -> Shape {
        Shape::new(
            ShapeId::new(index),
            kind,
            Rect::new(100.0 - distance, 100.0, 0.0, 0.0),
        )
    }

    fn approx(a: Duration, secs: f64) -> bool {
        (a.as_seconds() - secs).abs() < 1e-9
    }

    #[test]
    fn test_example_three_shapes() {
        let mut scene = Scene::new(viewport());
        scene.add_shape(shape_at(0, ShapeKind::Rect, 50.0));
        scene.add_shape(shape_at(1, ShapeKind::Rect, 10.0));
        scene.add_shape(shape_at(2, ShapeKind::Rect, 30.0));

        let schedule =
            RevealSchedule::build(&scene, &RevelaConfig::default(), ViewportProfile::Default);
        let order: Vec<usize> = schedule.timelines.iter().map(|t| t.shape.index()).collect();
        assert_eq!(order, vec![1, 2, 0]);
        assert!(approx(schedule.timelines[0].delay, 0.0));
        assert!(approx(schedule.timelines[1].delay, 0.1));
        assert!(approx(schedule.timelines[2].delay, 0.2));
    }

    #[test]
    fn test_ids_need_not_match_positions() {
        let mut scene = Scene::new(viewport());
        scene.add_shape(shape_at(5, ShapeKind::Rect, 10.0).with_stroke("red"));
        scene.add_shape(shape_at(0, ShapeKind::Path, 20.0).with_path_length(30.0));

        let schedule =
            RevealSchedule::build(&scene, &RevelaConfig::default(), ViewportProfile::Default);
        assert_eq!(schedule.len(), 2);

        let rect = &schedule.timelines[0];
        assert_eq!(rect.shape, ShapeId::new(5));
        assert_eq!(rect.kind, ShapeKind::Rect);
        assert_eq!(rect.initial.stroke, "red");
        assert_eq!(rect.initial.stroke_dash, None);

        let path = &schedule.timelines[1];
        assert_eq!(path.shape, ShapeId::new(0));
        assert_eq!(path.kind, ShapeKind::Path);
        assert_eq!(path.initial.stroke, "#333");
        assert_eq!(path.initial.stroke_dash, Some(30.0));
    }

    #[test]
    fn test_constrained_delay_is_shorter_for_same_index() {
        let mut scene = Scene::new(viewport());
        for i in 0..5 {
            scene.add_shape(shape_at(i, ShapeKind::Path, i as f64).with_path_length(10.0));
        }
        let cfg = RevelaConfig::default();
        let desktop = RevealSchedule::build(&scene, &cfg, ViewportProfile::Default);
        let mobile = RevealSchedule::build(&scene, &cfg, ViewportProfile::Constrained);
        for (d, m) in desktop.timelines.iter().zip(&mobile.timelines).skip(1) {
            assert_eq!(d.order, m.order);
            assert!(m.delay < d.delay);
        }
        assert!(mobile.total_duration() < desktop.total_duration());
    }

    #[test]
    fn test_empty_scene_gives_empty_schedule() {
        let scene = Scene::new(viewport());
        let schedule =
            RevealSchedule::build(&scene, &RevelaConfig::default(), ViewportProfile::Default);
        assert!(schedule.is_empty());
        assert_eq!(schedule.total_duration(), Duration::zero());
        assert!(schedule.sample(Duration::from_seconds(1.0)).is_empty());
    }

    #[test]
    fn test_path_timeline_shape() {
        let mut scene = Scene::new(viewport());
        scene.add_shape(shape_at(0, ShapeKind::Path, 0.0).with_path_length(120.0));
        let schedule =
            RevealSchedule::build(&scene, &RevelaConfig::default(), ViewportProfile::Default);
        let t = &schedule.timelines[0];

        assert_eq!(t.initial.stroke_dash, Some(120.0));
        assert_eq!(t.initial.stroke, "#333");
        assert_eq!(t.initial.stroke_opacity, 1.0);
        assert_eq!(t.animations.len(), 3);

        let draw = &t.animations[0];
        assert_eq!(draw.property, AnimatableProperty::StrokeDashoffset);
        assert_eq!(draw.start_value(), Some(120.0));
        assert_eq!(draw.end_value(), Some(0.0));
        assert_eq!(draw.easing(), Easing::Linear);
        assert!(approx(draw.duration(), 0.7));

        let fill = &t.animations[1];
        assert_eq!(fill.property, AnimatableProperty::FillOpacity);
        assert!(approx(fill.delay, 0.5));
        assert_eq!(fill.easing(), Easing::EaseOut);

        let fade = &t.animations[2];
        assert_eq!(fade.property, AnimatableProperty::StrokeOpacity);
        assert!(approx(fade.delay, 1.4));
        assert!(approx(fade.duration(), 0.4));
        assert!(approx(t.end_time(), 1.8));
    }

    #[test]
    fn test_constrained_path_settles_sooner() {
        let mut scene = Scene::new(viewport());
        scene.add_shape(shape_at(0, ShapeKind::Path, 0.0).with_path_length(10.0));
        let schedule =
            RevealSchedule::build(&scene, &RevelaConfig::default(), ViewportProfile::Constrained);
        assert!(approx(schedule.timelines[0].animations[2].delay, 1.2));
    }

    #[test]
    fn test_shape_timeline_constants() {
        let mut scene = Scene::new(viewport());
        scene.add_shape(shape_at(0, ShapeKind::Circle, 0.0).with_stroke("#abc"));
        let cfg = RevelaConfig::default();

        let desktop = RevealSchedule::build(&scene, &cfg, ViewportProfile::Default);
        let t = &desktop.timelines[0];
        assert_eq!(t.initial.stroke, "#abc");
        assert_eq!(t.initial.stroke_dash, None);
        assert_eq!(t.initial.stroke_opacity, 0.0);
        assert!(approx(t.animations[0].duration(), 0.7));
        assert!(approx(t.animations[2].delay, 0.7));

        let mobile = RevealSchedule::build(&scene, &cfg, ViewportProfile::Constrained);
        let t = &mobile.timelines[0];
        assert!(approx(t.animations[0].duration(), 1.0));
        assert!(approx(t.animations[2].delay, 0.5));
    }

    #[test]
    fn test_sampling_a_path() {
        let mut scene = Scene::new(viewport());
        scene.add_shape(shape_at(0, ShapeKind::Path, 0.0).with_path_length(100.0));
        let schedule =
            RevealSchedule::build(&scene, &RevelaConfig::default(), ViewportProfile::Default);

        let s = &schedule.sample(Duration::zero())[0];
        assert_eq!(s.stroke_dashoffset, Some(100.0));
        assert_eq!(s.fill_opacity, 0.0);
        assert_eq!(s.stroke_opacity, 1.0);

        let s = &schedule.sample(Duration::from_seconds(0.35))[0];
        let offset = s.stroke_dashoffset.unwrap();
        assert!((offset - 50.0).abs() < 1e-6);

        let s = &schedule.sample(Duration::from_seconds(10.0))[0];
        assert_eq!(s.stroke_dashoffset, Some(0.0));
        assert_eq!(s.fill_opacity, 1.0);
        assert_eq!(s.stroke_opacity, 0.0);
    }

    #[test]
    fn test_sampling_a_shape_prefers_later_stroke_animation() {
        let mut scene = Scene::new(viewport());
        scene.add_shape(shape_at(0, ShapeKind::Rect, 0.0));
        let schedule =
            RevealSchedule::build(&scene, &RevelaConfig::default(), ViewportProfile::Constrained);

        // Fade-in runs 0..1.0s, fade-out starts at 0.5s and wins from then on.
        let s = &schedule.sample(Duration::from_seconds(0.5))[0];
        assert!((s.stroke_opacity - 1.0).abs() < 1e-9);
        let s = &schedule.sample(Duration::from_seconds(1.5))[0];
        assert!(s.stroke_opacity.abs() < 1e-9);
        assert!((s.fill_opacity - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_schedule_serializes() {
        let mut scene = Scene::new(viewport());
        scene.add_shape(shape_at(0, ShapeKind::Path, 0.0).with_path_length(3.0));
        let schedule =
            RevealSchedule::build(&scene, &RevelaConfig::default(), ViewportProfile::Default);
        let json = schedule.to_json().unwrap();
        assert!(json.contains("\"stroke-dashoffset\""));
        assert!(json.contains("\"bottom-right\""));

        let back: RevealSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back.timelines[0].kind, ShapeKind::Path);
        assert_eq!(back.timelines[0].animations.len(), 3);
        assert!(approx(back.total_duration(), 1.8));
    }
}

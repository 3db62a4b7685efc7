use revela_core::{Duration, Easing};
use serde::{Deserialize, Serialize};

/// Identifies the style property being animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimatableProperty {
    StrokeDashoffset,
    StrokeOpacity,
    FillOpacity,
}

impl AnimatableProperty {
    /// The CSS property name.
    pub fn css_name(&self) -> &'static str {
        match self {
            AnimatableProperty::StrokeDashoffset => "stroke-dashoffset",
            AnimatableProperty::StrokeOpacity => "stroke-opacity",
            AnimatableProperty::FillOpacity => "fill-opacity",
        }
    }
}

impl std::fmt::Display for AnimatableProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.css_name())
    }
}

/// A keyframe: a value at a specific time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Time offset from the start of the animation.
    pub time: Duration,
    /// Target value at this keyframe.
    pub value: f64,
    /// Easing function to use when interpolating TO this keyframe.
    pub easing: Easing,
}

impl Keyframe {
    pub fn new(time: Duration, value: f64) -> Self {
        Self {
            time,
            value,
            easing: Easing::Linear,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// An animation definition: a property + keyframes, held at its final value
/// once finished (fill mode "forwards").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    /// The property being animated.
    pub property: AnimatableProperty,
    /// Ordered keyframes (must be sorted by time).
    pub keyframes: Vec<Keyframe>,
    /// Delay before the animation starts (relative to the reveal start).
    pub delay: Duration,
}

impl Animation {
    /// Create a simple "from → to" animation.
    pub fn from_to(
        property: AnimatableProperty,
        from: f64,
        to: f64,
        duration: Duration,
        easing: Easing,
    ) -> Self {
        Self {
            property,
            keyframes: vec![
                Keyframe::new(Duration::zero(), from),
                Keyframe::new(duration, to).with_easing(easing),
            ],
            delay: Duration::zero(),
        }
    }

    /// Set the delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Value of the first keyframe.
    pub fn start_value(&self) -> Option<f64> {
        self.keyframes.first().map(|k| k.value)
    }

    /// Value of the last keyframe.
    pub fn end_value(&self) -> Option<f64> {
        self.keyframes.last().map(|k| k.value)
    }

    /// Easing of the final segment (the whole curve for a from/to animation).
    pub fn easing(&self) -> Easing {
        self.keyframes
            .last()
            .map(|k| k.easing)
            .unwrap_or_default()
    }

    /// Evaluate the animation at a given time (relative to the reveal start).
    /// Returns None if time is before the animation starts.
    pub fn evaluate(&self, time: Duration) -> Option<f64> {
        if self.keyframes.is_empty() {
            return None;
        }

        let effective_secs = time.as_seconds() - self.delay.as_seconds();
        if effective_secs < 0.0 {
            return None;
        }

        if effective_secs <= self.keyframes[0].time.as_seconds() {
            return Some(self.keyframes[0].value);
        }

        let last = &self.keyframes[self.keyframes.len() - 1];
        if effective_secs >= last.time.as_seconds() {
            return Some(last.value);
        }

        for pair in self.keyframes.windows(2) {
            let (kf_a, kf_b) = (&pair[0], &pair[1]);
            let t_a = kf_a.time.as_seconds();
            let t_b = kf_b.time.as_seconds();

            if effective_secs >= t_a && effective_secs <= t_b {
                let segment_duration = t_b - t_a;
                if segment_duration == 0.0 {
                    return Some(kf_b.value);
                }
                let local_t = (effective_secs - t_a) / segment_duration;
                let eased_t = kf_b.easing.apply(local_t);
                return Some(kf_a.value + (kf_b.value - kf_a.value) * eased_t);
            }
        }

        Some(last.value)
    }

    /// Get the total duration of the animation (from first to last keyframe).
    pub fn duration(&self) -> Duration {
        match (self.keyframes.first(), self.keyframes.last()) {
            (Some(first), Some(last)) => last.time - first.time,
            _ => Duration::zero(),
        }
    }

    /// Time at which the animation reaches its final value.
    pub fn end_time(&self) -> Duration {
        self.delay + self.duration()
    }
}

//! CSS rendition of a reveal schedule.
//!
//! Each shape gets a rule keyed on its `data-revela-shape` attribute that
//! puts it into its initial style and runs its animations. Keyframes are
//! shared between shapes that animate between the same values.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use revela_ir::{AnimatableProperty, Animation, RevealSchedule, ShapeTimeline};

use crate::style::is_css_safe;

/// Attribute tying an element to its rule.
pub const SHAPE_ATTRIBUTE: &str = "data-revela-shape";

/// A schedule that replaces the primary one below a viewport width.
#[derive(Debug, Clone, Copy)]
pub struct ResponsiveVariant<'a> {
    pub max_width: f64,
    pub schedule: &'a RevealSchedule,
}

/// Format a number for CSS without trailing noise.
pub fn css_number(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}

/// Stroke dash offsets start from each path's own length, so their keyframes
/// only name the end value and let the rule's initial style supply the start.
fn skips_first_frame(animation: &Animation) -> bool {
    animation.property == AnimatableProperty::StrokeDashoffset
}

fn keyframes_name(animation: &Animation) -> String {
    let skip = usize::from(skips_first_frame(animation));
    let values: Vec<String> = animation
        .keyframes
        .iter()
        .skip(skip)
        .map(|k| css_number(k.value).replace('.', "_").replace('-', "m"))
        .collect();
    format!("revela-{}-{}", animation.property.css_name(), values.join("-"))
}

fn keyframes_body(animation: &Animation) -> String {
    let duration = animation.duration().as_seconds();
    let skip = usize::from(skips_first_frame(animation));
    let mut body = String::new();
    for keyframe in animation.keyframes.iter().skip(skip) {
        let percent = if duration > 0.0 {
            keyframe.time.as_seconds() / duration * 100.0
        } else {
            100.0
        };
        let _ = write!(
            body,
            " {}% {{ {}: {}; }}",
            css_number(percent),
            animation.property.css_name(),
            css_number(keyframe.value)
        );
    }
    body
}

fn shape_rule(timeline: &ShapeTimeline, indent: &str) -> String {
    let initial = &timeline.initial;
    let mut declarations = Vec::new();
    if is_css_safe(&initial.stroke) {
        declarations.push(format!("stroke: {}", initial.stroke));
    } else {
        tracing::warn!(shape = %timeline.shape, "stroke paint not representable in CSS, leaving it unset");
    }
    if is_css_safe(&initial.stroke_width) {
        declarations.push(format!("stroke-width: {}", initial.stroke_width));
    }
    declarations.push(format!("fill-opacity: {}", css_number(initial.fill_opacity)));
    declarations.push(format!("stroke-opacity: {}", css_number(initial.stroke_opacity)));
    if let Some(length) = initial.stroke_dash {
        declarations.push(format!("stroke-dasharray: {}", css_number(length)));
        declarations.push(format!("stroke-dashoffset: {}", css_number(length)));
    }
    let animations: Vec<String> = timeline
        .animations
        .iter()
        .map(|a| {
            format!(
                "{} {}ms {} {}ms forwards",
                keyframes_name(a),
                a.duration().whole_millis(),
                a.easing().css(),
                a.delay.whole_millis()
            )
        })
        .collect();
    if !animations.is_empty() {
        declarations.push(format!("animation: {}", animations.join(", ")));
    }

    let mut rule = format!(
        "{indent}[{}=\"{}\"] {{\n",
        SHAPE_ATTRIBUTE,
        timeline.shape.index()
    );
    for declaration in declarations {
        let _ = writeln!(rule, "{indent}  {};", declaration);
    }
    let _ = writeln!(rule, "{indent}}}");
    rule
}

/// Render the stylesheet for `schedule`, optionally with a media query that
/// switches to `responsive` on narrow viewports.
pub fn reveal_stylesheet(
    schedule: &RevealSchedule,
    responsive: Option<ResponsiveVariant<'_>>,
) -> String {
    let mut keyframes = BTreeMap::new();
    let all_timelines = schedule
        .timelines
        .iter()
        .chain(responsive.iter().flat_map(|r| r.schedule.timelines.iter()));
    for timeline in all_timelines {
        for animation in &timeline.animations {
            keyframes
                .entry(keyframes_name(animation))
                .or_insert_with(|| keyframes_body(animation));
        }
    }

    let mut css = String::new();
    for (name, body) in &keyframes {
        let _ = writeln!(css, "@keyframes {} {{{} }}", name, body);
    }
    for timeline in &schedule.timelines {
        css.push_str(&shape_rule(timeline, ""));
    }
    if let Some(variant) = responsive {
        let _ = writeln!(
            css,
            "@media (max-width: {}px) {{",
            css_number(variant.max_width)
        );
        for timeline in &variant.schedule.timelines {
            css.push_str(&shape_rule(timeline, "  "));
        }
        css.push_str("}\n");
    }
    css
}

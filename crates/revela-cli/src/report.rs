//! Human-readable renderings of a schedule for the terminal.

use std::fmt::Write as _;

use revela_core::Duration;
use revela_ir::{RevealSchedule, Scene, ShapeSample};

/// Tree view of the reveal order.
pub fn inspect_tree(source: &str, scene: &Scene, schedule: &RevealSchedule) -> String {
    let mut out = String::new();
    let vp = schedule.viewport;
    let _ = writeln!(out, "🔍 Revela Reveal Inspector");
    let _ = writeln!(
        out,
        "📦 Source: {} ({}x{} viewport, corner {}, profile {})",
        source, vp.width, vp.height, schedule.corner, schedule.profile
    );
    if let Some(hash) = &schedule.source_hash {
        let _ = writeln!(out, "   sha256:{}", hash);
    }
    let _ = writeln!(
        out,
        "└── 🎞️  {} shapes, settles at {}",
        schedule.len(),
        schedule.total_duration()
    );

    let count = schedule.timelines.len();
    for (i, timeline) in schedule.timelines.iter().enumerate() {
        let branch = if i + 1 == count { "└──" } else { "├──" };
        let length = scene
            .get_shape(timeline.shape)
            .and_then(|s| s.path_length)
            .map(|l| format!(" len {:.1}", l))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "    {} [{}] {} {} d={:.2} delay {} ends {}{}",
            branch,
            timeline.order,
            timeline.kind,
            timeline.shape,
            timeline.distance,
            timeline.delay,
            timeline.end_time(),
            length
        );
    }
    out
}

fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.3}", v))
}

/// Table of sampled property values.
pub fn sample_table(time: Duration, samples: &[ShapeSample]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "⏱️  t = {}", time);
    let _ = writeln!(
        out,
        "{:<8} {:>12} {:>10} {:>10}",
        "shape", "dashoffset", "stroke", "fill"
    );
    for sample in samples {
        let _ = writeln!(
            out,
            "{:<8} {:>12} {:>10} {:>10}",
            sample.shape.to_string(),
            cell(sample.stroke_dashoffset),
            cell(Some(sample.stroke_opacity)),
            cell(Some(sample.fill_opacity)),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use revela_core::{RevelaConfig, ViewportProfile};
    use revela_ir::SceneBuilder;

    fn fixture() -> (Scene, RevealSchedule) {
        let scene = SceneBuilder::new(100.0, 100.0)
            .rect(0.0, 0.0, 10.0, 10.0)
            .path(90.0, 90.0, 10.0, 10.0, 14.0)
            .build();
        let schedule =
            RevealSchedule::build(&scene, &RevelaConfig::default(), ViewportProfile::Default);
        (scene, schedule)
    }

    #[test]
    fn test_inspect_tree_lists_shapes_in_reveal_order() {
        let (scene, schedule) = fixture();
        let tree = inspect_tree("map.svg", &scene, &schedule);
        let lines: Vec<&str> = tree.lines().collect();

        assert!(lines[1].contains("map.svg (100x100 viewport, corner bottom-right, profile default)"));
        assert!(lines[3].contains("├── [0] path #1 d=0.00 delay 0ms"));
        assert!(lines[3].ends_with("len 14.0"));
        assert!(lines[4].contains("└── [1] rect #0"));
        assert!(lines[4].contains("delay 100ms"));
    }

    #[test]
    fn test_sample_table() {
        let (_, schedule) = fixture();
        let t = Duration::from_seconds(10.0);
        let table = sample_table(t, &schedule.sample(t));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("#1"));
        assert!(lines[2].contains("0.000"));
        assert!(lines[3].starts_with("#0"));
        assert!(lines[3].contains(" - "));
    }
}

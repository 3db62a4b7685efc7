use crate::schedule::RevealSchedule;
use revela_core::RevelaError;

/// Validate a schedule for structural correctness.
pub fn validate_schedule(schedule: &RevealSchedule) -> Result<(), Vec<RevelaError>> {
    let mut errors = Vec::new();

    let mut seen = std::collections::HashSet::new();
    let mut previous: Option<(usize, f64, f64)> = None;

    for (position, timeline) in schedule.timelines.iter().enumerate() {
        if timeline.order != position {
            errors.push(RevelaError::IrValidation(format!(
                "shape {} has order {} at position {}",
                timeline.shape, timeline.order, position
            )));
        }

        if !seen.insert(timeline.shape) {
            errors.push(RevelaError::IrValidation(format!(
                "shape {} is scheduled twice",
                timeline.shape
            )));
        }

        if let Some((prev_order, prev_distance, prev_delay)) = previous {
            if timeline.distance < prev_distance {
                errors.push(RevelaError::IrValidation(format!(
                    "shape {} (distance {}) follows a farther shape at order {}",
                    timeline.shape, timeline.distance, prev_order
                )));
            }
            if timeline.delay.as_seconds() < prev_delay {
                errors.push(RevelaError::IrValidation(format!(
                    "shape {} starts before the shape preceding it",
                    timeline.shape
                )));
            }
        }
        previous = Some((
            timeline.order,
            timeline.distance,
            timeline.delay.as_seconds(),
        ));

        for animation in &timeline.animations {
            if animation.keyframes.len() < 2 {
                errors.push(RevelaError::IrValidation(format!(
                    "shape {}: {} animation needs at least two keyframes",
                    timeline.shape, animation.property
                )));
            }
            let sorted = animation
                .keyframes
                .windows(2)
                .all(|w| w[0].time <= w[1].time);
            if !sorted {
                errors.push(RevelaError::IrValidation(format!(
                    "shape {}: {} keyframes are out of order",
                    timeline.shape, animation.property
                )));
            }
            if animation.delay < timeline.delay {
                errors.push(RevelaError::IrValidation(format!(
                    "shape {}: {} starts before the shape's delay",
                    timeline.shape, animation.property
                )));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

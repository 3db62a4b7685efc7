//! # revela-ir
//!
//! The Revela Intermediate Representation: a scene of measured shapes, the
//! corner-distance reveal order derived from it, and the declarative animation
//! schedule that staggers each shape's draw-in.
//!
//! Every front-end (SVG loader, programmatic builder) produces a [`Scene`];
//! every output (JSON, animated SVG, sampling) consumes a [`RevealSchedule`].

pub mod animation;
pub mod builder;
pub mod reveal;
pub mod scene;
pub mod schedule;
pub mod shape;
pub mod validate;

pub use animation::{AnimatableProperty, Animation, Keyframe};
pub use builder::SceneBuilder;
pub use reveal::{compute_reveal_order, RevealRecord};
pub use scene::Scene;
pub use schedule::{InitialStyle, RevealSchedule, ShapeSample, ShapeTimeline};
pub use shape::{Shape, ShapeId};
pub use validate::validate_schedule;

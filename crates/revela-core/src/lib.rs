//! # revela-core
//!
//! Core types and primitives for the Revela reveal sequencer.
//! This crate contains foundational types shared across all Revela crates:
//! durations, easing functions, geometry, colors, content hashes,
//! configuration and error types.

pub mod color;
pub mod config;
pub mod error;
pub mod hash;
pub mod math;
pub mod time;
pub mod types;

pub use config::*;

pub use color::Color;
pub use error::{RevelaError, RevelaResult};
pub use hash::ContentHash;
pub use math::{Point2D, Rect, ReferenceCorner};
pub use time::Duration;
pub use types::{Easing, ShapeKind, ViewportProfile};

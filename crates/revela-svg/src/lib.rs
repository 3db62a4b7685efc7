//! # revela-svg
//!
//! SVG front-end and back-end for Revela: parses a document into a
//! [`revela_ir::Scene`] of measured shapes, and writes a copy of the document
//! that plays a [`revela_ir::RevealSchedule`] through embedded CSS animations.

pub mod animate;
pub mod css;
pub mod document;
pub mod geometry;
pub mod style;

pub use animate::{aspect_alignment, render_animated_svg};
pub use css::{reveal_stylesheet, ResponsiveVariant};
pub use document::SvgDocument;

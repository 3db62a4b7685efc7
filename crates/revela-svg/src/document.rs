//! SVG document type and scene extraction

use std::ops::Range;

use revela_core::{ContentHash, Rect, RevealConfig, RevelaError, RevelaResult, ShapeKind};
use revela_ir::{Scene, Shape, ShapeId};

use crate::geometry::{self, parse_length, parse_number_list, ShapeAttributes};
use crate::style::own_stroke;

/// Containers whose children are never rendered directly.
const NON_RENDERED: &[&str] = &[
    "defs",
    "clipPath",
    "mask",
    "symbol",
    "pattern",
    "marker",
    "linearGradient",
    "radialGradient",
];

/// A loaded SVG document. Keeps the source text so animated output can be
/// spliced into it later.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    text: String,
    hash: ContentHash,
}

/// A drawable element copied out of the parsed tree.
#[derive(Debug, Clone)]
pub(crate) struct ShapeElement {
    pub kind: ShapeKind,
    pub attrs: ShapeAttributes,
    pub stroke: Option<String>,
    /// Byte range of the element's start tag.
    pub start_tag: Range<usize>,
    /// Byte offset just past the element name.
    pub name_end: usize,
}

/// Byte positions of the `<svg>` root's start tag.
#[derive(Debug, Clone)]
pub(crate) struct RootTag {
    pub name: String,
    pub start_tag: Range<usize>,
    pub name_end: usize,
    pub self_closing: bool,
}

/// Everything needed from one parse of the document.
#[derive(Debug, Clone)]
pub(crate) struct Outline {
    pub root: RootTag,
    pub viewport: Option<Rect>,
    pub shapes: Vec<ShapeElement>,
    /// Ranges of reveal stylesheets left by an earlier run.
    pub stale_styles: Vec<Range<usize>>,
}

impl SvgDocument {
    /// Load an SVG document from raw bytes.
    pub fn from_data(data: &[u8]) -> RevelaResult<Self> {
        let text = std::str::from_utf8(data)
            .map_err(|e| RevelaError::Svg(format!("document is not valid UTF-8: {}", e)))?;
        Self::parse(text)
    }

    /// Load an SVG document from a string. Fails on malformed XML or when no
    /// `<svg>` element is present.
    pub fn parse(text: &str) -> RevelaResult<Self> {
        let doc = Self {
            text: text.to_string(),
            hash: ContentHash::of(text.as_bytes()),
        };
        doc.outline()?;
        Ok(doc)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn hash(&self) -> &ContentHash {
        &self.hash
    }

    /// Extract the scene, measuring every shape in one pass.
    pub fn scene(&self, config: &RevealConfig) -> RevelaResult<Scene> {
        let outline = self.outline()?;
        let mut shapes = Vec::with_capacity(outline.shapes.len());
        for (index, element) in outline.shapes.iter().enumerate() {
            shapes.push(measure_element(index, element, config.length_accuracy));
        }
        Ok(self.assemble(outline.viewport, shapes))
    }

    /// Extract the scene, yielding to the runtime every `chunk_size` shapes so
    /// large documents do not starve other tasks.
    pub async fn scene_chunked(&self, config: &RevealConfig) -> RevelaResult<Scene> {
        let outline = self.outline()?;
        let chunk_size = config.chunk_size.max(1);
        let mut shapes = Vec::with_capacity(outline.shapes.len());
        for (chunk_index, chunk) in outline.shapes.chunks(chunk_size).enumerate() {
            if chunk_index > 0 {
                tokio::task::yield_now().await;
            }
            let base = chunk_index * chunk_size;
            for (offset, element) in chunk.iter().enumerate() {
                shapes.push(measure_element(base + offset, element, config.length_accuracy));
            }
        }
        Ok(self.assemble(outline.viewport, shapes))
    }

    fn assemble(&self, viewport: Option<Rect>, shapes: Vec<Shape>) -> Scene {
        let mut scene =
            Scene::new(Rect::new(0.0, 0.0, 0.0, 0.0)).with_source_hash(self.hash.clone());
        for shape in shapes {
            scene.add_shape(shape);
        }
        scene.viewport = viewport.unwrap_or_else(|| content_viewport(&scene));
        tracing::debug!(
            shapes = scene.len(),
            width = scene.viewport.width,
            height = scene.viewport.height,
            "extracted scene"
        );
        scene
    }

    pub(crate) fn outline(&self) -> RevelaResult<Outline> {
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };
        let doc = roxmltree::Document::parse_with_options(&self.text, options).map_err(|e| {
            let pos = e.pos();
            RevelaError::parse(e.to_string(), pos.row, pos.col)
        })?;

        let root_element = doc.root_element();
        let svg = if root_element.tag_name().name() == "svg" {
            root_element
        } else {
            root_element
                .descendants()
                .find(|n| n.is_element() && n.tag_name().name() == "svg")
                .ok_or_else(|| RevelaError::Svg("no <svg> element in document".into()))?
        };

        let root = root_tag(&self.text, svg.range().start)
            .ok_or_else(|| RevelaError::Svg("unterminated <svg> start tag".into()))?;

        let shapes = svg
            .descendants()
            .filter(|n| n.is_element())
            .filter_map(|node| {
                let kind = ShapeKind::from_tag(node.tag_name().name())?;
                if !is_rendered(node, svg) {
                    return None;
                }
                let start = node.range().start;
                let start_tag = start..tag_end(&self.text, start)?.0 + 1;
                Some(ShapeElement {
                    kind,
                    attrs: attributes(node),
                    stroke: own_stroke(node),
                    start_tag,
                    name_end: name_end(&self.text, start),
                })
            })
            .collect();

        let stale_styles = svg
            .children()
            .filter(|n| n.tag_name().name() == "style" && n.attribute("data-revela").is_some())
            .map(|n| n.range())
            .collect();

        Ok(Outline {
            root,
            viewport: viewport(svg),
            shapes,
            stale_styles,
        })
    }
}

fn measure_element(index: usize, element: &ShapeElement, accuracy: f64) -> Shape {
    let m = geometry::measure(element.kind, &element.attrs, accuracy);
    let mut shape = Shape::new(ShapeId::new(index), element.kind, m.bounds);
    shape.path_length = m.path_length;
    shape.stroke = element.stroke.clone();
    shape
}

/// Viewport from `viewBox`, else from the `width`/`height` attributes.
///
/// Only the viewBox extent is kept; its min-x/min-y are dropped so corners
/// sit at `(0, 0)` and `(width, height)`.
fn viewport(svg: roxmltree::Node<'_, '_>) -> Option<Rect> {
    if let Some(view_box) = svg.attribute("viewBox") {
        let n = parse_number_list(view_box);
        if n.len() == 4 && n[2] > 0.0 && n[3] > 0.0 {
            return Some(Rect::new(0.0, 0.0, n[2], n[3]));
        }
        tracing::warn!(view_box, "ignoring invalid viewBox");
    }
    let width = parse_length(svg.attribute("width"))?;
    let height = parse_length(svg.attribute("height"))?;
    (width > 0.0 && height > 0.0).then(|| Rect::new(0.0, 0.0, width, height))
}

/// Origin-anchored box reaching the far edge of the content.
fn content_viewport(scene: &Scene) -> Rect {
    match scene.content_bounds() {
        Some(b) => Rect::new(0.0, 0.0, b.max_x().max(0.0), b.max_y().max(0.0)),
        None => Rect::new(0.0, 0.0, 0.0, 0.0),
    }
}

fn is_rendered(node: roxmltree::Node<'_, '_>, svg: roxmltree::Node<'_, '_>) -> bool {
    node.ancestors()
        .take_while(|a| *a != svg)
        .all(|a| !NON_RENDERED.contains(&a.tag_name().name()))
}

fn attributes(node: roxmltree::Node<'_, '_>) -> ShapeAttributes {
    let get = |name: &str| node.attribute(name).map(str::to_string);
    ShapeAttributes {
        d: get("d"),
        x: get("x"),
        y: get("y"),
        width: get("width"),
        height: get("height"),
        cx: get("cx"),
        cy: get("cy"),
        r: get("r"),
        rx: get("rx"),
        ry: get("ry"),
        points: get("points"),
    }
}

fn root_tag(text: &str, start: usize) -> Option<RootTag> {
    let (gt, self_closing) = tag_end(text, start)?;
    let name_end = name_end(text, start);
    Some(RootTag {
        name: text[start + 1..name_end].to_string(),
        start_tag: start..gt + 1,
        name_end,
        self_closing,
    })
}

/// Offset just past the element name of the start tag at `start`.
fn name_end(text: &str, start: usize) -> usize {
    let bytes = text.as_bytes();
    let mut i = start + 1;
    while i < bytes.len() && !matches!(bytes[i], b' ' | b'\t' | b'\r' | b'\n' | b'/' | b'>') {
        i += 1;
    }
    i
}

/// Offset of the `>` closing the start tag at `start`, and whether the tag is
/// self-closing. Quoted attribute values may contain `>`.
fn tag_end(text: &str, start: usize) -> Option<(usize, bool)> {
    let bytes = text.as_bytes();
    let mut quote = None;
    for (i, &b) in bytes.iter().enumerate().skip(start + 1) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'"' | b'\'' => quote = Some(b),
                b'>' => return Some((i, i > 0 && bytes[i - 1] == b'/')),
                _ => {}
            },
        }
    }
    None
}

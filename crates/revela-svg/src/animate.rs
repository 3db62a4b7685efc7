//! Emitting a self-animating copy of an SVG document.
//!
//! The source text is edited in place rather than re-serialized, so
//! everything the reveal does not touch comes out byte for byte.

use std::collections::HashSet;
use std::ops::Range;

use revela_core::{ReferenceCorner, RevelaError, RevelaResult};
use revela_ir::RevealSchedule;

use crate::css::{reveal_stylesheet, ResponsiveVariant, SHAPE_ATTRIBUTE};
use crate::document::SvgDocument;

/// `preserveAspectRatio` alignment that pins the reveal corner in place.
pub fn aspect_alignment(corner: ReferenceCorner) -> &'static str {
    match corner {
        ReferenceCorner::TopLeft => "xMinYMin meet",
        ReferenceCorner::TopRight => "xMaxYMin meet",
        ReferenceCorner::BottomLeft => "xMinYMax meet",
        ReferenceCorner::BottomRight => "xMaxYMax meet",
    }
}

struct Edit {
    range: Range<usize>,
    text: String,
}

/// Render `document` with an embedded stylesheet that plays `schedule`.
///
/// The schedule must come from this document's scene; shapes are matched to
/// timelines by document position.
pub fn render_animated_svg(
    document: &SvgDocument,
    schedule: &RevealSchedule,
    responsive: Option<ResponsiveVariant<'_>>,
) -> RevelaResult<String> {
    if let Some(hash) = &schedule.source_hash {
        if hash != document.hash() {
            return Err(RevelaError::InvalidArgument(
                "schedule was built from a different document".into(),
            ));
        }
    }

    let text = document.text();
    let outline = document.outline()?;
    let mut edits = Vec::new();

    for range in &outline.stale_styles {
        edits.push(Edit {
            range: range.clone(),
            text: String::new(),
        });
    }

    let root = &outline.root;
    let root_tag = &text[root.start_tag.clone()];
    if let Some(span) = attribute_span(root_tag, "preserveAspectRatio") {
        edits.push(Edit {
            range: root.start_tag.start + span.start..root.start_tag.start + span.end,
            text: String::new(),
        });
    }
    edits.push(Edit {
        range: root.name_end..root.name_end,
        text: format!(
            " preserveAspectRatio=\"{}\"",
            aspect_alignment(schedule.corner)
        ),
    });

    let scheduled: HashSet<usize> = schedule.timelines.iter().map(|t| t.shape.index()).collect();
    for (index, element) in outline.shapes.iter().enumerate() {
        if !scheduled.contains(&index) {
            continue;
        }
        let tag = &text[element.start_tag.clone()];
        if let Some(span) = attribute_span(tag, SHAPE_ATTRIBUTE) {
            edits.push(Edit {
                range: element.start_tag.start + span.start..element.start_tag.start + span.end,
                text: String::new(),
            });
        }
        edits.push(Edit {
            range: element.name_end..element.name_end,
            text: format!(" {}=\"{}\"", SHAPE_ATTRIBUTE, index),
        });
    }

    let style = format!(
        "<style data-revela=\"reveal\"><![CDATA[\n{}]]></style>",
        reveal_stylesheet(schedule, responsive)
    );
    let gt = root.start_tag.end - 1;
    if root.self_closing {
        edits.push(Edit {
            range: gt - 1..gt + 1,
            text: format!(">{}</{}>", style, root.name),
        });
    } else {
        edits.push(Edit {
            range: gt + 1..gt + 1,
            text: style,
        });
    }

    Ok(apply_edits(text, edits))
}

fn apply_edits(text: &str, mut edits: Vec<Edit>) -> String {
    // Back to front so earlier offsets stay valid; at one position, removals
    // run before insertions.
    edits.sort_by(|a, b| {
        b.range
            .start
            .cmp(&a.range.start)
            .then(a.range.is_empty().cmp(&b.range.is_empty()))
    });
    let mut out = text.to_string();
    for edit in edits {
        out.replace_range(edit.range, &edit.text);
    }
    out
}

/// Byte span of ` name="value"` (with its leading whitespace) inside a start tag.
fn attribute_span(tag: &str, name: &str) -> Option<Range<usize>> {
    let bytes = tag.as_bytes();
    let is_space = |b: u8| matches!(b, b' ' | b'\t' | b'\r' | b'\n');
    let is_delim = |b: u8| is_space(b) || matches!(b, b'=' | b'/' | b'>');

    let mut i = 1;
    while i < bytes.len() && !is_delim(bytes[i]) {
        i += 1;
    }
    loop {
        let span_start = i;
        while i < bytes.len() && is_space(bytes[i]) {
            i += 1;
        }
        if i >= bytes.len() || matches!(bytes[i], b'/' | b'>') {
            return None;
        }
        let name_start = i;
        while i < bytes.len() && !is_delim(bytes[i]) {
            i += 1;
        }
        let attr_name = &tag[name_start..i];
        while i < bytes.len() && is_space(bytes[i]) {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] != b'=' {
            return None;
        }
        i += 1;
        while i < bytes.len() && is_space(bytes[i]) {
            i += 1;
        }
        let quote = *bytes.get(i)?;
        if quote != b'"' && quote != b'\'' {
            return None;
        }
        let close = tag[i + 1..].find(quote as char)?;
        i = i + 1 + close + 1;
        if attr_name == name {
            return Some(span_start..i);
        }
    }
}

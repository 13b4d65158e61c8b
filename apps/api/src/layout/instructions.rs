//! Backend-neutral drawing operations produced by the formatter.
//!
//! Coordinates are in points with the origin at the top-left corner of the page
//! and y growing downwards. Backends with a bottom-left origin flip them.

use serde::Serialize;

use crate::layout::font_metrics::FontFace;
use crate::layout::profile::{PageSize, Rgb};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawInstructions {
    pub page: PageSize,
    pub ops: Vec<DrawOp>,
    /// Content ran past the bottom margin. The ops are still complete.
    pub overflowed: bool,
}

#[cfg(test)]
impl DrawInstructions {
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(run) => Some(run),
            _ => None,
        })
    }

    pub fn links(&self) -> impl Iterator<Item = (&Rect, &str)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Link { rect, url } => Some((rect, url.as_str())),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Text(TextRun),
    /// Filled rule, `thickness` tall, with its top edge at `y`.
    Hairline {
        x: f32,
        y: f32,
        width: f32,
        thickness: f32,
        color: Rgb,
    },
    /// Clickable area bound to a URL.
    Link { rect: Rect, url: String },
}

/// Spans laid out left to right starting at `x`, sharing one baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub x: f32,
    pub baseline: f32,
    pub spans: Vec<Span>,
}

#[cfg(test)]
impl TextRun {
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Span {
    pub text: String,
    pub size: f32,
    pub face: FontFace,
    pub color: Rgb,
    pub letter_spacing: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

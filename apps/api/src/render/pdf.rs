//! Single-page PDF backend built on `lopdf`.
//!
//! Text is set in the standard Helvetica faces (not embedded) with WinAnsi
//! encoding, which is what the layout's width tables describe. Link ops become
//! `/URI` link annotations on the page.

use std::io::Write;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::debug;

use crate::layout::font_metrics::FontFace;
use crate::layout::instructions::{DrawInstructions, DrawOp, Rect, TextRun};
use crate::layout::profile::Rgb;
use crate::render::{DocumentBackend, RenderError};

const PRODUCER: &str = concat!("resume-press ", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfBackend;

impl PdfBackend {
    pub fn new() -> Self {
        Self
    }

    /// Builds the object graph without serializing it.
    pub fn build_document(&self, instructions: &DrawInstructions) -> Result<Document, RenderError> {
        let page_w = instructions.page.width;
        let page_h = instructions.page.height;

        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(font_dict(FontFace::Regular));
        let bold_id = doc.add_object(font_dict(FontFace::Bold));
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                font_resource(FontFace::Regular) => regular_id,
                font_resource(FontFace::Bold) => bold_id,
            },
        });

        let mut content = Content { operations: vec![] };
        let mut annots: Vec<ObjectId> = Vec::new();
        for op in &instructions.ops {
            match op {
                DrawOp::Text(run) => push_text(&mut content, run, page_h),
                DrawOp::Hairline {
                    x,
                    y,
                    width,
                    thickness,
                    color,
                } => {
                    content.operations.push(Operation::new("q", vec![]));
                    push_fill(&mut content, color);
                    content.operations.push(Operation::new(
                        "re",
                        vec![
                            (*x).into(),
                            (page_h - (y + thickness)).into(),
                            (*width).into(),
                            (*thickness).into(),
                        ],
                    ));
                    content.operations.push(Operation::new("f", vec![]));
                    content.operations.push(Operation::new("Q", vec![]));
                }
                DrawOp::Link { rect, url } => {
                    annots.push(doc.add_object(link_annotation(rect, url, page_h)));
                }
            }
        }

        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), page_w.into(), page_h.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        };
        if !annots.is_empty() {
            page.set(
                "Annots",
                annots.iter().map(|id| Object::Reference(*id)).collect::<Vec<Object>>(),
            );
        }
        let page_id = doc.add_object(page);

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
        let info_id = doc.add_object(dictionary! {
            "Producer" => Object::string_literal(PRODUCER),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        debug!(
            ops = instructions.ops.len(),
            annotations = annots.len(),
            "pdf object graph built"
        );
        Ok(doc)
    }
}

impl DocumentBackend for PdfBackend {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    fn produce(
        &self,
        instructions: &DrawInstructions,
        mut out: &mut dyn Write,
    ) -> Result<(), RenderError> {
        let mut doc = self.build_document(instructions)?;
        doc.save_to(&mut out)?;
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn font_resource(face: FontFace) -> &'static str {
    match face {
        FontFace::Regular => "F1",
        FontFace::Bold => "F2",
    }
}

fn font_dict(face: FontFace) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => face.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn push_fill(content: &mut Content, color: &Rgb) {
    let [r, g, b] = color.unit();
    content
        .operations
        .push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
}

fn push_text(content: &mut Content, run: &TextRun, page_h: f32) {
    if run.spans.iter().all(|s| s.text.is_empty()) {
        return;
    }
    content.operations.push(Operation::new("BT", vec![]));
    content.operations.push(Operation::new(
        "Td",
        vec![run.x.into(), (page_h - run.baseline).into()],
    ));
    for span in &run.spans {
        content.operations.push(Operation::new(
            "Tf",
            vec![font_resource(span.face).into(), span.size.into()],
        ));
        push_fill(content, &span.color);
        content
            .operations
            .push(Operation::new("Tc", vec![span.letter_spacing.into()]));
        content.operations.push(Operation::new(
            "Tj",
            vec![Object::String(to_win_ansi(&span.text), StringFormat::Literal)],
        ));
    }
    content.operations.push(Operation::new("ET", vec![]));
}

fn link_annotation(rect: &Rect, url: &str, page_h: f32) -> Dictionary {
    let pdf_rect: Vec<Object> = vec![
        rect.x.into(),
        (page_h - (rect.y + rect.height)).into(),
        (rect.x + rect.width).into(),
        (page_h - rect.y).into(),
    ];
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => pdf_rect,
        "Border" => vec![0.into(), 0.into(), 0.into()],
        "A" => dictionary! {
            "Type" => "Action",
            "S" => "URI",
            "URI" => Object::string_literal(url),
        },
    }
}

/// Encodes text for a WinAnsi font. Characters with no WinAnsi code become `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => c as u8,
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8a,
            '‹' => 0x8b,
            'Œ' => 0x8c,
            'Ž' => 0x8e,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9a,
            '›' => 0x9b,
            'œ' => 0x9c,
            'ž' => 0x9e,
            'Ÿ' => 0x9f,
            '\u{2212}' => b'-',
            _ => b'?',
        })
        .collect()
}

//! Formatter: abstract document tree + render profile → drawing instructions.
//!
//! Single-column, single-page flow. The cursor walks down the page; every line
//! is measured against the static Helvetica tables so wrapping, centering and
//! right-aligned dates need no backend round trip. Running past the bottom
//! margin is logged and otherwise ignored.

use tracing::{debug, warn};

use crate::document::tree::{
    AbstractDocument, BodyNode, BulletList, Entry, Fragment, FragmentLine, HeaderBlock,
    InlineList, LabeledLine, Section, SectionKind, SummaryBlock, Tone,
};
use crate::layout::font_metrics::{get_metrics, FontFace};
use crate::layout::instructions::{DrawInstructions, DrawOp, Rect, Span, TextRun};
use crate::layout::profile::{RenderProfile, Rgb};
use crate::layout::text::{sanitize, PIPE};

/// Helvetica ascender, in em.
const ASCENT: f32 = 0.718;

pub fn render(tree: &AbstractDocument, profile: &RenderProfile) -> DrawInstructions {
    let mut f = Formatter::new(profile);
    for section in tree.visible_sections() {
        f.section(section);
    }
    debug!(
        profile = %profile.kind,
        ops = f.ops.len(),
        overflowed = f.overflowed,
        "layout complete"
    );
    DrawInstructions {
        page: profile.page,
        ops: f.ops,
        overflowed: f.overflowed,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Styles
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct Style {
    size: f32,
    face: FontFace,
    color: Rgb,
    tracking: f32,
}

impl Style {
    fn new(size: f32, face: FontFace, color: Rgb) -> Self {
        Self {
            size,
            face,
            color,
            tracking: 0.0,
        }
    }

    fn bold(self) -> Self {
        Self {
            face: FontFace::Bold,
            ..self
        }
    }

    fn colored(self, color: Rgb) -> Self {
        Self { color, ..self }
    }

    fn width(&self, text: &str) -> f32 {
        get_metrics(self.face).width_pt(text, self.size, self.tracking)
    }

    fn wrap(&self, text: &str, first_width: f32, rest_width: f32) -> Vec<String> {
        get_metrics(self.face).wrap(text, self.size, first_width, rest_width)
    }

    fn span(&self, text: impl Into<String>) -> Span {
        Span {
            text: text.into(),
            size: self.size,
            face: self.face,
            color: self.color,
            letter_spacing: self.tracking,
        }
    }
}

/// One piece of a fragment line.
struct Piece {
    text: String,
    style: Style,
    url: Option<String>,
    width: f32,
}

#[derive(Debug, Clone, Copy)]
enum Align {
    Left,
    Center,
}

// ────────────────────────────────────────────────────────────────────────────
// Formatter
// ────────────────────────────────────────────────────────────────────────────

struct Formatter<'a> {
    profile: &'a RenderProfile,
    ops: Vec<DrawOp>,
    /// Top of the next line, from the top page edge.
    y: f32,
    overflowed: bool,
}

impl<'a> Formatter<'a> {
    fn new(profile: &'a RenderProfile) -> Self {
        Self {
            profile,
            ops: Vec::new(),
            y: profile.padding_y,
            overflowed: false,
        }
    }

    fn left(&self) -> f32 {
        self.profile.padding_x
    }

    fn width(&self) -> f32 {
        self.profile.content_width()
    }

    fn style(&self, size: f32) -> Style {
        Style::new(size, FontFace::Regular, self.profile.palette.text)
    }

    fn muted(&self, size: f32) -> Style {
        Style::new(size, FontFace::Regular, self.profile.palette.muted)
    }

    // ── cursor ──────────────────────────────────────────────────────────────

    fn advance(&mut self, dy: f32) {
        self.y += dy;
        let limit = self.profile.bottom_limit();
        if !self.overflowed && self.y > limit {
            self.overflowed = true;
            warn!(
                y = self.y,
                limit,
                profile = %self.profile.kind,
                "content runs past the bottom margin; the backend will clip it"
            );
        }
    }

    fn baseline(&self, size: f32) -> f32 {
        let advance = self.profile.line_advance(size);
        self.y + (advance - size) / 2.0 + size * ASCENT
    }

    fn emit(&mut self, x: f32, baseline: f32, spans: Vec<Span>) {
        self.ops.push(DrawOp::Text(TextRun { x, baseline, spans }));
    }

    /// Emits one line of spans at `x` and moves the cursor below it.
    fn line(&mut self, x: f32, size: f32, spans: Vec<Span>) {
        let baseline = self.baseline(size);
        self.emit(x, baseline, spans);
        self.advance(self.profile.line_advance(size));
    }

    fn hairline(&mut self) {
        let margin = self.profile.spacing.hairline_margin;
        self.advance(margin);
        self.ops.push(DrawOp::Hairline {
            x: self.left(),
            y: self.y,
            width: self.width(),
            thickness: self.profile.hairline,
            color: self.profile.palette.hair,
        });
        self.advance(self.profile.hairline + margin);
    }

    // ── text blocks ─────────────────────────────────────────────────────────

    fn wrapped(&mut self, text: &str, style: Style, indent: f32) {
        let avail = self.width() - indent;
        for l in style.wrap(text, avail, avail) {
            self.line(self.left() + indent, style.size, vec![style.span(l)]);
        }
    }

    fn centered(&mut self, text: &str, style: Style) {
        let width = self.width();
        for l in style.wrap(text, width, width) {
            let x = self.left() + (width - style.width(&l)).max(0.0) / 2.0;
            self.line(x, style.size, vec![style.span(l)]);
        }
    }

    /// `Label: value`, bold label, value wrapped under it.
    fn labeled(&mut self, line: &LabeledLine, style: Style) {
        let label = format!("{}:", line.label);
        let label_w = style.bold().width(&label) + style.width(" ");
        let width = self.width();
        let lines = style.wrap(&line.value, width - label_w, width);

        let mut rest = lines.into_iter();
        let mut first = vec![style.bold().span(label)];
        if let Some(l) = rest.next() {
            first.push(style.span(format!(" {l}")));
        }
        self.line(self.left(), style.size, first);
        for l in rest {
            self.line(self.left(), style.size, vec![style.span(l)]);
        }
    }

    /// Glyph-prefixed items with a hanging indent.
    fn bullets(&mut self, list: &BulletList, style: Style) {
        let indent = self.profile.spacing.list_indent;
        let prefix = format!("{} ", list.glyph);
        let prefix_w = style.width(&prefix);
        let avail = self.width() - indent - prefix_w;

        for item in &list.items {
            let mut lines = style.wrap(&sanitize(item), avail, avail).into_iter();
            // A blank item still prints its glyph.
            let first = lines.next().unwrap_or_default();
            self.line(
                self.left() + indent,
                style.size,
                vec![style.span(format!("{prefix}{first}"))],
            );
            for l in lines {
                self.line(self.left() + indent + prefix_w, style.size, vec![style.span(l)]);
            }
        }
    }

    /// Text and link fragments separated by `" | "`, wrapped at fragment
    /// boundaries. Links become clickable rects over their label.
    fn fragments(&mut self, line: &FragmentLine, text: Style, link: Style, align: Align) {
        let sep_w = text.width(PIPE);
        let width = self.width();

        let mut rows: Vec<Vec<Piece>> = vec![Vec::new()];
        let mut row_w = 0.0_f32;
        for fragment in &line.fragments {
            let piece = match fragment {
                Fragment::Text { text: t } => Piece {
                    width: text.width(t),
                    text: t.clone(),
                    style: text,
                    url: None,
                },
                Fragment::Link(l) => Piece {
                    width: link.width(&l.label),
                    text: l.label.clone(),
                    style: link,
                    url: Some(l.url.clone()),
                },
            };
            let row_is_empty = rows.last().map_or(true, Vec::is_empty);
            if !row_is_empty && row_w + sep_w + piece.width > width {
                rows.push(Vec::new());
                row_w = 0.0;
            }
            let row_is_empty = rows.last().map_or(true, Vec::is_empty);
            row_w += piece.width + if row_is_empty { 0.0 } else { sep_w };
            if let Some(row) = rows.last_mut() {
                row.push(piece);
            }
        }

        for row in rows.into_iter().filter(|r| !r.is_empty()) {
            let total: f32 =
                row.iter().map(|p| p.width).sum::<f32>() + sep_w * (row.len() - 1) as f32;
            let x0 = match align {
                Align::Left => self.left(),
                Align::Center => self.left() + (width - total).max(0.0) / 2.0,
            };
            let size = text.size.max(link.size);
            let top = self.y;
            let height = self.profile.line_advance(size);

            let mut spans = Vec::with_capacity(row.len() * 2);
            let mut links = Vec::new();
            let mut x = x0;
            for (i, piece) in row.into_iter().enumerate() {
                if i > 0 {
                    spans.push(text.span(PIPE));
                    x += sep_w;
                }
                if let Some(url) = piece.url {
                    links.push(DrawOp::Link {
                        rect: Rect {
                            x,
                            y: top,
                            width: piece.width,
                            height,
                        },
                        url,
                    });
                }
                x += piece.width;
                spans.push(piece.style.span(piece.text));
            }
            self.line(x0, size, spans);
            self.ops.extend(links);
        }
    }

    /// Bold title on the left, date range flush right on the same baseline.
    fn title_row(&mut self, title: &str, date: Option<&str>) {
        let ts = &self.profile.type_scale;
        let title_style = self.style(ts.title).bold();
        let date_style = self.muted(ts.meta);
        let width = self.width();

        let date_w = date.map_or(0.0, |d| date_style.width(d));
        let reserved = if date.is_some() {
            date_w + self.profile.spacing.date_gap
        } else {
            0.0
        };
        let mut lines = title_style.wrap(title, width - reserved, width).into_iter();

        let size = title_style.size.max(date_style.size);
        let baseline = self.baseline(size);
        if let Some(first) = lines.next() {
            self.emit(self.left(), baseline, vec![title_style.span(first)]);
        }
        if let Some(d) = date {
            self.emit(self.left() + width - date_w, baseline, vec![date_style.span(d)]);
        }
        self.advance(self.profile.line_advance(size));
        for l in lines {
            self.line(self.left(), title_style.size, vec![title_style.span(l)]);
        }
    }

    // ── sections ────────────────────────────────────────────────────────────

    fn section(&mut self, section: &Section) {
        if let BodyNode::Header(header) = &section.body {
            self.header(header);
            return;
        }

        let spacing = self.profile.spacing;
        let ts = self.profile.type_scale;
        self.advance(spacing.section_top);
        let mut title = self.style(ts.section_title).bold();
        title.tracking = ts.section_tracking;
        self.line(
            self.left(),
            title.size,
            vec![title.span(section.title.to_uppercase())],
        );
        self.advance(spacing.section_title_bottom);

        match &section.body {
            BodyNode::Summary(summary) => self.summary(summary),
            BodyNode::Skills(lines) => {
                let style = self.muted(ts.meta);
                for l in lines {
                    self.labeled(l, style);
                }
            }
            BodyNode::Entries(entries) => {
                let gap = if section.kind == SectionKind::Education {
                    spacing.education_gap
                } else {
                    spacing.entry_gap
                };
                for entry in entries {
                    self.entry(entry);
                    self.advance(gap);
                }
            }
            BodyNode::Bullets(list) => self.bullets(list, self.style(ts.base)),
            BodyNode::Inline(list) => self.inline(list),
            BodyNode::Header(_) | BodyNode::Empty => {}
        }
    }

    fn header(&mut self, header: &HeaderBlock) {
        let ts = self.profile.type_scale;
        let spacing = self.profile.spacing;

        self.centered(&header.full_name, self.style(ts.name).bold());
        self.advance(spacing.after_name);
        self.hairline();

        if let Some(headline) = &header.headline {
            self.centered(&sanitize(headline), self.style(ts.headline).bold());
            self.advance(spacing.after_headline);
        }
        if !header.contact.is_empty() {
            self.centered(&header.contact, self.muted(ts.contact));
            self.advance(spacing.after_contact);
        }
        if !header.links.is_empty() {
            let text = self.style(ts.link);
            let link = text.colored(self.profile.palette.link);
            self.fragments(&header.links, text, link, Align::Center);
            self.advance(spacing.after_links);
        }
    }

    fn summary(&mut self, summary: &SummaryBlock) {
        let ts = self.profile.type_scale;
        self.wrapped(&sanitize(&summary.paragraph), self.style(ts.base), 0.0);
        if let Some(highlights) = &summary.highlights {
            self.wrapped(&sanitize(&highlights.text), self.tone(highlights.tone), 0.0);
        }
    }

    fn entry(&mut self, entry: &Entry) {
        let ts = self.profile.type_scale;

        self.title_row(&entry.title, entry.date_range.as_deref());
        if let Some(meta) = &entry.meta {
            let text = self.muted(ts.meta);
            let link = text.colored(self.profile.palette.link);
            self.fragments(meta, text, link, Align::Left);
        }
        if let Some(subtitle) = &entry.subtitle {
            self.wrapped(subtitle, self.muted(ts.meta), 0.0);
        }
        if let Some(bullets) = &entry.bullets {
            self.bullets(bullets, self.style(ts.base));
        }
        if !entry.labeled.is_empty() {
            self.advance(self.profile.spacing.tag_top);
            let style = self.muted(ts.tag);
            for l in &entry.labeled {
                self.labeled(l, style);
            }
        }
    }

    fn inline(&mut self, list: &InlineList) {
        self.wrapped(&list.text, self.tone(list.tone), 0.0);
    }

    fn tone(&self, tone: Tone) -> Style {
        match tone {
            Tone::Muted => self.muted(self.profile.type_scale.meta),
            Tone::Small => self.muted(self.profile.type_scale.tiny),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::build;
    use crate::models::ResumeDocument;
    use crate::sample::SAMPLE_JSON;
    use crate::validation::validate;

    fn sample() -> ResumeDocument {
        validate(SAMPLE_JSON).unwrap()
    }

    fn texts(instructions: &DrawInstructions) -> Vec<String> {
        instructions.text_runs().map(TextRun::text).collect()
    }

    fn run_width(run: &TextRun) -> f32 {
        run.spans
            .iter()
            .map(|s| get_metrics(s.face).width_pt(&s.text, s.size, s.letter_spacing))
            .sum()
    }

    #[test]
    fn test_sample_fits_on_compact_page() {
        let out = render(&build(&sample()), &RenderProfile::compact());
        assert!(!out.overflowed);
        assert_eq!(out.page, RenderProfile::compact().page);
    }

    #[test]
    fn test_section_titles_follow_visibility() {
        let out = render(&build(&sample()), &RenderProfile::compact());
        let texts = texts(&out);
        for title in ["SUMMARY", "SKILLS", "EXPERIENCE", "PROJECTS", "EDUCATION", "CERTIFICATIONS"] {
            assert!(texts.iter().any(|t| t == title), "missing {title}");
        }
        assert!(!texts.iter().any(|t| t == "KEYWORDS"));
        assert!(!texts.iter().any(|t| t == "HEADER"));
    }

    #[test]
    fn test_free_text_is_sanitized() {
        let out = render(&build(&sample()), &RenderProfile::compact());
        let all = texts(&out).join("\n");
        assert!(all.contains("-70%"));
        assert!(!all.contains('\u{2212}'));

        let paragraph_runs: Vec<String> = texts(&out)
            .into_iter()
            .filter(|t| t.contains("Backend engineer") || t.contains("latency"))
            .collect();
        assert!(paragraph_runs.iter().all(|t| !t.contains('—') && !t.contains('–')));
    }

    #[test]
    fn test_headline_and_bullets_are_sanitized() {
        let mut doc = sample();
        doc.header.headline = Some("Staff Engineer \u{2014} Payments \u{2013} Infra \u{2212}1".into());
        doc.experience[0].bullets[0] = "Cut p99 \u{2212}70% \u{2013} 400ms \u{2014} 120ms".into();
        let out = render(&build(&doc), &RenderProfile::compact());
        let texts = texts(&out);

        assert!(texts.iter().any(|t| t == "Staff Engineer - Payments - Infra -1"));
        assert!(texts.iter().any(|t| t == "\u{2022} Cut p99 -70% - 400ms - 120ms"));

        let speaker = texts.iter().find(|t| t.contains("EuroRust")).unwrap();
        assert!(speaker.contains("EuroRust 2025 - \"Back-pressure"));

        let dashes = ['\u{2212}', '\u{2013}', '\u{2014}'];
        for t in texts.iter().filter(|t| t.starts_with('\u{2022}')) {
            assert!(!t.contains(dashes), "unsanitized bullet {t:?}");
        }
    }

    #[test]
    fn test_blank_bullet_still_prints_glyph() {
        let mut doc = sample();
        doc.achievements = vec!["   ".into(), "Shipped it".into()];
        let out = render(&build(&doc), &RenderProfile::compact());
        let texts = texts(&out);
        let at = texts.iter().position(|t| t == "ACHIEVEMENTS").unwrap();
        assert_eq!(texts[at + 1].trim_end(), "\u{2022}");
        assert_eq!(texts[at + 2], "\u{2022} Shipped it");
    }

    #[test]
    fn test_one_link_op_per_rendered_link() {
        let out = render(&build(&sample()), &RenderProfile::compact());
        let urls: Vec<&str> = out.links().map(|(_, url)| url).collect();
        assert_eq!(urls.len(), 7);
        assert_eq!(urls[0], "https://www.linkedin.com/in/maya-lindqvist/");
        assert_eq!(urls[6], "https://quorum.mlindqvist.dev/");
    }

    #[test]
    fn test_header_links_separated_without_trailing_pipe() {
        let out = render(&build(&sample()), &RenderProfile::compact());
        assert!(texts(&out)
            .iter()
            .any(|t| t == "LinkedIn | GitHub | Codeforces | Portfolio"));
    }

    #[test]
    fn test_link_rects_sit_on_page() {
        let profile = RenderProfile::compact();
        let out = render(&build(&sample()), &profile);
        for (rect, _) in out.links() {
            assert!(rect.x >= profile.padding_x - 0.01);
            assert!(rect.x + rect.width <= profile.padding_x + profile.content_width() + 0.01);
            assert!(rect.height > 0.0 && rect.width > 0.0);
        }
    }

    #[test]
    fn test_name_is_centered() {
        let profile = RenderProfile::compact();
        let out = render(&build(&sample()), &profile);
        let name = out.text_runs().next().unwrap();
        assert_eq!(name.text(), "Maya Lindqvist");
        let centre = name.x + run_width(name) / 2.0;
        assert!((centre - profile.page.width / 2.0).abs() < 0.05);
    }

    #[test]
    fn test_date_range_is_right_aligned() {
        let profile = RenderProfile::compact();
        let out = render(&build(&sample()), &profile);
        let date = out
            .text_runs()
            .find(|r| r.text() == "Mar 2023 – Present")
            .unwrap();
        let right = date.x + run_width(date);
        assert!((right - (profile.padding_x + profile.content_width())).abs() < 0.05);

        let title = out
            .text_runs()
            .find(|r| r.text() == "Northwind Telemetry | Senior Backend Engineer")
            .unwrap();
        assert_eq!(title.baseline, date.baseline);
    }

    #[test]
    fn test_labeled_lines_have_bold_label() {
        let out = render(&build(&sample()), &RenderProfile::compact());
        let run = out
            .text_runs()
            .find(|r| r.text().starts_with("Databases:"))
            .unwrap();
        assert_eq!(run.spans[0].face, FontFace::Bold);
        assert_eq!(run.spans[1].text, " PostgreSQL, Redis, ClickHouse");
    }

    #[test]
    fn test_bullets_prefixed_with_glyph() {
        let out = render(&build(&sample()), &RenderProfile::compact());
        assert!(texts(&out)
            .iter()
            .any(|t| t.starts_with("• Codeforces: Expert")));
    }

    #[test]
    fn test_baselines_never_move_up() {
        let out = render(&build(&sample()), &RenderProfile::spacious());
        let mut last = 0.0_f32;
        for run in out.text_runs() {
            assert!(run.baseline >= last - 0.001, "{} went up", run.text());
            last = run.baseline;
        }
    }

    #[test]
    fn test_overflow_is_flagged_but_content_kept() {
        let mut doc = sample();
        doc.achievements = (0..200).map(|i| format!("Achievement number {i}")).collect();
        let out = render(&build(&doc), &RenderProfile::compact());
        assert!(out.overflowed);
        assert!(texts(&out).iter().any(|t| t == "• Achievement number 199"));
    }

    #[test]
    fn test_profiles_change_geometry_not_content() {
        let tree = build(&sample());
        let compact = render(&tree, &RenderProfile::compact());
        let spacious = render(&tree, &RenderProfile::spacious());
        assert!(spacious.text_runs().next().unwrap().spans[0].size
            > compact.text_runs().next().unwrap().spans[0].size);
        assert_eq!(compact.links().count(), spacious.links().count());
    }
}

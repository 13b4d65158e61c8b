//! Abstract document tree: renderer-agnostic, ordered sections with their content.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Header,
    Summary,
    Skills,
    Experience,
    Projects,
    Education,
    Achievements,
    Certifications,
    Keywords,
}

impl SectionKind {
    /// Print order.
    pub const ALL: [SectionKind; 9] = [
        SectionKind::Header,
        SectionKind::Summary,
        SectionKind::Skills,
        SectionKind::Experience,
        SectionKind::Projects,
        SectionKind::Education,
        SectionKind::Achievements,
        SectionKind::Certifications,
        SectionKind::Keywords,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::Header => "Header",
            SectionKind::Summary => "Summary",
            SectionKind::Skills => "Skills",
            SectionKind::Experience => "Experience",
            SectionKind::Projects => "Projects",
            SectionKind::Education => "Education",
            SectionKind::Achievements => "Achievements",
            SectionKind::Certifications => "Certifications",
            SectionKind::Keywords => "Keywords",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbstractDocument {
    /// Always one entry per `SectionKind`, in `SectionKind::ALL` order.
    pub sections: Vec<Section>,
}

impl AbstractDocument {
    #[cfg(test)]
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn visible_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| s.visible)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub title: String,
    /// Decided at build time. Hidden sections carry `BodyNode::Empty`.
    pub visible: bool,
    pub body: BodyNode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum BodyNode {
    Header(HeaderBlock),
    Summary(SummaryBlock),
    /// One labeled line per non-empty skill category.
    Skills(Vec<LabeledLine>),
    Entries(Vec<Entry>),
    Bullets(BulletList),
    Inline(InlineList),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderBlock {
    pub full_name: String,
    pub headline: Option<String>,
    /// Location, phone and e-mail, pipe-joined.
    pub contact: String,
    pub links: FragmentLine,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryBlock {
    pub paragraph: String,
    pub highlights: Option<InlineList>,
}

/// One experience, project or education entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub title: String,
    /// `None` when neither start nor end is known.
    pub date_range: Option<String>,
    /// Secondary line; only present when at least one fragment survived.
    pub meta: Option<FragmentLine>,
    /// Plain detail line under the title (education degree / GPA).
    pub subtitle: Option<String>,
    pub bullets: Option<BulletList>,
    /// Trailing `Label: values` lines (Tech, Coursework, Honors).
    pub labeled: Vec<LabeledLine>,
}

/// Text and link fragments printed on one line, separated by `" | "`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FragmentLine {
    pub fragments: Vec<Fragment>,
}

impl FragmentLine {
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fragment {
    Text { text: String },
    Link(LinkRef),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkRef {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledLine {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulletList {
    pub glyph: char,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// Meta size, muted color.
    Muted,
    /// Smallest size, muted color.
    Small,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineList {
    /// Already joined.
    pub text: String,
    pub tone: Tone,
}

//! Document builder: typed résumé → abstract document tree.
//!
//! Every inclusion decision is a plain predicate over the typed model so it can be
//! tested without any rendering backend.

use crate::document::tree::{
    AbstractDocument, BodyNode, BulletList, Entry, Fragment, FragmentLine, HeaderBlock,
    InlineList, LabeledLine, LinkRef, Section, SectionKind, SummaryBlock, Tone,
};
use crate::layout::text::{join, join_comma, pipe_join, present, COMMA, DOT};
use crate::models::{Education, Experience, Link, Project, ResumeDocument, SkillCategory};

pub const BULLET_GLYPH: char = '•';
/// Separator in `start – end`.
const DATE_SEPARATOR: &str = " – ";

// ────────────────────────────────────────────────────────────────────────────
// Inclusion predicates
// ────────────────────────────────────────────────────────────────────────────

/// Whether `kind` is printed for `doc`.
pub fn is_visible(kind: SectionKind, doc: &ResumeDocument) -> bool {
    match kind {
        SectionKind::Header | SectionKind::Skills | SectionKind::Education => true,
        SectionKind::Summary => doc.summary.is_some(),
        SectionKind::Experience => !doc.experience.is_empty(),
        SectionKind::Projects => !doc.projects.is_empty(),
        SectionKind::Achievements => !doc.achievements.is_empty(),
        SectionKind::Certifications => !doc.certifications.is_empty(),
        SectionKind::Keywords => !doc.keyword_bank.is_empty(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Build
// ────────────────────────────────────────────────────────────────────────────

pub fn build(doc: &ResumeDocument) -> AbstractDocument {
    let sections = SectionKind::ALL
        .iter()
        .map(|&kind| {
            let visible = is_visible(kind, doc);
            let body = if visible {
                section_body(kind, doc)
            } else {
                BodyNode::Empty
            };
            Section {
                kind,
                title: kind.title().to_string(),
                visible,
                body,
            }
        })
        .collect();

    AbstractDocument { sections }
}

fn section_body(kind: SectionKind, doc: &ResumeDocument) -> BodyNode {
    match kind {
        SectionKind::Header => BodyNode::Header(header_block(doc)),
        SectionKind::Summary => match &doc.summary {
            Some(summary) => BodyNode::Summary(SummaryBlock {
                paragraph: summary.paragraph.clone(),
                highlights: join(Some(&summary.highlights[..]), DOT).map(|text| InlineList {
                    text,
                    tone: Tone::Small,
                }),
            }),
            None => BodyNode::Empty,
        },
        SectionKind::Skills => BodyNode::Skills(skill_lines(doc)),
        SectionKind::Experience => {
            BodyNode::Entries(doc.experience.iter().map(experience_entry).collect())
        }
        SectionKind::Projects => BodyNode::Entries(doc.projects.iter().map(project_entry).collect()),
        SectionKind::Education => {
            BodyNode::Entries(doc.education.iter().map(education_entry).collect())
        }
        SectionKind::Achievements => BodyNode::Bullets(bullet_list(&doc.achievements)),
        SectionKind::Certifications => inline(&doc.certifications, DOT, Tone::Muted),
        SectionKind::Keywords => inline(&doc.keyword_bank, COMMA, Tone::Small),
    }
}

fn header_block(doc: &ResumeDocument) -> HeaderBlock {
    let header = &doc.header;
    let phone = format!("Phone: {}", header.phone);
    let email = format!("Email: {}", header.email);

    HeaderBlock {
        full_name: header.full_name.clone(),
        headline: present(header.headline.as_deref()).map(str::to_string),
        contact: pipe_join([
            header.location.as_deref(),
            Some(phone.as_str()),
            Some(email.as_str()),
        ]),
        links: link_line(&header.links),
    }
}

fn skill_lines(doc: &ResumeDocument) -> Vec<LabeledLine> {
    SkillCategory::ALL
        .iter()
        .filter_map(|&category| {
            join_comma(Some(doc.technical_skills.bucket(category))).map(|value| LabeledLine {
                label: category.label().to_string(),
                value,
            })
        })
        .collect()
}

fn experience_entry(x: &Experience) -> Entry {
    Entry {
        title: format!("{} | {}", x.company, x.title),
        date_range: date_range(Some(x.start.as_str()), Some(x.end.as_str())),
        meta: fragment_line(
            [x.location.as_deref(), x.employment_type.as_deref()]
                .into_iter()
                .filter_map(text_fragment)
                .collect(),
        ),
        subtitle: None,
        bullets: Some(bullet_list(&x.bullets)),
        labeled: tech_line(x.tech.as_deref()).into_iter().collect(),
    }
}

fn project_entry(p: &Project) -> Entry {
    let mut fragments: Vec<Fragment> = text_fragment(p.role.as_deref()).into_iter().collect();
    fragments.extend(p.links.iter().flatten().map(link_fragment));

    Entry {
        title: p.name.clone(),
        date_range: date_range(p.start.as_deref(), p.end.as_deref()),
        meta: fragment_line(fragments),
        subtitle: None,
        bullets: Some(bullet_list(&p.bullets)),
        labeled: tech_line(p.tech.as_deref()).into_iter().collect(),
    }
}

fn education_entry(ed: &Education) -> Entry {
    let title = match present(Some(ed.location.as_str())) {
        Some(location) => format!("{} — {}", ed.institution, location),
        None => ed.institution.clone(),
    };
    let subtitle = match present(ed.gpa.as_deref()) {
        Some(gpa) => format!(
            "{} — {}: {}",
            ed.degree,
            present(ed.gpa_label.as_deref()).unwrap_or("GPA"),
            gpa
        ),
        None => ed.degree.clone(),
    };

    let labeled = [
        ("Coursework", ed.coursework.as_deref()),
        ("Honors", ed.honors.as_deref()),
    ]
    .into_iter()
    .filter_map(|(label, items)| {
        join_comma(items).map(|value| LabeledLine {
            label: label.to_string(),
            value,
        })
    })
    .collect();

    Entry {
        title,
        date_range: date_range(ed.start.as_deref(), Some(ed.end.as_str())),
        meta: None,
        subtitle: present(Some(subtitle.as_str())).map(str::to_string),
        bullets: None,
        labeled,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// `start – end`, either side alone, or `None` when both are blank.
pub fn date_range(start: Option<&str>, end: Option<&str>) -> Option<String> {
    match (present(start), present(end)) {
        (Some(s), Some(e)) => Some(format!("{}{}{}", s.trim(), DATE_SEPARATOR, e.trim())),
        (Some(one), None) | (None, Some(one)) => Some(one.trim().to_string()),
        (None, None) => None,
    }
}

fn bullet_list(items: &[String]) -> BulletList {
    BulletList {
        glyph: BULLET_GLYPH,
        items: items.to_vec(),
    }
}

fn tech_line(tech: Option<&[String]>) -> Option<LabeledLine> {
    join_comma(tech).map(|value| LabeledLine {
        label: "Tech".to_string(),
        value,
    })
}

fn inline(items: &[String], sep: &str, tone: Tone) -> BodyNode {
    match join(Some(items), sep) {
        Some(text) => BodyNode::Inline(InlineList { text, tone }),
        None => BodyNode::Empty,
    }
}

fn text_fragment(text: Option<&str>) -> Option<Fragment> {
    present(text).map(|t| Fragment::Text {
        text: t.trim().to_string(),
    })
}

/// Every link is kept; a blank label shows the URL so the target stays reachable.
fn link_fragment(link: &Link) -> Fragment {
    let label = match link.label.trim() {
        "" => link.url.clone(),
        _ => link.label.clone(),
    };
    Fragment::Link(LinkRef {
        label,
        url: link.url.clone(),
    })
}

fn link_line(links: &[Link]) -> FragmentLine {
    FragmentLine {
        fragments: links.iter().map(link_fragment).collect(),
    }
}

fn fragment_line(fragments: Vec<Fragment>) -> Option<FragmentLine> {
    let line = FragmentLine { fragments };
    (!line.is_empty()).then_some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::SAMPLE_JSON;
    use crate::validation::validate;

    fn sample() -> ResumeDocument {
        validate(SAMPLE_JSON).unwrap()
    }

    fn entries(tree: &AbstractDocument, kind: SectionKind) -> Vec<Entry> {
        match &tree.section(kind).unwrap().body {
            BodyNode::Entries(e) => e.clone(),
            other => panic!("expected entries for {kind:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_sample_keywords_hidden_certifications_shown() {
        let tree = build(&sample());
        let keywords = tree.section(SectionKind::Keywords).unwrap();
        assert!(!keywords.visible);
        assert_eq!(keywords.body, BodyNode::Empty);

        let certs = tree.section(SectionKind::Certifications).unwrap();
        assert!(certs.visible);
        match &certs.body {
            BodyNode::Inline(list) => {
                assert_eq!(
                    list.text,
                    "AWS Certified Solutions Architect – Associate • CKA: Certified Kubernetes Administrator"
                );
                assert_eq!(list.tone, Tone::Muted);
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn test_all_sections_present_in_fixed_order() {
        let tree = build(&sample());
        let kinds: Vec<SectionKind> = tree.sections.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, SectionKind::ALL.to_vec());
        assert_eq!(tree.sections[2].title, "Skills");
    }

    #[test]
    fn test_optional_sections_follow_their_predicates() {
        let mut doc = sample();
        doc.summary = None;
        doc.experience.clear();
        doc.projects.clear();
        doc.achievements.clear();
        doc.certifications.clear();
        doc.keyword_bank = vec!["Rust".into(), "Kafka".into()];

        let tree = build(&doc);
        let visible: Vec<SectionKind> = tree.visible_sections().map(|s| s.kind).collect();
        assert_eq!(
            visible,
            vec![
                SectionKind::Header,
                SectionKind::Skills,
                SectionKind::Education,
                SectionKind::Keywords
            ]
        );
        match &tree.section(SectionKind::Keywords).unwrap().body {
            BodyNode::Inline(list) => assert_eq!(list.text, "Rust, Kafka"),
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn test_skills_only_emit_non_empty_categories() {
        let tree = build(&sample());
        match &tree.section(SectionKind::Skills).unwrap().body {
            BodyNode::Skills(lines) => {
                let labels: Vec<&str> = lines.iter().map(|l| l.label.as_str()).collect();
                assert_eq!(
                    labels,
                    vec!["Programming", "Frameworks/Libraries", "Cloud & DevOps", "Databases"]
                );
                assert_eq!(lines[3].value, "PostgreSQL, Redis, ClickHouse");
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn test_skills_section_visible_even_when_all_empty() {
        let mut doc = sample();
        doc.technical_skills = Default::default();
        let tree = build(&doc);
        let skills = tree.section(SectionKind::Skills).unwrap();
        assert!(skills.visible);
        assert_eq!(skills.body, BodyNode::Skills(vec![]));
    }

    #[test]
    fn test_experience_meta_line_joins_and_drops_blanks() {
        let mut doc = sample();
        let tree = build(&doc);
        let first = &entries(&tree, SectionKind::Experience)[0];
        assert_eq!(first.title, "Northwind Telemetry | Senior Backend Engineer");
        assert_eq!(first.date_range.as_deref(), Some("Mar 2023 – Present"));
        let meta = first.meta.as_ref().unwrap();
        assert_eq!(
            meta.fragments,
            vec![
                Fragment::Text { text: "Hybrid — Gothenburg / Remote".into() },
                Fragment::Text { text: "Full-time".into() },
            ]
        );

        doc.experience[0].location = Some("   ".into());
        let tree = build(&doc);
        let meta = entries(&tree, SectionKind::Experience)[0].meta.clone().unwrap();
        assert_eq!(meta.fragments, vec![Fragment::Text { text: "Full-time".into() }]);

        doc.experience[0].location = None;
        doc.experience[0].employment_type = Some(String::new());
        let tree = build(&doc);
        assert!(entries(&tree, SectionKind::Experience)[0].meta.is_none());
    }

    #[test]
    fn test_project_meta_line_carries_role_and_links() {
        let tree = build(&sample());
        let second = &entries(&tree, SectionKind::Projects)[1];
        let meta = second.meta.as_ref().unwrap();
        assert_eq!(meta.fragments.len(), 3);
        assert_eq!(meta.fragments[0], Fragment::Text { text: "Solo".into() });
        assert!(matches!(&meta.fragments[2], Fragment::Link(l) if l.label == "Demo"));
    }

    #[test]
    fn test_blank_link_label_keeps_the_link() {
        let mut doc = sample();
        doc.header.links[1].label = "   ".into();
        doc.projects[0].role = None;
        if let Some(links) = doc.projects[0].links.as_mut() {
            for link in links.iter_mut() {
                link.label = " ".into();
            }
        }
        let tree = build(&doc);

        match &tree.section(SectionKind::Header).unwrap().body {
            BodyNode::Header(h) => {
                assert_eq!(h.links.fragments.len(), 4);
                let url = &doc.header.links[1].url;
                assert!(matches!(
                    &h.links.fragments[1],
                    Fragment::Link(l) if &l.label == url && &l.url == url
                ));
            }
            other => panic!("unexpected body {other:?}"),
        }

        let meta = entries(&tree, SectionKind::Projects)[0].meta.clone().unwrap();
        let project_links = doc.projects[0].links.clone().unwrap();
        assert_eq!(meta.fragments.len(), project_links.len());
        assert!(matches!(&meta.fragments[0], Fragment::Link(l) if l.label == project_links[0].url));
    }

    #[test]
    fn test_project_without_role_or_links_has_no_meta_line() {
        let mut doc = sample();
        doc.projects[0].role = None;
        doc.projects[0].links = Some(vec![]);
        let tree = build(&doc);
        assert!(entries(&tree, SectionKind::Projects)[0].meta.is_none());
    }

    #[test]
    fn test_bullets_keep_order_and_glyph() {
        let doc = sample();
        let tree = build(&doc);
        let bullets = entries(&tree, SectionKind::Experience)[0].bullets.clone().unwrap();
        assert_eq!(bullets.glyph, '•');
        assert_eq!(bullets.items, doc.experience[0].bullets);
    }

    #[test]
    fn test_date_range_variants() {
        assert_eq!(date_range(Some("2020"), Some("2021")).as_deref(), Some("2020 – 2021"));
        assert_eq!(date_range(None, Some("Mar 2025")).as_deref(), Some("Mar 2025"));
        assert_eq!(date_range(Some("Jul 2023"), None).as_deref(), Some("Jul 2023"));
        assert_eq!(date_range(None, None), None);
        assert_eq!(date_range(Some(""), Some("  ")), None);
    }

    #[test]
    fn test_project_with_only_end_date() {
        let tree = build(&sample());
        assert_eq!(
            entries(&tree, SectionKind::Projects)[0].date_range.as_deref(),
            Some("Feb 2026")
        );
    }

    #[test]
    fn test_education_entry_lines() {
        let tree = build(&sample());
        let ed = &entries(&tree, SectionKind::Education)[0];
        assert_eq!(ed.title, "Chalmers University of Technology — Gothenburg, Sweden");
        assert_eq!(
            ed.subtitle.as_deref(),
            Some("MSc in Computer Systems and Networks — Final GPA: 4.6/5")
        );
        let labels: Vec<&str> = ed.labeled.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["Coursework", "Honors"]);
        assert!(ed.bullets.is_none());
    }

    #[test]
    fn test_education_gpa_label_defaults() {
        let mut doc = sample();
        doc.education[0].gpa_label = None;
        doc.education[0].coursework = Some(vec![]);
        doc.education[0].honors = None;
        let tree = build(&doc);
        let ed = &entries(&tree, SectionKind::Education)[0];
        assert_eq!(
            ed.subtitle.as_deref(),
            Some("MSc in Computer Systems and Networks — GPA: 4.6/5")
        );
        assert!(ed.labeled.is_empty());
    }

    #[test]
    fn test_header_block_contact_and_links() {
        let mut doc = sample();
        let tree = build(&doc);
        match &tree.section(SectionKind::Header).unwrap().body {
            BodyNode::Header(h) => {
                assert_eq!(
                    h.contact,
                    "Gothenburg, Sweden | Phone: +46 70 123 45 67 | Email: maya.lindqvist@example.com"
                );
                assert_eq!(h.links.fragments.len(), 4);
            }
            other => panic!("unexpected body {other:?}"),
        }

        doc.header.location = None;
        doc.header.headline = Some(" ".into());
        let tree = build(&doc);
        match &tree.section(SectionKind::Header).unwrap().body {
            BodyNode::Header(h) => {
                assert!(h.contact.starts_with("Phone: "));
                assert!(h.headline.is_none());
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn test_summary_highlights_only_when_present() {
        let mut doc = sample();
        let tree = build(&doc);
        match &tree.section(SectionKind::Summary).unwrap().body {
            BodyNode::Summary(s) => assert!(s.highlights.is_none()),
            other => panic!("unexpected body {other:?}"),
        }

        doc.summary.as_mut().unwrap().highlights = vec!["A".into(), "B".into()];
        let tree = build(&doc);
        match &tree.section(SectionKind::Summary).unwrap().body {
            BodyNode::Summary(s) => assert_eq!(s.highlights.as_ref().unwrap().text, "A • B"),
            other => panic!("unexpected body {other:?}"),
        }
    }
}

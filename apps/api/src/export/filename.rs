//! Download filename rules.

use std::sync::LazyLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;

use crate::models::ResumeDocument;

/// Whitespace, path separators and characters that filesystems reserve.
static UNSAFE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[\s/\\:*?"<>|\p{Cc}]+"#).expect("BUG: unsafe-run regex must compile")
});

/// Characters that end the role part of a headline.
const ROLE_DELIMITERS: [char; 3] = ['•', '|', '-'];

/// `"{name}_{role}_Resume_{YYYY-MM-DD}.pdf"`.
///
/// The role is the headline up to its first `•`, `|` or `-`. A headline that
/// starts with a delimiter yields an empty role segment. Runs of whitespace or
/// of characters unsafe in a file name become a single `-`, so the result is
/// always one bare path component.
pub fn derive_filename(doc: &ResumeDocument, date: NaiveDate) -> String {
    let name = match doc.header.full_name.trim() {
        "" => "Candidate",
        trimmed => trimmed,
    };
    let headline = match doc.header.headline.as_deref().map(str::trim) {
        Some(h) if !h.is_empty() => h,
        _ => "Resume",
    };
    let role = headline.split(ROLE_DELIMITERS).next().unwrap_or_default().trim();

    format!(
        "{}_{}_Resume_{}.pdf",
        dashed(name),
        dashed(role),
        date.format("%Y-%m-%d")
    )
}

/// `derive_filename` with today's UTC date.
pub fn derive_filename_today(doc: &ResumeDocument) -> String {
    derive_filename(doc, Utc::now().date_naive())
}

/// Reduces a client-supplied filename to a bare `*.pdf` file name.
///
/// Returns `None` when nothing usable is left, in which case callers fall back
/// to the derived name.
pub fn normalize_filename(supplied: &str) -> Option<String> {
    let base = supplied
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_control() && *c != '"')
        .collect::<String>();
    let base = base.trim();
    if base.is_empty() || base == "." || base == ".." {
        return None;
    }
    if base.to_ascii_lowercase().ends_with(".pdf") {
        Some(base.to_string())
    } else {
        Some(format!("{base}.pdf"))
    }
}

fn dashed(s: &str) -> String {
    UNSAFE_RUN.replace_all(s, "-").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::SAMPLE_JSON;
    use crate::validation::validate;

    fn doc_with(full_name: &str, headline: Option<&str>) -> ResumeDocument {
        let mut doc = validate(SAMPLE_JSON).unwrap();
        doc.header.full_name = full_name.to_string();
        doc.header.headline = headline.map(str::to_string);
        doc
    }

    fn jan_2() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()
    }

    #[test]
    fn test_name_role_and_date() {
        let doc = doc_with("Jane Q. Doe", Some("Backend Engineer | Go"));
        assert_eq!(
            derive_filename(&doc, jan_2()),
            "Jane-Q.-Doe_Backend-Engineer_Resume_2025-01-02.pdf"
        );
    }

    #[test]
    fn test_sample_uses_text_before_bullet() {
        let doc = validate(SAMPLE_JSON).unwrap();
        assert_eq!(
            derive_filename(&doc, jan_2()),
            "Maya-Lindqvist_Backend-Engineer_Resume_2025-01-02.pdf"
        );
    }

    #[test]
    fn test_role_stops_at_first_hyphen() {
        let doc = doc_with("Ana", Some("Full-stack Developer • React"));
        assert_eq!(derive_filename(&doc, jan_2()), "Ana_Full_Resume_2025-01-02.pdf");
    }

    #[test]
    fn test_defaults_for_blank_name_and_missing_headline() {
        let doc = doc_with("   ", None);
        assert_eq!(
            derive_filename(&doc, jan_2()),
            "Candidate_Resume_Resume_2025-01-02.pdf"
        );
        let doc = doc_with("Bo", Some(""));
        assert_eq!(derive_filename(&doc, jan_2()), "Bo_Resume_Resume_2025-01-02.pdf");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        let doc = doc_with("  Mary   Ann\tLee ", Some("Data   Scientist"));
        assert_eq!(
            derive_filename(&doc, jan_2()),
            "Mary-Ann-Lee_Data-Scientist_Resume_2025-01-02.pdf"
        );
    }

    #[test]
    fn test_leading_delimiter_gives_empty_role() {
        let doc = doc_with("Ana", Some("| Engineer"));
        assert_eq!(derive_filename(&doc, jan_2()), "Ana__Resume_2025-01-02.pdf");
    }

    #[test]
    fn test_path_characters_never_reach_the_filename() {
        let doc = doc_with("../escaped", Some("Backend/Infra Engineer"));
        let name = derive_filename(&doc, jan_2());
        assert_eq!(name, "..-escaped_Backend-Infra-Engineer_Resume_2025-01-02.pdf");

        let doc = doc_with("a\\b: c*d?\"e\"<f>", None);
        assert_eq!(derive_filename(&doc, jan_2()), "a-b-c-d-e-f-_Resume_Resume_2025-01-02.pdf");

        let components: Vec<_> = std::path::Path::new(&name).components().collect();
        assert_eq!(components.len(), 1);
        assert!(matches!(components[0], std::path::Component::Normal(_)));
    }

    #[test]
    fn test_deterministic_for_same_input() {
        let doc = doc_with("Jane Q. Doe", Some("Backend Engineer | Go"));
        assert_eq!(derive_filename(&doc, jan_2()), derive_filename(&doc, jan_2()));
        assert!(derive_filename_today(&doc).ends_with(".pdf"));
    }

    #[test]
    fn test_normalize_filename() {
        assert_eq!(normalize_filename("cv").as_deref(), Some("cv.pdf"));
        assert_eq!(normalize_filename("cv.PDF").as_deref(), Some("cv.PDF"));
        assert_eq!(normalize_filename("../../etc/passwd").as_deref(), Some("passwd.pdf"));
        assert_eq!(normalize_filename("C:\\Users\\x\\my cv.pdf").as_deref(), Some("my cv.pdf"));
        assert_eq!(normalize_filename("a\"b").as_deref(), Some("ab.pdf"));
        assert_eq!(normalize_filename("dir/"), None);
        assert_eq!(normalize_filename(".."), None);
        assert_eq!(normalize_filename("   "), None);
    }
}

//! The résumé schema, expressed as checks. Field order inside each function is the
//! declaration order of the schema, which is also the order diagnostics come out in.

use serde_json::Value;

use crate::models::{
    Education, Experience, Header, Link, Meta, Project, ResumeDocument, Summary, TechnicalSkills,
};
use crate::validation::checks::{
    array_of, email, positive_int, string, string_list, string_min, url, ObjectView,
};
use crate::validation::diagnostic::{Collector, FieldPath, Validated};

macro_rules! open_object {
    ($value:expr, $path:expr, $known:expr) => {
        match ObjectView::open($value, $path, $known) {
            Validated::Valid(view) => view,
            Validated::Invalid(d) => return Validated::Invalid(d),
        }
    };
}

pub fn resume_document(value: &Value, path: &FieldPath) -> Validated<ResumeDocument> {
    let obj = open_object!(
        value,
        path,
        &[
            "meta",
            "header",
            "summary",
            "education",
            "projects",
            "experience",
            "technicalSkills",
            "achievements",
            "certifications",
            "keywordBank",
        ]
    );
    let mut c = Collector::new();

    let meta = c.take(obj.field("meta").required(meta));
    let header = c.take(obj.field("header").required(header));
    let summary = c.take(obj.field("summary").optional(summary));
    let education = c.take(obj.field("education").required(array_of(1, education)));
    let projects = c.take(obj.field("projects").or_default(array_of(0, project)));
    let experience = c.take(obj.field("experience").or_default(array_of(0, experience)));
    let technical_skills = c.take(obj.field("technicalSkills").required(technical_skills));
    let achievements = c.take(obj.field("achievements").or_default(string_list));
    let certifications = c.take(obj.field("certifications").or_default(string_list));
    let keyword_bank = c.take(obj.field("keywordBank").or_default(string_list));

    c.finish(|| {
        Some(ResumeDocument {
            meta: meta?,
            header: header?,
            summary: summary?,
            education: education?,
            projects: projects?,
            experience: experience?,
            technical_skills: technical_skills?,
            achievements: achievements?,
            certifications: certifications?,
            keyword_bank: keyword_bank?,
        })
    })
}

/// `generatedAtISO` is the key older exports used; `generatedAt` wins when both exist.
fn meta(value: &Value, path: &FieldPath) -> Validated<Meta> {
    let obj = open_object!(value, path, &["version", "generatedAt", "generatedAtISO"]);
    let mut c = Collector::new();

    let version = c.take(obj.field("version").required(positive_int));
    let current = obj.field("generatedAt");
    let generated_at = if current.is_present() {
        c.take(current.optional(string))
    } else {
        c.take(obj.field("generatedAtISO").optional(string))
    };

    c.finish(|| {
        Some(Meta {
            version: version?,
            generated_at: generated_at?,
        })
    })
}

fn header(value: &Value, path: &FieldPath) -> Validated<Header> {
    let obj = open_object!(
        value,
        path,
        &["fullName", "headline", "location", "phone", "email", "links"]
    );
    let mut c = Collector::new();

    let full_name = c.take(obj.field("fullName").required(string_min(1)));
    let headline = c.take(obj.field("headline").optional(string));
    let location = c.take(obj.field("location").optional(string));
    let phone = c.take(obj.field("phone").required(string_min(5)));
    let email = c.take(obj.field("email").required(email));
    let links = c.take(obj.field("links").required(array_of(1, link)));

    c.finish(|| {
        Some(Header {
            full_name: full_name?,
            headline: headline?,
            location: location?,
            phone: phone?,
            email: email?,
            links: links?,
        })
    })
}

fn link(value: &Value, path: &FieldPath) -> Validated<Link> {
    let obj = open_object!(value, path, &["label", "url"]);
    let mut c = Collector::new();

    let label = c.take(obj.field("label").required(string_min(1)));
    let url = c.take(obj.field("url").required(url));

    c.finish(|| {
        Some(Link {
            label: label?,
            url: url?,
        })
    })
}

fn summary(value: &Value, path: &FieldPath) -> Validated<Summary> {
    let obj = open_object!(value, path, &["paragraph", "highlights"]);
    let mut c = Collector::new();

    let paragraph = c.take(obj.field("paragraph").required(string_min(10)));
    let highlights = c.take(obj.field("highlights").or_default(string_list));

    c.finish(|| {
        Some(Summary {
            paragraph: paragraph?,
            highlights: highlights?,
        })
    })
}

fn education(value: &Value, path: &FieldPath) -> Validated<Education> {
    let obj = open_object!(
        value,
        path,
        &[
            "institution",
            "location",
            "degree",
            "start",
            "end",
            "gpaLabel",
            "gpa",
            "coursework",
            "honors",
        ]
    );
    let mut c = Collector::new();

    let institution = c.take(obj.field("institution").required(string));
    let location = c.take(obj.field("location").required(string));
    let degree = c.take(obj.field("degree").required(string));
    let start = c.take(obj.field("start").nullable(string));
    let end = c.take(obj.field("end").required(string));
    let gpa_label = c.take(obj.field("gpaLabel").optional(string));
    let gpa = c.take(obj.field("gpa").optional(string));
    let coursework = c.take(obj.field("coursework").optional(string_list));
    let honors = c.take(obj.field("honors").optional(string_list));

    c.finish(|| {
        Some(Education {
            institution: institution?,
            location: location?,
            degree: degree?,
            start: start?,
            end: end?,
            gpa_label: gpa_label?,
            gpa: gpa?,
            coursework: coursework?,
            honors: honors?,
        })
    })
}

fn project(value: &Value, path: &FieldPath) -> Validated<Project> {
    let obj = open_object!(
        value,
        path,
        &["name", "role", "start", "end", "bullets", "tech", "links"]
    );
    let mut c = Collector::new();

    let name = c.take(obj.field("name").required(string));
    let role = c.take(obj.field("role").optional(string));
    let start = c.take(obj.field("start").nullable(string));
    let end = c.take(obj.field("end").nullable(string));
    let bullets = c.take(obj.field("bullets").required(array_of(1, string_min(1))));
    let tech = c.take(obj.field("tech").optional(string_list));
    let links = c.take(obj.field("links").optional(array_of(0, link)));

    c.finish(|| {
        Some(Project {
            name: name?,
            role: role?,
            start: start?,
            end: end?,
            bullets: bullets?,
            tech: tech?,
            links: links?,
        })
    })
}

fn experience(value: &Value, path: &FieldPath) -> Validated<Experience> {
    let obj = open_object!(
        value,
        path,
        &[
            "company",
            "title",
            "location",
            "employmentType",
            "start",
            "end",
            "bullets",
            "tech",
        ]
    );
    let mut c = Collector::new();

    let company = c.take(obj.field("company").required(string));
    let title = c.take(obj.field("title").required(string));
    let location = c.take(obj.field("location").nullable(string));
    let employment_type = c.take(obj.field("employmentType").optional(string));
    let start = c.take(obj.field("start").required(string));
    let end = c.take(obj.field("end").required(string));
    let bullets = c.take(obj.field("bullets").required(array_of(1, string_min(1))));
    let tech = c.take(obj.field("tech").optional(string_list));

    c.finish(|| {
        Some(Experience {
            company: company?,
            title: title?,
            location: location?,
            employment_type: employment_type?,
            start: start?,
            end: end?,
            bullets: bullets?,
            tech: tech?,
        })
    })
}

fn technical_skills(value: &Value, path: &FieldPath) -> Validated<TechnicalSkills> {
    let obj = open_object!(
        value,
        path,
        &[
            "programmingLanguages",
            "frameworks",
            "cloudDevOps",
            "databases",
            "dataPlatforms",
            "tools",
            "other",
        ]
    );
    let mut c = Collector::new();

    let programming_languages = c.take(obj.field("programmingLanguages").or_default(string_list));
    let frameworks = c.take(obj.field("frameworks").or_default(string_list));
    let cloud_dev_ops = c.take(obj.field("cloudDevOps").or_default(string_list));
    let databases = c.take(obj.field("databases").or_default(string_list));
    let data_platforms = c.take(obj.field("dataPlatforms").or_default(string_list));
    let tools = c.take(obj.field("tools").or_default(string_list));
    let other = c.take(obj.field("other").or_default(string_list));

    c.finish(|| {
        Some(TechnicalSkills {
            programming_languages: programming_languages?,
            frameworks: frameworks?,
            cloud_dev_ops: cloud_dev_ops?,
            databases: databases?,
            data_platforms: data_platforms?,
            tools: tools?,
            other: other?,
        })
    })
}

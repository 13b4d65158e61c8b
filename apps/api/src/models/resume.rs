//! Typed résumé model.
//!
//! Instances are only ever produced by `validation::validate`, so there is no
//! `Deserialize` impl here: a `ResumeDocument` in hand is always a document that
//! passed every structural check. `Serialize` writes the same camelCase shape the
//! validator reads, which keeps serialize → validate a lossless round trip.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    pub meta: Meta,
    pub header: Header,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    /// Never empty.
    pub education: Vec<Education>,
    pub projects: Vec<Project>,
    pub experience: Vec<Experience>,
    pub technical_skills: TechnicalSkills,
    pub achievements: Vec<String>,
    pub certifications: Vec<String>,
    pub keyword_bank: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    /// Always > 0.
    pub version: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub phone: String,
    pub email: String,
    /// Never empty; printed in this order.
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub paragraph: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    pub location: String,
    pub degree: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    pub end: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coursework: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub honors: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    pub bullets: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub company: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    pub start: String,
    pub end: String,
    pub bullets: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalSkills {
    pub programming_languages: Vec<String>,
    pub frameworks: Vec<String>,
    pub cloud_dev_ops: Vec<String>,
    pub databases: Vec<String>,
    pub data_platforms: Vec<String>,
    pub tools: Vec<String>,
    pub other: Vec<String>,
}

/// One printable skill bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillCategory {
    ProgrammingLanguages,
    Frameworks,
    CloudDevOps,
    Databases,
    DataPlatforms,
    Tools,
    Other,
}

impl SkillCategory {
    /// Print order.
    pub const ALL: [SkillCategory; 7] = [
        SkillCategory::ProgrammingLanguages,
        SkillCategory::Frameworks,
        SkillCategory::CloudDevOps,
        SkillCategory::Databases,
        SkillCategory::DataPlatforms,
        SkillCategory::Tools,
        SkillCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SkillCategory::ProgrammingLanguages => "Programming",
            SkillCategory::Frameworks => "Frameworks/Libraries",
            SkillCategory::CloudDevOps => "Cloud & DevOps",
            SkillCategory::Databases => "Databases",
            SkillCategory::DataPlatforms => "Data Platforms",
            SkillCategory::Tools => "Tools",
            SkillCategory::Other => "Other",
        }
    }
}

impl TechnicalSkills {
    pub fn bucket(&self, category: SkillCategory) -> &[String] {
        match category {
            SkillCategory::ProgrammingLanguages => &self.programming_languages,
            SkillCategory::Frameworks => &self.frameworks,
            SkillCategory::CloudDevOps => &self.cloud_dev_ops,
            SkillCategory::Databases => &self.databases,
            SkillCategory::DataPlatforms => &self.data_platforms,
            SkillCategory::Tools => &self.tools,
            SkillCategory::Other => &self.other,
        }
    }
}

pub mod resume;

pub use resume::{
    Education, Experience, Header, Link, Meta, Project, ResumeDocument, SkillCategory, Summary,
    TechnicalSkills,
};

//! The resume document: one personal header, three ordered entry sections and
//! a skills block.
//!
//! Serialized with the same camelCase keys as the output schema handed to the
//! extraction service, so a service payload deserializes straight into
//! [`ResumeDocument`]. Fields the schema marks as required have no serde
//! default; everything else defaults to an empty string or an empty list.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PersonalInfo {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    pub email: String,
    /// Free text, usually `linkedin.com/in/<handle>`.
    #[serde(default)]
    pub linkedin: String,
    /// Free text, usually `github.com/<handle>`.
    #[serde(default)]
    pub github: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EducationEntry {
    pub school: String,
    pub degree: String,
    #[serde(default)]
    pub location: String,
    /// Free-text range such as `Aug. 2018 -- May 2021`. Never parsed.
    pub date: String,
    #[serde(default)]
    pub description: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExperienceEntry {
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub location: String,
    pub date: String,
    #[serde(default)]
    pub description: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectEntry {
    pub name: String,
    /// Comma-separated technologies, as typed.
    #[serde(default)]
    pub tech: String,
    pub date: String,
    #[serde(default)]
    pub description: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillsBlock {
    #[serde(default)]
    pub languages: String,
    #[serde(default)]
    pub frameworks: String,
    #[serde(default)]
    pub tools: String,
    #[serde(default)]
    pub libraries: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResumeDocument {
    pub personal_info: PersonalInfo,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    pub skills: SkillsBlock,
}

impl ResumeDocument {
    /// The sample resume shown before anything has been generated.
    pub fn seed() -> Self {
        ResumeDocument {
            personal_info: PersonalInfo {
                name: "JAKE DOE".to_string(),
                phone: "123-456-7890".to_string(),
                email: "jake@example.com".to_string(),
                linkedin: "linkedin.com/in/jakedoe".to_string(),
                github: "github.com/jakedoe".to_string(),
            },
            education: vec![EducationEntry {
                school: "Southwestern University".to_string(),
                degree: "Bachelor of Science in Computer Science".to_string(),
                location: "Georgetown, TX".to_string(),
                date: "Aug. 2018 -- May 2021".to_string(),
                description: vec![],
            }],
            experience: vec![ExperienceEntry {
                company: "Starbucks".to_string(),
                role: "Software Engineer Intern".to_string(),
                location: "Seattle, WA".to_string(),
                date: "May 2020 -- Aug. 2020".to_string(),
                description: vec![
                    "Worked on the mobile app using React Native and TypeScript".to_string(),
                    "Improved performance by 20% by optimizing database queries".to_string(),
                ],
            }],
            projects: vec![ProjectEntry {
                name: "Git-it-done".to_string(),
                tech: "Node.js, Express, MongoDB".to_string(),
                date: "June 2020".to_string(),
                description: vec![
                    "Developed a CLI tool to automate git workflows".to_string(),
                    "Used by over 500 developers weekly".to_string(),
                ],
            }],
            skills: SkillsBlock {
                languages: "Java, Python, C/C++, SQL (Postgres), JavaScript, HTML/CSS".to_string(),
                frameworks: "React, Node.js, Flask, JUnit, WordPress".to_string(),
                tools: "Git, Docker, Google Cloud Platform, VS Code, PyCharm, IntelliJ, Eclipse"
                    .to_string(),
                libraries: "pandas, NumPy, Matplotlib".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_fully_populated() {
        let seed = ResumeDocument::seed();
        assert!(!seed.personal_info.name.is_empty());
        assert!(!seed.personal_info.email.is_empty());
        assert!(!seed.education.is_empty());
        assert!(!seed.experience.is_empty());
        assert!(!seed.projects.is_empty());
        assert!(!seed.skills.languages.is_empty());
    }

    #[test]
    fn test_seed_is_deterministic() {
        assert_eq!(ResumeDocument::seed(), ResumeDocument::seed());
    }

    #[test]
    fn test_serializes_with_camel_case_root() {
        let value = serde_json::to_value(ResumeDocument::seed()).unwrap();
        assert!(value.get("personalInfo").is_some());
        assert!(value.get("personal_info").is_none());
        assert_eq!(value["projects"][0]["tech"], "Node.js, Express, MongoDB");
    }

    #[test]
    fn test_optional_fields_default_when_missing() {
        let json = r#"{
            "personalInfo": {"name": "Ada", "email": "ada@example.com"},
            "education": [{"school": "MIT", "degree": "BS", "date": "2020"}],
            "experience": [],
            "skills": {}
        }"#;
        let doc: ResumeDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.personal_info.phone, "");
        assert_eq!(doc.education[0].location, "");
        assert!(doc.education[0].description.is_empty());
        assert!(doc.projects.is_empty());
        assert_eq!(doc.skills, SkillsBlock::default());
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let json = r#"{
            "personalInfo": {"name": "Ada"},
            "education": [],
            "experience": [],
            "skills": {}
        }"#;
        assert!(serde_json::from_str::<ResumeDocument>(json).is_err());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let json = r#"{
            "personalInfo": {"name": "Ada", "email": "a@b.c", "twitter": "@ada"},
            "education": [],
            "experience": [],
            "skills": {}
        }"#;
        assert!(serde_json::from_str::<ResumeDocument>(json).is_err());
    }
}

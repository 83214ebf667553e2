//! Addressing and partial-update types for the editor.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{EducationEntry, ExperienceEntry, ProjectEntry};

/// One of the three ordered entry sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Education,
    Experience,
    Projects,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Education, Section::Experience, Section::Projects];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Education => "education",
            Section::Experience => "experience",
            Section::Projects => "projects",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonalField {
    Name,
    Phone,
    Email,
    Linkedin,
    Github,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillsField {
    Languages,
    Frameworks,
    Tools,
    Libraries,
}

// ────────────────────────────────────────────────────────────────────────────
// Partial entry updates
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EducationPatch {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub description: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExperiencePatch {
    pub company: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub description: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub tech: Option<String>,
    pub date: Option<String>,
    pub description: Option<Vec<String>>,
}

/// A set of fields to merge onto one entry. The variant decides which section
/// the patch applies to; fields left as `None` are kept as they are.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryPatch {
    Education(EducationPatch),
    Experience(ExperiencePatch),
    Project(ProjectPatch),
}

impl EntryPatch {
    /// Reads a JSON object as a patch for `section`. Keys that do not belong to
    /// that section's entry shape are rejected.
    pub fn from_json(section: Section, value: Value) -> Result<Self, serde_json::Error> {
        Ok(match section {
            Section::Education => EntryPatch::Education(serde_json::from_value(value)?),
            Section::Experience => EntryPatch::Experience(serde_json::from_value(value)?),
            Section::Projects => EntryPatch::Project(serde_json::from_value(value)?),
        })
    }

    pub fn section(&self) -> Section {
        match self {
            EntryPatch::Education(_) => Section::Education,
            EntryPatch::Experience(_) => Section::Experience,
            EntryPatch::Project(_) => Section::Projects,
        }
    }
}

fn merge(slot: &mut String, value: &Option<String>) {
    if let Some(v) = value {
        slot.clone_from(v);
    }
}

impl EducationPatch {
    pub(crate) fn apply(&self, entry: &mut EducationEntry) {
        merge(&mut entry.school, &self.school);
        merge(&mut entry.degree, &self.degree);
        merge(&mut entry.location, &self.location);
        merge(&mut entry.date, &self.date);
        if let Some(bullets) = &self.description {
            entry.description.clone_from(bullets);
        }
    }
}

impl ExperiencePatch {
    pub(crate) fn apply(&self, entry: &mut ExperienceEntry) {
        merge(&mut entry.company, &self.company);
        merge(&mut entry.role, &self.role);
        merge(&mut entry.location, &self.location);
        merge(&mut entry.date, &self.date);
        if let Some(bullets) = &self.description {
            entry.description.clone_from(bullets);
        }
    }
}

impl ProjectPatch {
    pub(crate) fn apply(&self, entry: &mut ProjectEntry) {
        merge(&mut entry.name, &self.name);
        merge(&mut entry.tech, &self.tech);
        merge(&mut entry.date, &self.date);
        if let Some(bullets) = &self.description {
            entry.description.clone_from(bullets);
        }
    }
}

//! Presentation projection: [`ResumeDocument`] → a printable page tree.
//!
//! Pure and total. Blank strings and empty lists are dropped rather than drawn
//! as placeholders, so a freshly added entry or an empty section never leaves
//! an empty frame on the page.

pub mod handlers;
pub mod html;

use serde::Serialize;

use crate::models::ResumeDocument;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub header: Header,
    pub sections: Vec<PageSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub name: String,
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Contact {
    Text { text: String },
    Link { label: String, href: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSection {
    pub title: &'static str,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum SectionBody {
    Entries(Vec<EntryBlock>),
    Skills(Vec<SkillLine>),
}

/// Two heading rows and a bullet list. Project entries have no second row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryBlock {
    pub title: String,
    /// Rendered in italics after the title (project tech list).
    pub title_note: Option<String>,
    pub aside: String,
    pub subtitle: Option<Row>,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub left: String,
    pub right: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillLine {
    pub label: &'static str,
    pub value: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Projection
// ────────────────────────────────────────────────────────────────────────────

pub fn project(doc: &ResumeDocument) -> Page {
    let mut sections = Vec::new();

    let education: Vec<EntryBlock> = doc
        .education
        .iter()
        .map(|e| EntryBlock {
            title: e.school.clone(),
            title_note: None,
            aside: e.location.clone(),
            subtitle: Some(Row {
                left: e.degree.clone(),
                right: e.date.clone(),
            }),
            bullets: bullets(&e.description),
        })
        .collect();
    push_entries(&mut sections, "Education", education);

    let experience: Vec<EntryBlock> = doc
        .experience
        .iter()
        .map(|e| EntryBlock {
            title: e.company.clone(),
            title_note: None,
            aside: e.location.clone(),
            subtitle: Some(Row {
                left: e.role.clone(),
                right: e.date.clone(),
            }),
            bullets: bullets(&e.description),
        })
        .collect();
    push_entries(&mut sections, "Experience", experience);

    let projects: Vec<EntryBlock> = doc
        .projects
        .iter()
        .map(|p| EntryBlock {
            title: p.name.clone(),
            title_note: non_blank(&p.tech),
            aside: p.date.clone(),
            subtitle: None,
            bullets: bullets(&p.description),
        })
        .collect();
    push_entries(&mut sections, "Projects", projects);

    let skills = &doc.skills;
    let lines: Vec<SkillLine> = [
        ("Languages", &skills.languages),
        ("Frameworks", &skills.frameworks),
        ("Developer Tools", &skills.tools),
        ("Libraries", &skills.libraries),
    ]
    .into_iter()
    .filter_map(|(label, value)| {
        non_blank(value).map(|value| SkillLine { label, value })
    })
    .collect();
    if !lines.is_empty() {
        sections.push(PageSection {
            title: "Technical Skills",
            body: SectionBody::Skills(lines),
        });
    }

    Page {
        header: header(doc),
        sections,
    }
}

fn header(doc: &ResumeDocument) -> Header {
    let info = &doc.personal_info;
    let mut contacts = Vec::new();

    if let Some(phone) = non_blank(&info.phone) {
        contacts.push(Contact::Text { text: phone });
    }
    if let Some(email) = non_blank(&info.email) {
        contacts.push(Contact::Link {
            href: format!("mailto:{}", email.trim()),
            label: email,
        });
    }
    if let Some(handle) = profile_handle(&info.linkedin) {
        contacts.push(Contact::Link {
            label: format!("linkedin.com/in/{handle}"),
            href: format!("https://linkedin.com/in/{handle}"),
        });
    }
    if let Some(handle) = profile_handle(&info.github) {
        contacts.push(Contact::Link {
            label: format!("github.com/{handle}"),
            href: format!("https://github.com/{handle}"),
        });
    }

    Header {
        name: info.name.clone(),
        contacts,
    }
}

fn push_entries(sections: &mut Vec<PageSection>, title: &'static str, entries: Vec<EntryBlock>) {
    if !entries.is_empty() {
        sections.push(PageSection {
            title,
            body: SectionBody::Entries(entries),
        });
    }
}

fn bullets(description: &[String]) -> Vec<String> {
    description
        .iter()
        .filter_map(|b| non_blank(b))
        .collect()
}

/// The value as stored, or `None` when it is only whitespace.
fn non_blank(s: &str) -> Option<String> {
    (!s.trim().is_empty()).then(|| s.to_string())
}

const PROFILE_HOSTS: [&str; 2] = ["linkedin.com", "github.com"];

/// Handle from a free-text profile reference: `linkedin.com/in/jane/` → `jane`.
///
/// Scheme, `www.`, the site host and LinkedIn's `in/` prefix are removed
/// first, so a bare site prefix like `github.com/` yields no handle.
pub fn profile_handle(raw: &str) -> Option<String> {
    let mut rest = raw.trim();
    for scheme in ["https://", "http://"] {
        if let Some(stripped) = rest.strip_prefix(scheme) {
            rest = stripped;
        }
    }
    rest = rest.strip_prefix("www.").unwrap_or(rest);

    let mut segments: Vec<&str> = rest
        .split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    let had_host = segments
        .first()
        .is_some_and(|host| PROFILE_HOSTS.iter().any(|h| host.eq_ignore_ascii_case(h)));
    if had_host {
        segments.remove(0);
    }
    if segments.first() == Some(&"in") && (had_host || segments.len() > 1) {
        segments.remove(0);
    }

    segments.last().map(|handle| handle.to_string())
}

//! Pure edit operations over a [`ResumeDocument`].
//!
//! Every function borrows the current document and returns the next one; the
//! input value is never modified. Entries and bullets are addressed purely by
//! position. Indices must be in bounds: an out-of-range index is a caller bug
//! and panics, the same way slice indexing does. The HTTP layer checks bounds
//! before calling in here.

use crate::editor::patch::{EntryPatch, PersonalField, Section, SkillsField};
use crate::models::{EducationEntry, ExperienceEntry, ProjectEntry, ResumeDocument};

pub fn set_personal_field(doc: &ResumeDocument, field: PersonalField, value: &str) -> ResumeDocument {
    let mut next = doc.clone();
    let info = &mut next.personal_info;
    let slot = match field {
        PersonalField::Name => &mut info.name,
        PersonalField::Phone => &mut info.phone,
        PersonalField::Email => &mut info.email,
        PersonalField::Linkedin => &mut info.linkedin,
        PersonalField::Github => &mut info.github,
    };
    *slot = value.to_string();
    next
}

pub fn set_skills_field(doc: &ResumeDocument, field: SkillsField, value: &str) -> ResumeDocument {
    let mut next = doc.clone();
    let skills = &mut next.skills;
    let slot = match field {
        SkillsField::Languages => &mut skills.languages,
        SkillsField::Frameworks => &mut skills.frameworks,
        SkillsField::Tools => &mut skills.tools,
        SkillsField::Libraries => &mut skills.libraries,
    };
    *slot = value.to_string();
    next
}

/// Merges `patch` onto the entry at `index` in the patch's section.
///
/// # Panics
/// If `index` is out of bounds for that section.
pub fn update_entry(doc: &ResumeDocument, index: usize, patch: &EntryPatch) -> ResumeDocument {
    let mut next = doc.clone();
    match patch {
        EntryPatch::Education(p) => p.apply(&mut next.education[index]),
        EntryPatch::Experience(p) => p.apply(&mut next.experience[index]),
        EntryPatch::Project(p) => p.apply(&mut next.projects[index]),
    }
    next
}

/// Appends a blank entry shaped for `section`.
pub fn add_entry(doc: &ResumeDocument, section: Section) -> ResumeDocument {
    let mut next = doc.clone();
    match section {
        Section::Education => next.education.push(EducationEntry::default()),
        Section::Experience => next.experience.push(ExperienceEntry::default()),
        Section::Projects => next.projects.push(ProjectEntry::default()),
    }
    next
}

/// Removes the entry at `index`; later entries move up one slot.
///
/// # Panics
/// If `index` is out of bounds for `section`.
pub fn remove_entry(doc: &ResumeDocument, section: Section, index: usize) -> ResumeDocument {
    let mut next = doc.clone();
    match section {
        Section::Education => {
            next.education.remove(index);
        }
        Section::Experience => {
            next.experience.remove(index);
        }
        Section::Projects => {
            next.projects.remove(index);
        }
    }
    next
}

/// # Panics
/// If either index is out of bounds.
pub fn update_bullet(
    doc: &ResumeDocument,
    section: Section,
    entry_index: usize,
    bullet_index: usize,
    text: &str,
) -> ResumeDocument {
    let mut next = doc.clone();
    bullets_mut(&mut next, section, entry_index)[bullet_index] = text.to_string();
    next
}

/// # Panics
/// If `entry_index` is out of bounds.
pub fn add_bullet(doc: &ResumeDocument, section: Section, entry_index: usize) -> ResumeDocument {
    let mut next = doc.clone();
    bullets_mut(&mut next, section, entry_index).push(String::new());
    next
}

/// # Panics
/// If either index is out of bounds.
pub fn remove_bullet(
    doc: &ResumeDocument,
    section: Section,
    entry_index: usize,
    bullet_index: usize,
) -> ResumeDocument {
    let mut next = doc.clone();
    bullets_mut(&mut next, section, entry_index).remove(bullet_index);
    next
}

/// Number of entries currently in `section`.
pub fn entry_count(doc: &ResumeDocument, section: Section) -> usize {
    match section {
        Section::Education => doc.education.len(),
        Section::Experience => doc.experience.len(),
        Section::Projects => doc.projects.len(),
    }
}

/// Number of bullets on one entry, or `None` if the entry does not exist.
pub fn bullet_count(doc: &ResumeDocument, section: Section, entry_index: usize) -> Option<usize> {
    match section {
        Section::Education => doc.education.get(entry_index).map(|e| e.description.len()),
        Section::Experience => doc.experience.get(entry_index).map(|e| e.description.len()),
        Section::Projects => doc.projects.get(entry_index).map(|e| e.description.len()),
    }
}

fn bullets_mut(doc: &mut ResumeDocument, section: Section, entry_index: usize) -> &mut Vec<String> {
    match section {
        Section::Education => &mut doc.education[entry_index].description,
        Section::Experience => &mut doc.experience[entry_index].description,
        Section::Projects => &mut doc.projects[entry_index].description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::patch::{EducationPatch, ExperiencePatch, ProjectPatch};

    fn three_of_each() -> ResumeDocument {
        let mut doc = ResumeDocument::seed();
        for i in 1..3 {
            doc.education.push(EducationEntry {
                school: format!("School {i}"),
                ..Default::default()
            });
            doc.experience.push(ExperienceEntry {
                company: format!("Company {i}"),
                ..Default::default()
            });
            doc.projects.push(ProjectEntry {
                name: format!("Project {i}"),
                ..Default::default()
            });
        }
        doc
    }

    fn patch_for(section: Section) -> EntryPatch {
        match section {
            Section::Education => EntryPatch::Education(EducationPatch {
                degree: Some("PhD".to_string()),
                ..Default::default()
            }),
            Section::Experience => EntryPatch::Experience(ExperiencePatch {
                role: Some("Staff Engineer".to_string()),
                ..Default::default()
            }),
            Section::Projects => EntryPatch::Project(ProjectPatch {
                tech: Some("Rust".to_string()),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_set_personal_field_leaves_input_untouched() {
        let doc = ResumeDocument::seed();
        let next = set_personal_field(&doc, PersonalField::Name, "Jane Roe");
        assert_eq!(next.personal_info.name, "Jane Roe");
        assert_eq!(doc.personal_info.name, "JAKE DOE");
        assert_eq!(next.personal_info.email, doc.personal_info.email);
        assert_eq!(next.education, doc.education);
    }

    #[test]
    fn test_set_skills_field() {
        let doc = ResumeDocument::seed();
        let next = set_skills_field(&doc, SkillsField::Tools, "Cargo, Clippy");
        assert_eq!(next.skills.tools, "Cargo, Clippy");
        assert_eq!(next.skills.languages, doc.skills.languages);
        assert_ne!(doc.skills.tools, "Cargo, Clippy");
    }

    #[test]
    fn test_remove_entry_shifts_followers() {
        let doc = three_of_each();
        let next = remove_entry(&doc, Section::Experience, 1);
        assert_eq!(next.experience.len(), doc.experience.len() - 1);
        assert_eq!(next.experience[0], doc.experience[0]);
        assert_eq!(next.experience[1], doc.experience[2]);
    }

    #[test]
    fn test_remove_entry_shifts_in_every_section() {
        let doc = three_of_each();
        for section in Section::ALL {
            for i in 0..entry_count(&doc, section) {
                let next = remove_entry(&doc, section, i);
                assert_eq!(entry_count(&next, section), entry_count(&doc, section) - 1);
                match section {
                    Section::Education => {
                        assert_eq!(next.education[..i], doc.education[..i]);
                        assert_eq!(next.education[i..], doc.education[i + 1..]);
                    }
                    Section::Experience => {
                        assert_eq!(next.experience[..i], doc.experience[..i]);
                        assert_eq!(next.experience[i..], doc.experience[i + 1..]);
                    }
                    Section::Projects => {
                        assert_eq!(next.projects[..i], doc.projects[..i]);
                        assert_eq!(next.projects[i..], doc.projects[i + 1..]);
                    }
                }
            }
        }
    }

    #[test]
    fn test_add_then_remove_last_restores_document() {
        let doc = three_of_each();
        for section in Section::ALL {
            let grown = add_entry(&doc, section);
            let last = entry_count(&grown, section) - 1;
            assert_eq!(remove_entry(&grown, section, last), doc);
        }
    }

    #[test]
    fn test_add_entry_is_blank_with_empty_bullets() {
        let doc = ResumeDocument::seed();
        let next = add_entry(&doc, Section::Projects);
        let added = next.projects.last().unwrap();
        assert_eq!(added, &ProjectEntry::default());
        assert!(added.description.is_empty());
        assert_eq!(next.education, doc.education);
    }

    #[test]
    fn test_update_entry_is_isolated() {
        let doc = three_of_each();
        for section in Section::ALL {
            let next = update_entry(&doc, 1, &patch_for(section));
            for other in Section::ALL {
                for i in 0..entry_count(&doc, other) {
                    let changed = other == section && i == 1;
                    let same = match other {
                        Section::Education => next.education[i] == doc.education[i],
                        Section::Experience => next.experience[i] == doc.experience[i],
                        Section::Projects => next.projects[i] == doc.projects[i],
                    };
                    assert_eq!(same, !changed, "{section:?} patch touched {other:?}[{i}]");
                }
            }
            assert_eq!(next.personal_info, doc.personal_info);
            assert_eq!(next.skills, doc.skills);
        }
    }

    #[test]
    fn test_update_entry_merges_fields() {
        let doc = ResumeDocument::seed();
        let next = update_entry(&doc, 0, &patch_for(Section::Experience));
        assert_eq!(next.experience[0].role, "Staff Engineer");
        assert_eq!(next.experience[0].company, "Starbucks");
        assert_eq!(next.experience[0].description, doc.experience[0].description);
    }

    #[test]
    #[should_panic]
    fn test_update_entry_out_of_bounds_panics() {
        let doc = ResumeDocument::seed();
        update_entry(&doc, 5, &patch_for(Section::Education));
    }

    #[test]
    fn test_bullet_operations() {
        let doc = ResumeDocument::seed();

        let added = add_bullet(&doc, Section::Experience, 0);
        assert_eq!(added.experience[0].description.len(), 3);
        assert_eq!(added.experience[0].description[2], "");

        let edited = update_bullet(&added, Section::Experience, 0, 2, "Shipped v2");
        assert_eq!(edited.experience[0].description[2], "Shipped v2");

        let removed = remove_bullet(&edited, Section::Experience, 0, 0);
        assert_eq!(
            removed.experience[0].description,
            vec![doc.experience[0].description[1].clone(), "Shipped v2".to_string()]
        );
        assert_eq!(doc.experience[0].description.len(), 2);
    }

    #[test]
    fn test_add_remove_bullet_pairs_restore_seed() {
        let seed = ResumeDocument::seed();
        let mut doc = seed.clone();
        for section in Section::ALL {
            for i in 0..entry_count(&doc, section) {
                doc = add_bullet(&doc, section, i);
                let last = bullet_count(&doc, section, i).unwrap() - 1;
                doc = remove_bullet(&doc, section, i, last);
            }
        }
        assert_eq!(doc, seed);
    }

    #[test]
    fn test_bullet_count_for_missing_entry() {
        let doc = ResumeDocument::seed();
        assert_eq!(bullet_count(&doc, Section::Projects, 0), Some(2));
        assert_eq!(bullet_count(&doc, Section::Projects, 9), None);
    }
}

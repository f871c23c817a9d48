//! Resume document model — the order-preserving content snapshot the form UI sends.
//!
//! Field names on the wire are camelCase (the document is authored by a JS form
//! UI and arrives as JSON). Every field is permissive: missing optional fields
//! deserialize to empty strings / empty collections, never to an error. Shape
//! validation is the form layer's job, not ours.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Contact header block. Present at most once, always rendered first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub linkedin: String,
    /// Free-text summary — the only field of this block with unknown rendered height.
    pub summary: String,
}

/// One work-experience entry. `description` may carry line-oriented
/// bullet/numbered markup; formatting it is the renderer's concern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceItem {
    pub id: String,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
}

/// One education entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationItem {
    pub id: String,
    pub degree: String,
    pub school: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub gpa: Option<String>,
    pub description: String,
}

/// One entry inside a user-defined custom section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomItem {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// A named user-defined section (e.g. "Projects", "Certifications").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomSection {
    pub title: String,
    pub items: Vec<CustomItem>,
}

/// The complete resume content model. Rebuilt by the caller on every edit;
/// the pagination engine treats it as an immutable snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeDocument {
    pub personal_info: Option<PersonalInfo>,
    pub experience: Vec<ExperienceItem>,
    pub education: Vec<EducationItem>,
    /// Rendered as a single chip-list block, never split across pages.
    pub skills: Vec<String>,
    /// Keyed by a unique section key; render order follows `section_order`.
    pub custom_sections: HashMap<String, CustomSection>,
    /// User-defined ordering of custom section keys. Keys missing from this
    /// list still render, after the ordered ones, in sorted-key order.
    pub section_order: Vec<String>,
}

impl ResumeDocument {
    /// Custom section keys in render order: `section_order` first (skipping
    /// keys that no longer exist), then any remaining keys sorted, so the
    /// output is deterministic regardless of map iteration order.
    pub fn ordered_custom_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .section_order
            .iter()
            .map(String::as_str)
            .filter(|k| self.custom_sections.contains_key(*k))
            .collect();

        let mut remaining: Vec<&str> = self
            .custom_sections
            .keys()
            .map(String::as_str)
            .filter(|k| !self.section_order.iter().any(|o| o == k))
            .collect();
        remaining.sort_unstable();

        keys.extend(remaining);
        keys
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

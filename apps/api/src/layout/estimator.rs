//! Height estimator — maps a content block to an estimated rendered height.
//!
//! `height = base_height + ceil(text_len / chars_per_line) * line_height`,
//! applied to the block's longest free-text field (`summary` for the personal
//! header, `description` for items). The skills block scales with
//! `ceil(skill_count / skills_per_line)` rendered chip rows instead.
//!
//! This is an approximation by design — character counts, not text shaping.
//! Callers that need exact fidelity re-measure after real rendering; the
//! estimate only has to be consistent enough for stable page splits.

use crate::layout::geometry::{BlockMetrics, PageGeometry};
use crate::models::resume::{CustomItem, EducationItem, ExperienceItem, PersonalInfo};

/// Estimated wrapped-line count for a free-text field.
///
/// Empty text occupies zero lines; the divisor is clamped to 1 so a zeroed
/// geometry can never divide by zero or stall the pager.
pub fn text_lines(text: &str, chars_per_line: u32) -> u32 {
    let len = text.chars().count() as u32;
    if len == 0 {
        return 0;
    }
    len.div_ceil(chars_per_line.max(1))
}

fn block_height(metrics: &BlockMetrics, free_text: &str) -> f32 {
    let lines = text_lines(free_text, metrics.chars_per_line_clamped());
    metrics.base_height + lines as f32 * metrics.line_height
}

/// Personal header block: base plus the wrapped summary.
pub fn personal_info_height(info: &PersonalInfo, geometry: &PageGeometry) -> f32 {
    block_height(&geometry.personal_info, &info.summary)
}

/// One experience entry: base (title/company/date rows) plus wrapped description.
pub fn experience_item_height(item: &ExperienceItem, geometry: &PageGeometry) -> f32 {
    block_height(&geometry.experience, &item.description)
}

/// One education entry.
pub fn education_item_height(item: &EducationItem, geometry: &PageGeometry) -> f32 {
    block_height(&geometry.education, &item.description)
}

/// One custom-section entry.
pub fn custom_item_height(item: &CustomItem, geometry: &PageGeometry) -> f32 {
    block_height(&geometry.custom, &item.description)
}

/// The skills chip list, rendered as one indivisible block: base plus one
/// line per `skills_per_line` chips.
pub fn skills_height(skills: &[String], geometry: &PageGeometry) -> f32 {
    let count = skills.len() as u32;
    if count == 0 {
        return 0.0;
    }
    let rows = count.div_ceil(geometry.skills_per_line_clamped());
    geometry.skills.base_height + rows as f32 * geometry.skills.line_height
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

//! Page builder — splits a resume document into an ordered sequence of pages.
//!
//! A single left-to-right pass over the fixed section order (personal header →
//! experience → education → skills → custom sections in user order) applies a
//! fits-or-splits rule per section. Item-bearing sections may be split across
//! a page boundary by greedily placing leading items into the remaining space;
//! the personal header and the skills chip list are indivisible and move
//! wholly to a fresh page instead.
//!
//! # Invariants
//! - Concatenating a section's items across pages, in page order, reproduces
//!   the source order exactly (no reordering, duplication, or loss).
//! - The personal header appears on page 1 only.
//! - Empty sections never emit a block.
//! - Every page's estimated height stays within `page_height`, except a page
//!   whose sole content is one item taller than a full page — items are the
//!   finest splittable unit, descriptions are never cut mid-item.
//! - A section block carries `is_partial = true` iff its page does not hold
//!   the section's last item.
//! - The output always contains at least one page.
//!
//! The pass is pure and synchronous: no I/O, no shared state, O(item count).
//! Callers re-run it on every document edit.

use serde::{Deserialize, Serialize};

use crate::layout::estimator::{
    custom_item_height, education_item_height, experience_item_height, personal_info_height,
    skills_height,
};
use crate::layout::geometry::PageGeometry;
use crate::models::resume::{CustomItem, EducationItem, ExperienceItem, PersonalInfo, ResumeDocument};

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// The portion of one item-bearing section placed on a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSlice<T> {
    pub items: Vec<T>,
    /// True iff this page does not contain the section's last item — the
    /// renderer shows a "continued" marker on the next page.
    pub is_partial: bool,
}

/// A custom section's slice on one page, tagged with its key and display title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedCustomSection {
    pub key: String,
    pub title: String,
    pub items: Vec<CustomItem>,
    pub is_partial: bool,
}

/// One page's worth of laid-out blocks — same top-level shape as the document,
/// but item arrays may be a subset of the source section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_info: Option<PersonalInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<SectionSlice<ExperienceItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<SectionSlice<EducationItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub custom_sections: Vec<PlacedCustomSection>,
}

impl PageContent {
    pub fn is_empty(&self) -> bool {
        self.personal_info.is_none()
            && self.experience.is_none()
            && self.education.is_none()
            && self.skills.is_none()
            && self.custom_sections.is_empty()
    }
}

/// The complete pagination result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub pages: Vec<PageContent>,
    pub total_pages: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry point
// ────────────────────────────────────────────────────────────────────────────

/// Splits `doc` into pages under `geometry`. Total function: never fails,
/// never panics, always returns at least one page.
pub fn paginate(doc: &ResumeDocument, geometry: &PageGeometry) -> Pagination {
    let mut planner = PagePlanner::new(geometry);

    if let Some(info) = &doc.personal_info {
        let height = personal_info_height(info, geometry);
        let info = info.clone();
        planner.place_block(height, move |page| page.personal_info = Some(info));
    }

    if !doc.experience.is_empty() {
        let heights: Vec<f32> = doc
            .experience
            .iter()
            .map(|item| experience_item_height(item, geometry))
            .collect();
        planner.place_items(&doc.experience, &heights, |page, items, is_partial| {
            page.experience = Some(SectionSlice { items, is_partial });
        });
    }

    if !doc.education.is_empty() {
        let heights: Vec<f32> = doc
            .education
            .iter()
            .map(|item| education_item_height(item, geometry))
            .collect();
        planner.place_items(&doc.education, &heights, |page, items, is_partial| {
            page.education = Some(SectionSlice { items, is_partial });
        });
    }

    if !doc.skills.is_empty() {
        let height = skills_height(&doc.skills, geometry);
        let skills = doc.skills.clone();
        planner.place_block(height, move |page| page.skills = Some(skills));
    }

    for key in doc.ordered_custom_keys() {
        let section = &doc.custom_sections[key];
        if section.items.is_empty() {
            continue;
        }
        let heights: Vec<f32> = section
            .items
            .iter()
            .map(|item| custom_item_height(item, geometry))
            .collect();
        let key = key.to_string();
        let title = section.title.clone();
        planner.place_items(&section.items, &heights, |page, items, is_partial| {
            page.custom_sections.push(PlacedCustomSection {
                key: key.clone(),
                title: title.clone(),
                items,
                is_partial,
            });
        });
    }

    planner.finish()
}

/// Estimated content height of an already-built page. Used by tests to check
/// the height bound and by the handler's debug log; not part of the split
/// decision itself.
pub fn page_height_estimate(page: &PageContent, geometry: &PageGeometry) -> f32 {
    let header = geometry.section_header_total();
    let mut total = 0.0;

    if let Some(info) = &page.personal_info {
        total += personal_info_height(info, geometry);
    }
    if let Some(slice) = &page.experience {
        total += header;
        total += slice
            .items
            .iter()
            .map(|i| experience_item_height(i, geometry))
            .sum::<f32>();
    }
    if let Some(slice) = &page.education {
        total += header;
        total += slice
            .items
            .iter()
            .map(|i| education_item_height(i, geometry))
            .sum::<f32>();
    }
    if let Some(skills) = &page.skills {
        total += skills_height(skills, geometry);
    }
    for placed in &page.custom_sections {
        total += header;
        total += placed
            .items
            .iter()
            .map(|i| custom_item_height(i, geometry))
            .sum::<f32>();
    }
    total
}

// ────────────────────────────────────────────────────────────────────────────
// Planner — the explicit fold accumulator
// ────────────────────────────────────────────────────────────────────────────

/// Accumulator for the single placement pass: the page under construction,
/// its running height, and the completed pages. Sections are folded through
/// `place_block` / `place_items`; `finish` seals the result.
struct PagePlanner<'g> {
    geometry: &'g PageGeometry,
    pages: Vec<PageContent>,
    current: PageContent,
    current_height: f32,
}

impl<'g> PagePlanner<'g> {
    fn new(geometry: &'g PageGeometry) -> Self {
        PagePlanner {
            geometry,
            pages: Vec::new(),
            current: PageContent::default(),
            current_height: 0.0,
        }
    }

    fn page_is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Seals the page under construction and starts a fresh one.
    fn close_page(&mut self) {
        if !self.page_is_empty() {
            self.pages.push(std::mem::take(&mut self.current));
        }
        self.current_height = 0.0;
    }

    /// Places an indivisible block (personal header, skills list): on the
    /// current page if it fits, otherwise wholly on a fresh page — even when
    /// it alone exceeds a full page.
    fn place_block(&mut self, height: f32, write: impl FnOnce(&mut PageContent)) {
        if self.current_height + height > self.geometry.page_height && !self.page_is_empty() {
            self.close_page();
        }
        write(&mut self.current);
        self.current_height += height;
    }

    /// Places an item-bearing section, splitting it across page boundaries
    /// when it does not fit.
    ///
    /// `write` receives each page's slice in order with its `is_partial` flag.
    /// Greedy and forward-only: leading items fill the remaining space, the
    /// page closes, and the remainder continues on the next page seeded with
    /// the section header height. An item taller than a full page is placed
    /// alone on its own page rather than split further.
    fn place_items<T: Clone>(
        &mut self,
        items: &[T],
        heights: &[f32],
        mut write: impl FnMut(&mut PageContent, Vec<T>, bool),
    ) {
        debug_assert_eq!(items.len(), heights.len());

        let header = self.geometry.section_header_total();
        let page_height = self.geometry.page_height;
        let total: f32 = header + heights.iter().sum::<f32>();

        // Whole section fits below what's already placed.
        if self.current_height + total <= page_height {
            write(&mut self.current, items.to_vec(), false);
            self.current_height += total;
            return;
        }

        let n = items.len();
        let mut start = 0;

        loop {
            let available = page_height - self.current_height - header;

            // Greedily take leading items that fit in the remaining space.
            let mut end = start;
            let mut used = 0.0_f32;
            while end < n && used + heights[end] <= available {
                used += heights[end];
                end += 1;
            }

            if end == start {
                if self.page_is_empty() {
                    // A single item taller than a full page: place it alone
                    // rather than split mid-item.
                    used = heights[start];
                    end = start + 1;
                } else {
                    // Nothing fits after the header — retry on a fresh page.
                    self.close_page();
                    let rest: f32 = header + heights[start..].iter().sum::<f32>();
                    if rest <= page_height {
                        write(&mut self.current, items[start..].to_vec(), false);
                        self.current_height += rest;
                        return;
                    }
                    continue;
                }
            }

            let is_partial = end < n;
            write(&mut self.current, items[start..end].to_vec(), is_partial);
            self.current_height += header + used;

            if end == n {
                return;
            }
            self.close_page();
            start = end;
        }
    }

    /// Seals the final page. An all-empty document still yields one page so
    /// the viewer always has something to render.
    fn finish(mut self) -> Pagination {
        self.close_page();
        if self.pages.is_empty() {
            self.pages.push(PageContent::default());
        }
        let total_pages = self.pages.len();
        Pagination {
            pages: self.pages,
            total_pages,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::geometry::{BlockMetrics, GeometryPreset};
    use crate::models::resume::CustomSection;

    /// Flat-height geometry: every item costs its section's base height only,
    /// so test arithmetic stays exact. Page 267, header 10 + spacing 6 —
    /// the worked example's numbers.
    fn flat_geometry() -> PageGeometry {
        let flat = |base: f32| BlockMetrics {
            base_height: base,
            chars_per_line: 1000,
            line_height: 0.0,
        };
        PageGeometry {
            page_height: 267.0,
            section_header_height: 10.0,
            section_spacing: 6.0,
            personal_info: flat(80.0),
            experience: flat(40.0),
            education: flat(30.0),
            custom: flat(25.0),
            skills: flat(20.0),
            skills_per_line: 8,
        }
    }

    fn exp_item(id: &str) -> ExperienceItem {
        ExperienceItem {
            id: id.into(),
            job_title: format!("Role {id}"),
            company: "Acme".into(),
            ..Default::default()
        }
    }

    fn edu_item(id: &str) -> EducationItem {
        EducationItem {
            id: id.into(),
            degree: "BSc".into(),
            school: "State".into(),
            ..Default::default()
        }
    }

    fn doc_with_experience(count: usize) -> ResumeDocument {
        ResumeDocument {
            personal_info: Some(PersonalInfo {
                full_name: "Ada Lovelace".into(),
                ..Default::default()
            }),
            experience: (0..count).map(|i| exp_item(&format!("exp-{i}"))).collect(),
            ..Default::default()
        }
    }

    fn experience_ids(result: &Pagination) -> Vec<String> {
        result
            .pages
            .iter()
            .filter_map(|p| p.experience.as_ref())
            .flat_map(|s| s.items.iter().map(|i| i.id.clone()))
            .collect()
    }

    // ── worked example ──────────────────────────────────────────────────────

    #[test]
    fn test_five_experience_items_split_four_one() {
        // personal 80 + header 16 + 4×40 = 256 ≤ 267; the 5th item overflows.
        let result = paginate(&doc_with_experience(5), &flat_geometry());

        assert_eq!(result.total_pages, 2);

        let page1 = &result.pages[0];
        assert!(page1.personal_info.is_some());
        let slice1 = page1.experience.as_ref().unwrap();
        assert_eq!(slice1.items.len(), 4);
        assert!(slice1.is_partial);

        let page2 = &result.pages[1];
        assert!(page2.personal_info.is_none());
        let slice2 = page2.experience.as_ref().unwrap();
        assert_eq!(slice2.items.len(), 1);
        assert!(!slice2.is_partial);
        assert_eq!(slice2.items[0].id, "exp-4");
    }

    // ── guarantees ──────────────────────────────────────────────────────────

    #[test]
    fn test_empty_document_yields_one_empty_page() {
        let result = paginate(&ResumeDocument::default(), &flat_geometry());
        assert_eq!(result.total_pages, 1);
        assert!(result.pages[0].is_empty());
    }

    #[test]
    fn test_single_oversized_item_gets_its_own_page() {
        let mut geometry = flat_geometry();
        geometry.experience.base_height = 300.0; // taller than the 267 page
        let doc = ResumeDocument {
            experience: vec![exp_item("huge")],
            ..Default::default()
        };

        let result = paginate(&doc, &geometry);
        assert_eq!(result.total_pages, 1);
        let slice = result.pages[0].experience.as_ref().unwrap();
        assert_eq!(slice.items.len(), 1);
        assert!(!slice.is_partial);
    }

    #[test]
    fn test_order_preserved_and_no_loss_across_pages() {
        let result = paginate(&doc_with_experience(23), &flat_geometry());
        assert!(result.total_pages > 1);

        let expected: Vec<String> = (0..23).map(|i| format!("exp-{i}")).collect();
        assert_eq!(experience_ids(&result), expected);
    }

    #[test]
    fn test_is_partial_true_on_all_but_last_slice() {
        // Enough items to span 4+ pages: every slice except the final one is partial.
        let result = paginate(&doc_with_experience(23), &flat_geometry());

        let slices: Vec<&SectionSlice<ExperienceItem>> = result
            .pages
            .iter()
            .filter_map(|p| p.experience.as_ref())
            .collect();
        assert!(slices.len() >= 3);
        for slice in &slices[..slices.len() - 1] {
            assert!(slice.is_partial);
        }
        assert!(!slices.last().unwrap().is_partial);
    }

    #[test]
    fn test_height_bound_holds_on_every_page() {
        let geometry = flat_geometry();
        let mut doc = doc_with_experience(14);
        doc.education = (0..9).map(|i| edu_item(&format!("edu-{i}"))).collect();
        doc.skills = (0..10).map(|i| format!("skill-{i}")).collect();

        let result = paginate(&doc, &geometry);
        for page in &result.pages {
            assert!(
                page_height_estimate(page, &geometry) <= geometry.page_height + 1e-3,
                "page exceeds usable height"
            );
        }
    }

    #[test]
    fn test_deterministic_output() {
        let doc = doc_with_experience(9);
        let geometry = PageGeometry::preset(GeometryPreset::Print);
        assert_eq!(paginate(&doc, &geometry), paginate(&doc, &geometry));
    }

    // ── indivisible blocks ──────────────────────────────────────────────────

    #[test]
    fn test_skills_block_never_splits() {
        // 4 experience items (80 + 16 + 160 = 256) leave 11 units; skills (20)
        // must move wholly to page 2, not shrink onto page 1.
        let mut doc = doc_with_experience(4);
        doc.skills = vec!["Rust".into(), "SQL".into()];

        let result = paginate(&doc, &flat_geometry());
        assert_eq!(result.total_pages, 2);
        assert!(result.pages[0].skills.is_none());
        assert_eq!(
            result.pages[1].skills.as_ref().unwrap(),
            &vec!["Rust".to_string(), "SQL".to_string()]
        );
    }

    #[test]
    fn test_personal_info_only_on_first_page() {
        let result = paginate(&doc_with_experience(23), &flat_geometry());
        assert!(result.pages[0].personal_info.is_some());
        for page in &result.pages[1..] {
            assert!(page.personal_info.is_none());
        }
    }

    // ── zero-items-fit fallback ─────────────────────────────────────────────

    #[test]
    fn test_section_moves_wholly_when_nothing_fits_in_remainder() {
        // Page 1 fills to 256; education header (16) + first item (30) cannot
        // start there, and the whole section fits on page 2 → not split.
        let mut doc = doc_with_experience(4);
        doc.education = (0..3).map(|i| edu_item(&format!("edu-{i}"))).collect();

        let result = paginate(&doc, &flat_geometry());
        assert_eq!(result.total_pages, 2);
        assert!(result.pages[0].education.is_none());
        let slice = result.pages[1].education.as_ref().unwrap();
        assert_eq!(slice.items.len(), 3);
        assert!(!slice.is_partial);
    }

    #[test]
    fn test_section_splits_from_zero_when_fresh_page_overflows() {
        // Nothing fits on page 1's remainder AND the section overflows a fresh
        // page: greedy split restarts from zero height on page 2.
        let mut doc = doc_with_experience(4);
        doc.education = (0..10).map(|i| edu_item(&format!("edu-{i}"))).collect();

        let result = paginate(&doc, &flat_geometry());
        // Page 2: header 16 + 8×30 = 256 ≤ 267; 2 items continue to page 3.
        assert_eq!(result.total_pages, 3);
        let slice2 = result.pages[1].education.as_ref().unwrap();
        assert_eq!(slice2.items.len(), 8);
        assert!(slice2.is_partial);
        let slice3 = result.pages[2].education.as_ref().unwrap();
        assert_eq!(slice3.items.len(), 2);
        assert!(!slice3.is_partial);
    }

    // ── custom sections ─────────────────────────────────────────────────────

    #[test]
    fn test_custom_sections_follow_section_order_and_split() {
        let mut doc = ResumeDocument::default();
        doc.custom_sections.insert(
            "projects".into(),
            CustomSection {
                title: "Projects".into(),
                items: (0..12)
                    .map(|i| CustomItem {
                        id: format!("proj-{i}"),
                        title: format!("Project {i}"),
                        ..Default::default()
                    })
                    .collect(),
            },
        );
        doc.custom_sections.insert(
            "awards".into(),
            CustomSection {
                title: "Awards".into(),
                items: vec![CustomItem {
                    id: "award-0".into(),
                    ..Default::default()
                }],
            },
        );
        doc.section_order = vec!["projects".into(), "awards".into()];

        let result = paginate(&doc, &flat_geometry());
        // Projects: header 16 + 12×25 = 316 > 267 → 10 items on page 1, 2 on page 2.
        assert_eq!(result.total_pages, 2);

        let page1 = &result.pages[0];
        assert_eq!(page1.custom_sections.len(), 1);
        assert_eq!(page1.custom_sections[0].key, "projects");
        assert_eq!(page1.custom_sections[0].items.len(), 10);
        assert!(page1.custom_sections[0].is_partial);

        let page2 = &result.pages[1];
        assert_eq!(page2.custom_sections.len(), 2);
        assert_eq!(page2.custom_sections[0].key, "projects");
        assert_eq!(page2.custom_sections[0].items.len(), 2);
        assert!(!page2.custom_sections[0].is_partial);
        assert_eq!(page2.custom_sections[1].key, "awards");

        // Order preservation within the split section.
        let proj_ids: Vec<String> = result
            .pages
            .iter()
            .flat_map(|p| p.custom_sections.iter())
            .filter(|s| s.key == "projects")
            .flat_map(|s| s.items.iter().map(|i| i.id.clone()))
            .collect();
        let expected: Vec<String> = (0..12).map(|i| format!("proj-{i}")).collect();
        assert_eq!(proj_ids, expected);
    }

    #[test]
    fn test_empty_custom_section_emits_nothing() {
        let mut doc = ResumeDocument::default();
        doc.custom_sections.insert(
            "projects".into(),
            CustomSection {
                title: "Projects".into(),
                items: vec![],
            },
        );
        doc.section_order = vec!["projects".into()];

        let result = paginate(&doc, &flat_geometry());
        assert_eq!(result.total_pages, 1);
        assert!(result.pages[0].is_empty());
    }

    // ── presets share the algorithm ─────────────────────────────────────────

    #[test]
    fn test_both_presets_preserve_order_on_realistic_document() {
        let mut doc = doc_with_experience(8);
        for item in &mut doc.experience {
            item.description = "Led a team shipping a data pipeline. ".repeat(6);
        }
        doc.skills = (0..14).map(|i| format!("skill-{i}")).collect();

        let expected: Vec<String> = (0..8).map(|i| format!("exp-{i}")).collect();
        for preset in GeometryPreset::ALL {
            let result = paginate(&doc, &PageGeometry::preset(preset));
            assert!(result.total_pages >= 1);
            assert_eq!(experience_ids(&result), expected, "preset {preset:?}");
        }
    }
}

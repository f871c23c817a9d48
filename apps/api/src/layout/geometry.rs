//! Page geometry presets — estimation constants for a single resume page.
//!
//! Heights here are heuristic estimation parameters, not real typographic
//! metrics: a block's height is a base height plus a per-line increment driven
//! by a character-count line estimate (see `estimator`). Two presets exist —
//! a pixel scale for the on-screen preview and a millimetre scale keyed to
//! A4 print output. The splitting algorithm never branches on the preset;
//! swapping geometry must never touch `pager`.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

// ────────────────────────────────────────────────────────────────────────────
// Preset enum
// ────────────────────────────────────────────────────────────────────────────

/// The named geometry presets exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryPreset {
    /// Pixel scale for the interactive on-screen preview (96dpi US letter).
    Screen,
    /// Millimetre scale keyed to A4 print/PDF export.
    Print,
}

impl GeometryPreset {
    pub const ALL: [GeometryPreset; 2] = [GeometryPreset::Screen, GeometryPreset::Print];

    pub fn name(&self) -> &'static str {
        match self {
            GeometryPreset::Screen => "screen",
            GeometryPreset::Print => "print",
        }
    }

    /// Parses a preset name from config or a request body.
    pub fn parse(name: &str) -> Result<Self, AppError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "screen" => Ok(GeometryPreset::Screen),
            "print" => Ok(GeometryPreset::Print),
            other => Err(AppError::Validation(format!(
                "Unknown geometry preset '{other}' (expected 'screen' or 'print')"
            ))),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Geometry types
// ────────────────────────────────────────────────────────────────────────────

/// Estimation constants for one content kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockMetrics {
    /// Fixed height of the block before any free text (title line, dates, padding).
    pub base_height: f32,
    /// Character-count wrap estimate divisor. Values < 1 are read as 1.
    pub chars_per_line: u32,
    /// Height added per estimated wrapped line of free text.
    pub line_height: f32,
}

impl BlockMetrics {
    /// Divisor with the zero/negative guard applied.
    pub fn chars_per_line_clamped(&self) -> u32 {
        self.chars_per_line.max(1)
    }
}

/// Layout parameters for a single resume page in one rendering target.
///
/// All heights share one unit (px for `screen`, mm for `print`); the unit
/// itself never appears in the algorithm, only the ratios matter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageGeometry {
    /// Total usable content height of one page (paper height minus margins).
    pub page_height: f32,
    /// Height of a section title row.
    pub section_header_height: f32,
    /// Vertical gap between a section title and its first item.
    pub section_spacing: f32,
    pub personal_info: BlockMetrics,
    pub experience: BlockMetrics,
    pub education: BlockMetrics,
    pub custom: BlockMetrics,
    /// `chars_per_line` is unused for skills; the chip list wraps by count.
    pub skills: BlockMetrics,
    /// How many skill chips fit on one rendered row. Values < 1 are read as 1.
    pub skills_per_line: u32,
}

impl PageGeometry {
    /// Combined vertical cost of opening a section on a page.
    pub fn section_header_total(&self) -> f32 {
        self.section_header_height + self.section_spacing
    }

    pub fn skills_per_line_clamped(&self) -> u32 {
        self.skills_per_line.max(1)
    }

    /// Returns the geometry for a named preset.
    pub fn preset(preset: GeometryPreset) -> PageGeometry {
        match preset {
            GeometryPreset::Screen => screen_geometry(),
            GeometryPreset::Print => print_geometry(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Presets
// ────────────────────────────────────────────────────────────────────────────

/// On-screen preview: US letter at 96dpi (1056px tall), 48px margins → 960px usable.
fn screen_geometry() -> PageGeometry {
    PageGeometry {
        page_height: 960.0,
        section_header_height: 34.0,
        section_spacing: 16.0,
        personal_info: BlockMetrics {
            base_height: 110.0,
            chars_per_line: 95,
            line_height: 18.0,
        },
        experience: BlockMetrics {
            base_height: 74.0,
            chars_per_line: 90,
            line_height: 16.0,
        },
        education: BlockMetrics {
            base_height: 60.0,
            chars_per_line: 90,
            line_height: 16.0,
        },
        custom: BlockMetrics {
            base_height: 48.0,
            chars_per_line: 90,
            line_height: 16.0,
        },
        skills: BlockMetrics {
            base_height: 40.0,
            chars_per_line: 1,
            line_height: 24.0,
        },
        skills_per_line: 6,
    }
}

/// Print/PDF export: A4 (297mm tall), 15mm margins → 267mm usable.
fn print_geometry() -> PageGeometry {
    PageGeometry {
        page_height: 267.0,
        section_header_height: 10.0,
        section_spacing: 6.0,
        personal_info: BlockMetrics {
            base_height: 30.0,
            chars_per_line: 95,
            line_height: 5.0,
        },
        experience: BlockMetrics {
            base_height: 22.0,
            chars_per_line: 90,
            line_height: 4.5,
        },
        education: BlockMetrics {
            base_height: 17.0,
            chars_per_line: 90,
            line_height: 4.5,
        },
        custom: BlockMetrics {
            base_height: 13.0,
            chars_per_line: 90,
            line_height: 4.5,
        },
        skills: BlockMetrics {
            base_height: 12.0,
            chars_per_line: 1,
            line_height: 6.0,
        },
        skills_per_line: 8,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preset_names() {
        assert_eq!(
            GeometryPreset::parse("screen").unwrap(),
            GeometryPreset::Screen
        );
        assert_eq!(
            GeometryPreset::parse(" Print ").unwrap(),
            GeometryPreset::Print
        );
        assert!(GeometryPreset::parse("a3").is_err());
    }

    #[test]
    fn test_preset_serde_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&GeometryPreset::Print).unwrap(),
            "\"print\""
        );
        let p: GeometryPreset = serde_json::from_str("\"screen\"").unwrap();
        assert_eq!(p, GeometryPreset::Screen);
    }

    #[test]
    fn test_print_preset_is_a4_usable_height() {
        let g = PageGeometry::preset(GeometryPreset::Print);
        assert!((g.page_height - 267.0).abs() < 1e-6);
        assert!((g.section_header_total() - 16.0).abs() < 1e-6);
    }

    #[test]
    fn test_screen_preset_taller_numbers_than_print() {
        // Same algorithm, different units: px values dwarf mm values.
        let screen = PageGeometry::preset(GeometryPreset::Screen);
        let print = PageGeometry::preset(GeometryPreset::Print);
        assert!(screen.page_height > print.page_height);
        assert!(screen.experience.base_height > print.experience.base_height);
    }

    #[test]
    fn test_divisor_clamps_guard_zero() {
        let mut g = PageGeometry::preset(GeometryPreset::Screen);
        g.skills_per_line = 0;
        g.experience.chars_per_line = 0;
        assert_eq!(g.skills_per_line_clamped(), 1);
        assert_eq!(g.experience.chars_per_line_clamped(), 1);
    }

    #[test]
    fn test_geometry_round_trips_through_json() {
        // Callers may POST a full geometry override; it must survive serde.
        let g = PageGeometry::preset(GeometryPreset::Print);
        let json = serde_json::to_string(&g).unwrap();
        let back: PageGeometry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }
}

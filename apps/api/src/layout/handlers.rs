//! HTTP surface for the pagination engine.
//!
//! Handlers stay thin: deserialize, resolve geometry, call `paginate`, respond.
//! The engine itself does no I/O, so every request is a pure computation over
//! its body; callers re-POST on each edit (debounced client-side).

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::layout::geometry::{GeometryPreset, PageGeometry};
use crate::layout::pager::{paginate, page_height_estimate, Pagination};
use crate::models::resume::ResumeDocument;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginateRequest {
    pub document: ResumeDocument,
    /// Named preset; ignored when `geometry` is given. Absent both, the
    /// server's configured default applies.
    pub preset: Option<String>,
    /// Full geometry override for callers tuning their own rendering target.
    pub geometry: Option<PageGeometry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetEntry {
    pub name: &'static str,
    pub geometry: PageGeometry,
}

/// POST /api/v1/paginate
pub async fn handle_paginate(
    State(state): State<AppState>,
    Json(req): Json<PaginateRequest>,
) -> Result<Json<Pagination>, AppError> {
    let geometry = resolve_geometry(&req, state.default_preset)?;
    let result = paginate(&req.document, &geometry);
    let tallest_page = result
        .pages
        .iter()
        .map(|p| page_height_estimate(p, &geometry))
        .fold(0.0_f32, f32::max);
    debug!(
        pages = result.total_pages,
        tallest_page = tallest_page as f64,
        experience_items = req.document.experience.len(),
        education_items = req.document.education.len(),
        custom_sections = req.document.custom_sections.len(),
        "Paginated resume document"
    );
    Ok(Json(result))
}

/// GET /api/v1/presets
pub async fn handle_list_presets() -> Json<Vec<PresetEntry>> {
    Json(
        GeometryPreset::ALL
            .into_iter()
            .map(|p| PresetEntry {
                name: p.name(),
                geometry: PageGeometry::preset(p),
            })
            .collect(),
    )
}

/// Precedence: explicit geometry > named preset > server default.
fn resolve_geometry(
    req: &PaginateRequest,
    default_preset: GeometryPreset,
) -> Result<PageGeometry, AppError> {
    if let Some(geometry) = &req.geometry {
        return Ok(geometry.clone());
    }
    let preset = match &req.preset {
        Some(name) => GeometryPreset::parse(name)?,
        None => default_preset,
    };
    Ok(PageGeometry::preset(preset))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

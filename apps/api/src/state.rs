use crate::config::Config;
use crate::layout::GeometryPreset;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// The pagination engine is stateless, so this carries only configuration.
#[derive(Clone)]
pub struct AppState {
    #[allow(dead_code)]
    pub config: Config,
    /// Preset applied when a request names neither a preset nor a geometry.
    pub default_preset: GeometryPreset,
}

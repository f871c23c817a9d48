// Pagination engine: pure height estimation + page splitting.
// The engine is synchronous and framework-free; handlers are a thin veneer.

pub mod estimator;
pub mod geometry;
pub mod handlers;
pub mod pager;

// Re-export the public API consumed by other modules (state, routes).
pub use geometry::{GeometryPreset, PageGeometry};
pub use pager::{paginate, PageContent, Pagination};

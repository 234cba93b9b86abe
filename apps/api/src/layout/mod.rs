// Resume layout engine: content-volume estimation, style solving, page fill.
// Pure and synchronous. A solve is a few microseconds of arithmetic, so
// handlers run it inline on the request task.

pub mod estimator;
pub mod font_metrics;
pub mod handlers;
pub mod page_fill;
pub mod style;

// Re-export the public API consumed by other modules (config, state).
pub use font_metrics::{FontFamily, LayoutProfile, PageSize};

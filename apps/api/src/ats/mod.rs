// ATS compatibility: keyword extraction from job descriptions and
// resume coverage scoring. Local heuristics only, no external AI calls.

pub mod handlers;
pub mod keywords;
pub mod scoring;

pub use scoring::{AtsScorer, KeywordAtsScorer};

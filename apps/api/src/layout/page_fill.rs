//! Page Fill Analysis — predicts how much of the page a solved style uses.
//!
//! Classifies how much of the page a style uses, from the same height model
//! the solver searches against. A solved style other than the floor never
//! overflows; overflow is reported, never treated as an error: at the floor
//! style a very long resume simply spills past one page.
//!
//! # Page fill rules
//! - Fill ≥ 80% and ≤ 100% → acceptable
//! - Fill < 80%            → too much whitespace (add content)
//! - Fill ≤ 105%           → minor overflow (tighten wording)
//! - Fill > 105%           → major overflow (shorten the longest bullet)

use serde::{Deserialize, Serialize};

use crate::layout::estimator::{available_height_pt, estimate_height_pt};
use crate::layout::font_metrics::LayoutProfile;
use crate::layout::style::StyleConfig;
use crate::models::resume::ResumeData;

const MIN_ACCEPTABLE_FILL: f32 = 0.80;
const MINOR_OVERFLOW_LIMIT: f32 = 1.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageFillVerdict {
    Acceptable,
    TooMuchWhitespace,
    MinorOverflow,
    MajorOverflow,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFillAnalysis {
    pub estimated_height_pt: f32,
    pub available_height_pt: f32,
    pub fill_ratio: f32,
    pub whitespace_fraction: f32,
    pub overflow_fraction: f32,
    pub verdict: PageFillVerdict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FillAction {
    NoAction,
    AddContent,
    TightenContent,
    #[serde(rename_all = "camelCase")]
    ShortenBullet {
        experience_index: usize,
        bullet_index: usize,
    },
}

pub fn analyze_page_fill(
    data: &ResumeData,
    style: &StyleConfig,
    profile: &LayoutProfile,
) -> PageFillAnalysis {
    let estimated_height_pt = estimate_height_pt(data, style, profile);
    let available_height_pt = available_height_pt(style, profile.page);
    let fill_ratio = estimated_height_pt / available_height_pt;

    let whitespace_fraction = (1.0_f32 - fill_ratio).max(0.0);
    let overflow_fraction = (fill_ratio - 1.0_f32).max(0.0);

    let verdict = if fill_ratio > MINOR_OVERFLOW_LIMIT {
        PageFillVerdict::MajorOverflow
    } else if fill_ratio > 1.0 {
        PageFillVerdict::MinorOverflow
    } else if fill_ratio < MIN_ACCEPTABLE_FILL {
        PageFillVerdict::TooMuchWhitespace
    } else {
        PageFillVerdict::Acceptable
    };

    PageFillAnalysis {
        estimated_height_pt,
        available_height_pt,
        fill_ratio,
        whitespace_fraction,
        overflow_fraction,
        verdict,
    }
}

/// Recommends one remediation for the editor to surface. The caller decides
/// whether to act on it.
pub fn recommend_fill_action(analysis: &PageFillAnalysis, data: &ResumeData) -> FillAction {
    match analysis.verdict {
        PageFillVerdict::Acceptable => FillAction::NoAction,
        PageFillVerdict::TooMuchWhitespace => FillAction::AddContent,
        PageFillVerdict::MinorOverflow => FillAction::TightenContent,
        PageFillVerdict::MajorOverflow => match find_longest_bullet(data) {
            Some((experience_index, bullet_index)) => FillAction::ShortenBullet {
                experience_index,
                bullet_index,
            },
            None => FillAction::TightenContent,
        },
    }
}

/// Position of the longest bullet by character count; the first wins ties.
fn find_longest_bullet(data: &ResumeData) -> Option<(usize, usize)> {
    let mut best: Option<((usize, usize), usize)> = None;
    for (i, entry) in data.experience.iter().enumerate() {
        for (j, bullet) in entry.bullets.iter().enumerate() {
            let len = bullet.chars().count();
            if best.map_or(true, |(_, best_len)| len > best_len) {
                best = Some(((i, j), len));
            }
        }
    }
    best.map(|(pos, _)| pos)
}

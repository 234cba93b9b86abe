//! Style parameter solver — maps resume content to typographic parameters.
//!
//! # Algorithm
//! The four presets lie on one piecewise linear curve:
//!
//! ```text
//! position:  0 ─────── 1 ─────── 2 ─────── 3
//! style:     CEILING   MEDIUM    HEAVY     FLOOR
//! ```
//!
//! Every preset is field-wise no larger than the one before it, so the style
//! shrinks monotonically along the curve and never jumps at a preset. The
//! solver bisects for the first position whose style fits one page under the
//! estimator's height model. If the ceiling fits it is used as is; if the
//! floor overflows the result is clamped to the floor and the tier says so.
//! Results are rounded to 0.01 and clamped into `[FLOOR, CEILING]`.

use serde::{Deserialize, Serialize};

use crate::layout::estimator::{estimate_volume, fill_ratio, ContentVolume};
use crate::layout::font_metrics::LayoutProfile;
use crate::models::resume::ResumeData;

/// Typographic parameters for one render. Sizes and margins are in points;
/// `line_height` is a multiplier of the font size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleConfig {
    pub name_size: f32,
    pub section_title_size: f32,
    pub entry_title_size: f32,
    pub detail_size: f32,
    pub line_height: f32,
    pub page_padding_top: f32,
    pub page_padding_bottom: f32,
    pub page_padding_side: f32,
    pub section_margin_top: f32,
    pub section_margin_bottom: f32,
    pub entry_margin_bottom: f32,
    pub bullet_margin_bottom: f32,
}

impl StyleConfig {
    /// Upper bound of every field; also the light-load preset.
    pub const CEILING: StyleConfig = StyleConfig {
        name_size: 24.0,
        section_title_size: 13.0,
        entry_title_size: 11.5,
        detail_size: 10.5,
        line_height: 1.45,
        page_padding_top: 40.0,
        page_padding_bottom: 40.0,
        page_padding_side: 48.0,
        section_margin_top: 14.0,
        section_margin_bottom: 7.0,
        entry_margin_bottom: 10.0,
        bullet_margin_bottom: 3.0,
    };

    pub const MEDIUM: StyleConfig = StyleConfig {
        name_size: 22.0,
        section_title_size: 12.0,
        entry_title_size: 11.0,
        detail_size: 10.0,
        line_height: 1.38,
        page_padding_top: 34.0,
        page_padding_bottom: 34.0,
        page_padding_side: 42.0,
        section_margin_top: 11.0,
        section_margin_bottom: 5.5,
        entry_margin_bottom: 8.0,
        bullet_margin_bottom: 2.0,
    };

    pub const HEAVY: StyleConfig = StyleConfig {
        name_size: 20.0,
        section_title_size: 11.0,
        entry_title_size: 10.0,
        detail_size: 9.0,
        line_height: 1.3,
        page_padding_top: 28.0,
        page_padding_bottom: 28.0,
        page_padding_side: 36.0,
        section_margin_top: 8.0,
        section_margin_bottom: 4.0,
        entry_margin_bottom: 6.0,
        bullet_margin_bottom: 1.5,
    };

    /// Lower bound of every field. Detail text never goes below 8pt.
    pub const FLOOR: StyleConfig = StyleConfig {
        name_size: 18.0,
        section_title_size: 10.0,
        entry_title_size: 9.0,
        detail_size: 8.0,
        line_height: 1.2,
        page_padding_top: 22.0,
        page_padding_bottom: 22.0,
        page_padding_side: 30.0,
        section_margin_top: 6.0,
        section_margin_bottom: 3.0,
        entry_margin_bottom: 4.0,
        bullet_margin_bottom: 1.0,
    };

    /// Fields in declaration order.
    pub fn fields(&self) -> [f32; 12] {
        [
            self.name_size,
            self.section_title_size,
            self.entry_title_size,
            self.detail_size,
            self.line_height,
            self.page_padding_top,
            self.page_padding_bottom,
            self.page_padding_side,
            self.section_margin_top,
            self.section_margin_bottom,
            self.entry_margin_bottom,
            self.bullet_margin_bottom,
        ]
    }

    fn from_fields(f: [f32; 12]) -> Self {
        Self {
            name_size: f[0],
            section_title_size: f[1],
            entry_title_size: f[2],
            detail_size: f[3],
            line_height: f[4],
            page_padding_top: f[5],
            page_padding_bottom: f[6],
            page_padding_side: f[7],
            section_margin_top: f[8],
            section_margin_bottom: f[9],
            entry_margin_bottom: f[10],
            bullet_margin_bottom: f[11],
        }
    }

    fn zip_with(&self, other: &StyleConfig, f: impl Fn(f32, f32) -> f32) -> StyleConfig {
        let a = self.fields();
        let b = other.fields();
        Self::from_fields(std::array::from_fn(|i| f(a[i], b[i])))
    }

    fn lerp(&self, toward: &StyleConfig, t: f32) -> StyleConfig {
        self.zip_with(toward, |a, b| a + (b - a) * t)
    }

    fn round_to_hundredths(&self) -> StyleConfig {
        Self::from_fields(self.fields().map(|v| (v * 100.0).round() / 100.0))
    }

    fn clamp_to_bounds(&self) -> StyleConfig {
        let clamped = self.zip_with(&Self::FLOOR, f32::max);
        clamped.zip_with(&Self::CEILING, f32::min)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Preset curve
// ────────────────────────────────────────────────────────────────────────────

const PRESETS: [StyleConfig; 4] = [
    StyleConfig::CEILING,
    StyleConfig::MEDIUM,
    StyleConfig::HEAVY,
    StyleConfig::FLOOR,
];

/// Curve position of the floor preset.
pub const CURVE_END: f32 = 3.0;

/// 3 / 2^20 is far below the 0.01 rounding of the output.
const SEARCH_STEPS: u32 = 20;

/// Style at `position` along CEILING → MEDIUM → HEAVY → FLOOR. Non-increasing
/// in `position` field by field and total over non-finite input.
pub fn style_at(position: f32) -> StyleConfig {
    // NaN compares false everywhere; treat it as the start of the curve.
    if position.is_nan() || position <= 0.0 {
        return StyleConfig::CEILING;
    }
    if position >= CURVE_END {
        return StyleConfig::FLOOR;
    }

    let segment = (position.floor() as usize).min(PRESETS.len() - 2);
    let t = (position - segment as f32).clamp(0.0, 1.0);
    PRESETS[segment]
        .lerp(&PRESETS[segment + 1], t)
        .round_to_hundredths()
        .clamp_to_bounds()
}

// ────────────────────────────────────────────────────────────────────────────
// Load tiers
// ────────────────────────────────────────────────────────────────────────────

/// Discrete bucket of content volume, read off the solved curve position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadTier {
    /// Fits at the ceiling style.
    Light,
    /// Fits on the CEILING → MEDIUM segment.
    Medium,
    /// Fits between MEDIUM and FLOOR.
    Heavy,
    /// Overflows even at the floor; the style is clamped to FLOOR.
    Overflow,
}

impl LoadTier {
    /// Tier of a position whose style fits the page.
    pub fn for_position(position: f32) -> Self {
        if position <= 0.0 {
            LoadTier::Light
        } else if position <= 1.0 {
            LoadTier::Medium
        } else {
            LoadTier::Heavy
        }
    }
}

/// Output of one solve. `load` and `volume` are carried for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSolution {
    pub style: StyleConfig,
    pub tier: LoadTier,
    /// Solved position on the preset curve, `0.0..=CURVE_END`.
    pub position: f32,
    /// Composite load in reference lines.
    pub load: f32,
    pub volume: ContentVolume,
}

/// First curve position whose style fits `data` on one page, or `None` when
/// even the floor overflows.
///
/// Fill is non-increasing along the curve and non-decreasing as content is
/// added. A fixed number of bisection steps lands on the first grid point that
/// fits, so more content never yields a larger style.
pub fn solve_position(data: &ResumeData, profile: &LayoutProfile) -> Option<f32> {
    let fits = |position: f32| fill_ratio(data, &style_at(position), profile) <= 1.0;

    if fits(0.0) {
        return Some(0.0);
    }
    if !fits(CURVE_END) {
        return None;
    }

    let (mut lo, mut hi) = (0.0_f32, CURVE_END);
    for _ in 0..SEARCH_STEPS {
        let mid = (lo + hi) / 2.0;
        if fits(mid) {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    Some(hi)
}

/// Computes the StyleConfig for `data`. Pure and template-blind: the same
/// content under the same profile always yields a bit-identical result.
pub fn calculate_style_config(data: &ResumeData, profile: &LayoutProfile) -> StyleSolution {
    let volume = estimate_volume(data, profile);
    let (position, tier) = match solve_position(data, profile) {
        Some(position) => (position, LoadTier::for_position(position)),
        None => (CURVE_END, LoadTier::Overflow),
    };
    StyleSolution {
        style: style_at(position),
        tier,
        position,
        load: volume.load_lines(),
        volume,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::PageSize;
    use crate::models::fixtures;
    use crate::models::resume::Template;

    fn profile() -> LayoutProfile {
        LayoutProfile::default()
    }

    fn assert_all_le(a: &StyleConfig, b: &StyleConfig) {
        for (i, (x, y)) in a.fields().iter().zip(b.fields().iter()).enumerate() {
            assert!(x <= y, "field {i}: {x} > {y}");
        }
    }

    #[test]
    fn test_presets_are_ordered() {
        assert_all_le(&StyleConfig::MEDIUM, &StyleConfig::CEILING);
        assert_all_le(&StyleConfig::HEAVY, &StyleConfig::MEDIUM);
        assert_all_le(&StyleConfig::FLOOR, &StyleConfig::HEAVY);
        assert!(StyleConfig::FLOOR.fields().iter().all(|v| *v > 0.0));
    }

    #[test]
    fn test_empty_resume_gets_ceiling() {
        let solution = calculate_style_config(&ResumeData::default(), &profile());
        assert_eq!(solution.style, StyleConfig::CEILING);
        assert_eq!(solution.tier, LoadTier::Light);
        assert_eq!(solution.position, 0.0);
    }

    #[test]
    fn test_extreme_resume_gets_floor() {
        let solution = calculate_style_config(&fixtures::extreme_resume(), &profile());
        assert_eq!(solution.style, StyleConfig::FLOOR);
        assert_eq!(solution.tier, LoadTier::Overflow);
        assert_eq!(solve_position(&fixtures::extreme_resume(), &profile()), None);
    }

    #[test]
    fn test_light_scenario_returns_ceiling() {
        let solution = calculate_style_config(&fixtures::light_resume(), &profile());
        assert_eq!(solution.tier, LoadTier::Light);
        assert_eq!(solution.style, StyleConfig::CEILING);
    }

    #[test]
    fn test_heavy_scenario_is_near_floor() {
        let data = fixtures::heavy_resume();
        let solution = calculate_style_config(&data, &profile());
        assert_eq!(solution.tier, LoadTier::Heavy, "position {}", solution.position);
        let detail = solution.style.detail_size;
        assert!(detail < StyleConfig::MEDIUM.detail_size);
        assert!(
            detail - StyleConfig::FLOOR.detail_size < StyleConfig::CEILING.detail_size - detail,
            "detail {detail}"
        );
        assert!(fill_ratio(&data, &solution.style, &profile()) <= 1.0);
    }

    #[test]
    fn test_solved_position_is_the_first_that_fits() {
        let step = CURVE_END / (1u32 << SEARCH_STEPS) as f32;
        for data in [fixtures::heavy_resume(), fixtures::full_resume()] {
            let position = solve_position(&data, &profile()).unwrap();
            assert!(position > 0.0);
            assert!(fill_ratio(&data, &style_at(position), &profile()) <= 1.0);
            assert!(fill_ratio(&data, &style_at(position - step), &profile()) > 1.0);
        }
    }

    #[test]
    fn test_one_more_bullet_never_grows_any_field() {
        let mut data = fixtures::light_resume();
        let mut previous = calculate_style_config(&data, &profile()).style;
        for i in 0..80 {
            let entry = i % data.experience.len();
            data.experience[entry].bullets.push(fixtures::bullet_of_len(i, 60 + (i * 13) % 140));
            if i % 10 == 9 {
                data.experience.push(fixtures::experience(i, vec![]));
            }
            let next = calculate_style_config(&data, &profile()).style;
            assert_all_le(&next, &previous);
            previous = next;
        }
        assert_eq!(previous, StyleConfig::FLOOR);
    }

    #[test]
    fn test_style_is_monotone_along_the_curve() {
        let mut previous = style_at(0.0);
        let mut position = 0.0;
        while position < CURVE_END + 0.3 {
            let next = style_at(position);
            assert_all_le(&next, &previous);
            assert_all_le(&StyleConfig::FLOOR, &next);
            assert_all_le(&next, &StyleConfig::CEILING);
            previous = next;
            position += 0.0137;
        }
    }

    #[test]
    fn test_presets_sit_on_integer_positions() {
        assert_eq!(style_at(0.0), StyleConfig::CEILING);
        assert_eq!(style_at(1.0), StyleConfig::MEDIUM);
        assert_eq!(style_at(2.0), StyleConfig::HEAVY);
        assert_eq!(style_at(CURVE_END), StyleConfig::FLOOR);

        let below = style_at(1.0 - 0.001);
        let above = style_at(1.0 + 0.001);
        assert!((below.detail_size - above.detail_size).abs() <= 0.01);
    }

    #[test]
    fn test_non_finite_positions_are_clamped() {
        assert_eq!(style_at(f32::NAN), StyleConfig::CEILING);
        assert_eq!(style_at(f32::INFINITY), StyleConfig::FLOOR);
        assert_eq!(style_at(-5.0), StyleConfig::CEILING);
    }

    #[test]
    fn test_tier_follows_curve_segments() {
        assert_eq!(LoadTier::for_position(0.0), LoadTier::Light);
        assert_eq!(LoadTier::for_position(0.5), LoadTier::Medium);
        assert_eq!(LoadTier::for_position(1.0), LoadTier::Medium);
        assert_eq!(LoadTier::for_position(1.01), LoadTier::Heavy);
        assert_eq!(LoadTier::for_position(CURVE_END), LoadTier::Heavy);
    }

    #[test]
    fn test_deterministic_and_template_blind() {
        let data = fixtures::heavy_resume();
        let first = calculate_style_config(&data, &profile());
        let second = calculate_style_config(&data, &profile());
        assert_eq!(first, second);

        for template in [Template::Simple, Template::Harvard, Template::Modern] {
            let mut styled = data.clone();
            styled.template = template;
            styled.accent_color = Some("#0f766e".to_string());
            styled.show_photo = true;
            let other = calculate_style_config(&styled, &profile()).style;
            let a = first.style.fields().map(f32::to_bits);
            let b = other.fields().map(f32::to_bits);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_no_op_edit_keeps_style() {
        let mut data = fixtures::heavy_resume();
        let before = calculate_style_config(&data, &profile()).style;
        let current = data.summary.clone();
        let changed = data
            .apply_edit(&crate::models::edit::FieldPath::Summary, &current)
            .unwrap();
        assert!(!changed);
        assert_eq!(calculate_style_config(&data, &profile()).style, before);
    }

    #[test]
    fn test_solved_style_fits_on_both_page_sizes() {
        let a4 = LayoutProfile {
            page: PageSize::A4,
            ..profile()
        };
        for page_profile in [profile(), a4] {
            for data in [fixtures::heavy_resume(), fixtures::full_resume()] {
                let solution = calculate_style_config(&data, &page_profile);
                assert_ne!(solution.tier, LoadTier::Overflow);
                assert!(fill_ratio(&data, &solution.style, &page_profile) <= 1.0);
            }
        }
    }

    #[test]
    fn test_style_serializes_camel_case() {
        let value = serde_json::to_value(StyleConfig::CEILING).unwrap();
        assert_eq!(value["detailSize"], 10.5);
        assert!(value.get("bulletMarginBottom").is_some());
    }
}

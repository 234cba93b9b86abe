//! Content-volume estimator — reduces a resume to a few scalar load signals.
//!
//! Two independent signals feed the solver:
//! - line-like units: bullets, entries and section headers each carry a fixed
//!   vertical overhead regardless of how long their text is;
//! - text volume: flowing text (summary, bullets, descriptions, skill and
//!   language lists) greedy-wrapped at the reference size, cross-checked
//!   against raw character count so unbreakable tokens still register.
//!
//! Every signal is a sum of non-negative per-item terms, so adding content
//! never lowers the load.
//!
//! `estimate_height_pt` turns the same signals into points at a concrete
//! style. It is the single height model: the solver searches against it and
//! page-fill analysis reports from it, so the two can never disagree.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::{get_metrics, FontMetricTable, LayoutProfile, PageSize};
use crate::layout::style::StyleConfig;
use crate::models::resume::ResumeData;

/// Left indent of a bullet's text (marker + gap), in points.
pub const BULLET_INDENT_PT: f32 = 12.0;

/// Fixed cost of the name + contact block, in reference lines.
const HEADER_LINES: f32 = 4.0;
/// Section title plus its surrounding margins.
const SECTION_OVERHEAD_LINES: f32 = 2.0;
/// Gap after each entry.
const ENTRY_OVERHEAD_LINES: f32 = 0.6;
/// Gap after each bullet.
const BULLET_OVERHEAD_LINES: f32 = 0.35;

/// Usable text widths, in em at the detail size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBox {
    pub body_em: f32,
    pub bullet_em: f32,
}

impl TextBox {
    pub fn for_style(page: PageSize, style: &StyleConfig) -> Self {
        let body_pt = (page.width_pt() - 2.0 * style.page_padding_side).max(1.0);
        let bullet_pt = (body_pt - BULLET_INDENT_PT).max(1.0);
        Self {
            body_em: body_pt / style.detail_size,
            bullet_em: bullet_pt / style.detail_size,
        }
    }
}

/// Wrapped line counts of the flowing text, per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineUnits {
    pub summary: u32,
    pub bullets: u32,
    pub descriptions: u32,
    pub lists: u32,
}

impl LineUnits {
    pub fn total(&self) -> u32 {
        self.summary + self.bullets + self.descriptions + self.lists
    }
}

/// Composite volume estimate for one resume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentVolume {
    pub bullet_count: u32,
    /// Experience, education, project and certification entries.
    pub entry_count: u32,
    /// Entry title and meta lines (experience and education take two).
    pub entry_header_lines: u32,
    pub populated_sections: u32,
    /// Characters of flowing text.
    pub text_chars: u32,
    pub lines: LineUnits,
    /// Characters that fit on one reference line.
    pub chars_per_line: f32,
}

impl ContentVolume {
    /// Flowing text in reference lines: the greedy-wrap count, or the raw
    /// character estimate when that is larger.
    pub fn text_lines(&self) -> f32 {
        let wrapped = self.lines.total() as f32;
        let by_chars = self.text_chars as f32 / self.chars_per_line;
        wrapped.max(by_chars)
    }

    /// Total load in reference lines. Non-decreasing in every field.
    pub fn load_lines(&self) -> f32 {
        HEADER_LINES
            + self.text_lines()
            + self.entry_header_lines as f32
            + self.bullet_count as f32 * BULLET_OVERHEAD_LINES
            + self.entry_count as f32 * ENTRY_OVERHEAD_LINES
            + self.populated_sections as f32 * SECTION_OVERHEAD_LINES
    }
}

/// Estimated single-column rendered height of `data` under `style`, in points.
///
/// Non-increasing as `style` shrinks field-wise: every term is a product of
/// style fields with counts, and narrower side padding or a smaller detail
/// size only widens the wrap box.
pub fn estimate_height_pt(data: &ResumeData, style: &StyleConfig, profile: &LayoutProfile) -> f32 {
    let metrics = get_metrics(profile.reference_font);
    let text_box = TextBox::for_style(profile.page, style);
    let lines = line_units(data, metrics, &text_box);
    let lh = style.line_height;

    let header = style.name_size * lh + style.detail_size * lh;

    let sections = data.populated_sections().count() as f32
        * (style.section_margin_top + style.section_title_size * lh + style.section_margin_bottom);

    let entries = (data.experience.len()
        + data.education.len()
        + data.projects.len()
        + data.certifications.len()) as f32;
    let meta_lines = (data.experience.len() + data.education.len()) as f32;
    let entry_blocks = entries * (style.entry_title_size * lh + style.entry_margin_bottom)
        + meta_lines * style.detail_size * lh;

    let bullet_count: usize = data.experience.iter().map(|e| e.bullets.len()).sum();
    let bullet_gaps = bullet_count as f32 * style.bullet_margin_bottom;

    let text = lines.total() as f32 * style.detail_size * lh;

    header + sections + entry_blocks + bullet_gaps + text
}

/// Page height left between the top and bottom padding.
pub fn available_height_pt(style: &StyleConfig, page: PageSize) -> f32 {
    (page.height_pt() - style.page_padding_top - style.page_padding_bottom).max(1.0)
}

/// Estimated height over available height. 1.0 is exactly one page.
pub fn fill_ratio(data: &ResumeData, style: &StyleConfig, profile: &LayoutProfile) -> f32 {
    estimate_height_pt(data, style, profile) / available_height_pt(style, profile.page)
}

/// Estimates the vertical demand of `data` at the ceiling style.
///
/// Reads only content fields; template, accent colour and photo settings
/// have no effect.
pub fn estimate_volume(data: &ResumeData, profile: &LayoutProfile) -> ContentVolume {
    let metrics = get_metrics(profile.reference_font);
    let text_box = TextBox::for_style(profile.page, &StyleConfig::CEILING);

    let bullet_count: u32 = data
        .experience
        .iter()
        .map(|e| e.bullets.len() as u32)
        .sum();

    let entry_count = (data.experience.len()
        + data.education.len()
        + data.projects.len()
        + data.certifications.len()) as u32;

    let entry_header_lines = (2 * data.experience.len()
        + 2 * data.education.len()
        + data.projects.len()
        + data.certifications.len()) as u32;

    let chars_per_line = text_box.body_em / metrics.average_char_width();

    ContentVolume {
        bullet_count,
        entry_count,
        entry_header_lines,
        populated_sections: data.populated_sections().count() as u32,
        text_chars: flowing_text_chars(data),
        lines: line_units(data, metrics, &text_box),
        chars_per_line,
    }
}

/// Greedy-wrapped line counts of all flowing text inside `text_box`.
///
/// Each bullet occupies at least one line even when empty, since the marker
/// still renders.
pub fn line_units(data: &ResumeData, metrics: &FontMetricTable, text_box: &TextBox) -> LineUnits {
    let body = |text: &str| metrics.estimated_lines(text, text_box.body_em) as u32;

    let summary = body(&data.summary);

    let bullets = data
        .experience
        .iter()
        .flat_map(|e| e.bullets.iter())
        .map(|b| (metrics.estimated_lines(b, text_box.bullet_em) as u32).max(1))
        .sum();

    let education: u32 = data
        .education
        .iter()
        .filter_map(|e| e.description.as_deref())
        .map(body)
        .sum();
    let projects: u32 = data
        .projects
        .iter()
        .map(|p| {
            let description = p.description.as_deref().map(body).unwrap_or(0);
            description + body(&p.technologies.join(", "))
        })
        .sum();

    let skills = body(&skill_list(data));
    let languages = body(&language_list(data));

    LineUnits {
        summary,
        bullets,
        descriptions: education + projects,
        lists: skills + languages,
    }
}

/// Non-blank skills joined the way the comma-separated templates print them.
pub fn skill_list(data: &ResumeData) -> String {
    data.skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// "Spanish (Fluent), French" — the inline form all templates use.
pub fn language_list(data: &ResumeData) -> String {
    data.languages
        .iter()
        .map(|l| match l.proficiency.as_deref() {
            Some(p) if !p.trim().is_empty() => format!("{} ({})", l.name, p),
            _ => l.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn flowing_text_chars(data: &ResumeData) -> u32 {
    let count = |s: &str| s.chars().count() as u32;

    let bullets: u32 = data
        .experience
        .iter()
        .flat_map(|e| e.bullets.iter())
        .map(|b| count(b.as_str()))
        .sum();
    let education: u32 = data
        .education
        .iter()
        .filter_map(|e| e.description.as_deref())
        .map(count)
        .sum();
    let projects: u32 = data
        .projects
        .iter()
        .filter_map(|p| p.description.as_deref())
        .map(count)
        .sum();

    count(&data.summary) + bullets + education + projects
}

//! Axum route handlers for the Layout and Resume editing APIs.

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::layout::estimator::ContentVolume;
use crate::layout::font_metrics::LayoutProfile;
use crate::layout::page_fill::{
    analyze_page_fill, recommend_fill_action, FillAction, PageFillAnalysis,
};
use crate::layout::style::{calculate_style_config, LoadTier, StyleConfig, StyleSolution};
use crate::models::edit::{FieldEdit, FieldPath};
use crate::models::resume::ResumeData;
use crate::render::{html::to_html, render_document, RenderOptions};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleResponse {
    pub style: StyleConfig,
    pub tier: LoadTier,
    pub position: f32,
    pub load: f32,
    pub volume: ContentVolume,
    pub page_fill: PageFillAnalysis,
    pub fill_action: FillAction,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    #[default]
    Html,
    Json,
}

#[derive(Debug, Default, Deserialize)]
pub struct RenderQuery {
    #[serde(default)]
    pub format: RenderFormat,
    #[serde(default)]
    pub editable: bool,
}

#[derive(Debug, Deserialize)]
pub struct EditRequest {
    pub resume: ResumeData,
    pub edit: FieldEdit,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditResponse {
    pub resume: ResumeData,
    pub changed: bool,
    pub style: StyleConfig,
    pub tier: LoadTier,
}

// ────────────────────────────────────────────────────────────────────────────
// Shared
// ────────────────────────────────────────────────────────────────────────────

/// Solves the style for `data` and logs when even the floor style overflows.
fn solve(data: &ResumeData, profile: &LayoutProfile) -> (StyleSolution, PageFillAnalysis) {
    let solution = calculate_style_config(data, profile);
    let fill = analyze_page_fill(data, &solution.style, profile);

    debug!(
        tier = ?solution.tier,
        position = solution.position,
        load = solution.load,
        fill_ratio = fill.fill_ratio,
        "Solved resume style"
    );
    if solution.tier == LoadTier::Overflow {
        warn!(
            load = solution.load,
            fill_ratio = fill.fill_ratio,
            verdict = ?fill.verdict,
            "Resume overflows one page at the floor style"
        );
    }
    (solution, fill)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/layout/style
///
/// Returns the StyleConfig for the submitted content plus the load signals
/// and a page-fill prediction behind it.
pub async fn handle_style(
    State(state): State<AppState>,
    Json(data): Json<ResumeData>,
) -> Result<Json<StyleResponse>, AppError> {
    let (solution, page_fill) = solve(&data, &state.profile);
    let fill_action = recommend_fill_action(&page_fill, &data);

    Ok(Json(StyleResponse {
        style: solution.style,
        tier: solution.tier,
        position: solution.position,
        load: solution.load,
        volume: solution.volume,
        page_fill,
        fill_action,
    }))
}

/// POST /api/v1/layout/render?format=html|json&editable=bool
///
/// Solves the style, then renders the resume with its selected template.
pub async fn handle_render(
    State(state): State<AppState>,
    Query(query): Query<RenderQuery>,
    Json(data): Json<ResumeData>,
) -> Result<Response, AppError> {
    let (solution, _) = solve(&data, &state.profile);
    let document = render_document(
        &data,
        &solution.style,
        state.profile.page,
        RenderOptions {
            editable: query.editable,
        },
    );
    debug!(
        template = ?document.template,
        format = ?query.format,
        editable = query.editable,
        "Rendered resume"
    );

    Ok(match query.format {
        RenderFormat::Html => Html(to_html(&document)).into_response(),
        RenderFormat::Json => Json(document).into_response(),
    })
}

/// POST /api/v1/resumes/edit
///
/// Applies one click-to-edit change and returns the updated resume with its
/// re-solved style. No-op edits skip the solve-side logging but still return
/// the current style.
pub async fn handle_apply_edit(
    State(state): State<AppState>,
    Json(request): Json<EditRequest>,
) -> Result<Json<EditResponse>, AppError> {
    let path: FieldPath = request.edit.path.parse()?;
    let mut resume = request.resume;
    let changed = resume.apply_edit(&path, &request.edit.value)?;

    let solution = if changed {
        solve(&resume, &state.profile).0
    } else {
        calculate_style_config(&resume, &state.profile)
    };

    Ok(Json(EditResponse {
        resume,
        changed,
        style: solution.style,
        tier: solution.tier,
    }))
}

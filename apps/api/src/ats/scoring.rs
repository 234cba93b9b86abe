//! ATS Scoring — pluggable, trait-based scorer that measures how well a resume
//! covers the keywords of a job description.
//!
//! Default: `KeywordAtsScorer` (pure-Rust, fast, deterministic, fully testable).
//! `AppState` holds an `Arc<dyn AtsScorer>` so another backend can be swapped in
//! at startup without touching handlers.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::ats::keywords::{tokenize, KeywordEntry};
use crate::errors::AppError;
use crate::models::resume::ResumeData;

const STRONG_THRESHOLD: f32 = 0.8;
const PARTIAL_THRESHOLD: f32 = 0.4;
const SKILL_STRENGTH: f32 = 1.0;
const TEXT_STRENGTH: f32 = 0.6;

// ────────────────────────────────────────────────────────────────────────────
// Output data models (shared across all scorer backends)
// ────────────────────────────────────────────────────────────────────────────

/// A JD keyword the resume covers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMatch {
    pub keyword: String,
    /// Field that covers it, e.g. `skills.2` or `experience.0.bullets.3`.
    pub evidence: String,
    pub strength: f32, // 0.0 – 1.0
}

/// A JD keyword the resume never mentions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordGap {
    pub keyword: String,
    pub jd_frequency: u32,
    pub suggestion: Option<String>, // closest skill path, if any
}

/// Full ATS report returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsReport {
    pub overall_score: u32,                 // 0 – 100
    pub strong_matches: Vec<KeywordMatch>,  // strength ≥ 0.8
    pub partial_matches: Vec<KeywordMatch>, // 0.4 – 0.79
    pub gaps: Vec<KeywordGap>,              // strength < 0.4
    pub recommendation: String,
    pub scorer_backend: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring backends without touching the endpoint,
/// handler, or caller code.
#[async_trait]
pub trait AtsScorer: Send + Sync {
    async fn score(
        &self,
        resume: &ResumeData,
        keywords: &[KeywordEntry],
    ) -> Result<AtsReport, AppError>;
}

/// Keyword coverage scorer. No network calls.
///
/// Algorithm:
/// 1. For each keyword:
///    - listed skill → strength 1.0
///    - mentioned in summary, experience, projects or education → 0.6
///    - otherwise → 0.0
/// 2. overall_score = Σ(strength × weighted_score) / Σ(weighted_score) × 100
/// 3. Classify: strong (≥0.8), partial (0.4–0.79), gap (<0.4)
pub struct KeywordAtsScorer;

#[async_trait]
impl AtsScorer for KeywordAtsScorer {
    async fn score(
        &self,
        resume: &ResumeData,
        keywords: &[KeywordEntry],
    ) -> Result<AtsReport, AppError> {
        Ok(compute_keyword_coverage(resume, keywords))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core coverage algorithm
// ────────────────────────────────────────────────────────────────────────────

/// One searchable piece of resume text, pre-tokenized.
struct Field {
    location: String,
    lower: String,
    tokens: HashSet<String>,
}

impl Field {
    fn new(location: String, text: &str) -> Self {
        Self {
            location,
            lower: text.to_lowercase(),
            tokens: tokenize(text).collect(),
        }
    }

    fn mentions(&self, keyword: &str) -> bool {
        if keyword.contains(char::is_whitespace) {
            self.lower.contains(keyword)
        } else {
            self.tokens.contains(keyword) || self.lower.trim() == keyword
        }
    }
}

fn skill_fields(resume: &ResumeData) -> Vec<Field> {
    resume
        .skills
        .iter()
        .enumerate()
        .map(|(i, s)| Field::new(format!("skills.{i}"), s))
        .collect()
}

fn text_fields(resume: &ResumeData) -> Vec<Field> {
    let mut fields = vec![Field::new("summary".to_string(), &resume.summary)];
    if let Some(headline) = resume.personal_info.headline.as_deref() {
        fields.push(Field::new("personalInfo.headline".to_string(), headline));
    }
    for (i, exp) in resume.experience.iter().enumerate() {
        fields.push(Field::new(format!("experience.{i}.title"), &exp.title));
        for (j, bullet) in exp.bullets.iter().enumerate() {
            fields.push(Field::new(format!("experience.{i}.bullets.{j}"), bullet));
        }
    }
    for (i, project) in resume.projects.iter().enumerate() {
        fields.push(Field::new(format!("projects.{i}.name"), &project.name));
        if let Some(description) = project.description.as_deref() {
            fields.push(Field::new(format!("projects.{i}.description"), description));
        }
        for tech in &project.technologies {
            fields.push(Field::new(format!("projects.{i}.technologies"), tech));
        }
    }
    for (i, edu) in resume.education.iter().enumerate() {
        fields.push(Field::new(format!("education.{i}.degree"), &edu.degree));
        if let Some(field) = edu.field.as_deref() {
            fields.push(Field::new(format!("education.{i}.field"), field));
        }
        if let Some(description) = edu.description.as_deref() {
            fields.push(Field::new(format!("education.{i}.description"), description));
        }
    }
    for (i, cert) in resume.certifications.iter().enumerate() {
        fields.push(Field::new(format!("certifications.{i}.name"), &cert.name));
    }
    fields
}

fn compute_keyword_coverage(resume: &ResumeData, keywords: &[KeywordEntry]) -> AtsReport {
    if keywords.is_empty() {
        return AtsReport {
            overall_score: 0,
            strong_matches: vec![],
            partial_matches: vec![],
            gaps: vec![],
            recommendation: "No keywords found in the job description — cannot score coverage."
                .to_string(),
            scorer_backend: "keyword".to_string(),
        };
    }

    let skills = skill_fields(resume);
    let texts = text_fields(resume);

    let mut strong_matches = Vec::new();
    let mut partial_matches = Vec::new();
    let mut gaps = Vec::new();

    let mut total_weighted = 0.0_f32;
    let mut total_score = 0.0_f32;

    for kw_entry in keywords {
        let keyword_lower = kw_entry.keyword.trim().to_lowercase();
        if keyword_lower.is_empty() {
            continue;
        }
        total_weighted += kw_entry.weighted_score;

        let found = skills
            .iter()
            .find(|f| f.mentions(&keyword_lower))
            .map(|f| (SKILL_STRENGTH, f))
            .or_else(|| {
                texts
                    .iter()
                    .find(|f| f.mentions(&keyword_lower))
                    .map(|f| (TEXT_STRENGTH, f))
            });
        let strength = found.map(|(s, _)| s).unwrap_or(0.0);
        total_score += strength * kw_entry.weighted_score;

        match found {
            Some((strength, field)) if strength >= PARTIAL_THRESHOLD => {
                let keyword_match = KeywordMatch {
                    keyword: kw_entry.keyword.clone(),
                    evidence: field.location.clone(),
                    strength,
                };
                if strength >= STRONG_THRESHOLD {
                    strong_matches.push(keyword_match);
                } else {
                    partial_matches.push(keyword_match);
                }
            }
            _ => gaps.push(KeywordGap {
                keyword: kw_entry.keyword.clone(),
                jd_frequency: kw_entry.frequency,
                suggestion: find_closest_skill(&skills, &keyword_lower),
            }),
        }
    }

    let overall_score = if total_weighted > 0.0 {
        ((total_score / total_weighted) * 100.0).round().clamp(0.0, 100.0) as u32
    } else {
        0
    };

    let recommendation = build_recommendation(overall_score, &gaps);

    AtsReport {
        overall_score,
        strong_matches,
        partial_matches,
        gaps,
        recommendation,
        scorer_backend: "keyword".to_string(),
    }
}

/// A listed skill that overlaps the missing keyword (e.g. `postgres` vs
/// `PostgreSQL`), so the editor can suggest rewording it.
fn find_closest_skill(skills: &[Field], keyword: &str) -> Option<String> {
    skills
        .iter()
        .find(|f| {
            let skill = f.lower.trim();
            !skill.is_empty() && (skill.contains(keyword) || keyword.contains(skill))
        })
        .map(|f| f.location.clone())
}

/// Builds a human-readable recommendation string from score and gaps.
fn build_recommendation(score: u32, gaps: &[KeywordGap]) -> String {
    let top_gaps: Vec<&str> = gaps.iter().take(3).map(|g| g.keyword.as_str()).collect();

    if score >= 80 {
        "Strong match. Your resume already covers the key job description terms.".to_string()
    } else if score >= 60 {
        format!(
            "Moderate match ({score}/100). Consider working these terms into your resume: {}.",
            top_gaps.join(", ")
        )
    } else {
        format!(
            "Low match ({score}/100). Missing terms: {}. Tailor skills and bullets before applying.",
            top_gaps.join(", ")
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

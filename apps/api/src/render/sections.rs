//! Section builders shared by every template.
//!
//! Each builder returns `None` for an unpopulated section so no template can
//! emit an empty heading. Templates differ only in which builders they call,
//! in what order and in which column, plus a handful of `Recipe` switches.

use chrono::NaiveDate;

use crate::layout::style::StyleConfig;
use crate::models::edit::{
    CertificationField, EducationField, ExperienceField, FieldPath, LanguageField, PersonalField,
    ProjectField,
};
use crate::models::resume::{ResumeData, SectionKind};
use crate::render::document::{EntryBlock, HeaderBlock, RenderOptions, SectionBlock, Text, TextRole};

/// Template-specific switches consumed by the builders.
#[derive(Debug, Clone, Copy)]
pub struct Recipe {
    pub uppercase_titles: bool,
    /// Lead experience entries with the company instead of the job title.
    pub company_first: bool,
    pub centered_header: bool,
    pub show_photo: bool,
}

pub struct SectionContext<'a> {
    pub data: &'a ResumeData,
    pub style: &'a StyleConfig,
    pub options: RenderOptions,
    pub recipe: Recipe,
}

impl SectionContext<'_> {
    fn text(&self, content: impl Into<String>, role: TextRole) -> Text {
        Text::new(content, role, self.style)
    }

    fn detail(&self, content: impl Into<String>) -> Text {
        self.text(content, TextRole::Detail)
    }

    fn entry(&self) -> EntryBlock {
        EntryBlock {
            margin_bottom: self.style.entry_margin_bottom,
            ..Default::default()
        }
    }

    fn section(&self, kind: SectionKind, entries: Vec<EntryBlock>) -> SectionBlock {
        let title = if self.recipe.uppercase_titles {
            kind.title().to_uppercase()
        } else {
            kind.title().to_string()
        };
        SectionBlock {
            kind,
            title: self.text(title, TextRole::SectionTitle).bold(),
            entries,
            margin_top: self.style.section_margin_top,
            margin_bottom: self.style.section_margin_bottom,
            bullet_margin_bottom: self.style.bullet_margin_bottom,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Dates
// ────────────────────────────────────────────────────────────────────────────

/// `2021-03` / `2021-03-15` → `Mar 2021`; anything else is returned trimmed.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d"));
    match parsed {
        Ok(date) => date.format("%b %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// "Mar 2021 – Present"; either side may be missing.
pub fn date_range(start: Option<&str>, end: Option<&str>, current: bool) -> Option<String> {
    let start = start.map(str::trim).filter(|s| !s.is_empty()).map(format_date);
    let end = if current {
        Some("Present".to_string())
    } else {
        end.map(str::trim).filter(|s| !s.is_empty()).map(format_date)
    };
    match (start, end) {
        (Some(s), Some(e)) => Some(format!("{s} – {e}")),
        (Some(s), None) => Some(s),
        (None, Some(e)) => Some(e),
        (None, None) => None,
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

pub fn build_header(ctx: &SectionContext<'_>) -> HeaderBlock {
    let info = &ctx.data.personal_info;
    let opts = ctx.options;

    let name = ctx
        .text(info.name.trim(), TextRole::Name)
        .bold()
        .field(FieldPath::Personal(PersonalField::Name), opts);
    let headline = non_blank(&info.headline).map(|h| {
        ctx.detail(h)
            .italic()
            .field(FieldPath::Personal(PersonalField::Headline), opts)
    });

    let mut contacts = Vec::new();
    let mut contact = |value: &Option<String>, field: PersonalField, href: Option<String>| {
        if let Some(v) = non_blank(value) {
            let text = ctx
                .detail(v)
                .field(FieldPath::Personal(field), opts)
                .link(href.as_deref());
            contacts.push(text);
        }
    };
    contact(
        &info.email,
        PersonalField::Email,
        non_blank(&info.email).map(|e| format!("mailto:{e}")),
    );
    contact(
        &info.phone,
        PersonalField::Phone,
        non_blank(&info.phone).map(|p| format!("tel:{}", p.replace(' ', ""))),
    );
    contact(&info.location, PersonalField::Location, None);
    contact(
        &info.linkedin,
        PersonalField::Linkedin,
        non_blank(&info.linkedin).map(str::to_string),
    );
    contact(
        &info.github,
        PersonalField::Github,
        non_blank(&info.github).map(str::to_string),
    );
    contact(
        &info.website,
        PersonalField::Website,
        non_blank(&info.website).map(str::to_string),
    );

    let photo_url = if ctx.recipe.show_photo && ctx.data.show_photo {
        non_blank(&info.photo_url).map(str::to_string)
    } else {
        None
    };

    HeaderBlock {
        name,
        headline,
        contacts,
        photo_url,
        centered: ctx.recipe.centered_header,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Body sections
// ────────────────────────────────────────────────────────────────────────────

pub fn build_section(kind: SectionKind, ctx: &SectionContext<'_>) -> Option<SectionBlock> {
    if !kind.is_populated(ctx.data) {
        return None;
    }
    let entries = match kind {
        SectionKind::Summary => vec![summary_entry(ctx)],
        SectionKind::Experience => experience_entries(ctx),
        SectionKind::Education => education_entries(ctx),
        SectionKind::Projects => project_entries(ctx),
        SectionKind::Certifications => certification_entries(ctx),
        SectionKind::Skills => vec![skills_entry(ctx)],
        SectionKind::Languages => language_entries(ctx),
    };
    Some(ctx.section(kind, entries))
}

/// Builds `kinds` in order, skipping unpopulated ones.
pub fn build_sections(kinds: &[SectionKind], ctx: &SectionContext<'_>) -> Vec<SectionBlock> {
    kinds.iter().filter_map(|k| build_section(*k, ctx)).collect()
}

fn summary_entry(ctx: &SectionContext<'_>) -> EntryBlock {
    let mut entry = ctx.entry();
    entry.paragraphs.push(
        ctx.detail(ctx.data.summary.trim())
            .field(FieldPath::Summary, ctx.options),
    );
    entry
}

fn experience_entries(ctx: &SectionContext<'_>) -> Vec<EntryBlock> {
    let opts = ctx.options;
    ctx.data
        .experience
        .iter()
        .enumerate()
        .map(|(i, exp)| {
            let path = |field| FieldPath::Experience(i, field);
            let title = ctx
                .text(exp.title.trim(), TextRole::EntryTitle)
                .bold()
                .field(path(ExperienceField::Title), opts);
            let company = ctx
                .detail(exp.company.trim())
                .italic()
                .field(path(ExperienceField::Company), opts)
                .link(exp.company_url.as_deref());

            let mut entry = ctx.entry();
            if ctx.recipe.company_first {
                let company = Text {
                    role: TextRole::EntryTitle,
                    size_pt: TextRole::EntryTitle.size(ctx.style),
                    bold: true,
                    italic: false,
                    ..company
                };
                let title = Text {
                    role: TextRole::Detail,
                    size_pt: TextRole::Detail.size(ctx.style),
                    bold: false,
                    italic: true,
                    ..title
                };
                entry.heading.push(company);
                entry.meta.push(title);
            } else {
                entry.heading.push(title);
                entry.meta.push(company);
            }

            if let Some(location) = non_blank(&exp.location) {
                entry
                    .meta
                    .push(ctx.detail(location).field(path(ExperienceField::Location), opts));
            }
            if let Some(dates) = date_range(Some(exp.start_date.as_str()), exp.end_date.as_deref(), exp.current)
            {
                entry.meta.push(ctx.detail(dates));
            }
            entry.bullets = exp
                .bullets
                .iter()
                .enumerate()
                .filter(|(_, b)| !b.trim().is_empty())
                .map(|(j, b)| {
                    ctx.detail(b.trim())
                        .field(path(ExperienceField::Bullet(j)), opts)
                })
                .collect();
            entry
        })
        .collect()
}

fn education_entries(ctx: &SectionContext<'_>) -> Vec<EntryBlock> {
    let opts = ctx.options;
    ctx.data
        .education
        .iter()
        .enumerate()
        .map(|(i, edu)| {
            let path = |field| FieldPath::Education(i, field);
            let mut entry = ctx.entry();
            entry.heading.push(
                ctx.text(edu.institution.trim(), TextRole::EntryTitle)
                    .bold()
                    .field(path(EducationField::Institution), opts),
            );
            if !edu.degree.trim().is_empty() {
                entry.meta.push(
                    ctx.detail(edu.degree.trim())
                        .italic()
                        .field(path(EducationField::Degree), opts),
                );
            }
            if let Some(field) = non_blank(&edu.field) {
                entry
                    .meta
                    .push(ctx.detail(field).field(path(EducationField::Field), opts));
            }
            if let Some(location) = non_blank(&edu.location) {
                entry
                    .meta
                    .push(ctx.detail(location).field(path(EducationField::Location), opts));
            }
            if let Some(dates) =
                date_range(edu.start_date.as_deref(), edu.end_date.as_deref(), edu.current)
            {
                entry.meta.push(ctx.detail(dates));
            }
            if let Some(gpa) = non_blank(&edu.gpa) {
                entry.meta.push(ctx.detail(format!("GPA {gpa}")));
            }
            if let Some(description) = non_blank(&edu.description) {
                entry.paragraphs.push(
                    ctx.detail(description)
                        .field(path(EducationField::Description), opts),
                );
            }
            entry
        })
        .collect()
}

fn project_entries(ctx: &SectionContext<'_>) -> Vec<EntryBlock> {
    let opts = ctx.options;
    ctx.data
        .projects
        .iter()
        .enumerate()
        .map(|(i, project)| {
            let path = |field| FieldPath::Project(i, field);
            let mut entry = ctx.entry();
            entry.heading.push(
                ctx.text(project.name.trim(), TextRole::EntryTitle)
                    .bold()
                    .field(path(ProjectField::Name), opts)
                    .link(project.url.as_deref()),
            );
            if !project.technologies.is_empty() {
                entry
                    .meta
                    .push(ctx.detail(project.technologies.join(", ")).italic());
            }
            if let Some(dates) =
                date_range(project.start_date.as_deref(), project.end_date.as_deref(), false)
            {
                entry.meta.push(ctx.detail(dates));
            }
            if let Some(description) = non_blank(&project.description) {
                entry.paragraphs.push(
                    ctx.detail(description)
                        .field(path(ProjectField::Description), opts),
                );
            }
            entry
        })
        .collect()
}

fn certification_entries(ctx: &SectionContext<'_>) -> Vec<EntryBlock> {
    let opts = ctx.options;
    ctx.data
        .certifications
        .iter()
        .enumerate()
        .map(|(i, cert)| {
            let path = |field| FieldPath::Certification(i, field);
            let mut entry = ctx.entry();
            entry.heading.push(
                ctx.text(cert.name.trim(), TextRole::EntryTitle)
                    .bold()
                    .field(path(CertificationField::Name), opts)
                    .link(cert.url.as_deref()),
            );
            if let Some(issuer) = non_blank(&cert.issuer) {
                entry
                    .meta
                    .push(ctx.detail(issuer).field(path(CertificationField::Issuer), opts));
            }
            if let Some(date) = non_blank(&cert.date) {
                entry.meta.push(
                    ctx.detail(format_date(date))
                        .field(path(CertificationField::Date), opts),
                );
            }
            entry
        })
        .collect()
}

fn skills_entry(ctx: &SectionContext<'_>) -> EntryBlock {
    let mut entry = ctx.entry();
    entry.items = ctx
        .data
        .skills
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.trim().is_empty())
        .map(|(i, s)| ctx.detail(s.trim()).field(FieldPath::Skill(i), ctx.options))
        .collect();
    entry
}

fn language_entries(ctx: &SectionContext<'_>) -> Vec<EntryBlock> {
    let opts = ctx.options;
    ctx.data
        .languages
        .iter()
        .enumerate()
        .map(|(i, language)| {
            let mut entry = ctx.entry();
            entry.heading.push(
                ctx.detail(language.name.trim())
                    .bold()
                    .field(FieldPath::Language(i, LanguageField::Name), opts),
            );
            if let Some(proficiency) = non_blank(&language.proficiency) {
                entry.meta.push(
                    ctx.detail(proficiency)
                        .italic()
                        .field(FieldPath::Language(i, LanguageField::Proficiency), opts),
                );
            }
            entry
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures;

    fn recipe() -> Recipe {
        Recipe {
            uppercase_titles: false,
            company_first: false,
            centered_header: true,
            show_photo: false,
        }
    }

    fn ctx<'a>(data: &'a ResumeData, editable: bool) -> SectionContext<'a> {
        SectionContext {
            data,
            style: &StyleConfig::CEILING,
            options: RenderOptions { editable },
            recipe: recipe(),
        }
    }

    #[test]
    fn test_format_date_month_precision() {
        assert_eq!(format_date("2021-03"), "Mar 2021");
        assert_eq!(format_date("2019-11-15"), "Nov 2019");
    }

    #[test]
    fn test_format_date_passes_through_free_text() {
        assert_eq!(format_date("Summer 2020"), "Summer 2020");
        assert_eq!(format_date(" 2018 "), "2018");
    }

    #[test]
    fn test_date_range_current_ends_in_present() {
        assert_eq!(
            date_range(Some("2020-01"), Some("2022-06"), true).as_deref(),
            Some("Jan 2020 – Present")
        );
        assert_eq!(
            date_range(Some("2020-01"), Some("2022-06"), false).as_deref(),
            Some("Jan 2020 – Jun 2022")
        );
        assert_eq!(date_range(None, Some(" "), false), None);
    }

    #[test]
    fn test_unpopulated_section_is_none() {
        let data = fixtures::light_resume();
        assert!(build_section(SectionKind::Projects, &ctx(&data, false)).is_none());
        assert!(build_section(SectionKind::Experience, &ctx(&data, false)).is_some());
    }

    #[test]
    fn test_blank_summary_renders_no_section() {
        let mut data = fixtures::light_resume();
        data.summary = "  ".to_string();
        assert!(build_section(SectionKind::Summary, &ctx(&data, false)).is_none());
    }

    #[test]
    fn test_blank_skills_render_no_section() {
        let mut data = fixtures::light_resume();
        data.skills = vec!["  ".to_string(), String::new()];
        assert!(build_section(SectionKind::Skills, &ctx(&data, false)).is_none());

        data.skills.push("Rust".to_string());
        let section = build_section(SectionKind::Skills, &ctx(&data, true)).unwrap();
        let items = &section.entries[0].items;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].field.as_deref(), Some("skills.2"));
    }

    #[test]
    fn test_editable_bullets_carry_field_paths() {
        let data = fixtures::light_resume();
        let section = build_section(SectionKind::Experience, &ctx(&data, true)).unwrap();
        let fields: Vec<_> = section.entries[0]
            .bullets
            .iter()
            .map(|b| b.field.as_deref().unwrap())
            .collect();
        assert_eq!(
            fields,
            vec![
                "experience.0.bullets.0",
                "experience.0.bullets.1",
                "experience.0.bullets.2"
            ]
        );
    }

    #[test]
    fn test_read_only_render_has_no_field_paths() {
        let data = fixtures::full_resume();
        let c = ctx(&data, false);
        let header = build_header(&c);
        assert!(header.name.field.is_none());
        for section in build_sections(&SectionKind::ALL, &c) {
            for entry in &section.entries {
                assert!(entry.bullets.iter().all(|t| t.field.is_none()));
                assert!(entry.heading.iter().all(|t| t.field.is_none()));
            }
        }
    }

    #[test]
    fn test_company_first_swaps_heading_and_meta() {
        let data = fixtures::light_resume();
        let mut c = ctx(&data, false);
        c.recipe.company_first = true;
        let section = build_section(SectionKind::Experience, &c).unwrap();
        let entry = &section.entries[0];
        assert_eq!(entry.heading[0].content, data.experience[0].company);
        assert_eq!(entry.heading[0].role, TextRole::EntryTitle);
        assert_eq!(entry.meta[0].content, data.experience[0].title);
        assert_eq!(entry.meta[0].role, TextRole::Detail);
    }

    #[test]
    fn test_header_skips_blank_contacts_and_links_email() {
        let mut data = fixtures::light_resume();
        data.personal_info.github = Some("  ".to_string());
        let header = build_header(&ctx(&data, false));
        assert!(header.contacts.iter().all(|c| !c.content.trim().is_empty()));
        let email = header
            .contacts
            .iter()
            .find(|c| Some(c.content.as_str()) == data.personal_info.email.as_deref())
            .unwrap();
        assert!(email.href.as_deref().unwrap().starts_with("mailto:"));
    }

    #[test]
    fn test_photo_needs_template_support_and_opt_in() {
        let mut data = fixtures::light_resume();
        data.personal_info.photo_url = Some("https://img.example.com/me.png".to_string());
        data.show_photo = true;
        assert!(build_header(&ctx(&data, false)).photo_url.is_none());

        let mut c = ctx(&data, false);
        c.recipe.show_photo = true;
        assert!(build_header(&c).photo_url.is_some());
    }

    #[test]
    fn test_uppercase_titles() {
        let data = fixtures::light_resume();
        let mut c = ctx(&data, false);
        c.recipe.uppercase_titles = true;
        let section = build_section(SectionKind::Experience, &c).unwrap();
        assert_eq!(section.title.content, "EXPERIENCE");
    }
}

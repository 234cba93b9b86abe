//! Click-to-edit field addressing.
//!
//! Renderers tag every editable text node with a `FieldPath` string such as
//! `experience.2.bullets.1`. The editor sends the path back with the new text
//! and `ResumeData::apply_edit` writes it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::resume::ResumeData;

#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("empty field path")]
    EmptyPath,

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("invalid index '{0}'")]
    InvalidIndex(String),

    #[error("index {index} out of range for '{list}' (len {len})")]
    OutOfRange {
        list: &'static str,
        index: usize,
        len: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonalField {
    Name,
    Headline,
    Email,
    Phone,
    Location,
    Linkedin,
    Github,
    Website,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceField {
    Title,
    Company,
    Location,
    StartDate,
    EndDate,
    Bullet(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationField {
    Institution,
    Degree,
    Field,
    Location,
    StartDate,
    EndDate,
    Gpa,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectField {
    Name,
    Description,
    Url,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificationField {
    Name,
    Issuer,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageField {
    Name,
    Proficiency,
}

/// Address of one editable text field inside `ResumeData`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    Summary,
    Personal(PersonalField),
    Skill(usize),
    Experience(usize, ExperienceField),
    Education(usize, EducationField),
    Project(usize, ProjectField),
    Certification(usize, CertificationField),
    Language(usize, LanguageField),
}

/// A single field edit as sent by the editor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldEdit {
    pub path: String,
    pub value: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Parsing / formatting
// ────────────────────────────────────────────────────────────────────────────

fn parse_index(segment: Option<&str>) -> Result<usize, EditError> {
    let segment = segment.ok_or(EditError::EmptyPath)?;
    segment
        .parse::<usize>()
        .map_err(|_| EditError::InvalidIndex(segment.to_string()))
}

fn leaf<'a>(segment: Option<&'a str>) -> Result<&'a str, EditError> {
    segment.ok_or(EditError::EmptyPath)
}

impl FromStr for FieldPath {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EditError::EmptyPath);
        }
        let mut segments = s.split('.');
        let root = segments.next().unwrap_or_default();
        let unknown = || EditError::UnknownField(s.to_string());

        let path = match root {
            "summary" => FieldPath::Summary,
            "personalInfo" => FieldPath::Personal(match leaf(segments.next())? {
                "name" => PersonalField::Name,
                "headline" => PersonalField::Headline,
                "email" => PersonalField::Email,
                "phone" => PersonalField::Phone,
                "location" => PersonalField::Location,
                "linkedin" => PersonalField::Linkedin,
                "github" => PersonalField::Github,
                "website" => PersonalField::Website,
                _ => return Err(unknown()),
            }),
            "skills" => FieldPath::Skill(parse_index(segments.next())?),
            "experience" => {
                let index = parse_index(segments.next())?;
                let field = match leaf(segments.next())? {
                    "title" => ExperienceField::Title,
                    "company" => ExperienceField::Company,
                    "location" => ExperienceField::Location,
                    "startDate" => ExperienceField::StartDate,
                    "endDate" => ExperienceField::EndDate,
                    "bullets" => ExperienceField::Bullet(parse_index(segments.next())?),
                    _ => return Err(unknown()),
                };
                FieldPath::Experience(index, field)
            }
            "education" => {
                let index = parse_index(segments.next())?;
                let field = match leaf(segments.next())? {
                    "institution" => EducationField::Institution,
                    "degree" => EducationField::Degree,
                    "field" => EducationField::Field,
                    "location" => EducationField::Location,
                    "startDate" => EducationField::StartDate,
                    "endDate" => EducationField::EndDate,
                    "gpa" => EducationField::Gpa,
                    "description" => EducationField::Description,
                    _ => return Err(unknown()),
                };
                FieldPath::Education(index, field)
            }
            "projects" => {
                let index = parse_index(segments.next())?;
                let field = match leaf(segments.next())? {
                    "name" => ProjectField::Name,
                    "description" => ProjectField::Description,
                    "url" => ProjectField::Url,
                    _ => return Err(unknown()),
                };
                FieldPath::Project(index, field)
            }
            "certifications" => {
                let index = parse_index(segments.next())?;
                let field = match leaf(segments.next())? {
                    "name" => CertificationField::Name,
                    "issuer" => CertificationField::Issuer,
                    "date" => CertificationField::Date,
                    _ => return Err(unknown()),
                };
                FieldPath::Certification(index, field)
            }
            "languages" => {
                let index = parse_index(segments.next())?;
                let field = match leaf(segments.next())? {
                    "name" => LanguageField::Name,
                    "proficiency" => LanguageField::Proficiency,
                    _ => return Err(unknown()),
                };
                FieldPath::Language(index, field)
            }
            _ => return Err(unknown()),
        };

        if segments.next().is_some() {
            return Err(unknown());
        }
        Ok(path)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Summary => write!(f, "summary"),
            FieldPath::Personal(field) => {
                let leaf = match field {
                    PersonalField::Name => "name",
                    PersonalField::Headline => "headline",
                    PersonalField::Email => "email",
                    PersonalField::Phone => "phone",
                    PersonalField::Location => "location",
                    PersonalField::Linkedin => "linkedin",
                    PersonalField::Github => "github",
                    PersonalField::Website => "website",
                };
                write!(f, "personalInfo.{leaf}")
            }
            FieldPath::Skill(i) => write!(f, "skills.{i}"),
            FieldPath::Experience(i, field) => match field {
                ExperienceField::Title => write!(f, "experience.{i}.title"),
                ExperienceField::Company => write!(f, "experience.{i}.company"),
                ExperienceField::Location => write!(f, "experience.{i}.location"),
                ExperienceField::StartDate => write!(f, "experience.{i}.startDate"),
                ExperienceField::EndDate => write!(f, "experience.{i}.endDate"),
                ExperienceField::Bullet(j) => write!(f, "experience.{i}.bullets.{j}"),
            },
            FieldPath::Education(i, field) => {
                let leaf = match field {
                    EducationField::Institution => "institution",
                    EducationField::Degree => "degree",
                    EducationField::Field => "field",
                    EducationField::Location => "location",
                    EducationField::StartDate => "startDate",
                    EducationField::EndDate => "endDate",
                    EducationField::Gpa => "gpa",
                    EducationField::Description => "description",
                };
                write!(f, "education.{i}.{leaf}")
            }
            FieldPath::Project(i, field) => {
                let leaf = match field {
                    ProjectField::Name => "name",
                    ProjectField::Description => "description",
                    ProjectField::Url => "url",
                };
                write!(f, "projects.{i}.{leaf}")
            }
            FieldPath::Certification(i, field) => {
                let leaf = match field {
                    CertificationField::Name => "name",
                    CertificationField::Issuer => "issuer",
                    CertificationField::Date => "date",
                };
                write!(f, "certifications.{i}.{leaf}")
            }
            FieldPath::Language(i, field) => {
                let leaf = match field {
                    LanguageField::Name => "name",
                    LanguageField::Proficiency => "proficiency",
                };
                write!(f, "languages.{i}.{leaf}")
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Applying edits
// ────────────────────────────────────────────────────────────────────────────

fn set_text(slot: &mut String, value: &str) -> bool {
    if slot == value {
        return false;
    }
    *slot = value.to_string();
    true
}

/// Blank values clear optional fields.
fn set_optional(slot: &mut Option<String>, value: &str) -> bool {
    let next = if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    };
    if *slot == next {
        return false;
    }
    *slot = next;
    true
}

fn item_mut<'a, T>(list: &'a mut [T], name: &'static str, index: usize) -> Result<&'a mut T, EditError> {
    let len = list.len();
    list.get_mut(index).ok_or(EditError::OutOfRange {
        list: name,
        index,
        len,
    })
}

impl ResumeData {
    /// Writes `value` into the field named by `path`.
    ///
    /// Returns `Ok(false)` when the field already held `value`, so callers can
    /// skip recomputing layout on no-op edits.
    pub fn apply_edit(&mut self, path: &FieldPath, value: &str) -> Result<bool, EditError> {
        let changed = match *path {
            FieldPath::Summary => set_text(&mut self.summary, value),
            FieldPath::Personal(field) => {
                let info = &mut self.personal_info;
                match field {
                    PersonalField::Name => set_text(&mut info.name, value),
                    PersonalField::Headline => set_optional(&mut info.headline, value),
                    PersonalField::Email => set_optional(&mut info.email, value),
                    PersonalField::Phone => set_optional(&mut info.phone, value),
                    PersonalField::Location => set_optional(&mut info.location, value),
                    PersonalField::Linkedin => set_optional(&mut info.linkedin, value),
                    PersonalField::Github => set_optional(&mut info.github, value),
                    PersonalField::Website => set_optional(&mut info.website, value),
                }
            }
            FieldPath::Skill(i) => set_text(item_mut(&mut self.skills, "skills", i)?, value),
            FieldPath::Experience(i, field) => {
                let entry = item_mut(&mut self.experience, "experience", i)?;
                match field {
                    ExperienceField::Title => set_text(&mut entry.title, value),
                    ExperienceField::Company => set_text(&mut entry.company, value),
                    ExperienceField::Location => set_optional(&mut entry.location, value),
                    ExperienceField::StartDate => set_text(&mut entry.start_date, value),
                    ExperienceField::EndDate => set_optional(&mut entry.end_date, value),
                    ExperienceField::Bullet(j) => {
                        set_text(item_mut(&mut entry.bullets, "bullets", j)?, value)
                    }
                }
            }
            FieldPath::Education(i, field) => {
                let entry = item_mut(&mut self.education, "education", i)?;
                match field {
                    EducationField::Institution => set_text(&mut entry.institution, value),
                    EducationField::Degree => set_text(&mut entry.degree, value),
                    EducationField::Field => set_optional(&mut entry.field, value),
                    EducationField::Location => set_optional(&mut entry.location, value),
                    EducationField::StartDate => set_optional(&mut entry.start_date, value),
                    EducationField::EndDate => set_optional(&mut entry.end_date, value),
                    EducationField::Gpa => set_optional(&mut entry.gpa, value),
                    EducationField::Description => set_optional(&mut entry.description, value),
                }
            }
            FieldPath::Project(i, field) => {
                let entry = item_mut(&mut self.projects, "projects", i)?;
                match field {
                    ProjectField::Name => set_text(&mut entry.name, value),
                    ProjectField::Description => set_optional(&mut entry.description, value),
                    ProjectField::Url => set_optional(&mut entry.url, value),
                }
            }
            FieldPath::Certification(i, field) => {
                let entry = item_mut(&mut self.certifications, "certifications", i)?;
                match field {
                    CertificationField::Name => set_text(&mut entry.name, value),
                    CertificationField::Issuer => set_optional(&mut entry.issuer, value),
                    CertificationField::Date => set_optional(&mut entry.date, value),
                }
            }
            FieldPath::Language(i, field) => {
                let entry = item_mut(&mut self.languages, "languages", i)?;
                match field {
                    LanguageField::Name => set_text(&mut entry.name, value),
                    LanguageField::Proficiency => set_optional(&mut entry.proficiency, value),
                }
            }
        };
        Ok(changed)
    }
}

//! Render output model shared by all templates.
//!
//! A `Document` is fully resolved: every `Text` already carries the point
//! size its role maps to under the active StyleConfig, so serializers never
//! see the StyleConfig itself.

use serde::Serialize;

use crate::layout::font_metrics::{FontFamily, PageSize};
use crate::layout::style::StyleConfig;
use crate::models::edit::FieldPath;
use crate::models::resume::{SectionKind, Template};

/// Visual role of a text run; each maps to one StyleConfig size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    Name,
    SectionTitle,
    EntryTitle,
    Detail,
}

impl TextRole {
    pub fn size(&self, style: &StyleConfig) -> f32 {
        match self {
            TextRole::Name => style.name_size,
            TextRole::SectionTitle => style.section_title_size,
            TextRole::EntryTitle => style.entry_title_size,
            TextRole::Detail => style.detail_size,
        }
    }
}

/// Per-render switches supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderOptions {
    /// Tag text runs with their `FieldPath` so the editor can map clicks
    /// back to fields.
    pub editable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub content: String,
    pub role: TextRole,
    pub size_pt: f32,
    pub bold: bool,
    pub italic: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl Text {
    pub fn new(content: impl Into<String>, role: TextRole, style: &StyleConfig) -> Self {
        Self {
            content: content.into(),
            role,
            size_pt: role.size(style),
            bold: false,
            italic: false,
            field: None,
            href: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Attaches the edit path when the render is editable.
    pub fn field(mut self, path: FieldPath, options: RenderOptions) -> Self {
        if options.editable {
            self.field = Some(path.to_string());
        }
        self
    }

    pub fn link(mut self, href: Option<&str>) -> Self {
        self.href = href
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(str::to_string);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderBlock {
    pub name: Text,
    pub headline: Option<Text>,
    pub contacts: Vec<Text>,
    pub photo_url: Option<String>,
    pub centered: bool,
}

/// How inline item lists (skills) are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStyle {
    CommaSeparated,
    Chips,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryBlock {
    pub heading: Vec<Text>,
    pub meta: Vec<Text>,
    pub paragraphs: Vec<Text>,
    pub bullets: Vec<Text>,
    pub items: Vec<Text>,
    pub margin_bottom: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionBlock {
    pub kind: SectionKind,
    pub title: Text,
    pub entries: Vec<EntryBlock>,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub bullet_margin_bottom: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub width_percent: f32,
    pub sections: Vec<SectionBlock>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Padding {
    pub top: f32,
    pub bottom: f32,
    pub side: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub template: Template,
    pub page: PageSize,
    pub font_family: FontFamily,
    pub accent_color: String,
    pub line_height: f32,
    pub padding: Padding,
    pub title_rule: bool,
    pub item_style: ItemStyle,
    pub header: HeaderBlock,
    pub columns: Vec<Column>,
}

#[cfg(test)]
impl Document {
    /// Rendered section kinds, column by column.
    pub fn section_kinds(&self) -> Vec<SectionKind> {
        self.columns
            .iter()
            .flat_map(|c| c.sections.iter().map(|s| s.kind))
            .collect()
    }

    pub fn section(&self, kind: SectionKind) -> Option<&SectionBlock> {
        self.columns
            .iter()
            .flat_map(|c| c.sections.iter())
            .find(|s| s.kind == kind)
    }

    /// Every text run in the document, header first.
    pub fn texts(&self) -> Vec<&Text> {
        let mut out: Vec<&Text> = vec![&self.header.name];
        out.extend(self.header.headline.iter());
        out.extend(self.header.contacts.iter());
        for section in self.columns.iter().flat_map(|c| c.sections.iter()) {
            out.push(&section.title);
            for entry in &section.entries {
                out.extend(entry.heading.iter());
                out.extend(entry.meta.iter());
                out.extend(entry.paragraphs.iter());
                out.extend(entry.bullets.iter());
                out.extend(entry.items.iter());
            }
        }
        out
    }
}

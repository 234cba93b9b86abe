//! Template renderers.
//!
//! A renderer is a pure view: `(ResumeData, StyleConfig)` in, `Document`
//! out. It never measures or resizes anything; all sizing decisions were made
//! by the style solver before it runs.

pub mod document;
pub mod harvard;
pub mod html;
pub mod modern;
pub mod sections;
pub mod simple;

pub use document::{Document, RenderOptions};
pub use harvard::HarvardTemplate;
pub use modern::ModernTemplate;
pub use simple::SimpleTemplate;

use crate::layout::font_metrics::{FontFamily, PageSize};
use crate::layout::style::StyleConfig;
use crate::models::resume::{ResumeData, Template};
use document::{Column, ItemStyle, Padding};
use sections::{build_header, SectionContext};

pub trait TemplateRenderer: Send + Sync {
    fn template(&self) -> Template;

    fn render(
        &self,
        data: &ResumeData,
        style: &StyleConfig,
        page: PageSize,
        options: RenderOptions,
    ) -> Document;
}

pub fn renderer_for(template: Template) -> &'static dyn TemplateRenderer {
    match template {
        Template::Simple => &SimpleTemplate,
        Template::Harvard => &HarvardTemplate,
        Template::Modern => &ModernTemplate,
    }
}

/// Renders `data` with the template it selects.
pub fn render_document(
    data: &ResumeData,
    style: &StyleConfig,
    page: PageSize,
    options: RenderOptions,
) -> Document {
    renderer_for(data.template).render(data, style, page, options)
}

/// Page-level appearance a template fixes.
pub(crate) struct Frame {
    pub template: Template,
    pub font_family: FontFamily,
    pub default_accent: &'static str,
    pub title_rule: bool,
    pub item_style: ItemStyle,
}

pub(crate) fn assemble(
    frame: Frame,
    ctx: &SectionContext<'_>,
    page: PageSize,
    columns: Vec<Column>,
) -> Document {
    let style = ctx.style;
    Document {
        template: frame.template,
        page,
        font_family: frame.font_family,
        accent_color: resolve_accent(ctx.data.accent_color.as_deref(), frame.default_accent),
        line_height: style.line_height,
        padding: Padding {
            top: style.page_padding_top,
            bottom: style.page_padding_bottom,
            side: style.page_padding_side,
        },
        title_rule: frame.title_rule,
        item_style: frame.item_style,
        header: build_header(ctx),
        columns,
    }
}

/// Accepts `#rgb` / `#rrggbb` only; anything else falls back to the
/// template default so the value is always safe to inline into CSS.
fn resolve_accent(requested: Option<&str>, default: &str) -> String {
    match requested.map(str::trim) {
        Some(c)
            if c.starts_with('#')
                && matches!(c.len(), 4 | 7)
                && c[1..].chars().all(|ch| ch.is_ascii_hexdigit()) =>
        {
            c.to_ascii_lowercase()
        }
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::LayoutProfile;
    use crate::layout::style::calculate_style_config;
    use crate::models::fixtures;
    use crate::models::resume::SectionKind;
    use super::document::TextRole;

    const TEMPLATES: [Template; 3] = [Template::Simple, Template::Harvard, Template::Modern];

    fn render_with(data: &ResumeData, template: Template) -> Document {
        let style = calculate_style_config(data, &LayoutProfile::default()).style;
        renderer_for(template).render(data, &style, PageSize::Letter, RenderOptions::default())
    }

    #[test]
    fn test_renderer_for_dispatches_by_template() {
        for template in TEMPLATES {
            assert_eq!(renderer_for(template).template(), template);
            let doc = render_with(&fixtures::light_resume(), template);
            assert_eq!(doc.template, template);
        }
    }

    #[test]
    fn test_light_resume_renders_no_empty_sections() {
        let data = fixtures::light_resume();
        for template in TEMPLATES {
            let doc = render_with(&data, template);
            let mut kinds = doc.section_kinds();
            kinds.sort_by_key(|k| SectionKind::ALL.iter().position(|a| a == k));
            assert_eq!(
                kinds,
                vec![SectionKind::Summary, SectionKind::Experience],
                "{template:?}"
            );
        }
    }

    #[test]
    fn test_full_resume_renders_every_section_once() {
        let data = fixtures::full_resume();
        for template in TEMPLATES {
            let kinds = render_with(&data, template).section_kinds();
            assert_eq!(kinds.len(), SectionKind::ALL.len(), "{template:?}");
            for kind in SectionKind::ALL {
                assert!(kinds.contains(&kind), "{template:?} missing {kind:?}");
            }
        }
    }

    #[test]
    fn test_text_sizes_come_from_style() {
        let data = fixtures::full_resume();
        let style = calculate_style_config(&data, &LayoutProfile::default()).style;
        for template in TEMPLATES {
            let doc = renderer_for(template).render(
                &data,
                &style,
                PageSize::Letter,
                RenderOptions::default(),
            );
            for text in doc.texts() {
                assert_eq!(text.size_pt, text.role.size(&style), "{template:?}");
            }
            assert_eq!(doc.header.name.size_pt, style.name_size);
            assert_eq!(doc.line_height, style.line_height);
        }
    }

    #[test]
    fn test_switching_template_keeps_sizes() {
        let mut data = fixtures::heavy_resume();
        let sizes = |doc: &Document, role: TextRole| -> Vec<f32> {
            doc.texts()
                .into_iter()
                .filter(|t| t.role == role)
                .map(|t| t.size_pt)
                .collect()
        };
        data.template = Template::Simple;
        let simple = render_document(
            &data,
            &calculate_style_config(&data, &LayoutProfile::default()).style,
            PageSize::Letter,
            RenderOptions::default(),
        );
        data.template = Template::Modern;
        let modern = render_document(
            &data,
            &calculate_style_config(&data, &LayoutProfile::default()).style,
            PageSize::Letter,
            RenderOptions::default(),
        );
        assert_eq!(modern.template, Template::Modern);
        assert_eq!(
            sizes(&simple, TextRole::Detail)[0],
            sizes(&modern, TextRole::Detail)[0]
        );
        assert_eq!(simple.header.name.size_pt, modern.header.name.size_pt);
    }

    #[test]
    fn test_resolve_accent_rejects_non_hex() {
        assert_eq!(resolve_accent(Some("#1D4ED8"), "#000"), "#1d4ed8");
        assert_eq!(resolve_accent(Some("#abc"), "#000"), "#abc");
        assert_eq!(resolve_accent(Some("red;}body{x"), "#000"), "#000");
        assert_eq!(resolve_accent(Some("#12345g"), "#000"), "#000");
        assert_eq!(resolve_accent(None, "#000"), "#000");
    }
}

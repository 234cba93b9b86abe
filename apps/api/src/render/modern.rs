use crate::layout::font_metrics::{FontFamily, PageSize};
use crate::layout::style::StyleConfig;
use crate::models::resume::{ResumeData, SectionKind, Template};
use crate::render::document::{Column, Document, ItemStyle, RenderOptions};
use crate::render::sections::{build_sections, Recipe, SectionContext};
use crate::render::{assemble, Frame, TemplateRenderer};

/// Skills sit right under the summary so they are seen first.
const ORDER: [SectionKind; 7] = [
    SectionKind::Summary,
    SectionKind::Skills,
    SectionKind::Experience,
    SectionKind::Projects,
    SectionKind::Education,
    SectionKind::Certifications,
    SectionKind::Languages,
];

/// Sans-serif, left-aligned header with optional photo, accent-coloured
/// section titles and skill chips.
pub struct ModernTemplate;

impl TemplateRenderer for ModernTemplate {
    fn template(&self) -> Template {
        Template::Modern
    }

    fn render(
        &self,
        data: &ResumeData,
        style: &StyleConfig,
        page: PageSize,
        options: RenderOptions,
    ) -> Document {
        let ctx = SectionContext {
            data,
            style,
            options,
            recipe: Recipe {
                uppercase_titles: false,
                company_first: false,
                centered_header: false,
                show_photo: true,
            },
        };
        let column = Column {
            width_percent: 100.0,
            sections: build_sections(&ORDER, &ctx),
        };
        assemble(
            Frame {
                template: self.template(),
                font_family: FontFamily::Helvetica,
                default_accent: "#2563eb",
                title_rule: false,
                item_style: ItemStyle::Chips,
            },
            &ctx,
            page,
            vec![column],
        )
    }
}

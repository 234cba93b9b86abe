use crate::layout::font_metrics::{FontFamily, PageSize};
use crate::layout::style::StyleConfig;
use crate::models::resume::{ResumeData, SectionKind, Template};
use crate::render::document::{Column, Document, ItemStyle, RenderOptions};
use crate::render::sections::{build_sections, Recipe, SectionContext};
use crate::render::{assemble, Frame, TemplateRenderer};

const ORDER: [SectionKind; 7] = [
    SectionKind::Summary,
    SectionKind::Experience,
    SectionKind::Education,
    SectionKind::Projects,
    SectionKind::Certifications,
    SectionKind::Skills,
    SectionKind::Languages,
];

/// Serif, single column, centred header, ruled section titles.
pub struct SimpleTemplate;

impl TemplateRenderer for SimpleTemplate {
    fn template(&self) -> Template {
        Template::Simple
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
                centered_header: true,
                show_photo: false,
            },
        };
        let column = Column {
            width_percent: 100.0,
            sections: build_sections(&ORDER, &ctx),
        };
        assemble(
            Frame {
                template: self.template(),
                font_family: FontFamily::Times,
                default_accent: "#111827",
                title_rule: true,
                item_style: ItemStyle::CommaSeparated,
            },
            &ctx,
            page,
            vec![column],
        )
    }
}

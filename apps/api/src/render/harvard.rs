use crate::layout::font_metrics::{FontFamily, PageSize};
use crate::layout::style::StyleConfig;
use crate::models::resume::{ResumeData, SectionKind, Template};
use crate::render::document::{Column, Document, ItemStyle, RenderOptions};
use crate::render::sections::{build_sections, Recipe, SectionContext};
use crate::render::{assemble, Frame, TemplateRenderer};

const MAIN: [SectionKind; 4] = [
    SectionKind::Summary,
    SectionKind::Education,
    SectionKind::Experience,
    SectionKind::Projects,
];

const SIDEBAR: [SectionKind; 3] = [
    SectionKind::Skills,
    SectionKind::Certifications,
    SectionKind::Languages,
];

const MAIN_WIDTH_PERCENT: f32 = 68.0;

/// Serif, education-first main column with a sidebar for skills,
/// certifications and languages. Experience entries lead with the employer.
pub struct HarvardTemplate;

impl TemplateRenderer for HarvardTemplate {
    fn template(&self) -> Template {
        Template::Harvard
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
                uppercase_titles: true,
                company_first: true,
                centered_header: true,
                show_photo: false,
            },
        };

        let main = build_sections(&MAIN, &ctx);
        let sidebar = build_sections(&SIDEBAR, &ctx);

        // Collapse to one full-width column when either side is empty.
        let columns = match (main.is_empty(), sidebar.is_empty()) {
            (false, false) => vec![
                Column {
                    width_percent: MAIN_WIDTH_PERCENT,
                    sections: main,
                },
                Column {
                    width_percent: 100.0 - MAIN_WIDTH_PERCENT,
                    sections: sidebar,
                },
            ],
            (true, false) => vec![Column {
                width_percent: 100.0,
                sections: sidebar,
            }],
            _ => vec![Column {
                width_percent: 100.0,
                sections: main,
            }],
        };

        assemble(
            Frame {
                template: self.template(),
                font_family: FontFamily::Times,
                default_accent: "#7f1d1d",
                title_rule: true,
                item_style: ItemStyle::CommaSeparated,
            },
            &ctx,
            page,
            columns,
        )
    }
}

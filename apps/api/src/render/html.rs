//! Standalone HTML serialization of a rendered `Document`.
//!
//! Output is a single page with inline styles only, so it prints the same in
//! any browser-based PDF pipeline. All user text and attribute values are
//! escaped; links are limited to web, mail and phone schemes.

use crate::layout::estimator::BULLET_INDENT_PT;
use crate::models::resume::Template;
use crate::render::document::{
    Document, EntryBlock, HeaderBlock, ItemStyle, SectionBlock, Text,
};

const COLUMN_GAP_PT: f32 = 18.0;
const PHOTO_SIZE_PT: f32 = 64.0;
const META_SEPARATOR: &str = " · ";

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Normalizes a user-supplied link. Bare domains get `https://`; any other
/// explicit scheme than http(s), mailto or tel is dropped.
pub fn safe_href(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let lower = raw.to_ascii_lowercase();
    const ALLOWED: [&str; 4] = ["http://", "https://", "mailto:", "tel:"];
    if ALLOWED.iter().any(|scheme| lower.starts_with(scheme)) {
        return Some(raw.to_string());
    }
    let scheme_end = raw.find(':');
    let path_start = raw.find('/');
    match (scheme_end, path_start) {
        (Some(colon), Some(slash)) if colon < slash => None,
        (Some(_), None) => None,
        _ => Some(format!("https://{raw}")),
    }
}

fn template_class(template: Template) -> &'static str {
    match template {
        Template::Simple => "simple",
        Template::Harvard => "harvard",
        Template::Modern => "modern",
    }
}

fn text_html(text: &Text) -> String {
    let mut style = format!("font-size:{}pt", text.size_pt);
    if text.bold {
        style.push_str(";font-weight:700");
    }
    if text.italic {
        style.push_str(";font-style:italic");
    }
    let field = text
        .field
        .as_deref()
        .map(|f| format!(" data-field=\"{}\"", escape(f)))
        .unwrap_or_default();
    let body = escape(&text.content);

    match text.href.as_deref().and_then(safe_href) {
        Some(href) => format!(
            "<a href=\"{}\" style=\"{style};color:inherit;text-decoration:none\"{field}>{body}</a>",
            escape(&href)
        ),
        None => format!("<span style=\"{style}\"{field}>{body}</span>"),
    }
}

fn join_texts(texts: &[Text], separator: &str) -> String {
    texts
        .iter()
        .map(text_html)
        .collect::<Vec<_>>()
        .join(&escape(separator))
}

fn header_html(header: &HeaderBlock) -> String {
    let align = if header.centered { "center" } else { "left" };
    let mut out = format!(
        "<header style=\"display:flex;align-items:center;gap:12pt;justify-content:{}\">",
        if header.centered { "center" } else { "flex-start" }
    );

    let photo = header
        .photo_url
        .as_deref()
        .and_then(safe_href)
        .filter(|h| h.starts_with("http"));
    if let Some(src) = photo {
        out.push_str(&format!(
            "<img src=\"{}\" alt=\"\" style=\"width:{PHOTO_SIZE_PT}pt;height:{PHOTO_SIZE_PT}pt;border-radius:50%;object-fit:cover\">",
            escape(&src)
        ));
    }

    out.push_str(&format!("<div style=\"text-align:{align}\">"));
    out.push_str(&format!(
        "<h1 style=\"margin:0;font-weight:700\">{}</h1>",
        text_html(&header.name)
    ));
    if let Some(headline) = &header.headline {
        out.push_str(&format!("<div>{}</div>", text_html(headline)));
    }
    if !header.contacts.is_empty() {
        out.push_str(&format!(
            "<div class=\"contacts\">{}</div>",
            join_texts(&header.contacts, META_SEPARATOR)
        ));
    }
    out.push_str("</div></header>");
    out
}

fn entry_html(entry: &EntryBlock, doc: &Document, bullet_margin_bottom: f32) -> String {
    let mut out = format!(
        "<div class=\"entry\" style=\"margin-bottom:{}pt\">",
        entry.margin_bottom
    );
    if !entry.heading.is_empty() {
        out.push_str(&format!(
            "<div class=\"entry-heading\">{}</div>",
            join_texts(&entry.heading, " ")
        ));
    }
    if !entry.meta.is_empty() {
        out.push_str(&format!(
            "<div class=\"entry-meta\">{}</div>",
            join_texts(&entry.meta, META_SEPARATOR)
        ));
    }
    for paragraph in &entry.paragraphs {
        out.push_str(&format!("<p style=\"margin:0\">{}</p>", text_html(paragraph)));
    }
    if !entry.bullets.is_empty() {
        out.push_str(&format!(
            "<ul style=\"margin:0;padding-left:{BULLET_INDENT_PT}pt\">"
        ));
        for bullet in &entry.bullets {
            out.push_str(&format!(
                "<li style=\"margin-bottom:{bullet_margin_bottom}pt\">{}</li>",
                text_html(bullet)
            ));
        }
        out.push_str("</ul>");
    }
    if !entry.items.is_empty() {
        match doc.item_style {
            ItemStyle::CommaSeparated => out.push_str(&format!(
                "<p style=\"margin:0\">{}</p>",
                join_texts(&entry.items, ", ")
            )),
            ItemStyle::Chips => {
                out.push_str("<div style=\"display:flex;flex-wrap:wrap;gap:4pt\">");
                for item in &entry.items {
                    out.push_str(&format!(
                        "<span class=\"chip\" style=\"border:1px solid {};border-radius:3pt;padding:0 4pt\">{}</span>",
                        doc.accent_color,
                        text_html(item)
                    ));
                }
                out.push_str("</div>");
            }
        }
    }
    out.push_str("</div>");
    out
}

fn section_html(section: &SectionBlock, doc: &Document) -> String {
    let rule = if doc.title_rule {
        format!(";border-bottom:1px solid {}", doc.accent_color)
    } else {
        String::new()
    };
    let mut out = format!(
        "<section data-section=\"{}\" style=\"margin-top:{}pt;margin-bottom:{}pt\">",
        section.kind.title().to_ascii_lowercase(),
        section.margin_top,
        section.margin_bottom
    );
    out.push_str(&format!(
        "<h2 style=\"margin:0 0 {}pt 0;color:{}{rule}\">{}</h2>",
        section.margin_bottom,
        doc.accent_color,
        text_html(&section.title)
    ));
    for entry in &section.entries {
        out.push_str(&entry_html(entry, doc, section.bullet_margin_bottom));
    }
    out.push_str("</section>");
    out
}

/// Serializes `doc` to a complete HTML page.
pub fn to_html(doc: &Document) -> String {
    let page = doc.page;
    let mut out = String::with_capacity(16 * 1024);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!(
        "<title>{}</title>\n",
        escape(doc.header.name.content.trim())
    ));
    out.push_str(&format!(
        "<style>@page {{ size: {}; margin: 0; }} body {{ margin: 0; }}</style>\n",
        page.css_name()
    ));
    out.push_str("</head>\n<body>\n");

    out.push_str(&format!(
        "<main class=\"page template-{}\" style=\"width:{}pt;min-height:{}pt;box-sizing:border-box;padding:{}pt {}pt {}pt {}pt;font-family:{};line-height:{};color:#111827\">\n",
        template_class(doc.template),
        page.width_pt(),
        page.height_pt(),
        doc.padding.top,
        doc.padding.side,
        doc.padding.bottom,
        doc.padding.side,
        doc.font_family.css_stack(),
        doc.line_height
    ));
    out.push_str(&header_html(&doc.header));
    out.push('\n');

    let multi = doc.columns.len() > 1;
    if multi {
        out.push_str(&format!(
            "<div class=\"columns\" style=\"display:flex;gap:{COLUMN_GAP_PT}pt\">"
        ));
    }
    for column in &doc.columns {
        if multi {
            out.push_str(&format!(
                "<div class=\"column\" style=\"flex:0 0 calc({}% - {}pt)\">",
                column.width_percent,
                COLUMN_GAP_PT / 2.0
            ));
        }
        for section in &column.sections {
            out.push_str(&section_html(section, doc));
            out.push('\n');
        }
        if multi {
            out.push_str("</div>");
        }
    }
    if multi {
        out.push_str("</div>\n");
    }

    out.push_str("</main>\n</body>\n</html>\n");
    out
}

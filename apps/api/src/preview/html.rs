//! Standalone print page for a projected [`Page`]: US letter, serif, one
//! column, no scripts. Handed to the browser's print dialog as-is.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::preview::{Contact, EntryBlock, Page, SectionBody};

const PRINT_CSS: &str = "\
@page { size: letter; margin: 0.5in; }
body { font-family: 'Latin Modern Roman', 'Computer Modern', Georgia, serif; font-size: 10.5pt; line-height: 1.2; color: #000; margin: 0; }
main { max-width: 8.5in; margin: 0 auto; padding: 0.5in; }
header { text-align: center; margin-bottom: 12pt; }
h1 { font-size: 24pt; text-transform: uppercase; letter-spacing: 0.05em; margin: 0 0 4pt; }
.contacts { font-size: 9pt; }
.contacts a { color: inherit; text-decoration: none; }
h2 { font-size: 12pt; text-transform: uppercase; letter-spacing: 0.1em; border-bottom: 1px solid #000; margin: 12pt 0 4pt; }
.row { display: flex; justify-content: space-between; }
.title { font-weight: bold; }
.subtitle { font-style: italic; font-size: 10pt; }
.note { font-style: italic; font-weight: normal; }
ul { margin: 2pt 0 6pt 18pt; padding: 0; font-size: 9.5pt; }
.skills { font-size: 10pt; }
@media print { main { padding: 0; } }
";

pub fn render_print_html(page: &Page) -> String {
    let mut out = String::with_capacity(4096);
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", text(&page.header.name));
    let _ = writeln!(out, "<style>\n{PRINT_CSS}</style>\n</head>\n<body>\n<main>");

    render_header(&mut out, page);
    for section in &page.sections {
        let _ = writeln!(out, "<section>\n<h2>{}</h2>", text(section.title));
        match &section.body {
            SectionBody::Entries(entries) => {
                for entry in entries {
                    render_entry(&mut out, entry);
                }
            }
            SectionBody::Skills(lines) => {
                out.push_str("<div class=\"skills\">\n");
                for line in lines {
                    let _ = writeln!(
                        out,
                        "<div><b>{}:</b> {}</div>",
                        text(line.label),
                        text(&line.value)
                    );
                }
                out.push_str("</div>\n");
            }
        }
        out.push_str("</section>\n");
    }

    out.push_str("</main>\n</body>\n</html>\n");
    out
}

fn render_header(out: &mut String, page: &Page) {
    let _ = writeln!(out, "<header>\n<h1>{}</h1>", text(&page.header.name));
    let contacts: Vec<String> = page
        .header
        .contacts
        .iter()
        .map(|c| match c {
            Contact::Text { text: t } => text(t).into_owned(),
            Contact::Link { label, href } => {
                format!("<a href=\"{}\">{}</a>", attr(href), text(label))
            }
        })
        .collect();
    if !contacts.is_empty() {
        let _ = writeln!(out, "<div class=\"contacts\">{}</div>", contacts.join(" | "));
    }
    out.push_str("</header>\n");
}

fn render_entry(out: &mut String, entry: &EntryBlock) {
    out.push_str("<div class=\"entry\">\n<div class=\"row title\"><span>");
    out.push_str(&text(&entry.title));
    if let Some(note) = &entry.title_note {
        let _ = write!(out, " | <span class=\"note\">{}</span>", text(note));
    }
    let _ = writeln!(out, "</span><span>{}</span></div>", text(&entry.aside));

    if let Some(row) = &entry.subtitle {
        let _ = writeln!(
            out,
            "<div class=\"row subtitle\"><span>{}</span><span>{}</span></div>",
            text(&row.left),
            text(&row.right)
        );
    }

    if !entry.bullets.is_empty() {
        out.push_str("<ul>\n");
        for bullet in &entry.bullets {
            let _ = writeln!(out, "<li>{}</li>", text(bullet));
        }
        out.push_str("</ul>\n");
    }
    out.push_str("</div>\n");
}

use crate::models::{Document, HeaderField};
use crate::utils::colors::{GREY, RESET, color_for_optional_field};
use crate::utils::formatting::{bold, pad_right};
use crate::utils::table::{Column, Table};

const EMPTY: &str = "--";

fn or_placeholder(s: &str) -> &str {
    if s.trim().is_empty() { EMPTY } else { s }
}

fn header_block(doc: &Document) -> String {
    let mut out = String::new();
    let label_w = HeaderField::ALL
        .iter()
        .map(|f| f.label().len())
        .max()
        .unwrap_or(10);

    for field in HeaderField::ALL {
        let value = doc.header.get(field);
        out.push_str(&format!(
            "  {} : {}{}{}\n",
            pad_right(field.label(), label_w),
            color_for_optional_field(Some(value)),
            or_placeholder(value),
            RESET
        ));
    }
    out
}

/// Plain-text rendering of the report for the terminal.
pub fn render_text(doc: &Document) -> String {
    let mut out = String::new();

    out.push_str(&bold("Photo delivery report"));
    out.push('\n');
    out.push_str(&header_block(doc));

    for (i, page) in doc.pages.iter().enumerate() {
        out.push('\n');
        out.push_str(&bold(&format!(
            "Page {} [{}] {}",
            i,
            page.id,
            or_placeholder(&page.main_title)
        )));
        out.push('\n');

        let mut table = Table::new(vec![
            Column::new("#", 3),
            Column::new("Caption", 20),
            Column::new("Image", 5),
        ]);

        for (k, ph) in page.photos.iter().enumerate() {
            let image = if ph.has_image() {
                "yes".to_string()
            } else {
                format!("{GREY}no{RESET}")
            };
            table.add_row(vec![
                k.to_string(),
                or_placeholder(&ph.caption).to_string(),
                image,
            ]);
        }
        out.push_str(&table.render());
    }

    out
}

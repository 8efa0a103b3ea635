// src/export/pdf_export.rs

use crate::core::upload::decode_data_url;
use crate::errors::{AppError, AppResult};
use crate::export::jpeg::jpeg_info;
use crate::export::notify_export_success;
use crate::export::pdf::{CellImage, PdfManager, PhotoCell};
use crate::models::{Document, HeaderField, Photo};
use crate::ui::messages::info;
use std::io;
use std::path::Path;

fn cell_image(photo: &Photo) -> Option<CellImage> {
    let url = photo.image_url.as_deref()?;
    let Some((mime, data)) = decode_data_url(url) else {
        return Some(CellImage::Unsupported("unreadable".into()));
    };

    match jpeg_info(&data) {
        Some(info) => Some(CellImage::Jpeg { data, info }),
        None => Some(CellImage::Unsupported(mime)),
    }
}

fn header_fields(doc: &Document) -> Vec<(&'static str, String)> {
    HeaderField::ALL
        .iter()
        .map(|f| (f.label(), doc.header.get(*f).to_string()))
        .collect()
}

/// Lay the report out as a PDF document, one PDF page per report page.
pub(crate) fn render_pdf(doc: &Document) -> PdfManager {
    let mut pdf = PdfManager::new();
    let total = doc.pages.len();
    let fields = header_fields(doc);

    for (i, page) in doc.pages.iter().enumerate() {
        let cells: Vec<PhotoCell> = page
            .photos
            .iter()
            .map(|ph| PhotoCell {
                caption: ph.caption.clone(),
                image: cell_image(ph),
            })
            .collect();

        let header = if i == 0 { Some(fields.as_slice()) } else { None };
        pdf.write_report_page(i + 1, total, header, &page.main_title, &cells);
    }

    pdf
}

/// Export PDF using PdfManager.
pub(crate) fn export_pdf(doc: &Document, path: &Path) -> AppResult<()> {
    info(format!("Printing report to PDF: {}", path.display()));

    let pdf = render_pdf(doc);
    let pages = pdf.page_count();

    pdf.save(path)
        .map_err(|e| AppError::from(io::Error::other(format!("PDF export error: {e}"))))?;

    notify_export_success(&format!("PDF ({pages} pages)"), path);
    Ok(())
}

//! Editing actions on the report.
//!
//! Each action takes the current document and returns the next one; the
//! input is never modified, so a failed action leaves nothing half applied.

use crate::errors::InputError;
use crate::models::{Document, HeaderField, NEW_PAGE_SLOTS, Page};

pub fn edit_header(doc: &Document, field: HeaderField, value: &str) -> Document {
    let mut next = doc.clone();
    next.header.set(field, value.to_string());
    next
}

/// Replace the title of a page. Out of range → unchanged copy.
pub fn edit_page_title(doc: &Document, page: usize, value: &str) -> Document {
    let mut next = doc.clone();
    if let Some(p) = next.pages.get_mut(page) {
        p.main_title = value.to_string();
    }
    next
}

/// Replace a caption. Out of range (page or photo) → unchanged copy.
pub fn edit_caption(doc: &Document, page: usize, photo: usize, value: &str) -> Document {
    let mut next = doc.clone();
    if let Some(ph) = next.photo_mut(page, photo) {
        ph.caption = value.to_string();
    }
    next
}

/// Coordinate of the cell a caption is copied from.
///
/// The cell before `(page, 0)` is the last cell of the previous page.
pub fn previous_cell(doc: &Document, page: usize, photo: usize) -> Result<(usize, usize), InputError> {
    if photo > 0 {
        return Ok((page, photo - 1));
    }
    if page == 0 {
        return Err(InputError::NoPreviousCell);
    }
    let prev = page - 1;
    match doc.pages.get(prev).map(|p| p.photos.len()) {
        Some(len) if len > 0 => Ok((prev, len - 1)),
        _ => Err(InputError::NoPreviousCell),
    }
}

pub fn copy_caption_from_previous(
    doc: &Document,
    page: usize,
    photo: usize,
) -> Result<Document, InputError> {
    let (src_page, src_photo) = previous_cell(doc, page, photo)?;

    let source = doc
        .photo(src_page, src_photo)
        .map(|ph| ph.caption.as_str())
        .unwrap_or_default();
    if source.is_empty() {
        return Err(InputError::SourceEmpty);
    }

    Ok(edit_caption(doc, page, photo, source))
}

pub fn copy_title_from_previous(doc: &Document, page: usize) -> Result<Document, InputError> {
    if page == 0 {
        return Err(InputError::NoPreviousPage);
    }

    let source = doc
        .page(page - 1)
        .map(|p| p.main_title.as_str())
        .unwrap_or_default();
    if source.is_empty() {
        return Err(InputError::SourceEmpty);
    }

    Ok(edit_page_title(doc, page, source))
}

/// Attach a loaded image preview.
///
/// Loading completes asynchronously, so the page may be gone by then: the
/// image is only set when both indices are still valid.
pub fn set_photo_image(doc: &Document, page: usize, photo: usize, data_url: String) -> Document {
    let mut next = doc.clone();
    if let Some(ph) = next.photo_mut(page, photo) {
        ph.image_url = Some(data_url);
    }
    next
}

pub fn add_page(doc: &Document) -> Document {
    let mut next = doc.clone();
    let id = doc.next_page_id();
    next.pages.push(Page::empty(id, NEW_PAGE_SLOTS));
    next
}

/// Remove a page. Remaining ids are kept as they are.
pub fn remove_page(doc: &Document, page: usize) -> Document {
    let mut next = doc.clone();
    if page < next.pages.len() {
        next.pages.remove(page);
    }
    next
}

use crate::models::{Document, DocumentWire, Page, PageWire, Photo};

fn merge_page(local: Option<&Page>, remote: &PageWire) -> Page {
    let photos = remote
        .photos
        .iter()
        .enumerate()
        .map(|(k, rp)| Photo {
            caption: rp.caption.clone(),
            image_url: local
                .and_then(|p| p.photo(k))
                .and_then(|ph| ph.image_url.clone()),
        })
        .collect();

    Page {
        id: remote.id.clone(),
        main_title: remote.main_title.clone(),
        photos,
    }
}

/// Fold a remote snapshot into the local state.
///
/// The remote side decides text and shape (extra local pages or photos are
/// dropped); image previews survive at the same (page, photo) coordinate.
/// A snapshot with no pages yields the default first page, a document is
/// never left without pages.
pub fn merge_snapshot(local: &Document, remote: &DocumentWire) -> Document {
    if remote.pages.is_empty() {
        return Document {
            header: remote.header.clone(),
            pages: vec![Document::first_page()],
        };
    }

    let pages = remote
        .pages
        .iter()
        .enumerate()
        .map(|(i, rp)| merge_page(local.page(i), rp))
        .collect();

    Document {
        header: remote.header.clone(),
        pages,
    }
}

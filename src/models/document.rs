use super::header::Header;
use super::page::{FIRST_PAGE_SLOTS, Page, Photo};

/// The shared report: header plus ordered pages.
///
/// This is the full local state, including image previews that are never
/// persisted. Use [`super::wire::project`] to obtain the stored shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub header: Header,
    pub pages: Vec<Page>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            header: Header::default(),
            pages: vec![Self::first_page()],
        }
    }
}

impl Document {
    /// The page a document is created with (4 empty slots).
    pub fn first_page() -> Page {
        Page::empty("page-1", FIRST_PAGE_SLOTS)
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn photo(&self, page: usize, photo: usize) -> Option<&Photo> {
        self.pages.get(page)?.photos.get(photo)
    }

    pub fn photo_mut(&mut self, page: usize, photo: usize) -> Option<&mut Photo> {
        self.pages.get_mut(page)?.photos.get_mut(photo)
    }

    /// A page id not used by any existing page.
    ///
    /// Ids are opaque: they are never renumbered after a removal, so the
    /// next number is derived from the largest one still present. A stored
    /// id at `u64::MAX` falls back to the lowest free number.
    pub fn next_page_id(&self) -> String {
        let highest = self
            .pages
            .iter()
            .filter_map(Page::id_number)
            .max()
            .unwrap_or(0);
        if let Some(next) = highest.max(self.pages.len() as u64).checked_add(1) {
            return format!("page-{next}");
        }

        let mut n: u64 = 1;
        loop {
            let id = format!("page-{n}");
            if !self.pages.iter().any(|p| p.id == id) {
                return id;
            }
            n += 1;
        }
    }

    pub fn image_count(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|p| p.photos.iter())
            .filter(|ph| ph.has_image())
            .count()
    }
}

/// Photo slots of the page created together with the document.
pub const FIRST_PAGE_SLOTS: usize = 4;
/// Photo slots of every page appended afterwards.
pub const NEW_PAGE_SLOTS: usize = 6;

/// One photo cell.
///
/// `image_url` is a data URI held only by the client that loaded the file.
/// It has no counterpart in the persisted shape (see `models::wire`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Photo {
    pub caption: String,
    pub image_url: Option<String>,
}

impl Photo {
    pub fn has_image(&self) -> bool {
        self.image_url.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub id: String,
    pub main_title: String,
    pub photos: Vec<Photo>,
}

impl Page {
    /// Empty page with `slots` independently allocated photo cells.
    pub fn empty(id: impl Into<String>, slots: usize) -> Self {
        Self {
            id: id.into(),
            main_title: String::new(),
            photos: (0..slots).map(|_| Photo::default()).collect(),
        }
    }

    pub fn photo(&self, index: usize) -> Option<&Photo> {
        self.photos.get(index)
    }

    /// Numeric suffix of ids shaped like `page-N`.
    pub fn id_number(&self) -> Option<u64> {
        self.id.strip_prefix("page-")?.parse().ok()
    }
}

pub mod document;
pub mod header;
pub mod page;
pub mod wire;

pub use document::Document;
pub use header::{Header, HeaderField};
pub use page::{FIRST_PAGE_SLOTS, NEW_PAGE_SLOTS, Page, Photo};
pub use wire::{DocumentWire, PageWire, PhotoWire, project};

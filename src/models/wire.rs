//! Persisted shape of the report.
//!
//! These types are what the document store holds. Photos carry only their
//! caption: there is no image field to leak.

use super::document::Document;
use super::header::Header;
use super::page::Page;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhotoWire {
    pub caption: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageWire {
    pub id: String,
    pub main_title: String,
    pub photos: Vec<PhotoWire>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentWire {
    pub header: Header,
    pub pages: Vec<PageWire>,
}

impl DocumentWire {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

fn project_page(page: &Page) -> PageWire {
    PageWire {
        id: page.id.clone(),
        main_title: page.main_title.clone(),
        photos: page
            .photos
            .iter()
            .map(|ph| PhotoWire {
                caption: ph.caption.clone(),
            })
            .collect(),
    }
}

/// Strip every local-only field, producing the shape written to the store.
pub fn project(doc: &Document) -> DocumentWire {
    DocumentWire {
        header: doc.header.clone(),
        pages: doc.pages.iter().map(project_page).collect(),
    }
}

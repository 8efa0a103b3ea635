// src/export/json.rs

use crate::errors::AppResult;
use crate::export::notify_export_success;
use crate::models::{Document, project};
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Write the persisted shape of the report, pretty-printed.
///
/// Image previews are local-only and therefore never part of the file.
pub(crate) fn export_json(doc: &Document, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = project(doc).to_json_pretty()?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

// src/export/logic.rs

use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json::export_json;
use crate::export::pdf_export::export_pdf;
use crate::models::Document;
use std::path::Path;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the report.
    ///
    /// - `format`: "json" (persisted shape) | "pdf" (printable report)
    /// - `path`: output file
    /// - `force`: overwrite without asking
    pub fn export(doc: &Document, format: ExportFormat, path: &Path, force: bool) -> AppResult<()> {
        ensure_writable(path, force)?;

        match format {
            ExportFormat::Json => export_json(doc, path)?,
            ExportFormat::Pdf => export_pdf(doc, path)?,
        }

        Ok(())
    }
}

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::actions::set_photo_image;
use crate::core::report::ReportLogic;
use crate::core::upload::load_image;
use crate::errors::{AppError, AppResult};
use crate::export::{ExportFormat, ExportLogic};
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;
use std::path::{Path, PathBuf};

/// Parse `PAGE:PHOTO=path`.
pub fn parse_image_arg(arg: &str) -> AppResult<(usize, usize, PathBuf)> {
    let bad = || AppError::InvalidIndex(format!("image '{arg}' (expected PAGE:PHOTO=PATH)"));

    let (coord, path) = arg.split_once('=').ok_or_else(bad)?;
    let (page, photo) = coord.split_once(':').ok_or_else(bad)?;
    let page = page.trim().parse().map_err(|_| bad())?;
    let photo = photo.trim().parse().map_err(|_| bad())?;
    if path.is_empty() {
        return Err(bad());
    }
    Ok((page, photo, expand_tilde(path)))
}

/// Render the printable report. Images given on the command line are
/// attached to this rendering only and never saved.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Print {
        file,
        images,
        force,
    } = cmd
    {
        let mut engine = ReportLogic::open(cfg)?;
        engine.teardown();
        let mut doc = engine.document().clone();

        for arg in images {
            let (page, photo, path) = parse_image_arg(arg)?;
            if doc.photo(page, photo).is_none() {
                warning(format!(
                    "No cell at page {page}, photo {photo}: image {} ignored.",
                    path.display()
                ));
                continue;
            }
            let url = load_image(&path)?;
            doc = set_photo_image(&doc, page, photo, url);
        }

        ExportLogic::export(&doc, ExportFormat::Pdf, Path::new(file), *force)?;
    }
    Ok(())
}

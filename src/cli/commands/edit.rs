//! One-shot editing commands.
//!
//! Each command loads the shared report, applies a single action and
//! saves immediately, without waiting for the autosave delay.

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::actions;
use crate::core::report::ReportLogic;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Header { field, value } => {
            let value = ReportLogic::check_header_value(*field, value)?;
            ReportLogic::apply(cfg, |d| Ok(actions::edit_header(d, *field, &value)))?;
            success(format!("{} updated.", field.label()));
        }
        Commands::Title { page, value } => {
            let doc = ReportLogic::apply(cfg, |d| Ok(actions::edit_page_title(d, *page, value)))?;
            if *page < doc.pages.len() {
                success(format!("Title of page {} updated.", page));
            } else {
                missing_cell(doc.pages.len(), *page);
            }
        }
        Commands::Caption { page, photo, value } => {
            let doc =
                ReportLogic::apply(cfg, |d| Ok(actions::edit_caption(d, *page, *photo, value)))?;
            if doc.photo(*page, *photo).is_some() {
                success(format!("Caption of page {}, photo {} updated.", page, photo));
            } else {
                missing_cell(doc.pages.len(), *page);
            }
        }
        Commands::CopyCaption { page, photo } => {
            let doc = ReportLogic::apply(cfg, |d| {
                actions::copy_caption_from_previous(d, *page, *photo)
            })?;
            let caption = doc
                .photo(*page, *photo)
                .map(|ph| ph.caption.clone())
                .unwrap_or_default();
            success(format!("Caption copied: \"{}\".", caption));
        }
        Commands::CopyTitle { page } => {
            ReportLogic::apply(cfg, |d| actions::copy_title_from_previous(d, *page))?;
            success(format!("Title copied into page {}.", page));
        }
        Commands::AddPage => {
            let doc = ReportLogic::apply(cfg, |d| Ok(actions::add_page(d)))?;
            let last = doc.pages.len() - 1;
            success(format!(
                "Added page {} ({}) with {} photo slots.",
                last,
                doc.pages[last].id,
                doc.pages[last].photos.len()
            ));
        }
        Commands::RemovePage { page } => {
            let doc = ReportLogic::apply(cfg, |d| Ok(actions::remove_page(d, *page)))?;
            success(format!("Report now has {} page(s).", doc.pages.len()));
        }
        _ => {}
    }
    Ok(())
}

fn missing_cell(pages: usize, page: usize) {
    warning(format!(
        "No such cell on page {} (report has {} pages): nothing changed.",
        page, pages
    ));
}

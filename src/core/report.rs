//! High-level operations on the shared report, used by the one-shot
//! commands and by the interactive session.

use crate::config::Config;
use crate::core::sync::SyncEngine;
use crate::errors::{AppError, AppResult, InputError};
use crate::models::{Document, HeaderField};
use crate::store::{FileIdentity, SqliteStore};
use crate::ui::messages::alert;
use crate::utils::date::{parse_date, today};
use crate::utils::time::parse_time;
use std::time::Instant;

pub type ReportEngine = SyncEngine<SqliteStore>;

pub struct ReportLogic;

fn notice_title(err: &AppError) -> &'static str {
    match err {
        AppError::AuthFailure(_) => "Sign-in failed",
        AppError::SubscriptionFailure(_) => "Connection lost",
        AppError::WriteFailure(_) => "Save failed",
        AppError::UserInput(_) => "Check the report",
        _ => "Error",
    }
}

fn notice_operation(err: &AppError) -> Option<&'static str> {
    match err {
        AppError::AuthFailure(_) => Some("auth_failed"),
        AppError::SubscriptionFailure(_) => Some("subscription_failed"),
        // save failures are recorded by the store itself
        _ => None,
    }
}

impl ReportLogic {
    /// Open the store, sign in, subscribe and process the first snapshot.
    ///
    /// Never fails on backend errors: they are left as notices on the
    /// returned engine.
    pub fn connect(cfg: &Config) -> AppResult<ReportEngine> {
        let store = SqliteStore::open(&cfg.database)?;
        let mut identity = FileIdentity::new(&cfg.identity_file);

        let mut engine = SyncEngine::new(store, cfg.document_path.clone(), cfg.debounce());
        engine.start(&mut identity);
        engine.poll(Instant::now());
        Ok(engine)
    }

    /// Connect and require a successfully loaded report.
    pub fn open(cfg: &Config) -> AppResult<ReportEngine> {
        let mut engine = Self::connect(cfg)?;
        let notices = engine.take_notices();
        Self::surface(&engine, notices)?;

        if !engine.is_ready() {
            return Err(AppError::Other(format!(
                "report not loaded (state: {:?})",
                engine.state()
            )));
        }
        Ok(engine)
    }

    /// Apply a single action, save the result right away and disconnect.
    pub fn apply<F>(cfg: &Config, action: F) -> AppResult<Document>
    where
        F: FnOnce(&Document) -> Result<Document, InputError>,
    {
        let mut engine = Self::open(cfg)?;
        engine.update(Instant::now(), action)?;
        engine.flush();

        let notices = engine.take_notices();
        engine.teardown();
        Self::surface(&engine, notices)?;

        Ok(engine.document().clone())
    }

    fn record(engine: &ReportEngine, err: &AppError) {
        if let Some(op) = notice_operation(err) {
            engine
                .store()
                .record(op, engine.user_id().unwrap_or_default(), &err.to_string());
        }
    }

    /// Record notices and turn the first one into the command's error.
    pub fn surface(engine: &ReportEngine, notices: Vec<AppError>) -> AppResult<()> {
        for n in &notices {
            Self::record(engine, n);
        }
        match notices.into_iter().next() {
            Some(first) => Err(first),
            None => Ok(()),
        }
    }

    /// Show every queued notice as a blocking alert (session mode).
    pub fn show_notices(engine: &mut ReportEngine) {
        for n in engine.take_notices() {
            Self::record(engine, &n);
            alert(notice_title(&n), &n);
        }
    }

    /// Show a user-input or command error the same way as backend notices.
    pub fn show_error(err: &AppError) {
        alert(notice_title(err), err);
    }

    /// Date and times come from typed inputs: reject anything that is not
    /// `YYYY-MM-DD` / `HH:MM`. An empty value clears the field and `today`
    /// is accepted for the date.
    pub fn check_header_value(field: HeaderField, value: &str) -> AppResult<String> {
        let typed = value.trim();
        match field {
            _ if typed.is_empty() => Ok(String::new()),
            HeaderField::Date if typed.eq_ignore_ascii_case("today") => {
                Ok(today().format("%Y-%m-%d").to_string())
            }
            HeaderField::Date => parse_date(typed)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .ok_or_else(|| AppError::InvalidDate(typed.to_string())),
            HeaderField::EntryTime | HeaderField::ExitTime => parse_time(typed)
                .map(|t| t.format("%H:%M").to_string())
                .ok_or_else(|| AppError::InvalidTime(typed.to_string())),
            _ => Ok(value.to_string()),
        }
    }
}

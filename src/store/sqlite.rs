//! Document store backed by the `documents` table of the SQLite database.
//!
//! Every process opening the same file sees the same report. Changes are
//! detected through a per-path revision counter bumped on every write.

use super::{DocumentStore, Snapshot, SubscriptionId};
use crate::db::initialize::open_db;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::DocumentWire;
use crate::ui::messages::warning;
use chrono::Local;
use rusqlite::{OptionalExtension, params};
use std::collections::HashMap;

#[derive(Debug)]
struct SubState {
    path: String,
    last_revision: Option<i64>,
    primed: bool,
}

pub struct SqliteStore {
    pool: DbPool,
    subs: HashMap<SubscriptionId, SubState>,
    next_sub: u64,
}

/// Metadata of the stored row, shown by `show`.
#[derive(Debug, Clone)]
pub struct StoredMeta {
    pub revision: i64,
    pub updated_by: String,
    pub updated_at: String,
}

impl SqliteStore {
    /// Open (and migrate) the database at `db_path`.
    pub fn open(db_path: &str) -> AppResult<Self> {
        let pool = open_db(db_path)?;
        Ok(Self {
            pool,
            subs: HashMap::new(),
            next_sub: 1,
        })
    }

    /// Read the stored row without going through a subscription.
    pub fn read(&self, path: &str) -> AppResult<Option<(DocumentWire, StoredMeta)>> {
        let row: Option<(String, i64, String, String)> = self
            .pool
            .conn
            .query_row(
                "SELECT body, revision, updated_by, updated_at FROM documents WHERE path = ?1",
                [path],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
            )
            .optional()?;

        match row {
            None => Ok(None),
            Some((body, revision, updated_by, updated_at)) => {
                let doc = DocumentWire::from_json(&body)?;
                Ok(Some((
                    doc,
                    StoredMeta {
                        revision,
                        updated_by,
                        updated_at,
                    },
                )))
            }
        }
    }

    /// Append a line to the internal log. Failures are only reported.
    pub fn record(&self, operation: &str, target: &str, message: &str) {
        if let Err(e) = ttlog(&self.pool.conn, operation, target, message) {
            warning(format!("Failed to write internal log: {}", e));
        }
    }
}

impl DocumentStore for SqliteStore {
    fn subscribe(&mut self, path: &str) -> AppResult<SubscriptionId> {
        let id = SubscriptionId(self.next_sub);
        self.next_sub += 1;
        self.subs.insert(
            id,
            SubState {
                path: path.to_string(),
                last_revision: None,
                primed: false,
            },
        );
        Ok(id)
    }

    fn poll(&mut self, sub: SubscriptionId) -> AppResult<Vec<Snapshot>> {
        let path = match self.subs.get(&sub) {
            Some(s) => s.path.clone(),
            None => {
                return Err(AppError::SubscriptionFailure(format!(
                    "unknown subscription {}",
                    sub.0
                )));
            }
        };

        let row: Option<(String, i64)> = self
            .pool
            .conn
            .query_row(
                "SELECT body, revision FROM documents WHERE path = ?1",
                [&path],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .optional()?;

        let Some(state) = self.subs.get_mut(&sub) else {
            return Ok(Vec::new());
        };

        match row {
            None if !state.primed => {
                state.primed = true;
                Ok(vec![Snapshot::Missing])
            }
            None => Ok(Vec::new()),
            Some((body, revision)) if state.last_revision != Some(revision) => {
                state.primed = true;
                state.last_revision = Some(revision);
                let doc = DocumentWire::from_json(&body)?;
                Ok(vec![Snapshot::Present(doc)])
            }
            Some(_) => Ok(Vec::new()),
        }
    }

    fn unsubscribe(&mut self, sub: SubscriptionId) {
        self.subs.remove(&sub);
    }

    fn write(&mut self, path: &str, doc: &DocumentWire, author: &str) -> AppResult<()> {
        let body = doc.to_json()?;
        let now = Local::now().to_rfc3339();

        let result = self.pool.conn.execute(
            r#"
            INSERT INTO documents (path, body, revision, updated_by, updated_at)
            VALUES (?1, ?2, 1, ?3, ?4)
            ON CONFLICT(path) DO UPDATE SET
                body       = excluded.body,
                revision   = documents.revision + 1,
                updated_by = excluded.updated_by,
                updated_at = excluded.updated_at
            "#,
            params![path, body, author, now],
        );

        match result {
            Ok(_) => {
                let revision: i64 = self.pool.conn.query_row(
                    "SELECT revision FROM documents WHERE path = ?1",
                    [path],
                    |r| r.get(0),
                )?;
                let operation = if revision == 1 { "create" } else { "save" };
                self.record(
                    operation,
                    path,
                    &format!(
                        "Report r{} written by {} ({} pages)",
                        revision,
                        author,
                        doc.pages.len()
                    ),
                );
                Ok(())
            }
            Err(e) => {
                self.record("save_failed", path, &e.to_string());
                Err(AppError::from(e))
            }
        }
    }
}

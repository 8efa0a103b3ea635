//! Remote document store and anonymous identity.
//!
//! The sync engine only talks to these traits; `SqliteStore` shares the
//! report between every process opening the same database file, while
//! `MemoryStore` shares it between handles inside one process.

pub mod identity;
pub mod memory;
pub mod sqlite;

use crate::errors::AppResult;
use crate::models::DocumentWire;

pub use identity::FileIdentity;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Fixed, application-namespaced path of the shared report.
pub const DOCUMENT_PATH: &str = "artifacts/photo-report/public/data/reports/shared";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Full content of the document as seen by one change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snapshot {
    /// The document does not exist (yet).
    Missing,
    Present(DocumentWire),
}

pub trait DocumentStore {
    /// Open the live channel for `path`. The first poll afterwards delivers
    /// the current state.
    fn subscribe(&mut self, path: &str) -> AppResult<SubscriptionId>;

    /// Changes seen since the previous poll, oldest first. A store may
    /// coalesce several changes into the latest snapshot.
    fn poll(&mut self, sub: SubscriptionId) -> AppResult<Vec<Snapshot>>;

    fn unsubscribe(&mut self, sub: SubscriptionId);

    /// Replace the whole document. No version check: the last write wins.
    fn write(&mut self, path: &str, doc: &DocumentWire, author: &str) -> AppResult<()>;
}

pub trait IdentityProvider {
    fn sign_in_anonymously(&mut self) -> AppResult<String>;
}

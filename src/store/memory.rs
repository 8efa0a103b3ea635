//! In-process document store.
//!
//! Clones share one backend, so several engines built on clones behave like
//! several clients of the same remote store. Failures can be switched on to
//! exercise error paths.

use super::{DocumentStore, Snapshot, SubscriptionId};
use crate::errors::{AppError, AppResult};
use crate::models::DocumentWire;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct WriteRecord {
    pub path: String,
    pub doc: DocumentWire,
    pub author: String,
}

#[derive(Debug, Default)]
struct Backend {
    docs: HashMap<String, DocumentWire>,
    subs: HashMap<SubscriptionId, (String, VecDeque<Snapshot>)>,
    next_sub: u64,
    writes: Vec<WriteRecord>,
    fail_subscribe: bool,
    fail_poll: bool,
    fail_write: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<Backend>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `doc` at `path`.
    pub fn with_document(path: &str, doc: DocumentWire) -> Self {
        let store = Self::new();
        store.inner.borrow_mut().docs.insert(path.to_string(), doc);
        store
    }

    pub fn set_fail_subscribe(&self, fail: bool) {
        self.inner.borrow_mut().fail_subscribe = fail;
    }

    pub fn set_fail_poll(&self, fail: bool) {
        self.inner.borrow_mut().fail_poll = fail;
    }

    pub fn set_fail_write(&self, fail: bool) {
        self.inner.borrow_mut().fail_write = fail;
    }

    pub fn document(&self, path: &str) -> Option<DocumentWire> {
        self.inner.borrow().docs.get(path).cloned()
    }

    pub fn writes(&self) -> Vec<WriteRecord> {
        self.inner.borrow().writes.clone()
    }

    pub fn write_count(&self) -> usize {
        self.inner.borrow().writes.len()
    }

    pub fn active_subscriptions(&self) -> usize {
        self.inner.borrow().subs.len()
    }
}

impl DocumentStore for MemoryStore {
    fn subscribe(&mut self, path: &str) -> AppResult<SubscriptionId> {
        let mut b = self.inner.borrow_mut();
        if b.fail_subscribe {
            return Err(AppError::SubscriptionFailure("subscribe refused".into()));
        }

        b.next_sub += 1;
        let id = SubscriptionId(b.next_sub);
        let first = match b.docs.get(path) {
            Some(doc) => Snapshot::Present(doc.clone()),
            None => Snapshot::Missing,
        };
        b.subs
            .insert(id, (path.to_string(), VecDeque::from([first])));
        Ok(id)
    }

    fn poll(&mut self, sub: SubscriptionId) -> AppResult<Vec<Snapshot>> {
        let mut b = self.inner.borrow_mut();
        if b.fail_poll {
            return Err(AppError::SubscriptionFailure("channel closed".into()));
        }
        match b.subs.get_mut(&sub) {
            Some((_, queue)) => Ok(queue.drain(..).collect()),
            None => Err(AppError::SubscriptionFailure(format!(
                "unknown subscription {}",
                sub.0
            ))),
        }
    }

    fn unsubscribe(&mut self, sub: SubscriptionId) {
        self.inner.borrow_mut().subs.remove(&sub);
    }

    fn write(&mut self, path: &str, doc: &DocumentWire, author: &str) -> AppResult<()> {
        let mut b = self.inner.borrow_mut();
        if b.fail_write {
            return Err(AppError::WriteFailure("permission denied".into()));
        }

        b.docs.insert(path.to_string(), doc.clone());
        b.writes.push(WriteRecord {
            path: path.to_string(),
            doc: doc.clone(),
            author: author.to_string(),
        });
        for (sub_path, queue) in b.subs.values_mut() {
            if sub_path == path {
                queue.push_back(Snapshot::Present(doc.clone()));
            }
        }
        Ok(())
    }
}

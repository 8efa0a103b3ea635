//! Synchronization between the local report and the shared document.
//!
//! The engine never sleeps: callers pass the current `Instant` in and ask
//! for [`SyncEngine::next_deadline`] to know when to come back. Backend
//! failures never escape as `Err`; they are queued as notices for the UI.

use crate::core::debounce::Debounce;
use crate::core::merge::merge_snapshot;
use crate::errors::{AppError, InputError};
use crate::models::{Document, DocumentWire, project};
use crate::store::{DocumentStore, IdentityProvider, Snapshot, SubscriptionId};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Own writes remembered while waiting for their echo. Stores that
/// coalesce changes may never deliver some of them.
const MAX_IN_FLIGHT: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncState {
    Unauthenticated,
    Authenticating,
    /// Subscribed, waiting for the first snapshot.
    Loading,
    /// Subscribed, local state reconciled with the store.
    Ready,
    /// Sign-in or live channel failed. The local state stays editable.
    Error(String),
}

fn detail(e: AppError) -> String {
    match e {
        AppError::AuthFailure(m) | AppError::SubscriptionFailure(m) | AppError::WriteFailure(m) => m,
        other => other.to_string(),
    }
}

pub struct SyncEngine<S: DocumentStore> {
    store: S,
    path: String,
    state: SyncState,
    loading: bool,
    user_id: Option<String>,
    subscription: Option<SubscriptionId>,
    debounce: Debounce,
    document: Document,
    /// Projections written by this engine, oldest first, not yet echoed.
    in_flight: VecDeque<DocumentWire>,
    notices: Vec<AppError>,
    torn_down: bool,
}

impl<S: DocumentStore> SyncEngine<S> {
    pub fn new(store: S, path: impl Into<String>, delay: Duration) -> Self {
        Self {
            store,
            path: path.into(),
            state: SyncState::Unauthenticated,
            loading: true,
            user_id: None,
            subscription: None,
            debounce: Debounce::new(delay),
            document: Document::default(),
            in_flight: VecDeque::new(),
            notices: Vec::new(),
            torn_down: false,
        }
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == SyncState::Ready
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn has_pending_save(&self) -> bool {
        self.debounce.is_pending()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    /// Drain the failures raised since the last call.
    pub fn take_notices(&mut self) -> Vec<AppError> {
        std::mem::take(&mut self.notices)
    }

    fn fail(&mut self, err: AppError) {
        self.state = SyncState::Error(err.to_string());
        self.loading = false;
        self.notices.push(err);
    }

    /// Sign in anonymously and open the live channel on the document.
    pub fn start(&mut self, identity: &mut dyn IdentityProvider) {
        if self.torn_down || self.state != SyncState::Unauthenticated {
            return;
        }

        self.state = SyncState::Authenticating;
        match identity.sign_in_anonymously() {
            Ok(uid) => self.user_id = Some(uid),
            Err(e) => {
                self.fail(AppError::AuthFailure(detail(e)));
                return;
            }
        }

        match self.store.subscribe(&self.path) {
            Ok(sub) => {
                self.subscription = Some(sub);
                self.state = SyncState::Loading;
            }
            Err(e) => self.fail(AppError::SubscriptionFailure(detail(e))),
        }
    }

    /// Deliver pending snapshots and fire the save timer if it is due.
    pub fn poll(&mut self, now: Instant) {
        if self.torn_down {
            return;
        }

        if let Some(sub) = self.subscription {
            match self.store.poll(sub) {
                Ok(snapshots) => {
                    for snap in snapshots {
                        self.apply_snapshot(snap);
                    }
                }
                Err(e) => {
                    self.store.unsubscribe(sub);
                    self.subscription = None;
                    self.fail(AppError::SubscriptionFailure(detail(e)));
                }
            }
        }

        if self.debounce.fire_if_due(now) {
            self.save();
        }
    }

    fn apply_snapshot(&mut self, snap: Snapshot) {
        match snap {
            // First client to see the document absent creates it.
            Snapshot::Missing => self.write_current(),
            Snapshot::Present(remote) => {
                // The echo of an older save must not undo edits made since.
                let own_echo = self.take_own_echo(&remote);
                if !(own_echo && self.debounce.is_pending()) {
                    self.document = merge_snapshot(&self.document, &remote);
                }
            }
        }
        self.state = SyncState::Ready;
        self.loading = false;
    }

    /// Replace the local state after a user action.
    ///
    /// Once ready, every mutation restarts the save timer. Before that the
    /// change stays local: the store is not touched until the first
    /// snapshot has been merged.
    pub fn apply(&mut self, now: Instant, next: Document) {
        if self.torn_down {
            return;
        }
        self.document = next;
        if self.is_ready() {
            self.debounce.restart(now);
        }
    }

    /// Run a fallible action against the current state. On error nothing
    /// changes and no save is scheduled.
    pub fn update<F>(&mut self, now: Instant, action: F) -> Result<(), InputError>
    where
        F: FnOnce(&Document) -> Result<Document, InputError>,
    {
        let next = action(&self.document)?;
        self.apply(now, next);
        Ok(())
    }

    /// Like [`Self::update`] for actions that cannot fail.
    pub fn edit<F>(&mut self, now: Instant, action: F)
    where
        F: FnOnce(&Document) -> Document,
    {
        let next = action(&self.document);
        self.apply(now, next);
    }

    /// Fire a pending save right away.
    pub fn flush(&mut self) {
        if !self.torn_down && self.debounce.take() {
            self.save();
        }
    }

    fn save(&mut self) {
        self.write_current();
    }

    fn write_current(&mut self) {
        let wire = project(&self.document);
        let author = self.user_id.clone().unwrap_or_default();
        match self.store.write(&self.path, &wire, &author) {
            Ok(()) => {
                if self.in_flight.len() == MAX_IN_FLIGHT {
                    self.in_flight.pop_front();
                }
                self.in_flight.push_back(wire);
            }
            Err(e) => self.notices.push(AppError::WriteFailure(detail(e))),
        }
    }

    /// Whether `remote` is one of our own writes; it and every older
    /// pending echo are forgotten.
    fn take_own_echo(&mut self, remote: &DocumentWire) -> bool {
        match self.in_flight.iter().position(|w| w == remote) {
            Some(i) => {
                self.in_flight.drain(..=i);
                true
            }
            None => false,
        }
    }

    /// Cancel the timer and close the live channel. Nothing is written or
    /// merged afterwards.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.debounce.cancel();
        self.in_flight.clear();
        if let Some(sub) = self.subscription.take() {
            self.store.unsubscribe(sub);
        }
        self.torn_down = true;
    }
}

impl<S: DocumentStore> Drop for SyncEngine<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

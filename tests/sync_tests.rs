use photoreport::core::actions::{add_page, copy_caption_from_previous, edit_caption, edit_header, set_photo_image};
use photoreport::core::sync::{SyncEngine, SyncState};
use photoreport::errors::{AppError, AppResult, InputError};
use photoreport::models::{Document, HeaderField, project};
use photoreport::store::{DOCUMENT_PATH, IdentityProvider, MemoryStore};
use std::time::{Duration, Instant};

const DELAY: Duration = Duration::from_millis(1000);

struct FixedIdentity(&'static str);

impl IdentityProvider for FixedIdentity {
    fn sign_in_anonymously(&mut self) -> AppResult<String> {
        Ok(self.0.to_string())
    }
}

struct RefusingIdentity;

impl IdentityProvider for RefusingIdentity {
    fn sign_in_anonymously(&mut self) -> AppResult<String> {
        Err(AppError::AuthFailure("anonymous sign-in disabled".into()))
    }
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Engine signed in, subscribed and past its first snapshot.
fn ready_engine(store: &MemoryStore, t0: Instant) -> SyncEngine<MemoryStore> {
    let mut engine = SyncEngine::new(store.clone(), DOCUMENT_PATH, DELAY);
    engine.start(&mut FixedIdentity("anon-test"));
    engine.poll(t0);
    assert!(engine.is_ready());
    engine
}

#[test]
fn starts_unauthenticated_and_loading() {
    let engine = SyncEngine::new(MemoryStore::new(), DOCUMENT_PATH, DELAY);
    assert_eq!(engine.state(), &SyncState::Unauthenticated);
    assert!(engine.is_loading());
    assert_eq!(engine.document(), &Document::default());
}

#[test]
fn missing_document_is_created_once_with_default_content() {
    let store = MemoryStore::new();
    let t0 = Instant::now();
    let mut engine = SyncEngine::new(store.clone(), DOCUMENT_PATH, DELAY);

    engine.start(&mut FixedIdentity("anon-a"));
    assert_eq!(engine.state(), &SyncState::Loading);
    assert_eq!(store.write_count(), 0);

    engine.poll(t0);
    assert!(engine.is_ready());
    assert!(!engine.is_loading());

    let writes = store.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].path, DOCUMENT_PATH);
    assert_eq!(writes[0].author, "anon-a");
    assert_eq!(writes[0].doc, project(&Document::default()));

    // the echo of our own write does not trigger another one
    engine.poll(t0 + ms(10));
    assert_eq!(store.write_count(), 1);
    assert!(!engine.has_pending_save());
}

#[test]
fn existing_document_is_loaded_without_writing() {
    let remote = project(&edit_header(&Document::default(), HeaderField::OwnerName, "ACME"));
    let store = MemoryStore::with_document(DOCUMENT_PATH, remote);
    let engine = ready_engine(&store, Instant::now());

    assert_eq!(engine.document().header.owner_name, "ACME");
    assert_eq!(store.write_count(), 0);
}

#[test]
fn edits_before_ready_never_reach_the_store() {
    let store = MemoryStore::new();
    let t0 = Instant::now();
    let mut engine = SyncEngine::new(store.clone(), DOCUMENT_PATH, DELAY);

    engine.edit(t0, |d| edit_header(d, HeaderField::PoNo, "42"));
    assert_eq!(engine.document().header.po_no, "42");
    assert!(!engine.has_pending_save());

    engine.poll(t0 + ms(5000));
    engine.flush();
    assert_eq!(store.write_count(), 0);
}

#[test]
fn rapid_edits_coalesce_into_one_write() {
    let store = MemoryStore::new();
    let t0 = Instant::now();
    let mut engine = ready_engine(&store, t0);
    let base = store.write_count();

    engine.edit(t0, |d| edit_caption(d, 0, 0, "F"));
    engine.edit(t0 + ms(300), |d| edit_caption(d, 0, 0, "Fo"));
    engine.edit(t0 + ms(600), |d| edit_caption(d, 0, 0, "Foo"));
    assert_eq!(engine.next_deadline(), Some(t0 + ms(1600)));

    engine.poll(t0 + ms(1500));
    assert_eq!(store.write_count(), base);

    engine.poll(t0 + ms(1600));
    assert_eq!(store.write_count(), base + 1);
    let last = store.writes().pop().expect("one write");
    assert_eq!(last.doc.pages[0].photos[0].caption, "Foo");
    assert!(!engine.has_pending_save());
}

#[test]
fn flush_writes_pending_state_immediately() {
    let store = MemoryStore::new();
    let t0 = Instant::now();
    let mut engine = ready_engine(&store, t0);
    let base = store.write_count();

    engine.edit(t0, add_page);
    engine.flush();
    assert_eq!(store.write_count(), base + 1);

    // nothing left to fire
    engine.flush();
    engine.poll(t0 + ms(5000));
    assert_eq!(store.write_count(), base + 1);
}

#[test]
fn failed_copy_changes_nothing_and_schedules_nothing() {
    let store = MemoryStore::new();
    let t0 = Instant::now();
    let mut engine = ready_engine(&store, t0);
    let before = engine.document().clone();

    let err = engine
        .update(t0, |d| copy_caption_from_previous(d, 0, 1))
        .unwrap_err();
    assert_eq!(err, InputError::SourceEmpty);
    assert_eq!(engine.document(), &before);
    assert!(!engine.has_pending_save());
}

#[test]
fn images_are_never_written() {
    let store = MemoryStore::new();
    let t0 = Instant::now();
    let mut engine = ready_engine(&store, t0);

    engine.edit(t0, |d| {
        set_photo_image(d, 0, 0, "data:image/jpeg;base64,/9j/".into())
    });
    engine.flush();

    for w in store.writes() {
        let json = w.doc.to_json().expect("json");
        assert!(!json.contains("imageUrl"));
        assert!(!json.contains("base64"));
    }
    assert!(engine.document().pages[0].photos[0].has_image());
}

#[test]
fn remote_changes_from_another_client_are_merged() {
    let store = MemoryStore::new();
    let t0 = Instant::now();
    let mut alice = ready_engine(&store, t0);
    let mut bob = ready_engine(&store, t0);

    alice.edit(t0, |d| {
        set_photo_image(d, 0, 2, "data:image/png;base64,AA==".into())
    });
    bob.edit(t0, |d| edit_caption(d, 0, 2, "North wall"));
    bob.flush();

    alice.poll(t0 + ms(10));
    assert_eq!(alice.document().pages[0].photos[2].caption, "North wall");
    assert!(alice.document().pages[0].photos[2].has_image());
}

#[test]
fn own_echo_does_not_roll_back_newer_edits() {
    let store = MemoryStore::new();
    let t0 = Instant::now();
    let mut engine = ready_engine(&store, t0);

    engine.edit(t0, |d| edit_caption(d, 0, 0, "A"));
    engine.poll(t0 + DELAY);
    let base = store.write_count();
    assert_eq!(store.writes()[base - 1].doc.pages[0].photos[0].caption, "A");

    // typed again before the echo of "A" came back
    engine.edit(t0 + DELAY, |d| edit_caption(d, 0, 1, "B"));
    engine.poll(t0 + DELAY + ms(10));
    assert_eq!(engine.document().pages[0].photos[0].caption, "A");
    assert_eq!(engine.document().pages[0].photos[1].caption, "B");
    assert!(engine.has_pending_save());

    engine.poll(t0 + DELAY * 2);
    assert_eq!(store.write_count(), base + 1);
    let last = store.writes().pop().expect("second save");
    assert_eq!(last.doc.pages[0].photos[0].caption, "A");
    assert_eq!(last.doc.pages[0].photos[1].caption, "B");

    // echo of "B" arrives with nothing pending and changes nothing
    engine.poll(t0 + DELAY * 3);
    assert_eq!(engine.document().pages[0].photos[1].caption, "B");
    assert_eq!(store.write_count(), base + 1);
}

#[test]
fn other_client_write_during_pending_save_wins() {
    let store = MemoryStore::new();
    let t0 = Instant::now();
    let mut alice = ready_engine(&store, t0);
    let mut bob = ready_engine(&store, t0);

    alice.edit(t0, |d| {
        let d = edit_caption(d, 0, 0, "Alice");
        set_photo_image(&d, 0, 0, "data:image/png;base64,AA==".into())
    });
    bob.edit(t0, |d| edit_caption(d, 0, 0, "Bob"));
    bob.flush();

    // last write wins: the remote text replaces the unsaved local one
    alice.poll(t0 + ms(10));
    assert_eq!(alice.document().pages[0].photos[0].caption, "Bob");
    assert!(alice.document().pages[0].photos[0].has_image());
    assert!(alice.has_pending_save());

    alice.poll(t0 + DELAY);
    assert!(!alice.has_pending_save());
    let stored = store.document(DOCUMENT_PATH).expect("document exists");
    assert_eq!(stored.pages[0].photos[0].caption, "Bob");
}

#[test]
fn sign_in_failure_is_reported_and_nothing_is_written() {
    let store = MemoryStore::new();
    let mut engine = SyncEngine::new(store.clone(), DOCUMENT_PATH, DELAY);
    engine.start(&mut RefusingIdentity);

    assert!(matches!(engine.state(), SyncState::Error(_)));
    assert!(!engine.is_loading());
    let notices = engine.take_notices();
    assert_eq!(notices.len(), 1);
    assert!(matches!(notices[0], AppError::AuthFailure(_)));
    assert_eq!(store.active_subscriptions(), 0);

    // the local state stays editable
    engine.edit(Instant::now(), |d| edit_caption(d, 0, 0, "offline"));
    assert_eq!(engine.document().pages[0].photos[0].caption, "offline");
    engine.flush();
    assert_eq!(store.write_count(), 0);
}

#[test]
fn subscribe_failure_is_reported() {
    let store = MemoryStore::new();
    store.set_fail_subscribe(true);
    let mut engine = SyncEngine::new(store.clone(), DOCUMENT_PATH, DELAY);
    engine.start(&mut FixedIdentity("anon-a"));

    assert!(matches!(engine.state(), SyncState::Error(_)));
    assert_eq!(engine.user_id(), Some("anon-a"));
    let notices = engine.take_notices();
    assert!(matches!(notices[0], AppError::SubscriptionFailure(_)));
}

#[test]
fn channel_failure_closes_the_subscription() {
    let store = MemoryStore::new();
    let t0 = Instant::now();
    let mut engine = ready_engine(&store, t0);
    assert_eq!(store.active_subscriptions(), 1);

    store.set_fail_poll(true);
    engine.poll(t0 + ms(10));
    assert!(matches!(engine.state(), SyncState::Error(_)));
    assert_eq!(store.active_subscriptions(), 0);
    assert!(matches!(
        engine.take_notices().first(),
        Some(AppError::SubscriptionFailure(_))
    ));
}

#[test]
fn write_failure_keeps_the_local_edit() {
    let store = MemoryStore::new();
    let t0 = Instant::now();
    let mut engine = ready_engine(&store, t0);
    let base = store.write_count();

    store.set_fail_write(true);
    engine.edit(t0, |d| edit_caption(d, 0, 0, "kept"));
    engine.poll(t0 + DELAY);

    assert_eq!(store.write_count(), base);
    assert_eq!(engine.document().pages[0].photos[0].caption, "kept");
    assert!(engine.is_ready());
    let notices = engine.take_notices();
    assert_eq!(notices.len(), 1);
    assert!(matches!(notices[0], AppError::WriteFailure(_)));
}

#[test]
fn teardown_cancels_timer_and_subscription() {
    let store = MemoryStore::new();
    let t0 = Instant::now();
    let mut engine = ready_engine(&store, t0);
    let base = store.write_count();

    engine.edit(t0, |d| edit_caption(d, 0, 0, "lost"));
    engine.teardown();
    assert_eq!(store.active_subscriptions(), 0);
    assert!(!engine.has_pending_save());

    engine.poll(t0 + ms(5000));
    engine.flush();
    assert_eq!(store.write_count(), base);

    // later edits are ignored as well
    engine.edit(t0, add_page);
    assert_eq!(engine.document().pages.len(), 1);
}

#[test]
fn dropping_the_engine_unsubscribes() {
    let store = MemoryStore::new();
    {
        let _engine = ready_engine(&store, Instant::now());
        assert_eq!(store.active_subscriptions(), 1);
    }
    assert_eq!(store.active_subscriptions(), 0);
}

//! Transcript sync driven through the background loader and the watch app

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use verbalingo::api::{Backend, FetchState, SearchFilters};
use verbalingo::loader::TranscriptLoader;
use verbalingo::player::{FetchTicket, PlaylistItem, SyncController, SyncEffect};
use verbalingo::transcript::TranscriptSegment;
use verbalingo::tui::{InputResult, WatchApp};
use verbalingo::Config;

use crate::helpers::{segments, FakeBackend};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn tickets(effects: &[SyncEffect]) -> Vec<FetchTicket> {
    effects
        .iter()
        .filter_map(|e| match e {
            SyncEffect::FetchTranscript(t) => Some(t.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn loader_delivers_transcript_for_ticket() {
    let backend = Arc::new(FakeBackend::new().with_transcript("abc", segments()));
    let loader = TranscriptLoader::spawn(backend.clone(), "en");
    let mut sync = SyncController::default();

    let effects = sync.load_playlist(vec![PlaylistItem::new("abc").with_range(12.0, 14.0)]);
    let ticket = tickets(&effects).remove(0);
    assert!(loader.request(&ticket));

    let done = loader.recv().unwrap();
    assert_eq!(done.ticket_id, ticket.id);

    // start 12.0 -> embed start 11, plus lookahead lands past the last segment
    let effect = sync.complete_transcript_fetch(done.ticket_id, done.result);
    assert_eq!(effect, None);
    assert!(sync.transcript().is_success());

    let served = backend.requests.lock().unwrap().clone();
    assert_eq!(served[0].language, "en");
    assert_eq!(served[0].center_position, Some(12.0));
}

#[test]
fn slow_response_for_abandoned_video_is_discarded() {
    let backend = Arc::new(
        FakeBackend::new()
            .with_transcript("slow", vec![TranscriptSegment::new(0.0, 100.0, "stale")])
            .with_transcript("fast", segments())
            .with_delay("slow", Duration::from_millis(100)),
    );
    let loader = TranscriptLoader::spawn(backend.clone(), "en");
    let mut sync = SyncController::default();

    let first = sync.load_playlist(vec![PlaylistItem::new("slow"), PlaylistItem::new("fast")]);
    for t in tickets(&first) {
        loader.request(&t);
    }
    let second = sync.next_video();
    for t in tickets(&second) {
        loader.request(&t);
    }

    for _ in 0..2 {
        let done = loader.recv().unwrap();
        sync.complete_transcript_fetch(done.ticket_id, done.result);
    }

    assert_eq!(backend.served(), vec!["slow", "fast"]);
    let transcript = sync.transcript().value().unwrap();
    assert_eq!(transcript.video_id, "fast");
    assert_eq!(transcript.sentences[0].text, "a");
    assert_eq!(sync.current_index(), 1);
}

#[test]
fn missing_transcript_surfaces_as_error_state() {
    let backend = Arc::new(FakeBackend::new());
    let loader = TranscriptLoader::spawn(backend, "en");
    let mut sync = SyncController::default();

    let effects = sync.load_playlist(vec![PlaylistItem::new("nope")]);
    for t in tickets(&effects) {
        loader.request(&t);
    }
    let done = loader.recv().unwrap();
    sync.complete_transcript_fetch(done.ticket_id, done.result);

    match sync.transcript() {
        FetchState::Error(message) => assert!(!message.is_empty()),
        other => panic!("expected error state, got {:?}", other),
    }
    assert_eq!(sync.active_segment(), None);
}

#[test]
fn search_results_become_playlist() {
    let backend = FakeBackend::new()
        .with_clip("v1", 4.5, "I like to run")
        .with_clip("v2", 10.0, "walk slowly")
        .with_clip("v3", 0.2, "Run away");
    let response = backend.search(&SearchFilters::new("run", "en")).unwrap();
    assert_eq!(response.total, 2);

    let items: Vec<PlaylistItem> = response.clips.iter().map(PlaylistItem::from).collect();
    let mut sync = SyncController::default();
    let effects = sync.load_playlist(items);

    assert!(effects.contains(&SyncEffect::LoadVideo {
        index: 0,
        video_id: "v1".to_string(),
        start_seconds: 3,
    }));
    assert_eq!(sync.playlist().len(), 2);
}

#[test]
fn watch_app_scrolls_to_active_segment_after_load() {
    let backend = Arc::new(FakeBackend::new().with_transcript("abc", segments()));
    let mut app = WatchApp::new(
        backend,
        &Config::default(),
        "test",
        vec![PlaylistItem::new("abc")],
    );

    assert!(app.sync().transcript().is_loading());
    assert!(app.wait_for_transcript());

    // time 0 plus lookahead 3 falls in the first segment
    assert_eq!(app.sync().active_segment(), Some(0));
    assert_eq!(app.selected(), Some(0));
    assert_eq!(app.scroll_count(), 1);
}

#[test]
fn watch_app_next_clip_discards_previous_fetch() {
    let backend = Arc::new(
        FakeBackend::new()
            .with_transcript("one", segments())
            .with_transcript("two", segments())
            .with_delay("one", Duration::from_millis(50)),
    );
    let mut app = WatchApp::new(
        backend,
        &Config::default(),
        "test",
        vec![PlaylistItem::new("one"), PlaylistItem::new("two")],
    );

    let result = app.handle_key(key(KeyCode::Char('n')));
    assert_eq!(result, InputResult::Continue);
    assert_eq!(app.sync().current_index(), 1);

    assert!(app.wait_for_transcript());
    assert!(app.sync().transcript().is_loading());
    assert!(app.wait_for_transcript());

    let transcript = app.sync().transcript().value().unwrap();
    assert_eq!(transcript.video_id, "two");
    assert_eq!(app.scroll_count(), 1);
}

#[test]
fn watch_app_enter_seeks_to_selected_segment() {
    let backend = Arc::new(FakeBackend::new().with_transcript("abc", segments()));
    let mut app = WatchApp::new(
        backend,
        &Config::default(),
        "test",
        vec![PlaylistItem::new("abc")],
    );
    app.wait_for_transcript();

    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Down));
    assert_eq!(app.selected(), Some(2));

    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.sync().active_segment(), Some(2));
    assert_eq!(app.sync().state().current_time, 9.0);
}

#[test]
fn watch_app_resume_and_quit() {
    let backend = Arc::new(
        FakeBackend::new()
            .with_transcript("one", segments())
            .with_transcript("two", segments()),
    );
    let mut app = WatchApp::new(
        backend,
        &Config::default(),
        "test",
        vec![PlaylistItem::new("one"), PlaylistItem::new("two")],
    );
    app.resume_at(5);
    assert_eq!(app.sync().current_index(), 1);

    app.handle_key(key(KeyCode::Char('m')));
    assert!(app.sync().state().is_muted);

    assert_eq!(app.handle_key(key(KeyCode::Char('q'))), InputResult::Quit);
    assert_eq!(
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        InputResult::Quit
    );
}

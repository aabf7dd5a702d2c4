//! Chat session persistence on disk

use chrono::{Duration, TimeZone, Utc};
use tempfile::TempDir;
use verbalingo::sessions::{FileSessionStore, Role, SessionHistory, SessionStore};

fn history(dir: &TempDir) -> SessionHistory<FileSessionStore> {
    SessionHistory::new(FileSessionStore::new(dir.path().join("sessions")), 30)
}

#[test]
fn sessions_survive_reopening_the_store() {
    let dir = TempDir::new().unwrap();
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

    {
        let mut h = history(&dir);
        h.record_message("Run", Role::User, "meaning", now).unwrap();
        h.record_message("run", Role::Assistant, "go", now).unwrap();
        h.set_last_active_index("RUN ", 4, now).unwrap();
    }

    let h = history(&dir);
    let session = h.get("run", now).unwrap().unwrap();
    assert_eq!(session.search_term, "run");
    assert_eq!(session.active_messages().len(), 2);
    assert_eq!(session.active_messages()[1].role, Role::Assistant);
    assert_eq!(session.last_active_index, 4);
}

#[test]
fn branches_are_persisted() {
    let dir = TempDir::new().unwrap();
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let mut h = history(&dir);

    h.record_message("walk", Role::User, "q1", now).unwrap();
    h.record_message("walk", Role::Assistant, "a", now).unwrap();
    let forked = h.fork_branch("walk", 1, now).unwrap();
    assert_eq!(forked.branches.len(), 2);
    assert_eq!(forked.active_branch, 1);
    assert_eq!(forked.active_messages().len(), 1);

    assert!(h.switch_branch("walk", 0, now).unwrap());
    let reopened = history(&dir).get("walk", now).unwrap().unwrap();
    assert_eq!(reopened.active_branch, 0);
    assert_eq!(reopened.active_messages().len(), 2);
}

#[test]
fn expired_sessions_are_hidden_and_pruned() {
    let dir = TempDir::new().unwrap();
    let then = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let later = then + Duration::days(45);
    let mut h = history(&dir);

    h.record_message("old", Role::User, "hi", then).unwrap();
    h.record_message("new", Role::User, "hi", later).unwrap();

    assert!(h.get("old", later).unwrap().is_none());
    let live: Vec<String> = h
        .sessions(later)
        .unwrap()
        .into_iter()
        .map(|s| s.search_term)
        .collect();
    assert_eq!(live, vec!["new"]);

    assert_eq!(h.prune(later).unwrap(), vec!["old"]);
    assert!(h.store().get("old").unwrap().is_none());
    assert_eq!(h.store().list().unwrap().len(), 1);
}

#[test]
fn corrupt_file_does_not_hide_other_sessions() {
    let dir = TempDir::new().unwrap();
    let now = Utc::now();
    let mut h = history(&dir);
    h.record_message("good", Role::User, "hi", now).unwrap();

    let broken = dir.path().join("sessions").join("broken-00000000.json");
    std::fs::write(broken, "{not json").unwrap();

    let sessions = h.sessions(now).unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].search_term, "good");
}

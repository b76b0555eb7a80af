//! Integration tests for the time-window lock against a real directory.

use std::fs;
use std::path::Path;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Local, NaiveDateTime};
use termkit_core::{create_lock, is_locked, LockMarker, TimeWindowLock, DEFAULT_WINDOW};

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    names
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[test]
fn test_missing_lock_directory_is_unlocked() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(!is_locked(tmp.path().join("never-created"), "task", DEFAULT_WINDOW));
    assert!(!tmp.path().join("never-created").exists());
}

#[test]
fn test_empty_lock_directory_is_unlocked() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(!is_locked(tmp.path(), "task", DEFAULT_WINDOW));
}

#[test]
fn test_fresh_marker_locks_and_is_kept_across_checks() {
    // Arrange
    let tmp = tempfile::tempdir().unwrap();
    let marker = create_lock(tmp.path(), "task", None).unwrap();

    // Act / Assert: checking twice is idempotent
    assert!(is_locked(tmp.path(), "task", DEFAULT_WINDOW));
    assert!(is_locked(tmp.path(), "task", DEFAULT_WINDOW));
    assert_eq!(entries(tmp.path()), vec![marker.file_name()]);
}

#[test]
fn test_expired_marker_is_unlocked_and_deleted() {
    // Arrange
    let tmp = tempfile::tempdir().unwrap();
    let old = now() - ChronoDuration::seconds(400);
    let marker = create_lock(tmp.path(), "task", Some(old)).unwrap();
    assert!(tmp.path().join(marker.file_name()).exists());

    // Act
    let locked = is_locked(tmp.path(), "task", Duration::from_secs(300));

    // Assert
    assert!(!locked);
    assert!(entries(tmp.path()).is_empty());
}

#[test]
fn test_headers_do_not_interfere() {
    let tmp = tempfile::tempdir().unwrap();
    create_lock(tmp.path(), "backup", None).unwrap();
    let stale = now() - ChronoDuration::seconds(3600);
    let stale_marker = create_lock(tmp.path(), "backup_daily", Some(stale)).unwrap();

    assert!(!is_locked(tmp.path(), "deploy", DEFAULT_WINDOW));
    assert!(is_locked(tmp.path(), "backup", DEFAULT_WINDOW));
    // The "backup" sweep must not have touched the longer header's marker.
    assert!(tmp.path().join(stale_marker.file_name()).exists());
}

#[test]
fn test_create_lock_makes_nested_directory_with_exact_file_name() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("a").join("b");
    let ts = NaiveDateTime::parse_from_str("20200101_120030", "%Y%m%d_%H%M%S").unwrap();

    let marker = create_lock(&dir, "test", Some(ts)).unwrap();

    assert_eq!(marker.file_name(), "test_20200101_120030");
    assert_eq!(entries(&dir), vec!["test_20200101_120030".to_string()]);
    assert_eq!(fs::metadata(dir.join("test_20200101_120030")).unwrap().len(), 0);
}

#[test]
fn test_same_second_markers_overwrite() {
    let tmp = tempfile::tempdir().unwrap();
    let ts = now();
    create_lock(tmp.path(), "job", Some(ts)).unwrap();
    create_lock(tmp.path(), "job", Some(ts)).unwrap();
    assert_eq!(entries(tmp.path()).len(), 1);
}

#[test]
fn test_foreign_files_are_left_alone() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("task_notes.txt"), "keep me").unwrap();
    fs::write(tmp.path().join("task_19990101_000000.bak"), "").unwrap();

    assert!(!is_locked(tmp.path(), "task", DEFAULT_WINDOW));
    assert_eq!(entries(tmp.path()).len(), 2);
}

#[test]
fn test_try_acquire_creates_once_then_reports_held() {
    let tmp = tempfile::tempdir().unwrap();
    let lock = TimeWindowLock::in_dir(tmp.path(), "migrate", DEFAULT_WINDOW).unwrap();

    let first = lock.try_acquire().unwrap();
    let second = lock.try_acquire().unwrap();

    assert!(first.is_some());
    assert!(second.is_none());
}

#[test]
fn test_active_markers_lists_parsed_markers() {
    let tmp = tempfile::tempdir().unwrap();
    let lock = TimeWindowLock::in_dir(tmp.path(), "sync", DEFAULT_WINDOW).unwrap();
    let created = lock.create_lock().unwrap();

    let active = lock.active_markers();

    assert_eq!(active, vec![created.clone()]);
    assert_eq!(
        LockMarker::parse("sync", &created.file_name()),
        Some(created)
    );
}

#[test]
fn test_invalid_header_is_reported_by_create_and_unlocked_by_check() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(create_lock(tmp.path(), "../escape", None).is_err());
    assert!(!is_locked(tmp.path(), "../escape", DEFAULT_WINDOW));
}

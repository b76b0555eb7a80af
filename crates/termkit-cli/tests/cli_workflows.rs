//! End-to-end flows through the termkit-cli library: config file to lock
//! settings, subcommand functions over a real lock directory, and scripted
//! menu sessions.

use std::time::Duration;

use chrono::{Local, NaiveDateTime, Timelike};
use tempfile::TempDir;

use termkit_cli::application::commands::{
    check, lock_acquire, lock_create, lock_status, read_check_value, AcquireOutcome, CheckKind,
    LockSettings,
};
use termkit_cli::application::console::{strip_ansi, Palette};
use termkit_cli::application::interactive::run_menu;
use termkit_cli::application::prompt::{Prompter, ScriptedReader};
use termkit_cli::infrastructure::storage::config::{init_config_at, load_config_from};

fn settings(dir: &TempDir, window_secs: u64) -> LockSettings {
    LockSettings {
        dir: dir.path().join("locks"),
        window: Duration::from_secs(window_secs),
    }
}

fn stale_marker(settings: &LockSettings, header: &str, age_secs: i64) -> NaiveDateTime {
    let ts = Local::now().naive_local() - chrono::Duration::seconds(age_secs);
    termkit_core::create_lock(&settings.dir, header, Some(ts)).expect("write stale marker");
    ts
}

#[test]
fn test_config_file_drives_lock_settings() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    let lock_dir = dir.path().join("shared-locks");
    std::fs::write(
        &path,
        format!(
            "[lock]\ndirectory = {:?}\nwindow_secs = 45\n",
            lock_dir.display().to_string()
        ),
    )
    .unwrap();

    // Act
    let config = load_config_from(&path).unwrap();
    let settings = config.lock.settings();

    // Assert
    assert_eq!(settings.dir, lock_dir);
    assert_eq!(settings.window, Duration::from_secs(45));
    assert!(config.console.color);
}

#[test]
fn test_init_config_writes_loadable_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("termkit").join("config.toml");

    let written = init_config_at(&path, false).unwrap();

    assert_eq!(load_config_from(&path).unwrap(), written);
}

#[test]
fn test_piped_check_values_ending_in_newline_are_accepted() {
    // Arrange: what `echo <value> | termkit check <kind> -` delivers
    let cases = [
        (CheckKind::Ipv4, "10.0.0.1\n"),
        (CheckKind::Ipv4Prefix, "10.0.0.0/8\n"),
        (CheckKind::Route, "10.0.0.0/8 via 10.0.0.1\n"),
        (CheckKind::RouteList, "10.0.0.0/8 via 10.0.0.1\n"),
    ];

    for (kind, piped) in cases {
        // Act
        let value = read_check_value(piped.as_bytes()).unwrap();

        // Assert
        assert!(check(kind, &value), "{kind} rejected piped {piped:?}");
    }
    assert!(!check(CheckKind::Ipv4, &read_check_value(&b"10.0.0.256\n"[..]).unwrap()));
}

#[test]
fn test_acquire_then_acquire_again_is_held() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let lock = settings(&dir, 300).lock("deploy").unwrap();

    // Act
    let first = lock_acquire(&lock).unwrap();
    let second = lock_acquire(&lock).unwrap();

    // Assert
    assert!(matches!(first, AcquireOutcome::Acquired(_)));
    assert_eq!(second, AcquireOutcome::Held);
    assert!(lock_status(&lock).is_locked());
}

#[test]
fn test_status_sweeps_stale_markers_then_acquire_succeeds() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let settings = settings(&dir, 60);
    stale_marker(&settings, "deploy", 3600);
    let lock = settings.lock("deploy").unwrap();

    // Act
    let report = lock_status(&lock);
    let outcome = lock_acquire(&lock).unwrap();

    // Assert
    assert!(!report.is_locked());
    assert!(matches!(outcome, AcquireOutcome::Acquired(_)));
    assert_eq!(std::fs::read_dir(&settings.dir).unwrap().count(), 1);
}

#[test]
fn test_create_ignores_existing_markers() {
    let dir = TempDir::new().unwrap();
    let settings = settings(&dir, 300);
    let older = stale_marker(&settings, "sync", 10);
    let lock = settings.lock("sync").unwrap();

    let marker = lock_create(&lock).unwrap();

    let report = lock_status(&lock);
    assert_eq!(report.active.len(), 2);
    assert_eq!(report.active[0].timestamp(), older.with_nanosecond(0).unwrap());
    assert_eq!(report.active[1], marker);
}

#[test]
fn test_scripted_menu_session_with_colors() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let answers = ["1", "24", "2", "255.255.0.0", "q"];
    let mut prompter = Prompter::new(
        ScriptedReader::new(answers),
        Vec::new(),
        Palette::new(true),
    );

    // Act
    run_menu(&mut prompter, &settings(&dir, 300)).unwrap();

    // Assert
    let (reader, out) = prompter.into_parts();
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("\x1b[00;32m255.255.255.0\x1b[0m"));
    let plain = strip_ansi(&out);
    assert!(plain.contains("Selected : prefix -> netmask"));
    assert!(plain.contains("\n16\n"));
    assert_eq!(reader.remaining(), 0);
    assert_eq!(reader.prompts().last().map(String::as_str), Some(">> "));
}

#[test]
fn test_scripted_menu_lock_round_trip_is_visible_to_library() {
    let dir = TempDir::new().unwrap();
    let settings = settings(&dir, 300);
    let mut prompter = Prompter::new(
        ScriptedReader::new(["6", "nightly", "y", "q"]),
        Vec::new(),
        Palette::plain(),
    );

    run_menu(&mut prompter, &settings).unwrap();

    assert!(termkit_core::is_locked(&settings.dir, "nightly", settings.window));
    assert!(!termkit_core::is_locked(&settings.dir, "night", settings.window));
}

//! Browsing engine tests for sift
//!
//! These tests drive the listing engine, the viewport windowing and the navigation state machine
//! through the library API, the way the binary uses them.
//!
//! Every test works inside its own temporary directory, which is removed when the test ends.

use sift_tui::app::{GoIn, NavState};
use sift_tui::core::{BrowseError, EntryKind, SortOrder, compile_filter, populate, window};

use std::error;
use std::fs::{self, File};
use std::time::{Duration, SystemTime};
use tempfile::tempdir;

fn names(nav: &NavState) -> Vec<String> {
    nav.entries()
        .iter()
        .map(|e| e.name_str().into_owned())
        .collect()
}

#[test]
fn test_listing_orders_and_total() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    let t1 = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    let t2 = t1 + Duration::from_secs(3600);

    let file = File::create(dir.path().join("a.txt"))?;
    file.set_len(10)?;
    file.set_modified(t1)?;
    fs::create_dir(dir.path().join("b"))?;
    File::open(dir.path().join("b"))?.set_modified(t2)?;

    let filter = compile_filter(".")?;
    let by_name = populate(dir.path(), &filter, SortOrder::Name)?;
    let listed: Vec<_> = by_name.entries().iter().map(|e| e.name_str().into_owned()).collect();
    assert_eq!(listed, vec!["a.txt", "b"]);
    assert_eq!(by_name.total_size(), 10);
    assert_eq!(by_name.entries()[1].kind(), EntryKind::Directory);

    let mut nav = NavState::new(dir.path().to_path_buf(), ".", SortOrder::Name)?;
    nav.toggle_sort()?;
    assert_eq!(names(&nav), vec!["b", "a.txt"]);
    assert_eq!(nav.total_size(), 10);
    Ok(())
}

#[test]
fn test_default_filter_hides_dotfiles() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join(".hidden"))?;
    File::create(dir.path().join("visible.txt"))?;

    let nav = NavState::new(dir.path().to_path_buf(), "^[^.]", SortOrder::Name)?;
    assert_eq!(names(&nav), vec!["visible.txt"]);
    Ok(())
}

#[test]
fn test_dotfile_toggle_twice_restores_filter() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join(".profile"))?;
    File::create(dir.path().join("readme"))?;

    let mut nav = NavState::new(dir.path().to_path_buf(), "^[^.]", SortOrder::Name)?;
    let original = nav.filter().to_string();

    nav.toggle_dotfiles()?;
    assert_eq!(nav.entries().len(), 2);
    nav.toggle_dotfiles()?;

    assert_eq!(nav.filter(), original);
    assert_eq!(names(&nav), vec!["readme"]);
    Ok(())
}

#[test]
fn test_reentering_restores_child() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    let project = dir.path().join("project");
    fs::create_dir(&project)?;
    for name in ["Cargo.toml", "README.md", "src"] {
        File::create(project.join(name))?;
    }

    let mut nav = NavState::new(dir.path().to_path_buf(), ".", SortOrder::Name)?;
    assert_eq!(nav.go_in()?, GoIn::Entered);
    nav.move_down();
    nav.move_down();
    assert_eq!(nav.selected_path(), Some(project.join("src")));

    nav.go_parent()?;
    nav.go_in()?;
    assert_eq!(nav.selected_path(), Some(project.join("src")));

    // gone or filtered out falls back to the first entry
    nav.go_parent()?;
    fs::remove_file(project.join("src"))?;
    nav.go_in()?;
    assert_eq!(nav.selected_idx(), 0);
    Ok(())
}

#[test]
fn test_deleted_directory_keeps_view() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("a"))?;
    fs::create_dir(dir.path().join("b"))?;

    let mut nav = NavState::new(dir.path().to_path_buf(), ".", SortOrder::Name)?;
    nav.move_down();
    fs::remove_dir(dir.path().join("b"))?;

    let result = nav.go_in();
    assert!(matches!(result, Err(BrowseError::DirectoryUnreadable { .. })));
    assert_eq!(nav.current_dir(), dir.path());
    assert_eq!(names(&nav), vec!["a", "b"]);
    assert_eq!(nav.selected_idx(), 1);
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_is_recoverable() -> Result<(), Box<dyn error::Error>> {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir()?;
    let locked = dir.path().join("locked");
    fs::create_dir(&locked)?;
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;

    // root can read anything, the check is meaningless there
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;
        return Ok(());
    }

    let mut nav = NavState::new(dir.path().to_path_buf(), ".", SortOrder::Name)?;
    let err = nav.go_in();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;

    let err = match err {
        Err(e) => e,
        Ok(outcome) => return Err(format!("entered locked dir: {outcome:?}").into()),
    };
    assert!(!err.is_fatal());
    assert!(!err.status_message().is_empty());
    assert_eq!(nav.current_dir(), dir.path());
    Ok(())
}

#[test]
fn test_window_examples() {
    assert_eq!(window(100, 2, 10), (0, 10));
    assert_eq!(window(100, 97, 10), (90, 10));

    let (first, count) = window(100, 50, 11);
    assert_eq!((first, count), (45, 11));
    assert_eq!(first + count - 1, 55);
}

#[test]
fn test_window_follows_selection_through_listing() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    for i in 0..50 {
        File::create(dir.path().join(format!("f{i:02}")))?;
    }
    let mut nav = NavState::new(dir.path().to_path_buf(), ".", SortOrder::Name)?;
    let rows = 7;

    for _ in 0..60 {
        let (first, count) = window(nav.entries().len(), nav.selected_idx(), rows);
        assert_eq!(count, rows);
        assert!(first <= nav.selected_idx() && nav.selected_idx() < first + count);
        nav.page_down(rows);
        nav.move_down();
    }
    assert_eq!(nav.selected_idx(), 49);
    Ok(())
}

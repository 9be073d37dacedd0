use hello_cli::history::RequestHistory;
use tempfile::TempDir;

#[test]
fn skips_empty_names_and_consecutive_duplicates() {
    let temp = TempDir::new().unwrap();
    let mut history =
        RequestHistory::with_file(temp.path().join("history.json"), 100).unwrap();

    history.add_entry("Alice".to_string(), true, Some(12)).unwrap();
    history.add_entry("Alice".to_string(), false, Some(15)).unwrap();
    history.add_entry(String::new(), true, None).unwrap();
    history.add_entry("Bob".to_string(), true, Some(9)).unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(history.recall(1), Some("Bob"));
    assert_eq!(history.recall(2), Some("Alice"));
    assert_eq!(history.recall(3), None);
    assert_eq!(history.recall(0), None);
}

#[test]
fn caps_entries_at_the_configured_maximum() {
    let temp = TempDir::new().unwrap();
    let mut history = RequestHistory::with_file(temp.path().join("history.json"), 3).unwrap();

    for name in ["one", "two", "three", "four", "five"] {
        history.add_entry(name.to_string(), true, None).unwrap();
    }

    assert_eq!(history.len(), 3);
    assert_eq!(history.entries()[0].name, "three");
    assert_eq!(history.recall(1), Some("five"));
}

#[test]
fn persists_across_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("history.json");

    {
        let mut history = RequestHistory::with_file(path.clone(), 100).unwrap();
        history.add_entry("Alice".to_string(), true, Some(42)).unwrap();
        history.add_entry("Bob".to_string(), false, None).unwrap();
    }

    let history = RequestHistory::with_file(path, 100).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history.entries()[0].name, "Alice");
    assert_eq!(history.entries()[0].duration_ms, Some(42));
    assert!(!history.entries()[1].success);
}

#[test]
fn tolerates_a_missing_file() {
    let temp = TempDir::new().unwrap();
    let history =
        RequestHistory::with_file(temp.path().join("nope").join("history.json"), 100).unwrap();
    assert!(history.is_empty());
}

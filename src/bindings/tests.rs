//! Tests for bindings construction.

use super::*;
use chrono::TimeZone;
use tempfile::TempDir;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap()
}

#[test]
fn test_parse_simple_assignment() {
    let (key, value) = parse_assignment("Category=Science").unwrap();
    assert_eq!(key, "Category");
    assert_eq!(value, Value::Text("Science".to_string()));
}

#[test]
fn test_parse_assignment_keeps_extra_equals() {
    let (key, value) = parse_assignment("Formula=E=mc^2").unwrap();
    assert_eq!(key, "Formula");
    assert_eq!(value.to_string(), "E=mc^2");
}

#[test]
fn test_parse_assignment_allows_empty_value() {
    let (_, value) = parse_assignment("Empty=").unwrap();
    assert_eq!(value.to_string(), "");
}

#[test]
fn test_parse_assignment_rejects_missing_equals() {
    let err = parse_assignment("Category").unwrap_err();
    assert!(err.to_string().contains("expected KEY=VALUE"));
}

#[test]
fn test_parse_assignment_rejects_bad_key() {
    assert!(parse_assignment("=value").is_err());
    assert!(parse_assignment("1st=value").is_err());
    assert!(parse_assignment("my-key=value").is_err());
}

#[test]
fn test_insert_and_override() {
    let mut vars = Bindings::new();
    assert!(vars.insert("Topic", "Lasers").is_none());
    let previous = vars.insert("Topic", "Masers");
    assert_eq!(previous, Some(Value::from("Lasers")));
    assert_eq!(vars.get("Topic").unwrap().to_string(), "Masers");
    assert_eq!(vars.len(), 1);
}

#[test]
fn test_iteration_is_sorted() {
    let vars: Bindings = [("b", "2"), ("a", "1"), ("c", "3")].into_iter().collect();
    let keys: Vec<&str> = vars.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
}

#[test]
fn test_file_content_with_quotes_and_comments() {
    let mut vars = Bindings::new();
    vars.apply_file_content(
        "# settings\n\
         Category=Science\n\
         \n\
         Topic=\"Quantum Computing\" Audience='students aged 14-18'\n",
    )
    .unwrap();

    assert_eq!(vars.len(), 3);
    assert_eq!(vars.get("Category").unwrap().to_string(), "Science");
    assert_eq!(vars.get("Topic").unwrap().to_string(), "Quantum Computing");
    assert_eq!(
        vars.get("Audience").unwrap().to_string(),
        "students aged 14-18"
    );
}

#[test]
fn test_file_content_reports_line_number() {
    let mut vars = Bindings::new();
    let err = vars
        .apply_file_content("Category=Science\nnot-an-assignment\n")
        .unwrap_err();
    assert!(err.to_string().starts_with("line 2:"), "{}", err);
}

#[test]
fn test_file_content_unbalanced_quote() {
    let mut vars = Bindings::new();
    assert!(vars.apply_file_content("Topic=\"open").is_err());
}

#[test]
fn test_load_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("vars.env");
    std::fs::write(&path, "Topic='Tides'\n").unwrap();

    let mut vars = Bindings::new();
    vars.insert("Topic", "overridden");
    vars.load_file(&path).unwrap();
    assert_eq!(vars.get("Topic").unwrap().to_string(), "Tides");
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let mut vars = Bindings::new();
    let err = vars.load_file(temp_dir.path().join("nope.env")).unwrap_err();
    assert!(err.to_string().contains("failed to read bindings file"));
}

#[test]
fn test_inject_timestamp() {
    let mut vars = Bindings::new();
    let injected = vars
        .inject_timestamp("Now", "%Y-%m-%d %H:%M:%S UTC", fixed_now())
        .unwrap();
    assert!(injected);
    assert_eq!(
        vars.get("Now").unwrap().to_string(),
        "2026-03-14 15:09:26 UTC"
    );
}

#[test]
fn test_inject_timestamp_respects_existing_binding() {
    let mut vars = Bindings::new();
    vars.insert("Now", "yesterday");
    let injected = vars.inject_timestamp("Now", "%Y", fixed_now()).unwrap();
    assert!(!injected);
    assert_eq!(vars.get("Now").unwrap().to_string(), "yesterday");
}

#[test]
fn test_invalid_timestamp_format() {
    assert!(!is_valid_timestamp_format("%Q"));
    assert!(is_valid_timestamp_format("%Y-%m-%d"));
    assert!(format_timestamp(fixed_now(), "%Q").is_err());
}

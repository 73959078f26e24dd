//! End-to-end projections over the build journal entry descriptor.

use serde_json::{json, Map, Value};
use shiplog_fields::{
    validate_record, EntityRegistry, RuleKind, StorageType, ViolationReason,
};

const JOURNAL_YAML: &str = r#"
entities:
  - name: BuildJournalEntry
    plural_name: BuildJournalEntries
    slug: build_journal_entries
    icon: book-open
    fields:
      - name: title
        label: Title
        type: text
        required: true
        placeholder: Generated post title
      - name: content
        label: Content
        type: rich-text
        required: true
      - name: generated_date
        label: Generated Date
        type: date
        required: true
      - name: status
        label: Status
        type: select
        required: true
        options: [draft, scheduled, published, archived]
        default_value: draft
      - name: source_commits
        label: Source Commits
        type: tags
        required: false
        show_in_list: false
        show_in_form: true
      - name: social_media_platform
        label: Social Media Platform
        type: multi-select
        required: false
        options: [X, LinkedIn, Bluesky, Dev.to]
        show_in_list: false
      - name: public_url
        label: Public URL
        type: url
        required: false
        show_in_list: false
    title_field: title
    description_field: content
    default_sort:
      field: generated_date
      direction: desc
"#;

fn registry() -> EntityRegistry {
    EntityRegistry::from_yaml(JOURNAL_YAML).unwrap()
}

fn record(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

#[test_log::test]
fn list_and_form_projections() {
    let registry = registry();
    let entry = registry.get("build_journal_entries").unwrap();

    let list: Vec<&str> = entry.list_fields().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(list, ["title", "content", "generated_date", "status"]);

    let form: Vec<&str> = entry.form_fields().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(form.len(), 7);
    assert_eq!(form[4], "source_commits");
}

#[test_log::test]
fn storage_types_for_every_column() {
    let registry = registry();
    let entry = registry.get("build_journal_entries").unwrap();
    let types: Vec<StorageType> = entry.fields.iter().map(|f| f.storage_type()).collect();
    assert_eq!(
        types,
        vec![
            StorageType::Text,
            StorageType::Text,
            StorageType::Date,
            StorageType::Text,
            StorageType::TextArray,
            StorageType::TextArray,
            StorageType::Text,
        ]
    );
}

#[test_log::test]
fn status_rule_is_parameterized_by_options() {
    let registry = registry();
    let status = registry
        .get("build_journal_entries")
        .and_then(|e| e.field("status"))
        .unwrap();
    let rule = status.validation_rule();
    assert!(!rule.is_optional());
    assert_eq!(
        rule.kind(),
        &RuleKind::OneOf(vec![
            "draft".into(),
            "scheduled".into(),
            "published".into(),
            "archived".into()
        ])
    );
}

#[test_log::test]
fn valid_record_is_normalized() {
    let registry = registry();
    let entry = registry.get("build_journal_entries").unwrap();

    let body = record(json!({
        "title": "Day 14: shipped billing",
        "content": "Wired up the webhook.",
        "generated_date": "2026-10-18",
        "status": "scheduled",
        "source_commits": ["a1b2c3"],
        "unexpected": "dropped"
    }));

    let accepted = validate_record(entry, &body).unwrap();
    assert_eq!(accepted.len(), 5);
    assert!(!accepted.contains_key("unexpected"));
    assert!(!accepted.contains_key("public_url"));
}

#[test_log::test]
fn invalid_record_reports_every_violation_in_field_order() {
    let registry = registry();
    let entry = registry.get("build_journal_entries").unwrap();

    let body = record(json!({
        "content": "Body",
        "generated_date": "2026-10-18",
        "status": "bogus",
        "public_url": "not a url"
    }));

    let violations = validate_record(entry, &body).unwrap_err();
    let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
    assert_eq!(fields, ["title", "status", "public_url"]);
    assert_eq!(violations[0].reason, ViolationReason::Missing);
    assert_eq!(violations[2].reason, ViolationReason::InvalidUrl);
}

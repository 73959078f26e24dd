//! Loading entity and pricing configuration from files and the environment.

use std::env;
use std::fs;
use std::sync::Arc;

use serial_test::serial;
use shiplog_config::{ConfigError, ConfigProvider, FileDiscovery};
use tempfile::TempDir;

const PROJECT_YAML: &str = r#"
pricing:
  model: free-trial
  trial_days: 7
  default_limits:
    entities: 2
  plans:
    - id: trial
      name: Trial
      price: { monthly: 0 }
      limits: { entities: 2 }
    - id: studio
      name: Studio
      price: { monthly: 29, yearly: 290 }
      price_id: "${SHIPLOG_IT_STUDIO_PRICE}"
      yearly_price_id: "${SHIPLOG_IT_STUDIO_YEARLY:-price_studio_yearly}"
      limits: { entities: -1 }
"#;

fn provider_for(project: &TempDir) -> ConfigProvider {
    ConfigProvider::new().with_discovery(FileDiscovery::with_directories(
        Some(project.path().to_path_buf()),
        None,
    ))
}

fn clear_price_vars() {
    for var in [
        "SHIPLOG_IT_STUDIO_PRICE",
        "SHIPLOG_IT_STUDIO_YEARLY",
        "STRIPE_PRICE_STARTER",
        "STRIPE_PRICE_PRO",
        "STRIPE_PRICE_TEAM",
    ] {
        env::remove_var(var);
    }
}

#[test_log::test]
#[serial]
fn builtin_configuration_is_usable_without_files() {
    clear_price_vars();
    let empty = TempDir::new().unwrap();
    let loaded = provider_for(&empty).build().unwrap();

    let entry = loaded.registry.get("build_journal_entries").unwrap();
    let list: Vec<&str> = entry.list_fields().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(list, ["title", "content", "generated_date", "status"]);

    assert!(loaded.catalog.within_limit(Some("free"), "entities", 3));
    assert!(!loaded.catalog.within_limit(Some("free"), "entities", 4));
    assert!(loaded.catalog.is_paid_tier(Some("pro")));
    assert_eq!(loaded.catalog.resolve_plan_by_price_id(""), None);
}

#[test_log::test]
#[serial]
fn stripe_price_ids_come_from_the_environment() {
    clear_price_vars();
    env::set_var("STRIPE_PRICE_PRO", "price_live_pro");
    let empty = TempDir::new().unwrap();
    let loaded = provider_for(&empty).build();
    clear_price_vars();

    let catalog = loaded.unwrap().catalog;
    assert_eq!(catalog.resolve_plan_by_price_id("price_live_pro"), Some("pro"));
    assert_eq!(catalog.resolve_plan_by_price_id("price_live_starter"), None);
}

#[test_log::test]
#[serial]
fn project_file_replaces_plan_list() {
    clear_price_vars();
    env::set_var("SHIPLOG_IT_STUDIO_PRICE", "price_studio_monthly");
    let project = TempDir::new().unwrap();
    fs::write(project.path().join("shiplog.yaml"), PROJECT_YAML).unwrap();
    let loaded = provider_for(&project).build();
    clear_price_vars();

    let loaded = loaded.unwrap();
    let catalog = &loaded.catalog;
    let ids: Vec<&str> = catalog.plans().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["trial", "studio"]);
    assert_eq!(catalog.trial_days(), Some(7));
    assert_eq!(catalog.resolve_plan_by_price_id("price_studio_monthly"), Some("studio"));
    assert_eq!(catalog.resolve_plan_by_price_id("price_studio_yearly"), Some("studio"));
    assert_eq!(catalog.resolve_plan("pro").id, "trial");

    // entities were not overridden
    assert_eq!(loaded.registry.len(), 1);
}

#[test_log::test]
#[serial]
fn invalid_pricing_is_rejected() {
    clear_price_vars();
    let project = TempDir::new().unwrap();
    fs::write(
        project.path().join("shiplog.json"),
        r#"{ "pricing": { "plans": [] } }"#,
    )
    .unwrap();

    let err = provider_for(&project).build().unwrap_err();
    assert!(matches!(err, ConfigError::Pricing(_)), "{err}");
}

#[test_log::test]
#[serial]
fn invalid_entity_is_rejected() {
    clear_price_vars();
    let project = TempDir::new().unwrap();
    fs::write(
        project.path().join("shiplog.yaml"),
        r#"
entities:
  - name: Broken
    plural_name: Brokens
    slug: brokens
    fields:
      - { name: title, label: Title, type: text }
    title_field: headline
    default_sort: { field: title }
"#,
    )
    .unwrap();

    let err = provider_for(&project).build().unwrap_err();
    assert!(matches!(err, ConfigError::Entities(_)), "{err}");
    assert!(err.to_string().contains("title_field references unknown field 'headline'"), "{err}");
}

#[test_log::test]
#[serial]
fn malformed_entity_is_a_shape_error() {
    clear_price_vars();
    let project = TempDir::new().unwrap();
    fs::write(
        project.path().join("shiplog.yaml"),
        r#"
entities:
  - name: Unsorted
    plural_name: Unsorted
    slug: unsorted
    fields:
      - { name: title, label: Title, type: text }
    title_field: title
"#,
    )
    .unwrap();

    let err = provider_for(&project).build().unwrap_err();
    assert!(matches!(err, ConfigError::Shape { .. }), "{err}");
    assert!(err.to_string().contains("default_sort"), "{err}");
}

#[test_log::test]
#[serial]
fn reload_swaps_handles_and_keeps_them_on_failure() {
    clear_price_vars();
    let project = TempDir::new().unwrap();
    let provider = provider_for(&project);
    let (registry, catalog) = provider.build().unwrap().into_handles();
    let before = catalog.load();

    fs::write(project.path().join("shiplog.yaml"), PROJECT_YAML).unwrap();
    provider.reload(&registry, &catalog).unwrap();
    assert_eq!(catalog.load().plans()[0].id, "trial");
    assert!(!Arc::ptr_eq(&before, &catalog.load()));

    let after_good = catalog.load();
    fs::write(project.path().join("shiplog.yaml"), "pricing:\n  plans: []\n").unwrap();
    assert!(provider.reload(&registry, &catalog).is_err());
    assert!(Arc::ptr_eq(&after_good, &catalog.load()));
    assert_eq!(registry.load().len(), 1);
}

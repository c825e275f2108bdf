use langstore_core::db::open_db_in_memory;
use langstore_core::{
    LanguageManager, LifecycleState, Locale, LocaleRegistry, LocalizedKey, SqliteExecutor,
    StoreConfig, StoreError,
};
use rusqlite::Connection;

fn locale(value: &str) -> Locale {
    value.parse().unwrap()
}

fn setup() -> Connection {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE multilanguage2 (key2 TEXT PRIMARY KEY, txt_en TEXT, txt_es TEXT);
         INSERT INTO multilanguage2 (key2, txt_en, txt_es) VALUES ('KEY_1', 'english_1', 'castellano_1');
         INSERT INTO multilanguage2 (key2, txt_en, txt_es) VALUES ('KEY_3', 'english_3', 'castellano_3');",
    )
    .unwrap();
    conn
}

fn manager(conn: &Connection) -> LanguageManager<SqliteExecutor<'_>> {
    let mut registry = LocaleRegistry::new();
    registry.register(locale("en"), "txt_en").unwrap();
    registry.register(locale("es"), "txt_es").unwrap();

    let mut manager = LanguageManager::new(
        StoreConfig::new("multilanguage2", "key2", locale("en")),
        registry,
        SqliteExecutor::new(conn),
    )
    .unwrap();
    manager.init();
    manager
}

fn lookup(
    manager: &LanguageManager<SqliteExecutor<'_>>,
    key: &str,
    requested: Option<&str>,
) -> Option<String> {
    let requested = requested.map(locale);
    manager.localized_value(key, requested.as_ref()).unwrap()
}

#[test]
fn resolves_requested_locales_through_fallback_chain() {
    let conn = setup();
    let manager = manager(&conn);

    assert_eq!(lookup(&manager, "KEY_1", Some("en")).as_deref(), Some("english_1"));
    assert_eq!(lookup(&manager, "KEY_1", Some("es")).as_deref(), Some("castellano_1"));
    assert_eq!(lookup(&manager, "KEY_1", Some("es_MX")).as_deref(), Some("castellano_1"));
    assert_eq!(lookup(&manager, "KEY_1", Some("es_ES_test")).as_deref(), Some("castellano_1"));
    assert_eq!(lookup(&manager, "KEY_1", Some("fr")).as_deref(), Some("english_1"));
    assert_eq!(lookup(&manager, "KEY_1", None).as_deref(), Some("english_1"));
    assert_eq!(lookup(&manager, "KEY_3", Some("es")).as_deref(), Some("castellano_3"));
}

#[test]
fn changing_default_locale_changes_fallback_target() {
    let conn = setup();
    let mut manager = manager(&conn);

    assert_eq!(lookup(&manager, "KEY_1", Some("fr")).as_deref(), Some("english_1"));
    manager.set_default_locale(locale("es"));
    assert_eq!(manager.default_locale(), &locale("es"));
    assert_eq!(lookup(&manager, "KEY_1", Some("fr")).as_deref(), Some("castellano_1"));
}

#[test]
fn config_reports_current_default_locale() {
    let conn = setup();
    let mut manager = manager(&conn);
    assert_eq!(manager.config().default_locale, locale("en"));

    manager.set_default_locale(locale("es"));
    assert_eq!(manager.config().default_locale, locale("es"));
    assert_eq!(manager.config().default_locale, *manager.default_locale());
    assert_eq!(manager.column_for(None), Some("txt_es"));
}

#[test]
fn unregistered_default_is_a_silent_miss() {
    let conn = setup();
    let mut manager = manager(&conn);
    manager.set_default_locale(locale("de"));

    assert_eq!(manager.normalize_locale(Some(&locale("fr"))), locale("fr"));
    assert_eq!(manager.column_for(Some(&locale("fr"))), None);
    assert_eq!(lookup(&manager, "KEY_1", Some("fr")), None);
    assert_eq!(lookup(&manager, "KEY_1", Some("es_AR")).as_deref(), Some("castellano_1"));
}

#[test]
fn column_for_reports_resolved_column() {
    let conn = setup();
    let manager = manager(&conn);
    assert_eq!(manager.column_for(Some(&locale("es_CL"))), Some("txt_es"));
    assert_eq!(manager.column_for(None), Some("txt_en"));
}

#[test]
fn lifecycle_guards_every_operation() {
    let conn = setup();
    let mut manager = manager(&conn);
    assert!(manager.is_initialized());

    manager.destroy();
    assert_eq!(manager.state(), LifecycleState::Destroyed);

    let en = locale("en");
    let new_key = [LocalizedKey::new("NEW", vec![]).with_value(locale("en"), "new")];
    let results: Vec<Result<(), StoreError>> = vec![
        manager.localized_value("KEY_1", Some(&en)).map(|_| ()),
        manager.locale_values("KEY_1").map(|_| ()),
        manager.add_keys(&new_key).map(|_| ()),
        manager.set_keys(&new_key).map(|_| ()),
        manager.remove_key("KEY_1").map(|_| ()),
        manager.duplicate_key("KEY_1", "COPY").map(|_| ()),
        manager.export_key("KEY_1").map(|_| ()),
        manager.export_keys(&["KEY_1"]).map(|_| ()),
    ];
    for result in results {
        assert!(matches!(result, Err(StoreError::Lifecycle(_))));
    }

    // Guarded calls left the table untouched.
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM multilanguage2", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 2);

    manager.init();
    assert_eq!(lookup(&manager, "KEY_1", Some("en")).as_deref(), Some("english_1"));

    manager.destroy();
    manager.init();
    assert_eq!(lookup(&manager, "KEY_1", Some("es")).as_deref(), Some("castellano_1"));
}

#[test]
fn fresh_manager_is_uninitialized() {
    let conn = setup();
    let manager = LanguageManager::new(
        StoreConfig::new("multilanguage2", "key2", locale("en")),
        LocaleRegistry::with_locales([locale("en")]).unwrap(),
        SqliteExecutor::new(&conn),
    )
    .unwrap();

    assert_eq!(manager.state(), LifecycleState::Uninitialized);
    assert!(matches!(
        manager.localized_value("KEY_1", None).unwrap_err(),
        StoreError::Lifecycle(_)
    ));
}

#[test]
fn write_operations_round_trip_through_manager() {
    let conn = setup();
    let manager = manager(&conn);

    manager
        .add_keys(&[
            LocalizedKey::new("KEY_INSERT", vec![])
                .with_value(locale("en"), "inserted")
                .with_value(locale("es"), "insertada"),
            LocalizedKey::new("KEY_INSERT_2", vec![])
                .with_value(locale("en"), "inserted 2")
                .with_value(locale("es"), "insertada 2"),
        ])
        .unwrap();
    assert_eq!(lookup(&manager, "KEY_INSERT_2", Some("es")).as_deref(), Some("insertada 2"));

    manager
        .set_keys(&[LocalizedKey::new("KEY_INSERT", vec![]).with_value(locale("en"), "updated")])
        .unwrap();
    assert_eq!(lookup(&manager, "KEY_INSERT", Some("en")).as_deref(), Some("updated"));
    assert_eq!(lookup(&manager, "KEY_INSERT", Some("es")).as_deref(), Some("insertada"));

    manager.duplicate_key("KEY_3", "DUPLICATED_KEY").unwrap();
    assert_eq!(
        manager.locale_values("DUPLICATED_KEY").unwrap(),
        manager.locale_values("KEY_3").unwrap()
    );

    assert_eq!(manager.remove_key("KEY_INSERT").unwrap(), 1);
    assert_eq!(lookup(&manager, "KEY_INSERT", Some("en")), None);

    assert_eq!(
        manager.export_key("KEY_1").unwrap(),
        "INSERT INTO multilanguage2 (key2, txt_en, txt_es) VALUES ('KEY_1', 'english_1', 'castellano_1');"
    );
}

//! Export localized keys from a SQLite database as an INSERT script.
//!
//! ```bash
//! langstore app.db multilanguage key en,es=txt_es,pt_BR KEY_1 KEY_2
//! langstore --log-dir /tmp/langstore-logs --log-level debug app.db multilanguage key en KEY_1
//! ```

use clap::Parser;
use langstore_core::db::open_db;
use langstore_core::{
    default_log_level, init_logging, LanguageManager, Locale, LocaleRegistry, SqliteExecutor,
    StoreConfig,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "langstore")]
#[command(version)]
#[command(about = "Export localized keys as an executable INSERT script")]
struct Args {
    /// SQLite database file
    db_path: PathBuf,

    /// Table holding one row per key
    table: String,

    /// Key column of that table
    key_column: String,

    /// Comma-separated `locale[=column]` list; the first locale is the default
    locales: String,

    /// Keys to export, in output order
    #[arg(required = true)]
    keys: Vec<String>,

    /// Write rolling log files into this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log level when --log-dir is set
    #[arg(long, default_value = default_log_level())]
    log_level: String,
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(script) => {
            println!("{script}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("langstore: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<String, Box<dyn Error>> {
    if let Some(log_dir) = &args.log_dir {
        let log_dir = std::env::current_dir()?.join(log_dir);
        init_logging(&args.log_level, &log_dir.to_string_lossy())?;
    }

    let registry = parse_registry(&args.locales)?;
    let default_locale = registry
        .locales()
        .next()
        .cloned()
        .ok_or("at least one locale is required")?;

    let conn = open_db(&args.db_path)?;
    let mut manager = LanguageManager::new(
        StoreConfig::new(args.table.as_str(), args.key_column.as_str(), default_locale),
        registry,
        SqliteExecutor::new(&conn),
    )?;
    manager.init();

    let keys: Vec<&str> = args.keys.iter().map(String::as_str).collect();
    let script = manager.export_keys(&keys)?;
    manager.destroy();
    Ok(script)
}

/// Parses `en,es=txt_es,pt_BR` into a registry; columns default to the locale text.
fn parse_registry(locales: &str) -> Result<LocaleRegistry, Box<dyn Error>> {
    let mut registry = LocaleRegistry::new();
    for entry in locales.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
        let (locale_text, column) = match entry.split_once('=') {
            Some((locale_text, column)) => (locale_text, column.trim()),
            None => (entry, ""),
        };
        let locale: Locale = locale_text.trim().parse()?;
        let column = if column.is_empty() {
            locale.to_string()
        } else {
            column.to_string()
        };
        registry.register(locale, column)?;
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::{parse_registry, run, Args};
    use langstore_core::db::open_db;
    use clap::error::ErrorKind;
    use clap::Parser;

    #[test]
    fn parses_locales_with_optional_columns() {
        let args = Args::try_parse_from([
            "langstore",
            "app.db",
            "multilanguage",
            "key",
            "en, es=txt_es,pt-br",
            "KEY_1",
        ])
        .expect("valid args");
        let registry = parse_registry(&args.locales).expect("registry");
        let columns: Vec<(String, &str)> = registry
            .columns()
            .map(|(locale, column)| (locale.to_string(), column))
            .collect();
        assert_eq!(
            columns,
            vec![
                ("en".to_string(), "en"),
                ("es".to_string(), "txt_es"),
                ("pt_BR".to_string(), "pt_BR"),
            ]
        );
    }

    #[test]
    fn help_and_version_are_not_failures() {
        let err = Args::try_parse_from(["langstore", "--help"]).expect_err("help exits early");
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);

        let err = Args::try_parse_from(["langstore", "--version"]).expect_err("version exits early");
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn rejects_missing_keys() {
        let err = Args::try_parse_from(["langstore", "app.db", "multilanguage", "key", "en"])
            .expect_err("keys are required");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn named_flags_and_defaults() {
        let args = Args::try_parse_from([
            "langstore",
            "--log-dir",
            "/tmp/langstore-logs",
            "--log-level",
            "warn",
            "app.db",
            "t",
            "k",
            "en",
            "A",
            "B",
        ])
        .expect("valid args");
        assert_eq!(args.log_dir.as_deref(), Some(std::path::Path::new("/tmp/langstore-logs")));
        assert_eq!(args.log_level, "warn");
        assert_eq!(args.keys, vec!["A".to_string(), "B".to_string()]);

        let args = Args::try_parse_from(["langstore", "app.db", "t", "k", "en", "A"])
            .expect("valid args");
        assert_eq!(args.log_dir, None);
        assert_eq!(args.log_level, langstore_core::default_log_level());
    }

    #[test]
    fn unsupported_log_level_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let args = Args::try_parse_from([
            "langstore",
            "--log-dir",
            dir.path().to_str().expect("utf-8 path"),
            "--log-level",
            "verbose",
            "app.db",
            "t",
            "k",
            "en",
            "A",
        ])
        .expect("valid args");
        let err = run(args).expect_err("bad level");
        assert!(err.to_string().contains("unsupported log level"));
    }

    #[test]
    fn exports_keys_from_database_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db_path = dir.path().join("strings.db");
        let conn = open_db(&db_path).expect("db");
        conn.execute_batch(
            "CREATE TABLE multilanguage (key TEXT PRIMARY KEY, en TEXT, txt_es TEXT);
             INSERT INTO multilanguage VALUES ('KEY_1', 'hello', 'hola');",
        )
        .expect("seed");
        drop(conn);

        let args = Args::try_parse_from([
            "langstore",
            db_path.to_str().expect("utf-8 path"),
            "multilanguage",
            "key",
            "en,es=txt_es",
            "KEY_1",
        ])
        .expect("valid args");
        assert_eq!(
            run(args).expect("export"),
            "INSERT INTO multilanguage (key, en, txt_es) VALUES ('KEY_1', 'hello', 'hola');"
        );
    }
}

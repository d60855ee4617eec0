//! Command-line front end for the localization engine.
//!
//! Usage:
//!   acadeva-i18n get                    # Print the current language
//!   acadeva-i18n set <he|en>            # Persist a language
//!   acadeva-i18n toggle                 # Switch to the other language
//!   acadeva-i18n resolve <key> [he|en]  # Resolve a key (default: current language)
//!   acadeva-i18n render <page.json>     # Translate a JSON document and print it
//!
//! Optional environment variables (a `.env` file is honored):
//! - ACADEVA_TRANSLATIONS (defaults to translations.json)
//! - ACADEVA_STATE_FILE (defaults to .acadeva-state.json)
//! - ACADEVA_STORAGE_KEY (defaults to acadeva-lang)
//! - ACADEVA_DEFAULT_LANG (defaults to he)
//! - ACADEVA_REFRESH_DELAY_MS (defaults to 100)

use acadeva_i18n::config::Config;
use acadeva_i18n::dom::MemoryDocument;
use acadeva_i18n::{FileStorage, Language, LanguageStore, ToggleController, TranslationTable};
use anyhow::{bail, Context, Result};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("acadeva_i18n=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut store = LanguageStore::with_options(
        FileStorage::new(&config.state_file),
        config.storage_key.clone(),
        config.default_language,
    );

    match args.first().map(String::as_str) {
        Some("get") => {
            println!("{}", store.get());
        }
        Some("set") => {
            let code = args.get(1).context("usage: set <he|en>")?;
            let language = store.set_code(code)?;
            info!("Language set to '{}'", language);
            println!("{}", language);
        }
        Some("toggle") => {
            let table = load_table(&config)?;
            let mut controller = build_controller(store, MemoryDocument::new(), table, &config);
            let report = controller.toggle()?;
            println!("{}", report.language);
        }
        Some("resolve") => {
            let key = args.get(1).context("usage: resolve <key> [he|en]")?;
            let language = match args.get(2) {
                Some(code) => Language::from_code(code)?,
                None => store.get(),
            };
            let table = load_table(&config)?;
            match table.resolve(key, language) {
                Some(text) => println!("{}", text),
                None => bail!("No translation for '{}' in '{}'", key, language),
            }
        }
        Some("render") => {
            let path = args.get(1).context("usage: render <page.json>")?;
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read document {}", path))?;
            let document: MemoryDocument =
                serde_json::from_str(&contents).context("Failed to parse document JSON")?;

            let table = load_table(&config)?;
            let mut controller = build_controller(store, document, table, &config);
            let report = controller
                .init()
                .context("Document was already initialized")?;

            println!("{}", serde_json::to_string_pretty(controller.dom())?);
            eprintln!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            bail!("usage: acadeva-i18n <get|set|toggle|resolve|render> [args]");
        }
    }

    Ok(())
}

fn load_table(config: &Config) -> Result<Arc<TranslationTable>> {
    let table = TranslationTable::from_path(&config.translations_file)
        .with_context(|| format!("Failed to load translations from {}", config.translations_file))?;
    info!("Loaded {} translation keys", table.len());
    Ok(Arc::new(table))
}

fn build_controller(
    store: LanguageStore<FileStorage>,
    document: MemoryDocument,
    table: Arc<TranslationTable>,
    config: &Config,
) -> ToggleController<FileStorage, MemoryDocument> {
    ToggleController::new(store, document, table).with_refresh_delay(config.refresh_delay)
}

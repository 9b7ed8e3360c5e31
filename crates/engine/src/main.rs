//! Talkbook Engine - Main entry point.
//!
//! ```text
//! talkbook-engine                        load, heal ids, apply saved progress
//! talkbook-engine <kind>                 list the queryable fields of <kind>
//! talkbook-engine <kind> <field> <value> print matching entities as JSON
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use talkbook_engine::infrastructure::config::AppConfig;
use talkbook_engine::use_cases::query::{self, FieldValue, ModelKind};
use talkbook_engine::App;

const USAGE: &str = "usage: talkbook-engine [<kind> [<field> <value>]]";

fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "talkbook_engine=debug,talkbook_domain=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let [kind] = args.as_slice() {
        let kind: ModelKind = kind.parse()?;
        for field in query::fields(kind) {
            println!("{field}");
        }
        return Ok(());
    }

    let config = AppConfig::from_env();
    let mut app = App::from_config(&config);

    let summary = app.data.data()?.summary();
    tracing::info!(
        characters = summary.characters,
        interactables = summary.interactables,
        contexts = summary.contexts,
        messages = summary.messages,
        items = summary.items,
        quests = summary.quests,
        flags = summary.flags,
        "Dialogue data loaded"
    );

    match app.use_cases.progress.load.execute(&mut app.data) {
        Ok(Some(report)) => tracing::info!(
            applied = report.applied,
            skipped = report.skipped,
            "Saved progress applied"
        ),
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "Failed to load saved progress, continuing with authored state"),
    }

    match args.as_slice() {
        [] => Ok(()),
        [kind, field, raw] => {
            let kind: ModelKind = kind.parse()?;
            let value = FieldValue::parse(field, query::field_type(kind, field)?, raw)?;
            let matches = app.data.find(kind, field, &value)?;
            println!("{}", serde_json::to_string_pretty(&matches)?);
            Ok(())
        }
        _ => anyhow::bail!(USAGE),
    }
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
    // Then the working directory.
    let _ = dotenvy::dotenv();
}

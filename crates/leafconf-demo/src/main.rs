//! leafconf demo entry point.
//!
//! Shows the intended ownership model: the application's startup routine
//! constructs the one `Config` it needs and passes it around explicitly.
//! There is no global config object.
//!
//! ```text
//! main()
//!  └─ Config::new()          -- loads demo.toml or falls back to defaults
//!  └─ subscribe observer     -- logs every change
//!  └─ bump port via ObservableValue, commit with Config::modify
//!  └─ print JSON / YAML exports
//!  └─ Config::shutdown()     -- saves (policy OnDrop) and reports errors
//! ```
//!
//! Usage: `leafconf-demo [FOLDER]` (defaults to the current directory).
//! Log level is controlled by `RUST_LOG`.

mod settings;

use std::path::PathBuf;

use anyhow::Context;
use leafconf::{observer_fn, Config, Format, ObservableValue, SavingPolicy, Subject};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::settings::DemoSettings;

fn main() -> anyhow::Result<()> {
    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let folder = match std::env::args_os().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => std::env::current_dir().context("could not determine current directory")?,
    };
    info!(folder = %folder.display(), "leafconf demo starting");

    let mut config = Config::new(
        "demo.toml",
        &folder,
        SavingPolicy::OnDrop,
        DemoSettings::default(),
    );

    let logger = observer_fn(|event| info!(%event, "settings changed"));
    config.values.subscribe(&logger);

    // ── Fine-grained change tracking ──────────────────────────────────────────
    let mut port = ObservableValue::new(config.values.ip_address.port, |p: &u16| {
        info!(port = *p, "port changed");
    });
    let next = port.get().checked_add(1).unwrap_or(1);
    if port.set(next) {
        let committed = *port;
        config.modify(|v| v.ip_address.port = committed);
    }

    // ── Exports ───────────────────────────────────────────────────────────────
    let json = config.export(Format::Json).context("JSON export failed")?;
    println!("{json}");
    let yaml = config.export(Format::Yaml).context("YAML export failed")?;
    println!("{yaml}");

    let path = config.path().to_path_buf();
    config
        .shutdown()
        .with_context(|| format!("failed to save {}", path.display()))?;
    info!(path = %path.display(), "leafconf demo stopped");
    Ok(())
}

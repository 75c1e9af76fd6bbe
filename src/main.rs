//! llm-bridge binary entry point

use color_eyre::{eyre::eyre, Result};
use llm_bridge::{
    cli::{Cli, Commands, Info},
    config::Settings,
};
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter};

const VERBOSE_FILTER: &str = "llm_bridge=debug";

fn main() -> Result<()> {
    // Install error handler
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Set up logging before anything else so settings loading is traced
    let initial = if cli.verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let (filter, filter_handle) = reload::Layer::new(initial);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let path = cli.settings_path();
    tracing::debug!(path = %path.display(), "Using settings file");

    // `config --set` edits the stored file directly so a broken file can be fixed
    if let Some(Commands::Config {
        set: Some(key),
        value,
        ..
    }) = &cli.command
    {
        let value = value.as_deref().ok_or_else(|| eyre!("--set requires --value"))?;
        let stored = Settings::update_file(&path, key, value)?;
        println!("Set {key} = {}", stored.get(key)?);
        return Ok(());
    }

    let settings = cli.load_settings()?;
    if settings.verbose && !cli.verbose {
        filter_handle.reload(EnvFilter::new(VERBOSE_FILTER))?;
    }
    tracing::debug!(llm_type = %settings.llm_type, tags = ?settings.tags, "Effective settings");

    // Handle commands
    match cli.command {
        Some(Commands::Info { json }) => {
            let info = Info::from_settings(&settings);
            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("llm_type:     {}", info.llm_type);
                println!("tags:         {}", info.tags.join(","));
                println!("host support: {}", if info.host_support { "yes" } else { "no" });
            }
        }
        Some(Commands::Config { get, list, .. }) => {
            if list {
                for (key, value) in settings.entries() {
                    println!("{key} = {value}");
                }
            } else if let Some(key) = get {
                println!("{}", settings.get(&key)?);
            } else {
                println!("Use --list, --get <key> or --set <key> --value <value>");
            }
        }
        Some(Commands::Version) => {
            println!("llm-bridge version {}", env!("CARGO_PKG_VERSION"));
        }
        None => {
            println!("Use --help for more information");
        }
    }

    Ok(())
}

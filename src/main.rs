use std::path::PathBuf;

use anyhow::{bail, Context};
use plantrace::{init_logging, Config, Session, SettingsPersistence, BUILD_DATE, VERSION};

const USAGE: &str = "Usage: plantrace [--config <settings.toml|json>] <session.json>";

struct Args {
    config: Option<PathBuf>,
    script: PathBuf,
}

fn parse_args() -> anyhow::Result<Option<Args>> {
    let mut config = None;
    let mut script = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => {
                println!("plantrace {} ({})", VERSION, BUILD_DATE);
                return Ok(None);
            }
            "--help" | "-h" => {
                println!("{}", USAGE);
                return Ok(None);
            }
            "--config" | "-c" => {
                let path = args.next().context("--config needs a path")?;
                config = Some(PathBuf::from(path));
            }
            _ if script.is_none() => script = Some(PathBuf::from(arg)),
            other => bail!("Unexpected argument '{}'\n{}", other, USAGE),
        }
    }
    match script {
        Some(script) => Ok(Some(Args { config, script })),
        None => bail!("{}", USAGE),
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => match SettingsPersistence::load_default() {
            Ok(persistence) => Ok(persistence.config().clone()),
            Err(e) => {
                tracing::warn!("Using default settings: {}", e);
                Ok(Config::default())
            }
        },
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;

    let Some(args) = parse_args()? else {
        return Ok(());
    };
    let config = load_config(args.config.as_ref())?;

    let mut session = Session::new(config);
    session.run_script_file(&args.script)?;

    let quote = session.quote();
    tracing::info!("Quote has {} lines, total {}", quote.lines.len(), quote.total);
    println!("{}", serde_json::to_string_pretty(&quote)?);

    Ok(())
}

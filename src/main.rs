use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;

use metrics_viewer::cli::{parse_args, Cli, Commands};
use metrics_viewer::commands::{handle_explore, handle_pack, handle_summary, loader_options};
use metrics_viewer::config::resolve_config;

fn main() -> Result<()> {
    let cli = parse_args();
    init_logging(&cli)?;

    let config = resolve_config(cli.config.as_deref());
    log::debug!("Resolved config: {:?}", config);
    let options = loader_options(&config, cli.no_fast_inflate);

    match cli.command {
        Commands::Explore { payload } => {
            handle_explore(&payload, options, config.file_dedupe, config.prefs_path)
        }
        Commands::Summary { payload, top } => {
            handle_summary(&payload, options, config.file_dedupe, top)
        }
        Commands::Pack { json, output } => handle_pack(&json, output.as_deref()),
    }
}

/// `RUST_LOG` wins; otherwise warnings, or errors only while the explorer
/// owns the terminal and nothing else would capture the output.
fn init_logging(cli: &Cli) -> Result<()> {
    let default_level = if cli.command.is_interactive() && cli.log_file.is_none() {
        "error"
    } else {
        "warn"
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));

    if let Some(path) = cli.log_file.as_deref() {
        builder.target(env_logger::Target::Pipe(Box::new(open_log(path)?)));
    }
    builder.init();
    Ok(())
}

fn open_log(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("Failed to create log file {}", path.display()))
}

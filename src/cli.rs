use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "metrics-viewer")]
#[command(about = "Interactive explorer for source code metrics reports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to the nearest .metrics-viewer.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write log output to this file
    #[arg(long = "log-file", global = true)]
    pub log_file: Option<PathBuf>,

    /// Always use the fallback inflater
    #[arg(
        long = "no-fast-inflate",
        global = true,
        env = crate::loader::NO_FAST_INFLATE_ENV
    )]
    pub no_fast_inflate: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open a payload in the terminal explorer
    Explore {
        /// Encoded payload file, or - for stdin
        payload: PathBuf,
    },

    /// Print summary cards, heatmap and top complexity findings
    Summary {
        /// Encoded payload file, or - for stdin
        payload: PathBuf,

        /// Number of methods listed under findings
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Encode a metrics JSON document as a payload
    Pack {
        /// Metrics JSON document, or - for stdin
        json: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Commands {
    /// Whether the command takes over the terminal.
    pub fn is_interactive(&self) -> bool {
        matches!(self, Commands::Explore { .. })
    }
}

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "metrics-viewer",
            "summary",
            "report.b64",
            "--no-fast-inflate",
            "--top",
            "3",
        ])
        .unwrap();
        assert!(cli.no_fast_inflate);
        match cli.command {
            Commands::Summary { payload, top } => {
                assert_eq!(payload, PathBuf::from("report.b64"));
                assert_eq!(top, 3);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_pack_output() {
        let cli =
            Cli::try_parse_from(["metrics-viewer", "pack", "-", "-o", "out.b64"]).unwrap();
        assert!(!cli.command.is_interactive());
        assert!(matches!(
            cli.command,
            Commands::Pack { output: Some(_), .. }
        ));
    }

    #[test]
    fn test_explore_is_interactive() {
        let cli = Cli::try_parse_from(["metrics-viewer", "explore", "r.b64"]).unwrap();
        assert!(cli.command.is_interactive());
    }
}

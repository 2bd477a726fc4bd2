use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "calcgate",
    about = "calcgate - origin-guarded AI gateway with provider fallback",
    version = env!("CARGO_PKG_VERSION"),
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, env = "CALCGATE_CONFIG", help = "Path to a JSON config file")]
    pub config: Option<PathBuf>,

    #[arg(short, long, env = "CALCGATE_PORT", help = "Override the listen port")]
    pub port: Option<u16>,

    #[arg(long, env = "CALCGATE_HOST", help = "Override the bind address")]
    pub host: Option<String>,

    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    #[command(about = "Start the gateway (default if no command specified)")]
    Serve,

    #[command(about = "Print the effective configuration with credentials masked")]
    Config {
        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Validate the configuration and exit")]
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_no_subcommand() {
        let cli = Cli::try_parse_from(["calcgate"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_config_json_flag() {
        let cli = Cli::try_parse_from(["calcgate", "--port", "9000", "config", "--json"]).unwrap();
        assert_eq!(cli.port, Some(9000));
        assert_eq!(cli.command, Some(Commands::Config { json: true }));
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(Cli::try_parse_from(["calcgate", "--port", "http"]).is_err());
    }
}

//! Command-line configuration.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// XLSX to Parquet conversion and merge service.
#[derive(Debug, Parser)]
#[command(name = "sheetpress-server")]
#[command(author, version, about = "XLSX to Parquet conversion and merge service", long_about = None)]
pub struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// JSON file overriding the built-in text normalization rules
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bind_address() {
        let cli = Cli::try_parse_from(["sheetpress-server"]).unwrap();
        assert_eq!(cli.bind.to_string(), "0.0.0.0:3000");
        assert!(cli.rules.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_flags_parse() {
        let cli = Cli::try_parse_from([
            "sheetpress-server",
            "--bind",
            "127.0.0.1:8080",
            "--rules",
            "/etc/sheetpress/rules.json",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.bind.to_string(), "127.0.0.1:8080");
        assert_eq!(
            cli.rules.as_deref(),
            Some(std::path::Path::new("/etc/sheetpress/rules.json"))
        );
        assert!(cli.verbose);
    }

    #[test]
    fn test_invalid_bind_rejected() {
        let result = Cli::try_parse_from(["sheetpress-server", "--bind", "not-an-address"]);
        assert!(result.is_err());
    }
}

//! CLI argument parsing via clap.

use clap::Parser;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("SCOUT_BUILD_GIT_HASH"),
    " ",
    env!("SCOUT_BUILD_TIMESTAMP"),
    ")"
);

/// A directory-aware assistant for the terminal.
#[derive(Debug, Parser)]
#[command(name = "scout", version, long_version = LONG_VERSION)]
pub struct Args {
    /// Path to config file (default: ./scout.toml or ~/.config/scout/scout.toml).
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Override the model identifier.
    #[arg(short = 'm', long = "model")]
    pub model: Option<String>,

    /// Override the API base URL.
    #[arg(long = "base-url")]
    pub base_url: Option<String>,

    /// Disable color output.
    #[arg(long = "no-color")]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;

    #[test]
    fn parses_overrides() {
        let args = Args::parse_from(["scout", "-m", "sonar-pro", "--base-url", "http://x"]);
        assert_eq!(args.model.as_deref(), Some("sonar-pro"));
        assert_eq!(args.base_url.as_deref(), Some("http://x"));
        assert!(!args.no_color);
    }

    #[test]
    fn parses_no_color_flag() {
        let args = Args::parse_from(["scout", "--no-color"]);
        assert!(args.no_color);
    }
}

//! Command-line interface definitions for Goal Watch.
//!
//! Flags that carry secrets or deployment switches can also come from the
//! environment.

use clap::builder::FalseyValueParser;
use clap::Parser;

/// Command-line arguments for the Goal Watch application.
///
/// # Examples
///
/// ```sh
/// # Print today's announcement without posting it
/// goal_watch --once --dry-run
///
/// # Post every day at the configured time
/// GOAL_WATCH_PUBLISH_TOKEN=... goal_watch -c ./goal_watch.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Print the announcement instead of publishing it
    #[arg(long, env = "GOAL_WATCH_DRY_RUN", value_parser = FalseyValueParser::new())]
    pub dry_run: bool,

    /// Run once and exit instead of waiting for the daily schedule
    #[arg(long)]
    pub once: bool,

    /// Reporting period label (defaults to the config value, then the current year)
    #[arg(short, long)]
    pub period: Option<String>,

    /// Bearer token sent to the publisher endpoint
    #[arg(long, env = "GOAL_WATCH_PUBLISH_TOKEN", hide_env_values = true)]
    pub publish_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["goal_watch"]);
        assert_eq!(cli.config, None);
        assert!(!cli.once);
        assert_eq!(cli.period, None);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "goal_watch",
            "-c",
            "/etc/goal_watch.yaml",
            "--once",
            "--dry-run",
            "-p",
            "2023",
        ]);
        assert_eq!(cli.config.as_deref(), Some("/etc/goal_watch.yaml"));
        assert!(cli.once);
        assert!(cli.dry_run);
        assert_eq!(cli.period.as_deref(), Some("2023"));
    }
}

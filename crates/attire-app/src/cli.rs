use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// attire: outfit recommendations from a language model.
#[derive(Parser, Debug)]
#[command(name = "attire", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level or filter directive (debug, info, attire_ai=trace, ...).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Serve the panel over stdio as JSON lines (default).
    Panel,
    /// Ask for a single recommendation and print it.
    Advise(AdviseArgs),
    /// Print the model's default generation parameters.
    Defaults,
    /// Print the effective configuration as JSON.
    Config,
}

#[derive(clap::Args, Debug, Clone, PartialEq)]
pub struct AdviseArgs {
    /// Weather condition, one of the configured options.
    #[arg(short, long)]
    pub weather: String,

    /// Occasion, one of the configured options.
    #[arg(short, long)]
    pub occasion: String,

    /// Free-text preferences.
    #[arg(short, long)]
    pub preferences: Option<String>,

    /// Sampling temperature override.
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Sampling breadth override.
    #[arg(long)]
    pub top_k: Option<u32>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_panel() {
        let args = Args::try_parse_from(["attire"]).unwrap();
        assert_eq!(args.command, None);
        assert!(args.config.is_none());
    }

    #[test]
    fn advise_with_overrides() {
        let args = Args::try_parse_from([
            "attire",
            "advise",
            "--weather",
            "Rainy",
            "-o",
            "Business Meeting",
            "--preferences",
            "prefer dark colors",
            "--temperature",
            "0.5",
            "--top-k",
            "8",
        ])
        .unwrap();
        let Some(Command::Advise(advise)) = args.command else {
            panic!("expected advise");
        };
        assert_eq!(advise.weather, "Rainy");
        assert_eq!(advise.occasion, "Business Meeting");
        assert_eq!(advise.preferences.as_deref(), Some("prefer dark colors"));
        assert_eq!(advise.temperature, Some(0.5));
        assert_eq!(advise.top_k, Some(8));
    }

    #[test]
    fn advise_requires_weather_and_occasion() {
        assert!(Args::try_parse_from(["attire", "advise", "--weather", "Sunny"]).is_err());
    }

    #[test]
    fn global_options_after_subcommand() {
        let args =
            Args::try_parse_from(["attire", "defaults", "--config", "/tmp/a.toml", "--log-level", "debug"])
                .unwrap();
        assert_eq!(args.command, Some(Command::Defaults));
        assert_eq!(args.config, Some(PathBuf::from("/tmp/a.toml")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }
}

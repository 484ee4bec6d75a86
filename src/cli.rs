// File: cli.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::config::{self, OutputFormat, ProbeConfig};
use clap::builder::TypedValueParser;
use clap::{Parser, ValueEnum};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = env!("CARGO_PKG_DESCRIPTION"),
)]
pub struct Cli {
    #[arg(
        short = 'f',
        long = "file",
        help = "Read candidate IPs from this file instead of stdin"
    )]
    pub file: Option<String>,

    #[arg(short = 'u', long = "url", default_value = config::DEFAULT_TARGET, help = "URL to check")]
    pub url: String,

    #[arg(
        short = 'm',
        long = "mbytes",
        default_value_t = config::DEFAULT_MATCH_BYTES,
        value_parser = clap::value_parser!(u64).range(1..).map(|v| v as usize),
        help = "Compare only the first N bytes of each response"
    )]
    pub match_bytes: usize,

    #[arg(
        short = 'p',
        long = "perc",
        default_value_t = config::DEFAULT_THRESHOLD,
        value_parser = clap::value_parser!(i32).range(0..=100),
        help = "Report a match above this similarity percentage"
    )]
    pub threshold: i32,

    #[arg(
        short = 'w',
        long = "workers",
        default_value_t = config::DEFAULT_WORKERS,
        value_parser = clap::value_parser!(u64).range(1..).map(|v| v as usize),
        help = "Number of concurrent workers"
    )]
    pub workers: usize,

    #[arg(
        short = 't',
        long = "timeout",
        default_value_t = config::DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Per-request timeout in seconds"
    )]
    pub timeout: u64,

    #[arg(short = 'a', long = "ua", help = "User agent, otherwise a random browser one")]
    pub user_agent: Option<String>,

    #[arg(short = 's', long = "show", help = "Show sample responses")]
    pub show_samples: bool,

    #[arg(long = "format", value_enum, default_value_t = FormatArg::Text)]
    pub format: FormatArg,

    #[arg(long = "log-level", default_value = "info")]
    pub log_level: String,

    #[arg(
        long = "suppress-stats",
        help = "Suppress the run summary"
    )]
    pub suppress_stats: bool,

    #[arg(long = "no-color", help = "Disable colored output")]
    pub no_color: bool,
}

impl Cli {
    pub fn to_config(&self, user_agent: String) -> ProbeConfig {
        let mut config = ProbeConfig::new();
        config.set_target(self.url.clone());
        config.set_user_agent(user_agent);
        config.set_timeout(Duration::from_secs(self.timeout));
        config.set_match_bytes(self.match_bytes);
        config.set_threshold(self.threshold);
        config.set_workers(self.workers);
        config.set_show_samples(self.show_samples);
        config.set_output_format(self.format.into());
        config
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["curryfinder"]);
        assert_eq!(cli.file, None);
        assert_eq!(cli.url, "https://example.org");
        assert_eq!(cli.match_bytes, 500);
        assert_eq!(cli.threshold, 50);
        assert_eq!(cli.workers, 200);
        assert_eq!(cli.timeout, 30);
        assert_eq!(cli.user_agent, None);
        assert!(!cli.show_samples);
        assert_eq!(cli.format, FormatArg::Text);
        assert_eq!(cli.log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn test_to_config() {
        let cli = Cli::parse_from([
            "curryfinder",
            "-f",
            "ips.txt",
            "-u",
            "https://shop.example.com/",
            "-m",
            "1000",
            "-p",
            "75",
            "-w",
            "16",
            "-t",
            "5",
            "--show",
            "--format",
            "json",
        ]);
        let config = cli.to_config("curl/8.5.0".to_string());

        assert_eq!(cli.file.as_deref(), Some("ips.txt"));
        assert_eq!(config.target(), "https://shop.example.com/");
        assert_eq!(config.user_agent(), "curl/8.5.0");
        assert_eq!(config.match_bytes(), 1000);
        assert_eq!(config.threshold(), 75);
        assert_eq!(config.workers(), 16);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(config.show_samples());
        assert_eq!(config.output_format(), OutputFormat::Json);
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["curryfinder", "-p", "101"]).is_err());
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert!(Cli::try_parse_from(["curryfinder", "-w", "0"]).is_err());
    }

    #[test]
    fn test_zero_match_bytes_rejected() {
        assert!(Cli::try_parse_from(["curryfinder", "-m", "0"]).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(Cli::try_parse_from(["curryfinder", "-t", "0"]).is_err());
        let cli = Cli::parse_from(["curryfinder", "-t", "1"]);
        assert_eq!(cli.to_config(String::new()).timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_bad_log_level_falls_back() {
        let cli = Cli::parse_from(["curryfinder", "--log-level", "chatty"]);
        assert_eq!(cli.log_level(), log::LevelFilter::Info);
    }
}

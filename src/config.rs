//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

use crate::state::TimerConfig;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "countdown-timer")]
#[command(about = "A countdown timer service with derived completion messages and themes")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Initial countdown duration in seconds (1-60, anything else means 10)
    #[arg(short, long, default_value = "10")]
    pub duration: String,

    /// JSON file persisting the username; kept in memory when omitted
    #[arg(short, long)]
    pub store: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Initial timer configuration, with the same fallback as user input
    pub fn timer_config(&self) -> TimerConfig {
        TimerConfig::from_text(&self.duration)
    }
}

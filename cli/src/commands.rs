pub mod hosts;
pub mod inspect;
pub mod map;
pub mod watch;

use atlas_common::config::Config;
use atlas_core::filter::{FilterMode, FilterState};
use atlas_core::source::SourceSpec;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "atlas")]
#[command(about = "A live network topology explorer.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build and print the network topology
    #[command(alias = "m")]
    Map {
        /// API root (http://...) or snapshot file
        source: SourceSpec,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// List all discovered hosts
    #[command(alias = "h")]
    Hosts {
        /// API root (http://...) or snapshot file
        source: SourceSpec,
    },
    /// Show full detail for one node or route
    #[command(alias = "i")]
    Inspect {
        /// API root (http://...) or snapshot file
        source: SourceSpec,
        /// Node id (n-1-10.0.0.5, subnet-10.0.0, net-bridge, external)
        /// or route edge id
        id: String,
    },
    /// Poll the source and print topology changes
    #[command(alias = "w")]
    Watch {
        /// API root (http://...) or snapshot file
        source: SourceSpec,
        /// Seconds between polls
        #[arg(long, default_value_t = Config::default().poll_interval_secs)]
        interval: u64,
        /// Stop after this many polls
        #[arg(long)]
        count: Option<u64>,
    },
}

/// Visibility predicates shared by the filtering commands.
#[derive(Args)]
pub struct FilterArgs {
    /// Show containerized hosts only
    #[arg(long)]
    pub container_only: bool,
    /// Case-insensitive substring over address, name, os, mac and ports
    #[arg(long, short = 'f')]
    pub find: Option<String>,
    /// Exact operating system match
    #[arg(long)]
    pub os: Option<String>,
    /// Exact subnet key match (first three octets)
    #[arg(long)]
    pub subnet: Option<String>,
    /// Flag matches instead of hiding everything else
    #[arg(long)]
    pub highlight: bool,
}

impl FilterArgs {
    pub fn state(&self) -> FilterState {
        FilterState {
            container_only: self.container_only,
            text: self.find.clone().unwrap_or_default(),
            os: self.os.clone(),
            subnet: self.subnet.clone(),
        }
    }

    pub fn config(&self) -> Config {
        Config {
            highlight_matches: self.highlight,
            ..Config::default()
        }
    }

    pub fn mode(config: &Config) -> FilterMode {
        if config.highlight_matches {
            FilterMode::Highlight
        } else {
            FilterMode::Exclude
        }
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

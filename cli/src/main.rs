mod commands;
mod terminal;

use commands::{CommandLine, Commands, hosts, inspect, map, watch};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    terminal::logging::init();

    match commands.command {
        Commands::Map { source, filters } => map::map(&source, &filters).await,
        Commands::Hosts { source } => hosts::hosts(&source).await,
        Commands::Inspect { source, id } => inspect::inspect(&source, &id).await,
        Commands::Watch {
            source,
            interval,
            count,
        } => watch::watch(&source, interval, count).await,
    }
}

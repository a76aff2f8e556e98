use clap::{Parser, Subcommand};

mod error;
mod format;
mod linux;
#[cfg(test)]
mod mockfs;
#[cfg(test)]
mod mocksystem;
mod processor;
mod procfsapi;
mod realprocfs;
mod realsystem;
mod report;
mod systemapi;

use std::io;
use std::process;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level, including every value that fell back to its default
    #[arg(long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print OS, kernel, CPU and memory utilization, process counts and uptime
    System {},
    /// Print the pids currently in /proc
    Pids {},
    /// Print uid, user, CPU, RAM (MB), uptime and command for each pid
    Process {
        #[arg(required = true)]
        pids: Vec<usize>,
    },
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG overrides the level.
    if let Err(e) = simple_logger::SimpleLogger::new()
        .with_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .env()
        .init()
    {
        eprintln!("Could not initialize logging: {e}");
    }

    let system = realsystem::RealSystem::new();
    let mut stdout = io::stdout();
    let result = match &cli.command {
        Commands::System {} => report::show_system(&mut stdout, &system),
        Commands::Pids {} => report::show_pids(&mut stdout, &system),
        Commands::Process { pids } => {
            report::show_processes(&mut stdout, &system, pids);
            Ok(())
        }
    };
    if let Err(e) = result {
        log::error!("{e}");
        process::exit(1);
    }
}

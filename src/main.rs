use clap::Parser;
use hangar::cli::commands::Cli;
use hangar::cli::handlers;
use hangar::io::config_io;
use hangar::logging::{self, LogTarget};

fn main() {
    let cli = Cli::parse();

    // The TUI owns the terminal, so its log goes to a file
    if cli.command.is_none() {
        let log_path = config_io::state_dir().join("hangar.log");
        logging::init(LogTarget::File(&log_path));
    } else {
        logging::init(LogTarget::Stderr);
    }

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

use clap::Parser;
use tasky::cli::commands::Cli;

fn main() {
    let _cli = Cli::parse();

    if let Err(e) = tasky::tui::run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

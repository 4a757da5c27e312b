// src/main.rs
mod animation;
mod cli;
mod commands;
mod config;
mod error;
mod feedback;
mod models;
mod stats;
mod store;
mod strength;
mod tui;
mod verify;

use clap::Parser;

fn main() -> Result<(), error::AppError> {
    env_logger::init();
    log::info!("Starting passcheck");

    let cli_args = cli::Cli::parse();
    let config = config::load_config();
    let handler = cli::build_handler(&config, cli_args.data_dir);

    match cli::handle_cli_command(cli_args.command, &handler) {
        Ok(true) => {
            if let Err(e) = tui::run_tui(handler, &config) {
                log::error!("Application TUI error: {:#?}", e);
                eprintln!("Error: {}", e);
                return Err(e);
            }
        }
        Ok(false) => log::info!("CLI command processed."),
        Err(e) => {
            log::error!("Application failed: {:#?}", e);
            eprintln!("Error: {}", e);
            return Err(e);
        }
    }

    log::info!("passcheck finished successfully.");
    Ok(())
}

// src/cli.rs
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::commands::CommandHandler;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::feedback::ConfiguredFeedback;
use crate::store::{FileStorage, RecordStore};
use crate::strength;
use crate::tui;
use log;
use rpassword;

pub type AppHandler = CommandHandler<FileStorage, ConfiguredFeedback>;

/// Store website passwords locally, score their strength and check them.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(arg_required_else_help = false)] // no subcommand launches the TUI
pub struct Cli {
    /// Directory holding the password data (overrides the config file)
    #[clap(long, global = true, value_parser)]
    pub data_dir: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save a website/username/password entry
    Add {
        website: String,
        username: String,
        /// Password to store; prompted for if omitted
        #[clap(short, long)]
        password: Option<String>,
    },
    /// List saved entries with their strength
    List,
    /// Delete the entry at INDEX (as shown by `list`)
    Delete {
        index: usize,
        /// Skip the confirmation prompt
        #[clap(short, long)]
        yes: bool,
    },
    /// Remove every saved entry
    Clear {
        #[clap(short, long)]
        yes: bool,
    },
    /// Check a password against the entries saved for a website
    Verify {
        website: String,
        #[clap(short, long)]
        password: Option<String>,
    },
    /// Score a password without saving it
    Strength { password: Option<String> },
    /// Show total, weak count and average score
    Stats,
    /// List saved websites
    Sites,
    /// Copy the password at INDEX to the clipboard
    Copy { index: usize },
    /// Launch the Terminal User Interface (TUI)
    Tui,
}

pub fn build_handler(config: &Config, data_dir: Option<PathBuf>) -> AppHandler {
    let dir = data_dir.unwrap_or_else(|| config.resolved_data_dir());
    log::info!("Using data directory {:?}, slot '{}'", dir, config.storage_slot);
    CommandHandler::new(
        RecordStore::new(FileStorage::new(dir), config.storage_slot.clone()),
        ConfiguredFeedback::from_enabled(config.voice_feedback),
    )
}

fn prompt_password(prompt: &str) -> AppResult<String> {
    rpassword::prompt_password(prompt).map_err(|e| {
        log::error!("Failed to read password: {}", e);
        AppError::Cli(format!("Failed to read password: {}", e))
    })
}

fn confirm(prompt: &str) -> AppResult<bool> {
    print!("{} (y/N): ", prompt);
    io::stdout().flush().map_err(|e| {
        log::error!("Failed to flush stdout for confirmation: {}", e);
        AppError::Cli(format!("Failed to flush stdout: {}", e))
    })?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer).map_err(|e| {
        log::error!("Failed to read confirmation: {}", e);
        AppError::Cli(format!("Failed to read confirmation: {}", e))
    })?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

/// Handles the parsed CLI command.
/// Returns `Ok(true)` if the TUI should run, `Ok(false)` if a CLI command was handled.
pub fn handle_cli_command(command: Option<Commands>, handler: &AppHandler) -> AppResult<bool> {
    log::debug!("Handling CLI command: {:?}", command);
    match command {
        Some(Commands::Add { website, username, password }) => {
            let password = match password {
                Some(p) => p,
                None => prompt_password("Password: ")?,
            };
            let record = handler.on_save(&website, &username, &password)?;
            let score = strength::score(&record.password);
            println!(
                "Saved {} for {} ({} • {})",
                record.username,
                record.website,
                strength::classify(score),
                score
            );
            Ok(false)
        }
        Some(Commands::List) => {
            let collection = handler.snapshot();
            if collection.is_empty() {
                println!("No passwords saved.");
            } else {
                for (idx, record) in collection.iter().enumerate() {
                    let score = strength::score(&record.password);
                    println!(
                        "  [{}] {} | {} | {} • {}",
                        idx,
                        record.website,
                        record.username,
                        strength::classify(score),
                        score
                    );
                }
            }
            log::info!("Listed {} entries.", collection.len());
            Ok(false)
        }
        Some(Commands::Delete { index, yes }) => {
            let collection = handler.snapshot();
            let Some(record) = collection.get(index) else {
                println!("No entry at index {}.", index);
                return Ok(false);
            };
            if !yes && !confirm(&format!("Delete the password for {} ({})?", record.website, record.username))? {
                println!("Delete cancelled.");
                return Ok(false);
            }
            if handler.on_delete(index)? {
                println!("Password deleted.");
            }
            Ok(false)
        }
        Some(Commands::Clear { yes }) => {
            if !yes && !confirm("Clear all saved passwords?")? {
                println!("Clear cancelled.");
                return Ok(false);
            }
            handler.on_clear()?;
            println!("All passwords cleared.");
            Ok(false)
        }
        Some(Commands::Verify { website, password }) => {
            let password = match password {
                Some(p) => p,
                None => prompt_password("Password to verify: ")?,
            };
            if handler.on_verify(Some(&website), &password)? {
                println!("✅ Password Verified");
                Ok(false)
            } else {
                println!("❌ Incorrect Password");
                Err(AppError::Cli(format!("Password does not match any entry for {}", website)))
            }
        }
        Some(Commands::Strength { password }) => {
            let password = match password {
                Some(p) => p,
                None => prompt_password("Password to score: ")?,
            };
            let score = handler.on_check_strength(&password);
            println!("{}/100 ({})", score, strength::classify(score));
            Ok(false)
        }
        Some(Commands::Stats) => {
            let dashboard = handler.dashboard();
            println!("Total passwords: {}", dashboard.stats.total);
            println!("Weak passwords:  {}", dashboard.stats.weak_count);
            println!("Strong passwords: {}", dashboard.stats.strong_count());
            println!("Average score:   {}", dashboard.average_label());
            println!("Last check:      {}", dashboard.last_check_label());
            Ok(false)
        }
        Some(Commands::Sites) => {
            let collection = handler.snapshot();
            for site in collection.websites() {
                println!("{}", site);
            }
            Ok(false)
        }
        Some(Commands::Copy { index }) => {
            if handler.on_copy(index, tui::copy_to_clipboard)? {
                println!("Password copied to clipboard");
            } else {
                println!("No entry at index {}.", index);
            }
            Ok(false)
        }
        Some(Commands::Tui) => {
            log::info!("'tui' command given, preparing to launch TUI.");
            Ok(true)
        }
        None => {
            log::info!("No CLI command given, preparing to launch TUI by default.");
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn handler_in(dir: &std::path::Path) -> AppHandler {
        let config = Config { voice_feedback: false, ..Config::default() };
        build_handler(&config, Some(dir.to_path_buf()))
    }

    #[test]
    fn test_parse_add_with_password() {
        let cli = Cli::parse_from(["passcheck", "add", "mail.com", "ann", "--password", "Secret1!"]);
        match cli.command {
            Some(Commands::Add { website, username, password }) => {
                assert_eq!(website, "mail.com");
                assert_eq!(username, "ann");
                assert_eq!(password.as_deref(), Some("Secret1!"));
            }
            other => panic!("Expected Add, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_data_dir_after_subcommand() {
        let cli = Cli::parse_from(["passcheck", "list", "--data-dir", "/tmp/pc"]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/pc")));
        assert!(matches!(cli.command, Some(Commands::List)));
    }

    #[test]
    fn test_no_subcommand_runs_tui() {
        let dir = tempdir().unwrap();
        let handler = handler_in(dir.path());
        let cli = Cli::parse_from(["passcheck"]);
        assert!(handle_cli_command(cli.command, &handler).unwrap());
    }

    #[test]
    fn test_add_delete_clear_through_cli() {
        let dir = tempdir().unwrap();
        let handler = handler_in(dir.path());

        let add = |site: &str, pw: &str| Commands::Add {
            website: site.to_string(),
            username: "ann".to_string(),
            password: Some(pw.to_string()),
        };
        assert!(!handle_cli_command(Some(add("a.com", "abc")), &handler).unwrap());
        assert!(!handle_cli_command(Some(add("b.com", "Password1")), &handler).unwrap());
        assert_eq!(handler.snapshot().len(), 2);
        assert!(dir.path().join("passwords.json").exists());

        handle_cli_command(Some(Commands::Delete { index: 0, yes: true }), &handler).unwrap();
        let sites: Vec<String> = handler.snapshot().websites().map(String::from).collect();
        assert_eq!(sites, vec!["b.com"]);

        // out of range is reported, not an error
        handle_cli_command(Some(Commands::Delete { index: 9, yes: true }), &handler).unwrap();
        assert_eq!(handler.snapshot().len(), 1);

        handle_cli_command(Some(Commands::Clear { yes: true }), &handler).unwrap();
        assert!(handler.snapshot().is_empty());
    }

    #[test]
    fn test_verify_mismatch_is_an_error() {
        let dir = tempdir().unwrap();
        let handler = handler_in(dir.path());
        handler.on_save("a.com", "ann", "Secret1!").unwrap();

        let ok = Commands::Verify { website: "a.com".to_string(), password: Some("Secret1!".to_string()) };
        assert!(handle_cli_command(Some(ok), &handler).is_ok());

        let bad = Commands::Verify { website: "a.com".to_string(), password: Some("nope".to_string()) };
        assert!(matches!(handle_cli_command(Some(bad), &handler), Err(AppError::Cli(_))));
    }

    #[test]
    fn test_add_rejects_blank_website() {
        let dir = tempdir().unwrap();
        let handler = handler_in(dir.path());
        let cmd = Commands::Add {
            website: "  ".to_string(),
            username: "ann".to_string(),
            password: Some("pw".to_string()),
        };
        assert!(matches!(handle_cli_command(Some(cmd), &handler), Err(AppError::Validation(_))));
        assert!(handler.snapshot().is_empty());
    }
}

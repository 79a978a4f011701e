use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, success, warning};
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(print_config: bool, edit_config: bool, editor: Option<&String>, cfg: &Config) -> AppResult<()> {
    let path = Config::config_file();

    if print_config {
        println!("📄 Current configuration:\n");
        let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
        println!("{}", yaml);
    }

    if edit_config {
        if !path.exists() {
            warning(format!(
                "No configuration file at {}, run `rpaytracker init` first.",
                path.display()
            ));
            return Ok(());
        }

        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });

        let editor_to_use = editor.cloned().unwrap_or_else(|| default_editor.clone());

        match Command::new(&editor_to_use).arg(&path).status() {
            Ok(s) if s.success() => {
                success(format!("Configuration edited with '{}'", editor_to_use));
            }
            _ if editor_to_use != default_editor => {
                warning(format!(
                    "Editor '{}' not available, falling back to '{}'",
                    editor_to_use, default_editor
                ));
                match Command::new(&default_editor).arg(&path).status() {
                    Ok(s) if s.success() => {
                        success(format!("Configuration edited with '{}'", default_editor));
                    }
                    _ => error(format!("Failed to edit configuration with '{}'", default_editor)),
                }
            }
            _ => error(format!("Failed to edit configuration with '{}'", editor_to_use)),
        }

        // Catch typos right away instead of at the next check-in.
        if let Err(e) = Config::load_from(&path) {
            warning(format!("Configuration is not valid: {}", e));
        }
    }

    Ok(())
}

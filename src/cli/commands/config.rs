use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{error, success, warning};
use std::path::Path;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cfg: &Config, print_config: bool, edit_config: bool, editor: &Option<String>) -> AppResult<()> {
    let path = Config::config_file();

    if print_config {
        println!("📄 Current configuration ({}):\n", path.display());
        println!("{}", serde_yaml::to_string(cfg)?);
    }

    if edit_config {
        if !path.exists() {
            cfg.save(&path)?;
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
        let requested = editor.clone().unwrap_or_else(|| default_editor.clone());

        if run_editor(&requested, &path) {
            success(format!("Configuration file edited using '{requested}'"));
        } else if requested != default_editor {
            warning(format!(
                "Editor '{requested}' not available, falling back to '{default_editor}'"
            ));
            if run_editor(&default_editor, &path) {
                success(format!("Configuration file edited using '{default_editor}'"));
            } else {
                error(format!("Failed to edit configuration file with '{default_editor}'"));
            }
        } else {
            error(format!("Failed to edit configuration file with '{requested}'"));
        }

        // Catch mistakes now rather than on the next check-in.
        if let Err(e) = Config::load_from(&path) {
            warning(format!("The edited configuration is not valid: {e}"));
        }
    }

    Ok(())
}

fn run_editor(editor: &str, path: &Path) -> bool {
    matches!(Command::new(editor).arg(path).status(), Ok(s) if s.success())
}

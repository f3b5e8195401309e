//! Interactive prompts for wizard mode.

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow, ensure};
use inquire::validator::Validation;
use inquire::{Confirm, Password, PasswordDisplayMode, Select, Text};

use crate::types::PipelineMode;

/// Prompts for the operation to perform.
pub fn select_mode() -> Result<PipelineMode> {
    Select::new("Select operation", PipelineMode::ALL.to_vec())
        .prompt()
        .map_err(|e| anyhow!("mode selection failed: {e}"))
}

/// Prompts for the working directory, defaulting to the current one.
pub fn working_directory() -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;

    let dir = Text::new("Working directory")
        .with_initial_value(&cwd.to_string_lossy())
        .with_validator(|input: &str| {
            if Path::new(input).is_dir() {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid("path is invalid or not a directory".into()))
            }
        })
        .prompt()
        .map_err(|e| anyhow!("directory prompt failed: {e}"))?;

    Ok(PathBuf::from(dir))
}

/// Prompts for a file from the discovered candidates.
pub fn select_file(files: &[PathBuf]) -> Result<PathBuf> {
    ensure!(!files.is_empty(), "no files available for selection");

    let display_names: Vec<String> = files
        .iter()
        .map(|f| f.file_name().map_or_else(|| f.display().to_string(), |n| n.to_string_lossy().into_owned()))
        .collect();

    let selection = Select::new("Select file", display_names)
        .raw_prompt()
        .map_err(|e| anyhow!("file selection failed: {e}"))?;

    Ok(files[selection.index].clone())
}

/// Prompts for the passphrase.
///
/// An empty passphrase is allowed and selects the default key, so there is
/// no length validation here.
pub fn passphrase() -> Result<String> {
    Password::new("Passphrase")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("leave empty to use the default key")
        .prompt()
        .map_err(|e| anyhow!("passphrase prompt failed: {e}"))
}

/// Asks whether to run another operation.
pub fn run_again() -> Result<bool> {
    Confirm::new("Run again?")
        .with_default(false)
        .prompt()
        .map_err(|e| anyhow!("confirmation failed: {e}"))
}

//! Styled terminal output.

use std::path::{Path, PathBuf};

use bytesize::ByteSize;
use console::style;

use crate::config::APP_NAME;
use crate::types::PipelineMode;

/// Prints the application banner and attribution line.
pub fn print_banner() {
    println!();
    println!("{}", style(format!(" {APP_NAME} ")).reverse().bold());
    println!("{}", style("Reversible gzip + AES-256-CBC file packing").dim());
    println!();
}

/// Lists the discovered candidate files with their sizes.
pub fn show_file_list(files: &[PathBuf]) {
    println!();
    println!("{} {}", style("✓").green(), style(format!("Found {} file(s):", files.len())).bold());

    for file in files {
        let size = std::fs::metadata(file).map(|m| m.len()).unwrap_or(0);
        let name = file.file_name().map_or_else(|| file.display().to_string(), |n| n.to_string_lossy().into_owned());
        println!("  {:40} {:>10}", style(name).green(), ByteSize(size).to_string());
    }

    println!();
}

/// Prints the success line for a completed run.
pub fn show_success(mode: PipelineMode, path: &Path) {
    let action = match mode {
        PipelineMode::Pack => "packed",
        PipelineMode::Unpack => "unpacked",
    };

    println!();
    println!("{} {}", style("✓").green(), style(format!("File {action} successfully: {}", path.display())).bold());
}

/// Prints the failure line for a failed run.
pub fn show_failure(mode: PipelineMode, error: &impl std::fmt::Display) {
    let action = match mode {
        PipelineMode::Pack => "pack",
        PipelineMode::Unpack => "unpack",
    };

    println!();
    println!("{} {}", style("✗").red(), style(format!("Failed to {action}: {error}")).bold());
}

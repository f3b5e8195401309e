//! Application entry: CLI parsing and the interactive wizard.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::error::PipelineError;
use crate::file;
use crate::pipeline::Pipeline;
use crate::types::PipelineMode;
use crate::ui::progress::Bar;
use crate::ui::{display, prompt};

#[derive(Subcommand)]
pub enum Commands {
    /// Pack a file into a .xaz artifact (gzip then AES-256-CBC).
    Pack {
        /// Input file path.
        #[arg(short, long)]
        input: PathBuf,

        /// Passphrase (optional, will prompt if not provided; empty selects the default key).
        #[arg(short, long)]
        passphrase: Option<String>,
    },

    /// Unpack a .xaz artifact back to its original contents.
    Unpack {
        /// Input .xaz file path.
        #[arg(short, long)]
        input: PathBuf,

        /// Passphrase (optional, will prompt if not provided; empty selects the default key).
        #[arg(short, long)]
        passphrase: Option<String>,
    },

    /// Start interactive mode.
    Interactive,
}

#[derive(Parser)]
#[command(name = "packncrypt", version, about = "Pack files into encrypted .xaz artifacts and back. Run without arguments for interactive mode.")]
pub struct App {
    #[command(subcommand)]
    command: Option<Commands>,
}

impl App {
    pub fn init() -> Result<Self> {
        let subscriber = tracing_subscriber::fmt().with_file(true).with_line_number(true).finish();
        tracing::subscriber::set_global_default(subscriber)?;
        Ok(Self::parse())
    }

    pub async fn execute(self) -> Result<()> {
        match self.command {
            Some(Commands::Pack { input, passphrase }) => Self::run_mode(input, passphrase, PipelineMode::Pack).await,
            Some(Commands::Unpack { input, passphrase }) => Self::run_mode(input, passphrase, PipelineMode::Unpack).await,
            Some(Commands::Interactive) | None => Self::run_interactive().await,
        }
    }

    async fn run_mode(input: PathBuf, passphrase: Option<String>, mode: PipelineMode) -> Result<()> {
        let passphrase = match passphrase {
            Some(passphrase) => passphrase,
            None => prompt::passphrase()?,
        };

        let output = Self::process(mode, &input, &passphrase)
            .await
            .with_context(|| format!("failed to process {}", input.display()))?;

        display::show_success(mode, &output);
        Ok(())
    }

    async fn run_interactive() -> Result<()> {
        display::print_banner();

        loop {
            let mode = prompt::select_mode()?;
            let dir = prompt::working_directory()?;

            let files = file::find_eligible_files(&dir, mode)?;
            if files.is_empty() {
                println!("No eligible file found in this directory.");
            } else {
                display::show_file_list(&files);

                let target = prompt::select_file(&files)?;
                let passphrase = prompt::passphrase()?;

                match Self::process(mode, &target, &passphrase).await {
                    Ok(output) => display::show_success(mode, &output),
                    Err(e) => display::show_failure(mode, &e),
                }
            }

            if !prompt::run_again()? {
                break;
            }
        }

        Ok(())
    }

    /// Runs one pipeline with a progress bar attached.
    async fn process(mode: PipelineMode, input: &Path, passphrase: &str) -> Result<PathBuf, PipelineError> {
        let total = std::fs::metadata(input).map(|m| m.len()).unwrap_or(0);
        let bar = Bar::new(total);

        let pipeline = Pipeline::new(passphrase);
        let result = match mode {
            PipelineMode::Pack => pipeline.pack(input, |event| bar.update(&event)).await,
            PipelineMode::Unpack => pipeline.unpack(input, |event| bar.update(&event)).await,
        };

        match &result {
            Ok(_) => bar.finish(),
            Err(_) => bar.abandon(),
        }

        result
    }
}

//! `fable render` command implementation.

use std::path::PathBuf;

use clap::Args;
use fable_renderer::MarkdownRenderer;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Path to the markdown file.
    markdown_file: PathBuf,

    /// Disable GitHub-flavored extensions (tables, strikethrough, task lists).
    #[arg(long)]
    no_gfm: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let markdown = std::fs::read_to_string(&self.markdown_file)?;
        tracing::info!(file = %self.markdown_file.display(), "Rendering");

        let renderer = MarkdownRenderer::new().with_gfm(!self.no_gfm);
        output.document(&renderer.render(&markdown));
        Ok(())
    }
}

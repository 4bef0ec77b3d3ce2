//! dupsweep - duplicate file finder
//!
//! Walks a directory tree, hashes every file with SHA-256, groups files with
//! identical content and then prints the groups or deletes all but the
//! first-discovered copy of each.
//!
//! # Modules
//!
//! - [`scanner`]: deterministic directory walking and content hashing
//! - [`duplicates`]: the digest-to-paths index and the scan driver
//! - [`output`]: text and JSON reports
//! - [`actions`]: deletion of redundant copies
//! - [`interactive`]: the print/delete/abort prompt
//! - [`config`], [`cli`], [`logging`], [`error`]: application plumbing

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod interactive;
pub mod logging;
pub mod output;
pub mod scanner;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::CommandFactory;

use crate::actions::delete_duplicates;
use crate::cli::{ActionArg, Cli, FormatArg};
use crate::config::Config;
use crate::duplicates::{DuplicateFinder, DuplicateIndex, ScanSummary};
use crate::error::ExitCode;
use crate::interactive::{run_prompt, PromptState};
use crate::output::{JsonOutput, TextOutput};

/// Message printed when a scan finds no duplicates.
pub const NO_DUPLICATES_MESSAGE: &str = "No duplicate files found.";

/// Run the application on the process's stdin and stdout.
///
/// # Errors
///
/// See [`run_app_with`].
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_app_with(cli, stdin.lock(), stdout.lock())
}

/// Run the application with explicit input and output streams.
///
/// The prompt reads from `input`; the prompt, report and deletion summary
/// go to `output`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the root is not a
/// directory (a [`duplicates::FinderError`] that maps to
/// [`ExitCode::InvalidRoot`]), the scan aborts, or writing output fails.
pub fn run_app_with<R: BufRead, W: Write>(cli: Cli, input: R, mut output: W) -> Result<ExitCode> {
    let Some(root) = cli.path.as_deref() else {
        writeln!(output, "{}", Cli::command().render_usage())?;
        return Ok(ExitCode::Success);
    };

    let config = Config::load(cli.config.as_deref(), &cli.overrides())
        .context("Failed to load configuration")?;
    log::debug!("Effective configuration: {:?}", config);

    let finder = DuplicateFinder::new(config.finder_config());
    let (index, summary) = finder.find_duplicates(root)?;

    let mut partial = summary.is_partial();
    if partial {
        log::warn!(
            "{} unreadable file(s) were left out of the scan",
            summary.skipped.len()
        );
    }

    if index.is_empty() {
        if cli.action == ActionArg::Print && cli.format == FormatArg::Json {
            write_report(&index, &summary, cli.format, &mut output)?;
        } else {
            writeln!(output, "{NO_DUPLICATES_MESSAGE}")?;
        }
        return Ok(exit_code(partial));
    }

    let state = match cli.action {
        ActionArg::Prompt => run_prompt(input, &mut output).context("Failed to read answer")?,
        ActionArg::Print => PromptState::Reporting,
        ActionArg::Delete => PromptState::Deleting,
    };

    match state {
        PromptState::Reporting => write_report(&index, &summary, cli.format, &mut output)?,
        PromptState::Deleting => {
            let result = delete_duplicates(index, &config.delete_config());
            writeln!(output, "{}", result.summary())?;
            if result.stopped_early {
                log::warn!("Deletion stopped at the first failure");
            }
            partial |= !result.all_succeeded();
        }
        PromptState::Prompting | PromptState::Aborted => {
            log::info!("Aborted, no files were changed");
        }
    }

    output.flush()?;
    Ok(exit_code(partial))
}

fn write_report<W: Write>(
    index: &DuplicateIndex,
    summary: &ScanSummary,
    format: FormatArg,
    output: &mut W,
) -> Result<()> {
    match format {
        FormatArg::Text => TextOutput::new(index).write_to(output)?,
        FormatArg::Json => JsonOutput::new(index, summary).write_to(output)?,
    }
    Ok(())
}

fn exit_code(partial: bool) -> ExitCode {
    if partial {
        ExitCode::PartialSuccess
    } else {
        ExitCode::Success
    }
}

//! Interactive action prompt.
//!
//! After a scan that found at least one duplicate group the user is asked
//! which single action to take. The prompt is a small state machine:
//!
//! ```text
//!             invalid input
//!              +-------+
//!              v       |
//!          Prompting --+--- "p" ---> Reporting
//!              |       +--- "d" ---> Deleting
//!              |       +--- "a"/"q" -> Aborted
//!              +-- end of input ---> Aborted
//! ```
//!
//! Reporting, Deleting and Aborted are terminal: exactly one action is
//! taken and then the program ends.

use std::io::{self, BufRead, Write};

/// Prompt text, written without a trailing newline.
pub const PROMPT: &str = "Duplicates found. Print, Delete or Abort? [p/d/a] > ";

/// A valid answer to the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Print the duplicate report.
    Print,
    /// Delete redundant copies.
    Delete,
    /// Do nothing.
    Abort,
}

/// Parse one line of user input.
///
/// Surrounding whitespace is ignored and matching is case-insensitive.
/// `q` is accepted as an alias for abort. Anything else yields `None`.
///
/// # Example
///
/// ```
/// use dupsweep::interactive::{parse_choice, Choice};
///
/// assert_eq!(parse_choice(" D\n"), Some(Choice::Delete));
/// assert_eq!(parse_choice("q"), Some(Choice::Abort));
/// assert_eq!(parse_choice("yes"), None);
/// ```
#[must_use]
pub fn parse_choice(input: &str) -> Option<Choice> {
    match input.trim().to_ascii_lowercase().as_str() {
        "p" => Some(Choice::Print),
        "d" => Some(Choice::Delete),
        "a" | "q" => Some(Choice::Abort),
        _ => None,
    }
}

/// State of the action prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptState {
    /// Waiting for a valid answer.
    #[default]
    Prompting,
    /// The user asked for the report.
    Reporting,
    /// The user asked for deletion.
    Deleting,
    /// The user aborted, or input ended.
    Aborted,
}

impl PromptState {
    /// Advance the state machine by one input line.
    ///
    /// `None` means end of input. Terminal states ignore further input.
    #[must_use]
    pub fn next(self, line: Option<&str>) -> Self {
        if self.is_terminal() {
            return self;
        }
        match line {
            None => Self::Aborted,
            Some(line) => match parse_choice(line) {
                Some(Choice::Print) => Self::Reporting,
                Some(Choice::Delete) => Self::Deleting,
                Some(Choice::Abort) => Self::Aborted,
                None => Self::Prompting,
            },
        }
    }

    /// Whether an action has been decided.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Prompting)
    }
}

/// Ask until a valid answer arrives or input ends.
///
/// Returns the terminal state. On end of input a newline is written so the
/// next output does not share a line with the prompt.
///
/// # Errors
///
/// Returns any I/O error from reading `input` or writing `output`.
pub fn run_prompt<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<PromptState> {
    let mut state = PromptState::Prompting;
    let mut line = String::new();

    while !state.is_terminal() {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        let read = input.read_line(&mut line)?;
        if read == 0 {
            writeln!(output)?;
            state = state.next(None);
        } else {
            state = state.next(Some(&line));
            if !state.is_terminal() {
                log::debug!("Ignoring invalid answer {:?}", line.trim());
            }
        }
    }

    log::debug!("Prompt finished in state {:?}", state);
    Ok(state)
}

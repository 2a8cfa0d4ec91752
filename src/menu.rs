//! # Interrupt Recovery Menu
//!
//! Shown when the operator cancels a recording. They pick one or more
//! numbered actions in a single answer (`24` applies 2 then 4), confirm
//! playback has stopped, and the actions are applied in order.

use crate::error::RipError;
use anyhow::{bail, Result};
use std::io::{BufRead, Write};

/// One recovery action. Numbering on screen starts at 1 and follows
/// [`MenuAction::ALL`].
///
/// The queue pops from the end of its file, so "front of the queue"
/// ([`RequeueNext`](Self::RequeueNext)) appends to the file and "back"
/// ([`RequeueLast`](Self::RequeueLast)) prepends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Remove the most recent library entry.
    PopPrevious,
    /// Put the interrupted line where the queue pops it next.
    RequeueNext,
    /// Put the interrupted line where the queue pops it last.
    RequeueLast,
    /// Stop the program.
    Quit,
    /// Count the interrupted song as recorded.
    Skip,
}

impl MenuAction {
    pub const ALL: [Self; 5] = [
        Self::PopPrevious,
        Self::RequeueNext,
        Self::RequeueLast,
        Self::Quit,
        Self::Skip,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::PopPrevious => "Pop the previous song",
            Self::RequeueNext => "Place the song in the front of the queue",
            Self::RequeueLast => "Place the song in the back of the queue",
            Self::Quit => "Quit",
            Self::Skip => "Skip",
        }
    }

    /// Action for the 1-based menu number `n`.
    #[must_use]
    pub fn from_number(n: u32) -> Option<Self> {
        let index = usize::try_from(n).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }
}

/// Renders `labels` as a numbered list, one per line.
#[must_use]
pub fn format_options(labels: &[&str]) -> String {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| format!("{}. {label}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Whether `response` is non-empty and every character is a digit
/// between 1 and `option_count`.
#[must_use]
pub fn valid_selection(response: &str, option_count: usize) -> bool {
    !response.is_empty()
        && response.chars().all(|c| {
            c.to_digit(10)
                .and_then(|d| usize::try_from(d).ok())
                .is_some_and(|d| (1..=option_count).contains(&d))
        })
}

/// Parses a response into the actions it selects, in the order typed.
pub fn parse_selection(response: &str) -> Result<Vec<MenuAction>, RipError> {
    if !valid_selection(response, MenuAction::ALL.len()) {
        return Err(RipError::InvalidMenuSelection(response.to_string()));
    }
    response
        .chars()
        .map(|c| {
            c.to_digit(10)
                .and_then(MenuAction::from_number)
                .ok_or_else(|| RipError::InvalidMenuSelection(response.to_string()))
        })
        .collect()
}

/// Shows the menu on `output` and reads answers from `input` until one
/// is valid, then waits for the operator to confirm playback stopped.
///
/// # Errors
///
/// Fails if `input` is closed before a valid answer arrives, or on I/O
/// errors.
pub fn prompt_selection<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Vec<MenuAction>> {
    let labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();
    writeln!(output)?;
    writeln!(output, "Pick tasks (e.g. 24):")?;
    writeln!(output, "{}", format_options(&labels))?;

    let actions = loop {
        write!(output, "Choose: ")?;
        output.flush()?;
        let response = read_line(input)?;
        match parse_selection(&response) {
            Ok(actions) => break actions,
            Err(e) => {
                log::debug!("{e}");
                writeln!(output, "Invalid response. Try again.")?;
            }
        }
    };

    write!(output, "Stop any currently-playing audio, then press Enter.")?;
    output.flush()?;
    read_line(input)?;

    Ok(actions)
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("Standard input closed while waiting for a menu answer");
    }
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

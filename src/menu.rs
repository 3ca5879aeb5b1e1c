//! Interactive menu loop.
//!
//! The loop is a two-state machine (`Running` → `Exited`). Input lines are
//! mapped to actions by [`MenuAction::from_input`], which does no I/O, and the
//! loop itself is generic over its reader and writer so whole sessions can be
//! scripted in tests.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::debug;

use crate::cli::OutputFormat;
use crate::error::ReportResult;
use crate::models::Dataset;
use crate::report;

const MENU_TEXT: &str = "\nMenu:\n\
1. Show team hierarchy\n\
2. Show department summary\n\
3. Save report to file\n\
0. Exit\n";

const PROMPT: &str = "Choose an option (0-3): ";

const FAREWELL: &str = "Bye!";

const INVALID_CHOICE: &str = "Invalid choice, enter a number from 0 to 3";

/// Everything the reporters need, built once at startup.
#[derive(Debug, Clone)]
pub struct App {
    /// Employee data loaded from the input file.
    pub dataset: Dataset,
    /// Where the saved report goes.
    pub output: PathBuf,
    /// Format of the saved report.
    pub format: OutputFormat,
}

/// State of the menu loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Running,
    Exited,
}

/// What a line of user input asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ShowHierarchy,
    ShowSummary,
    SaveReport,
    Exit,
    Invalid,
}

impl MenuAction {
    /// Map one input line to an action. Surrounding whitespace is ignored.
    pub fn from_input(input: &str) -> Self {
        match input.trim() {
            "1" => MenuAction::ShowHierarchy,
            "2" => MenuAction::ShowSummary,
            "3" => MenuAction::SaveReport,
            "0" => MenuAction::Exit,
            _ => MenuAction::Invalid,
        }
    }

    /// State the loop is in after this action completes.
    pub fn next_state(self) -> MenuState {
        match self {
            MenuAction::Exit => MenuState::Exited,
            _ => MenuState::Running,
        }
    }
}

impl App {
    /// Run the menu until the user exits or `input` runs dry.
    ///
    /// Report errors (an unparseable salary, an unwritable output file) end
    /// the loop and are returned to the caller.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, out: &mut W) -> ReportResult<()> {
        let mut state = MenuState::Running;
        let mut line = String::new();

        while state == MenuState::Running {
            out.write_all(MENU_TEXT.as_bytes())?;
            out.write_all(PROMPT.as_bytes())?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                debug!("End of input, leaving menu");
                writeln!(out)?;
                break;
            }

            let action = MenuAction::from_input(&line);
            debug!("Menu input {:?} -> {:?}", line.trim(), action);

            self.perform(action, out)?;
            state = action.next_state();
        }

        Ok(())
    }

    /// Carry out a single menu action.
    pub fn perform<W: Write>(&self, action: MenuAction, out: &mut W) -> ReportResult<()> {
        match action {
            MenuAction::ShowHierarchy => report::write_hierarchy(out, &self.dataset.employees)?,
            MenuAction::ShowSummary => report::write_summary(out, &self.dataset.employees)?,
            MenuAction::SaveReport => {
                report::save_report(&self.dataset, &self.output, self.format)?;
                writeln!(out, "\nReport saved to: {}\n", self.output.display())?;
            }
            MenuAction::Exit => writeln!(out, "{}", FAREWELL)?,
            MenuAction::Invalid => writeln!(out, "{}", INVALID_CHOICE)?,
        }
        Ok(())
    }
}

//! Interactive portfolio browser.
//!
//! Input lines are read on a blocking thread and handed to the async side
//! over a flume channel; each command updates the controller and the page is
//! redrawn from a fresh view.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::debug;

use super::keybindings::{parse_command, Command, HELP_TEXT};
use super::render::{render_page, DisplayMode};
use crate::controller::{PortfolioController, ALL_CATEGORY};

/// Result of handling one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue(String),
    Quit,
}

pub struct Browser {
    controller: PortfolioController,
    mode: DisplayMode,
}

impl Browser {
    pub fn new(controller: PortfolioController, mode: DisplayMode) -> Self {
        Self { controller, mode }
    }

    pub fn render(&self) -> String {
        render_page(&self.controller, self.mode)
    }

    /// Apply `command` and return what to print next.
    pub fn handle(&mut self, command: Command) -> Flow {
        debug!("Browser command: {:?}", command);
        match command {
            Command::NextPage => self.controller.next_page(),
            Command::PrevPage => self.controller.prev_page(),
            Command::GoToPage(page) => self.controller.set_page(page),
            Command::Category(name) => {
                let name = self.resolve_category(&name);
                self.controller.select_category(&name);
            }
            Command::AllCategories => self.controller.select_category(ALL_CATEGORY),
            Command::Search(term) => self.controller.set_search(&term),
            Command::ToggleMode => self.mode = self.mode.toggled(),
            Command::ShowUrl => {
                return Flow::Continue(format!("{}\n", self.controller.shareable_url()));
            }
            Command::Help => return Flow::Continue(format!("{}\n", HELP_TEXT)),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue(self.render())
    }

    /// Match a typed category name case-insensitively against the known
    /// categories; unknown names pass through unchanged.
    fn resolve_category(&self, name: &str) -> String {
        self.controller
            .categories()
            .into_iter()
            .find(|category| category.eq_ignore_ascii_case(name))
            .unwrap_or_else(|| name.to_string())
    }

    /// Run the command loop until `quit` or end of input.
    pub async fn run<R, W>(mut self, input: R, mut output: W) -> Result<()>
    where
        R: BufRead + Send + 'static,
        W: Write,
    {
        let (line_tx, line_rx) = flume::unbounded::<String>();
        std::thread::spawn(move || {
            for line in input.lines() {
                let Ok(line) = line else { break };
                if line_tx.send(line).is_err() {
                    break;
                }
            }
        });

        write!(output, "{}", self.render()).context("Failed to write page")?;
        loop {
            write!(
                output,
                "[{} {}/{}] > ",
                self.controller.selected_category(),
                self.controller.current_page(),
                self.controller.total_pages().max(1)
            )
            .context("Failed to write prompt")?;
            output.flush().context("Failed to flush output")?;

            let Ok(line) = line_rx.recv_async().await else {
                debug!("Input closed, leaving browser");
                break;
            };

            let text = match parse_command(&line) {
                Some(command) => match self.handle(command) {
                    Flow::Continue(text) => text,
                    Flow::Quit => break,
                },
                None if line.trim().is_empty() => continue,
                None => format!("Unknown command {:?}, type h for help\n", line.trim()),
            };
            write!(output, "{}", text).context("Failed to write page")?;
        }

        writeln!(output).context("Failed to write output")?;
        Ok(())
    }
}

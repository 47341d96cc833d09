pub mod cli;
pub mod colors;
pub mod commands;

use chrono::{Local, Timelike};

pub use cli::{Cli, Commands, GenerateCommand, InspectCommand, ListCommands};
pub use colors::Colors;

fn term_width() -> u16 {
  crossterm::terminal::size().map_or(80, |(width, _)| width)
}

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

//! Output formatting for codescope CLI
//!
//! Every command result can be rendered as human-readable text or as JSON.
//! Colors are decided once at startup from the config or TTY detection of
//! the stream the command colors, through `colored`'s global override.

use clap::ValueEnum;
use serde::Serialize;
use std::io::IsTerminal;
use std::str::FromStr;

/// Output format for CLI results
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text (default)
    #[default]
    Text,
    /// JSON format for machine consumption
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: '{}'", s)),
        }
    }
}

/// Types that can be printed by a command.
pub trait TextDisplay: Serialize {
    /// Human-readable rendering.
    fn to_text(&self) -> String;
}

/// Render `data` in the requested format.
pub fn render<T: TextDisplay>(data: &T, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Text => data.to_text(),
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
    })
}

/// Render `data` and print it to stdout.
pub fn print<T: TextDisplay>(data: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(data, format)?;
    if rendered.ends_with('\n') {
        print!("{}", rendered);
    } else {
        println!("{}", rendered);
    }
    Ok(())
}

/// Terminal stream that carries a command's colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    fn is_terminal(self) -> bool {
        match self {
            Stream::Stdout => std::io::stdout().is_terminal(),
            Stream::Stderr => std::io::stderr().is_terminal(),
        }
    }
}

/// Whether to emit ANSI colors on `stream`: explicit override, otherwise TTY detection.
pub fn colors_enabled(color_override: Option<bool>, stream: Stream) -> bool {
    color_override.unwrap_or_else(|| stream.is_terminal())
}

/// Apply the color preference for the stream a command writes colored text to.
pub fn configure_colors(color_override: Option<bool>, stream: Stream) {
    colored::control::set_override(colors_enabled(color_override, stream));
}

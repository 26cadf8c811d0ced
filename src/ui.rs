//! Terminal rendering for the CLI
//!
//! Render functions return strings so they stay testable; the caller decides
//! which stream they land on. Color is only applied on a terminal and is
//! suppressed entirely by `NO_COLOR`.

use std::io::{stderr, stdout};
use std::path::Path;

use crossterm::style::{Color, Stylize};
use is_terminal::IsTerminal;

/// Semantic colors
mod colors {
    use super::Color;

    pub const ERROR: Color = Color::Red;
    pub const INFO: Color = Color::Cyan;
    pub const DIM: Color = Color::DarkGrey;
}

/// Terminal capabilities detected once at startup
#[derive(Debug, Clone, Copy)]
pub struct UiContext {
    pub color: bool,
    pub unicode: bool,
}

impl UiContext {
    pub fn detect() -> Self {
        let color = stdout().is_terminal()
            && stderr().is_terminal()
            && std::env::var_os("NO_COLOR").is_none();
        Self {
            color,
            unicode: cfg!(not(windows)),
        }
    }

    pub const fn plain() -> Self {
        Self {
            color: false,
            unicode: false,
        }
    }
}

fn paint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        text.with(color).to_string()
    } else {
        text.to_string()
    }
}

fn icon(unicode: &'static str, ascii: &'static str, ui: &UiContext) -> &'static str {
    if ui.unicode {
        unicode
    } else {
        ascii
    }
}

/// One line per compiled file; the paths stay unstyled so the line reads the
/// same piped as on a terminal.
pub fn render_compiled(input: &Path, output: &Path, ui: &UiContext) -> String {
    let arrow = paint("->", colors::DIM, ui.color);
    format!("{} {} {}", input.display(), arrow, output.display())
}

pub fn render_error(message: &str, ui: &UiContext) -> String {
    let mark = paint(icon("✗", "[FAIL]", ui), colors::ERROR, ui.color);
    format!("{mark} {message}")
}

pub fn render_watch_header(input: &Path, output: &Path, ui: &UiContext) -> String {
    let mark = paint(icon("⟳", "[~]", ui), colors::INFO, ui.color);
    format!(
        "{mark} Watching {} {} {}  (Ctrl+C to stop)",
        input.display(),
        paint("->", colors::DIM, ui.color),
        output.display()
    )
}

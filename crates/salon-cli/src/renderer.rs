//! Terminal rendering module for rich markdown output
//!
//! Headers and quoted error lines are coloured by hand; everything else goes
//! through termimad's inline renderer. With colour disabled the markdown is
//! printed as-is.

use std::fmt::Display;

use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Magenta);
        skin.bold.set_fg(Color::Yellow);
        skin.strikeout.set_fg(Color::DarkGrey);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Renders anything whose `Display` output is markdown.
    pub fn render(&self, content: &impl Display) {
        let markdown = content.to_string();
        if !self.rich_enabled {
            print!("{markdown}");
            return;
        }
        for line in markdown.lines() {
            if line.starts_with('#') {
                println!("\x1b[35m{line}\x1b[0m");
            } else if let Some(quoted) = line.strip_prefix("> ") {
                println!("\x1b[31m{quoted}\x1b[0m");
            } else {
                self.skin.print_inline(line);
                println!();
            }
        }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

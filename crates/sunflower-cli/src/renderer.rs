//! Terminal output for the markdown produced by the display wrappers.
//!
//! Rich output styles headings and inline markup with termimad; plain output
//! prints the markdown unchanged, which is what scripts and tests see.

use std::io::{self, Write};

use anyhow::{Context, Result};
use termimad::{crossterm::style::Color, MadSkin};

pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::DarkYellow);
        skin.bold.set_fg(Color::Green);
        skin.italic.set_fg(Color::DarkGreen);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Writes `markdown` to stdout.
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(markdown.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write to stdout")?;
            return Ok(());
        }

        for line in markdown.lines() {
            if Self::is_heading(line) {
                // Keep the hashes visible so nesting stays readable
                println!("\x1b[33m{line}\x1b[0m");
            } else {
                self.skin.print_inline(line);
                println!();
            }
        }
        Ok(())
    }

    fn is_heading(line: &str) -> bool {
        let hashes = line.chars().take_while(|&c| c == '#').count();
        hashes > 0 && line[hashes..].starts_with(' ')
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
        renderer.render("No plants found.\n").unwrap();
    }

    #[test]
    fn test_default_is_rich() {
        assert!(TerminalRenderer::default().rich_enabled);
    }

    #[test]
    fn test_heading_detection() {
        assert!(TerminalRenderer::is_heading("# Filter"));
        assert!(TerminalRenderer::is_heading("### Apple (malus-pumila)"));
        assert!(!TerminalRenderer::is_heading("#hashtag"));
        assert!(!TerminalRenderer::is_heading("- Grow zone: 9"));
    }
}

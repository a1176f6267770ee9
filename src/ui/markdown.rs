//! Markdown-to-terminal rendering helpers.
//!
//! `termimad` handles the layout work (lists, headings, code fences,
//! blockquotes) without requiring a full TUI view. Output carries no ANSI
//! styling of its own; the renderer decides colors.

use termimad::MadSkin;

/// Render markdown into plain terminal text with structure preserved.
pub fn render_markdown(input: &str) -> String {
    let skin = MadSkin::no_style();
    let formatted = skin.text(input, None).to_string();
    formatted.trim_end_matches('\n').to_string()
}

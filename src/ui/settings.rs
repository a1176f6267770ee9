//! Centralized, hardcoded UI settings for the terminal interface.
//!
//! Single place to tweak prompt strings, labels, colors, and spinner
//! behavior.

use crossterm::style::Color;

// ---------------------------------------------------------------------------
// Labels / prompt strings
// ---------------------------------------------------------------------------

pub const LABEL_APP: &str = "scout";
pub const LABEL_ERROR: &str = "error:";
pub const LABEL_WARNING: &str = "warning:";
pub const LABEL_REASONING: &str = "reasoning";
pub const LABEL_THINKING: &str = "thinking";

pub const PROMPT_SUFFIX: &str = "> ";
pub const INDENT_1: &str = "  ";

/// Paired markers delimiting a reasoning block in remote responses.
pub const REASONING_OPEN: &str = "<think>";
pub const REASONING_CLOSE: &str = "</think>";

// ---------------------------------------------------------------------------
// Spinner / timing
// ---------------------------------------------------------------------------

pub const PROGRESS_CLEAR_LINE: &str = "\r\x1b[2K";
pub const PROGRESS_FRAMES: [char; 4] = ['|', '/', '-', '\\'];
pub const PROGRESS_TICK_MS: u64 = 100;

/// How long the loop waits for a cancelled remote task to unwind.
pub const CANCEL_UNWIND_MS: u64 = 500;

// ---------------------------------------------------------------------------
// Prompt path display
// ---------------------------------------------------------------------------

/// Longest path rendered verbatim in the prompt.
pub const CWD_DISPLAY_MAX: usize = 35;
/// Longest home-relative path rendered without elision.
pub const CWD_HOME_RELATIVE_MAX: usize = 30;

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

pub const COLOR_PROMPT_PATH: Color = Color::Cyan;
pub const COLOR_PROMPT_SYMBOL: Color = Color::White;
pub const COLOR_APP_LABEL: Color = Color::Cyan;
pub const COLOR_MODEL_NAME: Color = Color::DarkGrey;
pub const COLOR_WARNING: Color = Color::Yellow;
pub const COLOR_ERROR: Color = Color::Red;
pub const COLOR_INTERRUPT: Color = Color::Yellow;
pub const COLOR_DURATION: Color = Color::DarkGrey;
pub const COLOR_REASONING: Color = Color::DarkGrey;
pub const COLOR_PROGRESS_FRAME: Color = Color::Cyan;
pub const COLOR_PROGRESS_LABEL: Color = Color::DarkGrey;
pub const COLOR_USAGE_HINT: Color = Color::DarkGrey;

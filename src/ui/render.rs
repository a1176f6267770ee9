//! Terminal output renderer.
//!
//! Chrome (prompt, banner, spinner, warnings) goes to stderr; answers and
//! command results go to stdout. Every styled path has a plain fallback so
//! `--no-color` and non-TTY output stay readable.

use crate::ui::markdown::render_markdown;
use crate::ui::settings;
use crossterm::style::Stylize;
use regex::Regex;
use std::io::Write;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

/// Where a reply came from, for rendering and duration decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOrigin {
    /// Fully satisfied by the local filesystem layer.
    Local,
    /// A remote answer from the model.
    Remote,
    /// A remote failure converted to display text.
    RemoteError,
}

/// The `(text, origin, optional duration)` triple handed to rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub origin: ReplyOrigin,
    pub duration: Option<Duration>,
}

impl Reply {
    pub fn local(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: ReplyOrigin::Local,
            duration: None,
        }
    }

    /// A remote answer; duration is attached only on this path.
    pub fn remote(text: impl Into<String>, duration: Duration) -> Self {
        Self {
            text: text.into(),
            origin: ReplyOrigin::Remote,
            duration: Some(duration),
        }
    }

    pub fn remote_error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: ReplyOrigin::RemoteError,
            duration: None,
        }
    }

    pub fn is_local(&self) -> bool {
        self.origin == ReplyOrigin::Local
    }
}

/// Handles all terminal output formatting.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    /// Whether ANSI color/style output is enabled.
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Print the startup banner and usage guide.
    pub fn welcome(&self, model: &str) {
        eprintln!();
        if self.color {
            eprintln!(
                "{} {}",
                settings::LABEL_APP.with(settings::COLOR_APP_LABEL).bold(),
                format!("({model})").with(settings::COLOR_MODEL_NAME),
            );
        } else {
            eprintln!("{} ({model})", settings::LABEL_APP);
        }
        let hints = [
            "Type a question, or use commands: ls/tree, cd, pwd, create <file>, mkdir <dir>, rm <name>.",
            "Natural language works: 'list files', 'go to src', 'create file data.txt'.",
            "Mention a file (e.g. 'explain cli.rs') to include its content as context.",
            "Type 'help' for commands, 'exit' to quit, Ctrl+C to interrupt a running request.",
        ];
        for hint in hints {
            if self.color {
                eprintln!(
                    "{}{}",
                    settings::INDENT_1,
                    hint.with(settings::COLOR_USAGE_HINT)
                );
            } else {
                eprintln!("{}{hint}", settings::INDENT_1);
            }
        }
        eprintln!();
    }

    /// Print the input prompt showing the (shortened) working directory.
    pub fn prompt(&self, cwd: &Path) {
        let display = cwd_display(cwd);
        if self.color {
            eprint!(
                "{}{}",
                display.as_str().with(settings::COLOR_PROMPT_PATH),
                settings::PROMPT_SUFFIX
                    .with(settings::COLOR_PROMPT_SYMBOL)
                    .bold(),
            );
        } else {
            eprint!("{display}{}", settings::PROMPT_SUFFIX);
        }
        let _ = std::io::stderr().flush();
    }

    /// Render one reply triple.
    ///
    /// Duration is reported alongside remote answers only; blank text renders
    /// nothing beyond that.
    pub fn render_reply(&self, reply: &Reply) {
        match reply.origin {
            ReplyOrigin::Local | ReplyOrigin::RemoteError => {
                if !reply.text.trim().is_empty() {
                    println!("{}", reply.text);
                    println!();
                }
            }
            ReplyOrigin::Remote => {
                if let Some(duration) = reply.duration {
                    self.duration_line(duration);
                }
                if !reply.text.trim().is_empty() {
                    self.remote_answer(&reply.text);
                }
                println!();
            }
        }
    }

    fn duration_line(&self, duration: Duration) {
        let line = format!("(took {:.2}s)", duration.as_secs_f64());
        if self.color {
            println!("{}", line.with(settings::COLOR_DURATION));
        } else {
            println!("{line}");
        }
    }

    fn remote_answer(&self, text: &str) {
        let (reasoning, answer) = split_reasoning(text);

        if let Some(reasoning) = &reasoning {
            if self.color {
                println!(
                    "{}",
                    settings::LABEL_REASONING
                        .with(settings::COLOR_REASONING)
                        .bold()
                );
                for line in reasoning.lines() {
                    println!(
                        "{}{}",
                        settings::INDENT_1,
                        line.with(settings::COLOR_REASONING)
                    );
                }
            } else {
                println!("[{}]", settings::LABEL_REASONING);
                for line in reasoning.lines() {
                    println!("{}{line}", settings::INDENT_1);
                }
            }
        }

        if !answer.trim().is_empty() {
            println!("{}", render_markdown(&answer));
        } else if reasoning.is_none() {
            println!("(no response content)");
        }
    }

    /// Yellow notice for interrupts and cancellations.
    pub fn interrupt(&self, msg: &str) {
        if self.color {
            eprintln!("{}", msg.with(settings::COLOR_INTERRUPT));
        } else {
            eprintln!("{msg}");
        }
    }

    pub fn warn(&self, msg: &str) {
        if self.color {
            eprintln!(
                "{} {msg}",
                settings::LABEL_WARNING.with(settings::COLOR_WARNING).bold()
            );
        } else {
            eprintln!("{} {msg}", settings::LABEL_WARNING);
        }
    }

    pub fn error(&self, msg: &str) {
        if self.color {
            eprintln!(
                "{} {msg}",
                settings::LABEL_ERROR.with(settings::COLOR_ERROR).bold()
            );
        } else {
            eprintln!("{} {msg}", settings::LABEL_ERROR);
        }
    }

    /// Redraw the in-place spinner + elapsed-seconds indicator.
    pub fn progress_frame(&self, frame_idx: usize, elapsed: Duration) {
        let frame = settings::PROGRESS_FRAMES[frame_idx % settings::PROGRESS_FRAMES.len()];
        let elapsed_s = elapsed.as_millis() as f64 / 1000.0;
        let mut err = std::io::stderr();
        if self.color {
            let _ = write!(
                err,
                "{}{} {} {}",
                settings::PROGRESS_CLEAR_LINE,
                format!("[{frame}]").with(settings::COLOR_PROGRESS_FRAME),
                settings::LABEL_THINKING.with(settings::COLOR_PROGRESS_LABEL),
                format!("({elapsed_s:.1}s)").with(settings::COLOR_PROGRESS_LABEL),
            );
        } else {
            let _ = write!(
                err,
                "{}[{frame}] {} ({elapsed_s:.1}s)",
                settings::PROGRESS_CLEAR_LINE,
                settings::LABEL_THINKING
            );
        }
        let _ = err.flush();
    }

    /// Erase the spinner line.
    pub fn clear_progress(&self) {
        let mut err = std::io::stderr();
        let _ = write!(err, "{}", settings::PROGRESS_CLEAR_LINE);
        let _ = err.flush();
    }

    pub fn goodbye(&self) {
        if self.color {
            eprintln!("{}", "Goodbye!".with(settings::COLOR_APP_LABEL));
        } else {
            eprintln!("Goodbye!");
        }
    }
}

/// Split a remote response into its optional reasoning block and the rest.
///
/// The first `<think>...</think>` block (case-insensitive, may span lines) is
/// extracted; every such block is stripped from the remainder.
pub fn split_reasoning(text: &str) -> (Option<String>, String) {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        let source = format!(
            "(?is){}(.*?){}",
            regex::escape(settings::REASONING_OPEN),
            regex::escape(settings::REASONING_CLOSE)
        );
        Regex::new(&source).expect("static reasoning pattern must compile")
    });

    let reasoning = pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|block| !block.is_empty());
    let remainder = pattern.replace_all(text, "").trim().to_string();
    (reasoning, remainder)
}

/// Shorten a working-directory path for prompt display.
fn cwd_display(path: &Path) -> String {
    cwd_display_with_home(path, dirs::home_dir().as_deref())
}

fn cwd_display_with_home(path: &Path, home: Option<&Path>) -> String {
    if let Some(home) = home {
        if path == home {
            return "~".to_string();
        }
        if let Ok(rel) = path.strip_prefix(home) {
            let rel_text = rel.display().to_string();
            if rel_text.chars().count() <= settings::CWD_HOME_RELATIVE_MAX {
                return format!("~/{rel_text}");
            }
            return format!("~/.../{}", last_components(rel, 2));
        }
    }

    let full = path.display().to_string();
    if full.chars().count() <= settings::CWD_DISPLAY_MAX {
        return full;
    }
    format!(".../{}", last_components(path, 2))
}

/// Join the trailing `count` path components with `/`.
fn last_components(path: &Path, count: usize) -> String {
    let parts: Vec<String> = path
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let start = parts.len().saturating_sub(count);
    parts[start..].join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn split_extracts_reasoning_and_strips_markers() {
        let (reasoning, rest) = split_reasoning("<think>step one</think>The answer.");
        assert_eq!(reasoning.as_deref(), Some("step one"));
        assert_eq!(rest, "The answer.");
    }

    #[test]
    fn split_handles_multiline_and_mixed_case_markers() {
        let (reasoning, rest) = split_reasoning("<THINK>a\nb</THINK>\n\ndone");
        assert_eq!(reasoning.as_deref(), Some("a\nb"));
        assert_eq!(rest, "done");
    }

    #[test]
    fn split_without_markers_returns_text_unchanged() {
        let (reasoning, rest) = split_reasoning("plain answer");
        assert!(reasoning.is_none());
        assert_eq!(rest, "plain answer");
    }

    #[test]
    fn split_strips_every_reasoning_block_from_remainder() {
        let (reasoning, rest) = split_reasoning("<think>a</think>mid<think>b</think>end");
        assert_eq!(reasoning.as_deref(), Some("a"));
        assert_eq!(rest, "midend");
    }

    #[test]
    fn empty_reasoning_block_is_treated_as_absent() {
        let (reasoning, rest) = split_reasoning("<think>  </think>answer");
        assert!(reasoning.is_none());
        assert_eq!(rest, "answer");
    }

    #[test]
    fn reply_constructors_set_origin_and_duration() {
        let local = Reply::local("done");
        assert!(local.is_local());
        assert!(local.duration.is_none());

        let remote = Reply::remote("answer", Duration::from_secs(2));
        assert_eq!(remote.origin, ReplyOrigin::Remote);
        assert_eq!(remote.duration, Some(Duration::from_secs(2)));

        let failed = Reply::remote_error("API error: 500 - boom");
        assert_eq!(failed.origin, ReplyOrigin::RemoteError);
        assert!(!failed.is_local());
        assert!(failed.duration.is_none());
    }

    #[test]
    fn short_paths_render_verbatim() {
        let home = PathBuf::from("/home/tester");
        let path = PathBuf::from("/srv/app");
        assert_eq!(cwd_display_with_home(&path, Some(&home)), "/srv/app");
    }

    #[test]
    fn long_paths_elide_to_last_two_components() {
        let home = PathBuf::from("/home/tester");
        let path = PathBuf::from("/very/long/path/that/keeps/going/and/going/project/src");
        assert_eq!(cwd_display_with_home(&path, Some(&home)), ".../project/src");
    }

    #[test]
    fn home_directory_renders_as_tilde() {
        let home = PathBuf::from("/home/tester");
        assert_eq!(cwd_display_with_home(&home, Some(&home)), "~");
        assert_eq!(
            cwd_display_with_home(&home.join("work"), Some(&home)),
            "~/work"
        );
    }

    #[test]
    fn deep_home_relative_paths_keep_the_tail() {
        let home = PathBuf::from("/home/tester");
        let deep = home.join("a/very/long/run/of/nested/directories/project/src");
        assert_eq!(
            cwd_display_with_home(&deep, Some(&home)),
            "~/.../project/src"
        );
    }
}

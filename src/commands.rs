//! Local command execution: thin adapters from parsed commands to snapshot
//! operations.
//!
//! Every filesystem or usage failure is converted to human-readable text
//! here; nothing escapes to the interaction loop as a raw error.

use crate::router::CommandKey;
use crate::snapshot::{DirectorySnapshot, Removed, DEFAULT_TREE_DEPTH};

/// Result of one local command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalOutcome {
    /// Display text for the user (possibly empty, which renders nothing).
    Reply(String),
    /// Sentinel telling the loop to terminate.
    Exit,
}

const HELP_TEXT: &str = "\
Available commands:
  help                 Show this help message
  exit | quit          Leave the assistant
  ls | tree            Show the current directory as a tree
  cd <dir>             Change directory (supports '..', '~', absolute paths)
  pwd                  Print the working directory
  create <file>        Create an empty file (alias: touch)
  mkdir <dir>          Create a directory
  rm <name>            Remove a file or empty directory (aliases: delete, remove)

Natural language works too:
  'list files', 'show directory tree', 'go to ~/projects',
  'create file notes.txt', 'make directory src', 'delete notes.txt'

Anything else is sent to the model along with your current directory
listing and the contents of any files you mention.";

/// Execute one local command against the snapshot.
pub fn execute(key: CommandKey, arg: &str, snapshot: &mut DirectorySnapshot) -> LocalOutcome {
    match key {
        CommandKey::Help => LocalOutcome::Reply(HELP_TEXT.to_string()),
        CommandKey::Exit => LocalOutcome::Exit,
        CommandKey::Pwd => LocalOutcome::Reply(snapshot.current_path().display().to_string()),
        CommandKey::Ls => LocalOutcome::Reply(render_listing(snapshot)),
        CommandKey::Cd => {
            // Success prints nothing; the prompt reflects the new directory.
            LocalOutcome::Reply(match snapshot.navigate(arg) {
                Ok(()) => String::new(),
                Err(e) => e.to_string(),
            })
        }
        CommandKey::CreateFile => {
            if arg.is_empty() {
                return LocalOutcome::Reply("Usage: create <filename>".to_string());
            }
            LocalOutcome::Reply(match snapshot.create_file(arg) {
                Ok(()) => format!("File created: {arg}"),
                Err(e) => e.to_string(),
            })
        }
        CommandKey::CreateDir => {
            if arg.is_empty() {
                return LocalOutcome::Reply("Usage: mkdir <dirname>".to_string());
            }
            LocalOutcome::Reply(match snapshot.create_dir(arg) {
                Ok(()) => format!("Directory created: {arg}"),
                Err(e) => e.to_string(),
            })
        }
        CommandKey::Remove => {
            if arg.is_empty() {
                return LocalOutcome::Reply("Usage: rm <file_or_empty_dir>".to_string());
            }
            LocalOutcome::Reply(match snapshot.remove(arg) {
                Ok(Removed::File) => format!("Removed file: {arg}"),
                Ok(Removed::BrokenLink) => format!("Removed broken symbolic link: {arg}"),
                Ok(Removed::EmptyDir) => format!("Removed empty directory: {arg}"),
                Err(e) => e.to_string(),
            })
        }
    }
}

/// Compose the `ls`/`tree` output: path header plus tree lines.
fn render_listing(snapshot: &DirectorySnapshot) -> String {
    let path = snapshot.current_path().display();
    let lines = snapshot.list_tree(DEFAULT_TREE_DEPTH);
    if lines.is_empty() {
        return format!("{path} (empty)");
    }
    format!("{path}\n{}", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::TestTempDir;

    fn snapshot_in(fixture: &TestTempDir) -> DirectorySnapshot {
        DirectorySnapshot::new(fixture.path().to_path_buf())
    }

    fn reply_text(outcome: LocalOutcome) -> String {
        match outcome {
            LocalOutcome::Reply(text) => text,
            LocalOutcome::Exit => panic!("expected a reply"),
        }
    }

    #[test]
    fn ls_on_empty_directory_states_empty() {
        let fixture = TestTempDir::new("commands-ls-empty");
        let mut snapshot = snapshot_in(&fixture);
        let text = reply_text(execute(CommandKey::Ls, "", &mut snapshot));
        assert!(text.ends_with("(empty)"), "got: {text}");
    }

    #[test]
    fn ls_lists_tree_under_path_header() {
        let fixture = TestTempDir::new("commands-ls");
        fixture.write_text("one.txt", "x");
        let mut snapshot = snapshot_in(&fixture);
        let text = reply_text(execute(CommandKey::Ls, "", &mut snapshot));
        assert!(text.starts_with(&fixture.path().display().to_string()));
        assert!(text.contains("└── one.txt"));
    }

    #[test]
    fn mkdir_existing_name_reports_already_exists_and_keeps_snapshot() {
        let fixture = TestTempDir::new("commands-mkdir-dup");
        fixture.write_text("taken/marker.txt", "x");
        let mut snapshot = snapshot_in(&fixture);
        let before = snapshot.entries().clone();

        let text = reply_text(execute(CommandKey::CreateDir, "taken", &mut snapshot));
        assert!(text.contains("already exists"), "got: {text}");
        assert_eq!(snapshot.entries(), &before);
    }

    #[test]
    fn create_and_remove_round_trip_messages() {
        let fixture = TestTempDir::new("commands-create-rm");
        let mut snapshot = snapshot_in(&fixture);

        let created = reply_text(execute(CommandKey::CreateFile, "note.txt", &mut snapshot));
        assert_eq!(created, "File created: note.txt");
        let removed = reply_text(execute(CommandKey::Remove, "note.txt", &mut snapshot));
        assert_eq!(removed, "Removed file: note.txt");
    }

    #[test]
    fn missing_arguments_return_usage_text() {
        let fixture = TestTempDir::new("commands-usage");
        let mut snapshot = snapshot_in(&fixture);
        for (key, expected) in [
            (CommandKey::CreateFile, "Usage: create <filename>"),
            (CommandKey::CreateDir, "Usage: mkdir <dirname>"),
            (CommandKey::Remove, "Usage: rm <file_or_empty_dir>"),
        ] {
            assert_eq!(reply_text(execute(key, "", &mut snapshot)), expected);
        }
        let cd = reply_text(execute(CommandKey::Cd, "", &mut snapshot));
        assert_eq!(cd, "Usage: cd <directory>");
    }

    #[test]
    fn cd_success_replies_with_empty_text() {
        let fixture = TestTempDir::new("commands-cd");
        fixture.write_text("sub/marker.txt", "x");
        let mut snapshot = snapshot_in(&fixture);
        let text = reply_text(execute(CommandKey::Cd, "sub", &mut snapshot));
        assert!(text.is_empty());
        assert_eq!(snapshot.current_path(), fixture.path().join("sub"));
    }

    #[test]
    fn cd_failure_reports_error_text() {
        let fixture = TestTempDir::new("commands-cd-missing");
        let mut snapshot = snapshot_in(&fixture);
        let text = reply_text(execute(CommandKey::Cd, "nowhere", &mut snapshot));
        assert!(text.contains("not found"), "got: {text}");
    }

    #[test]
    fn pwd_prints_current_path() {
        let fixture = TestTempDir::new("commands-pwd");
        let mut snapshot = snapshot_in(&fixture);
        let text = reply_text(execute(CommandKey::Pwd, "", &mut snapshot));
        assert_eq!(text, fixture.path().display().to_string());
    }

    #[test]
    fn help_lists_commands_and_exit_terminates() {
        let fixture = TestTempDir::new("commands-help");
        let mut snapshot = snapshot_in(&fixture);
        let text = reply_text(execute(CommandKey::Help, "", &mut snapshot));
        assert!(text.contains("cd <dir>"));
        assert!(text.contains("natural language") || text.contains("Natural language"));
        assert_eq!(execute(CommandKey::Exit, "", &mut snapshot), LocalOutcome::Exit);
    }
}

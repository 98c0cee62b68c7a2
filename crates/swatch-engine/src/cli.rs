//! Script and interactive front ends over a [`VariantSession`].

use crate::command::{self, CommandError};
use crate::executor::{CommandExecutor, ExecutorError};
use crate::session::VariantSession;
use std::io::{self, Write};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};

const PROMPT: &str = "swatch> ";
const EXIT_COMMANDS: [&str; 2] = ["exit", "quit"];

#[derive(Clone, Copy)]
pub struct OutputHandlers {
    pub out: fn(&str),
    pub err: fn(&str),
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("line {line} '{command}': {source}")]
    Command {
        line: usize,
        command: String,
        source: ExecutorError,
    },
}

/// Text shown for a failed command. Unknown commands point at `help`.
fn describe_error(err: &ExecutorError) -> String {
    match err {
        ExecutorError::Command(CommandError::Unknown(_)) => {
            format!("Error: {} (type 'help' for the command list)", err)
        }
        _ => format!("Error: {}", err),
    }
}

/// Run a script of commands, stopping at the first failing line.
/// Blank lines and `#` comments are skipped.
pub async fn run_script(
    session: &mut VariantSession,
    executor: &mut CommandExecutor,
    output: OutputHandlers,
    content: &str,
) -> Result<(), ScriptError> {
    for (number, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match executor.execute_line(session, trimmed).await {
            Ok(result) => (output.out)(&result.output),
            Err(source) => {
                return Err(ScriptError::Command {
                    line: number + 1,
                    command: trimmed.to_string(),
                    source,
                });
            }
        }
    }
    Ok(())
}

pub async fn run_file(
    session: &mut VariantSession,
    executor: &mut CommandExecutor,
    output: OutputHandlers,
    path: &str,
) -> Result<(), ScriptError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ScriptError::Read {
            path: path.to_string(),
            source,
        })?;
    run_script(session, executor, output, &content).await
}

enum ReplInput {
    Command(String),
    Skip,
    Exit,
}

fn classify_line(line: Option<String>) -> ReplInput {
    let Some(line) = line else {
        return ReplInput::Exit;
    };
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        ReplInput::Skip
    } else if EXIT_COMMANDS
        .iter()
        .any(|exit| trimmed.eq_ignore_ascii_case(exit))
    {
        ReplInput::Exit
    } else {
        ReplInput::Command(trimmed.to_string())
    }
}

/// Interactive loop on stdin. Ends on `exit`/`quit`, end of input or ctrl-c.
pub async fn run_repl(
    session: &mut VariantSession,
    executor: &mut CommandExecutor,
    output: OutputHandlers,
) -> io::Result<()> {
    let resolver = session.resolver();
    (output.out)(&format!(
        "Loaded {} axes, {} variants. 'exit' or 'quit' to close.",
        resolver.axis_count(),
        resolver.table().variants().len()
    ));
    (output.out)(command::HELP);

    let mut reader = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = io::stdout();

    loop {
        print!("{}", PROMPT);
        stdout.flush()?;

        let line = tokio::select! {
            line = reader.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                (output.out)("Interrupted.");
                break;
            }
        };

        match classify_line(line) {
            ReplInput::Command(line) => match executor.execute_line(session, &line).await {
                Ok(result) => (output.out)(&result.output),
                Err(err) => (output.err)(&describe_error(&err)),
            },
            ReplInput::Skip => continue,
            ReplInput::Exit => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_line() {
        assert!(matches!(
            classify_line(Some("  select 0 Red ".into())),
            ReplInput::Command(line) if line == "select 0 Red"
        ));
        assert!(matches!(classify_line(Some("   ".into())), ReplInput::Skip));
        assert!(matches!(
            classify_line(Some("# note".into())),
            ReplInput::Skip
        ));
        assert!(matches!(classify_line(Some("QUIT".into())), ReplInput::Exit));
        assert!(matches!(classify_line(None), ReplInput::Exit));
    }

    #[test]
    fn test_unknown_command_points_at_help() {
        let err = ExecutorError::Command(CommandError::Unknown("dance".into()));
        assert_eq!(
            describe_error(&err),
            "Error: Unknown command: dance (type 'help' for the command list)"
        );
        assert_eq!(
            describe_error(&ExecutorError::UnknownAxis("Fit".into())),
            "Error: Unknown axis: Fit"
        );
    }
}

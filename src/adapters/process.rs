use crate::domain::command::CommandLine;
use crate::domain::model::CommandOutput;
use crate::domain::ports::CommandRunner;
use crate::utils::error::{Result, SurveyError};
use std::io::ErrorKind;
use std::process::{Command, Stdio};

const MAX_STDERR_CHARS: usize = 2_000;

/// Runs commands with `std::process::Command`, blocking until exit. The child
/// gets no stdin, so prompts must be disabled through its own flags.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, command: &CommandLine) -> Result<CommandOutput> {
        let output = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| map_spawn_err(&command.program, e))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            // Some CLI errors land on stdout as a JSON `Error` envelope.
            let detail = if stderr.trim().is_empty() { &stdout } else { &stderr };
            return Err(SurveyError::CommandFailed {
                status: output.status.to_string(),
                stderr: truncate(detail.trim(), MAX_STDERR_CHARS),
            });
        }

        Ok(CommandOutput { stdout, stderr })
    }
}

fn map_spawn_err(program: &str, err: std::io::Error) -> SurveyError {
    if err.kind() == ErrorKind::NotFound {
        SurveyError::CliNotFound {
            program: program.to_string(),
        }
    } else {
        SurveyError::ProcessIo(err)
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdef", 3), "abc…");
        assert_eq!(truncate("ééé", 2), "éé…");
    }

    #[test]
    fn missing_binary_maps_to_cli_not_found() {
        let cmd = CommandLine::new("movesurvey-definitely-not-installed").arg("--help");
        let err = ProcessRunner::new().run(&cmd).unwrap_err();
        assert!(matches!(err, SurveyError::CliNotFound { .. }));
    }
}

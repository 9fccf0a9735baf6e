use crate::core::command::build_create_survey_command;
use crate::domain::command::CommandLine;
use crate::domain::model::{SurveySummary, TransactionInfo};
use crate::domain::ports::{CommandRunner, ConfigProvider};
use crate::utils::error::SurveyError;
use chrono::{DateTime, Duration, Utc};
use std::io::Write;

/// Result of one invocation. Process failures end up in `Failed` rather than
/// an `Err`, so callers always reach the reporting step.
#[derive(Debug)]
pub enum InvocationOutcome {
    DryRun {
        command: CommandLine,
    },
    Created {
        command: CommandLine,
        summary: SurveySummary,
        stdout: String,
        submitted_at: DateTime<Utc>,
    },
    Failed {
        command: CommandLine,
        error: SurveyError,
    },
}

impl InvocationOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, InvocationOutcome::Failed { .. })
    }

    pub fn command(&self) -> &CommandLine {
        match self {
            InvocationOutcome::DryRun { command }
            | InvocationOutcome::Created { command, .. }
            | InvocationOutcome::Failed { command, .. } => command,
        }
    }
}

pub struct SurveyInvoker<R: CommandRunner, C: ConfigProvider> {
    runner: R,
    config: C,
}

impl<R: CommandRunner, C: ConfigProvider> SurveyInvoker<R, C> {
    pub fn new(runner: R, config: C) -> Self {
        Self { runner, config }
    }

    pub fn command(&self) -> CommandLine {
        build_create_survey_command(&self.config)
    }

    pub fn dry_run(&self) -> InvocationOutcome {
        let command = self.command();
        tracing::info!("Dry run, not executing: {}", command);
        InvocationOutcome::DryRun { command }
    }

    /// Runs the CLI once, blocking until it exits.
    pub fn execute(&self) -> InvocationOutcome {
        let command = self.command();
        tracing::info!("Creating survey on Movement testnet");
        tracing::debug!("Executing: {}", command);

        let output = match self.runner.run(&command) {
            Ok(output) => output,
            Err(error) => {
                tracing::error!("Survey creation failed: {}", error);
                tracing::error!("Recovery suggestion: {}", error.recovery_suggestion());
                return InvocationOutcome::Failed { command, error };
            }
        };

        tracing::debug!("CLI stdout: {}", output.stdout.trim());
        let transaction = TransactionInfo::from_cli_output(&output.stdout);

        if let Some(info) = &transaction {
            if info.success == Some(false) {
                let error = SurveyError::TransactionAborted {
                    vm_status: info
                        .vm_status
                        .clone()
                        .unwrap_or_else(|| "unknown vm status".to_string()),
                };
                tracing::error!("Survey creation failed: {}", error);
                return InvocationOutcome::Failed { command, error };
            }
        }

        InvocationOutcome::Created {
            command,
            summary: SurveySummary {
                params: self.config.survey().clone(),
                transaction,
            },
            stdout: output.stdout,
            submitted_at: Utc::now(),
        }
    }
}

/// Writes the human-readable report for an outcome.
pub fn report(outcome: &InvocationOutcome, out: &mut dyn Write) -> std::io::Result<()> {
    match outcome {
        InvocationOutcome::DryRun { command } => {
            writeln!(out, "🔍 Dry run, command that would be executed:")?;
            writeln!(out, "{}", command)?;
        }
        InvocationOutcome::Created {
            summary,
            stdout,
            submitted_at,
            ..
        } => {
            writeln!(out, "✅ Survey created successfully!")?;
            if summary.transaction.is_none() && !stdout.trim().is_empty() {
                writeln!(out, "{}", stdout.trim())?;
            }
            writeln!(out)?;
            writeln!(out, "📋 {}", summary)?;
            let duration = i64::try_from(summary.params.duration_secs)
                .ok()
                .and_then(Duration::try_seconds);
            if let Some(closes_at) = duration.and_then(|d| submitted_at.checked_add_signed(d)) {
                writeln!(out, "  Closes around: {}", closes_at.format("%Y-%m-%d %H:%M UTC"))?;
            }
        }
        InvocationOutcome::Failed { error, .. } => {
            writeln!(out, "❌ {}", error.user_friendly_message())?;
            writeln!(out, "💡 {}", error.recovery_suggestion())?;
        }
    }
    Ok(())
}

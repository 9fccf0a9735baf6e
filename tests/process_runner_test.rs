#![cfg(unix)]

use movesurvey::core::{CommandLine, CommandRunner};
use movesurvey::utils::error::FAUCET_URL;
use movesurvey::{report, InvokerConfig, ProcessRunner, SurveyError, SurveyInvoker};

#[test]
fn test_successful_process_captures_stdout() {
    let cmd = CommandLine::new("sh").args(["-c", "echo created"]);
    let output = ProcessRunner::new().run(&cmd).unwrap();
    assert_eq!(output.stdout.trim(), "created");
}

#[test]
fn test_non_zero_exit_carries_stderr() {
    let cmd = CommandLine::new("sh").args(["-c", "echo 'not enough funds' >&2; exit 3"]);
    let err = ProcessRunner::new().run(&cmd).unwrap_err();
    match err {
        SurveyError::CommandFailed { status, stderr } => {
            assert!(status.contains('3'));
            assert_eq!(stderr, "not enough funds");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_real_invoker_against_failing_binary() {
    // `false` ignores its arguments and exits 1.
    let config = InvokerConfig {
        cli_bin: "false".to_string(),
        ..InvokerConfig::default()
    };
    let outcome = SurveyInvoker::new(ProcessRunner::new(), config).execute();
    assert!(!outcome.is_success());

    let mut buf = Vec::new();
    report(&outcome, &mut buf).unwrap();
    assert!(String::from_utf8(buf).unwrap().contains(FAUCET_URL));
}

#[test]
fn test_real_invoker_against_succeeding_binary() {
    let config = InvokerConfig {
        cli_bin: "true".to_string(),
        ..InvokerConfig::default()
    };
    let outcome = SurveyInvoker::new(ProcessRunner::new(), config).execute();
    assert!(outcome.is_success());
}

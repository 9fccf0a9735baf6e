use movesurvey::core::{CommandLine, CommandOutput, CommandRunner};
use movesurvey::utils::error::FAUCET_URL;
use movesurvey::{report, InvocationOutcome, InvokerConfig, Result, SurveyError, SurveyInvoker};

const ADDRESS: &str = "0xa11ce";

enum Scripted {
    Succeed(&'static str),
    Fail,
    Missing,
}

struct ScriptedRunner(Scripted);

impl CommandRunner for ScriptedRunner {
    fn run(&self, command: &CommandLine) -> Result<CommandOutput> {
        match &self.0 {
            Scripted::Succeed(stdout) => Ok(CommandOutput {
                stdout: stdout.to_string(),
                stderr: String::new(),
            }),
            Scripted::Fail => Err(SurveyError::CommandFailed {
                status: "exit status: 1".to_string(),
                stderr: "INSUFFICIENT_BALANCE_FOR_TRANSACTION_FEE".to_string(),
            }),
            Scripted::Missing => Err(SurveyError::CliNotFound {
                program: command.program.clone(),
            }),
        }
    }
}

fn config() -> InvokerConfig {
    let mut config = InvokerConfig::default();
    config.contract.address = ADDRESS.to_string();
    config
}

fn render(outcome: &InvocationOutcome) -> String {
    let mut buf = Vec::new();
    report(outcome, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_rendered_command_contains_function_and_ordered_args() {
    let invoker = SurveyInvoker::new(ScriptedRunner(Scripted::Succeed("")), config());
    let rendered = invoker.command().render();

    assert!(rendered.starts_with("movement move run --function-id 0xa11ce::survey::create_survey --args "));
    assert_eq!(rendered.matches(ADDRESS).count(), 1);

    let expected_in_order = [
        "'string:Customer Satisfaction Survey'",
        "'string:Help us improve our services by sharing your feedback'",
        "u64:10000000",
        "u64:100",
        "u64:604800",
    ];
    let mut cursor = 0;
    for arg in expected_in_order {
        let found = rendered[cursor..]
            .find(arg)
            .unwrap_or_else(|| panic!("{} missing or out of order in {}", arg, rendered));
        cursor += found + arg.len();
    }
    assert!(rendered.ends_with("--profile default --assume-yes"));
}

#[test]
fn test_success_summary_echoes_parameters() {
    let invoker = SurveyInvoker::new(
        ScriptedRunner(Scripted::Succeed("Transaction submitted\n")),
        config(),
    );
    let outcome = invoker.execute();
    assert!(outcome.is_success());

    let text = render(&outcome);
    assert!(text.contains("Survey created successfully"));
    assert!(text.contains("Transaction submitted"));
    assert!(text.contains("Title: Customer Satisfaction Survey"));
    assert!(text.contains("Reward: 0.1 MOVE per response"));
    assert!(text.contains("Max responses: 100"));
    assert!(text.contains("Duration: 604800 seconds (7 days)"));
    assert!(text.contains("Reward pool: 10 MOVE"));
}

#[test]
fn test_success_with_json_envelope_reports_hash() {
    let stdout = r#"{"Result":{"transaction_hash":"0xfeed","gas_used":1337,"success":true,"vm_status":"Executed successfully"}}"#;
    let invoker = SurveyInvoker::new(ScriptedRunner(Scripted::Succeed(stdout)), config());
    let text = render(&invoker.execute());

    assert!(text.contains("Transaction: 0xfeed"));
    assert!(text.contains("Gas used: 1337"));
    assert!(!text.contains("transaction_hash"));
}

#[test]
fn test_aborted_transaction_is_a_failure() {
    let stdout = r#"{"Result":{"transaction_hash":"0xdead","success":false,"vm_status":"Move abort: EINVALID_REWARD"}}"#;
    let invoker = SurveyInvoker::new(ScriptedRunner(Scripted::Succeed(stdout)), config());
    let outcome = invoker.execute();

    assert!(!outcome.is_success());
    let text = render(&outcome);
    assert!(text.contains("EINVALID_REWARD"));
    assert!(text.contains(FAUCET_URL));
}

#[test]
fn test_failure_prints_remediation_and_returns_normally() {
    let invoker = SurveyInvoker::new(ScriptedRunner(Scripted::Fail), config());
    let outcome = invoker.execute();

    match &outcome {
        InvocationOutcome::Failed { error, command } => {
            assert!(error.is_process_failure());
            assert_eq!(command, &invoker.command());
        }
        other => panic!("expected failure, got {:?}", other),
    }

    let text = render(&outcome);
    assert!(text.contains("Error creating survey"));
    assert!(text.contains("INSUFFICIENT_BALANCE_FOR_TRANSACTION_FEE"));
    assert!(text.contains(FAUCET_URL));
}

#[test]
fn test_missing_cli_suggests_install_and_funds() {
    let invoker = SurveyInvoker::new(ScriptedRunner(Scripted::Missing), config());
    let text = render(&invoker.execute());

    assert!(text.contains("Could not start the Movement CLI"));
    assert!(text.contains("Install the Movement CLI"));
    assert!(text.contains(FAUCET_URL));
}

#[test]
fn test_dry_run_prints_command() {
    let invoker = SurveyInvoker::new(ScriptedRunner(Scripted::Fail), config());
    let outcome = invoker.dry_run();
    assert!(outcome.is_success());

    let text = render(&outcome);
    assert!(text.contains(&invoker.command().render()));
}

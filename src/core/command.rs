use crate::domain::command::CommandLine;
use crate::domain::ports::ConfigProvider;

/// `<cli> move run --function-id <addr>::<module>::<fn> --args <typed args...> --profile <profile>`
pub fn build_create_survey_command<C: ConfigProvider + ?Sized>(config: &C) -> CommandLine {
    let mut command = CommandLine::new(config.cli_bin())
        .args(["move", "run", "--function-id"])
        .arg(config.contract().function_id())
        .arg("--args")
        .args(config.survey().to_move_args().iter().map(ToString::to_string))
        .arg("--profile")
        .arg(config.profile());

    if config.assume_yes() {
        command = command.arg("--assume-yes");
    }
    command
}

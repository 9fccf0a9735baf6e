use crate::domain::command::CommandLine;
use crate::domain::model::{CommandOutput, ContractTarget, SurveyParams};
use crate::utils::error::Result;

/// Runs an external command to completion and captures its output.
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &CommandLine) -> Result<CommandOutput>;
}

pub trait ConfigProvider: Send + Sync {
    fn cli_bin(&self) -> &str;
    fn profile(&self) -> &str;
    fn assume_yes(&self) -> bool;
    fn contract(&self) -> &ContractTarget;
    fn survey(&self) -> &SurveyParams;
}

pub mod command;
pub mod invoker;
pub mod proxy;

pub use crate::domain::command::CommandLine;
pub use crate::domain::model::{CommandOutput, SurveyParams, SurveySummary};
pub use crate::domain::ports::{CommandRunner, ConfigProvider};
pub use crate::utils::error::Result;

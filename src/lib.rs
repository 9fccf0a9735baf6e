pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, ProxyCli};

pub use adapters::ProcessRunner;
pub use config::{toml_config::TomlConfig, InvokerConfig, ProxyConfig};
pub use self::core::{
    invoker::{report, InvocationOutcome, SurveyInvoker},
    proxy::{ProxyRule, ProxyState},
};
pub use utils::error::{Result, SurveyError};

#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::{ContractTarget, SurveyParams};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

pub const DEFAULT_CLI_BIN: &str = "movement";
pub const DEFAULT_PROFILE: &str = "default";
pub const DEFAULT_PROXY_BIND: &str = "127.0.0.1:5173";
pub const DEFAULT_PROXY_PREFIX: &str = "/api/movement";
pub const DEFAULT_PROXY_TARGET: &str = "https://full.testnet.movementinfra.xyz";
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Fully resolved settings for one survey-creation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvokerConfig {
    pub cli_bin: String,
    pub profile: String,
    pub assume_yes: bool,
    pub contract: ContractTarget,
    pub survey: SurveyParams,
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            cli_bin: DEFAULT_CLI_BIN.to_string(),
            profile: DEFAULT_PROFILE.to_string(),
            assume_yes: true,
            contract: ContractTarget::default(),
            survey: SurveyParams::default(),
        }
    }
}

impl ConfigProvider for InvokerConfig {
    fn cli_bin(&self) -> &str {
        &self.cli_bin
    }

    fn profile(&self) -> &str {
        &self.profile
    }

    fn assume_yes(&self) -> bool {
        self.assume_yes
    }

    fn contract(&self) -> &ContractTarget {
        &self.contract
    }

    fn survey(&self) -> &SurveyParams {
        &self.survey
    }
}

impl Validate for InvokerConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("cli.bin", &self.cli_bin)?;
        validation::validate_non_empty_string("cli.profile", &self.profile)?;
        validation::validate_account_address("contract.address", &self.contract.address)?;
        validation::validate_identifier("contract.module", &self.contract.module)?;
        validation::validate_identifier("contract.function", &self.contract.function)?;
        validation::validate_non_empty_string("survey.title", &self.survey.title)?;
        validation::validate_non_empty_string("survey.description", &self.survey.description)?;
        validation::validate_positive_number(
            "survey.reward_per_response",
            self.survey.reward_per_response,
            1,
        )?;
        validation::validate_positive_number("survey.max_responses", self.survey.max_responses, 1)?;
        validation::validate_positive_number("survey.duration_secs", self.survey.duration_secs, 1)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub bind: String,
    pub prefix: String,
    pub target: String,
    pub max_body_bytes: usize,
    pub timeout_secs: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_PROXY_BIND.to_string(),
            prefix: DEFAULT_PROXY_PREFIX.to_string(),
            target: DEFAULT_PROXY_TARGET.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
        }
    }
}

impl ProxyConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.bind
            .parse()
            .map_err(|e| crate::utils::error::SurveyError::InvalidConfigValue {
                field: "proxy.bind".to_string(),
                value: self.bind.clone(),
                reason: format!("Invalid socket address: {}", e),
            })
    }
}

impl Validate for ProxyConfig {
    fn validate(&self) -> Result<()> {
        self.bind_addr()?;
        validation::validate_path_prefix("proxy.prefix", &self.prefix)?;
        validation::validate_url("proxy.target", &self.target)?;
        validation::validate_positive_number("proxy.max_body_bytes", self.max_body_bytes as u64, 1)?;
        validation::validate_positive_number("proxy.timeout_secs", self.timeout_secs, 1)?;
        Ok(())
    }
}

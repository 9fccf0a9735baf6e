use crate::config::toml_config::TomlConfig;
use crate::config::{InvokerConfig, ProxyConfig};
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

/// Flags for the `movesurvey` binary. Anything given here wins over the
/// config file, which wins over the defaults.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "movesurvey")]
#[command(about = "Create a test survey on the Movement testnet through the Movement CLI")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// CLI executable to invoke
    #[arg(long)]
    pub cli_bin: Option<String>,

    /// CLI profile used to sign the transaction
    #[arg(long)]
    pub profile: Option<String>,

    /// Survey contract account address
    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub module: Option<String>,

    #[arg(long)]
    pub function: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Reward per response, in octas
    #[arg(long)]
    pub reward: Option<u64>,

    #[arg(long)]
    pub max_responses: Option<u64>,

    /// Survey duration in seconds
    #[arg(long)]
    pub duration: Option<u64>,

    /// Skip the CLI's confirmation prompt (the default)
    #[arg(long, conflicts_with = "no_assume_yes")]
    pub assume_yes: bool,

    /// Leave the CLI's confirmation prompt on; it reads from an empty stdin
    #[arg(long)]
    pub no_assume_yes: bool,

    /// Print the command without running it
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    pub fn resolve(&self) -> Result<InvokerConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                TomlConfig::from_file(path)?.invoker_config()
            }
            None => InvokerConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut InvokerConfig) {
        if let Some(bin) = &self.cli_bin {
            config.cli_bin = bin.clone();
        }
        if let Some(profile) = &self.profile {
            config.profile = profile.clone();
        }
        if self.assume_yes {
            config.assume_yes = true;
        }
        if self.no_assume_yes {
            config.assume_yes = false;
        }
        if let Some(address) = &self.address {
            config.contract.address = address.clone();
        }
        if let Some(module) = &self.module {
            config.contract.module = module.clone();
        }
        if let Some(function) = &self.function {
            config.contract.function = function.clone();
        }
        if let Some(title) = &self.title {
            config.survey.title = title.clone();
        }
        if let Some(description) = &self.description {
            config.survey.description = description.clone();
        }
        if let Some(reward) = self.reward {
            config.survey.reward_per_response = reward;
        }
        if let Some(max) = self.max_responses {
            config.survey.max_responses = max;
        }
        if let Some(duration) = self.duration {
            config.survey.duration_secs = duration;
        }
    }
}

/// Flags for the `dev_proxy` binary.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "dev_proxy")]
#[command(about = "Forward /api/movement requests to a Movement full node")]
pub struct ProxyCli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Local listen address
    #[arg(long)]
    pub bind: Option<String>,

    /// Remote origin requests are forwarded to
    #[arg(long)]
    pub target: Option<String>,

    /// Path prefix that is matched and stripped
    #[arg(long)]
    pub prefix: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl ProxyCli {
    pub fn resolve(&self) -> Result<ProxyConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?.proxy_config(),
            None => ProxyConfig::default(),
        };
        if let Some(bind) = &self.bind {
            config.bind = bind.clone();
        }
        if let Some(target) = &self.target {
            config.target = target.trim_end_matches('/').to_string();
        }
        if let Some(prefix) = &self.prefix {
            config.prefix = prefix.clone();
        }
        Ok(config)
    }
}

use crate::config::{InvokerConfig, ProxyConfig};
use crate::utils::error::{Result, SurveyError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk configuration. Every section and field is optional; anything left
/// out keeps its compiled-in default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub cli: Option<CliSection>,
    pub contract: Option<ContractSection>,
    pub survey: Option<SurveySection>,
    pub proxy: Option<ProxySection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliSection {
    pub bin: Option<String>,
    pub profile: Option<String>,
    pub assume_yes: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractSection {
    pub address: Option<String>,
    pub module: Option<String>,
    pub function: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SurveySection {
    pub title: Option<String>,
    pub description: Option<String>,
    pub reward_per_response: Option<u64>,
    pub max_responses: Option<u64>,
    pub duration_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProxySection {
    pub bind: Option<String>,
    pub prefix: Option<String>,
    pub target: Option<String>,
    pub max_body_bytes: Option<usize>,
    pub timeout_secs: Option<u64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SurveyError::Config {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR_NAME}` with the variable's value, escaped for a TOML
    /// basic (double-quoted) string. Unset variables are left verbatim so
    /// validation can report them.
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").expect("static regex");

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => escape_basic_string(&value),
                Err(_) => format!("${{{}}}", var_name),
            }
        })
        .into_owned()
    }

    /// Layers the file over the defaults.
    pub fn invoker_config(&self) -> InvokerConfig {
        let mut config = InvokerConfig::default();

        if let Some(cli) = &self.cli {
            if let Some(bin) = &cli.bin {
                config.cli_bin = bin.clone();
            }
            if let Some(profile) = &cli.profile {
                config.profile = profile.clone();
            }
            if let Some(assume_yes) = cli.assume_yes {
                config.assume_yes = assume_yes;
            }
        }

        if let Some(contract) = &self.contract {
            if let Some(address) = &contract.address {
                config.contract.address = address.clone();
            }
            if let Some(module) = &contract.module {
                config.contract.module = module.clone();
            }
            if let Some(function) = &contract.function {
                config.contract.function = function.clone();
            }
        }

        if let Some(survey) = &self.survey {
            let params = &mut config.survey;
            if let Some(title) = &survey.title {
                params.title = title.clone();
            }
            if let Some(description) = &survey.description {
                params.description = description.clone();
            }
            if let Some(reward) = survey.reward_per_response {
                params.reward_per_response = reward;
            }
            if let Some(max) = survey.max_responses {
                params.max_responses = max;
            }
            if let Some(duration) = survey.duration_secs {
                params.duration_secs = duration;
            }
        }

        config
    }

    pub fn proxy_config(&self) -> ProxyConfig {
        let mut config = ProxyConfig::default();
        if let Some(proxy) = &self.proxy {
            if let Some(bind) = &proxy.bind {
                config.bind = bind.clone();
            }
            if let Some(prefix) = &proxy.prefix {
                config.prefix = prefix.clone();
            }
            if let Some(target) = &proxy.target {
                config.target = target.trim_end_matches('/').to_string();
            }
            if let Some(max) = proxy.max_body_bytes {
                config.max_body_bytes = max;
            }
            if let Some(timeout) = proxy.timeout_secs {
                config.timeout_secs = timeout;
            }
        }
        config
    }
}

fn escape_basic_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.invoker_config().validate()?;
        self.proxy_config().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.invoker_config(), InvokerConfig::default());
        assert_eq!(config.proxy_config(), ProxyConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = TomlConfig::from_toml_str("[survey]\nreward = 5\n").unwrap_err();
        assert!(matches!(err, SurveyError::Toml(_)));
    }

    #[test]
    fn escape_basic_string_handles_quotes_and_controls() {
        assert_eq!(escape_basic_string(r#"The "Big" Poll"#), r#"The \"Big\" Poll"#);
        assert_eq!(escape_basic_string(r"C:\surveys"), r"C:\\surveys");
        assert_eq!(escape_basic_string("a\tb\nc"), r"a\tb\nc");
        assert_eq!(escape_basic_string("bell\u{7}"), r"bell\u0007");
    }

    #[test]
    fn unset_env_vars_stay_verbatim() {
        let out = TomlConfig::substitute_env_vars("address = \"${MOVESURVEY_SURELY_UNSET_VAR}\"");
        assert_eq!(out, "address = \"${MOVESURVEY_SURELY_UNSET_VAR}\"");
    }
}

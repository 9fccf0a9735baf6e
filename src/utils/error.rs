use thiserror::Error;

macro_rules! faucet_url {
    () => {
        "https://faucet.movementnetwork.xyz/"
    };
}

/// Faucet used to top up testnet accounts.
pub const FAUCET_URL: &str = faucet_url!();

const FUND_HINT: &str = concat!(
    "Make sure your profile has testnet MOVE. Request funds from the faucet at ",
    faucet_url!(),
    " or run `movement account fund-with-faucet --profile <profile>`"
);

#[derive(Error, Debug)]
pub enum SurveyError {
    #[error("CLI executable `{program}` was not found")]
    CliNotFound { program: String },

    #[error("CLI exited with {status}: {stderr}")]
    CommandFailed { status: String, stderr: String },

    #[error("Transaction was not executed: {vm_status}")]
    TransactionAborted { vm_status: String },

    #[error("Failed to run CLI process: {0}")]
    ProcessIo(std::io::Error),

    #[error("Upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl SurveyError {
    /// True for the failures of the external CLI process itself.
    pub fn is_process_failure(&self) -> bool {
        matches!(
            self,
            SurveyError::CliNotFound { .. }
                | SurveyError::CommandFailed { .. }
                | SurveyError::TransactionAborted { .. }
                | SurveyError::ProcessIo(_)
        )
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SurveyError::CliNotFound { program } => format!(
                "Install the Movement CLI and make sure `{}` is on your PATH (or pass --cli-bin). {}",
                program, FUND_HINT
            ),
            SurveyError::CommandFailed { .. }
            | SurveyError::TransactionAborted { .. }
            | SurveyError::ProcessIo(_) => FUND_HINT.to_string(),
            SurveyError::Http(_) => {
                "Check that the proxy target is reachable and that the URL is correct".to_string()
            }
            SurveyError::Io(_) => "Check file permissions and that the address is free".to_string(),
            SurveyError::Toml(_) => "Make sure the file exists and is valid TOML format".to_string(),
            SurveyError::Config { .. } | SurveyError::InvalidConfigValue { .. } => {
                "Fix the configuration value and run again".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SurveyError::CliNotFound { .. } => {
                "Could not start the Movement CLI".to_string()
            }
            SurveyError::CommandFailed { .. } | SurveyError::ProcessIo(_) => {
                format!("Error creating survey: {}", self)
            }
            SurveyError::TransactionAborted { vm_status } => {
                format!("Survey transaction failed on chain: {}", vm_status)
            }
            SurveyError::InvalidConfigValue { field, reason, .. } => {
                format!("Invalid configuration for {}: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SurveyError>;

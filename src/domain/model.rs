use serde::{Deserialize, Serialize};
use std::fmt;

/// Octas per MOVE.
pub const OCTAS_PER_MOVE: u64 = 100_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyParams {
    pub title: String,
    pub description: String,
    /// Reward paid per response, in octas.
    pub reward_per_response: u64,
    pub max_responses: u64,
    pub duration_secs: u64,
}

impl Default for SurveyParams {
    fn default() -> Self {
        Self {
            title: "Customer Satisfaction Survey".to_string(),
            description: "Help us improve our services by sharing your feedback".to_string(),
            reward_per_response: 10_000_000,
            max_responses: 100,
            duration_secs: 604_800,
        }
    }
}

impl SurveyParams {
    /// Contract arguments in the order `create_survey` declares them.
    pub fn to_move_args(&self) -> Vec<MoveArg> {
        vec![
            MoveArg::String(self.title.clone()),
            MoveArg::String(self.description.clone()),
            MoveArg::U64(self.reward_per_response),
            MoveArg::U64(self.max_responses),
            MoveArg::U64(self.duration_secs),
        ]
    }

    /// Total octas locked if every response slot is filled.
    pub fn total_reward_pool(&self) -> Option<u64> {
        self.reward_per_response.checked_mul(self.max_responses)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractTarget {
    pub address: String,
    pub module: String,
    pub function: String,
}

impl Default for ContractTarget {
    fn default() -> Self {
        Self {
            address: "0x7ed3b0c4b5a3f4e3d0e7e8a1c9f5b2d6a4c3e1f0b9a8d7c6e5f4a3b2c1d0e9f8"
                .to_string(),
            module: "survey".to_string(),
            function: "create_survey".to_string(),
        }
    }
}

impl ContractTarget {
    pub fn function_id(&self) -> String {
        format!("{}::{}::{}", self.address, self.module, self.function)
    }
}

/// A typed entry-function argument as the CLI expects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveArg {
    String(String),
    U64(u64),
}

impl fmt::Display for MoveArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveArg::String(s) => write!(f, "string:{}", s),
            MoveArg::U64(n) => write!(f, "u64:{}", n),
        }
    }
}

/// Renders octas as a MOVE amount with trailing zeros trimmed.
pub fn format_move(octas: u64) -> String {
    let whole = octas / OCTAS_PER_MOVE;
    let frac = octas % OCTAS_PER_MOVE;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:08}", frac);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

/// `7 days`, `1 day 2 hours`, `90 seconds`.
pub fn format_duration(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    let seconds = secs % 60;

    let mut parts = Vec::new();
    for (value, unit) in [
        (days, "day"),
        (hours, "hour"),
        (minutes, "minute"),
        (seconds, "second"),
    ] {
        if value > 0 {
            let plural = if value == 1 { "" } else { "s" };
            parts.push(format!("{} {}{}", value, unit, plural));
        }
    }
    if parts.is_empty() {
        "0 seconds".to_string()
    } else {
        parts.join(" ")
    }
}

/// Fields of interest from the CLI's JSON output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionInfo {
    pub transaction_hash: Option<String>,
    pub gas_used: Option<u64>,
    pub vm_status: Option<String>,
    pub success: Option<bool>,
}

impl TransactionInfo {
    /// Parses the `{"Result": {...}}` envelope. Returns `None` when stdout is
    /// not that envelope.
    pub fn from_cli_output(stdout: &str) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_str(stdout.trim()).ok()?;
        let result = value.get("Result")?;
        Some(Self {
            transaction_hash: result
                .get("transaction_hash")
                .and_then(|v| v.as_str())
                .map(str::to_string),
            gas_used: result.get("gas_used").and_then(|v| v.as_u64()),
            vm_status: result
                .get("vm_status")
                .and_then(|v| v.as_str())
                .map(str::to_string),
            success: result.get("success").and_then(|v| v.as_bool()),
        })
    }
}

/// Captured output of a finished CLI process.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, Clone)]
pub struct SurveySummary {
    pub params: SurveyParams,
    pub transaction: Option<TransactionInfo>,
}

impl fmt::Display for SurveySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.params;
        writeln!(f, "Survey details:")?;
        writeln!(f, "  Title: {}", p.title)?;
        writeln!(f, "  Description: {}", p.description)?;
        writeln!(f, "  Reward: {} MOVE per response", format_move(p.reward_per_response))?;
        writeln!(f, "  Max responses: {}", p.max_responses)?;
        write!(
            f,
            "  Duration: {} seconds ({})",
            p.duration_secs,
            format_duration(p.duration_secs)
        )?;
        if let Some(pool) = p.total_reward_pool() {
            write!(f, "\n  Reward pool: {} MOVE", format_move(pool))?;
        }
        if let Some(tx) = &self.transaction {
            if let Some(hash) = &tx.transaction_hash {
                write!(f, "\n  Transaction: {}", hash)?;
            }
            if let Some(gas) = tx.gas_used {
                write!(f, "\n  Gas used: {}", gas)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_move_trims_trailing_zeros() {
        assert_eq!(format_move(10_000_000), "0.1");
        assert_eq!(format_move(100_000_000), "1");
        assert_eq!(format_move(150_000_000), "1.5");
        assert_eq!(format_move(123), "0.00000123");
        assert_eq!(format_move(0), "0");
    }

    #[test]
    fn format_duration_names_each_unit() {
        assert_eq!(format_duration(604_800), "7 days");
        assert_eq!(format_duration(90_000), "1 day 1 hour");
        assert_eq!(format_duration(61), "1 minute 1 second");
        assert_eq!(format_duration(0), "0 seconds");
    }

    #[test]
    fn move_args_keep_contract_order() {
        let args: Vec<String> = SurveyParams::default()
            .to_move_args()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            args,
            vec![
                "string:Customer Satisfaction Survey",
                "string:Help us improve our services by sharing your feedback",
                "u64:10000000",
                "u64:100",
                "u64:604800",
            ]
        );
    }

    #[test]
    fn parses_cli_result_envelope() {
        let stdout = r#"{
  "Result": {
    "transaction_hash": "0xabc",
    "gas_used": 512,
    "success": true,
    "vm_status": "Executed successfully"
  }
}"#;
        let info = TransactionInfo::from_cli_output(stdout).unwrap();
        assert_eq!(info.transaction_hash.as_deref(), Some("0xabc"));
        assert_eq!(info.gas_used, Some(512));
        assert_eq!(info.success, Some(true));

        assert!(TransactionInfo::from_cli_output("Transaction submitted").is_none());
        assert!(TransactionInfo::from_cli_output(r#"{"Error": "boom"}"#).is_none());
    }
}

use crate::utils::error::{Result, SurveyError};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: &str, reason: impl Into<String>) -> SurveyError {
    SurveyError::InvalidConfigValue {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid(
            field_name,
            url_str,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(invalid(
            field_name,
            &value.to_string(),
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

/// Account addresses are `0x` followed by 1 to 64 hex digits.
pub fn validate_account_address(field_name: &str, value: &str) -> Result<()> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^0x[0-9a-fA-F]{1,64}$").expect("static regex"));
    if !re.is_match(value) {
        return Err(invalid(
            field_name,
            value,
            "Expected 0x followed by 1 to 64 hex digits",
        ));
    }
    Ok(())
}

/// Move module and function names.
pub fn validate_identifier(field_name: &str, value: &str) -> Result<()> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static regex"));
    if !re.is_match(value) {
        return Err(invalid(field_name, value, "Not a valid Move identifier"));
    }
    Ok(())
}

pub fn validate_path_prefix(field_name: &str, value: &str) -> Result<()> {
    if !value.starts_with('/') || value.len() < 2 {
        return Err(invalid(
            field_name,
            value,
            "Prefix must start with '/' and name at least one segment",
        ));
    }
    if value.ends_with('/') {
        return Err(invalid(field_name, value, "Prefix must not end with '/'"));
    }
    Ok(())
}

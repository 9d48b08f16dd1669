use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{AssignmentRule, GroupRule, RuleError, TransferLabel};
use crate::report::Locale;

const LOCAL_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Config error: {0}")]
    Rule(#[from] RuleError),
    #[error("Config error: invalid date [{value}], expected yyyy-mm-dd HH:MM:SS")]
    InvalidDate {
        value: String
    }
}

/// Declarative description of one export run, read from a TOML file.
///
/// Rules keep their declaration order; the classifier and the grouping
/// engine both honor it.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    /// Address of the wallet whose transfers are exported.
    pub wallet_address: String,
    /// Shown in the report's exchange column.
    #[serde(default)]
    pub wallet_name: Option<String>,
    /// Time zone for comment and report dates and for CLI date bounds.
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
    #[serde(default)]
    pub locale: Locale,
    /// Token allow-list; empty keeps every token.
    #[serde(default)]
    pub currency_filters: Vec<String>,
    /// Token name replacements applied only in the report.
    #[serde(default)]
    pub currency_aliases: HashMap<String, String>,
    #[serde(default)]
    pub assignments: Vec<AssignmentRuleConfig>,
    #[serde(default)]
    pub group_filters: Vec<GroupRuleConfig>
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssignmentRuleConfig {
    pub transfer_type: TransferLabel,
    #[serde(default)]
    pub from_address: Option<String>,
    #[serde(default)]
    pub to_address: Option<String>
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupRuleConfig {
    pub currency: String,
    #[serde(default)]
    pub from_address: Option<String>,
    #[serde(default)]
    pub to_address: Option<String>
}

fn default_timezone() -> Tz {
    chrono_tz::Europe::Berlin
}

impl ExporterConfig {
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml(&std::fs::read_to_string(path)?)
    }

    /// Validates and materializes the assignment rules in declaration order.
    ///
    /// # Errors
    /// Fails on a rule with neither address set; an unusable rule is never
    /// handed to the engine.
    pub fn assignment_rules(&self) -> Result<Vec<AssignmentRule>, ConfigError> {
        self.assignments.iter()
            .map(|rule| {
                Ok(AssignmentRule::new(
                    rule.transfer_type,
                    rule.from_address.clone(),
                    rule.to_address.clone()
                )?)
            })
            .collect()
    }

    /// Validates and materializes the group rules in declaration order.
    pub fn group_rules(&self) -> Result<Vec<GroupRule>, ConfigError> {
        self.group_filters.iter()
            .map(|rule| {
                Ok(GroupRule::new(
                    rule.currency.clone(),
                    rule.from_address.clone(),
                    rule.to_address.clone()
                )?)
            })
            .collect()
    }

    /// Parses a `yyyy-mm-dd HH:MM:SS` date in the configured time zone into
    /// epoch milliseconds.
    pub fn parse_local_date(&self, value: &str) -> Result<i64, ConfigError> {
        let invalid = || ConfigError::InvalidDate { value: value.to_string() };

        let naive = NaiveDateTime::parse_from_str(value, LOCAL_DATE_FORMAT).map_err(|_| invalid())?;

        naive.and_local_timezone(self.timezone)
            .single()
            .map(|date| date.timestamp_millis())
            .ok_or_else(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::ExporterConfig;

    use anyhow::Result;

    use crate::models::RuleError;
    use crate::report::Locale;

    #[test]
    fn test_minimal_config_falls_back_to_defaults() -> Result<()> {
        let config = ExporterConfig::from_toml("wallet_address = \"TWalletOwner\"")?;

        assert_eq!(config.wallet_address, "TWalletOwner");
        assert_eq!(config.wallet_name, None);
        assert_eq!(config.timezone, chrono_tz::Europe::Berlin);
        assert_eq!(config.locale, Locale::De);
        assert!(config.currency_filters.is_empty());
        assert!(config.currency_aliases.is_empty());
        assert!(config.assignment_rules()?.is_empty());
        assert!(config.group_rules()?.is_empty());

        Ok(())
    }

    #[test]
    fn test_rules_materialize_in_declaration_order() -> Result<()> {
        let config = ExporterConfig::from_toml(
            r#"
            wallet_address = "TWalletOwner"
            timezone = "Europe/London"
            locale = "en"

            [[assignments]]
            transfer_type = "mining"
            from_address = "TPool"

            [[assignments]]
            transfer_type = "donation"
            to_address = "TCharity"

            [[group_filters]]
            currency = "TokenX"
            from_address = "TPool"
            "#
        )?;

        let assignments = config.assignment_rules()?;
        let group_rules = config.group_rules()?;

        assert_eq!(assignments.len(), 2);
        assert_eq!(assignments[0].label(), crate::models::TransferLabel::Mining);
        assert_eq!(assignments[1].label(), crate::models::TransferLabel::Donation);
        assert_eq!(group_rules.len(), 1);
        assert_eq!(group_rules[0].currency(), "TokenX");
        assert_eq!(config.timezone, chrono_tz::Europe::London);
        assert_eq!(config.locale, Locale::En);

        Ok(())
    }

    #[test]
    fn test_rule_without_any_address_is_rejected_at_load() -> Result<()> {
        let config = ExporterConfig::from_toml(
            r#"
            wallet_address = "TWalletOwner"

            [[assignments]]
            transfer_type = "mining"
            "#
        )?;

        let result = config.assignment_rules();

        assert!(matches!(result, Err(super::ConfigError::Rule(RuleError::MissingAddress))));

        Ok(())
    }

    #[test]
    fn test_unknown_config_fields_are_rejected() {
        let result = ExporterConfig::from_toml("wallet_address = \"T\"\nwalet_name = \"oops\"");

        assert!(result.is_err());
    }

    #[test]
    fn test_local_dates_parse_in_the_configured_timezone() -> Result<()> {
        let config = ExporterConfig::from_toml("wallet_address = \"TWalletOwner\"")?;

        // 1970-01-01 01:00:00 Berlin is the epoch instant.
        assert_eq!(config.parse_local_date("1970-01-01 01:00:00")?, 0);
        assert_eq!(config.parse_local_date("1970-01-01 01:00:01")?, 1_000);
        assert!(config.parse_local_date("01.01.1970").is_err());

        Ok(())
    }
}

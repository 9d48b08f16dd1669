use crate::models::{Direction, RuleError, Transfer, TransferLabel};

/// Maps transfers matching an address pattern to a fixed transaction-type
/// label. Without a matching rule, transfers fall back to deposit or
/// withdrawal relative to the wallet.
#[derive(Debug, Clone)]
pub struct AssignmentRule {
    label: TransferLabel,
    from_address: Option<String>,
    to_address: Option<String>
}

impl AssignmentRule {
    /// Creates a rule assigning `label` to transfers sent from
    /// `from_address` or sent to `to_address`.
    ///
    /// # Errors
    /// Returns `RuleError::MissingAddress` if neither address is set; an
    /// unusable rule is never stored.
    pub fn new(label: TransferLabel, from_address: Option<String>, to_address: Option<String>) -> Result<Self, RuleError> {
        if from_address.is_none() && to_address.is_none() {
            return Err(RuleError::MissingAddress)
        }

        Ok(Self { label, from_address, to_address })
    }

    pub fn label(&self) -> TransferLabel {
        self.label
    }

    /// Whether the transfer's sender or receiver matches this rule.
    pub fn matches(&self, transfer: &Transfer) -> bool {
        self.from_address.as_deref() == Some(transfer.from_address.as_str())
            || self.to_address.as_deref() == Some(transfer.to_address.as_str())
    }
}

/// Marks transfers from a specific sender (deposit-style) or to a specific
/// receiver (withdrawal-style) for run-length grouping.
///
/// `currency` is informational metadata; grouping itself is keyed by each
/// transfer's own token name, so one address pattern applies across tokens.
#[derive(Debug, Clone)]
pub struct GroupRule {
    currency: String,
    from_address: Option<String>,
    to_address: Option<String>
}

impl GroupRule {
    /// # Errors
    /// Returns `RuleError::MissingAddress` if neither address is set.
    pub fn new(currency: impl Into<String>, from_address: Option<String>, to_address: Option<String>) -> Result<Self, RuleError> {
        if from_address.is_none() && to_address.is_none() {
            return Err(RuleError::MissingAddress)
        }

        Ok(Self { currency: currency.into(), from_address, to_address })
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Resolves the direction and counterparty this rule implies for a
    /// transfer, or `None` when the rule does not match.
    ///
    /// The deposit side takes precedence when a rule carries both addresses.
    pub fn apply(&self, transfer: &Transfer) -> Option<(Direction, String)> {
        if let Some(from_address) = &self.from_address {
            if *from_address == transfer.from_address {
                return Some((Direction::Incoming, from_address.clone()))
            }
        }

        if let Some(to_address) = &self.to_address {
            if *to_address == transfer.to_address {
                return Some((Direction::Outgoing, to_address.clone()))
            }
        }

        None
    }
}

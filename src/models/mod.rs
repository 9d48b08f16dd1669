mod errors;
mod rules;
#[cfg(test)]
mod tests;
mod transfer;

use serde::Deserialize;

pub use errors::{EngineError, RuleError};
pub use rules::{AssignmentRule, GroupRule};
pub use transfer::{NATIVE_TOKEN, Transfer};

/// Transaction-type labels recognized by CoinTracking.info.
///
/// The enum carries no display text; the locale-specific string is picked
/// only when the report is rendered.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferLabel {
    Deposit,
    Revenue,
    Mining,
    GiftIn,
    Withdrawal,
    Expense,
    Donation,
    GiftOut,
    Stolen,
    Loss
}

/// Direction of a transfer relative to the owning wallet.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Incoming,
    Outgoing
}

use crate::models::{AssignmentRule, EngineError, Transfer, TransferLabel};

/// Resolves the transaction-type label for one transfer.
///
/// Assignment rules are tried in registration order and the first match
/// wins. Without a match the direction relative to the wallet decides:
/// transfers into the wallet are deposits, transfers out of it withdrawals.
///
/// # Errors
/// A transfer touching neither side of the wallet cannot be classified at
/// all; that indicates the transfer does not belong to this wallet and the
/// run must abort rather than default the label.
pub fn classify(
    transfer: &Transfer,
    rules: &[AssignmentRule],
    wallet_address: &str
) -> Result<TransferLabel, EngineError> {
    for rule in rules {
        if rule.matches(transfer) {
            return Ok(rule.label())
        }
    }

    if transfer.to_address == wallet_address {
        Ok(TransferLabel::Deposit)
    } else if transfer.from_address == wallet_address {
        Ok(TransferLabel::Withdrawal)
    } else {
        Err(EngineError::unclassifiable(transfer, wallet_address))
    }
}

mod classify;
mod group;
mod merge;

use chrono_tz::Tz;
use tracing::debug;

pub use classify::classify;
pub use group::{Group, group};
pub use merge::merge;

use crate::models::{AssignmentRule, EngineError, GroupRule, Transfer, TransferLabel};

/// Runs the full reduction and classification pipeline over one wallet's
/// transfers.
///
/// Transfers are sorted chronologically, collapsed into aggregates where the
/// group rules apply (grouping is strictly opt-in; without group rules the
/// input passes through untouched) and then labeled one by one. The returned
/// records are in ascending timestamp order.
///
/// # Errors
/// Fails when a transfer matches no assignment rule and involves neither
/// side of the wallet, or when an aggregate amount cannot be represented.
pub fn process(
    mut transfers: Vec<Transfer>,
    assignment_rules: &[AssignmentRule],
    group_rules: &[GroupRule],
    wallet_address: &str,
    timezone: Tz
) -> Result<Vec<(Transfer, TransferLabel)>, EngineError> {
    transfers.sort_by_key(|transfer| transfer.timestamp);

    let reduced = if group_rules.is_empty() {
        transfers
    } else {
        let (groups, ungrouped) = group(transfers, group_rules);

        debug!("Segmented into {} runs with {} transfers left ungrouped", groups.len(), ungrouped.len());

        merge(groups, ungrouped, timezone)?
    };

    let mut records = Vec::with_capacity(reduced.len());

    for transfer in reduced {
        let label = classify(&transfer, assignment_rules, wallet_address)?;
        records.push((transfer, label));
    }

    Ok(records)
}

use chrono_tz::Tz;

use crate::engine::Group;
use crate::models::{EngineError, Transfer};

/// Collapses every group into one synthetic aggregate transfer and returns
/// the aggregates combined with the ungrouped remainder, stably sorted by
/// timestamp.
///
/// Aggregation is non-lossy: amounts are summed with checked integer
/// arithmetic and a run whose sum cannot be represented is reported as an
/// error instead of wrapping. A singleton group still becomes an aggregate,
/// so its comment marks it as a merge artifact.
pub fn merge(groups: Vec<Group>, ungrouped: Vec<Transfer>, timezone: Tz) -> Result<Vec<Transfer>, EngineError> {
    let mut merged = ungrouped;

    for group in groups {
        if let Some(aggregate) = collapse(group, timezone)? {
            merged.push(aggregate);
        }
    }

    merged.sort_by_key(|transfer| transfer.timestamp);

    Ok(merged)
}

fn collapse(group: Group, timezone: Tz) -> Result<Option<Transfer>, EngineError> {
    let mut members = group.into_transfers().into_iter();

    // Groups are opened together with their first transfer, so an empty one
    // cannot occur.
    let Some(first) = members.next() else {
        return Ok(None)
    };

    let mut amount = first.amount;
    let mut confirmed = first.confirmed;
    let mut last_timestamp = first.timestamp;

    for member in members {
        amount = amount
            .checked_add(member.amount)
            .ok_or_else(|| EngineError::overflow(&first.token_name))?;
        confirmed &= member.confirmed;
        last_timestamp = member.timestamp;
    }

    let mut aggregate = Transfer {
        from_address: first.from_address.clone(),
        to_address: first.to_address.clone(),
        token_name: first.token_name.clone(),
        amount,
        timestamp: last_timestamp,
        confirmed,
        comment: String::new()
    };

    aggregate.comment = format!("Grouped {} - {}", first.date(timezone), aggregate.date(timezone));

    Ok(Some(aggregate))
}

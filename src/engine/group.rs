use std::collections::HashMap;

use crate::models::{Direction, GroupRule, Transfer};

/// A contiguous chronological run of transfers sharing one token, one
/// direction and one counterparty, destined to be merged into one aggregate.
#[derive(Debug, Clone)]
pub struct Group {
    direction: Direction,
    counterparty: String,
    transfers: Vec<Transfer>
}

impl Group {
    fn open(direction: Direction, counterparty: String) -> Self {
        Self {
            direction,
            counterparty,
            transfers: Vec::new()
        }
    }

    fn accepts(&self, direction: Direction, counterparty: &str) -> bool {
        self.direction == direction && self.counterparty == counterparty
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn counterparty(&self) -> &str {
        &self.counterparty
    }

    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    pub(crate) fn into_transfers(self) -> Vec<Transfer> {
        self.transfers
    }
}

/// Per-token segmentation state, alive for a single `group` call.
#[derive(Debug, Default)]
struct TokenState {
    open_groups: Vec<Group>,
    force_new_group: bool
}

/// Partitions chronologically sorted transfers into maximal contiguous
/// same-direction/same-counterparty runs per token.
///
/// Grouping is opt-in: with no rules the input comes back ungrouped and
/// untouched. A transfer matching no rule stays ungrouped; when its token
/// already has an open run, that run is sealed so the next matching transfer
/// of the token starts a fresh group instead of extending across the
/// interruption. Groups come out in discovery order, the ungrouped list in
/// its original chronological order.
pub fn group(transfers: Vec<Transfer>, rules: &[GroupRule]) -> (Vec<Group>, Vec<Transfer>) {
    if rules.is_empty() {
        return (Vec::new(), transfers)
    }

    let mut states = HashMap::<String, TokenState>::new();
    let mut token_order = Vec::<String>::new();
    let mut ungrouped = Vec::new();

    for transfer in transfers {
        let matched = rules.iter().find_map(|rule| rule.apply(&transfer));

        let Some((direction, counterparty)) = matched else {
            // A same-token interruption invalidates the open run: two
            // chronologically disjoint runs must not merge into one
            // aggregate, its comment claims a contiguous date range.
            if let Some(state) = states.get_mut(&transfer.token_name) {
                state.force_new_group = true;
            }

            ungrouped.push(transfer);
            continue
        };

        if !states.contains_key(&transfer.token_name) {
            token_order.push(transfer.token_name.clone());
        }

        let state = states.entry(transfer.token_name.clone()).or_default();

        let extends_last_run = !state.force_new_group
            && state.open_groups.last().is_some_and(|last| last.accepts(direction, &counterparty));

        if !extends_last_run {
            state.open_groups.push(Group::open(direction, counterparty));
            state.force_new_group = false;
        }

        if let Some(current) = state.open_groups.last_mut() {
            current.transfers.push(transfer);
        }
    }

    let mut groups = Vec::new();

    for token_name in token_order {
        if let Some(state) = states.remove(&token_name) {
            groups.extend(state.open_groups);
        }
    }

    (groups, ungrouped)
}

//! Order recomputation for cards and groups.
//!
//! Pure functions over the entity lists: list position is the authoritative
//! order locally, and these functions translate it into the batch payloads
//! the backend expects. The `sort_order` fields on local entities are left
//! stale until the next fetch.

use std::collections::HashMap;

use serde::Serialize;

use crate::card::{Card, CardId};
use crate::group::{Group, GroupId, GroupKey};

/// One entry of a `PUT /api/cards/sort/batch` payload. `group_id` is always
/// serialized; `null` moves the card to the ungrouped bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardSortItem {
    pub id: CardId,
    pub sort_order: i32,
    pub group_id: Option<GroupId>,
}

/// One entry of a `PUT /api/groups/sort/batch` payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupSortItem {
    pub id: GroupId,
    pub sort_order: i32,
}

/// Remove the element at `from` and reinsert it at `to`, shifting the
/// elements in between. Out-of-range indices leave the list untouched.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() || to >= items.len() {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// Recompute the full card-order payload from global list order.
///
/// Each card's `sort_order` is a zero-based counter that restarts for every
/// distinct [`GroupKey`] and increments in input order, so order within a
/// group is determined entirely by the card's position in the global list
/// filtered to that group. Counters are seeded for every known group and the
/// ungrouped bucket; a group id the group list does not know gets a counter
/// on first sight.
pub fn card_sort_batch(cards: &[Card], groups: &[Group]) -> Vec<CardSortItem> {
    let mut counters: HashMap<GroupKey, i32> = HashMap::with_capacity(groups.len() + 1);
    counters.insert(GroupKey::Ungrouped, 0);
    for group in groups {
        counters.insert(GroupKey::Group(group.id), 0);
    }

    cards
        .iter()
        .map(|card| {
            let counter = counters.entry(GroupKey::of(card)).or_insert(0);
            let sort_order = *counter;
            *counter += 1;
            CardSortItem {
                id: card.id,
                sort_order,
                group_id: card.group_id,
            }
        })
        .collect()
}

/// Group-order payload: each group's `sort_order` is its list index.
pub fn group_sort_batch(groups: &[Group]) -> Vec<GroupSortItem> {
    groups
        .iter()
        .enumerate()
        .map(|(index, group)| GroupSortItem {
            id: group.id,
            sort_order: index as i32,
        })
        .collect()
}

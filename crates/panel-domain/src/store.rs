use crate::card::{Card, CardId};
use crate::group::{Group, GroupId};

/// Point-in-time copy of both collections, captured before a drag so a
/// failed order save can put the dashboard back.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySnapshot {
    cards: Vec<Card>,
    groups: Vec<Group>,
}

/// Cards partitioned by group, in store order. Computed per read; a card
/// whose `group_id` points at a group the store does not know appears in
/// neither partition until the next fetch.
#[derive(Debug)]
pub struct GroupedCards<'a> {
    pub ungrouped: Vec<&'a Card>,
    pub grouped: Vec<(&'a Group, Vec<&'a Card>)>,
}

/// Owner of the card and group collections. List position is the
/// authoritative local order; `sort_order` fields refresh on fetch.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    cards: Vec<Card>,
    groups: Vec<Group>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Raw list access for reorder moves.
    pub fn cards_mut(&mut self) -> &mut Vec<Card> {
        &mut self.cards
    }

    /// Raw list access for reorder moves.
    pub fn groups_mut(&mut self) -> &mut Vec<Group> {
        &mut self.groups
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|card| card.id == id)
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == id)
    }

    pub fn position_of_card(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|card| card.id == id)
    }

    pub fn position_of_group(&self, id: GroupId) -> Option<usize> {
        self.groups.iter().position(|group| group.id == id)
    }

    pub fn replace_cards(&mut self, cards: Vec<Card>) {
        self.cards = cards;
    }

    pub fn replace_groups(&mut self, groups: Vec<Group>) {
        self.groups = groups;
    }

    /// Replace the card with the same id in place, or append it.
    pub fn upsert_card(&mut self, card: Card) {
        match self.position_of_card(card.id) {
            Some(position) => self.cards[position] = card,
            None => self.cards.push(card),
        }
    }

    /// Replace the group with the same id in place, or append it.
    pub fn upsert_group(&mut self, group: Group) {
        match self.position_of_group(group.id) {
            Some(position) => self.groups[position] = group,
            None => self.groups.push(group),
        }
    }

    pub fn remove_card(&mut self, id: CardId) -> Option<Card> {
        self.position_of_card(id).map(|position| self.cards.remove(position))
    }

    pub fn remove_group(&mut self, id: GroupId) -> Option<Group> {
        self.position_of_group(id).map(|position| self.groups.remove(position))
    }

    /// The "cards by group" view the dashboard renders from.
    pub fn cards_by_group(&self) -> GroupedCards<'_> {
        let ungrouped = self
            .cards
            .iter()
            .filter(|card| card.group_id.is_none())
            .collect();
        let grouped = self
            .groups
            .iter()
            .map(|group| {
                let members = self
                    .cards
                    .iter()
                    .filter(|card| card.group_id == Some(group.id))
                    .collect();
                (group, members)
            })
            .collect();
        GroupedCards { ungrouped, grouped }
    }

    pub fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            cards: self.cards.clone(),
            groups: self.groups.clone(),
        }
    }

    pub fn restore(&mut self, snapshot: EntitySnapshot) {
        self.cards = snapshot.cards;
        self.groups = snapshot.groups;
    }
}

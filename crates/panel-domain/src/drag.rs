//! Drag session lifecycle.
//!
//! A session begins when the user picks up a card or a group, follows the
//! pointer across candidate targets, and ends with a drop or a cancel. While
//! hovering, a dragged card's group assignment is previewed directly in the
//! [`EntityStore`] (optimistic, before any server call). Finalizing produces
//! a [`DropOutcome`] carrying the order payload to persist together with the
//! pre-drag snapshot for failure recovery.

use panel_core::{PanelError, PanelResult};

use crate::group::GroupId;
use crate::sort::{card_sort_batch, group_sort_batch, move_item, CardSortItem, GroupSortItem};
use crate::store::{EntitySnapshot, EntityStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Card,
    Group,
}

/// What the pointer is currently over. Card and group ids live in separate
/// id spaces, so a target is only meaningful together with its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragTarget {
    pub id: i64,
    pub kind: DragKind,
}

impl DragTarget {
    pub fn card(id: i64) -> Self {
        Self {
            id,
            kind: DragKind::Card,
        }
    }

    pub fn group(id: i64) -> Self {
        Self {
            id,
            kind: DragKind::Group,
        }
    }
}

/// Result of finalizing a drag: the batch to persist, if any, plus the
/// snapshot captured at `begin`.
#[derive(Debug)]
pub enum DropOutcome {
    /// Nothing to persist.
    None,
    Cards {
        items: Vec<CardSortItem>,
        snapshot: EntitySnapshot,
    },
    Groups {
        items: Vec<GroupSortItem>,
        snapshot: EntitySnapshot,
    },
}

#[derive(Debug)]
struct DragSession {
    id: i64,
    kind: DragKind,
    hover: Option<DragTarget>,
    speculated: bool,
    snapshot: EntitySnapshot,
}

/// Tracks the single in-progress drag gesture. Holds only identifiers into
/// the store (plus the opaque restore snapshot), never entity copies, so
/// store mutations are immediately visible to it.
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The entity being dragged, if a session is active.
    pub fn active(&self) -> Option<(i64, DragKind)> {
        self.session.as_ref().map(|s| (s.id, s.kind))
    }

    pub fn hover_target(&self) -> Option<DragTarget> {
        self.session.as_ref().and_then(|s| s.hover)
    }

    /// Whether hovering has already reassigned the dragged card's group.
    pub fn speculation_applied(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.speculated)
    }

    /// Start a drag. Fails with `InvalidState` if a session is already
    /// active, and with `NotFound` if the entity is not in the store.
    pub fn begin(&mut self, store: &EntityStore, id: i64, kind: DragKind) -> PanelResult<()> {
        if self.session.is_some() {
            return Err(PanelError::InvalidState(
                "a drag session is already active".to_string(),
            ));
        }
        let exists = match kind {
            DragKind::Card => store.card(id).is_some(),
            DragKind::Group => store.group(id).is_some(),
        };
        if !exists {
            let what = match kind {
                DragKind::Card => "card",
                DragKind::Group => "group",
            };
            return Err(PanelError::NotFound(format!("{what} {id} not found")));
        }
        self.session = Some(DragSession {
            id,
            kind,
            hover: None,
            speculated: false,
            snapshot: store.snapshot(),
        });
        Ok(())
    }

    /// Record the pointer's current target and, for a card drag, preview the
    /// group change in the store: hovering a group header adopts that group,
    /// hovering another card adopts whatever group that card belongs to
    /// (possibly the ungrouped bucket). No server call happens here, and a
    /// target that does not resolve in the store is ignored.
    pub fn update_hover_target(&mut self, store: &mut EntityStore, target: DragTarget) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if target.kind == session.kind && target.id == session.id {
            return;
        }
        session.hover = Some(target);

        if session.kind != DragKind::Card {
            return;
        }
        let new_group: Option<Option<GroupId>> = match target.kind {
            DragKind::Group => store.group(target.id).map(|group| Some(group.id)),
            DragKind::Card => store.card(target.id).map(|card| card.group_id),
        };
        let Some(new_group) = new_group else {
            return;
        };
        let Some(card) = store.card_mut(session.id) else {
            return;
        };
        if card.group_id != new_group {
            card.group_id = new_group;
            session.speculated = true;
        }
    }

    /// Finalize the session on a drop. Two independent cases:
    ///
    /// - a group dropped on another group is list-moved to the target's
    ///   index and the group order is recomputed;
    /// - a card dropped anywhere valid recomputes the full card order; the
    ///   list-move only happens when the target is a different card. A drop
    ///   on a group header or on the card itself still produces a batch,
    ///   since hovering may have changed the group assignment.
    ///
    /// Every other combination resolves to [`DropOutcome::None`] with the
    /// store untouched.
    pub fn end(&mut self, store: &mut EntityStore, target: DragTarget) -> DropOutcome {
        let Some(session) = self.session.take() else {
            return DropOutcome::None;
        };

        match session.kind {
            DragKind::Group => {
                if target.kind != DragKind::Group || target.id == session.id {
                    return DropOutcome::None;
                }
                let (Some(from), Some(to)) = (
                    store.position_of_group(session.id),
                    store.position_of_group(target.id),
                ) else {
                    return DropOutcome::None;
                };
                move_item(store.groups_mut(), from, to);
                DropOutcome::Groups {
                    items: group_sort_batch(store.groups()),
                    snapshot: session.snapshot,
                }
            }
            DragKind::Card => {
                if target.kind == DragKind::Card && target.id != session.id {
                    if let (Some(from), Some(to)) = (
                        store.position_of_card(session.id),
                        store.position_of_card(target.id),
                    ) {
                        move_item(store.cards_mut(), from, to);
                    }
                }
                DropOutcome::Cards {
                    items: card_sort_batch(store.cards(), store.groups()),
                    snapshot: session.snapshot,
                }
            }
        }
    }

    /// Abort the session: dropped outside any valid target, or an explicit
    /// cancel. No batch is produced, and group reassignments previewed
    /// during hover stay in the store.
    pub fn cancel(&mut self) {
        self.session = None;
    }
}

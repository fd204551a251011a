use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use panel_core::{PanelError, PanelResult};

use crate::card::Card;
use crate::field_update::FieldUpdate;

pub type GroupId = i64;

pub const MAX_NAME_LENGTH: usize = 100;

/// A named bucket of cards. Group order is independent of card order, and
/// an empty group is still a valid, rendered group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub is_collapsed: bool,
    pub created_at: DateTime<Utc>,
}

/// Partition key for order bookkeeping: a real group or the synthetic
/// ungrouped bucket. Never sent to the backend as a group id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Ungrouped,
    Group(GroupId),
}

impl GroupKey {
    pub fn of(card: &Card) -> Self {
        match card.group_id {
            Some(id) => GroupKey::Group(id),
            None => GroupKey::Ungrouped,
        }
    }
}

/// Create payload for `POST /api/groups`.
#[derive(Debug, Clone, Serialize)]
pub struct GroupDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl GroupDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: None,
        }
    }

    pub fn validate(&self) -> PanelResult<()> {
        validate_name(&self.name)
    }
}

/// Update payload for `PUT /api/groups/{id}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "FieldUpdate::is_no_change")]
    pub icon: FieldUpdate<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_collapsed: Option<bool>,
}

impl GroupPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && !self.icon.is_change()
            && self.sort_order.is_none()
            && self.is_collapsed.is_none()
    }

    pub fn validate(&self) -> PanelResult<()> {
        match &self.name {
            Some(name) => validate_name(name),
            None => Ok(()),
        }
    }
}

fn validate_name(name: &str) -> PanelResult<()> {
    if name.trim().is_empty() {
        return Err(PanelError::Validation("group name cannot be empty".to_string()));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(PanelError::Validation(format!(
            "group name cannot exceed {} characters",
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

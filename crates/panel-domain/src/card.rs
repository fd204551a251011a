use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use panel_core::{PanelError, PanelResult};

use crate::field_update::FieldUpdate;
use crate::group::GroupId;

pub type CardId = i64;

pub const MAX_TITLE_LENGTH: usize = 100;

/// How a card's icon reference is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKind {
    /// A symbolic icon name (e.g. `mdi:home-network`).
    #[default]
    Iconify,
    /// An external image URL.
    Url,
}

/// A navigation tile pointing at a service or link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    #[serde(default)]
    pub group_id: Option<GroupId>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub icon_type: IconKind,
    #[serde(default)]
    pub icon_background: Option<String>,
    #[serde(default)]
    pub internal_url: Option<String>,
    #[serde(default)]
    pub external_url: Option<String>,
    #[serde(default = "default_open_in_new_tab")]
    pub open_in_new_tab: bool,
    #[serde(default)]
    pub open_in_iframe: bool,
    #[serde(default)]
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

fn default_open_in_new_tab() -> bool {
    true
}

impl Card {
    /// Destination for the active network mode. Returns `None` when the
    /// selected side has no URL configured; the card then opens nothing.
    /// There is no fallback to the other side.
    pub fn effective_url(&self, use_external: bool) -> Option<&str> {
        if use_external {
            self.external_url.as_deref()
        } else {
            self.internal_url.as_deref()
        }
    }
}

/// Create payload for `POST /api/cards`. The server assigns the id and the
/// end-of-list sort position.
#[derive(Debug, Clone, Serialize)]
pub struct CardDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub icon_type: IconKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    pub open_in_new_tab: bool,
    pub open_in_iframe: bool,
}

impl CardDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            group_id: None,
            description: None,
            icon: None,
            icon_type: IconKind::Iconify,
            icon_background: None,
            internal_url: None,
            external_url: None,
            open_in_new_tab: true,
            open_in_iframe: false,
        }
    }

    pub fn validate(&self) -> PanelResult<()> {
        validate_title(&self.title)
    }
}

/// Update payload for `PUT /api/cards/{id}`. Omitted fields stay untouched
/// on the server; clearable fields distinguish omitted from explicit null
/// via [`FieldUpdate`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct CardPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "FieldUpdate::is_no_change")]
    pub group_id: FieldUpdate<GroupId>,
    #[serde(skip_serializing_if = "FieldUpdate::is_no_change")]
    pub description: FieldUpdate<String>,
    #[serde(skip_serializing_if = "FieldUpdate::is_no_change")]
    pub icon: FieldUpdate<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_type: Option<IconKind>,
    #[serde(skip_serializing_if = "FieldUpdate::is_no_change")]
    pub icon_background: FieldUpdate<String>,
    #[serde(skip_serializing_if = "FieldUpdate::is_no_change")]
    pub internal_url: FieldUpdate<String>,
    #[serde(skip_serializing_if = "FieldUpdate::is_no_change")]
    pub external_url: FieldUpdate<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_in_new_tab: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_in_iframe: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

impl CardPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && !self.group_id.is_change()
            && !self.description.is_change()
            && !self.icon.is_change()
            && self.icon_type.is_none()
            && !self.icon_background.is_change()
            && !self.internal_url.is_change()
            && !self.external_url.is_change()
            && self.open_in_new_tab.is_none()
            && self.open_in_iframe.is_none()
            && self.sort_order.is_none()
    }

    pub fn validate(&self) -> PanelResult<()> {
        match &self.title {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }
}

fn validate_title(title: &str) -> PanelResult<()> {
    if title.trim().is_empty() {
        return Err(PanelError::Validation("card title cannot be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(PanelError::Validation(format!(
            "card title cannot exceed {} characters",
            MAX_TITLE_LENGTH
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_card() -> Card {
        Card {
            id: 1,
            group_id: None,
            title: "NAS".to_string(),
            description: None,
            icon: Some("mdi:nas".to_string()),
            icon_type: IconKind::Iconify,
            icon_background: None,
            internal_url: Some("http://192.168.1.10:5000".to_string()),
            external_url: Some("https://nas.example.com".to_string()),
            open_in_new_tab: true,
            open_in_iframe: false,
            sort_order: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_effective_url_picks_network_side() {
        let card = test_card();
        assert_eq!(card.effective_url(false), Some("http://192.168.1.10:5000"));
        assert_eq!(card.effective_url(true), Some("https://nas.example.com"));
    }

    #[test]
    fn test_effective_url_has_no_fallback() {
        let mut card = test_card();
        card.external_url = None;
        assert_eq!(card.effective_url(true), None);
        assert_eq!(card.effective_url(false), Some("http://192.168.1.10:5000"));
    }

    #[test]
    fn test_draft_rejects_blank_title() {
        assert!(CardDraft::new("  ").validate().is_err());
        assert!(CardDraft::new("NAS").validate().is_ok());
    }

    #[test]
    fn test_draft_rejects_overlong_title() {
        let draft = CardDraft::new("x".repeat(MAX_TITLE_LENGTH + 1));
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_draft_omits_unset_fields() {
        let json = serde_json::to_value(CardDraft::new("NAS")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "NAS",
                "icon_type": "iconify",
                "open_in_new_tab": true,
                "open_in_iframe": false,
            })
        );
    }

    #[test]
    fn test_patch_group_tri_state() {
        let patch = CardPatch {
            group_id: FieldUpdate::Clear,
            ..CardPatch::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({ "group_id": null })
        );

        let patch = CardPatch {
            group_id: FieldUpdate::Set(7),
            ..CardPatch::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({ "group_id": 7 })
        );

        let patch = CardPatch::default();
        assert!(patch.is_empty());
        assert_eq!(serde_json::to_value(&patch).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_card_deserializes_with_missing_flags() {
        let card: Card = serde_json::from_value(serde_json::json!({
            "id": 3,
            "title": "Router",
            "created_at": "2025-06-01T08:00:00Z",
        }))
        .unwrap();
        assert!(card.open_in_new_tab);
        assert!(!card.open_in_iframe);
        assert_eq!(card.icon_type, IconKind::Iconify);
        assert_eq!(card.group_id, None);
    }
}

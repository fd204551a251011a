use async_trait::async_trait;

use panel_core::PanelResult;
use panel_domain::{
    Card, CardDraft, CardId, CardPatch, CardSortItem, Group, GroupDraft, GroupId, GroupPatch,
    GroupSortItem, Settings, SettingsPatch,
};

/// The backend REST surface the dashboard consumes.
///
/// Implementations handle transport; callers own all local state. The sort
/// methods carry the full recomputed order in one request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PanelApi: Send + Sync {
    async fn list_cards(&self) -> PanelResult<Vec<Card>>;

    async fn get_card(&self, id: CardId) -> PanelResult<Card>;

    async fn create_card(&self, draft: CardDraft) -> PanelResult<Card>;

    async fn update_card(&self, id: CardId, patch: CardPatch) -> PanelResult<Card>;

    async fn delete_card(&self, id: CardId) -> PanelResult<()>;

    /// `PUT /api/cards/sort/batch` with the full card order.
    async fn sort_cards(&self, items: Vec<CardSortItem>) -> PanelResult<()>;

    async fn list_groups(&self) -> PanelResult<Vec<Group>>;

    async fn create_group(&self, draft: GroupDraft) -> PanelResult<Group>;

    async fn update_group(&self, id: GroupId, patch: GroupPatch) -> PanelResult<Group>;

    async fn delete_group(&self, id: GroupId) -> PanelResult<()>;

    /// `PUT /api/groups/sort/batch` with the full group order.
    async fn sort_groups(&self, items: Vec<GroupSortItem>) -> PanelResult<()>;

    async fn get_settings(&self) -> PanelResult<Settings>;

    async fn update_settings(&self, patch: SettingsPatch) -> PanelResult<Settings>;

    /// Flip the internal/external network mode server-side and return the
    /// updated record.
    async fn toggle_network(&self) -> PanelResult<Settings>;
}

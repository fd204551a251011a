use std::sync::Arc;

use tracing::{debug, warn};

use panel_core::{Notice, Notifier, PanelError, PanelResult, RecoveryPolicy};
use panel_domain::{
    Card, CardDraft, DropOutcome, EntitySnapshot, EntityStore, Group, GroupDraft, Settings,
};

use crate::api::PanelApi;

/// What a persist attempt did to local state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncReport {
    /// The drop produced nothing to save.
    Skipped,
    /// The order reached the server.
    Saved,
    /// Save failed; authoritative state was reloaded from the server.
    FailedRefetched,
    /// Save failed; the pre-drag snapshot was restored.
    FailedRestored,
    /// Save failed; the optimistic local state was left standing.
    FailedKept,
}

/// Sends drop outcomes to the backend and reconciles local state when the
/// save fails.
///
/// The local lists are already updated by the time this runs, so a success
/// changes nothing locally. A failure surfaces exactly one notification and
/// then applies the configured [`RecoveryPolicy`]; the error itself never
/// propagates to the caller, and nothing is retried.
pub struct SortSync {
    api: Arc<dyn PanelApi>,
    notifier: Arc<dyn Notifier>,
    policy: RecoveryPolicy,
}

impl SortSync {
    pub fn new(api: Arc<dyn PanelApi>, notifier: Arc<dyn Notifier>, policy: RecoveryPolicy) -> Self {
        Self {
            api,
            notifier,
            policy,
        }
    }

    pub fn policy(&self) -> RecoveryPolicy {
        self.policy
    }

    pub async fn persist(&self, store: &mut EntityStore, outcome: DropOutcome) -> SyncReport {
        match outcome {
            DropOutcome::None => SyncReport::Skipped,
            DropOutcome::Cards { items, snapshot } => {
                match self.api.sort_cards(items).await {
                    Ok(()) => {
                        debug!("card order saved");
                        SyncReport::Saved
                    }
                    Err(error) => self.recover(store, snapshot, error, "card order").await,
                }
            }
            DropOutcome::Groups { items, snapshot } => {
                match self.api.sort_groups(items).await {
                    Ok(()) => {
                        debug!("group order saved");
                        SyncReport::Saved
                    }
                    Err(error) => self.recover(store, snapshot, error, "group order").await,
                }
            }
        }
    }

    async fn recover(
        &self,
        store: &mut EntityStore,
        snapshot: EntitySnapshot,
        error: PanelError,
        what: &str,
    ) -> SyncReport {
        warn!(error = %error, "failed to save {what}");
        self.notifier
            .notify(Notice::error(format!("Failed to save {what}")));

        match self.policy {
            RecoveryPolicy::None => SyncReport::FailedKept,
            RecoveryPolicy::Restore => {
                store.restore(snapshot);
                SyncReport::FailedRestored
            }
            RecoveryPolicy::Refetch => {
                match tokio::try_join!(self.api.list_cards(), self.api.list_groups()) {
                    Ok((cards, groups)) => {
                        store.replace_cards(cards);
                        store.replace_groups(groups);
                        SyncReport::FailedRefetched
                    }
                    Err(refetch_error) => {
                        warn!(error = %refetch_error, "refetch after failed save also failed");
                        SyncReport::FailedKept
                    }
                }
            }
        }
    }
}

/// Initial load: cards, groups, and settings fetched concurrently. Cards and
/// groups land in the store; settings go back to the caller.
pub async fn load_dashboard(api: &dyn PanelApi, store: &mut EntityStore) -> PanelResult<Settings> {
    let (cards, groups, settings) =
        tokio::try_join!(api.list_cards(), api.list_groups(), api.get_settings())?;
    debug!(cards = cards.len(), groups = groups.len(), "dashboard loaded");
    store.replace_cards(cards);
    store.replace_groups(groups);
    Ok(settings)
}

/// Two-step transaction for "save a card into a group that does not exist
/// yet": create the group first, then thread its id into the card draft.
/// Both payloads are validated before anything is sent.
pub async fn create_card_in_new_group(
    api: &dyn PanelApi,
    mut draft: CardDraft,
    group_name: &str,
) -> PanelResult<(Group, Card)> {
    let group_draft = GroupDraft::new(group_name);
    group_draft.validate()?;
    draft.validate()?;

    let group = api.create_group(group_draft).await?;
    draft.group_id = Some(group.id);
    let card = api.create_card(draft).await?;
    Ok((group, card))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockPanelApi;
    use chrono::Utc;
    use panel_core::NoticeLevel;
    use panel_domain::{
        CardId, CardSortItem, DragController, DragKind, DragTarget, GroupId, GroupSortItem,
        IconKind,
    };
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNotifier {
        notices: Mutex<Vec<Notice>>,
    }

    impl RecordingNotifier {
        fn count(&self) -> usize {
            self.notices.lock().unwrap().len()
        }

        fn last_level(&self) -> Option<NoticeLevel> {
            self.notices.lock().unwrap().last().map(|n| n.level)
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notice: Notice) {
            self.notices.lock().unwrap().push(notice);
        }
    }

    fn card(id: CardId, group_id: Option<GroupId>) -> Card {
        Card {
            id,
            group_id,
            title: format!("card {id}"),
            description: None,
            icon: None,
            icon_type: IconKind::Iconify,
            icon_background: None,
            internal_url: None,
            external_url: None,
            open_in_new_tab: true,
            open_in_iframe: false,
            sort_order: 0,
            created_at: Utc::now(),
        }
    }

    fn group(id: GroupId, name: &str) -> Group {
        Group {
            id,
            name: name.to_string(),
            icon: None,
            sort_order: 0,
            is_collapsed: false,
            created_at: Utc::now(),
        }
    }

    /// Cards 1 and 2 ungrouped, card 3 in group 5.
    fn scenario_store() -> EntityStore {
        let mut store = EntityStore::new();
        store.replace_cards(vec![card(1, None), card(2, None), card(3, Some(5))]);
        store.replace_groups(vec![group(5, "Media")]);
        store
    }

    fn sync_with(
        api: MockPanelApi,
        policy: RecoveryPolicy,
    ) -> (SortSync, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let sync = SortSync::new(Arc::new(api), notifier.clone(), policy);
        (sync, notifier)
    }

    #[tokio::test]
    async fn test_drag_end_flows_into_one_batched_save() {
        let mut store = scenario_store();
        let mut controller = DragController::new();
        controller.begin(&store, 1, DragKind::Card).unwrap();
        controller.update_hover_target(&mut store, DragTarget::card(3));
        let outcome = controller.end(&mut store, DragTarget::card(3));

        let mut api = MockPanelApi::new();
        api.expect_sort_cards()
            .withf(|items| {
                items
                    == &[
                        CardSortItem { id: 2, sort_order: 0, group_id: None },
                        CardSortItem { id: 3, sort_order: 0, group_id: Some(5) },
                        CardSortItem { id: 1, sort_order: 1, group_id: Some(5) },
                    ]
            })
            .times(1)
            .returning(|_| Ok(()));
        let (sync, notifier) = sync_with(api, RecoveryPolicy::Refetch);

        let report = sync.persist(&mut store, outcome).await;

        assert_eq!(report, SyncReport::Saved);
        assert_eq!(notifier.count(), 0);
        assert_eq!(store.card(1).unwrap().group_id, Some(5));
    }

    #[tokio::test]
    async fn test_empty_outcome_is_skipped_without_any_request() {
        let mut store = scenario_store();
        // no expectations: any API call would panic
        let (sync, notifier) = sync_with(MockPanelApi::new(), RecoveryPolicy::Refetch);

        let report = sync.persist(&mut store, DropOutcome::None).await;

        assert_eq!(report, SyncReport::Skipped);
        assert_eq!(notifier.count(), 0);
    }

    #[tokio::test]
    async fn test_failure_with_refetch_reloads_authoritative_state() {
        let mut store = scenario_store();
        let mut controller = DragController::new();
        controller.begin(&store, 1, DragKind::Card).unwrap();
        controller.update_hover_target(&mut store, DragTarget::card(3));
        let outcome = controller.end(&mut store, DragTarget::card(3));

        let mut api = MockPanelApi::new();
        api.expect_sort_cards()
            .times(1)
            .returning(|_| Err(PanelError::Transport("connection refused".to_string())));
        api.expect_list_cards()
            .times(1)
            .returning(|| Ok(vec![card(1, None), card(2, None), card(3, Some(5))]));
        api.expect_list_groups()
            .times(1)
            .returning(|| Ok(vec![group(5, "Media")]));
        let (sync, notifier) = sync_with(api, RecoveryPolicy::Refetch);

        let report = sync.persist(&mut store, outcome).await;

        assert_eq!(report, SyncReport::FailedRefetched);
        assert_eq!(notifier.count(), 1);
        assert_eq!(notifier.last_level(), Some(NoticeLevel::Error));
        // server truth wins over the optimistic reassignment
        assert_eq!(store.card(1).unwrap().group_id, None);
        let order: Vec<CardId> = store.cards().iter().map(|c| c.id).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_failure_with_restore_puts_the_snapshot_back() {
        let mut store = scenario_store();
        let mut controller = DragController::new();
        controller.begin(&store, 1, DragKind::Card).unwrap();
        controller.update_hover_target(&mut store, DragTarget::card(3));
        let outcome = controller.end(&mut store, DragTarget::card(3));

        let mut api = MockPanelApi::new();
        api.expect_sort_cards()
            .times(1)
            .returning(|_| Err(PanelError::Transport("timeout".to_string())));
        // no list_* expectations: a refetch here would panic
        let (sync, notifier) = sync_with(api, RecoveryPolicy::Restore);

        let report = sync.persist(&mut store, outcome).await;

        assert_eq!(report, SyncReport::FailedRestored);
        assert_eq!(notifier.count(), 1);
        assert_eq!(store.card(1).unwrap().group_id, None);
        let order: Vec<CardId> = store.cards().iter().map(|c| c.id).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_failure_with_none_keeps_the_optimistic_state() {
        let mut store = scenario_store();
        let mut controller = DragController::new();
        controller.begin(&store, 1, DragKind::Card).unwrap();
        controller.update_hover_target(&mut store, DragTarget::card(3));
        let outcome = controller.end(&mut store, DragTarget::card(3));

        let mut api = MockPanelApi::new();
        api.expect_sort_cards()
            .times(1)
            .returning(|_| Err(PanelError::Transport("connection reset".to_string())));
        let (sync, notifier) = sync_with(api, RecoveryPolicy::None);

        let report = sync.persist(&mut store, outcome).await;

        assert_eq!(report, SyncReport::FailedKept);
        assert_eq!(notifier.count(), 1);
        assert_eq!(store.card(1).unwrap().group_id, Some(5));
        let order: Vec<CardId> = store.cards().iter().map(|c| c.id).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn test_failed_refetch_keeps_state_with_a_single_notice() {
        let mut store = scenario_store();
        let snapshot = store.snapshot();
        store.card_mut(1).unwrap().group_id = Some(5);

        let mut api = MockPanelApi::new();
        api.expect_sort_cards()
            .times(1)
            .returning(|_| Err(PanelError::Transport("down".to_string())));
        api.expect_list_cards()
            .times(1)
            .returning(|| Err(PanelError::Transport("still down".to_string())));
        // try_join! may or may not get to groups before cards fail
        api.expect_list_groups()
            .returning(|| Ok(vec![group(5, "Media")]));
        let (sync, notifier) = sync_with(api, RecoveryPolicy::Refetch);

        let outcome = DropOutcome::Cards {
            items: vec![CardSortItem { id: 1, sort_order: 0, group_id: Some(5) }],
            snapshot,
        };
        let report = sync.persist(&mut store, outcome).await;

        assert_eq!(report, SyncReport::FailedKept);
        assert_eq!(notifier.count(), 1);
        assert_eq!(store.card(1).unwrap().group_id, Some(5));
    }

    #[tokio::test]
    async fn test_group_order_failure_notifies_once() {
        let mut store = scenario_store();
        let snapshot = store.snapshot();

        let mut api = MockPanelApi::new();
        api.expect_sort_groups()
            .times(1)
            .returning(|_| Err(PanelError::Api { status: 500, detail: "boom".to_string() }));
        let (sync, notifier) = sync_with(api, RecoveryPolicy::None);

        let outcome = DropOutcome::Groups {
            items: vec![GroupSortItem { id: 5, sort_order: 0 }],
            snapshot,
        };
        let report = sync.persist(&mut store, outcome).await;

        assert_eq!(report, SyncReport::FailedKept);
        assert_eq!(notifier.count(), 1);
    }

    #[tokio::test]
    async fn test_load_dashboard_fills_the_store_and_returns_settings() {
        let mut api = MockPanelApi::new();
        api.expect_list_cards()
            .times(1)
            .returning(|| Ok(vec![card(1, None)]));
        api.expect_list_groups()
            .times(1)
            .returning(|| Ok(vec![group(5, "Media")]));
        api.expect_get_settings().times(1).returning(|| {
            Ok(Settings {
                use_external_url: true,
                ..Settings::default()
            })
        });

        let mut store = EntityStore::new();
        let settings = load_dashboard(&api, &mut store).await.unwrap();

        assert!(settings.use_external_url);
        assert_eq!(store.cards().len(), 1);
        assert_eq!(store.groups().len(), 1);
    }

    #[tokio::test]
    async fn test_create_card_in_new_group_threads_the_group_id() {
        let mut api = MockPanelApi::new();
        api.expect_create_group()
            .withf(|draft| draft.name == "Lab")
            .times(1)
            .returning(|_| Ok(group(7, "Lab")));
        api.expect_create_card()
            .withf(|draft| draft.group_id == Some(7))
            .times(1)
            .returning(|draft| {
                let mut created = card(9, draft.group_id);
                created.title = draft.title;
                Ok(created)
            });

        let (created_group, created_card) =
            create_card_in_new_group(&api, CardDraft::new("Grafana"), "Lab")
                .await
                .unwrap();

        assert_eq!(created_group.id, 7);
        assert_eq!(created_card.group_id, Some(7));
        assert_eq!(created_card.title, "Grafana");
    }

    #[tokio::test]
    async fn test_create_card_in_new_group_validates_before_sending() {
        // no expectations: any API call would panic
        let api = MockPanelApi::new();

        let err = create_card_in_new_group(&api, CardDraft::new("Grafana"), "  ")
            .await
            .unwrap_err();
        assert!(matches!(err, PanelError::Validation(_)));

        let err = create_card_in_new_group(&api, CardDraft::new(""), "Lab")
            .await
            .unwrap_err();
        assert!(matches!(err, PanelError::Validation(_)));
    }
}

use std::sync::Arc;

use panel_client::{load_dashboard, HttpPanelClient, PanelApi, SortSync, SyncReport};
use panel_core::{AppConfig, Notice, NoticeLevel, Notifier, PanelResult};
use panel_domain::{DropOutcome, EntityStore, Settings};

/// Writes failure notices to stderr so the JSON envelope on stdout stays
/// machine-readable.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => eprintln!("error: {}", notice.message),
            NoticeLevel::Info => eprintln!("{}", notice.message),
        }
    }
}

/// Loaded dashboard state plus the client handles the command handlers need.
pub struct DashboardContext {
    pub store: EntityStore,
    pub settings: Settings,
    pub api: Arc<dyn PanelApi>,
    sync: SortSync,
}

impl DashboardContext {
    /// Connects to the backend and performs the initial concurrent load of
    /// cards, groups, and settings.
    pub async fn connect(server_url: Option<String>) -> PanelResult<Self> {
        let mut config = AppConfig::load();
        if let Some(url) = server_url {
            config.server_url = url;
        }

        let api: Arc<dyn PanelApi> = Arc::new(HttpPanelClient::new(&config)?);
        let sync = SortSync::new(api.clone(), Arc::new(StderrNotifier), config.recovery);

        let mut store = EntityStore::new();
        let settings = load_dashboard(api.as_ref(), &mut store).await?;

        Ok(Self {
            store,
            settings,
            api,
            sync,
        })
    }

    pub async fn persist(&mut self, outcome: DropOutcome) -> SyncReport {
        self.sync.persist(&mut self.store, outcome).await
    }

    /// Reloads cards, groups, and settings after a CRUD mutation, mirroring
    /// the dashboard's fetch-after-save behavior.
    pub async fn refresh(&mut self) -> PanelResult<()> {
        self.settings = load_dashboard(self.api.as_ref(), &mut self.store).await?;
        Ok(())
    }
}

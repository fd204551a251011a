use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use panel_core::{AppConfig, PanelError, PanelResult};
use panel_domain::{
    Card, CardDraft, CardId, CardPatch, CardSortItem, Group, GroupDraft, GroupId, GroupPatch,
    GroupSortItem, Settings, SettingsPatch,
};

use crate::api::PanelApi;

/// Acknowledgement body returned by the delete and sort endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(default = "default_success")]
    pub success: bool,
}

fn default_success() -> bool {
    true
}

#[derive(Debug, Serialize)]
struct SortRequest<T: Serialize> {
    items: Vec<T>,
}

/// Error body the backend attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// [`PanelApi`] over HTTP.
pub struct HttpPanelClient {
    http: Client,
    server_url: String,
}

impl HttpPanelClient {
    pub fn new(config: &AppConfig) -> PanelResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| PanelError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            server_url: config.server_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.server_url, path)
    }

    async fn request_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> PanelResult<T> {
        let response = builder
            .send()
            .await
            .map_err(|e| PanelError::Transport(e.to_string()))?;
        let response = check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| PanelError::Transport(e.to_string()))
    }

    /// For endpoints whose body is just an acknowledgement.
    async fn request_ack(&self, builder: RequestBuilder) -> PanelResult<()> {
        let ack: MessageResponse = self.request_json(builder).await?;
        debug!(message = %ack.message, success = ack.success, "server acknowledged");
        Ok(())
    }
}

/// Map a non-2xx response to [`PanelError::Api`], extracting the backend's
/// `detail` message when the body carries one.
async fn check_status(response: Response) -> PanelResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = match response.json::<ErrorBody>().await {
        Ok(body) => body.detail,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };
    Err(PanelError::Api {
        status: status.as_u16(),
        detail,
    })
}

#[async_trait]
impl PanelApi for HttpPanelClient {
    async fn list_cards(&self) -> PanelResult<Vec<Card>> {
        self.request_json(self.http.get(self.url("/api/cards"))).await
    }

    async fn get_card(&self, id: CardId) -> PanelResult<Card> {
        self.request_json(self.http.get(self.url(&format!("/api/cards/{id}"))))
            .await
    }

    async fn create_card(&self, draft: CardDraft) -> PanelResult<Card> {
        self.request_json(self.http.post(self.url("/api/cards")).json(&draft))
            .await
    }

    async fn update_card(&self, id: CardId, patch: CardPatch) -> PanelResult<Card> {
        self.request_json(
            self.http
                .put(self.url(&format!("/api/cards/{id}")))
                .json(&patch),
        )
        .await
    }

    async fn delete_card(&self, id: CardId) -> PanelResult<()> {
        self.request_ack(self.http.delete(self.url(&format!("/api/cards/{id}"))))
            .await
    }

    async fn sort_cards(&self, items: Vec<CardSortItem>) -> PanelResult<()> {
        debug!(count = items.len(), "saving card order");
        self.request_ack(
            self.http
                .put(self.url("/api/cards/sort/batch"))
                .json(&SortRequest { items }),
        )
        .await
    }

    async fn list_groups(&self) -> PanelResult<Vec<Group>> {
        self.request_json(self.http.get(self.url("/api/groups"))).await
    }

    async fn create_group(&self, draft: GroupDraft) -> PanelResult<Group> {
        self.request_json(self.http.post(self.url("/api/groups")).json(&draft))
            .await
    }

    async fn update_group(&self, id: GroupId, patch: GroupPatch) -> PanelResult<Group> {
        self.request_json(
            self.http
                .put(self.url(&format!("/api/groups/{id}")))
                .json(&patch),
        )
        .await
    }

    async fn delete_group(&self, id: GroupId) -> PanelResult<()> {
        self.request_ack(self.http.delete(self.url(&format!("/api/groups/{id}"))))
            .await
    }

    async fn sort_groups(&self, items: Vec<GroupSortItem>) -> PanelResult<()> {
        debug!(count = items.len(), "saving group order");
        self.request_ack(
            self.http
                .put(self.url("/api/groups/sort/batch"))
                .json(&SortRequest { items }),
        )
        .await
    }

    async fn get_settings(&self) -> PanelResult<Settings> {
        self.request_json(self.http.get(self.url("/api/settings"))).await
    }

    async fn update_settings(&self, patch: SettingsPatch) -> PanelResult<Settings> {
        self.request_json(self.http.put(self.url("/api/settings")).json(&patch))
            .await
    }

    async fn toggle_network(&self) -> PanelResult<Settings> {
        self.request_json(self.http.post(self.url("/api/settings/toggle-network")))
            .await
    }
}

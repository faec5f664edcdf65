use super::AccessApi;
use crate::config::Config;
use crate::error::{ConsoleError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared_http::api::{
    CreateGrantRequest, CreateGroupRequest, ErrorResponse, Grant, Group, HealthResponse,
    ListGrantsQuery, ListResponse, ListUsersQuery, UpdateUsersInGroupRequest,
    User,
};
use tracing::{info, warn};

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: Config,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_config(Config::from_env())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url, path)
    }

    pub async fn check_health(&self) -> Result<HealthResponse> {
        let url = format!("{}/health", self.config.http_server);
        info!("Checking health at URL: {}", url);
        self.fetch(self.client.get(&url)).await
    }

    /// Send `request` and decode a JSON body from a success response.
    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = send(request).await?;
        response
            .json()
            .await
            .map_err(|e| ConsoleError::Decode(e.to_string()))
    }

    /// Send `request`, ignoring whatever a success response carries.
    async fn execute(&self, request: RequestBuilder) -> Result<()> {
        send(request).await.map(|_| ())
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

async fn send(request: RequestBuilder) -> Result<Response> {
    let response = request.send().await.map_err(|e| {
        warn!("Request failed: {}", e);
        ConsoleError::Transport(e.to_string())
    })?;

    if response.status().is_success() {
        Ok(response)
    } else {
        Err(error_from_response(response).await)
    }
}

/// Prefer the backend's own message; fall back to the status text.
async fn error_from_response(response: Response) -> ConsoleError {
    let status = response.status();
    let message = match response.json::<ErrorResponse>().await {
        Ok(body) if !body.message.is_empty() => body.message,
        _ => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    };
    warn!("Request rejected with {}: {}", status, message);
    ConsoleError::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AccessApi for ApiClient {
    async fn list_groups(&self) -> Result<Vec<Group>> {
        let page: ListResponse<Group> = self
            .fetch(self.client.get(self.url("/groups")))
            .await?;
        Ok(page.items)
    }

    async fn create_group(&self, name: &str) -> Result<Group> {
        let body = CreateGroupRequest {
            name: name.to_string(),
        };
        self.fetch(self.client.post(self.url("/groups")).json(&body))
            .await
    }

    async fn delete_group(&self, group_id: &str) -> Result<()> {
        self.execute(self.client.delete(self.url(&format!("/groups/{}", group_id))))
            .await
    }

    async fn list_users(&self, group_id: Option<&str>) -> Result<Vec<User>> {
        let query = ListUsersQuery {
            group: group_id.map(str::to_string),
            name: None,
        };
        let page: ListResponse<User> = self
            .fetch(self.client.get(self.url("/users")).query(&query))
            .await?;
        Ok(page.items)
    }

    async fn current_user(&self) -> Result<User> {
        self.fetch(self.client.get(self.url("/users/self"))).await
    }

    async fn update_group_users(
        &self,
        group_id: &str,
        patch: &UpdateUsersInGroupRequest,
    ) -> Result<()> {
        self.execute(
            self.client
                .patch(self.url(&format!("/groups/{}/users", group_id)))
                .json(patch),
        )
        .await
    }

    async fn list_grants(&self, query: &ListGrantsQuery) -> Result<Vec<Grant>> {
        let page: ListResponse<Grant> = self
            .fetch(self.client.get(self.url("/grants")).query(query))
            .await?;
        Ok(page.items)
    }

    async fn create_grant(&self, request: &CreateGrantRequest) -> Result<Grant> {
        self.fetch(self.client.post(self.url("/grants")).json(request))
            .await
    }

    async fn delete_grant(&self, grant_id: &str) -> Result<()> {
        self.execute(self.client.delete(self.url(&format!("/grants/{}", grant_id))))
            .await
    }
}

use crate::{Error, NewConversation, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tbdeploy_core::{Announcement, Listing, Project, Task, TaskId, TrackerApi, User};

pub const DEFAULT_API_BASE: &str = "https://api.teambox.com/api/1";

#[derive(Debug, Clone)]
pub struct TeamboxConfig {
    pub api_base: String,
    pub username: String,
    pub password: String,
}

#[derive(Clone)]
pub struct TeamboxClient {
    client: Client,
    api_base: String,
    authorization: String,
}

impl TeamboxClient {
    pub fn new(config: &TeamboxConfig) -> Result<Self> {
        let api_base = config.api_base.trim().trim_end_matches('/');
        if api_base.is_empty() {
            return Err(Error::Config("API base URL is empty".to_string()));
        }

        let token = STANDARD.encode(format!("{}:{}", config.username, config.password));

        Ok(Self {
            client: Client::new(),
            api_base: api_base.to_string(),
            authorization: format!("Basic {}", token),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }

    /// GET `path` and decode the JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let request = self.client.get(&url);
        self.send(path, url, request).await
    }

    /// POST `form` url-encoded to `path` and decode the JSON response.
    pub async fn post_form<T, F>(&self, path: &str, form: &F) -> Result<T>
    where
        T: DeserializeOwned,
        F: Serialize + ?Sized,
    {
        let url = self.url(path);
        let request = self.client.post(&url).form(form);
        self.send(path, url, request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        url: String,
        request: RequestBuilder,
    ) -> Result<T> {
        tracing::info!("Making API request to {}", url);

        let response = request
            .header(AUTHORIZATION, &self.authorization)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| Error::Decode {
            path: path.to_string(),
            source,
        })
    }

    pub async fn fetch_users(&self) -> Result<Vec<User>> {
        let listing: Listing<User> = self.get("users").await?;
        Ok(listing.objects)
    }

    pub async fn fetch_projects(&self) -> Result<Vec<Project>> {
        let listing: Listing<Project> = self.get("projects").await?;
        Ok(listing.objects)
    }

    pub async fn fetch_task(&self, id: TaskId) -> Result<Task> {
        self.get(&format!("tasks/{}", id)).await
    }

    pub async fn post_conversation(
        &self,
        conversation: &NewConversation,
    ) -> Result<serde_json::Value> {
        self.post_form("conversations", conversation).await
    }
}

#[async_trait]
impl TrackerApi for TeamboxClient {
    async fn users(&self) -> tbdeploy_core::Result<Vec<User>> {
        Ok(self.fetch_users().await?)
    }

    async fn projects(&self) -> tbdeploy_core::Result<Vec<Project>> {
        Ok(self.fetch_projects().await?)
    }

    async fn task(&self, id: TaskId) -> tbdeploy_core::Result<Task> {
        Ok(self.fetch_task(id).await?)
    }

    async fn create_conversation(
        &self,
        announcement: &Announcement,
    ) -> tbdeploy_core::Result<serde_json::Value> {
        Ok(self
            .post_conversation(&NewConversation::from(announcement))
            .await?)
    }
}

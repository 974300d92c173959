//! Stash GraphQL client.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sv_core::config::StashConfig;
use sv_core::{Error, Result, Scene};

use crate::query::{FindSceneData, FindSceneVars, GraphQlRequest, GraphQlResponse, FIND_SCENE};
use crate::SceneCatalog;

/// Header carrying the Stash api key.
const API_KEY_HEADER: &str = "ApiKey";

pub struct StashClient {
    http: reqwest::Client,
    graphql_url: String,
    api_key: Option<String>,
}

impl StashClient {
    pub fn new(config: &StashConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            graphql_url: config.graphql_url.clone(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
        })
    }

    async fn query<V: Serialize, T: DeserializeOwned>(&self, query: &str, variables: V) -> Result<T> {
        let mut req = self
            .http
            .post(&self.graphql_url)
            .json(&GraphQlRequest { query, variables });
        if let Some(key) = &self.api_key {
            req = req.header(API_KEY_HEADER, key);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| Error::catalog(format!("Stash request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::catalog(format!("Stash {status}: {body}")));
        }

        let body: GraphQlResponse<T> = resp
            .json()
            .await
            .map_err(|e| Error::catalog(format!("Stash parse error: {e}")))?;

        if !body.errors.is_empty() {
            let messages: Vec<_> = body.errors.into_iter().map(|e| e.message).collect();
            return Err(Error::catalog(format!("Stash GraphQL: {}", messages.join("; "))));
        }
        body.data
            .ok_or_else(|| Error::catalog("Stash GraphQL response carried no data"))
    }
}

#[async_trait]
impl SceneCatalog for StashClient {
    async fn find_scene(&self, id: &str) -> Result<Scene> {
        let data: FindSceneData = self.query(FIND_SCENE, FindSceneVars { id }).await?;
        let scene = data.find_scene.ok_or_else(|| Error::not_found("scene", id))?;
        tracing::debug!(scene_id = id, "Fetched scene from Stash");
        Ok(scene.into_scene(self.api_key.as_deref()))
    }
}

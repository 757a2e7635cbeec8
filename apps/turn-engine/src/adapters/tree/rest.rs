//! Firebase Realtime Database REST implementation of `TreeStore`.
//!
//! Each path maps to `{base_url}/{path}.json`; reads are `GET`, overwrites
//! `PUT`, partial merges `PATCH`, removals `DELETE` and pushes `POST` (the
//! response body carries the generated key as `{"name": ...}`). Minting the
//! auth token is the host process's job; a ready token may be supplied.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::{StoreError, StorePath, TreeStore};

#[derive(Debug, Clone)]
pub struct RestTree {
    client: Client,
    base_url: Url,
    auth_token: Option<String>,
}

#[derive(Deserialize)]
struct PushResponse {
    name: String,
}

impl RestTree {
    /// Fails when `base_url` is not an absolute URL that can carry a path.
    pub fn new(base_url: &str, auth_token: Option<String>) -> Result<Self, StoreError> {
        Self::with_client(Client::new(), base_url, auth_token)
    }

    pub fn with_client(
        client: Client,
        base_url: &str,
        auth_token: Option<String>,
    ) -> Result<Self, StoreError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| StoreError::unavailable(format!("invalid store URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::unavailable(format!(
                "store URL '{base_url}' cannot carry a path"
            )));
        }
        Ok(Self {
            client,
            base_url,
            auth_token,
        })
    }

    /// REST location of a path (without the auth query). Each segment is
    /// percent-encoded; the last one carries the `.json` suffix.
    pub fn url_for(&self, path: &StorePath) -> Url {
        let mut url = self.base_url.clone();
        let mut parts: Vec<&str> = path.segments().collect();
        let last = parts
            .pop()
            .map_or_else(|| ".json".to_string(), |segment| format!("{segment}.json"));
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(parts).push(&last);
        }
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.query(&[("auth", token.as_str())]),
            None => request,
        }
    }

    async fn send_write(&self, path: &StorePath, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| StoreError::unavailable(format!("{path}: {e}")))?;
        if !response.status().is_success() {
            return Err(StoreError::write_failed(
                path,
                format!("HTTP {}", response.status()),
            ));
        }
        Ok(response)
    }
}

#[async_trait]
impl TreeStore for RestTree {
    async fn get(&self, path: &StorePath) -> Result<Option<Value>, StoreError> {
        debug!(%path, "tree get");
        let response = self
            .authorize(self.client.get(self.url_for(path)))
            .send()
            .await
            .map_err(|e| StoreError::unavailable(format!("{path}: {e}")))?;
        if !response.status().is_success() {
            return Err(StoreError::unavailable(format!(
                "{path}: HTTP {}",
                response.status()
            )));
        }
        let value: Value = response
            .json()
            .await
            .map_err(|e| StoreError::unavailable(format!("{path}: {e}")))?;
        Ok((!value.is_null()).then_some(value))
    }

    async fn set(&self, path: &StorePath, value: Value) -> Result<(), StoreError> {
        debug!(%path, "tree set");
        self.send_write(path, self.client.put(self.url_for(path)).json(&value))
            .await?;
        Ok(())
    }

    async fn update(&self, path: &StorePath, fields: Map<String, Value>) -> Result<(), StoreError> {
        debug!(%path, fields = fields.len(), "tree update");
        self.send_write(path, self.client.patch(self.url_for(path)).json(&fields))
            .await?;
        Ok(())
    }

    async fn delete(&self, path: &StorePath) -> Result<(), StoreError> {
        debug!(%path, "tree delete");
        self.send_write(path, self.client.delete(self.url_for(path)))
            .await?;
        Ok(())
    }

    async fn push(&self, path: &StorePath, value: Value) -> Result<String, StoreError> {
        debug!(%path, "tree push");
        let response = self
            .send_write(path, self.client.post(self.url_for(path)).json(&value))
            .await?;
        let pushed: PushResponse = response
            .json()
            .await
            .map_err(|e| StoreError::write_failed(path, format!("push response: {e}")))?;
        Ok(pushed.name)
    }
}

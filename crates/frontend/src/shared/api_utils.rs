//! HTTP access to the POS admin API
//!
//! Every entity is served from `/api/{resource}` and answers with the
//! [`ApiResponse`] envelope.

use crate::shared::record_manager::RecordGateway;
use async_trait::async_trait;
use contracts::shared::api::{ApiError, ApiResponse};
use contracts::shared::record::{Record, RecordId};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

/// Get the base URL for API requests
///
/// A configured URL wins. Otherwise the URL is built from the current
/// window location, using port 3000 for the backend server.
pub fn api_base(configured: &str) -> String {
    let configured = configured.trim().trim_end_matches('/');
    if !configured.is_empty() {
        return configured.to_string();
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

fn transport(e: gloo_net::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<ApiResponse<T>, ApiError> {
    let status = response.status();
    match response.json::<ApiResponse<T>>().await {
        Ok(envelope) => Ok(envelope),
        Err(_) if !response_ok(status) => Err(ApiError::Status {
            code: status.to_string(),
            description: format!("Server error: {}", status),
        }),
        Err(e) => Err(ApiError::Decode(e.to_string())),
    }
}

fn response_ok(status: u16) -> bool {
    (200..300).contains(&status)
}

/// [`RecordGateway`] over the REST endpoints of one resource
pub struct HttpGateway<R> {
    base: String,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> HttpGateway<R> {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            _record: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/api/{}", self.base, R::collection_name())
    }

    fn item_url(&self, id: RecordId) -> String {
        format!("{}/{}", self.collection_url(), id)
    }
}

#[async_trait(?Send)]
impl<R> RecordGateway<R> for HttpGateway<R>
where
    R: Record + Serialize + DeserializeOwned,
{
    async fn fetch_all(&self) -> Result<Vec<R>, ApiError> {
        let response = Request::get(&self.collection_url())
            .header("Cache-Control", "no-cache, no-store, must-revalidate")
            .send()
            .await
            .map_err(transport)?;
        read_envelope::<Vec<R>>(response).await?.into_result()
    }

    async fn save(&self, record: &R, is_new: bool) -> Result<R, ApiError> {
        let request = if is_new {
            Request::post(&self.collection_url())
        } else {
            Request::put(&self.item_url(record.id()))
        };
        let response = request
            .json(record)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        read_envelope::<R>(response).await?.into_result()
    }

    async fn delete(&self, id: RecordId) -> Result<(), ApiError> {
        let response = Request::delete(&self.item_url(id))
            .send()
            .await
            .map_err(transport)?;
        let envelope = read_envelope::<serde_json::Value>(response).await?;
        if envelope.is_success() {
            Ok(())
        } else {
            envelope.into_result().map(|_| ())
        }
    }
}

//! Client half of the sync protocol.
//!
//! The study store talks to the server through [`SyncApi`] so tests can
//! substitute an in-memory fake for the HTTP transport.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{
    CreateAccountRequest, CreateAccountResponse, ErrorBody, FetchProgressResponse,
    JoinAccountRequest, JoinAccountResponse, PushProgressRequest, PushProgressResponse,
};

/// Errors surfaced to the store's `sync_error` field. None of these roll
/// back local mutations; local records stay authoritative for the session.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error envelope
    #[error("{message}")]
    Rejected { message: String },
}

impl SyncError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

/// Transport used by the study store for pairing and progress sync
#[async_trait]
pub trait SyncApi: Send + Sync {
    async fn create_account(
        &self,
        request: CreateAccountRequest,
    ) -> Result<CreateAccountResponse, SyncError>;

    async fn join_account(
        &self,
        request: JoinAccountRequest,
    ) -> Result<JoinAccountResponse, SyncError>;

    async fn push_progress(
        &self,
        request: PushProgressRequest,
    ) -> Result<PushProgressResponse, SyncError>;

    async fn fetch_progress(&self, user_id: &str) -> Result<FetchProgressResponse, SyncError>;
}

/// [`SyncApi`] over HTTP against a pgmp-prep server
#[derive(Debug, Clone)]
pub struct HttpSyncApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSyncApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, SyncError> {
    if response.status().is_success() {
        return Ok(response.json::<T>().await?);
    }

    let status = response.status();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => format!("server returned {status}"),
    };
    Err(SyncError::rejected(message))
}

#[async_trait]
impl SyncApi for HttpSyncApi {
    async fn create_account(
        &self,
        request: CreateAccountRequest,
    ) -> Result<CreateAccountResponse, SyncError> {
        let response = self
            .client
            .post(self.url("/api/v1/pair"))
            .json(&request)
            .send()
            .await?;
        decode(response).await
    }

    async fn join_account(
        &self,
        request: JoinAccountRequest,
    ) -> Result<JoinAccountResponse, SyncError> {
        let response = self
            .client
            .put(self.url("/api/v1/pair"))
            .json(&request)
            .send()
            .await?;
        decode(response).await
    }

    async fn push_progress(
        &self,
        request: PushProgressRequest,
    ) -> Result<PushProgressResponse, SyncError> {
        let response = self
            .client
            .put(self.url("/api/v1/progress"))
            .json(&request)
            .send()
            .await?;
        decode(response).await
    }

    async fn fetch_progress(&self, user_id: &str) -> Result<FetchProgressResponse, SyncError> {
        let response = self
            .client
            .get(self.url("/api/v1/progress"))
            .query(&[("userId", user_id)])
            .send()
            .await?;
        decode(response).await
    }
}

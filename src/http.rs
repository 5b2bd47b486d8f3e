// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP implementation of the graph provider
//!
//! Talks to the graph API over reqwest. Relative paths are joined onto
//! the configured base URL; absolute `next` cursors from paging blocks
//! are requested as-is. Error bodies of the form `{ "error": ... }` are
//! surfaced unchanged as `ExplorerError::Provider`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::ExplorerError;
use crate::provider::{AuthSession, AuthStatus, GraphPage, GraphProvider};

const REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Graph API client over HTTP.
pub struct HttpGraphProvider {
    client: Client,
    base_url: Url,
    access_token: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Value,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GraphReply {
    Error(ErrorEnvelope),
    Page(GraphPage),
}

impl HttpGraphProvider {
    /// Create a provider for a graph API base URL, e.g.
    /// `https://graph.example.com/v2.9`. The token, when present, is
    /// used to answer login-status probes.
    pub fn new(base_url: &str, access_token: Option<String>) -> Result<Self, ExplorerError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(REQUEST_TIMEOUT_MS))
            .build()
            .map_err(|e| ExplorerError::Transport {
                message: e.to_string(),
            })?;

        // A trailing slash keeps Url::join from replacing the last path
        // segment of the base.
        let mut normalized = base_url.to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base_url = Url::parse(&normalized).map_err(|e| ExplorerError::Transport {
            message: format!("invalid base URL {}: {}", base_url, e),
        })?;

        Ok(Self {
            client,
            base_url,
            access_token,
        })
    }

    fn resolve(&self, path_or_url: &str) -> Result<Url, ExplorerError> {
        let parsed = if path_or_url.starts_with("http://") || path_or_url.starts_with("https://") {
            Url::parse(path_or_url)
        } else {
            self.base_url.join(path_or_url.trim_start_matches('/'))
        };
        parsed.map_err(|e| ExplorerError::Transport {
            message: format!("invalid request URL {}: {}", path_or_url, e),
        })
    }

    async fn probe_status(&self) -> AuthStatus {
        let Some(token) = self.access_token.as_deref() else {
            return AuthStatus::Unknown;
        };
        let url = match self.resolve("me") {
            Ok(url) => url,
            Err(_) => return AuthStatus::Unknown,
        };
        let request = self.client.get(url).query(&[("access_token", token)]);
        match request.send().await {
            Ok(response) if response.status().is_success() => AuthStatus::Connected,
            Ok(_) => AuthStatus::NotAuthorized,
            Err(_) => AuthStatus::Unknown,
        }
    }
}

#[async_trait]
impl GraphProvider for HttpGraphProvider {
    async fn init(&self, app_id: &str, version: &str) -> Result<(), ExplorerError> {
        debug!("graph provider init: app {} version {}", app_id, version);
        Ok(())
    }

    async fn status_change(&self) -> AuthStatus {
        // No push channel over plain HTTP: the first (and only) status
        // is the outcome of a token probe against the API.
        self.probe_status().await
    }

    async fn login_status(&self, _force_refresh: bool) -> Option<AuthSession> {
        match self.probe_status().await {
            AuthStatus::Connected => self
                .access_token
                .clone()
                .map(|access_token| AuthSession { access_token }),
            _ => None,
        }
    }

    async fn api(&self, path_or_url: &str) -> Result<GraphPage, ExplorerError> {
        let url = self.resolve(path_or_url)?;
        debug!("graph API request: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ExplorerError::Timeout {
                    timeout_ms: REQUEST_TIMEOUT_MS,
                }
            } else {
                ExplorerError::Transport {
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ExplorerError::Transport {
                message: e.to_string(),
            })?;

        match serde_json::from_slice::<GraphReply>(&body) {
            Ok(GraphReply::Error(envelope)) => Err(ExplorerError::Provider {
                payload: envelope.error,
            }),
            Ok(GraphReply::Page(page)) if status.is_success() => Ok(page),
            Ok(GraphReply::Page(_)) => Err(ExplorerError::Api {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&body).into_owned(),
            }),
            Err(e) => Err(ExplorerError::InvalidResponse {
                reason: format!("undecodable body (HTTP {}): {}", status.as_u16(), e),
            }),
        }
    }
}

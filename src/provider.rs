// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Graph provider trait and wire types
//!
//! `GraphProvider` is the seam between the orchestration layer and the
//! external graph SDK/API. The concrete HTTP implementation lives in
//! `http`; tests substitute scripted fakes.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::ExplorerError;
use crate::types::ResultItem;

/// Paging block of a graph API response. Only `next` matters here: its
/// absence signals end-of-pagination.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Paging {
    /// Absolute URL of the next page, when there is one
    pub next: Option<String>,
}

/// One page of a paged graph API response.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct GraphPage {
    /// Items of this page
    #[serde(default)]
    pub data: Vec<ResultItem>,
    /// Continuation block; `None` or a missing `next` ends the pass
    #[serde(default)]
    pub paging: Option<Paging>,
}

impl GraphPage {
    /// Next-page cursor, if the provider returned one.
    pub fn next(&self) -> Option<&str> {
        self.paging.as_ref().and_then(|p| p.next.as_deref())
    }
}

/// Authentication status reported by the provider's status-change
/// notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    /// The user is logged in and has authorized the application
    Connected,
    /// The user is logged in but has not authorized the application
    NotAuthorized,
    /// No session, or the provider could not determine one
    Unknown,
}

/// An authenticated session as reported by `login_status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// Access token to attach to subsequent API calls
    pub access_token: String,
}

/// External graph SDK surface consumed by the explorer.
#[async_trait]
pub trait GraphProvider: Send + Sync {
    /// Initialize the SDK for an application id and API version.
    async fn init(&self, app_id: &str, version: &str) -> Result<(), ExplorerError>;

    /// Resolve with the FIRST auth status change. One-shot: the
    /// explorer's readiness gate latches on this single value.
    async fn status_change(&self) -> AuthStatus;

    /// Current login status; `Some` carries the access token of an
    /// authenticated session.
    async fn login_status(&self, force_refresh: bool) -> Option<AuthSession>;

    /// Fetch one page. `path_or_url` is either a relative API path
    /// (first page) or the absolute `next` URL of a previous page.
    async fn api(&self, path_or_url: &str) -> Result<GraphPage, ExplorerError>;
}

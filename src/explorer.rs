// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search orchestration and session readiness
//!
//! `GraphExplorer` exposes the three public search entry points over a
//! `GraphProvider`. Every search waits on a one-shot readiness gate that
//! latches on the provider's first auth status change: `Connected` makes
//! the explorer permanently ready, anything else permanently fails it
//! until a re-init. The event search composes two pagination phases: a
//! place search that peeks at embedded events, then one event pagination
//! pass per candidate place, fanned out in parallel and joined before
//! the merged result is sorted.

use std::sync::Arc;

use chrono::{Duration, Local};
use futures::future::try_join_all;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};

use crate::config::ExplorerConfig;
use crate::error::ExplorerError;
use crate::pagination::paginate;
use crate::provider::{AuthStatus, GraphProvider};
use crate::query::search_query;
use crate::sort::sort_results;
use crate::types::{ProgressCallback, ResultItem, SearchKind, SearchOptions, SearchUpdate};

/// Per-explorer session state: the current access token and application
/// identifier. An explicit object rather than process globals, so that
/// independent explorers (and tests) can hold independent sessions.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub access_token: Option<String>,
    pub app_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateState {
    Pending,
    Ready,
    Failed,
}

/// Client-side helper for querying the graph search API.
pub struct GraphExplorer {
    provider: Arc<dyn GraphProvider>,
    config: ExplorerConfig,
    session: RwLock<Session>,
    // Single-slot readiness gate. Re-init installs a fresh receiver;
    // waiters on a replaced gate are abandoned, never completed.
    gate: RwLock<watch::Receiver<GateState>>,
}

impl GraphExplorer {
    /// Initialize an explorer: install the readiness gate, run the
    /// provider's SDK init and read the current login status, storing
    /// the access token when one is already present.
    pub async fn init(provider: Arc<dyn GraphProvider>, config: ExplorerConfig) -> Self {
        let explorer = Self {
            gate: RwLock::new(Self::spawn_gate(&provider)),
            session: RwLock::new(Session {
                access_token: None,
                app_id: config.app_id.clone(),
            }),
            provider,
            config,
        };
        explorer.bootstrap().await;
        explorer
    }

    fn spawn_gate(provider: &Arc<dyn GraphProvider>) -> watch::Receiver<GateState> {
        let (tx, rx) = watch::channel(GateState::Pending);
        let provider = Arc::clone(provider);
        tokio::spawn(async move {
            let state = match provider.status_change().await {
                AuthStatus::Connected => GateState::Ready,
                status => {
                    warn!("auth status resolved to {:?}; searches are blocked", status);
                    GateState::Failed
                }
            };
            let _ = tx.send(state);
        });
        rx
    }

    async fn bootstrap(&self) {
        let app_id = self.session.read().await.app_id.clone();
        if let Err(e) = self.provider.init(&app_id, &self.config.version).await {
            warn!("provider init failed: {}", e);
        }
        match self.provider.login_status(true).await {
            Some(auth) => {
                debug!("login status: already authenticated");
                self.set_token(auth.access_token).await;
            }
            None => debug!("login status: no session"),
        }
    }

    /// Wait until the provider reported a connected session.
    pub async fn ready(&self) -> Result<(), ExplorerError> {
        let mut rx = self.gate.read().await.clone();
        loop {
            match *rx.borrow() {
                GateState::Ready => return Ok(()),
                GateState::Failed => return Err(ExplorerError::NotConnected),
                GateState::Pending => {}
            }
            if rx.changed().await.is_err() {
                return Err(ExplorerError::NotConnected);
            }
        }
    }

    pub async fn app_id(&self) -> String {
        self.session.read().await.app_id.clone()
    }

    /// Switch to another application id and re-run initialization. The
    /// previous readiness gate is abandoned: anything still awaiting it
    /// never observes completion.
    pub async fn set_app_id(&self, app_id: impl Into<String>) {
        let app_id = app_id.into();
        info!("re-initializing for app {}", app_id);
        {
            let mut session = self.session.write().await;
            session.app_id = app_id;
            session.access_token = None;
        }
        *self.gate.write().await = Self::spawn_gate(&self.provider);
        self.bootstrap().await;
    }

    pub async fn token(&self) -> Option<String> {
        self.session.read().await.access_token.clone()
    }

    pub async fn set_token(&self, token: impl Into<String>) {
        self.session.write().await.access_token = Some(token.into());
    }

    /// Search places, then sort client-side per the options.
    pub async fn find_places(
        &self,
        options: &SearchOptions,
        on_update: Option<&ProgressCallback>,
    ) -> Result<Vec<ResultItem>, ExplorerError> {
        let items = self.search(SearchKind::Place, options, on_update).await?;
        Ok(self.sorted(items, options))
    }

    /// Search pages, then sort client-side per the options.
    pub async fn find_pages(
        &self,
        options: &SearchOptions,
        on_update: Option<&ProgressCallback>,
    ) -> Result<Vec<ResultItem>, ExplorerError> {
        let items = self.search(SearchKind::Page, options, on_update).await?;
        Ok(self.sorted(items, options))
    }

    /// Search events near a center by fanning out over nearby places.
    ///
    /// Phase 1 pages through places whose field list peeks at up to one
    /// embedded event inside the search window. Phase 2 runs one full
    /// event pagination pass per place that had such an event, in
    /// parallel; each sub-search reports its batches with `final_page`
    /// forced true. After every sub-search has completed, `on_update`
    /// receives a single `Done`, and the flattened merge is sorted.
    pub async fn find_events(
        &self,
        options: &SearchOptions,
        on_update: Option<&ProgressCallback>,
    ) -> Result<Vec<ResultItem>, ExplorerError> {
        let since = options
            .since
            .clone()
            .unwrap_or_else(|| self.config.since.clone());
        let until = options
            .until
            .clone()
            .unwrap_or_else(|| default_until(self.config.days));

        let peek = SearchOptions {
            center: options.center,
            distance: options.distance,
            fields: Some(format!(
                "id,events.fields(id).since({}).until({}).limit(1)",
                since, until
            )),
            ..SearchOptions::default()
        };
        let places = self.find_places(&peek, None).await?;
        debug!("event search: {} candidate places", places.len());

        let searches: Vec<_> = places
            .iter()
            .rev()
            .filter(|place| place.has_events())
            .filter_map(|place| place.id().map(str::to_owned))
            .map(|place_id| {
                self.search_events_by_place(place_id, &since, &until, options, on_update)
            })
            .collect();
        let per_place = try_join_all(searches).await?;

        if let Some(cb) = on_update {
            cb(SearchUpdate::Done);
        }

        let merged: Vec<ResultItem> = per_place.into_iter().flatten().collect();
        info!("event search merged {} events", merged.len());
        Ok(self.sorted(merged, options))
    }

    /// One full event pagination pass scoped to a place. Batches are
    /// reported with `final_page` forced true: completion of a
    /// sub-search is always final from the caller's point of view, even
    /// when the pass itself spanned several pages.
    async fn search_events_by_place(
        &self,
        place_id: String,
        since: &str,
        until: &str,
        options: &SearchOptions,
        on_update: Option<&ProgressCallback>,
    ) -> Result<Vec<ResultItem>, ExplorerError> {
        self.ready().await?;

        let scoped = SearchOptions {
            since: Some(since.to_owned()),
            until: Some(until.to_owned()),
            profile: options.profile,
            fields: options.fields.clone(),
            ..SearchOptions::default()
        };
        let token = self.token().await;
        let query = search_query(
            SearchKind::Event,
            &scoped,
            token.as_deref(),
            self.config.profile,
        );
        let url = format!("/{}/events?{}", place_id, query);
        debug!("event sub-search for place {}", place_id);

        let forced: Option<Box<dyn Fn(SearchUpdate) + Send + Sync + '_>> =
            on_update.map(|cb| {
                Box::new(move |update: SearchUpdate| match update {
                    SearchUpdate::Progress { items, .. } => cb(SearchUpdate::Progress {
                        items,
                        final_page: true,
                    }),
                    other => cb(other),
                }) as Box<dyn Fn(SearchUpdate) + Send + Sync + '_>
            });

        paginate(self.provider.as_ref(), &url, forced.as_deref()).await
    }

    async fn search(
        &self,
        kind: SearchKind,
        options: &SearchOptions,
        on_update: Option<&ProgressCallback>,
    ) -> Result<Vec<ResultItem>, ExplorerError> {
        self.ready().await?;

        let token = self.token().await;
        let query = search_query(kind, options, token.as_deref(), self.config.profile);
        let initial = format!("/search?type={}&{}", kind.as_str(), query);
        debug!("searching {}s", kind.as_str());

        paginate(self.provider.as_ref(), &initial, on_update).await
    }

    fn sorted(&self, items: Vec<ResultItem>, options: &SearchOptions) -> Vec<ResultItem> {
        sort_results(
            items,
            options.sort,
            options.order.unwrap_or_default(),
            options.center.as_ref(),
        )
    }
}

/// Default end of the event window: today plus `days`, as a zero-padded
/// local calendar date.
fn default_until(days: i64) -> String {
    let date = Local::now().date_naive() + Duration::days(days);
    date.format("%Y-%m-%d").to_string()
}

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! End-to-end search flows against a scripted graph provider

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use fabstir_graph_explorer::{
    AuthSession, AuthStatus, ExplorerConfig, ExplorerError, GraphExplorer, GraphPage,
    GraphProvider, Paging, ResultItem, SearchOptions, SearchUpdate, SortKey, SortOrder,
};

fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Scripted provider: each route is a URL fragment with a queue of
/// responses, consumed in order as matching requests arrive.
struct ScriptedProvider {
    status: AuthStatus,
    routes: Mutex<Vec<(String, VecDeque<Result<GraphPage, ExplorerError>>)>>,
}

impl ScriptedProvider {
    fn new(status: AuthStatus) -> Self {
        Self {
            status,
            routes: Mutex::new(Vec::new()),
        }
    }

    fn route(self, pattern: &str, responses: Vec<Result<GraphPage, ExplorerError>>) -> Self {
        self.routes
            .lock()
            .unwrap()
            .push((pattern.to_string(), responses.into()));
        self
    }
}

#[async_trait]
impl GraphProvider for ScriptedProvider {
    async fn init(&self, _app_id: &str, _version: &str) -> Result<(), ExplorerError> {
        Ok(())
    }

    async fn status_change(&self) -> AuthStatus {
        self.status
    }

    async fn login_status(&self, _force_refresh: bool) -> Option<AuthSession> {
        match self.status {
            AuthStatus::Connected => Some(AuthSession {
                access_token: "itest-token".to_string(),
            }),
            _ => None,
        }
    }

    async fn api(&self, path_or_url: &str) -> Result<GraphPage, ExplorerError> {
        let mut routes = self.routes.lock().unwrap();
        for (pattern, queue) in routes.iter_mut() {
            if path_or_url.contains(pattern.as_str()) {
                return queue.pop_front().unwrap_or(Err(ExplorerError::Provider {
                    payload: json!({ "message": format!("route {} exhausted", pattern) }),
                }));
            }
        }
        Err(ExplorerError::Provider {
            payload: json!({ "message": format!("no route for {}", path_or_url) }),
        })
    }
}

fn place(id: &str, name: &str) -> ResultItem {
    ResultItem(json!({ "id": id, "name": name }))
}

fn place_with_events(id: &str) -> ResultItem {
    ResultItem(json!({ "id": id, "events": { "data": [{ "id": "peek" }] } }))
}

fn event(id: &str, start_time: &str) -> ResultItem {
    ResultItem(json!({ "id": id, "name": id, "start_time": start_time }))
}

fn page_of(items: Vec<ResultItem>, next: Option<&str>) -> GraphPage {
    GraphPage {
        data: items,
        paging: next.map(|n| Paging {
            next: Some(n.to_string()),
        }),
    }
}

fn recording_callback(
) -> (Arc<Mutex<Vec<SearchUpdate>>>, impl Fn(SearchUpdate) + Send + Sync) {
    let updates = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&updates);
    (updates, move |update| sink.lock().unwrap().push(update))
}

async fn explorer_over(provider: ScriptedProvider) -> GraphExplorer {
    init_logging();
    GraphExplorer::init(Arc::new(provider), ExplorerConfig::new("itest-app")).await
}

#[tokio::test]
async fn test_find_places_merges_pages_and_sorts_by_name() {
    let provider = ScriptedProvider::new(AuthStatus::Connected)
        .route(
            "type=place",
            vec![Ok(page_of(
                vec![place("3", "cherry"), place("1", "apple"), place("4", "durian")],
                Some("https://graph.test/v2.9/search?after=page2"),
            ))],
        )
        .route(
            "after=page2",
            vec![Ok(page_of(
                vec![place("5", "elder"), place("2", "banana")],
                None,
            ))],
        );
    let explorer = explorer_over(provider).await;

    let options = SearchOptions {
        sort: Some(SortKey::Name),
        order: Some(SortOrder::Asc),
        ..Default::default()
    };
    let results = explorer.find_places(&options, None).await.unwrap();

    let names: Vec<_> = results.iter().filter_map(|i| i.name()).collect();
    assert_eq!(names, vec!["apple", "banana", "cherry", "durian", "elder"]);
}

#[tokio::test]
async fn test_find_pages_passes_through_without_sort_key() {
    let provider = ScriptedProvider::new(AuthStatus::Connected).route(
        "type=page",
        vec![Ok(page_of(vec![place("b", "beta"), place("a", "alpha")], None))],
    );
    let explorer = explorer_over(provider).await;

    let results = explorer
        .find_pages(&SearchOptions::default(), None)
        .await
        .unwrap();
    let ids: Vec<_> = results.iter().filter_map(|i| i.id()).collect();
    assert_eq!(ids, vec!["b", "a"]);
}

#[tokio::test]
async fn test_find_events_fans_out_and_merges() {
    let provider = ScriptedProvider::new(AuthStatus::Connected)
        .route(
            "type=place",
            vec![Ok(page_of(
                vec![
                    place_with_events("p1"),
                    place("p2", "no events here"),
                    place_with_events("p3"),
                ],
                None,
            ))],
        )
        .route(
            "/p1/events",
            vec![
                Ok(page_of(
                    vec![event("e2", "2020-03-01T20:00:00+0000")],
                    Some("https://graph.test/v2.9/p1/events?after=2"),
                )),
                Ok(page_of(vec![event("e3", "2020-04-01T20:00:00+0000")], None)),
            ],
        )
        .route(
            "/p3/events",
            vec![Ok(page_of(vec![event("e1", "2020-01-01T09:00:00+0000")], None))],
        );
    let explorer = explorer_over(provider).await;
    let (updates, cb) = recording_callback();

    let options = SearchOptions {
        since: Some("2020-01-01".to_string()),
        until: Some("2020-06-01".to_string()),
        sort: Some(SortKey::Time),
        order: Some(SortOrder::Asc),
        ..Default::default()
    };
    let results = explorer.find_events(&options, Some(&cb)).await.unwrap();

    let ids: Vec<_> = results.iter().filter_map(|i| i.id()).collect();
    assert_eq!(ids, vec!["e1", "e2", "e3"]);

    let updates = updates.lock().unwrap();
    let progress: Vec<_> = updates
        .iter()
        .filter_map(|u| match u {
            SearchUpdate::Progress { items, final_page } => Some((items.len(), *final_page)),
            SearchUpdate::Done => None,
        })
        .collect();
    // Three batches across the two sub-searches, every one reported final
    assert_eq!(progress.len(), 3);
    assert!(progress.iter().all(|(_, final_page)| *final_page));
    assert!(progress.iter().all(|(len, _)| *len == 1));

    // Exactly one Done, after everything else
    let done_count = updates
        .iter()
        .filter(|u| matches!(u, SearchUpdate::Done))
        .count();
    assert_eq!(done_count, 1);
    assert_eq!(updates.last(), Some(&SearchUpdate::Done));
}

#[tokio::test]
async fn test_failed_gate_blocks_every_search() {
    let provider = ScriptedProvider::new(AuthStatus::NotAuthorized);
    let explorer = explorer_over(provider).await;

    let result = explorer.find_pages(&SearchOptions::default(), None).await;
    assert!(matches!(result, Err(ExplorerError::NotConnected)));

    let result = explorer.find_events(&SearchOptions::default(), None).await;
    assert!(matches!(result, Err(ExplorerError::NotConnected)));
}

#[tokio::test]
async fn test_provider_error_rejects_whole_operation() {
    let provider = ScriptedProvider::new(AuthStatus::Connected)
        .route(
            "type=place",
            vec![Ok(page_of(
                vec![place("1", "first")],
                Some("https://graph.test/v2.9/search?after=boom"),
            ))],
        )
        .route(
            "after=boom",
            vec![Err(ExplorerError::Provider {
                payload: json!({ "message": "token expired", "code": 190 }),
            })],
        );
    let explorer = explorer_over(provider).await;
    let (updates, cb) = recording_callback();

    let result = explorer
        .find_places(&SearchOptions::default(), Some(&cb))
        .await;
    match result {
        Err(ExplorerError::Provider { payload }) => {
            assert_eq!(payload["code"], 190);
        }
        other => panic!("expected provider error, got {:?}", other.map(|v| v.len())),
    }
    // The first page was reported before the failure, nothing after.
    assert_eq!(updates.lock().unwrap().len(), 1);
}

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generic cursor-pagination loop
//!
//! Repeatedly fetches pages from the provider until no next-page cursor
//! is returned, deduplicating items by `id` across pages. A provider
//! error fails the whole pass: nothing accumulated so far is returned
//! and nothing is retried. There is deliberately no page cap or
//! timeout; a provider that always returns a next cursor never
//! terminates the loop.

use std::collections::HashSet;

use tracing::debug;

use crate::error::ExplorerError;
use crate::provider::GraphProvider;
use crate::types::{ResultItem, SearchUpdate};

/// Run one pagination pass starting at `initial_url`.
///
/// After every fetched page, `on_update` (when present) receives
/// `SearchUpdate::Progress` with the page's new items and a flag that is
/// true iff the provider returned no further cursor. Returns the full
/// deduplicated accumulation once the loop terminates.
pub async fn paginate(
    provider: &dyn GraphProvider,
    initial_url: &str,
    on_update: Option<&(dyn Fn(SearchUpdate) + Send + Sync)>,
) -> Result<Vec<ResultItem>, ExplorerError> {
    let mut cursor: Option<String> = None;
    let mut accumulated: Vec<ResultItem> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut pages = 0usize;

    loop {
        let url = cursor.as_deref().unwrap_or(initial_url);
        let page = provider.api(url).await?;
        pages += 1;

        let next = page.next().map(str::to_owned);

        // Pages are not expected to overlap; the id filter guards
        // against a provider that repeats items across pages anyway.
        let mut new_items = Vec::with_capacity(page.data.len());
        for item in page.data {
            if let Some(id) = item.id() {
                if !seen.insert(id.to_owned()) {
                    continue;
                }
            }
            new_items.push(item);
        }

        let final_page = next.is_none();
        accumulated.extend(new_items.iter().cloned());

        if let Some(cb) = on_update {
            cb(SearchUpdate::Progress {
                items: new_items,
                final_page,
            });
        }

        if final_page {
            debug!("pagination done: {} items over {} pages", accumulated.len(), pages);
            return Ok(accumulated);
        }
        cursor = next;
    }
}

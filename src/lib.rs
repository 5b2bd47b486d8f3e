// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Client-side helper for a social-graph search API
//!
//! Queries the three search verticals (places, pages, events), pages
//! through cursor-based results with deduplication by id, merges them,
//! and sorts them client-side by distance, time or name. The event
//! search composes a place search with per-place event sub-searches
//! fanned out in parallel.

pub mod config;
pub mod error;
pub mod explorer;
pub mod fields;
pub mod geo;
pub mod http;
pub mod pagination;
pub mod provider;
pub mod query;
pub mod sort;
pub mod types;

pub use config::ExplorerConfig;
pub use error::ExplorerError;
pub use explorer::{GraphExplorer, Session};
pub use fields::{fields_for, fields_from_profile};
pub use geo::distance_km;
pub use http::HttpGraphProvider;
pub use pagination::paginate;
pub use provider::{AuthSession, AuthStatus, GraphPage, GraphProvider, Paging};
pub use query::search_query;
pub use sort::sort_results;
pub use types::{
    FieldProfile, GeoPoint, ProgressCallback, ResultItem, SearchKind, SearchOptions, SearchUpdate,
    SortKey, SortOrder,
};

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for graph search: entity kinds, field profiles, sort
//! controls, search options and the opaque result item.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Entity kind understood by the graph search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKind {
    Place,
    Page,
    Event,
}

impl SearchKind {
    /// Wire name of the kind, as used in `type=` query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Place => "place",
            SearchKind::Page => "page",
            SearchKind::Event => "event",
        }
    }

    /// Parse a wire name. Unknown kinds are rejected rather than guessed.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "place" => Some(SearchKind::Place),
            "page" => Some(SearchKind::Page),
            "event" => Some(SearchKind::Event),
            _ => None,
        }
    }
}

/// Named field preset mapping to a fixed field list per entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldProfile {
    Basic,
    #[default]
    Brief,
    Extended,
    Full,
}

impl FieldProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldProfile::Basic => "basic",
            FieldProfile::Brief => "brief",
            FieldProfile::Extended => "extended",
            FieldProfile::Full => "full",
        }
    }

    /// Parse a profile name, falling back to the default profile
    /// (`brief`) for anything unrecognized.
    pub fn parse(s: &str) -> Self {
        match s {
            "basic" => FieldProfile::Basic,
            "brief" => FieldProfile::Brief,
            "extended" => FieldProfile::Extended,
            "full" => FieldProfile::Full,
            _ => FieldProfile::default(),
        }
    }
}

/// Client-side sort key applied to merged search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Distance,
    Time,
    Name,
}

/// Sort direction. Ascending unless the caller says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Options for a single search call.
///
/// All fields are optional; `fields` (an explicit comma-separated field
/// list) overrides `profile`. `since`/`until` only apply to event
/// searches. `distance` is only sent when `center` is present.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Free-text keywords (`q=`). Empty when absent.
    pub keywords: Option<String>,
    /// Explicit field list; overrides `profile` when set.
    pub fields: Option<String>,
    /// Field profile to resolve when `fields` is absent.
    pub profile: Option<FieldProfile>,
    /// Center point for proximity search and distance sorting.
    pub center: Option<GeoPoint>,
    /// Search radius around `center`, in meters.
    pub distance: Option<u32>,
    /// Event window start, provider-formatted date string.
    pub since: Option<String>,
    /// Event window end, provider-formatted date string.
    pub until: Option<String>,
    /// Client-side sort key; `None` leaves provider order untouched.
    pub sort: Option<SortKey>,
    /// Sort direction; ascending when absent.
    pub order: Option<SortOrder>,
}

/// A single search result as returned by the provider.
///
/// The payload is an opaque JSON object; the only structural requirement
/// is an `id` used for deduplication across pages. Places and pages may
/// embed a `location`, events a `place.location` and a `start_time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultItem(pub Value);

impl ResultItem {
    /// Provider identity, used for deduplication across pages.
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn start_time(&self) -> Option<&str> {
        self.0.get("start_time").and_then(Value::as_str)
    }

    /// Embedded location of a place or page result.
    pub fn location(&self) -> Option<GeoPoint> {
        self.0.get("location").and_then(as_geo_point)
    }

    /// Location of the hosting place of an event result.
    pub fn place_location(&self) -> Option<GeoPoint> {
        self.0
            .get("place")
            .and_then(|p| p.get("location"))
            .and_then(as_geo_point)
    }

    /// Location used for distance sorting: `location` first, then
    /// `place.location`.
    pub fn sort_location(&self) -> Option<GeoPoint> {
        self.location().or_else(|| self.place_location())
    }

    /// Whether the item embeds a non-empty `events` connection.
    pub fn has_events(&self) -> bool {
        self.0.get("events").is_some_and(|e| !e.is_null())
    }
}

fn as_geo_point(v: &Value) -> Option<GeoPoint> {
    serde_json::from_value(v.clone()).ok()
}

/// Partial-result notification emitted while a search is running.
///
/// `Progress` carries the new (deduplicated) items of one fetched page;
/// `final_page` is true when the provider returned no further cursor for
/// that pass. `Done` fires exactly once at the end of a fan-out event
/// search, after every per-place sub-search has completed.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchUpdate {
    Progress {
        items: Vec<ResultItem>,
        final_page: bool,
    },
    Done,
}

/// Callback type for partial-result notifications.
pub type ProgressCallback = dyn Fn(SearchUpdate) + Send + Sync;

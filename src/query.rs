// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Query string construction for graph search requests

use std::fmt::Write;

use crate::fields::fields_for;
use crate::types::{FieldProfile, SearchKind, SearchOptions};

/// Build the query string for a search of the given kind.
///
/// Always emits `q`, `fields` and `accessToken`. `since`/`until` are
/// appended for event searches only, as caller-supplied strings (the
/// provider enforces the date format). `center` and `distance` are
/// appended only when a center is present; a radius without a center is
/// silently dropped.
pub fn search_query(
    kind: SearchKind,
    options: &SearchOptions,
    token: Option<&str>,
    default_profile: FieldProfile,
) -> String {
    let fields = options
        .fields
        .clone()
        .unwrap_or_else(|| fields_for(kind, options.profile.unwrap_or(default_profile)).join(","));

    let mut query = String::new();
    let _ = write!(query, "q={}", options.keywords.as_deref().unwrap_or(""));
    let _ = write!(query, "&fields={}", fields);
    let _ = write!(query, "&accessToken={}", token.unwrap_or(""));

    if kind == SearchKind::Event {
        let _ = write!(query, "&since={}", options.since.as_deref().unwrap_or(""));
        let _ = write!(query, "&until={}", options.until.as_deref().unwrap_or(""));
    }
    if let Some(center) = &options.center {
        let _ = write!(query, "&center={},{}", center.latitude, center.longitude);
        if let Some(distance) = options.distance {
            let _ = write!(query, "&distance={}", distance);
        }
    }

    query
}

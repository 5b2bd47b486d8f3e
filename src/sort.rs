// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Client-side sorting of merged search results

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveTime};

use crate::geo::distance_km;
use crate::types::{GeoPoint, ResultItem, SortKey, SortOrder};

/// Sort items by the requested key. `None` is an identity passthrough.
///
/// Distance sorting needs a `center`; without one every comparison is a
/// tie and the input order survives (the sort is stable throughout).
pub fn sort_results(
    mut items: Vec<ResultItem>,
    sort: Option<SortKey>,
    order: SortOrder,
    center: Option<&GeoPoint>,
) -> Vec<ResultItem> {
    match sort {
        Some(SortKey::Distance) => sort_by_distance(&mut items, order, center),
        Some(SortKey::Time) => sort_by_time(&mut items, order),
        Some(SortKey::Name) => sort_by_name(&mut items, order),
        None => {}
    }
    items
}

/// Items without any location sort before items that have one,
/// regardless of the requested order. That asymmetry is deliberate:
/// "no location" is not a distance, so it never participates in the
/// asc/desc reversal.
fn sort_by_distance(items: &mut [ResultItem], order: SortOrder, center: Option<&GeoPoint>) {
    items.sort_by(|a, b| {
        let point_a = a.sort_location();
        let point_b = b.sort_location();
        match (point_a, point_b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(point_a), Some(point_b)) => {
                let Some(center) = center else {
                    return Ordering::Equal;
                };
                let dist_a = distance_km(center, &point_a);
                let dist_b = distance_km(center, &point_b);
                match order {
                    SortOrder::Asc => dist_a.total_cmp(&dist_b),
                    SortOrder::Desc => dist_b.total_cmp(&dist_a),
                }
            }
        }
    });
}

/// Unparseable or absent `start_time` values order after every valid
/// date (and the whole comparison flips for descending order).
fn sort_by_time(items: &mut [ResultItem], order: SortOrder) {
    items.sort_by(|a, b| {
        let time_a = a.start_time().and_then(parse_start_time);
        let time_b = b.start_time().and_then(parse_start_time);
        let cmp = match (time_a, time_b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(time_a), Some(time_b)) => time_a.cmp(&time_b),
        };
        match order {
            SortOrder::Asc => cmp,
            SortOrder::Desc => cmp.reverse(),
        }
    });
}

fn sort_by_name(items: &mut [ResultItem], order: SortOrder) {
    items.sort_by(|a, b| {
        let cmp = a.name().unwrap_or("").cmp(b.name().unwrap_or(""));
        match order {
            SortOrder::Asc => cmp,
            SortOrder::Desc => cmp.reverse(),
        }
    });
}

/// Parse an event `start_time` into a unix timestamp. Accepts RFC 3339,
/// the graph API's `%Y-%m-%dT%H:%M:%S%z` form, and bare dates.
pub(crate) fn parse_start_time(s: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp());
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(dt.timestamp());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc().timestamp())
}

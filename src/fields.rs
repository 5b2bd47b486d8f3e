// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Field profile tables
//!
//! Each entity kind maps the four named profiles (basic, brief,
//! extended, full) to a fixed list of graph API fields. The lists are
//! static configuration; callers either pick a profile or bypass the
//! tables with an explicit field string.

use crate::types::{FieldProfile, SearchKind};

const EVENT_BASIC: &[&str] = &["id", "name"];
const EVENT_BRIEF: &[&str] = &[
    "category",
    "cover",
    "description",
    "id",
    "end_time",
    "name",
    "place",
    "start_time",
];
const EVENT_EXTENDED: &[&str] = &[
    "attending_count",
    "category",
    "cover",
    "description",
    "id",
    "interested_count",
    "end_time",
    "maybe_count",
    "name",
    "place",
    "start_time",
    "type",
];
const EVENT_FULL: &[&str] = &[
    "attending_count",
    "can_guests_invite",
    "can_viewer_post",
    "category",
    "cover",
    "declined_count",
    "description",
    "end_time",
    "id",
    "interested_count",
    "is_cancelled",
    "is_draft",
    "is_page_owned",
    "is_viewer_admin",
    "maybe_count",
    "name",
    "noreply_count",
    "owner",
    "parent_group",
    "place",
    "start_time",
    "ticket_uri",
    "timezone",
    "type",
    "updated_time",
];

const PAGE_BASIC: &[&str] = &["id", "name"];
const PAGE_BRIEF: &[&str] = &["category", "cover", "description", "id", "location", "name"];
const PAGE_EXTENDED: &[&str] = &[
    "category",
    "contact_address",
    "cover",
    "description",
    "fan_count",
    "featured_video",
    "founded",
    "id",
    "location",
    "name",
    "talking_about_count",
    "website",
];
const PAGE_FULL: &[&str] = &[
    "about",
    "app_links",
    "best_page",
    "can_checkin",
    "category",
    "category_list",
    "contact_address",
    "cover",
    "description",
    "display_subtext",
    "emails",
    "fan_count",
    "featured_video",
    "founded",
    "general_info",
    "id",
    "impressum",
    "is_community_page",
    "is_verified",
    "link",
    "location",
    "name",
    "overall_star_rating",
    "parent_page",
    "phone",
    "rating_count",
    "start_info",
    "supports_instant_articles",
    "talking_about_count",
    "website",
    "were_here_count",
];

const PLACE_BASIC: &[&str] = &["id", "name"];
const PLACE_BRIEF: &[&str] = &["category", "description", "id", "location", "name", "picture"];
const PLACE_EXTENDED: &[&str] = &[
    "category",
    "description",
    "hours",
    "id",
    "location",
    "name",
    "phone",
    "picture",
    "website",
];
const PLACE_FULL: &[&str] = &[
    "about",
    "category",
    "category_list",
    "cover",
    "checkins",
    "description",
    "hours",
    "id",
    "is_always_open",
    "is_permanently_closed",
    "is_verified",
    "link",
    "location",
    "name",
    "overall_star_rating",
    "parking",
    "payment_options",
    "phone",
    "photos",
    "picture",
    "price_range",
    "rating_count",
    "restaurant_services",
    "restaurant_specialties",
    "single_line_address",
    "website",
    "workflows",
];

/// Field list for an entity kind and profile.
pub fn fields_for(kind: SearchKind, profile: FieldProfile) -> &'static [&'static str] {
    match (kind, profile) {
        (SearchKind::Event, FieldProfile::Basic) => EVENT_BASIC,
        (SearchKind::Event, FieldProfile::Brief) => EVENT_BRIEF,
        (SearchKind::Event, FieldProfile::Extended) => EVENT_EXTENDED,
        (SearchKind::Event, FieldProfile::Full) => EVENT_FULL,
        (SearchKind::Page, FieldProfile::Basic) => PAGE_BASIC,
        (SearchKind::Page, FieldProfile::Brief) => PAGE_BRIEF,
        (SearchKind::Page, FieldProfile::Extended) => PAGE_EXTENDED,
        (SearchKind::Page, FieldProfile::Full) => PAGE_FULL,
        (SearchKind::Place, FieldProfile::Basic) => PLACE_BASIC,
        (SearchKind::Place, FieldProfile::Brief) => PLACE_BRIEF,
        (SearchKind::Place, FieldProfile::Extended) => PLACE_EXTENDED,
        (SearchKind::Place, FieldProfile::Full) => PLACE_FULL,
    }
}

/// String-level profile resolution, matching the original wire API:
/// `None` for an unrecognized kind, default-profile fallback for an
/// unrecognized profile, comma-joined field list otherwise.
pub fn fields_from_profile(kind: &str, profile: &str) -> Option<String> {
    let kind = SearchKind::parse(kind)?;
    let profile = FieldProfile::parse(profile);
    Some(fields_for(kind, profile).join(","))
}

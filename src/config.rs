// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the graph explorer

use std::env;

use crate::types::FieldProfile;

/// Default graph API version requested at init.
pub const DEFAULT_API_VERSION: &str = "v2.9";

/// Configuration recognized at `init`.
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// Application identifier registered with the graph provider
    pub app_id: String,
    /// Graph API version string
    pub version: String,
    /// Default field profile used when a search supplies neither
    /// explicit fields nor a profile
    pub profile: FieldProfile,
    /// Default event window start (provider-understood token)
    pub since: String,
    /// Default event window length in days, counted from today
    pub days: i64,
}

impl ExplorerConfig {
    /// Create a configuration for the given application id, with all
    /// other settings at their defaults.
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            app_id: env::var("GRAPH_APP_ID").unwrap_or_default(),
            version: env::var("GRAPH_API_VERSION")
                .unwrap_or_else(|_| DEFAULT_API_VERSION.to_string()),
            profile: env::var("GRAPH_DEFAULT_PROFILE")
                .map(|v| FieldProfile::parse(&v))
                .unwrap_or_default(),
            since: env::var("GRAPH_EVENT_WINDOW_SINCE").unwrap_or_else(|_| "now".to_string()),
            days: env::var("GRAPH_EVENT_WINDOW_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.app_id.is_empty() {
            return Err("app id must not be empty".to_string());
        }
        if self.version.is_empty() {
            return Err("API version must not be empty".to_string());
        }
        if self.days <= 0 {
            return Err("event window must be at least one day".to_string());
        }
        Ok(())
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            version: DEFAULT_API_VERSION.to_string(),
            profile: FieldProfile::Brief,
            since: "now".to_string(),
            days: 30,
        }
    }
}

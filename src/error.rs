// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for graph search operations

use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by search operations.
///
/// There are no retries anywhere: a failed page fetch fails the whole
/// pagination pass, and results accumulated before the failure are
/// discarded.
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// The graph API returned an `error` object; the payload is passed
    /// through unchanged.
    #[error("graph API error: {payload}")]
    Provider {
        /// Raw error object from the provider
        payload: Value,
    },

    /// The readiness gate resolved to a non-connected auth status.
    /// All searches fail with this until the explorer is re-initialized.
    #[error("session is not connected")]
    NotConnected,

    /// An HTTP request exceeded the client timeout
    #[error("request timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// HTTP-level failure without a decodable graph error body
    #[error("graph API HTTP error: {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or transport detail
        message: String,
    },

    /// Connection or request construction failure below the HTTP layer
    #[error("transport error: {message}")]
    Transport {
        /// Underlying error description
        message: String,
    },

    /// The provider responded with a body this client cannot decode
    #[error("invalid response: {reason}")]
    InvalidResponse {
        /// Why decoding failed
        reason: String,
    },
}

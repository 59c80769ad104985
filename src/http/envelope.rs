// Copyright 2025 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use serde::Serialize;

/// JSON-RPC protocol version spoken by factomd.
pub const JSON_RPC_VERSION: &str = "2.0";

/// Request id placed in every envelope when ids are static.
pub const STATIC_REQUEST_ID: u64 = 0;

/// Content type factomd expects on the request body.
pub const HEADER_CONTENT_TYPE: &str = "text/plain";

/// Bare error page factomd serves instead of JSON on some failures.
pub const BLANK_PAGE_ERROR: &str = "Page not found";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// The `{jsonrpc, id, method, params}` wrapper sent to factomd.
#[derive(Debug, Serialize)]
pub struct RequestEnvelope<'a, P> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: &'a P,
}

impl<'a, P: Serialize> RequestEnvelope<'a, P> {
    pub fn new(id: u64, method: &'a str, params: &'a P) -> Self {
        Self {
            jsonrpc: JSON_RPC_VERSION,
            id,
            method,
            params,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

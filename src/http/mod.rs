//! JSON-RPC client module for factomd communication.
//!
//! This module provides everything needed to talk to a Factom node over its
//! v2 JSON-RPC API: validated connection settings, request envelope
//! construction, per-call transport options, response classification and a
//! small typed client for common queries.
//!
//! # Architecture
//!
//! - [`FactomApiAdapter`] - Low-level adapter: one call, one request, one
//!   decoded (or raw) body
//! - [`FactomdClient`] - Typed helpers on top of the adapter that unwrap the
//!   JSON-RPC `result` / `error` members
//! - [`AdapterConfig`] - Validated host, TLS certificate, credentials and timeout
//! - [`TransportOptions`] / [`TransportOverrides`] - Per-call transport settings
//!   and the caller's replacements for them
//! - [`FactomApiError`] - Error types for configuration and call failures
//!
//! # Example
//!
//! ```rust,no_run
//! use factom_api::http::{FactomApiAdapter, TransportOverrides};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), anyhow::Error> {
//! let adapter = FactomApiAdapter::new("http://localhost:8088/v2", None, None, None)?;
//!
//! let raw = adapter
//!     .call("heights", "POST", &json!({}), TransportOverrides::default(), false)
//!     .await?;
//! println!("{}", raw.as_raw().unwrap_or_default());
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Construction fails with configuration or environment errors and never
//! yields a half-configured adapter. Call errors always name the JSON-RPC
//! method that failed and leave the adapter usable:
//!
//! - Unsupported HTTP verbs (rejected before any network activity)
//! - Transport failures (connection refused, timeouts, TLS errors)
//! - The bare `Page not found` page factomd serves instead of JSON
//! - Empty bodies
//! - Bodies that are not valid JSON when decoding was requested

mod adapter;
mod adapter_config;
mod envelope;
mod error;
mod factomd_client;
mod transport;
mod types;

pub use adapter::FactomApiAdapter;
pub use adapter_config::{AdapterConfig, Credentials, RequestIdMode};
pub use envelope::{
    BLANK_PAGE_ERROR, DEFAULT_TIMEOUT_SECS, HEADER_CONTENT_TYPE, JSON_RPC_VERSION, RequestEnvelope,
    STATIC_REQUEST_ID,
};
pub use error::{FactomApiError, FactomApiResult};
pub use factomd_client::FactomdClient;
pub use transport::{HttpMethod, TransportOptions, TransportOverrides, UnsupportedMethod};
pub use types::{
    CallResult, ChainHeadResponse, DirectoryBlockHeadResponse, EntryBlockHeader, EntryBlockItem, EntryBlockResponse,
    EntryResponse, HeightsResponse, JsonRpcError, JsonRpcResponse, PropertiesResponse, TransactionResponse,
};

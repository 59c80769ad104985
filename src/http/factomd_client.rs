//! High-level client for common factomd v2 queries.
//!
//! This module provides the [`FactomdClient`] struct, which wraps a
//! [`FactomApiAdapter`] and decodes the JSON-RPC response wrapper into typed
//! results for a handful of frequently used methods:
//!
//! - Node status (`heights`, `properties`)
//! - Chain and block lookups (`chain-head`, `directory-block-head`, `entry-block`)
//! - Entry and transaction lookups (`entry`, `transaction`)
//!
//! Anything else can be reached through [`FactomdClient::adapter`].
//!
//! # Example
//!
//! ```rust,no_run
//! use factom_api::http::{FactomApiAdapter, FactomdClient};
//!
//! # async fn example() -> Result<(), anyhow::Error> {
//! let adapter = FactomApiAdapter::new("http://localhost:8088/v2", None, None, None)?;
//! let client = FactomdClient::new(adapter);
//!
//! if client.is_online().await {
//!     let heights = client.heights().await?;
//!     println!("Leader height: {}", heights.leaderheight);
//! }
//! # Ok(())
//! # }
//! ```

use log::{debug, warn};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::json;

use super::adapter::FactomApiAdapter;
use super::error::{FactomApiError, FactomApiResult};
use super::types::{
    ChainHeadResponse, DirectoryBlockHeadResponse, EntryBlockResponse, EntryResponse, HeightsResponse,
    JsonRpcResponse, PropertiesResponse, TransactionResponse,
};

/// Typed factomd client built on top of a [`FactomApiAdapter`].
///
/// All requests are sent as `POST` with the adapter's configured transport
/// settings.
pub struct FactomdClient {
    adapter: FactomApiAdapter,
}

impl FactomdClient {
    pub fn new(adapter: FactomApiAdapter) -> Self {
        Self { adapter }
    }

    /// The underlying adapter, for methods without a typed helper.
    pub fn adapter(&self) -> &FactomApiAdapter {
        &self.adapter
    }

    /// Returns the address of the node as configured.
    pub fn get_address(&self) -> String {
        crate::logging::redact_url(self.adapter.config().host())
    }

    /// Retrieves the current block heights known to the node.
    pub async fn heights(&self) -> FactomApiResult<HeightsResponse> {
        debug!("Factom API: requesting heights");
        self.request("heights", &json!({})).await
    }

    /// Retrieves the factomd and API versions.
    pub async fn properties(&self) -> FactomApiResult<PropertiesResponse> {
        self.request("properties", &json!({})).await
    }

    /// Checks if the node is reachable and answering JSON-RPC.
    ///
    /// Returns `true` if a `properties` call succeeds, `false` otherwise.
    pub async fn is_online(&self) -> bool {
        match self.properties().await {
            Ok(properties) => {
                debug!(version = &*properties.factomdversion; "Factom node is online");
                true
            },
            Err(e) => {
                warn!(
                    error:% = e;
                    "Factom node is offline"
                );
                false
            },
        }
    }

    /// Retrieves the key merkle root of the most recent directory block.
    pub async fn directory_block_head(&self) -> FactomApiResult<DirectoryBlockHeadResponse> {
        self.request("directory-block-head", &json!({})).await
    }

    /// Retrieves the latest entry block key merkle root of a chain.
    ///
    /// # Arguments
    ///
    /// * `chain_id` - hex encoded chain id
    pub async fn chain_head(&self, chain_id: &str) -> FactomApiResult<ChainHeadResponse> {
        debug!(chain_id = chain_id; "Factom API: requesting chain head");
        self.request("chain-head", &json!({ "chainid": chain_id })).await
    }

    /// Retrieves an entry by hash.
    pub async fn entry(&self, hash: &str) -> FactomApiResult<EntryResponse> {
        self.request("entry", &json!({ "hash": hash })).await
    }

    /// Retrieves an entry block by key merkle root.
    pub async fn entry_block(&self, key_mr: &str) -> FactomApiResult<EntryBlockResponse> {
        self.request("entry-block", &json!({ "keymr": key_mr })).await
    }

    /// Retrieves a factoid transaction or entry by hash.
    pub async fn transaction(&self, hash: &str) -> FactomApiResult<TransactionResponse> {
        self.request("transaction", &json!({ "hash": hash })).await
    }

    async fn request<T: DeserializeOwned, P: Serialize>(&self, action: &str, params: &P) -> FactomApiResult<T> {
        let response: JsonRpcResponse<T> = self.adapter.call_as(action, params).await?;
        unwrap_response(action, response)
    }
}

fn unwrap_response<T>(action: &str, response: JsonRpcResponse<T>) -> FactomApiResult<T> {
    if let Some(error) = response.error {
        warn!(
            action = action,
            code = error.code;
            "Factom API: node returned an error"
        );
        return Err(FactomApiError::Node {
            action: action.to_string(),
            code: error.code,
            message: error.message,
        });
    }

    response.result.ok_or_else(|| FactomApiError::Node {
        action: action.to_string(),
        code: 0,
        message: "Response carried neither a result nor an error".to_string(),
    })
}

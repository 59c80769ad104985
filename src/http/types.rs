// Copyright 2025 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of [`FactomApiAdapter::call`](super::FactomApiAdapter::call).
#[derive(Debug, Clone, PartialEq)]
pub enum CallResult {
    /// The body decoded as JSON.
    Object(Value),
    /// The body exactly as received.
    Raw(String),
}

impl CallResult {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            CallResult::Object(value) => Some(value),
            CallResult::Raw(_) => None,
        }
    }

    pub fn as_raw(&self) -> Option<&str> {
        match self {
            CallResult::Object(_) => None,
            CallResult::Raw(body) => Some(body),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRpcResponse<T> {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    pub result: Option<T>,
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightsResponse {
    pub directoryblockheight: u64,
    pub leaderheight: u64,
    pub entryblockheight: u64,
    pub entryheight: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertiesResponse {
    pub factomdversion: String,
    pub factomdapiversion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainHeadResponse {
    pub chainhead: String,
    #[serde(default)]
    pub chaininprocesslist: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryBlockHeadResponse {
    pub keymr: String,
}

/// An entry as returned by factomd. `content` and `extids` are hex encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryResponse {
    pub chainid: String,
    pub content: String,
    #[serde(default)]
    pub extids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryBlockHeader {
    pub blocksequencenumber: u64,
    pub chainid: String,
    pub prevkeymr: String,
    pub timestamp: u64,
    pub dbheight: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryBlockItem {
    pub entryhash: String,
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryBlockResponse {
    pub header: EntryBlockHeader,
    #[serde(default)]
    pub entrylist: Vec<EntryBlockItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionResponse {
    #[serde(default)]
    pub factoidtransaction: Option<Value>,
    #[serde(default)]
    pub entry: Option<Value>,
    #[serde(default)]
    pub includedintransactionblock: Option<String>,
    #[serde(default)]
    pub includedindirectoryblock: Option<String>,
    #[serde(default)]
    pub includedindirectoryblockheight: Option<i64>,
}

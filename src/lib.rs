pub mod cli;
pub mod config;
pub mod http;
pub mod logging;

pub use crate::http::{CallResult, FactomApiAdapter, FactomApiError, FactomdClient, TransportOverrides};

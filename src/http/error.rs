//! Error types for Factom API adapter operations.
//!
//! This module defines the [`FactomApiError`] enum which encompasses all
//! possible failure modes when configuring the adapter or calling a factomd
//! JSON-RPC endpoint.

use thiserror::Error;

/// Errors that can occur while building or using a [`FactomApiAdapter`](super::FactomApiAdapter).
///
/// # Error Categories
///
/// - **Construction errors**: [`Configuration`](FactomApiError::Configuration),
///   [`Environment`](FactomApiError::Environment). The adapter is never
///   created when one of these is returned.
/// - **Call errors**: [`InvalidMethod`](FactomApiError::InvalidMethod),
///   [`Call`](FactomApiError::Call), [`EmptyResponse`](FactomApiError::EmptyResponse),
///   [`Decode`](FactomApiError::Decode), [`Encode`](FactomApiError::Encode),
///   [`Node`](FactomApiError::Node).
///   These are scoped to a single call; the adapter stays usable.
///
/// # Example
///
/// ```rust,no_run
/// use factom_api::http::FactomApiError;
///
/// fn handle_error(err: FactomApiError) {
///     match err {
///         FactomApiError::Call { action, message } => {
///             eprintln!("{} failed: {}", action, message);
///         }
///         FactomApiError::Configuration(reason) => {
///             eprintln!("Bad adapter settings: {}", reason);
///         }
///         _ => eprintln!("Other error: {}", err),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum FactomApiError {
    /// The adapter was constructed with invalid arguments.
    ///
    /// Missing host, a certificate combined with a plain `http` host, a
    /// certificate path that does not exist, or a username without a
    /// password (and vice versa).
    #[error("Invalid Factom API configuration: {0}")]
    Configuration(String),

    /// The HTTP transport could not be initialised in this environment.
    #[error("HTTP transport unavailable: {0}")]
    Environment(String),

    /// The requested HTTP verb is neither `GET` nor `POST`.
    #[error("Supplied method \"{method}\" for \"{action}\" must match GET or POST")]
    InvalidMethod {
        /// The JSON-RPC method that was being called.
        action: String,
        /// The rejected HTTP verb, as supplied.
        method: String,
    },

    /// The request failed at the transport level, or the node answered
    /// with the blank-page sentinel instead of JSON.
    #[error("Received error \"{message}\" when hitting \"{action}\" within the Factom API")]
    Call {
        /// The JSON-RPC method that was being called.
        action: String,
        /// The underlying transport error text.
        message: String,
    },

    /// The request succeeded but the node returned an empty body.
    #[error("Received an empty response when hitting \"{action}\" within the Factom API")]
    EmptyResponse {
        /// The JSON-RPC method that was being called.
        action: String,
    },

    /// Structured decoding was requested but the body is not valid JSON
    /// (or does not match the requested type).
    #[error("Could not decode the response of \"{action}\": {source}")]
    Decode {
        /// The JSON-RPC method that was being called.
        action: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request envelope could not be serialized.
    #[error("Could not encode the request envelope of \"{action}\": {source}")]
    Encode {
        action: String,
        #[source]
        source: serde_json::Error,
    },

    /// The node answered with a JSON-RPC error object.
    #[error("Factom node returned error {code} for \"{action}\": {message}")]
    Node {
        /// The JSON-RPC method that was being called.
        action: String,
        /// JSON-RPC error code reported by factomd.
        code: i64,
        /// Human readable error message reported by factomd.
        message: String,
    },
}

impl FactomApiError {
    /// Returns `true` for failures of the request itself: transport errors,
    /// the blank-page sentinel and empty responses.
    pub fn is_call_error(&self) -> bool {
        matches!(self, FactomApiError::Call { .. } | FactomApiError::EmptyResponse { .. })
    }

    /// The action name carried by call-scoped errors.
    pub fn action(&self) -> Option<&str> {
        match self {
            FactomApiError::InvalidMethod { action, .. }
            | FactomApiError::Call { action, .. }
            | FactomApiError::EmptyResponse { action }
            | FactomApiError::Encode { action, .. }
            | FactomApiError::Decode { action, .. }
            | FactomApiError::Node { action, .. } => Some(action),
            _ => None,
        }
    }
}

pub type FactomApiResult<T> = Result<T, FactomApiError>;

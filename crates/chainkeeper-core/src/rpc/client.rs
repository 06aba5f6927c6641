//! Minimal blocking JSON-RPC client for an Ethereum node.
//!
//! Reads go through `eth_call`; writes through `eth_sendTransaction` with a
//! configured sender, leaving gas, nonces and signing to the node. Every
//! call is a synchronous round trip.

use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, trace};

use crate::address::Address;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("node returned error {code}: {message}")]
    Node { code: i64, message: String },
    #[error("malformed response: {0}")]
    Malformed(String),
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// Blocking JSON-RPC 2.0 client.
pub struct JsonRpcClient {
    http: reqwest::blocking::Client,
    url: String,
}

impl JsonRpcClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue a raw JSON-RPC call and return its `result`.
    pub fn call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        trace!(method, %params, "rpc request");
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let response: RpcResponse = self
            .http
            .post(&self.url)
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;
        if let Some(error) = response.error {
            return Err(RpcError::Node {
                code: error.code,
                message: error.message,
            });
        }
        response
            .result
            .ok_or_else(|| RpcError::Malformed("response missing result".to_string()))
    }

    /// `eth_call` against `to` with ABI-encoded calldata; returns the
    /// decoded return bytes.
    pub fn eth_call(&self, to: &Address, data: &[u8]) -> Result<Vec<u8>, RpcError> {
        let result = self.call(
            "eth_call",
            json!([{ "to": to.as_str(), "data": hex_prefixed(data) }, "latest"]),
        )?;
        decode_hex_value(&result)
    }

    /// `eth_sendTransaction` from the configured sender; returns the
    /// transaction hash reported by the node.
    pub fn send_transaction(
        &self,
        from: &Address,
        to: &Address,
        data: &[u8],
    ) -> Result<String, RpcError> {
        let result = self.call(
            "eth_sendTransaction",
            json!([{ "from": from.as_str(), "to": to.as_str(), "data": hex_prefixed(data) }]),
        )?;
        let tx_hash = result
            .as_str()
            .ok_or_else(|| RpcError::Malformed("transaction hash is not a string".to_string()))?
            .to_string();
        debug!(tx_hash, "transaction submitted");
        Ok(tx_hash)
    }
}

fn hex_prefixed(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

fn decode_hex_value(value: &Value) -> Result<Vec<u8>, RpcError> {
    let text = value
        .as_str()
        .ok_or_else(|| RpcError::Malformed("call result is not a string".to_string()))?;
    let stripped = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(stripped).map_err(|e| RpcError::Malformed(format!("call result is not hex: {e}")))
}

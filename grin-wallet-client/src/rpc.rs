//! JSON-RPC 2.0 envelope types of the wallet owner API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Error;

#[derive(Debug, Serialize)]
pub(crate) struct RpcRequest<'a, P> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: P,
}

impl<'a, P: Serialize> RpcRequest<'a, P> {
    pub(crate) fn new(id: u64, method: &'a str, params: P) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

/// Wire format of one encrypted RPC call (and of its response payload).
///
/// `nonce` is hex; `body_enc` is base64 of `ciphertext ‖ tag`. The nonce
/// must be freshly random per call, reuse under the same shared secret
/// voids the cipher's confidentiality guarantees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedEnvelope {
    /// Hex-encoded 12-byte nonce.
    pub nonce: String,
    /// Base64-encoded ciphertext with the trailing authentication tag.
    pub body_enc: String,
}

/// The wallet's externally tagged result variant, decoded once at the
/// transport boundary and never passed on as untyped data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RpcResult {
    /// The call succeeded; the payload is method-specific.
    Ok(Value),
    /// The wallet processed the call but declined it.
    Err(Value),
}

#[derive(Debug, Deserialize)]
pub(crate) struct RpcResponse {
    #[serde(default)]
    result: Option<RpcResult>,
    #[serde(default)]
    error: Option<Value>,
}

impl RpcResponse {
    /// Collapses the response into the `Ok` payload or the matching error.
    pub(crate) fn into_result(self) -> Result<Value, Error> {
        if let Some(error) = self.error {
            return Err(Error::Rpc(error));
        }
        match self.result {
            Some(RpcResult::Ok(value)) => Ok(value),
            Some(RpcResult::Err(value)) => Err(Error::Declined(value)),
            None => Err(Error::Protocol(
                "response carries neither result nor error".into(),
            )),
        }
    }
}

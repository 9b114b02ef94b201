use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::{json, Value};
use wsp_types::ObjectId;

use crate::error::{LedgerError, LedgerResult};
use crate::object::{LedgerObject, ObjectContent};
use crate::traits::LedgerClient;

const MULTI_GET_OBJECTS: &str = "sui_multiGetObjects";

/// Sui full node JSON-RPC client.
pub struct SuiRpcClient {
    url: String,
    client: reqwest::Client,
    next_id: AtomicU64,
}

impl SuiRpcClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, reqwest::Client::new())
    }

    /// Use a preconfigured HTTP client (timeouts, proxies).
    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call<T: serde::de::DeserializeOwned>(&self, method: &str, params: Value) -> LedgerResult<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        tracing::debug!(method, id, url = %self.url, "ledger RPC call");

        let response = self.client.post(&self.url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LedgerError::HttpStatus(status.as_u16()));
        }
        let envelope: RpcEnvelope<T> = response.json().await?;
        if let Some(err) = envelope.error {
            return Err(LedgerError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        envelope
            .result
            .ok_or_else(|| LedgerError::InvalidResponse("missing result".into()))
    }
}

#[async_trait]
impl LedgerClient for SuiRpcClient {
    async fn multi_get_objects(&self, ids: &[ObjectId]) -> LedgerResult<Vec<Option<LedgerObject>>> {
        let id_strings: Vec<String> = ids.iter().map(ObjectId::to_hex).collect();
        let params = json!([id_strings, { "showBcs": true, "showDisplay": true }]);
        let items: Vec<RpcObjectResponse> = self.call(MULTI_GET_OBJECTS, params).await?;
        if items.len() != ids.len() {
            return Err(LedgerError::LengthMismatch {
                expected: ids.len(),
                actual: items.len(),
            });
        }
        items.into_iter().map(RpcObjectResponse::into_object).collect()
    }
}

#[derive(Deserialize)]
struct RpcEnvelope<T> {
    result: Option<T>,
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// One entry of a `sui_multiGetObjects` result: either `data` or `error`.
#[derive(Deserialize)]
struct RpcObjectResponse {
    data: Option<RpcObjectData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcObjectData {
    object_id: String,
    display: Option<RpcDisplay>,
    bcs: Option<RpcRawData>,
}

#[derive(Deserialize)]
struct RpcDisplay {
    data: Option<BTreeMap<String, Value>>,
}

#[derive(Deserialize)]
#[serde(tag = "dataType")]
enum RpcRawData {
    #[serde(rename = "moveObject")]
    MoveObject {
        #[serde(rename = "type")]
        type_tag: String,
        #[serde(rename = "bcsBytes")]
        bcs_bytes: String,
    },
    #[serde(other)]
    Other,
}

impl RpcObjectResponse {
    fn into_object(self) -> LedgerResult<Option<LedgerObject>> {
        let Some(data) = self.data else {
            return Ok(None);
        };
        let object_id = ObjectId::from_hex(&data.object_id)
            .map_err(|e| LedgerError::InvalidResponse(format!("object id: {e}")))?;

        // Display values are strings by convention; anything else is dropped.
        let display = data
            .display
            .and_then(|d| d.data)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(k, v)| match v {
                Value::String(s) => Some((k, s)),
                _ => None,
            })
            .collect();

        let content = match data.bcs {
            None => None,
            Some(RpcRawData::Other) => Some(ObjectContent::Other),
            Some(RpcRawData::MoveObject { type_tag, bcs_bytes }) => {
                let bcs_bytes = STANDARD
                    .decode(bcs_bytes)
                    .map_err(|e| LedgerError::InvalidResponse(format!("bcsBytes: {e}")))?;
                Some(ObjectContent::MoveObject { type_tag, bcs_bytes })
            }
        };

        Ok(Some(LedgerObject {
            object_id,
            display,
            content,
        }))
    }
}

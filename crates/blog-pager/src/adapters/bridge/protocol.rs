use serde::{Deserialize, Serialize};

use crate::core::{
    search::SearchState,
    types::{Control, DescriptorInput, Intent, PagingDescriptor},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BridgeRequest {
    pub v: u32,
    pub id: String,
    pub cmd: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct BridgeResponse<T> {
    pub v: u32,
    pub id: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

impl<T> BridgeResponse<T> {
    pub fn ok(v: u32, id: String, data: T) -> Self {
        Self {
            v,
            id,
            status: "ok",
            data: Some(data),
            error: None,
            code: None,
        }
    }

    pub fn err(v: u32, id: String, code: &'static str, error: String) -> Self {
        Self {
            v,
            id,
            status: "error",
            data: None,
            error: Some(error),
            code: Some(code),
        }
    }
}

// Payloads

#[derive(Debug, Deserialize)]
pub struct ClickPayload {
    #[serde(flatten)]
    pub descriptor: DescriptorInput,
    pub control: Control,
}

#[derive(Debug, Deserialize)]
pub struct SelectLimitPayload {
    #[serde(flatten)]
    pub descriptor: DescriptorInput,
    pub limit: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParsePayload {
    pub query_string: String,
    #[serde(default)]
    pub total_items: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchApplyPayload {
    #[serde(default)]
    pub intent: Option<Intent>,
    /// New search text; an empty string clears the query.
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub username: String,
    pub token: String,
}

// Response data

#[derive(Debug, Serialize)]
pub struct ClickResult {
    pub intent: Intent,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub state: SearchState,
    pub query_string: String,
    pub offset: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<PagingDescriptor>,
}

impl SearchResult {
    pub fn new(state: SearchState, descriptor: Option<PagingDescriptor>) -> Self {
        Self {
            query_string: state.to_query_string(),
            offset: state.offset(),
            state,
            descriptor,
        }
    }
}

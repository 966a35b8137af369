// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of EdgeProv.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! JSON-RPC 2.0 envelopes and the request payloads of the Edge configuration API

use edgeprov_types::Property;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::errors::{RpcError, RpcResult};

pub const JSONRPC_VERSION: &str = "2.0";

#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub id: String,
    pub method: String,
    pub params: Value,
}

impl JsonRpcRequest {
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: Uuid::new_v4().to_string(),
            method: method.into(),
            params,
        }
    }

    /// Wrap `self` for the backend bridge, which forwards it to `edge_id`
    pub fn into_edge_rpc(self, edge_id: &str) -> RpcResult<Self> {
        let params = serde_json::to_value(EdgeRpcParams {
            edge_id,
            payload: &self,
        })
        .map_err(|e| RpcError::InvalidResponse(format!("Failed to encode edgeRpc payload: {e}")))?;
        Ok(Self::new("edgeRpc", params))
    }

    /// Wrap `self` for a component's own JSON API (e.g. `_appManager`)
    pub fn into_component_json_api(self, component_id: &str) -> RpcResult<Self> {
        let params = serde_json::to_value(ComponentJsonApiParams {
            component_id,
            payload: &self,
        })
        .map_err(|e| {
            RpcError::InvalidResponse(format!("Failed to encode componentJsonApi payload: {e}"))
        })?;
        Ok(Self::new("componentJsonApi", params))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcErrorObject>,
}

impl JsonRpcResponse {
    pub fn into_result(self) -> RpcResult<Value> {
        if let Some(error) = self.error {
            return Err(RpcError::JsonRpc {
                code: error.code,
                message: error.message,
            });
        }
        self.result.ok_or_else(|| {
            RpcError::InvalidResponse("response has neither result nor error".to_owned())
        })
    }

    /// Result of a request that went through `edgeRpc`
    pub fn into_edge_rpc_result(self) -> RpcResult<Value> {
        let mut result = self.into_result()?;
        let payload = result.get_mut("payload").map(Value::take).ok_or_else(|| {
            RpcError::InvalidResponse("edgeRpc response without payload".to_owned())
        })?;
        let inner: Self = serde_json::from_value(payload)
            .map_err(|e| RpcError::InvalidResponse(format!("malformed edgeRpc payload: {e}")))?;
        inner.into_result()
    }
}

// ============= Request payloads =============

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EdgeRpcParams<'a> {
    edge_id: &'a str,
    payload: &'a JsonRpcRequest,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ComponentJsonApiParams<'a> {
    component_id: &'a str,
    payload: &'a JsonRpcRequest,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComponentConfigParams<'a> {
    pub factory_pid: &'a str,
    pub properties: &'a [Property],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComponentConfigParams<'a> {
    pub component_id: &'a str,
    pub properties: &'a [Property],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteComponentConfigParams<'a> {
    pub component_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddAppInstanceParams<'a> {
    pub app_id: &'a str,
    pub alias: &'a str,
    pub key: &'a str,
    pub properties: &'a Map<String, Value>,
}

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

use crate::errors::{RpcError, RpcResult};
use crate::types::{
    AddAppInstanceParams, CreateComponentConfigParams, DeleteComponentConfigParams,
    JsonRpcRequest, JsonRpcResponse, UpdateComponentConfigParams,
};
use edgeprov_types::{ConfigSnapshot, Property};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, info, trace, warn};

/// Component id of the Edge app manager
pub const APP_MANAGER_ID: &str = "_appManager";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// JSON-RPC client for the Edge configuration API
#[derive(Clone)]
pub struct EdgeRpcClient {
    base_url: String,
    username: String,
    password: String,
    edge_id: Option<String>,
    client: Client,
    max_retries: u32,
    retry_delay: Duration,
}

impl EdgeRpcClient {
    /// Create a client talking to `{base_url}/jsonrpc` with HTTP Basic auth
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> RpcResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            return Err(RpcError::ConfigError("Edge base URL is empty".to_owned()));
        }

        Ok(Self {
            base_url,
            username: username.into(),
            password: password.into(),
            edge_id: None,
            client: build_http_client(DEFAULT_TIMEOUT)?,
            max_retries: 3,
            retry_delay: Duration::from_millis(500),
        })
    }

    /// Route every request through the backend bridge to the given Edge
    pub fn with_edge_id(mut self, edge_id: impl Into<String>) -> Self {
        self.edge_id = Some(edge_id.into());
        self
    }

    /// Set custom retry configuration
    pub fn with_retry_config(mut self, max_retries: u32, retry_delay: Duration) -> Self {
        self.max_retries = max_retries.max(1);
        self.retry_delay = retry_delay;
        self
    }

    /// Per-request timeout (10 s by default)
    pub fn with_timeout(mut self, timeout: Duration) -> RpcResult<Self> {
        self.client = build_http_client(timeout)?;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn edge_id(&self) -> Option<&str> {
        self.edge_id.as_deref()
    }

    /// Send one JSON-RPC request and return its `result`
    pub async fn send_request(&self, method: &str, params: Value) -> RpcResult<Value> {
        let url = format!("{}/jsonrpc", self.base_url);
        let mut request = JsonRpcRequest::new(method, params);
        if let Some(edge_id) = &self.edge_id {
            request = request.into_edge_rpc(edge_id)?;
        }

        debug!("📡 [EDGE RPC] {} (request {})", method, request.id);
        trace!("   URL: {}", url);

        let response = self
            .retry_request(|| async {
                self.client
                    .post(&url)
                    .basic_auth(&self.username, Some(&self.password))
                    .json(&request)
                    .send()
                    .await
            })
            .await?;

        let body = match response.status() {
            StatusCode::OK => response.text().await?,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                error!("❌ [EDGE RPC] Authentication failed for: {}", method);
                return Err(RpcError::AuthenticationFailed);
            }
            status => {
                let message = response.text().await.unwrap_or_default();
                error!("❌ [EDGE RPC] Status {} for {}: {}", status, method, message);
                return Err(RpcError::ApiError {
                    status: status.as_u16(),
                    message,
                });
            }
        };

        let response: JsonRpcResponse = serde_json::from_str(&body)
            .map_err(|e| RpcError::InvalidResponse(format!("{method}: {e}")))?;
        let result = if self.edge_id.is_some() {
            response.into_edge_rpc_result()
        } else {
            response.into_result()
        };

        match &result {
            Ok(_) => debug!("✅ [EDGE RPC] {} succeeded", method),
            Err(e) => warn!("⚠️ [EDGE RPC] {} failed: {}", method, e),
        }
        result
    }

    async fn call<P: Serialize>(&self, method: &str, params: &P) -> RpcResult<Value> {
        let params = serde_json::to_value(params)
            .map_err(|e| RpcError::InvalidResponse(format!("Failed to encode {method}: {e}")))?;
        self.send_request(method, params).await
    }

    /// Current component configuration of the Edge
    pub async fn get_edge_config(&self) -> RpcResult<ConfigSnapshot> {
        let result = self.send_request("getEdgeConfig", json!({})).await?;
        let snapshot: ConfigSnapshot = serde_json::from_value(result)
            .map_err(|e| RpcError::InvalidResponse(format!("getEdgeConfig: {e}")))?;
        debug!("📥 [EDGE RPC] Edge config has {} components", snapshot.len());
        Ok(snapshot)
    }

    pub async fn create_component_config(
        &self,
        factory_pid: &str,
        properties: &[Property],
    ) -> RpcResult<()> {
        info!(
            "📦 [EDGE RPC] createComponentConfig {} ({} properties)",
            factory_pid,
            properties.len()
        );
        self.call(
            "createComponentConfig",
            &CreateComponentConfigParams {
                factory_pid,
                properties,
            },
        )
        .await
        .map(|_| ())
    }

    pub async fn update_component_config(
        &self,
        component_id: &str,
        properties: &[Property],
    ) -> RpcResult<()> {
        info!("✏️ [EDGE RPC] updateComponentConfig {}", component_id);
        self.call(
            "updateComponentConfig",
            &UpdateComponentConfigParams {
                component_id,
                properties,
            },
        )
        .await
        .map(|_| ())
    }

    pub async fn delete_component_config(&self, component_id: &str) -> RpcResult<()> {
        info!("🗑️ [EDGE RPC] deleteComponentConfig {}", component_id);
        self.call(
            "deleteComponentConfig",
            &DeleteComponentConfigParams { component_id },
        )
        .await
        .map(|_| ())
    }

    /// Install an app through the Edge app manager
    pub async fn add_app_instance(
        &self,
        app_id: &str,
        alias: &str,
        key: &str,
        properties: &Map<String, Value>,
    ) -> RpcResult<Value> {
        info!("📲 [EDGE RPC] addAppInstance {} ('{}')", app_id, alias);
        let params = serde_json::to_value(AddAppInstanceParams {
            app_id,
            alias,
            key,
            properties,
        })
        .map_err(|e| RpcError::InvalidResponse(format!("Failed to encode addAppInstance: {e}")))?;
        let request =
            JsonRpcRequest::new("addAppInstance", params).into_component_json_api(APP_MANAGER_ID)?;
        self.send_request(&request.method, request.params).await
    }

    /// Health check - the Edge answers getEdgeConfig
    pub async fn ping(&self) -> RpcResult<bool> {
        debug!("Performing health check");
        match self.send_request("getEdgeConfig", json!({})).await {
            Ok(_) => {
                debug!("Health check passed");
                Ok(true)
            }
            Err(e) => {
                warn!("Health check failed: {}", e);
                Ok(false)
            }
        }
    }

    /// Retry on transport errors with exponential backoff
    async fn retry_request<F, Fut>(&self, mut request_fn: F) -> RpcResult<reqwest::Response>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
    {
        let mut attempts = 0;
        let mut delay = self.retry_delay;

        loop {
            attempts += 1;
            match request_fn().await {
                Ok(response) => return Ok(response),
                // Past the connect stage the Edge may already have applied the write
                Err(e) if !e.is_connect() => {
                    error!("Request failed without retry: {}", e);
                    return Err(RpcError::HttpError(e));
                }
                Err(e) if attempts >= self.max_retries => {
                    error!("Request failed after {} attempts: {}", attempts, e);
                    return Err(RpcError::HttpError(e));
                }
                Err(e) => {
                    warn!(
                        "Request failed (attempt {}/{}): {}. Retrying in {:?}",
                        attempts, self.max_retries, e, delay
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }
}

fn build_http_client(timeout: Duration) -> RpcResult<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| RpcError::ConfigError(format!("Failed to build HTTP client: {e}")))
}

impl fmt::Debug for EdgeRpcClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeRpcClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("edge_id", &self.edge_id)
            .field("max_retries", &self.max_retries)
            .field("retry_delay", &self.retry_delay)
            .finish_non_exhaustive()
    }
}

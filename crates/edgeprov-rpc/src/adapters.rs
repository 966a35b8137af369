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

use anyhow::{Context, Result};
use async_trait::async_trait;
use edgeprov_core::{AppInstallStep, EdgeGateway, GatewayError, GatewayResult};
use edgeprov_types::{ConfigSnapshot, Property};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info};

use crate::client::EdgeRpcClient;

/// Edge JSON-RPC adapter implementing EdgeGateway
#[derive(Debug)]
pub struct EdgeRpcGateway {
    client: Arc<EdgeRpcClient>,
}

impl EdgeRpcGateway {
    pub fn new(client: Arc<EdgeRpcClient>) -> Self {
        Self { client }
    }

    /// Get reference to the underlying client (for app installs, health checks, etc.)
    pub fn client(&self) -> &Arc<EdgeRpcClient> {
        &self.client
    }
}

#[async_trait]
impl EdgeGateway for EdgeRpcGateway {
    async fn fetch_config_snapshot(&self) -> GatewayResult<ConfigSnapshot> {
        debug!("📥 [ADAPTER] Fetching edge config");
        Ok(self.client.get_edge_config().await?)
    }

    async fn create_component(
        &self,
        factory_id: &str,
        properties: &[Property],
    ) -> GatewayResult<()> {
        self.client
            .create_component_config(factory_id, properties)
            .await
            .map_err(GatewayError::from)
    }

    async fn delete_component(&self, component_id: &str) -> GatewayResult<()> {
        self.client
            .delete_component_config(component_id)
            .await
            .map_err(GatewayError::from)
    }

    async fn update_component(
        &self,
        component_id: &str,
        properties: &[Property],
    ) -> GatewayResult<()> {
        self.client
            .update_component_config(component_id, properties)
            .await
            .map_err(GatewayError::from)
    }
}

/// App install step that asks the Edge app manager to add an app instance
#[derive(Debug)]
pub struct AddAppInstanceStep {
    client: Arc<EdgeRpcClient>,
    name: String,
    app_id: String,
    alias: String,
    key: String,
    properties: Map<String, Value>,
}

impl AddAppInstanceStep {
    pub fn new(
        client: Arc<EdgeRpcClient>,
        app_id: impl Into<String>,
        alias: impl Into<String>,
    ) -> Self {
        let app_id = app_id.into();
        Self {
            client,
            name: app_id.clone(),
            app_id,
            alias: alias.into(),
            key: String::new(),
            properties: Map::new(),
        }
    }

    /// License key for apps that require one
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_properties(mut self, properties: Map<String, Value>) -> Self {
        self.properties = properties;
        self
    }
}

#[async_trait]
impl AppInstallStep for AddAppInstanceStep {
    fn name(&self) -> &str {
        &self.name
    }

    async fn install(&self) -> Result<()> {
        self.client
            .add_app_instance(&self.app_id, &self.alias, &self.key, &self.properties)
            .await
            .with_context(|| format!("Failed to install app {}", self.app_id))?;
        info!("✅ [ADAPTER] Installed app {} as '{}'", self.app_id, self.alias);
        Ok(())
    }
}

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

use anyhow::Result;
use async_trait::async_trait;
use edgeprov_types::{ConfigSnapshot, Property};

use crate::errors::GatewayResult;

// ============= Edge Gateway =============

/// Component configuration API of a remote Edge
/// Implementations carry their own transport; the configurator only sequences calls
#[async_trait]
pub trait EdgeGateway: Send + Sync {
    /// Read the current component configuration
    async fn fetch_config_snapshot(&self) -> GatewayResult<ConfigSnapshot>;

    /// Create a component of the given factory; the instance id travels as the `id` property
    async fn create_component(&self, factory_id: &str, properties: &[Property])
    -> GatewayResult<()>;

    /// Delete a component instance
    async fn delete_component(&self, component_id: &str) -> GatewayResult<()>;

    /// Overwrite the given properties of a component instance
    async fn update_component(&self, component_id: &str, properties: &[Property])
    -> GatewayResult<()>;
}

// ============= App Install Steps =============

/// Work delegated to the Edge app manager (installing an app creates its own components)
#[async_trait]
pub trait AppInstallStep: Send + Sync {
    /// Name shown in logs and errors
    fn name(&self) -> &str;

    async fn install(&self) -> Result<()>;
}

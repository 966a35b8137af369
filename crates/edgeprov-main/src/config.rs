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
use edgeprov_core::PacingConfig;
use edgeprov_types::{BaseMode, ConfigurationMode, ConfigurationObject, RequiredController};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

pub const DEFAULT_CONFIG_PATH: &str = "edgeprov.toml";

/// Provisioning plan and connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where and how to reach the Edge
    pub connection: ConnectionConfig,

    /// Spacing of configuration writes
    #[serde(default)]
    pub pacing: PacingSettings,

    /// Controllers that must end up in the Edge scheduler
    #[serde(default)]
    pub scheduler: SchedulerSettings,

    /// Components to provision, in order
    #[serde(default)]
    pub components: Vec<ConfigurationObject>,

    /// Apps installed through the Edge app manager after the components
    #[serde(default)]
    pub apps: Vec<AppInstallConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Edge (or backend) base URL, e.g. "http://192.168.1.10:80"
    pub base_url: String,

    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default = "default_password")]
    pub password: String,

    /// Route requests through the backend bridge to this Edge
    #[serde(default)]
    pub edge_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacingSettings {
    #[serde(default = "default_clear_delay_secs")]
    pub clear_delay_secs: u64,

    #[serde(default = "default_configure_delay_secs")]
    pub configure_delay_secs: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchedulerSettings {
    /// The Edge runs an app manager that maintains part of the scheduler itself
    #[serde(default)]
    pub app_manager_available: bool,

    #[serde(default)]
    pub required_controllers: Vec<RequiredController>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppInstallConfig {
    pub app_id: String,

    #[serde(default)]
    pub alias: String,

    /// License key, empty for free apps
    #[serde(default)]
    pub key: String,

    #[serde(default)]
    pub properties: Map<String, Value>,
}

fn default_username() -> String {
    "admin".to_owned()
}

fn default_password() -> String {
    "admin".to_owned()
}

fn default_clear_delay_secs() -> u64 {
    5
}

fn default_configure_delay_secs() -> u64 {
    15
}

impl Default for PacingSettings {
    fn default() -> Self {
        Self {
            clear_delay_secs: default_clear_delay_secs(),
            configure_delay_secs: default_configure_delay_secs(),
        }
    }
}

impl PacingSettings {
    pub fn to_pacing(&self) -> PacingConfig {
        PacingConfig::from_secs(self.clear_delay_secs, self.configure_delay_secs)
    }
}

impl AppConfig {
    /// Load a plan file, apply environment overrides and validate
    pub fn load(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config = Self::parse(&config_str)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        info!("✅ Loaded configuration from {}", path.display());

        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn parse(config_str: &str) -> Result<Self> {
        Ok(toml::from_str(config_str)?)
    }

    /// Override connection settings from `EDGEPROV_*` variables
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("EDGEPROV_BASE_URL") {
            self.connection.base_url = url;
        }
        if let Some(username) = lookup("EDGEPROV_USERNAME") {
            self.connection.username = username;
        }
        if let Some(password) = lookup("EDGEPROV_PASSWORD") {
            self.connection.password = password;
        }
        if let Some(edge_id) = lookup("EDGEPROV_EDGE_ID") {
            self.connection.edge_id = Some(edge_id).filter(|id| !id.is_empty());
        }
    }

    pub fn validate(&self) -> Result<()> {
        let base_url = self.connection.base_url.trim();
        if base_url.is_empty() {
            anyhow::bail!("connection.base_url cannot be empty");
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            anyhow::bail!(
                "connection.base_url must start with http:// or https:// (got '{}')",
                base_url
            );
        }

        let mut seen = HashSet::new();
        for (idx, component) in self.components.iter().enumerate() {
            if component.component_id.trim().is_empty() {
                anyhow::bail!("Component {} has empty component_id", idx);
            }
            if !seen.insert(component.component_id.as_str()) {
                anyhow::bail!(
                    "Component id '{}' is listed more than once",
                    component.component_id
                );
            }
            let created = component.mode == ConfigurationMode::RemoveAndConfigure
                && component.base_mode == BaseMode::Ui;
            if created && component.factory_id.trim().is_empty() {
                anyhow::bail!(
                    "Component '{}' has empty factory_id",
                    component.component_id
                );
            }
        }

        for controller in &self.scheduler.required_controllers {
            if controller.component_id.trim().is_empty() {
                anyhow::bail!("scheduler.required_controllers contains an empty component_id");
            }
        }

        for (idx, app) in self.apps.iter().enumerate() {
            if app.app_id.trim().is_empty() {
                anyhow::bail!("App {} has empty app_id", idx);
            }
        }

        Ok(())
    }
}

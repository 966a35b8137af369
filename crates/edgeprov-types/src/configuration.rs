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

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::property::{Property, PropertyValue};

// ============= Modes =============

/// Desired end state of a component on the Edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ConfigurationMode {
    /// Remove any existing instance, then create it with the given properties
    #[default]
    RemoveAndConfigure,
    /// Remove any existing instance and leave it absent
    RemoveOnly,
    /// Keep the instance and overwrite its properties (core components like `_power`)
    UpdateOnly,
}

impl ConfigurationMode {
    pub fn to_config_value(&self) -> &'static str {
        match self {
            Self::RemoveAndConfigure => "remove-and-configure",
            Self::RemoveOnly => "remove-only",
            Self::UpdateOnly => "update-only",
        }
    }
}

impl fmt::Display for ConfigurationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_config_value())
    }
}

/// Who is responsible for creating the component on the Edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BaseMode {
    /// Created by the configurator
    #[default]
    #[serde(rename = "ui")]
    Ui,
    /// Created by the Edge app manager while installing an app
    #[serde(rename = "created-by-app-manager")]
    AppManager,
}

impl fmt::Display for BaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ui => f.write_str("ui"),
            Self::AppManager => f.write_str("app-manager"),
        }
    }
}

// ============= Status =============

/// Per-object provisioning status
///
/// ```text
/// add() ──► Missing ◄──── clear ──── PreConfigured
///              │
///              ▼
///         Configuring ──► Configured | Error
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ConfigurationStatus {
    /// Not present on the Edge
    #[default]
    Missing,
    /// Already present on the Edge when the object was added
    PreConfigured,
    Configuring,
    Configured,
    Error,
}

impl fmt::Display for ConfigurationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Missing => "missing",
            Self::PreConfigured => "pre-configured",
            Self::Configuring => "configuring",
            Self::Configured => "configured",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

// ============= Configuration Object =============

/// One desired component on the Edge, the unit of work of a provisioning run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationObject {
    /// Factory id of the component type (e.g. "Bridge.Modbus.Serial")
    pub factory_id: String,

    /// Instance id, unique within one provisioning run (e.g. "modbus0")
    pub component_id: String,

    /// Display name, sent as the `alias` property
    pub alias: String,

    /// Component properties in the order they are sent
    #[serde(default)]
    pub properties: Vec<Property>,

    #[serde(default)]
    pub mode: ConfigurationMode,

    #[serde(default)]
    pub base_mode: BaseMode,

    /// Maintained by the configurator; never read from a plan
    #[serde(default, skip_deserializing)]
    pub status: ConfigurationStatus,
}

impl ConfigurationObject {
    pub fn new(
        factory_id: impl Into<String>,
        component_id: impl Into<String>,
        alias: impl Into<String>,
    ) -> Self {
        Self {
            factory_id: factory_id.into(),
            component_id: component_id.into(),
            alias: alias.into(),
            properties: Vec::new(),
            mode: ConfigurationMode::default(),
            base_mode: BaseMode::default(),
            status: ConfigurationStatus::default(),
        }
    }

    pub fn with_property(
        mut self,
        name: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Self {
        self.properties.push(Property::new(name, value));
        self
    }

    pub fn with_mode(mut self, mode: ConfigurationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_base_mode(mut self, base_mode: BaseMode) -> Self {
        self.base_mode = base_mode;
        self
    }

    /// Properties as sent to the Edge: `id` and `alias` first, then the
    /// object's own properties in order. Duplicate names are passed through.
    pub fn outgoing_properties(&self) -> Vec<Property> {
        let mut properties = Vec::with_capacity(self.properties.len() + 2);
        properties.push(Property::new("id", self.component_id.as_str()));
        properties.push(Property::new("alias", self.alias.as_str()));
        properties.extend(self.properties.iter().cloned());
        properties
    }

    /// Core components (`_power`, `_meta`, ...) exist on every Edge
    pub fn is_core_component(&self) -> bool {
        self.component_id.starts_with('_')
    }

    /// Whether the installer sees this object in the progress list
    pub fn is_visible_to_installer(&self) -> bool {
        self.mode != ConfigurationMode::RemoveOnly
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outgoing_properties_order() {
        let object = ConfigurationObject::new("GoodWe.Grid-Meter", "meter0", "Grid meter")
            .with_property("enabled", true)
            .with_property("modbus.id", "modbus1")
            .with_property("modbusUnitId", 247);

        let names: Vec<_> = object
            .outgoing_properties()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(
            names,
            vec!["id", "alias", "enabled", "modbus.id", "modbusUnitId"]
        );
        assert_eq!(
            object.outgoing_properties()[0].value,
            PropertyValue::String("meter0".to_owned())
        );
        assert_eq!(
            object.outgoing_properties()[1].value,
            PropertyValue::String("Grid meter".to_owned())
        );
    }

    #[test]
    fn test_duplicate_names_are_kept() {
        let object = ConfigurationObject::new("Ctrl.Balancing", "ctrlBalancing0", "Balancing")
            .with_property("alias", "Overridden");

        let props = object.outgoing_properties();
        assert_eq!(props.len(), 3);
        assert_eq!(props[1].name, "alias");
        assert_eq!(props[2].name, "alias");
    }

    #[test]
    fn test_defaults() {
        let object = ConfigurationObject::new("IO.KMtronic.4Port", "io0", "Relay board");
        assert_eq!(object.mode, ConfigurationMode::RemoveAndConfigure);
        assert_eq!(object.base_mode, BaseMode::Ui);
        assert_eq!(object.status, ConfigurationStatus::Missing);
        assert!(object.is_visible_to_installer());
        assert!(!object.is_core_component());
    }

    #[test]
    fn test_status_is_not_read_from_plan() {
        let object: ConfigurationObject = serde_json::from_str(
            r#"{
                "factory_id": "Core.Power",
                "component_id": "_power",
                "alias": "",
                "mode": "update-only",
                "status": "configured"
            }"#,
        )
        .unwrap();

        assert_eq!(object.status, ConfigurationStatus::Missing);
        assert_eq!(object.mode, ConfigurationMode::UpdateOnly);
        assert!(object.is_core_component());
    }

    #[test]
    fn test_base_mode_serde_names() {
        let mode: BaseMode = serde_json::from_str("\"created-by-app-manager\"").unwrap();
        assert_eq!(mode, BaseMode::AppManager);
        assert_eq!(serde_json::to_string(&BaseMode::Ui).unwrap(), "\"ui\"");
    }

    #[test]
    fn test_status_display_names() {
        assert_eq!(ConfigurationStatus::Configuring.to_string(), "configuring");
        assert_eq!(ConfigurationStatus::PreConfigured.to_string(), "pre-configured");
    }
}

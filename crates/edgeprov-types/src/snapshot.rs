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
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A component as reported by the Edge configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSnapshot {
    pub factory_id: String,

    #[serde(default)]
    pub alias: String,

    /// Raw property values; the Edge may report any JSON type here
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl ComponentSnapshot {
    pub fn new(factory_id: impl Into<String>) -> Self {
        Self {
            factory_id: factory_id.into(),
            alias: String::new(),
            properties: Map::new(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }
}

/// Configuration of an Edge at the time it was fetched
///
/// Keyed by component id. Only used for existence checks and for reading the
/// scheduler, never written back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    #[serde(default)]
    pub components: BTreeMap<String, ComponentSnapshot>,
}

impl ConfigSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_component(
        mut self,
        component_id: impl Into<String>,
        component: ComponentSnapshot,
    ) -> Self {
        self.components.insert(component_id.into(), component);
        self
    }

    pub fn insert(&mut self, component_id: impl Into<String>, component: ComponentSnapshot) {
        self.components.insert(component_id.into(), component);
    }

    pub fn remove(&mut self, component_id: &str) -> Option<ComponentSnapshot> {
        self.components.remove(component_id)
    }

    pub fn contains(&self, component_id: &str) -> bool {
        self.components.contains_key(component_id)
    }

    pub fn get(&self, component_id: &str) -> Option<&ComponentSnapshot> {
        self.components.get(component_id)
    }

    pub fn get_mut(&mut self, component_id: &str) -> Option<&mut ComponentSnapshot> {
        self.components.get_mut(component_id)
    }

    pub fn component_ids(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

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

//! In-memory Edge used by the configurator tests

#![allow(dead_code)]

use async_trait::async_trait;
use edgeprov_core::{EdgeGateway, GatewayError, GatewayResult};
use edgeprov_types::{ComponentSnapshot, ConfigSnapshot, Property};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashSet;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Fetch,
    Create {
        factory_id: String,
        properties: Vec<Property>,
    },
    Delete(String),
    Update {
        component_id: String,
        properties: Vec<Property>,
    },
}

impl Call {
    pub fn component_id(&self) -> Option<&str> {
        match self {
            Self::Fetch => None,
            Self::Create { properties, .. } => id_of(properties),
            Self::Delete(id) | Self::Update { component_id: id, .. } => Some(id),
        }
    }

    pub fn is_write(&self) -> bool {
        !matches!(self, Self::Fetch)
    }
}

#[derive(Default)]
struct MockState {
    snapshot: ConfigSnapshot,
    calls: Vec<(Instant, Call)>,
    fail_create: HashSet<String>,
    fail_delete: HashSet<String>,
    fail_update: HashSet<String>,
    fail_fetch: bool,
}

/// Edge that applies writes to an in-memory snapshot and records every call
///
/// Creating an existing id replaces the component.
#[derive(Default)]
pub struct MockEdge {
    state: Mutex<MockState>,
}

impl MockEdge {
    pub fn new(snapshot: ConfigSnapshot) -> Self {
        Self {
            state: Mutex::new(MockState {
                snapshot,
                ..MockState::default()
            }),
        }
    }

    pub fn fail_create(&self, component_id: &str) {
        self.state.lock().fail_create.insert(component_id.to_owned());
    }

    pub fn fail_delete(&self, component_id: &str) {
        self.state.lock().fail_delete.insert(component_id.to_owned());
    }

    pub fn fail_update(&self, component_id: &str) {
        self.state.lock().fail_update.insert(component_id.to_owned());
    }

    pub fn fail_fetch(&self, fail: bool) {
        self.state.lock().fail_fetch = fail;
    }

    /// Let every call succeed again
    pub fn heal(&self) {
        let mut state = self.state.lock();
        state.fail_create.clear();
        state.fail_delete.clear();
        state.fail_update.clear();
        state.fail_fetch = false;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.iter().map(|(_, call)| call.clone()).collect()
    }

    pub fn timed_calls(&self) -> Vec<(Instant, Call)> {
        self.state.lock().calls.clone()
    }

    pub fn writes(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_write).collect()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    pub fn snapshot(&self) -> ConfigSnapshot {
        self.state.lock().snapshot.clone()
    }

    pub fn component(&self, component_id: &str) -> Option<ComponentSnapshot> {
        self.state.lock().snapshot.get(component_id).cloned()
    }

    fn record(&self, call: Call) {
        self.state.lock().calls.push((Instant::now(), call));
    }
}

fn id_of(properties: &[Property]) -> Option<&str> {
    properties
        .iter()
        .find(|property| property.name == "id")
        .and_then(|property| property.value.as_str())
}

fn rejected(message: &str) -> GatewayError {
    GatewayError::Rejected {
        code: 1,
        message: message.to_owned(),
    }
}

fn apply_properties(component: &mut ComponentSnapshot, properties: &[Property]) {
    for property in properties {
        if property.name == "id" {
            continue;
        }
        if property.name == "alias" {
            component.alias = property.value.as_str().unwrap_or_default().to_owned();
        }
        let value = serde_json::to_value(&property.value).unwrap_or(Value::Null);
        component.properties.insert(property.name.clone(), value);
    }
}

#[async_trait]
impl EdgeGateway for MockEdge {
    async fn fetch_config_snapshot(&self) -> GatewayResult<ConfigSnapshot> {
        self.record(Call::Fetch);
        let state = self.state.lock();
        if state.fail_fetch {
            return Err(GatewayError::Transport("connection refused".to_owned()));
        }
        Ok(state.snapshot.clone())
    }

    async fn create_component(
        &self,
        factory_id: &str,
        properties: &[Property],
    ) -> GatewayResult<()> {
        self.record(Call::Create {
            factory_id: factory_id.to_owned(),
            properties: properties.to_vec(),
        });
        let component_id = id_of(properties)
            .ok_or_else(|| rejected("missing id property"))?
            .to_owned();

        let mut state = self.state.lock();
        if state.fail_create.contains(&component_id) {
            return Err(rejected(&format!("Unable to create {component_id}")));
        }
        let mut component = ComponentSnapshot::new(factory_id);
        apply_properties(&mut component, properties);
        state.snapshot.insert(component_id, component);
        Ok(())
    }

    async fn delete_component(&self, component_id: &str) -> GatewayResult<()> {
        self.record(Call::Delete(component_id.to_owned()));
        let mut state = self.state.lock();
        if state.fail_delete.contains(component_id) {
            return Err(rejected(&format!("Unable to delete {component_id}")));
        }
        state
            .snapshot
            .remove(component_id)
            .map(|_| ())
            .ok_or_else(|| rejected(&format!("Component {component_id} not found")))
    }

    async fn update_component(
        &self,
        component_id: &str,
        properties: &[Property],
    ) -> GatewayResult<()> {
        self.record(Call::Update {
            component_id: component_id.to_owned(),
            properties: properties.to_vec(),
        });
        let mut state = self.state.lock();
        if state.fail_update.contains(component_id) {
            return Err(rejected(&format!("Unable to update {component_id}")));
        }
        let component = state
            .snapshot
            .get_mut(component_id)
            .ok_or_else(|| rejected(&format!("Component {component_id} not found")))?;
        apply_properties(component, properties);
        Ok(())
    }
}

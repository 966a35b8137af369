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

/// How a required controller id is maintained in the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SchedulerIdBehaviour {
    #[default]
    AlwaysInclude,
    /// The app manager adds this id itself when it is available on the Edge
    ManagedByAppManager,
}

/// A controller id the installation variant needs in the scheduler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredController {
    pub component_id: String,

    #[serde(default)]
    pub behaviour: SchedulerIdBehaviour,
}

impl RequiredController {
    pub fn new(component_id: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            behaviour: SchedulerIdBehaviour::AlwaysInclude,
        }
    }

    pub fn managed_by_app_manager(component_id: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            behaviour: SchedulerIdBehaviour::ManagedByAppManager,
        }
    }

    /// Whether the configurator has to write this id itself
    pub fn is_required(&self, app_manager_available: bool) -> bool {
        !(app_manager_available && self.behaviour == SchedulerIdBehaviour::ManagedByAppManager)
    }
}

impl From<&str> for RequiredController {
    fn from(component_id: &str) -> Self {
        Self::new(component_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_manager_behaviour() {
        let always = RequiredController::new("ctrlBalancing0");
        let managed = RequiredController::managed_by_app_manager("ctrlGridOptimizedCharge0");

        assert!(always.is_required(true));
        assert!(always.is_required(false));
        assert!(!managed.is_required(true));
        assert!(managed.is_required(false));
    }

    #[test]
    fn test_behaviour_defaults_when_omitted() {
        let parsed: RequiredController =
            serde_json::from_str(r#"{"component_id": "ctrlEssSurplusFeedToGrid0"}"#).unwrap();
        assert_eq!(parsed.behaviour, SchedulerIdBehaviour::AlwaysInclude);

        let parsed: RequiredController = serde_json::from_str(
            r#"{"component_id": "ctrl0", "behaviour": "managed-by-app-manager"}"#,
        )
        .unwrap();
        assert_eq!(parsed.behaviour, SchedulerIdBehaviour::ManagedByAppManager);
    }
}

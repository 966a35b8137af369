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

//! Merging required controller ids into the Edge scheduler

use edgeprov_types::{ComponentSnapshot, Property, RequiredController};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info};

use crate::errors::{ConfiguratorError, Result};
use crate::traits::EdgeGateway;

pub const SCHEDULER_ID: &str = "scheduler0";
pub const SCHEDULER_FACTORY_ID: &str = "Scheduler.AllAlphabetically";
pub const CONTROLLER_IDS_PROPERTY: &str = "controllers.ids";

/// What the scheduler step did on the Edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum SchedulerOutcome {
    /// No scheduler existed; one was created with the required ids
    Created { controller_ids: Vec<String> },
    /// The existing scheduler was written with the merged list
    Updated {
        controller_ids: Vec<String>,
        added: Vec<String>,
    },
    /// The scheduler exists and nothing is required from it
    NothingRequired,
}

/// Ids the configurator has to write itself, in required order
pub fn required_controller_ids(
    required: &[RequiredController],
    app_manager_available: bool,
) -> Vec<String> {
    required
        .iter()
        .filter(|controller| controller.is_required(app_manager_available))
        .map(|controller| controller.component_id.clone())
        .collect()
}

/// Union of `existing` and `required`
///
/// Existing ids keep their order (including ids nothing requires); required
/// ids not yet present are appended in required order, each at most once.
pub fn merge_controller_ids(existing: &[String], required: &[String]) -> Vec<String> {
    let mut seen: HashSet<&str> = existing.iter().map(String::as_str).collect();
    let mut merged = existing.to_vec();
    for id in required {
        if seen.insert(id.as_str()) {
            merged.push(id.clone());
        }
    }
    merged
}

/// Controller ids currently configured on a scheduler component
///
/// A missing property counts as an empty list.
pub fn existing_controller_ids(scheduler: &ComponentSnapshot) -> Result<Vec<String>> {
    match scheduler.property(CONTROLLER_IDS_PROPERTY) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(values)) => values
            .iter()
            .map(|value| {
                value.as_str().map(str::to_owned).ok_or_else(|| {
                    ConfiguratorError::InvalidSchedulerConfig(format!(
                        "'{CONTROLLER_IDS_PROPERTY}' contains a non-string entry: {value}"
                    ))
                })
            })
            .collect(),
        Some(other) => Err(ConfiguratorError::InvalidSchedulerConfig(format!(
            "'{CONTROLLER_IDS_PROPERTY}' is not a list: {other}"
        ))),
    }
}

/// Ensure the Edge scheduler runs every id in `required_ids`
///
/// Reads a fresh snapshot, then creates the scheduler or writes the merged
/// controller list with a single call.
pub async fn update_scheduler(
    gateway: &dyn EdgeGateway,
    required_ids: &[String],
) -> Result<SchedulerOutcome> {
    let snapshot = gateway
        .fetch_config_snapshot()
        .await
        .map_err(ConfiguratorError::Snapshot)?;

    let Some(scheduler) = snapshot.get(SCHEDULER_ID) else {
        info!(
            "🗓️ [SCHEDULER] {} missing, creating it with {} controller(s)",
            SCHEDULER_ID,
            required_ids.len()
        );
        gateway
            .create_component(
                SCHEDULER_FACTORY_ID,
                &[
                    Property::new("id", SCHEDULER_ID),
                    Property::new(CONTROLLER_IDS_PROPERTY, required_ids.to_vec()),
                ],
            )
            .await
            .map_err(|source| ConfiguratorError::Scheduler { source })?;

        return Ok(SchedulerOutcome::Created {
            controller_ids: required_ids.to_vec(),
        });
    };

    if required_ids.is_empty() {
        debug!("🗓️ [SCHEDULER] No controllers to add");
        return Ok(SchedulerOutcome::NothingRequired);
    }

    let existing = existing_controller_ids(scheduler)?;
    let merged = merge_controller_ids(&existing, required_ids);
    let added = merged[existing.len()..].to_vec();

    info!(
        "🗓️ [SCHEDULER] Updating {}: {} existing, {} added {:?}",
        SCHEDULER_ID,
        existing.len(),
        added.len(),
        added
    );
    gateway
        .update_component(
            SCHEDULER_ID,
            &[Property::new(CONTROLLER_IDS_PROPERTY, merged.clone())],
        )
        .await
        .map_err(|source| ConfiguratorError::Scheduler { source })?;

    Ok(SchedulerOutcome::Updated {
        controller_ids: merged,
        added,
    })
}

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

//! Provisioning run over a list of desired components
//!
//! A run has four phases, each one starting only after the previous one
//! succeeded:
//!
//! 1. clear: delete every pre-configured component, last registered first
//! 2. apply: create/update every object in registration order, one at a time
//! 3. app install steps
//! 4. scheduler merge
//!
//! Statuses are kept behind a lock so a UI task can render progress while
//! `start()` runs.

use chrono::Utc;
use edgeprov_types::{
    BaseMode, ConfigSnapshot, ConfigurationMode, ConfigurationObject, ConfigurationStatus, Property,
    RequiredController,
};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, error, info, trace, warn};

use crate::errors::{ConfiguratorError, Result};
use crate::pacing::PacingConfig;
use crate::report::{ConfigurationReport, RunStats};
use crate::scheduler;
use crate::traits::{AppInstallStep, EdgeGateway};

pub struct ComponentConfigurator {
    gateway: Arc<dyn EdgeGateway>,
    snapshot: ConfigSnapshot,
    required_controllers: Vec<RequiredController>,
    pacing: PacingConfig,
    app_manager_available: bool,
    objects: RwLock<Vec<ConfigurationObject>>,
    /// Ids whose delete failed; they are still present on the Edge
    failed_clears: RwLock<HashSet<String>>,
    install_app_steps: RwLock<Vec<Arc<dyn AppInstallStep>>>,
    running: AtomicBool,
}

impl ComponentConfigurator {
    /// Create a configurator for the Edge described by `snapshot`
    pub fn new(
        gateway: Arc<dyn EdgeGateway>,
        snapshot: ConfigSnapshot,
        required_controllers: Vec<RequiredController>,
    ) -> Self {
        Self {
            gateway,
            snapshot,
            required_controllers,
            pacing: PacingConfig::default(),
            app_manager_available: false,
            objects: RwLock::new(Vec::new()),
            failed_clears: RwLock::new(HashSet::new()),
            install_app_steps: RwLock::new(Vec::new()),
            running: AtomicBool::new(false),
        }
    }

    /// Fetch the current Edge configuration and create a configurator for it
    pub async fn from_gateway(
        gateway: Arc<dyn EdgeGateway>,
        required_controllers: Vec<RequiredController>,
    ) -> Result<Self> {
        let snapshot = gateway
            .fetch_config_snapshot()
            .await
            .map_err(ConfiguratorError::Snapshot)?;
        debug!(
            "📥 [CONFIGURATOR] Edge reports {} component(s)",
            snapshot.len()
        );
        Ok(Self::new(gateway, snapshot, required_controllers))
    }

    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    /// Whether the Edge runs an app manager that maintains part of the scheduler itself
    pub fn with_app_manager(mut self, available: bool) -> Self {
        self.app_manager_available = available;
        self
    }

    // ============= Registration =============

    /// Register an object at the end of the list and classify it against the snapshot
    pub fn add(&self, object: ConfigurationObject) -> Result<()> {
        let mut objects = self.objects.write();
        let len = objects.len();
        self.insert_locked(&mut objects, len, object)
    }

    /// Register an object at `index` (clamped to the end of the list)
    pub fn insert(&self, index: usize, object: ConfigurationObject) -> Result<()> {
        let mut objects = self.objects.write();
        self.insert_locked(&mut objects, index, object)
    }

    /// The run flag is read under the list's write lock
    fn insert_locked(
        &self,
        objects: &mut Vec<ConfigurationObject>,
        index: usize,
        mut object: ConfigurationObject,
    ) -> Result<()> {
        if self.running.load(Ordering::Acquire) {
            return Err(ConfiguratorError::AlreadyRunning);
        }

        if objects
            .iter()
            .any(|existing| existing.component_id == object.component_id)
        {
            return Err(ConfiguratorError::DuplicateComponentId(object.component_id));
        }

        object.status = if self.snapshot.contains(&object.component_id) {
            ConfigurationStatus::PreConfigured
        } else {
            ConfigurationStatus::Missing
        };
        debug!(
            "➕ [CONFIGURATOR] {} ({}, {}) is {}",
            object.component_id, object.factory_id, object.mode, object.status
        );

        let index = index.min(objects.len());
        objects.insert(index, object);
        Ok(())
    }

    pub fn add_install_app_step(&self, step: Arc<dyn AppInstallStep>) {
        self.install_app_steps.write().push(step);
    }

    // ============= Run =============

    /// Remove stale components, apply every object, run app install steps and
    /// merge the scheduler
    ///
    /// Fails at the first failing phase; per-object statuses stay inspectable.
    /// May be called again after a failure.
    pub async fn start(&self) -> Result<ConfigurationReport> {
        let _guard = RunGuard::acquire(&self.running)?;
        let started_at = Utc::now();
        let mut stats = RunStats::default();

        info!(
            "🚀 [CONFIGURATOR] Starting run with {} object(s)",
            self.len()
        );
        self.restore_failed_clears();

        self.clear(&mut stats).await?;

        for index in 0..self.len() {
            self.configure_next(index, &mut stats).await?;
        }

        self.run_install_app_steps(&mut stats).await?;

        let required = self.required_controller_ids();
        let scheduler = scheduler::update_scheduler(self.gateway.as_ref(), &required).await?;

        let report = stats.into_report(started_at, scheduler);
        info!(
            "✅ [CONFIGURATOR] Run finished in {}s: {} deleted, {} created, {} updated",
            report.duration().num_seconds(),
            report.deleted,
            report.created,
            report.updated
        );
        Ok(report)
    }

    /// Put objects whose delete failed in an earlier run back in line for clear
    fn restore_failed_clears(&self) {
        let mut failed = self.failed_clears.write();
        if failed.is_empty() {
            return;
        }

        let mut objects = self.objects.write();
        for object in objects.iter_mut() {
            if object.status == ConfigurationStatus::Error && failed.contains(&object.component_id)
            {
                debug!(
                    "🔁 [CONFIGURATOR] {} still on the Edge, clearing it again",
                    object.component_id
                );
                object.status = ConfigurationStatus::PreConfigured;
            }
        }
        failed.clear();
    }

    /// Delete every pre-configured component, last registered first
    async fn clear(&self, stats: &mut RunStats) -> Result<()> {
        let pending: Vec<(usize, ConfigurationObject)> = self
            .objects
            .read()
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, object)| object.status == ConfigurationStatus::PreConfigured)
            .map(|(index, object)| (index, object.clone()))
            .collect();

        if pending.is_empty() {
            debug!("🧹 [CONFIGURATOR] Nothing pre-configured, skipping clear");
            return Ok(());
        }

        info!(
            "🧹 [CONFIGURATOR] Removing {} pre-configured component(s)",
            pending.len()
        );

        for (index, object) in pending {
            if object.base_mode == BaseMode::AppManager
                || object.mode == ConfigurationMode::UpdateOnly
            {
                debug!(
                    "🧹 [CONFIGURATOR] Keeping {} ({} / {})",
                    object.component_id, object.mode, object.base_mode
                );
                self.set_status(index, ConfigurationStatus::Missing);
                continue;
            }

            if let Err(source) = self.gateway.delete_component(&object.component_id).await {
                error!(
                    "❌ [CONFIGURATOR] Failed to remove {}: {}",
                    object.component_id, source
                );
                self.set_status(index, ConfigurationStatus::Error);
                self.failed_clears.write().insert(object.component_id.clone());
                return Err(ConfiguratorError::Clear {
                    component_id: object.component_id,
                    source,
                });
            }

            info!("🗑️ [CONFIGURATOR] Removed {}", object.component_id);
            self.set_status(index, ConfigurationStatus::Missing);
            stats.deleted += 1;
            self.pause(self.pacing.clear_delay).await;
        }

        Ok(())
    }

    /// Apply the object at `index`, then wait out its pacing delay
    async fn configure_next(&self, index: usize, stats: &mut RunStats) -> Result<()> {
        let Some(object) = self.begin_configuring(index) else {
            return Ok(());
        };

        let result = match (object.base_mode, object.mode) {
            (BaseMode::AppManager, _) => {
                debug!(
                    "📦 [CONFIGURATOR] {} is created by the app manager",
                    object.component_id
                );
                stats.skipped_app_manager += 1;
                Ok(Duration::ZERO)
            }
            (BaseMode::Ui, ConfigurationMode::RemoveOnly) => {
                stats.removed_only += 1;
                Ok(Duration::ZERO)
            }
            (BaseMode::Ui, ConfigurationMode::RemoveAndConfigure) => {
                info!(
                    "📦 [CONFIGURATOR] Creating {} ({})",
                    object.component_id, object.factory_id
                );
                let properties = object.outgoing_properties();
                trace_properties(&properties);
                self.gateway
                    .create_component(&object.factory_id, &properties)
                    .await
                    .map(|()| {
                        stats.created += 1;
                        self.pacing.configure_delay
                    })
            }
            (BaseMode::Ui, ConfigurationMode::UpdateOnly) => {
                info!("✏️ [CONFIGURATOR] Updating {}", object.component_id);
                let properties = object.outgoing_properties();
                trace_properties(&properties);
                self.gateway
                    .update_component(&object.component_id, &properties)
                    .await
                    .map(|()| {
                        stats.updated += 1;
                        Duration::ZERO
                    })
            }
        };

        match result {
            Ok(delay) => {
                self.set_status(index, ConfigurationStatus::Configured);
                debug!("✅ [CONFIGURATOR] {} configured", object.component_id);
                self.pause(delay).await;
                Ok(())
            }
            Err(source) => {
                error!(
                    "❌ [CONFIGURATOR] Failed to configure {}: {}",
                    object.component_id, source
                );
                self.set_status(index, ConfigurationStatus::Error);
                Err(ConfiguratorError::Apply {
                    index,
                    component_id: object.component_id,
                    source,
                })
            }
        }
    }

    async fn run_install_app_steps(&self, stats: &mut RunStats) -> Result<()> {
        let steps = self.install_app_steps.read().clone();
        for step in steps {
            info!("📲 [CONFIGURATOR] Running app install step '{}'", step.name());
            step.install()
                .await
                .map_err(|e| ConfiguratorError::AppInstallFailed {
                    step: step.name().to_owned(),
                    reason: format!("{e:#}"),
                })?;
            stats.app_steps += 1;
        }
        Ok(())
    }

    fn begin_configuring(&self, index: usize) -> Option<ConfigurationObject> {
        let mut objects = self.objects.write();
        let object = objects.get_mut(index)?;
        object.status = ConfigurationStatus::Configuring;
        Some(object.clone())
    }

    fn set_status(&self, index: usize, status: ConfigurationStatus) {
        if let Some(object) = self.objects.write().get_mut(index) {
            object.status = status;
        } else {
            warn!("⚠️ [CONFIGURATOR] No object at position {index}");
        }
    }

    async fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            debug!("⏳ [CONFIGURATOR] Waiting {:?} before the next write", delay);
            tokio::time::sleep(delay).await;
        }
    }

    // ============= Introspection =============

    /// Objects the installer sees in the progress list (everything except `remove-only`)
    pub fn configuration_objects_to_be_configured(&self) -> Vec<ConfigurationObject> {
        self.objects
            .read()
            .iter()
            .filter(|object| object.is_visible_to_installer())
            .cloned()
            .collect()
    }

    /// True when every object has `status`; true for an empty configurator
    pub fn all_have_status(&self, status: ConfigurationStatus) -> bool {
        self.objects
            .read()
            .iter()
            .all(|object| object.status == status)
    }

    /// True when at least one object has `status`
    pub fn any_has_status(&self, status: ConfigurationStatus) -> bool {
        self.objects
            .read()
            .iter()
            .any(|object| object.status == status)
    }

    /// As [`Self::any_has_status`], ignoring core components (`_power`, ...)
    pub fn any_user_component_has_status(&self, status: ConfigurationStatus) -> bool {
        self.objects
            .read()
            .iter()
            .filter(|object| !object.is_core_component())
            .any(|object| object.status == status)
    }

    pub fn objects(&self) -> Vec<ConfigurationObject> {
        self.objects.read().clone()
    }

    pub fn status_of(&self, component_id: &str) -> Option<ConfigurationStatus> {
        self.objects
            .read()
            .iter()
            .find(|object| object.component_id == component_id)
            .map(|object| object.status)
    }

    /// Controller ids the scheduler step will write
    pub fn required_controller_ids(&self) -> Vec<String> {
        scheduler::required_controller_ids(&self.required_controllers, self.app_manager_available)
    }

    pub fn snapshot(&self) -> &ConfigSnapshot {
        &self.snapshot
    }

    pub fn pacing(&self) -> PacingConfig {
        self.pacing
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }
}

impl fmt::Debug for ComponentConfigurator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentConfigurator")
            .field("objects", &self.len())
            .field("required_controllers", &self.required_controllers)
            .field("pacing", &self.pacing)
            .field("app_manager_available", &self.app_manager_available)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

fn trace_properties(properties: &[Property]) {
    for property in properties {
        trace!(
            "   {} = {} ({})",
            property.name,
            property.value,
            property.value.kind()
        );
    }
}

/// Marks a run as active for as long as it lives
struct RunGuard<'a> {
    running: &'a AtomicBool,
}

impl<'a> RunGuard<'a> {
    fn acquire(running: &'a AtomicBool) -> Result<Self> {
        running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ConfiguratorError::AlreadyRunning)?;
        Ok(Self { running })
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}

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

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::scheduler::SchedulerOutcome;

/// Summary of a successful configuration run
#[derive(Debug, Clone, Serialize)]
pub struct ConfigurationReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Pre-configured components deleted during the clear phase
    pub deleted: usize,

    /// Components created
    pub created: usize,

    /// Components updated in place (`update-only`)
    pub updated: usize,

    /// Objects that only had to be absent
    pub removed_only: usize,

    /// Objects left to the app manager
    pub skipped_app_manager: usize,

    /// App install steps executed
    pub app_steps: usize,

    pub scheduler: SchedulerOutcome,
}

impl ConfigurationReport {
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Counters collected while a run is in progress
#[derive(Debug, Default)]
pub(crate) struct RunStats {
    pub deleted: usize,
    pub created: usize,
    pub updated: usize,
    pub removed_only: usize,
    pub skipped_app_manager: usize,
    pub app_steps: usize,
}

impl RunStats {
    pub fn into_report(
        self,
        started_at: DateTime<Utc>,
        scheduler: SchedulerOutcome,
    ) -> ConfigurationReport {
        ConfigurationReport {
            started_at,
            finished_at: Utc::now(),
            deleted: self.deleted,
            created: self.created,
            updated: self.updated,
            removed_only: self.removed_only,
            skipped_app_manager: self.skipped_app_manager,
            app_steps: self.app_steps,
            scheduler,
        }
    }
}

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

//! Sequencing of component configuration writes against a remote Edge

pub mod configurator;
pub mod errors;
pub mod pacing;
pub mod report;
pub mod scheduler;
pub mod traits;

pub use configurator::ComponentConfigurator;
pub use errors::{ConfiguratorError, GatewayError, GatewayResult, Result};
pub use pacing::{DEFAULT_CLEAR_DELAY, DEFAULT_CONFIGURE_DELAY, PacingConfig};
pub use report::ConfigurationReport;
pub use scheduler::{
    CONTROLLER_IDS_PROPERTY, SCHEDULER_FACTORY_ID, SCHEDULER_ID, SchedulerOutcome,
    merge_controller_ids,
};
pub use traits::{AppInstallStep, EdgeGateway};

pub use edgeprov_types as types;

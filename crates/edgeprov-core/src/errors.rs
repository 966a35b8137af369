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

//! Error types for the configurator and the gateway seam

use thiserror::Error;

/// Failure of a single call to the Edge
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request rejected by edge (code {code}): {message}")]
    Rejected { code: i64, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("authentication failed")]
    Unauthorized,
}

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

#[derive(Debug, Error)]
pub enum ConfiguratorError {
    #[error("component id '{0}' was added twice")]
    DuplicateComponentId(String),

    #[error("a configuration run is already in progress")]
    AlreadyRunning,

    #[error("failed to read edge configuration: {0}")]
    Snapshot(#[source] GatewayError),

    #[error("failed to remove '{component_id}': {source}")]
    Clear {
        component_id: String,
        #[source]
        source: GatewayError,
    },

    #[error("failed to configure '{component_id}' (position {index}): {source}")]
    Apply {
        index: usize,
        component_id: String,
        #[source]
        source: GatewayError,
    },

    #[error("app install step '{step}' failed: {reason}")]
    AppInstallFailed { step: String, reason: String },

    #[error("failed to update scheduler: {source}")]
    Scheduler {
        #[source]
        source: GatewayError,
    },

    #[error("invalid scheduler configuration: {0}")]
    InvalidSchedulerConfig(String),
}

impl ConfiguratorError {
    /// Component the error is attributed to, if any
    pub fn component_id(&self) -> Option<&str> {
        match self {
            Self::DuplicateComponentId(id)
            | Self::Clear {
                component_id: id, ..
            }
            | Self::Apply {
                component_id: id, ..
            } => Some(id),
            Self::AlreadyRunning
            | Self::Snapshot(_)
            | Self::AppInstallFailed { .. }
            | Self::Scheduler { .. }
            | Self::InvalidSchedulerConfig(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfiguratorError>;

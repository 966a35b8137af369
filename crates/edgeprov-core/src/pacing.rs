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

use std::time::Duration;

/// Pause after each delete of a pre-configured component
pub const DEFAULT_CLEAR_DELAY: Duration = Duration::from_secs(5);

/// Pause after each created component
pub const DEFAULT_CONFIGURE_DELAY: Duration = Duration::from_secs(15);

/// Spacing of configuration writes to the Edge
///
/// The Edge reconciles its component registry on its own after every write;
/// back-to-back writes overload it on smaller hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingConfig {
    pub clear_delay: Duration,
    pub configure_delay: Duration,
}

impl PacingConfig {
    pub fn from_secs(clear_delay_secs: u64, configure_delay_secs: u64) -> Self {
        Self {
            clear_delay: Duration::from_secs(clear_delay_secs),
            configure_delay: Duration::from_secs(configure_delay_secs),
        }
    }

    /// No pauses at all
    pub fn none() -> Self {
        Self {
            clear_delay: Duration::ZERO,
            configure_delay: Duration::ZERO,
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            clear_delay: DEFAULT_CLEAR_DELAY,
            configure_delay: DEFAULT_CONFIGURE_DELAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let pacing = PacingConfig::default();
        assert_eq!(pacing.clear_delay, Duration::from_secs(5));
        assert_eq!(pacing.configure_delay, Duration::from_secs(15));
        assert_eq!(PacingConfig::from_secs(5, 15), pacing);
        assert!(PacingConfig::none().configure_delay.is_zero());
    }
}

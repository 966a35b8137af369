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

use edgeprov_core::GatewayError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("JSON-RPC error {code}: {message}")]
    JsonRpc { code: i64, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("configuration error: {0}")]
    ConfigError(String),
}

pub type RpcResult<T> = Result<T, RpcError>;

impl From<RpcError> for GatewayError {
    fn from(error: RpcError) -> Self {
        match error {
            RpcError::HttpError(e) => Self::Transport(e.to_string()),
            RpcError::AuthenticationFailed => Self::Unauthorized,
            RpcError::ApiError { status, message } => {
                Self::Transport(format!("HTTP {status}: {message}"))
            }
            RpcError::JsonRpc { code, message } => Self::Rejected { code, message },
            RpcError::InvalidResponse(message) => Self::InvalidResponse(message),
            RpcError::ConfigError(message) => Self::Transport(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_mapping() {
        assert!(matches!(
            GatewayError::from(RpcError::AuthenticationFailed),
            GatewayError::Unauthorized
        ));
        assert!(matches!(
            GatewayError::from(RpcError::JsonRpc {
                code: 1,
                message: "Component [meter0] already exists".to_owned()
            }),
            GatewayError::Rejected { code: 1, .. }
        ));
        assert!(matches!(
            GatewayError::from(RpcError::ApiError {
                status: 502,
                message: "Bad Gateway".to_owned()
            }),
            GatewayError::Transport(msg) if msg == "HTTP 502: Bad Gateway"
        ));
    }
}

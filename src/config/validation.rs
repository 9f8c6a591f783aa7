//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate URLs, addresses and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use alloy::primitives::utils::parse_ether;
use alloy::primitives::Address;
use std::net::SocketAddr;

use crate::config::schema::AppConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if let Err(e) = url::Url::parse(value) {
        errors.push(ValidationError::new(field, format!("invalid URL '{}': {}", value, e)));
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let store = &config.content_store;
    check_url(&mut errors, "content_store.api_url", &store.api_url);
    check_url(&mut errors, "content_store.gateway_url", &store.gateway_url);
    if store.request_timeout_secs == 0 {
        errors.push(ValidationError::new("content_store.request_timeout_secs", "must be > 0"));
    }
    if store.cid_version > 1 {
        errors.push(ValidationError::new("content_store.cid_version", "must be 0 or 1"));
    }

    let minter = &config.minter;
    if parse_ether(&minter.fallback_mint_price).is_err() || minter.fallback_mint_price.starts_with('-') {
        errors.push(ValidationError::new(
            "minter.fallback_mint_price",
            format!("'{}' is not a positive ETH amount", minter.fallback_mint_price),
        ));
    }
    if minter.gas_multiplier_percent < 100 {
        errors.push(ValidationError::new("minter.gas_multiplier_percent", "must be >= 100"));
    }
    if minter.enabled {
        check_url(&mut errors, "minter.rpc_url", &minter.rpc_url);
        if minter.chain_id == 0 {
            errors.push(ValidationError::new("minter.chain_id", "must be > 0"));
        }
        if minter.factory_address.parse::<Address>().is_err() {
            errors.push(ValidationError::new(
                "minter.factory_address",
                format!("invalid address '{}'", minter.factory_address),
            ));
        }
        if minter.rpc_timeout_secs == 0 {
            errors.push(ValidationError::new("minter.rpc_timeout_secs", "must be > 0"));
        }
    }

    let obs = &config.observability;
    if !matches!(obs.log_format.as_str(), "pretty" | "json") {
        errors.push(ValidationError::new(
            "observability.log_format",
            format!("unknown format '{}', expected pretty or json", obs.log_format),
        ));
    }
    if obs.metrics_enabled && obs.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("invalid socket address '{}'", obs.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

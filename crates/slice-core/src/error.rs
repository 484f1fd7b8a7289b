//! # Order Error Types
//!
//! Typed error handling for the slice-shop ordering engine.
//! All ordering operations return `Result<T, OrderError>`.

use crate::product::Price;
use crate::session::SessionState;
use thiserror::Error;

/// Core error type for all ordering operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Requested item has no remaining stock
    #[error("Out of stock: {item}")]
    OutOfStock { item: String },

    /// Base selection does not map to a catalog entry
    #[error("Unknown product kind: {kind}")]
    UnknownProductKind { kind: String },

    /// Add-on selection does not map to a catalog entry
    #[error("Unknown add-on kind: {kind}")]
    UnknownAddOnKind { kind: String },

    /// Payment channel not registered
    #[error("Invalid payment method: {channel}")]
    InvalidPaymentMethod { channel: String },

    /// Negative or otherwise malformed payment amount
    #[error("Invalid amount: {amount}")]
    InvalidAmount { amount: Price },

    /// Action not accepted in the session's current state
    #[error("Cannot {action} while session is {state}")]
    InvalidTransition {
        state: SessionState,
        action: &'static str,
    },

    /// Session id not known to the caller's registry
    #[error("Session not found: {session_id}")]
    SessionNotFound { session_id: String },

    /// Catalog or startup configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl OrderError {
    /// Returns true if the session can continue after this error
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, OrderError::Configuration(_))
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            OrderError::OutOfStock { .. } => 409,
            OrderError::UnknownProductKind { .. } => 400,
            OrderError::UnknownAddOnKind { .. } => 400,
            OrderError::InvalidPaymentMethod { .. } => 400,
            OrderError::InvalidAmount { .. } => 400,
            OrderError::InvalidTransition { .. } => 409,
            OrderError::SessionNotFound { .. } => 404,
            OrderError::Configuration(_) => 500,
        }
    }
}

/// Result type alias for ordering operations
pub type OrderResult<T> = Result<T, OrderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors() {
        assert!(OrderError::OutOfStock {
            item: "Cheese".into()
        }
        .is_recoverable());
        assert!(OrderError::InvalidPaymentMethod {
            channel: "cash".into()
        }
        .is_recoverable());
        assert!(!OrderError::Configuration("bad catalog".into()).is_recoverable());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            OrderError::OutOfStock {
                item: "Pepperoni".into()
            }
            .status_code(),
            409
        );
        assert_eq!(
            OrderError::UnknownProductKind {
                kind: "hawaiian".into()
            }
            .status_code(),
            400
        );
        assert_eq!(
            OrderError::SessionNotFound {
                session_id: "x".into()
            }
            .status_code(),
            404
        );
    }

    #[test]
    fn test_messages() {
        let err = OrderError::InvalidAmount {
            amount: Price::new(-1.0),
        };
        assert_eq!(err.to_string(), "Invalid amount: -$1.00");

        let err = OrderError::InvalidTransition {
            state: SessionState::SelectingBase,
            action: "finish the order",
        };
        assert_eq!(
            err.to_string(),
            "Cannot finish the order while session is selecting_base"
        );
    }
}

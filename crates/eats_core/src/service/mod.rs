//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Translate typed service errors into the uniform `{ok, error}` envelope
//!   consumed by the transport layer.
//!
//! # Invariants
//! - Service errors never escape as panics; every outcome maps to an
//!   envelope or a typed `Result`.

use serde::Serialize;
use std::fmt::Display;

pub mod restaurant_service;

/// Uniform success/error envelope returned by mutation entry points.
///
/// The transport layer maps this shape onto the wire; core never raises
/// operational failures past this boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoreOutput {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CoreOutput {
    /// Successful outcome with no error message.
    pub fn ok() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    /// Failed outcome carrying a user-facing message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(message.into()),
        }
    }
}

impl<E: Display> From<Result<(), E>> for CoreOutput {
    fn from(value: Result<(), E>) -> Self {
        match value {
            Ok(()) => Self::ok(),
            Err(err) => Self::error(err.to_string()),
        }
    }
}

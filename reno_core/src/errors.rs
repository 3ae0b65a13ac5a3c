//! # Error Types
//!
//! Structured error types for reno_core. Every failure in the validation
//! and submission pipeline is represented here so callers can distinguish
//! user-input problems (recoverable, show a message and let the user fix
//! the form) from schema problems (silently drop the offending record)
//! and transport problems (report and allow a retry).
//!
//! ## Example
//!
//! ```rust
//! use reno_core::errors::{EstimateError, EstimateResult};
//!
//! fn validate_width(width: f64) -> EstimateResult<()> {
//!     if !width.is_finite() || width <= 0.0 {
//!         return Err(EstimateError::invalid_dimension("width", width));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Result type alias for reno_core operations
pub type EstimateResult<T> = Result<T, EstimateError>;

/// Structured error type for the estimation pipeline.
///
/// Display strings double as the user-facing messages surfaced by the
/// interaction layer, so they name the constraint that was violated.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum EstimateError {
    /// Room name is blank after trimming
    #[error("Room name must not be empty")]
    EmptyRoomName,

    /// A room dimension is missing, NaN, or not positive
    #[error("Room {field} must be a positive number (got {value})")]
    InvalidDimension { field: String, value: f64 },

    /// An opening dimension is missing, NaN, or not positive
    #[error("Opening {field} must be a positive number (got {value})")]
    InvalidOpening { field: String, value: f64 },

    /// Opening wider than the larger room side
    #[error("Opening width {width} m exceeds the room's larger side ({limit} m)")]
    OpeningTooWide { width: f64, limit: f64 },

    /// Opening taller than the room
    #[error("Opening height {height} m exceeds the room height ({limit} m)")]
    OpeningTooTall { height: f64, limit: f64 },

    /// Cumulative opening area exceeds 90% of wall area
    #[error("Total opening area {total_area:.2} m² exceeds 90% of wall area ({cap:.2} m²)")]
    OpeningAreaCap { total_area: f64, cap: f64 },

    /// The user has not added a single material card
    #[error("Add at least one material before calculating")]
    NoMaterials,

    /// Every material card failed validation
    #[error("No correctly filled materials to calculate")]
    NoValidMaterials,

    /// Material type tag not present in the schema registry
    #[error("Unknown material type: {tag}")]
    UnknownMaterialType { tag: String },

    /// Material record id not present in the store
    #[error("No material record with id {id}")]
    UnknownRecord { id: Uuid },

    /// Network-level failure (connect, timeout, TLS)
    #[error("Network error: {reason}")]
    Transport { reason: String },

    /// The service answered with a non-success status
    #[error("Calculation service rejected the request ({status}): {message}")]
    ServiceRejected { status: u16, message: String },

    /// The service answered 2xx but the body was not usable
    #[error("Malformed service response: {reason}")]
    MalformedResponse { reason: String },
}

impl EstimateError {
    /// Create an InvalidDimension error
    pub fn invalid_dimension(field: impl Into<String>, value: f64) -> Self {
        EstimateError::InvalidDimension {
            field: field.into(),
            value,
        }
    }

    /// Create an InvalidOpening error
    pub fn invalid_opening(field: impl Into<String>, value: f64) -> Self {
        EstimateError::InvalidOpening {
            field: field.into(),
            value,
        }
    }

    /// Create an UnknownMaterialType error
    pub fn unknown_material_type(tag: impl Into<String>) -> Self {
        EstimateError::UnknownMaterialType { tag: tag.into() }
    }

    /// Create a Transport error
    pub fn transport(reason: impl Into<String>) -> Self {
        EstimateError::Transport {
            reason: reason.into(),
        }
    }

    /// Create a ServiceRejected error
    pub fn service_rejected(status: u16, message: impl Into<String>) -> Self {
        EstimateError::ServiceRejected {
            status,
            message: message.into(),
        }
    }

    /// Create a MalformedResponse error
    pub fn malformed_response(reason: impl Into<String>) -> Self {
        EstimateError::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// User-input class: recoverable by editing the form, surfaced as a message
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            EstimateError::EmptyRoomName
                | EstimateError::InvalidDimension { .. }
                | EstimateError::InvalidOpening { .. }
                | EstimateError::OpeningTooWide { .. }
                | EstimateError::OpeningTooTall { .. }
                | EstimateError::OpeningAreaCap { .. }
                | EstimateError::NoMaterials
                | EstimateError::NoValidMaterials
        )
    }

    /// Transport class: the user may retry the same submission
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            EstimateError::Transport { .. }
                | EstimateError::ServiceRejected { .. }
                | EstimateError::MalformedResponse { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EstimateError::EmptyRoomName => "EMPTY_ROOM_NAME",
            EstimateError::InvalidDimension { .. } => "INVALID_DIMENSION",
            EstimateError::InvalidOpening { .. } => "INVALID_OPENING",
            EstimateError::OpeningTooWide { .. } => "OPENING_TOO_WIDE",
            EstimateError::OpeningTooTall { .. } => "OPENING_TOO_TALL",
            EstimateError::OpeningAreaCap { .. } => "OPENING_AREA_CAP",
            EstimateError::NoMaterials => "NO_MATERIALS",
            EstimateError::NoValidMaterials => "NO_VALID_MATERIALS",
            EstimateError::UnknownMaterialType { .. } => "UNKNOWN_MATERIAL_TYPE",
            EstimateError::UnknownRecord { .. } => "UNKNOWN_RECORD",
            EstimateError::Transport { .. } => "TRANSPORT",
            EstimateError::ServiceRejected { .. } => "SERVICE_REJECTED",
            EstimateError::MalformedResponse { .. } => "MALFORMED_RESPONSE",
        }
    }
}

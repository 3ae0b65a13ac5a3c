//! # reno_core - Renovation Cost Calculator Core
//!
//! `reno_core` is the client-side heart of RenoCalc: it owns the material
//! schema registry, the in-progress form state, and the validation
//! pipeline that turns user edits into a request payload for the
//! calculation service. All types are JSON-serializable; the actual
//! quantity/cost formulas live on the server behind the wire contract.
//!
//! ## Design Philosophy
//!
//! - **One schema table**: rendering, validation, and payload preparation
//!   all consult the same per-type schema entry
//! - **Owned state**: materials and openings live in an explicit
//!   [`store::EstimateState`], not ambient globals
//! - **Silent filtering**: a partially-filled material is excluded from
//!   the submission, never sent with gaps
//!
//! ## Quick Start
//!
//! ```rust
//! use reno_core::prepare::prepare_submission;
//! use reno_core::room::RoomDraft;
//! use reno_core::schema::MaterialType;
//! use reno_core::store::EstimateState;
//!
//! let mut state = EstimateState::new();
//! state.room = RoomDraft::new("Кухня", 3.0, 4.0, 2.5);
//!
//! let id = state.materials.create(MaterialType::Wallpaper);
//! state.materials.set_field(&id, "price", "1000").unwrap();
//! state.materials.set_field(&id, "width", "1.06").unwrap();
//! state.materials.set_field(&id, "length", "10").unwrap();
//!
//! let request = prepare_submission(&state).unwrap();
//! let json = serde_json::to_string_pretty(&request).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`schema`] - Static material schema registry
//! - [`store`] - Material store and estimation state
//! - [`room`] - Room and opening model with validation
//! - [`prepare`] - Material filtering and payload assembly
//! - [`results`] - Result summarization and price formatting
//! - [`actions`] - Interaction-handler dispatch
//! - [`errors`] - Structured error types

pub mod actions;
pub mod errors;
pub mod prepare;
pub mod results;
pub mod room;
pub mod schema;
pub mod store;

// Re-export commonly used types at crate root for convenience
pub use errors::{EstimateError, EstimateResult};
pub use prepare::{prepare_submission, CalculationRequest, PreparedMaterial};
pub use room::{OpeningKind, OpeningRecord, RoomDraft, RoomRecord};
pub use schema::{MaterialSchema, MaterialType};
pub use store::{EstimateState, FieldStatus, FieldValue, MaterialRecord, MaterialStore};

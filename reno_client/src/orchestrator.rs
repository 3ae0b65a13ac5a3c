//! # Submission Orchestrator
//!
//! Drives one submission attempt through its phases:
//!
//! ```text
//! Idle -> ValidatingRoom -> ValidatingMaterials -> Submitting -> Success | Failed
//! ```
//!
//! Room validation must pass before material filtering runs, and nothing
//! reaches the network until both have. Terminal phases return to Idle on
//! the next attempt. Overlapping submissions are not coordinated: a later
//! response simply overwrites whatever the last one rendered, matching
//! the behavior this client replaces.

use reno_core::errors::{EstimateError, EstimateResult};
use reno_core::prepare::{filter_materials, CalculationRequest};
use reno_core::results::CalculationEntry;
use reno_core::store::EstimateState;

use crate::transport::ServiceClient;

/// Phase of the current submission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    ValidatingRoom,
    ValidatingMaterials,
    Submitting,
    Success,
    Failed,
}

/// Consumes the estimate state and the schema registry (through the
/// prepare pipeline) to produce a validated payload, hand it to the
/// calculation service, and report the outcome.
#[derive(Debug)]
pub struct Orchestrator {
    client: ServiceClient,
    phase: SubmissionPhase,
}

impl Orchestrator {
    pub fn new(client: ServiceClient) -> Self {
        Orchestrator {
            client,
            phase: SubmissionPhase::Idle,
        }
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn client(&self) -> &ServiceClient {
        &self.client
    }

    /// Run one submission attempt end to end.
    ///
    /// Validation failures abort before any network call; every error is
    /// recoverable and leaves the orchestrator in Failed until the next
    /// attempt.
    pub async fn calculate(
        &mut self,
        state: &EstimateState,
    ) -> EstimateResult<Vec<CalculationEntry>> {
        self.phase = SubmissionPhase::ValidatingRoom;
        let room = match state.room.to_record(&state.openings) {
            Ok(room) => room,
            Err(e) => return Err(self.fail(e)),
        };

        self.phase = SubmissionPhase::ValidatingMaterials;
        let materials = match filter_materials(&state.materials) {
            Ok(materials) => materials,
            Err(e) => return Err(self.fail(e)),
        };

        self.phase = SubmissionPhase::Submitting;
        let request = CalculationRequest {
            room,
            materials,
            openings: state.openings.clone(),
        };
        match self.client.calculate(&request).await {
            Ok(entries) => {
                self.phase = SubmissionPhase::Success;
                Ok(entries)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Return a terminal phase to Idle
    pub fn acknowledge(&mut self) {
        if matches!(self.phase, SubmissionPhase::Success | SubmissionPhase::Failed) {
            self.phase = SubmissionPhase::Idle;
        }
    }

    fn fail(&mut self, e: EstimateError) -> EstimateError {
        self.phase = SubmissionPhase::Failed;
        e
    }
}

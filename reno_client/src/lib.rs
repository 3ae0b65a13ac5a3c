//! # reno_client - Service Transport and Submission Orchestration
//!
//! HTTP client for the two external collaborators of the RenoCalc core:
//! the calculation service and the template persistence service. Also
//! home of the submission orchestrator, the state machine that takes an
//! [`reno_core::store::EstimateState`] through validation and one
//! request/response exchange.
//!
//! The transport contract is small: JSON bodies, a `{success, ...}`
//! envelope, and a CSRF token read from the `csrftoken` cookie and echoed
//! as `X-CSRFToken` on every non-GET request.

pub mod calculate;
pub mod orchestrator;
pub mod templates;
pub mod transport;

pub use orchestrator::{Orchestrator, SubmissionPhase};
pub use templates::{apply_template, TemplateData, TemplateMaterial, TemplateOpening, TemplateRoom};
pub use transport::ServiceClient;

//! # Calculation Exchange
//!
//! Single request/response exchange with the calculation service:
//! `POST /calculate-materials/` with `{room, materials, openings}`,
//! answered by `{success: true, calculations: [...]}`.

use serde::Deserialize;

use reno_core::errors::{EstimateError, EstimateResult};
use reno_core::prepare::CalculationRequest;
use reno_core::results::CalculationEntry;

use crate::transport::{decode, transport_error, ServiceClient};

pub(crate) const CALCULATE_PATH: &str = "/calculate-materials/";

#[derive(Debug, Deserialize)]
pub(crate) struct CalculateEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub calculations: Option<Vec<CalculationEntry>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Unwrap the envelope: a successful response must carry a calculations
/// list, anything else is unusable.
pub(crate) fn entries_from(envelope: CalculateEnvelope) -> EstimateResult<Vec<CalculationEntry>> {
    if !envelope.success {
        let reason = envelope
            .error
            .unwrap_or_else(|| "service reported failure".to_string());
        return Err(EstimateError::malformed_response(reason));
    }
    envelope
        .calculations
        .ok_or_else(|| EstimateError::malformed_response("response carried no calculations list"))
}

impl ServiceClient {
    /// Perform the calculation exchange
    pub async fn calculate(
        &self,
        request: &CalculationRequest,
    ) -> EstimateResult<Vec<CalculationEntry>> {
        let response = self
            .post(CALCULATE_PATH)?
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;
        let envelope: CalculateEnvelope = decode(response).await?;
        entries_from(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_envelope() {
        let envelope: CalculateEnvelope = serde_json::from_str(
            r#"{
                "success": true,
                "calculations": [
                    {"name": "Обои", "area": 30.0, "quantity": 7.0, "unit": "рулонов", "price": 7000}
                ]
            }"#,
        )
        .unwrap();

        let entries = entries_from(envelope).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Обои");
        assert_eq!(entries[0].unit.as_deref(), Some("рулонов"));
    }

    #[test]
    fn test_success_without_calculations_is_malformed() {
        let envelope: CalculateEnvelope =
            serde_json::from_str(r#"{"success": true}"#).unwrap();
        let err = entries_from(envelope).unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_RESPONSE");
    }

    #[test]
    fn test_reported_failure_carries_message() {
        let envelope: CalculateEnvelope =
            serde_json::from_str(r#"{"success": false, "error": "Неизвестный материал"}"#)
                .unwrap();
        let err = entries_from(envelope).unwrap_err();
        assert_eq!(
            err,
            EstimateError::malformed_response("Неизвестный материал")
        );
    }
}

//! # Template Persistence
//!
//! Save, load, and delete estimate templates. Saving sends the raw,
//! unfiltered material records (a template may legitimately hold
//! half-finished cards); loading replaces the current state wholesale and
//! silently skips entries whose material type the registry no longer
//! knows or whose data map is empty.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use reno_core::errors::{EstimateError, EstimateResult};
use reno_core::room::{OpeningKind, OpeningRecord, RoomDraft, RoomRecord};
use reno_core::schema::MaterialType;
use reno_core::store::{EstimateState, MaterialRecord};

use crate::transport::{decode, transport_error, ServiceClient};

pub(crate) const SAVE_PATH: &str = "/save-template/";
pub(crate) const DELETE_PATH: &str = "/delete-current-template/";

#[derive(Debug, Serialize)]
struct TemplateSaveRequest<'a> {
    room: RoomRecord,
    materials: Vec<&'a MaterialRecord>,
    openings: &'a [OpeningRecord],
}

#[derive(Debug, Deserialize)]
struct SaveEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    template_id: Option<i64>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TemplateEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    template: Option<TemplateData>,
    #[serde(default)]
    error: Option<String>,
}

/// Saved template as the service returns it
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateData {
    pub room: TemplateRoom,
    #[serde(default)]
    pub openings: Vec<TemplateOpening>,
    #[serde(default)]
    pub materials: Vec<TemplateMaterial>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TemplateRoom {
    pub name: String,
    pub width: f64,
    pub length: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TemplateOpening {
    pub opening_type: String,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TemplateMaterial {
    pub material_type: String,
    #[serde(default)]
    pub data: BTreeMap<String, serde_json::Value>,
}

fn reported_failure(error: Option<String>, fallback: &str) -> EstimateError {
    EstimateError::malformed_response(error.unwrap_or_else(|| fallback.to_string()))
}

impl ServiceClient {
    /// Save the current state as a template. The room must validate and
    /// at least one material card must exist, but cards are sent raw and
    /// unfiltered.
    pub async fn save_template(&self, state: &EstimateState) -> EstimateResult<i64> {
        let room = state.room.to_record(&state.openings)?;
        if state.materials.is_empty() {
            return Err(EstimateError::NoMaterials);
        }

        let body = TemplateSaveRequest {
            room,
            materials: state.materials.all().collect(),
            openings: &state.openings,
        };

        let response = self
            .post(SAVE_PATH)?
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;
        let envelope: SaveEnvelope = decode(response).await?;

        if !envelope.success {
            return Err(reported_failure(envelope.error, "template save failed"));
        }
        envelope
            .template_id
            .ok_or_else(|| EstimateError::malformed_response("save response carried no template id"))
    }

    /// Fetch a saved template by id
    pub async fn get_template(&self, template_id: i64) -> EstimateResult<TemplateData> {
        let response = self
            .get(&format!("/get-template/{template_id}/"))?
            .send()
            .await
            .map_err(transport_error)?;
        let envelope: TemplateEnvelope = decode(response).await?;

        if !envelope.success {
            return Err(reported_failure(envelope.error, "template load failed"));
        }
        envelope
            .template
            .ok_or_else(|| EstimateError::malformed_response("load response carried no template"))
    }

    /// Delete a saved template by id
    pub async fn delete_template(&self, template_id: i64) -> EstimateResult<()> {
        let response = self
            .delete(&format!("{DELETE_PATH}?template_id={template_id}"))?
            .send()
            .await
            .map_err(transport_error)?;
        let envelope: StatusEnvelope = decode(response).await?;

        if !envelope.success {
            return Err(reported_failure(envelope.error, "template delete failed"));
        }
        Ok(())
    }
}

/// Replace the current state with a loaded template.
///
/// Openings and materials are rebuilt from scratch; material entries with
/// an unregistered type tag or an empty data map are skipped without an
/// error. Field values run through the store's normal normalization, so a
/// template holding stale invalid values loads as invalid fields, same as
/// if the user had typed them.
pub fn apply_template(state: &mut EstimateState, template: &TemplateData) {
    state.room = RoomDraft::new(
        template.room.name.clone(),
        template.room.width,
        template.room.length,
        template.room.height,
    );

    state.openings = template
        .openings
        .iter()
        .map(|o| OpeningRecord::new(OpeningKind::from_tag(&o.opening_type), o.width, o.height))
        .collect();

    state.materials.reset();
    for entry in &template.materials {
        if entry.data.is_empty() {
            continue;
        }
        let Ok(material_type) = MaterialType::from_tag(&entry.material_type) else {
            continue;
        };

        let id = state.materials.create(material_type);
        for (field, value) in &entry.data {
            let raw = match value {
                serde_json::Value::Null => continue,
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            // Invalid stored values load as invalid fields; that is fine
            let _ = state.materials.set_field(&id, field, &raw);
        }
    }
}

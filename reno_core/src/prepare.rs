//! # Material Filtering and Payload Assembly
//!
//! Turns the set of in-progress material records into the request payload
//! for the calculation service. A record is submittable iff every field in
//! its schema's required list holds a value that is neither absent nor a
//! non-positive/NaN number (non-empty text for choice fields). Records
//! that fail are dropped from the submission set, not flagged: a
//! partially-filled card is silently excluded rather than submitted with
//! gaps.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::room::{OpeningRecord, RoomRecord};
use crate::schema::MaterialType;
use crate::store::{EstimateState, FieldValue, MaterialRecord, MaterialStore};

/// A validated material ready to submit: `type` plus exactly the schema's
/// required fields, with defaults merged for any field still absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedMaterial {
    #[serde(rename = "type")]
    pub material_type: MaterialType,
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl PreparedMaterial {
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}

/// Request body for the calculation service exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub room: RoomRecord,
    pub materials: Vec<PreparedMaterial>,
    pub openings: Vec<OpeningRecord>,
}

fn field_is_filled(value: &FieldValue) -> bool {
    match value {
        FieldValue::Number(v) => v.is_finite() && *v > 0.0,
        FieldValue::Text(s) => !s.trim().is_empty(),
    }
}

/// Validate one record against its schema and build the submittable
/// projection, or `None` if any required field is missing or invalid.
///
/// The output carries only `type` and the required fields; defaults fill
/// fields still absent in the output and never override an explicit value.
pub fn validate_and_prepare(record: &MaterialRecord) -> Option<PreparedMaterial> {
    let schema = record.material_type.schema();

    let mut fields = BTreeMap::new();
    for name in schema.required_fields {
        let value = record.field(name)?;
        if !field_is_filled(value) {
            return None;
        }
        fields.insert((*name).to_string(), value.clone());
    }

    for (name, value) in schema.defaults {
        fields
            .entry((*name).to_string())
            .or_insert(FieldValue::Number(*value));
    }

    Some(PreparedMaterial {
        material_type: record.material_type,
        fields,
    })
}

/// Filter the store down to submittable materials.
///
/// Fails with NoMaterials when the user has not added a single card, and
/// with NoValidMaterials when every card failed validation — the request
/// is never sent with an empty material list.
pub fn filter_materials(store: &MaterialStore) -> EstimateResult<Vec<PreparedMaterial>> {
    if store.is_empty() {
        return Err(EstimateError::NoMaterials);
    }

    let materials: Vec<_> = store.all().filter_map(validate_and_prepare).collect();
    if materials.is_empty() {
        return Err(EstimateError::NoValidMaterials);
    }
    Ok(materials)
}

/// Assemble the full request: room validation first, then material
/// filtering. Any failure aborts before anything reaches the network.
pub fn prepare_submission(state: &EstimateState) -> EstimateResult<CalculationRequest> {
    let room = state.room.to_record(&state.openings)?;
    let materials = filter_materials(&state.materials)?;
    Ok(CalculationRequest {
        room,
        materials,
        openings: state.openings.clone(),
    })
}

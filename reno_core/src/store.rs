//! # Material Store
//!
//! Owns all user-entered, possibly-invalid material state. Each material
//! card on screen is a view over one [`MaterialRecord`] here; the store is
//! the source of truth and views are resynchronized from it (e.g. when a
//! saved template replaces the current state).
//!
//! Records are keyed by a generated [`Uuid`]; no two live records ever
//! share an id. Iteration order is insertion order, which only matters
//! for display: validation treats the collection as unordered.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{EstimateError, EstimateResult};
use crate::room::{validate_opening, validate_room, OpeningRecord, RoomDraft};
use crate::schema::{FieldWidget, MaterialType};

/// One normalized field value. A field the user blanked or filled with an
/// invalid number is stored as `None` (the original form kept `null`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) => Some(*v),
            FieldValue::Text(_) => None,
        }
    }
}

/// Outcome of a field edit, used by the view to mark the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    Valid,
    Invalid,
}

/// One in-progress material card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub material_type: MaterialType,
    pub name: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Option<FieldValue>>,
}

impl MaterialRecord {
    fn new(material_type: MaterialType) -> Self {
        MaterialRecord {
            id: Uuid::new_v4(),
            material_type,
            name: material_type.label().to_string(),
            fields: BTreeMap::new(),
        }
    }

    /// Current value of a field, flattening "never edited" and "edited to
    /// an invalid value" into `None`
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name).and_then(|v| v.as_ref())
    }
}

/// Normalize a raw numeric input: blank, unparsable, NaN, or non-positive
/// values all become `None`
fn normalize_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Some(v),
        _ => None,
    }
}

/// Mutable collection of in-progress material records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterialStore {
    records: Vec<MaterialRecord>,
}

impl MaterialStore {
    pub fn new() -> Self {
        MaterialStore::default()
    }

    /// Install an empty record for the given type and return its id.
    /// Does not validate: a freshly created card has no values yet.
    pub fn create(&mut self, material_type: MaterialType) -> Uuid {
        let record = MaterialRecord::new(material_type);
        let id = record.id;
        self.records.push(record);
        id
    }

    pub fn get(&self, id: &Uuid) -> Option<&MaterialRecord> {
        self.records.iter().find(|r| r.id == *id)
    }

    pub fn get_mut(&mut self, id: &Uuid) -> Option<&mut MaterialRecord> {
        self.records.iter_mut().find(|r| r.id == *id)
    }

    /// Normalize and store one field edit.
    ///
    /// Numeric widgets parse to a positive float or `None`; choice and
    /// free-form inputs pass through as text. The returned status tells
    /// the view whether to mark the input invalid; it never blocks
    /// further edits.
    pub fn set_field(
        &mut self,
        id: &Uuid,
        field: &str,
        raw: &str,
    ) -> EstimateResult<FieldStatus> {
        let record = self
            .get_mut(id)
            .ok_or(EstimateError::UnknownRecord { id: *id })?;

        let widget = record.material_type.schema().widget_for(field);
        let (value, status) = match widget {
            Some(FieldWidget::Number { .. }) => match normalize_number(raw) {
                Some(v) => (Some(FieldValue::Number(v)), FieldStatus::Valid),
                None => (None, FieldStatus::Invalid),
            },
            // Choice widgets and free-form fields pass through as-is
            _ => (Some(FieldValue::Text(raw.to_string())), FieldStatus::Valid),
        };

        record.fields.insert(field.to_string(), value);
        Ok(status)
    }

    /// Delete a record after the confirmation collaborator approves.
    /// A declined confirmation leaves the record untouched.
    pub fn remove<C>(&mut self, id: &Uuid, confirm: C) -> Option<MaterialRecord>
    where
        C: FnOnce(&MaterialRecord) -> bool,
    {
        let index = self.records.iter().position(|r| r.id == *id)?;
        if !confirm(&self.records[index]) {
            return None;
        }
        Some(self.records.remove(index))
    }

    /// All current records in insertion order
    pub fn all(&self) -> impl Iterator<Item = &MaterialRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Clear every record (used when a template load replaces state wholesale)
    pub fn reset(&mut self) {
        self.records.clear();
    }
}

/// Owned, explicitly-scoped estimation state: the room form, the opening
/// list, and the material store. Passed to the orchestrator instead of
/// living in ambient globals.
#[derive(Debug, Clone, Default)]
pub struct EstimateState {
    pub room: RoomDraft,
    pub openings: Vec<OpeningRecord>,
    pub materials: MaterialStore,
}

impl EstimateState {
    pub fn new() -> Self {
        EstimateState::default()
    }

    /// Validate and append an opening. The room must validate first; the
    /// cumulative 90% cap includes the candidate being inserted.
    pub fn add_opening(&mut self, opening: OpeningRecord) -> EstimateResult<()> {
        validate_room(&self.room)?;
        validate_opening(&self.room, &self.openings, &opening)?;
        self.openings.push(opening);
        Ok(())
    }

    /// Remove an opening by position after the confirmation collaborator
    /// approves
    pub fn remove_opening<C>(&mut self, index: usize, confirm: C) -> Option<OpeningRecord>
    where
        C: FnOnce(&OpeningRecord) -> bool,
    {
        let opening = self.openings.get(index)?;
        if !confirm(opening) {
            return None;
        }
        Some(self.openings.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::OpeningKind;

    #[test]
    fn test_create_installs_empty_record() {
        let mut store = MaterialStore::new();
        let id = store.create(MaterialType::Wallpaper);

        let record = store.get(&id).unwrap();
        assert_eq!(record.material_type, MaterialType::Wallpaper);
        assert_eq!(record.name, "Обои");
        assert!(record.fields.is_empty());
    }

    #[test]
    fn test_ids_are_unique_across_records() {
        let mut store = MaterialStore::new();
        let a = store.create(MaterialType::Tile);
        let b = store.create(MaterialType::Tile);
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_numeric_normalization() {
        let mut store = MaterialStore::new();
        let id = store.create(MaterialType::Wallpaper);

        // Positive numeric string parses and clears the invalid mark
        let status = store.set_field(&id, "width", "1.06").unwrap();
        assert_eq!(status, FieldStatus::Valid);
        assert_eq!(
            store.get(&id).unwrap().field("width"),
            Some(&FieldValue::Number(1.06))
        );

        // Blank, non-positive, and unparsable inputs normalize to None
        for raw in ["", "   ", "0", "-3", "abc", "NaN"] {
            let status = store.set_field(&id, "width", raw).unwrap();
            assert_eq!(status, FieldStatus::Invalid, "raw = {:?}", raw);
            assert_eq!(store.get(&id).unwrap().field("width"), None);
        }
    }

    #[test]
    fn test_choice_field_passes_through() {
        let mut store = MaterialStore::new();
        let id = store.create(MaterialType::StretchCeiling);

        let status = store.set_field(&id, "material_type", "pvc").unwrap();
        assert_eq!(status, FieldStatus::Valid);
        assert_eq!(
            store.get(&id).unwrap().field("material_type"),
            Some(&FieldValue::Text("pvc".to_string()))
        );
    }

    #[test]
    fn test_set_field_unknown_record() {
        let mut store = MaterialStore::new();
        let err = store.set_field(&Uuid::new_v4(), "price", "10").unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_RECORD");
    }

    #[test]
    fn test_remove_respects_confirmation() {
        let mut store = MaterialStore::new();
        let id = store.create(MaterialType::Paint);

        // Declined: record untouched
        assert!(store.remove(&id, |_| false).is_none());
        assert_eq!(store.len(), 1);

        // Confirmed: record gone
        let removed = store.remove(&id, |_| true).unwrap();
        assert_eq!(removed.id, id);
        assert!(store.is_empty());
    }

    #[test]
    fn test_iteration_is_insertion_order() {
        let mut store = MaterialStore::new();
        store.create(MaterialType::Brick);
        store.create(MaterialType::Paint);
        store.create(MaterialType::Grillato);

        let types: Vec<_> = store.all().map(|r| r.material_type).collect();
        assert_eq!(
            types,
            [MaterialType::Brick, MaterialType::Paint, MaterialType::Grillato]
        );
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut store = MaterialStore::new();
        store.create(MaterialType::Armstrong);
        store.create(MaterialType::Drywall);
        store.reset();
        assert!(store.is_empty());
    }

    #[test]
    fn test_record_wire_shape() {
        let mut store = MaterialStore::new();
        let id = store.create(MaterialType::Wallpaper);
        store.set_field(&id, "price", "1000").unwrap();
        store.set_field(&id, "width", "").unwrap();

        let json = serde_json::to_value(store.get(&id).unwrap()).unwrap();
        assert_eq!(json["type"], "wallpaper");
        assert_eq!(json["name"], "Обои");
        assert_eq!(json["price"], 1000.0);
        // Invalid edits are carried as null, like the original form state
        assert!(json["width"].is_null());
    }

    #[test]
    fn test_state_add_opening_validates_room_first() {
        let mut state = EstimateState::new();
        let window = OpeningRecord::new(OpeningKind::Window, 1.0, 1.0);

        // Blank room: rejected before any opening rule runs
        let err = state.add_opening(window).unwrap_err();
        assert_eq!(err, EstimateError::EmptyRoomName);

        state.room = RoomDraft::new("Кухня", 3.0, 4.0, 2.5);
        assert!(state.add_opening(window).is_ok());
        assert_eq!(state.openings.len(), 1);
    }

    #[test]
    fn test_state_remove_opening() {
        let mut state = EstimateState::new();
        state.room = RoomDraft::new("Кухня", 3.0, 4.0, 2.5);
        state
            .add_opening(OpeningRecord::new(OpeningKind::Door, 0.9, 2.0))
            .unwrap();

        assert!(state.remove_opening(0, |_| false).is_none());
        assert_eq!(state.openings.len(), 1);

        let removed = state.remove_opening(0, |_| true).unwrap();
        assert_eq!(removed.kind, OpeningKind::Door);
        assert!(state.openings.is_empty());
    }
}

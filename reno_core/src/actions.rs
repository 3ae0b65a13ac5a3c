//! # Interaction Dispatch
//!
//! Explicit handler table for user interactions: each [`Action`] takes the
//! current [`EstimateState`], mutates it, and returns an [`Effect`] telling
//! the view what to redraw. This replaces the original's tangle of DOM
//! event callbacks with one dispatch point.

use uuid::Uuid;

use crate::room::{OpeningKind, OpeningRecord};
use crate::schema::MaterialType;
use crate::store::{EstimateState, FieldStatus};

/// Room dimension fields addressable from the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomField {
    Width,
    Length,
    Height,
}

/// One user interaction. Removal actions carry the outcome of the
/// confirmation prompt, which is the view's collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetRoomName(String),
    SetRoomDimension { field: RoomField, raw: String },
    AddMaterial(MaterialType),
    SetMaterialField { id: Uuid, field: String, raw: String },
    RemoveMaterial { id: Uuid, confirmed: bool },
    AddOpening { kind: OpeningKind, width: f64, height: f64 },
    RemoveOpening { index: usize, confirmed: bool },
    ResetMaterials,
}

/// Rendering instruction produced by a handler
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    MaterialAdded(Uuid),
    MarkField { id: Uuid, field: String, valid: bool },
    RefreshMaterials,
    RefreshOpenings,
    ShowError(String),
}

/// Blank numeric input parses to NaN, like the original form fields
fn parse_dimension(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Apply one interaction to the state and produce a rendering instruction
pub fn apply(state: &mut EstimateState, action: Action) -> Effect {
    match action {
        Action::SetRoomName(name) => {
            state.room.name = name;
            Effect::None
        }
        Action::SetRoomDimension { field, raw } => {
            let value = parse_dimension(&raw);
            match field {
                RoomField::Width => state.room.width = value,
                RoomField::Length => state.room.length = value,
                RoomField::Height => state.room.height = value,
            }
            Effect::None
        }
        Action::AddMaterial(material_type) => {
            Effect::MaterialAdded(state.materials.create(material_type))
        }
        Action::SetMaterialField { id, field, raw } => {
            match state.materials.set_field(&id, &field, &raw) {
                Ok(status) => Effect::MarkField {
                    id,
                    field,
                    valid: status == FieldStatus::Valid,
                },
                Err(e) => Effect::ShowError(e.to_string()),
            }
        }
        Action::RemoveMaterial { id, confirmed } => {
            match state.materials.remove(&id, |_| confirmed) {
                Some(_) => Effect::RefreshMaterials,
                None => Effect::None,
            }
        }
        Action::AddOpening {
            kind,
            width,
            height,
        } => match state.add_opening(OpeningRecord::new(kind, width, height)) {
            Ok(()) => Effect::RefreshOpenings,
            Err(e) => Effect::ShowError(e.to_string()),
        },
        Action::RemoveOpening { index, confirmed } => {
            match state.remove_opening(index, |_| confirmed) {
                Some(_) => Effect::RefreshOpenings,
                None => Effect::None,
            }
        }
        Action::ResetMaterials => {
            state.materials.reset();
            Effect::RefreshMaterials
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::RoomDraft;

    fn kitchen_state() -> EstimateState {
        let mut state = EstimateState::new();
        state.room = RoomDraft::new("Кухня", 3.0, 4.0, 2.5);
        state
    }

    #[test]
    fn test_room_dimension_parsing() {
        let mut state = EstimateState::new();
        apply(
            &mut state,
            Action::SetRoomDimension {
                field: RoomField::Width,
                raw: "3.5".to_string(),
            },
        );
        assert_eq!(state.room.width, 3.5);

        apply(
            &mut state,
            Action::SetRoomDimension {
                field: RoomField::Height,
                raw: "".to_string(),
            },
        );
        assert!(state.room.height.is_nan());
    }

    #[test]
    fn test_add_and_edit_material() {
        let mut state = kitchen_state();
        let effect = apply(&mut state, Action::AddMaterial(MaterialType::Wallpaper));
        let id = match effect {
            Effect::MaterialAdded(id) => id,
            other => panic!("unexpected effect {:?}", other),
        };

        let effect = apply(
            &mut state,
            Action::SetMaterialField {
                id,
                field: "price".to_string(),
                raw: "1000".to_string(),
            },
        );
        assert_eq!(
            effect,
            Effect::MarkField {
                id,
                field: "price".to_string(),
                valid: true
            }
        );

        let effect = apply(
            &mut state,
            Action::SetMaterialField {
                id,
                field: "width".to_string(),
                raw: "-1".to_string(),
            },
        );
        assert_eq!(
            effect,
            Effect::MarkField {
                id,
                field: "width".to_string(),
                valid: false
            }
        );
    }

    #[test]
    fn test_remove_material_needs_confirmation() {
        let mut state = kitchen_state();
        let id = state.materials.create(MaterialType::Paint);

        let effect = apply(&mut state, Action::RemoveMaterial { id, confirmed: false });
        assert_eq!(effect, Effect::None);
        assert_eq!(state.materials.len(), 1);

        let effect = apply(&mut state, Action::RemoveMaterial { id, confirmed: true });
        assert_eq!(effect, Effect::RefreshMaterials);
        assert!(state.materials.is_empty());
    }

    #[test]
    fn test_add_opening_surfaces_validation_error() {
        let mut state = kitchen_state();
        let effect = apply(
            &mut state,
            Action::AddOpening {
                kind: OpeningKind::Window,
                width: 10.0,
                height: 1.0,
            },
        );
        assert!(matches!(effect, Effect::ShowError(_)));
        assert!(state.openings.is_empty());

        let effect = apply(
            &mut state,
            Action::AddOpening {
                kind: OpeningKind::Window,
                width: 1.0,
                height: 1.2,
            },
        );
        assert_eq!(effect, Effect::RefreshOpenings);
        assert_eq!(state.openings.len(), 1);
    }

    #[test]
    fn test_reset_materials() {
        let mut state = kitchen_state();
        state.materials.create(MaterialType::Tile);
        let effect = apply(&mut state, Action::ResetMaterials);
        assert_eq!(effect, Effect::RefreshMaterials);
        assert!(state.materials.is_empty());
    }
}

//! # Room and Opening Model
//!
//! The room is assembled on demand from in-progress form fields
//! ([`RoomDraft`]) into a validated [`RoomRecord`]. Openings (windows and
//! doors) live in an ordered list whose index doubles as removal identity.
//!
//! Validation rules:
//! - name must be non-empty after trimming
//! - width, length, height must be finite and positive
//! - an opening may not be wider than the larger room side or taller than
//!   the room, and openings may not cumulatively cover more than 90% of
//!   the wall area `2 × (width + length) × height`

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};

/// Share of the wall area that openings may cumulatively occupy
pub const OPENING_AREA_SHARE: f64 = 0.9;

/// Window or door
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningKind {
    Window,
    Door,
}

impl OpeningKind {
    /// Parse a wire tag. Anything other than "window" is treated as a
    /// door, matching how saved templates are displayed.
    pub fn from_tag(tag: &str) -> Self {
        if tag == "window" {
            OpeningKind::Window
        } else {
            OpeningKind::Door
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OpeningKind::Window => "Окно",
            OpeningKind::Door => "Дверь",
        }
    }
}

/// One window or door. No identity beyond its list position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpeningRecord {
    #[serde(rename = "type")]
    pub kind: OpeningKind,
    pub width: f64,
    pub height: f64,
}

impl OpeningRecord {
    pub fn new(kind: OpeningKind, width: f64, height: f64) -> Self {
        OpeningRecord {
            kind,
            width,
            height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// In-progress room form fields. Dimensions default to NaN (nothing
/// entered yet), the same shape a blank numeric input parses to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDraft {
    pub name: String,
    pub width: f64,
    pub length: f64,
    pub height: f64,
}

impl Default for RoomDraft {
    fn default() -> Self {
        RoomDraft {
            name: String::new(),
            width: f64::NAN,
            length: f64::NAN,
            height: f64::NAN,
        }
    }
}

impl RoomDraft {
    pub fn new(name: impl Into<String>, width: f64, length: f64, height: f64) -> Self {
        RoomDraft {
            name: name.into(),
            width,
            length,
            height,
        }
    }

    /// Total wall area `2 × (width + length) × height`
    pub fn wall_area(&self) -> f64 {
        2.0 * (self.width + self.length) * self.height
    }

    /// Validate and assemble the submittable room record.
    ///
    /// Never produces a partially-valid room: the first violated
    /// constraint aborts with a user-facing error.
    pub fn to_record(&self, openings: &[OpeningRecord]) -> EstimateResult<RoomRecord> {
        validate_room(self)?;
        Ok(RoomRecord {
            name: self.name.trim().to_string(),
            width: self.width,
            length: self.length,
            height: self.height,
            openings: openings.to_vec(),
        })
    }
}

/// Validated room, assembled on demand for a submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomRecord {
    pub name: String,
    pub width: f64,
    pub length: f64,
    pub height: f64,
    pub openings: Vec<OpeningRecord>,
}

/// Check room name and dimensions
pub fn validate_room(draft: &RoomDraft) -> EstimateResult<()> {
    if draft.name.trim().is_empty() {
        return Err(EstimateError::EmptyRoomName);
    }
    for (field, value) in [
        ("width", draft.width),
        ("length", draft.length),
        ("height", draft.height),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(EstimateError::invalid_dimension(field, value));
        }
    }
    Ok(())
}

/// Check a candidate opening against the room and the openings already
/// present. The 90% cap is evaluated including the candidate's area.
pub fn validate_opening(
    draft: &RoomDraft,
    existing: &[OpeningRecord],
    candidate: &OpeningRecord,
) -> EstimateResult<()> {
    if !candidate.width.is_finite() || candidate.width <= 0.0 {
        return Err(EstimateError::invalid_opening("width", candidate.width));
    }
    if !candidate.height.is_finite() || candidate.height <= 0.0 {
        return Err(EstimateError::invalid_opening("height", candidate.height));
    }

    let side_limit = draft.width.max(draft.length);
    if candidate.width > side_limit {
        return Err(EstimateError::OpeningTooWide {
            width: candidate.width,
            limit: side_limit,
        });
    }
    if candidate.height > draft.height {
        return Err(EstimateError::OpeningTooTall {
            height: candidate.height,
            limit: draft.height,
        });
    }

    let total_area: f64 =
        existing.iter().map(OpeningRecord::area).sum::<f64>() + candidate.area();
    let cap = draft.wall_area() * OPENING_AREA_SHARE;
    if total_area > cap {
        return Err(EstimateError::OpeningAreaCap { total_area, cap });
    }

    Ok(())
}

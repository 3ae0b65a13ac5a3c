//! # Material Schema Registry
//!
//! Static, process-wide schema table for every supported material type:
//! required fields, default values, display labels, and the input widgets
//! the form renders. The same table backs rendering, field normalization,
//! validation, and payload preparation, so the three consumers can never
//! drift apart.
//!
//! ## Example
//!
//! ```rust
//! use reno_core::schema::MaterialType;
//!
//! let schema = MaterialType::Wallpaper.schema();
//! assert_eq!(schema.required_fields, ["price", "width", "length"]);
//! assert_eq!(schema.label, "Обои");
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};

/// Closed set of material type tags.
///
/// Adding a type requires adding a schema entry in this module; the
/// registry tests enforce that every type has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialType {
    Wallpaper,
    Paint,
    Laminate,
    Tile,
    Drywall,
    Brick,
    FloorScreed,
    ThermoPanel,
    StretchCeiling,
    Armstrong,
    Grillato,
}

/// All material types in dropdown/display order
pub const ALL_TYPES: [MaterialType; 11] = [
    MaterialType::Wallpaper,
    MaterialType::Paint,
    MaterialType::Laminate,
    MaterialType::Tile,
    MaterialType::Drywall,
    MaterialType::Brick,
    MaterialType::FloorScreed,
    MaterialType::ThermoPanel,
    MaterialType::StretchCeiling,
    MaterialType::Armstrong,
    MaterialType::Grillato,
];

static TAG_INDEX: Lazy<HashMap<&'static str, MaterialType>> = Lazy::new(|| {
    ALL_TYPES.iter().map(|t| (t.as_tag(), *t)).collect()
});

impl MaterialType {
    /// The wire tag for this type (matches the serde representation)
    pub fn as_tag(&self) -> &'static str {
        match self {
            MaterialType::Wallpaper => "wallpaper",
            MaterialType::Paint => "paint",
            MaterialType::Laminate => "laminate",
            MaterialType::Tile => "tile",
            MaterialType::Drywall => "drywall",
            MaterialType::Brick => "brick",
            MaterialType::FloorScreed => "floor_screed",
            MaterialType::ThermoPanel => "thermo_panel",
            MaterialType::StretchCeiling => "stretch_ceiling",
            MaterialType::Armstrong => "armstrong",
            MaterialType::Grillato => "grillato",
        }
    }

    /// Parse a wire tag. Fails with UnknownMaterialType for tags outside
    /// the closed set (e.g. a template saved by a newer client).
    pub fn from_tag(tag: &str) -> EstimateResult<Self> {
        TAG_INDEX
            .get(tag)
            .copied()
            .ok_or_else(|| EstimateError::unknown_material_type(tag))
    }

    /// Schema entry for this type. Infallible: the set is closed.
    pub fn schema(&self) -> &'static MaterialSchema {
        match self {
            MaterialType::Wallpaper => &WALLPAPER,
            MaterialType::Paint => &PAINT,
            MaterialType::Laminate => &LAMINATE,
            MaterialType::Tile => &TILE,
            MaterialType::Drywall => &DRYWALL,
            MaterialType::Brick => &BRICK,
            MaterialType::FloorScreed => &FLOOR_SCREED,
            MaterialType::ThermoPanel => &THERMO_PANEL,
            MaterialType::StretchCeiling => &STRETCH_CEILING,
            MaterialType::Armstrong => &ARMSTRONG,
            MaterialType::Grillato => &GRILLATO,
        }
    }

    /// Human-readable display label
    pub fn label(&self) -> &'static str {
        self.schema().label
    }
}

impl std::fmt::Display for MaterialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Input widget kind for one schema field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldWidget {
    /// Numeric input with a minimum-valid bound and spinner step
    Number {
        min: f64,
        step: f64,
        default: Option<f64>,
    },
    /// Single-choice input (e.g. stretch-ceiling material)
    Choice {
        options: &'static [&'static str],
        default: &'static str,
    },
}

/// Rendering metadata for one input of a material card
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub widget: FieldWidget,
}

/// Immutable per-type schema: required fields, defaults, label, inputs.
///
/// `required_fields` is ordered; `inputs` is a superset of it (fields
/// such as `pattern_repeat` and `mortar_thickness` are rendered and
/// defaulted but never required).
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialSchema {
    pub label: &'static str,
    pub required_fields: &'static [&'static str],
    pub defaults: &'static [(&'static str, f64)],
    pub inputs: &'static [FieldSpec],
}

impl MaterialSchema {
    /// Widget spec for a named input, if the schema renders one
    pub fn widget_for(&self, field: &str) -> Option<&FieldWidget> {
        self.inputs
            .iter()
            .find(|spec| spec.name == field)
            .map(|spec| &spec.widget)
    }

    /// Default value for a named field, if the schema declares one
    pub fn default_for(&self, field: &str) -> Option<f64> {
        self.defaults
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| *value)
    }
}

/// Price input, common to every material type
const PRICE: FieldSpec = FieldSpec {
    name: "price",
    label: "Цена",
    widget: FieldWidget::Number {
        min: 0.0,
        step: 0.01,
        default: None,
    },
};

const fn number(name: &'static str, label: &'static str, min: f64, step: f64) -> FieldSpec {
    FieldSpec {
        name,
        label,
        widget: FieldWidget::Number {
            min,
            step,
            default: None,
        },
    }
}

const fn number_with_default(
    name: &'static str,
    label: &'static str,
    min: f64,
    step: f64,
    default: f64,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        widget: FieldWidget::Number {
            min,
            step,
            default: Some(default),
        },
    }
}

static WALLPAPER: MaterialSchema = MaterialSchema {
    label: "Обои",
    required_fields: &["price", "width", "length"],
    defaults: &[("pattern_repeat", 0.0)],
    inputs: &[
        PRICE,
        number("width", "Ширина рулона (м)", 0.1, 0.01),
        number("length", "Длина рулона (м)", 0.1, 0.01),
        number_with_default("pattern_repeat", "Раппорт (м)", 0.0, 0.01, 0.0),
    ],
};

static PAINT: MaterialSchema = MaterialSchema {
    label: "Краска",
    required_fields: &["price", "coverage", "layers"],
    defaults: &[("layers", 1.0)],
    inputs: &[
        PRICE,
        number("coverage", "Расход на м² (л)", 0.1, 0.01),
        number_with_default("layers", "Количество слоев", 1.0, 1.0, 1.0),
    ],
};

static LAMINATE: MaterialSchema = MaterialSchema {
    label: "Ламинат",
    required_fields: &["price", "length", "width", "pieces_per_pack"],
    defaults: &[],
    inputs: &[
        PRICE,
        number("length", "Длина доски (м)", 0.1, 0.01),
        number("width", "Ширина доски (м)", 0.1, 0.01),
        number("pieces_per_pack", "Штук в упаковке", 1.0, 1.0),
    ],
};

static TILE: MaterialSchema = MaterialSchema {
    label: "Плитка",
    required_fields: &["price", "length", "width", "pieces_per_pack"],
    defaults: &[],
    inputs: &[
        PRICE,
        number("length", "Длина плитки (м)", 0.1, 0.01),
        number("width", "Ширина плитки (м)", 0.1, 0.01),
        number("pieces_per_pack", "Штук в упаковке", 1.0, 1.0),
    ],
};

static DRYWALL: MaterialSchema = MaterialSchema {
    label: "Гипсокартон",
    required_fields: &["price", "length", "width", "thickness"],
    defaults: &[],
    inputs: &[
        PRICE,
        number("length", "Длина листа (м)", 0.1, 0.01),
        number("width", "Ширина листа (м)", 0.1, 0.01),
        number("thickness", "Толщина (мм)", 0.1, 0.1),
    ],
};

static BRICK: MaterialSchema = MaterialSchema {
    label: "Кирпич",
    required_fields: &["price", "length", "width", "height"],
    defaults: &[("mortar_thickness", 10.0)],
    inputs: &[
        PRICE,
        number("length", "Длина кирпича (мм)", 0.1, 0.1),
        number("width", "Ширина кирпича (мм)", 0.1, 0.1),
        number("height", "Высота кирпича (мм)", 0.1, 0.1),
        number_with_default("mortar_thickness", "Толщина шва (мм)", 5.0, 1.0, 10.0),
    ],
};

static FLOOR_SCREED: MaterialSchema = MaterialSchema {
    label: "Стяжка пола",
    required_fields: &["price", "thickness"],
    defaults: &[],
    inputs: &[PRICE, number("thickness", "Толщина стяжки (мм)", 20.0, 1.0)],
};

static THERMO_PANEL: MaterialSchema = MaterialSchema {
    label: "Термопанели",
    required_fields: &["price", "length", "width", "thickness"],
    defaults: &[],
    inputs: &[
        PRICE,
        number("length", "Длина панели (м)", 0.1, 0.01),
        number("width", "Ширина панели (м)", 0.1, 0.01),
        number("thickness", "Толщина (мм)", 1.0, 1.0),
    ],
};

static STRETCH_CEILING: MaterialSchema = MaterialSchema {
    label: "Натяжные потолки",
    required_fields: &["price", "material_type"],
    defaults: &[],
    inputs: &[
        PRICE,
        FieldSpec {
            name: "material_type",
            label: "Тип материала",
            widget: FieldWidget::Choice {
                options: &["pvc", "textile"],
                default: "pvc",
            },
        },
    ],
};

static ARMSTRONG: MaterialSchema = MaterialSchema {
    label: "Армстронг",
    required_fields: &["price", "panel_size"],
    defaults: &[],
    inputs: &[
        PRICE,
        number_with_default("panel_size", "Размер плиты (мм)", 300.0, 1.0, 600.0),
    ],
};

static GRILLATO: MaterialSchema = MaterialSchema {
    label: "Грильято",
    required_fields: &["price", "cell_size", "height"],
    defaults: &[],
    inputs: &[
        PRICE,
        number("cell_size", "Размер ячейки (мм)", 30.0, 1.0),
        number("height", "Высота решетки (мм)", 30.0, 1.0),
    ],
};

/// Required field names for a wire tag
pub fn fields_for(tag: &str) -> EstimateResult<&'static [&'static str]> {
    Ok(MaterialType::from_tag(tag)?.schema().required_fields)
}

/// Default values for a wire tag
pub fn defaults_for(tag: &str) -> EstimateResult<&'static [(&'static str, f64)]> {
    Ok(MaterialType::from_tag(tag)?.schema().defaults)
}

/// Display label for a wire tag
pub fn label_for(tag: &str) -> EstimateResult<&'static str> {
    Ok(MaterialType::from_tag(tag)?.schema().label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_has_required_fields() {
        for t in ALL_TYPES {
            let schema = t.schema();
            assert!(
                !schema.required_fields.is_empty(),
                "{} has no required fields",
                t.as_tag()
            );
        }
    }

    #[test]
    fn test_required_fields_are_rendered() {
        // Every required field must correspond to an input the card renders
        for t in ALL_TYPES {
            let schema = t.schema();
            for field in schema.required_fields {
                assert!(
                    schema.widget_for(field).is_some(),
                    "{}: required field {} has no input widget",
                    t.as_tag(),
                    field
                );
            }
        }
    }

    #[test]
    fn test_price_is_common_and_first() {
        for t in ALL_TYPES {
            let schema = t.schema();
            assert_eq!(schema.inputs[0].name, "price", "{}", t.as_tag());
            assert_eq!(schema.required_fields[0], "price", "{}", t.as_tag());
        }
    }

    #[test]
    fn test_tag_roundtrip() {
        for t in ALL_TYPES {
            assert_eq!(MaterialType::from_tag(t.as_tag()).unwrap(), t);
        }
        assert_eq!(
            MaterialType::from_tag("linoleum"),
            Err(EstimateError::unknown_material_type("linoleum"))
        );
    }

    #[test]
    fn test_serde_tags_match_as_tag() {
        for t in ALL_TYPES {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_tag()));
        }
    }

    #[test]
    fn test_registry_lookups_by_tag() {
        assert_eq!(
            fields_for("brick").unwrap(),
            ["price", "length", "width", "height"]
        );
        assert_eq!(defaults_for("brick").unwrap(), [("mortar_thickness", 10.0)]);
        assert_eq!(label_for("tile").unwrap(), "Плитка");
        assert!(fields_for("linoleum").is_err());
    }

    #[test]
    fn test_defaulted_fields_are_rendered_with_matching_default() {
        for t in ALL_TYPES {
            let schema = t.schema();
            for (field, value) in schema.defaults {
                match schema.widget_for(field) {
                    Some(FieldWidget::Number { default, .. }) => {
                        assert_eq!(*default, Some(*value), "{} {}", t.as_tag(), field)
                    }
                    other => panic!("{} {}: unexpected widget {:?}", t.as_tag(), field, other),
                }
            }
        }
    }

    #[test]
    fn test_domain_bounds() {
        // Mortar joint floor is 5 mm, screed floor is 20 mm
        match MaterialType::Brick.schema().widget_for("mortar_thickness") {
            Some(FieldWidget::Number { min, .. }) => assert_eq!(*min, 5.0),
            other => panic!("unexpected widget {:?}", other),
        }
        match MaterialType::FloorScreed.schema().widget_for("thickness") {
            Some(FieldWidget::Number { min, .. }) => assert_eq!(*min, 20.0),
            other => panic!("unexpected widget {:?}", other),
        }
    }
}

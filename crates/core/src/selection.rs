//! Product attribute selections: the input state of the variant matrix.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{DiamondAttributeKind, ReferenceCatalog};
use crate::error::CoreError;
use crate::mix_mode::{DiamondMixingMode, MetalMixMode};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Metals
// ---------------------------------------------------------------------------

/// A selected metal together with its selected purities and tones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetalSelection {
    pub metal_id: DbId,
    #[serde(default)]
    pub purity_ids: Vec<DbId>,
    #[serde(default)]
    pub tone_ids: Vec<DbId>,
    #[serde(default)]
    pub mix_mode: MetalMixMode,
}

impl MetalSelection {
    pub fn new(metal_id: DbId) -> Self {
        Self {
            metal_id,
            purity_ids: Vec::new(),
            tone_ids: Vec::new(),
            mix_mode: MetalMixMode::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Diamonds
// ---------------------------------------------------------------------------

/// Stable identifier of a diamond option within a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiamondKey(Uuid);

impl DiamondKey {
    /// Generate a fresh random key.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for DiamondKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A bundle of diamond attributes configured on a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiamondOption {
    pub key: DiamondKey,
    #[serde(default)]
    pub type_id: Option<DbId>,
    #[serde(default)]
    pub shape_id: Option<DbId>,
    #[serde(default)]
    pub color_id: Option<DbId>,
    #[serde(default)]
    pub clarity_id: Option<DbId>,
    #[serde(default)]
    pub cut_id: Option<DbId>,
    /// Carat weight per stone.
    #[serde(default)]
    pub weight: Option<f64>,
    /// Number of stones.
    #[serde(default)]
    pub count: Option<u32>,
}

impl DiamondOption {
    /// An empty option with a freshly generated key.
    pub fn blank() -> Self {
        Self {
            key: DiamondKey::generate(),
            type_id: None,
            shape_id: None,
            color_id: None,
            clarity_id: None,
            cut_id: None,
            weight: None,
            count: None,
        }
    }

    pub fn attribute(&self, kind: DiamondAttributeKind) -> Option<DbId> {
        match kind {
            DiamondAttributeKind::Type => self.type_id,
            DiamondAttributeKind::Shape => self.shape_id,
            DiamondAttributeKind::Color => self.color_id,
            DiamondAttributeKind::Clarity => self.clarity_id,
            DiamondAttributeKind::Cut => self.cut_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Sizes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeUnit {
    #[default]
    Mm,
    Cm,
}

impl SizeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mm => "mm",
            Self::Cm => "cm",
        }
    }

    /// `cm` (any case) is centimetres; anything else is millimetres.
    pub fn parse_lenient(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("cm") {
            Self::Cm
        } else {
            Self::Mm
        }
    }
}

/// A single size-axis value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeValue {
    pub value: f64,
    pub unit: SizeUnit,
}

/// The sizes attached to a product.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SizeSelection {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub unit: SizeUnit,
    #[serde(default)]
    pub values: Vec<f64>,
}

impl SizeSelection {
    pub fn new(unit: SizeUnit, values: Vec<f64>) -> Self {
        Self {
            enabled: true,
            unit,
            values,
        }
    }

    /// Whether the size axis contributes real values.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.values.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Whole selection
// ---------------------------------------------------------------------------

/// Everything the matrix builder needs to know about a product.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VariantSelection {
    #[serde(default)]
    pub base_sku: String,
    #[serde(default)]
    pub metals: Vec<MetalSelection>,
    #[serde(default)]
    pub uses_diamond: bool,
    #[serde(default)]
    pub diamond_options: Vec<DiamondOption>,
    #[serde(default)]
    pub diamond_mixing_mode: DiamondMixingMode,
    #[serde(default)]
    pub sizes: SizeSelection,
}

impl VariantSelection {
    pub fn metal(&self, metal_id: DbId) -> Option<&MetalSelection> {
        self.metals.iter().find(|m| m.metal_id == metal_id)
    }

    pub fn metal_mut(&mut self, metal_id: DbId) -> Option<&mut MetalSelection> {
        self.metals.iter_mut().find(|m| m.metal_id == metal_id)
    }

    /// Diamond options that take part in generation.
    pub fn active_diamonds(&self) -> &[DiamondOption] {
        if self.uses_diamond {
            &self.diamond_options
        } else {
            &[]
        }
    }

    /// Check the selection against the reference catalog.
    pub fn validate_against(&self, catalog: &ReferenceCatalog) -> Result<(), CoreError> {
        let mut seen_metals = HashSet::new();
        for metal in &self.metals {
            validate_metal(metal, catalog)?;
            if !seen_metals.insert(metal.metal_id) {
                return Err(CoreError::Validation(format!(
                    "Metal {} is selected more than once",
                    metal.metal_id
                )));
            }
        }

        let mut seen_keys = HashSet::new();
        for option in &self.diamond_options {
            validate_diamond(option, catalog)?;
            if !seen_keys.insert(option.key) {
                return Err(CoreError::Validation(format!(
                    "Diamond option key {} is used more than once",
                    option.key
                )));
            }
        }

        for (i, value) in self.sizes.values.iter().enumerate() {
            if !value.is_finite() || *value <= 0.0 {
                return Err(CoreError::Validation(format!(
                    "Size values must be positive numbers, got {value}"
                )));
            }
            if self.sizes.values[..i].contains(value) {
                return Err(CoreError::Validation(format!(
                    "Size {value} is selected more than once"
                )));
            }
        }
        Ok(())
    }
}

fn validate_metal(metal: &MetalSelection, catalog: &ReferenceCatalog) -> Result<(), CoreError> {
    if catalog.metal(metal.metal_id).is_none() {
        return Err(CoreError::NotFound {
            entity: "Metal",
            id: metal.metal_id,
        });
    }

    let mut seen = HashSet::new();
    for &purity_id in &metal.purity_ids {
        let purity = catalog.purity(purity_id).ok_or(CoreError::NotFound {
            entity: "MetalPurity",
            id: purity_id,
        })?;
        if purity.metal_id != metal.metal_id {
            return Err(CoreError::Validation(format!(
                "Purity '{}' does not belong to metal {}",
                purity.name, metal.metal_id
            )));
        }
        if !seen.insert(purity_id) {
            return Err(CoreError::Validation(format!(
                "Purity {purity_id} is selected more than once"
            )));
        }
    }

    let mut seen = HashSet::new();
    for &tone_id in &metal.tone_ids {
        let tone = catalog.tone(tone_id).ok_or(CoreError::NotFound {
            entity: "MetalTone",
            id: tone_id,
        })?;
        if tone.metal_id != metal.metal_id {
            return Err(CoreError::Validation(format!(
                "Tone '{}' does not belong to metal {}",
                tone.name, metal.metal_id
            )));
        }
        if !seen.insert(tone_id) {
            return Err(CoreError::Validation(format!(
                "Tone {tone_id} is selected more than once"
            )));
        }
    }
    Ok(())
}

fn validate_diamond(option: &DiamondOption, catalog: &ReferenceCatalog) -> Result<(), CoreError> {
    for kind in DiamondAttributeKind::ALL {
        if let Some(id) = option.attribute(kind) {
            if catalog.diamond_attribute(kind, id).is_none() {
                return Err(CoreError::NotFound {
                    entity: kind.entity(),
                    id,
                });
            }
        }
    }
    if let Some(weight) = option.weight {
        if !weight.is_finite() || weight < 0.0 {
            return Err(CoreError::Validation(format!(
                "Diamond weight must be a non-negative number, got {weight}"
            )));
        }
    }
    Ok(())
}

//! Generated variant records.
//!
//! A [`Variant`] is one sellable combination of metal entries, diamonds and
//! size. Per-slot inputs (metal weights, diamond counts) are optional here;
//! they are entered after generation and checked when the save payload is
//! built.

use serde::{Deserialize, Serialize};

use crate::matrix::identity::IdentityKey;
use crate::matrix::metal::MetalEntry;
use crate::selection::{DiamondKey, DiamondOption, SizeValue};
use crate::types::DbId;

/// A metal entry attached to a variant, with its entered weight in grams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantMetal {
    pub metal_id: DbId,
    pub purity_id: Option<DbId>,
    pub tone_id: Option<DbId>,
    #[serde(default)]
    pub weight: Option<f64>,
}

impl VariantMetal {
    pub fn entry(&self) -> MetalEntry {
        MetalEntry {
            metal_id: self.metal_id,
            purity_id: self.purity_id,
            tone_id: self.tone_id,
        }
    }
}

/// A diamond attached to a variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantDiamond {
    pub key: DiamondKey,
    pub type_id: Option<DbId>,
    pub shape_id: Option<DbId>,
    pub color_id: Option<DbId>,
    pub clarity_id: Option<DbId>,
    pub cut_id: Option<DbId>,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub carat: Option<f64>,
}

impl VariantDiamond {
    /// Seed a variant diamond from its option's own count and weight.
    pub fn from_option(option: &DiamondOption) -> Self {
        Self {
            key: option.key,
            type_id: option.type_id,
            shape_id: option.shape_id,
            color_id: option.color_id,
            clarity_id: option.clarity_id,
            cut_id: option.cut_id,
            count: option.count,
            carat: option.weight,
        }
    }
}

/// One generated, sellable variant row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub identity_key: IdentityKey,
    pub sku: String,
    pub label: String,
    /// SKU last produced by generation; differs from `sku` once hand-edited.
    #[serde(default)]
    pub generated_sku: Option<String>,
    /// Label last produced by generation; differs from `label` once hand-edited.
    #[serde(default)]
    pub generated_label: Option<String>,
    #[serde(default)]
    pub metals: Vec<VariantMetal>,
    #[serde(default)]
    pub diamonds: Vec<VariantDiamond>,
    #[serde(default)]
    pub size: Option<SizeValue>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub inventory_quantity: i32,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl Variant {
    pub fn metal(&self, entry: &MetalEntry) -> Option<&VariantMetal> {
        self.metals.iter().find(|m| m.entry() == *entry)
    }

    pub fn diamond(&self, key: DiamondKey) -> Option<&VariantDiamond> {
        self.diamonds.iter().find(|d| d.key == key)
    }

    /// Whether the SKU still equals its generated value.
    pub fn has_generated_sku(&self) -> bool {
        self.generated_sku.as_deref() == Some(self.sku.as_str())
    }

    /// Whether the label still equals its generated value.
    pub fn has_generated_label(&self) -> bool {
        self.generated_label.as_deref() == Some(self.label.as_str())
    }
}

/// Mark `index` as the only default variant. Out-of-range indexes are ignored.
pub fn set_default(variants: &mut [Variant], index: usize) {
    if index >= variants.len() {
        return;
    }
    for (i, variant) in variants.iter_mut().enumerate() {
        variant.is_default = i == index;
    }
}

//! Save payload for generated variants.
//!
//! The payload is the fully-specified shape handed to persistence: every
//! metal carries a weight and every diamond a stone count. Building it is the
//! last gate before a product is saved.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::selection::{DiamondKey, SizeValue};
use crate::types::DbId;
use crate::variant::Variant;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantMetalPayload {
    pub metal_id: DbId,
    pub purity_id: Option<DbId>,
    pub tone_id: Option<DbId>,
    /// Grams.
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantDiamondPayload {
    pub key: DiamondKey,
    pub type_id: Option<DbId>,
    pub shape_id: Option<DbId>,
    pub color_id: Option<DbId>,
    pub clarity_id: Option<DbId>,
    pub cut_id: Option<DbId>,
    pub count: u32,
    pub carat: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantPayload {
    pub sku: String,
    pub label: String,
    pub metals: Vec<VariantMetalPayload>,
    pub diamonds: Vec<VariantDiamondPayload>,
    pub size: Option<SizeValue>,
    pub is_default: bool,
    pub inventory_quantity: i32,
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// A per-slot input the user still has to fill in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingField {
    MetalWeight {
        metal_id: DbId,
        purity_id: Option<DbId>,
        tone_id: Option<DbId>,
    },
    DiamondCount {
        key: DiamondKey,
    },
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MetalWeight {
                metal_id,
                purity_id,
                tone_id,
            } => {
                write!(f, "weight for metal {metal_id}")?;
                if let Some(p) = purity_id {
                    write!(f, " purity {p}")?;
                }
                if let Some(t) = tone_id {
                    write!(f, " tone {t}")?;
                }
                Ok(())
            }
            Self::DiamondCount { key } => write!(f, "stone count for diamond {key}"),
        }
    }
}

impl Variant {
    /// Per-slot inputs that block saving this variant.
    ///
    /// Metal weights must be positive; diamond counts must be present.
    pub fn missing_fields(&self) -> Vec<MissingField> {
        let metals = self
            .metals
            .iter()
            .filter(|m| !m.weight.is_some_and(|w| w.is_finite() && w > 0.0))
            .map(|m| MissingField::MetalWeight {
                metal_id: m.metal_id,
                purity_id: m.purity_id,
                tone_id: m.tone_id,
            });
        let diamonds = self
            .diamonds
            .iter()
            .filter(|d| d.count.is_none())
            .map(|d| MissingField::DiamondCount { key: d.key });
        metals.chain(diamonds).collect()
    }
}

/// Validate `variants` and convert them into the save payload.
///
/// Fails on a blank SKU, a SKU used twice (case-insensitively), anything but
/// exactly one default, negative inventory, or missing per-slot inputs.
pub fn build_save_payload(variants: &[Variant]) -> Result<Vec<VariantPayload>, CoreError> {
    let mut seen = HashSet::with_capacity(variants.len());
    for variant in variants {
        let sku = variant.sku.trim();
        if sku.is_empty() {
            return Err(CoreError::Validation(format!(
                "Variant '{}' has no SKU",
                variant.label
            )));
        }
        if !seen.insert(sku.to_ascii_uppercase()) {
            return Err(CoreError::Conflict(format!("Duplicate variant SKU '{sku}'")));
        }
    }

    let defaults = variants.iter().filter(|v| v.is_default).count();
    if !variants.is_empty() && defaults != 1 {
        return Err(CoreError::Validation(format!(
            "Exactly one default variant is required, found {defaults}"
        )));
    }

    variants.iter().map(variant_payload).collect()
}

fn variant_payload(variant: &Variant) -> Result<VariantPayload, CoreError> {
    if variant.inventory_quantity < 0 {
        return Err(CoreError::Validation(format!(
            "Variant '{}' has negative inventory",
            variant.sku
        )));
    }

    let missing = variant.missing_fields();
    if !missing.is_empty() {
        let list: Vec<String> = missing.iter().map(ToString::to_string).collect();
        return Err(CoreError::Validation(format!(
            "Variant '{}' is missing {}",
            variant.sku,
            list.join(", ")
        )));
    }

    let metals = variant
        .metals
        .iter()
        .map(|m| VariantMetalPayload {
            metal_id: m.metal_id,
            purity_id: m.purity_id,
            tone_id: m.tone_id,
            weight: m.weight.unwrap_or_default(),
        })
        .collect();
    let diamonds = variant
        .diamonds
        .iter()
        .map(|d| VariantDiamondPayload {
            key: d.key,
            type_id: d.type_id,
            shape_id: d.shape_id,
            color_id: d.color_id,
            clarity_id: d.clarity_id,
            cut_id: d.cut_id,
            count: d.count.unwrap_or_default(),
            carat: d.carat,
        })
        .collect();

    Ok(VariantPayload {
        sku: variant.sku.trim().to_string(),
        label: variant.label.clone(),
        metals,
        diamonds,
        size: variant.size,
        is_default: variant.is_default,
        inventory_quantity: variant.inventory_quantity,
        metadata: variant.metadata.clone(),
    })
}

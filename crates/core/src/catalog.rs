//! Reference catalog: metals, purities, tones, diamond attributes and sizes.
//!
//! The catalog is read-only input to the variant matrix builder. It is loaded
//! once at start-up, either from the embedded seed or from a JSON file with
//! the same shape, and validated before use.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Embedded default catalog.
const BUILTIN_SEED: &str = include_str!("../seed/catalog.json");

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metal {
    pub id: DbId,
    pub name: String,
}

/// A purity grade (e.g. `18K`). Belongs to exactly one metal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetalPurity {
    pub id: DbId,
    pub name: String,
    pub metal_id: DbId,
}

/// A colour tone (e.g. `Rose`). Belongs to exactly one metal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetalTone {
    pub id: DbId,
    pub name: String,
    pub metal_id: DbId,
}

/// One row of a diamond attribute table (type, shape, colour, clarity, cut).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiamondAttribute {
    pub id: DbId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeOption {
    pub id: DbId,
    pub name: String,
    pub code: String,
}

/// The diamond attribute tables, used to address them generically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiamondAttributeKind {
    Type,
    Shape,
    Color,
    Clarity,
    Cut,
}

impl DiamondAttributeKind {
    pub const ALL: [DiamondAttributeKind; 5] = [
        Self::Type,
        Self::Shape,
        Self::Color,
        Self::Clarity,
        Self::Cut,
    ];

    /// Entity name used in error messages.
    pub fn entity(self) -> &'static str {
        match self {
            Self::Type => "DiamondType",
            Self::Shape => "DiamondShape",
            Self::Color => "DiamondColor",
            Self::Clarity => "DiamondClarity",
            Self::Cut => "DiamondCut",
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// All reference tables the variant builder looks up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceCatalog {
    pub metals: Vec<Metal>,
    pub purities: Vec<MetalPurity>,
    pub tones: Vec<MetalTone>,
    pub diamond_types: Vec<DiamondAttribute>,
    pub diamond_shapes: Vec<DiamondAttribute>,
    pub diamond_colors: Vec<DiamondAttribute>,
    pub diamond_clarities: Vec<DiamondAttribute>,
    pub diamond_cuts: Vec<DiamondAttribute>,
    pub sizes: Vec<SizeOption>,
}

impl ReferenceCatalog {
    /// The embedded seed catalog.
    pub fn builtin() -> Result<Self, CoreError> {
        Self::from_json(BUILTIN_SEED)
    }

    /// Parse and validate a catalog from its JSON representation.
    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        let catalog: Self = serde_json::from_str(raw)
            .map_err(|e| CoreError::Validation(format!("Invalid catalog JSON: {e}")))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check table-level integrity.
    ///
    /// Ids must be unique within each table, names must be non-empty and
    /// every purity and tone must point at an existing metal.
    pub fn validate(&self) -> Result<(), CoreError> {
        check_rows("metals", self.metals.iter().map(|m| (m.id, m.name.as_str())))?;
        check_rows(
            "purities",
            self.purities.iter().map(|p| (p.id, p.name.as_str())),
        )?;
        check_rows("tones", self.tones.iter().map(|t| (t.id, t.name.as_str())))?;
        for kind in DiamondAttributeKind::ALL {
            check_rows(
                kind.entity(),
                self.diamond_table(kind)
                    .iter()
                    .map(|a| (a.id, a.name.as_str())),
            )?;
        }
        check_rows("sizes", self.sizes.iter().map(|s| (s.id, s.name.as_str())))?;

        for purity in &self.purities {
            if self.metal(purity.metal_id).is_none() {
                return Err(CoreError::Validation(format!(
                    "Purity '{}' references unknown metal {}",
                    purity.name, purity.metal_id
                )));
            }
        }
        for tone in &self.tones {
            if self.metal(tone.metal_id).is_none() {
                return Err(CoreError::Validation(format!(
                    "Tone '{}' references unknown metal {}",
                    tone.name, tone.metal_id
                )));
            }
        }
        Ok(())
    }

    pub fn metal(&self, id: DbId) -> Option<&Metal> {
        self.metals.iter().find(|m| m.id == id)
    }

    pub fn purity(&self, id: DbId) -> Option<&MetalPurity> {
        self.purities.iter().find(|p| p.id == id)
    }

    pub fn tone(&self, id: DbId) -> Option<&MetalTone> {
        self.tones.iter().find(|t| t.id == id)
    }

    /// Purities selectable for the given metal, in catalog order.
    pub fn purities_for(&self, metal_id: DbId) -> impl Iterator<Item = &MetalPurity> {
        self.purities.iter().filter(move |p| p.metal_id == metal_id)
    }

    /// Tones selectable for the given metal, in catalog order.
    pub fn tones_for(&self, metal_id: DbId) -> impl Iterator<Item = &MetalTone> {
        self.tones.iter().filter(move |t| t.metal_id == metal_id)
    }

    pub fn diamond_table(&self, kind: DiamondAttributeKind) -> &[DiamondAttribute] {
        match kind {
            DiamondAttributeKind::Type => &self.diamond_types,
            DiamondAttributeKind::Shape => &self.diamond_shapes,
            DiamondAttributeKind::Color => &self.diamond_colors,
            DiamondAttributeKind::Clarity => &self.diamond_clarities,
            DiamondAttributeKind::Cut => &self.diamond_cuts,
        }
    }

    pub fn diamond_attribute(
        &self,
        kind: DiamondAttributeKind,
        id: DbId,
    ) -> Option<&DiamondAttribute> {
        self.diamond_table(kind).iter().find(|a| a.id == id)
    }
}

/// Reject duplicate ids and blank names within one table.
fn check_rows<'a>(
    table: &str,
    rows: impl Iterator<Item = (DbId, &'a str)>,
) -> Result<(), CoreError> {
    let mut seen = HashSet::new();
    for (id, name) in rows {
        if !seen.insert(id) {
            return Err(CoreError::Validation(format!(
                "Duplicate id {id} in {table}"
            )));
        }
        if name.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "Blank name for id {id} in {table}"
            )));
        }
    }
    Ok(())
}

//! Persisted product shape and lenient loading into a [`ProductForm`].
//!
//! Stored products keep their selections as flat id lists and free-form mode
//! strings. Loading never fails: anything the catalog no longer knows about is
//! dropped with a warning so an old product can still be opened and fixed.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::catalog::{DiamondAttributeKind, ReferenceCatalog};
use crate::form::ProductForm;
use crate::mix_mode::{parse_metal_mix_modes, DiamondMixingMode};
use crate::selection::{
    DiamondOption, MetalSelection, SizeSelection, SizeUnit, VariantSelection,
};
use crate::types::DbId;
use crate::variant::{set_default, Variant};

/// A product as it was last saved.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductRecord {
    pub base_sku: String,
    pub metal_ids: Vec<DbId>,
    /// Purities of every selected metal, in selection order.
    pub purity_ids: Vec<DbId>,
    pub tone_ids: Vec<DbId>,
    /// Mix mode per metal, keyed by the metal id as a string.
    pub metal_mix_modes: BTreeMap<String, String>,
    pub uses_diamond: bool,
    pub diamond_options: Vec<DiamondOption>,
    pub diamond_mixing_mode: Option<String>,
    pub size_enabled: bool,
    pub size_unit: Option<String>,
    pub size_values: Vec<f64>,
    pub variants: Vec<Variant>,
}

impl ProductForm {
    /// Rebuild the editable form for a stored product.
    pub fn from_record(record: ProductRecord, catalog: &ReferenceCatalog) -> Self {
        let mix_modes = parse_metal_mix_modes(&record.metal_mix_modes);

        let mut metals: Vec<MetalSelection> = Vec::new();
        for metal_id in record.metal_ids {
            if catalog.metal(metal_id).is_none() {
                tracing::warn!(metal_id, "Dropping unknown metal from stored product");
                continue;
            }
            if metals.iter().any(|m| m.metal_id == metal_id) {
                continue;
            }
            let mut selection = MetalSelection::new(metal_id);
            if let Some(mode) = mix_modes.get(&metal_id) {
                selection.mix_mode = *mode;
            }
            metals.push(selection);
        }

        for purity_id in record.purity_ids {
            let owner = catalog.purity(purity_id).map(|p| p.metal_id);
            match owner.and_then(|id| position_of(&metals, id)) {
                Some(i) => push_distinct(&mut metals[i].purity_ids, purity_id),
                None => tracing::warn!(purity_id, "Dropping orphan purity from stored product"),
            }
        }

        for tone_id in record.tone_ids {
            let owner = catalog.tone(tone_id).map(|t| t.metal_id);
            match owner.and_then(|id| position_of(&metals, id)) {
                Some(i) => push_distinct(&mut metals[i].tone_ids, tone_id),
                None => tracing::warn!(tone_id, "Dropping orphan tone from stored product"),
            }
        }

        let mut seen_keys = HashSet::new();
        let diamond_options = record
            .diamond_options
            .into_iter()
            .filter(|option| seen_keys.insert(option.key))
            .map(|option| sanitize_diamond(option, catalog))
            .collect();

        let diamond_mixing_mode = record
            .diamond_mixing_mode
            .as_deref()
            .map(DiamondMixingMode::parse_lenient)
            .unwrap_or_default();

        let sizes = SizeSelection {
            enabled: record.size_enabled,
            unit: record
                .size_unit
                .as_deref()
                .map(SizeUnit::parse_lenient)
                .unwrap_or_default(),
            values: record
                .size_values
                .into_iter()
                .filter(|v| v.is_finite() && *v > 0.0)
                .fold(Vec::new(), |mut values, v| {
                    if !values.contains(&v) {
                        values.push(v);
                    }
                    values
                }),
        };

        let mut variants = record.variants;
        if !variants.is_empty() {
            let default_index = variants.iter().position(|v| v.is_default).unwrap_or(0);
            set_default(&mut variants, default_index);
        }

        Self {
            selection: VariantSelection {
                base_sku: record.base_sku,
                metals,
                uses_diamond: record.uses_diamond,
                diamond_options,
                diamond_mixing_mode,
                sizes,
            },
            variants,
        }
    }
}

fn position_of(metals: &[MetalSelection], metal_id: DbId) -> Option<usize> {
    metals.iter().position(|m| m.metal_id == metal_id)
}

fn push_distinct(ids: &mut Vec<DbId>, id: DbId) {
    if !ids.contains(&id) {
        ids.push(id);
    }
}

fn sanitize_diamond(mut option: DiamondOption, catalog: &ReferenceCatalog) -> DiamondOption {
    for kind in DiamondAttributeKind::ALL {
        let Some(id) = option.attribute(kind) else {
            continue;
        };
        if catalog.diamond_attribute(kind, id).is_none() {
            tracing::warn!(key = %option.key, entity = kind.entity(), id, "Clearing unknown diamond attribute");
            let slot = match kind {
                DiamondAttributeKind::Type => &mut option.type_id,
                DiamondAttributeKind::Shape => &mut option.shape_id,
                DiamondAttributeKind::Color => &mut option.color_id,
                DiamondAttributeKind::Clarity => &mut option.clarity_id,
                DiamondAttributeKind::Cut => &mut option.cut_id,
            };
            *slot = None;
        }
    }
    if option.weight.is_some_and(|w| !w.is_finite() || w < 0.0) {
        option.weight = None;
    }
    option
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormEvent;
    use crate::mix_mode::MetalMixMode;

    fn catalog() -> ReferenceCatalog {
        ReferenceCatalog::builtin().unwrap()
    }

    fn record() -> ProductRecord {
        ProductRecord {
            base_sku: "RING".into(),
            metal_ids: vec![1, 2],
            purity_ids: vec![3, 6, 4],
            tone_ids: vec![1, 4],
            metal_mix_modes: BTreeMap::from([
                ("1".to_string(), "combine_tones_per_purity".to_string()),
                ("2".to_string(), "nonsense".to_string()),
            ]),
            ..Default::default()
        }
    }

    #[test]
    fn flat_ids_are_assigned_to_their_metal() {
        let form = ProductForm::from_record(record(), &catalog());
        let gold = form.selection.metal(1).unwrap();
        let silver = form.selection.metal(2).unwrap();
        assert_eq!(gold.purity_ids, vec![3, 4]);
        assert_eq!(gold.tone_ids, vec![1]);
        assert_eq!(gold.mix_mode, MetalMixMode::CombineTonesPerPurity);
        assert_eq!(silver.purity_ids, vec![6]);
        assert_eq!(silver.tone_ids, vec![4]);
        assert_eq!(silver.mix_mode, MetalMixMode::Separate);
    }

    #[test]
    fn orphans_and_unknowns_are_dropped() {
        let stored = ProductRecord {
            metal_ids: vec![1, 77, 1],
            // 6 is a silver purity but silver is not selected.
            purity_ids: vec![3, 6, 999],
            tone_ids: vec![5],
            ..Default::default()
        };
        let form = ProductForm::from_record(stored, &catalog());
        assert_eq!(form.selection.metals.len(), 1);
        assert_eq!(form.selection.metals[0].purity_ids, vec![3]);
        assert!(form.selection.metals[0].tone_ids.is_empty());
        assert!(form.selection.validate_against(&catalog()).is_ok());
    }

    #[test]
    fn modes_and_units_parse_leniently() {
        let stored = ProductRecord {
            diamond_mixing_mode: Some("AS_VARIANT".into()),
            size_enabled: true,
            size_unit: Some("inches".into()),
            size_values: vec![16.0, -1.0, f64::NAN, 17.5, 16.0],
            ..Default::default()
        };
        let form = ProductForm::from_record(stored, &catalog());
        assert_eq!(form.selection.diamond_mixing_mode, DiamondMixingMode::AsVariant);
        assert_eq!(form.selection.sizes.unit, SizeUnit::Mm);
        assert_eq!(form.selection.sizes.values, vec![16.0, 17.5]);
    }

    #[test]
    fn unknown_diamond_attributes_are_cleared() {
        let option = DiamondOption {
            shape_id: Some(1),
            color_id: Some(404),
            weight: Some(-2.0),
            ..DiamondOption::blank()
        };
        let stored = ProductRecord {
            uses_diamond: true,
            diamond_options: vec![option.clone(), option.clone()],
            ..Default::default()
        };
        let form = ProductForm::from_record(stored, &catalog());
        let loaded = &form.selection.diamond_options;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].shape_id, Some(1));
        assert_eq!(loaded[0].color_id, None);
        assert_eq!(loaded[0].weight, None);
    }

    #[test]
    fn loaded_variants_get_one_default_and_carry_over() {
        let base = ProductForm::from_record(record(), &catalog());
        let generated = base.apply(FormEvent::Regenerate, &catalog()).unwrap();
        let mut stored_variants = generated.variants.clone();
        for v in &mut stored_variants {
            v.is_default = false;
        }
        stored_variants[1].metals[0].weight = Some(4.2);

        let form = ProductForm::from_record(
            ProductRecord {
                variants: stored_variants,
                ..record()
            },
            &catalog(),
        );
        assert!(form.variants[0].is_default);
        assert_eq!(form.variants.iter().filter(|v| v.is_default).count(), 1);

        let regenerated = form.apply(FormEvent::Regenerate, &catalog()).unwrap();
        assert_eq!(regenerated.variants.len(), generated.variants.len());
        assert_eq!(regenerated.variants[1].metals[0].weight, Some(4.2));
    }

    #[test]
    fn record_deserializes_with_missing_fields() {
        let stored: ProductRecord = serde_json::from_str(r#"{"base_sku":"X","metal_ids":[3]}"#).unwrap();
        let form = ProductForm::from_record(stored, &catalog());
        assert_eq!(form.selection.metals[0].metal_id, 3);
        assert!(form.variants.is_empty());
    }
}

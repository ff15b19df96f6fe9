//! Product form state machine.
//!
//! The admin product editor holds one [`ProductForm`]. Every user action is a
//! [`FormEvent`]; [`ProductForm::apply`] computes the next form from the
//! current one without touching it. Selection-shaping events (metals,
//! purities, tones, mixing modes, sizes) regenerate the variant matrix as
//! part of the transition.

use serde::{Deserialize, Serialize};

use crate::catalog::ReferenceCatalog;
use crate::error::CoreError;
use crate::matrix::materialize::regenerate;
use crate::mix_mode::{DiamondMixingMode, MetalMixMode};
use crate::selection::{DiamondKey, DiamondOption, MetalSelection, SizeSelection, VariantSelection};
use crate::types::DbId;
use crate::variant::{set_default, Variant};

/// Selection state plus the generated variants.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub selection: VariantSelection,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

/// A change to a single generated variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum VariantEdit {
    Sku { sku: String },
    Label { label: String },
    /// Weight in grams of the variant's `entry`-th metal entry.
    MetalWeight { entry: usize, weight: Option<f64> },
    DiamondCount { key: DiamondKey, count: Option<u32> },
    DiamondCarat { key: DiamondKey, carat: Option<f64> },
    InventoryQuantity { quantity: i32 },
    Metadata {
        metadata: serde_json::Map<String, serde_json::Value>,
    },
}

/// A user action on the product form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormEvent {
    BaseSkuChanged { base_sku: String },
    /// Select the metal, or deselect it (dropping its purities and tones).
    MetalToggled { metal_id: DbId },
    PuritiesChanged { metal_id: DbId, purity_ids: Vec<DbId> },
    TonesChanged { metal_id: DbId, tone_ids: Vec<DbId> },
    MetalMixModeChanged { metal_id: DbId, mode: MetalMixMode },
    UsesDiamondChanged { uses_diamond: bool },
    DiamondOptionAdded { option: DiamondOption },
    DiamondOptionUpdated { option: DiamondOption },
    DiamondOptionRemoved { key: DiamondKey },
    DiamondMixingModeChanged { mode: DiamondMixingMode },
    SizesChanged { sizes: SizeSelection },
    VariantEdited { index: usize, edit: VariantEdit },
    DefaultVariantChanged { index: usize },
    Regenerate,
}

impl FormEvent {
    /// Whether applying this event regenerates the variant matrix.
    pub fn regenerates(&self) -> bool {
        matches!(
            self,
            Self::MetalToggled { .. }
                | Self::PuritiesChanged { .. }
                | Self::TonesChanged { .. }
                | Self::MetalMixModeChanged { .. }
                | Self::DiamondMixingModeChanged { .. }
                | Self::SizesChanged { .. }
                | Self::Regenerate
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::BaseSkuChanged { .. } => "base_sku_changed",
            Self::MetalToggled { .. } => "metal_toggled",
            Self::PuritiesChanged { .. } => "purities_changed",
            Self::TonesChanged { .. } => "tones_changed",
            Self::MetalMixModeChanged { .. } => "metal_mix_mode_changed",
            Self::UsesDiamondChanged { .. } => "uses_diamond_changed",
            Self::DiamondOptionAdded { .. } => "diamond_option_added",
            Self::DiamondOptionUpdated { .. } => "diamond_option_updated",
            Self::DiamondOptionRemoved { .. } => "diamond_option_removed",
            Self::DiamondMixingModeChanged { .. } => "diamond_mixing_mode_changed",
            Self::SizesChanged { .. } => "sizes_changed",
            Self::VariantEdited { .. } => "variant_edited",
            Self::DefaultVariantChanged { .. } => "default_variant_changed",
            Self::Regenerate => "regenerate",
        }
    }
}

impl ProductForm {
    pub fn new(base_sku: impl Into<String>) -> Self {
        Self {
            selection: VariantSelection {
                base_sku: base_sku.into(),
                ..Default::default()
            },
            variants: Vec::new(),
        }
    }

    /// Compute the form that results from applying `event`.
    pub fn apply(&self, event: FormEvent, catalog: &ReferenceCatalog) -> Result<Self, CoreError> {
        let regenerates = event.regenerates();
        let mut next = self.clone();

        match event {
            FormEvent::BaseSkuChanged { base_sku } => next.selection.base_sku = base_sku,
            FormEvent::MetalToggled { metal_id } => toggle_metal(&mut next.selection, metal_id, catalog)?,
            FormEvent::PuritiesChanged { metal_id, purity_ids } => {
                selected_metal(&mut next.selection, metal_id, "purities")?.purity_ids = purity_ids;
            }
            FormEvent::TonesChanged { metal_id, tone_ids } => {
                selected_metal(&mut next.selection, metal_id, "tones")?.tone_ids = tone_ids;
            }
            FormEvent::MetalMixModeChanged { metal_id, mode } => {
                selected_metal(&mut next.selection, metal_id, "a mix mode")?.mix_mode = mode;
            }
            FormEvent::UsesDiamondChanged { uses_diamond } => next.selection.uses_diamond = uses_diamond,
            FormEvent::DiamondOptionAdded { option } => next.selection.diamond_options.push(option),
            FormEvent::DiamondOptionUpdated { option } => {
                let slot = next
                    .selection
                    .diamond_options
                    .iter_mut()
                    .find(|o| o.key == option.key)
                    .ok_or_else(|| unknown_diamond(option.key))?;
                *slot = option;
            }
            FormEvent::DiamondOptionRemoved { key } => {
                let before = next.selection.diamond_options.len();
                next.selection.diamond_options.retain(|o| o.key != key);
                if next.selection.diamond_options.len() == before {
                    return Err(unknown_diamond(key));
                }
            }
            FormEvent::DiamondMixingModeChanged { mode } => next.selection.diamond_mixing_mode = mode,
            FormEvent::SizesChanged { sizes } => next.selection.sizes = sizes,
            FormEvent::VariantEdited { index, edit } => {
                let variant = next
                    .variants
                    .get_mut(index)
                    .ok_or_else(|| variant_out_of_range(index))?;
                apply_edit(variant, edit)?;
            }
            FormEvent::DefaultVariantChanged { index } => {
                if index >= next.variants.len() {
                    return Err(variant_out_of_range(index));
                }
                set_default(&mut next.variants, index);
            }
            FormEvent::Regenerate => {}
        }

        next.selection.validate_against(catalog)?;

        if regenerates {
            let outcome = regenerate(&next.selection, &next.variants, catalog)?;
            next.variants = outcome.into_variants(std::mem::take(&mut next.variants));
        }
        Ok(next)
    }
}

fn toggle_metal(
    selection: &mut VariantSelection,
    metal_id: DbId,
    catalog: &ReferenceCatalog,
) -> Result<(), CoreError> {
    if selection.metal(metal_id).is_some() {
        selection.metals.retain(|m| m.metal_id != metal_id);
        return Ok(());
    }
    if catalog.metal(metal_id).is_none() {
        return Err(CoreError::NotFound {
            entity: "Metal",
            id: metal_id,
        });
    }
    selection.metals.push(MetalSelection::new(metal_id));
    Ok(())
}

fn selected_metal<'a>(
    selection: &'a mut VariantSelection,
    metal_id: DbId,
    what: &str,
) -> Result<&'a mut MetalSelection, CoreError> {
    selection.metal_mut(metal_id).ok_or_else(|| {
        CoreError::Validation(format!(
            "Select metal {metal_id} before choosing {what}"
        ))
    })
}

fn apply_edit(variant: &mut Variant, edit: VariantEdit) -> Result<(), CoreError> {
    match edit {
        VariantEdit::Sku { sku } => variant.sku = sku,
        VariantEdit::Label { label } => variant.label = label,
        VariantEdit::MetalWeight { entry, weight } => {
            if let Some(w) = weight {
                if !w.is_finite() || w <= 0.0 {
                    return Err(CoreError::Validation(format!(
                        "Metal weight must be a positive number, got {w}"
                    )));
                }
            }
            let metal = variant.metals.get_mut(entry).ok_or_else(|| {
                CoreError::Validation(format!("Variant has no metal entry {entry}"))
            })?;
            metal.weight = weight;
        }
        VariantEdit::DiamondCount { key, count } => {
            diamond_mut(variant, key)?.count = count;
        }
        VariantEdit::DiamondCarat { key, carat } => {
            if let Some(c) = carat {
                if !c.is_finite() || c < 0.0 {
                    return Err(CoreError::Validation(format!(
                        "Diamond carat must be a non-negative number, got {c}"
                    )));
                }
            }
            diamond_mut(variant, key)?.carat = carat;
        }
        VariantEdit::InventoryQuantity { quantity } => {
            if quantity < 0 {
                return Err(CoreError::Validation(format!(
                    "Inventory quantity must be >= 0, got {quantity}"
                )));
            }
            variant.inventory_quantity = quantity;
        }
        VariantEdit::Metadata { metadata } => variant.metadata = metadata,
    }
    Ok(())
}

fn diamond_mut(
    variant: &mut Variant,
    key: DiamondKey,
) -> Result<&mut crate::variant::VariantDiamond, CoreError> {
    variant
        .diamonds
        .iter_mut()
        .find(|d| d.key == key)
        .ok_or_else(|| unknown_diamond(key))
}

fn unknown_diamond(key: DiamondKey) -> CoreError {
    CoreError::Validation(format!("Unknown diamond option {key}"))
}

fn variant_out_of_range(index: usize) -> CoreError {
    CoreError::Validation(format!("Variant index {index} is out of range"))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::selection::SizeUnit;

    fn catalog() -> ReferenceCatalog {
        ReferenceCatalog::builtin().unwrap()
    }

    fn step(form: &ProductForm, event: FormEvent) -> ProductForm {
        form.apply(event, &catalog()).unwrap()
    }

    /// Gold with 18K/22K and Yellow/White selected.
    fn gold_form() -> ProductForm {
        let form = ProductForm::new("RING");
        let form = step(&form, FormEvent::MetalToggled { metal_id: 1 });
        let form = step(
            &form,
            FormEvent::PuritiesChanged {
                metal_id: 1,
                purity_ids: vec![3, 4],
            },
        );
        step(
            &form,
            FormEvent::TonesChanged {
                metal_id: 1,
                tone_ids: vec![1, 2],
            },
        )
    }

    #[test]
    fn selecting_metal_generates_variants() {
        let form = step(&ProductForm::new("RING"), FormEvent::MetalToggled { metal_id: 1 });
        assert_eq!(form.variants.len(), 1);
        assert_eq!(form.variants[0].label, "Gold");
        assert_eq!(gold_form().variants.len(), 4);
    }

    #[test]
    fn apply_does_not_mutate_input() {
        let form = gold_form();
        let snapshot = form.clone();
        let _ = step(
            &form,
            FormEvent::MetalMixModeChanged {
                metal_id: 1,
                mode: MetalMixMode::CombinePuritiesPerTone,
            },
        );
        assert_eq!(form, snapshot);
    }

    #[test]
    fn mix_mode_change_regenerates() {
        let form = step(
            &gold_form(),
            FormEvent::MetalMixModeChanged {
                metal_id: 1,
                mode: MetalMixMode::CombinePuritiesPerTone,
            },
        );
        assert_eq!(form.variants.len(), 2);
        assert_eq!(form.variants[0].label, "Gold 18K/22K Yellow");
    }

    #[test]
    fn deselecting_metal_drops_its_purities() {
        let form = step(&gold_form(), FormEvent::MetalToggled { metal_id: 1 });
        assert!(form.selection.metals.is_empty());
        // Nothing left to multiply: previous variants stand.
        assert_eq!(form.variants.len(), 4);

        let reselected = step(&form, FormEvent::MetalToggled { metal_id: 1 });
        assert!(reselected.selection.metals[0].purity_ids.is_empty());
        assert_eq!(reselected.variants.len(), 1);
    }

    #[test]
    fn purities_require_selected_metal() {
        let result = ProductForm::new("RING").apply(
            FormEvent::PuritiesChanged {
                metal_id: 1,
                purity_ids: vec![3],
            },
            &catalog(),
        );
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("Select metal 1"));
    }

    #[test]
    fn foreign_purity_rejected() {
        let result = gold_form().apply(
            FormEvent::PuritiesChanged {
                metal_id: 1,
                purity_ids: vec![6],
            },
            &catalog(),
        );
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn unknown_metal_not_found() {
        let result = ProductForm::new("X").apply(FormEvent::MetalToggled { metal_id: 404 }, &catalog());
        assert_matches!(result, Err(CoreError::NotFound { entity: "Metal", id: 404 }));
    }

    #[test]
    fn weight_survives_size_change() {
        let form = step(
            &gold_form(),
            FormEvent::VariantEdited {
                index: 1,
                edit: VariantEdit::MetalWeight {
                    entry: 0,
                    weight: Some(3.5),
                },
            },
        );
        let key = form.variants[1].identity_key.clone();

        let resized = step(
            &form,
            FormEvent::SizesChanged {
                sizes: SizeSelection::new(SizeUnit::Mm, vec![]),
            },
        );
        let carried = resized.variants.iter().find(|v| v.identity_key == key).unwrap();
        assert_eq!(carried.metals[0].weight, Some(3.5));
    }

    #[test]
    fn duplicate_sizes_rejected_without_touching_form() {
        let form = step(
            &gold_form(),
            FormEvent::VariantEdited {
                index: 1,
                edit: VariantEdit::MetalWeight {
                    entry: 0,
                    weight: Some(9.9),
                },
            },
        );
        let result = form.apply(
            FormEvent::SizesChanged {
                sizes: SizeSelection::new(SizeUnit::Mm, vec![16.0, 16.0]),
            },
            &catalog(),
        );
        assert_matches!(result, Err(CoreError::Validation(_)));
        assert_eq!(form.variants[1].metals[0].weight, Some(9.9));
    }

    #[test]
    fn mixing_mode_toggle_without_diamonds_keeps_weights() {
        let form = step(
            &gold_form(),
            FormEvent::VariantEdited {
                index: 0,
                edit: VariantEdit::MetalWeight {
                    entry: 0,
                    weight: Some(3.5),
                },
            },
        );
        assert!(!form.selection.uses_diamond);

        let toggled = step(
            &form,
            FormEvent::DiamondMixingModeChanged {
                mode: DiamondMixingMode::AsVariant,
            },
        );
        assert_eq!(toggled.variants.len(), 4);
        assert_eq!(toggled.variants[0].metals[0].weight, Some(3.5));
        assert_eq!(toggled.variants[0].identity_key, form.variants[0].identity_key);

        let back = step(
            &toggled,
            FormEvent::DiamondMixingModeChanged {
                mode: DiamondMixingMode::Shared,
            },
        );
        assert_eq!(back.variants[0].metals[0].weight, Some(3.5));
    }

    #[test]
    fn diamond_events_do_not_regenerate() {
        let option = DiamondOption {
            shape_id: Some(1),
            ..DiamondOption::blank()
        };
        let form = step(&gold_form(), FormEvent::UsesDiamondChanged { uses_diamond: true });
        let form = step(&form, FormEvent::DiamondOptionAdded { option: option.clone() });
        assert!(form.variants.iter().all(|v| v.diamonds.is_empty()));

        let form = step(&form, FormEvent::Regenerate);
        assert!(form.variants.iter().all(|v| v.diamonds.len() == 1));

        let form = step(
            &form,
            FormEvent::DiamondMixingModeChanged {
                mode: DiamondMixingMode::AsVariant,
            },
        );
        assert_eq!(form.variants.len(), 4);
        assert_eq!(form.variants[0].label, "Round / Gold 18K Yellow");
    }

    #[test]
    fn diamond_option_update_and_remove() {
        let option = DiamondOption::blank();
        let form = step(&ProductForm::new("X"), FormEvent::DiamondOptionAdded { option: option.clone() });
        let updated = DiamondOption {
            count: Some(8),
            ..option.clone()
        };
        let form = step(&form, FormEvent::DiamondOptionUpdated { option: updated });
        assert_eq!(form.selection.diamond_options[0].count, Some(8));

        let form = step(&form, FormEvent::DiamondOptionRemoved { key: option.key });
        assert!(form.selection.diamond_options.is_empty());

        let again = form.apply(FormEvent::DiamondOptionRemoved { key: option.key }, &catalog());
        assert_matches!(again, Err(CoreError::Validation(_)));
    }

    #[test]
    fn diamond_edits_target_variant_diamonds() {
        let option = DiamondOption::blank();
        let form = step(&gold_form(), FormEvent::UsesDiamondChanged { uses_diamond: true });
        let form = step(&form, FormEvent::DiamondOptionAdded { option: option.clone() });
        let form = step(&form, FormEvent::Regenerate);
        let form = step(
            &form,
            FormEvent::VariantEdited {
                index: 0,
                edit: VariantEdit::DiamondCount {
                    key: option.key,
                    count: Some(6),
                },
            },
        );
        let form = step(
            &form,
            FormEvent::VariantEdited {
                index: 0,
                edit: VariantEdit::DiamondCarat {
                    key: option.key,
                    carat: Some(0.05),
                },
            },
        );
        assert_eq!(form.variants[0].diamonds[0].count, Some(6));
        assert_eq!(form.variants[0].diamonds[0].carat, Some(0.05));
        assert_eq!(form.variants[1].diamonds[0].count, None);
    }

    #[test]
    fn invalid_edits_rejected() {
        let form = gold_form();
        let cases = vec![
            FormEvent::VariantEdited {
                index: 0,
                edit: VariantEdit::MetalWeight { entry: 0, weight: Some(0.0) },
            },
            FormEvent::VariantEdited {
                index: 0,
                edit: VariantEdit::MetalWeight { entry: 5, weight: Some(1.0) },
            },
            FormEvent::VariantEdited {
                index: 0,
                edit: VariantEdit::InventoryQuantity { quantity: -1 },
            },
            FormEvent::VariantEdited {
                index: 99,
                edit: VariantEdit::Sku { sku: "X".into() },
            },
            FormEvent::DefaultVariantChanged { index: 4 },
        ];
        for event in cases {
            let name = event.name();
            assert!(form.apply(event, &catalog()).is_err(), "{name} accepted");
        }
    }

    #[test]
    fn default_variant_change() {
        let form = step(&gold_form(), FormEvent::DefaultVariantChanged { index: 2 });
        assert!(form.variants[2].is_default);
        assert_eq!(form.variants.iter().filter(|v| v.is_default).count(), 1);

        let regenerated = step(&form, FormEvent::Regenerate);
        assert!(regenerated.variants[2].is_default);
    }

    #[test]
    fn manual_sku_kept_across_base_sku_change() {
        let form = step(
            &gold_form(),
            FormEvent::VariantEdited {
                index: 0,
                edit: VariantEdit::Sku { sku: "HANDMADE".into() },
            },
        );
        let form = step(&form, FormEvent::BaseSkuChanged { base_sku: "band".into() });
        let form = step(&form, FormEvent::Regenerate);
        assert_eq!(form.variants[0].sku, "HANDMADE");
        assert_eq!(form.variants[1].sku, "BAND-V02");
    }

    #[test]
    fn events_deserialize_from_tagged_json() {
        let event: FormEvent = serde_json::from_str(
            r#"{"type":"metal_mix_mode_changed","metal_id":1,"mode":"combine_tones_per_purity"}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            FormEvent::MetalMixModeChanged {
                metal_id: 1,
                mode: MetalMixMode::CombineTonesPerPurity,
            }
        );
        let edit: FormEvent = serde_json::from_str(
            r#"{"type":"variant_edited","index":0,"edit":{"field":"inventory_quantity","quantity":3}}"#,
        )
        .unwrap();
        assert!(!edit.regenerates());
        let regen: FormEvent = serde_json::from_str(r#"{"type":"regenerate"}"#).unwrap();
        assert!(regen.regenerates());
    }
}

//! Variant materializer.
//!
//! Turns base combinations into [`Variant`] records, carrying per-slot data
//! (metal weights, diamond counts and carats, inventory, metadata, hand-edited
//! SKUs and labels) forward from previous variants with the same identity key.

use std::collections::HashMap;

use crate::catalog::ReferenceCatalog;
use crate::error::CoreError;
use crate::naming::{variant_label, variant_sku};
use crate::selection::VariantSelection;
use crate::variant::{set_default, Variant, VariantDiamond, VariantMetal};

use super::identity::IdentityKey;
use super::{build_combinations, has_multiplying_axis, BaseCombination};

/// Outcome of a regeneration request.
#[derive(Debug, Clone, PartialEq)]
pub enum Regeneration {
    /// Nothing to multiply; the previous variants stand as they are.
    Unchanged,
    /// The full replacement variant list.
    Regenerated(Vec<Variant>),
}

impl Regeneration {
    /// The resulting list, given the list regeneration started from.
    pub fn into_variants(self, previous: Vec<Variant>) -> Vec<Variant> {
        match self {
            Self::Unchanged => previous,
            Self::Regenerated(variants) => variants,
        }
    }
}

/// Regenerate the variant list for `selection`.
///
/// A selection without any multiplying axis is a no-op rather than wiping an
/// existing single-variant configuration.
pub fn regenerate(
    selection: &VariantSelection,
    previous: &[Variant],
    catalog: &ReferenceCatalog,
) -> Result<Regeneration, CoreError> {
    if !has_multiplying_axis(selection) {
        tracing::debug!(previous = previous.len(), "No multiplying axis, keeping variants");
        return Ok(Regeneration::Unchanged);
    }
    let combinations = build_combinations(selection)?;
    Ok(Regeneration::Regenerated(materialize(
        &combinations,
        previous,
        &selection.base_sku,
        catalog,
    )))
}

/// Materialize `combinations` into variants.
///
/// Exactly one variant ends up default: the first one whose predecessor was
/// default, else the first variant.
pub fn materialize(
    combinations: &[BaseCombination],
    previous: &[Variant],
    base_sku: &str,
    catalog: &ReferenceCatalog,
) -> Vec<Variant> {
    let mut by_key: HashMap<&IdentityKey, &Variant> = HashMap::with_capacity(previous.len());
    for variant in previous {
        by_key.entry(&variant.identity_key).or_insert(variant);
    }

    let mut matched = 0usize;
    let mut default_index = None;
    let mut variants: Vec<Variant> = combinations
        .iter()
        .enumerate()
        .map(|(index, combination)| {
            let identity_key = combination.identity_key();
            let prior = by_key.get(&identity_key).copied();
            if let Some(prior) = prior {
                matched += 1;
                if prior.is_default && default_index.is_none() {
                    default_index = Some(index);
                }
            }
            build_variant(index, identity_key, combination, prior, base_sku, catalog)
        })
        .collect();

    set_default(&mut variants, default_index.unwrap_or(0));

    tracing::debug!(
        variants = variants.len(),
        matched,
        previous = previous.len(),
        "Materialized variant matrix"
    );
    variants
}

fn build_variant(
    index: usize,
    identity_key: IdentityKey,
    combination: &BaseCombination,
    prior: Option<&Variant>,
    base_sku: &str,
    catalog: &ReferenceCatalog,
) -> Variant {
    let metals = combination
        .metals
        .iter()
        .map(|entry| VariantMetal {
            metal_id: entry.metal_id,
            purity_id: entry.purity_id,
            tone_id: entry.tone_id,
            weight: prior.and_then(|p| p.metal(entry)).and_then(|m| m.weight),
        })
        .collect();

    let diamonds = combination
        .diamonds
        .options()
        .iter()
        .map(|option| {
            let mut diamond = VariantDiamond::from_option(option);
            if let Some(previous) = prior.and_then(|p| p.diamond(option.key)) {
                if previous.count.is_some() {
                    diamond.count = previous.count;
                }
                if previous.carat.is_some() {
                    diamond.carat = previous.carat;
                }
            }
            diamond
        })
        .collect();

    let generated_sku = variant_sku(base_sku, index);
    let generated_label = variant_label(
        &combination.metals,
        combination.size.as_ref(),
        combination.diamonds.distinguishing(),
        catalog,
    );

    let sku = match prior {
        Some(p) if !p.has_generated_sku() => p.sku.clone(),
        _ => generated_sku.clone(),
    };
    let label = match prior {
        Some(p) if !p.has_generated_label() => p.label.clone(),
        _ => generated_label.clone(),
    };

    Variant {
        identity_key,
        sku,
        label,
        generated_sku: Some(generated_sku),
        generated_label: Some(generated_label),
        metals,
        diamonds,
        size: combination.size,
        is_default: false,
        inventory_quantity: prior.map_or(0, |p| p.inventory_quantity),
        metadata: prior.map(|p| p.metadata.clone()).unwrap_or_default(),
    }
}

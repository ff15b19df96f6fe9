//! Variant SKU and label naming conventions.
//!
//! SKUs follow `{BASE}-V{nn}` where `BASE` is the normalized product SKU and
//! `nn` the 1-based, zero-padded variant position. Labels join the diamond,
//! metal and size descriptions with `" / "`.

use crate::catalog::{DiamondAttributeKind, ReferenceCatalog};
use crate::matrix::metal::MetalEntry;
use crate::selection::{DiamondOption, SizeValue};
use crate::types::DbId;

/// Base SKU used when the product has none (or only punctuation).
pub const FALLBACK_BASE_SKU: &str = "SKU";

/// Label used when a variant has no describable attributes.
pub const DEFAULT_LABEL: &str = "Default";

/// Normalize a product SKU for use as a variant SKU prefix.
///
/// Uppercases, turns whitespace into `-`, drops anything outside
/// `[A-Z0-9_-]` and collapses repeated or trailing dashes.
///
/// ```
/// use karat_core::naming::normalize_base_sku;
///
/// assert_eq!(normalize_base_sku("  solitaire ring #7 "), "SOLITAIRE-RING-7");
/// assert_eq!(normalize_base_sku("***"), "SKU");
/// ```
pub fn normalize_base_sku(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.trim().chars() {
        let c = if c.is_whitespace() {
            '-'
        } else {
            c.to_ascii_uppercase()
        };
        if !(c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            continue;
        }
        if c == '-' && (out.is_empty() || out.ends_with('-')) {
            continue;
        }
        out.push(c);
    }
    while out.ends_with('-') {
        out.pop();
    }
    if out.is_empty() {
        FALLBACK_BASE_SKU.to_string()
    } else {
        out
    }
}

/// SKU for the variant at zero-based `index`.
pub fn variant_sku(base_sku: &str, index: usize) -> String {
    format!("{}-V{:02}", normalize_base_sku(base_sku), index + 1)
}

/// Describe metal entries, one phrase per metal in first-appearance order.
///
/// Distinct purities and tones of the same metal are joined with `/`, so a
/// combined group reads `Gold 18K Yellow/White`.
pub fn metal_description(entries: &[MetalEntry], catalog: &ReferenceCatalog) -> String {
    let mut metal_order: Vec<DbId> = Vec::new();
    for entry in entries {
        if !metal_order.contains(&entry.metal_id) {
            metal_order.push(entry.metal_id);
        }
    }

    metal_order
        .iter()
        .map(|&metal_id| {
            let mut purities: Vec<String> = Vec::new();
            let mut tones: Vec<String> = Vec::new();
            for entry in entries.iter().filter(|e| e.metal_id == metal_id) {
                if let Some(id) = entry.purity_id {
                    push_distinct(&mut purities, purity_name(catalog, id));
                }
                if let Some(id) = entry.tone_id {
                    push_distinct(&mut tones, tone_name(catalog, id));
                }
            }

            let mut parts = vec![metal_name(catalog, metal_id)];
            if !purities.is_empty() {
                parts.push(purities.join("/"));
            }
            if !tones.is_empty() {
                parts.push(tones.join("/"));
            }
            parts.join(" ")
        })
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Describe a diamond option, e.g. `Round Natural G VS1 Ideal 0.25ct`.
pub fn diamond_description(option: &DiamondOption, catalog: &ReferenceCatalog) -> String {
    const ORDER: [DiamondAttributeKind; 5] = [
        DiamondAttributeKind::Shape,
        DiamondAttributeKind::Type,
        DiamondAttributeKind::Color,
        DiamondAttributeKind::Clarity,
        DiamondAttributeKind::Cut,
    ];

    let mut parts: Vec<String> = ORDER
        .iter()
        .filter_map(|&kind| {
            option.attribute(kind).map(|id| {
                catalog
                    .diamond_attribute(kind, id)
                    .map_or_else(|| format!("#{id}"), |a| a.name.clone())
            })
        })
        .collect();
    if let Some(weight) = option.weight {
        parts.push(format!("{weight}ct"));
    }
    if parts.is_empty() {
        "Diamond".to_string()
    } else {
        parts.join(" ")
    }
}

pub fn size_description(size: &SizeValue) -> String {
    format!("{} {}", size.value, size.unit.as_str())
}

/// Human-readable variant label.
///
/// `diamond` is only passed for `as_variant` products; in `shared` mode all
/// variants carry the same stones so they are left out of the label.
pub fn variant_label(
    metals: &[MetalEntry],
    size: Option<&SizeValue>,
    diamond: Option<&DiamondOption>,
    catalog: &ReferenceCatalog,
) -> String {
    let mut parts = Vec::new();
    if let Some(option) = diamond {
        parts.push(diamond_description(option, catalog));
    }
    if !metals.is_empty() {
        parts.push(metal_description(metals, catalog));
    }
    if let Some(size) = size {
        parts.push(size_description(size));
    }
    if parts.is_empty() {
        DEFAULT_LABEL.to_string()
    } else {
        parts.join(" / ")
    }
}

fn push_distinct(names: &mut Vec<String>, name: String) {
    if !names.contains(&name) {
        names.push(name);
    }
}

fn metal_name(catalog: &ReferenceCatalog, id: DbId) -> String {
    catalog
        .metal(id)
        .map_or_else(|| format!("Metal #{id}"), |m| m.name.clone())
}

fn purity_name(catalog: &ReferenceCatalog, id: DbId) -> String {
    catalog
        .purity(id)
        .map_or_else(|| format!("#{id}"), |p| p.name.clone())
}

fn tone_name(catalog: &ReferenceCatalog, id: DbId) -> String {
    catalog
        .tone(id)
        .map_or_else(|| format!("#{id}"), |t| t.name.clone())
}

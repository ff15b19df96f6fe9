//! Variant matrix builder.
//!
//! Composes the cross-metal combinations with the size axis and the diamond
//! axis into base combinations, then materializes them into [`Variant`]
//! records (see [`materialize`]).
//!
//! Enumeration order is metal combination (slowest), then size, then diamond
//! slot (fastest), so unchanged input always produces the same list.
//!
//! [`Variant`]: crate::variant::Variant

pub mod axes;
pub mod combine;
pub mod identity;
pub mod materialize;
pub mod metal;

use crate::error::CoreError;
use crate::selection::{DiamondOption, SizeValue, VariantSelection};

use self::axes::{diamond_axis, size_axis, DiamondAxis};
use self::combine::{cross_metal_combinations, cross_metal_count};
use self::identity::{DiamondSlot, IdentityKey};
use self::metal::MetalEntry;

/// Upper bound on generated variants for one product.
pub const MAX_VARIANTS: usize = 500;

/// Diamonds attached to one base combination.
#[derive(Debug, Clone, PartialEq)]
pub enum AttachedDiamonds {
    /// `shared` mode: the whole option list (possibly empty).
    Shared(Vec<DiamondOption>),
    /// `as_variant` mode: exactly one option.
    Single(DiamondOption),
    /// `as_variant` mode placeholder when there is nothing to multiply by.
    Empty,
}

impl AttachedDiamonds {
    pub fn slot(&self) -> DiamondSlot {
        match self {
            Self::Shared(_) => DiamondSlot::Shared,
            Self::Single(option) => DiamondSlot::Option(option.key),
            Self::Empty => DiamondSlot::Shared,
        }
    }

    pub fn options(&self) -> &[DiamondOption] {
        match self {
            Self::Shared(options) => options,
            Self::Single(option) => std::slice::from_ref(option),
            Self::Empty => &[],
        }
    }

    /// The option that distinguishes this variant, if any.
    pub fn distinguishing(&self) -> Option<&DiamondOption> {
        match self {
            Self::Single(option) => Some(option),
            _ => None,
        }
    }
}

/// One row of the matrix before it becomes a [`Variant`](crate::variant::Variant).
#[derive(Debug, Clone, PartialEq)]
pub struct BaseCombination {
    pub metals: Vec<MetalEntry>,
    pub size: Option<SizeValue>,
    pub diamonds: AttachedDiamonds,
}

impl BaseCombination {
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey::new(&self.metals, self.size.as_ref(), self.diamonds.slot())
    }
}

/// Whether any axis would multiply the variant set.
///
/// False when no metal is selected, the size axis is null and diamonds are
/// not in `as_variant` mode with at least one option.
pub fn has_multiplying_axis(selection: &VariantSelection) -> bool {
    !selection.metals.is_empty()
        || selection.sizes.is_active()
        || diamond_axis(selection).multiplies()
}

/// Number of base combinations [`build_combinations`] would produce.
pub fn combination_count(selection: &VariantSelection) -> usize {
    cross_metal_count(&selection.metals)
        .saturating_mul(size_axis(&selection.sizes).len())
        .saturating_mul(diamond_axis(selection).multiplier())
}

/// Build the ordered base combinations for a selection.
///
/// Fails with a validation error when the matrix would exceed
/// [`MAX_VARIANTS`].
pub fn build_combinations(selection: &VariantSelection) -> Result<Vec<BaseCombination>, CoreError> {
    let count = combination_count(selection);
    if count > MAX_VARIANTS {
        return Err(CoreError::Validation(format!(
            "Selection would generate {count} variants; the maximum is {MAX_VARIANTS}"
        )));
    }

    let metal_combos = cross_metal_combinations(&selection.metals);
    let sizes = size_axis(&selection.sizes);
    let mut out = Vec::with_capacity(count);

    match diamond_axis(selection) {
        DiamondAxis::Shared(options) => {
            for metals in &metal_combos {
                for size in &sizes {
                    out.push(BaseCombination {
                        metals: metals.clone(),
                        size: *size,
                        diamonds: AttachedDiamonds::Shared(options.clone()),
                    });
                }
            }
        }
        DiamondAxis::PerVariant(slots) => {
            for metals in &metal_combos {
                for size in &sizes {
                    for slot in &slots {
                        let diamonds = match slot {
                            Some(option) => AttachedDiamonds::Single(option.clone()),
                            None => AttachedDiamonds::Empty,
                        };
                        out.push(BaseCombination {
                            metals: metals.clone(),
                            size: *size,
                            diamonds,
                        });
                    }
                }
            }
        }
    }
    Ok(out)
}

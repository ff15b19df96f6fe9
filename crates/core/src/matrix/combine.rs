//! Cross-metal combinator.

use crate::cartesian::{cartesian_product, product_len};
use crate::selection::MetalSelection;

use super::metal::{entry_groups, EntryGroup, MetalEntry};

/// Cartesian product of every selected metal's entry groups.
///
/// Each result is the concatenation of one group per metal, first metal
/// varying slowest. No metals selected yields one empty combination.
pub fn cross_metal_combinations(metals: &[MetalSelection]) -> Vec<Vec<MetalEntry>> {
    let axes: Vec<Vec<EntryGroup>> = metals.iter().map(entry_groups).collect();
    cartesian_product(&axes)
        .into_iter()
        .map(|groups| groups.concat())
        .collect()
}

/// Number of combinations [`cross_metal_combinations`] would produce.
pub fn cross_metal_count(metals: &[MetalSelection]) -> usize {
    let axes: Vec<Vec<EntryGroup>> = metals.iter().map(entry_groups).collect();
    product_len(&axes)
}

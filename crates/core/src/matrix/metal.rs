//! Per-metal combination generator.
//!
//! Turns one selected metal (its purities, tones and mix mode) into entry
//! groups. Every entry in a group ends up on the same variant.

use serde::{Deserialize, Serialize};

use crate::mix_mode::MetalMixMode;
use crate::selection::MetalSelection;
use crate::types::DbId;

/// A (metal, purity?, tone?) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MetalEntry {
    pub metal_id: DbId,
    pub purity_id: Option<DbId>,
    pub tone_id: Option<DbId>,
}

impl MetalEntry {
    pub fn new(metal_id: DbId, purity_id: Option<DbId>, tone_id: Option<DbId>) -> Self {
        Self {
            metal_id,
            purity_id,
            tone_id,
        }
    }
}

/// Entries that must be attached to the same variant.
pub type EntryGroup = Vec<MetalEntry>;

/// Expand one metal selection into its entry groups, in selection order.
///
/// | purities | tones | mode                        | groups               |
/// |----------|-------|-----------------------------|----------------------|
/// | none     | none  | any                         | 1 × `[(m, -, -)]`    |
/// | p        | none  | any                         | p singletons         |
/// | none     | t     | any                         | t singletons         |
/// | p        | t     | `separate`                  | p × t singletons     |
/// | p        | t     | `combine_tones_per_purity`  | p groups of t        |
/// | p        | t     | `combine_purities_per_tone` | t groups of p        |
pub fn entry_groups(selection: &MetalSelection) -> Vec<EntryGroup> {
    let metal_id = selection.metal_id;
    let purities = &selection.purity_ids;
    let tones = &selection.tone_ids;
    let entry = |p: Option<DbId>, t: Option<DbId>| MetalEntry::new(metal_id, p, t);

    match (purities.is_empty(), tones.is_empty()) {
        (true, true) => vec![vec![entry(None, None)]],
        (false, true) => purities.iter().map(|&p| vec![entry(Some(p), None)]).collect(),
        (true, false) => tones.iter().map(|&t| vec![entry(None, Some(t))]).collect(),
        (false, false) => match selection.mix_mode {
            MetalMixMode::Separate => purities
                .iter()
                .flat_map(|&p| tones.iter().map(move |&t| vec![entry(Some(p), Some(t))]))
                .collect(),
            MetalMixMode::CombineTonesPerPurity => purities
                .iter()
                .map(|&p| tones.iter().map(|&t| entry(Some(p), Some(t))).collect())
                .collect(),
            MetalMixMode::CombinePuritiesPerTone => tones
                .iter()
                .map(|&t| purities.iter().map(|&p| entry(Some(p), Some(t))).collect())
                .collect(),
        },
    }
}

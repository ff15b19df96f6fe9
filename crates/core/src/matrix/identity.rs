//! Identity keys used to match regenerated variants against earlier ones.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::selection::{DiamondKey, SizeValue};
use crate::types::DbId;

use super::metal::MetalEntry;

/// Which diamond slot a variant occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiamondSlot {
    /// No distinguishing diamond: `shared` mode, or `as_variant` with no
    /// active options. Both key as `d=shared`.
    Shared,
    /// `as_variant` mode: the variant carries exactly this option.
    Option(DiamondKey),
}

/// Deterministic fingerprint of a variant's defining attributes.
///
/// Built from the sorted metal triples, the size value and the diamond slot.
/// Entry order inside a combination does not affect the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityKey(String);

impl IdentityKey {
    pub fn new(metals: &[MetalEntry], size: Option<&SizeValue>, slot: DiamondSlot) -> Self {
        let mut sorted = metals.to_vec();
        sorted.sort();

        let mut key = String::from("m=");
        for (i, entry) in sorted.iter().enumerate() {
            if i > 0 {
                key.push(',');
            }
            let _ = write!(
                key,
                "{}:{}:{}",
                entry.metal_id,
                opt(entry.purity_id),
                opt(entry.tone_id)
            );
        }

        key.push_str("|s=");
        match size {
            Some(size) => {
                let _ = write!(key, "{}{}", size.value, size.unit.as_str());
            }
            None => key.push('-'),
        }

        key.push_str("|d=");
        match slot {
            DiamondSlot::Shared => key.push_str("shared"),
            DiamondSlot::Option(diamond) => {
                let _ = write!(key, "{diamond}");
            }
        }
        Self(key)
    }

    /// Wrap an already-serialized key (e.g. read back from storage).
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn opt(id: Option<DbId>) -> String {
    id.map_or_else(|| "-".to_string(), |id| id.to_string())
}

//! Mixing-mode policies for metals and diamonds.
//!
//! A mixing mode decides whether an attribute dimension multiplies the
//! variant count or is merged into fewer, richer variants. Persisted product
//! records may carry stale or hand-edited mode strings, so deserialization is
//! lenient: anything unrecognized falls back to the default mode.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Lowercase and unify separators so `Combine-Tones-Per-Purity` parses.
fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_lowercase().replace(['-', ' '], "_")
}

// ---------------------------------------------------------------------------
// Metal mix mode
// ---------------------------------------------------------------------------

/// How a selected metal's purities and tones are turned into entry groups.
///
/// Only meaningful when both purities and tones are selected for the metal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum MetalMixMode {
    /// One variant per (purity, tone) pair.
    #[default]
    Separate,
    /// One variant per purity, listing every selected tone.
    CombineTonesPerPurity,
    /// One variant per tone, listing every selected purity.
    CombinePuritiesPerTone,
}

impl MetalMixMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Separate => "separate",
            Self::CombineTonesPerPurity => "combine_tones_per_purity",
            Self::CombinePuritiesPerTone => "combine_purities_per_tone",
        }
    }

    /// Parse a mode string, falling back to [`MetalMixMode::Separate`].
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|_| {
            tracing::warn!(mode = raw, "Unrecognized metal mix mode, using separate");
            Self::default()
        })
    }
}

impl FromStr for MetalMixMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "separate" => Ok(Self::Separate),
            "combine_tones_per_purity" => Ok(Self::CombineTonesPerPurity),
            "combine_purities_per_tone" => Ok(Self::CombinePuritiesPerTone),
            _ => Err(CoreError::Validation(format!(
                "Unknown metal mix mode: '{s}'"
            ))),
        }
    }
}

impl From<String> for MetalMixMode {
    fn from(raw: String) -> Self {
        Self::parse_lenient(&raw)
    }
}

impl std::fmt::Display for MetalMixMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Diamond mixing mode
// ---------------------------------------------------------------------------

/// How a product's diamond options relate to its variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum DiamondMixingMode {
    /// Every variant carries the whole diamond-option list.
    #[default]
    Shared,
    /// Each diamond option multiplies the variant set.
    AsVariant,
}

impl DiamondMixingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shared => "shared",
            Self::AsVariant => "as_variant",
        }
    }

    /// Parse a mode string, falling back to [`DiamondMixingMode::Shared`].
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|_| {
            tracing::warn!(mode = raw, "Unrecognized diamond mixing mode, using shared");
            Self::default()
        })
    }
}

impl FromStr for DiamondMixingMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "shared" => Ok(Self::Shared),
            "as_variant" | "variant" => Ok(Self::AsVariant),
            _ => Err(CoreError::Validation(format!(
                "Unknown diamond mixing mode: '{s}'"
            ))),
        }
    }
}

impl From<String> for DiamondMixingMode {
    fn from(raw: String) -> Self {
        Self::parse_lenient(&raw)
    }
}

impl std::fmt::Display for DiamondMixingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Persisted map
// ---------------------------------------------------------------------------

/// Convert a persisted `{ "<metal id>": "<mode>" }` map into typed modes.
///
/// Keys that are not valid metal ids are skipped and unknown mode strings
/// become [`MetalMixMode::Separate`].
pub fn parse_metal_mix_modes(raw: &BTreeMap<String, String>) -> BTreeMap<DbId, MetalMixMode> {
    raw.iter()
        .filter_map(|(key, mode)| match key.trim().parse::<DbId>() {
            Ok(metal_id) => Some((metal_id, MetalMixMode::parse_lenient(mode))),
            Err(_) => {
                tracing::warn!(key = %key, "Skipping metal mix mode with non-numeric metal key");
                None
            }
        })
        .collect()
}

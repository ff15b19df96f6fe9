//! Size and diamond axes.
//!
//! The size axis always multiplies. The diamond axis only multiplies in
//! `as_variant` mode; in `shared` mode the whole option list rides along on
//! every variant instead.

use crate::mix_mode::DiamondMixingMode;
use crate::selection::{DiamondOption, SizeSelection, SizeValue, VariantSelection};

/// Size axis: `[None]` when sizes are disabled or empty.
pub fn size_axis(sizes: &SizeSelection) -> Vec<Option<SizeValue>> {
    if !sizes.is_active() {
        return vec![None];
    }
    sizes
        .values
        .iter()
        .map(|&value| {
            Some(SizeValue {
                value,
                unit: sizes.unit,
            })
        })
        .collect()
}

/// The diamond axis for one product.
#[derive(Debug, Clone, PartialEq)]
pub enum DiamondAxis {
    /// Attached to every base combination; does not multiply.
    Shared(Vec<DiamondOption>),
    /// One slot per option, each multiplying the base combinations. `None`
    /// is the single placeholder slot used when there are no options.
    PerVariant(Vec<Option<DiamondOption>>),
}

impl DiamondAxis {
    /// Factor this axis contributes to the variant count.
    pub fn multiplier(&self) -> usize {
        match self {
            Self::Shared(_) => 1,
            Self::PerVariant(slots) => slots.len(),
        }
    }

    /// Whether the axis carries at least one real option slot that multiplies.
    pub fn multiplies(&self) -> bool {
        matches!(self, Self::PerVariant(slots) if slots.iter().any(Option::is_some))
    }
}

pub fn diamond_axis(selection: &VariantSelection) -> DiamondAxis {
    let options = selection.active_diamonds();
    match selection.diamond_mixing_mode {
        DiamondMixingMode::Shared => DiamondAxis::Shared(options.to_vec()),
        DiamondMixingMode::AsVariant if options.is_empty() => DiamondAxis::PerVariant(vec![None]),
        DiamondMixingMode::AsVariant => {
            DiamondAxis::PerVariant(options.iter().cloned().map(Some).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SizeUnit;

    fn diamonds(n: usize) -> Vec<DiamondOption> {
        (0..n).map(|_| DiamondOption::blank()).collect()
    }

    #[test]
    fn disabled_sizes_give_null_axis() {
        let sizes = SizeSelection {
            enabled: false,
            unit: SizeUnit::Mm,
            values: vec![16.0, 17.0],
        };
        assert_eq!(size_axis(&sizes), vec![None]);
    }

    #[test]
    fn empty_sizes_give_null_axis() {
        assert_eq!(size_axis(&SizeSelection::new(SizeUnit::Cm, vec![])), vec![None]);
    }

    #[test]
    fn size_values_keep_order_and_unit() {
        let axis = size_axis(&SizeSelection::new(SizeUnit::Cm, vec![6.5, 5.0]));
        assert_eq!(
            axis,
            vec![
                Some(SizeValue { value: 6.5, unit: SizeUnit::Cm }),
                Some(SizeValue { value: 5.0, unit: SizeUnit::Cm }),
            ]
        );
    }

    #[test]
    fn shared_mode_never_multiplies() {
        let selection = VariantSelection {
            uses_diamond: true,
            diamond_options: diamonds(5),
            diamond_mixing_mode: DiamondMixingMode::Shared,
            ..Default::default()
        };
        let axis = diamond_axis(&selection);
        assert_eq!(axis.multiplier(), 1);
        assert!(!axis.multiplies());
        assert!(matches!(axis, DiamondAxis::Shared(ref opts) if opts.len() == 5));
    }

    #[test]
    fn shared_mode_without_diamonds_attaches_nothing() {
        let selection = VariantSelection {
            uses_diamond: false,
            diamond_options: diamonds(2),
            ..Default::default()
        };
        assert_eq!(diamond_axis(&selection), DiamondAxis::Shared(Vec::new()));
    }

    #[test]
    fn as_variant_mode_multiplies_per_option() {
        let selection = VariantSelection {
            uses_diamond: true,
            diamond_options: diamonds(3),
            diamond_mixing_mode: DiamondMixingMode::AsVariant,
            ..Default::default()
        };
        let axis = diamond_axis(&selection);
        assert_eq!(axis.multiplier(), 3);
        assert!(axis.multiplies());
    }

    #[test]
    fn as_variant_mode_degenerates_to_placeholder() {
        let unused = VariantSelection {
            uses_diamond: false,
            diamond_options: diamonds(3),
            diamond_mixing_mode: DiamondMixingMode::AsVariant,
            ..Default::default()
        };
        assert_eq!(diamond_axis(&unused), DiamondAxis::PerVariant(vec![None]));

        let empty = VariantSelection {
            uses_diamond: true,
            diamond_mixing_mode: DiamondMixingMode::AsVariant,
            ..Default::default()
        };
        let axis = diamond_axis(&empty);
        assert_eq!(axis.multiplier(), 1);
        assert!(!axis.multiplies());
    }
}

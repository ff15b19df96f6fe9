//! Generic n-ary Cartesian product over ordered sequences.
//!
//! Used by the variant matrix builder to combine per-metal entry groups and
//! to cross metal combinations with the size and diamond axes.

/// Compute the Cartesian product of `axes`.
///
/// The first axis varies slowest and the last axis fastest, so the output
/// order is fully determined by the input order. Zero axes produce a single
/// empty tuple; any empty axis produces no tuples at all.
///
/// # Examples
///
/// ```
/// use karat_core::cartesian::cartesian_product;
///
/// let out = cartesian_product(&[vec![1, 2], vec![10, 20]]);
/// assert_eq!(out, vec![vec![1, 10], vec![1, 20], vec![2, 10], vec![2, 20]]);
/// ```
pub fn cartesian_product<T: Clone>(axes: &[Vec<T>]) -> Vec<Vec<T>> {
    axes.iter().fold(vec![Vec::new()], |acc, axis| {
        acc.iter()
            .flat_map(|prefix| {
                axis.iter().map(move |item| {
                    let mut next = Vec::with_capacity(prefix.len() + 1);
                    next.extend_from_slice(prefix);
                    next.push(item.clone());
                    next
                })
            })
            .collect()
    })
}

/// Number of tuples [`cartesian_product`] would produce, saturating at
/// `usize::MAX` instead of overflowing.
pub fn product_len<T>(axes: &[Vec<T>]) -> usize {
    axes.iter()
        .fold(1usize, |acc, axis| acc.saturating_mul(axis.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_axes_yield_single_empty_tuple() {
        let axes: Vec<Vec<i32>> = Vec::new();
        assert_eq!(cartesian_product(&axes), vec![Vec::<i32>::new()]);
        assert_eq!(product_len(&axes), 1);
    }

    #[test]
    fn empty_axis_yields_nothing() {
        let axes = vec![vec![1, 2], vec![], vec![3]];
        assert!(cartesian_product(&axes).is_empty());
        assert_eq!(product_len(&axes), 0);
    }

    #[test]
    fn single_axis_is_wrapped() {
        let axes = vec![vec!['a', 'b', 'c']];
        assert_eq!(
            cartesian_product(&axes),
            vec![vec!['a'], vec!['b'], vec!['c']]
        );
    }

    #[test]
    fn size_is_product_of_axis_lengths() {
        let axes = vec![vec![1, 2, 3], vec![4, 5], vec![6, 7, 8, 9]];
        let out = cartesian_product(&axes);
        assert_eq!(out.len(), 3 * 2 * 4);
        assert_eq!(product_len(&axes), out.len());
        assert!(out.iter().all(|t| t.len() == 3));
    }

    #[test]
    fn first_axis_varies_slowest() {
        let out = cartesian_product(&[vec!["x", "y"], vec!["1", "2", "3"]]);
        assert_eq!(
            out,
            vec![
                vec!["x", "1"],
                vec!["x", "2"],
                vec!["x", "3"],
                vec!["y", "1"],
                vec!["y", "2"],
                vec!["y", "3"],
            ]
        );
    }

    #[test]
    fn repeated_calls_are_identical() {
        let axes = vec![vec![3, 1, 2], vec![9, 8]];
        assert_eq!(cartesian_product(&axes), cartesian_product(&axes));
    }

    #[test]
    fn product_len_saturates() {
        let big: Vec<Vec<u8>> = vec![vec![0; 1 << 16]; 8];
        assert_eq!(product_len(&big), usize::MAX);
    }
}

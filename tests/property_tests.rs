//! Property-based tests for binning and sorting invariants.

use metrics_viewer::heatmap::{bin_index, HeatmapMatrix, RowOrder, BINS, BIN_COUNT};
use metrics_viewer::sort::{natural_cmp, SortState};
use proptest::prelude::*;
use std::cmp::Ordering;

fn package_name() -> impl Strategy<Value = String> {
    "[a-e]{1,3}"
}

proptest! {
    /// Every non-negative value lands in exactly one bin, and bins are ordered.
    #[test]
    fn prop_bins_partition_values(value in 0.0f64..1000.0) {
        let index = bin_index(value);
        prop_assert!(index < BIN_COUNT);
        if let Some(max) = BINS[index].max {
            prop_assert!(value <= f64::from(max));
        }
        if index > 0 {
            let previous = BINS[index - 1].max.unwrap();
            prop_assert!(value > f64::from(previous));
        }
    }

    /// Integer values fall inside their bin's [min, max] range.
    #[test]
    fn prop_integer_bins_respect_bounds(value in 0u32..200) {
        let bin = BINS[bin_index(f64::from(value))];
        prop_assert!(value >= bin.min);
        prop_assert!(bin.max.map_or(true, |max| value <= max));
    }

    /// Matrix counts add up to the number of methods, whatever their packages.
    #[test]
    fn prop_matrix_counts_every_method(
        methods in prop::collection::vec((package_name(), prop::option::of(0.0f64..50.0)), 0..40)
    ) {
        let matrix = HeatmapMatrix::from_methods(
            methods.iter().map(|(p, c)| (p.as_str(), *c)),
        );
        prop_assert_eq!(matrix.total_methods(), methods.len());
        let by_column: usize = (0..BIN_COUNT).map(|c| matrix.column_total(c)).sum();
        prop_assert_eq!(by_column, methods.len());
    }

    /// Selecting the same header twice returns to the original direction.
    #[test]
    fn prop_sort_toggle_has_period_two(column in 0usize..8, ascending: bool) {
        let start = SortState::new(column, ascending);
        let mut state = start;
        state.select(column);
        prop_assert_ne!(state, start);
        state.select(column);
        prop_assert_eq!(state, start);
    }

    /// Toggling a heatmap column twice reverses the order of distinct totals.
    #[test]
    fn prop_heatmap_column_toggle_reorders(
        methods in prop::collection::vec((package_name(), 0.0f64..30.0), 1..30),
        column in 0usize..BIN_COUNT,
    ) {
        let matrix = HeatmapMatrix::from_methods(
            methods.iter().map(|(p, c)| (p.as_str(), Some(*c))),
        );
        let mut order = RowOrder::new(&matrix);
        order.toggle_column(&matrix, column);
        let descending: Vec<usize> =
            order.rows().iter().map(|&r| matrix.count(r, column)).collect();
        prop_assert!(descending.windows(2).all(|w| w[0] >= w[1]));

        order.toggle_column(&matrix, column);
        let ascending: Vec<usize> =
            order.rows().iter().map(|&r| matrix.count(r, column)).collect();
        prop_assert!(ascending.windows(2).all(|w| w[0] <= w[1]));
    }

    /// Natural comparison is antisymmetric.
    #[test]
    fn prop_natural_cmp_antisymmetric(a in "[a-zA-Z0-9]{0,8}", b in "[a-zA-Z0-9]{0,8}") {
        prop_assert_eq!(natural_cmp(&a, &b), natural_cmp(&b, &a).reverse());
        prop_assert_eq!(natural_cmp(&a, &a), Ordering::Equal);
    }
}

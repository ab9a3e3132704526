//! Package × complexity-bin heatmap.
//!
//! [`HeatmapMatrix`] is computed once from the dataset: one row per package
//! that owns methods, one column per [`BINS`] entry, each cell the number of
//! methods of that package in that bin. Interaction never recomputes counts;
//! it only changes the [`RowOrder`] layered over the matrix.

pub mod color;
pub mod order;

use std::collections::BTreeMap;
use std::fmt;

use crate::model::Dataset;

pub use color::{ColorScale, Rgb};
pub use order::{OrderMode, RowOrder};

/// A fixed complexity range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bin {
    pub label: &'static str,
    pub min: u32,
    /// Inclusive upper bound; `None` for the open-ended bin.
    pub max: Option<u32>,
}

pub const BIN_COUNT: usize = 7;

pub const BINS: [Bin; BIN_COUNT] = [
    Bin { label: "0–1", min: 0, max: Some(1) },
    Bin { label: "2–3", min: 2, max: Some(3) },
    Bin { label: "4–5", min: 4, max: Some(5) },
    Bin { label: "6–8", min: 6, max: Some(8) },
    Bin { label: "9–12", min: 9, max: Some(12) },
    Bin { label: "13–20", min: 13, max: Some(20) },
    Bin { label: "21+", min: 21, max: None },
];

/// Bin of a coerced complexity value.
///
/// Each bin owns everything above the previous bin's upper bound up to its own,
/// so fractional values land in exactly one bin too.
pub fn bin_index(value: f64) -> usize {
    BINS.iter()
        .position(|bin| bin.max.is_some_and(|max| value <= f64::from(max)))
        .unwrap_or(BIN_COUNT - 1)
}

/// Missing, non-finite and negative complexities count as 0.
pub fn coerce_complexity(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

/// Method counts per package and bin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeatmapMatrix {
    packages: Vec<String>,
    counts: Vec<[usize; BIN_COUNT]>,
    totals: Vec<usize>,
}

impl HeatmapMatrix {
    pub fn build(dataset: &Dataset) -> Self {
        Self::from_methods(
            dataset
                .methods()
                .map(|m| (m.package, m.method.complexity)),
        )
    }

    /// Build from `(package, complexity)` pairs.
    pub fn from_methods<'a>(methods: impl IntoIterator<Item = (&'a str, Option<f64>)>) -> Self {
        let mut by_package: BTreeMap<&str, [usize; BIN_COUNT]> = BTreeMap::new();
        for (package, complexity) in methods {
            let bin = bin_index(coerce_complexity(complexity));
            by_package.entry(package).or_insert([0; BIN_COUNT])[bin] += 1;
        }

        let mut matrix = Self::default();
        for (package, counts) in by_package {
            matrix.packages.push(package.to_string());
            matrix.totals.push(counts.iter().sum());
            matrix.counts.push(counts);
        }
        log::debug!(
            "Heatmap built: {} packages, max cell {}",
            matrix.packages.len(),
            matrix.max_count()
        );
        matrix
    }

    /// Package names, sorted.
    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    pub fn row_count(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn row_index(&self, package: &str) -> Option<usize> {
        self.packages.binary_search_by(|p| p.as_str().cmp(package)).ok()
    }

    pub fn count(&self, row: usize, column: usize) -> usize {
        self.counts
            .get(row)
            .and_then(|r| r.get(column))
            .copied()
            .unwrap_or(0)
    }

    /// Methods of a package across every bin.
    pub fn total(&self, row: usize) -> usize {
        self.totals.get(row).copied().unwrap_or(0)
    }

    pub fn column_total(&self, column: usize) -> usize {
        self.counts.iter().map(|r| r.get(column).copied().unwrap_or(0)).sum()
    }

    pub fn total_methods(&self) -> usize {
        self.totals.iter().sum()
    }

    /// Largest cell, or 1 for an empty matrix so scales stay well formed.
    pub fn max_count(&self) -> usize {
        self.counts
            .iter()
            .flat_map(|r| r.iter().copied())
            .max()
            .filter(|&m| m > 0)
            .unwrap_or(1)
    }
}

/// Read-only description of one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub package: String,
    pub bin: &'static str,
    pub count: usize,
    pub package_total: usize,
}

impl fmt::Display for Tooltip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  Bin: {}  Functions: {}  Total in package: {}",
            self.package, self.bin, self.count, self.package_total
        )
    }
}

pub fn tooltip(matrix: &HeatmapMatrix, row: usize, column: usize) -> Option<Tooltip> {
    let package = matrix.packages.get(row)?;
    let bin = BINS.get(column)?;
    Some(Tooltip {
        package: package.clone(),
        bin: bin.label,
        count: matrix.count(row, column),
        package_total: matrix.total(row),
    })
}

pub const LEGEND_STEPS: usize = 6;

/// Seven evenly spaced legend values from 0 to `max`.
pub fn legend(max: usize) -> [usize; LEGEND_STEPS + 1] {
    let mut stops = [0; LEGEND_STEPS + 1];
    for (i, stop) in stops.iter_mut().enumerate() {
        *stop = (i as f64 * max as f64 / LEGEND_STEPS as f64).round() as usize;
    }
    stops
}

/// Terminal cell layout for a heatmap region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGeometry {
    pub label_width: u16,
    pub column_width: u16,
    pub row_height: u16,
}

impl CellGeometry {
    const MIN_COLUMN_WIDTH: u16 = 6;
    const MAX_LABEL_WIDTH: u16 = 28;

    /// Fit `rows` rows into `width` × `height` terminal cells.
    pub fn fit(width: u16, height: u16, rows: usize, longest_label: usize) -> Self {
        let label_width = (longest_label as u16).clamp(4, Self::MAX_LABEL_WIDTH) + 1;
        let available = width.saturating_sub(label_width);
        let column_width = (available / BIN_COUNT as u16).max(Self::MIN_COLUMN_WIDTH);
        let rows = rows.max(1) as u16;
        let row_height = (height / rows).clamp(1, 2);
        Self {
            label_width,
            column_width,
            row_height,
        }
    }
}

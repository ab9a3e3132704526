//! Row ordering for the heatmap.

use super::{HeatmapMatrix, BIN_COUNT};

/// Strategy that produced the current order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderMode {
    Alphabetical,
    /// Descending by package total.
    Total,
    Column { index: usize, ascending: bool },
    /// A package was moved to the top of the previous order.
    Isolated,
}

/// Display order of matrix rows.
///
/// Holds row indices into a [`HeatmapMatrix`]; the matrix itself is never
/// modified. Sorts are stable and start from alphabetical order, so ties list
/// packages by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOrder {
    rows: Vec<usize>,
    mode: OrderMode,
    /// Column and direction of the last header toggle.
    last_column: Option<(usize, bool)>,
}

impl RowOrder {
    /// Initial order: total descending.
    pub fn new(matrix: &HeatmapMatrix) -> Self {
        let mut order = Self {
            rows: (0..matrix.row_count()).collect(),
            mode: OrderMode::Alphabetical,
            last_column: None,
        };
        order.sort_total(matrix);
        order
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn mode(&self) -> OrderMode {
        self.mode
    }

    /// Matrix row shown at display position `position`.
    pub fn row_at(&self, position: usize) -> Option<usize> {
        self.rows.get(position).copied()
    }

    pub fn position_of(&self, row: usize) -> Option<usize> {
        self.rows.iter().position(|&r| r == row)
    }

    pub fn sort_alphabetical(&mut self, matrix: &HeatmapMatrix) {
        self.rows = (0..matrix.row_count()).collect();
        self.mode = OrderMode::Alphabetical;
    }

    pub fn sort_total(&mut self, matrix: &HeatmapMatrix) {
        let mut rows: Vec<usize> = (0..matrix.row_count()).collect();
        rows.sort_by(|&a, &b| matrix.total(b).cmp(&matrix.total(a)));
        self.rows = rows;
        self.mode = OrderMode::Total;
    }

    /// Header selection on a bin column.
    ///
    /// A column not toggled last sorts descending; toggling the same column
    /// again flips the direction.
    pub fn toggle_column(&mut self, matrix: &HeatmapMatrix, column: usize) -> bool {
        if column >= BIN_COUNT {
            log::warn!("Heatmap column {} out of range", column);
            return false;
        }

        let ascending = match self.last_column {
            Some((last, ascending)) if last == column => !ascending,
            _ => false,
        };

        let mut rows: Vec<usize> = (0..matrix.row_count()).collect();
        rows.sort_by(|&a, &b| {
            let ord = matrix.count(a, column).cmp(&matrix.count(b, column));
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        });

        self.rows = rows;
        self.last_column = Some((column, ascending));
        self.mode = OrderMode::Column { index: column, ascending };
        true
    }

    /// Move `package` to the top, keeping the others in their current order.
    pub fn isolate(&mut self, matrix: &HeatmapMatrix, package: &str) -> bool {
        let Some(row) = matrix.row_index(package) else {
            log::warn!("Cannot isolate unknown package {}", package);
            return false;
        };
        self.isolate_row(row)
    }

    pub fn isolate_row(&mut self, row: usize) -> bool {
        let Some(position) = self.position_of(row) else {
            return false;
        };
        let row = self.rows.remove(position);
        self.rows.insert(0, row);
        self.mode = OrderMode::Isolated;
        true
    }
}

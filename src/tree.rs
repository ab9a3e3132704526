//! Collapsible package → file tree for the tables tab.

use std::collections::BTreeSet;

use crate::model::Dataset;
use crate::sort::{self, natural_cmp, Cell, SortState, SortableRow, TreeNode};
use crate::tables::{FileRow, PackageRow, FILE_COLUMNS};

/// One row of the file metrics tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeRow {
    Package(PackageRow),
    File(FileRow),
}

impl TreeRow {
    /// Package key the row belongs to.
    pub fn package(&self) -> &str {
        match self {
            TreeRow::Package(p) => &p.name,
            TreeRow::File(f) => &f.package,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TreeRow::Package(p) => &p.name,
            TreeRow::File(f) => &f.name,
        }
    }
}

impl SortableRow for TreeRow {
    fn cell(&self, column: usize) -> Cell {
        match self {
            TreeRow::Package(p) => p.cell(column),
            TreeRow::File(f) => f.cell(column),
        }
    }
}

impl TreeNode for TreeRow {
    fn is_parent(&self) -> bool {
        matches!(self, TreeRow::Package(_))
    }
}

/// Package rows by name, each followed by its files by name.
pub fn build_rows(dataset: &Dataset) -> Vec<TreeRow> {
    let mut packages: Vec<_> = dataset.packages.iter().collect();
    packages.sort_by(|a, b| natural_cmp(a.name(), b.name()));

    let mut rows = Vec::new();
    for package in packages {
        rows.push(TreeRow::Package(PackageRow::from_package(package)));

        let mut files: Vec<_> = package.files.iter().collect();
        files.sort_by(|a, b| natural_cmp(a.name(), b.name()));
        rows.extend(
            files
                .into_iter()
                .map(|f| TreeRow::File(FileRow::from_file(package.name(), f))),
        );
    }
    rows
}

/// Outcome of the expand/collapse-all control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkToggle {
    Expanded,
    Collapsed,
}

/// Rows, sort state and collapsed packages of the file tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeState {
    pub rows: Vec<TreeRow>,
    pub sort: SortState,
    collapsed: BTreeSet<String>,
}

impl TreeState {
    /// Every package starts collapsed.
    pub fn new(rows: Vec<TreeRow>) -> Self {
        let collapsed = rows
            .iter()
            .filter(|r| r.is_parent())
            .map(|r| r.package().to_string())
            .collect();
        Self {
            rows,
            sort: crate::tables::FILE_INITIAL_SORT,
            collapsed,
        }
    }

    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self::new(build_rows(dataset))
    }

    fn has_package(&self, package: &str) -> bool {
        self.rows
            .iter()
            .any(|r| r.is_parent() && r.package() == package)
    }

    pub fn is_collapsed(&self, package: &str) -> bool {
        self.collapsed.contains(package)
    }

    /// Flip one package. Collapsing hides its file rows; the tree has no
    /// deeper levels to collapse.
    pub fn toggle(&mut self, package: &str) -> bool {
        if !self.has_package(package) {
            log::warn!("Toggle requested for unknown package {}", package);
            return false;
        }
        if !self.collapsed.remove(package) {
            self.collapsed.insert(package.to_string());
        }
        true
    }

    /// Expand everything if anything is collapsed, else collapse everything.
    pub fn toggle_all(&mut self) -> BulkToggle {
        if self.collapsed.is_empty() {
            self.collapsed = self
                .rows
                .iter()
                .filter(|r| r.is_parent())
                .map(|r| r.package().to_string())
                .collect();
            BulkToggle::Collapsed
        } else {
            self.collapsed.clear();
            BulkToggle::Expanded
        }
    }

    /// Label of the expand/collapse-all control for the current state.
    pub fn bulk_label(&self) -> &'static str {
        if self.collapsed.is_empty() {
            "Collapse All"
        } else {
            "Expand All"
        }
    }

    /// Rows that are shown: all packages, files of expanded packages.
    pub fn visible_rows(&self) -> Vec<&TreeRow> {
        self.rows
            .iter()
            .filter(|r| r.is_parent() || !self.collapsed.contains(r.package()))
            .collect()
    }

    /// Header selection on the file metrics table.
    pub fn sort_by(&mut self, column: usize) -> bool {
        sort::sort_tree(&mut self.rows, FILE_COLUMNS, &mut self.sort, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{File, Package, PackageMeta};

    fn dataset() -> Dataset {
        let file = |name: &str, loc: u64| {
            let mut f = File::default();
            f.metadata.file_name = name.into();
            f.metadata.lines_of_code = loc;
            f
        };
        Dataset {
            packages: vec![
                Package {
                    metadata: PackageMeta { name: "zeta".into() },
                    files: vec![file("B.scala", 5), file("A.scala", 50)],
                    ..Default::default()
                },
                Package {
                    metadata: PackageMeta { name: "alpha".into() },
                    files: vec![file("C.scala", 10)],
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    fn names(rows: &[&TreeRow]) -> Vec<String> {
        rows.iter().map(|r| r.name().to_string()).collect()
    }

    #[test]
    fn test_rows_sorted_and_collapsed() {
        let state = TreeState::from_dataset(&dataset());
        assert_eq!(
            names(&state.rows.iter().collect::<Vec<_>>()),
            vec!["alpha", "C.scala", "zeta", "A.scala", "B.scala"]
        );
        assert_eq!(names(&state.visible_rows()), vec!["alpha", "zeta"]);
        assert_eq!(state.bulk_label(), "Expand All");
    }

    #[test]
    fn test_toggle_single_package() {
        let mut state = TreeState::from_dataset(&dataset());
        assert!(state.toggle("zeta"));
        assert_eq!(
            names(&state.visible_rows()),
            vec!["alpha", "zeta", "A.scala", "B.scala"]
        );
        assert!(state.toggle("zeta"));
        assert!(state.is_collapsed("zeta"));
        assert!(!state.toggle("missing"));
    }

    #[test]
    fn test_toggle_all_expands_when_any_collapsed() {
        let mut state = TreeState::from_dataset(&dataset());
        state.toggle("alpha");
        assert_eq!(state.toggle_all(), BulkToggle::Expanded);
        assert_eq!(state.visible_rows().len(), 5);
        assert_eq!(state.bulk_label(), "Collapse All");
        assert_eq!(state.toggle_all(), BulkToggle::Collapsed);
        assert_eq!(state.visible_rows().len(), 2);
    }

    #[test]
    fn test_sort_keeps_files_under_package() {
        let mut state = TreeState::from_dataset(&dataset());
        assert!(state.sort_by(1));
        assert!(state.sort_by(1));
        let order: Vec<_> = state.rows.iter().map(|r| r.name()).collect();
        assert_eq!(order, vec!["alpha", "C.scala", "zeta", "A.scala", "B.scala"]);
    }
}

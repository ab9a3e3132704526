//! Row models for the file tree and the per-file member and method tables.
//!
//! Rows are owned snapshots of the values a table displays, so presentation
//! state can be reordered freely while the dataset stays untouched. Member and
//! method rows remember their index in the source file for drill-down.

use crate::model::{File, Member, Method, Package};
use crate::signature::extract_name;
use crate::sort::{self, Cell, Column, SortKind, SortState, SortableRow};

pub const FILE_COLUMNS: &[Column] = &[
    Column::new("Name", SortKind::Text),
    Column::new("Lines", SortKind::Number),
    Column::new("Functions", SortKind::Number),
    Column::new("Public", SortKind::Number),
    Column::new("Private", SortKind::Number),
    Column::new("Size", SortKind::Number),
];

pub const MEMBER_COLUMNS: &[Column] = &[
    Column::new("Signature", SortKind::Text),
    Column::new("Type", SortKind::Text),
    Column::new("Access", SortKind::Text),
    Column::new("Lines", SortKind::Number),
    Column::new("Scaladoc", SortKind::Boolean),
    Column::new("Complexity", SortKind::Number),
];

pub const METHOD_COLUMNS: &[Column] = &[
    Column::new("Signature", SortKind::Text),
    Column::new("Access", SortKind::Text),
    Column::new("Lines", SortKind::Number),
    Column::new("Scaladoc", SortKind::Boolean),
    Column::new("Complexity", SortKind::Number),
];

/// Name ascending.
pub const FILE_INITIAL_SORT: SortState = SortState::new(0, true);
/// Lines descending.
pub const MEMBER_INITIAL_SORT: SortState = SortState::new(3, false);
/// Lines descending.
pub const METHOD_INITIAL_SORT: SortState = SortState::new(2, false);

pub const NO_FILES: &str = "No files found";
pub const NO_MEMBERS: &str = "No members found in this file";
pub const NO_METHODS: &str = "No methods found in this file";

/// Integral values print without a fractional part.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

// ============================================================================
// File tree rows
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRow {
    pub name: String,
    pub lines: u64,
    pub functions: u64,
    pub public: u64,
    pub private: u64,
    pub size: u64,
}

impl PackageRow {
    pub fn from_package(package: &Package) -> Self {
        let core = &package.rollup.core_stats;
        Self {
            name: package.name().to_string(),
            lines: core.total_loc,
            functions: core.total_functions,
            public: core.total_public_functions,
            private: core.total_private_functions,
            size: core.total_file_size_bytes,
        }
    }
}

impl SortableRow for PackageRow {
    fn cell(&self, column: usize) -> Cell {
        match column {
            0 => Cell::text(&self.name),
            1 => Cell::number(self.lines),
            2 => Cell::number(self.functions),
            3 => Cell::number(self.public),
            4 => Cell::number(self.private),
            _ => Cell::number(self.size),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRow {
    /// Key of the owning package row.
    pub package: String,
    pub name: String,
    /// Full path shown as the row's tooltip.
    pub path: String,
    pub lines: u64,
    pub functions: u64,
    pub public: u64,
    pub private: u64,
    pub size: u64,
}

impl FileRow {
    pub fn from_file(package: &str, file: &File) -> Self {
        let core = &file.rollup.core_stats;
        Self {
            package: package.to_string(),
            name: file.name().to_string(),
            path: file.display_path().to_string(),
            lines: file.metadata.lines_of_code,
            functions: core.total_functions,
            public: core.total_public_functions,
            private: core.total_private_functions,
            size: core.total_file_size_bytes,
        }
    }
}

impl SortableRow for FileRow {
    fn cell(&self, column: usize) -> Cell {
        match column {
            0 => Cell::text(&self.name),
            1 => Cell::number(self.lines),
            2 => Cell::number(self.functions),
            3 => Cell::number(self.public),
            4 => Cell::number(self.private),
            _ => Cell::number(self.size),
        }
    }
}

// ============================================================================
// Member and method rows
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct MemberRow {
    /// Position in the file's member list.
    pub index: usize,
    pub name: String,
    pub signature: String,
    pub declaration_type: String,
    pub access: String,
    pub lines: u64,
    pub documented: bool,
    pub complexity: Option<f64>,
}

impl MemberRow {
    pub fn from_member(index: usize, member: &Member) -> Self {
        Self {
            index,
            name: extract_name(&member.metadata.signature).to_string(),
            signature: member.metadata.signature.clone(),
            declaration_type: member.metadata.declaration_type.clone(),
            access: member.metadata.access_modifier.clone(),
            lines: member.metadata.lines_of_code,
            documented: member.has_scaladoc,
            complexity: member.complexity,
        }
    }

    pub fn complexity_text(&self) -> String {
        self.complexity
            .map(format_number)
            .unwrap_or_else(|| "-".to_string())
    }
}

impl SortableRow for MemberRow {
    fn cell(&self, column: usize) -> Cell {
        match column {
            0 => Cell::text(&self.signature),
            1 => Cell::text(&self.declaration_type),
            2 => Cell::text(&self.access),
            3 => Cell::number(self.lines),
            4 => Cell::flag(self.documented),
            _ => Cell::text(self.complexity_text()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodRow {
    /// Position in the file's method list.
    pub index: usize,
    pub name: String,
    pub signature: String,
    pub access_modifier: String,
    pub nested: bool,
    pub lines: u64,
    pub documented: bool,
    pub complexity: Option<f64>,
}

impl MethodRow {
    pub fn from_method(index: usize, method: &Method) -> Self {
        Self {
            index,
            name: extract_name(&method.metadata.signature).to_string(),
            signature: method.metadata.signature.clone(),
            access_modifier: method.metadata.access_modifier.clone(),
            nested: method.is_nested(),
            lines: method.metadata.lines_of_code,
            documented: method.has_scaladoc,
            complexity: method.complexity,
        }
    }

    /// Nested methods show "nested" in place of their modifier.
    pub fn access_text(&self) -> &str {
        if self.nested {
            "nested"
        } else {
            &self.access_modifier
        }
    }

    pub fn complexity_text(&self) -> String {
        self.complexity
            .map(format_number)
            .unwrap_or_else(|| "1".to_string())
    }
}

impl SortableRow for MethodRow {
    fn cell(&self, column: usize) -> Cell {
        match column {
            0 => Cell::text(&self.signature),
            1 => Cell::text(self.access_text()),
            2 => Cell::number(self.lines),
            3 => Cell::flag(self.documented),
            _ => Cell::text(self.complexity_text()),
        }
    }
}

// ============================================================================
// Flat tables
// ============================================================================

/// A flat, sortable table with its own sort state.
#[derive(Debug, Clone)]
pub struct FlatTable<R> {
    pub rows: Vec<R>,
    pub columns: &'static [Column],
    pub state: SortState,
    /// Text of the single row shown when there is no data.
    pub placeholder: &'static str,
}

impl<R: SortableRow> FlatTable<R> {
    /// Build a table and present it in `initial` order.
    pub fn new(
        mut rows: Vec<R>,
        columns: &'static [Column],
        initial: SortState,
        placeholder: &'static str,
    ) -> Self {
        sort::apply(&mut rows, columns, initial);
        Self {
            rows,
            columns,
            state: initial,
            placeholder,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Header selection; a placeholder table ignores it.
    pub fn sort_by(&mut self, column: usize) -> bool {
        sort::sort_flat(&mut self.rows, self.columns, &mut self.state, column)
    }

    pub fn header(&self, column: usize) -> String {
        self.columns
            .get(column)
            .map(|c| format!("{}{}", c.title, self.state.indicator(column)))
            .unwrap_or_default()
    }
}

impl<R> Default for FlatTable<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            columns: &[],
            state: SortState::new(0, true),
            placeholder: "",
        }
    }
}

pub fn member_table(file: &File) -> FlatTable<MemberRow> {
    let rows = file
        .members
        .iter()
        .enumerate()
        .map(|(i, m)| MemberRow::from_member(i, m))
        .collect();
    FlatTable::new(rows, MEMBER_COLUMNS, MEMBER_INITIAL_SORT, NO_MEMBERS)
}

pub fn method_table(file: &File) -> FlatTable<MethodRow> {
    let rows = file
        .methods
        .iter()
        .enumerate()
        .map(|(i, m)| MethodRow::from_method(i, m))
        .collect();
    FlatTable::new(rows, METHOD_COLUMNS, METHOD_INITIAL_SORT, NO_METHODS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(signature: &str, lines: u64, nested: bool) -> Method {
        let mut m = Method::default();
        m.metadata.signature = signature.into();
        m.metadata.lines_of_code = lines;
        m.metadata.access_modifier = "public".into();
        m.metadata.is_nested = nested;
        m
    }

    #[test]
    fn test_method_table_starts_lines_descending() {
        let mut file = File::default();
        file.methods = vec![
            method("a()", 3, false),
            method("b()", 12, true),
            method("c()", 7, false),
        ];
        let table = method_table(&file);
        let names: Vec<_> = table.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
        assert_eq!(table.rows[0].index, 1);
        assert_eq!(table.rows[0].access_text(), "nested");
        assert_eq!(table.state, METHOD_INITIAL_SORT);
    }

    #[test]
    fn test_complexity_text_defaults() {
        let member = MemberRow::from_member(0, &Member::default());
        assert_eq!(member.complexity_text(), "-");
        let method = MethodRow::from_method(0, &Method::default());
        assert_eq!(method.complexity_text(), "1");

        let mut m = Method::default();
        m.complexity = Some(4.0);
        assert_eq!(MethodRow::from_method(0, &m).complexity_text(), "4");
    }

    #[test]
    fn test_empty_table_shows_placeholder_and_ignores_sort() {
        let mut table = member_table(&File::default());
        assert!(table.is_empty());
        assert_eq!(table.placeholder, NO_MEMBERS);
        assert!(!table.sort_by(0));
        assert_eq!(table.state, MEMBER_INITIAL_SORT);
    }

    #[test]
    fn test_header_shows_direction() {
        let mut file = File::default();
        file.methods = vec![method("a()", 1, false)];
        let mut table = method_table(&file);
        assert_eq!(table.header(2), "Lines ▼");
        table.sort_by(0);
        assert_eq!(table.header(0), "Signature ▲");
        assert_eq!(table.header(2), "Lines");
    }
}

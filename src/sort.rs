//! Column sorting shared by every table in the viewer.
//!
//! Rows expose their cells as the text they display. Each column declares how
//! that text compares ([`SortKind`]), and every table keeps a [`SortState`]
//! that is updated by the header rule: selecting the sorted column flips the
//! direction, selecting another column sorts it ascending.
//!
//! Two table shapes exist. Flat tables reorder all rows freely. Tree tables
//! hold parent rows each followed by their children; a sort reorders the
//! parents, then the children within each parent, and never lets a child
//! leave its parent.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// How a column's cell text compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKind {
    /// Numeric value with `,` grouping separators ignored.
    Number,
    /// Check-mark indicator, set before unset when descending.
    Boolean,
    /// Case-insensitive natural ordering.
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    pub kind: SortKind,
}

impl Column {
    pub const fn new(title: &'static str, kind: SortKind) -> Self {
        Self { title, kind }
    }
}

/// Sorted column and direction of one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: usize,
    pub ascending: bool,
}

impl SortState {
    pub const fn new(column: usize, ascending: bool) -> Self {
        Self { column, ascending }
    }

    /// Apply a header selection.
    pub fn select(&mut self, column: usize) {
        if self.column == column {
            self.ascending = !self.ascending;
        } else {
            self.column = column;
            self.ascending = true;
        }
    }

    /// Arrow shown next to a header title.
    pub fn indicator(&self, column: usize) -> &'static str {
        match (self.column == column, self.ascending) {
            (false, _) => "",
            (true, true) => " ▲",
            (true, false) => " ▼",
        }
    }
}

/// A displayed table cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub text: String,
    /// Positive check-mark indicator, compared by boolean columns.
    pub positive: bool,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            positive: false,
        }
    }

    pub fn flag(value: bool) -> Self {
        Self {
            text: if value { "✓" } else { "✗" }.to_string(),
            positive: value,
        }
    }

    pub fn number(value: impl std::fmt::Display) -> Self {
        Cell::text(value.to_string())
    }
}

/// A table row whose cells can be compared.
pub trait SortableRow {
    fn cell(&self, column: usize) -> Cell;
}

/// A row of a two-level table.
pub trait TreeNode: SortableRow {
    /// Parent rows start a group; every following child belongs to it.
    fn is_parent(&self) -> bool;
}

// ============================================================================
// Comparators
// ============================================================================

/// Compare two cells under a column kind, ascending.
pub fn compare_cells(a: &Cell, b: &Cell, kind: SortKind) -> Ordering {
    match kind {
        SortKind::Number => compare_numbers(&a.text, &b.text),
        SortKind::Boolean => a.positive.cmp(&b.positive),
        SortKind::Text => natural_cmp(&a.text, &b.text),
    }
}

/// Unparseable text such as `-` orders before every number.
fn compare_numbers(a: &str, b: &str) -> Ordering {
    match (parse_number(a), parse_number(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Leading decimal number of `text` after removing `,` separators.
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text.trim().chars().filter(|&c| c != ',').collect();
    let bytes = cleaned.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if frac_end > frac_start || digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }
    cleaned[..end].parse().ok()
}

/// Case-insensitive comparison with digit runs compared by value.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let ord = compare_digit_runs(&take_digits(&mut left), &take_digits(&mut right));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                let ord = fold_case(x).cmp(&fold_case(y));
                if ord != Ordering::Equal {
                    return ord;
                }
                left.next();
                right.next();
            }
        }
    }
}

fn fold_case(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
        run.push(c);
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn directed(ordering: Ordering, ascending: bool) -> Ordering {
    if ascending {
        ordering
    } else {
        ordering.reverse()
    }
}

// ============================================================================
// Table sorts
// ============================================================================

/// Reorder rows by `state` without touching it. Stable.
pub fn apply<R: SortableRow>(rows: &mut Vec<R>, columns: &[Column], state: SortState) {
    let Some(column) = columns.get(state.column) else {
        log::warn!("Sort column {} out of range", state.column);
        return;
    };
    let taken = std::mem::take(rows);
    *rows = ordered(taken, column.kind, state);
}

fn ordered<R: SortableRow>(rows: Vec<R>, kind: SortKind, state: SortState) -> Vec<R> {
    let mut keyed: Vec<(Cell, R)> = rows
        .into_iter()
        .map(|row| (row.cell(state.column), row))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| directed(compare_cells(a, b, kind), state.ascending));
    keyed.into_iter().map(|(_, row)| row).collect()
}

/// Header selection on a flat table.
///
/// Returns false, leaving rows and state untouched, for an empty table or an
/// unknown column.
pub fn sort_flat<R: SortableRow>(
    rows: &mut Vec<R>,
    columns: &[Column],
    state: &mut SortState,
    column: usize,
) -> bool {
    if rows.is_empty() || column >= columns.len() {
        return false;
    }
    state.select(column);
    apply(rows, columns, *state);
    true
}

/// Header selection on a tree table.
pub fn sort_tree<R: TreeNode>(
    rows: &mut Vec<R>,
    columns: &[Column],
    state: &mut SortState,
    column: usize,
) -> bool {
    if rows.is_empty() || column >= columns.len() {
        return false;
    }
    state.select(column);
    apply_tree(rows, columns, *state);
    true
}

/// Reorder a tree table by `state`, keeping every child behind its parent.
pub fn apply_tree<R: TreeNode>(rows: &mut Vec<R>, columns: &[Column], state: SortState) {
    let Some(column) = columns.get(state.column) else {
        log::warn!("Sort column {} out of range", state.column);
        return;
    };
    let kind = column.kind;

    // Children that precede any parent stay in front as their own group.
    let mut orphans: Vec<R> = Vec::new();
    let mut groups: Vec<(R, Vec<R>)> = Vec::new();
    for row in std::mem::take(rows) {
        if row.is_parent() {
            groups.push((row, Vec::new()));
        } else if let Some((_, children)) = groups.last_mut() {
            children.push(row);
        } else {
            orphans.push(row);
        }
    }

    let mut keyed: Vec<(Cell, (R, Vec<R>))> = groups
        .into_iter()
        .map(|group| (group.0.cell(state.column), group))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| directed(compare_cells(a, b, kind), state.ascending));

    rows.extend(ordered(orphans, kind, state));
    for (_, (parent, children)) in keyed {
        rows.push(parent);
        rows.extend(ordered(children, kind, state));
    }
}

//! View models for the info tab, summary cards, charts and detail blocks.
//!
//! Everything here is a pure function of the dataset. Absent metrics read as
//! zero, so every card and block always has a value to show.

use std::fmt;

use serde_json::Value;

use crate::analysis::Record;
use crate::model::{
    BranchDensityStats, Dataset, DedupeKey, File, Method, Member, PatternMatchingStats,
    ProjectMeta, Rollup,
};
use crate::tables::format_number;

const KB: f64 = 1024.0;
const MB: f64 = 1024.0 * 1024.0;

/// A byte count scaled for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteSize {
    pub value: String,
    pub unit: &'static str,
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Bytes below 1 KiB, otherwise kilobytes or megabytes with one decimal.
pub fn format_bytes(bytes: f64) -> ByteSize {
    if bytes >= MB {
        ByteSize {
            value: format!("{:.1}", bytes / MB),
            unit: "megabytes",
        }
    } else if bytes >= KB {
        ByteSize {
            value: format!("{:.1}", bytes / KB),
            unit: "kilobytes",
        }
    } else {
        ByteSize {
            value: format_number(bytes),
            unit: "bytes",
        }
    }
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value)
}

// ============================================================================
// Summary cards
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: &'static str,
    pub value: String,
    pub detail: Option<String>,
}

impl Card {
    fn new(title: &'static str, value: impl ToString) -> Self {
        Self {
            title,
            value: value.to_string(),
            detail: None,
        }
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Project-wide headline numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCards {
    pub cards: Vec<Card>,
}

impl SummaryCards {
    pub fn from_rollup(rollup: &Rollup) -> Self {
        let core = &rollup.core_stats;
        let avg_size = format_bytes(rollup.average_file_size_bytes);

        let cards = vec![
            Card::new("Total Files", rollup.total_count),
            Card::new("Lines of Code", core.total_loc),
            Card::new("Functions", core.total_functions),
            Card::new("Public Functions", core.total_public_functions),
            Card::new("Scaladoc Coverage", percent(rollup.scala_doc_coverage_percentage))
                .with_detail(format!(
                    "{}/{} symbols",
                    rollup.total_documented_public_symbols, core.total_public_symbols
                )),
            Card::new("Deprecated Symbols", core.total_deprecated_symbols)
                .with_detail(percent(rollup.deprecated_symbols_density_percentage)),
            Card::new("Inline Methods", rollup.inline_and_implicit_stats.inline_methods),
            Card::new("Avg File Size", avg_size.value).with_detail(avg_size.unit),
            Card::new(
                "Public Return Types",
                percent(rollup.public_return_type_explicitness.unwrap_or(0.0)),
            )
            .with_detail("explicit"),
            Card::new(
                "Avg Complexity",
                format!("{:.1}", rollup.avg_cyclomatic_complexity),
            ),
            Card::new("Max Complexity", format_number(rollup.max_cyclomatic_complexity)),
            Card::new(
                "Branch Density",
                percent(rollup.branch_density_stats.density_per100),
            )
            .with_detail("per 100 LOC"),
            Card::new("Avg Nesting Depth", format!("{:.1}", rollup.avg_nesting_depth)),
            Card::new("Max Nesting Depth", format!("{:.1}", rollup.max_nesting_depth)),
        ];
        Self { cards }
    }
}

// ============================================================================
// Info tab
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoValue {
    Text(String),
    Link(String),
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRow {
    pub label: &'static str,
    pub value: InfoValue,
}

#[derive(Clone, Copy)]
enum Hint {
    Plain,
    Link,
    List,
}

const BASIC_FIELDS: &[(&str, &str)] = &[
    ("name", "Project Name"),
    ("description", "Description"),
    ("version", "Version"),
    ("organization", "Organization"),
    ("organizationName", "Organization Name"),
    ("scalaVersion", "Scala Version"),
    ("crossScalaVersions", "Cross Scala Versions"),
    ("licenses", "License"),
];

const EXTENDED_FIELDS: &[(&str, &str, Hint)] = &[
    ("projectInfoNameFormal", "Formal Name", Hint::Plain),
    ("homepage", "Project Homepage", Hint::Link),
    ("apiURL", "API Documentation", Hint::Link),
    ("organizationHomepage", "Organization Homepage", Hint::Link),
    ("developers", "Developers", Hint::List),
    ("isSnapshot", "Is Snapshot", Hint::Plain),
    ("versionScheme", "Version Scheme", Hint::Plain),
    ("scmInfo", "Source Repository (scm)", Hint::Plain),
    ("startYear", "Start Year", Hint::Plain),
];

fn meta_value(meta: &ProjectMeta, key: &str) -> Option<Value> {
    let value = match key {
        "name" => Value::String(meta.name.clone()),
        "description" => Value::String(meta.description.clone()),
        "version" => Value::String(meta.version.clone()),
        _ => meta.attributes.get(key)?.clone(),
    };
    is_present(&value).then_some(value)
}

/// Blank, false, zero and empty values are not shown.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

fn info_row(label: &'static str, value: Value, hint: Hint) -> InfoRow {
    let value = match (hint, &value) {
        (Hint::Link, _) => InfoValue::Link(value_text(&value)),
        (Hint::List, Value::Array(items)) => InfoValue::List(items.iter().map(value_text).collect()),
        _ => InfoValue::Text(value_text(&value)),
    };
    InfoRow { label, value }
}

/// Basic and extended project rows, omitting fields with no value.
pub fn info_rows(meta: &ProjectMeta) -> (Vec<InfoRow>, Vec<InfoRow>) {
    let basic = BASIC_FIELDS
        .iter()
        .filter_map(|(key, label)| {
            meta_value(meta, key).map(|v| info_row(label, v, Hint::Plain))
        })
        .collect();
    let extended = EXTENDED_FIELDS
        .iter()
        .filter_map(|(key, label, hint)| meta_value(meta, key).map(|v| info_row(label, v, *hint)))
        .collect();
    (basic, extended)
}

// ============================================================================
// Charts
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFunctions {
    pub package: String,
    pub public: u64,
    pub private: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBar {
    pub file: String,
    pub value: u64,
}

/// Data behind the charts tab, apart from the heatmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSeries {
    pub functions_per_package: Vec<PackageFunctions>,
    pub loc_per_file: Vec<FileBar>,
    pub size_per_file: Vec<FileBar>,
    pub public_functions: u64,
    pub private_functions: u64,
}

impl ChartSeries {
    pub fn build(dataset: &Dataset, dedupe: DedupeKey) -> Self {
        let functions_per_package = dataset
            .packages
            .iter()
            .map(|p| PackageFunctions {
                package: p.name().to_string(),
                public: p.rollup.core_stats.total_public_functions,
                private: p.rollup.core_stats.total_private_functions,
            })
            .collect();

        let files = dataset.unique_files(dedupe);
        let label = |f: &File| match dedupe {
            DedupeKey::Name => f.name().to_string(),
            DedupeKey::Path => f.display_path().to_string(),
        };
        let loc_per_file = files
            .iter()
            .map(|u| FileBar {
                file: label(u.file),
                value: u.file.metadata.lines_of_code,
            })
            .collect();
        let size_per_file = files
            .iter()
            .map(|u| FileBar {
                file: label(u.file),
                value: u.file.metadata.file_size_bytes,
            })
            .collect();

        Self {
            functions_per_package,
            loc_per_file,
            size_per_file,
            public_functions: dataset.rollup.core_stats.total_public_functions,
            private_functions: dataset.rollup.core_stats.total_private_functions,
        }
    }
}

// ============================================================================
// Detail blocks
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricBlock {
    pub title: &'static str,
    pub lines: Vec<(&'static str, String)>,
}

impl MetricBlock {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            lines: Vec::new(),
        }
    }

    fn line(mut self, label: &'static str, value: impl ToString) -> Self {
        self.lines.push((label, value.to_string()));
        self
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

fn optional_percent(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}%", v))
        .unwrap_or_else(|| "-".to_string())
}

/// Metrics shown at the top of the file details tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDetails {
    pub name: String,
    pub path: String,
    pub blocks: Vec<MetricBlock>,
}

impl FileDetails {
    pub fn from_file(file: &File) -> Self {
        let core = &file.rollup.core_stats;
        let usage = &file.rollup.inline_and_implicit_stats;

        let blocks = vec![
            MetricBlock::new("Core Metrics")
                .line("Lines of Code", file.metadata.lines_of_code)
                .line("Total Functions", core.total_functions)
                .line("Public Functions", core.total_public_functions)
                .line("Private Functions", core.total_private_functions)
                .line("File Size", format!("{} bytes", file.metadata.file_size_bytes)),
            MetricBlock::new("Return Type Explicitness")
                .line("Defs/Vals/Vars", core.total_defs_vals_vars)
                .line("Public Defs/Vals/Vars", core.total_public_defs_vals_vars)
                .line("Explicit", usage.explicit_defs_vals_vars)
                .line("Explicit Public", usage.explicit_public_defs_vals_vars)
                .line("Explicitness", optional_percent(file.rollup.return_type_explicitness))
                .line(
                    "Public Explicitness",
                    optional_percent(file.rollup.public_return_type_explicitness),
                ),
            MetricBlock::new("Inline Usage")
                .line("Inline Methods", usage.inline_methods)
                .line("Inline Vals", usage.inline_vals)
                .line("Inline Vars", usage.inline_vars)
                .line("Inline Params", usage.inline_params),
            MetricBlock::new("Implicit & Given Usage")
                .line("Implicit Defs", usage.implicit_defs)
                .line("Implicit Vals", usage.implicit_vals)
                .line("Implicit Vars", usage.implicit_vars)
                .line("Implicit Conversions", usage.implicit_conversions)
                .line("Given Instances", usage.given_instances)
                .line("Given Conversions", usage.given_conversions),
        ];

        Self {
            name: file.name().to_string(),
            path: file.display_path().to_string(),
            blocks,
        }
    }
}

/// Metric blocks of the complexity view.
pub fn record_blocks(record: Record<'_>) -> Vec<MetricBlock> {
    match record {
        Record::Method(method) => method_blocks(method),
        Record::Member(member) => member_blocks(member),
    }
}

fn method_blocks(method: &Method) -> Vec<MetricBlock> {
    let params = &method.parameter_stats;
    let access = if method.metadata.access_modifier.is_empty() {
        "public"
    } else {
        method.metadata.access_modifier.as_str()
    };
    vec![
        MetricBlock::new("Core Metrics")
            .line("Lines of Code", method.metadata.lines_of_code)
            .line("Cyclomatic Complexity", format_number(method.complexity_or_baseline()))
            .line("Nesting Depth", method.nesting_depth)
            .line("Access Modifier", access)
            .line("Has Scaladoc", yes_no(method.has_scaladoc))
            .line("Is Nested", yes_no(method.is_nested())),
        MetricBlock::new("Parameter Metrics")
            .line("Total Parameters", params.total_params)
            .line("Parameter Lists", params.param_lists)
            .line("Implicit Parameters", params.implicit_params)
            .line("Implicit Parameter Lists", params.implicit_param_lists)
            .line("Using Parameters", params.using_params)
            .line("Using Parameter Lists", params.using_param_lists)
            .line("Default Parameters", params.defaulted_params)
            .line("By-Name Parameters", params.by_name_params)
            .line("Vararg Parameters", params.vararg_params),
        pattern_block(&method.pattern_matching_stats),
        branch_block(&method.branch_density_stats),
    ]
}

fn member_blocks(member: &Member) -> Vec<MetricBlock> {
    let declaration = if member.metadata.declaration_type.is_empty() {
        "N/A"
    } else {
        member.metadata.declaration_type.as_str()
    };
    let access = if member.metadata.access_modifier.is_empty() {
        "public"
    } else {
        member.metadata.access_modifier.as_str()
    };
    vec![
        MetricBlock::new("Core Metrics")
            .line("Member Type", declaration)
            .line("Lines of Code", member.metadata.lines_of_code)
            .line(
                "Cyclomatic Complexity",
                member
                    .complexity
                    .map(format_number)
                    .unwrap_or_else(|| "-".to_string()),
            )
            .line("Nesting Depth", "-")
            .line("Access Modifier", access)
            .line("Has Scaladoc", yes_no(member.has_scaladoc)),
        pattern_block(&member.pattern_matching_stats),
        branch_block(&member.branch_density_stats),
    ]
}

fn pattern_block(stats: &PatternMatchingStats) -> MetricBlock {
    MetricBlock::new("Pattern Matching Metrics")
        .line("Match Expressions", stats.matches)
        .line("Total Cases", stats.cases)
        .line("Guards", stats.guards)
        .line("Wildcards", stats.wildcards)
        .line("Max Nesting Depth", stats.max_nesting)
        .line("Nested Matches", stats.nested_matches)
        .line("Avg Cases per Match", format!("{:.2}", stats.avg_cases_per_match))
}

fn branch_block(stats: &BranchDensityStats) -> MetricBlock {
    MetricBlock::new("Branch Density Metrics")
        .line("Total Branches", stats.branches)
        .line("If/Else Count", stats.if_count)
        .line("Case Count", stats.case_count)
        .line("Loop Count", stats.loop_count)
        .line("Catch Case Count", stats.catch_case_count)
        .line("Boolean Operators (&&, ||)", stats.bool_ops_count)
        .line("Branch Density per 100 LOC", format!("{:.2}", stats.density_per100))
        .line("Boolean Ops per 100 LOC", format!("{:.2}", stats.bool_ops_per100))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_bytes_units() {
        assert_eq!(format_bytes(512.0).to_string(), "512 bytes");
        assert_eq!(format_bytes(2048.0).to_string(), "2.0 kilobytes");
        assert_eq!(format_bytes(1_572_864.0).to_string(), "1.5 megabytes");
    }

    #[test]
    fn test_cards_default_to_zero() {
        let cards = SummaryCards::from_rollup(&Rollup::default()).cards;
        let coverage = cards.iter().find(|c| c.title == "Scaladoc Coverage").unwrap();
        assert_eq!(coverage.value, "0.0%");
        assert_eq!(coverage.detail.as_deref(), Some("0/0 symbols"));
        let size = cards.iter().find(|c| c.title == "Avg File Size").unwrap();
        assert_eq!(size.value, "0");
        assert_eq!(size.detail.as_deref(), Some("bytes"));
    }

    #[test]
    fn test_info_rows_skip_blank_and_hint_links() {
        let meta: ProjectMeta = serde_json::from_value(json!({
            "name": "core",
            "description": "  ",
            "version": "1.2.0",
            "homepage": "https://example.org",
            "developers": ["ann", "bo"],
            "isSnapshot": false,
            "startYear": 2021
        }))
        .unwrap();

        let (basic, extended) = info_rows(&meta);
        let labels: Vec<_> = basic.iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["Project Name", "Version"]);
        assert_eq!(
            extended,
            vec![
                InfoRow {
                    label: "Project Homepage",
                    value: InfoValue::Link("https://example.org".into())
                },
                InfoRow {
                    label: "Developers",
                    value: InfoValue::List(vec!["ann".into(), "bo".into()])
                },
                InfoRow {
                    label: "Start Year",
                    value: InfoValue::Text("2021".into())
                },
            ]
        );
    }

    #[test]
    fn test_file_details_explicitness_placeholder() {
        let mut file = File::default();
        let details = FileDetails::from_file(&file);
        assert_eq!(details.blocks[1].lines[4].1, "-");

        file.rollup.return_type_explicitness = Some(87.5);
        let details = FileDetails::from_file(&file);
        assert_eq!(details.blocks[1].lines[4].1, "87.50%");
    }

    #[test]
    fn test_member_blocks_show_missing_complexity() {
        let blocks = record_blocks(Record::Member(&Member::default()));
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].lines[0], ("Member Type", "N/A".to_string()));
        assert_eq!(blocks[0].lines[2], ("Cyclomatic Complexity", "-".to_string()));
    }
}

//! Package, file, member and method records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::flags::{count, flag, null_as_default};
use super::rollup::{BranchDensityStats, ParameterStats, PatternMatchingStats, Rollup};

/// Descriptive project attributes.
///
/// `name`, `description` and `version` are always shown; every other key the
/// generator emits (organization, licenses, developers, ...) is kept verbatim
/// in `attributes` and rendered by the info view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectMeta {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageMeta {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Package {
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: PackageMeta,
    #[serde(deserialize_with = "null_as_default")]
    pub rollup: Rollup,
    #[serde(rename = "fileStats", deserialize_with = "null_as_default")]
    pub files: Vec<File>,
}

impl Package {
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn find_file(&self, file_name: &str) -> Option<&File> {
        self.files.iter().find(|f| f.metadata.file_name == file_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileMeta {
    #[serde(deserialize_with = "null_as_default")]
    pub file_name: String,
    pub file_path: Option<String>,
    /// Package declared inside the file, when it differs from the grouping.
    pub package_name: Option<String>,
    #[serde(deserialize_with = "count")]
    pub lines_of_code: u64,
    #[serde(deserialize_with = "count")]
    pub file_size_bytes: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct File {
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: FileMeta,
    #[serde(deserialize_with = "null_as_default")]
    pub rollup: Rollup,
    #[serde(rename = "memberStats", deserialize_with = "null_as_default")]
    pub members: Vec<Member>,
    #[serde(rename = "methodStats", deserialize_with = "null_as_default")]
    pub methods: Vec<Method>,
}

impl File {
    pub fn name(&self) -> &str {
        &self.metadata.file_name
    }

    /// Full path for tooltips, falling back to the display name.
    pub fn display_path(&self) -> &str {
        self.metadata
            .file_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(&self.metadata.file_name)
    }
}

/// Visibility of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Private,
    Protected,
    Other,
}

impl Access {
    pub fn parse(modifier: &str) -> Self {
        match modifier {
            "public" => Access::Public,
            "private" => Access::Private,
            "protected" => Access::Protected,
            _ => Access::Other,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MemberMeta {
    #[serde(deserialize_with = "null_as_default")]
    pub signature: String,
    #[serde(deserialize_with = "null_as_default")]
    pub declaration_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub access_modifier: String,
    #[serde(deserialize_with = "count")]
    pub lines_of_code: u64,
}

/// Non-executable declaration: class, trait, object, val, var or type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Member {
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: MemberMeta,
    #[serde(deserialize_with = "flag")]
    pub has_scaladoc: bool,
    pub complexity: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub pattern_matching_stats: PatternMatchingStats,
    #[serde(deserialize_with = "null_as_default")]
    pub branch_density_stats: BranchDensityStats,
}

impl Member {
    pub fn access(&self) -> Access {
        Access::parse(&self.metadata.access_modifier)
    }

    /// Cyclomatic complexity with the single-path baseline applied.
    pub fn complexity_or_baseline(&self) -> f64 {
        baseline_complexity(self.complexity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MethodMeta {
    pub name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub signature: String,
    #[serde(deserialize_with = "null_as_default")]
    pub access_modifier: String,
    #[serde(deserialize_with = "count")]
    pub lines_of_code: u64,
    #[serde(deserialize_with = "flag")]
    pub is_nested: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Method {
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: MethodMeta,
    #[serde(deserialize_with = "flag")]
    pub has_scaladoc: bool,
    pub complexity: Option<f64>,
    #[serde(deserialize_with = "count")]
    pub nesting_depth: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub parameter_stats: ParameterStats,
    #[serde(deserialize_with = "null_as_default")]
    pub pattern_matching_stats: PatternMatchingStats,
    #[serde(deserialize_with = "null_as_default")]
    pub branch_density_stats: BranchDensityStats,
}

impl Method {
    pub fn access(&self) -> Access {
        Access::parse(&self.metadata.access_modifier)
    }

    pub fn is_nested(&self) -> bool {
        self.metadata.is_nested
    }

    pub fn complexity_or_baseline(&self) -> f64 {
        baseline_complexity(self.complexity)
    }
}

/// Missing, zero, negative or non-finite complexity reads as the baseline of 1.
/// Fractional values are kept as reported.
fn baseline_complexity(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_flags_normalised_on_ingest() {
        let method: Method = serde_json::from_str(
            r#"{"metadata": {"signature": "run(): Unit", "isNested": "true"}, "hasScaladoc": "false"}"#,
        )
        .unwrap();
        assert!(method.is_nested());
        assert!(!method.has_scaladoc);
    }

    #[test]
    fn test_complexity_baseline() {
        let mut member = Member::default();
        assert_eq!(member.complexity_or_baseline(), 1.0);
        member.complexity = Some(0.0);
        assert_eq!(member.complexity_or_baseline(), 1.0);
        member.complexity = Some(f64::NAN);
        assert_eq!(member.complexity_or_baseline(), 1.0);
        member.complexity = Some(7.0);
        assert_eq!(member.complexity_or_baseline(), 7.0);
        member.complexity = Some(10.4);
        assert_eq!(member.complexity_or_baseline(), 10.4);
    }

    #[test]
    fn test_null_numbers_read_as_zero() {
        let method: Method = serde_json::from_str(
            r#"{"metadata": {"signature": "run(): Unit", "linesOfCode": null},
                "nestingDepth": null, "complexity": null,
                "parameterStats": {"totalParams": null, "paramLists": 2}}"#,
        )
        .unwrap();
        assert_eq!(method.metadata.lines_of_code, 0);
        assert_eq!(method.nesting_depth, 0);
        assert_eq!(method.parameter_stats.total_params, 0);
        assert_eq!(method.parameter_stats.param_lists, 2);
        assert_eq!(method.complexity_or_baseline(), 1.0);

        let file: File = serde_json::from_str(
            r#"{"metadata": {"fileName": "A.scala", "linesOfCode": null, "fileSizeBytes": null},
                "rollup": {"coreStats": {"totalLoc": null}, "avgNestingDepth": null},
                "members": null}"#,
        )
        .unwrap();
        assert_eq!(file.metadata.lines_of_code, 0);
        assert_eq!(file.metadata.file_size_bytes, 0);
        assert_eq!(file.rollup.core_stats.total_loc, 0);
        assert_eq!(file.rollup.avg_nesting_depth, 0.0);
        assert!(file.members.is_empty());
    }

    #[test]
    fn test_display_path_falls_back_to_name() {
        let mut file = File::default();
        file.metadata.file_name = "Foo.scala".into();
        assert_eq!(file.display_path(), "Foo.scala");
        file.metadata.file_path = Some("src/main/scala/Foo.scala".into());
        assert_eq!(file.display_path(), "src/main/scala/Foo.scala");
    }

    #[test]
    fn test_project_meta_keeps_extra_attributes() {
        let meta: ProjectMeta = serde_json::from_str(
            r#"{"name": "core", "scalaVersion": "3.3.1", "developers": ["a", "b"]}"#,
        )
        .unwrap();
        assert_eq!(meta.name, "core");
        assert!(meta.attributes.contains_key("scalaVersion"));
        assert!(meta.attributes["developers"].is_array());
    }
}

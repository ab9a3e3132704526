//! Aggregate metrics shared by the project, package and file levels.

use serde::{Deserialize, Serialize};

use super::flags::{count, metric, null_as_default};

/// Aggregated metrics for a collection of source entities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Rollup {
    /// Number of files covered by the rollup.
    #[serde(deserialize_with = "count")]
    pub total_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub core_stats: CoreStats,
    #[serde(deserialize_with = "metric")]
    pub scala_doc_coverage_percentage: f64,
    #[serde(deserialize_with = "count")]
    pub total_documented_public_symbols: u64,
    #[serde(deserialize_with = "metric")]
    pub deprecated_symbols_density_percentage: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub inline_and_implicit_stats: InlineImplicitStats,
    #[serde(deserialize_with = "metric")]
    pub average_file_size_bytes: f64,
    pub return_type_explicitness: Option<f64>,
    pub public_return_type_explicitness: Option<f64>,
    #[serde(deserialize_with = "metric")]
    pub avg_cyclomatic_complexity: f64,
    #[serde(deserialize_with = "metric")]
    pub max_cyclomatic_complexity: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub branch_density_stats: BranchDensityStats,
    #[serde(deserialize_with = "metric")]
    pub avg_nesting_depth: f64,
    #[serde(deserialize_with = "metric")]
    pub max_nesting_depth: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoreStats {
    #[serde(deserialize_with = "count")]
    pub total_loc: u64,
    #[serde(deserialize_with = "count")]
    pub total_functions: u64,
    #[serde(deserialize_with = "count")]
    pub total_public_functions: u64,
    #[serde(deserialize_with = "count")]
    pub total_private_functions: u64,
    #[serde(deserialize_with = "count")]
    pub total_public_symbols: u64,
    #[serde(deserialize_with = "count")]
    pub total_deprecated_symbols: u64,
    #[serde(deserialize_with = "count")]
    pub total_file_size_bytes: u64,
    #[serde(deserialize_with = "count")]
    pub total_defs_vals_vars: u64,
    #[serde(deserialize_with = "count")]
    pub total_public_defs_vals_vars: u64,
}

/// Inline, implicit and given usage counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InlineImplicitStats {
    #[serde(deserialize_with = "count")]
    pub inline_methods: u64,
    #[serde(deserialize_with = "count")]
    pub inline_vals: u64,
    #[serde(deserialize_with = "count")]
    pub inline_vars: u64,
    #[serde(deserialize_with = "count")]
    pub inline_params: u64,
    #[serde(deserialize_with = "count")]
    pub implicit_defs: u64,
    #[serde(deserialize_with = "count")]
    pub implicit_vals: u64,
    #[serde(deserialize_with = "count")]
    pub implicit_vars: u64,
    #[serde(deserialize_with = "count")]
    pub implicit_conversions: u64,
    #[serde(deserialize_with = "count")]
    pub given_instances: u64,
    #[serde(deserialize_with = "count")]
    pub given_conversions: u64,
    #[serde(deserialize_with = "count")]
    pub explicit_defs_vals_vars: u64,
    #[serde(deserialize_with = "count")]
    pub explicit_public_defs_vals_vars: u64,
}

/// Branching constructs and their density per 100 lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BranchDensityStats {
    #[serde(deserialize_with = "count")]
    pub branches: u64,
    #[serde(deserialize_with = "count")]
    pub if_count: u64,
    #[serde(deserialize_with = "count")]
    pub case_count: u64,
    #[serde(deserialize_with = "count")]
    pub loop_count: u64,
    #[serde(deserialize_with = "count")]
    pub catch_case_count: u64,
    #[serde(deserialize_with = "count")]
    pub bool_ops_count: u64,
    #[serde(deserialize_with = "metric")]
    pub density_per100: f64,
    #[serde(deserialize_with = "metric")]
    pub bool_ops_per100: f64,
}

/// Match expression statistics for one routine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PatternMatchingStats {
    #[serde(deserialize_with = "count")]
    pub matches: u64,
    #[serde(deserialize_with = "count")]
    pub cases: u64,
    #[serde(deserialize_with = "count")]
    pub guards: u64,
    #[serde(deserialize_with = "count")]
    pub wildcards: u64,
    #[serde(deserialize_with = "count")]
    pub max_nesting: u64,
    #[serde(deserialize_with = "count")]
    pub nested_matches: u64,
    #[serde(deserialize_with = "metric")]
    pub avg_cases_per_match: f64,
}

/// Parameter list shape of a method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParameterStats {
    #[serde(deserialize_with = "count")]
    pub total_params: u64,
    #[serde(deserialize_with = "count")]
    pub param_lists: u64,
    #[serde(deserialize_with = "count")]
    pub implicit_params: u64,
    #[serde(deserialize_with = "count")]
    pub implicit_param_lists: u64,
    #[serde(deserialize_with = "count")]
    pub using_params: u64,
    #[serde(deserialize_with = "count")]
    pub using_param_lists: u64,
    #[serde(deserialize_with = "count")]
    pub defaulted_params: u64,
    #[serde(deserialize_with = "count")]
    pub by_name_params: u64,
    #[serde(deserialize_with = "count")]
    pub vararg_params: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_zero() {
        let rollup: Rollup = serde_json::from_str(r#"{"coreStats": {"totalLoc": 120}}"#).unwrap();
        assert_eq!(rollup.core_stats.total_loc, 120);
        assert_eq!(rollup.core_stats.total_functions, 0);
        assert_eq!(rollup.avg_cyclomatic_complexity, 0.0);
        assert!(rollup.return_type_explicitness.is_none());
    }

    #[test]
    fn test_per100_field_names() {
        let stats: BranchDensityStats =
            serde_json::from_str(r#"{"densityPer100": 12.5, "boolOpsPer100": null}"#).unwrap();
        assert_eq!(stats.density_per100, 12.5);
        assert_eq!(stats.bool_ops_per100, 0.0);
    }
}

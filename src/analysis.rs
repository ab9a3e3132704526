//! Complexity analysis for individual methods and members.
//!
//! The rules read precomputed metrics and turn them into short diagnostics for
//! the complexity view. Rules are independent; the output order is the fixed
//! presentation order below, never a priority ranking:
//!
//! 1. cyclomatic complexity band
//! 2. nesting depth (methods)
//! 3. parameter count, then parameter lists (methods)
//! 4. special parameters (methods)
//! 5. pattern matching load
//! 6. missing documentation on public declarations
//!
//! An empty result means "no issues", not an error.

use std::fmt;

use crate::model::{Access, Member, Method, ParameterStats, PatternMatchingStats};
use crate::tables::format_number;

const DEEP_NESTING_THRESHOLD: u64 = 3;
const MANY_PARAMETERS_THRESHOLD: u64 = 5;
const NESTED_MATCH_THRESHOLD: u64 = 2;
const COMPLEX_PATTERN_THRESHOLD: f64 = 5.0;

/// Cyclomatic complexity classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ComplexityBand {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl ComplexityBand {
    /// Bands are closed above: 5, 10 and 20 still belong to the lower band.
    pub fn classify(complexity: f64) -> Self {
        if complexity <= 5.0 {
            ComplexityBand::Low
        } else if complexity <= 10.0 {
            ComplexityBand::Moderate
        } else if complexity <= 20.0 {
            ComplexityBand::High
        } else {
            ComplexityBand::VeryHigh
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComplexityBand::Low => "Low complexity",
            ComplexityBand::Moderate => "Moderate complexity",
            ComplexityBand::High => "High complexity",
            ComplexityBand::VeryHigh => "Very high complexity",
        }
    }

    fn advice(&self) -> &'static str {
        match self {
            ComplexityBand::Low => "Simple, straightforward logic. Easy to test and maintain.",
            ComplexityBand::Moderate => {
                "Some branching logic. Consider refactoring if it grows further."
            }
            ComplexityBand::High => {
                "Complex control flow. Consider breaking down into smaller methods."
            }
            ComplexityBand::VeryHigh => "Very complex logic. Strong candidate for refactoring.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Complexity(ComplexityBand),
    DeepNesting,
    ManyParameters,
    CurriedParameters,
    SpecialParameters,
    PatternMatching,
    NestedMatches,
    ComplexPatterns,
    MissingDocumentation,
}

impl DiagnosticKind {
    /// Whether the finding deserves attention rather than being informational.
    pub fn is_concern(&self) -> bool {
        !matches!(
            self,
            DiagnosticKind::Complexity(ComplexityBand::Low)
                | DiagnosticKind::CurriedParameters
                | DiagnosticKind::SpecialParameters
                | DiagnosticKind::PatternMatching
        )
    }
}

/// One finding, rendered as `headline: detail`.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub headline: String,
    pub detail: String,
}

impl Diagnostic {
    fn new(kind: DiagnosticKind, headline: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            headline: headline.into(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.headline, self.detail)
    }
}

/// The two kinds of record the complexity view can be opened for.
#[derive(Debug, Clone, Copy)]
pub enum Record<'a> {
    Method(&'a Method),
    Member(&'a Member),
}

/// Analyze either kind of record.
pub fn analyze(record: Record<'_>) -> Vec<Diagnostic> {
    match record {
        Record::Method(method) => analyze_method(method),
        Record::Member(member) => analyze_member(member),
    }
}

pub fn analyze_method(method: &Method) -> Vec<Diagnostic> {
    let mut out = vec![complexity_band(method.complexity_or_baseline())];
    out.extend(nesting(method.nesting_depth));
    out.extend(parameters(&method.parameter_stats));
    out.extend(special_parameters(&method.parameter_stats));
    out.extend(pattern_matching(&method.pattern_matching_stats));
    out.extend(documentation(method.access(), method.has_scaladoc, "method"));
    out
}

pub fn analyze_member(member: &Member) -> Vec<Diagnostic> {
    let mut out = vec![complexity_band(member.complexity_or_baseline())];
    out.extend(pattern_matching(&member.pattern_matching_stats));
    out.extend(documentation(member.access(), member.has_scaladoc, "member"));
    out
}

// ============================================================================
// Rules
// ============================================================================

fn complexity_band(complexity: f64) -> Diagnostic {
    let band = ComplexityBand::classify(complexity);
    Diagnostic::new(
        DiagnosticKind::Complexity(band),
        format!("{} ({})", band.label(), format_number(complexity)),
        band.advice(),
    )
}

fn nesting(depth: u64) -> Option<Diagnostic> {
    (depth > DEEP_NESTING_THRESHOLD).then(|| {
        Diagnostic::new(
            DiagnosticKind::DeepNesting,
            format!("Deep nesting ({} levels)", depth),
            "Consider extracting nested logic into separate methods.",
        )
    })
}

fn parameters(stats: &ParameterStats) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    if stats.total_params > MANY_PARAMETERS_THRESHOLD {
        out.push(Diagnostic::new(
            DiagnosticKind::ManyParameters,
            format!("Many parameters ({})", stats.total_params),
            "Consider using a parameter object or builder pattern.",
        ));
    }
    if stats.param_lists > 1 {
        out.push(Diagnostic::new(
            DiagnosticKind::CurriedParameters,
            format!("Curried function ({} parameter lists)", stats.param_lists),
            "Uses partial application for flexibility.",
        ));
    }
    out
}

fn special_parameters(stats: &ParameterStats) -> Option<Diagnostic> {
    let parts: Vec<String> = [
        (stats.implicit_params, "implicit"),
        (stats.defaulted_params, "with defaults"),
        (stats.by_name_params, "by-name"),
        (stats.vararg_params, "vararg"),
    ]
    .iter()
    .filter(|(count, _)| *count > 0)
    .map(|(count, label)| format!("{} {}", count, label))
    .collect();

    (!parts.is_empty()).then(|| {
        Diagnostic::new(
            DiagnosticKind::SpecialParameters,
            "Special parameters",
            parts.join(", "),
        )
    })
}

fn pattern_matching(stats: &PatternMatchingStats) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    if stats.matches == 0 {
        return out;
    }

    let avg_cases = if stats.avg_cases_per_match.is_finite() {
        stats.avg_cases_per_match
    } else {
        0.0
    };
    out.push(Diagnostic::new(
        DiagnosticKind::PatternMatching,
        format!("Pattern matching ({} match expressions)", stats.matches),
        format!("Average {:.2} cases per match.", avg_cases),
    ));

    if stats.max_nesting > NESTED_MATCH_THRESHOLD {
        out.push(Diagnostic::new(
            DiagnosticKind::NestedMatches,
            format!("Nested matches (depth {})", stats.max_nesting),
            "Consider extracting nested pattern matching logic.",
        ));
    }
    if avg_cases > COMPLEX_PATTERN_THRESHOLD {
        out.push(Diagnostic::new(
            DiagnosticKind::ComplexPatterns,
            "Complex patterns",
            "Many cases per match may indicate need for refactoring.",
        ));
    }
    out
}

fn documentation(access: Access, documented: bool, noun: &str) -> Option<Diagnostic> {
    (access == Access::Public && !documented).then(|| {
        Diagnostic::new(
            DiagnosticKind::MissingDocumentation,
            "Missing documentation",
            format!("Public {} should have Scaladoc.", noun),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(complexity: f64) -> Method {
        let mut m = Method::default();
        m.complexity = Some(complexity);
        m.metadata.access_modifier = "private".into();
        m
    }

    fn kinds(diagnostics: &[Diagnostic]) -> Vec<DiagnosticKind> {
        diagnostics.iter().map(|d| d.kind).collect()
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(ComplexityBand::classify(5.0), ComplexityBand::Low);
        assert_eq!(ComplexityBand::classify(5.5), ComplexityBand::Moderate);
        assert_eq!(ComplexityBand::classify(10.0), ComplexityBand::Moderate);
        assert_eq!(ComplexityBand::classify(10.4), ComplexityBand::High);
        assert_eq!(ComplexityBand::classify(20.0), ComplexityBand::High);
        assert_eq!(ComplexityBand::classify(20.1), ComplexityBand::VeryHigh);
    }

    #[test]
    fn test_fractional_complexity_is_not_rounded() {
        let out = analyze_method(&method(10.4));
        assert_eq!(out[0].kind, DiagnosticKind::Complexity(ComplexityBand::High));
        assert_eq!(out[0].headline, "High complexity (10.4)");
    }

    #[test]
    fn test_missing_complexity_uses_baseline() {
        let out = analyze_method(&Method::default());
        assert_eq!(out[0].headline, "Low complexity (1)");
    }

    #[test]
    fn test_simple_private_method_has_single_finding() {
        let out = analyze_method(&method(2.0));
        assert_eq!(out.len(), 1);
        assert!(!out[0].kind.is_concern());
    }

    #[test]
    fn test_busy_public_method_findings_in_order() {
        let mut m = method(12.0);
        m.nesting_depth = 4;
        m.parameter_stats.total_params = 6;
        m.metadata.access_modifier = "public".into();
        m.has_scaladoc = false;
        let out = analyze_method(&m);
        assert_eq!(
            kinds(&out),
            vec![
                DiagnosticKind::Complexity(ComplexityBand::High),
                DiagnosticKind::DeepNesting,
                DiagnosticKind::ManyParameters,
                DiagnosticKind::MissingDocumentation,
            ]
        );
        assert_eq!(out[0].headline, "High complexity (12)");
        assert_eq!(out[1].headline, "Deep nesting (4 levels)");
        assert_eq!(out[2].headline, "Many parameters (6)");
        assert!(out.iter().all(|d| d.kind.is_concern()));
    }

    #[test]
    fn test_curried_and_special_parameters() {
        let mut m = method(1.0);
        m.parameter_stats.param_lists = 2;
        m.parameter_stats.implicit_params = 1;
        m.parameter_stats.vararg_params = 2;
        let out = analyze_method(&m);
        assert_eq!(
            kinds(&out),
            vec![
                DiagnosticKind::Complexity(ComplexityBand::Low),
                DiagnosticKind::CurriedParameters,
                DiagnosticKind::SpecialParameters,
            ]
        );
        assert_eq!(out[2].detail, "1 implicit, 2 vararg");
    }

    #[test]
    fn test_pattern_matching_rules() {
        let mut m = method(8.0);
        m.pattern_matching_stats.matches = 3;
        m.pattern_matching_stats.max_nesting = 3;
        m.pattern_matching_stats.avg_cases_per_match = 6.333;
        let out = analyze_method(&m);
        assert_eq!(
            kinds(&out)[1..],
            [
                DiagnosticKind::PatternMatching,
                DiagnosticKind::NestedMatches,
                DiagnosticKind::ComplexPatterns,
            ]
        );
        assert_eq!(out[1].detail, "Average 6.33 cases per match.");
    }

    #[test]
    fn test_member_documentation_wording() {
        let mut member = Member::default();
        member.metadata.access_modifier = "public".into();
        let out = analyze(Record::Member(&member));
        assert_eq!(
            out.last().map(ToString::to_string).as_deref(),
            Some("Missing documentation: Public member should have Scaladoc.")
        );
    }

    #[test]
    fn test_documented_public_method_is_clean() {
        let mut m = method(3.0);
        m.metadata.access_modifier = "public".into();
        m.has_scaladoc = true;
        assert_eq!(analyze_method(&m).len(), 1);
    }
}

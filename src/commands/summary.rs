//! Non-interactive overview of a payload.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};

use super::{load_payload, Loaded};
use crate::analysis::{analyze_method, ComplexityBand};
use crate::heatmap::{HeatmapMatrix, RowOrder, BINS};
use crate::loader::LoaderOptions;
use crate::model::{Dataset, DedupeKey, MethodRef};
use crate::signature::extract_name;
use crate::summary::{info_rows, ChartSeries, InfoValue, SummaryCards};
use crate::tables::format_number;

/// Load `payload` and print its overview. A decode failure is reported with
/// the terminal message and returned as an error.
pub fn handle_summary(
    payload: &Path,
    options: LoaderOptions,
    dedupe: DedupeKey,
    top: usize,
) -> Result<()> {
    let dataset = match load_payload(payload, options)? {
        Loaded::Dataset(dataset) => dataset,
        Loaded::Failed(e) => {
            eprintln!("{}", e.terminal_message().red());
            return Err(e.into());
        }
    };

    let report = render_summary(&dataset, dedupe, top);
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(report.as_bytes())
        .context("Failed to write summary")
}

/// Full overview text: project, cards, chart totals, heatmap and findings.
pub fn render_summary(dataset: &Dataset, dedupe: DedupeKey, top: usize) -> String {
    let mut out = String::new();
    render_project(&mut out, dataset);
    render_cards(&mut out, dataset);
    render_charts(&mut out, dataset, dedupe);
    render_heatmap(&mut out, dataset);
    render_findings(&mut out, dataset, top);
    out
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", title.bold().cyan());
}

fn render_project(out: &mut String, dataset: &Dataset) {
    let (basic, extended) = info_rows(&dataset.metadata);
    heading(out, "PROJECT");
    if basic.is_empty() && extended.is_empty() {
        let _ = writeln!(out, "  {}", "No project information".dimmed());
        return;
    }
    for row in basic.iter().chain(extended.iter()) {
        let value = match &row.value {
            InfoValue::Text(text) => text.clone(),
            InfoValue::Link(url) => url.underline().to_string(),
            InfoValue::List(items) => items.join(", "),
        };
        let _ = writeln!(out, "  {:<24} {}", row.label.dimmed(), value);
    }
}

fn render_cards(out: &mut String, dataset: &Dataset) {
    heading(out, "SUMMARY");
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Metric", "Value", "Detail"]);
    for card in SummaryCards::from_rollup(&dataset.rollup).cards {
        table.add_row(vec![
            Cell::new(card.title),
            Cell::new(card.value).set_alignment(CellAlignment::Right),
            Cell::new(card.detail.unwrap_or_default()),
        ]);
    }
    let _ = writeln!(out, "{}", table);
}

fn render_charts(out: &mut String, dataset: &Dataset, dedupe: DedupeKey) {
    let series = ChartSeries::build(dataset, dedupe);
    heading(out, "FUNCTIONS PER PACKAGE");
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Package", "Public", "Private"]);
    for row in &series.functions_per_package {
        table.add_row(vec![
            Cell::new(&row.package),
            Cell::new(row.public).set_alignment(CellAlignment::Right),
            Cell::new(row.private).set_alignment(CellAlignment::Right),
        ]);
    }
    let _ = writeln!(out, "{}", table);
    let _ = writeln!(
        out,
        "  Visibility: {} public, {} private across {} files",
        series.public_functions,
        series.private_functions,
        series.loc_per_file.len()
    );
}

fn render_heatmap(out: &mut String, dataset: &Dataset) {
    heading(out, "COMPLEXITY HEATMAP");
    let matrix = HeatmapMatrix::build(dataset);
    if matrix.is_empty() {
        let _ = writeln!(out, "  {}", "No methods found".dimmed());
        return;
    }

    let order = RowOrder::new(&matrix);
    let scale = crate::heatmap::ColorScale::new(matrix.max_count());
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    let mut header = vec![Cell::new("Package")];
    header.extend(BINS.iter().map(|b| Cell::new(b.label)));
    header.push(Cell::new("Total"));
    table.set_header(header);

    for &row in order.rows() {
        let mut cells = vec![Cell::new(&matrix.packages()[row])];
        for column in 0..BINS.len() {
            let count = matrix.count(row, column);
            let rgb = scale.color(count);
            let fg = rgb.contrasting();
            cells.push(
                Cell::new(count)
                    .set_alignment(CellAlignment::Right)
                    .bg(Color::Rgb {
                        r: rgb.0,
                        g: rgb.1,
                        b: rgb.2,
                    })
                    .fg(Color::Rgb {
                        r: fg.0,
                        g: fg.1,
                        b: fg.2,
                    }),
            );
        }
        cells.push(Cell::new(matrix.total(row)).set_alignment(CellAlignment::Right));
        table.add_row(cells);
    }
    let _ = writeln!(out, "{}", table);
}

fn band_color(band: ComplexityBand) -> colored::Color {
    match band {
        ComplexityBand::Low => colored::Color::Green,
        ComplexityBand::Moderate => colored::Color::Yellow,
        ComplexityBand::High => colored::Color::Red,
        ComplexityBand::VeryHigh => colored::Color::BrightRed,
    }
}

/// Methods by descending complexity, first `top` of them.
fn top_methods(dataset: &Dataset, top: usize) -> Vec<MethodRef<'_>> {
    let mut methods: Vec<_> = dataset.methods().collect();
    methods.sort_by(|a, b| {
        b.method
            .complexity_or_baseline()
            .total_cmp(&a.method.complexity_or_baseline())
    });
    methods.truncate(top);
    methods
}

fn render_findings(out: &mut String, dataset: &Dataset, top: usize) {
    heading(out, "TOP COMPLEXITY");
    let methods = top_methods(dataset, top);
    if methods.is_empty() {
        let _ = writeln!(out, "  {}", "No methods found".dimmed());
        return;
    }

    for (rank, m) in methods.iter().enumerate() {
        let complexity = m.method.complexity_or_baseline();
        let band = ComplexityBand::classify(complexity);
        let _ = writeln!(
            out,
            "  #{} {} {}::{} ({})",
            rank + 1,
            format!("[{}]", format_number(complexity)).as_str().color(band_color(band)).bold(),
            m.file.name(),
            extract_name(&m.method.metadata.signature),
            m.package.dimmed()
        );
        for diagnostic in analyze_method(m.method)
            .into_iter()
            .filter(|d| d.kind.is_concern())
        {
            let _ = writeln!(out, "      {} {}", "-".dimmed(), diagnostic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{File, Method, Package, PackageMeta};

    fn method(signature: &str, complexity: f64) -> Method {
        let mut m = Method::default();
        m.metadata.signature = signature.into();
        m.metadata.access_modifier = "private".into();
        m.complexity = Some(complexity);
        m
    }

    fn dataset() -> Dataset {
        let mut file = File::default();
        file.metadata.file_name = "Parser.scala".into();
        file.methods = vec![method("parse(in: String): Ast", 14.0), method("peek: Char", 1.0)];
        let mut dataset = Dataset {
            packages: vec![Package {
                metadata: PackageMeta {
                    name: "core".into(),
                },
                files: vec![file],
                ..Default::default()
            }],
            ..Default::default()
        };
        dataset.metadata.name = "demo".into();
        dataset
    }

    #[test]
    fn test_render_sections() {
        let text = render_summary(&dataset(), DedupeKey::Name, 5);
        assert!(text.contains("PROJECT"));
        assert!(text.contains("demo"));
        assert!(text.contains("Scaladoc Coverage"));
        assert!(text.contains("21+"));
        assert!(text.contains("Parser.scala::parse"));
        assert!(text.contains("High complexity (14)"));
    }

    #[test]
    fn test_top_limits_and_orders() {
        let dataset = dataset();
        let methods = top_methods(&dataset, 1);
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].method.complexity, Some(14.0));
    }

    #[test]
    fn test_empty_dataset() {
        let text = render_summary(&Dataset::default(), DedupeKey::Name, 5);
        assert!(text.contains("No project information"));
        assert!(text.contains("No methods found"));
    }
}

//! Complexity tab: one member or method with its metrics and findings.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::components::{
    add_blank_line, add_metric_block, add_section_header, signature_spans,
};
use crate::analysis::{analyze, Diagnostic, Record};
use crate::summary::record_blocks;
use crate::tui::app::ExplorerApp;
use crate::tui::theme::Theme;

pub const NO_ISSUES: &str = "No issues detected";

pub fn render(frame: &mut Frame, app: &ExplorerApp, area: Rect, theme: &Theme) {
    let (Some(open), Some(record)) = (app.open_record(), app.current_record()) else {
        frame.render_widget(
            Paragraph::new(Span::styled("No record selected", theme.muted_style())),
            area,
        );
        return;
    };

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.muted_style())
        .title(Span::styled(open.title.clone(), theme.header_style()));
    let width = outer.inner(area).width.min(72);
    let lines = record_lines(record, theme, width);

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((app.scroll, 0))
            .block(outer),
        area,
    );
}

fn signature(record: Record<'_>) -> &str {
    match record {
        Record::Method(m) => &m.metadata.signature,
        Record::Member(m) => &m.metadata.signature,
    }
}

/// Signature, metric blocks, then the analysis section.
pub fn record_lines(record: Record<'_>, theme: &Theme, width: u16) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(signature_spans(signature(record), theme))];
    add_blank_line(&mut lines);

    for block in record_blocks(record) {
        add_metric_block(&mut lines, &block, theme, width);
    }

    add_section_header(&mut lines, "Analysis", theme);
    let diagnostics = analyze(record);
    if diagnostics.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  {}", NO_ISSUES),
            Style::default().fg(theme.success),
        )));
    }
    lines.extend(diagnostics.iter().map(|d| diagnostic_line(d, theme)));
    lines
}

fn diagnostic_line(diagnostic: &Diagnostic, theme: &Theme) -> Line<'static> {
    let headline_style = if diagnostic.kind.is_concern() {
        theme.warning_style()
    } else {
        Style::default().fg(theme.success)
    };
    Line::from(vec![
        Span::raw("  "),
        Span::styled(diagnostic.headline.clone(), headline_style),
        Span::styled(": ", theme.muted_style()),
        Span::raw(diagnostic.detail.clone()),
    ])
}

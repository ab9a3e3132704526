//! Charts tab: complexity heatmap plus per-package and per-file bars.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::components::{bar_line, center, fit_width};
use crate::heatmap::{legend, tooltip, CellGeometry, ColorScale, OrderMode, BINS};
use crate::summary::FileBar;
use crate::tui::app::ExplorerApp;
use crate::tui::theme::{rgb, Theme};

pub fn render(frame: &mut Frame, app: &ExplorerApp, area: Rect, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_heatmap(frame, app, chunks[0], theme);

    let bars = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(chunks[1]);
    render_package_functions(frame, app, bars[0], theme);
    render_file_bars(frame, "Lines per File", &app.charts().loc_per_file, bars[1], theme);
    render_file_bars(frame, "Size per File (bytes)", &app.charts().size_per_file, bars[2], theme);
}

fn block(title: String, theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.muted_style())
        .title(Span::styled(title, theme.header_style()))
}

fn order_label(mode: OrderMode) -> String {
    match mode {
        OrderMode::Alphabetical => "alphabetical".to_string(),
        OrderMode::Total => "total".to_string(),
        OrderMode::Column { index, ascending } => format!(
            "{} {}",
            BINS[index].label,
            if ascending { "▲" } else { "▼" }
        ),
        OrderMode::Isolated => "isolated".to_string(),
    }
}

fn render_heatmap(frame: &mut Frame, app: &ExplorerApp, area: Rect, theme: &Theme) {
    let matrix = app.heatmap();
    let order = app.heatmap_order();
    let outer = block(
        format!("Complexity Heatmap · order: {}", order_label(order.mode())),
        theme,
    );
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    if matrix.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("No methods found", theme.muted_style())),
            inner,
        );
        return;
    }

    // header, legend, tooltip
    let chrome = 3;
    let longest = matrix.packages().iter().map(|p| p.chars().count()).max().unwrap_or(0);
    let geometry = CellGeometry::fit(
        inner.width,
        inner.height.saturating_sub(chrome),
        matrix.row_count(),
        longest,
    );
    let scale = ColorScale::new(matrix.max_count());
    let cursor = app.heatmap_cursor;
    let label_width = geometry.label_width as usize;
    let column_width = geometry.column_width as usize;

    let mut lines = Vec::new();
    let mut header = vec![Span::raw(" ".repeat(label_width))];
    for (i, bin) in BINS.iter().enumerate() {
        let style = if i == cursor.column {
            theme.active_style().add_modifier(Modifier::UNDERLINED)
        } else {
            theme.muted_style()
        };
        header.push(Span::styled(center(bin.label, column_width), style));
    }
    lines.push(Line::from(header));

    let visible_rows = (inner.height.saturating_sub(chrome) / geometry.row_height.max(1)) as usize;
    let first = cursor.row.saturating_sub(visible_rows.saturating_sub(1));
    for (position, &row) in order.rows().iter().enumerate().skip(first).take(visible_rows) {
        let label_style = if position == cursor.row {
            theme.active_style()
        } else {
            Style::default().fg(theme.text)
        };
        for sub in 0..geometry.row_height {
            let mut spans = vec![Span::styled(
                if sub == 0 {
                    fit_width(&matrix.packages()[row], label_width)
                } else {
                    " ".repeat(label_width)
                },
                label_style,
            )];
            for column in 0..BINS.len() {
                let count = matrix.count(row, column);
                let fill = scale.color(count);
                let mut style = Style::default().bg(rgb(fill)).fg(rgb(fill.contrasting()));
                if position == cursor.row && column == cursor.column {
                    style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                }
                let text = if sub == 0 { count.to_string() } else { String::new() };
                spans.push(Span::styled(center(&text, column_width), style));
            }
            lines.push(Line::from(spans));
        }
    }

    let mut legend_spans = vec![Span::styled(
        fit_width("legend", label_width),
        theme.muted_style(),
    )];
    for stop in legend(scale.max()) {
        let fill = scale.color(stop);
        legend_spans.push(Span::styled(
            center(&stop.to_string(), column_width),
            Style::default().bg(rgb(fill)).fg(rgb(fill.contrasting())),
        ));
    }
    lines.push(Line::from(legend_spans));

    let tip = app
        .heatmap_selected_row()
        .and_then(|row| tooltip(matrix, row, cursor.column))
        .map(|t| t.to_string())
        .unwrap_or_default();
    lines.push(Line::from(Span::styled(tip, Style::default().fg(theme.primary))));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_package_functions(frame: &mut Frame, app: &ExplorerApp, area: Rect, theme: &Theme) {
    let series = app.charts();
    let outer = block("Functions per Package".to_string(), theme);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let max = series
        .functions_per_package
        .iter()
        .map(|p| p.public.max(p.private))
        .max()
        .unwrap_or(0);
    let label_width = (inner.width as usize / 3).max(4);
    let bar_width = (inner.width as usize).saturating_sub(label_width + 8);

    let mut lines = vec![Line::from(vec![
        Span::styled("public ", Style::default().fg(theme.success)),
        Span::styled("private ", Style::default().fg(theme.warning)),
        Span::styled(
            format!(
                "· total {} / {}",
                series.public_functions, series.private_functions
            ),
            theme.muted_style(),
        ),
    ])];
    for row in &series.functions_per_package {
        lines.push(bar_line(
            &row.package,
            row.public,
            max,
            label_width,
            bar_width,
            Style::default().fg(theme.success),
        ));
        lines.push(bar_line(
            "",
            row.private,
            max,
            label_width,
            bar_width,
            Style::default().fg(theme.warning),
        ));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_file_bars(frame: &mut Frame, title: &str, bars: &[FileBar], area: Rect, theme: &Theme) {
    let outer = block(title.to_string(), theme);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    if bars.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("No files", theme.muted_style())),
            inner,
        );
        return;
    }

    let max = bars.iter().map(|b| b.value).max().unwrap_or(0);
    let label_width = (inner.width as usize / 3).max(4);
    let bar_width = (inner.width as usize).saturating_sub(label_width + 8);
    let lines: Vec<Line> = bars
        .iter()
        .map(|b| {
            bar_line(
                &b.file,
                b.value,
                max,
                label_width,
                bar_width,
                Style::default().fg(theme.primary),
            )
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

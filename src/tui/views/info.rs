//! Info tab: project fields and summary cards.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::components::{add_blank_line, add_label_value, add_section_header};
use crate::summary::{Card, InfoRow, InfoValue};
use crate::tui::app::ExplorerApp;
use crate::tui::theme::Theme;

pub fn render(frame: &mut Frame, app: &ExplorerApp, area: Rect, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let (basic, extended) = app.info();
    let project = project_lines(
        basic,
        extended,
        app.info_panel().show_extended,
        theme,
        chunks[0].width.saturating_sub(2),
    );
    frame.render_widget(
        Paragraph::new(project)
            .wrap(Wrap { trim: false })
            .scroll((app.scroll, 0))
            .block(titled_block("Project", theme)),
        chunks[0],
    );

    let cards = card_lines(&app.cards().cards, theme, chunks[1].width.saturating_sub(2));
    frame.render_widget(
        Paragraph::new(cards)
            .scroll((app.scroll, 0))
            .block(titled_block("Summary", theme)),
        chunks[1],
    );
}

fn titled_block(title: &str, theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.muted_style())
        .title(Span::styled(title.to_string(), theme.header_style()))
}

fn info_value_line(row: &InfoRow, theme: &Theme, width: u16) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    match &row.value {
        InfoValue::Text(text) => add_label_value(&mut lines, row.label, text.clone(), theme, width),
        InfoValue::Link(url) => {
            add_label_value(&mut lines, row.label, url.clone(), theme, width);
            if let Some(line) = lines.last_mut() {
                if let Some(span) = line.spans.last_mut() {
                    span.style = span.style.add_modifier(Modifier::UNDERLINED);
                }
            }
        }
        InfoValue::List(items) => {
            lines.push(Line::from(Span::raw(format!("  {}", row.label))));
            lines.extend(items.iter().map(|item| {
                Line::from(vec![
                    Span::styled("    • ", theme.muted_style()),
                    Span::styled(item.clone(), Style::default().fg(theme.primary)),
                ])
            }));
        }
    }
    lines
}

/// Basic fields, then extended ones under their own header. Hidden extended
/// fields collapse to a one-line hint.
pub fn project_lines(
    basic: &[InfoRow],
    extended: &[InfoRow],
    show_extended: bool,
    theme: &Theme,
    width: u16,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if basic.is_empty() && extended.is_empty() {
        lines.push(Line::from(Span::styled(
            "No project information",
            theme.muted_style(),
        )));
        return lines;
    }

    for row in basic {
        lines.extend(info_value_line(row, theme, width));
    }
    if extended.is_empty() {
        return lines;
    }

    if !basic.is_empty() {
        add_blank_line(&mut lines);
    }
    if show_extended {
        add_section_header(&mut lines, "Project Details", theme);
        for row in extended {
            lines.extend(info_value_line(row, theme, width));
        }
    } else {
        lines.push(Line::from(Span::styled(
            format!("▸ Project Details ({} more, d: show)", extended.len()),
            theme.muted_style(),
        )));
    }
    lines
}

pub fn card_lines(cards: &[Card], theme: &Theme, width: u16) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for card in cards {
        let value = match &card.detail {
            Some(detail) => format!("{} ({})", card.value, detail),
            None => card.value.clone(),
        };
        add_label_value(&mut lines, card.title, value, theme, width);
    }
    lines
}

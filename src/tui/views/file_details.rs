//! File details tab: metric blocks above the members and methods tables.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::components::add_metric_block;
use super::tables::render_flat_table;
use crate::tui::app::{ExplorerApp, TableFocus};
use crate::tui::theme::Theme;

const BLOCKS_HEIGHT: u16 = 12;

pub fn render(frame: &mut Frame, app: &ExplorerApp, area: Rect, theme: &Theme) {
    let Some(file) = app.open_file() else {
        frame.render_widget(
            Paragraph::new(Span::styled("No file selected", theme.muted_style())),
            area,
        );
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(BLOCKS_HEIGHT),
            Constraint::Percentage(40),
            Constraint::Min(0),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(file.details.name.clone(), theme.header_style()),
            Span::raw("  "),
            Span::styled(file.details.path.clone(), theme.muted_style()),
        ])),
        chunks[0],
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            file.details
                .blocks
                .iter()
                .map(|_| Constraint::Ratio(1, file.details.blocks.len().max(1) as u32))
                .collect::<Vec<_>>(),
        )
        .split(chunks[1]);
    for (block, column) in file.details.blocks.iter().zip(columns.iter()) {
        let outer = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.muted_style());
        let inner = outer.inner(*column);
        let mut lines = Vec::new();
        add_metric_block(&mut lines, block, theme, inner.width);
        frame.render_widget(Paragraph::new(lines).block(outer), *column);
    }

    let cursor = Some(file.cursor);
    render_flat_table(
        frame,
        &file.members,
        "Members",
        true,
        cursor.filter(|_| file.focus == TableFocus::Members),
        chunks[2],
        theme,
    );
    render_flat_table(
        frame,
        &file.methods,
        "Methods",
        true,
        cursor.filter(|_| file.focus == TableFocus::Methods),
        chunks[3],
        theme,
    );
}

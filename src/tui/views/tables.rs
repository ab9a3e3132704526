//! Tables tab: the package → file tree, plus the flat member and method
//! tables reused by the file details tab.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::components::signature_spans;
use crate::sort::{Column, SortKind, SortState, SortableRow};
use crate::tables::{FlatTable, FILE_COLUMNS, NO_FILES};
use crate::tree::TreeRow;
use crate::tui::app::{ExplorerApp, GridCursor};
use crate::tui::theme::Theme;

pub fn render(frame: &mut Frame, app: &ExplorerApp, area: Rect, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let tree = app.tree();
    let rows = tree.visible_rows();
    let cursor = app.tree_cursor;

    let body: Vec<Row> = if rows.is_empty() {
        vec![placeholder_row(NO_FILES, theme)]
    } else {
        rows.iter()
            .map(|row| tree_row(row, tree.is_collapsed(row.package()), theme))
            .collect()
    };

    let title = format!("File Metrics · e: {}", tree.bulk_label());
    let table = Table::new(body, file_widths())
        .header(header_row(FILE_COLUMNS, &tree.sort, cursor.column, true, theme))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.muted_style())
                .title(Span::styled(title, theme.header_style())),
        )
        .row_highlight_style(theme.selection_style());

    let mut state = TableState::default().with_selected(if rows.is_empty() {
        None
    } else {
        Some(cursor.row)
    });
    frame.render_stateful_widget(table, chunks[0], &mut state);

    // Full path of the file under the cursor
    let path = match rows.get(cursor.row) {
        Some(TreeRow::File(f)) => f.path.clone(),
        _ => String::new(),
    };
    frame.render_widget(
        Paragraph::new(Span::styled(path, theme.muted_style())),
        chunks[1],
    );
}

fn file_widths() -> [Constraint; 6] {
    [
        Constraint::Min(24),
        Constraint::Length(9),
        Constraint::Length(11),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(10),
    ]
}

fn placeholder_row(text: &'static str, theme: &Theme) -> Row<'static> {
    Row::new(vec![Cell::from(Span::styled(text, theme.muted_style()))])
}

fn tree_row(row: &TreeRow, collapsed: bool, theme: &Theme) -> Row<'static> {
    let (name, style) = match row {
        TreeRow::Package(p) => (
            format!("{} {}", if collapsed { "▸" } else { "▾" }, p.name),
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        ),
        TreeRow::File(f) => (format!("    {}", f.name), Style::default().fg(theme.text)),
    };
    let mut cells = vec![Cell::from(name)];
    cells.extend((1..FILE_COLUMNS.len()).map(|c| Cell::from(row.cell(c).text)));
    Row::new(cells).style(style)
}

/// Header with sort indicators; the cursor column is underlined when the
/// table has focus.
pub fn header_row(
    columns: &[Column],
    sort: &SortState,
    cursor_column: usize,
    focused: bool,
    theme: &Theme,
) -> Row<'static> {
    let cells = columns.iter().enumerate().map(|(i, column)| {
        let mut style = theme.header_style();
        if focused && i == cursor_column {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        Cell::from(Span::styled(
            format!("{}{}", column.title, sort.indicator(i)),
            style,
        ))
    });
    Row::new(cells.collect::<Vec<_>>())
}

/// A member or method table, or its placeholder when empty.
pub fn render_flat_table<R: SortableRow>(
    frame: &mut Frame,
    table: &FlatTable<R>,
    title: &str,
    signature_column: bool,
    cursor: Option<GridCursor>,
    area: Rect,
    theme: &Theme,
) {
    let focused = cursor.is_some();
    let border_style = if focused {
        Style::default().fg(theme.primary)
    } else {
        theme.muted_style()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(
            format!("{} ({})", title, table.len()),
            if focused {
                theme.active_style()
            } else {
                theme.header_style()
            },
        ));

    let header = header_row(
        table.columns,
        &table.state,
        cursor.map_or(usize::MAX, |c| c.column),
        focused,
        theme,
    );

    let widths: Vec<Constraint> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, _)| {
            if i == 0 {
                Constraint::Min(30)
            } else {
                Constraint::Length(12)
            }
        })
        .collect();

    let body: Vec<Row> = if table.is_empty() {
        vec![placeholder_row(table.placeholder, theme)]
    } else {
        table
            .rows
            .iter()
            .map(|row| {
                let cells = (0..table.columns.len()).map(|c| {
                    let cell = row.cell(c);
                    if c == 0 && signature_column {
                        Cell::from(Line::from(signature_spans(&cell.text, theme)))
                    } else if table.columns[c].kind == SortKind::Boolean {
                        Cell::from(Span::styled(cell.text, theme.flag_style(cell.positive)))
                    } else {
                        Cell::from(cell.text)
                    }
                });
                Row::new(cells.collect::<Vec<_>>())
            })
            .collect()
    };

    let widget = Table::new(body, widths)
        .header(header)
        .block(block)
        .row_highlight_style(theme.selection_style());

    let selected = cursor.filter(|_| !table.is_empty()).map(|c| c.row);
    let mut state = TableState::default().with_selected(selected);
    frame.render_stateful_widget(widget, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Dataset, DedupeKey};
    use crate::nav::Tab;
    use crate::prefs::MemoryStore;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_empty_dataset_shows_file_placeholder() {
        let mut app = ExplorerApp::new(
            Dataset::default(),
            DedupeKey::Name,
            Box::new(MemoryStore::default()),
        );
        app.nav.activate(Tab::Tables);

        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains(NO_FILES));
    }
}

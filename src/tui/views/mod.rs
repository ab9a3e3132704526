//! Frame rendering. Every view is a pure function of [`ExplorerApp`].

pub mod charts;
pub mod complexity;
pub mod components;
pub mod file_details;
pub mod info;
pub mod tables;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use super::app::ExplorerApp;
use super::theme::Theme;
use crate::nav::{Tab, TabButton};

/// Render the whole frame.
pub fn render(frame: &mut Frame, app: &ExplorerApp) {
    let theme = app.theme();
    let area = frame.area();
    frame.render_widget(Block::default().style(theme.base_style()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_tab_bar(frame, app, chunks[0], &theme);

    match app.nav().active {
        Tab::Info => info::render(frame, app, chunks[1], &theme),
        Tab::Charts => charts::render(frame, app, chunks[1], &theme),
        Tab::Tables => tables::render(frame, app, chunks[1], &theme),
        Tab::FileDetails => file_details::render(frame, app, chunks[1], &theme),
        Tab::MethodComplexity => complexity::render(frame, app, chunks[1], &theme),
    }

    render_footer(frame, app, chunks[2], &theme);
}

/// Label of a tab button; drill-down tabs are named after what they show.
fn tab_label(app: &ExplorerApp, tab: Tab) -> String {
    match tab {
        Tab::FileDetails => app
            .open_file()
            .map(|f| f.file_name.clone())
            .unwrap_or_else(|| tab.title().to_string()),
        Tab::MethodComplexity => app
            .open_record()
            .map(|r| r.title.clone())
            .unwrap_or_else(|| tab.title().to_string()),
        _ => tab.title().to_string(),
    }
}

fn render_tab_bar(frame: &mut Frame, app: &ExplorerApp, area: Rect, theme: &Theme) {
    let mut spans = Vec::new();
    for (i, tab) in Tab::ALL.into_iter().enumerate() {
        let style = match app.nav().button_state(tab) {
            TabButton::Hidden => continue,
            TabButton::Selected => theme.active_style(),
            TabButton::Available => Style::default().fg(theme.text),
        };
        spans.push(Span::styled(format!(" {} ", i + 1), theme.muted_style()));
        spans.push(Span::styled(tab_label(app, tab), style));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(
        format!("[{}]", app.theme_mode()),
        theme.muted_style(),
    ));

    let title = app.dataset().metadata.name.as_str();
    let lines = vec![
        Line::from(vec![Span::styled(
            if title.is_empty() { "Metrics" } else { title }.to_string(),
            theme.header_style(),
        )]),
        Line::from(spans),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn key_hints(tab: Tab) -> &'static str {
    match tab {
        Tab::Info => "1-5 tabs  tab next  j/k scroll  d details  t theme  q quit",
        Tab::Charts => "h/l column  s sort  a alphabetical  o total  enter isolate  t theme  q quit",
        Tab::Tables => "h/l column  s sort  enter open  e expand/collapse all  t theme  q quit",
        Tab::FileDetails => "f switch table  h/l column  s sort  enter complexity  t theme  q quit",
        Tab::MethodComplexity => "j/k scroll  4 file  t theme  q quit",
    }
}

fn render_footer(frame: &mut Frame, app: &ExplorerApp, area: Rect, theme: &Theme) {
    let line = match app.status_message() {
        Some(message) => Line::from(Span::styled(message.to_string(), theme.warning_style())),
        None => Line::from(Span::styled(key_hints(app.nav().active), theme.muted_style())),
    };
    frame.render_widget(Paragraph::new(line), area);
}

//! Keyboard handling.
//!
//! `determine_action` in `actions` decides what a key means; this module is
//! the imperative shell that executes it against [`ExplorerApp`].

use anyhow::Result;
use crossterm::event::KeyEvent;

use super::actions::{determine_action, Action, ActionContext};
use super::app::{ExplorerApp, TableFocus};
use crate::nav::{NavigationResult, Tab};
use crate::tables::FILE_COLUMNS;
use crate::tree::TreeRow;

/// Handle keyboard input and return true if the explorer should quit.
pub fn handle_key(app: &mut ExplorerApp, key: KeyEvent) -> Result<bool> {
    app.clear_status_message();

    let ctx = ActionContext {
        tab: app.nav.active,
        has_rows: active_row_count(app) > 0,
    };
    let Some(action) = determine_action(key, ctx) else {
        return Ok(false);
    };
    execute_action(app, action)
}

/// Rows of the active tab's table or grid.
fn active_row_count(app: &ExplorerApp) -> usize {
    match app.nav.active {
        Tab::Charts => app.heatmap.row_count(),
        Tab::Tables => app.tree.visible_rows().len(),
        Tab::FileDetails => app.file.as_ref().map_or(0, |f| f.focused_shape().0),
        Tab::Info | Tab::MethodComplexity => 0,
    }
}

fn report(app: &mut ExplorerApp, result: NavigationResult) {
    if let NavigationResult::Blocked { reason } = result {
        log::debug!("Navigation blocked: {}", reason);
        app.set_status_message(reason);
    }
}

/// Execute an action (imperative shell).
pub fn execute_action(app: &mut ExplorerApp, action: Action) -> Result<bool> {
    match action {
        Action::Quit => return Ok(true),

        Action::ActivateTab(tab) => {
            let result = app.nav.activate(tab);
            if result.is_success() {
                app.scroll = 0;
            }
            report(app, result);
        }

        Action::NextTab => {
            let next = app.nav.next_visible();
            let result = app.nav.activate(next);
            app.scroll = 0;
            report(app, result);
        }

        Action::ToggleTheme => app.toggle_theme(),

        Action::MoveRows(delta) => move_rows(app, delta),
        Action::MoveColumn(delta) => move_column(app, delta),
        Action::SortColumn => sort_column(app),
        Action::Select => select(app),

        Action::ToggleAll => {
            app.tree.toggle_all();
            let len = app.tree.visible_rows().len();
            app.tree_cursor.move_row(0, len);
        }

        Action::OrderAlphabetical => app.heatmap_order.sort_alphabetical(&app.heatmap),
        Action::OrderTotal => app.heatmap_order.sort_total(&app.heatmap),

        Action::ToggleDetails => app.info_panel.toggle(),

        Action::SwitchFocus => {
            if let Some(file) = app.file.as_mut() {
                file.focus = file.focus.toggled();
                let (rows, columns) = file.focused_shape();
                file.cursor.move_row(0, rows);
                file.cursor.move_column(0, columns);
            }
        }
    }
    Ok(false)
}

fn move_rows(app: &mut ExplorerApp, delta: isize) {
    match app.nav.active {
        Tab::Info | Tab::MethodComplexity => {
            let target = i64::from(app.scroll) + delta as i64;
            app.scroll = target.clamp(0, i64::from(u16::MAX)) as u16;
        }
        Tab::Charts => {
            let len = app.heatmap.row_count();
            app.heatmap_cursor.move_row(delta, len);
        }
        Tab::Tables => {
            let len = app.tree.visible_rows().len();
            app.tree_cursor.move_row(delta, len);
        }
        Tab::FileDetails => {
            if let Some(file) = app.file.as_mut() {
                let (rows, _) = file.focused_shape();
                file.cursor.move_row(delta, rows);
            }
        }
    }
}

fn move_column(app: &mut ExplorerApp, delta: isize) {
    match app.nav.active {
        Tab::Charts => {
            let count = app.heatmap_columns();
            app.heatmap_cursor.move_column(delta, count);
        }
        Tab::Tables => app.tree_cursor.move_column(delta, FILE_COLUMNS.len()),
        Tab::FileDetails => {
            if let Some(file) = app.file.as_mut() {
                let (_, columns) = file.focused_shape();
                file.cursor.move_column(delta, columns);
            }
        }
        Tab::Info | Tab::MethodComplexity => {}
    }
}

fn sort_column(app: &mut ExplorerApp) {
    match app.nav.active {
        Tab::Charts => {
            let column = app.heatmap_cursor.column;
            app.heatmap_order.toggle_column(&app.heatmap, column);
        }
        Tab::Tables => {
            let column = app.tree_cursor.column;
            app.tree.sort_by(column);
        }
        Tab::FileDetails => {
            if let Some(file) = app.file.as_mut() {
                let column = file.cursor.column;
                match file.focus {
                    TableFocus::Members => file.members.sort_by(column),
                    TableFocus::Methods => file.methods.sort_by(column),
                };
            }
        }
        Tab::Info | Tab::MethodComplexity => {}
    }
}

fn select(app: &mut ExplorerApp) {
    match app.nav.active {
        Tab::Charts => {
            if let Some(row) = app.heatmap_selected_row() {
                if app.heatmap_order.isolate_row(row) {
                    app.heatmap_cursor.row = 0;
                }
            }
        }
        Tab::Tables => select_tree_row(app),
        Tab::FileDetails => {
            let Some(key) = app.file.as_ref().and_then(|f| f.selected_record()) else {
                return;
            };
            let result = app.open_complexity(key);
            report(app, result);
        }
        Tab::Info | Tab::MethodComplexity => {}
    }
}

fn select_tree_row(app: &mut ExplorerApp) {
    let target = app
        .tree
        .visible_rows()
        .get(app.tree_cursor.row)
        .map(|row| match row {
            TreeRow::Package(p) => (p.name.clone(), None),
            TreeRow::File(f) => (f.package.clone(), Some(f.name.clone())),
        });

    match target {
        Some((package, None)) => {
            app.tree.toggle(&package);
        }
        Some((package, Some(file_name))) => {
            let result = app.open_file_details(&package, &file_name);
            report(app, result);
        }
        None => {}
    }
}

//! Pure action determination for explorer keyboard handling.
//!
//! - Pure core: `determine_action` maps key + context → action
//! - Imperative shell: `navigation::execute_action` performs the mutation
//!
//! Keys that mean nothing on the active tab produce no action.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::nav::Tab;

/// Rows moved by PageUp / PageDown.
pub const PAGE_SIZE: isize = 10;

/// Everything the user can ask the explorer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,

    /// Activate a tab; drill-down tabs are subject to the navigation guards.
    ActivateTab(Tab),

    /// Cycle to the next visible tab.
    NextTab,

    ToggleTheme,

    /// Move the row cursor, or scroll a text view.
    MoveRows(isize),

    /// Move the column cursor.
    MoveColumn(isize),

    /// Sort the active table by the column under the cursor.
    SortColumn,

    /// Activate the row under the cursor: toggle a package, open a file,
    /// open a complexity view or isolate a heatmap row.
    Select,

    /// Expand or collapse every package.
    ToggleAll,

    /// Heatmap rows alphabetically.
    OrderAlphabetical,

    /// Heatmap rows by total, descending.
    OrderTotal,

    /// Switch between the members and methods tables.
    SwitchFocus,

    /// Show or hide the extended project fields.
    ToggleDetails,
}

/// State needed to evaluate key guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionContext {
    pub tab: Tab,
    /// Whether the active tab's table or grid has any rows.
    pub has_rows: bool,
}

impl ActionContext {
    fn has_grid(&self) -> bool {
        matches!(self.tab, Tab::Charts | Tab::Tables | Tab::FileDetails)
    }
}

/// Pure function: which action does `key` trigger in `ctx`?
pub fn determine_action(key: KeyEvent, ctx: ActionContext) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),

        KeyCode::Char('1') => Some(Action::ActivateTab(Tab::Info)),
        KeyCode::Char('2') => Some(Action::ActivateTab(Tab::Charts)),
        KeyCode::Char('3') => Some(Action::ActivateTab(Tab::Tables)),
        KeyCode::Char('4') => Some(Action::ActivateTab(Tab::FileDetails)),
        KeyCode::Char('5') => Some(Action::ActivateTab(Tab::MethodComplexity)),
        KeyCode::Tab => Some(Action::NextTab),
        KeyCode::Char('t') => Some(Action::ToggleTheme),

        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveRows(-1)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveRows(1)),
        KeyCode::PageUp => Some(Action::MoveRows(-PAGE_SIZE)),
        KeyCode::PageDown => Some(Action::MoveRows(PAGE_SIZE)),

        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('[') if ctx.has_grid() => {
            Some(Action::MoveColumn(-1))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(']') if ctx.has_grid() => {
            Some(Action::MoveColumn(1))
        }

        // Sorting and selection need a row to act on
        KeyCode::Char('s') if ctx.has_grid() && ctx.has_rows => Some(Action::SortColumn),
        KeyCode::Enter if ctx.has_grid() && ctx.has_rows => Some(Action::Select),

        KeyCode::Char('e') if ctx.tab == Tab::Tables => Some(Action::ToggleAll),
        KeyCode::Char('a') if ctx.tab == Tab::Charts => Some(Action::OrderAlphabetical),
        KeyCode::Char('o') if ctx.tab == Tab::Charts => Some(Action::OrderTotal),
        KeyCode::Char('f') if ctx.tab == Tab::FileDetails => Some(Action::SwitchFocus),
        KeyCode::Char('d') if ctx.tab == Tab::Info => Some(Action::ToggleDetails),

        _ => None,
    }
}

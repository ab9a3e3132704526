//! Tab navigation state machine.
//!
//! # Tabs
//!
//! ```text
//!     Info ◄──► Charts ◄──► Tables          (permanent)
//!                             │ open file
//!                             v
//!                        FileDetails        (surfaced by drill-down)
//!                             │ open method / member
//!                             v
//!                      MethodComplexity     (surfaced by drill-down)
//! ```
//!
//! Activating a permanent tab hides both drill-down tabs. Activating file
//! details hides the complexity tab, which belongs to a single file. The
//! complexity tab may be visible together with file details. Button states
//! are projections of [`NavState`], never stored separately.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Info,
    Charts,
    Tables,
    FileDetails,
    MethodComplexity,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Info,
        Tab::Charts,
        Tab::Tables,
        Tab::FileDetails,
        Tab::MethodComplexity,
    ];

    pub fn is_permanent(&self) -> bool {
        matches!(self, Tab::Info | Tab::Charts | Tab::Tables)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Info => "Info",
            Tab::Charts => "Charts",
            Tab::Tables => "Tables",
            Tab::FileDetails => "File Details",
            Tab::MethodComplexity => "Complexity",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Visual state of a tab button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabButton {
    Selected,
    Available,
    Hidden,
}

/// Result of attempting a navigation action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationResult {
    Success,
    /// Guard rejected the transition; state is unchanged.
    Blocked { reason: &'static str },
}

impl NavigationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, NavigationResult::Success)
    }
}

/// Active tab plus which drill-down tabs are surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavState {
    pub active: Tab,
    pub file_details_open: bool,
    pub method_complexity_open: bool,
}

impl Default for NavState {
    fn default() -> Self {
        Self {
            active: Tab::Info,
            file_details_open: false,
            method_complexity_open: false,
        }
    }
}

// ============================================================================
// Pure Guard Functions
// ============================================================================

/// Guard: is `tab` currently surfaced?
pub fn is_surfaced(state: &NavState, tab: Tab) -> bool {
    match tab {
        Tab::FileDetails => state.file_details_open,
        Tab::MethodComplexity => state.method_complexity_open,
        _ => true,
    }
}

/// Guard: can a complexity view be opened? It needs an open file.
pub fn can_open_complexity(state: &NavState) -> bool {
    state.file_details_open
}

// ============================================================================
// Transitions
// ============================================================================

impl NavState {
    /// Activate a tab by the rules above.
    pub fn activate(&mut self, tab: Tab) -> NavigationResult {
        if !is_surfaced(self, tab) {
            return NavigationResult::Blocked {
                reason: "Tab has not been opened",
            };
        }

        match tab {
            Tab::Info | Tab::Charts | Tab::Tables => {
                self.file_details_open = false;
                self.method_complexity_open = false;
            }
            Tab::FileDetails => {
                self.method_complexity_open = false;
            }
            Tab::MethodComplexity => {}
        }
        self.active = tab;
        NavigationResult::Success
    }

    /// Surface and activate file details. The caller populates the view first.
    pub fn open_file_details(&mut self) -> NavigationResult {
        self.file_details_open = true;
        self.activate(Tab::FileDetails)
    }

    /// Surface and activate the complexity view for a record of the open file.
    pub fn open_method_complexity(&mut self) -> NavigationResult {
        if !can_open_complexity(self) {
            return NavigationResult::Blocked {
                reason: "No file open",
            };
        }
        self.method_complexity_open = true;
        self.activate(Tab::MethodComplexity)
    }

    // ========================================================================
    // Projections
    // ========================================================================

    pub fn button_state(&self, tab: Tab) -> TabButton {
        if self.active == tab {
            TabButton::Selected
        } else if is_surfaced(self, tab) {
            TabButton::Available
        } else {
            TabButton::Hidden
        }
    }

    /// Tabs with a visible button, in display order.
    pub fn visible_tabs(&self) -> Vec<Tab> {
        Tab::ALL
            .into_iter()
            .filter(|t| self.button_state(*t) != TabButton::Hidden)
            .collect()
    }

    /// Next visible tab after the active one, wrapping.
    pub fn next_visible(&self) -> Tab {
        let visible = self.visible_tabs();
        let pos = visible.iter().position(|t| *t == self.active).unwrap_or(0);
        visible
            .get((pos + 1) % visible.len().max(1))
            .copied()
            .unwrap_or(Tab::Info)
    }
}

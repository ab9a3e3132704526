//! Application state for the explorer.
//!
//! Each concern owns its own record: tab navigation, the info panel, the
//! file tree, the heatmap order and cursor, the open file with its two
//! tables, and the open complexity view. Actions mutate one record; rendering reads all of them.

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::Frame;

use super::{navigation, theme::Theme, views};
use crate::analysis::Record;
use crate::heatmap::{HeatmapMatrix, RowOrder, BIN_COUNT};
use crate::model::{Dataset, DedupeKey, File};
use crate::nav::{NavState, NavigationResult};
use crate::prefs::{self, PreferenceStore, ThemeMode};
use crate::signature::extract_name;
use crate::summary::{info_rows, ChartSeries, FileDetails, InfoRow, SummaryCards};
use crate::tables::{member_table, method_table, FlatTable, MemberRow, MethodRow};
use crate::tree::TreeState;

/// Row and column cursor over a grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridCursor {
    pub row: usize,
    pub column: usize,
}

impl GridCursor {
    /// Move by `delta` rows, clamped to `len`.
    pub fn move_row(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.row = 0;
            return;
        }
        let target = self.row as isize + delta;
        self.row = target.clamp(0, len as isize - 1) as usize;
    }

    /// Move by `delta` columns, clamped to `count`.
    pub fn move_column(&mut self, delta: isize, count: usize) {
        if count == 0 {
            self.column = 0;
            return;
        }
        let target = self.column as isize + delta;
        self.column = target.clamp(0, count as isize - 1) as usize;
    }
}

/// Which table of the file details view receives keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableFocus {
    #[default]
    Members,
    Methods,
}

impl TableFocus {
    pub fn toggled(self) -> Self {
        match self {
            TableFocus::Members => TableFocus::Methods,
            TableFocus::Methods => TableFocus::Members,
        }
    }
}

/// Info tab disclosure. Extended project fields start hidden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InfoPanel {
    pub show_extended: bool,
}

impl InfoPanel {
    pub fn toggle(&mut self) {
        self.show_extended = !self.show_extended;
    }
}

/// The file shown in the file details tab.
#[derive(Debug, Clone)]
pub struct OpenFile {
    pub package: String,
    pub file_name: String,
    pub details: FileDetails,
    pub members: FlatTable<MemberRow>,
    pub methods: FlatTable<MethodRow>,
    pub focus: TableFocus,
    pub cursor: GridCursor,
}

impl OpenFile {
    fn new(package: &str, file: &File) -> Self {
        Self {
            package: package.to_string(),
            file_name: file.name().to_string(),
            details: FileDetails::from_file(file),
            members: member_table(file),
            methods: method_table(file),
            focus: TableFocus::default(),
            cursor: GridCursor::default(),
        }
    }

    /// Row and column counts of the focused table.
    pub fn focused_shape(&self) -> (usize, usize) {
        match self.focus {
            TableFocus::Members => (self.members.len(), self.members.columns.len()),
            TableFocus::Methods => (self.methods.len(), self.methods.columns.len()),
        }
    }

    /// Record under the cursor of the focused table.
    pub fn selected_record(&self) -> Option<RecordKey> {
        match self.focus {
            TableFocus::Members => self
                .members
                .rows
                .get(self.cursor.row)
                .map(|r| RecordKey::Member(r.index)),
            TableFocus::Methods => self
                .methods
                .rows
                .get(self.cursor.row)
                .map(|r| RecordKey::Method(r.index)),
        }
    }
}

/// Index of a member or method within the open file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKey {
    Member(usize),
    Method(usize),
}

/// The record shown in the complexity tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRecord {
    pub key: RecordKey,
    /// Tab label, `name: Complexity`.
    pub title: String,
}

/// Main application state
pub struct ExplorerApp {
    dataset: Dataset,
    dedupe: DedupeKey,
    pub(crate) nav: NavState,
    pub(crate) info_panel: InfoPanel,
    pub(crate) tree: TreeState,
    pub(crate) tree_cursor: GridCursor,
    pub(crate) heatmap: HeatmapMatrix,
    pub(crate) heatmap_order: RowOrder,
    pub(crate) heatmap_cursor: GridCursor,
    pub(crate) file: Option<OpenFile>,
    pub(crate) record: Option<OpenRecord>,
    pub(crate) scroll: u16,
    theme_mode: ThemeMode,
    prefs: Box<dyn PreferenceStore>,
    cards: SummaryCards,
    info: (Vec<InfoRow>, Vec<InfoRow>),
    charts: ChartSeries,
    status: Option<String>,
}

impl ExplorerApp {
    pub fn new(dataset: Dataset, dedupe: DedupeKey, prefs: Box<dyn PreferenceStore>) -> Self {
        let heatmap = HeatmapMatrix::build(&dataset);
        let heatmap_order = RowOrder::new(&heatmap);
        let theme_mode = prefs::load_theme(prefs.as_ref());
        log::debug!(
            "Explorer opened: {} packages, {} files, {} methods, {} theme",
            dataset.packages.len(),
            dataset.file_count(),
            dataset.method_count(),
            theme_mode
        );

        Self {
            tree: TreeState::from_dataset(&dataset),
            cards: SummaryCards::from_rollup(&dataset.rollup),
            info: info_rows(&dataset.metadata),
            charts: ChartSeries::build(&dataset, dedupe),
            dataset,
            dedupe,
            nav: NavState::default(),
            info_panel: InfoPanel::default(),
            tree_cursor: GridCursor::default(),
            heatmap,
            heatmap_order,
            heatmap_cursor: GridCursor::default(),
            file: None,
            record: None,
            scroll: 0,
            theme_mode,
            prefs,
            status: None,
        }
    }

    /// Handle keyboard input; true when the explorer should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        navigation::handle_key(self, key)
    }

    pub fn render(&mut self, frame: &mut Frame) {
        views::render(frame, self);
    }

    // ========================================================================
    // Read access
    // ========================================================================

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn dedupe(&self) -> DedupeKey {
        self.dedupe
    }

    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    pub fn tree(&self) -> &TreeState {
        &self.tree
    }

    pub fn heatmap(&self) -> &HeatmapMatrix {
        &self.heatmap
    }

    pub fn heatmap_order(&self) -> &RowOrder {
        &self.heatmap_order
    }

    pub fn open_file(&self) -> Option<&OpenFile> {
        self.file.as_ref()
    }

    pub fn open_record(&self) -> Option<&OpenRecord> {
        self.record.as_ref()
    }

    pub fn cards(&self) -> &SummaryCards {
        &self.cards
    }

    pub fn info_panel(&self) -> InfoPanel {
        self.info_panel
    }

    pub fn info(&self) -> (&[InfoRow], &[InfoRow]) {
        (&self.info.0, &self.info.1)
    }

    pub fn charts(&self) -> &ChartSeries {
        &self.charts
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme_mode
    }

    pub fn theme(&self) -> Theme {
        Theme::for_mode(self.theme_mode)
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Matrix row under the heatmap cursor.
    pub fn heatmap_selected_row(&self) -> Option<usize> {
        self.heatmap_order.row_at(self.heatmap_cursor.row)
    }

    /// The file of the file details tab, resolved against the dataset.
    pub fn current_file(&self) -> Option<&File> {
        let open = self.file.as_ref()?;
        self.dataset.find_file(&open.package, &open.file_name)
    }

    /// The record of the complexity tab, resolved against the open file.
    pub fn current_record(&self) -> Option<Record<'_>> {
        let key = self.record.as_ref()?.key;
        let file = self.current_file()?;
        match key {
            RecordKey::Member(i) => file.members.get(i).map(Record::Member),
            RecordKey::Method(i) => file.methods.get(i).map(Record::Method),
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    pub(crate) fn set_status_message(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub(crate) fn clear_status_message(&mut self) {
        self.status = None;
    }

    /// Populate and surface the file details tab.
    pub fn open_file_details(&mut self, package: &str, file_name: &str) -> NavigationResult {
        let Some(file) = self.dataset.find_file(package, file_name) else {
            log::warn!("File {} not found in package {}", file_name, package);
            return NavigationResult::Blocked {
                reason: "File not found",
            };
        };
        self.file = Some(OpenFile::new(package, file));
        self.record = None;
        self.nav.open_file_details()
    }

    /// Populate and surface the complexity tab for a record of the open file.
    pub fn open_complexity(&mut self, key: RecordKey) -> NavigationResult {
        let Some(file) = self.current_file() else {
            return NavigationResult::Blocked {
                reason: "No file open",
            };
        };
        let signature = match key {
            RecordKey::Member(i) => file.members.get(i).map(|m| &m.metadata.signature),
            RecordKey::Method(i) => file.methods.get(i).map(|m| &m.metadata.signature),
        };
        let Some(signature) = signature else {
            log::warn!("Record {:?} not found in {}", key, file.name());
            return NavigationResult::Blocked {
                reason: "Record not found",
            };
        };

        let title = format!("{}: Complexity", extract_name(signature));
        let result = self.nav.open_method_complexity();
        if result.is_success() {
            self.record = Some(OpenRecord { key, title });
            self.scroll = 0;
        }
        result
    }

    pub(crate) fn toggle_theme(&mut self) {
        self.theme_mode = prefs::toggle_theme(self.prefs.as_mut(), self.theme_mode);
    }

    /// Heatmap columns, for cursor bounds.
    pub fn heatmap_columns(&self) -> usize {
        BIN_COUNT
    }
}

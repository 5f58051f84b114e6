use std::sync::mpsc;

use catalog::{Character, DisplayState, ViewChange, ViewStore};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};

use crate::action::{Action, AppCommand};
use crate::rows::{self, FilterRow, ListRow};

/// Tracks clickable regions for mouse hit testing.
#[derive(Debug, Clone, Default)]
pub struct LayoutGeometry {
    /// Inner area of the list pane (excluding borders).
    pub list_inner: Rect,
    /// Inner area of the detail pane (excluding borders).
    pub detail_inner: Rect,
    /// Overlay area if one is currently displayed.
    pub overlay: Option<Rect>,
}

/// UI mode the app is currently in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Search,
    Filter,
}

/// Transient status message shown in the status bar.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    /// Remaining ticks before the message expires.
    pub ticks_remaining: u8,
}

/// The TUI application state. This is a pure state machine:
/// inputs produce commands (side effects), actions update state.
pub struct App {
    /// Collection, selections and derived views.
    pub store: ViewStore,
    /// Source label for display.
    pub source_label: String,
    /// Rows of the list pane, rebuilt whenever the store changes.
    pub rows: Vec<ListRow>,
    /// Current cursor position in rows.
    pub cursor: usize,
    /// Viewport scroll offset for list pane.
    pub list_scroll_offset: usize,
    /// Detail pane scroll offset.
    pub detail_scroll: u16,

    /// Current UI mode.
    pub mode: Mode,
    /// Search text being edited; mirrored into the store on every keystroke.
    pub search_query: String,

    /// Rows of the filter overlay.
    pub filter_rows: Vec<FilterRow>,
    /// Cursor position in the filter overlay.
    pub filter_cursor: usize,
    /// Viewport scroll offset for the filter overlay.
    pub filter_scroll_offset: usize,

    /// Transient feedback message.
    pub status_message: Option<StatusMessage>,

    /// Layout geometry for mouse hit testing.
    pub layout_geometry: LayoutGeometry,

    changes: mpsc::Receiver<ViewChange>,
}

impl App {
    /// Create an app with an empty store. Call [`App::request_fetch`] to load data.
    pub fn new(source_label: String, page_size: usize) -> Self {
        let mut store = ViewStore::with_page_size(page_size);
        let (tx, changes) = mpsc::channel();
        store.subscribe(move |change| {
            let _ = tx.send(change);
        });

        Self {
            store,
            source_label,
            rows: Vec::new(),
            cursor: 0,
            list_scroll_offset: 0,
            detail_scroll: 0,
            mode: Mode::Normal,
            search_query: String::new(),
            filter_rows: Vec::new(),
            filter_cursor: 0,
            filter_scroll_offset: 0,
            status_message: None,
            layout_geometry: LayoutGeometry::default(),
            changes,
        }
    }

    /// Mark the store as loading and ask the event loop to fetch the catalog.
    pub fn request_fetch(&mut self) -> AppCommand {
        if self.store.is_loading() {
            return AppCommand::None;
        }
        self.store.begin_loading();
        self.sync_with_store();
        AppCommand::FetchAll
    }

    /// Handle a terminal event, returning a command for the event loop.
    pub fn handle_event(&mut self, event: Event) -> AppCommand {
        let command = match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => AppCommand::None,
        };
        self.sync_with_store();
        command
    }

    /// Handle an async action (result from a background task).
    pub fn handle_action(&mut self, action: Action) -> AppCommand {
        match action {
            Action::CatalogLoaded(result) => {
                match self.store.finish_loading(result) {
                    Ok(()) => {
                        let text = format!("Loaded {} characters", self.store.total_count());
                        self.set_status(text, false);
                    }
                    Err(e) => self.set_status(format!("Could not load: {e}"), true),
                }
                self.sync_with_store();
                AppCommand::None
            }
        }
    }

    /// Tick the app forward (called on interval). Used for expiring status messages.
    pub fn tick(&mut self) {
        if let Some(msg) = &mut self.status_message {
            if msg.ticks_remaining == 0 {
                self.status_message = None;
            } else {
                msg.ticks_remaining -= 1;
            }
        }
    }

    /// The character under the cursor, if the cursor is on an item row.
    pub fn selected_character(&self) -> Option<&Character> {
        match self.rows.get(self.cursor)? {
            ListRow::Item { position } => self.store.displayed_item(*position),
            ListRow::LoadMore { .. } => None,
        }
    }

    /// Drain store notifications and rebuild whatever they invalidate.
    fn sync_with_store(&mut self) {
        let mut rederived = false;
        let mut grown = false;

        for change in self.changes.try_iter() {
            match change {
                ViewChange::Collection | ViewChange::Filter | ViewChange::Sort => rederived = true,
                ViewChange::Window => grown = true,
                ViewChange::LoadState => {}
            }
        }

        if rederived {
            self.rows = rows::build_list_rows(&self.store);
            self.filter_rows = rows::build_filter_rows(&self.store);
            self.cursor = 0;
            self.list_scroll_offset = 0;
            self.detail_scroll = 0;
        } else if grown {
            // The cursor keeps its row: the old "load more" row becomes the first new item.
            self.rows = rows::build_list_rows(&self.store);
            self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> AppCommand {
        // Ctrl+C always quits.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return AppCommand::Quit;
        }

        match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Search => self.handle_search_key(key),
            Mode::Filter => self.handle_filter_key(key),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> AppCommand {
        if self.mode == Mode::Filter {
            return self.handle_filter_mouse(mouse);
        }

        let pos = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.layout_geometry.list_inner.contains(pos) {
                    self.handle_list_click(mouse.row);
                }
                AppCommand::None
            }
            MouseEventKind::ScrollDown => {
                if self.layout_geometry.list_inner.contains(pos) {
                    self.move_cursor_by(3);
                } else if self.layout_geometry.detail_inner.contains(pos) {
                    self.detail_scroll = self.detail_scroll.saturating_add(3);
                }
                AppCommand::None
            }
            MouseEventKind::ScrollUp => {
                if self.layout_geometry.list_inner.contains(pos) {
                    self.move_cursor_back_by(3);
                } else if self.layout_geometry.detail_inner.contains(pos) {
                    self.detail_scroll = self.detail_scroll.saturating_sub(3);
                }
                AppCommand::None
            }
            _ => AppCommand::None,
        }
    }

    fn handle_filter_mouse(&mut self, mouse: MouseEvent) -> AppCommand {
        let pos = Position::new(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(overlay) = self.layout_geometry.overlay else {
                    return AppCommand::None;
                };
                if !overlay.contains(pos) {
                    self.mode = Mode::Normal;
                    return AppCommand::None;
                }

                // Rows start below the top border.
                let relative_row = mouse.row.saturating_sub(overlay.y + 1) as usize;
                let index = self.filter_scroll_offset + relative_row;
                if let Some(FilterRow::Value {
                    dimension, value, ..
                }) = self.filter_rows.get(index).cloned()
                {
                    self.filter_cursor = index;
                    self.store.toggle_filter(dimension, &value);
                    self.sync_with_store();
                    self.filter_cursor = index.min(self.filter_rows.len().saturating_sub(1));
                }
            }
            MouseEventKind::ScrollDown => {
                self.filter_cursor = rows::next_value_index(&self.filter_rows, self.filter_cursor);
            }
            MouseEventKind::ScrollUp => {
                self.filter_cursor = rows::prev_value_index(&self.filter_rows, self.filter_cursor);
            }
            _ => {}
        }
        AppCommand::None
    }

    fn handle_list_click(&mut self, row: u16) {
        let inner = self.layout_geometry.list_inner;
        let relative_row = (row.saturating_sub(inner.y)) as usize;
        let index = self.list_scroll_offset + relative_row;

        if index >= self.rows.len() {
            return;
        }

        self.cursor = index;
        self.detail_scroll = 0;
        if matches!(self.rows[index], ListRow::LoadMore { .. }) {
            self.store.load_more();
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> AppCommand {
        match key.code {
            KeyCode::Char('q') => AppCommand::Quit,
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_cursor_by(1);
                AppCommand::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_cursor_back_by(1);
                AppCommand::None
            }
            KeyCode::PageDown => {
                self.detail_scroll = self.detail_scroll.saturating_add(5);
                AppCommand::None
            }
            KeyCode::PageUp => {
                self.detail_scroll = self.detail_scroll.saturating_sub(5);
                AppCommand::None
            }
            KeyCode::Char('/') => {
                self.mode = Mode::Search;
                self.search_query = self.store.selection().search.clone();
                AppCommand::None
            }
            KeyCode::Char('f') => {
                self.mode = Mode::Filter;
                self.filter_cursor = rows::first_value_index(&self.filter_rows).unwrap_or(0);
                self.filter_scroll_offset = 0;
                AppCommand::None
            }
            KeyCode::Char('o') => {
                let direction = self.store.sort_direction().toggle();
                self.store.set_sort(direction);
                AppCommand::None
            }
            KeyCode::Char('m') => {
                self.store.load_more();
                AppCommand::None
            }
            KeyCode::Enter => {
                if matches!(self.rows.get(self.cursor), Some(ListRow::LoadMore { .. })) {
                    self.store.load_more();
                }
                AppCommand::None
            }
            KeyCode::Char('r') => self.request_fetch(),
            KeyCode::Esc => {
                if !self.store.selection().is_empty() {
                    self.search_query.clear();
                    self.store.clear_filters();
                }
                AppCommand::None
            }
            _ => AppCommand::None,
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> AppCommand {
        match key.code {
            KeyCode::Esc => {
                self.mode = Mode::Normal;
                self.search_query.clear();
                self.store.set_search("");
            }
            KeyCode::Enter => {
                // Keep the current search active.
                self.mode = Mode::Normal;
            }
            KeyCode::Down => self.move_cursor_by(1),
            KeyCode::Up => self.move_cursor_back_by(1),
            KeyCode::Backspace => {
                self.search_query.pop();
                self.store.set_search(self.search_query.clone());
            }
            KeyCode::Char(c) => {
                self.search_query.push(c);
                self.store.set_search(self.search_query.clone());
            }
            _ => {}
        }
        AppCommand::None
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> AppCommand {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.filter_cursor = rows::next_value_index(&self.filter_rows, self.filter_cursor);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.filter_cursor = rows::prev_value_index(&self.filter_rows, self.filter_cursor);
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(FilterRow::Value {
                    dimension, value, ..
                }) = self.filter_rows.get(self.filter_cursor).cloned()
                {
                    self.store.toggle_filter(dimension, &value);
                }
            }
            KeyCode::Char('x') => {
                let search = self.store.selection().search.clone();
                self.store.clear_filters();
                self.store.set_search(search);
            }
            KeyCode::Esc | KeyCode::Char('f') | KeyCode::Char('q') => {
                self.mode = Mode::Normal;
            }
            _ => {}
        }

        // Keep the overlay cursor where it was across rebuilds.
        let cursor = self.filter_cursor;
        self.sync_with_store();
        self.filter_cursor = cursor.min(self.filter_rows.len().saturating_sub(1));
        AppCommand::None
    }

    fn move_cursor_by(&mut self, n: usize) {
        let last = self.rows.len().saturating_sub(1);
        let next = (self.cursor + n).min(last);
        if next != self.cursor {
            self.cursor = next;
            self.detail_scroll = 0;
        }
    }

    fn move_cursor_back_by(&mut self, n: usize) {
        let next = self.cursor.saturating_sub(n);
        if next != self.cursor {
            self.cursor = next;
            self.detail_scroll = 0;
        }
    }

    /// Human-readable message for states where the list has nothing to show.
    pub fn placeholder(&self) -> Option<(&'static str, Option<String>)> {
        match self.store.display_state() {
            DisplayState::Loading => Some(("Loading...", None)),
            DisplayState::Failed(msg) => {
                Some(("Could not load characters. Press r to retry.", Some(msg)))
            }
            DisplayState::Empty => Some(("Nothing loaded. Press r to fetch.", None)),
            DisplayState::NoResults => Some(("No results", None)),
            DisplayState::Items => None,
        }
    }

    fn set_status(&mut self, text: String, is_error: bool) {
        self.status_message = Some(StatusMessage {
            text,
            is_error,
            ticks_remaining: 12, // ~3 seconds at 250ms tick
        });
    }
}

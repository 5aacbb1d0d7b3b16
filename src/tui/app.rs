use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::widgets::{ListState, ScrollbarState};

use super::models::{OperationItem, ProcessingStats, ProcessingStatus, ViewMode};
use crate::naming::CanonicalNameParser;
use crate::preview::{TreeLine, build_tree, render_tree};
use crate::rename_engine::RenameOperation;

#[derive(Debug)]
pub struct App {
    pub root: PathBuf,
    pub series_name: String,
    pub items: Vec<OperationItem>,
    pub tree_lines: Vec<TreeLine>,
    pub list_state: ListState,
    pub scroll_state: ScrollbarState,
    pub view_mode: ViewMode,
    pub show_help: bool,
    pub show_preview: bool,
    pub confirmed: bool,
    pub current_processing: Option<usize>,
    pub next_index: usize,
    pub processing_progress: f64,
    pub finished: bool,
    pub halted: bool,
    pub dry_run: bool,
    pub stats: ProcessingStats,
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
    pub start_time: Option<Instant>,
}

impl App {
    pub fn new(
        root: PathBuf,
        series_name: String,
        operations: Vec<RenameOperation>,
        dry_run: bool,
    ) -> Self {
        let tree_lines = render_tree(&build_tree(&root, &operations));
        let parser = CanonicalNameParser::new().ok();

        let items: Vec<OperationItem> = operations
            .into_iter()
            .map(|operation| {
                let new_name = operation.new_name();
                OperationItem {
                    original_name: operation.original_name(),
                    target: parser.as_ref().and_then(|parser| parser.parse(&new_name)),
                    new_name,
                    status: if operation.is_noop() {
                        ProcessingStatus::Skipped
                    } else {
                        ProcessingStatus::Pending
                    },
                    error_message: None,
                    operation,
                }
            })
            .collect();

        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            root,
            series_name,
            stats: ProcessingStats {
                total: items.len(),
                ..Default::default()
            },
            scroll_state: ScrollbarState::new(items.len()),
            items,
            tree_lines,
            list_state,
            view_mode: ViewMode::Flat,
            show_help: false,
            show_preview: true,
            confirmed: false,
            current_processing: None,
            next_index: 0,
            processing_progress: 0.0,
            finished: false,
            halted: false,
            dry_run,
            status_message: None,
            status_message_time: None,
            start_time: None,
        }
    }

    pub fn row_count(&self) -> usize {
        match self.view_mode {
            ViewMode::Flat => self.items.len(),
            ViewMode::Tree => self.tree_lines.len(),
        }
    }

    pub fn selected_item(&self) -> Option<&OperationItem> {
        match self.view_mode {
            ViewMode::Flat => self.list_state.selected().and_then(|i| self.items.get(i)),
            ViewMode::Tree => None,
        }
    }

    pub fn next(&mut self) {
        let rows = self.row_count();
        if rows == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < rows => i + 1,
            _ => 0,
        };
        self.select(i);
    }

    pub fn previous(&mut self) {
        let rows = self.row_count();
        if rows == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => rows - 1,
            Some(i) => i - 1,
        };
        self.select(i);
    }

    fn select(&mut self, index: usize) {
        self.list_state.select(Some(index));
        self.scroll_state = self.scroll_state.position(index);
    }

    pub fn toggle_view(&mut self) {
        self.view_mode = match self.view_mode {
            ViewMode::Flat => ViewMode::Tree,
            ViewMode::Tree => ViewMode::Flat,
        };
        self.scroll_state = ScrollbarState::new(self.row_count());
        self.select(0);
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn toggle_preview(&mut self) {
        self.show_preview = !self.show_preview;
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_message_time = Some(Instant::now());
    }

    pub fn clear_status_message_if_expired(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() > Duration::from_secs(3) {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }
}

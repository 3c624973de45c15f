//! Application state wiring user actions to engine passes.

use std::path::{Path, PathBuf};

use crate::color::Theme;
use crate::engine::AlignmentMatrix;
use crate::report;

/// Input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Command,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Command => "COMMAND",
        }
    }
}

/// Terminal background theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminalTheme {
    Light,
    #[default]
    Dark,
}

/// Application state.
pub struct App {
    /// The alignment matrix; single source of truth for visibility and
    /// band state.
    pub matrix: AlignmentMatrix,
    /// Alignment file path (if loaded).
    pub file_path: Option<PathBuf>,

    /// Current threshold (the slider value).
    pub threshold: f64,
    /// Threshold restored by the reset action.
    pub default_threshold: f64,
    /// Whether conservation coloring is active.
    pub conservation: bool,
    /// Whether nucleotide foreground highlighting is active. Purely
    /// cosmetic: it never touches the matrix.
    pub nucleotide_highlight: bool,

    /// Viewport offset into the visible rows.
    pub viewport_row: usize,
    /// Viewport offset into the visible columns.
    pub viewport_col: usize,

    /// Current input mode.
    pub mode: Mode,
    /// Command line buffer (for command mode).
    pub command_buffer: String,
    /// Status message.
    pub status_message: Option<String>,

    /// Should quit.
    pub should_quit: bool,
    /// Show help overlay.
    pub show_help: bool,

    pub terminal_theme: TerminalTheme,
    pub theme: Theme,
}

impl App {
    pub fn new(threshold: f64, theme: Theme) -> Self {
        Self {
            matrix: AlignmentMatrix::empty(),
            file_path: None,
            threshold,
            default_threshold: threshold,
            conservation: false,
            nucleotide_highlight: false,
            viewport_row: 0,
            viewport_col: 0,
            mode: Mode::Normal,
            command_buffer: String::new(),
            status_message: None,
            should_quit: false,
            show_help: false,
            terminal_theme: TerminalTheme::Dark,
            theme,
        }
    }

    /// Load an alignment (and optional outlist) and run the initial
    /// filtering pass.
    pub fn load_report(&mut self, align: &Path, outlist: Option<&Path>) -> Result<(), String> {
        let matrix = report::load_report(align, outlist).map_err(|e| e.to_string())?;
        self.matrix = matrix;
        self.file_path = Some(align.to_path_buf());
        self.viewport_row = 0;
        self.viewport_col = 0;
        self.apply_threshold(self.threshold);
        Ok(())
    }

    /// Run a full filtering pass at the given threshold, re-running the
    /// conservation pass if coloring is active.
    pub fn apply_threshold(&mut self, threshold: f64) {
        self.threshold = threshold;
        let summary = self.matrix.set_threshold(threshold);
        if self.conservation {
            self.matrix.show_conservation(threshold);
        }
        self.clamp_viewport();
        self.set_status(format!(
            "threshold {:.1}: {} rows, {} columns",
            threshold,
            summary.visible_rows.len(),
            self.matrix.width() - summary.hidden_columns.len()
        ));
    }

    /// Restore the default threshold (the original page's reset button).
    pub fn reset_threshold(&mut self) {
        self.apply_threshold(self.default_threshold);
    }

    /// Nudge the threshold by `delta` bits and refilter.
    pub fn adjust_threshold(&mut self, delta: f64) {
        self.apply_threshold(self.threshold + delta);
    }

    /// Toggle conservation coloring at the current threshold.
    pub fn toggle_conservation(&mut self) {
        if self.conservation {
            self.hide_conservation();
        } else {
            self.show_conservation(self.threshold);
        }
    }

    pub fn show_conservation(&mut self, threshold: f64) {
        self.conservation = true;
        self.threshold = threshold;
        let painted = self.matrix.show_conservation(threshold);
        self.clamp_viewport();
        self.set_status(format!("conservation on: {painted} cells banded"));
    }

    pub fn hide_conservation(&mut self) {
        self.conservation = false;
        self.matrix.hide_conservation();
        self.set_status("conservation off");
    }

    /// Flip nucleotide highlighting. Display-only.
    pub fn toggle_nucleotide_highlight(&mut self) {
        self.nucleotide_highlight = !self.nucleotide_highlight;
        self.set_status(if self.nucleotide_highlight {
            "nucleotide highlight on"
        } else {
            "nucleotide highlight off"
        });
    }

    // === Viewport ===

    pub fn scroll_up(&mut self, n: usize) {
        self.viewport_row = self.viewport_row.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.viewport_row = (self.viewport_row + n)
            .min(self.matrix.visible_row_count().saturating_sub(1));
    }

    pub fn scroll_left(&mut self, n: usize) {
        self.viewport_col = self.viewport_col.saturating_sub(n);
    }

    pub fn scroll_right(&mut self, n: usize) {
        self.viewport_col = (self.viewport_col + n)
            .min(self.matrix.visible_column_count().saturating_sub(1));
    }

    pub fn scroll_top(&mut self) {
        self.viewport_row = 0;
    }

    pub fn scroll_bottom(&mut self) {
        self.viewport_row = self.matrix.visible_row_count().saturating_sub(1);
    }

    pub fn scroll_line_start(&mut self) {
        self.viewport_col = 0;
    }

    /// Re-clamp viewport offsets after a pass changes visibility.
    fn clamp_viewport(&mut self) {
        self.viewport_row = self
            .viewport_row
            .min(self.matrix.visible_row_count().saturating_sub(1));
        self.viewport_col = self
            .viewport_col
            .min(self.matrix.visible_column_count().saturating_sub(1));
    }

    // === Command mode ===

    pub fn enter_command_mode(&mut self) {
        self.mode = Mode::Command;
        self.command_buffer.clear();
    }

    pub fn cancel_command_mode(&mut self) {
        self.mode = Mode::Normal;
        self.command_buffer.clear();
    }

    /// Execute the buffered `:` command.
    pub fn execute_command(&mut self) {
        let command = std::mem::take(&mut self.command_buffer);
        self.mode = Mode::Normal;

        let parts: Vec<&str> = command.split_whitespace().collect();
        match parts.as_slice() {
            [] => {}
            ["q" | "quit"] => self.should_quit = true,
            ["threshold" | "t", value] => match value.parse::<f64>() {
                Ok(threshold) => {
                    self.apply_threshold(threshold);
                }
                Err(_) => self.set_status(format!("Invalid threshold: {value}")),
            },
            ["reset"] => self.reset_threshold(),
            ["conservation" | "cons"] => self.toggle_conservation(),
            ["conservation" | "cons", value] => match value.parse::<f64>() {
                Ok(threshold) => self.show_conservation(threshold),
                Err(_) => self.set_status(format!("Invalid threshold: {value}")),
            },
            ["plain"] => self.hide_conservation(),
            ["highlight" | "hl"] => self.toggle_nucleotide_highlight(),
            ["help"] => self.show_help = true,
            _ => self.set_status(format!("Unknown command: {command}")),
        }
    }

    // === Status ===

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Row;

    fn test_app() -> App {
        let rows = vec![
            Row::new("SS_cons", None, "<<..>>"),
            Row::new("seq1", Some(30.0), "AC..GU"),
            Row::new("seq2", Some(20.0), "ACGUGU"),
        ];
        let mut app = App::new(25.0, Theme::default());
        app.matrix = AlignmentMatrix::new(rows, 1).unwrap();
        app
    }

    #[test]
    fn test_threshold_command() {
        let mut app = test_app();
        app.command_buffer = "t 25".to_string();
        app.execute_command();
        assert_eq!(app.threshold, 25.0);
        assert_eq!(app.matrix.visible_row_indices(), vec![0, 1]);
        assert_eq!(app.matrix.hidden_column_indices(), vec![2, 3]);
    }

    #[test]
    fn test_reset_restores_default() {
        let mut app = test_app();
        app.apply_threshold(100.0);
        app.reset_threshold();
        assert_eq!(app.threshold, 25.0);
    }

    #[test]
    fn test_conservation_toggle_resets_bands() {
        let mut app = test_app();
        app.apply_threshold(10.0);
        app.toggle_conservation();
        assert!(app.conservation);
        let banded: usize = app
            .matrix
            .rows()
            .iter()
            .flat_map(|r| r.symbols())
            .filter(|s| s.band.is_some())
            .count();
        assert!(banded > 0);

        app.toggle_conservation();
        assert!(!app.conservation);
        let banded: usize = app
            .matrix
            .rows()
            .iter()
            .flat_map(|r| r.symbols())
            .filter(|s| s.band.is_some())
            .count();
        assert_eq!(banded, 0);
    }

    #[test]
    fn test_highlight_is_cosmetic() {
        let mut app = test_app();
        app.apply_threshold(25.0);
        let before_rows = app.matrix.visible_row_indices();
        let before_cols = app.matrix.hidden_column_indices();
        app.toggle_nucleotide_highlight();
        assert!(app.nucleotide_highlight);
        assert_eq!(app.matrix.visible_row_indices(), before_rows);
        assert_eq!(app.matrix.hidden_column_indices(), before_cols);
    }

    #[test]
    fn test_unknown_command_reports_status() {
        let mut app = test_app();
        app.command_buffer = "bogus".to_string();
        app.execute_command();
        assert!(app.status_message.as_deref().unwrap().starts_with("Unknown"));
    }
}

//! TUI rendering with ratatui.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{App, Mode, TerminalTheme};
use crate::color::{BANDED_FG, band_color, base_color};
use crate::engine::Band;

/// Render the application UI.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Alignment grid
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command/message line
        ])
        .split(frame.area());

    render_grid(frame, app, chunks[0]);
    render_status_bar(frame, app, chunks[1]);
    render_command_line(frame, app, chunks[2]);

    if app.show_help {
        render_help(frame);
    }
}

/// Rows of the grid pane usable for alignment lines (borders excluded).
pub fn page_size(area: Rect) -> usize {
    (area.height as usize).saturating_sub(4)
}

/// Width reserved for the score column, including trailing space.
const SCORE_WIDTH: usize = 8;

/// Width of the ID column (without its trailing space).
fn id_column_width(app: &App) -> usize {
    app.matrix
        .rows()
        .iter()
        .map(|r| r.id.len())
        .max()
        .unwrap_or(0)
        .clamp(8, 24)
}

/// Bit score under a click at `(x, y)`, if it landed on the score
/// column of a visible row. `area` is the full frame.
///
/// Mirrors the grid geometry of `render_grid`: one border cell around
/// the pane, then the ID column, then the score column.
pub fn score_at(app: &App, area: Rect, x: u16, y: u16) -> Option<f64> {
    let grid = Rect {
        height: area.height.saturating_sub(2),
        ..area
    };
    if grid.height < 3 || grid.width < 3 {
        return None;
    }
    let inner = Rect::new(
        grid.x + 1,
        grid.y + 1,
        grid.width - 2,
        grid.height - 2,
    );
    if y < inner.y || y >= inner.y + inner.height {
        return None;
    }

    let score_start = inner.x as usize + id_column_width(app) + 1;
    if (x as usize) < score_start || (x as usize) >= score_start + SCORE_WIDTH {
        return None;
    }

    let line = (y - inner.y) as usize;
    let row_index = *app
        .matrix
        .visible_row_indices()
        .get(app.viewport_row + line)?;
    app.matrix.rows()[row_index].score
}

/// Render the alignment grid: visible rows only, collapsed columns
/// skipped, conservation bands as backgrounds.
fn render_grid(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!(
        " {} [GA {:.1}] ",
        app.file_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "[No file]".to_string()),
        app.threshold
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.matrix.num_rows() == 0 {
        render_splash(frame, inner);
        return;
    }

    let id_width = id_column_width(app);
    let seq_width = (inner.width as usize).saturating_sub(id_width + 1 + SCORE_WIDTH);

    let visible_rows: Vec<usize> = app.matrix.visible_row_indices();
    let visible_cols: Vec<usize> = (0..app.matrix.width())
        .filter(|&c| !app.matrix.is_column_hidden(c))
        .collect();

    let mut lines: Vec<Line> = Vec::new();
    for &row_index in visible_rows
        .iter()
        .skip(app.viewport_row)
        .take(inner.height as usize)
    {
        let row = &app.matrix.rows()[row_index];
        let is_annotation = row_index < app.matrix.header_rows();

        let id_style = if is_annotation {
            Style::default().fg(app.theme.annotation.to_color())
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let mut truncated = row.id.clone();
        truncated.truncate(id_width);
        let score_text = match row.score {
            Some(score) => format!("{:>7.1} ", score),
            None => " ".repeat(SCORE_WIDTH),
        };

        let mut spans = vec![
            Span::styled(format!("{truncated:<id_width$} "), id_style),
            Span::styled(score_text, Style::default().fg(Color::DarkGray)),
        ];

        for &col in visible_cols.iter().skip(app.viewport_col).take(seq_width) {
            let symbol = row.symbols()[col];
            let style = cell_style(app, symbol.ch, symbol.band, is_annotation);
            spans.push(Span::styled(symbol.ch.to_string(), style));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Style one alignment cell. Band backgrounds win over nucleotide
/// highlighting; annotation rows are always plain.
fn cell_style(app: &App, ch: char, band: Option<Band>, is_annotation: bool) -> Style {
    if is_annotation {
        return Style::default().fg(app.theme.annotation.to_color());
    }
    if let Some(band) = band {
        return Style::default()
            .bg(band_color(band, &app.theme))
            .fg(BANDED_FG);
    }
    if app.nucleotide_highlight
        && let Some(color) = base_color(ch)
    {
        return Style::default().fg(color);
    }
    Style::default()
}

fn render_splash(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "rfview",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Open an alignment: rfview ALIGN --outlist OUTLIST"),
        Line::from("Press ? for help, q to quit"),
    ];
    frame.render_widget(Paragraph::new(lines).centered(), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let fg = match app.terminal_theme {
        TerminalTheme::Light => Color::Black,
        TerminalTheme::Dark => Color::White,
    };
    let mut flags = String::new();
    if app.conservation {
        flags.push_str(" [cons]");
    }
    if app.nucleotide_highlight {
        flags.push_str(" [hl]");
    }
    let status = format!(
        " {} | GA {:.1} | rows {}/{} | cols {}/{}{}",
        app.mode.as_str(),
        app.threshold,
        app.matrix.visible_row_count(),
        app.matrix.num_rows(),
        app.matrix.visible_column_count(),
        app.matrix.width(),
        flags
    );
    let style = Style::default().fg(fg).bg(app.theme.status_bg.to_color());
    frame.render_widget(Paragraph::new(status).style(style), area);
}

fn render_command_line(frame: &mut Frame, app: &App, area: Rect) {
    let text = match app.mode {
        Mode::Command => format!(":{}", app.command_buffer),
        Mode::Normal => app.status_message.clone().unwrap_or_default(),
    };
    frame.render_widget(Paragraph::new(text), area);
}

const HELP_TEXT: &str = "\
  h j k l / arrows   scroll
  Ctrl-f / Ctrl-b    page down / up
  g / G              first / last row
  + / -              raise / lower threshold by 1 bit
  r                  reset threshold to default
  click a score      set threshold to that row's bit score
  c                  toggle conservation coloring
  x                  toggle nucleotide highlighting
  :t N               set threshold to N bits
  :cons [N]          conservation coloring (optionally at threshold N)
  :plain             clear conservation coloring
  :hl                toggle nucleotide highlighting
  q / :q             quit";

fn render_help(frame: &mut Frame) {
    let area = centered_rect(54, 18, frame.area());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help (any key to close) ");
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(HELP_TEXT).block(block), area);
}

/// Fixed-size rect centered in `area`.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Theme;
    use crate::engine::{AlignmentMatrix, Row};

    fn test_app() -> App {
        let rows = vec![
            Row::new("seq1", Some(30.0), "ACGU"),
            Row::new("seq2", Some(20.0), "ACGU"),
            Row::new("seed1", None, "ACGU"),
        ];
        let mut app = App::new(25.0, Theme::default());
        app.matrix = AlignmentMatrix::new(rows, 0).unwrap();
        app.apply_threshold(25.0);
        app
    }

    #[test]
    fn test_score_click_hits_score_column() {
        let app = test_app();
        let area = Rect::new(0, 0, 80, 24);
        // IDs pad to 8 columns, so scores start at x = 1 + 8 + 1.
        assert_eq!(score_at(&app, area, 10, 1), Some(30.0));
        // seq2 is filtered out at 25 bits; the second visible line is
        // the unscored seed row.
        assert_eq!(score_at(&app, area, 10, 2), None);
    }

    #[test]
    fn test_score_click_outside_column_ignored() {
        let app = test_app();
        let area = Rect::new(0, 0, 80, 24);
        // ID column.
        assert_eq!(score_at(&app, area, 3, 1), None);
        // Sequence area.
        assert_eq!(score_at(&app, area, 30, 1), None);
        // Border row.
        assert_eq!(score_at(&app, area, 10, 0), None);
    }

    #[test]
    fn test_score_click_honors_viewport_offset() {
        let mut app = test_app();
        app.apply_threshold(10.0);
        app.viewport_row = 1;
        let area = Rect::new(0, 0, 80, 24);
        // First rendered line is now seq2.
        assert_eq!(score_at(&app, area, 10, 1), Some(20.0));
    }

    #[test]
    fn test_score_click_past_last_row_ignored() {
        let app = test_app();
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(score_at(&app, area, 10, 15), None);
    }
}

//! Key handling.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Mode};

/// Handle a key event.
pub fn handle_key(app: &mut App, key: KeyEvent, page_size: usize) {
    // Close help overlay on any keypress
    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key, page_size),
        Mode::Command => handle_command_mode(app, key),
    }
}

/// Handle keys in normal mode.
fn handle_normal_mode(app: &mut App, key: KeyEvent, page_size: usize) {
    app.clear_status();

    match (key.modifiers, key.code) {
        // Quit
        (KeyModifiers::NONE, KeyCode::Char('q')) => {
            app.should_quit = true;
        }

        // Command mode
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(':')) => {
            app.enter_command_mode();
        }

        // Help overlay
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('?')) => {
            app.show_help = true;
        }

        // Scrolling - basic
        (KeyModifiers::NONE, KeyCode::Char('h') | KeyCode::Left) => {
            app.scroll_left(1);
        }
        (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
            app.scroll_down(1);
        }
        (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
            app.scroll_up(1);
        }
        (KeyModifiers::NONE, KeyCode::Char('l') | KeyCode::Right) => {
            app.scroll_right(1);
        }

        // Scrolling - paging
        (KeyModifiers::CONTROL, KeyCode::Char('f')) | (KeyModifiers::NONE, KeyCode::PageDown) => {
            app.scroll_down(page_size);
        }
        (KeyModifiers::CONTROL, KeyCode::Char('b')) | (KeyModifiers::NONE, KeyCode::PageUp) => {
            app.scroll_up(page_size);
        }

        // Scrolling - document
        (KeyModifiers::NONE, KeyCode::Char('g')) | (KeyModifiers::NONE, KeyCode::Home) => {
            app.scroll_top();
        }
        (KeyModifiers::SHIFT, KeyCode::Char('G')) | (KeyModifiers::NONE, KeyCode::End) => {
            app.scroll_bottom();
        }
        (KeyModifiers::NONE, KeyCode::Char('0')) => {
            app.scroll_line_start();
        }

        // Threshold nudging (the slider, one bit per press)
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('+')) => {
            app.adjust_threshold(1.0);
        }
        (KeyModifiers::NONE, KeyCode::Char('-')) => {
            app.adjust_threshold(-1.0);
        }

        // Reset threshold (the reset button)
        (KeyModifiers::NONE, KeyCode::Char('r')) => {
            app.reset_threshold();
        }

        // Conservation coloring toggle
        (KeyModifiers::NONE, KeyCode::Char('c')) => {
            app.toggle_conservation();
        }

        // Nucleotide highlight toggle (the toggle-columns button)
        (KeyModifiers::NONE, KeyCode::Char('x')) => {
            app.toggle_nucleotide_highlight();
        }

        _ => {}
    }
}

/// Handle keys in command mode.
fn handle_command_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.cancel_command_mode();
        }
        KeyCode::Enter => {
            app.execute_command();
        }
        KeyCode::Backspace => {
            if app.command_buffer.pop().is_none() {
                app.cancel_command_mode();
            }
        }
        KeyCode::Char(c) => {
            app.command_buffer.push(c);
        }
        _ => {}
    }
}

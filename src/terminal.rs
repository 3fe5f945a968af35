// SPDX-License-Identifier: GPL-3.0-only

//! Terminal settings dialog
//!
//! Draws the summary dialog and its pickers with ratatui and maps key and
//! focus events to session messages.

use crate::app::{AppModel, Message, PickerKind, SummaryRow, ViewState};
use crate::config::SettingsStore;
use crate::constants::{app_info, titles, ui};
use crate::errors::{AppError, AppResult};
use crate::service::RecorderNotifier;

use crossterm::{
    event::{
        self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Clear, List, ListItem, ListState, Paragraph, Widget},
};
use std::io::{self, stdout};
use tracing::{debug, info};

fn terminal_error(err: io::Error) -> AppError {
    AppError::Terminal(err.to_string())
}

/// Run the interactive settings dialog until the session finishes
pub fn run(store: SettingsStore, notifier: impl RecorderNotifier + 'static) -> AppResult<()> {
    // Set up terminal
    enable_raw_mode().map_err(terminal_error)?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange).map_err(terminal_error)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(terminal_error)?;

    let mut model = AppModel::new(store, notifier);
    let result = run_app(&mut terminal, &mut model);

    // Restore terminal
    disable_raw_mode().map_err(terminal_error)?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        LeaveAlternateScreen
    )
    .map_err(terminal_error)?;
    terminal.show_cursor().map_err(terminal_error)?;

    // Dropping the model notifies the service even when run_app failed
    drop(model);
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: &mut AppModel,
) -> AppResult<()> {
    let mut cursor = DialogCursor::default();
    model.update(Message::Activate);

    while !model.is_finished() {
        terminal
            .draw(|f| draw(f, &*model, &cursor))
            .map_err(terminal_error)?;

        if !event::poll(ui::INPUT_POLL_INTERVAL).map_err(terminal_error)? {
            continue;
        }

        let event = event::read().map_err(terminal_error)?;
        if let Some(message) = handle_event(model, &mut cursor, event) {
            let before = model.view();
            model.update(message);
            cursor.follow(before, model);
        }
    }

    info!("Settings dialog closed");
    Ok(())
}

/// Highlighted rows of the summary and of the open picker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DialogCursor {
    pub summary_row: usize,
    pub picker_item: usize,
}

impl DialogCursor {
    /// Move the picker highlight to the current value when a picker opens
    pub fn follow(&mut self, before: ViewState, model: &AppModel) {
        let after = model.view();
        if before == after {
            return;
        }
        if let Some(picker) = after.picker() {
            self.picker_item = picker.current_index(&model.store().snapshot());
            debug!(?picker, item = self.picker_item, "Picker cursor reset");
        }
    }
}

/// Translate a terminal event into a message
///
/// Losing terminal focus deactivates the session.
pub fn handle_event(model: &AppModel, cursor: &mut DialogCursor, event: Event) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(model, cursor, key),
        Event::FocusLost => Some(Message::Deactivate),
        _ => None,
    }
}

/// Translate a key press into a message for the current dialog
pub fn handle_key(model: &AppModel, cursor: &mut DialogCursor, key: KeyEvent) -> Option<Message> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Message::DismissSummary);
    }

    match model.view() {
        ViewState::Closed => None,
        ViewState::ShowingSummary => match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                cursor.summary_row = cursor.summary_row.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                cursor.summary_row = (cursor.summary_row + 1).min(SummaryRow::ALL.len() - 1);
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => SummaryRow::ALL
                .get(cursor.summary_row)
                .map(|row| row.message()),
            KeyCode::Esc | KeyCode::Char('q') => Some(Message::DismissSummary),
            _ => None,
        },
        view => {
            let picker = view.picker()?;
            let count = picker.items(&model.store().snapshot()).len();
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    cursor.picker_item = cursor.picker_item.saturating_sub(1);
                    None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    cursor.picker_item = (cursor.picker_item + 1).min(count.saturating_sub(1));
                    None
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    Some(picker.select_message(cursor.picker_item))
                }
                KeyCode::Esc | KeyCode::Char('q') => Some(Message::ClosePicker),
                _ => None,
            }
        }
    }
}

/// Draw the dialogs for the current view state
pub fn draw(f: &mut Frame, model: &AppModel, cursor: &DialogCursor) {
    let area = f.area();

    // Reserve bottom line for status
    let dialog_area = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };
    let status_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1.min(area.height),
    };

    if let Some(summary) = model.summary() {
        let highlight = (model.view() == ViewState::ShowingSummary).then_some(cursor.summary_row);
        let lines: Vec<Line> = SummaryRow::ALL
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let text = format!(" {:<12}{}", row.title(), summary.value(*row));
                if highlight == Some(i) {
                    Line::styled(text, Style::default().add_modifier(Modifier::REVERSED))
                } else {
                    Line::raw(text)
                }
            })
            .collect();

        let rect = centered_rect(ui::SUMMARY_WIDTH, ui::SUMMARY_HEIGHT, dialog_area);
        f.render_widget(Clear, rect);
        f.render_widget(
            Paragraph::new(lines).block(Block::bordered().title(format!(" {} ", titles::SETTINGS))),
            rect,
        );
    }

    if let Some(picker) = model.view().picker() {
        draw_picker(f, model, picker, cursor.picker_item, dialog_area);
    }

    let message = status_message(model.view());
    f.render_widget(StatusBar { message: &message }, status_area);
}

fn draw_picker(f: &mut Frame, model: &AppModel, picker: PickerKind, selected: usize, area: Rect) {
    let items = picker.items(&model.store().snapshot());
    let widest = items.iter().map(|s| s.chars().count()).max().unwrap_or(0) as u16;
    let width = (widest + 6).max(ui::PICKER_MIN_WIDTH);
    let height = items.len() as u16 + 2;

    let list = List::new(items.into_iter().map(ListItem::new))
        .block(Block::bordered().title(format!(" {} ", picker.title())))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(selected));

    let rect = centered_rect(width, height, area);
    f.render_widget(Clear, rect);
    f.render_stateful_widget(list, rect, &mut state);
}

fn status_message(view: ViewState) -> String {
    let hints = match view {
        ViewState::ShowingSummary => "Up/Down move | Enter open | Esc close",
        ViewState::Closed => "",
        _ => "Up/Down move | Enter select | Esc back",
    };
    format!("{} | v{}", hints, app_info::version())
}

/// Rectangle of at most `width` x `height` centered in `area`
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Status bar widget
struct StatusBar<'a> {
    message: &'a str,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        // Fill background
        for x in area.x..area.x + area.width {
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_char(' ');
                cell.set_bg(Color::DarkGray);
            }
        }

        let text: String = self.message.chars().take(area.width as usize).collect();
        buf.set_string(
            area.x,
            area.y,
            text,
            Style::default().fg(Color::White).bg(Color::DarkGray),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::constants::Resolution;
    use crate::service::RecorderServiceHandle;
    use ratatui::backend::TestBackend;

    fn model_with(settings: Settings) -> AppModel {
        let (handle, _rx) = RecorderServiceHandle::channel();
        let mut model = AppModel::new(SettingsStore::in_memory(settings), handle);
        model.update(Message::Activate);
        model
    }

    fn render(model: &AppModel, cursor: &DialogCursor) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        terminal.draw(|f| draw(f, model, cursor)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_summary_renders_current_values() {
        let model = model_with(Settings::default());
        let screen = render(&model, &DialogCursor::default());
        assert!(screen.contains("Settings"));
        assert!(screen.contains("Microphone"));
        assert!(screen.contains("720p"));
        assert!(screen.contains("15 fps"));
    }

    #[test]
    fn test_resolution_picker_renders_landscape_labels() {
        let settings =
            Settings::with_catalog(vec![Resolution::new("720p", 720, 1280)], 0).unwrap();
        let mut model = model_with(settings);
        model.update(Message::OpenResolutionPicker);
        let screen = render(&model, &DialogCursor::default());
        assert!(screen.contains("720p - 1280x720"));
    }

    #[test]
    fn test_keys_drive_audio_selection() {
        let mut model = model_with(Settings::default());
        let mut cursor = DialogCursor::default();

        // Audio row is first; Enter opens its picker
        let msg = handle_key(&model, &mut cursor, press(KeyCode::Enter)).unwrap();
        assert_eq!(msg, Message::OpenAudioPicker);
        let before = model.view();
        model.update(msg);
        cursor.follow(before, &model);
        assert_eq!(cursor.picker_item, 0);

        assert_eq!(handle_key(&model, &mut cursor, press(KeyCode::Down)), None);
        let msg = handle_key(&model, &mut cursor, press(KeyCode::Enter)).unwrap();
        assert_eq!(msg, Message::SelectAudio(1));
        model.update(msg);

        assert_eq!(model.view(), ViewState::ShowingSummary);
        assert_eq!(model.summary().unwrap().audio_text, "Mute");
    }

    #[test]
    fn test_cursor_clamped_to_rows() {
        let model = model_with(Settings::default());
        let mut cursor = DialogCursor::default();
        for _ in 0..10 {
            handle_key(&model, &mut cursor, press(KeyCode::Down));
        }
        assert_eq!(cursor.summary_row, SummaryRow::ALL.len() - 1);
        handle_key(&model, &mut cursor, press(KeyCode::Up));
        assert_eq!(cursor.summary_row, SummaryRow::ALL.len() - 2);
    }

    #[test]
    fn test_escape_closes_picker_then_summary() {
        let mut model = model_with(Settings::default());
        let mut cursor = DialogCursor::default();
        model.update(Message::OpenFrameRatePicker);

        let msg = handle_key(&model, &mut cursor, press(KeyCode::Esc)).unwrap();
        assert_eq!(msg, Message::ClosePicker);
        model.update(msg);

        let msg = handle_key(&model, &mut cursor, press(KeyCode::Esc)).unwrap();
        assert_eq!(msg, Message::DismissSummary);
        model.update(msg);
        assert!(model.is_finished());
    }

    #[test]
    fn test_ctrl_c_dismisses_from_picker() {
        let mut model = model_with(Settings::default());
        model.update(Message::OpenAudioPicker);
        let mut cursor = DialogCursor::default();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            handle_key(&model, &mut cursor, key),
            Some(Message::DismissSummary)
        );
    }

    #[test]
    fn test_focus_lost_finishes_session_from_picker() {
        let (handle, mut rx) = RecorderServiceHandle::channel();
        let mut model = AppModel::new(SettingsStore::in_memory(Settings::default()), handle);
        model.update(Message::Activate);
        model.update(Message::OpenResolutionPicker);
        let mut cursor = DialogCursor::default();

        let msg = handle_event(&model, &mut cursor, Event::FocusLost).unwrap();
        assert_eq!(msg, Message::Deactivate);
        model.update(msg);

        assert!(model.is_finished());
        assert_eq!(model.view(), ViewState::Closed);
        drop(model);
        assert_eq!(crate::service::drain_intents(&mut rx), 1);
    }

    #[test]
    fn test_focus_gained_and_key_release_ignored() {
        let model = model_with(Settings::default());
        let mut cursor = DialogCursor::default();
        assert_eq!(handle_event(&model, &mut cursor, Event::FocusGained), None);

        let mut release = press(KeyCode::Esc);
        release.kind = KeyEventKind::Release;
        assert_eq!(handle_event(&model, &mut cursor, Event::Key(release)), None);
        assert_eq!(
            handle_event(&model, &mut cursor, Event::Key(press(KeyCode::Esc))),
            Some(Message::DismissSummary)
        );
    }

    #[test]
    fn test_centered_rect_fits_small_area() {
        let area = Rect::new(0, 0, 10, 4);
        let rect = centered_rect(40, 8, area);
        assert_eq!(rect, area);
    }
}

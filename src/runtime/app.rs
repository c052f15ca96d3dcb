use std::cell::Cell;
use std::rc::Rc;

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use serde_json::Value;
use tracing::{debug, info};

use super::UiOptions;
use super::terminal::TerminalGuard;
use crate::presentation::choice_column_width;
use crate::selector::{RadioSelector, SelectorEvent};

const HELP_TEXT: &str = "Ctrl+S save • Ctrl+R reset choice • Ctrl+Q quit";
const READY_STATUS: &str = "Ready. Press Ctrl+S to save the checked background.";

pub(crate) struct App {
    selector: RadioSelector,
    title: Option<String>,
    options: UiOptions,
    status: String,
    last_event: Rc<Cell<Option<SelectorEvent>>>,
    dirty: bool,
    exit_armed: bool,
    should_quit: bool,
    result: Option<Value>,
}

impl App {
    /// Takes a mounted selector and listens to its events for the status bar.
    pub(crate) fn new(
        mut selector: RadioSelector,
        title: Option<String>,
        options: UiOptions,
    ) -> Self {
        let last_event = Rc::new(Cell::new(None));
        let seen = Rc::clone(&last_event);
        selector.subscribe(move |event| seen.set(Some(event)));
        Self {
            selector,
            title,
            options,
            status: READY_STATUS.to_string(),
            last_event,
            dirty: false,
            exit_armed: false,
            should_quit: false,
            result: None,
        }
    }

    pub(crate) fn run(mut self) -> Result<Value> {
        let mut terminal = TerminalGuard::enter()?;
        let width = terminal.size()?.width;
        self.resize(width);
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::Resize(width, _) => self.resize(width),
                _ => {}
            }
        }
        self.selector.remove();
        self.result
            .take()
            .ok_or_else(|| anyhow!("user exited without saving"))
    }

    pub(crate) fn selector(&self) -> &RadioSelector {
        &self.selector
    }

    pub(crate) fn status(&self) -> &str {
        &self.status
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub(crate) fn take_result(&mut self) -> Option<Value> {
        self.result.take()
    }

    pub(crate) fn resize(&mut self, width: u16) {
        let choices = choice_column_width(self.selector.choices(), width);
        self.selector
            .set_viewport_width(width.saturating_sub(choices).saturating_sub(2));
        self.selector.reflow();
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s') | KeyCode::Char('S') => return self.on_save(),
                KeyCode::Char('r') | KeyCode::Char('R') => return self.on_reset(),
                KeyCode::Char('q')
                | KeyCode::Char('Q')
                | KeyCode::Char('c')
                | KeyCode::Char('C') => return self.on_exit(),
                _ => {}
            }
        }

        let before = self.selector.get_selected_index();
        if !self.selector.handle_key(&key) {
            return;
        }
        self.exit_armed = false;
        if self.selector.get_selected_index() != before {
            self.selector.reflow();
        }
        self.dirty |= self.report_event();
    }

    fn on_save(&mut self) {
        self.exit_armed = false;
        if self.options.require_value {
            if let Err(err) = self.selector.validate_strict() {
                self.status = err.to_string();
                return;
            }
        } else {
            self.selector.validate();
        }
        let params = self.selector.params().snapshot();
        info!(group = %self.selector.group_id(), "saved params");
        self.status = "Background saved".to_string();
        self.result = Some(params);
        self.should_quit = true;
    }

    fn on_reset(&mut self) {
        self.exit_armed = false;
        self.selector.reset_checked_option();
        if !self.report_event() {
            self.status = "Nothing to reset".to_string();
        } else {
            self.dirty = true;
        }
    }

    fn on_exit(&mut self) {
        if self.options.confirm_exit && self.dirty && !self.exit_armed {
            self.exit_armed = true;
            self.status =
                "Unsaved changes. Press Ctrl+Q again to quit without saving.".to_string();
            return;
        }
        debug!("quitting without saving");
        self.should_quit = true;
        self.result = None;
    }

    /// Turns the latest selector event into a status message.
    fn report_event(&mut self) -> bool {
        match self.last_event.take() {
            Some(SelectorEvent::OptionAdded) => {
                self.status = "Background set".to_string();
                true
            }
            Some(SelectorEvent::OptionRemoved) => {
                self.status = "Background cleared".to_string();
                true
            }
            None => false,
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        let schema = self.selector.schema();
        let title = self.title.as_deref().unwrap_or_else(|| schema.title());
        let footer_height = if self.options.show_help { 2 } else { 1 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(header_height(schema.description.is_some())),
                Constraint::Min(3),
                Constraint::Length(footer_height),
            ])
            .split(frame.area());

        let mut header = vec![Line::from(Span::styled(
            title.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        if let Some(description) = &schema.description {
            header.push(Line::from(Span::styled(
                description.clone(),
                Style::default().fg(Color::Gray),
            )));
        }
        frame.render_widget(
            Paragraph::new(header)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::BOTTOM)),
            chunks[0],
        );

        self.selector.render(frame, chunks[1]);

        let mut footer = vec![Line::from(vec![
            Span::styled(
                if self.dirty { "● " } else { "  " },
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(self.status.clone()),
        ])];
        if self.options.show_help {
            footer.push(Line::from(Span::styled(
                HELP_TEXT,
                Style::default().fg(Color::DarkGray),
            )));
        }
        frame.render_widget(Paragraph::new(footer), chunks[2]);
    }
}

fn header_height(has_description: bool) -> u16 {
    if has_description { 3 } else { 2 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::DefaultProcessor;
    use ratatui::{Terminal, backend::TestBackend};
    use serde_json::json;

    fn app(params: Value, options: UiOptions) -> App {
        let schema = json!({
            "label": "Background",
            "description": "Pick one",
            "fields": [
                {"name": "image", "type": "image", "label": "Image"},
                {"name": "color", "widget": "colorSelector", "label": "Color"}
            ]
        });
        let mut selector = RadioSelector::from_documents(&schema, params, |_, _| {}).unwrap();
        selector.mount(&DefaultProcessor);
        App::new(selector, None, options)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    #[test]
    fn save_returns_pruned_params() {
        let mut app = app(
            json!({"image": {"path": "/img.png"}, "color": "ff0000"}),
            UiOptions::default(),
        );
        assert_eq!(app.selector().get_selected_index(), 1);
        app.handle_key(ctrl('s'));
        assert!(app.should_quit());
        assert_eq!(app.take_result(), Some(json!({"color": "ff0000"})));
    }

    #[test]
    fn strict_save_keeps_running_without_value() {
        let mut app = app(json!({}), UiOptions::default().with_require_value(true));
        app.handle_key(ctrl('s'));
        assert!(!app.should_quit());
        assert!(app.status().contains("no stored option"));
    }

    #[test]
    fn reset_reports_cleared_background() {
        let mut app = app(json!({"image": {"path": "/img.png"}}), UiOptions::default());
        app.handle_key(ctrl('r'));
        assert_eq!(app.status(), "Background cleared");
        assert!(app.selector().get_stored_option().is_none());
        app.handle_key(ctrl('r'));
        assert_eq!(app.status(), "Nothing to reset");
    }

    #[test]
    fn quit_asks_again_after_changes() {
        let mut app = app(json!({"image": {"path": "/img.png"}}), UiOptions::default());
        app.handle_key(press(KeyCode::Down));
        assert_eq!(app.status(), "Background cleared");
        app.handle_key(ctrl('q'));
        assert!(!app.should_quit());
        app.handle_key(ctrl('q'));
        assert!(app.should_quit());
        assert_eq!(app.take_result(), None);
    }

    #[test]
    fn quit_is_immediate_when_untouched() {
        let mut app = app(json!({}), UiOptions::default());
        app.handle_key(ctrl('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn draws_header_selector_and_footer() {
        let app = app(json!({"color": "ff0000"}), UiOptions::default());
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let rows = (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>();
        assert!(rows[0].starts_with("Background"));
        assert!(rows[1].starts_with("Pick one"));
        assert!(rows.iter().any(|row| row.contains("(•) Color")));
        assert!(rows.iter().any(|row| row.contains("Color: #ff0000")));
        assert!(rows[15].contains("Ctrl+S save"));
    }
}

mod choices;
mod fields;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::field::ChildField;
use crate::options::SelectorHints;
use crate::selector::{OptionKind, StoredOption};

pub use choices::{ChoiceList, Focus};
pub(crate) use choices::{choice_column_width, choice_lines};
pub(crate) use fields::field_lines;

pub(crate) struct SelectorView<'a> {
    pub title: &'a str,
    pub choices: &'a ChoiceList,
    pub children: &'a [ChildField],
    pub stored: Option<&'a StoredOption>,
    pub hints: &'a SelectorHints,
}

pub(crate) fn render_selector(frame: &mut Frame<'_>, area: Rect, view: SelectorView<'_>) {
    let column = choice_column_width(view.choices, area.width);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(column), Constraint::Min(1)])
        .split(area);

    let focused = view.choices.focus();
    let choices_border = border_style(focused == Focus::Choices);
    let choices = Paragraph::new(choice_lines(view.choices)).block(
        Block::default()
            .title(view.title.to_string())
            .borders(Borders::ALL)
            .border_style(choices_border),
    );
    frame.render_widget(choices, chunks[0]);

    let Some(child) = view.children.get(view.choices.visible()) else {
        let placeholder = Block::default().borders(Borders::ALL);
        frame.render_widget(placeholder, chunks[1]);
        return;
    };

    let inner_width = chunks[1].width.saturating_sub(2) as usize;
    let mut lines = field_lines(child, view.hints, inner_width, focused == Focus::Field);
    lines.push(Line::default());
    lines.push(stored_line(view.stored));
    let hint = match focused {
        Focus::Choices => view.hints.choices_focused.as_ref(),
        Focus::Field => view.hints.field_focused.as_ref(),
    };
    lines.push(Line::from(Span::styled(
        hint.to_string(),
        Style::default().fg(Color::DarkGray),
    )));

    let area_block = Block::default()
        .title(child.label().to_string())
        .borders(Borders::ALL)
        .border_style(border_style(focused == Focus::Field));
    frame.render_widget(Paragraph::new(lines).block(area_block), chunks[1]);
}

pub(crate) fn stored_line(stored: Option<&StoredOption>) -> Line<'static> {
    let label = Span::styled("Saved: ", Style::default().fg(Color::Gray));
    match stored {
        Some(option) => {
            let kind = match option.kind {
                OptionKind::Image => "image",
                OptionKind::Color => "color",
            };
            Line::from(vec![
                label,
                Span::styled(
                    format!("{kind} {}", option.value),
                    Style::default().fg(Color::Green),
                ),
            ])
        }
        None => Line::from(vec![
            label,
            Span::styled("nothing", Style::default().fg(Color::DarkGray)),
        ]),
    }
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

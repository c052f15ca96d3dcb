use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

use crate::selector::GroupId;

const CHECKED_MARKER: &str = "(•) ";
const UNCHECKED_MARKER: &str = "( ) ";
/// Marker plus the block borders around the column.
const COLUMN_CHROME: usize = 4 + 2;
const MIN_COLUMN_WIDTH: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Choices,
    Field,
}

/// Exclusive choices, one per child field. Exactly one is checked and exactly
/// one field area is visible.
#[derive(Debug, Clone)]
pub struct ChoiceList {
    group: GroupId,
    labels: Vec<String>,
    checked: usize,
    visible: usize,
    focus: Focus,
}

impl ChoiceList {
    pub fn new(group: GroupId, labels: Vec<String>, checked: usize) -> Self {
        Self {
            group,
            labels,
            checked,
            visible: checked,
            focus: Focus::Choices,
        }
    }

    pub fn group(&self) -> GroupId {
        self.group
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn checked(&self) -> usize {
        self.checked
    }

    pub fn is_checked(&self, index: usize) -> bool {
        !self.labels.is_empty() && self.checked == index
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Returns `false` when the choice is already checked or does not exist.
    pub(crate) fn check(&mut self, index: usize) -> bool {
        if index >= self.labels.len() || self.checked == index {
            return false;
        }
        self.checked = index;
        true
    }

    pub(crate) fn show(&mut self, index: usize) -> bool {
        if index >= self.labels.len() {
            return false;
        }
        self.visible = index;
        true
    }

    pub(crate) fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    pub(crate) fn neighbour(&self, delta: i32) -> Option<usize> {
        if self.labels.is_empty() {
            return None;
        }
        let len = self.labels.len() as i64;
        let next = (self.checked as i64 + delta as i64).rem_euclid(len);
        Some(next as usize)
    }
}

pub(crate) fn choice_lines(choices: &ChoiceList) -> Vec<Line<'static>> {
    let focused = choices.focus() == Focus::Choices;
    choices
        .labels()
        .iter()
        .enumerate()
        .map(|(idx, label)| {
            let checked = choices.is_checked(idx);
            let marker = if checked {
                CHECKED_MARKER
            } else {
                UNCHECKED_MARKER
            };
            let style = match (checked, focused) {
                (true, true) => Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                (true, false) => Style::default().fg(Color::Yellow),
                _ => Style::default().fg(Color::Gray),
            };
            Line::from(vec![
                Span::styled(marker.to_string(), style),
                Span::styled(label.clone(), style),
            ])
        })
        .collect()
}

pub(crate) fn choice_column_width(choices: &ChoiceList, available: u16) -> u16 {
    let widest = choices
        .labels()
        .iter()
        .map(|label| UnicodeWidthStr::width(label.as_str()))
        .max()
        .unwrap_or(0);
    let wanted = (widest + COLUMN_CHROME).max(MIN_COLUMN_WIDTH);
    let cap = (available as usize) / 2;
    wanted.min(cap.max(MIN_COLUMN_WIDTH)).min(available as usize) as u16
}

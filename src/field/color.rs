use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crossterm::event::{KeyCode, KeyEvent};
use regex::Regex;
use serde_json::Value;

use super::{FieldSignal, HasClearable, HasColorSync, HasReflow, HasValueNotifications, SignalSink};
use crate::error::SelectorError;
use crate::params::ParamsHandle;

const SWATCH_WIDTH: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Hex digits without the leading `#`, the form color params are saved in.
    pub fn to_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_hex_string(self) -> String {
        format!("#{}", self.to_hex())
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

fn hex_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^#?([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("hex color pattern is valid")
    })
}

impl FromStr for Rgb {
    type Err = SelectorError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let digits = hex_pattern()
            .captures(trimmed)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| SelectorError::InvalidColor(input.to_string()))?;
        let expanded: String = if digits.len() == 3 {
            digits.chars().flat_map(|ch| [ch, ch]).collect()
        } else {
            digits.to_string()
        };
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&expanded[range], 16)
                .map_err(|_| SelectorError::InvalidColor(input.to_string()))
        };
        Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

pub fn default_palette() -> Vec<Rgb> {
    vec![
        Rgb::new(0xff, 0xff, 0xff),
        Rgb::new(0x00, 0x00, 0x00),
        Rgb::new(0xff, 0x00, 0x00),
        Rgb::new(0xff, 0x99, 0x00),
        Rgb::new(0xff, 0xee, 0x00),
        Rgb::new(0x33, 0xcc, 0x33),
        Rgb::new(0x00, 0x99, 0xff),
        Rgb::new(0x66, 0x33, 0xcc),
        Rgb::new(0xcc, 0x33, 0x99),
        Rgb::new(0x99, 0x99, 0x99),
    ]
}

/// Inline color picker. Live changes fire "move" signals; the picker never
/// writes its value into params on its own, see [`HasColorSync`].
#[derive(Debug, Clone)]
pub struct ColorField {
    name: Option<String>,
    label: String,
    description: Option<String>,
    params: ParamsHandle,
    picker: Option<Rgb>,
    palette: Vec<Rgb>,
    cursor: Option<usize>,
    moves: Vec<SignalSink>,
    viewport_width: u16,
    columns: usize,
}

impl ColorField {
    pub fn new(
        name: Option<String>,
        label: impl Into<String>,
        params: ParamsHandle,
        palette: Vec<Rgb>,
    ) -> Self {
        let picker = name
            .as_deref()
            .and_then(|key| params.get(key))
            .and_then(|value| value.as_str().and_then(|text| text.parse::<Rgb>().ok()));
        let cursor = picker.and_then(|color| palette.iter().position(|swatch| *swatch == color));
        let columns = palette.len().max(1);
        Self {
            name,
            label: label.into(),
            description: None,
            params,
            picker,
            palette,
            cursor,
            moves: Vec::new(),
            viewport_width: 0,
            columns,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn params(&self) -> Option<Value> {
        self.name.as_deref().and_then(|key| self.params.get(key))
    }

    /// Current picker value.
    pub fn color(&self) -> Option<Rgb> {
        self.picker
    }

    pub fn palette(&self) -> &[Rgb] {
        &self.palette
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Live change from the picker; fires a move signal to every subscriber.
    pub fn pick(&mut self, color: Option<Rgb>) {
        self.picker = color;
        self.cursor = color.and_then(|color| self.palette.iter().position(|swatch| *swatch == color));
        for sink in &self.moves {
            sink.emit(FieldSignal::ColorMove(color));
        }
    }

    /// Replace the picker value without firing a move signal.
    pub fn set_picker(&mut self, color: Option<Rgb>) {
        self.picker = color;
        self.cursor = color.and_then(|color| self.palette.iter().position(|swatch| *swatch == color));
    }

    /// Persist a color into this field's params. `None` saves an empty string.
    pub fn set_color(&mut self, color: Option<Rgb>) {
        let Some(key) = self.name.as_deref() else {
            return;
        };
        let saved = color.map(Rgb::to_hex).unwrap_or_default();
        self.params.insert(key, Value::String(saved));
    }

    pub fn set_viewport_width(&mut self, width: u16) {
        self.viewport_width = width;
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if self.palette.is_empty() {
            return false;
        }
        let last = self.palette.len() - 1;
        let row = self.columns.max(1);
        let next = match key.code {
            KeyCode::Left => Some(self.cursor.map_or(last, |idx| if idx == 0 { last } else { idx - 1 })),
            KeyCode::Right => Some(self.cursor.map_or(0, |idx| if idx >= last { 0 } else { idx + 1 })),
            KeyCode::Up => Some(self.cursor.map_or(0, |idx| idx.saturating_sub(row))),
            KeyCode::Down => Some(self.cursor.map_or(0, |idx| (idx + row).min(last))),
            KeyCode::Delete | KeyCode::Backspace => {
                if self.picker.is_none() {
                    return false;
                }
                self.pick(None);
                return true;
            }
            _ => None,
        };
        match next {
            Some(idx) => {
                let color = self.palette[idx];
                self.pick(Some(color));
                true
            }
            None => false,
        }
    }
}

impl HasValueNotifications for ColorField {
    fn subscribe(&mut self, sink: SignalSink) {
        self.moves.push(sink);
    }
}

impl HasClearable for ColorField {
    fn clear(&mut self) {
        self.set_picker(None);
    }
}

impl HasReflow for ColorField {
    fn reflow(&mut self) {
        let fitting = (self.viewport_width / SWATCH_WIDTH) as usize;
        self.columns = if fitting == 0 {
            self.palette.len().max(1)
        } else {
            fitting.min(self.palette.len().max(1))
        };
    }
}

impl HasColorSync for ColorField {
    fn sync_color(&mut self) {
        let color = self.picker;
        self.set_color(color);
    }
}

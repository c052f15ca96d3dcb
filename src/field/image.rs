use std::sync::OnceLock;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{FieldSignal, HasClearable, HasValueNotifications, SignalSink};
use crate::params::ParamsHandle;

const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

fn scheme_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.\-]*://").expect("url scheme pattern is valid")
    })
}

/// Turns stored file paths into the values the host displays and saves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathResolver {
    base: Option<String>,
}

impl PathResolver {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: if base.is_empty() { None } else { Some(base) },
        }
    }

    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    pub fn resolve(&self, path: &str) -> String {
        if scheme_pattern().is_match(path) {
            return path.to_string();
        }
        let Some(base) = self.base.as_deref() else {
            return path.to_string();
        };
        let encoded = path
            .trim_start_matches('/')
            .split('/')
            .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/");
        format!("{}/{}", base.trim_end_matches('/'), encoded)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePayload {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
}

impl FilePayload {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mime: None,
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }
}

/// File upload field. Every attach or removal is announced to the change
/// subscribers; removal deletes the field's params entry.
#[derive(Debug, Clone)]
pub struct ImageField {
    name: Option<String>,
    label: String,
    description: Option<String>,
    params: ParamsHandle,
    changes: Vec<SignalSink>,
    draft: String,
}

impl ImageField {
    pub fn new(name: Option<String>, label: impl Into<String>, params: ParamsHandle) -> Self {
        Self {
            name,
            label: label.into(),
            description: None,
            params,
            changes: Vec::new(),
            draft: String::new(),
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

    pub fn file(&self) -> Option<FilePayload> {
        self.params()
            .and_then(|value| serde_json::from_value::<FilePayload>(value).ok())
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn upload(&mut self, file: FilePayload) {
        if let Some(key) = self.name.as_deref()
            && let Ok(value) = serde_json::to_value(&file)
        {
            self.params.insert(key, value);
        }
        self.notify(Some(file));
    }

    /// Same path as the field's own remove control.
    pub fn remove_file(&mut self) {
        if let Some(key) = self.name.as_deref() {
            self.params.remove(key);
        }
        self.notify(None);
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return false;
                }
                self.draft.push(ch);
                true
            }
            KeyCode::Backspace => self.draft.pop().is_some(),
            KeyCode::Enter => {
                let path = self.draft.trim().to_string();
                if path.is_empty() {
                    return false;
                }
                self.draft.clear();
                self.upload(FilePayload::new(path));
                true
            }
            KeyCode::Delete => {
                if self.file().is_none() {
                    return false;
                }
                self.remove_file();
                true
            }
            _ => false,
        }
    }

    fn notify(&self, file: Option<FilePayload>) {
        for sink in &self.changes {
            sink.emit(FieldSignal::File(file.clone()));
        }
    }
}

impl HasValueNotifications for ImageField {
    fn subscribe(&mut self, sink: SignalSink) {
        self.changes.push(sink);
    }
}

impl HasClearable for ImageField {
    fn clear(&mut self) {
        self.remove_file();
    }
}

use std::borrow::Cow;

use crate::field::{PathResolver, Rgb, default_palette};

/// Copy shown next to the choices and inside field areas.
#[derive(Debug, Clone)]
pub struct SelectorHints {
    pub choices_focused: Cow<'static, str>,
    pub field_focused: Cow<'static, str>,
    pub empty_image: Cow<'static, str>,
    pub empty_color: Cow<'static, str>,
}

impl SelectorHints {
    pub fn with_choices_hint(mut self, hint: impl Into<Cow<'static, str>>) -> Self {
        self.choices_focused = hint.into();
        self
    }

    pub fn with_field_hint(mut self, hint: impl Into<Cow<'static, str>>) -> Self {
        self.field_focused = hint.into();
        self
    }
}

impl Default for SelectorHints {
    fn default() -> Self {
        Self {
            choices_focused: Cow::Borrowed("↑/↓ choose • Enter edit"),
            field_focused: Cow::Borrowed("Esc back to choices • Del clear"),
            empty_image: Cow::Borrowed("No image selected. Type a path and press Enter."),
            empty_color: Cow::Borrowed("No color selected. Use ←/→ to pick one."),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SelectorOptions {
    pub palette: Vec<Rgb>,
    pub resolver: PathResolver,
    pub hints: SelectorHints,
}

impl Default for SelectorOptions {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            resolver: PathResolver::default(),
            hints: SelectorHints::default(),
        }
    }
}

impl SelectorOptions {
    pub fn with_palette(mut self, palette: Vec<Rgb>) -> Self {
        self.palette = palette;
        self
    }

    /// Base URL relative image paths are resolved against.
    pub fn with_content_base(mut self, base: impl Into<String>) -> Self {
        self.resolver = PathResolver::new(base);
        self
    }

    pub fn with_hints(mut self, hints: SelectorHints) -> Self {
        self.hints = hints;
        self
    }
}

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;

use crate::field::{ChildField, ColorField, ImageField, PlainField};
use crate::options::SelectorHints;

const CURSOR: &str = "▏";

pub(crate) fn field_lines(
    child: &ChildField,
    hints: &SelectorHints,
    width: usize,
    focused: bool,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(description) = child.description() {
        let muted = Style::default().fg(Color::DarkGray);
        for chunk in wrap(description, width.max(1)) {
            lines.push(Line::from(Span::styled(chunk.into_owned(), muted)));
        }
        lines.push(Line::default());
    }
    match child {
        ChildField::Image(field) => image_lines(field, hints, focused, &mut lines),
        ChildField::Color(field) => color_lines(field, hints, &mut lines),
        ChildField::Plain(field) => plain_lines(field, focused, &mut lines),
    }
    lines
}

fn image_lines(
    field: &ImageField,
    hints: &SelectorHints,
    focused: bool,
    lines: &mut Vec<Line<'static>>,
) {
    match field.file() {
        Some(file) => lines.push(Line::from(vec![
            Span::styled("File: ", Style::default().fg(Color::Gray)),
            Span::raw(file.path),
        ])),
        None => lines.push(Line::from(Span::raw(hints.empty_image.to_string()))),
    }
    let mut path = vec![
        Span::styled("Path: ", Style::default().fg(Color::Gray)),
        Span::raw(field.draft().to_string()),
    ];
    if focused {
        path.push(Span::styled(CURSOR, Style::default().fg(Color::Yellow)));
    }
    lines.push(Line::from(path));
}

fn color_lines(field: &ColorField, hints: &SelectorHints, lines: &mut Vec<Line<'static>>) {
    match field.color() {
        Some(color) => lines.push(Line::from(vec![
            Span::styled("Color: ", Style::default().fg(Color::Gray)),
            Span::styled(
                color.to_hex_string(),
                Style::default().fg(Color::Rgb(color.r, color.g, color.b)),
            ),
        ])),
        None => lines.push(Line::from(Span::raw(hints.empty_color.to_string()))),
    }
    let columns = field.columns().max(1);
    for (row, swatches) in field.palette().chunks(columns).enumerate() {
        let spans = swatches
            .iter()
            .enumerate()
            .flat_map(|(offset, swatch)| {
                let selected = field.cursor() == Some(row * columns + offset);
                let face = if selected { " ● " } else { "   " };
                let style = Style::default()
                    .bg(Color::Rgb(swatch.r, swatch.g, swatch.b))
                    .fg(contrast(swatch.r, swatch.g, swatch.b))
                    .add_modifier(Modifier::BOLD);
                [Span::styled(face, style), Span::raw(" ")]
            })
            .collect::<Vec<_>>();
        lines.push(Line::from(spans));
    }
}

fn plain_lines(field: &PlainField, focused: bool, lines: &mut Vec<Line<'static>>) {
    let mut spans = vec![
        Span::styled("Value: ", Style::default().fg(Color::Gray)),
        Span::raw(field.text().to_string()),
    ];
    if focused {
        spans.push(Span::styled(CURSOR, Style::default().fg(Color::Yellow)));
    }
    lines.push(Line::from(spans));
}

fn contrast(r: u8, g: u8, b: u8) -> Color {
    let luma = 299 * r as u32 + 587 * g as u32 + 114 * b as u32;
    if luma > 128_000 {
        Color::Black
    } else {
        Color::White
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FilePayload, Rgb, default_palette};
    use crate::params::ParamsHandle;
    use serde_json::json;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn image_area_shows_attached_file() {
        let params = ParamsHandle::default();
        let mut field = ImageField::new(Some("image".into()), "Image", params);
        field.upload(FilePayload::new("/img.png"));
        let lines = field_lines(&ChildField::Image(field), &SelectorHints::default(), 40, true);
        assert_eq!(text(&lines[0]), "File: /img.png");
        assert_eq!(text(&lines[1]), format!("Path: {CURSOR}"));
    }

    #[test]
    fn color_area_marks_cursor_swatch() {
        let params = ParamsHandle::from_value(json!({"color": "000000"}));
        let field = ColorField::new(Some("color".into()), "Color", params, default_palette());
        let lines = field_lines(&ChildField::Color(field), &SelectorHints::default(), 40, false);
        assert_eq!(text(&lines[0]), "Color: #000000");
        assert!(text(&lines[1]).starts_with("     ● "));
    }

    #[test]
    fn descriptions_wrap_to_width() {
        let params = ParamsHandle::default();
        let field = ColorField::new(None, "Color", params, vec![Rgb::new(1, 2, 3)])
            .with_description(Some("pick the backdrop colour".into()));
        let lines = field_lines(&ChildField::Color(field), &SelectorHints::default(), 10, false);
        assert_eq!(text(&lines[0]), "pick the");
        assert_eq!(text(&lines[1]), "backdrop");
        assert_eq!(text(&lines[2]), "colour");
        assert_eq!(text(&lines[3]), "");
    }

    #[test]
    fn contrast_flips_on_light_swatches() {
        assert_eq!(contrast(0xff, 0xff, 0xff), Color::Black);
        assert_eq!(contrast(0, 0, 0), Color::White);
    }
}

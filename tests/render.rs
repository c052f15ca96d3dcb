use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};
use radio_selector::{DefaultProcessor, RadioSelector};
use serde_json::json;

fn rows(terminal: &Terminal<TestBackend>) -> Vec<String> {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        })
        .collect()
}

fn selector(params: serde_json::Value) -> RadioSelector {
    let schema = json!({
        "label": "Background",
        "fields": [
            {"name": "image", "type": "image", "label": "Image",
             "description": "Shown behind the slide"},
            {"name": "color", "widget": "colorSelector", "label": "Color"}
        ]
    });
    let mut selector = RadioSelector::from_documents(&schema, params, |_, _| {}).unwrap();
    selector.mount(&DefaultProcessor);
    selector
}

#[test]
fn renders_checked_choice_and_its_field_area() {
    let selector = selector(json!({"image": {"path": "/img.png"}}));
    let mut terminal = Terminal::new(TestBackend::new(64, 12)).unwrap();
    terminal
        .draw(|frame| selector.render(frame, frame.area()))
        .unwrap();
    let rows = rows(&terminal);

    assert!(rows[0].contains("Background"));
    assert!(rows[0].contains("Image"));
    assert!(rows[1].contains("(•) Image"));
    assert!(rows[2].contains("( ) Color"));
    assert!(rows[1].contains("Shown behind the slide"));
    assert!(rows.iter().any(|row| row.contains("File: /img.png")));
    assert!(rows.iter().any(|row| row.contains("Saved: image /img.png")));
}

#[test]
fn switching_choice_shows_only_the_new_field_area() {
    let mut selector = selector(json!({}));
    selector.handle_key(&KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
    let mut terminal = Terminal::new(TestBackend::new(64, 12)).unwrap();
    terminal
        .draw(|frame| selector.render(frame, frame.area()))
        .unwrap();
    let rows = rows(&terminal);

    assert!(rows[1].contains("( ) Image"));
    assert!(rows[2].contains("(•) Color"));
    assert!(rows.iter().any(|row| row.contains("No color selected")));
    assert!(!rows.iter().any(|row| row.contains("Path:")));
    assert!(rows.iter().any(|row| row.contains("Saved: nothing")));
}

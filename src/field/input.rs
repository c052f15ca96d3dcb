use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub(crate) fn handle_text_edit(buffer: &mut String, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return false;
            }
            buffer.push(ch);
            true
        }
        KeyCode::Backspace => buffer.pop().is_some(),
        KeyCode::Delete => {
            if buffer.is_empty() {
                return false;
            }
            buffer.clear();
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_control_characters() {
        let mut buffer = String::new();
        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert!(!handle_text_edit(&mut buffer, &ctrl_a));
        assert_eq!(buffer, "");
    }

    #[test]
    fn backspace_on_empty_buffer_is_not_an_edit() {
        let mut buffer = String::new();
        let backspace = KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE);
        assert!(!handle_text_edit(&mut buffer, &backspace));
    }
}

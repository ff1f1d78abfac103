use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::chat_view::is_text_input_mods;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    Quit,
    Submit,
    Insert(char),
    Backspace,
    ScrollUp,
    ScrollDown,
    DismissBanner,
}

pub fn map_key(key: KeyEvent) -> Option<ChatAction> {
    match key.code {
        KeyCode::Esc => Some(ChatAction::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(ChatAction::Quit)
        }
        KeyCode::Enter => Some(ChatAction::Submit),
        KeyCode::Backspace => Some(ChatAction::Backspace),
        KeyCode::PageUp => Some(ChatAction::ScrollUp),
        KeyCode::PageDown => Some(ChatAction::ScrollDown),
        KeyCode::F(5) => Some(ChatAction::DismissBanner),
        KeyCode::Char(c) if is_text_input_mods(key.modifiers) => Some(ChatAction::Insert(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::{map_key, ChatAction};

    fn key(code: KeyCode, mods: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, mods)
    }

    #[test]
    fn plain_and_shifted_chars_are_text_input() {
        assert_eq!(
            map_key(key(KeyCode::Char('a'), KeyModifiers::empty())),
            Some(ChatAction::Insert('a'))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(ChatAction::Insert('A'))
        );
    }

    #[test]
    fn ctrl_c_and_esc_quit() {
        assert_eq!(
            map_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(ChatAction::Quit)
        );
        assert_eq!(
            map_key(key(KeyCode::Esc, KeyModifiers::empty())),
            Some(ChatAction::Quit)
        );
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        assert_eq!(map_key(key(KeyCode::Tab, KeyModifiers::empty())), None);
        assert_eq!(
            map_key(key(KeyCode::Char('x'), KeyModifiers::ALT)),
            None
        );
    }
}

//! Terminal events to chat actions

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEventKind};

/// Change to the text being typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    /// Ctrl+U
    ClearLine,
    /// Ctrl+W
    DeleteWord,
    /// Bracketed paste
    Paste(String),
}

/// Movement through the transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scroll {
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    WheelUp,
    WheelDown,
}

/// What one terminal event asks the chat screen to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Edit(Edit),
    Scroll(Scroll),
    /// Enter
    Submit,
    /// Ctrl+C, Ctrl+D or Ctrl+Q
    Quit,
    /// Anything the chat screen has no use for
    Ignored,
}

/// Map a key press
pub fn key_to_action(event: KeyEvent) -> Action {
    let KeyEvent {
        code, modifiers, ..
    } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c' | 'd' | 'q') => Action::Quit,
            KeyCode::Char('u') => Action::Edit(Edit::ClearLine),
            KeyCode::Char('w') => Action::Edit(Edit::DeleteWord),
            _ => Action::Ignored,
        };
    }

    if modifiers.contains(KeyModifiers::ALT) {
        return Action::Ignored;
    }

    let edit = match code {
        KeyCode::Enter => return Action::Submit,
        KeyCode::Up => return Action::Scroll(Scroll::LineUp),
        KeyCode::Down => return Action::Scroll(Scroll::LineDown),
        KeyCode::PageUp => return Action::Scroll(Scroll::PageUp),
        KeyCode::PageDown => return Action::Scroll(Scroll::PageDown),
        KeyCode::Char(c) => Edit::Insert(c),
        KeyCode::Backspace => Edit::Backspace,
        KeyCode::Delete => Edit::Delete,
        KeyCode::Left => Edit::Left,
        KeyCode::Right => Edit::Right,
        KeyCode::Home => Edit::Home,
        KeyCode::End => Edit::End,
        _ => return Action::Ignored,
    };
    Action::Edit(edit)
}

/// Map any terminal event; `None` for events that are not input (resize, focus)
pub fn event_to_action(event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => Some(key_to_action(key)),
        Event::Paste(text) => Some(Action::Edit(Edit::Paste(text))),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::Scroll(Scroll::WheelUp)),
            MouseEventKind::ScrollDown => Some(Action::Scroll(Scroll::WheelDown)),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::MouseEvent;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Action {
        key_to_action(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_quit_chords() {
        for c in ['c', 'd', 'q'] {
            assert_eq!(press(KeyCode::Char(c), KeyModifiers::CONTROL), Action::Quit);
        }
    }

    #[test]
    fn test_enter_submits() {
        assert_eq!(press(KeyCode::Enter, KeyModifiers::NONE), Action::Submit);
    }

    #[test]
    fn test_typing_is_edit() {
        assert_eq!(
            press(KeyCode::Char('A'), KeyModifiers::SHIFT),
            Action::Edit(Edit::Insert('A'))
        );
        assert_eq!(
            press(KeyCode::Char('w'), KeyModifiers::CONTROL),
            Action::Edit(Edit::DeleteWord)
        );
    }

    #[test]
    fn test_arrows_split_between_edit_and_scroll() {
        assert_eq!(press(KeyCode::Left, KeyModifiers::NONE), Action::Edit(Edit::Left));
        assert_eq!(
            press(KeyCode::Up, KeyModifiers::NONE),
            Action::Scroll(Scroll::LineUp)
        );
        assert_eq!(
            press(KeyCode::PageDown, KeyModifiers::NONE),
            Action::Scroll(Scroll::PageDown)
        );
    }

    #[test]
    fn test_alt_is_ignored() {
        assert_eq!(press(KeyCode::Char('x'), KeyModifiers::ALT), Action::Ignored);
    }

    #[test]
    fn test_paste_and_wheel() {
        assert_eq!(
            event_to_action(Event::Paste("VAR".into())),
            Some(Action::Edit(Edit::Paste("VAR".into())))
        );

        let wheel = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            event_to_action(Event::Mouse(wheel)),
            Some(Action::Scroll(Scroll::WheelDown))
        );
        assert_eq!(event_to_action(Event::FocusGained), None);
    }
}

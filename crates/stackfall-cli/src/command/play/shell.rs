use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::DefaultTerminal;
use stackfall_engine::{Game, InputEvent, Shell};

use crate::view::SceneDisplay;

/// [`Shell`] backed by the terminal: ratatui for drawing, crossterm for keys.
pub(super) struct TerminalShell<'t> {
    terminal: &'t mut DefaultTerminal,
    clock: Instant,
    quit_requested: bool,
}

impl<'t> TerminalShell<'t> {
    pub(super) fn new(terminal: &'t mut DefaultTerminal) -> Self {
        Self {
            terminal,
            clock: Instant::now(),
            quit_requested: false,
        }
    }

    pub(super) fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}

impl Shell for TerminalShell<'_> {
    type Error = anyhow::Error;

    fn draw(&mut self, game: &Game) -> Result<(), Self::Error> {
        self.terminal
            .draw(|frame| frame.render_widget(SceneDisplay::new(game), frame.area()))?;
        Ok(())
    }

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        while event::poll(Duration::ZERO)? {
            if let Some(input) = input_event(&event::read()?) {
                return Ok(Some(input));
            }
        }
        Ok(None)
    }

    fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    fn reset_clock(&mut self) {
        self.clock = Instant::now();
    }

    fn request_quit(&mut self) {
        self.quit_requested = true;
    }
}

/// Translates a terminal event into a game input. Unbound keys yield `None`.
fn input_event(event: &Event) -> Option<InputEvent> {
    let key = event.as_key_press_event()?;
    let input = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputEvent::Quit,
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => InputEvent::Quit,
        KeyCode::Left => InputEvent::MoveLeft,
        KeyCode::Right => InputEvent::MoveRight,
        KeyCode::Down => InputEvent::SoftDrop,
        KeyCode::Up | KeyCode::Char('z' | 'Z') => InputEvent::Rotate,
        KeyCode::Char('x' | 'X' | ' ') => InputEvent::HardDrop,
        _ => return None,
    };
    Some(input)
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyEventKind};

    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_key_bindings() {
        let cases = [
            (KeyCode::Left, Some(InputEvent::MoveLeft)),
            (KeyCode::Right, Some(InputEvent::MoveRight)),
            (KeyCode::Down, Some(InputEvent::SoftDrop)),
            (KeyCode::Up, Some(InputEvent::Rotate)),
            (KeyCode::Char('z'), Some(InputEvent::Rotate)),
            (KeyCode::Char('x'), Some(InputEvent::HardDrop)),
            (KeyCode::Char(' '), Some(InputEvent::HardDrop)),
            (KeyCode::Esc, Some(InputEvent::Quit)),
            (KeyCode::Char('q'), Some(InputEvent::Quit)),
            (KeyCode::Char('c'), None),
            (KeyCode::Enter, None),
        ];
        for (code, expected) in cases {
            assert_eq!(input_event(&press(code)), expected, "{code:?}");
        }
    }

    #[test]
    fn test_ctrl_c_quits() {
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(input_event(&event), Some(InputEvent::Quit));
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut key = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(input_event(&Event::Key(key)), None);
    }
}

use crate::{
    REFRESH_RATE,
    key_handler::*,
    ui_state::{Mode, UiState},
};
use anyhow::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent};

use KeyCode::*;

pub fn handle_key_event(key_event: KeyEvent, state: &UiState) -> Option<Action> {
    if let Some(action) = global_commands(&key_event) {
        return Some(action);
    }

    match state.get_input_context() {
        InputContext::Popup => handle_popup(&key_event),
        InputContext::EpisodeList => handle_episode_list(&key_event),
        InputContext::Detail => handle_detail(&key_event),
    }
}

fn global_commands(key: &KeyEvent) -> Option<Action> {
    match (key.modifiers, key.code) {
        (C, Char('c')) | (X, Char('q')) => Some(Action::QUIT),
        (X, Esc) => Some(Action::SoftReset),

        // TRANSPORT — available from every view, player bar is persistent
        (X, Char(' ')) => Some(Action::TogglePause),
        (X, Char('n')) => Some(Action::PlayNext),
        (X, Char('p')) => Some(Action::PlayPrev),
        (X, Char('r')) => Some(Action::ToggleLoop),
        (X, Char('s')) => Some(Action::ToggleShuffle),
        (X, Char('x')) => Some(Action::ClearPlayer),

        (X, Right) => Some(Action::SeekForward(SEEK_SMALL)),
        (S, Right) => Some(Action::SeekForward(SEEK_LARGE)),
        (X, Left) => Some(Action::SeekBack(SEEK_SMALL)),
        (S, Left) => Some(Action::SeekBack(SEEK_LARGE)),

        (C, Char('u')) | (X, F(5)) => Some(Action::Refresh),

        _ => None,
    }
}

fn handle_episode_list(key: &KeyEvent) -> Option<Action> {
    match (key.modifiers, key.code) {
        (X, Enter) => Some(Action::PlaySelected),
        (X, Tab) | (X, Char('l')) => Some(Action::OpenDetail),

        // SCROLLING
        (X, Char('j')) | (X, Down) => Some(Action::Scroll(Director::Down(1))),
        (X, Char('k')) | (X, Up) => Some(Action::Scroll(Director::Up(1))),
        (X, Char('d')) => Some(Action::Scroll(Director::Down(SCROLL_MID))),
        (X, Char('u')) => Some(Action::Scroll(Director::Up(SCROLL_MID))),
        (X, Char('g')) => Some(Action::Scroll(Director::Top)),
        (S, Char('G')) => Some(Action::Scroll(Director::Bottom)),

        _ => None,
    }
}

fn handle_detail(key: &KeyEvent) -> Option<Action> {
    match (key.modifiers, key.code) {
        (X, Enter) | (X, Char('o')) => Some(Action::PlayDetail),
        (X, Tab) | (X, Char('h')) | (X, Backspace) => Some(Action::CloseDetail),
        _ => None,
    }
}

fn handle_popup(key: &KeyEvent) -> Option<Action> {
    match key.code {
        Esc | Enter => Some(Action::ClosePopup),
        _ => None,
    }
}

impl UiState {
    pub fn get_input_context(&self) -> InputContext {
        if self.popup.is_open() {
            return InputContext::Popup;
        }

        match self.get_mode() {
            Mode::Detail => InputContext::Detail,
            _ => InputContext::EpisodeList,
        }
    }
}

pub fn next_event() -> Result<Option<Event>> {
    match event::poll(REFRESH_RATE)? {
        true => Ok(Some(event::read()?)),
        false => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyEvent;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, X)
    }

    #[test]
    fn transport_keys_work_from_the_list() {
        let state = UiState::new();
        assert_eq!(
            handle_key_event(press(Char(' ')), &state),
            Some(Action::TogglePause)
        );
        assert_eq!(
            handle_key_event(press(Char('n')), &state),
            Some(Action::PlayNext)
        );
        assert_eq!(
            handle_key_event(press(Right), &state),
            Some(Action::SeekForward(SEEK_SMALL))
        );
    }

    #[test]
    fn enter_depends_on_the_active_view() {
        let mut state = UiState::new();
        assert_eq!(
            handle_key_event(press(Enter), &state),
            Some(Action::PlaySelected)
        );

        state.set_mode(Mode::Detail);
        assert_eq!(
            handle_key_event(press(Enter), &state),
            Some(Action::PlayDetail)
        );
    }

    #[test]
    fn popup_swallows_view_keys() {
        let mut state = UiState::new();
        state.set_error(anyhow::anyhow!("boom"));

        assert_eq!(handle_key_event(press(Enter), &state), Some(Action::ClosePopup));
        assert_eq!(handle_key_event(press(Char('j')), &state), None);
    }
}

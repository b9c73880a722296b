use super::{Mode, UiState};
use crate::{domain::Episode, key_handler::Director};
use anyhow::{Result, anyhow};
use ratatui::widgets::TableState;
use std::sync::Arc;

pub struct DisplayState {
    mode: Mode,
    pub table_pos: TableState,
}

impl DisplayState {
    pub fn new() -> Self {
        DisplayState {
            mode: Mode::Episodes,
            table_pos: TableState::default().with_selected(0),
        }
    }
}

impl UiState {
    pub fn get_mode(&self) -> &Mode {
        &self.display_state.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.display_state.mode = mode;
    }

    pub fn get_selected_episode(&mut self) -> Result<Arc<Episode>> {
        if self.episodes.is_empty() {
            self.display_state.table_pos.select(None);
            return Err(anyhow!("No episodes to select!"));
        }

        let idx = self
            .display_state
            .table_pos
            .selected()
            .ok_or_else(|| anyhow!("No episode selected!"))?;

        self.episodes
            .get(idx)
            .cloned()
            .ok_or_else(|| anyhow!("Selection out of bounds!"))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.display_state.table_pos.selected()
    }

    pub fn scroll(&mut self, director: Director) {
        if self.episodes.is_empty() {
            return;
        }

        let len = self.episodes.len();
        let current = self.display_state.table_pos.selected().unwrap_or(0);

        let new_pos = match director {
            Director::Up(x) => (current + len - (x % len)) % len,
            Director::Down(x) => (current + x) % len,
            Director::Top => 0,
            Director::Bottom => len - 1,
        };

        self.display_state.table_pos.select(Some(new_pos));
    }

    /// Clamp the table cursor after the episode list changes shape.
    pub(super) fn clamp_selection(&mut self) {
        match self.episodes.is_empty() {
            true => self.display_state.table_pos.select(None),
            false => {
                let last = self.episodes.len() - 1;
                match self.display_state.table_pos.selected() {
                    Some(idx) if idx > last => self.display_state.table_pos.select(Some(last)),
                    None => self.display_state.table_pos.select(Some(0)),
                    _ => (),
                }
            }
        }
    }
}

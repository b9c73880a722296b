use super::{DisplayState, Mode, PlayerCoordinator, PopupState, PopupType};
use crate::domain::Episode;
use anyhow::{Error, Result};
use std::sync::Arc;

pub struct UiState {
    // The single source of truth for playback
    pub player: PlayerCoordinator,

    // Visual elements
    pub(crate) display_state: DisplayState,
    pub(crate) popup: PopupState,

    // View models
    pub episodes: Vec<Arc<Episode>>,
    pub detail: Option<Arc<Episode>>,

    // Seconds elapsed, as shown by the gauge and the seek target
    progress: u64,
}

impl UiState {
    pub fn new() -> Self {
        UiState {
            player: PlayerCoordinator::new(),
            display_state: DisplayState::new(),
            popup: PopupState::new(),
            episodes: Vec::new(),
            detail: None,
            progress: 0,
        }
    }

    pub fn set_episodes(&mut self, episodes: Vec<Arc<Episode>>) {
        self.episodes = episodes;
        self.clamp_selection();
    }

    pub fn set_error(&mut self, e: Error) {
        self.show_popup(PopupType::Error(e.to_string()));
    }

    pub fn soft_reset(&mut self) {
        if self.popup.is_open() {
            self.close_popup();
        } else if self.get_mode() == Mode::Detail {
            self.close_detail();
        }
    }
}

// ====================
//    VIEW NAVIGATION
// ==================
impl UiState {
    pub fn open_detail(&mut self, episode: Arc<Episode>) {
        self.detail = Some(episode);
        self.set_mode(Mode::Detail);
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
        self.set_mode(Mode::Episodes);
    }
}

// ===================
//    PLAY ACTIONS
// =================
impl UiState {
    /// Enter on the list: the whole listing becomes the queue, starting at
    /// the selected row.
    pub fn play_selected(&mut self) -> Result<()> {
        self.get_selected_episode()?;

        if let Some(idx) = self.selected_index() {
            self.player.play_list(self.episodes.clone(), idx);
        }
        Ok(())
    }

    /// Play from the detail view: a single-item queue.
    pub fn play_detail(&mut self) {
        if let Some(episode) = &self.detail {
            self.player.play(Arc::clone(episode));
        }
    }

    pub fn is_current(&self, episode: &Arc<Episode>) -> bool {
        self.player
            .current_episode()
            .is_some_and(|current| current.url == episode.url)
    }
}

// ==============================
//    TRANSPORT AVAILABILITY
// ============================
// Controls are inert without a current episode; skip controls also need a
// destination, and shuffle needs something to shuffle between.
impl UiState {
    pub fn can_toggle_play(&self) -> bool {
        self.player.current_episode().is_some()
    }

    pub fn can_play_next(&self) -> bool {
        self.can_toggle_play() && self.player.has_next()
    }

    pub fn can_play_previous(&self) -> bool {
        self.can_toggle_play() && self.player.has_previous()
    }

    pub fn can_toggle_loop(&self) -> bool {
        self.can_toggle_play()
    }

    pub fn can_toggle_shuffle(&self) -> bool {
        self.can_toggle_play() && self.player.queue_len() > 1
    }
}

// ===============
//    PROGRESS
// =============
impl UiState {
    pub fn progress(&self) -> u64 {
        self.progress
    }

    pub fn set_progress(&mut self, secs: u64) {
        self.progress = secs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn ep(title: &str) -> Arc<Episode> {
        Arc::new(Episode {
            title: title.to_string(),
            url: format!("https://example.com/{title}.mp3"),
            duration: Duration::from_secs(60),
            ..Episode::default()
        })
    }

    fn state_with(n: usize) -> UiState {
        let mut state = UiState::new();
        state.set_episodes((0..n).map(|i| ep(&format!("E{i}"))).collect());
        state
    }

    #[test]
    fn play_selected_queues_the_whole_listing() {
        let mut state = state_with(3);
        state.scroll(crate::key_handler::Director::Down(1));
        state.play_selected().unwrap();

        assert_eq!(state.player.queue_len(), 3);
        assert_eq!(state.player.current_index(), 1);
        assert!(state.player.is_playing());
    }

    #[test]
    fn play_selected_on_empty_listing_errors() {
        let mut state = UiState::new();
        assert!(state.play_selected().is_err());
    }

    #[test]
    fn play_detail_hands_over_a_single_item_queue() {
        let mut state = state_with(3);
        state.open_detail(ep("Solo"));
        state.play_detail();

        assert_eq!(state.player.queue_len(), 1);
        assert_eq!(state.player.current_episode().unwrap().title, "Solo");
    }

    #[test]
    fn transport_is_inert_without_an_episode() {
        let state = UiState::new();
        assert!(!state.can_toggle_play());
        assert!(!state.can_play_next());
        assert!(!state.can_play_previous());
        assert!(!state.can_toggle_loop());
        assert!(!state.can_toggle_shuffle());
    }

    #[test]
    fn shuffle_needs_at_least_two_queued() {
        let mut state = state_with(1);
        state.play_selected().unwrap();
        assert!(!state.can_toggle_shuffle());

        let mut state = state_with(2);
        state.play_selected().unwrap();
        assert!(state.can_toggle_shuffle());
    }

    #[test]
    fn skip_gating_follows_derived_navigation() {
        let mut state = state_with(3);
        state.play_selected().unwrap();

        assert!(state.can_play_next());
        assert!(!state.can_play_previous());

        state.player.play_next();
        state.player.play_next();
        assert!(!state.can_play_next());
        assert!(state.can_play_previous());
    }

    #[test]
    fn soft_reset_prefers_the_popup() {
        let mut state = state_with(1);
        state.open_detail(ep("Solo"));
        state.set_error(anyhow::anyhow!("boom"));

        state.soft_reset();
        assert!(!state.popup.is_open());
        assert!(state.get_mode() == Mode::Detail);

        state.soft_reset();
        assert!(state.get_mode() == Mode::Episodes);
        assert!(state.detail.is_none());
    }
}

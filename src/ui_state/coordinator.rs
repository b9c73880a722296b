use crate::domain::Episode;
use rand::Rng;
use std::sync::Arc;

/// Single source of truth for playback: the queue, the cursor into it, and
/// the transport flags. Views read it every frame and mutate it only
/// through these methods; the element sync in `app_core` follows it.
///
/// Every operation is a silent no-op when its precondition does not hold —
/// this is UI state, not a library surface.
pub struct PlayerCoordinator {
    queue: Vec<Arc<Episode>>,
    current_index: usize,
    is_playing: bool,
    is_looping: bool,
    is_shuffling: bool,
}

impl PlayerCoordinator {
    pub fn new() -> Self {
        PlayerCoordinator {
            queue: Vec::new(),
            current_index: 0,
            is_playing: false,
            is_looping: false,
            is_shuffling: false,
        }
    }

    /// Replace the queue wholesale and start playing at `index`.
    /// Callers guarantee `index < list.len()`.
    pub fn play_list(&mut self, list: Vec<Arc<Episode>>, index: usize) {
        self.queue = list;
        self.current_index = index;
        self.is_playing = true;
    }

    /// Single-episode queue; the detail view's "play this".
    pub fn play(&mut self, episode: Arc<Episode>) {
        self.play_list(vec![episode], 0);
    }

    pub fn toggle_play(&mut self) {
        self.is_playing = !self.is_playing;
    }

    pub fn toggle_loop(&mut self) {
        self.is_looping = !self.is_looping;
    }

    pub fn toggle_shuffle(&mut self) {
        self.is_shuffling = !self.is_shuffling;
    }

    /// Follow the element's ground truth instead of assuming a toggle
    /// landed. Called from event reconciliation only.
    pub fn set_playing_state(&mut self, state: bool) {
        self.is_playing = state;
    }

    /// Shuffling picks uniformly over the whole queue — the current index
    /// is deliberately not excluded, so the same episode may repeat.
    pub fn play_next(&mut self) {
        if self.is_shuffling {
            if self.queue.is_empty() {
                return;
            }
            self.current_index = rand::rng().random_range(0..self.queue.len());
        } else if self.has_next() {
            self.current_index += 1;
        }
    }

    pub fn play_previous(&mut self) {
        if self.has_previous() {
            self.current_index -= 1;
        }
    }

    /// Empty the queue and reset the cursor. The three transport flags
    /// persist for whatever gets queued next.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.current_index = 0;
    }

    /// What the player view does when the element reports `Ended`.
    pub fn handle_ended(&mut self) {
        match self.has_next() {
            true => self.play_next(),
            false => self.clear(),
        }
    }
}

// ==============
//    DERIVED
// ============
impl PlayerCoordinator {
    pub fn has_previous(&self) -> bool {
        self.current_index > 0
    }

    /// Shuffle always reports a next track: it is chosen randomly rather
    /// than sequentially.
    pub fn has_next(&self) -> bool {
        self.is_shuffling || self.current_index + 1 < self.queue.len()
    }

    pub fn current_episode(&self) -> Option<&Arc<Episode>> {
        self.queue.get(self.current_index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    pub fn is_shuffling(&self) -> bool {
        self.is_shuffling
    }
}

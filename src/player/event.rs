/// Ground-truth reports from the audio thread. `Played`/`Paused` feed the
/// coordinator's `set_playing_state` reconciliation; `Ended` drives
/// advancement. Looping never emits `Ended` — the element replays the
/// source before the end-of-track condition is observable.
pub enum AudioEvent {
    Played,
    Paused,
    LoadedMetadata,
    Ended,
    Error(String),
}

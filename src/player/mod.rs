mod backend;
mod element;
mod event;
mod handle;
mod state;

pub use backend::{AudioBackend, RodioBackend};
pub use event::AudioEvent;
pub use handle::{AudioControl, AudioHandle};
pub use state::{AudioStatus, SharedAudioState};

use std::path::PathBuf;

#[derive(Debug, PartialEq)]
pub enum AudioCommand {
    Load(AudioTrack),
    Play,
    Pause,
    SeekTo(u64),
    SetLooping(bool),
    Stop,
}

/// What the element needs to know about a source: a local file and whether
/// playback starts immediately.
#[derive(Debug, PartialEq)]
pub struct AudioTrack {
    pub path: PathBuf,
    pub autoplay: bool,
}

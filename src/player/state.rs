use std::{
    sync::{
        Arc,
        atomic::{AtomicU8, AtomicU64, Ordering},
    },
    time::Duration,
};

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[repr(u8)]
pub enum AudioStatus {
    Stopped = 0,
    Playing = 1,
    Paused = 2,
}

impl TryFrom<u8> for AudioStatus {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AudioStatus::Stopped),
            1 => Ok(AudioStatus::Playing),
            2 => Ok(AudioStatus::Paused),
            _ => Err(()),
        }
    }
}

/// Position/status of the audio thread, readable from the UI thread
/// without locking.
pub struct SharedAudioState {
    status: AtomicU8,
    position_ms: AtomicU64,
}

impl SharedAudioState {
    pub fn new() -> Arc<Self> {
        Arc::new(SharedAudioState {
            status: AtomicU8::new(AudioStatus::Stopped as u8),
            position_ms: AtomicU64::new(0),
        })
    }

    pub fn status(&self) -> AudioStatus {
        self.status
            .load(Ordering::Relaxed)
            .try_into()
            .unwrap_or(AudioStatus::Stopped)
    }

    pub fn position(&self) -> Duration {
        Duration::from_millis(self.position_ms.load(Ordering::Relaxed))
    }

    pub fn is_paused(&self) -> bool {
        self.status() == AudioStatus::Paused
    }

    pub fn is_stopped(&self) -> bool {
        self.status() == AudioStatus::Stopped
    }

    pub fn set_status(&self, status: AudioStatus) {
        self.status.store(status as u8, Ordering::Relaxed);
    }

    pub fn set_position(&self, d: Duration) {
        self.position_ms
            .store(d.as_millis() as u64, Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.set_position(Duration::ZERO);
        self.set_status(AudioStatus::Stopped);
    }
}

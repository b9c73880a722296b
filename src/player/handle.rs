use crate::player::{
    AudioCommand, AudioEvent, AudioStatus, AudioTrack, SharedAudioState, element::AudioElement,
};
use anyhow::Result;
use crossbeam_channel::{Receiver, Sender, unbounded};
use std::{path::PathBuf, sync::Arc, thread::JoinHandle, time::Duration};

/// Everything the UI thread does to or reads from the audio element.
/// `AudioHandle` is the live implementation; the binding layer is written
/// against this trait so its logic can run without an output device.
pub trait AudioControl {
    fn load(&self, path: PathBuf, autoplay: bool) -> Result<()>;
    fn play(&self) -> Result<()>;
    fn pause(&self) -> Result<()>;
    fn seek_to(&self, secs: u64) -> Result<()>;
    fn set_looping(&self, looping: bool) -> Result<()>;
    fn stop(&self) -> Result<()>;

    fn position(&self) -> Duration;
    fn status(&self) -> AudioStatus;
    fn poll_events(&self) -> Vec<AudioEvent>;
}

/// UI-thread handle to the audio element.
pub struct AudioHandle {
    commands: Sender<AudioCommand>,
    events: Receiver<AudioEvent>,
    shared: Arc<SharedAudioState>,
    _thread: JoinHandle<()>,
}

impl AudioHandle {
    pub fn spawn() -> Self {
        let (cmd_tx, cmd_rx) = unbounded();
        let (evt_tx, evt_rx) = unbounded();
        let shared = SharedAudioState::new();

        let thread = AudioElement::spawn(cmd_rx, evt_tx, Arc::clone(&shared));

        AudioHandle {
            commands: cmd_tx,
            events: evt_rx,
            shared,
            _thread: thread,
        }
    }
}

impl AudioControl for AudioHandle {
    fn load(&self, path: PathBuf, autoplay: bool) -> Result<()> {
        self.commands
            .send(AudioCommand::Load(AudioTrack { path, autoplay }))?;
        Ok(())
    }

    fn play(&self) -> Result<()> {
        self.commands.send(AudioCommand::Play)?;
        Ok(())
    }

    fn pause(&self) -> Result<()> {
        self.commands.send(AudioCommand::Pause)?;
        Ok(())
    }

    fn seek_to(&self, secs: u64) -> Result<()> {
        self.commands.send(AudioCommand::SeekTo(secs))?;
        Ok(())
    }

    fn set_looping(&self, looping: bool) -> Result<()> {
        self.commands.send(AudioCommand::SetLooping(looping))?;
        Ok(())
    }

    fn stop(&self) -> Result<()> {
        self.commands.send(AudioCommand::Stop)?;
        Ok(())
    }

    fn position(&self) -> Duration {
        self.shared.position()
    }

    fn status(&self) -> AudioStatus {
        self.shared.status()
    }

    fn poll_events(&self) -> Vec<AudioEvent> {
        std::iter::from_fn(|| self.events.try_recv().ok()).collect()
    }
}

use crate::{
    REFRESH_RATE,
    player::{
        AudioBackend, AudioCommand, AudioEvent, AudioStatus, AudioTrack, RodioBackend,
        SharedAudioState,
    },
};
use crossbeam_channel::{Receiver, Sender};
use std::{
    sync::Arc,
    thread::{self, JoinHandle},
    time::Duration,
};

/// The playback element loop. Commands arrive on a channel, ground-truth
/// events leave on another, and position/status are published through
/// `SharedAudioState` atomics.
pub struct AudioElement {
    backend: Box<dyn AudioBackend>,
    commands: Receiver<AudioCommand>,
    events: Sender<AudioEvent>,
    shared: Arc<SharedAudioState>,

    current: Option<AudioTrack>,
    looping: bool,
}

impl AudioElement {
    pub fn spawn(
        commands: Receiver<AudioCommand>,
        events: Sender<AudioEvent>,
        shared: Arc<SharedAudioState>,
    ) -> JoinHandle<()> {
        thread::spawn(move || {
            // The output stream is created on the audio thread and lives
            // there for the whole session.
            let backend = match RodioBackend::new() {
                Ok(backend) => backend,
                Err(e) => {
                    let _ = events.send(AudioEvent::Error(e.to_string()));
                    return;
                }
            };

            let mut element = AudioElement {
                backend: Box::new(backend),
                commands,
                events,
                shared,

                current: None,
                looping: false,
            };

            element.run();
        })
    }

    fn run(&mut self) {
        loop {
            match self.process_commands() {
                ChannelState::Open => (),
                ChannelState::Disconnected => break,
            }
            self.check_track_end();
            self.update_position();
            thread::sleep(REFRESH_RATE);
        }
    }

    fn process_commands(&mut self) -> ChannelState {
        loop {
            match self.commands.try_recv() {
                Ok(cmd) => match cmd {
                    AudioCommand::Load(track) => self.load(track),
                    AudioCommand::Play => self.play(),
                    AudioCommand::Pause => self.pause(),
                    AudioCommand::SeekTo(secs) => self.seek_to(secs),
                    AudioCommand::SetLooping(looping) => self.looping = looping,
                    AudioCommand::Stop => self.stop(),
                },
                Err(crossbeam_channel::TryRecvError::Empty) => return ChannelState::Open,
                Err(crossbeam_channel::TryRecvError::Disconnected) => {
                    return ChannelState::Disconnected;
                }
            }
        }
    }

    /// Detect a drained sink exactly once per source. Looping consumes the
    /// end-of-track condition before an `Ended` event can exist, so shuffle
    /// or sequential advancement only ever happens on a manual skip while
    /// looping is on.
    fn check_track_end(&mut self) {
        if self.current.is_none() || !self.backend.finished() {
            return;
        }

        if self.looping {
            if let Some(track) = &self.current {
                match self.backend.load(&track.path, true) {
                    Ok(()) => {
                        self.shared.set_position(Duration::ZERO);
                        self.shared.set_status(AudioStatus::Playing);
                        return;
                    }
                    Err(e) => self.emit(AudioEvent::Error(e.to_string())),
                }
            }
        }

        self.current = None;
        self.shared.reset();

        if !self.looping {
            self.emit(AudioEvent::Ended);
        }
    }

    fn update_position(&mut self) {
        if self.current.is_some() {
            self.shared.set_position(self.backend.position());
        }
    }

    fn load(&mut self, track: AudioTrack) {
        if let Err(e) = self.backend.load(&track.path, track.autoplay) {
            self.current = None;
            self.shared.reset();
            self.emit(AudioEvent::Error(e.to_string()));
            return;
        }

        self.shared.set_position(Duration::ZERO);
        self.emit(AudioEvent::LoadedMetadata);

        match track.autoplay {
            true => {
                self.shared.set_status(AudioStatus::Playing);
                self.emit(AudioEvent::Played);
            }
            false => {
                self.shared.set_status(AudioStatus::Paused);
                self.emit(AudioEvent::Paused);
            }
        }

        self.current = Some(track);
    }

    fn play(&mut self) {
        if self.current.is_some() && self.backend.is_paused() {
            self.backend.resume();
            self.shared.set_status(AudioStatus::Playing);
            self.emit(AudioEvent::Played);
        }
    }

    fn pause(&mut self) {
        if self.current.is_some() && !self.backend.is_paused() {
            self.backend.pause();
            self.shared.set_status(AudioStatus::Paused);
            self.emit(AudioEvent::Paused);
        }
    }

    /// Synchronous jump; valid while paused.
    fn seek_to(&mut self, secs: u64) {
        if self.current.is_none() {
            return;
        }

        match self.backend.seek_to(Duration::from_secs(secs)) {
            Ok(()) => self.shared.set_position(self.backend.position()),
            Err(e) => self.emit(AudioEvent::Error(e.to_string())),
        }
    }

    fn stop(&mut self) {
        self.backend.stop();
        self.current = None;
        self.shared.reset();
    }

    fn emit(&self, event: AudioEvent) {
        let _ = self.events.send(event);
    }
}

enum ChannelState {
    Open,
    Disconnected,
}

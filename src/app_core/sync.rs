use crate::{
    app_core::Poddium,
    player::{AudioControl, AudioEvent, AudioStatus},
    ui_state::UiState,
};
use anyhow::Result;
use std::{
    path::PathBuf,
    sync::mpsc::{self, Receiver, TryRecvError},
    thread,
};

/// Tracks what the audio thread currently holds, so state -> element
/// synchronization only sends commands for actual differences.
pub(crate) struct ElementBinding {
    /// Url of the source the element has loaded. `None` while nothing is
    /// loaded, including the window where a download is still in flight.
    loaded: Option<String>,
    looping: bool,
    pending: Option<PendingDownload>,
}

struct PendingDownload {
    url: String,
    rx: Receiver<Result<PathBuf>>,
}

impl ElementBinding {
    pub(crate) fn new() -> Self {
        ElementBinding {
            loaded: None,
            looping: false,
            pending: None,
        }
    }
}

// =============================
//    ELEMENT -> STATE
// ===========================
impl ElementBinding {
    /// Reconciles what the audio thread reports back into the coordinator.
    /// Runs before `sync` each tick, so a command issued by the sync is
    /// never a reaction to an event this same tick produced.
    pub(crate) fn reconcile(&mut self, ui: &mut UiState, events: Vec<AudioEvent>) {
        for event in events {
            match event {
                AudioEvent::Played => ui.player.set_playing_state(true),
                AudioEvent::Paused => ui.player.set_playing_state(false),
                AudioEvent::LoadedMetadata => ui.set_progress(0),
                // Only a drain attributed to the current source advances the
                // queue; an `Ended` that raced a supersession is dropped.
                AudioEvent::Ended => {
                    if self.loaded.take().is_some() {
                        ui.player.handle_ended();
                    }
                }
                AudioEvent::Error(msg) => {
                    ui.player.set_playing_state(false);
                    ui.set_error(anyhow::anyhow!(msg));
                }
            }
        }
    }
}

// =============================
//    STATE -> ELEMENT
// ===========================
impl ElementBinding {
    /// Diffs coordinator state against what the element holds and issues
    /// only the difference. Returns a url whose audio still needs fetching.
    pub(crate) fn sync(&mut self, ui: &mut UiState, audio: &dyn AudioControl) -> Option<String> {
        let wanted = self.sync_source(ui, audio);

        if self.looping != ui.player.is_looping() {
            self.looping = ui.player.is_looping();
            if let Err(e) = audio.set_looping(self.looping) {
                ui.set_error(e);
            }
        }

        wanted
    }

    fn sync_source(&mut self, ui: &mut UiState, audio: &dyn AudioControl) -> Option<String> {
        let Some(current) = ui.player.current_episode() else {
            // Coordinator was cleared or never started.
            self.pending = None;
            self.silence(ui, audio);
            return None;
        };
        let url = current.url.clone();

        if self.loaded.as_deref() == Some(url.as_str()) {
            self.sync_pause_state(ui, audio);
            return None;
        }

        // The selection changed out from under whatever is loaded. Silence
        // it immediately: a superseded source must neither keep sounding
        // through the download window nor drain into an `Ended` that gets
        // attributed to the new episode.
        self.silence(ui, audio);

        let in_flight = self.pending.as_ref().is_some_and(|p| p.url == url);
        (!in_flight).then_some(url)
    }

    fn silence(&mut self, ui: &mut UiState, audio: &dyn AudioControl) {
        if self.loaded.take().is_some() {
            if let Err(e) = audio.stop() {
                ui.set_error(e);
            }
            ui.set_progress(0);
        }
    }

    fn sync_pause_state(&self, ui: &mut UiState, audio: &dyn AudioControl) {
        let res = match (ui.player.is_playing(), audio.status()) {
            (true, AudioStatus::Paused) => audio.play(),
            (false, AudioStatus::Playing) => audio.pause(),
            _ => Ok(()),
        };

        if let Err(e) = res {
            ui.set_error(e);
        }
    }

    pub(crate) fn seek_relative(
        &self,
        ui: &mut UiState,
        audio: &dyn AudioControl,
        delta: i64,
    ) -> Result<()> {
        let Some(current) = ui.player.current_episode() else {
            return Ok(());
        };

        // Only seek a source the element actually holds.
        if self.loaded.as_deref() != Some(current.url.as_str()) {
            return Ok(());
        }

        let target = ui
            .progress()
            .saturating_add_signed(delta)
            .min(current.duration_secs());

        audio.seek_to(target)?;
        ui.set_progress(target);
        Ok(())
    }

    pub(crate) fn update_progress(&self, ui: &mut UiState, audio: &dyn AudioControl) {
        let loaded_is_current = ui
            .player
            .current_episode()
            .zip(self.loaded.as_ref())
            .is_some_and(|(current, loaded)| current.url == *loaded);

        if loaded_is_current && audio.status() == AudioStatus::Playing {
            ui.set_progress(audio.position().as_secs());
        }
    }
}

// =============================
//    AUDIO DOWNLOADS
// ===========================
impl ElementBinding {
    pub(crate) fn begin_download(&mut self, url: String, rx: Receiver<Result<PathBuf>>) {
        self.pending = Some(PendingDownload { url, rx });
    }

    /// Non-blocking check on the in-flight download, if any.
    pub(crate) fn poll_download(&mut self) -> Option<(String, Result<PathBuf>)> {
        let pending = self.pending.as_ref()?;

        match pending.rx.try_recv() {
            Ok(outcome) => {
                let url = self.pending.take().map(|p| p.url).unwrap_or_default();
                Some((url, outcome))
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                None
            }
        }
    }

    pub(crate) fn resolve_download(
        &mut self,
        ui: &mut UiState,
        audio: &dyn AudioControl,
        url: String,
        outcome: Result<PathBuf>,
    ) {
        // The selection may have moved on while the download ran.
        let still_wanted = ui
            .player
            .current_episode()
            .is_some_and(|current| current.url == url);
        if !still_wanted {
            return;
        }

        match outcome {
            Ok(path) => {
                let autoplay = ui.player.is_playing();
                self.loaded = Some(url);
                if let Err(e) = audio.load(path, autoplay) {
                    ui.set_error(e);
                }
            }
            Err(e) => {
                // Mark the source spent so the next tick does not retry the
                // same failing download in a loop.
                self.loaded = Some(url);
                ui.player.set_playing_state(false);
                ui.set_error(e);
            }
        }
    }
}

// ======================
//    MAIN-LOOP WIRING
// ====================
impl Poddium {
    pub(super) fn reconcile_audio_events(&mut self) {
        let events = self.audio.poll_events();
        self.binding.reconcile(&mut self.ui, events);
    }

    pub(super) fn sync_element(&mut self) {
        if let Some(url) = self.binding.sync(&mut self.ui, &self.audio) {
            self.start_download(url);
        }
    }

    pub(super) fn seek_relative(&mut self, delta: i64) -> Result<()> {
        self.binding.seek_relative(&mut self.ui, &self.audio, delta)
    }

    pub(super) fn update_progress(&mut self) {
        self.binding.update_progress(&mut self.ui, &self.audio);
    }

    pub(super) fn poll_pending_download(&mut self) {
        if let Some((url, outcome)) = self.binding.poll_download() {
            self.binding
                .resolve_download(&mut self.ui, &self.audio, url, outcome);
        }
    }

    /// Kicks off a cache fetch on a worker thread. The main loop stays
    /// responsive and picks the result up via `poll_pending_download`.
    fn start_download(&mut self, url: String) {
        let (tx, rx) = mpsc::channel();
        let api = self.api.clone();

        {
            let url = url.clone();
            thread::spawn(move || {
                let _ = tx.send(api.fetch_audio(&url));
            });
        }

        self.binding.begin_download(url, rx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::Episode,
        player::{AudioCommand, AudioTrack},
    };
    use anyhow::anyhow;
    use std::{
        cell::{Cell, RefCell},
        sync::Arc,
        time::Duration,
    };

    struct Recorder {
        commands: RefCell<Vec<AudioCommand>>,
        status: Cell<AudioStatus>,
        position: Cell<u64>,
    }

    impl Recorder {
        fn new() -> Self {
            Recorder {
                commands: RefCell::new(Vec::new()),
                status: Cell::new(AudioStatus::Stopped),
                position: Cell::new(0),
            }
        }

        fn taken(&self) -> Vec<AudioCommand> {
            self.commands.borrow_mut().drain(..).collect()
        }
    }

    impl AudioControl for Recorder {
        fn load(&self, path: PathBuf, autoplay: bool) -> Result<()> {
            self.commands
                .borrow_mut()
                .push(AudioCommand::Load(AudioTrack { path, autoplay }));
            Ok(())
        }

        fn play(&self) -> Result<()> {
            self.commands.borrow_mut().push(AudioCommand::Play);
            Ok(())
        }

        fn pause(&self) -> Result<()> {
            self.commands.borrow_mut().push(AudioCommand::Pause);
            Ok(())
        }

        fn seek_to(&self, secs: u64) -> Result<()> {
            self.commands.borrow_mut().push(AudioCommand::SeekTo(secs));
            Ok(())
        }

        fn set_looping(&self, looping: bool) -> Result<()> {
            self.commands
                .borrow_mut()
                .push(AudioCommand::SetLooping(looping));
            Ok(())
        }

        fn stop(&self) -> Result<()> {
            self.commands.borrow_mut().push(AudioCommand::Stop);
            Ok(())
        }

        fn position(&self) -> Duration {
            Duration::from_secs(self.position.get())
        }

        fn status(&self) -> AudioStatus {
            self.status.get()
        }

        fn poll_events(&self) -> Vec<AudioEvent> {
            Vec::new()
        }
    }

    fn ep(title: &str) -> Arc<Episode> {
        Arc::new(Episode {
            title: title.to_string(),
            url: format!("https://example.com/{title}.mp3"),
            duration: Duration::from_secs(60),
            ..Episode::default()
        })
    }

    fn playing_three() -> UiState {
        let mut ui = UiState::new();
        ui.set_episodes(vec![ep("A"), ep("B"), ep("C")]);
        ui.play_selected().unwrap();
        ui
    }

    fn url_of(ui: &UiState) -> String {
        ui.player.current_episode().unwrap().url.clone()
    }

    #[test]
    fn switching_episodes_silences_the_old_source() {
        let mut ui = playing_three();
        let audio = Recorder::new();
        let mut binding = ElementBinding::new();
        binding.loaded = Some(url_of(&ui));
        ui.set_progress(30);

        ui.player.play_next();
        let wanted = binding.sync(&mut ui, &audio);

        assert_eq!(audio.taken(), vec![AudioCommand::Stop]);
        assert!(binding.loaded.is_none());
        assert_eq!(ui.progress(), 0);
        assert_eq!(wanted.as_deref(), Some(url_of(&ui).as_str()));
    }

    #[test]
    fn ended_from_a_superseded_source_does_not_advance() {
        let mut ui = playing_three();
        let mut binding = ElementBinding::new();
        // The old source was already silenced, nothing is attributed.
        binding.loaded = None;

        ui.player.play_next();
        binding.reconcile(&mut ui, vec![AudioEvent::Ended]);

        assert_eq!(ui.player.current_index(), 1);
        assert_eq!(ui.player.queue_len(), 3);
    }

    #[test]
    fn ended_from_the_current_source_advances() {
        let mut ui = playing_three();
        let mut binding = ElementBinding::new();
        binding.loaded = Some(url_of(&ui));

        binding.reconcile(&mut ui, vec![AudioEvent::Ended]);

        assert_eq!(ui.player.current_index(), 1);
        assert!(binding.loaded.is_none());
    }

    #[test]
    fn completed_download_for_an_abandoned_episode_is_dropped() {
        let mut ui = playing_three();
        let audio = Recorder::new();
        let mut binding = ElementBinding::new();
        let old_url = url_of(&ui);

        ui.player.play_next();
        binding.resolve_download(&mut ui, &audio, old_url, Ok(PathBuf::from("/tmp/a.mp3")));

        assert!(audio.taken().is_empty());
        assert!(binding.loaded.is_none());
    }

    #[test]
    fn completed_download_loads_with_the_playing_flag() {
        let mut ui = playing_three();
        let audio = Recorder::new();
        let mut binding = ElementBinding::new();
        let url = url_of(&ui);

        binding.resolve_download(&mut ui, &audio, url.clone(), Ok(PathBuf::from("/tmp/a.mp3")));

        assert_eq!(
            audio.taken(),
            vec![AudioCommand::Load(AudioTrack {
                path: PathBuf::from("/tmp/a.mp3"),
                autoplay: true,
            })]
        );
        assert_eq!(binding.loaded.as_deref(), Some(url.as_str()));
    }

    #[test]
    fn failed_download_marks_the_source_spent() {
        let mut ui = playing_three();
        let audio = Recorder::new();
        let mut binding = ElementBinding::new();
        let url = url_of(&ui);

        binding.resolve_download(&mut ui, &audio, url.clone(), Err(anyhow!("404")));

        assert_eq!(binding.loaded.as_deref(), Some(url.as_str()));
        assert!(!ui.player.is_playing());
        assert!(ui.get_error().is_some());

        // The spent marker keeps the next tick from re-downloading.
        let wanted = binding.sync(&mut ui, &audio);
        assert!(wanted.is_none());
        assert!(audio.taken().is_empty());
    }

    #[test]
    fn pause_state_diffs_into_commands() {
        let mut ui = playing_three();
        let audio = Recorder::new();
        let mut binding = ElementBinding::new();
        binding.loaded = Some(url_of(&ui));

        audio.status.set(AudioStatus::Paused);
        binding.sync(&mut ui, &audio);
        assert_eq!(audio.taken(), vec![AudioCommand::Play]);

        ui.player.set_playing_state(true);
        audio.status.set(AudioStatus::Playing);
        binding.sync(&mut ui, &audio);
        assert!(audio.taken().is_empty());

        ui.player.set_playing_state(false);
        binding.sync(&mut ui, &audio);
        assert_eq!(audio.taken(), vec![AudioCommand::Pause]);
    }

    #[test]
    fn loop_flag_syncs_exactly_once() {
        let mut ui = playing_three();
        let audio = Recorder::new();
        let mut binding = ElementBinding::new();
        binding.loaded = Some(url_of(&ui));
        audio.status.set(AudioStatus::Playing);

        ui.player.toggle_loop();
        binding.sync(&mut ui, &audio);
        assert_eq!(audio.taken(), vec![AudioCommand::SetLooping(true)]);

        binding.sync(&mut ui, &audio);
        assert!(audio.taken().is_empty());
    }

    #[test]
    fn clearing_stops_and_resets_progress() {
        let mut ui = playing_three();
        let audio = Recorder::new();
        let mut binding = ElementBinding::new();
        binding.loaded = Some(url_of(&ui));
        ui.set_progress(12);

        ui.player.clear();
        let wanted = binding.sync(&mut ui, &audio);

        assert!(wanted.is_none());
        assert_eq!(audio.taken(), vec![AudioCommand::Stop]);
        assert!(binding.loaded.is_none());
        assert_eq!(ui.progress(), 0);
    }

    #[test]
    fn seek_moves_element_and_display_together() {
        let mut ui = playing_three();
        let audio = Recorder::new();
        let mut binding = ElementBinding::new();
        binding.loaded = Some(url_of(&ui));

        binding.seek_relative(&mut ui, &audio, 42).unwrap();
        assert_eq!(audio.taken(), vec![AudioCommand::SeekTo(42)]);
        assert_eq!(ui.progress(), 42);

        // Clamped to the episode duration (60s) going forward, zero back.
        binding.seek_relative(&mut ui, &audio, 500).unwrap();
        assert_eq!(ui.progress(), 60);
        binding.seek_relative(&mut ui, &audio, -500).unwrap();
        assert_eq!(ui.progress(), 0);
    }

    #[test]
    fn seek_ignores_a_source_the_element_does_not_hold() {
        let mut ui = playing_three();
        let audio = Recorder::new();
        let binding = ElementBinding::new();

        binding.seek_relative(&mut ui, &audio, 42).unwrap();
        assert!(audio.taken().is_empty());
        assert_eq!(ui.progress(), 0);
    }

    #[test]
    fn in_flight_download_is_not_restarted() {
        let mut ui = playing_three();
        let audio = Recorder::new();
        let mut binding = ElementBinding::new();

        let (_tx, rx) = mpsc::channel();
        binding.begin_download(url_of(&ui), rx);

        let wanted = binding.sync(&mut ui, &audio);
        assert!(wanted.is_none());
    }
}

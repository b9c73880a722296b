use crate::{
    Config, PodcastApi, overwrite_line,
    app_core::ElementBinding,
    key_handler::{self, Action},
    player::{AudioControl, AudioHandle},
    tui,
    ui_state::{Mode, UiState},
};
use anyhow::Result;
use ratatui::crossterm::event::{Event, KeyEventKind};

pub struct Poddium {
    pub(super) api: PodcastApi,
    pub(super) ui: UiState,
    pub(super) audio: AudioHandle,
    pub(super) binding: ElementBinding,
}

impl Poddium {
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        let api = PodcastApi::new(&config)?;

        Ok(Poddium {
            api,
            ui: UiState::new(),
            audio: AudioHandle::spawn(),
            binding: ElementBinding::new(),
        })
    }

    pub fn run(&mut self) -> Result<()> {
        overwrite_line("Contacting episode backend...");
        self.preload_episodes();

        let mut terminal = ratatui::init();
        terminal.clear()?;

        // MAIN ROUTINE
        loop {
            // Element -> state first, state -> element last: the two
            // binding directions never fire against each other in a tick.
            self.reconcile_audio_events();
            self.poll_pending_download();

            match key_handler::next_event()? {
                Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if let Some(action) = key_handler::handle_key_event(key, &self.ui) {
                        if let Err(e) = self.handle_action(action) {
                            self.ui.set_error(e);
                        }
                    }
                }
                _ => (),
            }

            self.sync_element();
            self.update_progress();

            terminal.draw(|f| tui::render(f, &mut self.ui))?;

            if self.ui.get_mode() == Mode::QUIT {
                let _ = self.audio.stop();
                break;
            }
        }

        ratatui::restore();
        overwrite_line("Thank you for listening with poddium!\n\n");

        Ok(())
    }

    fn preload_episodes(&mut self) {
        match self.api.list_episodes() {
            Ok(episodes) => self.ui.set_episodes(episodes),
            Err(e) => self.ui.set_error(e),
        }
    }

    fn refresh_episodes(&mut self) -> Result<()> {
        let episodes = self.api.list_episodes()?;
        self.ui.set_episodes(episodes);
        Ok(())
    }

    fn open_selected_detail(&mut self) -> Result<()> {
        let selected = self.ui.get_selected_episode()?;

        // Refetch by slug so the detail view has the full record,
        // description included.
        let episode = self.api.get_episode(&selected.id)?;
        self.ui.open_detail(std::sync::Arc::new(episode));

        Ok(())
    }
}

impl Poddium {
    #[rustfmt::skip]
    fn handle_action(&mut self, action: Action) -> Result<()> {
        match action {
            // Transport, gated on availability: keys on an inert control
            // fall through as no-ops.
            Action::TogglePause if self.ui.can_toggle_play()     => self.ui.player.toggle_play(),
            Action::PlayNext if self.ui.can_play_next()          => self.ui.player.play_next(),
            Action::PlayPrev if self.ui.can_play_previous()      => self.ui.player.play_previous(),
            Action::ToggleLoop if self.ui.can_toggle_loop()      => self.ui.player.toggle_loop(),
            Action::ToggleShuffle if self.ui.can_toggle_shuffle() => self.ui.player.toggle_shuffle(),
            Action::ClearPlayer     => self.ui.player.clear(),

            Action::SeekForward(s)  => self.seek_relative(s as i64)?,
            Action::SeekBack(s)     => self.seek_relative(-(s as i64))?,

            // Views
            Action::Scroll(d)       => self.ui.scroll(d),
            Action::PlaySelected    => self.ui.play_selected()?,
            Action::OpenDetail      => self.open_selected_detail()?,
            Action::PlayDetail      => self.ui.play_detail(),
            Action::CloseDetail     => self.ui.close_detail(),
            Action::Refresh         => self.refresh_episodes()?,

            // Ops
            Action::ClosePopup      => self.ui.close_popup(),
            Action::SoftReset       => self.ui.soft_reset(),
            Action::QUIT            => self.ui.set_mode(Mode::QUIT),

            _ => (),
        }
        Ok(())
    }
}

mod action;

pub use action::handle_key_event;
pub use action::next_event;

use ratatui::crossterm::event::KeyModifiers;

pub(self) const X: KeyModifiers = KeyModifiers::NONE;
pub(self) const S: KeyModifiers = KeyModifiers::SHIFT;
pub(self) const C: KeyModifiers = KeyModifiers::CONTROL;

pub(self) const SEEK_SMALL: u64 = 5;
pub(self) const SEEK_LARGE: u64 = 30;
pub(self) const SCROLL_MID: usize = 5;

#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    // Transport
    TogglePause,
    PlayNext,
    PlayPrev,
    ToggleLoop,
    ToggleShuffle,
    ClearPlayer,
    SeekForward(u64),
    SeekBack(u64),

    // Episode views
    PlaySelected,
    OpenDetail,
    PlayDetail,
    CloseDetail,
    Scroll(Director),
    Refresh,

    // Ops
    ClosePopup,
    SoftReset,
    QUIT,
}

pub enum InputContext {
    EpisodeList,
    Detail,
    Popup,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Director {
    Up(usize),
    Down(usize),
    Top,
    Bottom,
}

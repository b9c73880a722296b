use super::{
    AppLayout,
    widgets::{EpisodeDetail, EpisodeTable, ErrorMsg, PlayerBar, StatusLine},
};
use crate::ui_state::{Mode, UiState};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    widgets::{Clear, StatefulWidget, Widget},
};

pub fn render(f: &mut Frame, state: &mut UiState) {
    let layout = AppLayout::new(f.area());

    match state.get_mode() {
        Mode::Detail => EpisodeDetail.render(layout.episode_window, f.buffer_mut(), state),
        _ => EpisodeTable.render(layout.episode_window, f.buffer_mut(), state),
    }

    PlayerBar.render(layout.player_bar, f.buffer_mut(), state);
    StatusLine.render(layout.status_line, f.buffer_mut(), state);

    if state.popup.is_open() {
        let popup_rect = centered_rect(40, 30, f.area());

        Clear.render(popup_rect, f.buffer_mut());
        ErrorMsg.render(popup_rect, f.buffer_mut(), state);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

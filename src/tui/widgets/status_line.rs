use super::FADED;
use crate::ui_state::{Mode, UiState};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Stylize,
    text::Line,
    widgets::{StatefulWidget, Widget},
};

pub struct StatusLine;
impl StatefulWidget for StatusLine {
    type State = UiState;

    fn render(
        self,
        area: ratatui::prelude::Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
    ) {
        let keymaps = match state.get_mode() {
            Mode::Detail => " [enter] play ✧ [tab] back ✧ [space] pause ✧ [q]uit ",
            _ => " [enter] play ✧ [tab] detail ✧ [n/p] skip ✧ [r]epeat ✧ [s]huffle ✧ [q]uit ",
        };

        let queue_pos = match state.player.current_episode() {
            Some(_) => format!(
                "{}/{} ",
                state.player.current_index() + 1,
                state.player.queue_len()
            ),
            None => String::new(),
        };

        let [left, right] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(8)])
            .areas(area);

        Line::from(keymaps).fg(FADED).render(left, buf);
        Line::from(queue_pos).fg(FADED).right_aligned().render(right, buf);
    }
}

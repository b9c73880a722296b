use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub episode_window: Rect,
    pub player_bar: Rect,
    pub status_line: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        // The player bar stays on screen no matter which view is active.
        let [episode_window, player_bar, status_line] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(10),
                Constraint::Length(5),
                Constraint::Length(1),
            ])
            .areas(area);

        AppLayout {
            episode_window,
            player_bar,
            status_line,
        }
    }
}

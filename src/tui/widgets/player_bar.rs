use super::{ACCENT, FADED, HIGHLIGHT, PAUSED_ICON, PLAYING_ICON, PRIMARY, SEPARATOR};
use crate::{DurationStyle, get_readable_duration, ui_state::UiState};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{LineGauge, StatefulWidget, Widget},
};
use std::time::Duration;

pub struct PlayerBar;
impl StatefulWidget for PlayerBar {
    type State = UiState;

    fn render(
        self,
        area: ratatui::prelude::Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
    ) {
        let [title_row, gauge_row, transport_row] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(2),
            ])
            .areas(area);

        let Some(episode) = state.player.current_episode() else {
            Line::from("Select an episode to listen")
                .fg(FADED)
                .italic()
                .centered()
                .render(gauge_row, buf);
            return;
        };

        let title = Line::from_iter([
            Span::from(episode.title.clone()).fg(HIGHLIGHT),
            Span::from(SEPARATOR).fg(FADED),
            Span::from(episode.members.clone()).fg(FADED),
        ])
        .centered();
        title.render(title_row, buf);

        render_gauge(gauge_row, buf, state, episode.duration_secs());
        transport_line(state).centered().render(transport_row, buf);
    }
}

fn render_gauge(
    area: ratatui::prelude::Rect,
    buf: &mut ratatui::prelude::Buffer,
    state: &UiState,
    duration_secs: u64,
) {
    let [elapsed_col, gauge_col, total_col] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(11),
            Constraint::Fill(1),
            Constraint::Length(11),
        ])
        .areas(area);

    let elapsed = state.progress();
    let progress_raw = match duration_secs {
        0 => 0.0,
        d => elapsed as f64 / d as f64,
    };

    // LineGauge panics past 1.0
    let ratio = progress_raw.clamp(0.0, 1.0);

    Line::from(get_readable_duration(
        Duration::from_secs(elapsed),
        DurationStyle::Clock,
    ))
    .fg(PRIMARY)
    .centered()
    .render(elapsed_col, buf);

    Line::from(get_readable_duration(
        Duration::from_secs(duration_secs),
        DurationStyle::Clock,
    ))
    .fg(FADED)
    .centered()
    .render(total_col, buf);

    LineGauge::default()
        .filled_style(Style::new().fg(ACCENT))
        .unfilled_style(Style::new().fg(Color::Black))
        .filled_symbol("━")
        .unfilled_symbol("─")
        .label("")
        .ratio(ratio)
        .render(gauge_col, buf);
}

fn transport_line(state: &UiState) -> Line<'static> {
    let control = |icon: &'static str, enabled: bool, active: bool| {
        Span::from(icon).fg(match (enabled, active) {
            (false, _) => FADED,
            (true, true) => ACCENT,
            (true, false) => HIGHLIGHT,
        })
    };

    let play_icon = match state.player.is_playing() {
        true => PAUSED_ICON,
        false => PLAYING_ICON,
    };

    Line::from_iter([
        control("⇄", state.can_toggle_shuffle(), state.player.is_shuffling()),
        Span::from("   "),
        control("⏮", state.can_play_previous(), false),
        Span::from("   "),
        control(play_icon, state.can_toggle_play(), false),
        Span::from("   "),
        control("⏭", state.can_play_next(), false),
        Span::from("   "),
        control("↻", state.can_toggle_loop(), state.player.is_looping()),
    ])
}

use super::{ACCENT, FADED, HIGHLIGHT, PLAYING_ICON, PRIMARY};
use crate::ui_state::UiState;
use ratatui::{
    layout::{Alignment, Constraint, Flex},
    style::{Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Cell, Padding, Row, StatefulWidget, Table},
};

const COLUMN_SPACING: u16 = 2;

const PADDING: Padding = Padding {
    left: 2,
    right: 2,
    top: 1,
    bottom: 0,
};

pub struct EpisodeTable;
impl StatefulWidget for EpisodeTable {
    type State = UiState;

    fn render(
        self,
        area: ratatui::prelude::Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
    ) {
        let title = Line::from_iter([
            Span::from(" ♠ Latest episodes ♠ ").fg(HIGHLIGHT),
            Span::from(format!("[{}] ", state.episodes.len())).fg(FADED),
        ]);

        let header = Row::new([
            Cell::default(),
            Cell::from("Episode").fg(HIGHLIGHT),
            Cell::from("Members").fg(HIGHLIGHT),
            Cell::from("Date").fg(HIGHLIGHT),
            Cell::from(Text::from("Length").right_aligned()).fg(HIGHLIGHT),
        ])
        .bold()
        .bottom_margin(1);

        let rows = state
            .episodes
            .iter()
            .map(|episode| {
                let marker = match state.is_current(episode) {
                    true => Cell::from(PLAYING_ICON).fg(ACCENT),
                    false => Cell::default(),
                };

                Row::new([
                    marker,
                    Cell::from(episode.title.clone()).fg(PRIMARY),
                    Cell::from(episode.members.clone()).fg(FADED),
                    Cell::from(episode.published_at.clone()).fg(FADED),
                    Cell::from(Text::from(episode.duration_str_compact()).right_aligned())
                        .fg(FADED),
                ])
            })
            .collect::<Vec<Row>>();

        let widths = [
            Constraint::Length(1),
            Constraint::Min(25),
            Constraint::Max(24),
            Constraint::Length(9),
            Constraint::Length(7),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::bordered()
                    .title_top(title.alignment(Alignment::Center))
                    .padding(PADDING),
            )
            .column_spacing(COLUMN_SPACING)
            .flex(Flex::Start)
            .row_highlight_style(Style::new().fg(HIGHLIGHT).bg(FADED));

        StatefulWidget::render(table, area, buf, &mut state.display_state.table_pos);
    }
}

use crate::ui_state::UiState;
use ratatui::{
    layout::Alignment,
    style::{Color, Stylize},
    widgets::{Block, BorderType, Padding, Paragraph, StatefulWidget, Widget, Wrap},
};

pub struct ErrorMsg;
impl StatefulWidget for ErrorMsg {
    type State = UiState;

    fn render(
        self,
        area: ratatui::prelude::Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
    ) {
        let message = state.get_error().unwrap_or("No error to display");

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title_top(" Something went wrong ")
            .title_bottom(" [esc] dismiss ")
            .title_alignment(Alignment::Center)
            .padding(Padding::symmetric(4, 1));

        Paragraph::new(message)
            .wrap(Wrap { trim: true })
            .centered()
            .block(block)
            .fg(Color::White)
            .bg(Color::Red)
            .render(area, buf);
    }
}

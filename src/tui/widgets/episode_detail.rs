use super::{ACCENT, FADED, HIGHLIGHT, PRIMARY, SEPARATOR};
use crate::ui_state::UiState;
use ratatui::{
    layout::Alignment,
    style::Stylize,
    text::{Line, Span},
    widgets::{Block, Padding, Paragraph, StatefulWidget, Widget, Wrap},
};

const PADDING: Padding = Padding {
    left: 4,
    right: 4,
    top: 1,
    bottom: 1,
};

pub struct EpisodeDetail;
impl StatefulWidget for EpisodeDetail {
    type State = UiState;

    fn render(
        self,
        area: ratatui::prelude::Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
    ) {
        let Some(episode) = &state.detail else {
            Block::bordered().render(area, buf);
            return;
        };

        let byline = Line::from_iter([
            Span::from(episode.members.clone()).fg(PRIMARY),
            Span::from(SEPARATOR).fg(FADED),
            Span::from(episode.published_at.clone()).fg(FADED),
            Span::from(SEPARATOR).fg(FADED),
            Span::from(episode.duration_str()).fg(FADED),
        ])
        .centered();

        // Episode descriptions come down as html fragments.
        let description = strip_tags(&episode.description);

        let lines = [
            byline,
            Line::default(),
            Line::from(description).fg(PRIMARY),
        ];

        Paragraph::new(Vec::from(lines))
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .title_top(format!(" {} ", episode.title).fg(HIGHLIGHT))
                    .title_bottom(" [enter] play ✧ [tab] back ".fg(ACCENT))
                    .title_alignment(Alignment::Center)
                    .padding(PADDING),
            )
            .render(area, buf);
    }
}

/// Drops html tags and collapses the leftover whitespace so paragraph
/// wrapping has clean input to work with.
fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => {
                in_tag = false;
                text.push(' ');
            }
            _ if !in_tag => text.push(c),
            _ => (),
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::strip_tags;

    #[test]
    fn strip_tags_flattens_html_fragments() {
        let html = "<p>Nesse episódio:  <a href=\"x\">link</a> e mais</p><p>outro</p>";
        assert_eq!(strip_tags(html), "Nesse episódio: link e mais outro");
    }

    #[test]
    fn strip_tags_leaves_plain_text_alone() {
        assert_eq!(strip_tags("just words"), "just words");
    }
}

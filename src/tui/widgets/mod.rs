mod episode_detail;
mod episode_table;
mod error;
mod player_bar;
mod status_line;

pub use episode_detail::EpisodeDetail;
pub use episode_table::EpisodeTable;
pub use error::ErrorMsg;
pub use player_bar::PlayerBar;
pub use status_line::StatusLine;

use ratatui::style::Color;

const PLAYING_ICON: &str = "▶";
const PAUSED_ICON: &str = "⏸";
const SEPARATOR: &str = " ✧ ";

const ACCENT: Color = Color::Green;
const FADED: Color = Color::DarkGray;
const PRIMARY: Color = Color::Gray;
const HIGHLIGHT: Color = Color::White;

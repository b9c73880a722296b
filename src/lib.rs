use anyhow::{Result, anyhow};
use ratatui::crossterm::{
    ExecutableCommand,
    cursor::MoveToColumn,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::{
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};
use xxhash_rust::xxh3::xxh3_64;

pub mod app_core;
pub mod config;
pub mod domain;
pub mod fetcher;
pub mod key_handler;
pub mod player;
pub mod tui;
pub mod ui_state;

pub use config::Config;
pub use fetcher::PodcastApi;
pub use ui_state::UiState;

// ~30fps
pub const REFRESH_RATE: Duration = Duration::from_millis(33);

pub enum DurationStyle {
    /// Zero-padded `HH:MM:SS`
    Clock,
    /// `M:SS`, hours folded into minutes
    Compact,
}

pub fn get_readable_duration(duration: Duration, style: DurationStyle) -> String {
    let mut secs = duration.as_secs();
    let mut mins = secs / 60;
    secs %= 60;

    match style {
        DurationStyle::Clock => {
            let hours = mins / 60;
            mins %= 60;
            format!("{hours:02}:{mins:02}:{secs:02}")
        }
        DurationStyle::Compact => format!("{mins}:{secs:02}"),
    }
}

/// Cache filename for a remote audio url, keyed on the url itself
/// so re-fetching the same episode hits the same file.
pub fn audio_cache_key(url: &str) -> String {
    let hash = xxh3_64(url.as_bytes());

    let ext = url
        .rsplit('/')
        .next()
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .filter(|ext| ext.len() <= 4 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or("mp3");

    format!("{hash:016x}.{ext}")
}

pub fn overwrite_line(message: &str) {
    let mut stdout = std::io::stdout();
    stdout
        .execute(MoveToColumn(0))
        .unwrap()
        .execute(Clear(ClearType::CurrentLine))
        .unwrap()
        .execute(Print(message))
        .unwrap();
    stdout.flush().unwrap();
}

pub fn expand_tilde<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy();

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    if path_str == "~" {
        let home =
            dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory!"))?;
        return Ok(home);
    }

    if path_str.starts_with("~/") || path_str.starts_with("~\\") {
        let home =
            dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory!"))?;
        return Ok(home.join(&path_str[2..]));
    }

    Err(anyhow!("Error reading directory with tilde (~)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_style_pads_every_field() {
        let dur = Duration::from_secs(3661);
        assert_eq!(get_readable_duration(dur, DurationStyle::Clock), "01:01:01");
    }

    #[test]
    fn clock_style_zero() {
        assert_eq!(
            get_readable_duration(Duration::ZERO, DurationStyle::Clock),
            "00:00:00"
        );
    }

    #[test]
    fn compact_style_folds_hours_into_minutes() {
        let dur = Duration::from_secs(3725);
        assert_eq!(get_readable_duration(dur, DurationStyle::Compact), "62:05");
    }

    #[test]
    fn cache_key_keeps_extension() {
        let key = audio_cache_key("https://example.com/podcasts/ep01.mp3");
        assert!(key.ends_with(".mp3"));
        assert_eq!(key.len(), 16 + 4);
    }

    #[test]
    fn cache_key_defaults_to_mp3() {
        let key = audio_cache_key("https://example.com/stream/audio");
        assert!(key.ends_with(".mp3"));
    }

    #[test]
    fn cache_key_is_stable() {
        let a = audio_cache_key("https://example.com/a.m4a");
        let b = audio_cache_key("https://example.com/a.m4a");
        assert_eq!(a, b);
    }
}

use crate::{DurationStyle, get_readable_duration};
use std::time::Duration;

/// A normalized episode record, immutable once built by the fetcher.
/// Shared as `Arc<Episode>` between the list, the queue and the player bar.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Episode {
    pub id: String,
    pub title: String,
    pub members: String,
    pub thumbnail: String,
    pub published_at: String,
    pub description: String,
    pub duration: Duration,
    pub url: String,
}

impl Episode {
    pub fn duration_secs(&self) -> u64 {
        self.duration.as_secs()
    }

    pub fn duration_str(&self) -> String {
        get_readable_duration(self.duration, DurationStyle::Clock)
    }

    pub fn duration_str_compact(&self) -> String {
        get_readable_duration(self.duration, DurationStyle::Compact)
    }
}

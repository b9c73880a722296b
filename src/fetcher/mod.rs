mod client;
mod record;

pub use client::PodcastApi;
pub use record::EpisodeRecord;

use super::EpisodeRecord;
use crate::{Config, audio_cache_key, domain::Episode};
use anyhow::{Context, Result, anyhow};
use std::{fs, path::PathBuf, sync::Arc, time::Duration};
use ureq::Agent;

/// Blocking client for the episode backend. Cheap to clone; downloads run
/// on worker threads with their own clone.
#[derive(Clone)]
pub struct PodcastApi {
    agent: Agent,
    base_url: String,
    cache_dir: PathBuf,
}

impl PodcastApi {
    pub fn new(config: &Config) -> Result<Self> {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.request_timeout_secs)))
            .build()
            .into();

        Ok(PodcastApi {
            agent,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            cache_dir: config.audio_cache_dir()?,
        })
    }

    /// `GET /episodes`, newest first.
    pub fn list_episodes(&self) -> Result<Vec<Arc<Episode>>> {
        let url = format!("{}/episodes", self.base_url);

        let records: Vec<EpisodeRecord> = self
            .agent
            .get(&url)
            .query("_sort", "published_at")
            .query("_order", "desc")
            .call()
            .with_context(|| format!("Could not reach episode backend at {url}"))?
            .body_mut()
            .read_json()?;

        records
            .into_iter()
            .map(|r| r.normalize().map(Arc::new))
            .collect()
    }

    /// `GET /episodes/{slug}`, the full record including description.
    pub fn get_episode(&self, slug: &str) -> Result<Episode> {
        let url = format!("{}/episodes/{slug}", self.base_url);

        let record: EpisodeRecord = self
            .agent
            .get(&url)
            .call()
            .with_context(|| format!("Could not fetch episode {slug:?}"))?
            .body_mut()
            .read_json()?;

        record.normalize()
    }

    /// Resolve an episode's audio url to a local file, downloading on a
    /// cache miss. The write goes through a `.part` file so an aborted
    /// download never leaves a playable-looking truncated file behind.
    pub fn fetch_audio(&self, url: &str) -> Result<PathBuf> {
        let path = self.cache_dir.join(audio_cache_key(url));

        if path.exists() {
            return Ok(path);
        }

        let response = self
            .agent
            .get(url)
            .call()
            .with_context(|| format!("Could not download episode audio from {url}"))?;

        let (_, body) = response.into_parts();
        let mut reader = body.into_reader();

        let partial = path.with_extension("part");
        let mut file = fs::File::create(&partial)?;

        if let Err(e) = std::io::copy(&mut reader, &mut file) {
            let _ = fs::remove_file(&partial);
            return Err(anyhow!("Episode download failed: {e}"));
        }

        fs::rename(&partial, &path)?;
        Ok(path)
    }
}

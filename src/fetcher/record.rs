use crate::domain::Episode;
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::time::Duration;

/// Episode as the backend serves it. `normalize` turns one of these into
/// the view-ready `Episode`.
#[derive(Deserialize)]
pub struct EpisodeRecord {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub members: String,
    pub published_at: String,
    #[serde(default)]
    pub description: String,
    pub file: FileRecord,
}

#[derive(Deserialize)]
pub struct FileRecord {
    pub url: String,
    pub duration: RawDuration,
}

// The backend is loose about this field: some records carry a JSON number,
// others a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum RawDuration {
    Number(f64),
    Text(String),
}

impl RawDuration {
    fn as_secs(&self) -> Result<u64> {
        let secs = match self {
            RawDuration::Number(n) => *n,
            RawDuration::Text(s) => s
                .trim()
                .parse::<f64>()
                .with_context(|| format!("Unparseable episode duration: {s:?}"))?,
        };

        Ok(secs.max(0.0) as u64)
    }
}

impl EpisodeRecord {
    pub fn normalize(self) -> Result<Episode> {
        let duration = Duration::from_secs(self.file.duration.as_secs()?);
        let published_at = format_published(&self.published_at)?;

        Ok(Episode {
            id: self.id,
            title: self.title,
            members: self.members,
            thumbnail: self.thumbnail,
            published_at,
            description: self.description,
            duration,
            url: self.file.url,
        })
    }
}

/// Short locale-ish date, e.g. "8 Jan 21".
fn format_published(raw: &str) -> Result<String> {
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .with_context(|| format!("Unparseable publication date: {raw:?}"))?;

    Ok(date.format("%-d %b %y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = r#"{
        "id": "a-importancia-da-contribuicao-em-open-source",
        "title": "Faladev #30",
        "thumbnail": "https://example.com/thumb.jpg",
        "members": "Diego e Tiago",
        "published_at": "2021-01-08 12:00:00",
        "description": "<p>Nesse episódio...</p>",
        "file": {
            "url": "https://example.com/audio/30.mp3",
            "duration": "3981"
        }
    }"#;

    #[test]
    fn normalizes_string_duration() {
        let record: EpisodeRecord = serde_json::from_str(RAW).unwrap();
        let episode = record.normalize().unwrap();
        assert_eq!(episode.duration, Duration::from_secs(3981));
        assert_eq!(episode.duration_str(), "01:06:21");
    }

    #[test]
    fn normalizes_numeric_duration() {
        let raw = RAW.replace("\"3981\"", "3981.4");
        let record: EpisodeRecord = serde_json::from_str(&raw).unwrap();
        let episode = record.normalize().unwrap();
        assert_eq!(episode.duration, Duration::from_secs(3981));
    }

    #[test]
    fn reformats_publication_date() {
        let record: EpisodeRecord = serde_json::from_str(RAW).unwrap();
        let episode = record.normalize().unwrap();
        assert_eq!(episode.published_at, "8 Jan 21");
    }

    #[test]
    fn accepts_rfc3339_dates() {
        let raw = RAW.replace("2021-01-08 12:00:00", "2021-01-08T12:00:00.000Z");
        let record: EpisodeRecord = serde_json::from_str(&raw).unwrap();
        assert_eq!(record.normalize().unwrap().published_at, "8 Jan 21");
    }

    #[test]
    fn missing_description_defaults_to_empty() {
        let raw = RAW.replace("\"description\": \"<p>Nesse episódio...</p>\",", "");
        let record: EpisodeRecord = serde_json::from_str(&raw).unwrap();
        assert!(record.normalize().unwrap().description.is_empty());
    }

    #[test]
    fn rejects_garbage_duration() {
        let raw = RAW.replace("\"3981\"", "\"a while\"");
        let record: EpisodeRecord = serde_json::from_str(&raw).unwrap();
        assert!(record.normalize().is_err());
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Serializable snapshot of one episode.
///
/// The live episode type carries its podcast handle and a lazily resolved
/// audio link; this is what gets written out as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub url: String,
    pub title: String,
    pub description: String,
    /// `None` when the listing's date text was not recognized.
    pub release_date: Option<NaiveDate>,
    pub podcast_url: String,
    /// `None` until the episode's detail page has been resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

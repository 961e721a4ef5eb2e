use crate::error::Result;
use crate::markup::ListingEntry;
use crate::podcast::PodcastContext;
use podlist_model::{EpisodeRecord, ReleaseDate};
use std::fmt;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// One episode scraped from a listing page.
///
/// Episodes are created fresh on every listing fetch, so two aggregation
/// calls may hand out distinct `Episode` values for the same URL.
pub struct Episode {
    /// Absolute URL of the episode's detail page. Unique per episode.
    pub url: String,
    pub title: String,
    pub description: String,
    pub release_date: ReleaseDate,
    podcast: Arc<PodcastContext>,
    audio_url: OnceCell<String>,
}

impl Episode {
    pub(crate) fn from_listing(entry: ListingEntry, podcast: Arc<PodcastContext>) -> Self {
        Self {
            url: entry.url,
            title: entry.title,
            description: entry.description,
            release_date: entry.release_date,
            podcast,
            audio_url: OnceCell::new(),
        }
    }

    /// URL of the podcast this episode was listed under.
    pub fn podcast_url(&self) -> &str {
        &self.podcast.url
    }

    /// The audio link if it has already been resolved.
    pub fn cached_audio_url(&self) -> Option<&str> {
        self.audio_url.get().map(String::as_str)
    }

    /// Resolve the episode's audio link from its detail page.
    ///
    /// The first successful resolution is kept for the life of the episode.
    /// Concurrent callers share a single fetch. A failed resolution leaves
    /// nothing cached, so a later call fetches again.
    pub async fn audio_url(&self) -> Result<&str> {
        self.audio_url
            .get_or_try_init(|| self.resolve_audio_url())
            .await
            .map(String::as_str)
    }

    async fn resolve_audio_url(&self) -> Result<String> {
        tracing::debug!(url = %self.url, "Resolving audio link");
        let body = self.podcast.fetcher.fetch(&self.url).await?;
        let link = self.podcast.markup.parse_audio_link(&self.url, &body)?;
        tracing::debug!(url = %self.url, audio = %link, "Resolved audio link");
        Ok(link)
    }

    pub fn to_record(&self) -> EpisodeRecord {
        EpisodeRecord {
            url: self.url.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            release_date: self.release_date.known(),
            podcast_url: self.podcast.url.clone(),
            audio_url: self.cached_audio_url().map(str::to_string),
        }
    }
}

impl fmt::Display for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "title : {}, url: {}", self.title, self.url)
    }
}

impl fmt::Debug for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Episode")
            .field("url", &self.url)
            .field("title", &self.title)
            .field("release_date", &self.release_date)
            .field("podcast", &self.podcast.url)
            .field("audio_url", &self.audio_url.get())
            .finish_non_exhaustive()
    }
}

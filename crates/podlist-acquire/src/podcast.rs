use crate::episode::Episode;
use crate::error::Result;
use crate::fetch::{FetchConfig, HttpFetcher, PageFetcher};
use crate::markup::Markup;
use podlist_model::{EpisodeWindow, ReleaseDate, DEFAULT_PAGE_SIZE};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinSet;

pub const DEFAULT_SITE_HOST: &str = "https://gpodder.net";

/// Most listing pages one `episodes` call will fetch (10 000 episodes at
/// the default page size).
pub const DEFAULT_MAX_PAGES: usize = 500;

/// An aggregated, newest-first list of episodes.
///
/// Shared so a repeated request can hand back the cached list itself.
pub type EpisodeList = Arc<Vec<Arc<Episode>>>;

/// Where the directory lives and how it paginates.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Scheme and host prefixed to site-relative episode links.
    pub site_host: String,
    /// Episodes per listing page.
    pub page_size: usize,
    /// Upper bound on pages fetched for one window.
    pub max_pages: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_host: DEFAULT_SITE_HOST.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

/// What an episode needs from its podcast: identity, plus the fetcher and
/// markup used to resolve its audio link.
pub(crate) struct PodcastContext {
    pub(crate) url: String,
    pub(crate) site: SiteConfig,
    pub(crate) fetcher: Arc<dyn PageFetcher>,
    pub(crate) markup: Markup,
}

impl PodcastContext {
    fn listing_url(&self, page: usize) -> String {
        format!("{}/-episodes?page={page}", self.url.trim_end_matches('/'))
    }
}

/// Result of the last aggregation, keyed by the window that produced it.
struct EpisodeCache {
    window: EpisodeWindow,
    episodes: EpisodeList,
}

/// A podcast on the directory site, identified by its base URL.
pub struct Podcast {
    context: Arc<PodcastContext>,
    cache: Mutex<Option<EpisodeCache>>,
}

impl Podcast {
    /// A podcast on the default site, fetched over HTTP with default settings.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_config(url, SiteConfig::default(), &FetchConfig::default())
    }

    pub fn with_config(url: impl Into<String>, site: SiteConfig, fetch: &FetchConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(fetch)?;
        Ok(Self::with_fetcher(url, site, Arc::new(fetcher)))
    }

    pub fn with_fetcher(url: impl Into<String>, site: SiteConfig, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            context: Arc::new(PodcastContext {
                url: url.into(),
                site,
                fetcher,
                markup: Markup::default(),
            }),
            cache: Mutex::new(None),
        }
    }

    pub fn url(&self) -> &str {
        &self.context.url
    }

    /// URL of the given 1-indexed listing page.
    pub fn listing_url(&self, page: usize) -> String {
        self.context.listing_url(page)
    }

    /// Fetch the episodes covering `offset`/`count`, newest first.
    ///
    /// Every listing page the window touches is fetched concurrently. A page
    /// that fails to fetch or parse is logged and contributes nothing; the
    /// call itself never fails. The merged list is sorted by release date
    /// and cut to at most `count` entries. Windows needing more than
    /// `SiteConfig::max_pages` pages only fetch the first `max_pages`.
    ///
    /// The result is cached against the exact `(offset, count)` pair, partial
    /// or not. Repeating the same request returns the cached list without
    /// fetching; any other request replaces it.
    pub async fn episodes(&self, offset: usize, count: usize) -> EpisodeList {
        let window = EpisodeWindow::new(offset, count);
        if let Some(cached) = self.cached(window) {
            tracing::debug!(podcast = %self.url(), offset, count, "Episode list cache hit");
            return cached;
        }

        let site = &self.context.site;
        let needed = window.pages(site.page_size);
        let span = needed.capped(site.max_pages);
        if span.len < needed.len {
            tracing::warn!(
                podcast = %self.url(),
                needed = needed.len,
                max_pages = site.max_pages,
                "Window needs more listing pages than allowed; fetching the first pages only"
            );
        }
        tracing::info!(
            podcast = %self.url(),
            offset,
            count,
            first_page = span.first,
            pages = span.len,
            "Fetching episode listing"
        );

        let mut tasks = JoinSet::new();
        for page in span.numbers() {
            let context = Arc::clone(&self.context);
            tasks.spawn(async move {
                let result = fetch_listing_page(&context, page).await;
                (page, result)
            });
        }

        // Each task owns its page's episodes; they are only combined here.
        let mut pages: Vec<(usize, Vec<Episode>)> = Vec::with_capacity(span.len);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((page, Ok(episodes))) => {
                    tracing::debug!(page, episodes = episodes.len(), "Parsed listing page");
                    pages.push((page, episodes));
                }
                Ok((page, Err(e))) => {
                    tracing::warn!(page, error = %e, "Listing page contributed no episodes");
                }
                Err(e) => {
                    tracing::error!(error = %e, "Listing page task failed");
                }
            }
        }
        pages.sort_by_key(|(page, _)| *page);

        let mut merged: Vec<Arc<Episode>> = pages
            .into_iter()
            .flat_map(|(_, episodes)| episodes)
            .map(Arc::new)
            .collect();
        let found = merged.len();
        merged.sort_by(|a, b| ReleaseDate::newest_first(&a.release_date, &b.release_date));
        merged.truncate(count);

        let episodes: EpisodeList = Arc::new(merged);
        self.store(window, Arc::clone(&episodes));
        tracing::info!(podcast = %self.url(), found, returned = episodes.len(), "Episode listing ready");

        episodes
    }

    fn cached(&self, window: EpisodeWindow) -> Option<EpisodeList> {
        let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache
            .as_ref()
            .filter(|cached| cached.window == window)
            .map(|cached| Arc::clone(&cached.episodes))
    }

    fn store(&self, window: EpisodeWindow, episodes: EpisodeList) {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        *cache = Some(EpisodeCache { window, episodes });
    }
}

async fn fetch_listing_page(context: &Arc<PodcastContext>, page: usize) -> Result<Vec<Episode>> {
    let url = context.listing_url(page);
    let body = context.fetcher.fetch(&url).await?;
    let entries = context.markup.parse_listing(&url, &body, &context.site.site_host)?;

    Ok(entries
        .into_iter()
        .map(|entry| Episode::from_listing(entry, Arc::clone(context)))
        .collect())
}

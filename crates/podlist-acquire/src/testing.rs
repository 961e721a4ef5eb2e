//! In-memory fetcher and HTML fixtures shared by the unit tests.

use crate::error::{Result, ScrapeError};
use crate::fetch::PageFetcher;
use crate::podcast::{Podcast, SiteConfig};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub(crate) const PODCAST_URL: &str = "https://gpodder.net/podcast/example";

enum StubPage {
    Body(Vec<u8>),
    Status(u16),
    Panic,
}

/// Serves canned pages and counts fetches per URL. Unknown URLs answer 404.
pub(crate) struct StubFetcher {
    pages: HashMap<String, StubPage>,
    calls: Mutex<HashMap<String, usize>>,
}

impl StubFetcher {
    pub(crate) fn new() -> Self {
        Self {
            pages: HashMap::new(),
            calls: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn page(self, url: &str, html: impl Into<String>) -> Self {
        self.bytes(url, html.into().into_bytes())
    }

    pub(crate) fn bytes(mut self, url: &str, body: Vec<u8>) -> Self {
        self.pages.insert(url.to_string(), StubPage::Body(body));
        self
    }

    pub(crate) fn status(mut self, url: &str, status: u16) -> Self {
        self.pages.insert(url.to_string(), StubPage::Status(status));
        self
    }

    pub(crate) fn panics(mut self, url: &str) -> Self {
        self.pages.insert(url.to_string(), StubPage::Panic);
        self
    }

    pub(crate) fn calls(&self, url: &str) -> usize {
        self.calls.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        *self.calls.lock().unwrap().entry(url.to_string()).or_insert(0) += 1;
        // let sibling tasks interleave as they would on a real network
        tokio::task::yield_now().await;

        match self.pages.get(url) {
            Some(StubPage::Body(body)) => Ok(body.clone()),
            Some(StubPage::Status(status)) => Err(ScrapeError::Fetch {
                url: url.to_string(),
                reason: format!("HTTP {status}"),
            }),
            Some(StubPage::Panic) => panic!("stub fetch of {url} panicked"),
            None => Err(ScrapeError::Fetch {
                url: url.to_string(),
                reason: "HTTP 404".to_string(),
            }),
        }
    }
}

/// A podcast at [`PODCAST_URL`] on the default site, backed by `stub`.
pub(crate) fn podcast_with(stub: StubFetcher) -> (Podcast, Arc<StubFetcher>) {
    let stub = Arc::new(stub);
    let podcast = Podcast::with_fetcher(PODCAST_URL, SiteConfig::default(), stub.clone());
    (podcast, stub)
}

/// A listing page with one `.episode` block per `(title, href, description, released)`.
pub(crate) fn listing_page(entries: &[(&str, Option<&str>, &str, &str)]) -> String {
    let mut html = String::from("<html><body>\n");
    for (title, href, description, released) in entries {
        let link = match href {
            Some(href) => format!(r#"<a href="{href}">{title}</a>"#),
            None => format!("<a>{title}</a>"),
        };
        html.push_str(&format!(
            r#"<div class="episode">
    <div class="header">
        <span class="title">{link}</span>
        <span class="released">
            {released}
        </span>
    </div>
    <div class="description">
        {description}
    </div>
</div>
"#
        ));
    }
    html.push_str("</body></html>\n");
    html
}

/// A detail page whose second `.description` link is the audio file, if any.
pub(crate) fn detail_page(audio: Option<&str>) -> String {
    let audio_link = audio
        .map(|href| format!(r#"<a href="{href}">Download</a>"#))
        .unwrap_or_default();
    format!(
        r#"<html><body>
<div class="description">
    <a href="{PODCAST_URL}">Example Podcast</a>
    {audio_link}
</div>
</body></html>
"#
    )
}

//! Everything that knows the directory site's HTML structure.
//!
//! Listing pages hold one `.episode` block per episode; detail pages carry
//! the audio download as the second link inside `.description`. When the
//! site changes its markup, this module is the only one that should need
//! to follow.

use crate::error::{Result, ScrapeError};
use crate::normalize;
use podlist_model::ReleaseDate;
use scraper::{ElementRef, Html, Selector};

pub const EPISODE_ENTRY: &str = ".episode";
pub const EPISODE_LINK: &str = ".header > .title > a";
pub const EPISODE_DESCRIPTION: &str = ".description";
pub const EPISODE_RELEASED: &str = ".header > .released";
pub const AUDIO_LINK: &str = ".description > a:nth-child(2)";

/// One episode as it appears on a listing page.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingEntry {
    /// Absolute URL of the episode's detail page.
    pub url: String,
    pub title: String,
    pub description: String,
    pub release_date: ReleaseDate,
}

/// Compiled selectors for listing and detail pages.
#[derive(Debug, Clone)]
pub struct Markup {
    entry: Selector,
    link: Selector,
    description: Selector,
    released: Selector,
    audio_link: Selector,
}

impl Default for Markup {
    fn default() -> Self {
        Self {
            entry: Selector::parse(EPISODE_ENTRY).expect("valid selector"),
            link: Selector::parse(EPISODE_LINK).expect("valid selector"),
            description: Selector::parse(EPISODE_DESCRIPTION).expect("valid selector"),
            released: Selector::parse(EPISODE_RELEASED).expect("valid selector"),
            audio_link: Selector::parse(AUDIO_LINK).expect("valid selector"),
        }
    }
}

impl Markup {
    /// Extract episode entries from a listing page, in page order.
    ///
    /// Entries without a link are skipped. Relative links are made absolute
    /// against `site_host`.
    pub fn parse_listing(&self, url: &str, body: &[u8], site_host: &str) -> Result<Vec<ListingEntry>> {
        let document = parse_document(url, body)?;

        let mut entries = Vec::new();
        for entry in document.select(&self.entry) {
            let link = entry.select(&self.link).next();
            let Some(href) = link.and_then(|a| a.value().attr("href")) else {
                tracing::debug!(url, "Skipping listing entry without a link");
                continue;
            };

            let title = link.map(element_text).unwrap_or_default();
            let description = entry.select(&self.description).map(element_text).collect::<String>();
            let released = entry.select(&self.released).map(element_text).collect::<String>();

            let release_date = ReleaseDate::parse(&released);
            if !release_date.is_known() {
                tracing::debug!(url, raw = %released.trim(), "Unrecognized release date");
            }

            entries.push(ListingEntry {
                url: absolute_url(site_host, href.trim()),
                title: normalize::collapse_whitespace(&title),
                description: normalize::clean_text(&description),
                release_date,
            });
        }

        Ok(entries)
    }

    /// Extract the audio download link from an episode's detail page.
    pub fn parse_audio_link(&self, url: &str, body: &[u8]) -> Result<String> {
        let document = parse_document(url, body)?;

        document
            .select(&self.audio_link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| href.trim().to_string())
            .filter(|href| !href.is_empty())
            .ok_or_else(|| ScrapeError::NotFound {
                url: url.to_string(),
                what: "audio link",
            })
    }
}

/// Prefix a site-relative link with the site host. Absolute links pass through.
pub fn absolute_url(site_host: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!("{}{}", site_host.trim_end_matches('/'), href)
    }
}

/// html5ever accepts any text, so the only bodies rejected here are ones
/// that are not UTF-8 or carry no content at all.
fn parse_document(url: &str, body: &[u8]) -> Result<Html> {
    let parse_error = |reason: String| ScrapeError::Parse {
        url: url.to_string(),
        reason,
    };

    let text = std::str::from_utf8(body).map_err(|e| parse_error(format!("body is not valid UTF-8: {e}")))?;
    if text.trim().is_empty() {
        return Err(parse_error("empty document".to_string()));
    }

    Ok(Html::parse_document(text))
}

fn element_text(element: ElementRef) -> String {
    element.text().collect()
}

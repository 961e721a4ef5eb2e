pub mod episode;
pub mod error;
pub mod fetch;
pub mod markup;
pub mod normalize;
pub mod podcast;
pub mod search;

#[cfg(test)]
mod testing;

pub use episode::Episode;
pub use error::{Result, ScrapeError};
pub use fetch::{FetchConfig, HttpFetcher, PageFetcher};
pub use markup::Markup;
pub use podcast::{EpisodeList, Podcast, SiteConfig};
pub use search::search_episodes;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Transport failure or a non-success HTTP status.
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The body could not be used as an HTML document.
    #[error("{url} is not a usable HTML document: {reason}")]
    Parse { url: String, reason: String },

    /// The page parsed but the expected element was absent.
    #[error("{what} not found on {url}")]
    NotFound { url: String, what: &'static str },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

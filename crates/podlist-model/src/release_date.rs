use chrono::NaiveDate;
use std::cmp::Ordering;
use std::fmt;

/// Date layouts the listing pages use, tried in order.
///
/// chrono's month parser accepts both the short and long month name for
/// `%b`/`%B`, so "May 5, 2019" and "January 2, 2006" both land on the
/// second layout while "Jan. 2, 2006" needs the literal dot of the first.
const FORMATS: &[&str] = &["%b. %d, %Y", "%B %d, %Y"];

/// Abbreviations rewritten before parsing. "Sept." is not a month name
/// chrono recognizes.
const ABBREVIATIONS: &[(&str, &str)] = &[("Sept.", "September")];

/// Release date of an episode as scraped from a listing page.
///
/// Parsing is best effort: text that matches none of the known layouts
/// becomes [`ReleaseDate::Unknown`] instead of an error, and sorts as the
/// Unix epoch (the oldest possible date for this site).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReleaseDate {
    Known(NaiveDate),
    #[default]
    Unknown,
}

impl ReleaseDate {
    /// Parse the site's date text, e.g. "Jan. 2, 2006" or "Sept. 30, 2019".
    pub fn parse(raw: &str) -> Self {
        let mut text = raw.trim().to_string();
        for (abbrev, full) in ABBREVIATIONS {
            text = text.replace(abbrev, full);
        }

        FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(&text, fmt).ok())
            .map(ReleaseDate::Known)
            .unwrap_or(ReleaseDate::Unknown)
    }

    /// The date used for ordering. Unknown dates collapse to the epoch.
    pub fn date(&self) -> NaiveDate {
        match self {
            ReleaseDate::Known(date) => *date,
            ReleaseDate::Unknown => NaiveDate::default(),
        }
    }

    /// The parsed date, or `None` if the text was not recognized.
    pub fn known(&self) -> Option<NaiveDate> {
        match self {
            ReleaseDate::Known(date) => Some(*date),
            ReleaseDate::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, ReleaseDate::Known(_))
    }

    /// Ordering that puts the most recent release first.
    pub fn newest_first(a: &ReleaseDate, b: &ReleaseDate) -> Ordering {
        b.date().cmp(&a.date())
    }
}

impl fmt::Display for ReleaseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseDate::Known(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            ReleaseDate::Unknown => f.write_str("unknown"),
        }
    }
}

use crate::episode::Episode;
use podlist_model::ReleaseDate;
use regex::RegexBuilder;
use std::sync::Arc;

/// Episodes whose title or description matches `query`, newest first.
///
/// `query` is a case-insensitive regular expression, so plain words work
/// as substring searches. A query that is not a valid pattern matches
/// nothing.
pub fn search_episodes(episodes: &[Arc<Episode>], query: &str) -> Vec<Arc<Episode>> {
    let pattern = match RegexBuilder::new(query).case_insensitive(true).build() {
        Ok(pattern) => pattern,
        Err(e) => {
            tracing::debug!(query, error = %e, "Search query is not a valid pattern");
            return Vec::new();
        }
    };

    let mut matched: Vec<Arc<Episode>> = episodes
        .iter()
        .filter(|e| pattern.is_match(&e.title) || pattern.is_match(&e.description))
        .cloned()
        .collect();
    matched.sort_by(|a, b| ReleaseDate::newest_first(&a.release_date, &b.release_date));

    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::podcast::EpisodeList;
    use crate::testing::{listing_page, podcast_with, StubFetcher, PODCAST_URL};

    async fn sample_episodes() -> EpisodeList {
        let stub = StubFetcher::new().page(
            &format!("{PODCAST_URL}/-episodes?page=1"),
            listing_page(&[
                ("Recorded show", Some("/podcast/example/1"), "A quiet week.", "Jan. 2, 2006"),
                ("Live from the studio", Some("/podcast/example/2"), "Guests drop by.", "March 3, 2010"),
                ("Mailbag", Some("/podcast/example/3"), "Answering LIVE questions.", "Sept. 30, 2019"),
                ("Interview (part 1)", Some("/podcast/example/4"), "", "May 5, 2015"),
            ]),
        );
        let (podcast, _stub) = podcast_with(stub);
        podcast.episodes(0, 20).await
    }

    fn titles(episodes: &[Arc<Episode>]) -> Vec<&str> {
        episodes.iter().map(|e| e.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_matches_title_or_description_case_insensitively() {
        let episodes = sample_episodes().await;
        let found = search_episodes(&episodes, "live");
        assert_eq!(titles(&found), vec!["Mailbag", "Live from the studio"]);
        assert!(!titles(&found).contains(&"Recorded show"));
    }

    #[tokio::test]
    async fn test_results_sorted_newest_first() {
        let episodes = sample_episodes().await;
        // reverse the input order to show the result order comes from dates
        let reversed: Vec<Arc<Episode>> = episodes.iter().rev().cloned().collect();
        let found = search_episodes(&reversed, "e");
        assert_eq!(
            titles(&found),
            vec!["Mailbag", "Interview (part 1)", "Live from the studio", "Recorded show"]
        );
    }

    #[tokio::test]
    async fn test_regex_query() {
        let episodes = sample_episodes().await;
        let found = search_episodes(&episodes, r"^(mail|recorded)");
        assert_eq!(titles(&found), vec!["Mailbag", "Recorded show"]);
    }

    #[tokio::test]
    async fn test_invalid_pattern_matches_nothing() {
        let episodes = sample_episodes().await;
        assert!(search_episodes(&episodes, "(part 1").is_empty());
    }

    #[tokio::test]
    async fn test_no_match() {
        let episodes = sample_episodes().await;
        assert!(search_episodes(&episodes, "trivia").is_empty());
        assert!(search_episodes(&[], "live").is_empty());
    }
}

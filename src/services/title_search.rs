use crate::{
    error::{AppError, AppResult},
    models::{poster_url, MovieId, MovieSummary},
    services::providers::{fetch_concurrently, MovieProvider},
};
use serde_json::Value;
use std::sync::Arc;

/// Keeps string entries, trims them, drops blanks and caps the list at `max_titles`
///
/// Order is preserved and duplicates are kept.
pub fn sanitize_titles(raw: &[Value], max_titles: usize) -> AppResult<Vec<String>> {
    let titles: Vec<String> = raw
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .take(max_titles)
        .map(str::to_string)
        .collect();

    if titles.is_empty() {
        return Err(AppError::Validation("no valid titles".to_string()));
    }

    Ok(titles)
}

/// Resolves each title to the id of its first search hit
///
/// Titles whose search fails or comes back empty are skipped. Returns the
/// resolved seed ids in title order, or a resolution error when none matched.
pub async fn resolve_titles(
    provider: &Arc<dyn MovieProvider>,
    titles: Vec<String>,
) -> AppResult<Vec<MovieId>> {
    let outcomes = fetch_concurrently(provider, titles, |provider, title| async move {
        provider.search_movies(&title).await
    })
    .await;

    let mut seeds = Vec::with_capacity(outcomes.len());

    for (title, outcome) in outcomes {
        match outcome {
            Ok(results) => match results.first().and_then(|movie| movie.id) {
                Some(movie_id) => {
                    tracing::debug!(title = %title, movie_id = movie_id, "Title resolved");
                    seeds.push(movie_id);
                }
                None => tracing::info!(title = %title, "No match for title"),
            },
            Err(e) => {
                tracing::warn!(title = %title, error = %e, "Title search failed, skipping");
            }
        }
    }

    if seeds.is_empty() {
        return Err(AppError::Resolution(
            "no valid movie titles found".to_string(),
        ));
    }

    Ok(seeds)
}

/// Service function for the title search endpoint
///
/// Delegates to the provider and fills in poster URLs for display.
pub async fn search_titles(
    provider: &Arc<dyn MovieProvider>,
    query: &str,
    image_base_url: &str,
) -> AppResult<Vec<MovieSummary>> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AppError::InvalidInput(
            "Search query cannot be empty".to_string(),
        ));
    }

    let mut results = provider.search_movies(query).await?;
    for movie in &mut results {
        movie.poster_url = poster_url(image_base_url, movie.poster_path.as_deref());
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::MockMovieProvider;
    use serde_json::json;

    fn summary(id: MovieId, title: &str) -> MovieSummary {
        MovieSummary {
            id: Some(id),
            title: title.to_string(),
            poster_path: Some(format!("/{}.jpg", id)),
            ..Default::default()
        }
    }

    fn search_fixture(query: &str) -> AppResult<Vec<MovieSummary>> {
        match query {
            "Inception" => Ok(vec![summary(27205, "Inception"), summary(64956, "Cobol Job")]),
            "The Matrix" => Ok(vec![summary(603, "The Matrix")]),
            "Broken" => Err(AppError::ExternalApi("TMDB API returned status 500".to_string())),
            _ => Ok(vec![]),
        }
    }

    fn provider_with_fixture() -> Arc<dyn MovieProvider> {
        let mut provider = MockMovieProvider::new();
        provider
            .expect_search_movies()
            .returning(|query| search_fixture(query));
        Arc::new(provider)
    }

    #[test]
    fn test_sanitize_keeps_order_and_drops_blanks() {
        let raw = vec![
            json!("  Inception "),
            json!(""),
            json!(42),
            json!("   "),
            json!(null),
            json!("The Matrix"),
        ];

        let titles = sanitize_titles(&raw, 5).unwrap();
        assert_eq!(titles, vec!["Inception".to_string(), "The Matrix".to_string()]);
    }

    #[test]
    fn test_sanitize_truncates_to_max() {
        let raw: Vec<Value> = (1..=8).map(|i| json!(format!("Movie {}", i))).collect();

        let titles = sanitize_titles(&raw, 5).unwrap();
        assert_eq!(titles.len(), 5);
        assert_eq!(titles[0], "Movie 1");
        assert_eq!(titles[4], "Movie 5");
    }

    #[test]
    fn test_sanitize_truncates_after_dropping_blanks() {
        let raw = vec![
            json!(""),
            json!("A"),
            json!(" "),
            json!("B"),
            json!("C"),
            json!("D"),
            json!("E"),
            json!("F"),
        ];

        let titles = sanitize_titles(&raw, 5).unwrap();
        assert_eq!(titles, vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_sanitize_keeps_duplicates() {
        let raw = vec![json!("Alien"), json!("Alien")];
        assert_eq!(sanitize_titles(&raw, 5).unwrap().len(), 2);
    }

    #[test]
    fn test_sanitize_empty_is_validation_error() {
        assert!(matches!(sanitize_titles(&[], 5), Err(AppError::Validation(_))));

        let blanks = vec![json!(" "), json!(""), json!({"title": "x"})];
        assert!(matches!(
            sanitize_titles(&blanks, 5),
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_resolve_takes_first_hit_in_title_order() {
        let provider = provider_with_fixture();

        let seeds = resolve_titles(
            &provider,
            vec!["The Matrix".to_string(), "Inception".to_string()],
        )
        .await
        .unwrap();

        assert_eq!(seeds, vec![603, 27205]);
    }

    #[tokio::test]
    async fn test_resolve_skips_failures_and_misses() {
        let provider = provider_with_fixture();

        let seeds = resolve_titles(
            &provider,
            vec![
                "Broken".to_string(),
                "Nothing Matches".to_string(),
                "Inception".to_string(),
            ],
        )
        .await
        .unwrap();

        assert_eq!(seeds, vec![27205]);
    }

    #[tokio::test]
    async fn test_resolve_nothing_is_resolution_error() {
        let provider = provider_with_fixture();

        let result = resolve_titles(
            &provider,
            vec!["Broken".to_string(), "Nothing Matches".to_string()],
        )
        .await;

        assert!(matches!(result, Err(AppError::Resolution(_))));
    }

    #[tokio::test]
    async fn test_search_titles_fills_poster_url() {
        let provider = provider_with_fixture();

        let results = search_titles(&provider, " The Matrix ", "https://img.test/w500")
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].poster_url,
            Some("https://img.test/w500/603.jpg".to_string())
        );
    }

    #[tokio::test]
    async fn test_search_titles_rejects_blank_query() {
        let provider: Arc<dyn MovieProvider> = Arc::new(MockMovieProvider::new());

        let result = search_titles(&provider, "  ", "https://img.test/w500").await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}

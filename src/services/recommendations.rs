use crate::{
    error::AppResult,
    models::{MovieId, MovieSummary, Recommendation},
    services::{
        aggregation::ScoreBoard,
        hydration,
        providers::{fetch_concurrently, MovieProvider},
        title_search,
    },
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// Limits and presentation settings for the recommendation pipeline
#[derive(Debug, Clone)]
pub struct RecommendationSettings {
    /// Titles considered per request
    pub max_titles: usize,
    /// Candidates kept after ranking
    pub max_results: usize,
    pub image_base_url: String,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            max_titles: 5,
            max_results: 30,
            image_base_url: "https://image.tmdb.org/t/p/w200".to_string(),
        }
    }
}

/// Generates "similar movie" recommendations from a handful of titles
///
/// Pipeline:
/// 1. Sanitize the submitted titles
/// 2. Resolve each title to a seed id (first search hit)
/// 3. Fetch each seed's similar-movies list
/// 4. Score candidates by positional weight across all lists
/// 5. Rank and keep the top `max_results`
/// 6. Hydrate survivors with details, genres and trailer
///
/// Only steps 1 and 2 can fail the request. Every later upstream failure just
/// shrinks the result.
pub struct RecommendationService {
    provider: Arc<dyn MovieProvider>,
    settings: RecommendationSettings,
}

impl RecommendationService {
    pub fn new(provider: Arc<dyn MovieProvider>, settings: RecommendationSettings) -> Self {
        Self { provider, settings }
    }

    pub async fn recommend(&self, raw_titles: &[Value]) -> AppResult<Vec<Recommendation>> {
        let start = Instant::now();

        let titles = title_search::sanitize_titles(raw_titles, self.settings.max_titles)?;
        let title_count = titles.len();

        let seeds = title_search::resolve_titles(&self.provider, titles).await?;

        tracing::info!(
            titles = title_count,
            seeds = seeds.len(),
            "Titles resolved"
        );

        let board = self.collect_similar(seeds).await;
        if board.is_empty() {
            tracing::info!(
                elapsed_ms = start.elapsed().as_millis() as u64,
                "No similar movies collected"
            );
            return Ok(Vec::new());
        }
        let candidate_count = board.len();
        let ranked = board.into_ranked(self.settings.max_results);

        let recommendations =
            hydration::hydrate(&self.provider, ranked, &self.settings.image_base_url).await;

        tracing::info!(
            candidates = candidate_count,
            recommendations = recommendations.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Recommendations generated"
        );

        Ok(recommendations)
    }

    /// Fetches each seed's similar list and folds the successful ones in seed order
    async fn collect_similar(&self, seeds: Vec<MovieId>) -> ScoreBoard {
        let outcomes = fetch_concurrently(&self.provider, seeds, |provider, seed| async move {
            provider.similar_movies(seed).await
        })
        .await;

        let mut board = ScoreBoard::new();
        let mut failures = 0usize;

        for (seed, outcome) in outcomes {
            match outcome {
                Ok(similar) => board.add_list(&similar),
                Err(e) => {
                    failures += 1;
                    tracing::warn!(
                        movie_id = seed,
                        error = %e,
                        "Similar movies fetch failed, skipping seed"
                    );
                }
            }
        }

        if failures > 0 {
            tracing::info!(
                failed_seeds = failures,
                candidates = board.len(),
                "Partial similar movies failure"
            );
        }

        board
    }

    /// Title lookup for the search endpoint
    pub async fn search_titles(&self, query: &str) -> AppResult<Vec<MovieSummary>> {
        title_search::search_titles(&self.provider, query, &self.settings.image_base_url).await
    }
}

/// Movie metadata provider abstraction
///
/// The aggregator only talks to upstream through this trait, which keeps the
/// ranking pipeline testable without a network and leaves room for another
/// metadata source later.
use crate::{
    error::{AppError, AppResult},
    models::{MovieDetails, MovieId, MovieSummary},
};
use std::future::Future;
use std::sync::Arc;

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
///
/// Every method is a single read-only upstream call bounded by the provider's
/// timeout. Failures are returned, never retried; callers decide whether a
/// failure is fatal.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieProvider: Send + Sync {
    /// Search movies by free-text title, best match first
    async fn search_movies(&self, query: &str) -> AppResult<Vec<MovieSummary>>;

    /// Movies similar to the given one, most similar first
    async fn similar_movies(&self, movie_id: MovieId) -> AppResult<Vec<MovieSummary>>;

    /// Full movie record with embedded videos and credits
    async fn movie_details(&self, movie_id: MovieId) -> AppResult<MovieDetails>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Runs one provider call per input concurrently and returns the outcomes in
/// input order, regardless of which call finished first
///
/// A task that fails to join is reported as that input's error.
pub async fn fetch_concurrently<I, R, F, Fut>(
    provider: &Arc<dyn MovieProvider>,
    inputs: Vec<I>,
    fetch: F,
) -> Vec<(I, AppResult<R>)>
where
    I: Clone + Send + 'static,
    R: Send + 'static,
    F: Fn(Arc<dyn MovieProvider>, I) -> Fut,
    Fut: Future<Output = AppResult<R>> + Send + 'static,
{
    let mut tasks = Vec::with_capacity(inputs.len());

    for input in inputs {
        let task = tokio::spawn(fetch(provider.clone(), input.clone()));
        tasks.push((input, task));
    }

    let mut outcomes = Vec::with_capacity(tasks.len());

    for (input, task) in tasks {
        let outcome = match task.await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "Task join error");
                Err(AppError::Internal(e.to_string()))
            }
        };
        outcomes.push((input, outcome));
    }

    outcomes
}

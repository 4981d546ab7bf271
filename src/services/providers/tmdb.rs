/// TMDB (The Movie Database) v3 provider
///
/// API Flow:
/// 1. Title Search: /search/movie → ranked summaries, first hit is the seed
/// 2. Similar: /movie/{id}/similar → ranked summaries for one seed
/// 3. Details: /movie/{id}?append_to_response=videos,credits → genres, videos, credits
///
/// Accepts either a v3 API key (sent as `api_key`) or a v4 read access token
/// (sent as a bearer header).
use crate::{
    error::{AppError, AppResult},
    models::{MovieDetails, MovieId, MovieSummary, TmdbPage},
    services::providers::MovieProvider,
};
use reqwest::{Client as HttpClient, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

const FIRST_PAGE: &str = "1";
const DETAIL_APPENDS: &str = "videos,credits";

/// Connection settings for the TMDB provider
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_key: String,
    pub api_url: String,
    pub language: String,
    pub timeout: Duration,
}

pub struct TmdbProvider {
    http_client: HttpClient,
    config: TmdbConfig,
}

impl TmdbProvider {
    /// Creates a provider whose every request is bounded by `config.timeout`
    pub fn new(config: TmdbConfig) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(config.timeout).build()?;

        tracing::info!(
            api_url = %config.api_url,
            language = %config.language,
            timeout_ms = config.timeout.as_millis() as u64,
            bearer_auth = is_access_token(&config.api_key),
            "TMDB provider configured"
        );

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Attaches the credential in whichever form TMDB expects for it
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        if is_access_token(&self.config.api_key) {
            request.bearer_auth(&self.config.api_key)
        } else {
            request.query(&[("api_key", self.config.api_key.as_str())])
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.config.api_url, path);

        let request = self
            .http_client
            .get(&url)
            .query(&[("language", self.config.language.as_str())])
            .query(params);

        let response = self.authorize(request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::debug!(
                error = %e,
                path = %path,
                response = %response_text,
                "Failed to deserialize TMDB response"
            );
            AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e))
        })
    }
}

/// v4 read access tokens are JWTs; anything else is treated as a v3 key
fn is_access_token(credential: &str) -> bool {
    credential.starts_with("eyJ")
}

#[async_trait::async_trait]
impl MovieProvider for TmdbProvider {
    async fn search_movies(&self, query: &str) -> AppResult<Vec<MovieSummary>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let page: TmdbPage<MovieSummary> = self
            .get_json(
                "/search/movie",
                &[
                    ("query", query),
                    ("include_adult", "false"),
                    ("page", FIRST_PAGE),
                ],
            )
            .await?;

        tracing::debug!(
            query = %query,
            results = page.results.len(),
            provider = "tmdb",
            "Title search completed"
        );

        Ok(page.results)
    }

    async fn similar_movies(&self, movie_id: MovieId) -> AppResult<Vec<MovieSummary>> {
        let page: TmdbPage<MovieSummary> = self
            .get_json(
                &format!("/movie/{}/similar", movie_id),
                &[("page", FIRST_PAGE)],
            )
            .await?;

        tracing::debug!(
            movie_id = movie_id,
            results = page.results.len(),
            provider = "tmdb",
            "Similar movies fetched"
        );

        Ok(page.results)
    }

    async fn movie_details(&self, movie_id: MovieId) -> AppResult<MovieDetails> {
        let details: MovieDetails = self
            .get_json(
                &format!("/movie/{}", movie_id),
                &[("append_to_response", DETAIL_APPENDS)],
            )
            .await?;

        tracing::debug!(
            movie_id = movie_id,
            genres = details.genres.len(),
            videos = details.video_list().len(),
            provider = "tmdb",
            "Movie details fetched"
        );

        Ok(details)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

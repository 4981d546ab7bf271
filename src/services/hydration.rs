use crate::{
    models::{
        poster_url,
        recommendation::{tmdb_url, trailer_url},
        MovieDetails, Recommendation, Video,
    },
    services::{
        aggregation::ScoreEntry,
        providers::{fetch_concurrently, MovieProvider},
    },
};
use std::sync::Arc;

const TRAILER_SITE: &str = "YouTube";
const CAST_LIMIT: usize = 5;

/// Picks the trailer key from a movie's videos
///
/// First YouTube video whose type mentions "trailer" (any case); otherwise the
/// first video of any kind; otherwise none.
pub fn select_trailer(videos: &[Video]) -> Option<String> {
    videos
        .iter()
        .find(|video| {
            video.site.eq_ignore_ascii_case(TRAILER_SITE)
                && video.video_type.to_lowercase().contains("trailer")
        })
        .or_else(|| videos.first())
        .map(|video| video.key.clone())
}

/// Fetches details for ranked candidates and returns the survivors in rank order
///
/// A candidate whose detail fetch fails is dropped.
pub async fn hydrate(
    provider: &Arc<dyn MovieProvider>,
    ranked: Vec<ScoreEntry>,
    image_base_url: &str,
) -> Vec<Recommendation> {
    let outcomes = fetch_concurrently(provider, ranked, |provider, entry| async move {
        provider.movie_details(entry.movie_id).await
    })
    .await;

    let mut recommendations = Vec::with_capacity(outcomes.len());
    let mut dropped = 0usize;

    for (entry, outcome) in outcomes {
        match outcome {
            Ok(details) => {
                recommendations.push(build_recommendation(entry, details, image_base_url))
            }
            Err(e) => {
                dropped += 1;
                tracing::warn!(
                    movie_id = entry.movie_id,
                    error = %e,
                    "Detail fetch failed, dropping candidate"
                );
            }
        }
    }

    if dropped > 0 {
        tracing::info!(
            hydrated = recommendations.len(),
            dropped = dropped,
            "Partial hydration failure"
        );
    }

    recommendations
}

/// Detail fields win; optional fields the detail record lacks come from the snapshot
fn build_recommendation(
    entry: ScoreEntry,
    details: MovieDetails,
    image_base_url: &str,
) -> Recommendation {
    let trailer = select_trailer(details.video_list());
    let director = details.director();
    let cast = details.top_cast(CAST_LIMIT);
    let snapshot = entry.snapshot;

    let title = if details.title.is_empty() {
        snapshot.title
    } else {
        details.title
    };
    let poster_path = details.poster_path.or(snapshot.poster_path);

    Recommendation {
        id: entry.movie_id,
        title,
        poster_url: poster_url(image_base_url, poster_path.as_deref()),
        poster_path,
        overview: details.overview.or(snapshot.overview),
        release_date: details.release_date.or(snapshot.release_date),
        vote_average: details.vote_average.or(snapshot.vote_average),
        genres: details.genres.into_iter().map(|genre| genre.name).collect(),
        trailer_url: trailer.as_deref().map(trailer_url),
        trailer,
        tmdb_url: tmdb_url(entry.movie_id),
        director,
        cast,
        score: entry.score,
        match_count: entry.count,
    }
}

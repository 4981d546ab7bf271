use serde::{Deserialize, Serialize};

use super::movie::MovieId;

const TMDB_MOVIE_PAGE: &str = "https://www.themoviedb.org/movie";
const YOUTUBE_WATCH: &str = "https://www.youtube.com/watch?v=";

/// A fully hydrated recommendation returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub id: MovieId,
    pub title: String,
    pub poster_path: Option<String>,
    pub poster_url: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub genres: Vec<String>,
    /// Video key of the selected trailer
    pub trailer: Option<String>,
    pub trailer_url: Option<String>,
    pub tmdb_url: String,
    pub director: Option<String>,
    pub cast: Vec<String>,
    /// Aggregated positional weight across seed lists
    pub score: f64,
    /// Number of seed lists the movie appeared in
    pub match_count: u32,
}

pub fn tmdb_url(id: MovieId) -> String {
    format!("{}/{}", TMDB_MOVIE_PAGE, id)
}

pub fn trailer_url(key: &str) -> String {
    format!("{}{}", YOUTUBE_WATCH, key)
}

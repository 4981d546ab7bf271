use serde::{Deserialize, Deserializer, Serialize};

/// Upstream-assigned movie identifier
pub type MovieId = u64;

/// TMDB sends `null` for fields it has no value for; treat those as absent
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Paged list envelope used by TMDB list endpoints (search, similar)
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct TmdbPage<T> {
    #[serde(default = "Vec::new", deserialize_with = "null_as_default")]
    pub results: Vec<T>,
}

/// Movie summary as returned by the search and similar endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    /// Missing only on malformed upstream data
    #[serde(default)]
    pub id: Option<MovieId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default, skip_deserializing)]
    pub poster_url: Option<String>,
}

/// Full movie record from `GET /movie/{id}?append_to_response=videos,credits`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieDetails {
    pub id: MovieId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub videos: Option<VideoList>,
    #[serde(default)]
    pub credits: Option<Credits>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Genre {
    #[serde(default)]
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Video {
    pub key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub site: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub video_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credits {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cast: Vec<CastMember>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CastMember {
    pub name: String,
    #[serde(default)]
    pub order: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrewMember {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub job: String,
}

impl MovieDetails {
    pub fn video_list(&self) -> &[Video] {
        self.videos
            .as_ref()
            .map(|v| v.results.as_slice())
            .unwrap_or(&[])
    }

    pub fn director(&self) -> Option<String> {
        self.credits
            .as_ref()?
            .crew
            .iter()
            .find(|member| member.job == "Director")
            .map(|member| member.name.clone())
    }

    /// Top-billed cast names, in billing order
    pub fn top_cast(&self, limit: usize) -> Vec<String> {
        let Some(credits) = self.credits.as_ref() else {
            return Vec::new();
        };

        let mut cast: Vec<&CastMember> = credits.cast.iter().collect();
        cast.sort_by_key(|member| member.order.unwrap_or(u32::MAX));
        cast.into_iter()
            .take(limit)
            .map(|member| member.name.clone())
            .collect()
    }
}

/// Builds an image URL from a poster path; blank paths mean no image
pub fn poster_url(image_base_url: &str, poster_path: Option<&str>) -> Option<String> {
    poster_path
        .filter(|path| !path.trim().is_empty())
        .map(|path| format!("{}{}", image_base_url, path))
}

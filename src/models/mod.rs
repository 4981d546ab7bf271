pub mod movie;
pub mod recommendation;

pub use movie::{
    poster_url, CastMember, Credits, CrewMember, Genre, MovieDetails, MovieId, MovieSummary,
    TmdbPage, Video, VideoList,
};
pub use recommendation::Recommendation;

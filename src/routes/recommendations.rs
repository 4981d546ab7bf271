use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::Recommendation,
    routes::AppState,
};

/// Entries are left as raw JSON; non-strings are dropped during sanitization
#[derive(Debug, Default, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default, alias = "titles", deserialize_with = "title_list")]
    pub movies: Vec<Value>,
}

/// Anything other than an array carries no titles
fn title_list<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => Vec::new(),
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<Recommendation>,
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> AppResult<Json<RecommendationResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(
            request_id = %request_id,
            error = %rejection.body_text(),
            "Rejected recommendation request body"
        );
        AppError::InvalidInput(rejection.body_text())
    })?;

    tracing::info!(
        request_id = %request_id,
        submitted = request.movies.len(),
        "Processing recommendation request"
    );

    let recommendations = state.recommender.recommend(&request.movies).await?;

    tracing::info!(
        request_id = %request_id,
        returned = recommendations.len(),
        "Recommendation request completed"
    );

    Ok(Json(RecommendationResponse { recommendations }))
}

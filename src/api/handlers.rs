use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{Genre, Movie, MovieId, Recommendation},
};

use super::AppState;

const DEFAULT_RECOMMENDATIONS: i64 = 5;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    #[serde(default)]
    pub title: String,
    pub n: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub title: String,
    pub poster_path: String,
    pub poster_url: String,
    pub id: MovieId,
}

#[derive(Debug, Deserialize)]
pub struct MoviesQuery {
    /// Comma-separated genre names; all genres when absent
    pub genres: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MoviesResponse {
    pub count: usize,
    pub titles: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub id: MovieId,
    pub title: String,
    pub poster_path: String,
    pub poster_url: String,
    pub genres: Vec<Genre>,
}

impl RecommendationResponse {
    fn new(rec: Recommendation, state: &AppState) -> Self {
        Self {
            poster_url: state.poster_url(&rec.poster_path),
            title: rec.title,
            poster_path: rec.poster_path,
            id: rec.id,
        }
    }
}

impl MovieResponse {
    fn new(movie: &Movie, state: &AppState) -> Self {
        Self {
            id: movie.id.clone(),
            title: movie.title.clone(),
            poster_path: movie.poster_path.clone(),
            poster_url: state.poster_url(&movie.poster_path),
            genres: movie.genres.clone(),
        }
    }
}

// Handlers

/// Health check endpoint, reports whether the index is published
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let status = if state.is_ready() { "ready" } else { "loading" };
    (StatusCode::OK, Json(json!({ "status": status })))
}

/// Top-N most similar movies for a title
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<Vec<RecommendationResponse>>> {
    let n = query.n.unwrap_or(DEFAULT_RECOMMENDATIONS);
    let max = state.config.max_recommendations;

    tracing::info!(
        request_id = %request_id,
        title = %query.title,
        n,
        "Processing recommendation request"
    );

    let n = usize::try_from(n)
        .ok()
        .filter(|n| (1..=max).contains(n))
        .ok_or_else(|| {
            AppError::InvalidArgument(format!("n must be between 1 and {}, got {}", max, n))
        })?;

    let index = state.index()?;
    let recommendations = index.recommend(&query.title, n)?;

    tracing::info!(
        request_id = %request_id,
        returned = recommendations.len(),
        "Recommendations computed"
    );

    Ok(Json(
        recommendations
            .into_iter()
            .map(|rec| RecommendationResponse::new(rec, &state))
            .collect(),
    ))
}

/// Alphabetical titles of movies in any of the requested genres
pub async fn list_movies(
    State(state): State<AppState>,
    Query(query): Query<MoviesQuery>,
) -> AppResult<Json<MoviesResponse>> {
    let genres = match query.genres.as_deref() {
        None => Genre::ALL.to_vec(),
        Some(raw) => parse_genres(raw)?,
    };

    let index = state.index()?;
    let titles: Vec<String> = index
        .titles_with_genres(&genres)
        .into_iter()
        .map(str::to_string)
        .collect();

    Ok(Json(MoviesResponse {
        count: titles.len(),
        titles,
    }))
}

/// Details of a single catalog movie
pub async fn lookup_movie(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> AppResult<Json<MovieResponse>> {
    let index = state.index()?;
    let movie = index.movie(&query.title)?;
    Ok(Json(MovieResponse::new(movie, &state)))
}

fn parse_genres(raw: &str) -> AppResult<Vec<Genre>> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            Genre::parse(name)
                .ok_or_else(|| AppError::InvalidArgument(format!("unknown genre '{}'", name)))
        })
        .collect()
}

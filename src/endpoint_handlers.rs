use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use entities::{BandCreate, Genre};
use log::info;
use queries::BandFilter;
use serde::Deserialize;

use crate::error::ApiError;
use crate::responses::BandResponse;
use crate::DatabaseState;

const MAX_NAME_QUERY_LEN: usize = 10;

#[derive(Deserialize)]
pub struct BandsQuery {
    #[serde(default)]
    genre: Option<String>,
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    has_albums: Option<bool>,
}

pub async fn get_bands(
    State(state): State<DatabaseState>,
    Query(params): Query<BandsQuery>,
) -> Result<Json<Vec<BandResponse>>, ApiError> {
    let genre = params.genre.as_deref().map(Genre::parse).transpose()?;
    if let Some(q) = &params.q {
        if q.chars().count() > MAX_NAME_QUERY_LEN {
            return Err(ApiError::Validation(format!(
                "query parameter 'q' is limited to {} characters",
                MAX_NAME_QUERY_LEN
            )));
        }
    }
    let filter = BandFilter {
        genre,
        name_contains: params.q,
        has_albums: params.has_albums,
    };
    let bands = queries::list_bands(&state.pool, &filter).await?;
    let band_ids: Vec<i64> = bands.iter().map(|b| b.id).collect();
    let albums = queries::get_albums_for_bands(&state.pool, &band_ids).await?;
    Ok(Json(BandResponse::from_band_list(bands, albums)))
}

pub async fn get_band(
    State(state): State<DatabaseState>,
    Path(band_id): Path<i64>,
) -> Result<Json<BandResponse>, ApiError> {
    let band = queries::get_band(&state.pool, band_id)
        .await?
        .ok_or(ApiError::NotFound("Band not found"))?;
    let albums = queries::get_albums_for_band(&state.pool, band.id).await?;
    Ok(Json(BandResponse::from_band(band, albums)))
}

/// Path-segment variant of the genre filter; the token is accepted in any
/// casing.
pub async fn get_bands_by_genre(
    State(state): State<DatabaseState>,
    Path(genre): Path<String>,
) -> Result<Json<Vec<BandResponse>>, ApiError> {
    let genre = Genre::parse(&genre)?;
    let filter = BandFilter {
        genre: Some(genre),
        ..Default::default()
    };
    let bands = queries::list_bands(&state.pool, &filter).await?;
    let band_ids: Vec<i64> = bands.iter().map(|b| b.id).collect();
    let albums = queries::get_albums_for_bands(&state.pool, &band_ids).await?;
    Ok(Json(BandResponse::from_band_list(bands, albums)))
}

pub async fn create_band(
    State(state): State<DatabaseState>,
    Json(payload): Json<BandCreate>,
) -> Result<(StatusCode, Json<BandResponse>), ApiError> {
    let new_band = payload.validate()?;
    let (band, albums) = queries::create_band(&state.pool, &new_band).await?;
    info!("Created band {} with id {}", band.name, band.id);
    Ok((
        StatusCode::CREATED,
        Json(BandResponse::from_band(band, albums)),
    ))
}

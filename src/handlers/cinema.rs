//! `/cinema` handlers.

use crate::error::AppError;
use crate::extractors::{CinemaFilters, IdPath, JsonBody, Listing};
use crate::models::{CreateCinemaDto, ReadCinemaDto, UpdateCinemaDto};
use crate::response::created;
use crate::service::{CinemaService, PatchDocument, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

const RESOURCE: &str = "cinema";

pub async fn create(State(state): State<AppState>, JsonBody(body): JsonBody) -> Result<impl IntoResponse, AppError> {
    let dto: CreateCinemaDto = RequestValidator::parse(body)?;
    let mut tx = state.pool.begin().await?;
    let cinema = CinemaService::insert(&mut tx, &dto).await.map_err(|e| {
        if e.is_server_error() {
            tracing::error!(error = %e, "failed to create cinema");
        } else {
            tracing::warn!(error = %e, "rejected cinema");
        }
        e
    })?;
    tx.commit().await?;
    tracing::info!(id = cinema.id, endereco_id = cinema.endereco_id, "cinema created");
    Ok(created(RESOURCE, cinema.id, ReadCinemaDto::from(&cinema)))
}

/// Optional `enderecoId` narrows to the cinema at that address.
pub async fn list(
    State(state): State<AppState>,
    listing: Listing<CinemaFilters>,
) -> Result<Json<Vec<ReadCinemaDto>>, AppError> {
    let mut conn = state.pool.acquire().await?;
    let rows = CinemaService::list(&mut conn, listing.filters.endereco_id, listing.window).await?;
    Ok(Json(rows.iter().map(ReadCinemaDto::from).collect()))
}

pub async fn read(State(state): State<AppState>, IdPath(id): IdPath) -> Result<Json<ReadCinemaDto>, AppError> {
    let mut conn = state.pool.acquire().await?;
    let cinema = CinemaService::find(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE, id))?;
    Ok(Json(ReadCinemaDto::from(&cinema)))
}

pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(body): JsonBody,
) -> Result<StatusCode, AppError> {
    let dto: UpdateCinemaDto = RequestValidator::parse(body)?;
    let mut tx = state.pool.begin().await?;
    let mut cinema = CinemaService::find(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE, id))?;
    dto.apply_to(&mut cinema);
    if !CinemaService::update(&mut tx, &cinema).await? {
        return Err(AppError::not_found(RESOURCE, id));
    }
    tx.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn patch(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(body): JsonBody,
) -> Result<StatusCode, AppError> {
    let doc = PatchDocument::from_value(body)?;
    let mut tx = state.pool.begin().await?;
    let mut cinema = CinemaService::find(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE, id))?;
    let patched = doc.apply_to_dto(&UpdateCinemaDto::from(&cinema))?;
    patched.apply_to(&mut cinema);
    if !CinemaService::update(&mut tx, &cinema).await? {
        return Err(AppError::not_found(RESOURCE, id));
    }
    tx.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath) -> Result<StatusCode, AppError> {
    let mut tx = state.pool.begin().await?;
    if !CinemaService::remove(&mut tx, id).await? {
        return Err(AppError::not_found(RESOURCE, id));
    }
    tx.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

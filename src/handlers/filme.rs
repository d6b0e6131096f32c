//! `/filme` handlers.

use crate::error::AppError;
use crate::extractors::{FilmeFilters, IdPath, JsonBody, Listing};
use crate::models::{CreateFilmeDto, ReadFilmeDto, UpdateFilmeDto};
use crate::response::created;
use crate::service::{FilmeService, PatchDocument, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

const RESOURCE: &str = "filme";

pub async fn create(State(state): State<AppState>, JsonBody(body): JsonBody) -> Result<impl IntoResponse, AppError> {
    let dto: CreateFilmeDto = RequestValidator::parse(body)?;
    let mut tx = state.pool.begin().await?;
    let filme = FilmeService::insert(&mut tx, &dto).await.map_err(|e| {
        if e.is_server_error() {
            tracing::error!(error = %e, "failed to create filme");
        } else {
            tracing::warn!(error = %e, "rejected filme");
        }
        e
    })?;
    tx.commit().await?;
    tracing::info!(id = filme.id, "filme created");
    Ok(created(RESOURCE, filme.id, ReadFilmeDto::from(&filme)))
}

/// Optional `nomeCinema` keeps only movies with a session at that cinema.
pub async fn list(
    State(state): State<AppState>,
    listing: Listing<FilmeFilters>,
) -> Result<Json<Vec<ReadFilmeDto>>, AppError> {
    let mut conn = state.pool.acquire().await?;
    let rows = FilmeService::list(&mut conn, listing.filters.nome_cinema, listing.window).await?;
    Ok(Json(rows.iter().map(ReadFilmeDto::from).collect()))
}

pub async fn read(State(state): State<AppState>, IdPath(id): IdPath) -> Result<Json<ReadFilmeDto>, AppError> {
    let mut conn = state.pool.acquire().await?;
    let filme = FilmeService::find(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE, id))?;
    Ok(Json(ReadFilmeDto::from(&filme)))
}

pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(body): JsonBody,
) -> Result<StatusCode, AppError> {
    let dto: UpdateFilmeDto = RequestValidator::parse(body)?;
    let mut tx = state.pool.begin().await?;
    let mut filme = FilmeService::find(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE, id))?;
    dto.apply_to(&mut filme);
    if !FilmeService::update(&mut tx, &filme).await? {
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
    let mut filme = FilmeService::find(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE, id))?;
    let patched = doc.apply_to_dto(&UpdateFilmeDto::from(&filme))?;
    patched.apply_to(&mut filme);
    if !FilmeService::update(&mut tx, &filme).await? {
        return Err(AppError::not_found(RESOURCE, id));
    }
    tx.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath) -> Result<StatusCode, AppError> {
    let mut tx = state.pool.begin().await?;
    if !FilmeService::remove(&mut tx, id).await? {
        return Err(AppError::not_found(RESOURCE, id));
    }
    tx.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

//! `/endereco` handlers.

use crate::error::AppError;
use crate::extractors::{IdPath, JsonBody, Listing, NoFilters};
use crate::models::{CreateEnderecoDto, ReadEnderecoDto, UpdateEnderecoDto};
use crate::response::created;
use crate::service::{EnderecoService, PatchDocument, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

const RESOURCE: &str = "endereco";

pub async fn create(State(state): State<AppState>, JsonBody(body): JsonBody) -> Result<impl IntoResponse, AppError> {
    let dto: CreateEnderecoDto = RequestValidator::parse(body)?;
    let mut tx = state.pool.begin().await?;
    let endereco = EnderecoService::insert(&mut tx, &dto).await.map_err(|e| {
        if e.is_server_error() {
            tracing::error!(error = %e, "failed to create endereco");
        } else {
            tracing::warn!(error = %e, "rejected endereco");
        }
        e
    })?;
    tx.commit().await?;
    tracing::info!(id = endereco.id, "endereco created");
    Ok(created(RESOURCE, endereco.id, ReadEnderecoDto::from(&endereco)))
}

pub async fn list(
    State(state): State<AppState>,
    listing: Listing<NoFilters>,
) -> Result<Json<Vec<ReadEnderecoDto>>, AppError> {
    let mut conn = state.pool.acquire().await?;
    let rows = EnderecoService::list(&mut conn, listing.window).await?;
    Ok(Json(rows.iter().map(ReadEnderecoDto::from).collect()))
}

pub async fn read(State(state): State<AppState>, IdPath(id): IdPath) -> Result<Json<ReadEnderecoDto>, AppError> {
    let mut conn = state.pool.acquire().await?;
    let endereco = EnderecoService::find(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE, id))?;
    Ok(Json(ReadEnderecoDto::from(&endereco)))
}

pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(body): JsonBody,
) -> Result<StatusCode, AppError> {
    let dto: UpdateEnderecoDto = RequestValidator::parse(body)?;
    let mut tx = state.pool.begin().await?;
    let mut endereco = EnderecoService::find(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE, id))?;
    dto.apply_to(&mut endereco);
    if !EnderecoService::update(&mut tx, &endereco).await? {
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
    let mut endereco = EnderecoService::find(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::not_found(RESOURCE, id))?;
    let patched = doc.apply_to_dto(&UpdateEnderecoDto::from(&endereco))?;
    patched.apply_to(&mut endereco);
    if !EnderecoService::update(&mut tx, &endereco).await? {
        return Err(AppError::not_found(RESOURCE, id));
    }
    tx.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// An address still referenced by a cinema is a 409 (foreign key).
pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath) -> Result<StatusCode, AppError> {
    let mut tx = state.pool.begin().await?;
    if !EnderecoService::remove(&mut tx, id).await? {
        return Err(AppError::not_found(RESOURCE, id));
    }
    tx.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

//! `skip`/`take` window plus per-resource filters from the query string.

use crate::error::AppError;
use crate::sql::Window;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct WindowParams {
    skip: Option<i64>,
    take: Option<i64>,
}

/// `GET /filme?nomeCinema=...`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmeFilters {
    pub nome_cinema: Option<String>,
}

/// `GET /cinema?enderecoId=...`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CinemaFilters {
    pub endereco_id: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NoFilters {}

#[derive(Debug)]
pub struct Listing<F> {
    pub window: Window,
    pub filters: F,
}

#[async_trait]
impl<S, F> FromRequestParts<S> for Listing<F>
where
    S: Send + Sync,
    F: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<WindowParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        let Query(filters) = Query::<F>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Ok(Listing {
            window: Window::new(params.skip, params.take)?,
            filters,
        })
    }
}

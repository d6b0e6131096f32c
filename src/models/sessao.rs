//! Sessao (screening session): links a movie to a cinema.

use serde::Serialize;
use sqlx::FromRow;

/// A row from the `sessoes` table.
#[derive(Clone, Debug, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sessao {
    pub id: i32,
    pub filme_id: i32,
    pub cinema_id: i32,
}

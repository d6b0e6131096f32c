//! Store operations for the `sessoes` relation table.

use crate::error::AppError;
use crate::models::Sessao;
use crate::store::qualified_table;
use sqlx::PgConnection;

pub struct SessaoService;

impl SessaoService {
    /// Schedule `filme_id` at `cinema_id`. Both must exist (foreign keys).
    pub async fn insert(conn: &mut PgConnection, filme_id: i32, cinema_id: i32) -> Result<Sessao, AppError> {
        let sql = format!(
            "INSERT INTO {} (filme_id, cinema_id) VALUES ($1, $2) RETURNING id, filme_id, cinema_id",
            qualified_table("sessoes")
        );
        tracing::debug!(sql = %sql, filme_id, cinema_id, "insert sessao");
        let row = sqlx::query_as::<_, Sessao>(&sql)
            .bind(filme_id)
            .bind(cinema_id)
            .fetch_one(&mut *conn)
            .await?;
        Ok(row)
    }

    pub async fn list_by_filme(conn: &mut PgConnection, filme_id: i32) -> Result<Vec<Sessao>, AppError> {
        let sql = format!(
            "SELECT id, filme_id, cinema_id FROM {} WHERE filme_id = $1 ORDER BY id",
            qualified_table("sessoes")
        );
        let rows = sqlx::query_as::<_, Sessao>(&sql)
            .bind(filme_id)
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows)
    }
}

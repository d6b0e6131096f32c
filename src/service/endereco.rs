//! Store operations for the `enderecos` table.

use crate::error::AppError;
use crate::models::{CreateEnderecoDto, Endereco};
use crate::sql::{SelectBuilder, Window};
use crate::store::qualified_table;
use sqlx::{PgConnection, Postgres, QueryBuilder};

const COLUMNS: &str = "id, logradouro, numero";

pub struct EnderecoService;

impl EnderecoService {
    /// Insert a new address; the store assigns the id.
    pub async fn insert(conn: &mut PgConnection, dto: &CreateEnderecoDto) -> Result<Endereco, AppError> {
        let sql = format!(
            "INSERT INTO {} (logradouro, numero) VALUES ($1, $2) RETURNING {}",
            qualified_table("enderecos"),
            COLUMNS
        );
        tracing::debug!(sql = %sql, "insert endereco");
        let row = sqlx::query_as::<_, Endereco>(&sql)
            .bind(&dto.logradouro)
            .bind(dto.numero)
            .fetch_one(&mut *conn)
            .await?;
        Ok(row)
    }

    pub async fn find(conn: &mut PgConnection, id: i32) -> Result<Option<Endereco>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", COLUMNS, qualified_table("enderecos"));
        tracing::debug!(sql = %sql, id, "find endereco");
        let row = sqlx::query_as::<_, Endereco>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    pub fn list_query(window: Window) -> QueryBuilder<'static, Postgres> {
        SelectBuilder::new(format!("SELECT {} FROM {}", COLUMNS, qualified_table("enderecos"))).window("id", window)
    }

    /// Addresses ordered by id within `window`.
    pub async fn list(conn: &mut PgConnection, window: Window) -> Result<Vec<Endereco>, AppError> {
        let mut q = Self::list_query(window);
        tracing::debug!(sql = %q.sql(), ?window, "list enderecos");
        let rows = q.build_query_as::<Endereco>().fetch_all(&mut *conn).await?;
        Ok(rows)
    }

    /// Persist every mapped field of `endereco`. Returns false if the row no longer exists.
    pub async fn update(conn: &mut PgConnection, endereco: &Endereco) -> Result<bool, AppError> {
        let sql = format!(
            "UPDATE {} SET logradouro = $2, numero = $3 WHERE id = $1",
            qualified_table("enderecos")
        );
        tracing::debug!(sql = %sql, id = endereco.id, "update endereco");
        let result = sqlx::query(&sql)
            .bind(endereco.id)
            .bind(&endereco.logradouro)
            .bind(endereco.numero)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete by id. Returns true if a row was removed.
    pub async fn remove(conn: &mut PgConnection, id: i32) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", qualified_table("enderecos"));
        tracing::debug!(sql = %sql, id, "remove endereco");
        let result = sqlx::query(&sql).bind(id).execute(&mut *conn).await?;
        Ok(result.rows_affected() > 0)
    }
}

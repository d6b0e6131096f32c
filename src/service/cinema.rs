//! Store operations for the `cinemas` table. Reads always JOIN the cinema's address.

use crate::error::AppError;
use crate::models::{Cinema, CreateCinemaDto};
use crate::sql::{SelectBuilder, Window};
use crate::store::qualified_table;
use sqlx::{PgConnection, Postgres, QueryBuilder};

const COLUMNS: &str =
    "c.id, c.nome, c.endereco_id, e.logradouro AS endereco_logradouro, e.numero AS endereco_numero";

fn select_joined() -> String {
    format!(
        "SELECT {} FROM {} c JOIN {} e ON e.id = c.endereco_id",
        COLUMNS,
        qualified_table("cinemas"),
        qualified_table("enderecos")
    )
}

pub struct CinemaService;

impl CinemaService {
    /// Insert, then re-read through the JOIN so the returned cinema carries its address.
    pub async fn insert(conn: &mut PgConnection, dto: &CreateCinemaDto) -> Result<Cinema, AppError> {
        let sql = format!(
            "INSERT INTO {} (nome, endereco_id) VALUES ($1, $2) RETURNING id",
            qualified_table("cinemas")
        );
        tracing::debug!(sql = %sql, "insert cinema");
        let (id,): (i32,) = sqlx::query_as(&sql)
            .bind(&dto.nome)
            .bind(dto.endereco_id)
            .fetch_one(&mut *conn)
            .await?;
        Self::find(conn, id)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    pub async fn find(conn: &mut PgConnection, id: i32) -> Result<Option<Cinema>, AppError> {
        let mut q = SelectBuilder::new(select_joined());
        q.and_where().push("c.id = ").push_bind(id);
        let mut q = q.finish();
        tracing::debug!(sql = %q.sql(), id, "find cinema");
        let row = q.build_query_as::<Cinema>().fetch_optional(&mut *conn).await?;
        Ok(row)
    }

    /// `endereco_id` is bound as a parameter, never spliced into the SQL text.
    pub fn list_query(endereco_id: Option<i32>, window: Window) -> QueryBuilder<'static, Postgres> {
        let mut q = SelectBuilder::new(select_joined());
        if let Some(eid) = endereco_id {
            q.and_where().push("c.endereco_id = ").push_bind(eid);
        }
        q.window("c.id", window)
    }

    pub async fn list(
        conn: &mut PgConnection,
        endereco_id: Option<i32>,
        window: Window,
    ) -> Result<Vec<Cinema>, AppError> {
        let mut q = Self::list_query(endereco_id, window);
        tracing::debug!(sql = %q.sql(), ?window, "list cinemas");
        let rows = q.build_query_as::<Cinema>().fetch_all(&mut *conn).await?;
        Ok(rows)
    }

    pub async fn update(conn: &mut PgConnection, cinema: &Cinema) -> Result<bool, AppError> {
        let sql = format!(
            "UPDATE {} SET nome = $2, endereco_id = $3 WHERE id = $1",
            qualified_table("cinemas")
        );
        tracing::debug!(sql = %sql, id = cinema.id, "update cinema");
        let result = sqlx::query(&sql)
            .bind(cinema.id)
            .bind(&cinema.nome)
            .bind(cinema.endereco_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete by id; the cinema's sessions go with it, its address stays.
    pub async fn remove(conn: &mut PgConnection, id: i32) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", qualified_table("cinemas"));
        tracing::debug!(sql = %sql, id, "remove cinema");
        let result = sqlx::query(&sql).bind(id).execute(&mut *conn).await?;
        Ok(result.rows_affected() > 0)
    }
}

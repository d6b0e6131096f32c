//! Store operations for the `filmes` table.

use crate::error::AppError;
use crate::models::{CreateFilmeDto, Filme};
use crate::sql::{SelectBuilder, Window};
use crate::store::qualified_table;
use sqlx::{PgConnection, Postgres, QueryBuilder};

const COLUMNS: &str = "f.id, f.titulo, f.genero, f.duracao, f.data_lancamento";
const RETURNING: &str = "id, titulo, genero, duracao, data_lancamento";

pub struct FilmeService;

impl FilmeService {
    pub async fn insert(conn: &mut PgConnection, dto: &CreateFilmeDto) -> Result<Filme, AppError> {
        let sql = format!(
            "INSERT INTO {} (titulo, genero, duracao, data_lancamento) VALUES ($1, $2, $3, $4) RETURNING {}",
            qualified_table("filmes"),
            RETURNING
        );
        tracing::debug!(sql = %sql, "insert filme");
        let row = sqlx::query_as::<_, Filme>(&sql)
            .bind(&dto.titulo)
            .bind(&dto.genero)
            .bind(dto.duracao)
            .bind(dto.data_lancamento)
            .fetch_one(&mut *conn)
            .await?;
        Ok(row)
    }

    pub async fn find(conn: &mut PgConnection, id: i32) -> Result<Option<Filme>, AppError> {
        let sql = format!("SELECT {} FROM {} f WHERE f.id = $1", COLUMNS, qualified_table("filmes"));
        tracing::debug!(sql = %sql, id, "find filme");
        let row = sqlx::query_as::<_, Filme>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    /// Windows the movies by id first; when `nome_cinema` is set, keeps only those in the
    /// window with a session at a cinema of exactly that name.
    pub fn list_query(nome_cinema: Option<String>, window: Window) -> QueryBuilder<'static, Postgres> {
        let inner = format!("SELECT {} FROM {}", RETURNING, qualified_table("filmes"));
        let mut q = SelectBuilder::over_window(COLUMNS, &inner, "id", "f", window);
        if let Some(nome) = nome_cinema {
            q.and_where()
                .push(format!(
                    "EXISTS (SELECT 1 FROM {} s JOIN {} c ON c.id = s.cinema_id WHERE s.filme_id = f.id AND c.nome = ",
                    qualified_table("sessoes"),
                    qualified_table("cinemas")
                ))
                .push_bind(nome)
                .push(")");
        }
        q.order_by("f.id")
    }

    pub async fn list(
        conn: &mut PgConnection,
        nome_cinema: Option<String>,
        window: Window,
    ) -> Result<Vec<Filme>, AppError> {
        let mut q = Self::list_query(nome_cinema, window);
        tracing::debug!(sql = %q.sql(), ?window, "list filmes");
        let rows = q.build_query_as::<Filme>().fetch_all(&mut *conn).await?;
        Ok(rows)
    }

    pub async fn update(conn: &mut PgConnection, filme: &Filme) -> Result<bool, AppError> {
        let sql = format!(
            "UPDATE {} SET titulo = $2, genero = $3, duracao = $4, data_lancamento = $5 WHERE id = $1",
            qualified_table("filmes")
        );
        tracing::debug!(sql = %sql, id = filme.id, "update filme");
        let result = sqlx::query(&sql)
            .bind(filme.id)
            .bind(&filme.titulo)
            .bind(&filme.genero)
            .bind(filme.duracao)
            .bind(filme.data_lancamento)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete by id; the movie's sessions go with it.
    pub async fn remove(conn: &mut PgConnection, id: i32) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", qualified_table("filmes"));
        tracing::debug!(sql = %sql, id, "remove filme");
        let result = sqlx::query(&sql).bind(id).execute(&mut *conn).await?;
        Ok(result.rows_affected() > 0)
    }
}

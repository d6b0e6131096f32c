//! Database bootstrap and table naming. All tables live in a schema named from `FILMES_SCHEMA` env (default `filmes`).

use crate::error::{AppError, ConfigError};
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

/// Schema name for the resource tables. From env `FILMES_SCHEMA`, default `filmes`.
pub fn filmes_schema() -> String {
    std::env::var("FILMES_SCHEMA").unwrap_or_else(|_| "filmes".into())
}

/// Quote identifier for PostgreSQL. Identifiers only ever come from code or config, never from requests.
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Returns the schema-qualified, quoted table name (e.g. `"filmes"."cinemas"`).
pub fn qualified_table(table: &str) -> String {
    format!("{}.{}", quoted(&filmes_schema()), quoted(table))
}

fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Create the schema and the four resource tables if they do not exist.
/// Sessoes cascade with their movie/cinema; cinemas keep a restricting FK to their address.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    let schema = filmes_schema();
    if !is_valid_identifier(&schema) {
        return Err(ConfigError::InvalidSchema(schema).into());
    }
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(&schema)))
        .execute(pool)
        .await?;

    let enderecos = qualified_table("enderecos");
    let cinemas = qualified_table("cinemas");
    let filmes = qualified_table("filmes");
    let sessoes = qualified_table("sessoes");

    let ddl = [
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id SERIAL PRIMARY KEY,
                logradouro TEXT NOT NULL,
                numero INTEGER NOT NULL
            )
            "#,
            enderecos
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id SERIAL PRIMARY KEY,
                nome TEXT NOT NULL,
                endereco_id INTEGER NOT NULL UNIQUE REFERENCES {} (id)
            )
            "#,
            cinemas, enderecos
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id SERIAL PRIMARY KEY,
                titulo TEXT NOT NULL,
                genero TEXT NOT NULL,
                duracao INTEGER NOT NULL,
                data_lancamento DATE
            )
            "#,
            filmes
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id SERIAL PRIMARY KEY,
                filme_id INTEGER NOT NULL REFERENCES {} (id) ON DELETE CASCADE,
                cinema_id INTEGER NOT NULL REFERENCES {} (id) ON DELETE CASCADE
            )
            "#,
            sessoes, filmes, cinemas
        ),
        format!("CREATE INDEX IF NOT EXISTS sessoes_filme_id_idx ON {} (filme_id)", sessoes),
        format!("CREATE INDEX IF NOT EXISTS sessoes_cinema_id_idx ON {} (cinema_id)", sessoes),
    ];
    for stmt in &ddl {
        sqlx::query(stmt).execute(pool).await?;
    }
    tracing::debug!(schema = %schema, "tables ensured");
    Ok(())
}

/// Creates the database named in `database_url` when missing, through a connection
/// to the `postgres` maintenance database. Run before building the pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (maintenance, target) = maintenance_options(database_url)?;
    let Some(target) = target.filter(|name| name != "postgres") else {
        return Ok(());
    };
    let mut conn = maintenance.connect().await?;
    let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&target)
        .fetch_one(&mut conn)
        .await?;
    if !exists {
        tracing::info!(database = %target, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&target)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Options for the `postgres` database on the same server, plus the database the URL names.
fn maintenance_options(database_url: &str) -> Result<(PgConnectOptions, Option<String>), AppError> {
    let opts = PgConnectOptions::from_str(database_url).map_err(|_| ConfigError::InvalidVar {
        var: "DATABASE_URL",
        value: database_url.to_string(),
    })?;
    let target = opts.get_database().map(str::to_string);
    Ok((opts.database("postgres"), target))
}

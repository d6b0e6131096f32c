//! Filmes API: CRUD over movies, cinemas and addresses backed by PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError, FieldError, FieldErrors};
pub use routes::{app, common_routes, resource_routes};
pub use service::{CinemaService, EnderecoService, FilmeService, SessaoService};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables};

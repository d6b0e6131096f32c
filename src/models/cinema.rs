//! Cinema entity and DTOs. A cinema is always read together with its address.

use crate::models::endereco::{Endereco, ReadEnderecoDto};
use crate::service::validation::{FieldRule, Validate};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

/// A `cinemas` row joined with its `enderecos` row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cinema {
    pub id: i32,
    pub nome: String,
    pub endereco_id: i32,
    /// Loaded by the JOIN; reflects `endereco_id` as of the last read.
    pub endereco: Endereco,
}

/// Expects the address columns aliased as `endereco_logradouro` and `endereco_numero`.
impl<'r> FromRow<'r, PgRow> for Cinema {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let endereco_id: i32 = row.try_get("endereco_id")?;
        Ok(Cinema {
            id: row.try_get("id")?,
            nome: row.try_get("nome")?,
            endereco_id,
            endereco: Endereco {
                id: endereco_id,
                logradouro: row.try_get("endereco_logradouro")?,
                numero: row.try_get("endereco_numero")?,
            },
        })
    }
}

const RULES: &[FieldRule] = &[
    FieldRule::text("nome")
        .required("O campo de nome é obrigatório")
        .max_length(100),
    FieldRule::integer("enderecoId")
        .required("O endereço do cinema é obrigatório")
        .minimum(1),
];

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCinemaDto {
    pub nome: String,
    pub endereco_id: i32,
}

impl Validate for CreateCinemaDto {
    const RULES: &'static [FieldRule] = RULES;
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadCinemaDto {
    pub id: i32,
    pub nome: String,
    pub endereco_id: i32,
    pub endereco: ReadEnderecoDto,
}

impl From<&Cinema> for ReadCinemaDto {
    fn from(c: &Cinema) -> Self {
        ReadCinemaDto {
            id: c.id,
            nome: c.nome.clone(),
            endereco_id: c.endereco_id,
            endereco: ReadEnderecoDto::from(&c.endereco),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCinemaDto {
    pub nome: String,
    pub endereco_id: i32,
}

impl Validate for UpdateCinemaDto {
    const RULES: &'static [FieldRule] = RULES;
}

impl From<&Cinema> for UpdateCinemaDto {
    fn from(c: &Cinema) -> Self {
        UpdateCinemaDto {
            nome: c.nome.clone(),
            endereco_id: c.endereco_id,
        }
    }
}

impl UpdateCinemaDto {
    pub fn apply_to(self, c: &mut Cinema) {
        c.nome = self.nome;
        c.endereco_id = self.endereco_id;
    }
}

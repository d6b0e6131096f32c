//! Endereco (address) entity and DTOs.

use crate::service::validation::{FieldRule, Validate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `enderecos` table.
#[derive(Clone, Debug, PartialEq, Eq, FromRow)]
pub struct Endereco {
    pub id: i32,
    pub logradouro: String,
    pub numero: i32,
}

const RULES: &[FieldRule] = &[
    FieldRule::text("logradouro")
        .required("O logradouro é obrigatório")
        .max_length(200),
    FieldRule::integer("numero").required("O número é obrigatório"),
];

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEnderecoDto {
    pub logradouro: String,
    pub numero: i32,
}

impl Validate for CreateEnderecoDto {
    const RULES: &'static [FieldRule] = RULES;
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadEnderecoDto {
    pub id: i32,
    pub logradouro: String,
    pub numero: i32,
}

impl From<&Endereco> for ReadEnderecoDto {
    fn from(e: &Endereco) -> Self {
        ReadEnderecoDto {
            id: e.id,
            logradouro: e.logradouro.clone(),
            numero: e.numero,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEnderecoDto {
    pub logradouro: String,
    pub numero: i32,
}

impl Validate for UpdateEnderecoDto {
    const RULES: &'static [FieldRule] = RULES;
}

impl From<&Endereco> for UpdateEnderecoDto {
    fn from(e: &Endereco) -> Self {
        UpdateEnderecoDto {
            logradouro: e.logradouro.clone(),
            numero: e.numero,
        }
    }
}

impl UpdateEnderecoDto {
    /// Overwrite the mapped fields; `id` is never touched.
    pub fn apply_to(self, e: &mut Endereco) {
        e.logradouro = self.logradouro;
        e.numero = self.numero;
    }
}

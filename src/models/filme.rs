//! Filme (movie) entity and DTOs.

use crate::service::validation::{FieldRule, Validate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `filmes` table. `duracao` is in minutes.
#[derive(Clone, Debug, PartialEq, Eq, FromRow)]
pub struct Filme {
    pub id: i32,
    pub titulo: String,
    pub genero: String,
    pub duracao: i32,
    pub data_lancamento: Option<NaiveDate>,
}

const RULES: &[FieldRule] = &[
    FieldRule::text("titulo")
        .required("O título do filme é obrigatório")
        .max_length(100),
    FieldRule::text("genero")
        .required("O gênero do filme é obrigatório")
        .max_length(50),
    FieldRule::integer("duracao")
        .required("A duração do filme é obrigatória")
        .range(70, 600),
    FieldRule::date("dataLancamento"),
];

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFilmeDto {
    pub titulo: String,
    pub genero: String,
    pub duracao: i32,
    #[serde(default)]
    pub data_lancamento: Option<NaiveDate>,
}

impl Validate for CreateFilmeDto {
    const RULES: &'static [FieldRule] = RULES;
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadFilmeDto {
    pub id: i32,
    pub titulo: String,
    pub genero: String,
    pub duracao: i32,
    pub data_lancamento: Option<NaiveDate>,
}

impl From<&Filme> for ReadFilmeDto {
    fn from(f: &Filme) -> Self {
        ReadFilmeDto {
            id: f.id,
            titulo: f.titulo.clone(),
            genero: f.genero.clone(),
            duracao: f.duracao,
            data_lancamento: f.data_lancamento,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFilmeDto {
    pub titulo: String,
    pub genero: String,
    pub duracao: i32,
    #[serde(default)]
    pub data_lancamento: Option<NaiveDate>,
}

impl Validate for UpdateFilmeDto {
    const RULES: &'static [FieldRule] = RULES;
}

impl From<&Filme> for UpdateFilmeDto {
    fn from(f: &Filme) -> Self {
        UpdateFilmeDto {
            titulo: f.titulo.clone(),
            genero: f.genero.clone(),
            duracao: f.duracao,
            data_lancamento: f.data_lancamento,
        }
    }
}

impl UpdateFilmeDto {
    pub fn apply_to(self, f: &mut Filme) {
        f.titulo = self.titulo;
        f.genero = self.genero;
        f.duracao = self.duracao;
        f.data_lancamento = self.data_lancamento;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::patch::PatchDocument;
    use crate::AppError;
    use serde_json::json;

    fn sample() -> Filme {
        Filme {
            id: 1,
            titulo: "Central do Brasil".into(),
            genero: "Drama".into(),
            duracao: 113,
            data_lancamento: NaiveDate::from_ymd_opt(1998, 4, 3),
        }
    }

    #[test]
    fn read_dto_serializes_date() {
        let v = serde_json::to_value(ReadFilmeDto::from(&sample())).unwrap();
        assert_eq!(v["dataLancamento"], "1998-04-03");
        assert_eq!(v["duracao"], 113);
    }

    #[test]
    fn release_date_is_optional() {
        let dto: CreateFilmeDto =
            serde_json::from_value(json!({"titulo": "Bacurau", "genero": "Western", "duracao": 131})).unwrap();
        assert_eq!(dto.data_lancamento, None);
    }

    #[test]
    fn patch_round_trips_through_update_shape() {
        let mut filme = sample();
        let patch = PatchDocument::from_value(json!([
            {"op": "replace", "path": "/duracao", "value": 120},
            {"op": "remove", "path": "/dataLancamento"}
        ]))
        .unwrap();
        let dto = patch.apply_to_dto(&UpdateFilmeDto::from(&filme)).unwrap();
        dto.apply_to(&mut filme);
        assert_eq!(filme.id, 1);
        assert_eq!(filme.duracao, 120);
        assert_eq!(filme.data_lancamento, None);
        assert_eq!(filme.titulo, "Central do Brasil");
    }

    #[test]
    fn patch_violating_range_is_rejected() {
        let patch = PatchDocument::from_value(json!([{"op": "replace", "path": "/duracao", "value": 10}])).unwrap();
        let err = patch.apply_to_dto(&UpdateFilmeDto::from(&sample())).unwrap_err();
        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.0[0].field, "duracao");
    }
}

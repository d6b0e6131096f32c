//! Store services (one per table), request validation and JSON Patch.

mod cinema;
mod endereco;
mod filme;
pub mod patch;
mod sessao;
pub mod validation;

pub use cinema::CinemaService;
pub use endereco::EnderecoService;
pub use filme::FilmeService;
pub use patch::{PatchDocument, PatchOperation};
pub use sessao::SessaoService;
pub use validation::{FieldKind, FieldRule, RequestValidator, Validate};

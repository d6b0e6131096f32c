//! Persistence entities, transfer objects and the explicit mappings between them.

pub mod cinema;
pub mod endereco;
pub mod filme;
pub mod sessao;

pub use cinema::*;
pub use endereco::*;
pub use filme::*;
pub use sessao::*;

//! HTTP handlers, one module per resource.
//!
//! Reads use a pooled connection; every mutating request runs in its own
//! transaction and commits before responding.

pub mod cinema;
pub mod endereco;
pub mod filme;

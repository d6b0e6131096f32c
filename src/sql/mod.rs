//! Safe SQL builder: identifiers from code only, values as bound parameters.

mod builder;
pub use builder::*;

//! Passes over decoded data.
//!
//! For now only the structural validator lives here: it is the single
//! way from an untrusted `RawDocument` to a `GridDocument`.
pub mod validator;

pub use validator::{validate, verdict};

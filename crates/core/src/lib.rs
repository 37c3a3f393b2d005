//! Domain layer for the Listou shopping-list backend.
//!
//! This crate has no internal dependencies so the validation rules and
//! association logic can be used by the API/repository layer and by any
//! future CLI or worker tooling.

pub mod association;
pub mod error;
pub mod limits;
pub mod types;
pub mod validation;

use crate::types::DbId;
use crate::validation::Violations;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(Violations),

    #[error("Conflict: {0}")]
    Conflict(String),
}

use thiserror::Error;

use crate::ZoneId;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("The object could not be found: {what} {id}")]
    NotFound { what: &'static str, id: ZoneId },

    #[error("Index out of bounds: {what} (index={index}, len={len})")]
    IndexOob {
        what: &'static str,
        index: usize,
        len: usize,
    },
}

impl CoreError {
    pub fn zone_not_found(id: ZoneId) -> Self {
        Self::NotFound { what: "zone", id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

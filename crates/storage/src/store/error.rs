#![forbid(unsafe_code)]

use sl_core::keywords::ValueType;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage fault: {0}")]
    StorageFault(#[from] rusqlite::Error),
    #[error("config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("type mismatch (expected={expected}, found={found})")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },
    #[error("{entity} not found (id={id})")]
    NotFound { entity: &'static str, id: i64 },
    #[error("index out of range (index={index}, count={count})")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("duplicate definition: {0}")]
    DuplicateDefinition(String),
    #[error("foreign key violations after rebuilding {relation} (rows={rows})")]
    IntegrityViolation { relation: String, rows: usize },
    #[error("wrong value type (expected={expected}, actual={actual})")]
    WrongValueType {
        expected: ValueType,
        actual: ValueType,
    },
}

impl StoreError {
    pub(in crate::store) fn type_mismatch(expected: &'static str, found: impl ToString) -> Self {
        Self::TypeMismatch {
            expected,
            found: found.to_string(),
        }
    }

    pub(in crate::store) fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
}

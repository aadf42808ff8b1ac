// Classification of PostgreSQL constraint failures

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Constraint failures the repositories translate into domain errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageFailure {
    UniqueViolation,
    ForeignKeyViolation,
    Other,
}

pub fn classify(error: &sqlx::Error) -> StorageFailure {
    let Some(db_error) = error.as_database_error() else {
        return StorageFailure::Other;
    };

    match db_error.code().as_deref() {
        Some(UNIQUE_VIOLATION) => StorageFailure::UniqueViolation,
        Some(FOREIGN_KEY_VIOLATION) => StorageFailure::ForeignKeyViolation,
        _ => StorageFailure::Other,
    }
}

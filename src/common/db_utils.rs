use crate::common::error::AppError;

/// Converte violação de UNIQUE no erro de domínio informado; o resto vira DatabaseError.
pub(crate) fn map_unique_violation<F>(e: sqlx::Error, on_conflict: F) -> AppError
where
    F: FnOnce(Option<&str>) -> AppError,
{
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return on_conflict(db_err.constraint());
        }
    }
    e.into()
}

/// Violação de FK (linha ainda referenciada) vira o erro informado.
pub(crate) fn map_foreign_key_violation(e: sqlx::Error, on_referenced: AppError) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_foreign_key_violation() {
            return on_referenced;
        }
    }
    e.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_pass_through() {
        let err = map_unique_violation(sqlx::Error::RowNotFound, |_| AppError::EmailAlreadyExists);
        assert!(matches!(err, AppError::DatabaseError(sqlx::Error::RowNotFound)));

        let err = map_foreign_key_violation(sqlx::Error::RowNotFound, AppError::ProductInUse);
        assert!(matches!(err, AppError::DatabaseError(sqlx::Error::RowNotFound)));
    }
}

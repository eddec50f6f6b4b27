//! Transaction scoping on top of [`Database`].

use crate::error::DbError;
use crate::traits::Database;

/// Execute `body` within a `BEGIN` / `COMMIT` transaction, rolling back on
/// error.
///
/// A failed rollback is logged and the body's error is returned; a failed
/// commit triggers a rollback and is returned as the error.
pub fn with_transaction<D, T, E, F>(db: &D, body: F) -> Result<T, E>
where
    D: Database + ?Sized,
    E: From<DbError>,
    F: FnOnce(&D) -> Result<T, E>,
{
    db.begin()?;

    let result = body(db);

    match &result {
        Ok(_) => {
            if let Err(commit_err) = db.commit() {
                if let Err(rollback_err) = db.rollback() {
                    log::warn!("ROLLBACK after failed COMMIT also failed: {rollback_err}");
                }
                return Err(commit_err.into());
            }
        }
        Err(_) => {
            if let Err(rollback_err) = db.rollback() {
                log::warn!("ROLLBACK failed: {rollback_err}");
            }
        }
    }
    result
}

#[cfg(test)]
#[path = "transaction_test.rs"]
mod tests;

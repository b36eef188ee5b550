//! Unit-of-work helper.
//!
//! Every request handler owns exactly one transaction: core operations
//! stage inserts/updates/deletes on the passed `&DatabaseTransaction` and
//! never commit themselves; `with_txn` commits once on success and rolls
//! back on error.

use sea_orm::{DatabaseTransaction, TransactionTrait};

use super::txn_policy;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Run `f` inside a database transaction.
///
/// On `Ok`, the transaction is committed (or rolled back under the test
/// `RollbackOnOk` policy). On `Err`, it is rolled back best-effort and
/// the original error is preserved.
pub async fn with_txn<R, F>(state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'a> FnOnce(
        &'a DatabaseTransaction,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<R, AppError>> + 'a>,
    >,
{
    let txn = state.db.begin().await?;
    let out = f(&txn).await;

    match out {
        Ok(val) => {
            match txn_policy::current() {
                txn_policy::TxnPolicy::CommitOnOk => {
                    txn.commit().await?;
                    Ok(val)
                }
                txn_policy::TxnPolicy::RollbackOnOk => {
                    txn.rollback().await?;
                    Ok(val)
                }
            }
        }
        Err(err) => {
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}

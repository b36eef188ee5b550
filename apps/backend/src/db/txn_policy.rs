use std::sync::OnceLock;

/// Whether `with_txn` commits or rolls back when the operation succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnPolicy {
    /// Commit on success (default)
    CommitOnOk,
    /// Roll back on success (test isolation against a shared database)
    RollbackOnOk,
}

static POLICY: OnceLock<TxnPolicy> = OnceLock::new();

/// Current policy; `CommitOnOk` if none was set.
pub fn current() -> TxnPolicy {
    POLICY.get().copied().unwrap_or(TxnPolicy::CommitOnOk)
}

/// Set the process-wide policy. Only the first call has any effect.
pub fn set_txn_policy(policy: TxnPolicy) {
    let _ = POLICY.set(policy);
}

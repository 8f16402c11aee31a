use crate::db::KvStoreError;
use thiserror::Error;

// Callers branch on the variant, never on the message text. The first two
// variants signal a broken store rather than bad caller input; no sequence
// of ledger operations can produce them.
#[derive(Error, Debug)]
pub enum BankError {
    #[error("kvstore error happened: {0}")]
    KvStoreError(#[from] KvStoreError),
    #[error("inconsistency error")]
    Inconsistency,
    #[error("deposited amount is zero")]
    DepositAmountZero,
    #[error("withdrawn amount is zero")]
    WithdrawalAmountZero,
    #[error("withdrawn amount exceeds balance")]
    WithdrawalAmountExceedsBalance,
}

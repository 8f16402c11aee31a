mod config;
pub use config::BankConfig;
mod env;
pub use env::CallEnv;
mod error;
pub use error::*;
pub mod keys;
mod storage;

mod naive;
pub use naive::NaiveBank;
mod optimized;
pub use optimized::OptimizedBank;

use crate::core::{Address, Amount};
use crate::db::KvStore;

// What all_tasks hands back to the caller: both enumeration result sets and
// the arithmetic result, produced inside the same atomic unit of work.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRunSummary {
    pub roster: Vec<(Address, Amount)>,
    pub supplied: Vec<(Address, Amount)>,
    pub calculated: u64,
}

/// The ledger contract shared by both variants. Callers can swap one
/// implementation for the other and observe identical results and failure
/// kinds; only the gas charged to the env's meter may differ.
pub trait Bank<K: KvStore> {
    fn database(&self) -> &K;
    fn config(&self) -> &BankConfig;

    /// Credits the caller with the attached amount. The first deposit an
    /// account ever makes also appends it to the roster.
    fn deposit(&mut self, env: &mut CallEnv) -> Result<(), BankError>;

    /// Debits the caller and sends the value out through the env. The
    /// balance falls before the transfer is issued; the roster is never
    /// touched, even when the account drains to zero.
    fn withdraw(&mut self, env: &mut CallEnv, amount: Amount) -> Result<(), BankError>;

    /// Walks the roster and reads every member's current balance.
    fn count_users_and_balances(
        &self,
        env: &mut CallEnv,
    ) -> Result<Vec<(Address, Amount)>, BankError>;

    /// Reads the current balance of every address in the caller-supplied
    /// list, as-is: duplicates and unknown addresses are not filtered.
    fn count_users_and_balances_calldata(
        &self,
        env: &mut CallEnv,
        addresses: &[Address],
    ) -> Result<Vec<(Address, Amount)>, BankError>;

    /// Pure helper, total over its domain: `2 * (a + b)`, built from
    /// additions only. Inputs are assumed small enough not to overflow.
    fn calculate(&self, env: &mut CallEnv, a: u64, b: u64) -> u64;

    /// Runs deposit, withdraw (a fixed fraction of the attached amount),
    /// both enumerations and calculate as one atomic unit of work. A
    /// failing step rolls back everything the earlier steps did.
    fn all_tasks(
        &mut self,
        env: &mut CallEnv,
        addresses: &[Address],
        a: u64,
        b: u64,
    ) -> Result<TaskRunSummary, BankError>;
}

#[cfg(test)]
mod test;

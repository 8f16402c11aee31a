use super::storage;
use super::{Bank, BankConfig, BankError, CallEnv, TaskRunSummary};
use crate::core::{Address, Amount};
use crate::db::{KvStore, RamMirrorKvStore, WriteOp};

/// Same contract as [`NaiveBank`](super::NaiveBank), cheaper execution:
/// a persistent value an operation touches more than once lives in a local
/// between a single read and at most one write-back, and caller-supplied
/// lists are walked in place instead of being copied.
pub struct OptimizedBank<K: KvStore> {
    database: K,
    config: BankConfig,
}

impl<K: KvStore> OptimizedBank<K> {
    pub fn new(database: K, config: BankConfig) -> OptimizedBank<K> {
        OptimizedBank { database, config }
    }

    pub fn fork_on_ram(&self) -> OptimizedBank<RamMirrorKvStore<'_, K>> {
        OptimizedBank {
            database: self.database.mirror(),
            config: self.config.clone(),
        }
    }

    fn isolated<F, R>(&self, env: &mut CallEnv, f: F) -> Result<(Vec<WriteOp>, R), BankError>
    where
        F: FnOnce(
            &mut OptimizedBank<RamMirrorKvStore<'_, K>>,
            &mut CallEnv,
        ) -> Result<R, BankError>,
    {
        let mut fork = self.fork_on_ram();
        let sent = env.sent();
        match f(&mut fork, env) {
            Ok(result) => Ok((fork.database.to_ops(), result)),
            Err(e) => {
                env.revert_transfers(sent);
                Err(e)
            }
        }
    }
}

impl<K: KvStore> Bank<K> for OptimizedBank<K> {
    fn database(&self) -> &K {
        &self.database
    }

    fn config(&self) -> &BankConfig {
        &self.config
    }

    fn deposit(&mut self, env: &mut CallEnv) -> Result<(), BankError> {
        let (ops, _) = self.isolated(env, |bank, env| {
            let attached = env.attached();
            if attached == Amount(0) {
                return Err(BankError::DepositAmountZero);
            }
            let caller = env.caller();
            let mut balance = storage::read_balance(&bank.database, &bank.config, env, &caller)?;
            balance += attached;
            storage::write_balance(&mut bank.database, &bank.config, env, &caller, balance)?;
            if !storage::is_member(&bank.database, &bank.config, env, &caller)? {
                // One load serves both the slot index and the bump.
                let len = storage::roster_len(&bank.database, &bank.config, env)?;
                storage::write_roster_slot(&mut bank.database, &bank.config, env, len, &caller)?;
                storage::write_roster_len(&mut bank.database, &bank.config, env, len + 1)?;
                storage::mark_member(&mut bank.database, &bank.config, env, &caller)?;
            }
            Ok(())
        })?;
        self.database.update(&ops)?;
        Ok(())
    }

    fn withdraw(&mut self, env: &mut CallEnv, amount: Amount) -> Result<(), BankError> {
        let (ops, _) = self.isolated(env, |bank, env| {
            if amount == Amount(0) {
                return Err(BankError::WithdrawalAmountZero);
            }
            let caller = env.caller();
            let mut balance = storage::read_balance(&bank.database, &bank.config, env, &caller)?;
            if balance < amount {
                return Err(BankError::WithdrawalAmountExceedsBalance);
            }
            balance -= amount;
            storage::write_balance(&mut bank.database, &bank.config, env, &caller, balance)?;
            // Balance is down before any value leaves the bank.
            env.meter.charge(bank.config.schedule.transfer);
            env.transfer(caller, amount);
            Ok(())
        })?;
        self.database.update(&ops)?;
        Ok(())
    }

    fn count_users_and_balances(
        &self,
        env: &mut CallEnv,
    ) -> Result<Vec<(Address, Amount)>, BankError> {
        let len = storage::roster_len(&self.database, &self.config, env)?;
        let mut entries = Vec::with_capacity(len as usize);
        for index in 0..len {
            let address = storage::roster_slot(&self.database, &self.config, env, index)?;
            let balance = storage::read_balance(&self.database, &self.config, env, &address)?;
            entries.push((address, balance));
        }
        Ok(entries)
    }

    fn count_users_and_balances_calldata(
        &self,
        env: &mut CallEnv,
        addresses: &[Address],
    ) -> Result<Vec<(Address, Amount)>, BankError> {
        // Walked in place; nothing is copied out of the caller's buffer.
        let mut entries = Vec::with_capacity(addresses.len());
        for address in addresses {
            let balance = storage::read_balance(&self.database, &self.config, env, address)?;
            entries.push((*address, balance));
        }
        Ok(entries)
    }

    fn calculate(&self, env: &mut CallEnv, a: u64, b: u64) -> u64 {
        env.meter.charge(self.config.schedule.arith);
        let sum = a + b;
        env.meter.charge(self.config.schedule.arith);
        sum + sum
    }

    fn all_tasks(
        &mut self,
        env: &mut CallEnv,
        addresses: &[Address],
        a: u64,
        b: u64,
    ) -> Result<TaskRunSummary, BankError> {
        let (ops, summary) = self.isolated(env, |bank, env| {
            bank.deposit(env)?;
            let amount = env.attached() / bank.config.withdraw_ratio;
            bank.withdraw(env, amount)?;
            let roster = bank.count_users_and_balances(env)?;
            let supplied = bank.count_users_and_balances_calldata(env, addresses)?;
            let calculated = bank.calculate(env, a, b);
            Ok(TaskRunSummary {
                roster,
                supplied,
                calculated,
            })
        })?;
        self.database.update(&ops)?;
        Ok(summary)
    }
}

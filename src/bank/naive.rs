use super::storage;
use super::{Bank, BankConfig, BankError, CallEnv, TaskRunSummary};
use crate::core::{Address, Amount};
use crate::db::{KvStore, RamMirrorKvStore, WriteOp};

/// Straightforward rendition of the ledger: persistent storage is consulted
/// at every point of use, even when the same slot was read a moment ago,
/// and caller-supplied lists are copied into working memory before use.
pub struct NaiveBank<K: KvStore> {
    database: K,
    config: BankConfig,
}

impl<K: KvStore> NaiveBank<K> {
    pub fn new(database: K, config: BankConfig) -> NaiveBank<K> {
        NaiveBank { database, config }
    }

    pub fn fork_on_ram(&self) -> NaiveBank<RamMirrorKvStore<'_, K>> {
        NaiveBank {
            database: self.database.mirror(),
            config: self.config.clone(),
        }
    }

    fn isolated<F, R>(&self, env: &mut CallEnv, f: F) -> Result<(Vec<WriteOp>, R), BankError>
    where
        F: FnOnce(
            &mut NaiveBank<RamMirrorKvStore<'_, K>>,
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

impl<K: KvStore> Bank<K> for NaiveBank<K> {
    fn database(&self) -> &K {
        &self.database
    }

    fn config(&self) -> &BankConfig {
        &self.config
    }

    fn deposit(&mut self, env: &mut CallEnv) -> Result<(), BankError> {
        let (ops, _) = self.isolated(env, |bank, env| {
            if env.attached() == Amount(0) {
                return Err(BankError::DepositAmountZero);
            }
            let caller = env.caller();
            let balance = storage::read_balance(&bank.database, &bank.config, env, &caller)?;
            let credited = balance + env.attached();
            storage::write_balance(&mut bank.database, &bank.config, env, &caller, credited)?;
            if !storage::is_member(&bank.database, &bank.config, env, &caller)? {
                let index = storage::roster_len(&bank.database, &bank.config, env)?;
                storage::write_roster_slot(&mut bank.database, &bank.config, env, index, &caller)?;
                // The length is loaded again for the bump, although it was
                // just read for the slot index.
                let len = storage::roster_len(&bank.database, &bank.config, env)?;
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
            if storage::read_balance(&bank.database, &bank.config, env, &caller)? < amount {
                return Err(BankError::WithdrawalAmountExceedsBalance);
            }
            // A second load of the very slot the check above just read.
            let balance = storage::read_balance(&bank.database, &bank.config, env, &caller)?;
            storage::write_balance(
                &mut bank.database,
                &bank.config,
                env,
                &caller,
                balance - amount,
            )?;
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
        let mut entries = Vec::new();
        let mut index = 0;
        // The loop bound hits storage once per iteration.
        while index < storage::roster_len(&self.database, &self.config, env)? {
            let address = storage::roster_slot(&self.database, &self.config, env, index)?;
            let balance = storage::read_balance(&self.database, &self.config, env, &address)?;
            entries.push((address, balance));
            index += 1;
        }
        Ok(entries)
    }

    fn count_users_and_balances_calldata(
        &self,
        env: &mut CallEnv,
        addresses: &[Address],
    ) -> Result<Vec<(Address, Amount)>, BankError> {
        // The caller's buffer is copied into working memory in full before
        // the walk, one charged word per entry.
        env.meter
            .charge(self.config.schedule.memory_word * addresses.len() as u64);
        let addresses = addresses.to_vec();
        let mut entries = Vec::new();
        for address in addresses {
            let balance = storage::read_balance(&self.database, &self.config, env, &address)?;
            entries.push((address, balance));
        }
        Ok(entries)
    }

    fn calculate(&self, env: &mut CallEnv, a: u64, b: u64) -> u64 {
        // The inner sum is computed twice, once per side of the final
        // addition.
        env.meter.charge(self.config.schedule.arith);
        let lhs = a + b;
        env.meter.charge(self.config.schedule.arith);
        let rhs = a + b;
        env.meter.charge(self.config.schedule.arith);
        lhs + rhs
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

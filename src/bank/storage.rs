use super::keys;
use super::{BankConfig, BankError, CallEnv};
use crate::core::{Address, Amount};
use crate::db::{KvStore, WriteOp};

// Charged slot accessors. Every call here is one metered touch of
// persistent storage; how often they get called is exactly what separates
// the naive bank from the optimized one.

pub(super) fn read_balance<K: KvStore>(
    database: &K,
    config: &BankConfig,
    env: &mut CallEnv,
    address: &Address,
) -> Result<Amount, BankError> {
    env.meter.charge(config.schedule.storage_read);
    Ok(match database.get(keys::balance(address))? {
        Some(b) => b.try_into()?,
        None => Amount(0),
    })
}

pub(super) fn write_balance<K: KvStore>(
    database: &mut K,
    config: &BankConfig,
    env: &mut CallEnv,
    address: &Address,
    amount: Amount,
) -> Result<(), BankError> {
    env.meter.charge(config.schedule.storage_write);
    Ok(database.update(&[WriteOp::Put(keys::balance(address), amount.into())])?)
}

pub(super) fn is_member<K: KvStore>(
    database: &K,
    config: &BankConfig,
    env: &mut CallEnv,
    address: &Address,
) -> Result<bool, BankError> {
    env.meter.charge(config.schedule.storage_read);
    Ok(database.get(keys::member(address))?.is_some())
}

pub(super) fn mark_member<K: KvStore>(
    database: &mut K,
    config: &BankConfig,
    env: &mut CallEnv,
    address: &Address,
) -> Result<(), BankError> {
    env.meter.charge(config.schedule.storage_write);
    Ok(database.update(&[WriteOp::Put(keys::member(address), true.into())])?)
}

pub(super) fn roster_len<K: KvStore>(
    database: &K,
    config: &BankConfig,
    env: &mut CallEnv,
) -> Result<u64, BankError> {
    env.meter.charge(config.schedule.storage_read);
    Ok(match database.get(keys::roster_len())? {
        Some(b) => b.try_into()?,
        None => 0,
    })
}

pub(super) fn write_roster_len<K: KvStore>(
    database: &mut K,
    config: &BankConfig,
    env: &mut CallEnv,
    len: u64,
) -> Result<(), BankError> {
    env.meter.charge(config.schedule.storage_write);
    Ok(database.update(&[WriteOp::Put(keys::roster_len(), len.into())])?)
}

pub(super) fn roster_slot<K: KvStore>(
    database: &K,
    config: &BankConfig,
    env: &mut CallEnv,
    index: u64,
) -> Result<Address, BankError> {
    env.meter.charge(config.schedule.storage_read);
    match database.get(keys::roster(index))? {
        Some(b) => Ok(b.try_into()?),
        None => Err(BankError::Inconsistency),
    }
}

pub(super) fn write_roster_slot<K: KvStore>(
    database: &mut K,
    config: &BankConfig,
    env: &mut CallEnv,
    index: u64,
    address: &Address,
) -> Result<(), BankError> {
    env.meter.charge(config.schedule.storage_write);
    Ok(database.update(&[WriteOp::Put(keys::roster(index), (*address).into())])?)
}

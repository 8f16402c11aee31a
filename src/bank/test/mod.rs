use super::*;
use crate::config::bank::get_bank_config;
use crate::core::hash::Sha3Hasher;
use crate::db::RamKvStore;
use crate::meter::Gas;

fn naive_bank() -> NaiveBank<RamKvStore> {
    NaiveBank::new(RamKvStore::new(), get_bank_config())
}

fn optimized_bank() -> OptimizedBank<RamKvStore> {
    OptimizedBank::new(RamKvStore::new(), get_bank_config())
}

fn alice() -> Address {
    "0x00000000000000000000000000000000000000aa"
        .parse()
        .unwrap()
}

fn bob() -> Address {
    "0x00000000000000000000000000000000000000bb"
        .parse()
        .unwrap()
}

fn carol() -> Address {
    "0x00000000000000000000000000000000000000cc"
        .parse()
        .unwrap()
}

fn amount(s: &str) -> Amount {
    s.parse().unwrap()
}

// State peeks go straight to the store, bypassing the meter.
fn stored_balance<K: KvStore, B: Bank<K>>(bank: &B, address: &Address) -> Amount {
    match bank.database().get(keys::balance(address)).unwrap() {
        Some(b) => b.try_into().unwrap(),
        None => Amount(0),
    }
}

fn stored_roster_len<K: KvStore, B: Bank<K>>(bank: &B) -> u64 {
    match bank.database().get(keys::roster_len()).unwrap() {
        Some(b) => b.try_into().unwrap(),
        None => 0,
    }
}

fn state_checksum<K: KvStore, B: Bank<K>>(bank: &B) -> [u8; 32] {
    bank.database().checksum::<Sha3Hasher>().unwrap()
}

fn deposit<K: KvStore, B: Bank<K>>(
    bank: &mut B,
    caller: Address,
    attached: Amount,
) -> Result<Gas, BankError> {
    let mut env = CallEnv::new(caller, attached);
    bank.deposit(&mut env)?;
    Ok(env.meter.used())
}

fn withdraw<K: KvStore, B: Bank<K>>(
    bank: &mut B,
    caller: Address,
    amount: Amount,
) -> Result<Gas, BankError> {
    let mut env = CallEnv::new(caller, Amount(0));
    bank.withdraw(&mut env, amount)?;
    Ok(env.meter.used())
}

fn check_deposit_credits_exactly<K: KvStore, B: Bank<K>>(bank: &mut B) -> Result<(), BankError> {
    assert_eq!(stored_balance(bank, &alice()), Amount(0));
    deposit(bank, alice(), amount("1.0"))?;
    assert_eq!(stored_balance(bank, &alice()), amount("1.0"));
    assert_eq!(stored_roster_len(bank), 1);

    // A later deposit tops the balance up without re-enrolling the account.
    deposit(bank, alice(), amount("0.5"))?;
    assert_eq!(stored_balance(bank, &alice()), amount("1.5"));
    assert_eq!(stored_roster_len(bank), 1);

    deposit(bank, bob(), amount("2.0"))?;
    assert_eq!(stored_roster_len(bank), 2);
    Ok(())
}

#[test]
fn test_deposit_credits_exactly() -> Result<(), BankError> {
    check_deposit_credits_exactly(&mut naive_bank())?;
    check_deposit_credits_exactly(&mut optimized_bank())
}

fn check_zero_deposit_rejected<K: KvStore, B: Bank<K>>(bank: &mut B) -> Result<(), BankError> {
    deposit(bank, alice(), amount("1.0"))?;
    let before = state_checksum(bank);

    assert!(matches!(
        deposit(bank, alice(), Amount(0)),
        Err(BankError::DepositAmountZero)
    ));
    assert!(matches!(
        deposit(bank, bob(), Amount(0)),
        Err(BankError::DepositAmountZero)
    ));

    assert_eq!(state_checksum(bank), before);
    assert_eq!(stored_roster_len(bank), 1);
    Ok(())
}

#[test]
fn test_zero_deposit_rejected() -> Result<(), BankError> {
    check_zero_deposit_rejected(&mut naive_bank())?;
    check_zero_deposit_rejected(&mut optimized_bank())
}

fn check_withdraw<K: KvStore, B: Bank<K>>(bank: &mut B) -> Result<(), BankError> {
    deposit(bank, alice(), amount("1.0"))?;
    let before = state_checksum(bank);

    assert!(matches!(
        withdraw(bank, alice(), Amount(0)),
        Err(BankError::WithdrawalAmountZero)
    ));
    assert!(matches!(
        withdraw(bank, alice(), amount("2.0")),
        Err(BankError::WithdrawalAmountExceedsBalance)
    ));
    assert!(matches!(
        withdraw(bank, bob(), amount("0.1")),
        Err(BankError::WithdrawalAmountExceedsBalance)
    ));
    assert_eq!(state_checksum(bank), before);

    let mut env = CallEnv::new(alice(), Amount(0));
    bank.withdraw(&mut env, amount("0.4"))?;
    assert_eq!(stored_balance(bank, &alice()), amount("0.6"));
    assert_eq!(env.transfers(), &[(alice(), amount("0.4"))]);

    // Draining the account is fine and does not shrink the roster.
    bank.withdraw(&mut env, amount("0.6"))?;
    assert_eq!(stored_balance(bank, &alice()), Amount(0));
    assert_eq!(stored_roster_len(bank), 1);
    Ok(())
}

#[test]
fn test_withdraw() -> Result<(), BankError> {
    check_withdraw(&mut naive_bank())?;
    check_withdraw(&mut optimized_bank())
}

fn check_drained_account_not_reenrolled<K: KvStore, B: Bank<K>>(
    bank: &mut B,
) -> Result<(), BankError> {
    deposit(bank, alice(), amount("1.0"))?;
    withdraw(bank, alice(), amount("1.0"))?;
    deposit(bank, alice(), amount("0.3"))?;

    let mut env = CallEnv::new(alice(), Amount(0));
    let entries = bank.count_users_and_balances(&mut env)?;
    assert_eq!(entries, vec![(alice(), amount("0.3"))]);
    Ok(())
}

#[test]
fn test_drained_account_not_reenrolled() -> Result<(), BankError> {
    check_drained_account_not_reenrolled(&mut naive_bank())?;
    check_drained_account_not_reenrolled(&mut optimized_bank())
}

fn check_enumeration_idempotent<K: KvStore, B: Bank<K>>(bank: &mut B) -> Result<(), BankError> {
    deposit(bank, alice(), amount("1.0"))?;
    deposit(bank, bob(), amount("2.0"))?;
    let before = state_checksum(bank);

    let mut env = CallEnv::new(carol(), Amount(0));
    let first = bank.count_users_and_balances(&mut env)?;
    let second = bank.count_users_and_balances(&mut env)?;
    assert_eq!(first, second);
    assert_eq!(
        first,
        vec![(alice(), amount("1.0")), (bob(), amount("2.0"))]
    );

    // Read-only: enumerating persists nothing.
    assert_eq!(state_checksum(bank), before);
    Ok(())
}

#[test]
fn test_enumeration_idempotent() -> Result<(), BankError> {
    check_enumeration_idempotent(&mut naive_bank())?;
    check_enumeration_idempotent(&mut optimized_bank())
}

fn check_calldata_enumeration_unfiltered<K: KvStore, B: Bank<K>>(
    bank: &mut B,
) -> Result<(), BankError> {
    deposit(bank, alice(), amount("1.0"))?;

    // Duplicates and never-registered addresses pass through untouched.
    let list = vec![bob(), alice(), bob()];
    let mut env = CallEnv::new(alice(), Amount(0));
    let entries = bank.count_users_and_balances_calldata(&mut env, &list)?;
    assert_eq!(
        entries,
        vec![
            (bob(), Amount(0)),
            (alice(), amount("1.0")),
            (bob(), Amount(0)),
        ]
    );

    let empty = bank.count_users_and_balances_calldata(&mut env, &[])?;
    assert!(empty.is_empty());
    Ok(())
}

#[test]
fn test_calldata_enumeration_unfiltered() -> Result<(), BankError> {
    check_calldata_enumeration_unfiltered(&mut naive_bank())?;
    check_calldata_enumeration_unfiltered(&mut optimized_bank())
}

fn check_calculate<K: KvStore, B: Bank<K>>(bank: &mut B) {
    let mut env = CallEnv::new(alice(), Amount(0));
    assert_eq!(bank.calculate(&mut env, 5, 3), 16);
    assert_eq!(bank.calculate(&mut env, 0, 0), 0);
    assert_eq!(bank.calculate(&mut env, 7, 0), 14);
}

#[test]
fn test_calculate() {
    check_calculate(&mut naive_bank());
    check_calculate(&mut optimized_bank());
}

fn check_all_tasks<K: KvStore, B: Bank<K>>(bank: &mut B) -> Result<(), BankError> {
    let list = vec![bob(), carol()];
    let mut env = CallEnv::new(alice(), amount("1.0"));
    let summary = bank.all_tasks(&mut env, &list, 5, 3)?;

    // Half of the deposit is withdrawn again before the roster walk.
    assert_eq!(summary.roster, vec![(alice(), amount("0.5"))]);
    assert_eq!(
        summary.supplied,
        vec![(bob(), Amount(0)), (carol(), Amount(0))]
    );
    assert_eq!(summary.calculated, 16);

    assert_eq!(stored_balance(bank, &alice()), amount("0.5"));
    assert_eq!(stored_roster_len(bank), 1);
    assert_eq!(env.transfers(), &[(alice(), amount("0.5"))]);
    Ok(())
}

#[test]
fn test_all_tasks() -> Result<(), BankError> {
    check_all_tasks(&mut naive_bank())?;
    check_all_tasks(&mut optimized_bank())
}

fn check_all_tasks_rolls_back<K: KvStore, B: Bank<K>>(bank: &mut B) -> Result<(), BankError> {
    deposit(bank, alice(), amount("1.0"))?;
    let before = state_checksum(bank);

    // One base unit deposited: the internal withdrawal rounds down to zero
    // and the whole composite unit of work is thrown away.
    let mut env = CallEnv::new(bob(), Amount(1));
    assert!(matches!(
        bank.all_tasks(&mut env, &[alice()], 5, 3),
        Err(BankError::WithdrawalAmountZero)
    ));

    assert_eq!(state_checksum(bank), before);
    assert_eq!(stored_balance(bank, &bob()), Amount(0));
    assert_eq!(stored_roster_len(bank), 1);
    assert!(env.transfers().is_empty());
    // The work done up to the failure stays paid for.
    assert!(env.meter.used() > Gas(0));
    Ok(())
}

#[test]
fn test_all_tasks_rolls_back() -> Result<(), BankError> {
    check_all_tasks_rolls_back(&mut naive_bank())?;
    check_all_tasks_rolls_back(&mut optimized_bank())
}

fn check_no_value_created_or_destroyed<K: KvStore, B: Bank<K>>(
    bank: &mut B,
) -> Result<(), BankError> {
    deposit(bank, alice(), amount("1.0"))?;
    deposit(bank, bob(), amount("2.0"))?;
    withdraw(bank, alice(), amount("0.25"))?;
    deposit(bank, alice(), amount("0.5"))?;
    withdraw(bank, bob(), amount("2.0"))?;

    let mut sum = Amount(0);
    for (_, v) in bank.database().pairs(keys::balance_prefix()).unwrap() {
        let balance: Amount = v.try_into().unwrap();
        sum += balance;
    }
    assert_eq!(sum, amount("1.25"));
    Ok(())
}

#[test]
fn test_no_value_created_or_destroyed() -> Result<(), BankError> {
    check_no_value_created_or_destroyed(&mut naive_bank())?;
    check_no_value_created_or_destroyed(&mut optimized_bank())
}

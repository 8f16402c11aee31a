use crate::bank::{Bank, BankError, CallEnv, NaiveBank, OptimizedBank};
use crate::config::bank::get_bank_config;
use crate::core::{Address, Amount};
use crate::db::{KvStore, LevelDbKvStore, RamKvStore};
use crate::meter::Gas;
use colored::Colorize;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(
    name = "gasbank",
    about = "Compare gas spent by the naive and the optimized bank"
)]
pub enum Opt {
    /// Run every operation on both variants with identical inputs and
    /// print the gas bill side by side
    Compare {
        /// Attached deposit amount
        #[structopt(long, default_value = "1.0")]
        amount: Amount,
        /// Number of pre-enrolled accounts to walk over
        #[structopt(long, default_value = "4")]
        users: u64,
        /// Keep the two ledgers in leveldb stores under this directory
        /// instead of in ram
        #[structopt(long, parse(from_os_str))]
        db: Option<PathBuf>,
    },
}

pub fn run(opt: Opt) -> Result<(), BankError> {
    match opt {
        Opt::Compare { amount, users, db } => match db {
            Some(path) => {
                let naive = NaiveBank::new(
                    LevelDbKvStore::new(&path.join("naive"))?,
                    get_bank_config(),
                );
                let optimized = OptimizedBank::new(
                    LevelDbKvStore::new(&path.join("optimized"))?,
                    get_bank_config(),
                );
                compare(naive, optimized, amount, users)
            }
            None => {
                let naive = NaiveBank::new(RamKvStore::new(), get_bank_config());
                let optimized = OptimizedBank::new(RamKvStore::new(), get_bank_config());
                compare(naive, optimized, amount, users)
            }
        },
    }
}

fn compare<K: KvStore>(
    mut naive: NaiveBank<K>,
    mut optimized: OptimizedBank<K>,
    amount: Amount,
    users: u64,
) -> Result<(), BankError> {
    let caller: Address = rand::random();
    let list: Vec<Address> = (0..users).map(|_| rand::random()).collect();
    log::info!(
        "comparing with caller {}, deposit {} and {} listed accounts",
        caller,
        amount,
        list.len()
    );

    // Enroll the listed accounts on both sides so the walks have work to do.
    for address in list.iter() {
        let mut env = CallEnv::new(*address, amount);
        naive.deposit(&mut env)?;
        let mut env = CallEnv::new(*address, amount);
        optimized.deposit(&mut env)?;
    }

    let naive_bill = run_operations(&mut naive, caller, amount, &list)?;
    let optimized_bill = run_operations(&mut optimized, caller, amount, &list)?;

    println!(
        "{:<36}{:>12}{:>12}{:>9}",
        "operation".bold(),
        "naive".bold(),
        "optimized".bold(),
        "saved".bold()
    );
    for ((name, naive_gas), (_, optimized_gas)) in
        naive_bill.iter().zip(optimized_bill.iter())
    {
        let saved = if naive_gas.0 == 0 {
            0
        } else {
            100 - optimized_gas.0 * 100 / naive_gas.0
        };
        println!(
            "{:<36}{:>12}{:>12}{:>9}",
            name,
            naive_gas,
            optimized_gas,
            format!("{}%", saved).green()
        );
    }

    Ok(())
}

fn run_operations<K: KvStore, B: Bank<K>>(
    bank: &mut B,
    caller: Address,
    amount: Amount,
    list: &[Address],
) -> Result<Vec<(&'static str, Gas)>, BankError> {
    let mut bill = Vec::new();

    let mut env = CallEnv::new(caller, amount);
    bank.deposit(&mut env)?;
    bill.push(("deposit", env.meter.used()));

    let mut env = CallEnv::new(caller, Amount(0));
    bank.withdraw(&mut env, amount / 2)?;
    bill.push(("withdraw", env.meter.used()));

    let mut env = CallEnv::new(caller, Amount(0));
    bank.count_users_and_balances(&mut env)?;
    bill.push(("count_users_and_balances", env.meter.used()));

    let mut env = CallEnv::new(caller, Amount(0));
    bank.count_users_and_balances_calldata(&mut env, list)?;
    bill.push(("count_users_and_balances_calldata", env.meter.used()));

    let mut env = CallEnv::new(caller, Amount(0));
    bank.calculate(&mut env, 5, 3);
    bill.push(("calculate", env.meter.used()));

    let mut env = CallEnv::new(caller, amount);
    bank.all_tasks(&mut env, list, 5, 3)?;
    bill.push(("all_tasks", env.meter.used()));

    Ok(bill)
}

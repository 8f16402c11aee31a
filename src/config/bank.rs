use crate::bank::BankConfig;
use crate::meter::{Gas, GasSchedule};

pub fn get_bank_config() -> BankConfig {
    BankConfig {
        schedule: GasSchedule {
            storage_read: Gas(100),
            storage_write: Gas(300),
            memory_word: Gas(3),
            arith: Gas(3),
            transfer: Gas(50),
        },
        withdraw_ratio: 2,
    }
}

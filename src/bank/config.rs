use crate::meter::GasSchedule;

#[derive(Debug, Clone)]
pub struct BankConfig {
    pub schedule: GasSchedule,
    /// Divisor applied to the attached amount to derive the internal
    /// withdrawal of all_tasks. Integer division, so a deposit of a single
    /// base unit rounds the withdrawal down to zero.
    pub withdraw_ratio: u64,
}

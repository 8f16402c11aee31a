pub mod bank;

pub const CODE: &str = "ETH";
pub const SYMBOL: &str = "Ξ";
pub const UNIT_ZEROS: u8 = 9;
pub const UNIT: u64 = 1_000_000_000;

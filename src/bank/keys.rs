use crate::core::Address;
use crate::db::StringKey;

pub fn balance(address: &Address) -> StringKey {
    format!("BAL-{}", address).into()
}

pub fn balance_prefix() -> StringKey {
    "BAL-".into()
}

pub fn member(address: &Address) -> StringKey {
    format!("MEM-{}", address).into()
}

pub fn roster_len() -> StringKey {
    "RLN".into()
}

pub fn roster(index: u64) -> StringKey {
    format!("RST-{:010}", index).into()
}

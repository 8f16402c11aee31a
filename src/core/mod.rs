mod address;
mod money;

pub mod hash;

pub use address::{Address, ParseAddressError};
pub use money::{Amount, ParseAmountError};

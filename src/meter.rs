use std::ops::{Add, AddAssign, Mul};

// Cost unit charged by the host environment. The ledger only ever adds to a
// meter; reading and judging the total is the host's business.
#[derive(
    serde::Serialize,
    serde::Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    PartialOrd,
    Ord,
    Eq,
    Default,
)]
pub struct Gas(pub u64);

impl std::fmt::Display for Gas {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AddAssign for Gas {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Add for Gas {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Mul<u64> for Gas {
    type Output = Self;

    fn mul(self, other: u64) -> Self {
        Self(self.0 * other)
    }
}

/// Price list for the metered steps an operation can take. One slot read or
/// write is charged per touch of persistent storage, not per distinct slot.
#[derive(Debug, Clone)]
pub struct GasSchedule {
    pub storage_read: Gas,
    pub storage_write: Gas,
    pub memory_word: Gas,
    pub arith: Gas,
    pub transfer: Gas,
}

#[derive(Debug, Clone, Default)]
pub struct GasMeter {
    used: Gas,
}

impl GasMeter {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn charge(&mut self, gas: Gas) {
        self.used += gas;
    }

    pub fn used(&self) -> Gas {
        self.used
    }
}

use crate::config::{SYMBOL, UNIT, UNIT_ZEROS};
use std::ops::{Add, AddAssign, Div, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;

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
pub struct Amount(pub u64);

#[derive(Error, Debug)]
pub enum ParseAmountError {
    #[error("amount invalid")]
    Invalid,
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = self.0.to_string();
        while s.len() <= UNIT_ZEROS as usize {
            s.insert(0, '0');
        }
        s.insert(s.len() - UNIT_ZEROS as usize, '.');
        while let Some(last) = s.chars().last() {
            if last == '0' {
                s.pop();
            } else {
                break;
            }
        }
        write!(f, "{}{}", s, SYMBOL)
    }
}

impl FromStr for Amount {
    type Err = ParseAmountError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut s = s.trim().trim_end_matches(SYMBOL).to_string();
        if let Some(dot_pos) = s.find('.') {
            let dot_rpos = s.len() - 1 - dot_pos;
            if dot_rpos > UNIT_ZEROS as usize {
                return Err(ParseAmountError::Invalid);
            }
            for _ in 0..UNIT_ZEROS as usize - dot_rpos {
                s.push('0');
            }
            s.remove(dot_pos);
            Ok(Self(s.parse().map_err(|_| ParseAmountError::Invalid)?))
        } else {
            let as_u64: u64 = s.parse().map_err(|_| ParseAmountError::Invalid)?;
            Ok(Self(as_u64 * UNIT))
        }
    }
}

impl From<u64> for Amount {
    fn from(n: u64) -> Self {
        Self(n)
    }
}

impl From<Amount> for u64 {
    fn from(a: Amount) -> u64 {
        a.0
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Div<u64> for Amount {
    type Output = Self;

    fn div(self, other: u64) -> Self {
        Self(self.0 / other)
    }
}
